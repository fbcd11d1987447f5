//! Chart configuration endpoints; failures answer 500 with `{error}`

use super::stocks::TickerRequest;
use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct ChartResponse {
    config: Value,
}

type ChartResult = Result<Json<ChartResponse>, AppError>;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/get_price_trends", post(price_trends))
        .route("/api/get_volume_analysis", post(volume_analysis))
        .route("/api/get_technical_indicators", post(technical_indicators))
}

async fn price_trends(State(state): State<SharedState>, Json(req): Json<TickerRequest>) -> ChartResult {
    let config = state.market.price_trends(&req.ticker).await?;
    Ok(Json(ChartResponse { config }))
}

async fn volume_analysis(
    State(state): State<SharedState>,
    Json(req): Json<TickerRequest>,
) -> ChartResult {
    let config = state.market.volume_analysis(&req.ticker).await?;
    Ok(Json(ChartResponse { config }))
}

async fn technical_indicators(
    State(state): State<SharedState>,
    Json(req): Json<TickerRequest>,
) -> ChartResult {
    let config = state.market.technical_indicators(&req.ticker).await?;
    Ok(Json(ChartResponse { config }))
}

#[cfg(test)]
mod tests {
    use super::super::{router, testing};
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_technical_indicators() {
        let response = router(testing::state(None))
            .oneshot(testing::json_post(
                "/api/get_technical_indicators",
                json!({"ticker": "AAPL"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = testing::body_json(response).await;
        let sma20 = &body["config"]["data"]["datasets"][1]["data"];
        assert_eq!(sma20[18], Value::Null);
        assert_eq!(sma20[19], json!(10.5));
        assert_eq!(body["config"]["data"]["datasets"][2]["data"][24], Value::Null);
    }

    #[tokio::test]
    async fn test_chart_failure_is_500() {
        for endpoint in [
            "/api/get_price_trends",
            "/api/get_volume_analysis",
            "/api/get_technical_indicators",
        ] {
            let response = router(testing::state(None))
                .oneshot(testing::json_post(endpoint, json!({"ticker": "ZZZZ"})))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{endpoint}");
            let body = testing::body_json(response).await;
            assert!(body["error"].as_str().unwrap().contains("ZZZZ"));
        }
    }
}
