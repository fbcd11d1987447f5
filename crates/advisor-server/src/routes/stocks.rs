//! Stock dashboard: markdown report endpoints, the stock list and its page
//!
//! Report endpoints always answer 200; failures arrive as an error report.

use crate::error::AppError;
use crate::state::SharedState;
use advisor_market::{MarkdownReport, StockList};
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub(super) struct TickerRequest {
    #[serde(default)]
    pub ticker: String,
}

#[derive(Debug, Default, Deserialize)]
struct PromptRequest {
    #[serde(default)]
    prompt: String,
}

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/stocks", get(stocks_page))
        .route("/api/get_stock_price", post(stock_price))
        .route("/api/get_analyst_recommendations", post(analyst_recommendations))
        .route("/api/get_company_info", post(company_info))
        .route("/api/get_company_news", post(company_news))
        .route("/api/run_custom_analysis", post(custom_analysis))
        .route("/api/get_stock_list", get(stock_list))
}

async fn stock_price(
    State(state): State<SharedState>,
    Json(req): Json<TickerRequest>,
) -> Json<MarkdownReport> {
    Json(state.market.stock_price(&req.ticker).await)
}

async fn analyst_recommendations(
    State(state): State<SharedState>,
    Json(req): Json<TickerRequest>,
) -> Json<MarkdownReport> {
    Json(state.market.analyst_recommendations(&req.ticker).await)
}

async fn company_info(
    State(state): State<SharedState>,
    Json(req): Json<TickerRequest>,
) -> Json<MarkdownReport> {
    Json(state.market.company_info(&req.ticker).await)
}

async fn company_news(
    State(state): State<SharedState>,
    Json(req): Json<TickerRequest>,
) -> Json<MarkdownReport> {
    Json(state.market.company_news(&req.ticker).await)
}

async fn custom_analysis(
    State(state): State<SharedState>,
    Json(req): Json<PromptRequest>,
) -> Json<MarkdownReport> {
    Json(state.market.custom_analysis(&req.prompt).await)
}

async fn stock_list(State(state): State<SharedState>) -> Json<StockList> {
    Json(state.market.stock_list())
}

async fn stocks_page(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let page = state.pages.render(
        "stocks.html",
        json!({ "sectors": state.market.stock_list().sectors() }),
    )?;
    Ok(Html(page))
}
