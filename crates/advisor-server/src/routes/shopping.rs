//! Shopping flow: search form, submission, recommendations page

use crate::error::AppError;
use crate::session::{Flash, FlashLevel, SessionId};
use crate::state::SharedState;
use crate::templates::markdown_to_html;
use advisor_shop::catalog::{BRANDS, BUDGET_BUCKETS, CATEGORIES, preferences_for};
use advisor_shop::SearchForm;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tracing::{info, warn};

pub const MISSING_CREDENTIALS: &str =
    "API keys are not configured. Set GOOGLE_API_KEY and FIRECRAWL_API_KEY to get recommendations.";
pub const NO_SEARCH: &str = "Please submit a search first.";

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/results", get(results))
}

/// Attach the session cookie so the browser keeps the id
fn with_session(state: &SharedState, session: &SessionId, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if let Some(cookie) = session.cookie(state.sessions.ttl()) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

fn render_form(
    state: &SharedState,
    form: &SearchForm,
    errors: &[String],
    flashes: &[Flash],
) -> Result<Html<String>, AppError> {
    let page = state.pages.render(
        "index.html",
        json!({
            "categories": CATEGORIES,
            "budgets": BUDGET_BUCKETS,
            "brands": BRANDS,
            "preferences": preferences_for(form.category.trim()),
            "form": form,
            "errors": errors,
            "flashes": flashes,
        }),
    )?;
    Ok(Html(page))
}

async fn index(State(state): State<SharedState>, headers: HeaderMap) -> Result<Response, AppError> {
    let session = SessionId::from_headers_or_new(&headers);
    let mut flashes = state.sessions.take_flashes(&session).await;
    if state.shopper.is_none() && !flashes.iter().any(|f| f.message == MISSING_CREDENTIALS) {
        flashes.push(Flash::new(FlashLevel::Warning, MISSING_CREDENTIALS));
    }

    let page = render_form(&state, &SearchForm::default(), &[], &flashes)?;
    Ok(with_session(&state, &session, page))
}

async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let session = SessionId::from_headers_or_new(&headers);
    let form = SearchForm::from_pairs(url::form_urlencoded::parse(&body));

    match form.validate() {
        Ok(selection) => {
            info!(category = selection.category(), "Search submitted");
            state.sessions.store_search(&session, selection).await;
            Ok(with_session(&state, &session, Redirect::to("/results")))
        }
        Err(errors) => {
            let errors: Vec<String> = errors.iter().map(ToString::to_string).collect();
            info!(?errors, "Search form rejected");
            let page = render_form(&state, &form, &errors, &[])?;
            Ok(with_session(&state, &session, page))
        }
    }
}

async fn results(State(state): State<SharedState>, headers: HeaderMap) -> Result<Response, AppError> {
    let session = SessionId::from_headers_or_new(&headers);

    let Some(selection) = state.sessions.last_search(&session).await else {
        state
            .sessions
            .flash(&session, Flash::new(FlashLevel::Info, NO_SEARCH))
            .await;
        return Ok(with_session(&state, &session, Redirect::to("/")));
    };

    let Some(shopper) = &state.shopper else {
        warn!("Recommendations requested without credentials");
        state
            .sessions
            .flash(&session, Flash::new(FlashLevel::Warning, MISSING_CREDENTIALS))
            .await;
        return Ok(with_session(&state, &session, Redirect::to("/")));
    };

    let query = selection.to_query();
    let recommendations = shopper.get_recommendations(&query).await;
    let page = state.pages.render(
        "results.html",
        json!({
            "query": query,
            "selection": selection,
            "recommendations": markdown_to_html(&recommendations),
        }),
    )?;
    Ok(with_session(&state, &session, Html(page)))
}

#[cfg(test)]
mod tests {
    use super::super::{router, testing};
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn form_post(body: &'static str) -> Request<Body> {
        Request::post("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_submit_then_results() {
        let agent = Arc::new(testing::FakeAgent::default());
        let app = router(testing::state(Some(agent.clone())));

        let response = app
            .clone()
            .oneshot(form_post(
                "category=electronics&specific_item=headphones&preferences=eco_friendly\
                 &preferences=popular&budget_range=1000-5000&brand=sony&additional_info=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/results");
        let cookie = session_cookie(&response);

        let response = app
            .oneshot(get_with_cookie("/results", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = testing::body_text(response).await;
        assert!(page.contains("<strong>Sony WH-1000XM4</strong>"));

        let queries = agent.queries.lock().unwrap();
        assert_eq!(
            queries.as_slice(),
            ["I am looking for headphones from sony with the following preferences: \
              eco_friendly, popular. Budget: between Rs. 1,000 and Rs. 5,000"]
        );
    }

    #[tokio::test]
    async fn test_missing_budget_rerenders_form() {
        let app = router(testing::state(Some(Arc::new(testing::FakeAgent::default()))));

        let response = app
            .clone()
            .oneshot(form_post("category=books&specific_item=atlas"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        let page = testing::body_text(response).await;
        assert!(page.contains("Budget is required"));
        assert!(page.contains(r#"value="atlas""#));

        let response = app
            .oneshot(get_with_cookie("/results", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_results_without_search_flashes_once() {
        let app = router(testing::state(Some(Arc::new(testing::FakeAgent::default()))));

        let response = app
            .clone()
            .oneshot(Request::get("/results").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let cookie = session_cookie(&response);

        let response = app
            .clone()
            .oneshot(get_with_cookie("/", &cookie))
            .await
            .unwrap();
        assert!(testing::body_text(response).await.contains(NO_SEARCH));

        let response = app.oneshot(get_with_cookie("/", &cookie)).await.unwrap();
        assert!(!testing::body_text(response).await.contains(NO_SEARCH));
    }

    #[tokio::test]
    async fn test_missing_credentials_redirects_with_warning() {
        let app = router(testing::state(None));

        let response = app
            .clone()
            .oneshot(form_post("category=books&budget_range=0-1000"))
            .await
            .unwrap();
        let cookie = session_cookie(&response);

        let response = app
            .clone()
            .oneshot(get_with_cookie("/results", &cookie))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app.oneshot(get_with_cookie("/", &cookie)).await.unwrap();
        let page = testing::body_text(response).await;
        assert_eq!(page.matches("API keys are not configured").count(), 1);
    }
}
