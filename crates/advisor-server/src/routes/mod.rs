//! HTTP routes

mod charts;
mod health;
mod shopping;
mod stocks;

use crate::state::SharedState;
use axum::Router;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Upper bound for one request, agent tool loops included
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub fn router(state: SharedState) -> Router {
    Router::new()
        .merge(shopping::routes())
        .merge(stocks::routes())
        .merge(charts::routes())
        .merge(health::routes())
        .with_state(state)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}
