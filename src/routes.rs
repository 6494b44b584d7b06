use crate::error::{ApiError, Error};
use crate::store::HoldingStore;
use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod calc;
pub mod holdings;

pub struct AppState {
    pub store: Arc<dyn HoldingStore>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn app(store: Arc<dyn HoldingStore>) -> Router {
    let state = Arc::new(AppState { store });

    let holding_routes = Router::new()
        .route("/", get(holdings::list).post(holdings::create))
        .route("/summary", get(holdings::summary))
        .route(
            "/{id}",
            get(holdings::get)
                .put(holdings::update)
                .delete(holdings::delete),
        );

    let calc_routes = Router::new().route("/suggest-buy", post(calc::suggest_buy));

    Router::new()
        .route("/health", get(health))
        .nest("/api/holdings", holding_routes)
        .nest("/api/calc", calc_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs a store call on the blocking pool so SQLite work stays off the runtime threads.
pub(crate) async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn HoldingStore) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| Error::Storage(format!("store task failed: {}", e)))?;
    Ok(result?)
}

/// Turns a rejected JSON body into the same `{ error }` shape as domain errors.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(Error::InvalidInput(rejection.body_text()).into()),
    }
}
