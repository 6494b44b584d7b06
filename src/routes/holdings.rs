use super::{body, with_store, AppState};
use crate::error::{ApiResult, Error};
use crate::portfolio::{summarize, Holding, HoldingUpdate, NewHolding, PortfolioSummary};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// A holding together with the figures shown next to it in the holdings table.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRow {
    #[serde(flatten)]
    holding: Holding,
    principal: f64,
    current_value: f64,
    profit_loss: f64,
    profit_loss_percent: f64,
}

impl From<Holding> for HoldingRow {
    fn from(holding: Holding) -> Self {
        HoldingRow {
            principal: holding.principal(),
            current_value: holding.current_value(),
            profit_loss: holding.profit_loss(),
            profit_loss_percent: holding.profit_loss_percent(),
            holding,
        }
    }
}

#[derive(Serialize)]
pub struct Created {
    id: u64,
}

#[derive(Serialize)]
pub struct Deleted {
    success: bool,
}

fn holding_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, Error> {
    path.map(|Path(id)| id)
        .map_err(|_| Error::InvalidInput("Holding id must be a positive integer".to_string()))
}

pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<HoldingRow>>> {
    let holdings = with_store(&state, |store| store.list()).await?;
    Ok(Json(holdings.into_iter().map(HoldingRow::from).collect()))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<HoldingRow>> {
    let id = holding_id(path)?;
    match with_store(&state, move |store| store.get(id)).await? {
        Some(holding) => Ok(Json(HoldingRow::from(holding))),
        None => Err(Error::NotFound(id).into()),
    }
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewHolding>, JsonRejection>,
) -> ApiResult<Json<Created>> {
    let new_holding = body(payload)?;
    let holding = with_store(&state, move |store| store.create(new_holding)).await?;
    tracing::info!("Created holding {} ({})", holding.id, holding.symbol);
    Ok(Json(Created { id: holding.id }))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<HoldingUpdate>, JsonRejection>,
) -> ApiResult<Json<Holding>> {
    let id = holding_id(path)?;
    let update = body(payload)?;
    let holding = with_store(&state, move |store| store.update(id, update)).await?;
    tracing::info!("Updated holding {} ({})", holding.id, holding.symbol);
    Ok(Json(holding))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Deleted>> {
    let id = holding_id(path)?;
    if with_store(&state, move |store| store.delete(id)).await? {
        tracing::info!("Deleted holding {}", id);
    } else {
        tracing::debug!("Delete of unknown holding {} ignored", id);
    }
    Ok(Json(Deleted { success: true }))
}

pub async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSummary>> {
    let holdings = with_store(&state, |store| store.list()).await?;
    Ok(Json(summarize(&holdings)))
}
