use super::body;
use crate::calculator::{solve, SolveInput, SolveResult};
use crate::error::{ApiResult, Error, Result};
use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SuggestBuyRequest {
    shares: Option<f64>,
    #[serde(alias = "averageCost")]
    avg: Option<f64>,
    #[serde(alias = "marketPrice")]
    price: Option<f64>,
    #[serde(alias = "targetAverage")]
    target: Option<f64>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum SuggestBuyResponse {
    Message {
        n: u64,
        message: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    Plan {
        suggested_shares_fractional: f64,
        suggested_shares_rounded: u64,
        new_average: f64,
        investment_needed: f64,
        explanation: String,
    },
}

fn required(name: &str, value: Option<f64>) -> Result<f64> {
    value.ok_or_else(|| Error::InvalidInput(format!("{} is required", name)))
}

impl SuggestBuyRequest {
    fn into_input(self) -> Result<SolveInput> {
        Ok(SolveInput {
            shares: required("Shares", self.shares)?,
            average_cost: required("Average price", self.avg)?,
            market_price: required("Current price", self.price)?,
            target_average: required("Target average", self.target)?,
        })
    }
}

impl SuggestBuyResponse {
    fn new(input: &SolveInput, result: SolveResult) -> Self {
        match result {
            SolveResult::Plan(plan) => SuggestBuyResponse::Plan {
                suggested_shares_fractional: plan.exact_shares,
                suggested_shares_rounded: plan.rounded_shares,
                new_average: plan.new_average,
                investment_needed: plan.cost,
                explanation: input.explain(&plan),
            },
            other => SuggestBuyResponse::Message {
                n: 0,
                message: other.message().unwrap_or_default(),
            },
        }
    }
}

pub async fn suggest_buy(
    payload: std::result::Result<Json<SuggestBuyRequest>, JsonRejection>,
) -> ApiResult<Json<SuggestBuyResponse>> {
    let input = body(payload)?.into_input()?;
    let result = solve(
        input.shares,
        input.average_cost,
        input.market_price,
        input.target_average,
    )?;
    tracing::info!(?input, ?result, "Solved target average");

    Ok(Json(SuggestBuyResponse::new(&input, result)))
}
