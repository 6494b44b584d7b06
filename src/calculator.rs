//! Target average price solver.
//!
//! Buying `n` shares at price `P` on top of `S` shares averaging `A` gives a
//! new average of `(S*A + n*P) / (S + n)`. Setting that to the target `T` and
//! solving for `n` yields `n = S*(T-A)/(P-T)`.

use crate::error::{Error, Result};
use position::Position;

pub mod position;

#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    AlreadyAtTarget,
    Unreachable,
    NoPurchaseNeeded,
    Plan(PurchasePlan),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchasePlan {
    pub exact_shares: f64,
    pub rounded_shares: u64,
    pub new_average: f64,
    pub cost: f64,
}

impl SolveResult {
    /// Human readable reason for the outcomes that carry no plan.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SolveResult::AlreadyAtTarget => Some("Already at target average"),
            SolveResult::Unreachable => {
                Some("Can't reach target by buying at current price (P == T).")
            }
            SolveResult::NoPurchaseNeeded => Some("No additional purchase needed"),
            SolveResult::Plan(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SolveInput {
    pub shares: f64,
    pub average_cost: f64,
    pub market_price: f64,
    pub target_average: f64,
}

impl SolveInput {
    pub fn validate(&self) -> Result<()> {
        require_positive("Shares", self.shares)?;
        require_positive("Average price", self.average_cost)?;
        require_positive("Current price", self.market_price)?;
        require_positive("Target average", self.target_average)?;
        Ok(())
    }

    pub fn explain(&self, plan: &PurchasePlan) -> String {
        format!(
            "n = S*(T-A)/(P-T) => {}*({}-{})/({}-{}) = {}",
            self.shares,
            self.target_average,
            self.average_cost,
            self.market_price,
            self.target_average,
            plan.exact_shares
        )
    }
}

// 2^64; every whole number below it converts to u64 exactly
const MAX_PURCHASE: f64 = u64::MAX as f64;

pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!("{} must be greater than 0", name)))
    }
}

pub fn solve(
    shares: f64,
    average_cost: f64,
    market_price: f64,
    target_average: f64,
) -> Result<SolveResult> {
    let input = SolveInput {
        shares,
        average_cost,
        market_price,
        target_average,
    };
    input.validate()?;

    // Exact comparison: nearly equal prices fall through to the formula
    if market_price == target_average {
        if average_cost == target_average {
            return Ok(SolveResult::AlreadyAtTarget);
        }
        return Ok(SolveResult::Unreachable);
    }

    let exact_shares = shares * (target_average - average_cost) / (market_price - target_average);
    if exact_shares <= 0.0 {
        return Ok(SolveResult::NoPurchaseNeeded);
    }

    // Whole shares only, and never fall short of the target
    let rounded = exact_shares.ceil();
    if rounded >= MAX_PURCHASE {
        return Err(Error::InvalidInput(format!(
            "Required purchase of {} shares is too large to plan",
            exact_shares
        )));
    }
    let rounded_shares = rounded as u64;

    let mut position = Position::new(shares, average_cost);
    position.buy(rounded_shares as f64, market_price);

    Ok(SolveResult::Plan(PurchasePlan {
        exact_shares,
        rounded_shares,
        new_average: position.average_price,
        cost: rounded_shares as f64 * market_price,
    }))
}
