use crate::calculator::require_positive;
use crate::error::{Error, Result};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_SYMBOL_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: u64,
    pub symbol: String,
    pub shares: f64,
    pub average_cost: f64,
    pub current_price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub symbol: String,
    pub shares: f64,
    #[serde(alias = "avgPrice", alias = "avg_price")]
    pub average_cost: f64,
    #[serde(alias = "lastPrice", alias = "last_price")]
    pub current_price: f64,
}

/// Partial edit; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingUpdate {
    pub symbol: Option<String>,
    pub shares: Option<f64>,
    #[serde(alias = "avgPrice", alias = "avg_price")]
    pub average_cost: Option<f64>,
    #[serde(alias = "lastPrice", alias = "last_price")]
    pub current_price: Option<f64>,
}

pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(Error::InvalidInput("Symbol is required".to_string()));
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(Error::InvalidInput(format!(
            "Symbol must be {} characters or less",
            MAX_SYMBOL_LEN
        )));
    }
    Ok(symbol)
}

impl NewHolding {
    pub fn validate(self) -> Result<NewHolding> {
        Ok(NewHolding {
            symbol: normalize_symbol(&self.symbol)?,
            shares: require_positive("Shares", self.shares)?,
            average_cost: require_positive("Average price", self.average_cost)?,
            current_price: require_positive("Current price", self.current_price)?,
        })
    }

    pub fn into_holding(self, id: u64, now: NaiveDateTime) -> Holding {
        Holding {
            id,
            symbol: self.symbol,
            shares: self.shares,
            average_cost: self.average_cost,
            current_price: self.current_price,
            created_at: now,
            updated_at: now,
        }
    }
}

impl HoldingUpdate {
    pub fn validate(self) -> Result<HoldingUpdate> {
        Ok(HoldingUpdate {
            symbol: self.symbol.as_deref().map(normalize_symbol).transpose()?,
            shares: self
                .shares
                .map(|v| require_positive("Shares", v))
                .transpose()?,
            average_cost: self
                .average_cost
                .map(|v| require_positive("Average price", v))
                .transpose()?,
            current_price: self
                .current_price
                .map(|v| require_positive("Current price", v))
                .transpose()?,
        })
    }
}

impl Holding {
    /// Applies an already validated update.
    pub fn apply(&mut self, update: HoldingUpdate, now: NaiveDateTime) {
        if let Some(symbol) = update.symbol {
            self.symbol = symbol;
        }
        if let Some(shares) = update.shares {
            self.shares = shares;
        }
        if let Some(average_cost) = update.average_cost {
            self.average_cost = average_cost;
        }
        if let Some(current_price) = update.current_price {
            self.current_price = current_price;
        }
        self.updated_at = now;
    }

    pub fn principal(&self) -> f64 {
        self.shares * self.average_cost
    }

    pub fn current_value(&self) -> f64 {
        self.shares * self.current_price
    }

    pub fn profit_loss(&self) -> f64 {
        self.current_value() - self.principal()
    }

    pub fn profit_loss_percent(&self) -> f64 {
        let principal = self.principal();
        if principal > 0.0 {
            (self.profit_loss() / principal) * 100.0
        } else {
            0.0
        }
    }

    /// Price return relative to cost, e.g. 0.05 for +5%.
    pub fn return_ratio(&self) -> f64 {
        (self.current_price - self.average_cost) / self.average_cost
    }
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_holding(symbol: &str, shares: f64, avg: f64, price: f64) -> NewHolding {
        NewHolding {
            symbol: symbol.to_string(),
            shares,
            average_cost: avg,
            current_price: price,
        }
    }

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        let holding = new_holding("  aapl ", 1.0, 1.0, 1.0).validate().unwrap();
        assert_eq!(holding.symbol, "AAPL");
    }

    #[test]
    fn symbol_length_is_limited() {
        assert!(new_holding("ABCDEFGHIJ", 1.0, 1.0, 1.0).validate().is_ok());
        assert!(matches!(
            new_holding("ABCDEFGHIJK", 1.0, 1.0, 1.0).validate(),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            new_holding("   ", 1.0, 1.0, 1.0).validate(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn numbers_must_be_positive() {
        assert!(new_holding("MSFT", 0.0, 1.0, 1.0).validate().is_err());
        assert!(new_holding("MSFT", 1.0, -2.0, 1.0).validate().is_err());
        assert!(new_holding("MSFT", 1.0, 1.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn deserializes_original_field_names() {
        let parsed: NewHolding = serde_json::from_str(
            r#"{"symbol":"ogdc","shares":10,"avgPrice":120.5,"currentPrice":130}"#,
        )
        .unwrap();
        assert_eq!(parsed, new_holding("ogdc", 10.0, 120.5, 130.0));

        let parsed: NewHolding = serde_json::from_str(
            r#"{"symbol":"ogdc","shares":10,"avg_price":120.5,"last_price":130}"#,
        )
        .unwrap();
        assert_eq!(parsed, new_holding("ogdc", 10.0, 120.5, 130.0));
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let created = now();
        let mut holding = new_holding("HBL", 10.0, 100.0, 90.0)
            .validate()
            .unwrap()
            .into_holding(1, created);

        let update = HoldingUpdate {
            current_price: Some(110.0),
            symbol: Some("hbl2".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        holding.apply(update, created);

        assert_eq!(holding.symbol, "HBL2");
        assert_eq!(holding.shares, 10.0);
        assert_eq!(holding.average_cost, 100.0);
        assert_eq!(holding.current_price, 110.0);
    }

    #[test]
    fn invalid_update_is_rejected() {
        let update = HoldingUpdate {
            shares: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn per_holding_metrics() {
        let holding = new_holding("LUCK", 10.0, 100.0, 120.0).into_holding(1, now());

        assert_eq!(holding.principal(), 1000.0);
        assert_eq!(holding.current_value(), 1200.0);
        assert_eq!(holding.profit_loss(), 200.0);
        assert_eq!(holding.profit_loss_percent(), 20.0);
        assert_eq!(holding.return_ratio(), 0.2);
    }
}
