use super::holding::Holding;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    pub holding: Holding,
    pub return_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_holdings: usize,
    pub principal: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
    pub winning: usize,
    pub losing: usize,
    pub best_performer: Option<Performer>,
    pub worst_performer: Option<Performer>,
}

impl PortfolioSummary {
    pub fn calculate(holdings: &[Holding]) -> Self {
        if holdings.is_empty() {
            return Self::default();
        }

        let principal: f64 = holdings.iter().map(Holding::principal).sum();
        let current_value: f64 = holdings.iter().map(Holding::current_value).sum();
        let profit_loss = current_value - principal;
        let profit_loss_percent = if principal > 0.0 {
            (profit_loss / principal) * 100.0
        } else {
            0.0
        };

        let winning = holdings
            .iter()
            .filter(|h| h.current_price > h.average_cost)
            .count();
        let losing = holdings
            .iter()
            .filter(|h| h.current_price < h.average_cost)
            .count();

        // Strict comparisons keep the first holding on ties
        let best = holdings.iter().reduce(|best, current| {
            if current.return_ratio() > best.return_ratio() {
                current
            } else {
                best
            }
        });
        let worst = holdings.iter().reduce(|worst, current| {
            if current.return_ratio() < worst.return_ratio() {
                current
            } else {
                worst
            }
        });

        PortfolioSummary {
            total_holdings: holdings.len(),
            principal,
            current_value,
            profit_loss,
            profit_loss_percent,
            winning,
            losing,
            best_performer: best.map(Performer::from),
            worst_performer: worst.map(Performer::from),
        }
    }
}

impl From<&Holding> for Performer {
    fn from(holding: &Holding) -> Self {
        Performer {
            holding: holding.clone(),
            return_percent: holding.return_ratio() * 100.0,
        }
    }
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        PortfolioSummary {
            total_holdings: 0,
            principal: 0.0,
            current_value: 0.0,
            profit_loss: 0.0,
            profit_loss_percent: 0.0,
            winning: 0,
            losing: 0,
            best_performer: None,
            worst_performer: None,
        }
    }
}

pub fn summarize(holdings: &[Holding]) -> PortfolioSummary {
    PortfolioSummary::calculate(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::holding::{now, NewHolding};

    fn holding(id: u64, symbol: &str, shares: f64, avg: f64, price: f64) -> Holding {
        NewHolding {
            symbol: symbol.to_string(),
            shares,
            average_cost: avg,
            current_price: price,
        }
        .into_holding(id, now())
    }

    #[test]
    fn empty_portfolio() {
        for _ in 0..3 {
            let summary = summarize(&[]);
            assert_eq!(summary, PortfolioSummary::default());
            assert!(summary.best_performer.is_none());
            assert!(summary.worst_performer.is_none());
        }
    }

    #[test]
    fn totals() {
        let holdings = vec![
            holding(1, "AAPL", 10.0, 100.0, 105.0),
            holding(2, "MSFT", 5.0, 200.0, 194.0),
            holding(3, "TSLA", 2.0, 250.0, 280.0),
        ];
        let summary = summarize(&holdings);

        assert_eq!(summary.total_holdings, 3);
        assert_eq!(summary.principal, 1000.0 + 1000.0 + 500.0);
        assert_eq!(summary.current_value, 1050.0 + 970.0 + 560.0);
        assert_eq!(summary.profit_loss, summary.current_value - summary.principal);
        assert_eq!(summary.profit_loss_percent, 80.0 / 2500.0 * 100.0);
        assert_eq!(summary.winning, 2);
        assert_eq!(summary.losing, 1);
    }

    #[test]
    fn best_and_worst_performers() {
        // +5%, -3%, +12%
        let holdings = vec![
            holding(1, "AAPL", 10.0, 100.0, 105.0),
            holding(2, "MSFT", 5.0, 200.0, 194.0),
            holding(3, "TSLA", 2.0, 250.0, 280.0),
        ];
        let summary = summarize(&holdings);

        assert_eq!(summary.best_performer.unwrap().holding.symbol, "TSLA");
        assert_eq!(summary.worst_performer.unwrap().holding.symbol, "MSFT");
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let holdings = vec![
            holding(1, "FIRST", 1.0, 100.0, 110.0),
            holding(2, "SECOND", 3.0, 50.0, 55.0),
        ];
        let summary = summarize(&holdings);

        assert_eq!(summary.best_performer.unwrap().holding.id, 1);
        assert_eq!(summary.worst_performer.unwrap().holding.id, 1);
    }

    #[test]
    fn flat_holdings_are_neither_winning_nor_losing() {
        let holdings = vec![holding(1, "FLAT", 10.0, 100.0, 100.0)];
        let summary = summarize(&holdings);

        assert_eq!(summary.winning, 0);
        assert_eq!(summary.losing, 0);
        assert_eq!(summary.profit_loss, 0.0);
        assert_eq!(summary.best_performer.unwrap().return_percent, 0.0);
    }
}
