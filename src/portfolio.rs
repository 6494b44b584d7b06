pub mod holding;
pub mod summary;

pub use holding::{Holding, HoldingUpdate, NewHolding};
pub use summary::{summarize, PortfolioSummary};
