//! Value at Risk.
//!
//! Parametric (delta-normal) VaR with its factor and position
//! decomposition, and historical VaR over repriced P&L scenarios.

mod decomposition;
mod historical;
mod parametric;
mod scenarios;

pub use decomposition::{FactorContribution, VarDecomposition};
pub use historical::{
    boudoukh_var, boudoukh_weights, expected_shortfall, historical_var, hull_white_var,
    peaks_over_threshold, simple_var, stress_loss, HistoricalVarResult, TailFit, POT_SHAPE,
};
pub use parametric::parametric_var;
pub use scenarios::{Scenario, ScenarioGenerator, ScenarioSet};
