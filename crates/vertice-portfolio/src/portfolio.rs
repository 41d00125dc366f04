//! Portfolio and builder.

use serde::{Deserialize, Serialize};

use vertice_core::market::ReferenceData;
use vertice_core::types::Date;
use vertice_core::{VerticeError, VerticeResult};

use crate::instrument::InstrumentId;
use crate::position::Position;

/// An ordered, immutable list of positions as of a reference date.
///
/// The reference date gates every market-data lookup: nothing dated after
/// it is ever read.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    name: String,
    reference_date: Date,
    positions: Vec<Position>,
}

impl Portfolio {
    /// Creates a portfolio.
    ///
    /// # Errors
    ///
    /// `Configuration` if `positions` is empty.
    pub fn new(reference_date: Date, positions: Vec<Position>) -> VerticeResult<Self> {
        Self::builder()
            .reference_date(reference_date)
            .add_positions(positions)
            .build()
    }

    /// Creates a portfolio builder.
    #[must_use]
    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::new()
    }

    /// Resolves a position list, e.g. one loaded from JSON, against the
    /// reference tables.
    pub fn from_specs(
        reference_date: Date,
        specs: &[PositionSpec],
        reference: &ReferenceData,
    ) -> VerticeResult<Self> {
        let positions = specs
            .iter()
            .map(|spec| Position::resolve(&spec.instrument, spec.quantity, Some(reference)))
            .collect::<VerticeResult<Vec<_>>>()?;
        Self::new(reference_date, positions)
    }

    /// Portfolio name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference date of the analysis.
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Positions in insertion order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position at `index`.
    ///
    /// # Errors
    ///
    /// `Configuration` if the index is out of range.
    pub fn position(&self, index: usize) -> VerticeResult<&Position> {
        self.positions.get(index).ok_or_else(|| {
            VerticeError::configuration(format!(
                "position {index} out of range; portfolio has {}",
                self.positions.len()
            ))
        })
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a constructed portfolio.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A position as written in a position file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSpec {
    /// Instrument identifier.
    pub instrument: InstrumentId,
    /// Signed quantity.
    pub quantity: f64,
}

impl PositionSpec {
    /// Parses a JSON array of position specs.
    pub fn list_from_json(json: &str) -> VerticeResult<Vec<Self>> {
        serde_json::from_str(json)
            .map_err(|e| VerticeError::configuration(format!("invalid position list: {e}")))
    }
}

/// Builder for constructing a [`Portfolio`].
///
/// # Example
///
/// ```rust
/// use vertice_core::types::Date;
/// use vertice_portfolio::{Instrument, Portfolio, Position};
///
/// let portfolio = Portfolio::builder()
///     .name("Desk")
///     .reference_date(Date::from_ymd(2025, 5, 26).unwrap())
///     .add_position(Position::new(Instrument::br_equity("PETR4"), 1000.0).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(portfolio.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    name: Option<String>,
    reference_date: Option<Date>,
    positions: Vec<Position>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the reference date.
    #[must_use]
    pub fn reference_date(mut self, date: Date) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Adds a position.
    #[must_use]
    pub fn add_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Adds multiple positions.
    #[must_use]
    pub fn add_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.positions.extend(positions);
        self
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// `Configuration` if the reference date is missing or there are no
    /// positions.
    pub fn build(self) -> VerticeResult<Portfolio> {
        let reference_date = self
            .reference_date
            .ok_or_else(|| VerticeError::configuration("portfolio has no reference date"))?;
        if self.positions.is_empty() {
            return Err(VerticeError::configuration("portfolio has no positions"));
        }
        Ok(Portfolio {
            name: self.name.unwrap_or_else(|| "PORTFOLIO".to_string()),
            reference_date,
            positions: self.positions,
        })
    }
}
