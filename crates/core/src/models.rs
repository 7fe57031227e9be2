use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Pair
// ---------------------------------------------------------------------------

/// Errors produced when parsing a canonical pair identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairError {
    #[error("Pair must be of the form BASE/QUOTE, got {0:?}")]
    InvalidFormat(String),
    #[error("Pair {0:?} has an empty base or quote")]
    EmptyLeg(String),
}

/// A canonical `BASE/QUOTE` pair identifier (e.g. "BTC/USD").
///
/// This is the key shared by every exchange adapter before it is translated
/// into the exchange's own symbol convention, and the row key of the price
/// table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pair {
    repr: String,
    split: usize,
}

impl Pair {
    /// Parse a `BASE/QUOTE` string. Legs are trimmed and uppercased.
    pub fn parse(input: &str) -> Result<Self, PairError> {
        let mut legs = input.split('/');
        let (base, quote) = match (legs.next(), legs.next(), legs.next()) {
            (Some(base), Some(quote), None) => (base.trim(), quote.trim()),
            _ => return Err(PairError::InvalidFormat(input.to_string())),
        };
        if base.is_empty() || quote.is_empty() {
            return Err(PairError::EmptyLeg(input.to_string()));
        }
        let base = base.to_uppercase();
        Ok(Self {
            repr: format!("{}/{}", base, quote.to_uppercase()),
            split: base.len(),
        })
    }

    pub fn base(&self) -> &str {
        &self.repr[..self.split]
    }

    pub fn quote(&self) -> &str {
        &self.repr[self.split + 1..]
    }

    /// The canonical `BASE/QUOTE` form.
    pub fn as_str(&self) -> &str {
        &self.repr
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl std::str::FromStr for Pair {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pair::parse(s)
    }
}

impl TryFrom<String> for Pair {
    type Error = PairError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pair::parse(&value)
    }
}

impl From<Pair> for String {
    fn from(pair: Pair) -> Self {
        pair.repr
    }
}

// ---------------------------------------------------------------------------
// Observations
// ---------------------------------------------------------------------------

/// A single successful price fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub exchange: String,
    pub pair: Pair,
    pub price: f64,
}

// ---------------------------------------------------------------------------
// Price Table
// ---------------------------------------------------------------------------

/// Pivoted view of a set of observations: one row per pair, one column per
/// exchange. Cells with no observation are `None` and render blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Row labels, in order of first appearance.
    pub rows: Vec<Pair>,
    /// Column labels (exchange names), in order of first appearance.
    pub columns: Vec<String>,
    /// `cells[row][column]`.
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Highest and lowest quote for a pair across exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub low_exchange: String,
    pub low: f64,
    pub high_exchange: String,
    pub high: f64,
}

impl Spread {
    pub fn absolute(&self) -> f64 {
        self.high - self.low
    }

    /// Spread relative to the low quote, in percent.
    pub fn percent(&self) -> f64 {
        if self.low == 0.0 {
            0.0
        } else {
            (self.high - self.low) / self.low * 100.0
        }
    }
}

impl PriceTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_index(&self, pair: &Pair) -> Option<usize> {
        self.rows.iter().position(|p| p == pair)
    }

    /// Price observed on `exchange` for `pair`, if any.
    pub fn get(&self, pair: &Pair, exchange: &str) -> Option<f64> {
        let row = self.row_index(pair)?;
        let col = self.columns.iter().position(|c| c == exchange)?;
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// All cells of a row, aligned with `columns`.
    pub fn row(&self, pair: &Pair) -> Option<&[Option<f64>]> {
        self.row_index(pair)
            .and_then(|i| self.cells.get(i))
            .map(Vec::as_slice)
    }

    /// Cross-exchange spread for a row. Needs at least two prices.
    pub fn spread(&self, pair: &Pair) -> Option<Spread> {
        let cells = self.row(pair)?;
        let priced: Vec<(&str, f64)> = self
            .columns
            .iter()
            .zip(cells)
            .filter_map(|(name, cell)| cell.map(|price| (name.as_str(), price)))
            .collect();
        if priced.len() < 2 {
            return None;
        }

        let (mut low, mut high) = (priced[0], priced[0]);
        for &(name, price) in &priced[1..] {
            if price < low.1 {
                low = (name, price);
            }
            if price > high.1 {
                high = (name, price);
            }
        }
        Some(Spread {
            low_exchange: low.0.to_string(),
            low: low.1,
            high_exchange: high.0.to_string(),
            high: high.1,
        })
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A user-facing, non-fatal message about a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub exchange: String,
    pub message: String,
}

impl Notice {
    pub fn warning(exchange: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            exchange: exchange.to_string(),
            message: message.into(),
        }
    }

    pub fn error(exchange: &str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            exchange: exchange.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.exchange, self.message)
    }
}
