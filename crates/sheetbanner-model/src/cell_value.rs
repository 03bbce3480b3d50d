use chrono::NaiveDateTime;
use ordered_float::OrderedFloat;

/// A spreadsheet cell's raw scalar value.
///
/// Modeled as an explicit tagged variant rather than a dynamically typed
/// scalar. `Float` wraps `OrderedFloat` so `CellValue` can derive
/// `Eq`/`Hash`, which `Record`'s nested maps need for deterministic
/// comparison in tests. How a `CellValue` ends up on the wire (JSON,
/// CSV, ...) is a downstream concern; this type intentionally carries
/// no serialization format of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Null,
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
    Text(String),
    Date(NaiveDateTime),
}

impl CellValue {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    #[must_use]
    pub fn float(v: f64) -> Self {
        Self::Float(OrderedFloat(v))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// the "numeric" predicate matches `Int`/`Float`.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// the "text-like" predicate matches the non-numeric
    /// variants (a column carrying even one such value among its
    /// non-null entries is classified as text-like under §4.5.1(D)).
    #[must_use]
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Text(_) | Self::Date(_))
    }

    /// Coerce to the textual form used for header-path segments and
    /// attribute keys. Never panics; every variant has a total textual
    /// representation.
    #[must_use]
    pub fn display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => v.0.to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Text(v) => v.clone(),
            Self::Date(v) => v.to_string(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_string())
    }
}
