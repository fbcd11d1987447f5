//! Market data shapes shared by the provider, the reports and the charts

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// History window for daily bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryRange {
    OneMonth,
    SixMonths,
}

impl HistoryRange {
    /// Calendar days covered by the window
    pub fn days(self) -> i64 {
        match self {
            Self::OneMonth => 30,
            Self::SixMonths => 182,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::SixMonths => "6mo",
        }
    }
}

/// One daily bar; prices may be NaN when the provider reports a gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Loose company metadata keyed by the provider's field names
///
/// Every field is optional; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoSnapshot(Map<String, Value>);

impl InfoSnapshot {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value, treating JSON null as absent
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// First present value among `keys`
    pub fn first_of(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
    }

    pub fn u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
        })
    }

    /// Display name, falling back to `fallback`
    pub fn short_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.str("shortName").unwrap_or(fallback)
    }

    /// `currentPrice`, else `regularMarketPrice`
    pub fn current_price(&self) -> Option<&Value> {
        self.first_of(&["currentPrice", "regularMarketPrice"])
    }
}

impl FromIterator<(String, Value)> for InfoSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Analyst rating changes as a loosely typed table, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTable {
    pub columns: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

impl RecommendationTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// First of `candidates` that is a column of this table
    pub fn resolve_column<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| self.has_column(c))
    }
}

/// A news headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(value: Value) -> InfoSnapshot {
        match value {
            Value::Object(map) => InfoSnapshot::new(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_current_price_fallback() {
        let snapshot = info(json!({"currentPrice": null, "regularMarketPrice": 187.5}));
        assert_eq!(snapshot.current_price(), Some(&json!(187.5)));
        assert_eq!(InfoSnapshot::default().current_price(), None);
    }

    #[test]
    fn test_typed_lookups() {
        let snapshot = info(json!({
            "shortName": "Apple Inc.",
            "fullTimeEmployees": 164000,
            "beta": 1.24,
            "sector": "",
        }));
        assert_eq!(snapshot.short_name_or("AAPL"), "Apple Inc.");
        assert_eq!(snapshot.u64("fullTimeEmployees"), Some(164_000));
        assert_eq!(snapshot.f64("beta"), Some(1.24));
        assert_eq!(snapshot.str("sector"), None);
        assert_eq!(snapshot.f64("missing"), None);
    }

    #[test]
    fn test_resolve_column() {
        let table = RecommendationTable {
            columns: vec!["Firm".into(), "To Grade".into()],
            rows: Vec::new(),
        };
        assert_eq!(table.resolve_column(&["toGrade", "To Grade"]), Some("To Grade"));
        assert_eq!(table.resolve_column(&["Action"]), None);
    }
}
