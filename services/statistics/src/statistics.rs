//! Statistics snapshot returned to callers.

use serde::{Deserialize, Serialize};
use types::numeric::Price;

use crate::aggregate::Aggregate;

/// Min/max/average/count over the current window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub avg: Price,
    pub max: Price,
    pub min: Price,
    pub count: u64,
}

impl Statistics {
    /// All-zero result for a scope with no live data.
    pub fn empty() -> Self {
        Self {
            avg: Price::ZERO,
            max: Price::ZERO,
            min: Price::ZERO,
            count: 0,
        }
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&Aggregate> for Statistics {
    fn from(aggregate: &Aggregate) -> Self {
        Self {
            avg: aggregate.average(),
            max: aggregate.max(),
            min: aggregate.min(),
            count: aggregate.count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_statistics_serialize_scaled_zeros() {
        let json = serde_json::to_value(Statistics::empty()).unwrap();
        assert_eq!(json["avg"], "0.00");
        assert_eq!(json["max"], "0.00");
        assert_eq!(json["min"], "0.00");
        assert_eq!(json["count"], 0);
    }

    #[test]
    fn test_from_aggregate() {
        let mut aggregate = Aggregate::new();
        aggregate.incorporate(Price::from_u64(2));
        aggregate.incorporate(Price::from_u64(4));

        let stats = Statistics::from(&aggregate);
        assert_eq!(stats.avg, Price::from_u64(3));
        assert_eq!(stats.min, Price::from_u64(2));
        assert_eq!(stats.max, Price::from_u64(4));
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_statistics_json_round_trip() {
        let json = r#"{"avg":"20.00","max":"30.00","min":"10.00","count":3}"#;
        let stats: Statistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.avg, Price::from_u64(20));
        assert_eq!(stats.count, 3);
        assert_eq!(serde_json::to_string(&stats).unwrap(), json);
    }
}
