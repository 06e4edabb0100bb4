use crate::model::fields::{epoch_seconds, take_typed};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One remote-reported price/mileage observation window for a VIN
///
/// Decoded tolerantly: a field of an unexpected type stays in `extra` and the
/// record itself is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct HistoryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub miles: Option<Number>,

    /// Epoch seconds when the remote first saw this listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen_at: Option<Number>,

    /// Epoch seconds when the remote last saw this listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<Number>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for HistoryRecord {
    fn from(mut raw: Map<String, Value>) -> Self {
        Self {
            price: take_typed(&mut raw, "price"),
            miles: take_typed(&mut raw, "miles"),
            first_seen_at: take_typed(&mut raw, "first_seen_at"),
            last_seen_at: take_typed(&mut raw, "last_seen_at"),
            extra: raw,
        }
    }
}

impl HistoryRecord {
    /// Price as a float when it is strictly positive
    pub fn positive_price(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(Number::as_f64)
            .filter(|p| *p > 0.0)
    }

    /// `first_seen_at` as whole epoch seconds
    pub fn first_seen_epoch(&self) -> Option<i64> {
        self.first_seen_at.as_ref().and_then(epoch_seconds)
    }

    /// `last_seen_at` as whole epoch seconds
    pub fn last_seen_epoch(&self) -> Option<i64> {
        self.last_seen_at.as_ref().and_then(epoch_seconds)
    }
}

/// A VIN together with its history, most recent record first
///
/// Index 0 is the latest observation and the last index the earliest; the
/// order is kept exactly as the remote returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleHistory {
    pub vin: String,
    pub history: Vec<HistoryRecord>,
}

impl VehicleHistory {
    pub fn new(vin: impl Into<String>, history: Vec<HistoryRecord>) -> Self {
        Self {
            vin: vin.into(),
            history,
        }
    }

    /// The most recent record
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.history.first()
    }

    /// The earliest record
    pub fn earliest(&self) -> Option<&HistoryRecord> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_history_array() {
        let body = r#"[
            {"id": "h2", "price": 22500, "miles": 30100, "first_seen_at": 1700000000, "last_seen_at": 1701000000, "seller_name": "A"},
            {"id": "h1", "price": 0, "first_seen_at": 1690000000, "last_seen_at": 1695000000}
        ]"#;

        let records: Vec<HistoryRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].positive_price(), Some(22500.0));
        assert_eq!(records[1].positive_price(), None);
        assert_eq!(records[0].extra.get("seller_name"), Some(&Value::from("A")));
    }

    #[test]
    fn test_latest_and_earliest_follow_received_order() {
        let history = VehicleHistory::new(
            "V1",
            vec![
                HistoryRecord {
                    last_seen_at: Some(Number::from(300i64)),
                    ..HistoryRecord::default()
                },
                HistoryRecord {
                    first_seen_at: Some(Number::from(100i64)),
                    ..HistoryRecord::default()
                },
            ],
        );

        assert_eq!(history.latest().and_then(HistoryRecord::last_seen_epoch), Some(300));
        assert_eq!(history.earliest().and_then(HistoryRecord::first_seen_epoch), Some(100));
    }

    #[test]
    fn test_snapshot_shape() {
        let history = VehicleHistory::new("V1", vec![HistoryRecord::default()]);
        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value["vin"], "V1");
        assert!(value["history"].is_array());
    }

    #[test]
    fn test_float_and_odd_timestamps_keep_the_record() {
        let body = r#"[
            {"price": 100, "first_seen_at": 1700000000.0, "last_seen_at": 1701000000},
            {"price": 90, "first_seen_at": "yesterday", "last_seen_at": null}
        ]"#;

        let records: Vec<HistoryRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_seen_epoch(), Some(1_700_000_000));
        assert_eq!(records[0].last_seen_epoch(), Some(1_701_000_000));
        assert_eq!(records[1].first_seen_epoch(), None);
        assert_eq!(records[1].last_seen_epoch(), None);
        assert_eq!(records[1].positive_price(), Some(90.0));

        let value = serde_json::to_value(&records).unwrap();
        assert_eq!(value[0]["first_seen_at"], 1_700_000_000.0);
        assert_eq!(value[1]["first_seen_at"], "yesterday");
        assert_eq!(value[1]["last_seen_at"], Value::Null);
    }
}
