use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const BOND_MARKER: &str = "-BD";

/// Read-only view of an instrument snapshot produced by the market data API.
pub trait MarketSnapshot {
    fn symbol(&self) -> &str;
    fn entry_time(&self) -> Option<&str>;
    fn previous_close(&self) -> Option<f64>;
    fn highest_bid_price(&self) -> Option<f64>;
    fn lowest_offer_price(&self) -> Option<f64>;

    /// Bonds are listed with a `-BD` marker in their symbol.
    fn is_bond(&self) -> bool {
        is_bond_symbol(self.symbol())
    }
}

pub fn is_bond_symbol(symbol: &str) -> bool {
    symbol.to_ascii_uppercase().contains(BOND_MARKER)
}

/// Instrument row as served by the upstream API. Fields this crate does not
/// interpret are kept in `extra` so filtered output round-trips.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct StockSnapshot {
    #[serde(rename = "Symbol")]
    pub symbol: String,

    #[serde(rename = "MDEntryTime", default, skip_serializing_if = "Option::is_none")]
    pub md_entry_time: Option<String>,

    #[serde(rename = "PreviousClose", default, skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,

    #[serde(rename = "HighestBidPrice", default, skip_serializing_if = "Option::is_none")]
    pub highest_bid_price: Option<f64>,

    #[serde(rename = "LowestOfferPrice", default, skip_serializing_if = "Option::is_none")]
    pub lowest_offer_price: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StockSnapshot {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            md_entry_time: None,
            previous_close: None,
            highest_bid_price: None,
            lowest_offer_price: None,
            extra: Map::new(),
        }
    }

    pub fn with_entry_time(mut self, entry_time: impl Into<String>) -> Self {
        self.md_entry_time = Some(entry_time.into());
        self
    }

    pub fn with_previous_close(mut self, price: f64) -> Self {
        self.previous_close = Some(price);
        self
    }

    pub fn with_bid(mut self, price: f64) -> Self {
        self.highest_bid_price = Some(price);
        self
    }

    pub fn with_offer(mut self, price: f64) -> Self {
        self.lowest_offer_price = Some(price);
        self
    }
}

impl MarketSnapshot for StockSnapshot {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn entry_time(&self) -> Option<&str> {
        self.md_entry_time.as_deref()
    }

    fn previous_close(&self) -> Option<f64> {
        self.previous_close
    }

    fn highest_bid_price(&self) -> Option<f64> {
        self.highest_bid_price
    }

    fn lowest_offer_price(&self) -> Option<f64> {
        self.lowest_offer_price
    }
}

impl<T: MarketSnapshot + ?Sized> MarketSnapshot for &T {
    fn symbol(&self) -> &str {
        (**self).symbol()
    }

    fn entry_time(&self) -> Option<&str> {
        (**self).entry_time()
    }

    fn previous_close(&self) -> Option<f64> {
        (**self).previous_close()
    }

    fn highest_bid_price(&self) -> Option<f64> {
        (**self).highest_bid_price()
    }

    fn lowest_offer_price(&self) -> Option<f64> {
        (**self).lowest_offer_price()
    }
}

impl fmt::Debug for StockSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StockSnapshot")
            .field("symbol", &self.symbol)
            .field("md_entry_time", &self.md_entry_time)
            .field("bid", &self.highest_bid_price)
            .field("offer", &self.lowest_offer_price)
            .field("previous_close", &self.previous_close)
            .field("extra_fields", &self.extra.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_marker_is_case_insensitive() {
        assert!(is_bond_symbol("TDB-BD"));
        assert!(is_bond_symbol("tdb-bd"));
        assert!(is_bond_symbol("MIK-Bd-2025"));
        assert!(!is_bond_symbol("APU"));
        assert!(!is_bond_symbol("BDSEC"));
    }

    #[test]
    fn deserializes_upstream_field_names_and_keeps_the_rest() {
        let snapshot: StockSnapshot = serde_json::from_str(
            r#"{
                "Symbol": "APU-O-0000",
                "MDEntryTime": "2024-03-04T10:15:00",
                "PreviousClose": 610.5,
                "HighestBidPrice": 0,
                "mnName": "АПУ"
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.symbol(), "APU-O-0000");
        assert_eq!(snapshot.entry_time(), Some("2024-03-04T10:15:00"));
        assert_eq!(snapshot.previous_close(), Some(610.5));
        assert_eq!(snapshot.highest_bid_price(), Some(0.0));
        assert_eq!(snapshot.lowest_offer_price(), None);
        assert_eq!(snapshot.extra.get("mnName"), Some(&Value::from("АПУ")));

        let round_trip = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(round_trip["mnName"], "АПУ");
        assert!(round_trip.get("LowestOfferPrice").is_none());
    }

    #[test]
    fn builder_sets_signals() {
        let snapshot = StockSnapshot::new("KHAN")
            .with_bid(1.0)
            .with_offer(2.0)
            .with_previous_close(1.5)
            .with_entry_time("2024-03-04");

        assert_eq!(snapshot.highest_bid_price(), Some(1.0));
        assert_eq!(snapshot.lowest_offer_price(), Some(2.0));
        assert_eq!(snapshot.previous_close(), Some(1.5));
        assert_eq!(snapshot.entry_time(), Some("2024-03-04"));
        assert!(!snapshot.is_bond());
    }
}
