use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::freshness::entry_time::is_todays_fresh_data;
use crate::types::stock_snapshot::MarketSnapshot;

/// First signal that kept an instrument in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionReason {
    Bond,
    FreshEntry,
    LiveBid,
    LiveOffer,
    PreviousClose,
}

impl fmt::Display for InclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bond => write!(f, "bond"),
            Self::FreshEntry => write!(f, "fresh-entry"),
            Self::LiveBid => write!(f, "live-bid"),
            Self::LiveOffer => write!(f, "live-offer"),
            Self::PreviousClose => write!(f, "previous-close"),
        }
    }
}

/// Bonds are always kept. Other instruments need fresh activity today or any
/// positive price signal; `None` means the instrument is hidden.
pub fn classify_snapshot<S, Tz>(snapshot: &S, now: &DateTime<Tz>) -> Option<InclusionReason>
where
    S: MarketSnapshot + ?Sized,
    Tz: TimeZone,
{
    if snapshot.is_bond() {
        return Some(InclusionReason::Bond);
    }
    if is_todays_fresh_data(snapshot.entry_time(), now) {
        return Some(InclusionReason::FreshEntry);
    }
    if is_positive(snapshot.highest_bid_price()) {
        return Some(InclusionReason::LiveBid);
    }
    if is_positive(snapshot.lowest_offer_price()) {
        return Some(InclusionReason::LiveOffer);
    }
    if is_positive(snapshot.previous_close()) {
        return Some(InclusionReason::PreviousClose);
    }

    None
}

/// Keeps the instruments worth displaying at `now`, preserving order.
pub fn filter_todays_fresh_stocks<S, Tz>(instruments: Vec<S>, now: &DateTime<Tz>) -> Vec<S>
where
    S: MarketSnapshot,
    Tz: TimeZone,
{
    let total = instruments.len();

    let kept: Vec<S> = instruments
        .into_iter()
        .filter(|snapshot| match classify_snapshot(snapshot, now) {
            Some(reason) => {
                tracing::trace!(symbol = snapshot.symbol(), %reason, "keeping instrument");
                true
            }
            None => {
                tracing::trace!(symbol = snapshot.symbol(), "dropping instrument without signals");
                false
            }
        })
        .collect();

    tracing::debug!(total, kept = kept.len(), "filtered instruments");

    kept
}

fn is_positive(price: Option<f64>) -> bool {
    price.is_some_and(|value| value.is_finite() && value > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::stock_snapshot::StockSnapshot;
    use chrono::FixedOffset;
    use quickcheck_macros::quickcheck;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 4, 11, 0, 0)
            .unwrap()
    }

    #[test]
    fn bond_wins_over_every_other_signal() {
        let bond = StockSnapshot::new("TDB-BD")
            .with_entry_time("2024-03-04T10:00:00")
            .with_bid(100.0);

        assert_eq!(classify_snapshot(&bond, &now()), Some(InclusionReason::Bond));
    }

    #[test]
    fn signals_are_checked_in_priority_order() {
        let fresh = StockSnapshot::new("APU")
            .with_entry_time("2024-03-04T10:00:00")
            .with_bid(1.0);
        let bid = StockSnapshot::new("APU").with_bid(1.0).with_offer(2.0);
        let offer = StockSnapshot::new("APU").with_bid(0.0).with_offer(2.0);
        let close = StockSnapshot::new("APU")
            .with_entry_time("2024-02-01T10:00:00")
            .with_previous_close(610.0);

        assert_eq!(classify_snapshot(&fresh, &now()), Some(InclusionReason::FreshEntry));
        assert_eq!(classify_snapshot(&bid, &now()), Some(InclusionReason::LiveBid));
        assert_eq!(classify_snapshot(&offer, &now()), Some(InclusionReason::LiveOffer));
        assert_eq!(classify_snapshot(&close, &now()), Some(InclusionReason::PreviousClose));
    }

    #[test]
    fn drops_instruments_without_signals() {
        let silent = StockSnapshot::new("GOV");
        let zeroed = StockSnapshot::new("MNP")
            .with_bid(0.0)
            .with_offer(0.0)
            .with_previous_close(0.0)
            .with_entry_time("2024-03-01T15:00:00");
        let negative = StockSnapshot::new("XYZ").with_previous_close(-1.0);
        let nan = StockSnapshot::new("NAN").with_bid(f64::NAN);

        for snapshot in [&silent, &zeroed, &negative, &nan] {
            assert_eq!(classify_snapshot(snapshot, &now()), None, "{snapshot:?}");
        }
    }

    #[test]
    fn filter_preserves_order_of_kept_instruments() {
        let instruments = vec![
            StockSnapshot::new("AAA").with_previous_close(1.0),
            StockSnapshot::new("BBB"),
            StockSnapshot::new("mik-bd"),
            StockSnapshot::new("CCC").with_entry_time("2024-03-04 09:31:00"),
            StockSnapshot::new("DDD").with_entry_time("not-a-date"),
        ];

        let kept = filter_todays_fresh_stocks(instruments, &now());
        let symbols: Vec<&str> = kept.iter().map(|s| s.symbol()).collect();

        assert_eq!(symbols, vec!["AAA", "mik-bd", "CCC"]);
    }

    #[test]
    fn filters_borrowed_snapshots() {
        let owned = vec![StockSnapshot::new("AAA"), StockSnapshot::new("BBB").with_bid(5.0)];
        let borrowed: Vec<&StockSnapshot> = owned.iter().collect();
        let kept = filter_todays_fresh_stocks(borrowed, &now());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].symbol, "BBB");
    }

    #[test]
    fn empty_list_stays_empty() {
        let kept: Vec<StockSnapshot> = filter_todays_fresh_stocks(Vec::new(), &now());
        assert!(kept.is_empty());
    }

    #[quickcheck]
    fn bonds_always_survive(prefix: String, lowercase: bool, bid: Option<f64>) -> bool {
        let marker = if lowercase { "-bd" } else { "-BD" };
        let mut bond = StockSnapshot::new(format!("{prefix}{marker}"));
        bond.highest_bid_price = bid;

        filter_todays_fresh_stocks(vec![bond], &now()).len() == 1
    }
}
