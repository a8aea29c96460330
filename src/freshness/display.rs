use chrono::NaiveDate;

/// Whether a stock whose last entry is `entry_time` belongs to `target_date`.
///
/// Bonds are always shown, the same as in the list filter. For everything
/// else the `YYYY-MM-DD` prefix of the timestamp must equal the target date;
/// no time zone shift is applied.
pub fn should_display_stock(entry_time: Option<&str>, target_date: NaiveDate, is_bond: bool) -> bool {
    if is_bond {
        return true;
    }

    entry_time
        .and_then(date_portion)
        .is_some_and(|entry_date| entry_date == target_date)
}

fn date_portion(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let (date, rest) = raw.split_at_checked(10)?;

    if !(rest.is_empty() || rest.starts_with(['T', 't', ' '])) {
        return None;
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
