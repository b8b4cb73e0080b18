use bevy::prelude::*;
use crate::shared::*;

/// Logs SourceChangeEvents. The ledger has already been updated by whoever
/// sent the event; this never re-applies the amount.
pub fn log_source_changes(
    mut source_events: EventReader<SourceChangeEvent>,
    ledger: Res<SourceLedger>,
) {
    for ev in source_events.read() {
        if ev.amount >= 0 {
            info!(
                "[Economy] Source +{}: {}. Balance: {}",
                ev.amount,
                ev.reason,
                format_source(ledger.balance())
            );
        } else {
            info!(
                "[Economy] Source {}: {}. Balance: {}",
                ev.amount,
                ev.reason,
                format_source(ledger.balance())
            );
        }
    }
}

/// Format a source amount for display (e.g. "10,000 Source").
pub fn format_source(amount: u64) -> String {
    let digits: Vec<char> = amount.to_string().chars().collect();
    let mut result = String::with_capacity(digits.len() + 10);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result.push_str(" Source");
    result
}

/// Signed amount for a SourceChangeEvent.
pub(crate) fn signed(amount: u64, negative: bool) -> i64 {
    let magnitude = i64::try_from(amount).unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source() {
        assert_eq!(format_source(0), "0 Source");
        assert_eq!(format_source(950), "950 Source");
        assert_eq!(format_source(10_000), "10,000 Source");
        assert_eq!(format_source(1_234_567), "1,234,567 Source");
    }

    #[test]
    fn test_signed_clamps_huge_values() {
        assert_eq!(signed(5, true), -5);
        assert_eq!(signed(5, false), 5);
        assert_eq!(signed(u64::MAX, false), i64::MAX);
    }
}
