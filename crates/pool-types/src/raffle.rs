//! Raffle round timing and the raffle summary shown to users

use std::fmt::Display;

use alloy::primitives::U256;

use crate::display::{NOT_AVAILABLE, format_decimals};

/// The default length of a raffle round, one week
pub const DEFAULT_RAFFLE_INTERVAL_SECS: u64 = 7 * SECS_PER_DAY;

/// Seconds in a day
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
/// Seconds in an hour
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
/// Seconds in a minute
const SECS_PER_MINUTE: u64 = 60;

/// A duration broken into display units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    /// Whole days
    pub days: u64,
    /// Remaining hours
    pub hours: u64,
    /// Remaining minutes
    pub minutes: u64,
    /// Remaining seconds
    pub seconds: u64,
}

impl Countdown {
    /// Break a number of seconds into days, hours, minutes and seconds
    pub fn from_secs(total: u64) -> Self {
        let days = total / SECS_PER_DAY;
        let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
        let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
        let seconds = total % SECS_PER_MINUTE;
        Self { days, hours, minutes, seconds }
    }
}

impl Display for Countdown {
    /// Leading zero units are omitted; seconds are always shown
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        if self.hours > 0 {
            write!(f, "{}h ", self.hours)?;
        }
        if self.minutes > 0 {
            write!(f, "{}m ", self.minutes)?;
        }
        write!(f, "{}s", self.seconds)
    }
}

/// Seconds until the round that started at `start` ends, negative once it
/// is overdue
pub fn time_remaining(start: u64, interval: u64, now: u64) -> i64 {
    let end = start.saturating_add(interval) as i128;
    (end - now as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// The countdown to the end of the round, zero once it is overdue
pub fn countdown(start: u64, interval: u64, now: u64) -> Countdown {
    let remaining = time_remaining(start, interval, now).max(0) as u64;
    Countdown::from_secs(remaining)
}

/// The elapsed share of the round as a percentage, clamped to `[0, 100]`
pub fn bar_percentage(start: u64, interval: u64, now: u64) -> f64 {
    if interval == 0 {
        return 100.0;
    }

    let elapsed = now as f64 - start as f64;
    (elapsed / interval as f64 * 100.0).clamp(0.0, 100.0)
}

/// A snapshot of the raffle pool as read from the contract
///
/// Each field is `None` when its read failed, and renders as not available
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RaffleDetails {
    /// The current jackpot
    pub rewards: Option<U256>,
    /// The sum of user deposits
    pub total_user_deposits: Option<U256>,
    /// The number of depositors with a non-zero balance
    pub player_count: Option<U256>,
    /// The unix timestamp at which the current round started
    pub last_timestamp: Option<u64>,
}

impl RaffleDetails {
    /// Render a human readable summary at the given time
    pub fn summary(&self, interval: u64, now: u64, places: usize) -> String {
        let steth = |amount: Option<U256>| match amount {
            Some(a) => format!("{} stETH", format_decimals(a, places)),
            None => NOT_AVAILABLE.to_string(),
        };
        let jackpot = steth(self.rewards);
        let balance = steth(self.total_user_deposits);
        let players = self.player_count.map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.to_string());
        let next_draw = match self.last_timestamp {
            Some(start) => {
                let remaining = countdown(start, interval, now);
                let progress = bar_percentage(start, interval, now);
                format!("{remaining} ({progress:.1}% elapsed)")
            },
            None => NOT_AVAILABLE.to_string(),
        };

        format!(
            "Jackpot: {jackpot}\nPool balance: {balance}\nPlayers: {players}\nNext draw in: {next_draw}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_units() {
        let cd = Countdown::from_secs(2 * SECS_PER_DAY + 3 * SECS_PER_HOUR + 4 * 60 + 5);
        assert_eq!(cd, Countdown { days: 2, hours: 3, minutes: 4, seconds: 5 });
        assert_eq!(cd.to_string(), "2d 3h 4m 5s");
        assert_eq!(Countdown::from_secs(42).to_string(), "42s");
    }

    #[test]
    fn test_time_remaining() {
        assert_eq!(time_remaining(1_000, 600, 1_100), 500);
        assert_eq!(time_remaining(1_000, 600, 1_700), -100);
        assert_eq!(countdown(1_000, 600, 1_700), Countdown::default());
    }

    #[test]
    fn test_bar_percentage_clamped() {
        assert_eq!(bar_percentage(1_000, 1_000, 1_500), 50.0);
        assert_eq!(bar_percentage(1_000, 1_000, 500), 0.0);
        assert_eq!(bar_percentage(1_000, 1_000, 5_000), 100.0);
        assert_eq!(bar_percentage(1_000, 0, 1_000), 100.0);
    }

    #[test]
    fn test_summary() {
        let details = RaffleDetails {
            rewards: None,
            total_user_deposits: Some(U256::from(2_000_000_000_000_000_000u128)),
            player_count: Some(U256::from(3u64)),
            last_timestamp: Some(0),
        };
        let summary = details.summary(DEFAULT_RAFFLE_INTERVAL_SECS, SECS_PER_DAY, 3);

        assert!(summary.contains("Jackpot: Data not available"));
        assert!(summary.contains("Pool balance: 2.000 stETH"));
        assert!(summary.contains("Players: 3"));
        assert!(summary.contains("Next draw in: 6d 0s"));
    }

    #[test]
    fn test_summary_without_reads() {
        let summary = RaffleDetails::default().summary(DEFAULT_RAFFLE_INTERVAL_SECS, 0, 4);
        assert_eq!(
            summary,
            "Jackpot: Data not available\nPool balance: Data not available\n\
             Players: Data not available\nNext draw in: Data not available"
        );
    }
}
