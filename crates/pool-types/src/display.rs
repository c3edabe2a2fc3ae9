//! Read-only projections of on-chain pool state for display

use alloy::primitives::U256;

use crate::STETH_DECIMALS;

/// The placeholder shown when a projection cannot be computed
pub const NOT_AVAILABLE: &str = "Data not available";

/// Format a base-unit balance by splitting its decimal digits at `decimals`
///
/// All fractional digits are kept; a zero balance renders as "0"
pub fn format_balance(balance: U256, decimals: usize) -> String {
    if balance.is_zero() {
        return "0".to_string();
    }

    let digits = balance.to_string();
    if decimals == 0 {
        return digits;
    }
    if digits.len() <= decimals {
        return format!("0.{digits:0>decimals$}");
    }

    let (int_part, frac_part) = digits.split_at(digits.len() - decimals);
    format!("{int_part}.{frac_part}")
}

/// Format a wei amount as ether with exactly `places` fractional digits,
/// rounding half up
pub fn format_decimals(wei: U256, places: usize) -> String {
    let token_decimals = STETH_DECIMALS as usize;
    let places = places.min(token_decimals);

    let drop = token_decimals - places;
    let scale = U256::from(10u64).pow(U256::from(drop));
    let half = scale / U256::from(2u64);
    let rounded = wei.saturating_add(if drop == 0 { U256::ZERO } else { half }) / scale;

    let digits = rounded.to_string();
    if places == 0 {
        return digits;
    }

    let padded = format!("{digits:0>width$}", width = places + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - places);
    format!("{int_part}.{frac_part}")
}

/// Compute the accrued rewards of a pool: its total balance less the sum of
/// user deposits
///
/// Returns `None` if deposits exceed the balance
pub fn compute_rewards(total_balance: U256, total_user_deposits: U256) -> Option<U256> {
    total_balance.checked_sub(total_user_deposits)
}

/// Format an optional amount, falling back to the not-available placeholder
pub fn format_or_unavailable(amount: Option<U256>, places: usize) -> String {
    amount.map(|a| format_decimals(a, places)).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
