//! Task fee calculation
//!
//! `total_reward = reward * quantity`, `platform_fee = total_reward * rate`,
//! `total_budget = total_reward + platform_fee`. Amounts are handled in
//! whole cents and the fee is rounded half up to the cent.

use std::fmt;

use crate::utils::helpers::format_currency;

/// Platform fee applied when no rate is configured
pub const DEFAULT_PLATFORM_FEE_RATE: f64 = 0.05;

/// Convert a decimal amount to cents, rounding to the nearest cent
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents back to a decimal amount
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Cost breakdown shown before a task is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub reward_cents: i64,
    pub quantity: u32,
    /// Fee rate in basis points (5% = 500)
    pub fee_bps: i64,
    pub total_reward_cents: i64,
    pub platform_fee_cents: i64,
    pub total_budget_cents: i64,
}

impl FeeBreakdown {
    pub fn total_reward(&self) -> f64 {
        from_cents(self.total_reward_cents)
    }

    pub fn platform_fee(&self) -> f64 {
        from_cents(self.platform_fee_cents)
    }

    pub fn total_budget(&self) -> f64 {
        from_cents(self.total_budget_cents)
    }

    pub fn fee_rate(&self) -> f64 {
        self.fee_bps as f64 / 10_000.0
    }
}

impl fmt::Display for FeeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reward per unit:  {} x {}",
            format_currency(from_cents(self.reward_cents), "USD"),
            self.quantity
        )?;
        writeln!(f, "Total reward:     {}", format_currency(self.total_reward(), "USD"))?;
        writeln!(
            f,
            "Platform fee ({}%): {}",
            self.fee_bps as f64 / 100.0,
            format_currency(self.platform_fee(), "USD")
        )?;
        write!(f, "Total budget:     {}", format_currency(self.total_budget(), "USD"))
    }
}

/// Compute the budget for `quantity` units at `reward` each
pub fn calculate_fees(reward: f64, quantity: u32, fee_rate: f64) -> FeeBreakdown {
    let reward_cents = to_cents(reward);
    let fee_bps = (fee_rate * 10_000.0).round() as i64;
    let total_reward_cents = reward_cents * quantity as i64;
    let platform_fee_cents = (total_reward_cents * fee_bps + 5_000) / 10_000;

    FeeBreakdown {
        reward_cents,
        quantity,
        fee_bps,
        total_reward_cents,
        platform_fee_cents,
        total_budget_cents: total_reward_cents + platform_fee_cents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_example() {
        let fees = calculate_fees(2.0, 10, DEFAULT_PLATFORM_FEE_RATE);
        assert_eq!(fees.total_reward(), 20.0);
        assert_eq!(fees.platform_fee(), 1.0);
        assert_eq!(fees.total_budget(), 21.0);
        assert_eq!(format_currency(fees.total_budget(), "USD"), "$21.00");
    }

    #[test]
    fn test_budget_is_reward_times_quantity_plus_five_percent() {
        for (reward, quantity, expected_cents) in [
            (0.10, 1, 11),        // 10c + 0.5c fee rounds up
            (0.25, 100, 2_625),
            (1.99, 37, 7_731),    // 7363c + 368.15c fee
            (1000.0, 10_000, 1_050_000_000),
        ] {
            let fees = calculate_fees(reward, quantity, DEFAULT_PLATFORM_FEE_RATE);
            assert_eq!(fees.total_budget_cents, expected_cents, "reward={} qty={}", reward, quantity);
        }
    }

    #[test]
    fn test_custom_rate() {
        let fees = calculate_fees(3.0, 3, 0.1);
        assert_eq!(fees.fee_bps, 1_000);
        assert_eq!(fees.platform_fee_cents, 90);
        assert_eq!(fees.total_budget_cents, 990);
    }

    #[test]
    fn test_display() {
        let rendered = calculate_fees(2.0, 10, DEFAULT_PLATFORM_FEE_RATE).to_string();
        assert!(rendered.contains("Total reward:     $20.00"));
        assert!(rendered.contains("Platform fee (5%): $1.00"));
        assert!(rendered.ends_with("Total budget:     $21.00"));
    }
}
