//! Delay compensation policy
//!
//! Pure function of (delay, ticket price). The numeric thresholds and the
//! `999` cancellation sentinel are part of the observable contract with
//! existing clients and must not drift.

use crate::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// `delay_minutes` value clients pass to mean "the flight was cancelled".
pub const CANCELLED_DELAY_SENTINEL: f64 = 999.0;

/// Outcome of a compensation calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Compensation {
    pub eligible: bool,
    /// Rounded amount in VND.
    pub compensation_amount: i64,
    /// Refund rate as a display string, e.g. "50%".
    pub rate: String,
    /// Human-readable policy line the rate came from.
    pub policy: String,
    #[cfg_attr(feature = "openapi", schema(value_type = f64))]
    pub delay_minutes: Number,
    #[cfg_attr(feature = "openapi", schema(value_type = f64))]
    pub ticket_price: Number,
}

/// Apply the refund policy.
///
/// Errors with `InvalidArgument` when the delay is negative or the price
/// is not positive; a zero-rate outcome (delay under an hour) is a valid
/// result, not an error.
pub fn calculate_compensation(
    delay_minutes: f64,
    ticket_price: f64,
) -> Result<Compensation, ToolError> {
    if delay_minutes < 0.0 {
        return Err(ToolError::invalid(
            "delay_minutes",
            "must not be negative",
        ));
    }
    if ticket_price <= 0.0 {
        return Err(ToolError::invalid("ticket_price", "must be positive"));
    }

    let (rate, policy) = if delay_minutes >= 180.0 || delay_minutes == CANCELLED_DELAY_SENTINEL {
        (0.50, "Delay >3 hours or Cancelled: 50% refund")
    } else if delay_minutes >= 120.0 {
        (0.30, "Delay 2-3 hours: 30% refund")
    } else if delay_minutes >= 60.0 {
        (0.15, "Delay 1-2 hours: 15% refund")
    } else {
        (0.0, "Delay <1 hour: No compensation")
    };

    Ok(Compensation {
        eligible: rate > 0.0,
        compensation_amount: (ticket_price * rate).round() as i64,
        rate: format!("{}%", (rate * 100.0).round() as i64),
        policy: policy.to_string(),
        delay_minutes: tidy_number(delay_minutes),
        ticket_price: tidy_number(ticket_price),
    })
}

/// Echo an input number back without a spurious ".0" on integral values.
fn tidy_number(value: f64) -> Number {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Number::from(value as i64)
    } else {
        Number::from_f64(value).unwrap_or_else(|| Number::from(0))
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// For a fixed delay at or above a threshold, the amount is
        /// non-decreasing in the ticket price.
        #[test]
        fn prop_amount_monotone_in_price(
            delay in 60.0f64..=600.0,
            price_a in 1.0f64..=10_000_000.0,
            bump in 0.0f64..=10_000_000.0,
        ) {
            let low = calculate_compensation(delay, price_a).unwrap();
            let high = calculate_compensation(delay, price_a + bump).unwrap();
            prop_assert!(high.compensation_amount >= low.compensation_amount);
        }

        /// Eligibility is exactly "rate > 0", i.e. delay >= 60 or the
        /// cancellation sentinel.
        #[test]
        fn prop_eligibility_matches_threshold(delay in 0.0f64..=1000.0) {
            let c = calculate_compensation(delay, 1_000_000.0).unwrap();
            let expected = delay >= 60.0 || delay == CANCELLED_DELAY_SENTINEL;
            prop_assert_eq!(c.eligible, expected);
        }

        /// The amount never exceeds half the ticket price.
        #[test]
        fn prop_amount_bounded_by_half_price(
            delay in 0.0f64..=1000.0,
            price in 1.0f64..=100_000_000.0,
        ) {
            let c = calculate_compensation(delay, price).unwrap();
            prop_assert!(c.compensation_amount as f64 <= price * 0.5 + 1.0);
        }

        /// Invalid inputs always classify as InvalidArgument, never panic.
        #[test]
        fn prop_invalid_inputs_classified(
            delay in -1000.0f64..-0.0001,
            price in -1000.0f64..=1000.0,
        ) {
            let err = calculate_compensation(delay, price).unwrap_err();
            let is_invalid_argument = matches!(err, ToolError::InvalidArgument { .. });
            prop_assert!(is_invalid_argument);
        }
    }
}
