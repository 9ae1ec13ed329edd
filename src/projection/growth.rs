//! Compound growth formulas used by the trajectory engine
//!
//! All rates here are monthly decimals (0.01 = 1% per month).

use chrono::{Datelike, NaiveDate};

/// Whole calendar months from `start` to `end` using year*12+month.
///
/// Day of month is ignored: Jan 15 to Mar 1 is 2 months. Negative when
/// `end` falls in an earlier month than `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let start_index = start.year() * 12 + start.month() as i32;
    let end_index = end.year() * 12 + end.month() as i32;
    end_index - start_index
}

/// Lump-sum growth: FV = P * (1+i)^n
///
/// Returns the principal unchanged when `months <= 0` or the principal is
/// not positive.
pub fn lump_sum_fv(principal: f64, monthly_rate: f64, months: i32) -> f64 {
    if months <= 0 || principal <= 0.0 {
        return principal;
    }
    principal * (1.0 + monthly_rate).powf(f64::from(months))
}

/// Annuity-due growth of a level monthly payment:
/// FV = P * [((1+i)^n - 1) / i] * (1+i)
///
/// Each payment is made at the start of its month. Zero when `months <= 0`.
/// A zero rate falls back to the plain sum of payments.
pub fn annuity_due_fv(payment: f64, monthly_rate: f64, months: i32) -> f64 {
    if months <= 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return payment * f64::from(months);
    }
    let growth = (1.0 + monthly_rate).powf(f64::from(months));
    payment * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

/// Round half up (toward positive infinity), so -2.5 rounds to -2
pub fn round_half_up(value: f64) -> i64 {
    // Adding 0.5 first would misround 0.49999999999999994 and large odd integers
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { value.ceil() } else { floor };
    rounded as i64
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
