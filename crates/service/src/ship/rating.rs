//! Derived ship rating.

use models::{errors::ModelError, ship};

/// The in-world "present" year every rating is measured against.
/// Changing it changes every stored rating.
pub const CURRENT_ERA_YEAR: i32 = 3019;

/// Round half-up to two decimals. Applied to every persisted speed and rating.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `80 * speed * k / (CURRENT_ERA_YEAR - year + 1)`, `k = 0.5` for used ships.
///
/// Production years past `CURRENT_ERA_YEAR` cannot pass validation; if one
/// reaches here anyway the denominator is clamped to 1.
pub fn compute_rating(speed: f64, is_used: bool, prod_date: i64) -> Result<f64, ModelError> {
    let used_factor = if is_used { 0.5 } else { 1.0 };
    let year = ship::production_year(prod_date)
        .ok_or_else(|| ModelError::Validation("prodDate is out of range".into()))?;
    let age = (CURRENT_ERA_YEAR - year + 1).max(1);
    Ok(round2((80.0 * speed * used_factor) / f64::from(age)))
}
