use crate::error::{DomainError, Result};

/// Monetary amounts are integers in minor currency units (e.g. cents).
/// Floating decimal currency is never used anywhere in the pipeline.
pub type MinorUnits = i64;

/// Basis points per whole unit (100.00%).
pub const BPS_SCALE: i64 = 10_000;

// Nearest-integer division, ties away from zero. Computed in i128 so
// intermediate products from `allocate`/`apply_basis_points` cannot overflow.
fn div_round_ties_away(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder == 0 {
        return quotient;
    }
    if remainder.abs() * 2 >= denominator.abs() {
        if (numerator < 0) == (denominator < 0) {
            quotient + 1
        } else {
            quotient - 1
        }
    } else {
        quotient
    }
}

fn to_minor_units(value: i128, field: &str) -> Result<MinorUnits> {
    MinorUnits::try_from(value)
        .map_err(|_| DomainError::validation(field, "amount exceeds minor-unit range"))
}

/// Divide a monetary amount, rounding to the nearest minor unit with ties
/// away from zero. Rounding happens exactly once, at this point; callers
/// must never round a float later.
pub fn round_div(numerator: MinorUnits, denominator: MinorUnits) -> Result<MinorUnits> {
    if denominator == 0 {
        return Err(DomainError::validation("denominator", "must not be zero"));
    }
    to_minor_units(
        div_round_ties_away(numerator as i128, denominator as i128),
        "quotient",
    )
}

/// Proportionally split `total` across `weights`. Each share rounds
/// independently; the rounding remainder is assigned to the last part so
/// the parts always sum exactly to `total`.
pub fn allocate(total: MinorUnits, weights: &[MinorUnits]) -> Result<Vec<MinorUnits>> {
    if weights.is_empty() {
        return Err(DomainError::validation("weights", "must not be empty"));
    }
    if let Some(w) = weights.iter().find(|w| **w < 0) {
        return Err(DomainError::validation(
            "weights",
            format!("must not be negative, got {}", w),
        ));
    }
    let weight_sum: i128 = weights.iter().map(|w| *w as i128).sum();
    if weight_sum == 0 {
        return Err(DomainError::validation("weights", "must sum to a positive amount"));
    }

    let mut parts = Vec::with_capacity(weights.len());
    let mut assigned: i128 = 0;
    for weight in &weights[..weights.len() - 1] {
        let share = div_round_ties_away((total as i128) * (*weight as i128), weight_sum);
        assigned += share;
        parts.push(to_minor_units(share, "allocation")?);
    }
    // Remainder to the last part keeps the sum exact.
    parts.push(to_minor_units(total as i128 - assigned, "allocation")?);
    Ok(parts)
}

/// Apply a rate expressed in basis points to an amount, rounding once.
pub fn apply_basis_points(amount: MinorUnits, bps: i64) -> Result<MinorUnits> {
    to_minor_units(
        div_round_ties_away((amount as i128) * (bps as i128), BPS_SCALE as i128),
        "amount",
    )
}
