use crate::error::PlanError;

/// Most indices a single selection may hold.
pub const MAX_SELECTED_PLANS: u64 = 1 << 24;

/// Number of indices [`select_indices`] picks out of `size` plans.
/// `limit == 0` means no limit.
pub fn selected_count(size: u64, limit: u64) -> u64 {
    if limit == 0 { size } else { size.min(limit) }
}

/// Pick at most `limit` plan indices out of `[0, size)`.
///
/// Returns every index when `size <= limit` or `limit == 0`, and `limit`
/// indices spread evenly over the range otherwise. Selections larger than
/// [`MAX_SELECTED_PLANS`] are rejected instead of materialized.
pub fn select_indices(size: u64, limit: u64) -> Result<Vec<u64>, PlanError> {
    let count = selected_count(size, limit);
    if count > MAX_SELECTED_PLANS {
        return Err(PlanError::invalid(format!(
            "selecting {count} of {size} plans exceeds {MAX_SELECTED_PLANS}; set a plan limit"
        )));
    }
    if count == size {
        return Ok((0..size).collect());
    }
    Ok((0..count)
        .map(|slot| (u128::from(slot) * u128::from(size) / u128::from(count)) as u64)
        .collect())
}
