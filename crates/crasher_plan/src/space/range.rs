use crate::error::PlanError;
use std::ops::Range;

/// Prefix-range table over the sizes of a node's children.
///
/// For child sizes `(3, 5, 2)` the children own `[0..3)`, `[3..8)` and
/// `[8..10)`. Empty children own an empty range and are never located.
/// Cumulative bounds saturate at `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeTable {
    sizes: Vec<u64>,
    ends: Vec<u64>,
    saturated: bool,
}

impl RangeTable {
    pub fn new(sizes: Vec<u64>) -> Self {
        let mut ends = Vec::with_capacity(sizes.len());
        let mut total: u64 = 0;
        let mut saturated = false;
        for size in &sizes {
            total = match total.checked_add(*size) {
                Some(sum) => sum,
                None => {
                    saturated = true;
                    u64::MAX
                }
            };
            ends.push(total);
        }
        Self {
            sizes,
            ends,
            saturated,
        }
    }

    /// Sum of the child sizes, clamped to `u64::MAX`.
    pub fn size(&self) -> u64 {
        self.ends.last().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    pub fn child_size(&self, child: usize) -> u64 {
        self.sizes[child]
    }

    /// Indices owned by `child`.
    pub fn range(&self, child: usize) -> Range<u64> {
        let start = if child == 0 { 0 } else { self.ends[child - 1] };
        start..self.ends[child]
    }

    /// Child whose range holds `index`, and the index local to that child.
    pub fn locate(&self, index: u64) -> Result<(usize, u64), PlanError> {
        PlanError::check_index(index, self.size())?;
        let child = self
            .ends
            .iter()
            .position(|end| index < *end)
            .ok_or(PlanError::IndexOutOfRange {
                index,
                size: self.size(),
            })?;
        Ok((child, index - self.range(child).start))
    }
}

/// Product of independent slot sizes, clamped to `u64::MAX`. No slots make a
/// single combination.
pub fn saturating_product(sizes: &[u64]) -> u64 {
    sizes
        .iter()
        .fold(1u64, |product, size| product.saturating_mul(*size))
}

/// Split `index` into one local index per slot. The last slot varies
/// fastest: consecutive indices exhaust its alternatives before the slot in
/// front of it advances.
pub fn mixed_radix(index: u64, sizes: &[u64]) -> Vec<u64> {
    let mut remaining = index;
    let mut locals = vec![0; sizes.len()];
    for (slot, size) in sizes.iter().enumerate().rev() {
        if *size == 0 {
            continue;
        }
        locals[slot] = remaining % size;
        remaining /= size;
    }
    locals
}
