use crate::models::allocation::{AllocationWeights, TOTAL_ALLOCATION};
use crate::models::asset::AssetClass;

/// Set `edited` to `new_value` and redistribute the remainder over the other two weights.
///
/// - `new_value` is clamped to `[0, 100]`; NaN clamps to 0.
/// - The other two weights keep their prior ratio. When both were 0 the
///   remainder is split evenly.
/// - The second of the two is computed as `remaining - first`, so the three
///   weights sum to 100 up to rounding.
///
/// Never fails: out-of-range input is clamped, not rejected.
pub fn rebalance(
    current: &AllocationWeights,
    edited: AssetClass,
    new_value: f64,
) -> AllocationWeights {
    let value = clamp_weight(new_value);
    let remaining = TOTAL_ALLOCATION - value;

    let (first, second) = others(edited);
    let a0 = current.get(first);
    let b0 = current.get(second);
    let total_other = a0 + b0;

    let a = if total_other == 0.0 {
        remaining / 2.0
    } else {
        (a0 / total_other) * remaining
    };
    let b = remaining - a;

    let mut next = *current;
    next.set(edited, value);
    next.set(first, a);
    next.set(second, b);
    next
}

fn clamp_weight(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, TOTAL_ALLOCATION)
}

/// The two asset classes other than `edited`, in display order.
fn others(edited: AssetClass) -> (AssetClass, AssetClass) {
    match edited {
        AssetClass::Bitcoin => (AssetClass::Equity, AssetClass::Bond),
        AssetClass::Equity => (AssetClass::Bitcoin, AssetClass::Bond),
        AssetClass::Bond => (AssetClass::Bitcoin, AssetClass::Equity),
    }
}
