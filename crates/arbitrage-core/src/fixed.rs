use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Monetary amount in millions of currency units.
pub type Money = Fixed64;

/// `part` as a percentage of `whole`, saturating at the type bounds.
/// `None` only when `whole` is not positive.
#[inline]
pub fn percentage_of(part: Fixed64, whole: Fixed64) -> Option<Fixed64> {
    if whole <= Fixed64::ZERO {
        return None;
    }
    Some(part.saturating_div(whole).saturating_mul(Fixed64::from_num(100)))
}

/// `max(0, a - b)`, saturating at the type bounds.
#[inline]
pub fn excess(a: Fixed64, b: Fixed64) -> Fixed64 {
    a.saturating_sub(b).max(Fixed64::ZERO)
}
