use crate::types::F128;

/// Maps a value to an unsigned key whose natural order matches the value's order.
pub trait TotalOrder: 'static {
    fn to_total_order(&self) -> u64;
}

impl TotalOrder for u64 {
    #[inline(always)]
    fn to_total_order(&self) -> u64 {
        *self
    }
}

impl TotalOrder for i32 {
    #[inline(always)]
    fn to_total_order(&self) -> u64 {
        // flip the sign bit within 32 bits, sign extension would put negatives on top
        ((*self as u32) ^ (1 << 31)) as u64
    }
}

impl TotalOrder for f64 {
    #[inline(always)]
    fn to_total_order(&self) -> u64 {
        // see f64::total_cmp
        let bits = self.to_bits();
        (bits ^ ((bits as i64 >> 63) as u64 >> 1)) ^ (1 << 63)
    }
}

impl TotalOrder for F128 {
    #[inline(always)]
    fn to_total_order(&self) -> u64 {
        self.div_value().to_total_order()
    }
}
