//! `std::collections::BinaryHeap` as a sort.
//!
//! The heap has no comparator parameter, it only accepts `T: Ord`. Custom orders therefore go
//! through [`CompWrapper`], which reads the comparator rented for the element type and insists on
//! a strict {-1, 0, 1} outcome.

use std::collections::BinaryHeap;
use std::mem::ManuallyDrop;
use std::ptr;

use crate::bridge::{self, CompResult, Comparator, CompWrapper};
use crate::error::SortError;
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{Element, F128, FfiOneKibiByte, FfiString};
use crate::view::natural_slice_mut;

pub enum StdHeapsortUnstable {}

impl Algorithm for StdHeapsortUnstable {
    const NAME: &'static str = "std_heapsort_unstable";
    const STABLE: bool = false;
    type Outcome = CompResult;
}

impl<T: Element> SortAlgorithm<T> for StdHeapsortUnstable {
    const SUPPORT: Support = Support::Full;

    fn sort(v: &mut [T]) {
        heapsort(natural_slice_mut(v));
    }

    fn sort_by(v: &mut [T], cmp: Comparator<T, CompResult>) -> Result<(), SortError> {
        let _slot = bridge::rent(cmp);
        heapsort(bridge::wrap_slice_mut::<T, CompResult>(v));
        Ok(())
    }
}

/// Sorts bitwise copies of `v` in a heap and writes the result back.
///
/// The copies are never dropped, so if the comparison unwinds `v` is left exactly as it was.
fn heapsort<W: Ord>(v: &mut [W]) {
    let len = v.len();
    if len < 2 {
        return;
    }

    let mut scratch: Vec<ManuallyDrop<W>> = Vec::with_capacity(len);

    // SAFETY: `ManuallyDrop<W>` has the layout of `W` and the capacity was reserved above.
    unsafe {
        ptr::copy_nonoverlapping(v.as_ptr() as *const ManuallyDrop<W>, scratch.as_mut_ptr(), len);
        scratch.set_len(len);
    }

    let sorted = BinaryHeap::from(scratch).into_sorted_vec();
    debug_assert_eq!(sorted.len(), len);

    // SAFETY: `sorted` is a permutation of the bitwise copies taken above, each original value is
    // written back exactly once.
    unsafe {
        ptr::copy_nonoverlapping(sorted.as_ptr() as *const W, v.as_mut_ptr(), len);
    }
}

export_shims!(StdHeapsortUnstable => {
    i32: std_heapsort_unstable_i32, std_heapsort_unstable_i32_by;
    u64: std_heapsort_unstable_u64, std_heapsort_unstable_u64_by;
    FfiString: std_heapsort_unstable_ffi_string, std_heapsort_unstable_ffi_string_by;
    F128: std_heapsort_unstable_f128, std_heapsort_unstable_f128_by;
    FfiOneKibiByte: std_heapsort_unstable_1k, std_heapsort_unstable_1k_by;
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heapsort_orders() {
        let mut v = vec![9, -2, 4, 4, 0, 13, -7];
        heapsort(&mut v);
        assert_eq!(v, vec![-7, -2, 0, 4, 4, 9, 13]);
    }

    #[test]
    fn heapsort_owned_values() {
        let mut v: Vec<String> = ["pear", "apple", "fig"].map(String::from).to_vec();
        heapsort(&mut v);
        assert_eq!(v, ["apple", "fig", "pear"]);
    }
}
