//! The platform C library's `qsort`.
//!
//! `qsort` only takes a capture-less `int (*)(const void*, const void*)`, so custom comparators
//! are smuggled through the slot rented for the element type and called from
//! [`bridge::c_trampoline`]. Nothing may unwind through the C frames: a foreign panic is recorded
//! in the slot and checked once `qsort` returns.
//!
//! Elements are moved as raw bytes, which is fine for the move-only [`FfiString`].

use std::ffi::{c_int, c_void};
use std::mem::size_of;

use crate::bridge::{self, CompResult, Comparator};
use crate::error::SortError;
use crate::primitive::{int_cmp_c, natural_cmp_c};
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{Element, F128, FfiOneKibiByte, FfiString};

type CCmpFn = unsafe extern "C" fn(*const c_void, *const c_void) -> c_int;

pub enum QsortUnstable {}

impl Algorithm for QsortUnstable {
    const NAME: &'static str = "qsort_unstable";
    const STABLE: bool = false;
    type Outcome = CompResult;
}

unsafe fn qsort<T>(v: &mut [T], cmp_fn: CCmpFn) {
    libc::qsort(v.as_mut_ptr() as *mut c_void, v.len(), size_of::<T>(), Some(cmp_fn));
}

fn qsort_by<T: Element>(v: &mut [T], cmp: Comparator<T, CompResult>) -> Result<(), SortError> {
    let slot = bridge::rent(cmp);

    // SAFETY: The trampoline reads `T` values and never unwinds.
    unsafe { qsort(v, bridge::c_trampoline::<T, CompResult>) };

    if slot.panicked() {
        return Err(SortError::ComparatorPanic);
    }

    Ok(())
}

impl SortAlgorithm<i32> for QsortUnstable {
    const SUPPORT: Support = Support::Full;

    fn sort(v: &mut [i32]) {
        unsafe { qsort(v, int_cmp_c::<i32>) };
    }

    fn sort_by(v: &mut [i32], cmp: Comparator<i32, CompResult>) -> Result<(), SortError> {
        qsort_by(v, cmp)
    }
}

impl SortAlgorithm<u64> for QsortUnstable {
    const SUPPORT: Support = Support::Full;

    fn sort(v: &mut [u64]) {
        unsafe { qsort(v, int_cmp_c::<u64>) };
    }

    fn sort_by(v: &mut [u64], cmp: Comparator<u64, CompResult>) -> Result<(), SortError> {
        qsort_by(v, cmp)
    }
}

impl SortAlgorithm<FfiString> for QsortUnstable {
    const SUPPORT: Support = Support::Full;

    fn sort(v: &mut [FfiString]) {
        unsafe { qsort(v, natural_cmp_c::<FfiString>) };
    }

    fn sort_by(v: &mut [FfiString], cmp: Comparator<FfiString, CompResult>) -> Result<(), SortError> {
        qsort_by(v, cmp)
    }
}

unsupported!(QsortUnstable => {
    // Kept refused until the swap problem is reproduced and fixed.
    F128: "swaps F128 values incorrectly";
    FfiOneKibiByte: "value would have to be sorted by indirection";
});

export_shims!(QsortUnstable => {
    i32: qsort_unstable_i32, qsort_unstable_i32_by;
    u64: qsort_unstable_u64, qsort_unstable_u64_by;
    FfiString: qsort_unstable_ffi_string, qsort_unstable_ffi_string_by;
    F128: qsort_unstable_f128, qsort_unstable_f128_by;
    FfiOneKibiByte: qsort_unstable_1k, qsort_unstable_1k_by;
});
