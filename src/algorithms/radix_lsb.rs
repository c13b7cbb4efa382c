//! The in-tree LSB radix sort from [`crate::radix`].

use crate::bridge::CompResult;
use crate::radix;
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{F128, FfiOneKibiByte, FfiString};

const NO_COMPARATOR: Support = Support::DefaultOnly("radix sort has no comparison hook");

pub enum RadixLsbStable {}

impl Algorithm for RadixLsbStable {
    const NAME: &'static str = "radix_lsb_stable";
    const STABLE: bool = true;
    type Outcome = CompResult;
}

impl SortAlgorithm<i32> for RadixLsbStable {
    const SUPPORT: Support = NO_COMPARATOR;

    fn sort(v: &mut [i32]) {
        radix::sort_in_place(v);
    }
}

impl SortAlgorithm<u64> for RadixLsbStable {
    const SUPPORT: Support = NO_COMPARATOR;

    fn sort(v: &mut [u64]) {
        radix::sort_in_place(v);
    }
}

impl SortAlgorithm<F128> for RadixLsbStable {
    const SUPPORT: Support = NO_COMPARATOR;

    fn sort(v: &mut [F128]) {
        radix::sort_in_place(v);
    }
}

unsupported!(RadixLsbStable => {
    FfiString: "value would have to be sorted by indirection";
    FfiOneKibiByte: "scratch buffer requires default-constructible copy elements";
});

export_shims!(RadixLsbStable => {
    i32: radix_lsb_stable_i32, radix_lsb_stable_i32_by;
    u64: radix_lsb_stable_u64, radix_lsb_stable_u64_by;
    FfiString: radix_lsb_stable_ffi_string, radix_lsb_stable_ffi_string_by;
    F128: radix_lsb_stable_f128, radix_lsb_stable_f128_by;
    FfiOneKibiByte: radix_lsb_stable_1k, radix_lsb_stable_1k_by;
});
