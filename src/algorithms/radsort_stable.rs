//! [radsort](https://crates.io/crates/radsort), a key based radix sort without a comparison hook.

use crate::bridge::CompResult;
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{F128, FfiOneKibiByte, FfiString};

const NO_COMPARATOR: Support = Support::DefaultOnly("radix sort has no comparison hook");

pub enum RadsortStable {}

impl Algorithm for RadsortStable {
    const NAME: &'static str = "radsort_stable";
    const STABLE: bool = true;
    type Outcome = CompResult;
}

impl SortAlgorithm<i32> for RadsortStable {
    const SUPPORT: Support = NO_COMPARATOR;

    fn sort(v: &mut [i32]) {
        ::radsort::sort(v);
    }
}

impl SortAlgorithm<u64> for RadsortStable {
    const SUPPORT: Support = NO_COMPARATOR;

    fn sort(v: &mut [u64]) {
        ::radsort::sort(v);
    }
}

impl SortAlgorithm<F128> for RadsortStable {
    const SUPPORT: Support = NO_COMPARATOR;

    fn sort(v: &mut [F128]) {
        ::radsort::sort_by_key(v, F128::div_value);
    }
}

impl SortAlgorithm<FfiOneKibiByte> for RadsortStable {
    const SUPPORT: Support = NO_COMPARATOR;

    fn sort(v: &mut [FfiOneKibiByte]) {
        ::radsort::sort_by_key(v, FfiOneKibiByte::key);
    }
}

unsupported!(RadsortStable => {
    FfiString: "value would have to be sorted by indirection";
});

export_shims!(RadsortStable => {
    i32: radsort_stable_i32, radsort_stable_i32_by;
    u64: radsort_stable_u64, radsort_stable_u64_by;
    FfiString: radsort_stable_ffi_string, radsort_stable_ffi_string_by;
    F128: radsort_stable_f128, radsort_stable_f128_by;
    FfiOneKibiByte: radsort_stable_1k, radsort_stable_1k_by;
});
