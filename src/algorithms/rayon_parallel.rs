//! [rayon](https://crates.io/crates/rayon) parallel sorts.
//!
//! The thread pool is internal to rayon, the shim blocks until the sort returns. Custom
//! comparators are refused: the foreign context pointer carries no promise that it may be used
//! from several threads at once.

use rayon::slice::ParallelSliceMut;

use crate::bridge::CompResult;
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{Element, F128, FfiOneKibiByte, FfiString};
use crate::view::natural_slice_mut;

const SINGLE_THREADED_COMPARATOR: Support =
    Support::DefaultOnly("foreign comparator context is not guaranteed to be thread-safe");

pub enum RayonParallelStable {}

impl Algorithm for RayonParallelStable {
    const NAME: &'static str = "rayon_parallel_stable";
    const STABLE: bool = true;
    type Outcome = CompResult;
}

impl<T: Element> SortAlgorithm<T> for RayonParallelStable {
    const SUPPORT: Support = SINGLE_THREADED_COMPARATOR;

    fn sort(v: &mut [T]) {
        natural_slice_mut(v).par_sort();
    }
}

pub enum RayonParallelUnstable {}

impl Algorithm for RayonParallelUnstable {
    const NAME: &'static str = "rayon_parallel_unstable";
    const STABLE: bool = false;
    type Outcome = CompResult;
}

impl<T: Element> SortAlgorithm<T> for RayonParallelUnstable {
    const SUPPORT: Support = SINGLE_THREADED_COMPARATOR;

    fn sort(v: &mut [T]) {
        natural_slice_mut(v).par_sort_unstable();
    }
}

export_shims!(RayonParallelStable => {
    i32: rayon_parallel_stable_i32, rayon_parallel_stable_i32_by;
    u64: rayon_parallel_stable_u64, rayon_parallel_stable_u64_by;
    FfiString: rayon_parallel_stable_ffi_string, rayon_parallel_stable_ffi_string_by;
    F128: rayon_parallel_stable_f128, rayon_parallel_stable_f128_by;
    FfiOneKibiByte: rayon_parallel_stable_1k, rayon_parallel_stable_1k_by;
});

export_shims!(RayonParallelUnstable => {
    i32: rayon_parallel_unstable_i32, rayon_parallel_unstable_i32_by;
    u64: rayon_parallel_unstable_u64, rayon_parallel_unstable_u64_by;
    FfiString: rayon_parallel_unstable_ffi_string, rayon_parallel_unstable_ffi_string_by;
    F128: rayon_parallel_unstable_f128, rayon_parallel_unstable_f128_by;
    FfiOneKibiByte: rayon_parallel_unstable_1k, rayon_parallel_unstable_1k_by;
});
