//! The standard library's `slice::sort` and `slice::sort_unstable`.

use crate::bridge::{CompResult, Comparator};
use crate::error::SortError;
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{Element, F128, FfiOneKibiByte, FfiString};
use crate::view::natural_slice_mut;

pub enum RustStdStable {}

impl Algorithm for RustStdStable {
    const NAME: &'static str = "rust_std_stable";
    const STABLE: bool = true;
    type Outcome = CompResult;
}

impl<T: Element> SortAlgorithm<T> for RustStdStable {
    const SUPPORT: Support = Support::Full;

    fn sort(v: &mut [T]) {
        natural_slice_mut(v).sort();
    }

    fn sort_by(v: &mut [T], cmp: Comparator<T, CompResult>) -> Result<(), SortError> {
        v.sort_by(cmp.ordering());
        Ok(())
    }
}

pub enum RustStdUnstable {}

impl Algorithm for RustStdUnstable {
    const NAME: &'static str = "rust_std_unstable";
    const STABLE: bool = false;
    type Outcome = CompResult;
}

impl<T: Element> SortAlgorithm<T> for RustStdUnstable {
    const SUPPORT: Support = Support::Full;

    fn sort(v: &mut [T]) {
        natural_slice_mut(v).sort_unstable();
    }

    fn sort_by(v: &mut [T], cmp: Comparator<T, CompResult>) -> Result<(), SortError> {
        v.sort_unstable_by(cmp.ordering());
        Ok(())
    }
}

export_shims!(RustStdStable => {
    i32: rust_std_stable_i32, rust_std_stable_i32_by;
    u64: rust_std_stable_u64, rust_std_stable_u64_by;
    FfiString: rust_std_stable_ffi_string, rust_std_stable_ffi_string_by;
    F128: rust_std_stable_f128, rust_std_stable_f128_by;
    FfiOneKibiByte: rust_std_stable_1k, rust_std_stable_1k_by;
});

export_shims!(RustStdUnstable => {
    i32: rust_std_unstable_i32, rust_std_unstable_i32_by;
    u64: rust_std_unstable_u64, rust_std_unstable_u64_by;
    FfiString: rust_std_unstable_ffi_string, rust_std_unstable_ffi_string_by;
    F128: rust_std_unstable_f128, rust_std_unstable_f128_by;
    FfiOneKibiByte: rust_std_unstable_1k, rust_std_unstable_1k_by;
});
