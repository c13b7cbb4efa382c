//! [glidesort](https://github.com/orlp/glidesort), fed through the less-than outcome shape.

use crate::bridge::{Comparator, LessResult};
use crate::error::SortError;
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{Element, F128, FfiOneKibiByte, FfiString};
use crate::view::natural_slice_mut;

pub enum GlidesortStable {}

impl Algorithm for GlidesortStable {
    const NAME: &'static str = "glidesort_stable";
    const STABLE: bool = true;
    type Outcome = LessResult;
}

impl<T: Element> SortAlgorithm<T> for GlidesortStable {
    const SUPPORT: Support = Support::Full;

    fn sort(v: &mut [T]) {
        ::glidesort::sort(natural_slice_mut(v));
    }

    fn sort_by(v: &mut [T], cmp: Comparator<T, LessResult>) -> Result<(), SortError> {
        // glidesort only ever asks `compare(a, b) == Less`
        ::glidesort::sort_by(v, cmp.ordering());
        Ok(())
    }
}

export_shims!(GlidesortStable => {
    i32: glidesort_stable_i32, glidesort_stable_i32_by;
    u64: glidesort_stable_u64, glidesort_stable_u64_by;
    FfiString: glidesort_stable_ffi_string, glidesort_stable_ffi_string_by;
    F128: glidesort_stable_f128, glidesort_stable_f128_by;
    FfiOneKibiByte: glidesort_stable_1k, glidesort_stable_1k_by;
});
