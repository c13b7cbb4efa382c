//! Runtime side of the bridge: `sort.SliceStable` / `sort.Slice` style sorts over a [`GoSlice`].
//!
//! Comparators are only ever reached through the exported `*_by_bridge` function. A result of
//! [`PANIC_MAGIC_NUMBER`] is turned into a runtime panic, which is recovered around the whole sort
//! and reported as `did_panic`.

use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};
use std::slice;

use super::{GoCmpFn, GoPrimitive, GoSlice, PANIC_MAGIC_NUMBER};
use crate::error::SortError;
use crate::primitive::branchless_cmp;

type BridgeFn<T> = unsafe extern "C" fn(GoCmpFn<T>, T, T) -> i64;

/// # Safety
///
/// `header` must describe `len` initialized `T` values, or have a non-positive length.
unsafe fn slice_mut<'a, T>(header: GoSlice) -> &'a mut [T] {
    if header.data.is_null() || header.len <= 0 {
        return &mut [];
    }

    slice::from_raw_parts_mut(header.data as *mut T, header.len as usize)
}

/// Natural order sort.
///
/// # Safety
///
/// See [`slice_mut`].
pub(super) unsafe fn sort_func<T: GoPrimitive>(header: GoSlice, stable: bool) {
    let v = slice_mut::<T>(header);

    if stable {
        v.sort_by(|a, b| branchless_cmp(a, b).cmp(&0));
    } else {
        v.sort_unstable();
    }
}

/// Sort with `cmp_fn` called through `bridge`. Returns whether the comparator panicked.
///
/// # Safety
///
/// See [`slice_mut`], and `cmp_fn` must be callable through `bridge` for the whole call.
pub(super) unsafe fn sort_func_by<T: GoPrimitive>(
    header: GoSlice,
    stable: bool,
    bridge: BridgeFn<T>,
    cmp_fn: GoCmpFn<T>,
) -> bool {
    let v = slice_mut::<T>(header);

    let compare = |a: &T, b: &T| -> Ordering {
        let res = bridge(cmp_fn, *a, *b);

        if res == PANIC_MAGIC_NUMBER {
            panic::resume_unwind(Box::new(SortError::ComparatorPanic));
        }

        res.cmp(&0)
    };

    // recover()
    let did_panic = panic::catch_unwind(AssertUnwindSafe(|| {
        if stable {
            v.sort_by(compare);
        } else {
            v.sort_unstable_by(compare);
        }
    }))
    .is_err();

    did_panic
}
