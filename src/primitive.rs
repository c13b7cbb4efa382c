//! Fixed-width integer fast paths.
//!
//! Default-order entry points for `i32` and `u64` compare raw values with a branchless three-way
//! comparison instead of going through the comparator bridge.

use std::cmp::Ordering;
use std::ffi::{c_int, c_void};

use crate::types::Element;

/// `(a < b) * -1 + (a > b) * 1`.
///
/// `a - b` would overflow for distant values, and this form compiles to branch-free code.
#[inline(always)]
#[allow(clippy::identity_op)]
pub fn branchless_cmp<T: PartialOrd>(a: &T, b: &T) -> i32 {
    let is_less = a < b;
    let is_more = a > b;
    (is_less as i32 * -1) + (is_more as i32 * 1)
}

/// C-ABI form of [`branchless_cmp`] for `qsort`-style APIs.
///
/// # Safety
///
/// Both pointers must point to valid, aligned values of `T`.
pub unsafe extern "C" fn int_cmp_c<T: Copy + PartialOrd>(
    a_ptr: *const c_void,
    b_ptr: *const c_void,
) -> c_int {
    let a = *(a_ptr as *const T);
    let b = *(b_ptr as *const T);

    branchless_cmp(&a, &b) as c_int
}

/// Branchless C comparator over the natural order of any element type.
///
/// # Safety
///
/// Both pointers must point to valid, aligned values of `T`.
#[allow(clippy::identity_op)]
pub unsafe extern "C" fn natural_cmp_c<T: Element>(
    a_ptr: *const c_void,
    b_ptr: *const c_void,
) -> c_int {
    let ord = (*(a_ptr as *const T)).natural_cmp(&*(b_ptr as *const T));

    let is_less = ord == Ordering::Less;
    let is_more = ord == Ordering::Greater;
    (is_less as c_int * -1) + (is_more as c_int * 1)
}
