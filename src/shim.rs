//! Uniform shim bodies shared by every exported entry point.
//!
//! Each vendored algorithm implements [`SortAlgorithm<T>`] for all five element types, declaring
//! through [`Support`] which combinations it can handle. The exported `extern "C"` functions are
//! generated by [`export_shims!`] and all route through [`sort`] and [`sort_by`] here, which
//! refuse stubs before touching the buffer and convert every unwind into a [`Status`].

use std::panic::{self, AssertUnwindSafe};
use std::slice;

use crate::bridge::{CmpFn, Comparator, Outcome};
use crate::error::{SortError, Status};
use crate::types::{Element, ElementType, F128, FfiOneKibiByte, FfiString};

/// What an algorithm can do for one element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Support {
    /// Both the default order and custom comparators.
    Full,
    /// Default order only, custom comparators are refused for the given reason.
    DefaultOnly(&'static str),
    /// Documented stub, the buffer is never touched.
    Unsupported(&'static str),
}

impl Support {
    pub fn default_order_refusal(self) -> Option<&'static str> {
        match self {
            Support::Unsupported(reason) => Some(reason),
            Support::Full | Support::DefaultOnly(_) => None,
        }
    }

    pub fn custom_order_refusal(self) -> Option<&'static str> {
        match self {
            Support::Full => None,
            Support::DefaultOnly(reason) | Support::Unsupported(reason) => Some(reason),
        }
    }
}

/// A vendored sort algorithm, independent of the element type.
pub trait Algorithm {
    /// `<algorithm>_<stability-or-variant>` prefix of the exported symbols.
    const NAME: &'static str;
    const STABLE: bool;
    /// Comparator outcome the `_by` entry points expect.
    type Outcome: Outcome;
}

/// An algorithm adapted to element type `T`.
pub trait SortAlgorithm<T: Element>: Algorithm {
    const SUPPORT: Support;

    /// Sort by natural order. Only called when `SUPPORT` allows it.
    fn sort(_v: &mut [T]) {}

    /// Sort with a foreign comparator. Only called for [`Support::Full`].
    fn sort_by(_v: &mut [T], _cmp: Comparator<T, Self::Outcome>) -> Result<(), SortError> {
        Err(SortError::Unsupported {
            algorithm: Self::NAME,
            element: T::TYPE,
            reason: Self::SUPPORT
                .custom_order_refusal()
                .unwrap_or("no custom comparator hook"),
        })
    }
}

/// Algorithms that provide an entry point for every element type.
pub trait SortAllElements:
    SortAlgorithm<i32>
    + SortAlgorithm<u64>
    + SortAlgorithm<FfiString>
    + SortAlgorithm<F128>
    + SortAlgorithm<FfiOneKibiByte>
{
}

impl<A> SortAllElements for A where
    A: SortAlgorithm<i32>
        + SortAlgorithm<u64>
        + SortAlgorithm<FfiString>
        + SortAlgorithm<F128>
        + SortAlgorithm<FfiOneKibiByte>
{
}

/// Catch every unwind raised by `f` and map the outcome to a [`Status`].
pub fn guard<F>(algorithm: &'static str, element: ElementType, f: F) -> Status
where
    F: FnOnce() -> Result<(), SortError>,
{
    let err = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => return Status::Success,
        Ok(Err(err)) => err,
        Err(payload) => SortError::from_panic(payload),
    };

    log::debug!("{algorithm}_{element}: {err}");
    Status::Failure
}

/// # Safety
///
/// `data` must point to `len` initialized elements, or `len` must be zero.
#[inline(always)]
unsafe fn buffer_mut<'a, T>(data: *mut T, len: usize) -> &'a mut [T] {
    if len == 0 || data.is_null() {
        return &mut [];
    }

    slice::from_raw_parts_mut(data, len)
}

/// Body of every `<algorithm>_<variant>_<type>` entry point.
///
/// # Safety
///
/// `data` must point to `len` initialized elements owned by the caller, or `len` must be zero.
pub unsafe fn sort<A, T>(data: *mut T, len: usize)
where
    A: SortAlgorithm<T>,
    T: Element,
{
    if let Some(reason) = A::SUPPORT.default_order_refusal() {
        log::warn!("{}_{} not supported: {reason}", A::NAME, T::TYPE);
        return;
    }

    let v = buffer_mut(data, len);

    // No foreign code runs here, a failure can only come from the algorithm itself.
    let status = guard(A::NAME, T::TYPE, || {
        A::sort(v);
        Ok(())
    });

    if status != Status::Success {
        log::error!("{}_{} failed with the default order", A::NAME, T::TYPE);
    }
}

/// Body of every `<algorithm>_<variant>_<type>_by` entry point.
///
/// Returns 0 on success and 1 on any failure. After a comparator panic the buffer holds an
/// unspecified permutation of its original elements. A stub returns 1 with the buffer unchanged.
///
/// # Safety
///
/// As for [`sort`], and `cmp_fn` must accept `ctx` for the duration of the call.
pub unsafe fn sort_by<A, T>(
    data: *mut T,
    len: usize,
    cmp_fn: CmpFn<T, A::Outcome>,
    ctx: *mut u8,
) -> u32
where
    A: SortAlgorithm<T>,
    T: Element,
{
    if let Some(reason) = A::SUPPORT.custom_order_refusal() {
        log::warn!("{}_{}_by not supported: {reason}", A::NAME, T::TYPE);
        return Status::Failure as u32;
    }

    let v = buffer_mut(data, len);
    let cmp = Comparator::new(cmp_fn, ctx);

    guard(A::NAME, T::TYPE, || A::sort_by(v, cmp)) as u32
}

/// Export one `sort` / `sort_by` symbol pair per listed element type.
///
/// ```ignore
/// export_shims!(RustStdStable => {
///     i32: rust_std_stable_i32, rust_std_stable_i32_by;
/// });
/// ```
macro_rules! export_shims {
    ($algo:ty => { $($elem:ty: $sort:ident, $sort_by:ident;)* }) => {
        $(
            /// # Safety
            ///
            /// `data` must point to `len` initialized elements, or `len` must be zero.
            #[no_mangle]
            pub unsafe extern "C" fn $sort(data: *mut $elem, len: usize) {
                $crate::shim::sort::<$algo, $elem>(data, len)
            }

            /// # Safety
            ///
            /// `data` must point to `len` initialized elements, or `len` must be zero, and
            /// `cmp_fn` must accept `ctx` for the duration of the call.
            #[no_mangle]
            pub unsafe extern "C" fn $sort_by(
                data: *mut $elem,
                len: usize,
                cmp_fn: $crate::bridge::CmpFn<$elem, <$algo as $crate::shim::Algorithm>::Outcome>,
                ctx: *mut u8,
            ) -> u32 {
                $crate::shim::sort_by::<$algo, $elem>(data, len, cmp_fn, ctx)
            }
        )*
    };
}

/// Declare `$algo` unsupported for each listed element type.
macro_rules! unsupported {
    ($algo:ty => { $($elem:ty: $reason:literal;)* }) => {
        $(
            impl $crate::shim::SortAlgorithm<$elem> for $algo {
                const SUPPORT: $crate::shim::Support = $crate::shim::Support::Unsupported($reason);
            }
        )*
    };
}
