//! Calling the exported shims from Rust.
//!
//! The trampolines here play the part of a foreign caller: they turn a Rust closure into a
//! `CmpFn`, catch the closure's own panic and report it through the outcome's panic flag, exactly
//! as a comparator written in another language has to.

use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};

use crate::bridge::{LessResult, Outcome};
use crate::error::{SortError, Status};
use crate::shim::{self, SortAlgorithm};
use crate::types::Element;

/// Context handed across the boundary for one call.
struct CallerCtx<F> {
    compare: F,
    panicked: bool,
}

impl<F> CallerCtx<F> {
    fn new(compare: F) -> Self {
        CallerCtx {
            compare,
            panicked: false,
        }
    }

    fn as_ctx(&mut self) -> *mut u8 {
        self as *mut Self as *mut u8
    }
}

/// `CmpFn` calling a `FnMut(&T, &T) -> Ordering` stored behind `ctx`.
///
/// # Safety
///
/// `ctx` must point to a live `CallerCtx<F>` not otherwise borrowed.
unsafe extern "C" fn rust_fn_cmp<T, F, R>(a: &T, b: &T, ctx: *mut u8) -> R
where
    F: FnMut(&T, &T) -> Ordering,
    R: Outcome,
{
    let ctx = &mut *(ctx as *mut CallerCtx<F>);

    match panic::catch_unwind(AssertUnwindSafe(|| (ctx.compare)(a, b))) {
        Ok(ord) => R::from_ordering(ord),
        Err(_) => {
            ctx.panicked = true;
            R::PANIC
        }
    }
}

/// `CmpFn` calling a `FnMut(&T, &T) -> bool` less-than predicate stored behind `ctx`.
///
/// # Safety
///
/// `ctx` must point to a live `CallerCtx<F>` not otherwise borrowed.
unsafe extern "C" fn rust_fn_is_less<T, F>(a: &T, b: &T, ctx: *mut u8) -> LessResult
where
    F: FnMut(&T, &T) -> bool,
{
    let ctx = &mut *(ctx as *mut CallerCtx<F>);

    match panic::catch_unwind(AssertUnwindSafe(|| (ctx.compare)(a, b))) {
        Ok(is_less) => LessResult {
            is_less,
            is_panic: false,
        },
        Err(_) => {
            ctx.panicked = true;
            LessResult::PANIC
        }
    }
}

fn unsupported<A: SortAlgorithm<T>, T: Element>(reason: &'static str) -> SortError {
    SortError::Unsupported {
        algorithm: A::NAME,
        element: T::TYPE,
        reason,
    }
}

fn status_to_result<A: SortAlgorithm<T>, T: Element>(status: u32, panicked: bool) -> Result<(), SortError> {
    match Status::from(status) {
        Status::Success => Ok(()),
        Status::Failure if panicked => Err(SortError::ComparatorPanic),
        Status::Failure => match A::SUPPORT.custom_order_refusal() {
            Some(reason) => Err(unsupported::<A, T>(reason)),
            None => Err(SortError::Failed(A::NAME)),
        },
    }
}

/// Sort `v` by natural order through the shim of `A`.
pub fn sort<A, T>(v: &mut [T]) -> Result<(), SortError>
where
    A: SortAlgorithm<T>,
    T: Element,
{
    if let Some(reason) = A::SUPPORT.default_order_refusal() {
        return Err(unsupported::<A, T>(reason));
    }

    // SAFETY: `v` is a valid, exclusively borrowed buffer.
    unsafe { shim::sort::<A, T>(v.as_mut_ptr(), v.len()) };
    Ok(())
}

/// Sort `v` with a three-way `compare` through the `_by` shim of `A`.
///
/// A panic in `compare` is reported as [`SortError::ComparatorPanic`], `v` then holds some
/// permutation of its original elements.
pub fn sort_by<A, T, F>(v: &mut [T], compare: F) -> Result<(), SortError>
where
    A: SortAlgorithm<T>,
    T: Element,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut ctx = CallerCtx::new(compare);

    // SAFETY: `v` is a valid, exclusively borrowed buffer and `ctx` outlives the call.
    let status = unsafe {
        shim::sort_by::<A, T>(
            v.as_mut_ptr(),
            v.len(),
            rust_fn_cmp::<T, F, A::Outcome>,
            ctx.as_ctx(),
        )
    };

    status_to_result::<A, T>(status, ctx.panicked)
}

/// Sort `v` with a less-than predicate, for algorithms taking [`LessResult`] comparators.
pub fn sort_by_less<A, T, F>(v: &mut [T], is_less: F) -> Result<(), SortError>
where
    A: SortAlgorithm<T, Outcome = LessResult>,
    T: Element,
    F: FnMut(&T, &T) -> bool,
{
    let mut ctx = CallerCtx::new(is_less);

    // SAFETY: As for `sort_by`.
    let status = unsafe {
        shim::sort_by::<A, T>(v.as_mut_ptr(), v.len(), rust_fn_is_less::<T, F>, ctx.as_ctx())
    };

    status_to_result::<A, T>(status, ctx.panicked)
}
