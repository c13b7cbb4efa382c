//! Numeric sort bridge for a second runtime following the cgo conventions.
//!
//! That runtime passes slices as [`GoSlice`] headers, calls comparators by value through an
//! exported bridge function (`i32_by_bridge`, `u64_by_bridge`) and has no panic flag. A panicking
//! comparator is signalled by returning [`PANIC_MAGIC_NUMBER`] instead of a comparison result, the
//! runtime turns that into its own panic, recovers it and reports `did_panic`. Only the two
//! primitive integer types cross this boundary.

mod runtime;

use std::ffi::c_void;

use crate::bridge::{self, CompResult, Comparator, Outcome};
use crate::error::SortError;
use crate::shim::{Algorithm, SortAlgorithm, Support};
use crate::types::{Element, F128, FfiOneKibiByte, FfiString};

pub type GoInt = i64;

/// Slice header of the second runtime.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct GoSlice {
    pub data: *mut c_void,
    pub len: GoInt,
    pub cap: GoInt,
}

impl GoSlice {
    pub fn from_slice<T>(v: &mut [T]) -> Self {
        GoSlice {
            data: v.as_mut_ptr() as *mut c_void,
            len: v.len() as GoInt,
            cap: v.len() as GoInt,
        }
    }
}

/// Communicates to the runtime that the comparator panicked. Never a legitimate comparison
/// result, those are always in {-1, 0, 1}.
pub const PANIC_MAGIC_NUMBER: i64 = 777;

/// By-value comparator as seen by the runtime.
pub type GoCmpFn<T> = unsafe extern "C" fn(T, T) -> i64;

/// # Safety
///
/// `fn_ptr` must be a valid comparator for the current call.
#[no_mangle]
pub unsafe extern "C" fn i32_by_bridge(fn_ptr: GoCmpFn<i32>, a: i32, b: i32) -> i64 {
    fn_ptr(a, b)
}

/// # Safety
///
/// `fn_ptr` must be a valid comparator for the current call.
#[no_mangle]
pub unsafe extern "C" fn u64_by_bridge(fn_ptr: GoCmpFn<u64>, a: u64, b: u64) -> i64 {
    fn_ptr(a, b)
}

/// Integer types that cross into the runtime.
pub trait GoPrimitive: Element + Copy + Ord {
    /// Exported bridge the runtime calls comparators through.
    const BY_BRIDGE: unsafe extern "C" fn(GoCmpFn<Self>, Self, Self) -> i64;
}

impl GoPrimitive for i32 {
    const BY_BRIDGE: unsafe extern "C" fn(GoCmpFn<Self>, Self, Self) -> i64 = i32_by_bridge;
}

impl GoPrimitive for u64 {
    const BY_BRIDGE: unsafe extern "C" fn(GoCmpFn<Self>, Self, Self) -> i64 = u64_by_bridge;
}

/// Capture-less by-value comparator handed to the runtime, reading the slot rented for `T`.
unsafe extern "C" fn go_trampoline<T: GoPrimitive>(a: T, b: T) -> i64 {
    let Some(cmp) = bridge::current::<T, CompResult>() else {
        return PANIC_MAGIC_NUMBER;
    };

    let outcome = cmp.invoke(&a, &b);

    if outcome.is_panic() {
        return PANIC_MAGIC_NUMBER;
    }

    outcome.cmp_result as i64
}

fn sort_by_bridged<T: GoPrimitive>(
    v: &mut [T],
    stable: bool,
    cmp: Comparator<T, CompResult>,
) -> Result<(), SortError> {
    let _slot = bridge::rent(cmp);

    // SAFETY: The header describes `v`, which outlives the call.
    let did_panic =
        unsafe { runtime::sort_func_by(GoSlice::from_slice(v), stable, T::BY_BRIDGE, go_trampoline::<T>) };

    if did_panic {
        return Err(SortError::ComparatorPanic);
    }

    Ok(())
}

const RUNTIME_INTEGERS_ONLY: &str = "only primitive integers cross the runtime boundary";

macro_rules! go_algorithm {
    ($algo:ident, $name:literal, $stable:literal) => {
        pub enum $algo {}

        impl Algorithm for $algo {
            const NAME: &'static str = $name;
            const STABLE: bool = $stable;
            type Outcome = CompResult;
        }

        impl<T: GoPrimitive> SortAlgorithm<T> for $algo {
            const SUPPORT: Support = Support::Full;

            fn sort(v: &mut [T]) {
                // SAFETY: The header describes `v`, which outlives the call.
                unsafe { runtime::sort_func::<T>(GoSlice::from_slice(v), $stable) };
            }

            fn sort_by(v: &mut [T], cmp: Comparator<T, CompResult>) -> Result<(), SortError> {
                sort_by_bridged(v, $stable, cmp)
            }
        }

        impl SortAlgorithm<FfiString> for $algo {
            const SUPPORT: Support = Support::Unsupported(RUNTIME_INTEGERS_ONLY);
        }

        impl SortAlgorithm<F128> for $algo {
            const SUPPORT: Support = Support::Unsupported(RUNTIME_INTEGERS_ONLY);
        }

        impl SortAlgorithm<FfiOneKibiByte> for $algo {
            const SUPPORT: Support = Support::Unsupported(RUNTIME_INTEGERS_ONLY);
        }
    };
}

go_algorithm!(GolangStdStable, "golang_std_stable", true);
go_algorithm!(GolangStdUnstable, "golang_std_unstable", false);

export_shims!(GolangStdStable => {
    i32: golang_std_stable_i32, golang_std_stable_i32_by;
    u64: golang_std_stable_u64, golang_std_stable_u64_by;
    FfiString: golang_std_stable_ffi_string, golang_std_stable_ffi_string_by;
    F128: golang_std_stable_f128, golang_std_stable_f128_by;
    FfiOneKibiByte: golang_std_stable_1k, golang_std_stable_1k_by;
});

export_shims!(GolangStdUnstable => {
    i32: golang_std_unstable_i32, golang_std_unstable_i32_by;
    u64: golang_std_unstable_u64, golang_std_unstable_u64_by;
    FfiString: golang_std_unstable_ffi_string, golang_std_unstable_ffi_string_by;
    F128: golang_std_unstable_f128, golang_std_unstable_f128_by;
    FfiOneKibiByte: golang_std_unstable_1k, golang_std_unstable_1k_by;
});
