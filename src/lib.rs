//! Uniform C-callable adaptation layer over a collection of sort implementations.
//!
//! Every exported symbol follows `<algorithm>_<stability-or-variant>_<type-suffix>[_by]`, with
//! `<type-suffix>` one of `i32`, `u64`, `ffi_string`, `f128` or `1k`:
//!
//! - `sort(data, len)` sorts by the element's natural order and returns nothing.
//! - `sort_by(data, len, cmp_fn, ctx)` sorts with a foreign comparator and returns 0 on success,
//!   1 if the comparator panicked, the algorithm failed, or the combination is unsupported.
//!
//! No unwind ever leaves an exported function. See [`bridge`] for how foreign comparator panics
//! are carried as data and [`registry`] for the support matrix.

#[macro_use]
mod shim;

pub mod algorithms;
pub mod bridge;
pub mod caller;
pub mod error;
pub mod go_bridge;
pub mod primitive;
pub mod radix;
pub mod registry;
pub mod total_order;
pub mod types;
pub mod view;

pub use bridge::{CmpFn, CompResult, Comparator, LessResult, Outcome};
pub use error::{SortError, Status};
pub use shim::{Algorithm, SortAlgorithm, SortAllElements, Support};
pub use types::{Element, ElementType, FfiOneKibiByte, FfiString, F128};

/// Generic shim bodies, for drivers that dispatch on Rust types rather than symbol names.
pub mod dispatch {
    pub use crate::shim::{guard, sort, sort_by};
}
