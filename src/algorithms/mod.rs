//! One module per vendored algorithm.
//!
//! | algorithm               | comparator outcome | custom order |
//! |-------------------------|--------------------|--------------|
//! | `rust_std_*`            | [`CompResult`]     | yes          |
//! | `glidesort_stable`      | [`LessResult`]     | yes          |
//! | `std_heapsort_unstable` | [`CompResult`]     | yes, strict  |
//! | `qsort_unstable`        | [`CompResult`]     | yes          |
//! | `radsort_stable`        | [`CompResult`]     | no           |
//! | `radix_lsb_stable`      | [`CompResult`]     | no           |
//! | `rayon_parallel_*`      | [`CompResult`]     | no           |
//!
//! [`CompResult`]: crate::bridge::CompResult
//! [`LessResult`]: crate::bridge::LessResult

#[cfg(feature = "glidesort")]
pub mod glidesort_stable;
pub mod heapsort;
#[cfg(feature = "qsort")]
pub mod qsort;
pub mod radix_lsb;
#[cfg(feature = "radsort")]
pub mod radsort_stable;
#[cfg(feature = "rayon")]
pub mod rayon_parallel;
pub mod rust_std;
