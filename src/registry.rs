//! Catalogue of every exported entry point and what it supports.

use std::fmt;

use crate::algorithms::heapsort::StdHeapsortUnstable;
use crate::algorithms::radix_lsb::RadixLsbStable;
use crate::algorithms::rust_std::{RustStdStable, RustStdUnstable};
use crate::go_bridge::{GolangStdStable, GolangStdUnstable};
use crate::shim::{SortAlgorithm, SortAllElements, Support};
use crate::types::{Element, ElementType, F128, FfiOneKibiByte, FfiString};

/// One `(algorithm, element type)` pair, exported as a `sort` and a `sort_by` symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub algorithm: &'static str,
    pub stable: bool,
    pub element: ElementType,
    pub support: Support,
}

impl Entry {
    fn of<A: SortAlgorithm<T>, T: Element>() -> Self {
        Entry {
            algorithm: A::NAME,
            stable: A::STABLE,
            element: T::TYPE,
            support: A::SUPPORT,
        }
    }

    /// Name of the default-order symbol, e.g. `rust_std_stable_i32`.
    pub fn symbol(&self) -> String {
        format!("{}_{}", self.algorithm, self.element.suffix())
    }

    /// Name of the custom-comparator symbol, e.g. `rust_std_stable_i32_by`.
    pub fn by_symbol(&self) -> String {
        format!("{}_by", self.symbol())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.support {
            Support::Full => write!(f, "{}: full", self.symbol()),
            Support::DefaultOnly(reason) => write!(f, "{}: default order only ({reason})", self.symbol()),
            Support::Unsupported(reason) => write!(f, "{}: unsupported ({reason})", self.symbol()),
        }
    }
}

fn push_all<A: SortAllElements>(entries: &mut Vec<Entry>) {
    entries.push(Entry::of::<A, i32>());
    entries.push(Entry::of::<A, u64>());
    entries.push(Entry::of::<A, FfiString>());
    entries.push(Entry::of::<A, F128>());
    entries.push(Entry::of::<A, FfiOneKibiByte>());
}

/// Every entry compiled into this build, grouped by algorithm in element type order.
pub fn entries() -> Vec<Entry> {
    let mut entries = Vec::new();

    push_all::<RustStdStable>(&mut entries);
    push_all::<RustStdUnstable>(&mut entries);
    #[cfg(feature = "glidesort")]
    push_all::<crate::algorithms::glidesort_stable::GlidesortStable>(&mut entries);
    push_all::<StdHeapsortUnstable>(&mut entries);
    #[cfg(feature = "qsort")]
    push_all::<crate::algorithms::qsort::QsortUnstable>(&mut entries);
    #[cfg(feature = "radsort")]
    push_all::<crate::algorithms::radsort_stable::RadsortStable>(&mut entries);
    push_all::<RadixLsbStable>(&mut entries);
    #[cfg(feature = "rayon")]
    {
        push_all::<crate::algorithms::rayon_parallel::RayonParallelStable>(&mut entries);
        push_all::<crate::algorithms::rayon_parallel::RayonParallelUnstable>(&mut entries);
    }
    push_all::<GolangStdStable>(&mut entries);
    push_all::<GolangStdUnstable>(&mut entries);

    entries
}

pub fn find(algorithm: &str, element: ElementType) -> Option<Entry> {
    entries()
        .into_iter()
        .find(|entry| entry.algorithm == algorithm && entry.element == element)
}
