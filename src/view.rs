//! Ordered views over element slices.

use std::cmp::Ordering;
use std::mem::{align_of, size_of};

use crate::types::Element;

/// Layout-identical view of `T` whose `Ord` is the element's natural order.
///
/// Algorithms that only accept `T: Ord` sort `[Natural<T>]` obtained from
/// [`natural_slice_mut`].
#[repr(transparent)]
pub struct Natural<T>(pub T);

impl<T: Element> PartialEq for Natural<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0.natural_cmp(&other.0) == Ordering::Equal
    }
}

impl<T: Element> Eq for Natural<T> {}

impl<T: Element> PartialOrd for Natural<T> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element> Ord for Natural<T> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.natural_cmp(&other.0)
    }
}

/// Reinterpret `v` as a slice of [`Natural`] views.
#[inline(always)]
pub fn natural_slice_mut<T: Element>(v: &mut [T]) -> &mut [Natural<T>] {
    const {
        assert!(size_of::<Natural<T>>() == size_of::<T>());
        assert!(align_of::<Natural<T>>() == align_of::<T>());
    }

    // SAFETY: `Natural<T>` is `repr(transparent)` over `T`.
    unsafe { &mut *(v as *mut [T] as *mut [Natural<T>]) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FfiOneKibiByte, F128};

    #[test]
    fn view_sorts_underlying_values() {
        let mut v = vec![F128::new(5), F128::new(-3), F128::new(1)];
        natural_slice_mut(&mut v).sort();
        assert_eq!(v, vec![F128::new(-3), F128::new(1), F128::new(5)]);
    }

    #[test]
    fn view_uses_sparse_key() {
        let mut a = FfiOneKibiByte::new(1);
        let b = FfiOneKibiByte::new(1);
        a.values[0] = -100;
        assert!(Natural(a) == Natural(b));
    }
}
