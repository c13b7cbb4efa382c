//! Element types with a layout shared by both sides of the boundary.
//!
//! Instances are allocated and owned by the caller. The adaptation layer only reorders them in
//! place, it never allocates or frees element payloads.

use std::cmp::Ordering;
use std::ffi::c_char;
use std::fmt;
use std::mem::{align_of, size_of, ManuallyDrop};
use std::{slice, str};

use crate::primitive::branchless_cmp;

/// Descriptor for the closed set of benchmark element types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    I32,
    U64,
    FfiString,
    F128,
    OneKibiByte,
}

impl ElementType {
    pub const COUNT: usize = 5;

    pub const ALL: [ElementType; Self::COUNT] = [
        ElementType::I32,
        ElementType::U64,
        ElementType::FfiString,
        ElementType::F128,
        ElementType::OneKibiByte,
    ];

    /// Suffix used in exported symbol names, e.g. `rust_std_stable_ffi_string_by`.
    pub const fn suffix(self) -> &'static str {
        match self {
            ElementType::I32 => "i32",
            ElementType::U64 => "u64",
            ElementType::FfiString => "ffi_string",
            ElementType::F128 => "f128",
            ElementType::OneKibiByte => "1k",
        }
    }

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A type that can cross the boundary as a sort element.
pub trait Element: Sized + Send + Sync + 'static {
    const TYPE: ElementType;

    /// The natural order used by the default-order entry points.
    fn natural_cmp(&self, other: &Self) -> Ordering;
}

impl Element for i32 {
    const TYPE: ElementType = ElementType::I32;

    #[inline(always)]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        branchless_cmp(self, other).cmp(&0)
    }
}

impl Element for u64 {
    const TYPE: ElementType = ElementType::U64;

    #[inline(always)]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        branchless_cmp(self, other).cmp(&0)
    }
}

/// Heap owning string, `{data, len, capacity}`.
///
/// Move-only on this side of the boundary: no `Copy`, no `Clone` and no `Drop`. Algorithms that
/// require copyable elements cannot accept it, and byte-copying C algorithms see it as plain bytes.
#[repr(C)]
pub struct FfiString {
    data: *mut c_char,
    len: usize,
    capacity: usize,
}

// SAFETY: The value uniquely owns its allocation and is only ever read through shared references.
unsafe impl Send for FfiString {}
unsafe impl Sync for FfiString {}

impl FfiString {
    /// Hand ownership of `val` to a new `FfiString`.
    pub fn from_string(val: String) -> Self {
        let mut val = ManuallyDrop::new(val);
        Self {
            data: val.as_mut_ptr() as *mut c_char,
            len: val.len(),
            capacity: val.capacity(),
        }
    }

    /// # Safety
    ///
    /// `data` must point to `len` initialized bytes that stay valid for as long as the value is
    /// used, and `capacity` must describe the allocation if the value is ever turned back into a
    /// `String`.
    pub unsafe fn from_raw_parts(data: *mut c_char, len: usize, capacity: usize) -> Self {
        Self {
            data,
            len,
            capacity,
        }
    }

    /// Take back ownership of the allocation.
    ///
    /// # Safety
    ///
    /// The value must have been created by [`FfiString::from_string`] and must not have been
    /// duplicated by a bytewise copy that is still in use.
    pub unsafe fn into_string(self) -> String {
        String::from_raw_parts(self.data as *mut u8, self.len, self.capacity)
    }

    pub fn as_bytes(&self) -> &[u8] {
        if self.data.is_null() {
            return &[];
        }

        // SAFETY: Valid by construction, see `from_string` and `from_raw_parts`.
        unsafe { slice::from_raw_parts(self.data as *const u8, self.len) }
    }

    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(self.as_bytes()).ok()
    }
}

impl Element for FfiString {
    const TYPE: ElementType = ElementType::FfiString;

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl PartialEq for FfiString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for FfiString {}

impl fmt::Debug for FfiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// 16 byte value whose order is the quotient `x / y`, making every comparison a division.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct F128 {
    pub x: f64,
    pub y: f64,
}

impl F128 {
    pub fn new(val: i32) -> Self {
        let val_f = (val as f64) + (i32::MAX as f64) + 10.0;

        let x = val_f + 0.1;
        let y = val_f.log(4.1);

        debug_assert!(y < x);
        debug_assert!(x.is_normal() && y.is_normal());

        Self { x, y }
    }

    #[inline(always)]
    pub fn div_value(&self) -> f64 {
        self.x / self.y
    }
}

impl Element for F128 {
    const TYPE: ElementType = ElementType::F128;

    #[inline]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        // Callers only pass normal values, unordered quotients compare equal.
        self.div_value()
            .partial_cmp(&other.div_value())
            .unwrap_or(Ordering::Equal)
    }
}

/// Very large stack value, ordered by a sparse sample of its fields.
#[repr(C)]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FfiOneKibiByte {
    pub values: [i64; 128],
}

impl FfiOneKibiByte {
    /// Indices that make up the ordering key. Changing them changes benchmark results.
    pub const KEY_INDICES: [usize; 3] = [11, 55, 77];

    pub fn new(val: i32) -> Self {
        let mut values = [0i64; 128];
        let mut val_i64 = val as i64;

        for elem in &mut values {
            *elem = val_i64;
            val_i64 += 1;
        }

        Self { values }
    }

    #[inline(always)]
    pub fn key(&self) -> i64 {
        let [a, b, c] = Self::KEY_INDICES;
        self.values[a]
            .wrapping_add(self.values[b])
            .wrapping_add(self.values[c])
    }
}

impl Element for FfiOneKibiByte {
    const TYPE: ElementType = ElementType::OneKibiByte;

    #[inline]
    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

const _: () = {
    assert!(size_of::<FfiString>() == 3 * size_of::<usize>());
    assert!(align_of::<FfiString>() == align_of::<usize>());
    assert!(size_of::<F128>() == 16);
    assert!(align_of::<F128>() == 8);
    assert!(size_of::<FfiOneKibiByte>() == 1024);
    assert!(align_of::<FfiOneKibiByte>() == 8);
};
