//! Panic-safe comparator bridge.
//!
//! A foreign comparator is a `(function pointer, context pointer)` pair. It never unwinds, it
//! reports failure as data through the `is_panic` flag of its outcome. The bridge checks that flag
//! before looking at the payload and turns it into a local unwind ([`crate::error::raise`]) that the
//! shim boundary catches. Where the target algorithm calls back through C frames nothing may
//! unwind at all, and the panic is recorded in the rented slot instead.

use std::any::TypeId;
use std::cell::Cell;
use std::cmp::Ordering;
use std::ffi::{c_int, c_void};
use std::marker::PhantomData;
use std::mem::{align_of, size_of};

use crate::error::{raise, SortError};
use crate::types::{Element, ElementType};

/// Three-way outcome, `cmp_result` is -1 == less, 0 == equal, 1 == more.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompResult {
    pub cmp_result: i8,
    pub is_panic: bool,
}

/// Less-than outcome.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LessResult {
    pub is_less: bool,
    pub is_panic: bool,
}

/// Foreign comparator function: two elements and the opaque context.
pub type CmpFn<T, R> = unsafe extern "C" fn(&T, &T, *mut u8) -> R;

/// The shape of the value a foreign comparator returns.
pub trait Outcome: Copy + 'static {
    /// Outcome reported by a comparator that panicked.
    const PANIC: Self;

    fn from_ordering(ord: Ordering) -> Self;

    fn is_panic(&self) -> bool;

    /// Payload as an ordering. Meaningless when `is_panic` is set.
    fn to_ordering(&self) -> Ordering;

    /// Payload as a strict trichotomy, for `Ord` implementations.
    fn to_strong_ordering(&self) -> Result<Ordering, SortError> {
        Ok(self.to_ordering())
    }
}

impl Outcome for CompResult {
    const PANIC: Self = CompResult {
        cmp_result: 0,
        is_panic: true,
    };

    fn from_ordering(ord: Ordering) -> Self {
        CompResult {
            cmp_result: ord as i8,
            is_panic: false,
        }
    }

    #[inline(always)]
    fn is_panic(&self) -> bool {
        self.is_panic
    }

    #[inline(always)]
    fn to_ordering(&self) -> Ordering {
        self.cmp_result.cmp(&0)
    }

    fn to_strong_ordering(&self) -> Result<Ordering, SortError> {
        StrongOrdering::try_from(self.cmp_result).map(Ordering::from)
    }
}

impl Outcome for LessResult {
    const PANIC: Self = LessResult {
        is_less: false,
        is_panic: true,
    };

    fn from_ordering(ord: Ordering) -> Self {
        LessResult {
            is_less: ord == Ordering::Less,
            is_panic: false,
        }
    }

    #[inline(always)]
    fn is_panic(&self) -> bool {
        self.is_panic
    }

    /// Equal and greater are indistinguishable, which is all a less-than based sort asks for.
    #[inline(always)]
    fn to_ordering(&self) -> Ordering {
        if self.is_less {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Strict three-way result. Any code outside {-1, 0, 1} is an error, not a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrongOrdering {
    Less,
    Equal,
    Greater,
}

impl TryFrom<i8> for StrongOrdering {
    type Error = SortError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(StrongOrdering::Less),
            0 => Ok(StrongOrdering::Equal),
            1 => Ok(StrongOrdering::Greater),
            other => Err(SortError::UnknownOrdering(other)),
        }
    }
}

impl From<StrongOrdering> for Ordering {
    fn from(value: StrongOrdering) -> Self {
        match value {
            StrongOrdering::Less => Ordering::Less,
            StrongOrdering::Equal => Ordering::Equal,
            StrongOrdering::Greater => Ordering::Greater,
        }
    }
}

/// Comparator handle supplied by the caller. Valid for the duration of one sort call.
pub struct Comparator<T, R> {
    cmp_fn: CmpFn<T, R>,
    ctx: *mut u8,
}

impl<T, R> Clone for Comparator<T, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, R> Copy for Comparator<T, R> {}

impl<T: Element, R: Outcome> Comparator<T, R> {
    pub fn new(cmp_fn: CmpFn<T, R>, ctx: *mut u8) -> Self {
        Self { cmp_fn, ctx }
    }

    /// Call the foreign function without looking at the outcome.
    #[inline(always)]
    pub fn invoke(&self, a: &T, b: &T) -> R {
        // SAFETY: The caller of the shim guarantees `cmp_fn` accepts `ctx` for this call.
        unsafe { (self.cmp_fn)(a, b, self.ctx) }
    }

    /// Call the foreign function, raising [`SortError::ComparatorPanic`] if it reports a panic.
    #[inline(always)]
    pub fn call(&self, a: &T, b: &T) -> R {
        let outcome = self.invoke(a, b);

        if outcome.is_panic() {
            raise(SortError::ComparatorPanic);
        }

        outcome
    }

    /// Adapter for algorithms that take an `FnMut(&T, &T) -> Ordering` comparator.
    #[inline(always)]
    pub fn ordering(&self) -> impl FnMut(&T, &T) -> Ordering + '_ {
        move |a, b| self.call(a, b).to_ordering()
    }
}

// --- Call-scoped slot for capture-less comparator APIs ---

#[derive(Clone, Copy)]
struct RawSlot {
    cmp_fn: *const (),
    ctx: *mut u8,
    outcome: TypeId,
    panicked: bool,
}

thread_local! {
    static SLOTS: [Cell<Option<RawSlot>>; ElementType::COUNT] =
        const { [const { Cell::new(None) }; ElementType::COUNT] };
}

/// Makes `cmp` the current comparator for element type `T` on this thread until the returned
/// guard is dropped.
///
/// Precondition: no other sort of `T` runs on this thread while the guard is alive. A nested
/// rental shadows the outer one until it is returned.
pub fn rent<T: Element, R: Outcome>(cmp: Comparator<T, R>) -> SlotGuard<T, R> {
    let raw = RawSlot {
        cmp_fn: cmp.cmp_fn as *const (),
        ctx: cmp.ctx,
        outcome: TypeId::of::<R>(),
        panicked: false,
    };

    let index = T::TYPE.index();
    let previous = SLOTS.with(|slots| slots[index].replace(Some(raw)));

    SlotGuard {
        index,
        previous,
        _marker: PhantomData,
    }
}

/// Returned by [`rent`]. Restores the previous slot content on drop, including during unwinding.
pub struct SlotGuard<T, R> {
    index: usize,
    previous: Option<RawSlot>,
    _marker: PhantomData<fn(T) -> R>,
}

impl<T: Element, R: Outcome> SlotGuard<T, R> {
    /// Whether the comparator reported a panic through [`c_trampoline`].
    pub fn panicked(&self) -> bool {
        SLOTS.with(|slots| slots[self.index].get().is_some_and(|raw| raw.panicked))
    }
}

impl<T, R> Drop for SlotGuard<T, R> {
    fn drop(&mut self) {
        let previous = self.previous.take();
        SLOTS.with(|slots| slots[self.index].set(previous));
    }
}

fn with_slot<T: Element, O>(f: impl FnOnce(&Cell<Option<RawSlot>>) -> O) -> O {
    SLOTS.with(|slots| f(&slots[T::TYPE.index()]))
}

/// The comparator currently rented for `T` with outcome shape `R`.
pub fn current<T: Element, R: Outcome>() -> Option<Comparator<T, R>> {
    let raw = with_slot::<T, _>(|slot| slot.get())?;

    if raw.outcome != TypeId::of::<R>() {
        return None;
    }

    // SAFETY: `rent::<T, R>` stored a `CmpFn<T, R>` in the slot of `T` and the outcome type was
    // checked above.
    let cmp_fn = unsafe { std::mem::transmute::<*const (), CmpFn<T, R>>(raw.cmp_fn) };

    Some(Comparator::new(cmp_fn, raw.ctx))
}

/// Capture-less C comparator reading the rented slot of `T`.
///
/// It must never unwind into the C caller: a panic is recorded in the slot and every later call
/// answers "equal" without calling the foreign comparator again. The shim checks
/// [`SlotGuard::panicked`] once the C sort returns.
pub unsafe extern "C" fn c_trampoline<T: Element, R: Outcome>(
    a_ptr: *const c_void,
    b_ptr: *const c_void,
) -> c_int {
    let Some(cmp) = current::<T, R>() else {
        return 0;
    };

    if with_slot::<T, _>(|slot| slot.get().is_some_and(|raw| raw.panicked)) {
        return 0;
    }

    let outcome = cmp.invoke(&*(a_ptr as *const T), &*(b_ptr as *const T));

    if outcome.is_panic() {
        with_slot::<T, _>(|slot| {
            if let Some(mut raw) = slot.get() {
                raw.panicked = true;
                slot.set(Some(raw));
            }
        });
        return 0;
    }

    outcome.to_ordering() as c_int
}

/// Layout-identical wrapper whose `Ord` calls the comparator rented for `T`.
///
/// For algorithms without any comparator hook. Outcome codes outside {-1, 0, 1} raise
/// [`SortError::UnknownOrdering`].
#[repr(transparent)]
pub struct CompWrapper<T, R> {
    value: T,
    _outcome: PhantomData<fn() -> R>,
}

impl<T: Element, R: Outcome> CompWrapper<T, R> {
    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: Element, R: Outcome> PartialEq for CompWrapper<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Element, R: Outcome> Eq for CompWrapper<T, R> {}

impl<T: Element, R: Outcome> PartialOrd for CompWrapper<T, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Element, R: Outcome> Ord for CompWrapper<T, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        let Some(cmp) = current::<T, R>() else {
            raise(SortError::Internal(format!(
                "no comparator rented for {}",
                T::TYPE
            )));
        };

        match cmp.call(&self.value, &other.value).to_strong_ordering() {
            Ok(ord) => ord,
            Err(err) => raise(err),
        }
    }
}

/// Reinterpret `v` as a slice of [`CompWrapper`]s. Only meaningful while a comparator is rented.
pub fn wrap_slice_mut<T: Element, R: Outcome>(v: &mut [T]) -> &mut [CompWrapper<T, R>] {
    const {
        assert!(size_of::<CompWrapper<T, R>>() == size_of::<T>());
        assert!(align_of::<CompWrapper<T, R>>() == align_of::<T>());
    }

    // SAFETY: `CompWrapper<T, R>` is `repr(transparent)` over `T`.
    unsafe { &mut *(v as *mut [T] as *mut [CompWrapper<T, R>]) }
}
