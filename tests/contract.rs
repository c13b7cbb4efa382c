use std::cmp::Ordering;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sort_ffi::algorithms::heapsort::StdHeapsortUnstable;
use sort_ffi::algorithms::radix_lsb::RadixLsbStable;
use sort_ffi::algorithms::rust_std::{RustStdStable, RustStdUnstable};
use sort_ffi::go_bridge::{GolangStdStable, GolangStdUnstable};
use sort_ffi::{
    caller, dispatch, Algorithm, CompResult, Element, F128, FfiOneKibiByte, FfiString, Outcome,
    SortAlgorithm, SortAllElements, SortError,
};

#[cfg(feature = "glidesort")]
use sort_ffi::algorithms::glidesort_stable::GlidesortStable;
#[cfg(feature = "qsort")]
use sort_ffi::algorithms::qsort::QsortUnstable;
#[cfg(feature = "radsort")]
use sort_ffi::algorithms::radsort_stable::RadsortStable;
#[cfg(feature = "rayon")]
use sort_ffi::algorithms::rayon_parallel::{RayonParallelStable, RayonParallelUnstable};

const LENGTHS: [usize; 10] = [0, 1, 2, 3, 8, 20, 21, 64, 500, 2_000];

macro_rules! for_each_algorithm {
    ($check:ident) => {
        $check::<RustStdStable>();
        $check::<RustStdUnstable>();
        #[cfg(feature = "glidesort")]
        $check::<GlidesortStable>();
        $check::<StdHeapsortUnstable>();
        #[cfg(feature = "qsort")]
        $check::<QsortUnstable>();
        #[cfg(feature = "radsort")]
        $check::<RadsortStable>();
        $check::<RadixLsbStable>();
        #[cfg(feature = "rayon")]
        $check::<RayonParallelStable>();
        #[cfg(feature = "rayon")]
        $check::<RayonParallelUnstable>();
        $check::<GolangStdStable>();
        $check::<GolangStdUnstable>();
    };
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Element types built from an `i32` seed such that the natural order follows the seed.
trait Sample: Element + PartialEq + fmt::Debug {
    fn sample(val: i32) -> Self;

    fn release(v: Vec<Self>) {
        drop(v);
    }
}

impl Sample for i32 {
    fn sample(val: i32) -> Self {
        val
    }
}

impl Sample for u64 {
    fn sample(val: i32) -> Self {
        val as u64
    }
}

impl Sample for FfiString {
    fn sample(val: i32) -> Self {
        FfiString::from_string(format!("{val:07}"))
    }

    fn release(v: Vec<Self>) {
        for s in v {
            drop(unsafe { s.into_string() });
        }
    }
}

impl Sample for F128 {
    fn sample(val: i32) -> Self {
        F128::new(val)
    }
}

impl Sample for FfiOneKibiByte {
    fn sample(val: i32) -> Self {
        FfiOneKibiByte::new(val)
    }
}

fn samples<T: Sample>(vals: &[i32]) -> Vec<T> {
    vals.iter().copied().map(T::sample).collect()
}

fn random_vals(rng: &mut StdRng, len: usize) -> Vec<i32> {
    // Narrow range so longer inputs contain duplicates.
    (0..len).map(|_| rng.gen_range(0..1_000)).collect()
}

fn name<A: Algorithm>() -> &'static str {
    A::NAME
}

unsafe extern "C" fn panic_on_call<T, R: Outcome>(_a: &T, _b: &T, ctx: *mut u8) -> R {
    *(ctx as *mut usize) += 1;
    R::PANIC
}

unsafe extern "C" fn count_ascending<T: Element, R: Outcome>(a: &T, b: &T, ctx: *mut u8) -> R {
    *(ctx as *mut usize) += 1;
    R::from_ordering(a.natural_cmp(b))
}

// --- Permutation and order ---

fn default_order<A: SortAlgorithm<T>, T: Sample>(rng: &mut StdRng) {
    for len in LENGTHS {
        let vals = random_vals(rng, len);
        let mut sorted_vals = vals.clone();
        sorted_vals.sort();

        let mut v = samples::<T>(&vals);

        match A::SUPPORT.default_order_refusal() {
            None => {
                caller::sort::<A, T>(&mut v).unwrap();
                assert_eq!(v, samples::<T>(&sorted_vals), "{}_{} len {len}", A::NAME, T::TYPE);
            }
            Some(_) => {
                unsafe { dispatch::sort::<A, T>(v.as_mut_ptr(), v.len()) };
                assert_eq!(v, samples::<T>(&vals), "{}_{} stub changed the buffer", A::NAME, T::TYPE);
            }
        }

        T::release(v);
    }
}

fn custom_order<A: SortAlgorithm<T>, T: Sample>(rng: &mut StdRng) {
    for len in LENGTHS {
        let vals = random_vals(rng, len);
        let mut sorted_vals = vals.clone();
        sorted_vals.sort_by(|a, b| b.cmp(a));

        let mut v = samples::<T>(&vals);
        let res = caller::sort_by::<A, T, _>(&mut v, |a, b| b.natural_cmp(a));

        match A::SUPPORT.custom_order_refusal() {
            None => {
                res.unwrap();
                assert_eq!(v, samples::<T>(&sorted_vals), "{}_{}_by len {len}", A::NAME, T::TYPE);
            }
            Some(reason) => {
                assert!(matches!(res, Err(SortError::Unsupported { reason: r, .. }) if r == reason));
                assert_eq!(v, samples::<T>(&vals), "{}_{}_by stub changed the buffer", A::NAME, T::TYPE);
            }
        }

        T::release(v);
    }
}

fn check_order<A: SortAllElements>() {
    let mut rng = StdRng::seed_from_u64(42);

    default_order::<A, i32>(&mut rng);
    default_order::<A, u64>(&mut rng);
    default_order::<A, FfiString>(&mut rng);
    default_order::<A, F128>(&mut rng);
    default_order::<A, FfiOneKibiByte>(&mut rng);

    custom_order::<A, i32>(&mut rng);
    custom_order::<A, u64>(&mut rng);
    custom_order::<A, FfiString>(&mut rng);
    custom_order::<A, F128>(&mut rng);
    custom_order::<A, FfiOneKibiByte>(&mut rng);
}

#[test]
fn sorted_permutation() {
    init();
    for_each_algorithm!(check_order);
}

// --- Stability ---

fn check_stability<A: SortAllElements>() {
    if !<A as Algorithm>::STABLE {
        return;
    }

    let mut rng = StdRng::seed_from_u64(42);

    // i32 values `key * 10_000 + tag`, compared by key only.
    if <A as SortAlgorithm<i32>>::SUPPORT.custom_order_refusal().is_none() {
        let mut v: Vec<i32> = (0..2_000).map(|tag| rng.gen_range(0..50) * 10_000 + tag).collect();
        caller::sort_by::<A, i32, _>(&mut v, |a, b| (a / 10_000).cmp(&(b / 10_000))).unwrap();

        assert!(
            v.windows(2).all(|w| (w[0] / 10_000, w[0] % 10_000) < (w[1] / 10_000, w[1] % 10_000)),
            "{} is not stable with a custom comparator",
            name::<A>()
        );
    }

    // 1k values share keys, the tag lives outside the key fields.
    if <A as SortAlgorithm<FfiOneKibiByte>>::SUPPORT.default_order_refusal().is_none() {
        let mut v: Vec<FfiOneKibiByte> = (0..2_000)
            .map(|tag| {
                let mut val = FfiOneKibiByte::new(rng.gen_range(0..50));
                val.values[0] = tag;
                val
            })
            .collect();
        caller::sort::<A, FfiOneKibiByte>(&mut v).unwrap();

        assert!(
            v.windows(2).all(|w| (w[0].key(), w[0].values[0]) < (w[1].key(), w[1].values[0])),
            "{} is not stable with the default order",
            name::<A>()
        );
    }
}

#[test]
fn stable_algorithms_keep_equal_elements_in_order() {
    init();
    for_each_algorithm!(check_stability);
}

// --- Panic propagation and stub invariance ---

fn panic_first<A: SortAlgorithm<T>, T: Sample>() {
    let vals: Vec<i32> = (0..100).rev().collect();
    let mut v = samples::<T>(&vals);
    let mut calls = 0_usize;

    let status = unsafe {
        dispatch::sort_by::<A, T>(
            v.as_mut_ptr(),
            v.len(),
            panic_on_call::<T, A::Outcome>,
            &mut calls as *mut usize as *mut u8,
        )
    };

    assert_eq!(status, 1, "{}_{}_by", A::NAME, T::TYPE);

    match A::SUPPORT.custom_order_refusal() {
        None => assert_eq!(calls, 1, "{}_{}_by kept calling after a panic", A::NAME, T::TYPE),
        Some(_) => {
            assert_eq!(calls, 0);
            assert_eq!(v, samples::<T>(&vals));
        }
    }

    // Whatever the algorithm did before the panic, no element was lost or duplicated.
    let mut after: Vec<i32> = vals.clone();
    after.sort();
    caller::sort::<RustStdStable, T>(&mut v).unwrap();
    assert_eq!(v, samples::<T>(&after), "{}_{}_by", A::NAME, T::TYPE);

    T::release(v);
}

fn check_panic<A: SortAllElements>() {
    panic_first::<A, i32>();
    panic_first::<A, u64>();
    panic_first::<A, FfiString>();
    panic_first::<A, F128>();
    panic_first::<A, FfiOneKibiByte>();
}

#[test]
fn comparator_panic_returns_failure() {
    init();
    for_each_algorithm!(check_panic);
}

// --- Idempotence and trivial lengths ---

fn sort_sorted<A: SortAlgorithm<T>, T: Sample>() {
    let vals: Vec<i32> = (0..300).map(|i| i / 3).collect();

    if A::SUPPORT.default_order_refusal().is_none() {
        let mut v = samples::<T>(&vals);
        caller::sort::<A, T>(&mut v).unwrap();
        caller::sort::<A, T>(&mut v).unwrap();
        assert_eq!(v, samples::<T>(&vals), "{}_{}", A::NAME, T::TYPE);
        T::release(v);
    }

    if A::SUPPORT.custom_order_refusal().is_none() {
        let mut v = samples::<T>(&vals);
        caller::sort_by::<A, T, _>(&mut v, T::natural_cmp).unwrap();
        assert_eq!(v, samples::<T>(&vals), "{}_{}_by", A::NAME, T::TYPE);
        T::release(v);
    }
}

fn trivial_lengths<A: SortAlgorithm<T>, T: Sample>() {
    if A::SUPPORT.custom_order_refusal().is_some() {
        return;
    }

    for len in [0, 1] {
        let mut v = samples::<T>(&vec![7; len]);
        let mut calls = 0_usize;

        let status = unsafe {
            dispatch::sort_by::<A, T>(
                v.as_mut_ptr(),
                v.len(),
                count_ascending::<T, A::Outcome>,
                &mut calls as *mut usize as *mut u8,
            )
        };

        assert_eq!(status, 0);
        assert_eq!(calls, 0, "{}_{}_by called the comparator for len {len}", A::NAME, T::TYPE);
        T::release(v);
    }

    let status = unsafe {
        dispatch::sort_by::<A, T>(
            std::ptr::null_mut(),
            0,
            panic_on_call::<T, A::Outcome>,
            std::ptr::null_mut(),
        )
    };
    assert_eq!(status, 0);
}

fn check_idempotent<A: SortAllElements>() {
    sort_sorted::<A, i32>();
    sort_sorted::<A, u64>();
    sort_sorted::<A, FfiString>();
    sort_sorted::<A, F128>();
    sort_sorted::<A, FfiOneKibiByte>();

    trivial_lengths::<A, i32>();
    trivial_lengths::<A, u64>();
    trivial_lengths::<A, FfiString>();
    trivial_lengths::<A, F128>();
    trivial_lengths::<A, FfiOneKibiByte>();
}

#[test]
fn sorting_sorted_input_is_identity() {
    init();
    for_each_algorithm!(check_idempotent);
}

// --- Exported symbols ---

unsafe extern "C" fn descending_i32(a: &i32, b: &i32, _ctx: *mut u8) -> CompResult {
    CompResult::from_ordering(b.cmp(a))
}

unsafe extern "C" fn by_tens_i32(a: &i32, b: &i32, _ctx: *mut u8) -> CompResult {
    CompResult::from_ordering((a / 10).cmp(&(b / 10)))
}

unsafe extern "C" fn count_i32(a: &i32, b: &i32, ctx: *mut u8) -> CompResult {
    *(ctx as *mut usize) += 1;
    CompResult::from_ordering(a.cmp(b))
}

unsafe extern "C" fn panic_i32(_a: &i32, _b: &i32, _ctx: *mut u8) -> CompResult {
    CompResult::PANIC
}

unsafe extern "C" fn never_f128(_a: &F128, _b: &F128, _ctx: *mut u8) -> CompResult {
    unreachable!("stub called the comparator")
}

#[test]
fn scenario_default_order() {
    use sort_ffi::algorithms::rust_std::rust_std_stable_i32;

    let mut v = [5, 3, 1, 4, 2];
    unsafe { rust_std_stable_i32(v.as_mut_ptr(), v.len()) };
    assert_eq!(v, [1, 2, 3, 4, 5]);
}

#[test]
fn scenario_descending_comparator() {
    use sort_ffi::algorithms::heapsort::std_heapsort_unstable_i32_by;
    use sort_ffi::algorithms::rust_std::rust_std_unstable_i32_by;

    let mut v = [5, 3, 1, 4, 2];
    let status = unsafe { rust_std_unstable_i32_by(v.as_mut_ptr(), v.len(), descending_i32, std::ptr::null_mut()) };
    assert_eq!(status, 0);
    assert_eq!(v, [5, 4, 3, 2, 1]);

    let mut v = [5, 3, 1, 4, 2];
    let status =
        unsafe { std_heapsort_unstable_i32_by(v.as_mut_ptr(), v.len(), descending_i32, std::ptr::null_mut()) };
    assert_eq!(status, 0);
    assert_eq!(v, [5, 4, 3, 2, 1]);
}

#[test]
fn scenario_trivial_lengths() {
    use sort_ffi::algorithms::rust_std::rust_std_stable_i32_by;

    let mut calls = 0_usize;
    let ctx = &mut calls as *mut usize as *mut u8;

    let mut empty: [i32; 0] = [];
    let mut single = [42];
    unsafe {
        assert_eq!(rust_std_stable_i32_by(empty.as_mut_ptr(), 0, count_i32, ctx), 0);
        assert_eq!(rust_std_stable_i32_by(single.as_mut_ptr(), 1, count_i32, ctx), 0);
    }

    assert_eq!(single, [42]);
    assert_eq!(calls, 0);
}

#[test]
fn scenario_tagged_duplicates() {
    use sort_ffi::algorithms::rust_std::rust_std_stable_i32_by;

    // (2,a) (2,b) (1,c) (1,d)
    let mut v = [20, 21, 12, 13];
    let status = unsafe { rust_std_stable_i32_by(v.as_mut_ptr(), v.len(), by_tens_i32, std::ptr::null_mut()) };
    assert_eq!(status, 0);
    assert_eq!(v, [12, 13, 20, 21]);
}

#[test]
fn scenario_panic_on_first_call() {
    use sort_ffi::algorithms::rust_std::rust_std_stable_i32_by;

    let mut v = [5, 3, 1, 4, 2];
    let status = unsafe { rust_std_stable_i32_by(v.as_mut_ptr(), v.len(), panic_i32, std::ptr::null_mut()) };
    assert_eq!(status, 1);

    v.sort();
    assert_eq!(v, [1, 2, 3, 4, 5]);
}

#[test]
fn scenario_not_supported() {
    use sort_ffi::algorithms::radix_lsb::radix_lsb_stable_f128_by;

    let mut v = [F128::new(3), F128::new(1), F128::new(2)];
    let before = v;
    let status = unsafe { radix_lsb_stable_f128_by(v.as_mut_ptr(), v.len(), never_f128, std::ptr::null_mut()) };
    assert_eq!(status, 1);
    assert_eq!(v, before);

    #[cfg(feature = "qsort")]
    {
        use sort_ffi::algorithms::qsort::{qsort_unstable_f128, qsort_unstable_f128_by};

        unsafe {
            qsort_unstable_f128(v.as_mut_ptr(), v.len());
            assert_eq!(qsort_unstable_f128_by(v.as_mut_ptr(), v.len(), never_f128, std::ptr::null_mut()), 1);
        }
        assert_eq!(v, before);
    }
}

#[test]
fn unknown_ordering_fails_strict_algorithms() {
    unsafe extern "C" fn two(_a: &u64, _b: &u64, _ctx: *mut u8) -> CompResult {
        CompResult {
            cmp_result: 2,
            is_panic: false,
        }
    }

    let mut v = [3_u64, 1, 2];
    let status = unsafe {
        dispatch::sort_by::<StdHeapsortUnstable, u64>(v.as_mut_ptr(), v.len(), two, std::ptr::null_mut())
    };
    assert_eq!(status, 1);

    v.sort();
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn failure_reasons_reach_rust_callers() {
    let mut v = vec![2_i32, 1];

    let err = caller::sort_by::<RadixLsbStable, i32, _>(&mut v, |_, _| Ordering::Equal).unwrap_err();
    assert!(err.to_string().contains("radix_lsb_stable does not support i32"), "{err}");

    let err = caller::sort_by::<RustStdStable, i32, _>(&mut v, |_, _| panic!("caller gave up")).unwrap_err();
    assert!(matches!(err, SortError::ComparatorPanic));
}
