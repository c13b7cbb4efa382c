// LSB radix sort implementation, based on
// https://crates.io/crates/radsort
// http://codercorner.com/RadixSortRevisited.htm
// http://stereopsis.com/radix.html
// See https://travisdowns.github.io/blog/2019/05/22/sorting.html

use crate::total_order::TotalOrder;

// 8 -> 8 passes per u64
// 11 -> 6 passes per u64, 16k memory, easily fits into L1 cache
// 13 -> 5 passes per u64, 64k memory, and probably no longer fits into L1 cache
// 16 -> 4 passes per u64, 0.5m memory, should be even worse
pub(crate) const RADIX_BITS: usize = 11;
pub(crate) const RADIX_HIST_LEN: usize = 1 << RADIX_BITS;
pub(crate) const HIST_PER_U64: usize = 64_usize.div_ceil(RADIX_BITS);

/// Fill the histogram for a digit indicated by the given `shift` amount.
///
/// Returns true when all values belong to the same bucket.
#[inline(never)]
fn fill_histogram<T: TotalOrder>(values: &[T], shift: usize, histogram: &mut [u32; RADIX_HIST_LEN]) -> bool {
    histogram.fill(0);

    let mut last_bucket = 0;
    values.iter().for_each(|v| {
        let bucket = (v.to_total_order() >> shift) & (RADIX_HIST_LEN as u64 - 1);
        histogram[bucket as usize] += 1;
        last_bucket = bucket;
    });

    // if every item is in the same bucket then no sorting is necessary
    histogram[last_bucket as usize] as usize == values.len()
}

/// Calculate the prefix sum of the histogram, resulting in the starting indices to the output for each bucket.
#[inline(never)]
pub(crate) fn cumulative_histogram<const N: usize>(histogram: &mut [u32; N]) {
    let mut sum = 0_u32;
    histogram.iter_mut().for_each(|count| {
        let tmp = *count;
        *count = sum;
        sum += tmp;
    });
}

#[inline(never)]
fn reorder_values<T: TotalOrder + Copy>(
    values: &[T],
    output: &mut [T],
    histogram: &mut [u32; RADIX_HIST_LEN],
    shift: usize,
) {
    debug_assert_eq!(values.len(), output.len());

    values.iter().for_each(|value| {
        let bucket = (value.to_total_order() >> shift) & (RADIX_HIST_LEN as u64 - 1);
        let output_idx = histogram[bucket as usize] as usize;
        output[output_idx] = *value;
        histogram[bucket as usize] += 1;
    });
}

/// Stable LSB radix sort of `values` in place.
///
/// Allocates one scratch buffer of `values.len()` elements and ping-pongs between the two,
/// skipping digits on which every value falls into the same bucket.
#[inline(never)]
pub fn sort_in_place<T: TotalOrder + Default + Copy>(values: &mut [T]) {
    let len = values.len();
    if len < 2 {
        return;
    }

    // histogram offsets are u32
    assert!(len <= u32::MAX as usize, "radix sort input too long: {len}");

    let mut scratch: Vec<T> = vec![T::default(); len];
    let mut histogram = [0_u32; RADIX_HIST_LEN];
    let mut in_scratch = false;

    for i in 0..HIST_PER_U64 {
        let shift = i * RADIX_BITS;

        let all_values_equal = if in_scratch {
            fill_histogram(&scratch, shift, &mut histogram)
        } else {
            fill_histogram(values, shift, &mut histogram)
        };

        if !all_values_equal {
            cumulative_histogram(&mut histogram);

            if in_scratch {
                reorder_values(&scratch, values, &mut histogram, shift);
            } else {
                reorder_values(values, &mut scratch, &mut histogram, shift);
            }

            in_scratch = !in_scratch;
        }
    }

    if in_scratch {
        values.copy_from_slice(&scratch);
    }
}
