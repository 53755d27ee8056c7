use crate::ranges::mem_range::MemRange;

/// Splits `[0, file_size)` into consecutive windows of `max_advise_size`
/// bytes. The last window holds whatever is left over.
///
/// Used when a whole file must be advised regardless of which of its
/// pages are cached, e.g. a forced full-file read-ahead.
///
/// # Panics
/// Panics if `max_advise_size` is zero.
pub fn full_ranges(file_size: u64, max_advise_size: u64) -> Vec<MemRange> {
    assert!(max_advise_size > 0, "max advise size must be positive");

    let count = file_size.div_ceil(max_advise_size);
    (0..count)
        .map(|i| {
            let offset = i * max_advise_size;
            MemRange::new(offset, max_advise_size.min(file_size - offset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_file_has_no_ranges() {
        assert!(full_ranges(0, 4096).is_empty());
    }

    #[test]
    fn last_range_holds_remainder() {
        let ranges = full_ranges(10_000, 4096);
        assert_eq!(
            ranges,
            vec![
                MemRange::new(0, 4096),
                MemRange::new(4096, 4096),
                MemRange::new(8192, 1808),
            ]
        );
    }

    #[test]
    fn exact_multiple_ends_with_full_range() {
        let ranges = full_ranges(3 * 4096, 4096);
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(|r| r.length == 4096));
    }

    #[test]
    fn file_smaller_than_cap() {
        assert_eq!(full_ranges(17, 4096), vec![MemRange::new(0, 17)]);
    }

    proptest! {
        #[test]
        fn partition_is_exact(size in 0u64..1 << 28, cap in 4096u64..1 << 22) {
            let ranges = full_ranges(size, cap);
            let n = size.div_ceil(cap);
            prop_assert_eq!(ranges.len() as u64, n);

            let mut expected_offset = 0;
            for (i, range) in ranges.iter().enumerate() {
                prop_assert_eq!(range.offset, expected_offset);
                if (i as u64) + 1 < n {
                    prop_assert_eq!(range.length, cap);
                } else {
                    prop_assert_eq!(range.length, size - (n - 1) * cap);
                }
                expected_offset = range.end();
            }
            prop_assert_eq!(expected_offset, size);
        }
    }
}
