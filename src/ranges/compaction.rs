use std::iter::FusedIterator;

use log::trace;

use crate::ranges::mem_range::MemRange;

/// Number of whole pages that fit in one advisory range.
///
/// # Panics
/// Panics if `page_size` is zero or `max_advise_size` is smaller than one
/// page.
pub fn pages_per_range(page_size: u64, max_advise_size: u64) -> usize {
    assert!(page_size > 0, "page size must be positive");
    assert!(
        max_advise_size >= page_size,
        "max advise size {max_advise_size} is smaller than page size {page_size}"
    );
    usize::try_from(max_advise_size / page_size).unwrap_or(usize::MAX)
}

/// Extracts the first run of present pages from `presence`.
///
/// # Behavior
/// - Skips leading `false` pages; the first `true` page starts the range.
/// - The range grows one page at a time while pages stay `true`.
/// - **Gap stop**: the first `false` page ends the range. The remainder
///   starts at that page.
/// - **Cap stop**: once the range holds `max_advise_size` bytes it ends,
///   even if the next page is `true`. The remainder starts right after the
///   cap boundary. The cap wins when it lands just before a gap.
/// - **Exhaustion**: a run reaching the end of the slice ends there and the
///   remainder is empty.
///
/// `base` is the absolute byte offset of `presence[0]`; the returned offset
/// is `base + index * page_size`. With `base = 0` offsets are relative to the
/// slice.
///
/// # Returns
/// `None` if `presence` contains no `true` page, otherwise the range and the
/// part of `presence` that has not been examined yet.
///
/// # Panics
/// Panics if `page_size` is zero or `max_advise_size < page_size`.
pub fn next_range(
    presence: &[bool],
    base: u64,
    page_size: u64,
    max_advise_size: u64,
) -> Option<(MemRange, &[bool])> {
    let cap = pages_per_range(page_size, max_advise_size);
    let start = presence.iter().position(|&present| present)?;

    let run = presence[start..]
        .iter()
        .take(cap)
        .take_while(|&&present| present)
        .count();
    let end = start + run;

    let range = MemRange::new(
        base + start as u64 * page_size,
        run as u64 * page_size,
    );
    Some((range, &presence[end..]))
}

/// Compacts a presence vector into ordered byte ranges of at most
/// `max_advise_size` bytes each, covering exactly the `true` pages.
///
/// # Panics
/// Panics if `page_size` is zero or `max_advise_size < page_size`.
pub fn to_ranges(presence: &[bool], page_size: u64, max_advise_size: u64) -> Vec<MemRange> {
    let ranges: Vec<MemRange> = Ranges::new(presence, page_size, max_advise_size).collect();
    trace!(
        "compacted {} pages into {} ranges (page size {}, cap {})",
        presence.len(),
        ranges.len(),
        page_size,
        max_advise_size
    );
    ranges
}

/// Lazy form of [`to_ranges`].
///
/// Keeps the unexamined suffix and its absolute byte position, feeding both
/// into [`next_range`] on every step.
#[derive(Debug, Clone)]
pub struct Ranges<'a> {
    rest: &'a [bool],
    base: u64,
    page_size: u64,
    max_advise_size: u64,
}

impl<'a> Ranges<'a> {
    pub fn new(presence: &'a [bool], page_size: u64, max_advise_size: u64) -> Self {
        Self {
            rest: presence,
            base: 0,
            page_size,
            max_advise_size,
        }
    }
}

impl Iterator for Ranges<'_> {
    type Item = MemRange;

    fn next(&mut self) -> Option<MemRange> {
        if self.rest.is_empty() {
            return None;
        }

        match next_range(self.rest, self.base, self.page_size, self.max_advise_size) {
            Some((range, rest)) => {
                self.base = range.end();
                self.rest = rest;
                Some(range)
            }
            None => {
                self.rest = &[];
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.rest.len()))
    }
}

impl FusedIterator for Ranges<'_> {}
