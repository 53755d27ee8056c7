/// Returns the page size of the running system in bytes.
pub fn system_page_size() -> u64 {
    page_size::get() as u64
}

/// Rounds `bytes` up to the nearest whole multiple of `page_size`.
///
/// # Panics
/// Panics if `page_size` is zero or the rounded value does not fit in a
/// `u64`.
pub fn round_page_size(bytes: u64, page_size: u64) -> u64 {
    assert!(page_size > 0, "page size must be positive");
    match bytes.div_ceil(page_size).checked_mul(page_size) {
        Some(rounded) => rounded,
        None => panic!("rounding {bytes} up to page size {page_size} overflows u64"),
    }
}

/// Number of pages needed to hold `bytes`.
pub fn page_count(bytes: u64, page_size: u64) -> u64 {
    assert!(page_size > 0, "page size must be positive");
    bytes.div_ceil(page_size)
}
