use crate::general::error::{PageWarmError, Result};
use crate::general::page_size::{round_page_size, system_page_size};
use crate::ranges::compaction::{Ranges, pages_per_range, to_ranges};
use crate::ranges::full_ranges::full_ranges;
use crate::ranges::mem_range::MemRange;

pub const KB: u64 = 1024;
pub const MB: u64 = 1024 * KB;
pub const GB: u64 = 1024 * MB;

/// Upper bound on a single advisory range unless configured otherwise.
pub const DEFAULT_MAX_ADVISE_SIZE: u64 = 16 * MB;

/// Page granularity and advisory cap shared by every range computation.
///
/// Construct it through [`AdviseConfig::new`] so the cap is never smaller
/// than one page; the compaction functions rely on that to keep every
/// range within `max_advise_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviseConfig {
    page_size: u64,
    max_advise_size: u64,
}

impl AdviseConfig {
    pub fn new(page_size: u64, max_advise_size: u64) -> Result<Self> {
        if page_size == 0 {
            return Err(PageWarmError::InvalidConfig(
                "page size must be positive".to_string(),
            ));
        }
        if max_advise_size < page_size {
            return Err(PageWarmError::InvalidConfig(format!(
                "max advise size {max_advise_size} is smaller than page size {page_size}"
            )));
        }
        Ok(Self {
            page_size,
            max_advise_size,
        })
    }

    /// System page size with a custom advisory cap.
    pub fn with_max_advise_size(max_advise_size: u64) -> Result<Self> {
        Self::new(system_page_size(), max_advise_size)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn max_advise_size(&self) -> u64 {
        self.max_advise_size
    }

    pub fn pages_per_range(&self) -> usize {
        pages_per_range(self.page_size, self.max_advise_size)
    }

    pub fn round_page_size(&self, bytes: u64) -> u64 {
        round_page_size(bytes, self.page_size)
    }

    pub fn full_ranges(&self, file_size: u64) -> Vec<MemRange> {
        full_ranges(file_size, self.max_advise_size)
    }

    pub fn to_ranges(&self, presence: &[bool]) -> Vec<MemRange> {
        to_ranges(presence, self.page_size, self.max_advise_size)
    }

    pub fn ranges<'a>(&self, presence: &'a [bool]) -> Ranges<'a> {
        Ranges::new(presence, self.page_size, self.max_advise_size)
    }
}

impl Default for AdviseConfig {
    fn default() -> Self {
        let page_size = system_page_size();
        Self {
            page_size,
            max_advise_size: DEFAULT_MAX_ADVISE_SIZE.max(page_size),
        }
    }
}
