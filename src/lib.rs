//! Page-cache range planning.
//!
//! Turns per-page cache residency into bounded `(offset, length)` ranges for
//! bulk cache-advisory calls, and stores those ranges as replayable plans.

pub mod general;
pub mod helpers;
pub mod plan;
pub mod ranges;

pub use general::config::{AdviseConfig, DEFAULT_MAX_ADVISE_SIZE, GB, KB, MB};
pub use general::error::{PageWarmError, Result};
pub use general::page_size::{round_page_size, system_page_size};
pub use plan::advise_kind::AdviseKind;
pub use plan::advise_plan::AdvisePlan;
pub use plan::file_entry::FileEntry;
pub use plan::plan_flags::PlanFlags;
pub use ranges::compaction::{Ranges, next_range, to_ranges};
pub use ranges::full_ranges::full_ranges;
pub use ranges::mem_range::MemRange;
