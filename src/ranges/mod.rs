pub mod compaction;
pub mod full_ranges;
pub mod mem_range;
