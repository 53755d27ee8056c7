pub mod advise_kind;
pub mod advise_plan;
pub mod file_entry;
pub mod header;
pub mod plan_flags;
