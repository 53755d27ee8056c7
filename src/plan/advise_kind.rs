use crate::general::error::{PageWarmError, Result};

/// Which cache hint a plan's ranges are meant for.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AdviseKind {
    /// Read the ranges ahead into the page cache.
    #[default]
    WillNeed = 1,
    /// Drop the ranges from the page cache.
    DontNeed = 2,
}

impl AdviseKind {
    pub fn from_u8(v: u8) -> Result<Self> {
        match v {
            1 => Ok(AdviseKind::WillNeed),
            2 => Ok(AdviseKind::DontNeed),
            _ => Err(PageWarmError::InvalidEnumValue {
                what: "advise kind",
                value: v as u64,
            }),
        }
    }
}
