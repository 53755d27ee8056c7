use std::fmt;

/// A contiguous byte interval `[offset, offset + length)` within a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemRange {
    pub offset: u64,
    pub length: u64,
}

impl MemRange {
    pub const SIZE: usize = 8 + 8;

    pub const fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// First byte past the range.
    pub const fn end(&self) -> u64 {
        self.offset + self.length
    }

    /// Shortens the range so it does not reach past `limit`.
    /// Returns `None` when nothing of it is left.
    pub fn clip(&self, limit: u64) -> Option<MemRange> {
        if self.offset >= limit {
            return None;
        }
        Some(MemRange::new(self.offset, self.length.min(limit - self.offset)))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.offset.to_le_bytes());
        buf.extend_from_slice(&self.length.to_le_bytes());
    }
}

impl fmt::Display for MemRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}
