use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::general::error::{PageWarmError, Result};
use crate::helpers::helper::{read_u16, read_u32, read_u64};
use crate::ranges::mem_range::MemRange;

/// One file of a plan together with the byte ranges to advise on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub file_size: u64,
    pub ranges: Vec<MemRange>,
}

impl FileEntry {
    pub fn new(path: PathBuf, file_size: u64, ranges: Vec<MemRange>) -> Self {
        Self {
            path,
            file_size,
            ranges,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sum of all range lengths.
    pub fn total_bytes(&self) -> u64 {
        self.ranges.iter().map(|r| r.length).sum()
    }

    /// Appends the record to `buf`.
    ///
    /// ```text
    /// [ path_len (u16) | path (UTF-8) | file_size (u64) | range_count (u32) | (offset u64, length u64)* ]
    /// ```
    pub fn write_to(&self, buf: &mut Vec<u8>) -> Result<()> {
        let path = self
            .path
            .to_str()
            .ok_or(PageWarmError::InvalidUtf8("file entry path"))?;
        let path_len = u16::try_from(path.len())
            .map_err(|_| PageWarmError::CorruptData("file entry path longer than 65535 bytes"))?;
        let range_count = u32::try_from(self.ranges.len())
            .map_err(|_| PageWarmError::CorruptData("too many ranges in file entry"))?;

        buf.reserve(2 + path.len() + 8 + 4 + self.ranges.len() * MemRange::SIZE);
        buf.extend_from_slice(&path_len.to_le_bytes());
        buf.extend_from_slice(path.as_bytes());
        buf.extend_from_slice(&self.file_size.to_le_bytes());
        buf.extend_from_slice(&range_count.to_le_bytes());
        for range in &self.ranges {
            range.write_to(buf);
        }

        Ok(())
    }

    /// Decodes one record from the front of `reader`, advancing it.
    ///
    /// # Errors
    /// [`PageWarmError::CorruptData`] when the record is truncated or its
    /// ranges are empty, unordered, overlapping or reach past `file_size`;
    /// [`PageWarmError::InvalidUtf8`] for a non UTF-8 path.
    pub fn read_from(reader: &mut &[u8]) -> Result<Self> {
        Self::decode(reader).map_err(|e| match e {
            PageWarmError::Io(io) if io.kind() == io::ErrorKind::UnexpectedEof => {
                PageWarmError::CorruptData("truncated file entry")
            }
            other => other,
        })
    }

    fn decode(reader: &mut &[u8]) -> Result<Self> {
        let path_len = read_u16(reader)? as usize;
        let mut path = vec![0u8; path_len];
        reader.read_exact(&mut path)?;
        let path =
            String::from_utf8(path).map_err(|_| PageWarmError::InvalidUtf8("file entry path"))?;

        let file_size = read_u64(reader)?;
        let range_count = read_u32(reader)? as usize;
        if range_count.saturating_mul(MemRange::SIZE) > reader.len() {
            return Err(PageWarmError::CorruptData("truncated file entry"));
        }

        let mut ranges = Vec::with_capacity(range_count);
        let mut prev_end = 0;
        for _ in 0..range_count {
            let offset = read_u64(reader)?;
            let length = read_u64(reader)?;
            if length == 0 {
                return Err(PageWarmError::CorruptData("empty range in file entry"));
            }
            if offset < prev_end {
                return Err(PageWarmError::CorruptData("unordered or overlapping ranges"));
            }
            let end = offset
                .checked_add(length)
                .filter(|&end| end <= file_size)
                .ok_or(PageWarmError::CorruptData("range past end of file"))?;

            ranges.push(MemRange::new(offset, length));
            prev_end = end;
        }

        Ok(Self::new(PathBuf::from(path), file_size, ranges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(entry: &FileEntry) -> Vec<u8> {
        let mut buf = Vec::new();
        entry.write_to(&mut buf).unwrap();
        buf
    }

    fn raw_entry(file_size: u64, ranges: &[(u64, u64)]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.push(b'x');
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(&(ranges.len() as u32).to_le_bytes());
        for &(offset, length) in ranges {
            buf.extend_from_slice(&offset.to_le_bytes());
            buf.extend_from_slice(&length.to_le_bytes());
        }
        buf
    }

    #[test]
    fn decodes_what_it_encodes_and_advances() {
        let entry = FileEntry::new(
            PathBuf::from("/usr/lib/libc.so.6"),
            20_000,
            vec![MemRange::new(0, 8192), MemRange::new(16_384, 3616)],
        );
        let mut buf = encode(&entry);
        buf.extend_from_slice(b"next");

        let mut reader = buf.as_slice();
        let decoded = FileEntry::read_from(&mut reader).unwrap();
        assert_eq!(decoded, entry);
        assert_eq!(decoded.total_bytes(), 8192 + 3616);
        assert_eq!(reader, b"next");
    }

    #[test]
    fn rejects_overlapping_ranges() {
        let buf = raw_entry(1 << 20, &[(0, 8192), (4096, 4096)]);
        let err = FileEntry::read_from(&mut buf.as_slice()).unwrap_err();
        assert_eq!(err.to_string(), "corrupt/invalid data: unordered or overlapping ranges");
    }

    #[test]
    fn rejects_range_past_file_size() {
        let buf = raw_entry(4096, &[(0, 8192)]);
        let err = FileEntry::read_from(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, PageWarmError::CorruptData("range past end of file")));
    }

    #[test]
    fn rejects_empty_range() {
        let buf = raw_entry(4096, &[(0, 0)]);
        let err = FileEntry::read_from(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, PageWarmError::CorruptData("empty range in file entry")));
    }

    #[test]
    fn truncated_record_is_corrupt_data() {
        let mut buf = raw_entry(1 << 20, &[(0, 4096), (8192, 4096)]);
        buf.truncate(buf.len() - 3);
        let err = FileEntry::read_from(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, PageWarmError::CorruptData("truncated file entry")));

        let short = [5u8, 0, b'a'];
        let err = FileEntry::read_from(&mut &short[..]).unwrap_err();
        assert!(matches!(err, PageWarmError::CorruptData("truncated file entry")));
    }

    #[test]
    fn rejects_invalid_utf8_path() {
        let mut buf = raw_entry(4096, &[]);
        buf[2] = 0xff;
        let err = FileEntry::read_from(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, PageWarmError::InvalidUtf8(_)));
    }
}
