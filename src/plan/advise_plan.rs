use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher;
use log::{debug, info, warn};

use crate::general::config::AdviseConfig;
use crate::general::error::{PageWarmError, Result};
use crate::general::page_size::page_count;
use crate::helpers::helper::current_unix_time;
use crate::helpers::system::{file_exists, system_memory_available};
use crate::plan::advise_kind::AdviseKind;
use crate::plan::file_entry::FileEntry;
use crate::plan::header::PlanHeader;
use crate::plan::plan_flags::PlanFlags;

/// A list of files and the byte ranges to hand to the cache-advisory call
/// for each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisePlan {
    config: AdviseConfig,
    kind: AdviseKind,
    flags: PlanFlags,
    created_at: u64,
    entries: Vec<FileEntry>,
}

impl AdvisePlan {
    pub fn new(config: AdviseConfig, kind: AdviseKind) -> Self {
        Self {
            config,
            kind,
            flags: PlanFlags::default(),
            created_at: current_unix_time(),
            entries: Vec::new(),
        }
    }

    pub fn config(&self) -> &AdviseConfig {
        &self.config
    }

    pub fn kind(&self) -> AdviseKind {
        self.kind
    }

    pub fn flags(&self) -> PlanFlags {
        self.flags
    }

    /// Flags written with the plan; they decide which checksums a reader
    /// validates.
    pub fn set_flags(&mut self, flags: PlanFlags) {
        self.flags = flags;
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(FileEntry::total_bytes).sum()
    }

    /// Adds a file from its per-page presence vector.
    ///
    /// Pages past the end of the file are ignored. The vector is compacted
    /// with the plan's config and the last range is clipped to `file_size`,
    /// since the final page of a file is usually partial. Files without a
    /// single present page are skipped.
    pub fn add_presence(
        &mut self,
        path: impl Into<PathBuf>,
        file_size: u64,
        presence: &[bool],
    ) -> Option<&FileEntry> {
        let path = path.into();
        let file_pages = page_count(file_size, self.config.page_size());
        let in_file = usize::try_from(file_pages).map_or(presence, |pages| {
            &presence[..pages.min(presence.len())]
        });
        let ranges: Vec<_> = self
            .config
            .ranges(in_file)
            .filter_map(|range| range.clip(file_size))
            .collect();

        if ranges.is_empty() {
            debug!("skipping {}: no present pages", path.display());
            return None;
        }

        self.push(FileEntry::new(path, file_size, ranges))
    }

    /// Adds a whole file, split into advisory-sized windows.
    pub fn add_full_file(&mut self, path: impl Into<PathBuf>, file_size: u64) -> Option<&FileEntry> {
        let path = path.into();
        if file_size == 0 {
            debug!("skipping {}: empty file", path.display());
            return None;
        }

        let ranges = self.config.full_ranges(file_size);
        self.push(FileEntry::new(path, file_size, ranges))
    }

    fn push(&mut self, entry: FileEntry) -> Option<&FileEntry> {
        debug!(
            "planned {} ranges ({} bytes) for {}",
            entry.ranges.len(),
            entry.total_bytes(),
            entry.path.display()
        );
        self.entries.push(entry);
        self.entries.last()
    }

    /// Keeps leading entries while their running total fits in `budget`
    /// bytes and drops everything from the first entry that does not.
    ///
    /// Returns the number of advised bytes dropped.
    pub fn fit_to_budget(&mut self, budget: u64) -> u64 {
        let mut used = 0u64;
        let keep = self
            .entries
            .iter()
            .take_while(|entry| {
                used += entry.total_bytes();
                used <= budget
            })
            .count();

        let dropped: u64 = self.entries[keep..].iter().map(FileEntry::total_bytes).sum();
        if keep < self.entries.len() {
            info!(
                "plan exceeds budget of {} bytes, dropping {} of {} files ({} bytes)",
                budget,
                self.entries.len() - keep,
                self.entries.len(),
                dropped
            );
            self.entries.truncate(keep);
        }
        dropped
    }

    /// [`AdvisePlan::fit_to_budget`] bounded by the memory the system
    /// currently reports as available.
    pub fn fit_to_available_memory(&mut self) -> Result<u64> {
        let available = system_memory_available()?;
        Ok(self.fit_to_budget(available))
    }

    /// Drops entries whose file is gone or is no longer a regular file.
    /// Returns how many were removed.
    pub fn retain_existing(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            let exists = file_exists(&entry.path);
            if !exists {
                warn!("dropping {}: file no longer exists", entry.path.display());
            }
            exists
        });
        before - self.entries.len()
    }

    /// Serializes the plan: a [`PlanHeader`] followed by every entry.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut payload = Vec::new();
        for entry in &self.entries {
            entry.write_to(&mut payload)?;
        }

        let page_size = u32::try_from(self.config.page_size())
            .map_err(|_| PageWarmError::InvalidConfig("page size does not fit in 32 bits".to_string()))?;
        let entry_count = u32::try_from(self.entries.len())
            .map_err(|_| PageWarmError::CorruptData("too many entries in plan"))?;

        let mut header = PlanHeader::new(
            self.kind,
            self.flags,
            page_size,
            self.config.max_advise_size(),
        );
        header.created_at = self.created_at;
        header.entry_count = entry_count;
        header.payload_checksum = payload_checksum(&payload);

        header.write_to(writer)?;
        writer.write_all(&payload)?;
        Ok(())
    }

    /// Reads a plan written by [`AdvisePlan::write_to`], consuming the
    /// reader to its end.
    ///
    /// # Errors
    /// Header errors as described on [`PlanHeader::read_from`], a
    /// [`PageWarmError::ChecksumMismatch`] on a damaged payload when
    /// `PAYLOAD_CHECKSUM` is set, [`PageWarmError::CorruptData`] for
    /// malformed entries or trailing bytes, and
    /// [`PageWarmError::InvalidConfig`] if the stored page size and cap are
    /// inconsistent.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let header = PlanHeader::read_from(reader)?;
        let config = AdviseConfig::new(header.page_size as u64, header.max_advise_size)?;

        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;

        if header.flags.contains(PlanFlags::PAYLOAD_CHECKSUM) {
            let computed = payload_checksum(&payload);
            if computed != header.payload_checksum {
                return Err(PageWarmError::ChecksumMismatch {
                    what: "plan payload",
                    stored: header.payload_checksum,
                    computed,
                });
            }
        }

        let mut cursor = payload.as_slice();
        let mut entries = Vec::with_capacity((header.entry_count as usize).min(cursor.len()));
        for _ in 0..header.entry_count {
            entries.push(FileEntry::read_from(&mut cursor)?);
        }
        if !cursor.is_empty() {
            return Err(PageWarmError::CorruptData("trailing bytes after plan entries"));
        }

        Ok(Self {
            config,
            kind: header.kind,
            flags: header.flags,
            created_at: header.created_at,
            entries,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!(
            "saved plan with {} files ({} bytes) to {}",
            self.entries.len(),
            self.total_bytes(),
            path.display()
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let plan = Self::read_from(&mut reader)?;

        info!(
            "loaded plan with {} files ({} bytes) from {}",
            plan.entries.len(),
            plan.total_bytes(),
            path.display()
        );
        Ok(plan)
    }
}

fn payload_checksum(payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(payload);
    hasher.finalize()
}
