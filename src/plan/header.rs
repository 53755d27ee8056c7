use std::io::{Read, Write};

use crc32fast::Hasher;

use crate::general::error::{PageWarmError, Result};
use crate::helpers::helper::{read_u8, read_u16, read_u32, read_u64};
use crate::plan::advise_kind::AdviseKind;
use crate::plan::plan_flags::PlanFlags;

pub const PLAN_MAGIC: [u8; 16] = *b"PAGEWARM_PLANV1\0";
pub const PLAN_HEADER_SIZE: u16 = 64;
pub const PLAN_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanHeader {
    pub magic: [u8; 16],         // 16 BYTES FOR MAGIC
    pub header_size: u16,        // 2 BYTES FOR HEADER SIZE
    pub version: u32,            // 4 BYTES FOR PLAN VERSION
    pub flags: PlanFlags,        // 2 BYTES FOR FLAGS
    pub kind: AdviseKind,        // 1 BYTE FOR ADVISE KIND
    pub page_size: u32,          // 4 BYTES FOR PAGE SIZE
    pub max_advise_size: u64,    // 8 BYTES FOR ADVISE CAP
    pub created_at: u64,         // 8 BYTES FOR CREATED AT
    pub entry_count: u32,        // 4 BYTES FOR ENTRY COUNT
    pub payload_checksum: u32,   // 4 BYTES FOR PAYLOAD CHECKSUM
    pub checksum: u32,           // 4 BYTES FOR HEADER CHECKSUM
    pub reserved: [u8; 7],       // 7 BYTES RESERVED
}

impl PlanHeader {
    pub const SIZE: usize = 64;

    pub fn new(kind: AdviseKind, flags: PlanFlags, page_size: u32, max_advise_size: u64) -> Self {
        Self {
            magic: PLAN_MAGIC,
            header_size: PLAN_HEADER_SIZE,
            version: PLAN_VERSION,
            flags,
            kind,
            page_size,
            max_advise_size,
            created_at: 0,
            entry_count: 0,
            payload_checksum: 0,
            checksum: 0,
            reserved: [0; 7],
        }
    }

    /// Writes the header in its fixed little-endian layout.
    ///
    /// The header checksum is derived from the other fields at write time;
    /// `self.checksum` is ignored.
    ///
    /// # Disk layout
    /// ```text
    /// [ magic (16 bytes)            ]
    /// [ header_size (u16)           ]
    /// [ version (u32)               ]
    /// [ flags (u16)                 ]
    /// [ kind (u8)                   ]
    /// [ page_size (u32)             ]
    /// [ max_advise_size (u64)       ]
    /// [ created_at (u64)            ]
    /// [ entry_count (u32)           ]
    /// [ payload_checksum (u32)      ]
    /// [ checksum (u32)              ]
    /// [ reserved (7 bytes)          ]
    /// ```
    ///
    /// # Errors
    /// Returns an error if writing to the underlying writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let checksum = self.compute_checksum();

        writer.write_all(&self.magic)?;
        writer.write_all(&self.header_size.to_le_bytes())?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.bits().to_le_bytes())?;
        writer.write_all(&[self.kind as u8])?;
        writer.write_all(&self.page_size.to_le_bytes())?;
        writer.write_all(&self.max_advise_size.to_le_bytes())?;
        writer.write_all(&self.created_at.to_le_bytes())?;
        writer.write_all(&self.entry_count.to_le_bytes())?;
        writer.write_all(&self.payload_checksum.to_le_bytes())?;
        writer.write_all(&checksum.to_le_bytes())?;
        writer.write_all(&self.reserved)?;

        Ok(())
    }

    fn write_without_checksum(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.magic);
        buf.extend_from_slice(&self.header_size.to_le_bytes());
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.flags.bits().to_le_bytes());
        buf.push(self.kind as u8);
        buf.extend_from_slice(&self.page_size.to_le_bytes());
        buf.extend_from_slice(&self.max_advise_size.to_le_bytes());
        buf.extend_from_slice(&self.created_at.to_le_bytes());
        buf.extend_from_slice(&self.entry_count.to_le_bytes());
        buf.extend_from_slice(&self.payload_checksum.to_le_bytes());
        buf.extend_from_slice(&self.reserved);
    }

    fn compute_checksum(&self) -> u32 {
        let mut buffer = Vec::with_capacity(Self::SIZE);
        self.write_without_checksum(&mut buffer);

        let mut hasher = Hasher::new();
        hasher.update(&buffer);
        hasher.finalize()
    }

    /// Reads and validates a plan header.
    ///
    /// # Errors
    /// - [`PageWarmError::InvalidMagic`] if the file is not a plan file.
    /// - [`PageWarmError::CorruptData`] on an unsupported header size.
    /// - [`PageWarmError::InvalidEnumValue`] on an unknown version or kind.
    /// - [`PageWarmError::ChecksumMismatch`] if `CHECKSUM_ENABLED` is set and
    ///   the stored checksum does not match.
    /// - [`PageWarmError::Io`] if the reader runs dry.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 16];
        reader.read_exact(&mut magic)?;
        if magic != PLAN_MAGIC {
            return Err(PageWarmError::InvalidMagic(magic));
        }

        let header_size = read_u16(reader)?;
        if header_size != PLAN_HEADER_SIZE {
            return Err(PageWarmError::CorruptData("unsupported plan header size"));
        }

        let version = read_u32(reader)?;
        if version != PLAN_VERSION {
            return Err(PageWarmError::InvalidEnumValue {
                what: "plan version",
                value: version as u64,
            });
        }

        let flags = PlanFlags::from_bits_truncate(read_u16(reader)?);
        let kind = AdviseKind::from_u8(read_u8(reader)?)?;
        let page_size = read_u32(reader)?;
        let max_advise_size = read_u64(reader)?;
        let created_at = read_u64(reader)?;
        let entry_count = read_u32(reader)?;
        let payload_checksum = read_u32(reader)?;
        let checksum = read_u32(reader)?;
        let mut reserved = [0u8; 7];
        reader.read_exact(&mut reserved)?;

        let header = Self {
            magic,
            header_size,
            version,
            flags,
            kind,
            page_size,
            max_advise_size,
            created_at,
            entry_count,
            payload_checksum,
            checksum,
            reserved,
        };

        if header.flags.contains(PlanFlags::CHECKSUM_ENABLED) {
            let computed = header.compute_checksum();
            if computed != header.checksum {
                return Err(PageWarmError::ChecksumMismatch {
                    what: "plan header",
                    stored: header.checksum,
                    computed,
                });
            }
        }

        Ok(header)
    }
}
