use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlanFlags: u16 {
        /// Header checksum is enabled and must be validated
        const CHECKSUM_ENABLED = 0b0000_0001;

        /// Entry payload checksum is enabled and must be validated
        const PAYLOAD_CHECKSUM = 0b0000_0010;
    }
}

impl Default for PlanFlags {
    fn default() -> Self {
        PlanFlags::CHECKSUM_ENABLED | PlanFlags::PAYLOAD_CHECKSUM
    }
}
