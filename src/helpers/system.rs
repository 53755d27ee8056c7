use std::fs;
use std::path::Path;

use crate::general::config::KB;
use crate::general::error::{PageWarmError, Result};

const MEMINFO_PATH: &str = "/proc/meminfo";
const MEM_AVAILABLE: &str = "MemAvailable:";

/// True if `path` exists and is not a directory.
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    match fs::metadata(path) {
        Ok(info) => !info.is_dir(),
        Err(_) => false,
    }
}

/// Extracts `MemAvailable` from the text of `/proc/meminfo`, in bytes.
pub fn parse_mem_available(meminfo: &str) -> Option<u64> {
    let line = meminfo
        .lines()
        .find(|line| line.starts_with(MEM_AVAILABLE))?;

    let value = line[MEM_AVAILABLE.len()..].trim();
    let kilobytes = value.strip_suffix("kB").unwrap_or(value).trim();
    kilobytes.parse::<u64>().ok()?.checked_mul(KB)
}

/// Memory the kernel estimates is available for new workloads, in bytes.
pub fn system_memory_available() -> Result<u64> {
    let meminfo = fs::read_to_string(MEMINFO_PATH)?;
    parse_mem_available(&meminfo).ok_or(PageWarmError::NotFound("MemAvailable in /proc/meminfo"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "MemTotal:       16318480 kB\n\
                          MemFree:         1093292 kB\n\
                          MemAvailable:    9876543 kB\n\
                          Buffers:          612340 kB\n";

    #[test]
    fn parses_mem_available_in_bytes() {
        assert_eq!(parse_mem_available(SAMPLE), Some(9_876_543 * 1024));
    }

    #[test]
    fn missing_or_malformed_line_is_none() {
        assert_eq!(parse_mem_available("MemTotal: 1 kB\n"), None);
        assert_eq!(parse_mem_available("MemAvailable: lots kB\n"), None);
        assert_eq!(parse_mem_available(""), None);
    }

    #[test]
    fn file_exists_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.bin");
        assert!(!file_exists(&file));

        fs::write(&file, b"cached").unwrap();
        assert!(file_exists(&file));
        assert!(!file_exists(dir.path()));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn reads_system_meminfo() {
        let available = system_memory_available().unwrap();
        assert!(available > 0);
    }
}
