//! Layout of the `.resource_table` section read by the remoteproc loader:
//! ```txt
//! | header                                 | carveout entry                                 |
//! | ver | num | reserved[2] | offset[1]    | type | da | pa | len | flags | reserved | name  |
//!   +0:4  +4:4  +8:8          +16:4        | +20:4  +24  +28  +32   +36     +40       +44:32
//! ```
//! Every field is a little-endian `u32` except the NUL-padded name.

use bytemuck::{Pod, Zeroable};
use core::mem::{offset_of, size_of};
use thiserror::Error;

/// Version of the resource table format understood by remoteproc.
pub const RESOURCE_TABLE_VERSION: u32 = 1;

/// Device address of the M4F IRAM.
pub const M4F_IRAM_DA: u32 = 0x0500_0000;
/// Covers IRAM (192K) + DRAM (64K) and the gap between them.
pub const M4F_CODE_DATA_LEN: u32 = 0x5_0000;

/// Resource entry types.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum ResourceType {
    Carveout = 0,
    DevMem = 1,
    Trace = 2,
    VDev = 3,
}
impl TryFrom<u32> for ResourceType {
    type Error = ResourceTableError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Carveout,
            1 => Self::DevMem,
            2 => Self::Trace,
            3 => Self::VDev,
            _ => return Err(ResourceTableError::UnknownResourceType(value)),
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ResourceTableError {
    #[error("resource table is {len} bytes, expected at least {need}")]
    TooShort { len: usize, need: usize },
    #[error("unsupported resource table version {0}")]
    UnsupportedVersion(u32),
    #[error("expected exactly one resource entry, found {0}")]
    EntryCount(u32),
    #[error("resource entry offset {0:#x} does not point at the carveout")]
    BadOffset(u32),
    #[error("unknown resource type {0}")]
    UnknownResourceType(u32),
    #[error("resource entry is a {0:?}, expected a carveout")]
    NotCarveout(ResourceType),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ResourceTableHeader {
    pub ver: u32,
    pub num: u32,
    pub reserved: [u32; 2],
    pub offset: [u32; 1],
}

/// Physically contiguous memory the loader must reserve for the remote core.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Carveout {
    pub kind: u32,
    /// Device address, as seen by the M4F.
    pub da: u32,
    /// Physical address; filled in by remoteproc.
    pub pa: u32,
    pub len: u32,
    pub flags: u32,
    pub reserved: u32,
    pub name: [u8; 32],
}

impl Carveout {
    /// The entry name, up to its NUL padding.
    pub fn name(&self) -> Option<&str> {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        core::str::from_utf8(&self.name[..end]).ok()
    }
}

/// The complete table: a header followed by a single carveout covering code and data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct M4fResourceTable {
    pub header: ResourceTableHeader,
    pub code_data: Carveout,
}

const _: () = const {
    assert!(size_of::<ResourceTableHeader>() == 20);
    assert!(size_of::<Carveout>() == 56);
    assert!(size_of::<M4fResourceTable>() == 76);
};

const fn padded_name(name: &[u8]) -> [u8; 32] {
    assert!(name.len() < 32, "carveout name must leave room for a NUL");
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < name.len() {
        out[i] = name[i];
        i += 1;
    }
    out
}

impl M4fResourceTable {
    pub const CODE_DATA_OFFSET: u32 = offset_of!(M4fResourceTable, code_data) as u32;

    pub const fn new() -> Self {
        Self {
            header: ResourceTableHeader {
                ver: RESOURCE_TABLE_VERSION,
                num: 1,
                reserved: [0, 0],
                offset: [Self::CODE_DATA_OFFSET],
            },
            code_data: Carveout {
                kind: ResourceType::Carveout as u32,
                da: M4F_IRAM_DA,
                pa: 0,
                len: M4F_CODE_DATA_LEN,
                flags: 0,
                reserved: 0,
                name: padded_name(b"M4F_CODE_DATA"),
            },
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Read a table back out of a section image, checking it the way the loader would. The image
    /// need not be aligned, so the table is returned by value.
    pub fn parse(bytes: &[u8]) -> Result<Self, ResourceTableError> {
        let need = size_of::<Self>();
        let Some(raw) = bytes.get(..need) else {
            return Err(ResourceTableError::TooShort {
                len: bytes.len(),
                need,
            });
        };
        let table: Self = bytemuck::pod_read_unaligned(raw);
        if table.header.ver != RESOURCE_TABLE_VERSION {
            return Err(ResourceTableError::UnsupportedVersion(table.header.ver));
        }
        if table.header.num != 1 {
            return Err(ResourceTableError::EntryCount(table.header.num));
        }
        if table.header.offset[0] != Self::CODE_DATA_OFFSET {
            return Err(ResourceTableError::BadOffset(table.header.offset[0]));
        }
        match ResourceType::try_from(table.code_data.kind)? {
            ResourceType::Carveout => Ok(table),
            other => Err(ResourceTableError::NotCarveout(other)),
        }
    }
}

impl Default for M4fResourceTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(M4fResourceTable::CODE_DATA_OFFSET, 20);
        let table = M4fResourceTable::new();
        let bytes = table.as_bytes();
        assert_eq!(bytes.len(), 76);
        assert_eq!(&bytes[0..4], &1u32.to_le_bytes());
        assert_eq!(&bytes[16..20], &20u32.to_le_bytes());
        assert_eq!(&bytes[24..28], &0x0500_0000u32.to_le_bytes());
        assert_eq!(&bytes[32..36], &0x5_0000u32.to_le_bytes());
        assert_eq!(&bytes[44..57], b"M4F_CODE_DATA");
        assert!(bytes[57..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_name() {
        assert_eq!(M4fResourceTable::new().code_data.name(), Some("M4F_CODE_DATA"));
    }

    #[test]
    fn test_parse_roundtrip() {
        let table = M4fResourceTable::new();
        // force an unaligned source
        let mut image = vec![0u8; 1];
        image.extend_from_slice(table.as_bytes());
        assert_eq!(M4fResourceTable::parse(&image[1..]), Ok(table));
    }

    #[test]
    fn test_parse_rejects() {
        let good = M4fResourceTable::new();

        assert_eq!(
            M4fResourceTable::parse(&good.as_bytes()[..40]),
            Err(ResourceTableError::TooShort { len: 40, need: 76 })
        );

        let mut bad = good;
        bad.header.ver = 2;
        assert_eq!(
            M4fResourceTable::parse(bad.as_bytes()),
            Err(ResourceTableError::UnsupportedVersion(2))
        );

        let mut bad = good;
        bad.header.num = 0;
        assert_eq!(
            M4fResourceTable::parse(bad.as_bytes()),
            Err(ResourceTableError::EntryCount(0))
        );

        let mut bad = good;
        bad.header.offset[0] = 24;
        assert_eq!(
            M4fResourceTable::parse(bad.as_bytes()),
            Err(ResourceTableError::BadOffset(24))
        );

        let mut bad = good;
        bad.code_data.kind = 9;
        assert_eq!(
            M4fResourceTable::parse(bad.as_bytes()),
            Err(ResourceTableError::UnknownResourceType(9))
        );
    }

    #[test]
    fn test_parse_rejects_other_entry_types() {
        for kind in [ResourceType::DevMem, ResourceType::Trace, ResourceType::VDev] {
            let mut bad = M4fResourceTable::new();
            bad.code_data.kind = kind as u32;
            assert_eq!(
                M4fResourceTable::parse(bad.as_bytes()),
                Err(ResourceTableError::NotCarveout(kind))
            );
        }
    }
}
