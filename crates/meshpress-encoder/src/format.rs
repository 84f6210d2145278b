// meshpress-encoder/src/format.rs
//! P3D binary layout constants and header
//!
//! The file is little-endian throughout:
//!
//! - Header, 10 × i32 (40 bytes): id (0), flags (bit 8 = normals, bit 9 =
//!   uvs), cluster count (1), vertex count, compression types, version (0),
//!   three reserved words (0), metadata size (0).
//! - Position block: f32 min x/y/z, f32 delta x/y/z, i32 vertex count, then
//!   two packed u32 words per welded vertex.
//! - Normal block (if flagged): i32 vertex count, one packed u32 per vertex.
//! - UV block (if flagged): f32 min u/v, f32 delta u/v, i32 vertex count,
//!   one packed u32 per vertex.
//! - Index block: i32 index count, then u16 elements while the welded
//!   vertex count stays below [`WIDE_INDEX_THRESHOLD`], i32 elements
//!   otherwise; a single [`INDEX_PAD`] u16 keeps the buffer word-aligned
//!   when 16-bit indices end on an odd count.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

/// Format identifier written as the first header word
pub const FORMAT_ID: i32 = 0;

/// Format version
pub const FORMAT_VERSION: i32 = 0;

/// Every buffer carries exactly one cluster
pub const CLUSTER_COUNT: i32 = 1;

/// Header flag: a normal block follows the position block
pub const FLAG_NORMALS: i32 = 1 << 8;

/// Header flag: a UV block is present
pub const FLAG_UVS: i32 = 2 << 8;

/// Compression type tags for the position, normal, and UV streams
pub const COMPRESSION_TYPES: i32 = 1 | (1 << 4) | (1 << 8);

/// Welded vertex count at which indices widen from u16 to i32
pub const WIDE_INDEX_THRESHOLD: usize = 65_535;

/// Alignment filler after an odd number of 16-bit indices
pub const INDEX_PAD: u16 = 0x77AA;

/// Header size in bytes
pub const HEADER_SIZE: usize = 40;

/// Parsed P3D header, for tooling and round-trip tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHeader {
    pub id: i32,
    pub flags: i32,
    pub cluster_count: i32,
    pub vertex_count: i32,
    pub compression_types: i32,
    pub version: i32,
    pub reserved: [i32; 3],
    pub metadata_size: i32,
}

impl MeshHeader {
    /// Read the 40-byte header from the start of a buffer
    pub fn parse<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            id: reader.read_i32::<LittleEndian>()?,
            flags: reader.read_i32::<LittleEndian>()?,
            cluster_count: reader.read_i32::<LittleEndian>()?,
            vertex_count: reader.read_i32::<LittleEndian>()?,
            compression_types: reader.read_i32::<LittleEndian>()?,
            version: reader.read_i32::<LittleEndian>()?,
            reserved: [
                reader.read_i32::<LittleEndian>()?,
                reader.read_i32::<LittleEndian>()?,
                reader.read_i32::<LittleEndian>()?,
            ],
            metadata_size: reader.read_i32::<LittleEndian>()?,
        })
    }

    pub fn has_normals(&self) -> bool {
        self.flags & FLAG_NORMALS != 0
    }

    pub fn has_uvs(&self) -> bool {
        self.flags & FLAG_UVS != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_parse() {
        let mut bytes = Vec::new();
        for word in [0i32, FLAG_NORMALS, 1, 42, COMPRESSION_TYPES, 0, 0, 0, 0, 0] {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        assert_eq!(bytes.len(), HEADER_SIZE);

        let header = MeshHeader::parse(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(header.vertex_count, 42);
        assert!(header.has_normals());
        assert!(!header.has_uvs());
    }
}
