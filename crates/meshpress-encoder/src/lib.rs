//! Quantized mesh encoding
//!
//! Turns one mesh unit into the packed little-endian P3D buffer: position
//! normalization, fixed-point quantization, content-based vertex welding,
//! winding correction, and the exact binary layout.

pub mod encoder;
pub mod format;
pub mod quantize;
pub mod weld;

pub use encoder::{EncodeError, EncodeOptions, EncodeResult, EncodedMesh, MeshEncoder};
pub use format::MeshHeader;
pub use weld::{VertexKey, VertexWelder};
