//! Asset export pipeline
//!
//! Turns inspected mesh units into files on disk: the packed `.p3d` mesh
//! buffers, their human-readable `.txt` sidecar records, and relocated
//! texture blobs.

pub mod exporter;
pub mod sidecar;
pub mod textures;

pub use exporter::{AssetExporter, ExportError, ExportReport, ExportResult};
pub use sidecar::{describe_material, MaterialInfo, MeshInfo, TextureChannel};
pub use textures::{extension_for_mime, TextureBlob, TextureRegistry};
