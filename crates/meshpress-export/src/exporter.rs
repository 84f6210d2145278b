// meshpress-export/src/exporter.rs
//! Batch asset exporter
//!
//! Walks the mesh units in traversal order, assigning sequence numbers,
//! relocating embedded textures, and writing the binary, sidecar, and
//! texture files. One unit failing to write is logged and the batch moves
//! on; nothing is rolled back.

use std::fs;
use std::path::{Path, PathBuf};

use meshpress_core::BoundingBox;
use meshpress_encoder::{EncodeError, EncodeOptions, MeshEncoder};
use meshpress_scene::{MeshUnit, TextureRef};
use tracing::{error, info};

use crate::sidecar::{self, MaterialInfo, MeshInfo};
use crate::textures::{extension_for_mime, TextureRegistry};

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Outcome of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub exported: usize,
    pub failed: usize,
    pub textures_written: usize,
}

/// Writes encoded mesh units and their sidecars to an output directory.
pub struct AssetExporter {
    out_dir: PathBuf,
    encoder: MeshEncoder,
}

impl AssetExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(out_dir, EncodeOptions::default())
    }

    pub fn with_options(out_dir: impl Into<PathBuf>, options: EncodeOptions) -> Self {
        Self {
            out_dir: out_dir.into(),
            encoder: MeshEncoder::with_options(options),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Export every unit in order.
    ///
    /// Only a failure to create the output directory aborts the batch;
    /// per-unit failures are counted and logged.
    pub fn export_units(
        &self,
        units: &[MeshUnit],
        global_bounds: &BoundingBox,
    ) -> ExportResult<ExportReport> {
        fs::create_dir_all(&self.out_dir)?;

        let mut registry = TextureRegistry::new();
        let mut report = ExportReport::default();

        for (index, unit) in units.iter().enumerate() {
            let seq = format!("{:03}", index + 1);
            match self.export_unit(unit, &seq, global_bounds, &mut registry) {
                Ok(path) => {
                    report.exported += 1;
                    info!("done: {} ({})", unit.name, path.display());
                }
                Err(e) => {
                    report.failed += 1;
                    error!(unit = %unit.name, error = %e, "failed to export mesh unit");
                }
            }
        }

        for blob in registry.blobs() {
            match TextureRegistry::write_blob(blob, &self.out_dir) {
                Ok(()) => report.textures_written += 1,
                Err(e) => {
                    error!(texture = %blob.file_name, error = %e, "failed to write texture");
                }
            }
        }

        Ok(report)
    }

    fn export_unit(
        &self,
        unit: &MeshUnit,
        seq: &str,
        global_bounds: &BoundingBox,
        registry: &mut TextureRegistry,
    ) -> ExportResult<PathBuf> {
        let material_info = match &unit.material {
            Some(material) => sidecar::describe_material(material, |channel, tex| match tex {
                TextureRef::Path(path) => path.clone(),
                TextureRef::Embedded { mime, data } => {
                    let file_name = format!(
                        "{}_{}_{}_{}.{}",
                        seq,
                        unit.name,
                        material.name,
                        channel.key(),
                        extension_for_mime(mime)
                    );
                    registry.relocate(file_name.clone(), data.clone());
                    file_name
                }
            }),
            None => MaterialInfo::default(),
        };

        let encoded = self.encoder.encode(unit, global_bounds)?;

        let info = MeshInfo {
            uv0: encoded.has_uvs,
            normals: encoded.has_normals,
            triangles: encoded.triangle_count,
            vertices: encoded.vertex_count,
            material: material_info,
        };

        let mesh_path = self.out_dir.join(format!("{}_{}.p3d", seq, unit.name));
        fs::write(&mesh_path, &encoded.buffer)?;

        let info_path = mesh_path.with_extension("txt");
        fs::write(&info_path, serde_json::to_string_pretty(&info)?)?;

        Ok(mesh_path)
    }
}
