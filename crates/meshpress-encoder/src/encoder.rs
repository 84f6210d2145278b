// meshpress-encoder/src/encoder.rs
//! Mesh unit encoder

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use meshpress_core::{BoundingBox, BoundingRect, Vec2, Vec3};
use meshpress_scene::MeshUnit;
use tracing::debug;

use crate::format;
use crate::quantize::{
    flip_v, pack_normal, pack_position, pack_uv, quantize_position_axis, quantize_uv_axis,
    range_divisor,
};
use crate::weld::{VertexKey, VertexWelder};

/// Mesh encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mesh unit has no vertices")]
    EmptyGeometry,

    #[error("Invalid mesh data: {0}")]
    InvalidMeshData(#[from] meshpress_core::Error),
}

pub type EncodeResult<T> = Result<T, EncodeError>;

/// Mesh encoding options
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Scale factor applied to every position
    pub zoom: f32,
    /// Recenter and rescale positions about the scene-wide bounds so all
    /// units share one relative scale
    pub normalize: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            normalize: false,
        }
    }
}

/// One encoded mesh: the packed buffer plus its summary counts.
#[derive(Debug, Clone)]
pub struct EncodedMesh {
    pub buffer: Vec<u8>,
    pub vertex_count: u32,
    pub triangle_count: u32,
    pub has_normals: bool,
    pub has_uvs: bool,
}

/// Encodes mesh units into P3D buffers
#[derive(Debug, Default)]
pub struct MeshEncoder {
    options: EncodeOptions,
}

impl MeshEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encode one mesh unit against the scene-wide bounds.
    pub fn encode(&self, unit: &MeshUnit, global_bounds: &BoundingBox) -> EncodeResult<EncodedMesh> {
        let geometry = &unit.geometry;
        if geometry.is_empty() {
            return Err(EncodeError::EmptyGeometry);
        }
        geometry.validate()?;

        let positions = self.transform_positions(&geometry.positions, global_bounds);

        let mut local = BoundingBox::empty();
        for position in &positions {
            local.expand(*position);
        }
        let pos_delta = local.size();

        // V flips before the local UV range is taken, so the range bounds
        // the flipped values.
        let uvs: Option<Vec<Vec2>> = geometry
            .uvs
            .as_ref()
            .map(|uvs| uvs.iter().map(|uv| Vec2::new(uv.x, flip_v(uv.y))).collect());
        let uv_rect = uvs.as_ref().map(|uvs| {
            let mut rect = BoundingRect::empty();
            for uv in uvs {
                rect.expand(*uv);
            }
            rect
        });

        let mut welder = VertexWelder::new();
        let mut welded_of_source: Vec<u32> = Vec::with_capacity(positions.len());

        for (j, position) in positions.iter().enumerate() {
            let key = VertexKey {
                position: pack_position(
                    quantize_position_axis(position.x, local.min.x, pos_delta.x),
                    quantize_position_axis(position.y, local.min.y, pos_delta.y),
                    quantize_position_axis(position.z, local.min.z, pos_delta.z),
                ),
                normal: geometry.normals.as_ref().map(|normals| pack_normal(normals[j])),
                uv: uvs.as_ref().map(|uvs| {
                    let rect = uv_rect.unwrap_or_else(BoundingRect::empty);
                    let size = rect.size();
                    pack_uv(
                        quantize_uv_axis(uvs[j].x, rect.min.x, size.x),
                        quantize_uv_axis(uvs[j].y, rect.min.y, size.y),
                    )
                }),
            };
            welded_of_source.push(welder.insert(key));
        }

        let indices = build_indices(geometry.indices.as_deref(), &welded_of_source);

        let buffer = self.write_buffer(&welder, &indices, &local, uv_rect.as_ref())?;

        let encoded = EncodedMesh {
            buffer,
            vertex_count: welder.len() as u32,
            triangle_count: (indices.len() / 3) as u32,
            has_normals: geometry.has_normals(),
            has_uvs: geometry.has_uvs(),
        };
        debug!(
            unit = %unit.name,
            vertices = encoded.vertex_count,
            triangles = encoded.triangle_count,
            bytes = encoded.buffer.len(),
            "encoded mesh unit"
        );
        Ok(encoded)
    }

    /// Apply the position transform: either recenter/rescale about the
    /// scene-wide bounds (normalize) or scale by zoom alone.
    fn transform_positions(&self, positions: &[Vec3], global_bounds: &BoundingBox) -> Vec<Vec3> {
        if self.options.normalize {
            let center = global_bounds.center();
            let half_extent =
                range_divisor(global_bounds.max_extent() / self.options.zoom * 0.5);
            positions
                .iter()
                .map(|p| {
                    Vec3::new(
                        (p.x - center.x) / half_extent,
                        (p.y - center.y) / half_extent,
                        (p.z - center.z) / half_extent,
                    )
                })
                .collect()
        } else {
            let zoom = self.options.zoom;
            positions
                .iter()
                .map(|p| Vec3::new(p.x * zoom, p.y * zoom, p.z * zoom))
                .collect()
        }
    }

    fn write_buffer(
        &self,
        welder: &VertexWelder,
        indices: &[u32],
        local: &BoundingBox,
        uv_rect: Option<&BoundingRect>,
    ) -> EncodeResult<Vec<u8>> {
        let vertices = welder.vertices();
        let has_normals = vertices.first().is_some_and(|v| v.normal.is_some());
        let has_uvs = vertices.first().is_some_and(|v| v.uv.is_some());

        let mut flags = 0;
        if has_normals {
            flags |= format::FLAG_NORMALS;
        }
        if has_uvs {
            flags |= format::FLAG_UVS;
        }

        let mut buf: Vec<u8> = Vec::new();
        let w = &mut buf;

        w.write_i32::<LittleEndian>(format::FORMAT_ID)?;
        w.write_i32::<LittleEndian>(flags)?;
        w.write_i32::<LittleEndian>(format::CLUSTER_COUNT)?;
        w.write_i32::<LittleEndian>(vertices.len() as i32)?;
        w.write_i32::<LittleEndian>(format::COMPRESSION_TYPES)?;
        w.write_i32::<LittleEndian>(format::FORMAT_VERSION)?;
        w.write_i32::<LittleEndian>(0)?;
        w.write_i32::<LittleEndian>(0)?;
        w.write_i32::<LittleEndian>(0)?;
        w.write_i32::<LittleEndian>(0)?;

        let pos_delta = local.size();
        w.write_f32::<LittleEndian>(local.min.x)?;
        w.write_f32::<LittleEndian>(local.min.y)?;
        w.write_f32::<LittleEndian>(local.min.z)?;
        w.write_f32::<LittleEndian>(pos_delta.x)?;
        w.write_f32::<LittleEndian>(pos_delta.y)?;
        w.write_f32::<LittleEndian>(pos_delta.z)?;
        w.write_i32::<LittleEndian>(vertices.len() as i32)?;
        for vertex in vertices {
            w.write_u32::<LittleEndian>(vertex.position.lower)?;
            w.write_u32::<LittleEndian>(vertex.position.upper)?;
        }

        if has_normals {
            w.write_i32::<LittleEndian>(vertices.len() as i32)?;
            for vertex in vertices {
                w.write_u32::<LittleEndian>(vertex.normal.unwrap_or_default())?;
            }
        }

        if has_uvs {
            let rect = uv_rect.copied().unwrap_or_else(BoundingRect::empty);
            let uv_delta = rect.size();
            w.write_f32::<LittleEndian>(rect.min.x)?;
            w.write_f32::<LittleEndian>(rect.min.y)?;
            w.write_f32::<LittleEndian>(uv_delta.x)?;
            w.write_f32::<LittleEndian>(uv_delta.y)?;
            w.write_i32::<LittleEndian>(vertices.len() as i32)?;
            for vertex in vertices {
                w.write_u32::<LittleEndian>(vertex.uv.unwrap_or_default())?;
            }
        }

        let wide = vertices.len() >= format::WIDE_INDEX_THRESHOLD;
        w.write_i32::<LittleEndian>(indices.len() as i32)?;
        if wide {
            for &index in indices {
                w.write_i32::<LittleEndian>(index as i32)?;
            }
        } else {
            for &index in indices {
                w.write_u16::<LittleEndian>(index as u16)?;
            }
            if indices.len() % 2 == 1 {
                w.write_u16::<LittleEndian>(format::INDEX_PAD)?;
            }
        }

        w.flush()?;
        Ok(buf)
    }
}

/// Build the output index list with corrected winding.
///
/// With explicit source indices every referenced vertex translates to its
/// welded index and each triangle is emitted reversed (c, b, a). Without
/// them the welded indices are consumed in input order, cut to whole
/// triangles, and each triangle's first and third entries swap in place.
fn build_indices(source: Option<&[u32]>, welded_of_source: &[u32]) -> Vec<u32> {
    match source {
        Some(source) => {
            let mut indices = Vec::with_capacity(source.len());
            for triangle in source.chunks_exact(3) {
                indices.push(welded_of_source[triangle[2] as usize]);
                indices.push(welded_of_source[triangle[1] as usize]);
                indices.push(welded_of_source[triangle[0] as usize]);
            }
            indices
        }
        None => {
            let mut indices = welded_of_source.to_vec();
            indices.truncate(indices.len() - indices.len() % 3);
            for triangle in indices.chunks_exact_mut(3) {
                triangle.swap(0, 2);
            }
            indices
        }
    }
}
