// meshpress-scene/src/geometry.rs
//! Triangle geometry carried by scene nodes

use meshpress_core::{Error, Result, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// An indexed or unindexed triangle list.
///
/// Normals and UVs are optional; when present they run parallel to
/// `positions`. Without an index buffer the positions are consumed directly
/// as a triangle list, three at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Per-vertex normals (same length as positions when present)
    pub normals: Option<Vec<Vec3>>,
    /// Per-vertex texture coordinates (same length as positions when present)
    pub uvs: Option<Vec<Vec2>>,
    /// Triangle indices (length a multiple of 3 when present)
    pub indices: Option<Vec<u32>>,
}

impl Geometry {
    /// Create a geometry from positions only
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of whole triangles the geometry describes
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check structural requirements: attribute lengths match the position
    /// count, index length is a multiple of 3, and every index is in range.
    pub fn validate(&self) -> Result<()> {
        let vc = self.positions.len();

        if let Some(normals) = &self.normals {
            if normals.len() != vc {
                return Err(Error::invalid_geometry(format!(
                    "normal count {} does not match position count {}",
                    normals.len(),
                    vc
                )));
            }
        }

        if let Some(uvs) = &self.uvs {
            if uvs.len() != vc {
                return Err(Error::invalid_geometry(format!(
                    "uv count {} does not match position count {}",
                    uvs.len(),
                    vc
                )));
            }
        }

        if let Some(indices) = &self.indices {
            if indices.len() % 3 != 0 {
                return Err(Error::invalid_geometry(format!(
                    "index count {} is not a multiple of 3",
                    indices.len()
                )));
            }
            if let Some(&out_of_range) = indices.iter().find(|&&i| i as usize >= vc) {
                return Err(Error::invalid_geometry(format!(
                    "index {} out of range for {} vertices",
                    out_of_range, vc
                )));
            }
        }

        Ok(())
    }

    /// Append `other` to this geometry.
    ///
    /// An optional attribute survives the merge only if both sides carry it.
    /// If either side is indexed, identity indices are synthesized for the
    /// unindexed side so the combined index buffer stays consistent.
    pub fn merge(&mut self, other: &Geometry) {
        let vertex_offset = self.positions.len() as u32;

        if self.indices.is_some() || other.indices.is_some() {
            let mut combined = self
                .indices
                .take()
                .unwrap_or_else(|| identity_indices(vertex_offset as usize));
            match &other.indices {
                Some(indices) => combined.extend(indices.iter().map(|i| i + vertex_offset)),
                None => combined.extend(
                    identity_indices(other.positions.len())
                        .iter()
                        .map(|i| i + vertex_offset),
                ),
            }
            self.indices = Some(combined);
        }

        self.positions.extend_from_slice(&other.positions);

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut ours), Some(theirs)) => {
                ours.extend_from_slice(theirs);
                Some(ours)
            }
            _ => None,
        };

        self.uvs = match (self.uvs.take(), &other.uvs) {
            (Some(mut ours), Some(theirs)) => {
                ours.extend_from_slice(theirs);
                Some(ours)
            }
            _ => None,
        };
    }
}

fn identity_indices(count: usize) -> Vec<u32> {
    (0..count as u32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Geometry {
        Geometry {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            normals: None,
            uvs: None,
            indices: Some(vec![0, 1, 2, 1, 3, 2]),
        }
    }

    #[test]
    fn test_counts() {
        let geo = quad();
        assert_eq!(geo.vertex_count(), 4);
        assert_eq!(geo.triangle_count(), 2);
    }

    #[test]
    fn test_unindexed_triangle_count() {
        let geo = Geometry::from_positions(vec![Vec3::ZERO; 7]);
        assert_eq!(geo.triangle_count(), 2);
    }

    #[test]
    fn test_validate_rejects_short_normals() {
        let mut geo = quad();
        geo.normals = Some(vec![Vec3::new(0.0, 0.0, 1.0); 3]);
        assert!(geo.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut geo = quad();
        geo.indices = Some(vec![0, 1, 9]);
        assert!(geo.validate().is_err());
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut a = quad();
        let b = quad();
        a.merge(&b);

        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 4);
        let indices = a.indices.unwrap();
        assert_eq!(&indices[6..], &[4, 5, 6, 5, 7, 6]);
    }

    #[test]
    fn test_merge_synthesizes_identity_for_unindexed() {
        let mut a = quad();
        let b = Geometry::from_positions(vec![Vec3::ZERO; 3]);
        a.merge(&b);

        let indices = a.indices.unwrap();
        assert_eq!(&indices[6..], &[4, 5, 6]);
    }

    #[test]
    fn test_merge_drops_partial_attributes() {
        let mut a = quad();
        a.uvs = Some(vec![Vec2::ZERO; 4]);
        let b = quad();
        a.merge(&b);

        assert!(a.uvs.is_none());
    }

    #[test]
    fn test_merge_keeps_shared_attributes() {
        let mut a = quad();
        a.uvs = Some(vec![Vec2::ZERO; 4]);
        let mut b = quad();
        b.uvs = Some(vec![Vec2::ONE; 4]);
        a.merge(&b);

        assert_eq!(a.uvs.unwrap().len(), 8);
    }
}
