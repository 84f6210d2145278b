// meshpress-scene/src/inspector.rs
//! Scene inspection pass
//!
//! Walks the scene once to convert coordinate handedness and accumulate the
//! scene-wide bounding box, then collects the ordered list of mesh units to
//! encode, optionally folding nodes that share a material into one unit.

use std::collections::HashMap;
use std::sync::Arc;

use meshpress_core::BoundingBox;
use tracing::debug;

use crate::geometry::Geometry;
use crate::material::Material;
use crate::node::Scene;

/// Sign applied to every position's Z component when the scene enters the
/// pipeline, converting the provider's handedness to the target runtime's.
/// Applied exactly once, by `compute_global_bounds`.
pub const SCENE_DEPTH_FLIP: f32 = -1.0;

/// Merged unit names are cut to this many characters.
pub const MERGED_NAME_LIMIT: usize = 32;

/// One encodable group: a geometry, an optional material, and a name.
#[derive(Debug, Clone)]
pub struct MeshUnit {
    pub name: String,
    pub geometry: Geometry,
    pub material: Option<Arc<Material>>,
}

/// Result of inspecting a scene: global bounds plus the unit list.
#[derive(Debug, Clone)]
pub struct SceneSummary {
    /// Scene-wide position bounds; `None` for a scene without geometry
    pub bounds: Option<BoundingBox>,
    pub units: Vec<MeshUnit>,
}

impl SceneSummary {
    /// Inspect a scene: flip handedness, compute bounds, collect units.
    ///
    /// The bounds pass runs first because it mutates the positions the unit
    /// collection then copies.
    pub fn inspect(scene: &mut Scene, merge: bool) -> Self {
        let bounds = compute_global_bounds(scene);
        let units = collect_mesh_units(scene, merge);
        Self { bounds, units }
    }
}

/// Visit every geometry exactly once, permanently negating the Z component
/// of each position, and accumulate the scene-wide min/max.
///
/// Returns `None` when the scene carries no positions at all.
pub fn compute_global_bounds(scene: &mut Scene) -> Option<BoundingBox> {
    let mut bounds = BoundingBox::empty();

    scene.visit_mut(&mut |node| {
        if let Some(geometry) = &mut node.geometry {
            for position in &mut geometry.positions {
                position.z *= SCENE_DEPTH_FLIP;
                bounds.expand(*position);
            }
        }
    });

    if bounds.is_empty() {
        None
    } else {
        Some(bounds)
    }
}

/// Collect mesh units in depth-first encounter order.
///
/// With `merge` disabled every geometry-bearing node becomes its own unit.
/// With it enabled, a node whose material is the same `Arc` as an earlier
/// node's folds its geometry into that unit; the unit name is the
/// concatenation of the member names, cut to [`MERGED_NAME_LIMIT`]
/// characters. Nodes with empty geometries yield no unit, and an empty
/// scene yields an empty list.
pub fn collect_mesh_units(scene: &Scene, merge: bool) -> Vec<MeshUnit> {
    let mut units: Vec<MeshUnit> = Vec::new();
    let mut by_material: HashMap<usize, usize> = HashMap::new();

    scene.visit(&mut |node| {
        let Some(geometry) = &node.geometry else {
            return;
        };
        if geometry.is_empty() {
            debug!(node = %node.name, "skipping empty geometry");
            return;
        }

        let material_key = node
            .material
            .as_ref()
            .map(|m| Arc::as_ptr(m) as usize);

        if merge {
            if let Some(key) = material_key {
                if let Some(&unit_index) = by_material.get(&key) {
                    let unit = &mut units[unit_index];
                    unit.geometry.merge(geometry);
                    unit.name.push_str(&node.name);
                    truncate_chars(&mut unit.name, MERGED_NAME_LIMIT);
                    return;
                }
                by_material.insert(key, units.len());
            }
        }

        units.push(MeshUnit {
            name: node.name.clone(),
            geometry: geometry.clone(),
            material: node.material.clone(),
        });
    });

    units
}

/// Cut a string to at most `limit` characters on a char boundary.
fn truncate_chars(s: &mut String, limit: usize) {
    if let Some((idx, _)) = s.char_indices().nth(limit) {
        s.truncate(idx);
    }
}
