//! Scene graph model and inspection
//!
//! Provides the normalized scene tree handed over by a scene graph provider
//! (`SceneSource`), and the inspection pass that computes the scene-wide
//! bounding box and the ordered list of encodable mesh units.

pub mod geometry;
pub mod inspector;
pub mod material;
pub mod node;
pub mod source;

pub use geometry::Geometry;
pub use inspector::{collect_mesh_units, compute_global_bounds, MeshUnit, SceneSummary};
pub use material::{Material, MaterialKind, NormalMapSpace, TextureRef};
pub use node::{Node, Scene};
pub use source::SceneSource;
