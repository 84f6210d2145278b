// meshpress-scene/src/node.rs
//! Scene tree nodes

use std::sync::Arc;

use crate::geometry::Geometry;
use crate::material::Material;

/// One node of the scene tree.
///
/// Materials are shared between nodes via `Arc`; two nodes reference "the
/// same" material exactly when their `Arc`s point at the same allocation.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,
    pub children: Vec<Node>,
    pub geometry: Option<Geometry>,
    pub material: Option<Arc<Material>>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

/// Root of a normalized scene tree handed over by a scene graph provider.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub root: Node,
}

impl Scene {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Depth-first visit of every node, children after their parent
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        fn walk<'a>(node: &'a Node, f: &mut impl FnMut(&'a Node)) {
            f(node);
            for child in &node.children {
                walk(child, f);
            }
        }
        walk(&self.root, f);
    }

    /// Depth-first mutable visit of every node
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        fn walk(node: &mut Node, f: &mut impl FnMut(&mut Node)) {
            f(node);
            for child in &mut node.children {
                walk(child, f);
            }
        }
        walk(&mut self.root, f);
    }
}
