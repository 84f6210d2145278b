//! JSON scene document provider
//!
//! A `SceneSource` that reads a normalized scene tree from a JSON document:
//! a material table plus a node tree with inline geometry. Nodes reference
//! materials by name, and every reference to one name shares a single
//! `Arc`, so merge-by-material identity behaves the same as with an
//! in-process provider.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use meshpress_core::{Error, Result};
use meshpress_scene::{Geometry, Material, Node, Scene, SceneSource};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SceneDoc {
    #[serde(default)]
    materials: HashMap<String, Material>,
    root: NodeDoc,
}

#[derive(Debug, Deserialize)]
struct NodeDoc {
    name: String,
    #[serde(default)]
    children: Vec<NodeDoc>,
    geometry: Option<GeometryDoc>,
    material: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeometryDoc {
    positions: Vec<[f32; 3]>,
    normals: Option<Vec<[f32; 3]>>,
    uvs: Option<Vec<[f32; 2]>>,
    indices: Option<Vec<u32>>,
}

impl From<GeometryDoc> for Geometry {
    fn from(doc: GeometryDoc) -> Self {
        Geometry {
            positions: doc.positions.into_iter().map(Into::into).collect(),
            normals: doc
                .normals
                .map(|ns| ns.into_iter().map(Into::into).collect()),
            uvs: doc.uvs.map(|uvs| uvs.into_iter().map(Into::into).collect()),
            indices: doc.indices,
        }
    }
}

/// Scene graph provider backed by a JSON scene document.
pub struct JsonSceneSource {
    path: PathBuf,
}

impl JsonSceneSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(&self, text: &str) -> Result<Scene> {
        let doc: SceneDoc = serde_json::from_str(text)
            .map_err(|e| Error::unsupported_input(format!("invalid scene document: {}", e)))?;

        let materials: HashMap<String, Arc<Material>> = doc
            .materials
            .into_iter()
            .map(|(name, mut material)| {
                material.name = name.clone();
                (name, Arc::new(material))
            })
            .collect();

        let root = build_node(doc.root, &materials)?;
        Ok(Scene::new(root))
    }
}

impl SceneSource for JsonSceneSource {
    fn load(&self) -> Result<Scene> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(self.path.clone())
            } else {
                Error::Io(e)
            }
        })?;

        debug!(path = %self.path.display(), "parsing scene document");
        self.parse(&text)
    }
}

fn build_node(doc: NodeDoc, materials: &HashMap<String, Arc<Material>>) -> Result<Node> {
    let mut node = Node::new(doc.name);

    if let Some(geometry) = doc.geometry {
        node.geometry = Some(geometry.into());
    }

    if let Some(material_name) = doc.material {
        let material = materials.get(&material_name).ok_or_else(|| {
            Error::unsupported_input(format!("unknown material: {}", material_name))
        })?;
        node.material = Some(material.clone());
    }

    for child in doc.children {
        node.add_child(build_node(child, materials)?);
    }

    Ok(node)
}

/// True if the path has an extension this provider understands.
pub fn supports(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const DOC: &str = r#"{
        "materials": {
            "hull": { "kind": "standard", "diffuse_color": { "r": 1.0, "g": 0.0, "b": 0.0 } }
        },
        "root": {
            "name": "root",
            "children": [
                {
                    "name": "bow",
                    "material": "hull",
                    "geometry": { "positions": [[0,0,0],[1,0,0],[0,1,0]] }
                },
                {
                    "name": "stern",
                    "material": "hull",
                    "geometry": {
                        "positions": [[0,0,1],[1,0,1],[0,1,1]],
                        "indices": [0,1,2]
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_scene_document() {
        let source = JsonSceneSource::new("unused.json");
        let scene = source.parse(DOC).unwrap();

        assert_eq!(scene.root.children.len(), 2);
        let bow = &scene.root.children[0];
        assert_eq!(bow.name, "bow");
        assert_eq!(bow.geometry.as_ref().unwrap().vertex_count(), 3);
        assert_eq!(bow.material.as_ref().unwrap().name, "hull");
    }

    #[test]
    fn test_material_references_share_identity() {
        let source = JsonSceneSource::new("unused.json");
        let scene = source.parse(DOC).unwrap();

        let a = scene.root.children[0].material.as_ref().unwrap();
        let b = scene.root.children[1].material.as_ref().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_unknown_material_is_rejected() {
        let source = JsonSceneSource::new("unused.json");
        let doc = r#"{ "root": { "name": "root", "material": "missing" } }"#;

        let err = source.parse(doc).unwrap_err();
        assert!(err.is_fatal_input());
    }

    #[test]
    fn test_invalid_json_is_unsupported_input() {
        let source = JsonSceneSource::new("unused.json");
        let err = source.parse("not json").unwrap_err();
        assert!(matches!(err, Error::UnsupportedInput { .. }));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let source = JsonSceneSource::new("/definitely/not/here.json");
        let err = source.load().unwrap_err();
        assert!(err.is_fatal_input());
    }

    #[test]
    fn test_supports_json_only() {
        assert!(supports(Path::new("scene.json")));
        assert!(supports(Path::new("SCENE.JSON")));
        assert!(!supports(Path::new("scene.gltf")));
    }
}
