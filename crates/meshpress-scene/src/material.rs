// meshpress-scene/src/material.rs
//! Material channels referenced by scene nodes
//!
//! A material is a sparse set of optional channels: presence of a channel,
//! not a default value, signals that it exists. Nodes share materials
//! through `Arc`, and that shared identity is what merge-by-material keys
//! on.

use meshpress_core::Color;
use serde::{Deserialize, Serialize};

/// Material family, used to derive the physically-based flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Metalness/roughness material (physically based)
    Standard,
    /// Specular/shininess material
    Phong,
    /// Unlit or otherwise untyped material
    Basic,
}

/// Tangent-space vs object-space normal maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalMapSpace {
    TangentSpace,
    ObjectSpace,
}

/// A texture reference carried by a material channel.
///
/// Embedded references (from data URIs or binary scene containers) carry
/// their bytes and MIME type and are relocated to standalone files at
/// export time. Path references pass through unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextureRef {
    /// Relative path, written to the sidecar as-is
    Path(String),
    /// Inline image bytes with their MIME type
    Embedded { mime: String, data: Vec<u8> },
}

/// A sparse material description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,

    pub opacity: Option<f32>,

    pub diffuse_color: Option<Color>,
    pub diffuse_map: Option<TextureRef>,

    pub specular_color: Option<Color>,
    pub shininess: Option<f32>,
    pub specular_map: Option<TextureRef>,

    pub emissive_color: Option<Color>,
    pub emissive_intensity: Option<f32>,
    pub emissive_map: Option<TextureRef>,

    pub normal_map: Option<TextureRef>,
    pub normal_map_scale: Option<Vec2Scale>,
    pub normal_map_space: Option<NormalMapSpace>,

    pub ao_map: Option<TextureRef>,
    pub ao_map_intensity: Option<f32>,

    pub bump_map: Option<TextureRef>,
    pub bump_map_scale: Option<f32>,

    pub env_map: Option<TextureRef>,
    pub env_map_intensity: Option<f32>,

    pub light_map: Option<TextureRef>,
    pub light_map_intensity: Option<f32>,

    pub metalness: Option<f32>,
    pub metalness_map: Option<TextureRef>,

    pub roughness: Option<f32>,
    pub roughness_map: Option<TextureRef>,

    pub refraction_ratio: Option<f32>,
    pub vertex_tangents: Option<bool>,
}

/// Two-component scale factor (normal map scale)
pub type Vec2Scale = [f32; 2];

impl Default for MaterialKind {
    fn default() -> Self {
        MaterialKind::Basic
    }
}

impl Material {
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// True if the material family is physically based
    pub fn is_physically_based(&self) -> bool {
        self.kind == MaterialKind::Standard
    }
}
