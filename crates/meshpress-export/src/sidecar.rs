// meshpress-export/src/sidecar.rs
//! Human-readable sidecar records
//!
//! `describe_material` is a pure mapping from a material's optional
//! channels to the sidecar record; a field appears in the output only if
//! the source channel is present. Texture channels render through an
//! injected resolver so relocation policy stays out of the mapping.

use meshpress_core::Color;
use meshpress_scene::{Material, MaterialKind, NormalMapSpace, TextureRef};
use serde::{Deserialize, Serialize};

/// Texture-bearing material channels, with the stable key used both in the
/// sidecar record and in relocated texture file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureChannel {
    DiffuseColor,
    Specular,
    Emissive,
    Normal,
    AmbientOcclusion,
    Bump,
    Environment,
    Light,
    Metalness,
    Roughness,
}

impl TextureChannel {
    pub fn key(&self) -> &'static str {
        match self {
            TextureChannel::DiffuseColor => "diffuseColorMap",
            TextureChannel::Specular => "specularMap",
            TextureChannel::Emissive => "emissiveMap",
            TextureChannel::Normal => "normalMap",
            TextureChannel::AmbientOcclusion => "diffuseAOMap",
            TextureChannel::Bump => "bumpMap",
            TextureChannel::Environment => "envMap",
            TextureChannel::Light => "lightMap",
            TextureChannel::Metalness => "metalnessMap",
            TextureChannel::Roughness => "roughnessMap",
        }
    }
}

/// Material sidecar record. Absent channels serialize as absent keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physically_based_material: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuse_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuse_color_map: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shininess: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_map: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive_map: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_map_scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_map_type: Option<String>,

    #[serde(rename = "diffuseAOMap", skip_serializing_if = "Option::is_none")]
    pub diffuse_ao_map: Option<String>,
    #[serde(rename = "diffuseAOMapIntensity", skip_serializing_if = "Option::is_none")]
    pub diffuse_ao_map_intensity: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_map_scale: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_map_intensity: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_map_intensity: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metalness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metalness_map: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness_map: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refraction_ratio: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_tangents: Option<bool>,
}

/// Per-mesh info record written next to the binary buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshInfo {
    pub uv0: bool,
    pub normals: bool,
    pub triangles: u32,
    pub vertices: u32,
    pub material: MaterialInfo,
}

/// Map a material to its sidecar record.
///
/// Each texture channel is rendered through `resolve`, which receives the
/// channel identity and the raw reference and returns the string written to
/// the record.
pub fn describe_material(
    material: &Material,
    mut resolve: impl FnMut(TextureChannel, &TextureRef) -> String,
) -> MaterialInfo {
    let mut info = MaterialInfo::default();

    match material.kind {
        MaterialKind::Standard => info.physically_based_material = Some(true),
        MaterialKind::Phong => {
            info.physically_based_material = Some(false);
            info.opacity = material.opacity;
        }
        MaterialKind::Basic => {}
    }

    info.diffuse_color = material.diffuse_color.map(encode_color);
    info.diffuse_color_map = material
        .diffuse_map
        .as_ref()
        .map(|t| resolve(TextureChannel::DiffuseColor, t));

    if let Some(color) = material.specular_color {
        info.specular_color = Some(encode_color(color));
        info.shininess = material.shininess;
    }
    info.specular_map = material
        .specular_map
        .as_ref()
        .map(|t| resolve(TextureChannel::Specular, t));

    if let Some(color) = material.emissive_color {
        info.emissive_color = Some(encode_color(color));
        info.emissive_intensity = material.emissive_intensity;
    }
    info.emissive_map = material
        .emissive_map
        .as_ref()
        .map(|t| resolve(TextureChannel::Emissive, t));

    if let Some(map) = &material.normal_map {
        info.normal_map = Some(resolve(TextureChannel::Normal, map));
        info.normal_map_scale = material
            .normal_map_scale
            .map(|[x, y]| format!("{},{}", x, y));
        info.normal_map_type = material.normal_map_space.map(|space| {
            match space {
                NormalMapSpace::TangentSpace => "TangentSpace",
                NormalMapSpace::ObjectSpace => "ObjectSpace",
            }
            .to_string()
        });
    }

    if let Some(map) = &material.ao_map {
        info.diffuse_ao_map = Some(resolve(TextureChannel::AmbientOcclusion, map));
        info.diffuse_ao_map_intensity = material.ao_map_intensity;
    }

    if let Some(map) = &material.bump_map {
        info.bump_map = Some(resolve(TextureChannel::Bump, map));
        info.bump_map_scale = material.bump_map_scale;
    }

    if let Some(map) = &material.env_map {
        info.env_map = Some(resolve(TextureChannel::Environment, map));
        info.env_map_intensity = material.env_map_intensity;
    }

    if let Some(map) = &material.light_map {
        info.light_map = Some(resolve(TextureChannel::Light, map));
        info.light_map_intensity = material.light_map_intensity;
    }

    info.metalness = material.metalness;
    info.metalness_map = material
        .metalness_map
        .as_ref()
        .map(|t| resolve(TextureChannel::Metalness, t));

    info.roughness = material.roughness;
    info.roughness_map = material
        .roughness_map
        .as_ref()
        .map(|t| resolve(TextureChannel::Roughness, t));

    info.refraction_ratio = material.refraction_ratio;
    info.vertex_tangents = material.vertex_tangents;

    info
}

/// Encode a color as three decimal 0-255 components joined by commas
fn encode_color(color: Color) -> String {
    fn component(value: f32) -> u8 {
        (value * 255.0) as u8
    }
    format!(
        "{},{},{}",
        component(color.r),
        component(color.g),
        component(color.b)
    )
}
