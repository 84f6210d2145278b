//! Integration tests for the export pipeline
//!
//! These cover the batch exporter end to end: sequence numbering, binary
//! and sidecar files, texture relocation, and continue-after-failure
//! behavior.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use meshpress_core::{BoundingBox, Color, Vec3};
use meshpress_encoder::MeshHeader;
use meshpress_export::AssetExporter;
use meshpress_scene::{
    Geometry, Material, MaterialKind, MeshUnit, Node, Scene, SceneSummary, TextureRef,
};

/// Fresh per-test output directory under the system temp dir
fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("meshpress-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn global_bounds() -> BoundingBox {
    BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
}

fn triangle() -> Geometry {
    Geometry::from_positions(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ])
}

fn unit(name: &str, material: Option<Arc<Material>>) -> MeshUnit {
    MeshUnit {
        name: name.to_string(),
        geometry: triangle(),
        material,
    }
}

#[test]
fn test_export_writes_mesh_sidecar_and_texture() {
    let dir = test_dir("mesh-sidecar-texture");

    let mut material = Material::new("hull", MaterialKind::Standard);
    material.diffuse_color = Some(Color::new(1.0, 0.0, 0.0));
    material.diffuse_map = Some(TextureRef::Embedded {
        mime: "image/png".to_string(),
        data: vec![0x89, 0x50, 0x4E, 0x47],
    });
    let material = Arc::new(material);

    let exporter = AssetExporter::new(&dir);
    let report = exporter
        .export_units(&[unit("cube", Some(material))], &global_bounds())
        .unwrap();

    assert_eq!(report.exported, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.textures_written, 1);

    let mesh_bytes = fs::read(dir.join("001_cube.p3d")).unwrap();
    let header = MeshHeader::parse(&mut mesh_bytes.as_slice()).unwrap();
    assert_eq!(header.id, 0);
    assert_eq!(header.cluster_count, 1);
    assert_eq!(header.vertex_count, 3);

    let info: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("001_cube.txt")).unwrap()).unwrap();
    assert_eq!(info["triangles"], 1);
    assert_eq!(info["vertices"], 3);
    assert_eq!(info["material"]["diffuseColor"], "255,0,0");
    assert_eq!(
        info["material"]["diffuseColorMap"],
        "001_cube_hull_diffuseColorMap.png"
    );

    let texture = fs::read(dir.join("001_cube_hull_diffuseColorMap.png")).unwrap();
    assert_eq!(texture, vec![0x89, 0x50, 0x4E, 0x47]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_path_references_pass_through() {
    let dir = test_dir("path-passthrough");

    let mut material = Material::new("hull", MaterialKind::Standard);
    material.diffuse_map = Some(TextureRef::Path("textures/hull_d.png".to_string()));
    let material = Arc::new(material);

    let exporter = AssetExporter::new(&dir);
    let report = exporter
        .export_units(&[unit("cube", Some(material))], &global_bounds())
        .unwrap();
    assert_eq!(report.textures_written, 0);

    let info: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("001_cube.txt")).unwrap()).unwrap();
    assert_eq!(info["material"]["diffuseColorMap"], "textures/hull_d.png");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_batch_continues_after_unit_failure() {
    let dir = test_dir("continue-after-failure");

    // The middle name contains a separator, so its file cannot be created
    let units = vec![
        unit("alpha", None),
        unit("bad/sub", None),
        unit("gamma", None),
    ];

    let exporter = AssetExporter::new(&dir);
    let report = exporter.export_units(&units, &global_bounds()).unwrap();

    assert_eq!(report.exported, 2);
    assert_eq!(report.failed, 1);

    assert!(dir.join("001_alpha.p3d").exists());
    assert!(dir.join("001_alpha.txt").exists());
    assert!(!dir.join("002_bad/sub.p3d").exists());
    assert!(dir.join("003_gamma.p3d").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_empty_batch_only_creates_directory() {
    let dir = test_dir("empty-batch");

    let exporter = AssetExporter::new(&dir);
    let report = exporter.export_units(&[], &global_bounds()).unwrap();

    assert_eq!(report, Default::default());
    assert!(dir.is_dir());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    // Running against an existing directory is fine
    exporter.export_units(&[], &global_bounds()).unwrap();

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_full_pipeline_with_merge() {
    let dir = test_dir("full-pipeline");

    let shared = Arc::new(Material::new("deck", MaterialKind::Phong));
    let mut root = Node::new("root");
    root.add_child(
        Node::new("bow")
            .with_geometry(triangle())
            .with_material(shared.clone()),
    );
    root.add_child(
        Node::new("stern")
            .with_geometry(triangle())
            .with_material(shared),
    );
    let mut scene = Scene::new(root);

    let summary = SceneSummary::inspect(&mut scene, true);
    let bounds = summary.bounds.unwrap();
    assert_eq!(summary.units.len(), 1);

    let exporter = AssetExporter::new(&dir);
    let report = exporter.export_units(&summary.units, &bounds).unwrap();
    assert_eq!(report.exported, 1);

    // Merged unit keeps both triangles under the concatenated name
    let info: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("001_bowstern.txt")).unwrap()).unwrap();
    assert_eq!(info["triangles"], 2);
    assert_eq!(info["material"]["physicallyBasedMaterial"], false);

    let _ = fs::remove_dir_all(&dir);
}
