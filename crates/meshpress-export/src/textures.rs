// meshpress-export/src/textures.rs
//! Texture blob relocation
//!
//! Embedded texture bytes are collected into an explicit registry value
//! owned by the exporter and written out after the mesh batch. Blobs are
//! opaque: no decoding or re-encoding happens here.

use std::path::Path;

/// One relocated texture: raw bytes under an assigned output file name.
#[derive(Debug, Clone)]
pub struct TextureBlob {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Owns the texture blobs gathered during an export run.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    blobs: Vec<TextureBlob>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a blob under its assigned output file name.
    pub fn relocate(&mut self, file_name: String, data: Vec<u8>) {
        self.blobs.push(TextureBlob { file_name, data });
    }

    pub fn blobs(&self) -> &[TextureBlob] {
        &self.blobs
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Write one blob to `dir`
    pub fn write_blob(blob: &TextureBlob, dir: &Path) -> std::io::Result<()> {
        std::fs::write(dir.join(&blob.file_name), &blob.data)
    }
}

/// File extension for a MIME type: well-known image subtypes map to their
/// conventional extensions, anything else keeps the raw subtype.
pub fn extension_for_mime(mime: &str) -> String {
    let mime = mime.to_ascii_lowercase();
    let subtype = mime.rsplit('/').next().unwrap_or_default();

    if subtype.contains("png") {
        "png".to_string()
    } else if subtype.contains("jpg") || subtype.contains("jpeg") {
        "jpg".to_string()
    } else {
        subtype.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_common_mimes() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("IMAGE/PNG"), "png");
    }

    #[test]
    fn test_extension_falls_back_to_subtype() {
        assert_eq!(extension_for_mime("image/webp"), "webp");
        assert_eq!(extension_for_mime("image/ktx2"), "ktx2");
    }

    #[test]
    fn test_registry_preserves_order() {
        let mut registry = TextureRegistry::new();
        registry.relocate("a.png".into(), vec![1]);
        registry.relocate("b.jpg".into(), vec![2]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.blobs()[0].file_name, "a.png");
        assert_eq!(registry.blobs()[1].file_name, "b.jpg");
    }
}
