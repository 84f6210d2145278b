// meshpress-scene/src/source.rs
//! Scene graph provider seam

use meshpress_core::Result;

use crate::node::Scene;

/// A scene graph provider: parses some source representation and hands the
/// pipeline a normalized scene tree in the provider's fixed coordinate
/// convention.
///
/// Format parsing lives entirely behind this trait; the compression engine
/// never reads external file formats itself. A provider that cannot produce
/// a usable scene returns [`meshpress_core::Error::UnsupportedInput`],
/// which aborts the run before any encoding.
pub trait SceneSource {
    fn load(&self) -> Result<Scene>;
}
