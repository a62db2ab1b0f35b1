//! JSON output of the full manifest.
//!
//! Downstream templates consume it directly.

use crate::render::Renderer;
use anyhow::{Context, Result};
use tfdocs_extras::manifest::InputsManifest;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, manifest: &InputsManifest) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(manifest).context("failed to serialize manifest")?;
        out.push('\n');
        Ok(out)
    }
}
