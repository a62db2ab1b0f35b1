//! Output formats for the inputs manifest, selected by name.

pub mod json;
pub mod markdown;

use anyhow::{bail, Result};
use tfdocs_extras::manifest::InputsManifest;

/// Names accepted by [`create_renderer`], aliases included.
pub const FORMATS: &[&str] = &["markdown", "md", "json"];

/// Turns a manifest into one output document.
pub trait Renderer {
    fn render(&self, manifest: &InputsManifest) -> Result<String>;
}

pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    let renderer: Box<dyn Renderer> = match format.to_ascii_lowercase().as_str() {
        "markdown" | "md" => Box::new(markdown::MarkdownRenderer),
        "json" => Box::new(json::JsonRenderer),
        _ => bail!("unknown format `{}` (expected one of: {})", format, FORMATS.join(", ")),
    };
    Ok(renderer)
}
