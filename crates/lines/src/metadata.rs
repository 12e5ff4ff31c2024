//! Layer color overrides from sidecar page metadata.
//!
//! Pages may carry a small JSON document listing their layers by name.
//! A layer named e.g. `"notes #ff0000"` or `"marks #blue"` requests a
//! color override for every stroke on it. Parse failures of any kind
//! fall back to the tool-based default color; they never abort a decode.

use once_cell::sync::Lazy;
use scrawl_types::Color;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub layers: Vec<LayerEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LayerEntry {
    #[serde(default)]
    pub name: String,
}

static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("black", Color::rgb(0, 0, 0)),
        ("white", Color::rgb(255, 255, 255)),
        ("gray", Color::gray(125)),
        ("grey", Color::gray(125)),
        ("red", Color::rgb(217, 7, 7)),
        ("green", Color::rgb(0, 122, 51)),
        ("blue", Color::rgb(5, 60, 150)),
        ("yellow", Color::rgb(255, 255, 0)),
        ("orange", Color::rgb(255, 140, 0)),
        ("pink", Color::rgb(255, 105, 180)),
        ("purple", Color::rgb(128, 0, 128)),
        ("cyan", Color::rgb(0, 174, 239)),
        ("brown", Color::rgb(139, 87, 42)),
    ])
});

/// Parse a sidecar metadata document into positional layer overrides.
///
/// Malformed JSON yields no overrides at all; individual names that
/// carry no parseable `#` token yield `None` for that layer.
pub fn layer_overrides(json: &str) -> Vec<Option<Color>> {
    match serde_json::from_str::<PageMetadata>(json) {
        Ok(meta) => meta
            .layers
            .iter()
            .map(|layer| color_from_layer_name(&layer.name))
            .collect(),
        Err(err) => {
            log::debug!("ignoring unparseable layer metadata: {err}");
            Vec::new()
        }
    }
}

/// Scan a layer name for a `#colorspec` token.
///
/// The first token starting with `#` is tried as hex (6 or 8 digits,
/// 8 carrying an alpha byte), then as a named color. Later tokens are
/// not considered; a name without a `#` token has no override.
pub fn color_from_layer_name(name: &str) -> Option<Color> {
    let spec = name
        .split_whitespace()
        .find_map(|token| token.strip_prefix('#'))?;
    parse_color_spec(spec)
}

fn parse_color_spec(spec: &str) -> Option<Color> {
    if let Ok(color) = Color::from_hex(spec) {
        return Some(color);
    }
    NAMED_COLORS.get(spec.to_ascii_lowercase().as_str()).copied()
}
