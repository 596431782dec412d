//! Theme list loading.
//!
//! Accepts either a bare JSON array of themes or the catalog API's envelope
//! `{"themes": [...]}`. Fields other than `id` and `itemCount` are ignored.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shelf_layout::ThemeDescriptor;

use crate::error::{CliError, Result};

/// Theme id as sent by the catalog API: numeric or a slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeId {
    Number(u64),
    Slug(String),
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Slug(s) => f.write_str(s),
        }
    }
}

pub type Theme = ThemeDescriptor<ThemeId>;

#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeList {
    Bare(Vec<Theme>),
    Envelope { themes: Vec<Theme> },
}

/// Parse a theme list from JSON text.
pub fn parse_themes(json: &str) -> Result<Vec<Theme>> {
    let list: ThemeList = serde_json::from_str(json)?;
    Ok(match list {
        ThemeList::Bare(themes) | ThemeList::Envelope { themes } => themes,
    })
}

/// Load a theme list from a file path, or from stdin when `source` is `-`.
pub fn load_themes(source: &str) -> Result<Vec<Theme>> {
    let text = if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        let path = Path::new(source);
        if !path.exists() {
            return Err(CliError::MissingPath {
                path: path.to_path_buf(),
            });
        }
        std::fs::read_to_string(path)?
    };
    let themes = parse_themes(&text)?;
    tracing::debug!(target: "shelf.cli", source, themes = themes.len(), "loaded theme list");
    Ok(themes)
}
