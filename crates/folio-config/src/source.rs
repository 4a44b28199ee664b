//! Source export location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_content_file() -> PathBuf {
    PathBuf::from("../mnds-site/public/data/projects.json")
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("../mnds-site/public/media/projects")
}

fn default_media_url_prefix() -> String {
    "/media/projects/".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// JSON export holding the project list.
    #[serde(default = "default_content_file")]
    pub content_file: PathBuf,

    /// Directory the media references resolve against.
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Public URL prefix stripped from media paths before resolving them.
    #[serde(default = "default_media_url_prefix")]
    pub media_url_prefix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            content_file: default_content_file(),
            media_dir: default_media_dir(),
            media_url_prefix: default_media_url_prefix(),
        }
    }
}
