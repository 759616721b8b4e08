//! Compose templates: a directory tree where each subdirectory holding a
//! `docker-compose.yml` (or `compose.yml`) is one installable container.
//! Templates are rendered against the root's `values.toml` before use.

mod render;
mod scan;

use std::path::PathBuf;

use thiserror::Error;

pub use render::{render_dir, render_file};
pub use scan::scan_dir;

pub const VALUES_FILE: &str = "values.toml";
pub const INCLUDES_FILE: &str = "includes.template";
pub const COMPOSE_FILES: [&str; 2] = ["docker-compose.yml", "compose.yml"];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to parse values file {path}: {source}")]
    Values {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        source: tera::Error,
    },
}

impl TemplateError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
