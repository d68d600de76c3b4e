//! Brand asset locations. All of them are optional.

use std::path::{Path, PathBuf};

/// Default assets directory, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "assets/brand";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandAssets {
    pub logo: PathBuf,
    pub font_regular: PathBuf,
    pub font_bold: PathBuf,
}

impl BrandAssets {
    /// Standard layout under `dir`: `logos/PSS_Logo_Navy.png`, `fonts/Archivo-*.ttf`.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            logo: dir.join("logos").join("PSS_Logo_Navy.png"),
            font_regular: dir.join("fonts").join("Archivo-Regular.ttf"),
            font_bold: dir.join("fonts").join("Archivo-Bold.ttf"),
        }
    }
}
