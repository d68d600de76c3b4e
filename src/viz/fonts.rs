//! One-time font registration for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so every face has to be registered by hand. The
//! brand fonts are tried first, then a few common system sans fonts. If nothing loads,
//! text is simply left out of the figures.

use log::{debug, warn};
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::assets::BrandAssets;

const SYSTEM_FALLBACKS: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Which faces ended up registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontStatus {
    pub regular: Option<FontSource>,
    pub bold: Option<FontSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    Brand,
    System,
}

static FONTS: OnceLock<FontStatus> = OnceLock::new();

/// Register fonts once per process. Later calls return the first outcome.
pub fn ensure_fonts_registered(assets: &BrandAssets) -> FontStatus {
    *FONTS.get_or_init(|| register_all(assets))
}

/// True when at least a regular face is available for drawing text.
pub fn text_available() -> bool {
    FONTS.get().is_some_and(|s| s.regular.is_some())
}

fn register_all(assets: &BrandAssets) -> FontStatus {
    let regular = load(&assets.font_regular)
        .map(|b| (b, FontSource::Brand))
        .or_else(|| {
            SYSTEM_FALLBACKS
                .iter()
                .map(PathBuf::from)
                .find_map(|p| load(&p))
                .map(|b| (b, FontSource::System))
        });

    let Some((regular_bytes, regular_src)) = regular else {
        warn!("no usable font found; figures will be rendered without text");
        return FontStatus::default();
    };
    if !register(regular_bytes, FontStyle::Normal) {
        warn!("regular font failed to parse; figures will be rendered without text");
        return FontStatus::default();
    }

    let bold = match load(&assets.font_bold) {
        Some(b) if register(b, FontStyle::Bold) => Some(FontSource::Brand),
        _ => register(regular_bytes, FontStyle::Bold).then_some(regular_src),
    };

    let status = FontStatus {
        regular: Some(regular_src),
        bold,
    };
    debug!("fonts registered: {:?}", status);
    status
}

/// Read a font file and keep its bytes for the life of the process.
fn load(path: &Path) -> Option<&'static [u8]> {
    let bytes = std::fs::read(path).ok()?;
    debug!("loaded font {}", path.display());
    Some(Box::leak(bytes.into_boxed_slice()))
}

fn register(bytes: &'static [u8], style: FontStyle) -> bool {
    plotters::style::register_font("sans-serif", style, bytes).is_ok()
}
