//! Brand colors and small drawing helpers.

use anyhow::{Result, anyhow};
use plotters::prelude::*;

use crate::color::rgb;

/// Pitch charts background.
pub const PITCH_BACKGROUND: RGBColor = rgb(0xECECEC);
pub const PITCH_LINES: RGBColor = rgb(0xFFFFFF);
/// Radar rings, pizza guide lines.
pub const GUIDE: RGBColor = rgb(0xECECEC);
pub const PAPER: RGBColor = rgb(0xFFFFFF);

pub const BRAND_GREEN: RGBColor = rgb(0x2E7D6D);
pub const BRAND_NAVY: RGBColor = rgb(0x003C71);
pub const BRAND_YELLOW: RGBColor = rgb(0xFFD000);
pub const BRAND_INK: RGBColor = rgb(0x1F2E3D);

/// Brand palette in series order (same order as [`crate::series::PALETTE`]).
const BRAND4: [RGBColor; 4] = [BRAND_GREEN, BRAND_NAVY, BRAND_YELLOW, BRAND_INK];

/// Palette color for a series position.
#[inline]
pub fn palette_color(idx: usize) -> RGBAColor {
    BRAND4[idx % BRAND4.len()].to_rgba()
}

/// Same color with its alpha multiplied by `alpha`.
pub fn with_alpha(c: RGBAColor, alpha: f64) -> RGBAColor {
    RGBAColor(c.0, c.1, c.2, (c.3 * alpha).clamp(0.0, 1.0))
}

/// Round a float pixel position.
#[inline]
pub fn px(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

/// Plotters errors are backend-generic; flatten them into `anyhow`.
pub fn draw_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Thick straight line as a filled quad; Plotters strokes ignore sub-pixel widths.
pub fn thick_line<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    from: (f64, f64),
    to: (f64, f64),
    width_px: f64,
    color: RGBAColor,
) -> Result<()> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return Ok(());
    }
    let half = (width_px / 2.0).max(0.5);
    let (nx, ny) = (-dy / len * half, dx / len * half);
    let quad = vec![
        px((from.0 + nx, from.1 + ny)),
        px((to.0 + nx, to.1 + ny)),
        px((to.0 - nx, to.1 - ny)),
        px((from.0 - nx, from.1 - ny)),
    ];
    area.draw(&Polygon::new(quad, color.filled()))
        .map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_every_four() {
        assert_eq!(palette_color(0), palette_color(4));
        assert_eq!(palette_color(1).0, 0x00);
        assert_eq!(palette_color(2).1, 0xD0);
    }

    #[test]
    fn alpha_is_multiplied() {
        let c = with_alpha(BRAND_GREEN.to_rgba(), 0.5);
        assert!((c.3 - 0.5).abs() < 1e-12);
    }
}
