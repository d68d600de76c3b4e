//! Figure geometry shared by the renderers and the finisher.

/// Output resolution.
pub const DPI: f64 = 180.0;

/// Fraction of the figure height kept free at the bottom for legend and brand stamp.
pub const BOTTOM_RESERVED: f64 = 0.28;

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl FigureSize {
    pub const PITCH: FigureSize = FigureSize::new(8.4, 5.8);
    pub const RADAR: FigureSize = FigureSize::new(8.0, 8.0);
    pub const PIZZA: FigureSize = FigureSize::new(6.8, 6.8);
    pub const BUMPY: FigureSize = FigureSize::new(10.0, 7.0);

    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Pixel dimensions at [`DPI`].
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width_in * DPI).round() as u32,
            (self.height_in * DPI).round() as u32,
        )
    }
}

/// Typographic points to pixels at [`DPI`].
pub fn pt(points: f64) -> f64 {
    points * DPI / 72.0
}

/// Marker radius in pixels for a matplotlib-style scatter size (area in pt²).
pub fn marker_radius_px(area_pt2: f64) -> i32 {
    pt((area_pt2 / std::f64::consts::PI).sqrt()).round().max(1.0) as i32
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Largest rectangle of the given width/height ratio centred inside `self`.
    pub fn fit_aspect(&self, aspect: f64) -> Rect {
        let (w, h) = if self.width / self.height > aspect {
            (self.height * aspect, self.height)
        } else {
            (self.width, self.width / aspect)
        };
        let (cx, cy) = self.center();
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }
}

/// Where things go on a figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    /// Area available to the chart itself.
    pub plot: Rect,
}

impl FigureLayout {
    pub fn new(size: FigureSize, has_title: bool, has_subtitle: bool) -> Self {
        let (width, height) = size.pixels();
        let (w, h) = (width as f64, height as f64);
        let mut top = h * if has_title { 0.10 } else { 0.04 };
        if has_subtitle {
            top += h * 0.06;
        }
        let bottom = h * (1.0 - BOTTOM_RESERVED);
        let side = w * 0.05;
        Self {
            width,
            height,
            plot: Rect::new(side, top, w - 2.0 * side, (bottom - top).max(1.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_figure_is_180_dpi() {
        assert_eq!(FigureSize::PITCH.pixels(), (1512, 1044));
    }

    #[test]
    fn fit_aspect_stays_inside() {
        let r = Rect::new(0.0, 0.0, 300.0, 100.0).fit_aspect(1.5);
        assert_eq!(r.height, 100.0);
        assert_eq!(r.width, 150.0);
        assert_eq!(r.left, 75.0);
    }

    #[test]
    fn layout_reserves_bottom_band() {
        let l = FigureLayout::new(FigureSize::PITCH, true, true);
        assert!(l.plot.bottom() <= 1044.0 * (1.0 - BOTTOM_RESERVED) + 1e-9);
        assert!(l.plot.top > 0.0);
    }
}
