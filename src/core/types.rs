use serde::{Deserialize, Serialize};

use crate::error::{TooltipError, TooltipResult};

/// Position in chart pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for PixelPoint {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Cursor position in chart-logical (grid) coordinates.
///
/// Either coordinate may be absent when the renderer cannot invert the pixel
/// for that axis. On category x axes `x` is a column index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl GridPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    #[must_use]
    pub fn from_parts(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Both coordinates, when present. NaN counts as present here.
    #[must_use]
    pub fn coords(self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }

    /// Both coordinates, when present and finite.
    #[must_use]
    pub fn finite_coords(self) -> Option<(f64, f64)> {
        let (x, y) = self.coords()?;
        (x.is_finite() && y.is_finite()).then_some((x, y))
    }
}

/// Opaque identity of a display container (a chart root or any ancestor of a
/// pointer target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u64);

/// Plotting rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> TooltipResult<Self> {
        let rect = Self {
            left,
            top,
            width,
            height,
        };
        if !rect.is_valid() {
            return Err(TooltipError::InvalidPlotArea { width, height });
        }
        Ok(rect)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Inclusive on all edges.
    #[must_use]
    pub fn contains(self, pixel: PixelPoint) -> bool {
        pixel.x >= self.left
            && pixel.x <= self.right()
            && pixel.y >= self.top
            && pixel.y <= self.bottom()
    }
}
