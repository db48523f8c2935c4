use serde::{Deserialize, Serialize};

use crate::interaction::CursorCoordinates;

/// Chart width assumed when the renderer cannot report one.
pub const FALLBACK_CHART_WIDTH: f64 = 750.0;
pub const CURSOR_PADDING_X: f64 = 32.0;
pub const CURSOR_PADDING_Y: f64 = 16.0;

/// Measured size of the rendered tooltip box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipSize {
    pub width: f64,
    pub height: f64,
}

/// Viewport position of the tooltip's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub x: f64,
    pub y: f64,
}

impl TooltipPlacement {
    #[must_use]
    pub fn css_transform(self) -> String {
        format!("translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

/// Places the tooltip beside the cursor, flipping to the left once the
/// cursor is past the chart's horizontal middle.
///
/// When `viewport_height` is known the tooltip is pulled up so it does not
/// overflow the bottom edge.
#[must_use]
pub fn tooltip_placement(
    cursor: &CursorCoordinates,
    chart_width: f64,
    size: TooltipSize,
    viewport_height: Option<f64>,
) -> TooltipPlacement {
    let x = if cursor.plot_canvas.x > chart_width / 2.0 {
        cursor.viewport.x - size.width - CURSOR_PADDING_X
    } else {
        cursor.viewport.x + CURSOR_PADDING_X
    };

    let mut y = cursor.viewport.y + CURSOR_PADDING_Y;
    if let Some(viewport_height) = viewport_height {
        if y + size.height > viewport_height {
            y = (viewport_height - size.height).max(0.0);
        }
    }
    TooltipPlacement { x, y }
}
