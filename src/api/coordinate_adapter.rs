use tracing::trace;

use crate::core::GridPoint;
use crate::interaction::CursorCoordinates;
use crate::render::{AxisPair, ChartSurface, VisualCommand};

/// Ancestor level of a pointer target that must be the chart root.
const CHART_ROOT_ANCESTOR_LEVEL: usize = 2;

/// Pointer sample translated into grid coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CursorResolution {
    /// `None` when the pointer is off the plotting rectangle or unmatched.
    pub cursor: Option<GridPoint>,
    pub annotation_cursor: Option<GridPoint>,
    pub chart_matched: bool,
    /// Clears leftover emphasis when the pointer is off the grid.
    pub commands: Vec<VisualCommand>,
}

/// Whether the pointer target sits inside this surface's root container.
///
/// Guards against an overlapping chart instance receiving the same pointer
/// events.
#[must_use]
pub fn cursor_targets_chart<S: ChartSurface + ?Sized>(
    cursor: &CursorCoordinates,
    surface: &S,
) -> bool {
    cursor
        .target
        .as_ref()
        .and_then(|target| target.ancestor(CHART_ROOT_ANCESTOR_LEVEL))
        .is_some_and(|ancestor| ancestor == surface.root_container())
}

/// Converts a pointer sample to primary and annotation grid points.
///
/// A pinned cursor overrides the live one and always counts as matched, so
/// the tooltip survives the pointer moving onto the tooltip itself.
#[must_use]
pub fn resolve_cursor<S: ChartSurface + ?Sized>(
    live: &CursorCoordinates,
    pinned: Option<&CursorCoordinates>,
    surface: &S,
    total_series: usize,
) -> CursorResolution {
    let (cursor, chart_matched) = match pinned {
        Some(pinned) => (pinned, true),
        None => (live, cursor_targets_chart(live, surface)),
    };
    if !chart_matched {
        return CursorResolution::default();
    }

    let pixel = cursor.plot_canvas;
    if surface.contains_pixel(pixel) {
        let grid = surface
            .convert_from_pixel(AxisPair::PRIMARY, pixel)
            .filter(|grid| grid.coords().is_some());
        if let Some(grid) = grid {
            return CursorResolution {
                cursor: Some(grid),
                annotation_cursor: surface.convert_from_pixel(AxisPair::ANNOTATION, pixel),
                chart_matched,
                commands: Vec::new(),
            };
        }
    }

    trace!(x = pixel.x, y = pixel.y, "pointer outside plotting grid");
    CursorResolution {
        cursor: None,
        annotation_cursor: None,
        chart_matched,
        commands: vec![VisualCommand::de_emphasize(0..total_series)],
    }
}
