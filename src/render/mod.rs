mod command;
mod headless_surface;

pub use command::{CommandKind, VisualCommand};
pub use headless_surface::{AnnotationAxis, HeadlessSurface, SeriesEmphasis};

use serde::{Deserialize, Serialize};

use crate::core::{ContainerId, GridPoint, PixelPoint};

/// Identifies an (x axis, y axis) pair of the chart grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisPair {
    pub x_axis_index: usize,
    pub y_axis_index: usize,
}

impl AxisPair {
    /// Axes shared by continuous series.
    pub const PRIMARY: Self = Self {
        x_axis_index: 0,
        y_axis_index: 0,
    };
    /// Coarser axes used only by annotation markers.
    pub const ANNOTATION: Self = Self {
        x_axis_index: 1,
        y_axis_index: 1,
    };
}

/// Contract a chart rendering backend offers to the tooltip layer.
///
/// Everything except `dispatch` is a read-only query; the tooltip layer never
/// touches axis layout or drawing.
pub trait ChartSurface {
    /// Inverse projection from pixels to grid coordinates for one axis pair.
    /// `None` when the pair does not exist on this chart.
    fn convert_from_pixel(&self, axes: AxisPair, pixel: PixelPoint) -> Option<GridPoint>;

    /// Whether the pixel lies inside the primary plotting rectangle.
    fn contains_pixel(&self, pixel: PixelPoint) -> bool;

    /// Rendered width in pixels, when laid out.
    fn width(&self) -> Option<f64>;

    fn root_container(&self) -> ContainerId;

    /// Tick interval of the primary value axis, when laid out.
    fn y_axis_interval(&self) -> Option<f64>;

    fn dispatch(&mut self, command: &VisualCommand);
}

/// Applies a batch of commands in order.
pub fn apply_commands<S: ChartSurface + ?Sized>(surface: &mut S, commands: &[VisualCommand]) {
    for command in commands {
        surface.dispatch(command);
    }
}
