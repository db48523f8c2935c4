mod session;

pub use session::{PinState, TooltipSession};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ContainerId, PixelPoint};

/// Kind of element the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// The chart's drawing canvas.
    Canvas,
    Other,
}

/// Element under the pointer and its ancestor chain, nearest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTarget {
    pub kind: TargetKind,
    pub ancestors: SmallVec<[ContainerId; 4]>,
}

impl PointerTarget {
    #[must_use]
    pub fn new(kind: TargetKind, ancestors: impl IntoIterator<Item = ContainerId>) -> Self {
        Self {
            kind,
            ancestors: ancestors.into_iter().collect(),
        }
    }

    /// Canvas target whose grandparent is `root`, the layout a chart
    /// renderer produces (canvas inside a wrapper inside the chart root).
    #[must_use]
    pub fn canvas_in(wrapper: ContainerId, root: ContainerId) -> Self {
        Self::new(TargetKind::Canvas, [wrapper, root])
    }

    #[must_use]
    pub fn is_canvas(&self) -> bool {
        self.kind == TargetKind::Canvas
    }

    /// Ancestor `levels` steps up (1 = parent).
    #[must_use]
    pub fn ancestor(&self, levels: usize) -> Option<ContainerId> {
        levels
            .checked_sub(1)
            .and_then(|idx| self.ancestors.get(idx))
            .copied()
    }
}

/// Pointer sample threaded through the tooltip pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorCoordinates {
    /// Relative to the viewport; used for tooltip placement.
    pub viewport: PixelPoint,
    /// Relative to the chart canvas; used for grid conversion.
    pub plot_canvas: PixelPoint,
    pub target: Option<PointerTarget>,
}

impl CursorCoordinates {
    #[must_use]
    pub fn new(viewport: PixelPoint, plot_canvas: PixelPoint, target: Option<PointerTarget>) -> Self {
        Self {
            viewport,
            plot_canvas,
            target,
        }
    }

    /// Cursor whose viewport and canvas positions coincide.
    #[must_use]
    pub fn at(pixel: PixelPoint, target: Option<PointerTarget>) -> Self {
        Self::new(pixel, pixel, target)
    }
}
