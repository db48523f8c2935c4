use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CursorCoordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinState {
    Unpinned,
    Pinned,
}

/// Pin and show-all state for one chart's tooltip.
///
/// A pinned cursor is frozen until `unpin`; show-all is only meaningful while
/// pinned and resets on unpin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipSession {
    pinned: Option<CursorCoordinates>,
    show_all_series: bool,
}

impl TooltipSession {
    #[must_use]
    pub fn pin_state(&self) -> PinState {
        if self.pinned.is_some() {
            PinState::Pinned
        } else {
            PinState::Unpinned
        }
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    #[must_use]
    pub fn pinned_position(&self) -> Option<&CursorCoordinates> {
        self.pinned.as_ref()
    }

    #[must_use]
    pub fn show_all_series(&self) -> bool {
        self.show_all_series
    }

    /// Freezes the tooltip at `cursor`.
    ///
    /// Returns `false` and keeps the existing position when already pinned.
    pub fn pin(&mut self, cursor: CursorCoordinates) -> bool {
        if self.pinned.is_some() {
            return false;
        }
        debug!(x = cursor.plot_canvas.x, y = cursor.plot_canvas.y, "pin tooltip");
        self.pinned = Some(cursor);
        true
    }

    /// Releases the pinned position and resets show-all.
    ///
    /// Returns `false` when nothing was pinned.
    pub fn unpin(&mut self) -> bool {
        self.show_all_series = false;
        if self.pinned.take().is_none() {
            return false;
        }
        debug!("unpin tooltip");
        true
    }

    /// Ignored while unpinned.
    pub fn set_show_all_series(&mut self, show_all: bool) -> bool {
        if self.pinned.is_none() {
            return false;
        }
        self.show_all_series = show_all;
        true
    }

    /// Cursor the resolver should use: the frozen one while pinned.
    #[must_use]
    pub fn effective_cursor<'a>(&'a self, live: &'a CursorCoordinates) -> &'a CursorCoordinates {
        self.pinned.as_ref().unwrap_or(live)
    }

    /// Whether a "show all" affordance has anything left to reveal.
    #[must_use]
    pub fn show_all_available(&self, nearby_count: usize, total_series: usize) -> bool {
        self.is_pinned() && !self.show_all_series && total_series > 1 && nearby_count < total_series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PixelPoint;

    fn cursor(x: f64, y: f64) -> CursorCoordinates {
        CursorCoordinates::at(PixelPoint::new(x, y), None)
    }

    #[test]
    fn show_all_requires_pin() {
        let mut session = TooltipSession::default();
        assert!(!session.set_show_all_series(true));
        assert!(!session.show_all_series());

        session.pin(cursor(1.0, 2.0));
        assert!(session.set_show_all_series(true));
        assert!(session.show_all_series());
    }

    #[test]
    fn effective_cursor_prefers_pinned() {
        let mut session = TooltipSession::default();
        let live = cursor(5.0, 5.0);
        assert_eq!(session.effective_cursor(&live), &live);

        session.pin(cursor(1.0, 1.0));
        assert_eq!(session.effective_cursor(&live).plot_canvas.x, 1.0);
    }
}
