use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Emphasize,
    DeEmphasize,
}

/// Fire-and-forget visual instruction for the chart renderer.
///
/// The renderer applies commands in order; the most recent one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualCommand {
    pub kind: CommandKind,
    pub series_indices: SmallVec<[usize; 8]>,
    /// When set, emphasizing must not fade the opacity of other series.
    pub suppress_opacity_fade: bool,
}

impl VisualCommand {
    #[must_use]
    pub fn emphasize(series_indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            kind: CommandKind::Emphasize,
            series_indices: series_indices.into_iter().collect(),
            suppress_opacity_fade: false,
        }
    }

    /// Highlights without dimming the rest of the chart.
    #[must_use]
    pub fn highlight(series_indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            suppress_opacity_fade: true,
            ..Self::emphasize(series_indices)
        }
    }

    #[must_use]
    pub fn de_emphasize(series_indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            kind: CommandKind::DeEmphasize,
            series_indices: series_indices.into_iter().collect(),
            suppress_opacity_fade: false,
        }
    }
}
