use serde::{Deserialize, Serialize};

use crate::api::NearbySeriesInfo;
use crate::core::SeriesKind;

/// Host-provided tooltip override that takes over when every nearby row
/// belongs to one series kind (e.g. annotation-only tooltips).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipPluginConfig {
    pub id: String,
    pub series_type_trigger: SeriesKind,
}

impl TooltipPluginConfig {
    #[must_use]
    pub fn new(id: impl Into<String>, series_type_trigger: SeriesKind) -> Self {
        Self {
            id: id.into(),
            series_type_trigger,
        }
    }

    /// True when `entries` is non-empty and all rows match the trigger kind.
    #[must_use]
    pub fn is_active_for(&self, entries: &[NearbySeriesInfo]) -> bool {
        !entries.is_empty()
            && entries
                .iter()
                .all(|entry| entry.series_type == Some(self.series_type_trigger))
    }
}

/// Which presentation should render the tooltip rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipContent {
    Default,
    Plugin { id: String },
}

#[must_use]
pub fn select_tooltip_content(
    entries: &[NearbySeriesInfo],
    plugin: Option<&TooltipPluginConfig>,
) -> TooltipContent {
    match plugin {
        Some(plugin) if plugin.is_active_for(entries) => TooltipContent::Plugin {
            id: plugin.id.clone(),
        },
        _ => TooltipContent::Default,
    }
}
