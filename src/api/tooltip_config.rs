use serde::{Deserialize, Serialize};

use crate::core::{NearbyTuning, UnitConfig};
use crate::error::{TooltipError, TooltipResult};
use crate::extensions::TooltipPluginConfig;

use super::tooltip_placement::FALLBACK_CHART_WIDTH;

/// Per-chart tooltip configuration.
///
/// Every field has a default so hosts can persist only what they override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    #[serde(default = "default_wrap_labels")]
    pub wrap_labels: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub plugin: Option<TooltipPluginConfig>,
    #[serde(default)]
    pub unit: Option<UnitConfig>,
    #[serde(default)]
    pub tuning: NearbyTuning,
    #[serde(default = "default_fallback_chart_width")]
    pub fallback_chart_width: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            wrap_labels: default_wrap_labels(),
            hidden: false,
            plugin: None,
            unit: None,
            tuning: NearbyTuning::default(),
            fallback_chart_width: default_fallback_chart_width(),
        }
    }
}

impl TooltipConfig {
    #[must_use]
    pub fn with_unit(mut self, unit: UnitConfig) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_plugin(mut self, plugin: TooltipPluginConfig) -> Self {
        self.plugin = Some(plugin);
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: NearbyTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn validate(&self) -> TooltipResult<()> {
        self.tuning.validate()?;
        if !self.fallback_chart_width.is_finite() || self.fallback_chart_width <= 0.0 {
            return Err(TooltipError::InvalidData(
                "fallback chart width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> TooltipResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TooltipError::InvalidData(format!("failed to parse tooltip config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> TooltipResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TooltipError::Serialization(format!("failed to serialize tooltip config: {e}"))
        })
    }
}

fn default_wrap_labels() -> bool {
    true
}

fn default_fallback_chart_width() -> f64 {
    FALLBACK_CHART_WIDTH
}
