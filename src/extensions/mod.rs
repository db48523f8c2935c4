//! Optional presentation hooks layered on top of nearby-series resolution.
//!
//! Nothing in here feeds back into matching; extensions only decide how
//! resolved rows are presented.

pub mod plugins;

pub use plugins::{TooltipContent, TooltipPluginConfig, select_tooltip_content};
