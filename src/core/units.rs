use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits used when a unit does not pin `decimal_places`.
pub const DEFAULT_MAX_DECIMAL_PLACES: u32 = 2;

const MAX_DECIMAL_PLACES: u32 = 12;

const DECIMAL_ABBREVIATIONS: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl TimeUnit {
    const ASCENDING: [Self; 6] = [
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
    ];

    #[must_use]
    pub fn millis(self) -> f64 {
        match self {
            Self::Milliseconds => 1.0,
            Self::Seconds => 1_000.0,
            Self::Minutes => 60_000.0,
            Self::Hours => 3_600_000.0,
            Self::Days => 86_400_000.0,
            Self::Weeks => 604_800_000.0,
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
        }
    }
}

/// Display unit applied to series values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum UnitConfig {
    Decimal {
        #[serde(default)]
        decimal_places: Option<u32>,
        #[serde(default = "default_abbreviate")]
        abbreviate: bool,
    },
    /// Values already expressed in 0..=100.
    Percent {
        #[serde(default)]
        decimal_places: Option<u32>,
    },
    /// Ratios in 0..=1, scaled by 100 for display.
    PercentDecimal {
        #[serde(default)]
        decimal_places: Option<u32>,
    },
    /// SI byte sizes (base 1000).
    Bytes {
        #[serde(default)]
        decimal_places: Option<u32>,
        #[serde(default = "default_abbreviate")]
        abbreviate: bool,
    },
    Time {
        unit: TimeUnit,
        #[serde(default)]
        decimal_places: Option<u32>,
        #[serde(default = "default_abbreviate")]
        abbreviate: bool,
    },
}

fn default_abbreviate() -> bool {
    true
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self::Decimal {
            decimal_places: None,
            abbreviate: true,
        }
    }
}

/// Formats a raw value for display.
///
/// `None` yields the plain numeric rendering. Non-finite input renders as
/// `NaN`, `Infinity` or `-Infinity` for every unit.
#[must_use]
pub fn format_value(value: f64, unit: Option<&UnitConfig>) -> String {
    if let Some(text) = non_finite_text(value) {
        return text.to_owned();
    }
    let Some(unit) = unit else {
        return plain_number(value);
    };

    match *unit {
        UnitConfig::Decimal {
            decimal_places,
            abbreviate,
        } => format_decimal(value, decimal_places, abbreviate),
        UnitConfig::Percent { decimal_places } => {
            format!("{}%", fixed_or_trimmed(value, decimal_places))
        }
        UnitConfig::PercentDecimal { decimal_places } => {
            format!("{}%", fixed_or_trimmed(value * 100.0, decimal_places))
        }
        UnitConfig::Bytes {
            decimal_places,
            abbreviate,
        } => format_bytes(value, decimal_places, abbreviate),
        UnitConfig::Time {
            unit,
            decimal_places,
            abbreviate,
        } => format_time(value, unit, decimal_places, abbreviate),
    }
}

fn non_finite_text(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

fn plain_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    value.to_string()
}

fn format_decimal(value: f64, decimal_places: Option<u32>, abbreviate: bool) -> String {
    if !abbreviate {
        return group_thousands(&fixed_or_trimmed(value, decimal_places));
    }
    let mut tier = DECIMAL_ABBREVIATIONS
        .iter()
        .rposition(|(threshold, _)| value.abs() >= *threshold)
        .unwrap_or(0);
    // 999_999 rounds to 1000K; promote to the next suffix.
    if tier + 1 < DECIMAL_ABBREVIATIONS.len()
        && rounded_magnitude(value / DECIMAL_ABBREVIATIONS[tier].0, decimal_places) >= 1_000.0
    {
        tier += 1;
    }
    let (threshold, suffix) = DECIMAL_ABBREVIATIONS[tier];
    format!(
        "{}{suffix}",
        fixed_or_trimmed(value / threshold, decimal_places)
    )
}

fn format_bytes(value: f64, decimal_places: Option<u32>, abbreviate: bool) -> String {
    if !abbreviate {
        return format!("{} B", group_thousands(&fixed_or_trimmed(value, decimal_places)));
    }
    let mut scaled = value;
    let mut unit_idx = 0;
    while unit_idx + 1 < BYTE_UNITS.len()
        && rounded_magnitude(scaled, decimal_places) >= 1_000.0
    {
        scaled /= 1_000.0;
        unit_idx += 1;
    }
    format!(
        "{} {}",
        fixed_or_trimmed(scaled, decimal_places),
        BYTE_UNITS[unit_idx]
    )
}

fn format_time(value: f64, unit: TimeUnit, decimal_places: Option<u32>, abbreviate: bool) -> String {
    if !abbreviate {
        return format!("{}{}", fixed_or_trimmed(value, decimal_places), unit.suffix());
    }
    let millis = value * unit.millis();
    // Largest unit that keeps the magnitude >= 1; sub-millisecond stays in ms.
    let target = TimeUnit::ASCENDING
        .iter()
        .rev()
        .copied()
        .find(|candidate| millis.abs() >= candidate.millis())
        .unwrap_or(TimeUnit::Milliseconds);
    format!(
        "{}{}",
        fixed_or_trimmed(millis / target.millis(), decimal_places),
        target.suffix()
    )
}

/// Absolute value after the rounding `fixed_or_trimmed` would apply.
fn rounded_magnitude(value: f64, decimal_places: Option<u32>) -> f64 {
    let places = decimal_places
        .unwrap_or(DEFAULT_MAX_DECIMAL_PLACES)
        .min(MAX_DECIMAL_PLACES);
    Decimal::from_f64(value)
        .map(|decimal| decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.abs().to_f64())
        .unwrap_or_else(|| value.abs())
}

fn fixed_or_trimmed(value: f64, decimal_places: Option<u32>) -> String {
    match decimal_places {
        Some(places) => round_fixed(value, places.min(MAX_DECIMAL_PLACES)),
        None => trim_fraction(round_fixed(value, DEFAULT_MAX_DECIMAL_PLACES)),
    }
}

/// Half-away-from-zero rounding to exactly `places` fractional digits.
fn round_fixed(value: f64, places: u32) -> String {
    let precision = places as usize;
    let text = match Decimal::from_f64(value) {
        Some(decimal) => {
            let rounded =
                decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.precision$}")
        }
        // Outside the decimal range; binary rounding is the best we can do.
        None => format!("{value:.precision$}"),
    };
    normalize_negative_zero(text)
}

fn trim_fraction(mut text: String) -> String {
    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }
    normalize_negative_zero(text)
}

fn normalize_negative_zero(text: String) -> String {
    if text.starts_with('-') && text[1..].chars().all(|ch| ch == '0' || ch == '.') {
        text[1..].to_owned()
    } else {
        text
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
