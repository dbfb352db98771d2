//! Per-axis target configuration.
//!
//! A [`Factor`] is rebuilt by the caller on every render and compared by value
//! against the previous one; any difference may (re)start a transition.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::FactorError;

/// Target size for one axis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<RawSize>", into = "Option<RawSize>")]
pub enum SizeFactor {
    /// Proportion of the natural length (`0.5` is half the content size).
    Multiplier(f64),
    /// CSS length written verbatim, e.g. `"20px"` or `"2em"`.
    Explicit(String),
    /// Natural size; once settled the property is written as `auto`.
    Auto,
    /// Natural size; once settled the property is removed from the inline style.
    #[default]
    Unset,
}

impl SizeFactor {
    /// True for the two variants that ask for the natural size.
    #[inline]
    pub fn is_auto(&self) -> bool {
        matches!(self, SizeFactor::Auto | SizeFactor::Unset)
    }
}

impl From<f64> for SizeFactor {
    fn from(m: f64) -> Self {
        SizeFactor::Multiplier(m)
    }
}

impl From<&str> for SizeFactor {
    fn from(s: &str) -> Self {
        if s == "auto" {
            SizeFactor::Auto
        } else {
            SizeFactor::Explicit(s.to_string())
        }
    }
}

/// Wire form of [`SizeFactor`]: number | string | null.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(f64),
    Text(String),
}

impl From<Option<RawSize>> for SizeFactor {
    fn from(raw: Option<RawSize>) -> Self {
        match raw {
            None => SizeFactor::Unset,
            Some(RawSize::Number(m)) => SizeFactor::Multiplier(m),
            Some(RawSize::Text(s)) => SizeFactor::from(s.as_str()),
        }
    }
}

impl From<SizeFactor> for Option<RawSize> {
    fn from(size: SizeFactor) -> Self {
        match size {
            SizeFactor::Multiplier(m) => Some(RawSize::Number(m)),
            SizeFactor::Explicit(s) => Some(RawSize::Text(s)),
            SizeFactor::Auto => Some(RawSize::Text("auto".to_string())),
            SizeFactor::Unset => None,
        }
    }
}

/// Size plus timing for one axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    #[serde(default)]
    pub size: SizeFactor,
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    #[serde(rename = "delay")]
    pub delay_ms: u32,
    pub curve: String,
}

impl Factor {
    /// Factor with the given size and the config's timing defaults.
    pub fn new(size: impl Into<SizeFactor>, cfg: &Config) -> Self {
        Self {
            size: size.into(),
            duration_ms: cfg.default_duration_ms,
            delay_ms: cfg.default_delay_ms,
            curve: cfg.default_curve.clone(),
        }
    }

    pub fn with_duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn with_delay(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn with_curve(mut self, curve: &str) -> Self {
        self.curve = curve.to_string();
        self
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        self.size.is_auto()
    }

    /// `duration + delay`, saturating.
    #[inline]
    pub fn total_ms(&self) -> u32 {
        self.duration_ms.saturating_add(self.delay_ms)
    }
}

/// Caller-facing factor; every missing field falls back to [`Config`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorInput {
    #[serde(default)]
    pub size: SizeFactor,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub delay: Option<u32>,
    #[serde(default)]
    pub curve: Option<String>,
}

impl FactorInput {
    /// Parse a JSON factor object such as `{ "size": 0.5, "duration": 300 }`.
    pub fn from_json(s: &str) -> Result<Self, FactorError> {
        let input: FactorInput = serde_json::from_str(s)?;
        input.validate()?;
        Ok(input)
    }

    /// Reject multipliers that would poison every length derived from them.
    pub fn validate(&self) -> Result<(), FactorError> {
        match self.size {
            SizeFactor::Multiplier(m) if !m.is_finite() => Err(FactorError::NonFiniteMultiplier(m)),
            _ => Ok(()),
        }
    }

    pub fn resolve(self, cfg: &Config) -> Factor {
        Factor {
            size: self.size,
            duration_ms: self.duration.unwrap_or(cfg.default_duration_ms),
            delay_ms: self.delay.unwrap_or(cfg.default_delay_ms),
            curve: self.curve.unwrap_or_else(|| cfg.default_curve.clone()),
        }
    }
}
