//! Core configuration for animated-size-core.

use serde::{Deserialize, Serialize};

/// Defaults applied to every [`crate::FactorInput`] field the caller leaves out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transition duration in milliseconds.
    pub default_duration_ms: u32,
    /// Transition delay in milliseconds.
    pub default_delay_ms: u32,
    /// CSS easing function, e.g. `ease` or `cubic-bezier(.2,0,0,1)`.
    pub default_curve: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_ms: 350,
            default_delay_ms: 0,
            default_curve: "ease".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "default_duration_ms": 120 }"#).unwrap();
        assert_eq!(cfg.default_duration_ms, 120);
        assert_eq!(cfg.default_delay_ms, 0);
        assert_eq!(cfg.default_curve, "ease");
    }
}
