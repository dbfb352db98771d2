//! Pure length resolution.

use crate::factor::SizeFactor;
use crate::style::StyleValue;

/// Length to write for one axis.
///
/// `natural` is the last measured natural length (`None` until measured).
/// `auto` is the axis' auto state: while it is set the axis reports its natural
/// size, otherwise a concrete length is pinned so a transition has a start
/// point. `None` means "no inline length".
pub fn resolve_length(size: &SizeFactor, natural: Option<f64>, auto: bool) -> Option<StyleValue> {
    match size {
        SizeFactor::Auto if auto => Some(StyleValue::Text("auto".to_string())),
        SizeFactor::Unset if auto => None,
        SizeFactor::Auto | SizeFactor::Unset => natural.map(StyleValue::Px),
        // Bridge: pin the natural length until the auto state drops.
        _ if auto => natural.map(StyleValue::Px),
        SizeFactor::Explicit(css) => Some(StyleValue::Text(css.clone())),
        SizeFactor::Multiplier(m) => match natural {
            Some(n) => Some(StyleValue::Px(m * n)),
            None if *m == 0.0 => Some(StyleValue::Px(0.0)),
            // Never measured; heals on the next pass after measurement.
            None => None,
        },
    }
}

/// Combine per-axis transition strings into one `transition` value.
pub fn transition_shorthand(width: Option<&str>, height: Option<&str>) -> String {
    match (width, height) {
        (None, None) => String::new(),
        (Some(w), None) => format!("width {w}"),
        (None, Some(h)) => format!("height {h}"),
        (Some(w), Some(h)) => format!("width {w}, height {h}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(v: f64) -> Option<StyleValue> {
        Some(StyleValue::Px(v))
    }

    #[test]
    fn auto_request_reports_keyword_or_pins_natural() {
        assert_eq!(
            resolve_length(&SizeFactor::Auto, Some(80.0), true),
            Some(StyleValue::Text("auto".into()))
        );
        assert_eq!(resolve_length(&SizeFactor::Auto, Some(80.0), false), px(80.0));
        assert_eq!(resolve_length(&SizeFactor::Unset, Some(80.0), true), None);
        assert_eq!(resolve_length(&SizeFactor::Unset, Some(80.0), false), px(80.0));
        assert_eq!(resolve_length(&SizeFactor::Unset, None, false), None);
    }

    #[test]
    fn concrete_request_bridges_while_auto() {
        assert_eq!(resolve_length(&SizeFactor::Multiplier(0.5), Some(200.0), true), px(200.0));
        assert_eq!(resolve_length(&SizeFactor::from("20px"), Some(200.0), true), px(200.0));
    }

    #[test]
    fn concrete_request_when_pinned() {
        assert_eq!(resolve_length(&SizeFactor::Multiplier(0.5), Some(200.0), false), px(100.0));
        assert_eq!(
            resolve_length(&SizeFactor::from("2em"), None, false),
            Some(StyleValue::Text("2em".into()))
        );
        assert_eq!(resolve_length(&SizeFactor::Multiplier(0.0), None, false), px(0.0));
        assert_eq!(resolve_length(&SizeFactor::Multiplier(0.3), None, false), None);
    }

    #[test]
    fn every_input_combination_has_a_defined_length() {
        let sizes = [
            SizeFactor::Multiplier(0.0),
            SizeFactor::Multiplier(1.5),
            SizeFactor::Explicit("1rem".into()),
            SizeFactor::Auto,
            SizeFactor::Unset,
        ];
        for size in &sizes {
            for natural in [None, Some(0.0), Some(42.0)] {
                for auto in [false, true] {
                    let got = resolve_length(size, natural, auto);
                    let expected = match (size, auto) {
                        (SizeFactor::Auto, true) => Some(StyleValue::Text("auto".into())),
                        (SizeFactor::Unset, true) => None,
                        // Anything else while auto bridges from the natural length.
                        (_, true) => natural.map(StyleValue::Px),
                        (SizeFactor::Auto | SizeFactor::Unset, false) => natural.map(StyleValue::Px),
                        (SizeFactor::Explicit(css), false) => Some(StyleValue::Text(css.clone())),
                        (SizeFactor::Multiplier(m), false) => match natural {
                            Some(n) => px(m * n),
                            None if *m == 0.0 => px(0.0),
                            None => None,
                        },
                    };
                    assert_eq!(got, expected, "{size:?} natural={natural:?} auto={auto}");
                }
            }
        }
    }

    #[test]
    fn unknown_natural_only_resolves_zero_multiplier() {
        assert_eq!(resolve_length(&SizeFactor::Multiplier(0.0), None, false), px(0.0));
        assert_eq!(resolve_length(&SizeFactor::Multiplier(1.5), None, false), None);
        assert_eq!(resolve_length(&SizeFactor::Multiplier(1.5), None, true), None);
        assert_eq!(resolve_length(&SizeFactor::Auto, None, false), None);
    }

    #[test]
    fn explicit_while_auto_is_the_bridge() {
        assert_eq!(resolve_length(&SizeFactor::Explicit("1rem".into()), Some(42.0), true), px(42.0));
        assert_eq!(resolve_length(&SizeFactor::Explicit("1rem".into()), None, true), None);
    }

    #[test]
    fn shorthand_joins_axes() {
        assert_eq!(transition_shorthand(None, None), "");
        assert_eq!(transition_shorthand(Some("1ms ease 0ms"), None), "width 1ms ease 0ms");
        assert_eq!(transition_shorthand(None, Some("2ms linear 5ms")), "height 2ms linear 5ms");
        assert_eq!(
            transition_shorthand(Some("1ms ease 0ms"), Some("2ms ease 0ms")),
            "width 1ms ease 0ms, height 2ms ease 0ms"
        );
    }
}
