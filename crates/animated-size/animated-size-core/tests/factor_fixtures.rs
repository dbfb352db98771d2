use animated_size_core::{Config, FactorInput, SizeFactor};
use animated_size_test_fixtures::factors;

#[test]
fn every_factor_fixture_decodes() {
    for key in factors::keys() {
        let json = factors::json(&key).expect("read factor fixture");
        FactorInput::from_json(&json).unwrap_or_else(|e| panic!("{key}: {e}"));
    }
}

#[test]
fn defaults_fill_empty_object() {
    let json = factors::json("defaults-only").unwrap();
    let f = FactorInput::from_json(&json).unwrap().resolve(&Config::default());
    assert_eq!(f.size, SizeFactor::Unset);
    assert_eq!((f.duration_ms, f.delay_ms, f.curve.as_str()), (350, 0, "ease"));
}

#[test]
fn custom_config_defaults_apply() {
    let cfg = Config {
        default_duration_ms: 90,
        default_delay_ms: 10,
        default_curve: "linear".into(),
    };
    let json = factors::json("explicit-em").unwrap();
    let f = FactorInput::from_json(&json).unwrap().resolve(&cfg);
    assert_eq!(f.size, SizeFactor::Explicit("2em".into()));
    assert_eq!(f.duration_ms, 0);
    assert_eq!(f.delay_ms, 10);
    assert_eq!(f.curve, "linear");
    assert_eq!(f.total_ms(), 10);

    let json = factors::json("slow-linear").unwrap();
    let f = FactorInput::from_json(&json).unwrap().resolve(&cfg);
    assert_eq!(f.size, SizeFactor::Multiplier(1.0));
    assert_eq!(f.total_ms(), 1300);
}
