use std::collections::BTreeMap;

use animated_size_core::{Config, FactorInput, OutputStyle, SizeAnimator, StyleOverrides};
use animated_size_test_fixtures::{advance, scenarios, FakeElement, FakeHost};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Natural {
    width: f64,
    height: f64,
}

#[derive(Debug, Deserialize)]
struct Initial {
    width: FactorInput,
    height: FactorInput,
}

#[derive(Debug, Deserialize)]
struct Step {
    at: f64,
    #[serde(default)]
    width: Option<FactorInput>,
    #[serde(default)]
    height: Option<FactorInput>,
    #[serde(default)]
    style: StyleOverrides,
    expect: OutputStyle,
    #[serde(default)]
    inline: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    natural: Natural,
    initial: Initial,
    steps: Vec<Step>,
}

fn run(name: &str) {
    let scenario: Scenario = scenarios::load(name).expect("load scenario");
    let cfg = Config::default();
    let mut animator = SizeAnimator::new(
        FakeHost::new(),
        cfg.clone(),
        scenario.initial.width.resolve(&cfg),
        scenario.initial.height.resolve(&cfg),
    );
    let element = FakeElement::new(scenario.natural.width, scenario.natural.height);
    animator.attach(element.clone());

    for (i, step) in scenario.steps.into_iter().enumerate() {
        let wait = step.at - animator.host().now();
        assert!(wait >= 0.0, "{name} step {i}: steps must be in time order");
        advance(&mut animator, wait);

        if let (Some(width), Some(height)) = (step.width, step.height) {
            animator.update_input(width, height, step.style);
        }

        assert_eq!(animator.style(), &step.expect, "{name} step {i}: style");
        for (prop, want) in &step.inline {
            assert_eq!(&element.style(prop), want, "{name} step {i}: inline {prop}");
        }
    }
}

#[test]
fn all_scenarios_listed_in_manifest_run() {
    let keys = scenarios::keys();
    assert!(!keys.is_empty());
    for key in keys {
        run(&key);
    }
}

#[test]
fn half_then_auto() {
    run("half-then-auto");
}

#[test]
fn expand_from_unset() {
    run("expand-from-unset");
}

#[test]
fn instant_collapse() {
    run("instant-collapse");
}

#[test]
fn explicit_height() {
    run("explicit-height");
}

#[test]
fn unknown_scenario_is_an_error() {
    let err = scenarios::json("no-such-scenario").unwrap_err();
    assert!(err.to_string().contains("no-such-scenario"));
}
