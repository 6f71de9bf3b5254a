//! Unit tests for multi-timeframe confirmation

use falcon::models::LevelConfig;
use falcon::strategies::{MultiTimeframeStrategy, Strategy};

use crate::test_utils::{analyzed, rising_closes};

fn strategy(level: f64) -> MultiTimeframeStrategy {
    MultiTimeframeStrategy::new(
        "1h".to_string(),
        "4h".to_string(),
        LevelConfig {
            supports: vec![],
            resistances: vec![level],
            tolerance: 0.01,
        },
        false,
    )
}

#[test]
fn test_requires_both_intervals() {
    assert_eq!(strategy(1.0).intervals(), vec!["1h".to_string(), "4h".to_string()]);
}

#[test]
fn test_fires_when_trends_agree() {
    let closes = rising_closes(120, 100.0, 0.1);
    let primary = analyzed("1h", &closes);
    let confirm = analyzed("4h", &rising_closes(120, 50.0, 0.5));
    let s = strategy(*closes.last().unwrap());

    let signal = s.evaluate(&[&primary, &confirm]).expect("both trends up");
    assert!(signal.reason.contains("1h and 4h"));
}

#[test]
fn test_disagreement_yields_no_signal() {
    let closes = rising_closes(120, 100.0, 0.1);
    let primary = analyzed("1h", &closes);
    let confirm = analyzed("4h", &rising_closes(120, 200.0, -0.5));
    let s = strategy(*closes.last().unwrap());

    assert!(s.evaluate(&[&primary, &confirm]).is_none());
    // and the other way round
    assert!(s.evaluate(&[&confirm, &primary]).is_none());
}

#[test]
fn test_missing_confirmation_series() {
    let primary = analyzed("1h", &rising_closes(120, 100.0, 0.1));
    assert!(strategy(111.9).evaluate(&[&primary]).is_none());
}
