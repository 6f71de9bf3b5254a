//! Unit tests for KDJ strategies

use falcon::models::SignalDirection;
use falcon::strategies::{KdjMode, KdjStrategy, Strategy};

use crate::test_utils::{from_snapshots, kdj_snapshot};

fn cross() -> KdjStrategy {
    KdjStrategy::new("1h".to_string(), KdjMode::Crossover)
}

fn state() -> KdjStrategy {
    KdjStrategy::new("1h".to_string(), KdjMode::Continuous)
}

#[test]
fn test_crossover_buy_on_transition() {
    let series = from_snapshots(
        "1h",
        vec![kdj_snapshot(30.0, 40.0, 10.0), kdj_snapshot(60.0, 50.0, 80.0)],
    );
    let signal = cross().evaluate(&[&series]).unwrap();
    assert_eq!(signal.direction, SignalDirection::Buy);
}

#[test]
fn test_crossover_sell_on_mirrored_transition() {
    let series = from_snapshots(
        "1h",
        vec![kdj_snapshot(60.0, 50.0, 80.0), kdj_snapshot(30.0, 40.0, 10.0)],
    );
    let signal = cross().evaluate(&[&series]).unwrap();
    assert_eq!(signal.direction, SignalDirection::Sell);
}

#[test]
fn test_no_transition_only_state_fires() {
    let series = from_snapshots(
        "1h",
        vec![kdj_snapshot(60.0, 50.0, 80.0), kdj_snapshot(65.0, 55.0, 85.0)],
    );
    assert!(cross().evaluate(&[&series]).is_none());

    let signal = state().evaluate(&[&series]).unwrap();
    assert_eq!(signal.direction, SignalDirection::Buy);
}

#[test]
fn test_between_lines_is_quiet() {
    let series = from_snapshots(
        "1h",
        vec![kdj_snapshot(30.0, 40.0, 10.0), kdj_snapshot(60.0, 50.0, 55.0)],
    );
    assert!(cross().evaluate(&[&series]).is_none());
    assert!(state().evaluate(&[&series]).is_none());
}

#[test]
fn test_names_and_requirements() {
    assert_eq!(cross().name(), "kdj_cross");
    assert_eq!(cross().snapshots_required(), 2);
    assert_eq!(state().name(), "kdj_state");
    assert_eq!(state().snapshots_required(), 1);
}
