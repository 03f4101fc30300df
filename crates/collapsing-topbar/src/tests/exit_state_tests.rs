use super::*;

use crate::TweenSpec;
use collapsing_topbar_testing::{assert_approx_eq, FrameDriver};
use std::cell::Cell;

fn connected(collapsed_height: i32) -> CollapsingTopBarExitState {
    let state = CollapsingTopBarExitState::new(false, FrameClock::new());
    state.update_layout_info(collapsed_height);
    state
}

#[test]
fn disconnected_state_is_disabled() {
    let state = CollapsingTopBarExitState::new(false, FrameClock::new());
    assert!(!state.is_enabled());
    assert_eq!(state.exit_height(), 0.0);
    assert_eq!(state.dispatch_raw_delta(-10.0), 0.0);
    assert_eq!(state.dispatch_raw_delta(10.0), 0.0);
    assert!(!state.is_fully_exited());
    assert!(state.is_fully_entered());
}

#[test]
fn consumption_is_bounded_by_collapsed_height() {
    let state = connected(80);

    assert_eq!(state.dispatch_raw_delta(-30.0), -30.0);
    assert_eq!(state.exit_height(), 30.0);
    assert_eq!(state.dispatch_raw_delta(-100.0), -50.0);
    assert!(state.is_fully_exited());
    assert_eq!(state.dispatch_raw_delta(-1.0), 0.0);

    assert_eq!(state.dispatch_raw_delta(20.0), 20.0);
    assert_eq!(state.exit_height(), 60.0);
    assert_eq!(state.dispatch_raw_delta(100.0), 60.0);
    assert!(state.is_fully_entered());
}

#[test]
fn initially_exited_state_is_fully_exited_once_connected() {
    let state = CollapsingTopBarExitState::new(true, FrameClock::new());
    assert!(!state.is_enabled());

    state.update_layout_info(80);
    assert_eq!(state.exit_height(), 80.0);
    assert!(state.is_fully_exited());
}

#[test]
fn initially_exited_state_enters_on_first_positive_delta() {
    let state = CollapsingTopBarExitState::new(true, FrameClock::new());
    state.update_layout_info(80);

    assert_eq!(state.dispatch_raw_delta(30.0), 30.0);
    assert_eq!(state.exit_height(), 50.0);
    assert_eq!(state.save(), 50.0);
}

#[test]
fn shrinking_collapsed_height_clamps_exit_height() {
    let state = connected(80);
    state.dispatch_raw_delta(-60.0);

    state.update_layout_info(40);
    assert_eq!(state.exit_height(), 40.0);
    assert!(state.is_fully_exited());
    assert!(state.exit_height() <= state.collapsed_height());
}

#[test]
fn fully_exited_state_follows_growing_collapsed_height() {
    let state = connected(80);
    state.dispatch_raw_delta(-80.0);

    state.update_layout_info(100);
    assert_eq!(state.exit_height(), 100.0);
    assert!(state.is_fully_exited());
}

#[test]
fn partially_exited_state_keeps_height_when_range_grows() {
    let state = connected(80);
    state.dispatch_raw_delta(-30.0);

    state.update_layout_info(100);
    assert_eq!(state.exit_height(), 30.0);
}

#[test]
fn reset_disables_and_enters() {
    let state = connected(80);
    state.dispatch_raw_delta(-50.0);

    state.reset();
    assert!(!state.is_enabled());
    assert_eq!(state.exit_height(), 0.0);
    assert_eq!(state.collapsed_height(), 0.0);
}

#[test]
fn save_keeps_full_exit_independent_of_bounds() {
    let unmeasured = CollapsingTopBarExitState::new(true, FrameClock::new());
    assert_eq!(unmeasured.save(), INITIALLY_EXITED_HEIGHT);

    let entered = CollapsingTopBarExitState::new(false, FrameClock::new());
    assert_eq!(entered.save(), 0.0);

    let exited = connected(80);
    exited.dispatch_raw_delta(-80.0);
    assert_eq!(exited.save(), INITIALLY_EXITED_HEIGHT);

    let restored = CollapsingTopBarExitState::restore(exited.save(), FrameClock::new());
    restored.update_layout_info(120);
    assert!(restored.is_fully_exited());
    assert_eq!(restored.exit_height(), 120.0);
}

#[test]
fn partial_exit_survives_save_and_restore() {
    let state = connected(80);
    state.dispatch_raw_delta(-25.0);

    let restored = CollapsingTopBarExitState::restore(state.save(), FrameClock::new());
    restored.update_layout_info(80);
    assert_eq!(restored.exit_height(), 25.0);
}

#[test]
fn exit_progress_runs_from_entered_to_exited() {
    let state = connected(80);
    assert_eq!(state.exit_progress(), 1.0);

    state.dispatch_raw_delta(-20.0);
    assert_approx_eq(state.exit_progress(), 0.75, 1e-6, "progress");

    state.dispatch_raw_delta(-60.0);
    assert_eq!(state.exit_progress(), 0.0);
}

#[test]
fn snap_scope_is_empty_while_disabled() {
    let state = CollapsingTopBarExitState::new(false, FrameClock::new());
    assert!(state.snap_with_progress(false).is_none());

    state.update_layout_info(80);
    state.dispatch_raw_delta(-20.0);
    let snap = state.snap_with_progress(false).expect("enabled exit state snaps");
    assert_approx_eq(snap.progress, 0.75, 1e-6, "progress");
}

#[test]
fn listeners_observe_range_changes() {
    let state = connected(80);
    let changes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&changes);
    state.add_change_listener(move || counter.set(counter.get() + 1));

    state.update_layout_info(60);
    state.dispatch_raw_delta(-10.0);
    state.update_layout_info(60);
    assert_eq!(changes.get(), 2);
}

#[test]
fn collapse_animates_to_fully_exited() {
    let mut driver = FrameDriver::new();
    let state = CollapsingTopBarExitState::new(false, driver.clock());
    state.update_layout_info(80);

    let animated = state.clone();
    driver.spawn(async move {
        animated.collapse(TweenSpec::linear(96).into()).await;
    });
    assert!(driver.run_until_idle(30));
    assert_approx_eq(state.exit_height(), 80.0, 0.01, "exit height");

    let animated = state.clone();
    driver.spawn(async move {
        animated.expand(TweenSpec::linear(96).into()).await;
    });
    assert!(driver.run_until_idle(30));
    assert_approx_eq(state.exit_height(), 0.0, 0.01, "exit height");
}
