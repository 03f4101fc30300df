use super::*;

use crate::TweenSpec;
use collapsing_topbar_testing::{assert_approx_eq, FrameDriver, PIXEL_TOLERANCE};

fn connected(clock: FrameClock, is_expanded: bool) -> CollapsingTopBarScaffoldState {
    let state = CollapsingTopBarScaffoldState::new(is_expanded, clock);
    state.top_bar_state().apply_measure_result(80, 300);
    state.exit_state().update_layout_info(80);
    state
}

fn spawn_collapse(driver: &mut FrameDriver, state: &CollapsingTopBarScaffoldState) {
    let animated = state.clone();
    driver.spawn(async move {
        animated.collapse(TweenSpec::linear(160).into()).await;
    });
}

fn spawn_expand(driver: &mut FrameDriver, state: &CollapsingTopBarScaffoldState) {
    let animated = state.clone();
    driver.spawn(async move {
        animated.expand(TweenSpec::linear(160).into()).await;
    });
}

#[test]
fn new_state_starts_at_requested_extreme() {
    let expanded = connected(FrameClock::new(), true);
    assert!(expanded.is_expanded());
    assert_eq!(expanded.total_top_bar_height(), 300.0);

    let collapsed = connected(FrameClock::new(), false);
    assert!(collapsed.is_collapsed());
    assert!(collapsed.exit_state().is_fully_exited());
    assert_eq!(collapsed.total_top_bar_height(), 0.0);
}

#[test]
fn collapse_shrinks_top_bar_before_exiting() {
    let mut driver = FrameDriver::new();
    let state = connected(driver.clock(), true);
    spawn_collapse(&mut driver, &state);
    assert!(state.top_bar_state().is_scroll_in_progress());
    assert!(state.exit_state().is_scroll_in_progress());

    for _ in 0..20 {
        driver.advance_frame();
        let height = state.top_bar_state().layout_info().height;
        let exit = state.exit_state().exit_height();
        if exit > 0.0 {
            assert_approx_eq(height, 80.0, PIXEL_TOLERANCE, "top bar exits only once collapsed");
        }
    }

    assert!(driver.run_until_idle(10));
    assert_approx_eq(state.total_top_bar_height(), 0.0, PIXEL_TOLERANCE, "total height");
    assert_approx_eq(state.exit_state().exit_height(), 80.0, PIXEL_TOLERANCE, "exit height");
    assert!(!state.exit_state().is_scroll_in_progress());
}

#[test]
fn expand_enters_before_growing() {
    let mut driver = FrameDriver::new();
    let state = connected(driver.clock(), false);
    spawn_expand(&mut driver, &state);

    for _ in 0..20 {
        driver.advance_frame();
        let height = state.top_bar_state().layout_info().height;
        if height > 80.0 + PIXEL_TOLERANCE {
            assert_approx_eq(state.exit_state().exit_height(), 0.0, PIXEL_TOLERANCE, "exit height");
        }
    }

    assert!(driver.run_until_idle(10));
    assert_approx_eq(state.total_top_bar_height(), 300.0, PIXEL_TOLERANCE, "total height");
}

#[test]
fn collapse_without_exit_stops_at_collapsed_height() {
    let mut driver = FrameDriver::new();
    let state = CollapsingTopBarScaffoldState::new(true, driver.clock());
    state.top_bar_state().apply_measure_result(80, 300);
    spawn_collapse(&mut driver, &state);

    assert!(driver.run_until_idle(30));
    assert_approx_eq(state.total_top_bar_height(), 80.0, PIXEL_TOLERANCE, "total height");
    assert!(state.is_collapsed());
}

#[test]
fn busy_exit_state_refuses_animation() {
    let mut driver = FrameDriver::new();
    let state = connected(driver.clock(), true);
    let _drag = state.exit_state().begin_scroll(MutatePriority::PreventUserInput);
    spawn_collapse(&mut driver, &state);

    assert!(driver.run_until_idle(30));
    assert_eq!(state.total_top_bar_height(), 300.0);
    assert!(!state.top_bar_state().is_scroll_in_progress());
}

#[test]
fn snap_progress_is_total_over_expanded_height() {
    let state = connected(FrameClock::new(), true);
    state.top_bar_state().dispatch_raw_delta(-110.0);

    let snap = state.snap_with_progress(true).expect("scaffold always snaps");
    assert_approx_eq(snap.progress, 190.0 / 300.0, 1e-6, "progress");

    state.top_bar_state().dispatch_raw_delta(-110.0);
    state.exit_state().dispatch_raw_delta(-40.0);
    let snap = state.snap_with_progress(false).expect("scaffold always snaps");
    assert_approx_eq(snap.progress, 40.0 / 300.0, 1e-6, "progress");
}

#[test]
fn zero_expanded_height_reports_full_progress() {
    let state = CollapsingTopBarScaffoldState::new(true, FrameClock::new());
    state.top_bar_state().apply_measure_result(0, 0);

    let snap = state.snap_with_progress(false).expect("scaffold always snaps");
    assert_eq!(snap.progress, 1.0);
}

#[test]
fn saved_state_restores_both_axes() {
    let state = connected(FrameClock::new(), true);
    state.top_bar_state().dispatch_raw_delta(-220.0);
    state.exit_state().dispatch_raw_delta(-30.0);

    let saved = state.save();
    assert_eq!(
        saved,
        SavedScaffoldState {
            top_bar_height: 80.0,
            exit_height: 30.0,
        }
    );

    let restored = connected_restore(saved);
    assert_eq!(restored.total_top_bar_height(), 50.0);
}

fn connected_restore(saved: SavedScaffoldState) -> CollapsingTopBarScaffoldState {
    let state = CollapsingTopBarScaffoldState::restore(saved, FrameClock::new());
    state.top_bar_state().apply_measure_result(80, 300);
    state.exit_state().update_layout_info(80);
    state
}
