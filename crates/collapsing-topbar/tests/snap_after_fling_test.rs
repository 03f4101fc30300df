//! Releases a drag mid-way and checks the header settles at the extreme the snap threshold
//! picks.

use std::rc::Rc;

use collapsing_topbar::*;
use collapsing_topbar_testing::{assert_approx_eq, FrameDriver, PIXEL_TOLERANCE};

fn snapping_scaffold(
    driver: &FrameDriver,
    mode: CollapsingTopBarScaffoldScrollMode,
) -> Rc<CollapsingTopBarScaffold> {
    let state = CollapsingTopBarScaffoldState::new(true, driver.clock());
    let scaffold = CollapsingTopBarScaffold::new(state, mode)
        .with_snap_behavior(ThresholdSnapBehavior::new(0.5, TweenSpec::linear(160).into()));
    scaffold.measure_top_bar(
        &[TopBarChild::new(360, 300), TopBarChild::new(360, 80)],
        Constraints::loose(360, 800),
    );
    Rc::new(scaffold)
}

/// Flings the scaffold and hands every leftover to a list that is already at its end.
fn release(driver: &mut FrameDriver, scaffold: &Rc<CollapsingTopBarScaffold>, velocity: f32) {
    let scaffold = Rc::clone(scaffold);
    driver.spawn(async move {
        let consumed = scaffold.on_pre_fling(velocity).await;
        scaffold.on_post_fling(consumed, velocity - consumed).await;
    });
    assert!(driver.run_until_idle(200));
}

#[test]
fn slow_release_below_threshold_collapses() {
    let mut driver = FrameDriver::new();
    let scaffold = snapping_scaffold(&driver, CollapsingTopBarScaffoldScrollMode::collapse(false));
    scaffold.on_pre_scroll(-150.0, NestedScrollSource::UserInput);

    release(&mut driver, &scaffold, -300.0);

    assert_approx_eq(
        scaffold.state().total_top_bar_height(),
        80.0,
        PIXEL_TOLERANCE,
        "visible height",
    );
}

#[test]
fn slow_release_above_threshold_expands() {
    let mut driver = FrameDriver::new();
    let scaffold = snapping_scaffold(&driver, CollapsingTopBarScaffoldScrollMode::collapse(false));
    scaffold.on_pre_scroll(-50.0, NestedScrollSource::UserInput);

    release(&mut driver, &scaffold, -300.0);

    assert_approx_eq(
        scaffold.state().total_top_bar_height(),
        300.0,
        PIXEL_TOLERANCE,
        "visible height",
    );
}

#[test]
fn fast_release_collapses_and_exits() {
    let mut driver = FrameDriver::new();
    let scaffold = snapping_scaffold(
        &driver,
        CollapsingTopBarScaffoldScrollMode::collapse_and_exit(true),
    );

    release(&mut driver, &scaffold, -6000.0);

    assert_approx_eq(
        scaffold.state().total_top_bar_height(),
        0.0,
        PIXEL_TOLERANCE,
        "visible height",
    );
    assert!(scaffold.state().exit_state().is_fully_exited());
}

#[test]
fn snap_without_exit_skips_the_exit_axis() {
    let mut driver = FrameDriver::new();
    let scaffold = snapping_scaffold(
        &driver,
        CollapsingTopBarScaffoldScrollMode::collapse_and_exit(false),
    );
    scaffold.on_pre_scroll(-250.0, NestedScrollSource::UserInput);
    assert_eq!(scaffold.state().exit_state().exit_height(), 30.0);

    release(&mut driver, &scaffold, -200.0);

    let state = scaffold.state();
    assert!(state.top_bar_state().is_collapsed());
    let exit = state.exit_state().exit_height();
    assert!(
        exit < PIXEL_TOLERANCE || (exit - 80.0).abs() < PIXEL_TOLERANCE,
        "exit axis settled at {exit}"
    );
}

#[test]
fn nothing_snaps_without_a_snap_behavior() {
    let mut driver = FrameDriver::new();
    let state = CollapsingTopBarScaffoldState::new(true, driver.clock());
    let scaffold = Rc::new(CollapsingTopBarScaffold::new(
        state,
        CollapsingTopBarScaffoldScrollMode::collapse(false),
    ));
    scaffold.measure_top_bar(
        &[TopBarChild::new(360, 300), TopBarChild::new(360, 80)],
        Constraints::loose(360, 800),
    );
    scaffold.on_pre_scroll(-150.0, NestedScrollSource::UserInput);

    release(&mut driver, &scaffold, 0.0);

    assert_eq!(scaffold.state().total_top_bar_height(), 150.0);
}
