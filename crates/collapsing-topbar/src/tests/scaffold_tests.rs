use super::*;

use std::cell::Cell;

use crate::scroll::ScrollableState;
use crate::snap::CollapsingTopBarSnapScope;
use collapsing_topbar_core::FrameClock;
use futures::executor::block_on;

const DRAG: NestedScrollSource = NestedScrollSource::UserInput;

fn header() -> [TopBarChild; 2] {
    [TopBarChild::new(360, 300), TopBarChild::new(360, 80)]
}

fn scaffold(mode: CollapsingTopBarScaffoldScrollMode) -> CollapsingTopBarScaffold {
    let state = CollapsingTopBarScaffoldState::new(true, FrameClock::new());
    let scaffold = CollapsingTopBarScaffold::new(state, mode);
    scaffold.measure_top_bar(&header(), Constraints::loose(400, 800));
    scaffold
}

/// Counts snap requests.
#[derive(Clone, Default)]
struct CountingSnap {
    snaps: Rc<Cell<usize>>,
}

impl CollapsingTopBarSnapBehavior for CountingSnap {
    fn snap<'a>(
        &'a self,
        _scope: &'a dyn CollapsingTopBarSnapScope,
        _was_moving_up: bool,
    ) -> LocalBoxFuture<'a, ()> {
        self.snaps.set(self.snaps.get() + 1);
        future::ready(()).boxed_local()
    }
}

#[test]
fn collapse_mode_keeps_exit_axis_disabled() {
    let state = CollapsingTopBarScaffoldState::new(false, FrameClock::new());
    let scaffold =
        CollapsingTopBarScaffold::new(state, CollapsingTopBarScaffoldScrollMode::collapse(false));
    scaffold.measure_top_bar(&header(), Constraints::loose(400, 800));

    assert!(!scaffold.state().exit_state().is_enabled());
    assert_eq!(scaffold.state().total_top_bar_height(), 80.0);
}

#[test]
fn exit_mode_connects_exit_axis() {
    let scaffold = scaffold(CollapsingTopBarScaffoldScrollMode::collapse_and_exit(false));
    assert!(scaffold.state().exit_state().is_enabled());
    assert_eq!(scaffold.state().exit_state().collapsed_height(), 80.0);
}

#[test]
fn bodies_lose_collapsed_height_without_exit() {
    let constraints = Constraints::loose(400, 800);

    let collapse = scaffold(CollapsingTopBarScaffoldScrollMode::collapse(false));
    assert_eq!(collapse.body_constraints(constraints).max_height, 720);

    let exit = scaffold(CollapsingTopBarScaffoldScrollMode::collapse_and_exit(false));
    assert_eq!(exit.body_constraints(constraints).max_height, 800);

    let unbounded = collapse.body_constraints(Constraints::unbounded());
    assert!(!unbounded.has_bounded_height());
}

#[test]
fn layout_offsets_body_by_visible_top_bar() {
    let scaffold = scaffold(CollapsingTopBarScaffoldScrollMode::collapse(false));
    let constraints = Constraints::loose(400, 800);
    let top_bar = scaffold.measure_top_bar(&header(), constraints);
    scaffold.on_pre_scroll(-100.0, DRAG);

    let layout = scaffold.layout(
        constraints,
        &top_bar,
        &[BodySize {
            width: 400,
            height: 2000,
        }],
    );
    assert_eq!(
        layout,
        ScaffoldLayout {
            width: 400,
            height: 800,
            top_bar_y: 0,
            body_y: 200,
        }
    );
}

#[test]
fn layout_moves_exiting_top_bar_off_screen() {
    let scaffold = scaffold(CollapsingTopBarScaffoldScrollMode::collapse_and_exit(false));
    let constraints = Constraints::loose(400, 800);
    let top_bar = scaffold.measure_top_bar(&header(), constraints);
    assert_eq!(scaffold.on_pre_scroll(-260.0, DRAG), -260.0);

    let layout = scaffold.layout(constraints, &top_bar, &[BodySize::default()]);
    assert_eq!(layout.top_bar_y, -40);
    assert_eq!(layout.body_y, 40);
    assert_eq!(layout.height, 0);
}

#[test]
fn leaving_exit_mode_resets_exit_axis() {
    let mut scaffold = scaffold(CollapsingTopBarScaffoldScrollMode::collapse_and_exit(false));
    scaffold.on_pre_scroll(-260.0, DRAG);
    assert_eq!(scaffold.state().exit_state().exit_height(), 40.0);

    scaffold.set_scroll_mode(CollapsingTopBarScaffoldScrollMode::collapse(false));
    assert!(!scaffold.state().exit_state().is_enabled());
    assert_eq!(scaffold.state().total_top_bar_height(), 80.0);
    assert_eq!(scaffold.on_pre_scroll(-50.0, DRAG), 0.0);
}

#[test]
fn disabled_scaffold_consumes_nothing() {
    let mut scaffold = scaffold(CollapsingTopBarScaffoldScrollMode::collapse(true)).enabled(false);
    assert!(!scaffold.is_enabled());

    assert_eq!(scaffold.on_pre_scroll(-50.0, DRAG), 0.0);
    assert_eq!(scaffold.on_post_scroll(0.0, 50.0, DRAG), 0.0);
    assert_eq!(block_on(scaffold.on_pre_fling(-2000.0)), 0.0);
    assert_eq!(block_on(scaffold.on_post_fling(-2000.0, 0.0)), 0.0);
    assert_eq!(scaffold.state().total_top_bar_height(), 300.0);

    scaffold.set_enabled(true);
    assert_eq!(scaffold.on_pre_scroll(-50.0, DRAG), -50.0);
}

#[test]
fn snap_behavior_runs_after_consumed_fling() {
    let snap = CountingSnap::default();
    let scaffold = scaffold(CollapsingTopBarScaffoldScrollMode::collapse(false))
        .with_snap_behavior(snap.clone());

    block_on(scaffold.on_post_fling(-800.0, 0.0));
    assert_eq!(snap.snaps.get(), 1);

    block_on(scaffold.on_post_fling(-800.0, -50.0));
    assert_eq!(snap.snaps.get(), 1);
}

#[test]
fn scroll_is_refused_while_top_bar_is_held() {
    let scaffold = scaffold(CollapsingTopBarScaffoldScrollMode::collapse(false));
    let _held = scaffold
        .state()
        .top_bar_state()
        .begin_scroll(collapsing_topbar_core::MutatePriority::PreventUserInput);

    assert_eq!(scaffold.on_pre_scroll(-50.0, DRAG), 0.0);
}
