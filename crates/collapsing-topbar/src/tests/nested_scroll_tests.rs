use super::*;

use std::cell::{Cell, RefCell};

use crate::fling::DecayFlingBehavior;
use crate::scroll::ScrollableState;
use crate::snap::{CollapsingTopBarSnapScope, NoSnapBehavior};
use crate::CollapsingTopBarState;
use collapsing_topbar_core::{FrameClock, MutatePriority};
use collapsing_topbar_testing::FrameDriver;
use futures::executor::block_on;

const DRAG: NestedScrollSource = NestedScrollSource::UserInput;

fn expanded_bar(clock: FrameClock) -> CollapsingTopBarState {
    let state = CollapsingTopBarState::new(true, clock);
    state.apply_measure_result(80, 300);
    state
}

fn fling_behavior(clock: FrameClock) -> Rc<dyn FlingBehavior> {
    Rc::new(DecayFlingBehavior::new(clock))
}

/// Claims a fixed amount in every phase, whatever it is offered.
struct Greedy(f32);

impl NestedScrollHandler for Greedy {
    fn on_pre_scroll(&self, _available: f32, _source: NestedScrollSource) -> f32 {
        self.0
    }

    fn on_post_scroll(&self, _consumed: f32, _available: f32, _source: NestedScrollSource) -> f32 {
        self.0
    }

    fn on_pre_fling(&self, _available: f32) -> LocalBoxFuture<'_, f32> {
        future::ready(self.0).boxed_local()
    }
}

/// Records the `(consumed, available)` pairs of the post phases and takes `take`.
struct Recorder {
    calls: Rc<RefCell<Vec<(f32, f32)>>>,
    take: f32,
}

impl NestedScrollHandler for Recorder {
    fn on_post_scroll(&self, consumed: f32, available: f32, _source: NestedScrollSource) -> f32 {
        self.calls.borrow_mut().push((consumed, available));
        self.take
    }

    fn on_post_fling(&self, consumed: f32, available: f32) -> LocalBoxFuture<'_, f32> {
        self.calls.borrow_mut().push((consumed, available));
        future::ready(self.take).boxed_local()
    }
}

/// Counts snap requests and remembers the last direction.
#[derive(Default)]
struct RecordingSnap {
    snaps: Cell<usize>,
    last_moving_up: Cell<Option<bool>>,
}

impl CollapsingTopBarSnapBehavior for RecordingSnap {
    fn snap<'a>(
        &'a self,
        _scope: &'a dyn CollapsingTopBarSnapScope,
        was_moving_up: bool,
    ) -> LocalBoxFuture<'a, ()> {
        self.snaps.set(self.snaps.get() + 1);
        self.last_moving_up.set(Some(was_moving_up));
        future::ready(()).boxed_local()
    }
}

#[test]
fn collapse_handler_takes_only_upward_deltas() {
    let clock = FrameClock::new();
    let state = expanded_bar(clock.clone());
    let handler = CollapseHandler::new(state.clone(), fling_behavior(clock));

    assert_eq!(handler.on_pre_scroll(40.0, DRAG), 0.0);
    assert_eq!(handler.on_pre_scroll(-40.0, DRAG), -40.0);
    assert_eq!(handler.on_pre_scroll(-400.0, DRAG), -180.0);
    assert!(state.is_collapsed());
    assert_eq!(handler.on_post_scroll(0.0, -10.0, DRAG), 0.0);
}

#[test]
fn expand_always_handler_works_before_content() {
    let clock = FrameClock::new();
    let state = expanded_bar(clock.clone());
    state.dispatch_raw_delta(-220.0);
    let handler = ExpandHandler::new(state.clone(), fling_behavior(clock), ExpandMode::Always);

    assert_eq!(handler.on_pre_scroll(-10.0, DRAG), 0.0);
    assert_eq!(handler.on_pre_scroll(30.0, DRAG), 30.0);
    assert_eq!(handler.on_post_scroll(0.0, 30.0, DRAG), 0.0);
    assert_eq!(state.layout_info().height, 110.0);
}

#[test]
fn expand_at_top_handler_only_takes_leftovers() {
    let clock = FrameClock::new();
    let state = expanded_bar(clock.clone());
    state.dispatch_raw_delta(-220.0);
    let handler = ExpandHandler::new(state.clone(), fling_behavior(clock), ExpandMode::AtTop);

    assert_eq!(handler.mode(), ExpandMode::AtTop);
    assert_eq!(handler.on_pre_scroll(30.0, DRAG), 0.0);
    assert_eq!(handler.on_post_scroll(-5.0, 30.0, DRAG), 30.0);
    assert_eq!(state.layout_info().height, 110.0);
}

#[test]
fn expand_mode_follows_flag() {
    assert_eq!(ExpandMode::from_expand_always(true), ExpandMode::Always);
    assert_eq!(ExpandMode::from_expand_always(false), ExpandMode::AtTop);
}

#[test]
fn handlers_respect_busy_states() {
    let clock = FrameClock::new();
    let state = expanded_bar(clock.clone());
    let handler = CollapseHandler::new(state.clone(), fling_behavior(clock));
    let _held = state.begin_scroll(MutatePriority::PreventUserInput);

    assert_eq!(handler.on_pre_scroll(-40.0, DRAG), 0.0);
    assert_eq!(state.layout_info().height, 300.0);
}

#[test]
fn coordinator_never_consumes_more_than_available() {
    let handlers: HandlerList = smallvec::smallvec![
        Box::new(Greedy(-100.0)) as Box<dyn NestedScrollHandler>,
        Box::new(Greedy(-100.0)) as Box<dyn NestedScrollHandler>,
    ];
    let coordinator = ScrollCoordinator::new(handlers);
    assert_eq!(coordinator.len(), 2);

    assert_eq!(coordinator.on_pre_scroll(-150.0, DRAG), -150.0);
    assert_eq!(coordinator.on_post_scroll(0.0, -50.0, DRAG), -50.0);
    assert_eq!(block_on(coordinator.on_pre_fling(-120.0)), -120.0);
}

#[test]
fn coordinator_discards_wrong_sign_consumption() {
    let mut handlers = HandlerList::new();
    handlers.push(Box::new(Greedy(20.0)));
    let coordinator = ScrollCoordinator::new(handlers);

    assert_eq!(coordinator.on_pre_scroll(-10.0, DRAG), 0.0);
    assert_eq!(coordinator.on_pre_scroll(10.0, DRAG), 10.0);
}

#[test]
fn coordinator_reports_running_consumption_to_post_phases() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let handlers: HandlerList = smallvec::smallvec![
        Box::new(Recorder {
            calls: Rc::clone(&calls),
            take: 15.0,
        }) as Box<dyn NestedScrollHandler>,
        Box::new(Recorder {
            calls: Rc::clone(&calls),
            take: 10.0,
        }) as Box<dyn NestedScrollHandler>,
    ];
    let coordinator = ScrollCoordinator::new(handlers);

    assert_eq!(coordinator.on_post_scroll(5.0, 40.0, DRAG), 25.0);
    assert_eq!(*calls.borrow(), vec![(5.0, 40.0), (20.0, 25.0)]);

    calls.borrow_mut().clear();
    assert_eq!(block_on(coordinator.on_post_fling(100.0, 20.0)), 20.0);
    assert_eq!(*calls.borrow(), vec![(100.0, 20.0), (115.0, 5.0)]);
}

#[test]
fn empty_coordinator_consumes_nothing() {
    let coordinator = ScrollCoordinator::new(HandlerList::new());
    assert!(coordinator.is_empty());
    assert_eq!(coordinator.on_pre_scroll(-10.0, DRAG), 0.0);
}

#[test]
fn snap_handler_snaps_only_after_fully_consumed_fling() {
    let state = expanded_bar(FrameClock::new());
    let snap = Rc::new(RecordingSnap::default());
    let handler = SnapHandler::new(snap.clone(), Box::new(state));

    assert_eq!(block_on(handler.on_post_fling(-300.0, -40.0)), 0.0);
    assert_eq!(snap.snaps.get(), 0);

    assert_eq!(block_on(handler.on_post_fling(-300.0, 0.0)), 0.0);
    assert_eq!(snap.snaps.get(), 1);
    assert_eq!(snap.last_moving_up.get(), Some(true));

    block_on(handler.on_post_fling(250.0, 0.0));
    assert_eq!(snap.last_moving_up.get(), Some(false));
}

#[test]
fn snap_handler_ignores_scroll_phases() {
    let state = expanded_bar(FrameClock::new());
    let handler = SnapHandler::new(Rc::new(NoSnapBehavior), Box::new(state));
    assert_eq!(handler.on_pre_scroll(-10.0, DRAG), 0.0);
    assert_eq!(handler.on_post_scroll(0.0, -10.0, DRAG), 0.0);
}

#[test]
fn collapse_handler_flings_up_to_collapsed_height() {
    let mut driver = FrameDriver::new();
    let state = expanded_bar(driver.clock());
    let handler = CollapseHandler::new(state.clone(), fling_behavior(driver.clock()));
    let consumed = Rc::new(Cell::new(f32::NAN));

    let result = Rc::clone(&consumed);
    driver.spawn(async move {
        result.set(handler.on_pre_fling(-5000.0).await);
        assert_eq!(handler.on_pre_fling(5000.0).await, 0.0);
    });
    assert!(driver.run_until_idle(100));

    assert!(state.is_collapsed());
    assert!(consumed.get() < 0.0);
    assert!(consumed.get() > -5000.0);
}
