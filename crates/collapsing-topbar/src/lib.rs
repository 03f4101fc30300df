//! Collapsing top bar.
//!
//! A header that shrinks while the content below it scrolls, can optionally move off screen
//! entirely, snaps to an extreme after a fling and can be expanded or collapsed
//! programmatically without fighting live gestures.
//!
//! The building blocks, leaves first:
//!
//! - [`CollapsingTopBarState`]: collapse axis, the header height between its measured bounds.
//! - [`CollapsingTopBarExitState`]: exit axis layered on the collapsed height.
//! - [`nested_scroll`]: handlers that feed nested scroll and fling deltas into the axes, and
//!   the [`ScrollCoordinator`] chaining them.
//! - [`snap`]: post-fling settling.
//! - [`CollapsingTopBarScaffoldState`] and [`CollapsingTopBarScaffold`]: both axes driven as
//!   one, plus header and body layout.
//! - [`CollapsingTopBar`] and [`CollapsingTopBarColumn`]: header measurement and staggered
//!   child placement.
//!
//! Everything is single-threaded. Animations and flings are futures that await frames of a
//! [`FrameClock`] which the host drains once per frame.

pub mod column;
pub mod controls;
pub mod defaults;
pub mod exit_state;
pub mod fling;
pub mod layout;
pub mod layout_info;
pub mod nested_collapse;
pub mod nested_scroll;
pub mod progress;
pub mod scaffold;
pub mod scroll;
pub mod snap;
pub mod state;
pub mod top_bar;

pub use collapsing_topbar_animation::{AnimationSpec, Easing, SpringSpec, TweenSpec};
pub use collapsing_topbar_core::{FrameClock, MutatePriority};

pub use column::{
    place_column, CollapseDirection, CollapsingTopBarColumn, ColumnChild, ColumnItem,
    ColumnItemPlacement, ColumnMeasureResult, ColumnParentData, ColumnPlacementResult,
};
pub use controls::CollapsingTopBarControls;
pub use exit_state::CollapsingTopBarExitState;
pub use fling::{DecayFlingBehavior, FlingBehavior};
pub use layout::{Constraints, Placement};
pub use layout_info::CollapsingTopBarLayoutInfo;
pub use nested_collapse::{NestedCollapseElement, NestedCollapseState};
pub use nested_scroll::{
    CollapseHandler, ExpandHandler, ExpandMode, NestedScrollHandler, NestedScrollStrategy,
    ScrollCoordinator, SnapHandler,
};
pub use progress::ProgressListener;
pub use scaffold::{
    BodySize, CollapsingTopBarScaffold, CollapsingTopBarScaffoldScrollMode,
    CollapsingTopBarScaffoldState, SavedScaffoldState, ScaffoldLayout,
};
pub use scroll::{
    MergedScrollScope, NestedScrollSource, ScrollBy, ScrollScope, ScrollableState,
};
pub use snap::{
    CollapsingTopBarSnapBehavior, CollapsingTopBarSnapScope, NoSnapBehavior, SnapProgress,
    SnapTarget, ThresholdSnapBehavior,
};
pub use state::CollapsingTopBarState;
pub use top_bar::{
    CollapsingTopBar, DependentStateUpdate, TopBarChild, TopBarMeasureResult, TopBarParentData,
};
