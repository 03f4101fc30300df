use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::NestedScrollHandler;
use crate::snap::{CollapsingTopBarSnapBehavior, CollapsingTopBarSnapScope};

/// Snaps once a fling has been fully consumed.
pub struct SnapHandler {
    snap_behavior: Rc<dyn CollapsingTopBarSnapBehavior>,
    snap_scope: Box<dyn CollapsingTopBarSnapScope>,
}

impl SnapHandler {
    pub fn new(
        snap_behavior: Rc<dyn CollapsingTopBarSnapBehavior>,
        snap_scope: Box<dyn CollapsingTopBarSnapScope>,
    ) -> Self {
        Self {
            snap_behavior,
            snap_scope,
        }
    }
}

impl NestedScrollHandler for SnapHandler {
    fn on_post_fling(&self, consumed: f32, available: f32) -> LocalBoxFuture<'_, f32> {
        async move {
            if available != 0.0 {
                return 0.0;
            }
            let was_moving_up = consumed < 0.0;
            self.snap_behavior
                .snap(self.snap_scope.as_ref(), was_moving_up)
                .await;
            0.0
        }
        .boxed_local()
    }
}
