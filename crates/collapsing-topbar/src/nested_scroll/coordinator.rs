use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::{HandlerList, NestedScrollHandler};
use crate::scroll::NestedScrollSource;

/// Chains handlers so each one is offered what the previous ones left.
///
/// A handler can never take more than is left: its result is clamped into the range between
/// zero and the remaining delta, so the total never exceeds `available`.
pub struct ScrollCoordinator {
    handlers: HandlerList,
}

/// Clamps `consumed` into `[0, left]` or `[left, 0]` depending on the sign of `left`.
fn clamp_to_left(consumed: f32, left: f32) -> f32 {
    if left >= 0.0 {
        consumed.clamp(0.0, left)
    } else {
        consumed.clamp(left, 0.0)
    }
}

impl ScrollCoordinator {
    pub fn new(handlers: HandlerList) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl NestedScrollHandler for ScrollCoordinator {
    fn on_pre_scroll(&self, available: f32, source: NestedScrollSource) -> f32 {
        self.handlers.iter().fold(0.0, |total, handler| {
            let left = available - total;
            total + clamp_to_left(handler.on_pre_scroll(left, source), left)
        })
    }

    fn on_post_scroll(&self, consumed: f32, available: f32, source: NestedScrollSource) -> f32 {
        self.handlers.iter().fold(0.0, |total, handler| {
            let left = available - total;
            let taken = handler.on_post_scroll(consumed + total, left, source);
            total + clamp_to_left(taken, left)
        })
    }

    fn on_pre_fling(&self, available: f32) -> LocalBoxFuture<'_, f32> {
        async move {
            let mut total = 0.0;
            for handler in &self.handlers {
                let left = available - total;
                total += clamp_to_left(handler.on_pre_fling(left).await, left);
            }
            total
        }
        .boxed_local()
    }

    fn on_post_fling(&self, consumed: f32, available: f32) -> LocalBoxFuture<'_, f32> {
        async move {
            let mut total = 0.0;
            for handler in &self.handlers {
                let left = available - total;
                let taken = handler.on_post_fling(consumed + total, left).await;
                total += clamp_to_left(taken, left);
            }
            total
        }
        .boxed_local()
    }
}
