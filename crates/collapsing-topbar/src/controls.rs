use collapsing_topbar_animation::{animate, AnimationEnd, AnimationSpec};
use collapsing_topbar_core::FrameClock;
use futures::future::LocalBoxFuture;

use crate::scroll::ScrollBy;

/// Programmatic expand and collapse.
///
/// Both run inside a freshly acquired scroll scope and end early, keeping the progress made,
/// when a competing scroll takes over.
pub trait CollapsingTopBarControls {
    fn expand(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()>;

    fn collapse(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()>;
}

/// Animates from `current_height` to `target_height` by feeding each frame's increment into
/// `scope`.
pub async fn animate_height_to(
    scope: &mut dyn ScrollBy,
    clock: &FrameClock,
    current_height: f32,
    target_height: f32,
    spec: AnimationSpec,
) -> AnimationEnd {
    if current_height == target_height {
        return AnimationEnd::Finished;
    }

    let mut previous = current_height;
    animate(clock, current_height, target_height, spec, |value| {
        if !scope.is_active() {
            return false;
        }
        scope.scroll_by(value - previous);
        previous = value;
        true
    })
    .await
}
