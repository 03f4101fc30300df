/// Receives collapse progress during placement.
///
/// `total_progress` is the progress of the whole top bar (or column), `item_progress` that
/// of the child carrying the listener. Both run from `0` (collapsed) to `1` (expanded).
pub trait ProgressListener {
    fn on_progress_update(&self, total_progress: f32, item_progress: f32);
}

impl<F> ProgressListener for F
where
    F: Fn(f32, f32),
{
    fn on_progress_update(&self, total_progress: f32, item_progress: f32) {
        self(total_progress, item_progress)
    }
}
