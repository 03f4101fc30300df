//! Runtime primitives shared by the collapsing top bar crates.
//!
//! Everything here is single-threaded: handles are `Rc`-backed and cheap to clone, and all
//! mutation goes through `Cell`/`RefCell`.

mod frame_clock;
mod mutator;
mod state;

pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock, NextFrame};
pub use mutator::{MutatePriority, MutatorGuard, MutatorMutex};
pub use state::{ListenerId, MutableState};
