pub mod animation;
pub mod debounce;
pub mod scheduler;

pub use animation::{AnimationDriver, FrameTick};
pub use debounce::ResizeDebouncer;
pub use scheduler::{FrameRequestId, FrameScheduler, ManualFrameScheduler};
