//! Classifies one pointer press-to-release interaction as a tap, a tip
//! (long press), a swipe in one of four directions, or a drag, publishing
//! lifecycle notifications as it unfolds.

pub mod config;
pub mod error;
pub mod pointer;
pub mod tracker;

pub use config::GestureConfig;
pub use error::{ConfigError, PointerError, SampleError};
pub use pointer::signals::{Notification, Signals, SubscriptionId};
pub use pointer::{
    Channel, Direction, Movement, Pointer, PointerId, PointerOutput, PointerState, PositionSample,
    SessionSnapshot,
};
pub use tracker::{PointerInput, PointerInputKind, PointerTracker};
