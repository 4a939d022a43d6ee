//! Smooth transitions of the track's scroll offset
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (cubic, quintic, exponential, in-out)
//! - `timing` - Time calculation utilities (progress, interpolation)
//!
//! ## L3 Molecular Layer
//! - `scheduler` - Frame-driven transition scheduler combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use whirligig_core::animation::{AnimationScheduler, Tween};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let id = scheduler.animate(&mut host, tween, Instant::now());
//!
//! // In the main loop, advance each frame and collect settled transitions
//! for completion in scheduler.advance(&mut host, Instant::now()) {
//!     // exactly one completion per started transition
//! }
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod scheduler;

pub use easing::{Easing, EasingType, EasingTypeExt};
pub use scheduler::{AnimationScheduler, Completion, TransitionId, Tween};
