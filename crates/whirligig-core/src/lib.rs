pub mod animation;
pub mod config;
pub mod correction;
pub mod error;
pub mod geometry;
pub mod host;
pub mod index;
pub mod obscured;
pub mod signal;
pub mod track;

pub use animation::{Easing, EasingType, TransitionId};
pub use config::{AppConfig, CarouselConfig, DemoConfig};
pub use error::{Error, Result};
pub use geometry::{SlideGeometry, Viewport};
pub use host::{HeadlessHost, Host, Overflow, SubscriptionId};
pub use obscured::{EdgeObscuration, ObscurationAnalyzer};
pub use signal::{InteractionSignal, SignalKind, SwipeDirection};
pub use track::{NavigationState, SlideOptions, Track, TrackEvent};
