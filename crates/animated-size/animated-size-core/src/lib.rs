//! Animated Size Core (host-agnostic)
//!
//! CSS cannot transition a length to or from `auto`. This crate keeps a small
//! per-axis state machine that pins an element's width/height to a concrete
//! length while a transition is in flight and releases it back to the natural
//! size once the transition completes.
//!
//! The DOM is reached only through the traits in [`host`], so the same state
//! machine runs in the browser (see `animated-size-wasm`) and under a fake
//! clock in tests.

pub mod animator;
pub mod config;
pub mod error;
pub mod factor;
pub mod host;
pub mod ids;
pub mod length;
pub mod observer;
pub mod style;
pub mod transition;

// Re-exports for consumers (adapters)
pub use animator::SizeAnimator;
pub use config::Config;
pub use error::{FactorError, StyleError};
pub use factor::{Factor, FactorInput, SizeFactor};
pub use host::{Clock, Host, Scheduler, Size, StyleElement};
pub use ids::{Axis, TimerHandle, TimerToken};
pub use length::{resolve_length, transition_shorthand};
pub use observer::SizeObserver;
pub use style::{OutputStyle, StyleOverrides, StyleProperty, StyleValue};
pub use transition::TransitionTracker;
