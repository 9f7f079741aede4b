//! Animation lifecycle: contexts scoped to a component's subtree, created and
//! reverted in step with the component's render/commit/unmount cycle.
//!
//! Scoping is the caller's job. Two call sites animating overlapping or
//! unscoped targets can overwrite each other; the manager only guarantees that
//! generations of the same call site never overlap.

pub mod context;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod responsive;
#[cfg(test)]
pub(crate) mod testing;
pub mod tween;
pub mod web;

pub use context::{Cleanup, MotionScope};
pub use error::MotionError;
pub use hooks::{use_hover_motion, use_in_view, use_motion};
pub use lifecycle::MotionOptions;
pub use responsive::{use_responsive_motion, Breakpoint};
pub use tween::{Ease, Length, Props, Stagger, StaggerFrom, Tween};
pub use web::WebEngine;
