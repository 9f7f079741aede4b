//! Capability interface between the lifecycle manager and whatever actually
//! moves pixels. The manager never talks to the DOM directly; it only creates,
//! fills and reverts contexts through this trait, which keeps it testable with
//! a recording double.

use super::error::MotionResult;
use super::tween::{Props, Tween};

/// Manual control over every animation a context owns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Playback {
    Play,
    Pause,
    Reverse,
    Restart,
    /// Jump to a time in seconds.
    Seek(f64),
}

/// Where an activation's selector lookups may reach.
#[derive(Clone, Debug, PartialEq)]
pub enum Scope<S> {
    /// Unscoped: lookups run against the whole document. Callers opting out of
    /// scoping must keep their selectors from colliding with other call sites.
    Document,
    Element(S),
    /// A scope reference that does not point at a live element.
    Detached,
}

impl<S> Scope<S> {
    pub fn from_option(element: Option<S>) -> Self {
        element.map(Scope::Element).unwrap_or(Scope::Detached)
    }
}

pub trait AnimationEngine {
    type Target: Clone;
    type Scope: Clone;
    /// Everything created while one activation was current.
    type Context;

    /// False when there is no document to animate (server-side, detached runtime).
    fn is_available(&self) -> bool;

    fn prefers_reduced_motion(&self) -> bool;

    fn create_context(&self, scope: Option<Self::Scope>) -> Self::Context;

    /// Kills every animation of the context and undoes its inline writes.
    fn revert(&self, context: Self::Context);

    /// Ordered matches of `query` inside the context's scope, or the whole
    /// document for an unscoped context.
    fn select(&self, context: &Self::Context, query: &str) -> Vec<Self::Target>;

    fn animate(
        &self,
        context: &mut Self::Context,
        targets: &[Self::Target],
        tween: &Tween,
    ) -> MotionResult<()>;

    /// Applies properties immediately, without a tween.
    fn set(
        &self,
        context: &mut Self::Context,
        targets: &[Self::Target],
        props: &Props,
    ) -> MotionResult<()>;

    /// Stops and forgets the context's animations on `targets`. Inline writes
    /// made through `set` stay recorded for revert.
    fn cancel(&self, context: &mut Self::Context, targets: &[Self::Target]);

    fn control(&self, context: &mut Self::Context, playback: Playback);
}
