use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::engine::{AnimationEngine, Playback};
use super::error::MotionResult;
use super::tween::{Props, Stagger, Tween};
use crate::config::{durations, eases};

/// Extra teardown returned by an effect callback. Runs exactly once, after the
/// context it belongs to has been reverted.
pub struct Cleanup(Box<dyn FnOnce()>);

impl Cleanup {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Cleanup(Box::new(f))
    }

    pub(crate) fn run(self) {
        (self.0)()
    }
}

impl fmt::Debug for Cleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cleanup(..)")
    }
}

pub type EffectResult = MotionResult<Option<Cleanup>>;

/// Shared handle to one generation's animation context.
///
/// Every clone points at the same slot; once the lifecycle manager reverts the
/// context the slot is emptied, and from then on every method is a silent no-op.
pub struct ContextHandle<E: AnimationEngine> {
    id: u64,
    engine: Rc<E>,
    slot: Rc<RefCell<Option<E::Context>>>,
}

impl<E: AnimationEngine> Clone for ContextHandle<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            engine: Rc::clone(&self.engine),
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<E: AnimationEngine> PartialEq for ContextHandle<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<E: AnimationEngine> fmt::Debug for ContextHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHandle")
            .field("id", &self.id)
            .field("reverted", &self.is_reverted())
            .finish()
    }
}

impl<E: AnimationEngine> ContextHandle<E> {
    pub(crate) fn new(id: u64, engine: Rc<E>, context: E::Context) -> Self {
        Self {
            id,
            engine,
            slot: Rc::new(RefCell::new(Some(context))),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_reverted(&self) -> bool {
        self.slot.borrow().is_none()
    }

    pub fn select(&self, query: &str) -> Vec<E::Target> {
        match self.slot.borrow().as_ref() {
            Some(context) => self.engine.select(context, query),
            None => Vec::new(),
        }
    }

    pub fn animate(&self, targets: &[E::Target], tween: &Tween) -> MotionResult<()> {
        match self.slot.borrow_mut().as_mut() {
            Some(context) if !targets.is_empty() => self.engine.animate(context, targets, tween),
            _ => Ok(()),
        }
    }

    /// Like `animate`, but first cancels whatever this context is still
    /// running on the same targets. For tweens fired repeatedly from event
    /// listeners.
    pub fn replace(&self, targets: &[E::Target], tween: &Tween) -> MotionResult<()> {
        match self.slot.borrow_mut().as_mut() {
            Some(context) if !targets.is_empty() => {
                self.engine.cancel(context, targets);
                self.engine.animate(context, targets, tween)
            }
            _ => Ok(()),
        }
    }

    pub fn set(&self, targets: &[E::Target], props: &Props) -> MotionResult<()> {
        match self.slot.borrow_mut().as_mut() {
            Some(context) if !targets.is_empty() => self.engine.set(context, targets, props),
            _ => Ok(()),
        }
    }

    pub fn play(&self) {
        self.control(Playback::Play);
    }

    pub fn pause(&self) {
        self.control(Playback::Pause);
    }

    pub fn reverse(&self) {
        self.control(Playback::Reverse);
    }

    pub fn restart(&self) {
        self.control(Playback::Restart);
    }

    pub fn seek(&self, seconds: f64) {
        self.control(Playback::Seek(seconds));
    }

    fn control(&self, playback: Playback) {
        if let Some(context) = self.slot.borrow_mut().as_mut() {
            self.engine.control(context, playback);
        }
    }

    /// Returns false when the context was already reverted.
    pub(crate) fn revert(&self) -> bool {
        let context = self.slot.borrow_mut().take();
        match context {
            Some(context) => {
                self.engine.revert(context);
                true
            }
            None => false,
        }
    }
}

/// What an effect callback gets to work with during one activation.
pub struct MotionScope<E: AnimationEngine> {
    context: ContextHandle<E>,
    reduced_motion: bool,
}

impl<E: AnimationEngine> MotionScope<E> {
    pub(crate) fn new(context: ContextHandle<E>, reduced_motion: bool) -> Self {
        Self { context, reduced_motion }
    }

    /// True when the user asked for reduced motion and the call site respects it.
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Handle for animating later, e.g. from event listeners registered here.
    pub fn handle(&self) -> ContextHandle<E> {
        self.context.clone()
    }

    pub fn select(&self, query: &str) -> Vec<E::Target> {
        self.context.select(query)
    }

    pub fn first(&self, query: &str) -> Option<E::Target> {
        self.context.select(query).into_iter().next()
    }

    pub fn to(&self, targets: &[E::Target], tween: Tween) -> MotionResult<()> {
        self.context.animate(targets, &tween)
    }

    pub fn set(&self, targets: &[E::Target], props: Props) -> MotionResult<()> {
        self.context.set(targets, &props)
    }

    /// Animates, or jumps straight to `fallback` (the tween's end state when
    /// `None`) under reduced motion.
    pub fn accessible(
        &self,
        targets: &[E::Target],
        tween: Tween,
        fallback: Option<Props>,
    ) -> MotionResult<()> {
        if self.reduced_motion {
            self.set(targets, fallback.unwrap_or(tween.to))
        } else {
            self.to(targets, tween)
        }
    }

    pub fn fade_in(&self, targets: &[E::Target], delay: f64) -> MotionResult<()> {
        self.accessible(
            targets,
            Tween::to(Props::new().opacity(1.0).y(0.0).scale(1.0))
                .duration(durations::NORMAL)
                .delay(delay)
                .ease(eases::SMOOTH),
            None,
        )
    }

    pub fn slide_up(&self, targets: &[E::Target], distance: f64, delay: f64) -> MotionResult<()> {
        self.accessible(
            targets,
            Tween::from_to(
                Props::new().opacity(0.0).y(distance),
                Props::new().opacity(1.0).y(0.0),
            )
            .duration(durations::SLOW)
            .delay(delay)
            .ease(eases::DRAMATIC),
            None,
        )
    }

    /// Staggered entrance from `from` to the element's resting state.
    pub fn stagger_in(
        &self,
        targets: &[E::Target],
        from: Props,
        stagger: Stagger,
    ) -> MotionResult<()> {
        let rest = Props::new().opacity(1.0).x(0.0).y(0.0).scale(1.0);
        self.accessible(targets, Tween::from_to(from, rest).stagger(stagger), None)
    }
}
