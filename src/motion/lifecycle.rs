//! Per-call-site lifecycle of animation contexts.
//!
//! A call site moves through `Uninitialized -> Active(ctx) -> Active(ctx') -> ...
//! -> TornDown`. Each dependency change retires the current generation (revert
//! the context, then run its cleanup) before the next context is created, so two
//! generations of the same call site never animate the same scope at once.
//! `TornDown` is terminal.

use std::mem;
use std::rc::Rc;

use log::debug;

use super::context::{Cleanup, ContextHandle, EffectResult, MotionScope};
use super::engine::{AnimationEngine, Scope};
use super::error::{MotionError, MotionResult};

#[derive(Clone, Debug, PartialEq)]
pub struct MotionOptions {
    /// Revert the previous generation on every dependency change. When off,
    /// generations pile up until teardown, and with them every tween they
    /// started; only useful when an effect deliberately layers on top of
    /// its earlier runs.
    pub revert_on_update: bool,
    pub respect_reduced_motion: bool,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            revert_on_update: true,
            respect_reduced_motion: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoDocument,
    DetachedScope,
}

pub enum Activation<E: AnimationEngine> {
    /// The callback ran inside a fresh context.
    Ran(ContextHandle<E>),
    /// Dependencies matched the previous run; the live context is untouched.
    Unchanged(ContextHandle<E>),
    Skipped(SkipReason),
}

impl<E: AnimationEngine> Activation<E> {
    pub fn handle(&self) -> Option<&ContextHandle<E>> {
        match self {
            Activation::Ran(handle) | Activation::Unchanged(handle) => Some(handle),
            Activation::Skipped(_) => None,
        }
    }
}

struct Generation<E: AnimationEngine> {
    context: ContextHandle<E>,
    cleanup: Option<Cleanup>,
}

/// `current` followed by the stale generations, newest first.
fn newest_first<E: AnimationEngine>(current: Generation<E>, stale: Vec<Generation<E>>) -> Vec<Generation<E>> {
    let mut all = Vec::with_capacity(stale.len() + 1);
    all.push(current);
    all.extend(stale.into_iter().rev());
    all
}

/// Reverts every context before running any cleanup, so a panicking cleanup
/// cannot leave a later generation's animations running.
fn retire_all<E: AnimationEngine>(generations: Vec<Generation<E>>) {
    let cleanups: Vec<Cleanup> = generations
        .into_iter()
        .filter_map(|generation| {
            generation.context.revert();
            generation.cleanup
        })
        .collect();
    for cleanup in cleanups {
        cleanup.run();
    }
}

enum Phase<E: AnimationEngine, D> {
    Uninitialized,
    Active {
        deps: D,
        current: Generation<E>,
        /// Earlier generations kept alive by `revert_on_update: false`.
        stale: Vec<Generation<E>>,
    },
    TornDown,
}

/// Reverts a generation's context unless the callback finished cleanly.
struct RevertGuard<'a, E: AnimationEngine> {
    context: &'a ContextHandle<E>,
    armed: bool,
}

impl<E: AnimationEngine> RevertGuard<'_, E> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<E: AnimationEngine> Drop for RevertGuard<'_, E> {
    fn drop(&mut self) {
        if self.armed {
            self.context.revert();
        }
    }
}

pub struct LifecycleManager<E: AnimationEngine, D> {
    engine: Rc<E>,
    phase: Phase<E, D>,
    generations: u64,
}

impl<E: AnimationEngine, D> LifecycleManager<E, D> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: Rc::new(engine),
            phase: Phase::Uninitialized,
            generations: 0,
        }
    }

    pub fn is_torn_down(&self) -> bool {
        matches!(self.phase, Phase::TornDown)
    }

    /// Handle to the live generation, if any.
    pub fn current(&self) -> Option<ContextHandle<E>> {
        match &self.phase {
            Phase::Active { current, .. } => Some(current.context.clone()),
            _ => None,
        }
    }

    /// Retires every live generation, newest first; afterwards the call site
    /// is inert.
    pub fn teardown(&mut self) {
        if let Phase::Active { current, stale, .. } = mem::replace(&mut self.phase, Phase::TornDown) {
            retire_all(newest_first(current, stale));
        }
    }
}

impl<E: AnimationEngine, D: PartialEq> LifecycleManager<E, D> {
    pub fn activate<F>(
        &mut self,
        deps: D,
        scope: Scope<E::Scope>,
        options: &MotionOptions,
        callback: F,
    ) -> MotionResult<Activation<E>>
    where
        F: FnOnce(&MotionScope<E>) -> EffectResult,
    {
        match &self.phase {
            Phase::TornDown => return Err(MotionError::TornDown),
            Phase::Active { deps: previous, current, .. } if *previous == deps => {
                return Ok(Activation::Unchanged(current.context.clone()));
            }
            _ => {}
        }

        if !self.engine.is_available() {
            debug!("no document available, skipping motion activation");
            return Ok(Activation::Skipped(SkipReason::NoDocument));
        }
        let scope = match scope {
            Scope::Document => None,
            Scope::Element(element) => Some(element),
            Scope::Detached => {
                debug!("motion scope is not mounted, skipping activation");
                return Ok(Activation::Skipped(SkipReason::DetachedScope));
            }
        };

        let stale = match mem::replace(&mut self.phase, Phase::Uninitialized) {
            Phase::Active { current, mut stale, .. } => {
                if options.revert_on_update {
                    retire_all(newest_first(current, stale));
                    Vec::new()
                } else {
                    stale.push(current);
                    stale
                }
            }
            _ => Vec::new(),
        };

        self.generations += 1;
        let context = ContextHandle::new(
            self.generations,
            Rc::clone(&self.engine),
            self.engine.create_context(scope),
        );
        let reduced_motion = options.respect_reduced_motion && self.engine.prefers_reduced_motion();

        // Recorded before the callback runs so a panic still leaves the
        // generation reachable from teardown.
        self.phase = Phase::Active {
            deps,
            current: Generation { context: context.clone(), cleanup: None },
            stale,
        };

        let guard = RevertGuard { context: &context, armed: true };
        match callback(&MotionScope::new(context.clone(), reduced_motion)) {
            Ok(cleanup) => {
                guard.disarm();
                if let Phase::Active { current, .. } = &mut self.phase {
                    current.cleanup = cleanup;
                }
                Ok(Activation::Ran(context.clone()))
            }
            Err(err) => {
                drop(guard);
                debug!("motion generation {} failed, context reverted", context.id());
                Err(err)
            }
        }
    }
}

impl<E: AnimationEngine, D> Drop for LifecycleManager<E, D> {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            self.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;
    use crate::motion::engine::Playback;
    use crate::motion::testing::{Event, RecordingEngine};
    use crate::motion::tween::{Props, Tween};

    #[test]
    fn identical_dependencies_run_the_callback_once() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        let mut runs = 0;

        for _ in 0..2 {
            let activation = manager
                .activate(vec![0], Scope::Document, &MotionOptions::default(), |_| {
                    runs += 1;
                    Ok(None)
                })
                .unwrap();
            assert!(activation.handle().is_some());
        }

        assert_eq!(runs, 1);
        assert_eq!(*log.borrow(), vec![Event::Create { context: 1, scope: None }]);
    }

    #[test]
    fn dependency_change_reverts_then_cleans_up_then_recreates() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);

        for step in 0..2 {
            let log = log.clone();
            manager
                .activate(vec![step], Scope::Element("wizard"), &MotionOptions::default(), move |_| {
                    log.borrow_mut().push(Event::Note(format!("callback {}", step)));
                    let log = log.clone();
                    Ok(Some(Cleanup::new(move || {
                        log.borrow_mut().push(Event::Note(format!("cleanup {}", step)));
                    })))
                })
                .unwrap();
        }

        assert_eq!(
            *log.borrow(),
            vec![
                Event::Create { context: 1, scope: Some("wizard") },
                Event::Note("callback 0".into()),
                Event::Revert(1),
                Event::Note("cleanup 0".into()),
                Event::Create { context: 2, scope: Some("wizard") },
                Event::Note("callback 1".into()),
            ]
        );
    }

    #[test]
    fn length_change_counts_as_a_dependency_change() {
        let engine = RecordingEngine::new();
        let mut manager = LifecycleManager::new(engine);
        let mut runs = 0;
        for deps in [vec![1], vec![1, 2], vec![1, 2]] {
            manager
                .activate(deps, Scope::Document, &MotionOptions::default(), |_| {
                    runs += 1;
                    Ok(None)
                })
                .unwrap();
        }
        assert_eq!(runs, 2);
    }

    #[test]
    fn teardown_is_terminal_and_cleans_up_once() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        {
            let log = log.clone();
            manager
                .activate((), Scope::Document, &MotionOptions::default(), move |_| {
                    Ok(Some(Cleanup::new(move || {
                        log.borrow_mut().push(Event::Note("cleanup".into()));
                    })))
                })
                .unwrap();
        }

        manager.teardown();
        manager.teardown();
        assert!(manager.is_torn_down());
        assert!(manager.current().is_none());

        let mut called = false;
        let result = manager.activate((), Scope::Document, &MotionOptions::default(), |_| {
            called = true;
            Ok(None)
        });
        assert_eq!(result.err(), Some(MotionError::TornDown));
        assert!(!called);
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Create { context: 1, scope: None },
                Event::Revert(1),
                Event::Note("cleanup".into()),
            ]
        );
    }

    #[test]
    fn dropping_the_manager_tears_it_down() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        manager
            .activate(1u8, Scope::Document, &MotionOptions::default(), |_| Ok(None))
            .unwrap();
        drop(manager);
        assert_eq!(log.borrow().last(), Some(&Event::Revert(1)));
    }

    #[test]
    fn sibling_call_sites_only_touch_their_own_scope() {
        let engine_a = RecordingEngine::new().with_dom(&[
            ("card-a", "first", "item"),
            ("card-b", "second", "item"),
        ]);
        let log = engine_a.log.clone();
        let engine_b = engine_a.sharing_log();
        let mut site_a = LifecycleManager::new(engine_a);
        let mut site_b = LifecycleManager::new(engine_b);
        let mut b_runs = 0;

        site_a
            .activate(0, Scope::Element("card-a"), &MotionOptions::default(), |scope| {
                let items = scope.select(".item");
                scope.to(&items, Tween::to(Props::new().opacity(1.0)))?;
                Ok(None)
            })
            .unwrap();
        assert_eq!(b_runs, 0);

        site_b
            .activate(0, Scope::Element("card-b"), &MotionOptions::default(), |scope| {
                b_runs += 1;
                let items = scope.select(".item");
                scope.to(&items, Tween::to(Props::new().opacity(1.0)))?;
                Ok(None)
            })
            .unwrap();

        let animated: Vec<Vec<String>> = log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Animate { targets, .. } => Some(targets.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(animated, vec![vec!["first".to_string()], vec!["second".to_string()]]);
        assert_eq!(b_runs, 1);
    }

    #[test]
    fn unscoped_lookups_fall_back_to_the_document() {
        let engine = RecordingEngine::new().with_dom(&[
            ("card-a", "first", "item"),
            ("card-b", "second", "item"),
        ]);
        let mut manager = LifecycleManager::new(engine);
        let mut found = Vec::new();
        manager
            .activate((), Scope::Document, &MotionOptions::default(), |scope| {
                found = scope.select(".item");
                Ok(None)
            })
            .unwrap();
        assert_eq!(found, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn detached_scope_is_a_silent_no_op() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        let mut runs = 0;

        let activation = manager
            .activate(7, Scope::Detached, &MotionOptions::default(), |_| {
                runs += 1;
                Ok(None)
            })
            .unwrap();
        assert!(matches!(activation, Activation::Skipped(SkipReason::DetachedScope)));
        assert!(log.borrow().is_empty());

        // Same dependencies once the scope is mounted still run.
        manager
            .activate(7, Scope::Element("root"), &MotionOptions::default(), |_| {
                runs += 1;
                Ok(None)
            })
            .unwrap();
        assert_eq!(runs, 1);
    }

    #[test]
    fn missing_document_skips_context_creation() {
        let engine = RecordingEngine::new().unavailable();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        let activation = manager
            .activate((), Scope::Document, &MotionOptions::default(), |_| {
                panic!("callback must not run without a document")
            })
            .unwrap();
        assert!(matches!(activation, Activation::Skipped(SkipReason::NoDocument)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn failing_callback_has_its_context_reverted() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);

        let result = manager.activate(0, Scope::Document, &MotionOptions::default(), |_| {
            Err(MotionError::Callback("missing progress bar".into()))
        });
        assert_eq!(result.err(), Some(MotionError::Callback("missing progress bar".into())));
        assert!(manager.current().map(|h| h.is_reverted()).unwrap_or(false));

        manager
            .activate(1, Scope::Document, &MotionOptions::default(), |_| Ok(None))
            .unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Create { context: 1, scope: None },
                Event::Revert(1),
                Event::Create { context: 2, scope: None },
            ]
        );
    }

    #[test]
    fn panicking_callback_still_reverts_its_context() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let _ = manager.activate(0, Scope::Document, &MotionOptions::default(), |_| {
                panic!("boom")
            });
        }));
        assert!(outcome.is_err());
        assert_eq!(log.borrow().last(), Some(&Event::Revert(1)));

        manager.teardown();
        let reverts = log.borrow().iter().filter(|e| matches!(e, Event::Revert(_))).count();
        assert_eq!(reverts, 1);
    }

    #[test]
    fn disabled_revert_on_update_accumulates_until_teardown() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        let options = MotionOptions { revert_on_update: false, ..MotionOptions::default() };

        for step in 0..2 {
            let log = log.clone();
            manager
                .activate(step, Scope::Document, &options, move |_| {
                    Ok(Some(Cleanup::new(move || {
                        log.borrow_mut().push(Event::Note(format!("cleanup {}", step)));
                    })))
                })
                .unwrap();
        }
        assert!(!log.borrow().iter().any(|e| matches!(e, Event::Revert(_))));

        manager.teardown();
        let tail: Vec<Event> = log.borrow()[2..].to_vec();
        assert_eq!(
            tail,
            vec![
                Event::Revert(2),
                Event::Revert(1),
                Event::Note("cleanup 1".into()),
                Event::Note("cleanup 0".into()),
            ]
        );
    }

    #[test]
    fn reverting_update_also_retires_accumulated_generations() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        let layered = MotionOptions { revert_on_update: false, ..MotionOptions::default() };

        for step in 0..2 {
            manager
                .activate(vec![step], Scope::Document, &layered, |_| Ok(None))
                .unwrap();
        }
        manager
            .activate(vec![2], Scope::Document, &MotionOptions::default(), |_| Ok(None))
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                Event::Create { context: 1, scope: None },
                Event::Create { context: 2, scope: None },
                Event::Revert(2),
                Event::Revert(1),
                Event::Create { context: 3, scope: None },
            ]
        );

        manager.teardown();
        assert_eq!(log.borrow().last(), Some(&Event::Revert(3)));
        let reverts = log.borrow().iter().filter(|e| matches!(e, Event::Revert(_))).count();
        assert_eq!(reverts, 3);
    }

    #[test]
    fn panicking_cleanup_during_teardown_leaves_no_context_running() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        let layered = MotionOptions { revert_on_update: false, ..MotionOptions::default() };

        manager.activate(0, Scope::Document, &layered, |_| Ok(None)).unwrap();
        manager
            .activate(1, Scope::Document, &layered, |_| {
                Ok(Some(Cleanup::new(|| panic!("listener already gone"))))
            })
            .unwrap();

        let outcome = catch_unwind(AssertUnwindSafe(|| manager.teardown()));
        assert!(outcome.is_err());
        assert!(manager.is_torn_down());
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Create { context: 1, scope: None },
                Event::Create { context: 2, scope: None },
                Event::Revert(2),
                Event::Revert(1),
            ]
        );
    }

    #[test]
    fn replacing_a_tween_cancels_earlier_ones_on_the_same_target() {
        let engine = RecordingEngine::new().with_dom(&[("card", "face", "face")]);
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);

        let handle = manager
            .activate((), Scope::Element("card"), &MotionOptions::default(), |_| Ok(None))
            .unwrap()
            .handle()
            .cloned()
            .unwrap();
        let face = handle.select(".face");
        for _ in 0..3 {
            handle.replace(&face, &Tween::to(Props::new().scale(1.03))).unwrap();
        }

        let cancels = log.borrow().iter().filter(|e| matches!(e, Event::Cancel { .. })).count();
        let animates = log.borrow().iter().filter(|e| matches!(e, Event::Animate { .. })).count();
        assert_eq!((cancels, animates), (3, 3));
        assert_eq!(
            log.borrow()[1],
            Event::Cancel { context: 1, targets: vec!["face".to_string()] }
        );

        manager.teardown();
        assert!(handle.replace(&face, &Tween::to(Props::new().scale(1.0))).is_ok());
        assert_eq!(log.borrow().last(), Some(&Event::Revert(1)));
    }

    #[test]
    fn manual_controls_go_quiet_after_revert() {
        let engine = RecordingEngine::new();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);

        let first = manager
            .activate(0, Scope::Document, &MotionOptions::default(), |_| Ok(None))
            .unwrap()
            .handle()
            .cloned()
            .unwrap();
        first.pause();
        assert_eq!(
            log.borrow().last(),
            Some(&Event::Control { context: 1, playback: Playback::Pause })
        );

        manager
            .activate(1, Scope::Document, &MotionOptions::default(), |_| Ok(None))
            .unwrap();
        let before = log.borrow().len();
        first.play();
        first.seek(0.5);
        first.restart();
        assert!(first.is_reverted());
        assert_eq!(log.borrow().len(), before);
        assert!(first.select(".anything").is_empty());
        assert_eq!(manager.current().map(|h| h.id()), Some(2));
    }

    #[test]
    fn reduced_motion_still_runs_the_callback() {
        let engine = RecordingEngine::new()
            .with_dom(&[("hero", "title", "headline")])
            .reduced_motion();
        let log = engine.log.clone();
        let mut manager = LifecycleManager::new(engine);
        let mut saw_reduced = None;

        manager
            .activate((), Scope::Element("hero"), &MotionOptions::default(), |scope| {
                saw_reduced = Some(scope.reduced_motion());
                let title = scope.select(".headline");
                scope.fade_in(&title, 0.2)?;
                Ok(None)
            })
            .unwrap();

        assert_eq!(saw_reduced, Some(true));
        assert!(log.borrow().iter().any(|e| matches!(e, Event::Set { .. })));
        assert!(!log.borrow().iter().any(|e| matches!(e, Event::Animate { .. })));
    }

    #[test]
    fn reduced_motion_is_ignored_when_not_respected() {
        let engine = RecordingEngine::new().reduced_motion();
        let mut manager = LifecycleManager::new(engine);
        let options = MotionOptions { respect_reduced_motion: false, ..MotionOptions::default() };
        let mut saw_reduced = None;
        manager
            .activate((), Scope::Document, &options, |scope| {
                saw_reduced = Some(scope.reduced_motion());
                Ok(None)
            })
            .unwrap();
        assert_eq!(saw_reduced, Some(false));
    }
}
