use std::cell::RefCell;
use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use super::context::{Cleanup, ContextHandle, EffectResult, MotionScope};
use super::engine::Scope;
use super::lifecycle::{LifecycleManager, MotionOptions};
use super::tween::Tween;
use super::web::WebEngine;
use crate::config::MotionConfig;

/// Playback controls for whichever generation is live at a call site.
/// Calls made while nothing is live, or after teardown, do nothing.
#[derive(Clone)]
pub struct MotionControls {
    current: Rc<RefCell<Option<ContextHandle<WebEngine>>>>,
}

impl PartialEq for MotionControls {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.current, &other.current)
    }
}

impl MotionControls {
    pub fn context(&self) -> Option<ContextHandle<WebEngine>> {
        self.current.borrow().clone()
    }

    pub fn play(&self) {
        if let Some(context) = self.context() {
            context.play();
        }
    }

    pub fn pause(&self) {
        if let Some(context) = self.context() {
            context.pause();
        }
    }

    pub fn reverse(&self) {
        if let Some(context) = self.context() {
            context.reverse();
        }
    }

    pub fn restart(&self) {
        if let Some(context) = self.context() {
            context.restart();
        }
    }

    pub fn seek(&self, seconds: f64) {
        if let Some(context) = self.context() {
            context.seek(seconds);
        }
    }
}

fn scope_of(node_ref: Option<&NodeRef>) -> Scope<Element> {
    match node_ref {
        None => Scope::Document,
        Some(node_ref) => Scope::from_option(node_ref.cast::<Element>()),
    }
}

/// Runs `callback` in a fresh animation context whenever `deps` changes,
/// reverting the previous context (then running its cleanup) first. With a
/// `scope`, selector lookups inside the callback stay within that element.
#[hook]
pub fn use_motion<D, F>(deps: D, scope: Option<NodeRef>, options: MotionOptions, callback: F) -> MotionControls
where
    D: PartialEq + 'static,
    F: FnOnce(&MotionScope<WebEngine>) -> EffectResult + 'static,
{
    let config = use_context::<Rc<MotionConfig>>().unwrap_or_default();
    let manager = use_mut_ref(move || LifecycleManager::<WebEngine, D>::new(WebEngine::new(config)));
    let current = use_mut_ref(|| None::<ContextHandle<WebEngine>>);

    {
        let manager = manager.clone();
        let current = current.clone();
        use_effect(move || {
            let scope = scope_of(scope.as_ref());
            match manager.try_borrow_mut() {
                Ok(mut manager) => {
                    if let Err(err) = manager.activate(deps, scope, &options, callback) {
                        error!("Motion effect failed: {}", err);
                    }
                    *current.borrow_mut() = manager.current();
                }
                // The callback of this same call site is still running
                Err(_) => warn!("Ignoring nested motion activation"),
            }
            || ()
        });
    }

    {
        let manager = manager.clone();
        let current = current.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    current.borrow_mut().take();
                    match manager.try_borrow_mut() {
                        Ok(mut manager) => manager.teardown(),
                        Err(_) => warn!("Motion teardown requested while an effect was running"),
                    }
                }
            },
            (),
        );
    }

    MotionControls { current }
}

fn hover_listener(
    handle: ContextHandle<WebEngine>,
    element: Element,
    tween: Tween,
    reduced_motion: bool,
) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let targets = [element.clone()];
        let result = if reduced_motion {
            handle.set(&targets, &tween.to)
        } else {
            handle.replace(&targets, &tween)
        };
        if let Err(err) = result {
            warn!("Hover animation failed: {}", err);
        }
    }) as Box<dyn FnMut()>)
}

/// Gives a "to"-only tween the other state as its start, so replacing a
/// running hover tween never depends on the cancelled one's output.
fn anchored(tween: Tween, rest: &Tween) -> Tween {
    match tween.from {
        Some(_) => tween,
        None => Tween { from: Some(rest.to.clone()), ..tween },
    }
}

/// Plays `enter` on mouseenter and `leave` on mouseleave of the referenced
/// element. Each event replaces the previous hover tween. Listeners live
/// exactly as long as the motion generation.
#[hook]
pub fn use_hover_motion(node_ref: NodeRef, enter: Tween, leave: Tween) -> MotionControls {
    let target = node_ref.clone();
    let entering = anchored(enter.clone(), &leave);
    let leave = anchored(leave, &enter);
    let enter = entering;
    use_motion(
        (enter.clone(), leave.clone()),
        Some(node_ref),
        MotionOptions::default(),
        move |scope| {
            let Some(element) = target.cast::<Element>() else {
                return Ok(None);
            };
            let reduced = scope.reduced_motion();
            let on_enter = hover_listener(scope.handle(), element.clone(), enter, reduced);
            let on_leave = hover_listener(scope.handle(), element.clone(), leave, reduced);

            element.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())?;
            if let Err(err) =
                element.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
            {
                let _ = element
                    .remove_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref());
                return Err(err.into());
            }

            Ok(Some(Cleanup::new(move || {
                let _ = element
                    .remove_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref());
                let _ = element
                    .remove_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
            })))
        },
    )
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn observe(
    element: &Element,
    threshold: f64,
    once: bool,
    visible: UseStateHandle<bool>,
) -> Option<(IntersectionObserver, ObserverCallback)> {
    let on_change = visible.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if entry.is_intersecting() {
                on_change.set(true);
                if once {
                    observer.disconnect();
                }
            } else if !once {
                on_change.set(false);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            observer.observe(element);
            Some((observer, callback))
        }
        Err(err) => {
            // Without an observer nothing would ever reveal the element
            warn!("IntersectionObserver unavailable, showing content: {:?}", err);
            visible.set(true);
            None
        }
    }
}

/// Whether the referenced element has scrolled into view. With `once` the
/// flag latches after the first intersection.
#[hook]
pub fn use_in_view(node_ref: NodeRef, threshold: f64, once: bool) -> bool {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |(node_ref, threshold, once)| {
                let observer = node_ref
                    .cast::<Element>()
                    .and_then(|element| observe(&element, *threshold, *once, visible));
                move || {
                    if let Some((observer, _callback)) = observer {
                        observer.disconnect();
                    }
                }
            },
            (node_ref, threshold, once),
        );
    }

    *visible
}
