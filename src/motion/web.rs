//! Browser engine on top of the Web Animations API.

use std::rc::Rc;

use log::warn;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Object;
use web_sys::{
    Animation, AnimationEffect, CssStyleDeclaration, Element, HtmlElement, KeyframeEffect, KeyframeEffectOptions,
    SvgElement,
};

use super::engine::{AnimationEngine, Playback};
use super::error::{MotionError, MotionResult};
use super::tween::{Props, Timing, Tween};
use crate::config::MotionConfig;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Effect timing as the `KeyframeEffect` constructor reads it.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct EffectTiming {
    duration: f64,
    delay: f64,
    easing: &'static str,
    fill: &'static str,
    iterations: f64,
    direction: &'static str,
}

impl EffectTiming {
    fn new(timing: &Timing, delay_ms: f64) -> Self {
        Self {
            duration: timing.duration_ms,
            delay: delay_ms,
            easing: timing.easing,
            fill: "both",
            iterations: timing.iterations,
            direction: if timing.alternate { "alternate" } else { "normal" },
        }
    }
}

/// What revert should do with an element's `style` attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
enum StyleRestore {
    Set(String),
    Remove,
    /// Someone else rewrote the attribute after our last write; theirs wins.
    Keep,
}

/// `before` is the attribute when the context first touched the element,
/// `written` the value right after the context's last write.
fn style_restore(before: Option<String>, written: Option<&str>, current: Option<&str>) -> StyleRestore {
    if current != written {
        return StyleRestore::Keep;
    }
    match before {
        Some(style) => StyleRestore::Set(style),
        None => StyleRestore::Remove,
    }
}

fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

struct StyleSnapshot {
    element: Element,
    before: Option<String>,
    written: Option<String>,
}

pub struct WebEngine {
    config: Rc<MotionConfig>,
}

pub struct WebContext {
    scope: Option<Element>,
    animations: Vec<(Element, Animation)>,
    styles: Vec<StyleSnapshot>,
}

impl WebEngine {
    pub fn new(config: Rc<MotionConfig>) -> Self {
        Self { config }
    }

    fn to_js<T: Serialize + ?Sized>(value: &T) -> MotionResult<JsValue> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| MotionError::from(JsValue::from(err)))
    }

    fn start(target: &Element, keyframes: &Object, timing: &EffectTiming) -> MotionResult<Animation> {
        let options: KeyframeEffectOptions = Self::to_js(timing)?.unchecked_into();
        let effect = KeyframeEffect::new_with_opt_element_and_keyframes_and_keyframe_effect_options(
            Some(target),
            Some(keyframes),
            &options,
        )?;
        let effect: &AnimationEffect = &effect;
        let animation = Animation::new_with_effect(Some(effect))?;
        animation.play()?;
        Ok(animation)
    }
}

impl WebContext {
    fn snapshot(&mut self, element: &Element) -> usize {
        match self.styles.iter().position(|saved| saved.element == *element) {
            Some(index) => index,
            None => {
                self.styles.push(StyleSnapshot {
                    element: element.clone(),
                    before: element.get_attribute("style"),
                    written: None,
                });
                self.styles.len() - 1
            }
        }
    }
}

impl AnimationEngine for WebEngine {
    type Target = Element;
    type Scope = Element;
    type Context = WebContext;

    fn is_available(&self) -> bool {
        web_sys::window().and_then(|w| w.document()).is_some()
    }

    fn prefers_reduced_motion(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
            .map(|query| query.matches())
            .unwrap_or(false)
    }

    fn create_context(&self, scope: Option<Element>) -> WebContext {
        WebContext {
            scope,
            animations: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Cancels animations newest first, then puts back every `style` attribute
    /// the context wrote to. An attribute rewritten by someone else since the
    /// context's last write (a re-render, say) is left alone.
    fn revert(&self, context: WebContext) {
        for (_, animation) in context.animations.into_iter().rev() {
            animation.cancel();
        }
        for snapshot in context.styles.into_iter().rev() {
            let current = snapshot.element.get_attribute("style");
            let restored = match style_restore(snapshot.before, snapshot.written.as_deref(), current.as_deref()) {
                StyleRestore::Set(style) => snapshot.element.set_attribute("style", &style),
                StyleRestore::Remove => snapshot.element.remove_attribute("style"),
                StyleRestore::Keep => Ok(()),
            };
            if let Err(err) = restored {
                warn!("Failed to restore inline style: {:?}", err);
            }
        }
    }

    fn select(&self, context: &WebContext, query: &str) -> Vec<Element> {
        let list = match &context.scope {
            Some(scope) => scope.query_selector_all(query),
            None => match web_sys::window().and_then(|w| w.document()) {
                Some(document) => document.query_selector_all(query),
                None => return Vec::new(),
            },
        };
        let list = match list {
            Ok(list) => list,
            Err(err) => {
                warn!("Invalid selector {:?}: {:?}", query, err);
                return Vec::new();
            }
        };

        let found: Vec<Element> = (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        if found.is_empty() && self.config.null_target_warn {
            warn!("Selector {:?} matched no elements", query);
        }
        found
    }

    fn animate(&self, context: &mut WebContext, targets: &[Element], tween: &Tween) -> MotionResult<()> {
        let keyframes: Object = Self::to_js(&tween.keyframes())?.unchecked_into();
        let timing = self.config.resolve(tween);
        for (index, target) in targets.iter().enumerate() {
            let delay = timing.delay_ms + self.config.stagger_offset_ms(tween, index, targets.len());
            let animation = Self::start(target, &keyframes, &EffectTiming::new(&timing, delay))?;
            context.animations.push((target.clone(), animation));
        }
        Ok(())
    }

    fn set(&self, context: &mut WebContext, targets: &[Element], props: &Props) -> MotionResult<()> {
        let keyframe = props.keyframe();
        for target in targets {
            let Some(style) = inline_style(target) else {
                continue;
            };
            let index = context.snapshot(target);
            for (name, value) in keyframe.declarations() {
                style.set_property(name, value)?;
            }
            context.styles[index].written = target.get_attribute("style");
        }
        Ok(())
    }

    fn cancel(&self, context: &mut WebContext, targets: &[Element]) {
        context.animations.retain(|(element, animation)| {
            let hit = targets.contains(element);
            if hit {
                animation.cancel();
            }
            !hit
        });
    }

    fn control(&self, context: &mut WebContext, playback: Playback) {
        for (_, animation) in &context.animations {
            let result = match playback {
                Playback::Play => animation.play(),
                Playback::Pause => animation.pause(),
                Playback::Reverse => animation.reverse(),
                Playback::Restart => {
                    animation.set_current_time(Some(0.0));
                    animation.play()
                }
                Playback::Seek(seconds) => {
                    animation.set_current_time(Some(seconds * 1000.0));
                    Ok(())
                }
            };
            if let Err(err) = result {
                warn!("Playback {:?} failed: {:?}", playback, err);
            }
        }
    }
}
