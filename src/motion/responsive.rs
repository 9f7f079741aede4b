use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use super::context::{EffectResult, MotionScope};
use super::hooks::{use_motion, MotionControls};
use super::lifecycle::MotionOptions;
use super::web::WebEngine;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    pub const TABLET_MIN: f64 = 768.0;
    pub const DESKTOP_MIN: f64 = 1024.0;

    pub fn from_width(width: f64) -> Self {
        if width < Self::TABLET_MIN {
            Breakpoint::Mobile
        } else if width < Self::DESKTOP_MIN {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    fn current() -> Self {
        web_sys::window()
            .and_then(|window| window.inner_width().ok())
            .and_then(|width| width.as_f64())
            .map(Self::from_width)
            .unwrap_or(Breakpoint::Desktop)
    }
}

/// The window's breakpoint, re-rendering only when a resize crosses one.
#[hook]
pub fn use_breakpoint() -> Breakpoint {
    let breakpoint = use_state_eq(Breakpoint::current);

    {
        let breakpoint = breakpoint.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let listener = window.as_ref().and_then(|window| {
                    let on_resize = Closure::wrap(Box::new(move || {
                        breakpoint.set(Breakpoint::current());
                    }) as Box<dyn FnMut()>);
                    match window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref()) {
                        Ok(()) => Some(on_resize),
                        Err(err) => {
                            warn!("Could not watch resizing: {:?}", err);
                            None
                        }
                    }
                });

                move || {
                    if let (Some(window), Some(on_resize)) = (window, listener) {
                        let _ = window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    *breakpoint
}

/// `use_motion` that also passes the current breakpoint to `callback` and
/// re-runs it (reverting the previous context) when the breakpoint changes.
#[hook]
pub fn use_responsive_motion<D, F>(
    deps: D,
    scope: Option<NodeRef>,
    options: MotionOptions,
    callback: F,
) -> MotionControls
where
    D: PartialEq + 'static,
    F: FnOnce(&MotionScope<WebEngine>, Breakpoint) -> EffectResult + 'static,
{
    let breakpoint = use_breakpoint();
    use_motion((deps, breakpoint), scope, options, move |scope| callback(scope, breakpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_map_to_breakpoints() {
        assert_eq!(Breakpoint::from_width(375.0), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(767.9), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(768.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1023.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Desktop);
        assert_eq!(Breakpoint::from_width(1920.0), Breakpoint::Desktop);
    }
}
