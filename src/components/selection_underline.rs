use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, SvgGeometryElement};
use yew::prelude::*;

use crate::motion::context::ContextHandle;
use crate::motion::{use_motion, Cleanup, Ease, MotionError, MotionOptions, Props, Tween, WebEngine};

const WAVE_STEP: f64 = 2.0;
const WAVE_HEIGHT: f64 = 3.0;
const WAVE_FREQUENCY: f64 = 0.02;
const HIDDEN_DASH: &str = "0 1000";

/// SVG path data for a sine-wave underline from `start_x` to `end_x` at
/// baseline `y`, in container coordinates.
pub fn wave_path(start_x: f64, end_x: f64, y: f64) -> String {
    let steps = ((end_x - start_x).max(0.0) / WAVE_STEP).floor() as usize;
    let mut path = format!("M {:.2} {:.2}", start_x, y);
    for step in 0..=steps {
        let x = step as f64 * WAVE_STEP;
        let wave_y = y + (x * WAVE_FREQUENCY).sin() * WAVE_HEIGHT;
        path.push_str(&format!(" L {:.2} {:.2}", start_x + x, wave_y));
    }
    path
}

fn drawn(length: f64) -> Props {
    Props::new().stroke_dasharray(format!("{} {}", length, length)).opacity(1.0)
}

fn undrawn(length: f64) -> Props {
    Props::new().stroke_dasharray(format!("0 {}", length)).opacity(0.0)
}

struct Underline {
    handle: ContextHandle<WebEngine>,
    container: Element,
    path: Element,
    duration: f64,
    reduced_motion: bool,
    /// Dash length of the drawn underline, if one is showing.
    shown: Cell<Option<f64>>,
}

impl Underline {
    fn play(&self, from: Props, to: Props) -> Result<(), MotionError> {
        let targets = [self.path.clone()];
        if self.reduced_motion {
            return self.handle.set(&targets, &to);
        }
        self.handle
            .replace(&targets, &Tween::from_to(from, to).duration(self.duration).ease(Ease::Power2Out))
    }

    fn hide(&self) -> Result<(), MotionError> {
        match self.shown.take() {
            Some(length) => self.play(drawn(length), undrawn(length)),
            None => Ok(()),
        }
    }

    fn follow_selection(&self) -> Result<(), MotionError> {
        let selection = web_sys::window().and_then(|window| window.get_selection().ok().flatten());
        let Some(selection) = selection.filter(|selection| selection.range_count() > 0) else {
            return self.hide();
        };
        let range = selection.get_range_at(0)?;
        let text = String::from(range.to_string());
        if text.trim().is_empty() || !self.container.contains(Some(&range.common_ancestor_container()?)) {
            return self.hide();
        }

        let Some(rects) = range.get_client_rects() else {
            return Ok(());
        };
        let (Some(first), Some(last)) = (rects.get(0), rects.get(rects.length().saturating_sub(1))) else {
            return Ok(());
        };
        let bounds = self.container.get_bounding_client_rect();
        let start_x = first.left() - bounds.left();
        let end_x = last.right() - bounds.left();
        let y = first.bottom() - bounds.top() - 2.0;
        self.path.set_attribute("d", &wave_path(start_x, end_x, y))?;

        let length = self
            .path
            .dyn_ref::<SvgGeometryElement>()
            .map(|geometry| f64::from(geometry.get_total_length()))
            .unwrap_or(end_x - start_x);
        self.shown.set(Some(length));
        self.play(undrawn(length), drawn(length))
    }

    fn update(&self) {
        if let Err(err) = self.follow_selection() {
            warn!("Selection underline failed: {}", err);
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectionUnderlineProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(AttrValue::from("#eab308"))]
    pub color: AttrValue,
    #[prop_or(0.3)]
    pub duration: f64,
}

/// Draws a wavy underline under whatever text is selected inside the
/// children, and erases it when the selection goes away.
#[function_component(TextSelectionUnderline)]
pub fn text_selection_underline(props: &SelectionUnderlineProps) -> Html {
    let container = use_node_ref();
    let path = use_node_ref();
    let duration = props.duration;

    {
        let container = container.clone();
        let path = path.clone();
        use_motion(duration, Some(container.clone()), MotionOptions::default(), move |scope| {
            let (Some(container), Some(path)) = (container.cast::<Element>(), path.cast::<Element>()) else {
                return Ok(None);
            };
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return Ok(None);
            };
            scope.set(&[path.clone()], Props::new().stroke_dasharray(HIDDEN_DASH).opacity(0.0))?;

            let underline = Rc::new(Underline {
                handle: scope.handle(),
                container: container.clone(),
                path,
                duration,
                reduced_motion: scope.reduced_motion(),
                shown: Cell::new(None),
            });

            let on_selection = {
                let underline = underline.clone();
                Closure::wrap(Box::new(move || underline.update()) as Box<dyn FnMut()>)
            };
            // Quick drags can finish before the browser reports the change
            let on_mouse_up = Closure::wrap(Box::new(move || {
                let underline = underline.clone();
                Timeout::new(10, move || underline.update()).forget();
            }) as Box<dyn FnMut()>);

            document.add_event_listener_with_callback("selectionchange", on_selection.as_ref().unchecked_ref())?;
            if let Err(err) =
                container.add_event_listener_with_callback("mouseup", on_mouse_up.as_ref().unchecked_ref())
            {
                let _ = document
                    .remove_event_listener_with_callback("selectionchange", on_selection.as_ref().unchecked_ref());
                return Err(err.into());
            }

            Ok(Some(Cleanup::new(move || {
                let _ = document
                    .remove_event_listener_with_callback("selectionchange", on_selection.as_ref().unchecked_ref());
                let _ = container.remove_event_listener_with_callback("mouseup", on_mouse_up.as_ref().unchecked_ref());
            })))
        });
    }

    html! {
        <div ref={container} class={classes!("selection-underline", props.class.clone())}>
            { for props.children.iter() }
            <svg class="selection-underline-layer">
                <path
                    ref={path}
                    stroke={props.color.clone()}
                    stroke-width="2"
                    fill="none"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                    style={format!("filter: drop-shadow(0 0 3px {}40)", props.color)}
                />
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_starts_at_the_selection_and_steps_by_two_pixels() {
        assert_eq!(
            wave_path(10.0, 14.0, 20.0),
            "M 10.00 20.00 L 10.00 20.00 L 12.00 20.12 L 14.00 20.24"
        );
    }

    #[test]
    fn backwards_span_collapses_to_a_point() {
        assert_eq!(wave_path(40.0, 12.0, 8.0), "M 40.00 8.00 L 40.00 8.00");
    }

    #[test]
    fn wave_stays_within_its_height() {
        let path = wave_path(0.0, 400.0, 50.0);
        let ys: Vec<f64> = path
            .split(" L ")
            .skip(1)
            .filter_map(|point| point.split(' ').nth(1)?.parse().ok())
            .collect();
        assert_eq!(ys.len(), 201);
        assert!(ys.iter().all(|y| (47.0..=53.0).contains(y)));
    }
}
