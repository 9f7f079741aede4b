use yew::prelude::*;

use crate::config::{durations, eases};
use crate::motion::{use_motion, MotionOptions, Props, Tween};

#[derive(Properties, PartialEq)]
pub struct AnimatedFieldProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub delay: f64,
}

/// Wrapper that lifts its content into place when it mounts.
#[function_component(AnimatedField)]
pub fn animated_field(props: &AnimatedFieldProps) -> Html {
    let node = use_node_ref();
    let delay = props.delay;

    use_motion(delay, Some(node.clone()), MotionOptions::default(), move |scope| {
        let body = scope.select(":scope > .field-body");
        scope.set(&body, Props::new().opacity(0.0).y(24.0))?;
        scope.accessible(
            &body,
            Tween::to(Props::new().opacity(1.0).y(0.0))
                .duration(durations::NORMAL)
                .delay(delay)
                .ease(eases::SMOOTH),
            None,
        )?;
        Ok(None)
    });

    html! {
        <div ref={node} class="animated-field">
            <div class="field-body">
                { for props.children.iter() }
            </div>
        </div>
    }
}
