use yew::prelude::*;

use crate::config::eases;
use crate::motion::{use_hover_motion, Props, Tween};

const RESTING_SHADOW: &str = "0 4px 6px rgba(0, 0, 0, 0.1)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
}

#[derive(Properties, PartialEq)]
pub struct AnimatedButtonProps {
    #[prop_or_default]
    pub children: Children,
    pub onclick: Callback<MouseEvent>,
    #[prop_or(ButtonVariant::Primary)]
    pub variant: ButtonVariant,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(AnimatedButton)]
pub fn animated_button(props: &AnimatedButtonProps) -> Html {
    let node = use_node_ref();

    use_hover_motion(
        node.clone(),
        Tween::to(
            Props::new()
                .scale(1.08)
                .y(-8.0)
                .box_shadow("0 15px 35px rgba(234, 179, 8, 0.4)"),
        )
        .duration(0.4)
        .ease(eases::BOUNCE),
        Tween::to(Props::new().scale(1.0).y(0.0).box_shadow(RESTING_SHADOW))
            .duration(0.4)
            .ease(eases::SMOOTH),
    );

    let variant = match props.variant {
        ButtonVariant::Primary => "btn-primary",
        ButtonVariant::Secondary => "btn-secondary",
    };

    html! {
        <button
            ref={node}
            class={classes!("animated-button", variant, props.class.clone())}
            onclick={props.onclick.clone()}
            disabled={props.disabled}
        >
            { for props.children.iter() }
        </button>
    }
}
