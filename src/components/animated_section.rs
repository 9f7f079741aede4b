use std::rc::Rc;

use yew::prelude::*;

use crate::config::{durations, eases, staggers, MotionConfig};
use crate::motion::{use_in_view, use_motion, MotionOptions, Props, Tween};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionAnimation {
    Fade,
    Slide,
    Stagger,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trigger {
    Immediate,
    /// Wait until the section scrolls into view.
    Scroll,
}

#[derive(Properties, PartialEq)]
pub struct AnimatedSectionProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(SectionAnimation::Fade)]
    pub animation: SectionAnimation,
    #[prop_or_default]
    pub delay: f64,
    #[prop_or(Trigger::Immediate)]
    pub trigger: Trigger,
}

#[function_component(AnimatedSection)]
pub fn animated_section(props: &AnimatedSectionProps) -> Html {
    let config = use_context::<Rc<MotionConfig>>().unwrap_or_default();
    let container = use_node_ref();
    let in_view = use_in_view(container.clone(), 0.2, true);
    let revealed = props.trigger == Trigger::Immediate || in_view;
    let animation = props.animation;
    let delay = props.delay;
    let stagger = config.default_stagger;

    use_motion(
        (animation, delay, props.trigger, revealed),
        Some(container.clone()),
        MotionOptions::default(),
        move |scope| {
            let elements = scope.select("[data-animate]");
            if elements.is_empty() {
                return Ok(None);
            }

            scope.set(&elements, Props::new().opacity(0.0).y(30.0).scale(0.95))?;
            if !revealed {
                return Ok(None);
            }

            match animation {
                SectionAnimation::Fade => scope.fade_in(&elements, delay)?,
                SectionAnimation::Slide => scope.accessible(
                    &elements,
                    Tween::to(Props::new().opacity(1.0).y(0.0).scale(1.0))
                        .duration(durations::SLOW)
                        .delay(delay)
                        .ease(eases::DRAMATIC)
                        .stagger(staggers::QUICK),
                    None,
                )?,
                SectionAnimation::Stagger => scope.stagger_in(
                    &elements,
                    Props::new().opacity(0.0).y(50.0).scale(0.9),
                    stagger,
                )?,
            }
            Ok(None)
        },
    );

    html! {
        <div ref={container} class={classes!("animated-section", props.class.clone())}>
            { for props.children.iter().map(|child| html! {
                <div data-animate="true">{ child }</div>
            }) }
        </div>
    }
}
