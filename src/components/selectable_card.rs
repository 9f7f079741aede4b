use yew::prelude::*;

use crate::config::{durations, eases};
use crate::motion::{use_hover_motion, use_motion, Ease, MotionOptions, Props, Tween};

#[derive(Properties, PartialEq)]
pub struct SelectableCardProps {
    #[prop_or_default]
    pub children: Children,
    pub selected: bool,
    pub on_select: Callback<()>,
    #[prop_or_default]
    pub delay: f64,
}

/// Option card for the wizard's pickers. Entrance, hover and selection each
/// animate their own element so the three call sites never overlap.
#[function_component(SelectableCard)]
pub fn selectable_card(props: &SelectableCardProps) -> Html {
    let outer = use_node_ref();
    let face = use_node_ref();
    let delay = props.delay;
    let selected = props.selected;

    use_motion((), Some(outer.clone()), MotionOptions::default(), move |scope| {
        let card = scope.select(":scope > .card-face");
        scope.accessible(
            &card,
            Tween::from_to(
                Props::new().opacity(0.0).scale(0.8).rotate_y(15.0),
                Props::new().opacity(1.0).scale(1.0).rotate_y(0.0),
            )
            .duration(0.8)
            .delay(delay)
            .ease(Ease::BackOut),
            None,
        )?;
        Ok(None)
    });

    use_motion(selected, Some(face.clone()), MotionOptions::default(), move |scope| {
        if !selected {
            return Ok(None);
        }
        let body = scope.select(":scope > .card-body");
        scope.accessible(
            &body,
            Tween::to(
                Props::new()
                    .y(-10.0)
                    .box_shadow("0 25px 50px rgba(234, 179, 8, 0.3)")
                    .border_color("#eab308"),
            )
            .duration(0.5)
            .ease(eases::BOUNCE),
            None,
        )?;
        Ok(None)
    });

    use_hover_motion(
        outer.clone(),
        Tween::to(Props::new().scale(1.03)).duration(durations::FAST).ease(eases::SMOOTH),
        Tween::to(Props::new().scale(1.0)).duration(0.4).ease(eases::SMOOTH),
    );

    let onclick = {
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(()))
    };

    html! {
        <div ref={outer} class="selectable-card" {onclick}>
            <div ref={face} class="card-face">
                <div class={classes!("card-body", selected.then(|| "selected"))}>
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
