use gloo_timers::callback::Timeout;
use log::info;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::animated_button::{AnimatedButton, ButtonVariant};
use crate::components::animated_field::AnimatedField;
use crate::components::selectable_card::SelectableCard;
use crate::components::selection_underline::TextSelectionUnderline;
use crate::config::{durations, eases};
use crate::motion::{
    use_motion, Cleanup, Ease, Length, MotionError, MotionOptions, MotionScope, Props, Tween, WebEngine,
};
use crate::pricing::{
    self, Quote, QuoteRequest, EVENT_KINDS, EXTRAS, HOURLY_RATE, INCLUDED_HOURS, MAX_GUESTS, MAX_HOURS,
    MIN_GUESTS, MIN_HOURS, MUSIC_GENRES,
};

struct StepCopy {
    title: &'static str,
    subtitle: &'static str,
}

const STEPS: [StepCopy; 9] = [
    StepCopy { title: "Welcome to Affordable Audio", subtitle: "Perth's most budget-friendly event audio specialists" },
    StepCopy { title: "Let's Get Started!", subtitle: "First, tell us who you are" },
    StepCopy { title: "What's the Occasion?", subtitle: "Every event deserves great sound" },
    StepCopy { title: "How Many People?", subtitle: "We need to know the crowd size" },
    StepCopy { title: "How Long is Your Event?", subtitle: "Duration affects equipment and setup" },
    StepCopy { title: "What's Your Vibe?", subtitle: "Music genre helps us prepare the right playlist" },
    StepCopy { title: "Any Extras?", subtitle: "Optional add-ons to make your event special" },
    StepCopy { title: "When's the Big Day?", subtitle: "We're booking up fast!" },
    StepCopy { title: "Here's What Others Charge...", subtitle: "vs. What We Charge" },
];

const REVEAL_STEP: usize = STEPS.len() - 1;
const FLASH_MS: u32 = 400;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Direction {
    Forward,
    Back,
}

impl Direction {
    /// Horizontal offset, in pixels, the entering panel starts from.
    fn entry_offset(self) -> f64 {
        match self {
            Direction::Forward => 100.0,
            Direction::Back => -100.0,
        }
    }

    fn tilt(self) -> f64 {
        match self {
            Direction::Forward => 15.0,
            Direction::Back => -15.0,
        }
    }
}

fn progress_percent(step: usize) -> f64 {
    (step + 1) as f64 / STEPS.len() as f64 * 100.0
}

fn advance(step: usize) -> usize {
    (step + 1).min(REVEAL_STEP)
}

fn retreat(step: usize) -> usize {
    step.saturating_sub(1)
}

fn reveal_price(scope: &MotionScope<WebEngine>) -> Result<(), MotionError> {
    let competitor = scope.select(".competitor-price");
    scope.accessible(
        &competitor,
        Tween::from_to(
            Props::new().opacity(0.0).scale(0.5).rotate(-10.0),
            Props::new().opacity(1.0).scale(1.0).rotate(0.0),
        )
        .duration(0.8)
        .delay(0.2)
        .ease(eases::BOUNCE),
        None,
    )?;

    let ours = scope.select(".our-price");
    scope.accessible(
        &ours,
        Tween::from_to(
            Props::new().opacity(0.0).scale(0.1).rotate(180.0),
            Props::new().opacity(1.0).scale(1.0).rotate(0.0),
        )
        .duration(1.2)
        .delay(0.6)
        .ease(eases::BOUNCE),
        None,
    )?;

    let savings = scope.select(".savings-highlight");
    scope.accessible(
        &savings,
        Tween::from_to(
            Props::new().opacity(0.0).scale(0.8).y(30.0),
            Props::new().opacity(1.0).scale(1.0).y(0.0),
        )
        .duration(0.8)
        .delay(1.4)
        .ease(Ease::BackOut),
        None,
    )?;

    // An endless pulse has no resting state worth jumping to
    if !scope.reduced_motion() {
        let cta = scope.select(".final-cta");
        scope.to(
            &cta,
            Tween::to(Props::new().scale(1.05).box_shadow("0 0 30px rgba(234, 179, 8, 0.6)"))
                .duration(0.8)
                .delay(2.2)
                .ease(eases::NATURAL)
                .repeat(-1)
                .yoyo(true),
        )?;
    }
    Ok(())
}

#[function_component(PriceCalculator)]
pub fn price_calculator() -> Html {
    let step = use_state(|| 0usize);
    let direction = use_state(|| None::<Direction>);
    let request = use_state(QuoteRequest::default);
    let quote = use_state(Quote::default);
    let flash = use_state(|| false);
    let root = use_node_ref();
    let stage = use_node_ref();
    let shown_step = use_mut_ref(|| None::<usize>);

    let current = *step;

    {
        let shown_step = shown_step.clone();
        use_motion(current, Some(root.clone()), MotionOptions::default(), move |scope| {
            let previous = shown_step.borrow_mut().replace(current);
            let bar = scope.select(".progress-bar");
            let duration = if previous.is_some() { 1.0 } else { durations::INSTANT };
            scope.accessible(
                &bar,
                Tween::from_to(
                    Props::new().width(Length::Percent(previous.map(progress_percent).unwrap_or(0.0))),
                    Props::new().width(Length::Percent(progress_percent(current))),
                )
                .duration(duration)
                .ease(Ease::Power3Out),
                None,
            )?;

            if current > 0 && current < REVEAL_STEP {
                let testimonial = scope.select(".floating-testimonial");
                scope.accessible(
                    &testimonial,
                    Tween::from_to(
                        Props::new().opacity(0.0).x(100.0).scale(0.8),
                        Props::new().opacity(1.0).x(0.0).scale(1.0),
                    )
                    .duration(0.8)
                    .delay(0.5)
                    .ease(Ease::BackOut),
                    None,
                )?;
            }
            Ok(None)
        });
    }

    let heading = *direction;
    use_motion((current, heading), Some(stage.clone()), MotionOptions::default(), move |scope| {
        // First render: nothing to transition from
        let Some(heading) = heading else {
            return Ok(None);
        };
        let panel = scope.select(":scope > .step-panel");
        scope.accessible(
            &panel,
            Tween::from_to(
                Props::new()
                    .opacity(0.0)
                    .x(heading.entry_offset())
                    .rotate_y(heading.tilt())
                    .scale(0.9),
                Props::new().opacity(1.0).x(0.0).rotate_y(0.0).scale(1.0),
            )
            .duration(0.8)
            .ease(Ease::Power3Out),
            None,
        )?;
        Ok(None)
    });

    let revealing = current == REVEAL_STEP;
    let reveal = {
        let flash = flash.clone();
        use_motion(revealing, Some(root.clone()), MotionOptions::default(), move |scope| {
            if !revealing {
                return Ok(None);
            }
            reveal_price(scope)?;
            if scope.reduced_motion() {
                return Ok(None);
            }

            flash.set(true);
            let timeout = {
                let flash = flash.clone();
                Timeout::new(FLASH_MS, move || flash.set(false))
            };
            Ok(Some(Cleanup::new(move || {
                timeout.cancel();
                flash.set(false);
            })))
        })
    };

    let on_next = {
        let step = step.clone();
        let direction = direction.clone();
        let request = request.clone();
        let quote = quote.clone();
        Callback::from(move |_: MouseEvent| {
            if *step == REVEAL_STEP - 1 {
                let calculated = pricing::calculate(&request);
                info!("Quote ready: ${} vs ${}", calculated.ours, calculated.competitor);
                quote.set(calculated);
            }
            direction.set(Some(Direction::Forward));
            step.set(advance(*step));
        })
    };

    let on_back = {
        let step = step.clone();
        let direction = direction.clone();
        Callback::from(move |_: MouseEvent| {
            direction.set(Some(Direction::Back));
            step.set(retreat(*step));
        })
    };

    let on_replay = {
        let reveal = reveal.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            reveal.restart();
        })
    };

    let edit = |apply: fn(&mut QuoteRequest, String)| {
        let request = request.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*request).clone();
            apply(&mut next, input.value());
            request.set(next);
        })
    };

    let choose = |apply: fn(&mut QuoteRequest, &str), value: &'static str| {
        let request = request.clone();
        Callback::from(move |_: ()| {
            let mut next = (*request).clone();
            apply(&mut next, value);
            request.set(next);
        })
    };

    let toggle_extra = |name: &'static str| {
        let request = request.clone();
        Callback::from(move |_: Event| {
            let mut next = (*request).clone();
            next.toggle_extra(name);
            request.set(next);
        })
    };

    let content = match current {
        0 => html! {
            <div class="step-welcome">
                <AnimatedField delay={0.2}>
                    <div class="hero-badge-wrap">
                        <img src="/assets/audio-setup.jpg" alt="Professional Audio Setup" class="welcome-image" />
                        <div class="discount-badge">{"50% OFF!"}</div>
                    </div>
                </AnimatedField>
                <AnimatedField delay={0.4}>
                    <h2>{"🎯 Quality Sound Without Breaking the Bank"}</h2>
                    <p>{"Tired of overpriced audio companies? We're here to change that!"}</p>
                </AnimatedField>
                <AnimatedField delay={0.6}>
                    <div class="callout callout-yellow">
                        <p>{"💡 Our mission: Professional audio at prices that make sense"}</p>
                    </div>
                </AnimatedField>
            </div>
        },
        1 => html! {
            <div class="step-contact">
                <AnimatedField delay={0.1}>
                    <label for="name">{"Your Name"}</label>
                    <input id="name" type="text" placeholder="What should we call you?"
                        value={request.name.clone()}
                        oninput={edit(|r, v| r.name = v)} />
                </AnimatedField>
                <AnimatedField delay={0.2}>
                    <label for="email">{"Email"}</label>
                    <input id="email" type="email" placeholder="your@email.com"
                        value={request.email.clone()}
                        oninput={edit(|r, v| r.email = v)} />
                </AnimatedField>
                <AnimatedField delay={0.3}>
                    <label for="phone">{"Phone"}</label>
                    <input id="phone" type="tel" placeholder="04XX XXX XXX"
                        value={request.phone.clone()}
                        oninput={edit(|r, v| r.phone = v)} />
                </AnimatedField>
            </div>
        },
        2 => html! {
            <div class="card-grid">
                { for EVENT_KINDS.iter().enumerate().map(|(i, kind)| html! {
                    <SelectableCard
                        key={kind.name}
                        selected={request.event_kind == kind.name}
                        on_select={choose(|r, v| r.event_kind = v.to_string(), kind.name)}
                        delay={i as f64 * 0.1}
                    >
                        <div class="card-icon">{ kind.icon }</div>
                        <div class="card-title">{ kind.name }</div>
                        <div class="card-note">{ format!("From ${}", kind.base_price) }</div>
                    </SelectableCard>
                }) }
            </div>
        },
        3 => html! {
            <div class="step-slider">
                <AnimatedField delay={0.2}>
                    <div class="big-number">{ request.guests.to_string() }</div>
                    <div class="big-number-label">{"Expected Guests"}</div>
                </AnimatedField>
                <AnimatedField delay={0.4}>
                    <input type="range"
                        min={MIN_GUESTS.to_string()}
                        max={MAX_GUESTS.to_string()}
                        value={request.guests.max(MIN_GUESTS).to_string()}
                        oninput={edit(|r, v| r.guests = v.parse().unwrap_or(MIN_GUESTS))} />
                    <div class="range-labels">
                        <span>{ format!("{} people", MIN_GUESTS) }</span>
                        <span>{ format!("{}+ people", MAX_GUESTS) }</span>
                    </div>
                </AnimatedField>
            </div>
        },
        4 => html! {
            <div class="step-slider">
                <AnimatedField delay={0.2}>
                    <div class="big-number">{ request.hours.to_string() }</div>
                    <div class="big-number-label">{"Hours"}</div>
                </AnimatedField>
                <AnimatedField delay={0.4}>
                    <input type="range"
                        min={MIN_HOURS.to_string()}
                        max={MAX_HOURS.to_string()}
                        value={request.hours.to_string()}
                        oninput={edit(|r, v| r.hours = v.parse().unwrap_or(INCLUDED_HOURS))} />
                    <div class="range-labels">
                        <span>{ format!("{} hours", MIN_HOURS) }</span>
                        <span>{ format!("{}+ hours", MAX_HOURS) }</span>
                    </div>
                </AnimatedField>
                <AnimatedField delay={0.6}>
                    <div class="callout callout-blue">
                        <p>
                            <strong>{"Pro tip: "}</strong>
                            { format!(
                                "Our base package includes {} hours. Additional hours are just ${} each!",
                                INCLUDED_HOURS, HOURLY_RATE
                            ) }
                        </p>
                    </div>
                </AnimatedField>
            </div>
        },
        5 => html! {
            <div class="card-grid">
                { for MUSIC_GENRES.iter().enumerate().map(|(i, genre)| html! {
                    <SelectableCard
                        key={*genre}
                        selected={request.genre == *genre}
                        on_select={choose(|r, v| r.genre = v.to_string(), *genre)}
                        delay={i as f64 * 0.05}
                    >
                        <div class="card-title">{ *genre }</div>
                    </SelectableCard>
                }) }
            </div>
        },
        6 => html! {
            <div class="extras-list">
                { for EXTRAS.iter().enumerate().map(|(i, extra)| html! {
                    <AnimatedField key={extra.name} delay={i as f64 * 0.1}>
                        <label class="extra-option">
                            <span>
                                <input type="checkbox"
                                    checked={request.has_extra(extra.name)}
                                    onchange={toggle_extra(extra.name)} />
                                <span class="extra-name">{ extra.name }</span>
                            </span>
                            <span class="extra-price">
                                { if extra.price == 0 { "Included".to_string() } else { format!("+${}", extra.price) } }
                            </span>
                        </label>
                    </AnimatedField>
                }) }
            </div>
        },
        7 => html! {
            <div class="step-date">
                <AnimatedField delay={0.2}>
                    <label for="date">{"Event Date"}</label>
                    <input id="date" type="date"
                        value={request.date.clone()}
                        oninput={edit(|r, v| r.date = v)} />
                </AnimatedField>
                <AnimatedField delay={0.5}>
                    <div class="callout callout-red">
                        <p>
                            <strong>{"Limited Time: "}</strong>
                            {"Book within 48 hours and save an extra 10%!"}
                        </p>
                    </div>
                </AnimatedField>
            </div>
        },
        _ => html! {
            <div class="step-reveal">
                <h3>{"Price Comparison"}</h3>
                <TextSelectionUnderline>
                <div class="price-columns">
                    <div class="competitor-price">
                        <h4>{"Typical Perth Audio Company"}</h4>
                        <div class="price">{ format!("${}", quote.competitor) }</div>
                        <ul>
                            <li>{"❌ Hidden fees"}</li>
                            <li>{"❌ Equipment rental extra"}</li>
                            <li>{"❌ Travel charges"}</li>
                            <li>{"❌ Setup fees"}</li>
                        </ul>
                    </div>
                    <div class="our-price">
                        <div class="deal-badge">{"BEST DEAL!"}</div>
                        <h4>{"Affordable Audio"}</h4>
                        <div class="price">{ format!("${}", quote.ours) }</div>
                        <ul>
                            <li>{"✅ All-inclusive pricing"}</li>
                            <li>{"✅ Equipment included"}</li>
                            <li>{"✅ Free Perth metro travel"}</li>
                            <li>{"✅ Professional setup"}</li>
                        </ul>
                    </div>
                </div>
                </TextSelectionUnderline>
                <div class="savings-highlight">
                    <div class="savings-amount">{ format!("You Save: ${}!", quote.savings()) }</div>
                    <p>
                        {"That's a "}
                        <strong>{ format!("{}% saving", quote.savings_percent()) }</strong>
                        {" compared to our competitors!"}
                    </p>
                </div>
                <div class="final-cta">
                    <AnimatedButton onclick={Callback::from(|_: MouseEvent| info!("Booking requested"))} class="book-now">
                        { format!("Book Now for ${}", quote.ours) }
                    </AnimatedButton>
                </div>
                <p class="fine-print">
                    {"Price valid for 48 hours • No hidden fees • 100% satisfaction guarantee"}
                </p>
                <a href="#" class="replay-link" onclick={on_replay}>{"Replay"}</a>
            </div>
        },
    };

    let copy = &STEPS[current];

    html! {
        <div ref={root} class="quote-page">
            <style>
                {r#"
                .quote-page {
                    min-height: 100vh;
                    padding-top: 74px;
                    background: linear-gradient(135deg, #fefce8 0%, #fff7ed 50%, #fef2f2 100%);
                    position: relative;
                    overflow: hidden;
                }
                .progress-track {
                    width: 100%;
                    height: 12px;
                    background: #e5e7eb;
                    overflow: hidden;
                }
                .progress-bar {
                    height: 12px;
                    background: linear-gradient(90deg, #facc15, #f97316, #ef4444);
                }
                .quote-container {
                    max-width: 56rem;
                    margin: 0 auto;
                    padding: 3rem 1rem;
                }
                .quote-header {
                    text-align: center;
                    margin-bottom: 3rem;
                }
                .quote-header h1 {
                    font-size: 3rem;
                    font-weight: 700;
                    color: #1f2937;
                }
                .quote-header p {
                    font-size: 1.5rem;
                    color: #4b5563;
                }
                .selection-underline {
                    position: relative;
                    user-select: text;
                }
                .selection-underline-layer {
                    position: absolute;
                    inset: 0;
                    width: 100%;
                    height: 100%;
                    overflow: visible;
                    pointer-events: none;
                }
                .step-counter {
                    margin-top: 1.5rem;
                    color: #6b7280;
                }
                .quote-stage {
                    perspective: 1200px;
                }
                .step-panel {
                    background: rgba(255, 255, 255, 0.95);
                    border-radius: 1rem;
                    box-shadow: 0 25px 50px rgba(0, 0, 0, 0.15);
                    padding: 2.5rem;
                    margin-bottom: 3rem;
                }
                .card-grid {
                    display: grid;
                    grid-template-columns: repeat(2, 1fr);
                    gap: 1rem;
                }
                .card-body {
                    padding: 1.5rem;
                    text-align: center;
                    border: 2px solid #e5e7eb;
                    border-radius: 0.75rem;
                    cursor: pointer;
                }
                .card-body.selected {
                    background: #fefce8;
                }
                .card-icon {
                    font-size: 2.25rem;
                    margin-bottom: 0.75rem;
                }
                .big-number {
                    font-size: 4.5rem;
                    font-weight: 700;
                    text-align: center;
                    color: #f97316;
                }
                .big-number-label {
                    text-align: center;
                    color: #4b5563;
                    font-size: 1.25rem;
                }
                .range-labels {
                    display: flex;
                    justify-content: space-between;
                    color: #6b7280;
                    font-size: 0.875rem;
                }
                .step-panel input[type="range"] {
                    width: 100%;
                }
                .step-panel input[type="text"],
                .step-panel input[type="email"],
                .step-panel input[type="tel"],
                .step-panel input[type="date"] {
                    width: 100%;
                    padding: 0.75rem 1rem;
                    border: 2px solid #d1d5db;
                    border-radius: 0.5rem;
                    font-size: 1.125rem;
                }
                .extra-option {
                    display: flex;
                    justify-content: space-between;
                    padding: 1.25rem;
                    border: 2px solid #d1d5db;
                    border-radius: 0.5rem;
                    margin-bottom: 1rem;
                    cursor: pointer;
                }
                .extra-price {
                    color: #ca8a04;
                    font-weight: 700;
                }
                .callout {
                    padding: 1.5rem;
                    border-radius: 0.5rem;
                }
                .callout-yellow { background: #fef9c3; border-left: 4px solid #eab308; }
                .callout-blue { background: #eff6ff; border: 1px solid #bfdbfe; }
                .callout-red { background: #fef2f2; border: 1px solid #fecaca; }
                .price-columns {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                    gap: 2rem;
                }
                .competitor-price,
                .our-price {
                    border-radius: 0.75rem;
                    padding: 2rem;
                    position: relative;
                    overflow: hidden;
                }
                .competitor-price { background: #fee2e2; border: 2px solid #fecaca; }
                .our-price { background: #d1fae5; border: 2px solid #22c55e; }
                .price {
                    font-size: 3rem;
                    font-weight: 700;
                }
                .deal-badge {
                    position: absolute;
                    top: 0.5rem;
                    right: -0.5rem;
                    background: #facc15;
                    padding: 0.5rem 1rem;
                    font-weight: 700;
                    transform: rotate(12deg);
                }
                .savings-highlight {
                    margin-top: 2.5rem;
                    padding: 2rem;
                    background: #fefce8;
                    border: 2px solid #facc15;
                    border-radius: 0.75rem;
                    text-align: center;
                }
                .final-cta {
                    margin-top: 2rem;
                    border-radius: 0.75rem;
                }
                .final-cta .animated-button {
                    width: 100%;
                    font-size: 1.5rem;
                    padding: 1.5rem 2rem;
                }
                .quote-nav {
                    display: flex;
                    justify-content: space-between;
                }
                .floating-testimonial {
                    position: fixed;
                    bottom: 1.5rem;
                    right: 1.5rem;
                    max-width: 20rem;
                    background: white;
                    border-left: 4px solid #eab308;
                    border-radius: 0.75rem;
                    box-shadow: 0 25px 50px rgba(0, 0, 0, 0.15);
                    padding: 1.5rem;
                }
                .screen-flash {
                    position: fixed;
                    inset: 0;
                    background: #facc15;
                    opacity: 0.3;
                    pointer-events: none;
                    z-index: 50;
                }
                "#}
            </style>

            {
                if *flash {
                    html! { <div class="screen-flash"></div> }
                } else {
                    html! {}
                }
            }

            <div class="progress-track">
                <div class="progress-bar" style={format!("width: {}%", progress_percent(current))}></div>
            </div>

            <div class="quote-container">
                <div class="quote-header" key={current}>
                    <AnimatedField delay={0.1}>
                        <TextSelectionUnderline>
                            <h1>{ copy.title }</h1>
                        </TextSelectionUnderline>
                    </AnimatedField>
                    <AnimatedField delay={0.2}>
                        <p>{ copy.subtitle }</p>
                    </AnimatedField>
                    <AnimatedField delay={0.3}>
                        <div class="step-counter">{ format!("Step {} of {}", current + 1, STEPS.len()) }</div>
                    </AnimatedField>
                </div>

                <div ref={stage} class="quote-stage">
                    <div class="step-panel" key={current}>
                        { content }
                    </div>
                </div>

                <div class="quote-nav">
                    <AnimatedButton onclick={on_back} variant={ButtonVariant::Secondary} disabled={current == 0}>
                        {"‹ Back"}
                    </AnimatedButton>
                    <AnimatedButton onclick={on_next} disabled={current == REVEAL_STEP}>
                        { if current == REVEAL_STEP - 1 { "Get My Quote ›" } else { "Next ›" } }
                    </AnimatedButton>
                </div>
            </div>

            {
                if current > 0 && current < REVEAL_STEP {
                    html! {
                        <div class="floating-testimonial">
                            <p><strong>{"Sarah M."}</strong></p>
                            <p>{"\"Saved $800 on my wedding audio!\""}</p>
                            <div class="stars">{"★★★★★"}</div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
