use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::animated_button::{AnimatedButton, ButtonVariant};
use crate::components::animated_section::{AnimatedSection, SectionAnimation, Trigger};
use crate::config::{durations, eases, staggers};
use crate::motion::{use_responsive_motion, Breakpoint, MotionOptions, Props, Tween};
use crate::Route;

struct Feature {
    icon: &'static str,
    title: &'static str,
    text: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        icon: "🔊",
        title: "Pro-grade gear",
        text: "The same speakers and desks the big companies use, minus the markup.",
    },
    Feature {
        icon: "🚚",
        title: "Free metro travel",
        text: "Anywhere in the Perth metro area, delivery and pickup are on us.",
    },
    Feature {
        icon: "🛠️",
        title: "Setup included",
        text: "We arrive early, sound check everything and pack down after the last song.",
    },
    Feature {
        icon: "💸",
        title: "No hidden fees",
        text: "The quote you see is the price you pay. No surprises on the invoice.",
    },
];

const STATS: [(&str, &str); 3] = [("500+", "events powered"), ("45%", "average saving"), ("4.9★", "from our clients")];

#[function_component(Home)]
pub fn home() -> Html {
    let navigator = use_navigator();
    let hero = use_node_ref();

    use_responsive_motion((), Some(hero.clone()), MotionOptions::default(), |scope, breakpoint| {
        let words = scope.select(".hero-word");
        let (start, duration) = match breakpoint {
            // Narrow screens wrap the headline; a flat lift reads better there
            Breakpoint::Mobile => (Props::new().opacity(0.0).y(20.0), durations::SLOW),
            Breakpoint::Tablet => (Props::new().opacity(0.0).y(30.0).rotate_x(-30.0), durations::SLOW),
            Breakpoint::Desktop => (Props::new().opacity(0.0).y(40.0).rotate_x(-45.0), durations::DRAMATIC),
        };
        scope.set(&words, start)?;
        scope.accessible(
            &words,
            Tween::to(Props::new().opacity(1.0).y(0.0).rotate_x(0.0))
                .duration(duration)
                .ease(eases::SHARP)
                .stagger(staggers::CASCADE),
            None,
        )?;

        let tagline = scope.select(".hero-tagline");
        scope.slide_up(&tagline, 30.0, 0.6)?;

        let badges = scope.select(".hero-badge");
        scope.stagger_in(&badges, Props::new().opacity(0.0).scale(0.6), staggers::SLOW)?;
        Ok(None)
    });

    let to_quote = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Quote);
            }
        })
    };

    html! {
        <div class="home-page">
            <style>
                {r#"
                .home-page {
                    padding-top: 74px;
                    background: #fffbeb;
                    color: #1f2937;
                }
                .home-hero {
                    min-height: 80vh;
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    text-align: center;
                    perspective: 800px;
                    padding: 0 1rem;
                }
                .home-hero h1 {
                    font-size: 3.5rem;
                    font-weight: 800;
                }
                .hero-word {
                    display: inline-block;
                    margin: 0 0.4rem;
                }
                .hero-tagline {
                    font-size: 1.5rem;
                    color: #4b5563;
                    margin: 1.5rem 0 2rem 0;
                }
                .hero-badges {
                    display: flex;
                    gap: 1rem;
                    margin-top: 2rem;
                }
                .hero-badge {
                    background: #fef08a;
                    border-radius: 999px;
                    padding: 0.5rem 1rem;
                    font-weight: 600;
                }
                .home-section {
                    max-width: 64rem;
                    margin: 0 auto;
                    padding: 4rem 1rem;
                }
                .home-section h2 {
                    font-size: 2.25rem;
                    text-align: center;
                    margin-bottom: 2rem;
                }
                .feature-card {
                    background: white;
                    border-radius: 1rem;
                    padding: 1.5rem;
                    margin-bottom: 1rem;
                    box-shadow: 0 10px 25px rgba(0, 0, 0, 0.08);
                }
                .feature-icon {
                    font-size: 2rem;
                }
                .stat {
                    text-align: center;
                    margin-bottom: 1.5rem;
                }
                .stat-value {
                    font-size: 3rem;
                    font-weight: 800;
                    color: #f97316;
                }
                .home-cta {
                    text-align: center;
                }
                "#}
            </style>

            <section ref={hero} class="home-hero">
                <h1>
                    <span class="hero-word">{"Big"}</span>
                    <span class="hero-word">{"Sound."}</span>
                    <span class="hero-word">{"Small"}</span>
                    <span class="hero-word">{"Price."}</span>
                </h1>
                <p class="hero-tagline">{"Perth's most budget-friendly event audio specialists"}</p>
                <AnimatedButton onclick={to_quote.clone()}>
                    {"Get an Instant Quote"}
                </AnimatedButton>
                <div class="hero-badges">
                    <span class="hero-badge">{"Weddings"}</span>
                    <span class="hero-badge">{"Parties"}</span>
                    <span class="hero-badge">{"Corporate"}</span>
                </div>
            </section>

            <AnimatedSection class="home-section" animation={SectionAnimation::Slide} trigger={Trigger::Scroll}>
                <h2>{"Why Affordable Audio?"}</h2>
                <p>
                    {"Most audio companies charge for every cable and every kilometre. We bundle everything \
                      an event needs into one honest price."}
                </p>
            </AnimatedSection>

            <AnimatedSection class="home-section" animation={SectionAnimation::Stagger} trigger={Trigger::Scroll}>
                { for FEATURES.iter().map(|feature| html! {
                    <div class="feature-card">
                        <div class="feature-icon">{ feature.icon }</div>
                        <h3>{ feature.title }</h3>
                        <p>{ feature.text }</p>
                    </div>
                }) }
            </AnimatedSection>

            <AnimatedSection class="home-section" animation={SectionAnimation::Fade} trigger={Trigger::Scroll} delay={0.2}>
                { for STATS.iter().map(|(value, label)| html! {
                    <div class="stat">
                        <div class="stat-value">{ *value }</div>
                        <div>{ *label }</div>
                    </div>
                }) }
            </AnimatedSection>

            <AnimatedSection class={classes!("home-section", "home-cta")}>
                <h2>{"Ready to hear the difference?"}</h2>
                <AnimatedButton onclick={to_quote} variant={ButtonVariant::Secondary}>
                    {"Start My Quote"}
                </AnimatedButton>
            </AnimatedSection>
        </div>
    }
}
