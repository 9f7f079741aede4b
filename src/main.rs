use std::rc::Rc;

use log::{info, warn, Level};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod motion;
mod pricing;
mod components {
    pub mod animated_button;
    pub mod animated_field;
    pub mod animated_section;
    pub mod selectable_card;
    pub mod selection_underline;
}
mod pages {
    pub mod home;
    pub mod quote;
}

use config::MotionConfig;
use pages::{home::Home, quote::PriceCalculator};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/quote")]
    Quote,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Quote => {
            info!("Rendering Quote page");
            html! { <PriceCalculator /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <div class="not-found">
                    <h1>{"404"}</h1>
                    <p>{"That page went quiet."}</p>
                    <Link<Route> to={Route::Home}>{"Back to the music"}</Link<Route>>
                </div>
            }
        },
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let listener = window.as_ref().and_then(|window| {
                let document = window.document()?;
                let scroll_callback = Closure::wrap(Box::new(move || {
                    let scroll_top = document
                        .document_element()
                        .map(|element| element.scroll_top())
                        .unwrap_or(0);
                    is_scrolled.set(scroll_top > 80);
                }) as Box<dyn FnMut()>);

                match window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref()) {
                    Ok(()) => Some(scroll_callback),
                    Err(err) => {
                        warn!("Could not watch scrolling: {:?}", err);
                        None
                    }
                }
            });

            move || {
                if let (Some(window), Some(scroll_callback)) = (window, listener) {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"affordable audio"}
                </Link<Route>>
                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Home} classes="nav-link">
                            {"Home"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu}>
                        <Link<Route> to={Route::Quote} classes="nav-quote-button">
                            {"Get a Quote"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    let motion_config = use_memo(|_| MotionConfig::default(), ());

    html! {
        <ContextProvider<Rc<MotionConfig>> context={motion_config}>
            <BrowserRouter>
                <Nav />
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<Rc<MotionConfig>>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
