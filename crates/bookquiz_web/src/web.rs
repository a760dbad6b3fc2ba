use bookquiz::config::SETTINGS_KEY;
use bookquiz::{
    dispatch, AppShell, Catalog, ClickTarget, LayoutState, MountedShell, Route, ScoreRecord,
    ShellConfig,
};
use leptos::ev::{self, MouseEvent};
use leptos::prelude::*;
use tracing::{debug, error, info, warn};
use wasm_bindgen::{JsCast, JsValue};

mod logging;
mod markdown;
mod shell;
mod storage;
mod viewport;
mod views;

use crate::ui_model::GridStyle;
use shell::{Footer, Header, ResetModal, Sidebar};
use storage::{local_storage_get_string, LocalStorageScoreStore};
use viewport::{current_viewport, WindowResize};
use views::{BookView, Home, NotFound};

const BOOKS_JSON: &str = include_str!("../assets/books.json");

type Shell = MountedShell<LocalStorageScoreStore, WindowResize>;

pub fn start() {
    let settings = local_storage_get_string(SETTINGS_KEY).map(|raw| ShellConfig::from_json(&raw));
    let config = match &settings {
        Some(Ok(cfg)) => cfg.clone(),
        _ => ShellConfig::default(),
    };
    logging::init(&config.log_level);
    if let Some(Err(e)) = settings {
        warn!("ignoring stored settings: {e}");
    }

    let catalog = Catalog::from_json(BOOKS_JSON).unwrap_or_else(|e| {
        error!("bundled catalog rejected: {e}");
        Catalog::empty()
    });
    info!(books = catalog.len(), "starting");

    mount_to_body(move || view! { <App config=config catalog=catalog /> });
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Click handler for in-app links: history navigation instead of a reload.
pub(super) fn follow(navigate: Callback<String>, href: String) -> impl Fn(MouseEvent) + 'static {
    move |ev: MouseEvent| {
        ev.prevent_default();
        navigate.run(href.clone());
    }
}

fn click_target(ev: &MouseEvent) -> ClickTarget {
    let Some(el) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
        return ClickTarget::Content;
    };
    if el.closest("[data-name='Sidebar']").ok().flatten().is_some() {
        return ClickTarget::Sidebar;
    }
    if el.get_attribute("data-name").as_deref() == Some("App") {
        ClickTarget::Backdrop
    } else {
        ClickTarget::Content
    }
}

fn show_install_prompt(ev: &web_sys::Event) {
    let prompt = js_sys::Reflect::get(ev, &JsValue::from_str("prompt"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    match prompt {
        Some(prompt) => {
            if let Err(e) = prompt.call0(ev) {
                warn!("install prompt failed: {e:?}");
            }
        }
        None => warn!("install event carries no prompt()"),
    }
}

#[component]
fn App(config: ShellConfig, catalog: Catalog) -> impl IntoView {
    let default_score = catalog.default_score();
    let catalog = StoredValue::new(catalog);

    let store = LocalStorageScoreStore::new(config.storage_key.clone());
    let shell = AppShell::new(&config, current_viewport(), default_score, store);
    let (layout, set_layout) = signal::<LayoutState>(shell.state().clone());

    let mounted: StoredValue<Shell, LocalStorage> = StoredValue::new_local(MountedShell::mount(
        shell,
        WindowResize,
        move |state: &LayoutState| set_layout.set(state.clone()),
    ));
    on_cleanup(move || {
        mounted.try_update_value(|m| m.unmount());
    });

    // Routing
    let (path, set_path) = signal(current_path());
    let popstate = window_event_listener(ev::popstate, move |_| set_path.set(current_path()));
    on_cleanup(move || popstate.remove());

    let route = Memo::new(move |_| catalog.with_value(|c| dispatch(&path.get(), c)));

    let navigate = Callback::new(move |href: String| {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&href)) {
                warn!("history push failed: {e:?}");
            }
        }
        debug!(%href, "navigate");
        set_path.set(href);

        // Picking a page closes the overlaid sidebar.
        if layout.with_untracked(|s| s.is_narrow_screen && s.sidebar_visible) {
            mounted.with_value(|m| m.toggle_sidebar());
        }
    });

    // Callbacks handed down to descendants.
    let update_score =
        Callback::new(move |next: ScoreRecord| mounted.with_value(|m| m.update_score(next)));
    let toggle_sidebar = Callback::new(move |()| mounted.with_value(|m| m.toggle_sidebar()));
    let toggle_reset = Callback::new(move |()| mounted.with_value(|m| m.toggle_reset()));
    let confirm_reset = Callback::new(move |()| mounted.with_value(|m| m.reset_score()));

    // Install prompt
    let deferred_prompt = StoredValue::new_local(None::<web_sys::Event>);
    let install_offer = window_event_listener_untyped("beforeinstallprompt", move |ev| {
        ev.prevent_default();
        deferred_prompt.set_value(Some(ev));
        mounted.with_value(|m| m.set_install_available(true));
    });
    on_cleanup(move || install_offer.remove());

    let install = Callback::new(move |()| {
        if let Some(ev) = deferred_prompt.try_update_value(|p| p.take()).flatten() {
            show_install_prompt(&ev);
        }
        mounted.with_value(|m| m.set_install_available(false));
    });

    let show_reset = Signal::derive(move || layout.with(|s| s.show_reset));

    view! {
        <div
            class="app-grid"
            data-name="App"
            style=move || layout.with(|s| GridStyle::for_layout(s).to_css())
            on:click=move |ev: MouseEvent| {
                let target = click_target(&ev);
                mounted.with_value(|m| m.click(target));
            }
        >
            <ResetModal show=show_reset on_close=toggle_reset on_confirm=confirm_reset />
            <Sidebar catalog=catalog layout=layout navigate=navigate on_menu=toggle_sidebar />
            <Header layout=layout navigate=navigate on_menu=toggle_sidebar on_install=install />
            <main class="app-main" data-name="Main">
                {move || match route.get() {
                    Route::Home => {
                        view! { <Home catalog=catalog layout=layout navigate=navigate /> }.into_any()
                    }
                    Route::Book(id) => {
                        view! {
                            <BookView catalog=catalog id=id layout=layout on_score=update_score />
                        }
                            .into_any()
                    }
                    Route::NotFound => view! { <NotFound navigate=navigate /> }.into_any(),
                }}
            </main>
            <Footer on_show_reset=toggle_reset />
        </div>
    }
}
