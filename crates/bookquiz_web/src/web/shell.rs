use bookquiz::{Catalog, LayoutState, Route};
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use super::follow;
use crate::ui_model::{progress_label, sidebar_class};

#[component]
pub(super) fn Header(
    layout: ReadSignal<LayoutState>,
    navigate: Callback<String>,
    on_menu: Callback<()>,
    on_install: Callback<()>,
) -> impl IntoView {
    view! {
        <header class="app-header">
            <button
                class="icon-btn sidebar-toggle"
                title="Menu"
                on:click=move |ev: MouseEvent| {
                    // The grid would otherwise treat this as a dismiss click.
                    ev.stop_propagation();
                    on_menu.run(());
                }
            >
                "☰"
            </button>
            <h1 class="brand">
                <a href="/" on:click=follow(navigate, "/".to_string())>
                    "Bookquiz"
                </a>
            </h1>
            <Show when=move || layout.with(|s| s.show_install_button)>
                <button class="btn sm" title="Install as an app" on:click=move |_| on_install.run(())>
                    "Install"
                </button>
            </Show>
        </header>
    }
}

#[component]
pub(super) fn Sidebar(
    catalog: StoredValue<Catalog>,
    layout: ReadSignal<LayoutState>,
    navigate: Callback<String>,
    on_menu: Callback<()>,
) -> impl IntoView {
    let items = catalog.with_value(|c| {
        c.books()
            .iter()
            .map(|book| {
                let id = book.id;
                let href = Route::Book(id).href(c).unwrap_or_default();
                let progress = move || {
                    layout.with(|s| {
                        catalog.with_value(|c| {
                            c.get(id)
                                .map(|b| progress_label(s.score.progress_for(b)))
                                .unwrap_or_default()
                        })
                    })
                };
                view! {
                    <a
                        class="sidebar-item"
                        href=href.clone()
                        on:click=follow(navigate, href)
                    >
                        <span class="sidebar-label">{book.title.clone()}</span>
                        <span class="sidebar-pill">{progress}</span>
                    </a>
                }
            })
            .collect_view()
    });

    view! {
        <aside class=move || layout.with(sidebar_class) data-name="Sidebar">
            <div class="sidebar-header">
                <div class="sidebar-title">"Books"</div>
                <button class="icon-btn" title="Close" on:click=move |_| on_menu.run(())>
                    "×"
                </button>
            </div>
            <nav class="sidebar-section">{items}</nav>
        </aside>
    }
}

#[component]
pub(super) fn Footer(on_show_reset: Callback<()>) -> impl IntoView {
    view! {
        <footer class="app-footer">
            <span class="subtle">"Progress is saved in this browser."</span>
            <button class="btn sm ghost" on:click=move |_| on_show_reset.run(())>
                "Reset progress"
            </button>
        </footer>
    }
}

#[component]
pub(super) fn ResetModal(
    show: Signal<bool>,
    on_close: Callback<()>,
    on_confirm: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || show.get()>
            <div
                class="modal-backdrop"
                on:click=move |ev: MouseEvent| {
                    ev.stop_propagation();
                    on_close.run(());
                }
            >
                <div class="modal" role="dialog" on:click=|ev: MouseEvent| ev.stop_propagation()>
                    <h2>"Reset progress?"</h2>
                    <p>"Every quiz answer stored in this browser will be cleared."</p>
                    <div class="modal-actions">
                        <button class="btn ghost" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button class="btn danger" on:click=move |_| on_confirm.run(())>
                            "Reset"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
