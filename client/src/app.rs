use leptos::prelude::*;

use std::cell::RefCell;

use radindex_shared::LeaderboardController;

use crate::filters::FilterPanel;
use crate::leaderboard::LeaderboardTable;
use crate::modals::{CustomDateModal, SeasonalModal};

struct KeydownBinding {
    window: web_sys::Window,
    _handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

/// The leaderboard page state. Every component reads and mutates it through
/// this context.
#[derive(Clone, Copy)]
pub(crate) struct Controller(pub RwSignal<LeaderboardController>);

pub(crate) fn query_string() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    let mut initial = LeaderboardController::new();
    let restored = initial.hydrate(&query_string());
    if restored > 0 {
        web_sys::console::info_1(&format!("query_filters_restored={restored}").into());
    }
    let controller = RwSignal::new(initial);
    provide_context(Controller(controller));

    let title = Memo::new(move |_| controller.with(|c| c.labels().title.clone()));
    let data_range = Memo::new(move |_| controller.with(|c| c.labels().data_range.clone()));
    let fireteam_size = Memo::new(move |_| controller.with(|c| c.labels().fireteam_size.clone()));

    // Tab title follows the derived heading.
    Effect::new(move || {
        let tab_title = controller.with(|c| c.labels().tab_title());
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        document.set_title(&tab_title);
    });

    // Escape closes whichever picker is open.
    Effect::new(move || {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            return;
        };

        KEYDOWN_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "keydown",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                if e.key() != "Escape" {
                    return;
                }
                if controller.with_untracked(|c| c.open_selector().is_some()) {
                    e.prevent_default();
                    controller.update(|c| {
                        c.close_selector();
                    });
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    view! {
        <div style="min-height: 100%; background: #0c0e17; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif;">
            <div style="max-width: 1100px; margin: 0 auto; padding: 32px 24px;">
                <div class="title-section" style="margin-bottom: 20px;">
                    <h1 style="font-size: 1.8rem; font-weight: 700; margin: 0 0 8px;">{move || title.get()}</h1>
                    <div style="display: flex; gap: 16px; font-family: 'JetBrains Mono', monospace; font-size: 0.78rem; color: #9a9590;">
                        <span class="data-range">{move || data_range.get()}</span>
                        <span class="fireteam-size">{move || fireteam_size.get()}</span>
                    </div>
                </div>
                <FilterPanel />
                <LeaderboardTable />
            </div>
            <SeasonalModal />
            <CustomDateModal />
        </div>
    }
}
