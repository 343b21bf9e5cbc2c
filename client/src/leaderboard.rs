use leptos::prelude::*;
use wasm_bindgen::JsCast;

use radindex_shared::leaderboard::EntityKind;

use crate::app::Controller;

const NAV_BUTTON_STYLE: &str = "padding: 4px 12px; border-radius: 4px; border: 1px solid #282c3e; background: #1a1d2a; color: #e2e0d8; font-family: 'JetBrains Mono', monospace; font-size: 0.75rem; cursor: pointer;";
const CELL_STYLE: &str = "padding: 9px 12px; border-bottom: 1px solid #1f2230;";

fn rank_class(rank: u32) -> &'static str {
    match rank {
        1 => "text-gold-gradient",
        2 => "text-silver-gradient",
        3 => "text-bronze-gradient",
        _ => "",
    }
}

#[component]
pub fn LeaderboardTable() -> impl IntoView {
    let Controller(controller) = expect_context::<Controller>();
    let board = Memo::new(move |_| controller.with(|c| c.view()));
    let page_size = Memo::new(move |_| controller.with(|c| c.pagination().page_size()));
    let clans = Memo::new(move |_| controller.with(|c| c.entity() == EntityKind::Clan));

    // Rows-per-page commits on blur or Enter; whatever size took effect is written back.
    let on_rows_change = move |e: web_sys::Event| {
        let Some(input) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let mut applied = 0;
        controller.update(|c| applied = c.set_page_size(&input.value()));
        input.set_value(&applied.to_string());
    };

    view! {
        <div style="background: #13161f; border: 1px solid #282c3e; border-radius: 8px; overflow: hidden;">
            <div style="display: flex; align-items: center; justify-content: space-between; gap: 12px; padding: 12px 16px; border-bottom: 1px solid #282c3e;">
                <input
                    type="text"
                    style="flex: 1; max-width: 320px; padding: 7px 12px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 6px; color: #e2e0d8; outline: none;"
                    placeholder=move || board.with(|b| b.search_placeholder)
                />
                <label style="display: flex; align-items: center; gap: 8px; font-size: 0.8rem; color: #9a9590; cursor: pointer;">
                    <input
                        type="checkbox"
                        id="clan-toggle"
                        prop:checked=move || clans.get()
                        on:change=move |_| controller.update(|c| {
                            c.toggle_entity();
                        })
                    />
                    "Clans"
                </label>
            </div>
            <table style="width: 100%; border-collapse: collapse; font-size: 0.85rem;">
                <thead>
                    <tr style="text-align: left; color: #9a9590; font-family: 'JetBrains Mono', monospace; font-size: 0.7rem; text-transform: uppercase; letter-spacing: 0.06em;">
                        <th style=CELL_STYLE>"Rank"</th>
                        <th style=CELL_STYLE>{move || board.with(|b| b.entity_header)}</th>
                        <th style=CELL_STYLE>{move || board.with(|b| b.stat_header)}</th>
                    </tr>
                </thead>
                <tbody id="leaderboardBody">
                    {move || {
                        board
                            .get()
                            .rows
                            .into_iter()
                            .map(|entry| {
                                view! {
                                    <tr>
                                        <td style=CELL_STYLE>
                                            <span
                                                class=rank_class(entry.rank)
                                                style="font-family: 'JetBrains Mono', monospace; font-weight: 700;"
                                            >
                                                {entry.rank}
                                            </span>
                                        </td>
                                        <td style=CELL_STYLE>{entry.name}</td>
                                        <td style=CELL_STYLE>
                                            <span style="font-family: 'JetBrains Mono', monospace;">{entry.stat_value}</span>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <div style="display: flex; align-items: center; justify-content: space-between; gap: 12px; padding: 12px 16px;">
                <label style="display: flex; align-items: center; gap: 8px; font-size: 0.78rem; color: #9a9590;">
                    "Rows"
                    <input
                        id="rowsPerPage"
                        type="number"
                        min="1"
                        style="width: 64px; padding: 4px 6px; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 4px; color: #e2e0d8; outline: none;"
                        prop:value=move || page_size.get().to_string()
                        on:change=on_rows_change
                    />
                </label>
                <div style="display: flex; align-items: center; gap: 10px;">
                    <button
                        id="prevPage"
                        style=NAV_BUTTON_STYLE
                        style:opacity=move || if board.with(|b| b.prev_enabled) { "1" } else { "0.35" }
                        disabled=move || !board.with(|b| b.prev_enabled)
                        on:click=move |_| controller.update(|c| {
                            c.prev_page();
                        })
                    >
                        "Prev"
                    </button>
                    <span
                        class="pagination-range"
                        style="font-family: 'JetBrains Mono', monospace; font-size: 0.78rem; color: #9a9590; min-width: 64px; text-align: center;"
                    >
                        {move || board.with(|b| b.range_text.clone())}
                    </span>
                    <button
                        id="nextPage"
                        style=NAV_BUTTON_STYLE
                        style:opacity=move || if board.with(|b| b.next_enabled) { "1" } else { "0.35" }
                        disabled=move || !board.with(|b| b.next_enabled)
                        on:click=move |_| controller.update(|c| {
                            c.next_page();
                        })
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </div>
    }
}
