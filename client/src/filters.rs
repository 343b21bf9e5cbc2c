use leptos::prelude::*;

use radindex_shared::catalog::{CUSTOM_DATE_TRIGGER, SEASONAL_TRIGGER};
use radindex_shared::{FilterCategory, FilterValue};

use crate::app::Controller;

const BUBBLE_STYLE: &str = "display: inline-flex; align-items: center; gap: 6px; padding: 4px 12px; border-radius: 999px; font-size: 0.78rem; cursor: pointer; user-select: none; transition: background 0.15s, border-color 0.15s, opacity 0.15s;";

fn trigger_class(category: FilterCategory, value: &FilterValue) -> &'static str {
    if category != FilterCategory::TimePeriod {
        return "";
    }
    match value.as_literal() {
        Some(SEASONAL_TRIGGER) => " seasonal-filter-trigger",
        Some(CUSTOM_DATE_TRIGGER) => " custom-date-filter-trigger",
        _ => "",
    }
}

#[component]
pub fn FilterPanel() -> impl IntoView {
    let Controller(controller) = expect_context::<Controller>();
    let panel_open = Memo::new(move |_| controller.with(|c| c.panel_open()));
    let toggle_label = Memo::new(move |_| controller.with(|c| c.panel_toggle_label()));

    view! {
        <div style="background: #13161f; border: 1px solid #282c3e; border-radius: 8px; padding: 16px; margin-bottom: 20px;">
            <div style="display: flex; align-items: center; justify-content: space-between; gap: 12px;">
                <ActiveFilters />
                <div style="display: flex; gap: 8px; flex-shrink: 0;">
                    <Show when=move || panel_open.get()>
                        <button
                            id="filterApplyBtn"
                            style="padding: 6px 14px; background: #f5c542; color: #0c0e17; border: none; border-radius: 4px; font-weight: 600; cursor: pointer;"
                            on:click=move |_| controller.update(|c| c.apply_panel())
                        >
                            "Apply"
                        </button>
                    </Show>
                    <button
                        id="filterToggleBtn"
                        style="padding: 6px 14px; background: transparent; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px; cursor: pointer;"
                        on:click=move |_| controller.update(|c| {
                            c.toggle_panel();
                        })
                    >
                        {move || toggle_label.get()}
                    </button>
                </div>
            </div>
            <Show when=move || panel_open.get()>
                <div
                    id="filterCategoriesGrid"
                    style="display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 16px; margin-top: 16px;"
                >
                    {FilterCategory::ALL
                        .into_iter()
                        .map(|category| view! { <CategoryOptions category=category /> })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ActiveFilters() -> impl IntoView {
    let Controller(controller) = expect_context::<Controller>();
    let active = Memo::new(move |_| {
        controller.with(|c| {
            c.filters()
                .active_entries()
                .map(|(category, value)| (category, value.clone()))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div id="activeFiltersList" style="display: flex; flex-wrap: wrap; gap: 6px; min-height: 28px;">
            {move || {
                active
                    .get()
                    .into_iter()
                    .map(|(category, value)| {
                        let label = value.label();
                        let for_hint = value.clone();
                        let will_replace = Signal::derive(move || {
                            controller.with(|c| c.will_replace(category, &for_hint))
                        });
                        let on_click = move |_| {
                            controller.update(|c| {
                                c.click_active(category, &value);
                            });
                        };
                        view! {
                            <span
                                class=move || {
                                    if will_replace.get() {
                                        "active-filter-bubble type-filter-will-replace"
                                    } else {
                                        "active-filter-bubble"
                                    }
                                }
                                data-category=category.tag()
                                title="Remove filter"
                                style=BUBBLE_STYLE
                                style:background="rgba(245,197,66,0.12)"
                                style:border="1px solid rgba(245,197,66,0.4)"
                                style:opacity=move || if will_replace.get() { "0.45" } else { "1" }
                                on:click=on_click
                            >
                                {label}
                                <span style="color: #9a9590;">"\u{00d7}"</span>
                            </span>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn CategoryOptions(category: FilterCategory) -> impl IntoView {
    let Controller(controller) = expect_context::<Controller>();
    let available = Memo::new(move |_| controller.with(|c| c.filters().available(category).to_vec()));

    view! {
        <div>
            <div style="font-family: 'JetBrains Mono', monospace; font-size: 0.68rem; text-transform: uppercase; letter-spacing: 0.08em; color: #9a9590; margin-bottom: 8px;">
                {category.display_name()}
            </div>
            <div
                class="filter-options-list"
                data-category=category.tag()
                style="display: flex; flex-wrap: wrap; gap: 6px;"
                on:mouseleave=move |_| controller.update(|c| c.leave_available())
            >
                {move || {
                    available
                        .get()
                        .into_iter()
                        .map(|value| {
                            let class = format!("available-filter-bubble{}", trigger_class(category, &value));
                            let label = value.label();
                            let on_click = move |_| {
                                controller.update(|c| {
                                    c.click_available(category, &value);
                                });
                            };
                            view! {
                                <span
                                    class=class
                                    style=BUBBLE_STYLE
                                    style:background="#1a1d2a"
                                    style:border="1px solid #282c3e"
                                    on:mouseenter=move |_| controller.update(|c| c.hover_available(category))
                                    on:click=on_click
                                >
                                    {label}
                                </span>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
