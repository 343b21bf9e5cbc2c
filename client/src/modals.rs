use leptos::prelude::*;
use wasm_bindgen::JsCast;

use radindex_shared::date::selectable_years;
use radindex_shared::selector::SeasonSelector;
use radindex_shared::{DateField, Endpoint, SubSelector};

use crate::app::Controller;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const BACKDROP_STYLE: &str = "position: fixed; inset: 0; z-index: 50; display: flex; align-items: center; justify-content: center; background: rgba(6,7,12,0.72); backdrop-filter: blur(2px);";
const CONTAINER_STYLE: &str = "width: min(520px, calc(100vw - 32px)); background: #13161f; border: 1px solid #282c3e; border-radius: 10px; padding: 20px; box-shadow: 0 24px 48px rgba(0,0,0,0.45);";
const BUTTON_STYLE: &str = "padding: 6px 14px; border-radius: 4px; border: 1px solid #282c3e; background: transparent; color: #e2e0d8; cursor: pointer;";
const PRIMARY_BUTTON_STYLE: &str = "padding: 6px 14px; border-radius: 4px; border: none; background: #f5c542; color: #0c0e17; font-weight: 600; cursor: pointer;";
const SELECT_STYLE: &str = "flex: 1; background: #1a1d2a; border: 1px solid #282c3e; border-radius: 4px; color: #e2e0d8; font-family: 'JetBrains Mono', monospace; font-size: 0.75rem; padding: 6px; outline: none;";

/// Selected value of the `<select>` that fired `e`; the empty placeholder reads as `None`.
fn select_value(e: &web_sys::Event) -> Option<i32> {
    let select = e
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())?;
    select.value().parse::<i32>().ok()
}

/// Clicks that land on the dimmed backdrop itself, not on the dialog.
fn is_backdrop_click(e: &web_sys::MouseEvent) -> bool {
    match (e.target(), e.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

#[component]
pub fn SeasonalModal() -> impl IntoView {
    let Controller(controller) = expect_context::<Controller>();
    let open = Memo::new(move |_| {
        controller.with(|c| c.open_selector() == Some(SubSelector::Seasonal))
    });

    view! {
        <Show when=move || open.get()>
            <div
                id="seasonalModalBackdrop"
                style=BACKDROP_STYLE
                on:click=move |e| {
                    if is_backdrop_click(&e) {
                        controller.update(|c| {
                            c.close_selector();
                        });
                    }
                }
            >
                <div id="seasonalModalContainer" role="dialog" style=CONTAINER_STYLE>
                    <h2 style="margin: 0 0 14px; font-size: 1.1rem;">"Select Seasons"</h2>
                    <div
                        id="seasonBubblesGrid"
                        style="display: grid; grid-template-columns: repeat(6, 1fr); gap: 8px;"
                    >
                        {SeasonSelector::seasons()
                            .map(|season| {
                                let selected = move || controller.with(|c| c.seasons().is_selected(season));
                                view! {
                                    <span
                                        class=move || if selected() { "season-bubble selected" } else { "season-bubble" }
                                        style="padding: 6px 0; text-align: center; border-radius: 999px; font-family: 'JetBrains Mono', monospace; font-size: 0.75rem; cursor: pointer; user-select: none;"
                                        style:background=move || if selected() { "rgba(245,197,66,0.18)" } else { "#1a1d2a" }
                                        style:border=move || if selected() { "1px solid #f5c542" } else { "1px solid #282c3e" }
                                        on:click=move |_| controller.update(|c| {
                                            c.toggle_season(season);
                                        })
                                    >
                                        {format!("S{season}")}
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div style="display: flex; justify-content: flex-end; gap: 8px; margin-top: 18px;">
                        <button
                            id="seasonalModalClear"
                            style=BUTTON_STYLE
                            on:click=move |_| controller.update(|c| c.clear_seasons())
                        >
                            "Clear"
                        </button>
                        <button
                            id="seasonalModalCancel"
                            style=BUTTON_STYLE
                            on:click=move |_| controller.update(|c| {
                                c.close_selector();
                            })
                        >
                            "Cancel"
                        </button>
                        <button
                            id="seasonalModalApply"
                            style=PRIMARY_BUTTON_STYLE
                            on:click=move |_| controller.update(|c| {
                                c.apply_seasons();
                            })
                        >
                            "Apply"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn CustomDateModal() -> impl IntoView {
    let Controller(controller) = expect_context::<Controller>();
    let open = Memo::new(move |_| {
        controller.with(|c| c.open_selector() == Some(SubSelector::CustomDate))
    });
    let message = Memo::new(move |_| controller.with(|c| c.dates().validation_message()));
    let can_apply = Memo::new(move |_| controller.with(|c| c.dates().can_apply()));

    let on_apply = move |_| {
        controller.update(|c| {
            if let Err(e) = c.apply_dates() {
                web_sys::console::warn_1(&format!("custom date rejected: {e}").into());
            }
        });
    };

    view! {
        <Show when=move || open.get()>
            <div
                id="customDateModalBackdrop"
                style=BACKDROP_STYLE
                on:click=move |e| {
                    if is_backdrop_click(&e) {
                        controller.update(|c| {
                            c.close_selector();
                        });
                    }
                }
            >
                <div id="customDateModalContainer" role="dialog" style=CONTAINER_STYLE>
                    <h2 style="margin: 0 0 14px; font-size: 1.1rem;">"Custom Date Range"</h2>
                    <DateRow endpoint=Endpoint::Start label="Start date" />
                    <DateRow endpoint=Endpoint::End label="End date" />
                    {move || {
                        message
                            .get()
                            .map(|text| {
                                view! {
                                    <div
                                        id="dateValidationMessage"
                                        class="validation-message validation-error"
                                        style="margin-top: 10px; font-size: 0.78rem; color: #ef4444;"
                                    >
                                        {text}
                                    </div>
                                }
                            })
                    }}
                    <div style="display: flex; justify-content: flex-end; gap: 8px; margin-top: 18px;">
                        <button
                            id="customDateModalClear"
                            style=BUTTON_STYLE
                            on:click=move |_| controller.update(|c| c.clear_dates())
                        >
                            "Clear"
                        </button>
                        <button
                            id="customDateModalCancel"
                            style=BUTTON_STYLE
                            on:click=move |_| controller.update(|c| {
                                c.close_selector();
                            })
                        >
                            "Cancel"
                        </button>
                        <button
                            id="customDateModalApply"
                            style=PRIMARY_BUTTON_STYLE
                            style:opacity=move || if can_apply.get() { "1" } else { "0.4" }
                            disabled=move || !can_apply.get()
                            on:click=on_apply
                        >
                            "Apply"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn DateRow(endpoint: Endpoint, label: &'static str) -> impl IntoView {
    let Controller(controller) = expect_context::<Controller>();
    let date = Memo::new(move |_| controller.with(|c| *c.dates().date(endpoint)));
    let days = Memo::new(move |_| controller.with(|c| c.dates().day_options(endpoint)));

    let on_field = move |field: DateField| {
        move |e: web_sys::Event| {
            let value = select_value(&e);
            controller.update(|c| c.set_date_field(endpoint, field, value));
        }
    };

    view! {
        <div style="margin-bottom: 12px;">
            <div style="font-size: 0.75rem; color: #9a9590; margin-bottom: 6px;">{label}</div>
            <div style="display: flex; gap: 8px;">
                <select style=SELECT_STYLE on:change=on_field(DateField::Month)>
                    <option value="" selected=move || date.get().month.is_none()>"Month"</option>
                    {MONTH_NAMES
                        .iter()
                        .zip(1u32..)
                        .map(|(name, month)| {
                            view! {
                                <option
                                    value=month.to_string()
                                    selected=move || date.get().month == Some(month)
                                >
                                    {*name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <select style=SELECT_STYLE on:change=on_field(DateField::Day)>
                    <option value="" selected=move || date.get().day.is_none()>"Day"</option>
                    {move || {
                        days.get()
                            .map(|day| {
                                view! {
                                    <option
                                        value=day.to_string()
                                        selected=move || date.get().day == Some(day)
                                    >
                                        {day}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
                <select style=SELECT_STYLE on:change=on_field(DateField::Year)>
                    <option value="" selected=move || date.get().year.is_none()>"Year"</option>
                    {selectable_years()
                        .map(|year| {
                            view! {
                                <option
                                    value=year.to_string()
                                    selected=move || date.get().year == Some(year)
                                >
                                    {year}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
