use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use radindex_shared::profile::{
    Activity, ActivityKind, CLEARS_ERROR, ClearRecord, ClearsDocument, HistoryLoadTracker,
    NO_CLEARS, PLAYER_CLEARS_PATH, PLAYER_DATA_PATH, PlayerSummary, RankTier, group_thousands,
    history_key,
};

/// Start loading a history strip slightly before it scrolls into view.
const HISTORY_ROOT_MARGIN: &str = "50px";
const HISTORY_KEY_ATTR: &str = "data-history-key";

#[derive(Debug, Clone)]
enum HistoryState {
    Loading,
    Loaded(Vec<ClearRecord>),
    Failed,
}

struct HistorySlot {
    kind: ActivityKind,
    activity: String,
    state: RwSignal<HistoryState>,
}

struct HistoryObserver {
    observer: web_sys::IntersectionObserver,
    _callback: Closure<dyn Fn(js_sys::Array, web_sys::IntersectionObserver)>,
}

thread_local! {
    static HISTORY_OBSERVER: RefCell<Option<HistoryObserver>> = const { RefCell::new(None) };
    static HISTORY_SLOTS: RefCell<HashMap<String, HistorySlot>> = RefCell::new(HashMap::new());
    static LOADED_HISTORY: RefCell<HistoryLoadTracker> = RefCell::new(HistoryLoadTracker::default());
    static CLEARS_DOCUMENT: RefCell<Option<Rc<ClearsDocument>>> = const { RefCell::new(None) };
}

async fn fetch_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<T>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// The clears document is fetched once and shared by every history strip.
async fn clears_document() -> Result<Rc<ClearsDocument>, String> {
    if let Some(cached) = CLEARS_DOCUMENT.with(|slot| slot.borrow().clone()) {
        return Ok(cached);
    }
    let document = Rc::new(fetch_json::<ClearsDocument>(PLAYER_CLEARS_PATH).await?);
    CLEARS_DOCUMENT.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&document)));
    Ok(document)
}

async fn load_history(kind: ActivityKind, activity: String, state: RwSignal<HistoryState>) {
    let next = match clears_document().await {
        Ok(document) => HistoryState::Loaded(document.clears_for(kind, &activity).to_vec()),
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Clear history fetch failed for {activity}: {e}").into(),
            );
            HistoryState::Failed
        }
    };
    // The card may be gone by now.
    let _ = state.try_set(next);
}

fn on_history_visible(entries: js_sys::Array, observer: web_sys::IntersectionObserver) {
    for entry in entries.iter() {
        let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
            continue;
        };
        if !entry.is_intersecting() {
            continue;
        }
        let target = entry.target();
        let Some(key) = target.get_attribute(HISTORY_KEY_ATTR) else {
            continue;
        };
        if !LOADED_HISTORY.with(|tracker| tracker.borrow_mut().claim(&key)) {
            continue;
        }
        observer.unobserve(&target);
        let slot = HISTORY_SLOTS.with(|slots| {
            slots
                .borrow()
                .get(&key)
                .map(|slot| (slot.kind, slot.activity.clone(), slot.state))
        });
        if let Some((kind, activity, state)) = slot {
            spawn_local(load_history(kind, activity, state));
        }
    }
}

fn observe_history(element: &web_sys::Element) {
    HISTORY_OBSERVER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            let callback = Closure::<dyn Fn(js_sys::Array, web_sys::IntersectionObserver)>::new(
                on_history_visible,
            );
            let init = web_sys::IntersectionObserverInit::new();
            init.set_root_margin(HISTORY_ROOT_MARGIN);
            match web_sys::IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                &init,
            ) {
                Ok(observer) => {
                    *slot = Some(HistoryObserver {
                        observer,
                        _callback: callback,
                    });
                }
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("IntersectionObserver unavailable: {e:?}").into(),
                    );
                    return;
                }
            }
        }
        if let Some(binding) = slot.as_ref() {
            binding.observer.observe(element);
        }
    });
}

fn section_header_style() -> &'static str {
    "display: flex; align-items: center; justify-content: space-between; cursor: pointer; font-family: 'JetBrains Mono', monospace; font-size: 0.68rem; text-transform: uppercase; letter-spacing: 0.08em; color: #9a9590; padding: 8px 0;"
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let summary: RwSignal<Option<Result<PlayerSummary, String>>> = RwSignal::new(None);
    let kind = RwSignal::new(ActivityKind::Raid);

    spawn_local(async move {
        let result = fetch_json::<PlayerSummary>(PLAYER_DATA_PATH).await;
        if let Err(e) = &result {
            web_sys::console::warn_1(&format!("Player data fetch failed: {e}").into());
        }
        let _ = summary.try_set(Some(result));
    });

    let player = Memo::new(move |_| {
        summary.with(|s| s.as_ref().and_then(|r| r.as_ref().ok()).cloned())
    });
    let error = Memo::new(move |_| {
        summary.with(|s| s.as_ref().and_then(|r| r.as_ref().err()).cloned())
    });

    // Tab title follows the loaded player.
    Effect::new(move || {
        let Some(name) = player.with(|p| p.as_ref().map(|p| p.name.clone())) else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        document.set_title(&format!("{name}{}", radindex_shared::title::TAB_TITLE_SUFFIX));
    });

    view! {
        <div style="min-height: 100%; background: #0c0e17; color: #e2e0d8; font-family: 'Inter', system-ui, sans-serif;">
            <div style="max-width: 1200px; margin: 0 auto; padding: 32px 24px;">
                <ProfileHeader player=player kind=kind />
                {move || {
                    error
                        .get()
                        .map(|e| {
                            view! {
                                <div style="margin: 16px 0; font-size: 0.85rem; color: #ef4444;">
                                    {format!("Error loading player data: {e}")}
                                </div>
                            }
                        })
                }}
                <div
                    id="cardGrid"
                    style="display: grid; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); gap: 16px; margin-top: 24px;"
                >
                    {move || {
                        player
                            .get()
                            .map(|p| {
                                [ActivityKind::Raid, ActivityKind::Dungeon]
                                    .into_iter()
                                    .flat_map(|card_kind| {
                                        p.activities(card_kind)
                                            .iter()
                                            .cloned()
                                            .map(move |activity| (card_kind, activity))
                                            .collect::<Vec<_>>()
                                    })
                                    .map(|(card_kind, activity)| {
                                        view! {
                                            <ActivityCard
                                                activity=activity
                                                kind=card_kind
                                                visible=Signal::derive(move || kind.get() == card_kind)
                                            />
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn ProfileHeader(player: Memo<Option<PlayerSummary>>, kind: RwSignal<ActivityKind>) -> impl IntoView {
    let ranks = Memo::new(move |_| {
        let selected = kind.get();
        player.with(|p| p.as_ref().map(|p| p.rank_summary(selected)))
    });

    view! {
        <div style="display: flex; align-items: center; justify-content: space-between; gap: 24px; flex-wrap: wrap;">
            <div style="display: flex; align-items: center; gap: 16px;">
                <img
                    id="playerEmblem"
                    style="width: 64px; height: 64px; border-radius: 8px; background: #1a1d2a; object-fit: cover;"
                    src=move || player.with(|p| p.as_ref().map(|p| p.emblem_url.clone()).unwrap_or_default())
                    alt=""
                />
                <div>
                    <h1 id="playerName" style="margin: 0; font-size: 1.6rem;">
                        {move || player.with(|p| p.as_ref().map(|p| p.name.clone()).unwrap_or_default())}
                    </h1>
                    <div id="clanName" style="font-size: 0.85rem; color: #9a9590;">
                        {move || player.with(|p| p.as_ref().map(|p| p.clan.clone()).unwrap_or_default())}
                    </div>
                </div>
            </div>
            <div style="display: flex; align-items: center; gap: 12px;">
                <div
                    id="clearsRankBubble"
                    class=move || tier_class(ranks.with(|r| r.as_ref().map(|r| r.clears_rank)))
                    style="padding: 8px 14px; border-radius: 8px; background: #13161f; border: 1px solid #282c3e; text-align: center;"
                >
                    <div id="clearsRankLabel" style="font-size: 0.7rem; color: #9a9590;">
                        {move || ranks.with(|r| r.as_ref().map(|r| r.clears_label()).unwrap_or_default())}
                    </div>
                    <div id="clearsRankTime" style="font-family: 'JetBrains Mono', monospace; font-weight: 700;">
                        {move || ranks.with(|r| r.as_ref().map(|r| r.full_clears_label()).unwrap_or_default())}
                    </div>
                </div>
                <div
                    id="speedRankBubble"
                    class=move || tier_class(ranks.with(|r| r.as_ref().map(|r| r.speed_rank)))
                    style="padding: 8px 14px; border-radius: 8px; background: #13161f; border: 1px solid #282c3e; text-align: center;"
                >
                    <div id="speedRankLabel" style="font-size: 0.7rem; color: #9a9590;">
                        {move || ranks.with(|r| r.as_ref().map(|r| r.speed_label()).unwrap_or_default())}
                    </div>
                    <div id="speedRankTime" style="font-family: 'JetBrains Mono', monospace; font-weight: 700;">
                        {move || ranks.with(|r| r.as_ref().map(|r| r.speed_time.clone()).unwrap_or_default())}
                    </div>
                </div>
                <label style="display: flex; align-items: center; gap: 8px; font-size: 0.8rem; color: #9a9590; cursor: pointer;">
                    "Raids"
                    <input
                        type="checkbox"
                        id="view-toggle"
                        prop:checked=move || kind.get() == ActivityKind::Dungeon
                        on:change=move |_| kind.update(|k| {
                            *k = match *k {
                                ActivityKind::Raid => ActivityKind::Dungeon,
                                ActivityKind::Dungeon => ActivityKind::Raid,
                            };
                        })
                    />
                    "Dungeons"
                </label>
            </div>
        </div>
    }
}

#[component]
fn Collapsible(label: &'static str, children: Children) -> impl IntoView {
    let collapsed = RwSignal::new(false);

    view! {
        <div class=move || if collapsed.get() { "stats-row collapsed" } else { "stats-row" }>
            <div style=section_header_style() on:click=move |_| collapsed.update(|c| *c = !*c)>
                <span>{label}</span>
                <span style:transform=move || if collapsed.get() { "rotate(-90deg)" } else { "none" }>
                    "\u{25bc}"
                </span>
            </div>
            <div style:display=move || if collapsed.get() { "none" } else { "block" }>
                {children()}
            </div>
        </div>
    }
}

fn stat_line(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div style="display: flex; justify-content: space-between; font-size: 0.8rem; padding: 3px 0;">
            <span style="color: #9a9590;">{label}</span>
            <span style="font-family: 'JetBrains Mono', monospace;">{value}</span>
        </div>
    }
}

fn rank_text(rank: Option<u32>) -> String {
    rank.map_or_else(|| "N/A".to_string(), |rank| format!("#{rank}"))
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}

fn tier_class(rank: Option<u32>) -> String {
    let tier = rank.map_or(RankTier::Default, RankTier::from_rank);
    format!("rank-bubble {}", tier.css_class())
}

#[component]
fn ActivityCard(activity: Activity, kind: ActivityKind, visible: Signal<bool>) -> impl IntoView {
    let key = history_key(kind, &activity.activity_name);
    let state = RwSignal::new(HistoryState::Loading);
    HISTORY_SLOTS.with(|slots| {
        slots.borrow_mut().insert(
            key.clone(),
            HistorySlot {
                kind,
                activity: activity.activity_name.clone(),
                state,
            },
        );
    });

    let dots_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move || {
        if let Some(element) = dots_ref.get() {
            observe_history(&element);
        }
    });

    let total = activity.total_clears();
    let history = move || {
        state.with(|s| match s {
            HistoryState::Loading => view! {
                <div class="dots-loading" style="font-size: 0.78rem; color: #9a9590;">
                    {format!("Loading {total} clears...")}
                </div>
            }
            .into_any(),
            HistoryState::Loaded(records) if records.is_empty() => view! {
                <span style="font-size: 0.875rem; color: #9a9590;">{NO_CLEARS}</span>
            }
            .into_any(),
            HistoryState::Loaded(records) => records
                .iter()
                .map(|record| {
                    let clear_id = record.clear_id.clone();
                    let on_click = {
                        let clear_id = clear_id.clone();
                        move |_| web_sys::console::info_1(&format!("clear_selected={clear_id}").into())
                    };
                    view! {
                        <div
                            class=record.css_class()
                            title=record.tooltip()
                            data-clear-id=clear_id
                            style="width: 8px; height: 8px; border-radius: 2px; cursor: pointer;"
                            style:background=if record.completed { "#4ade80" } else { "#ef4444" }
                            on:click=on_click
                        />
                    }
                })
                .collect_view()
                .into_any(),
            HistoryState::Failed => view! {
                <span style="font-size: 0.875rem; color: #ef4444;">{CLEARS_ERROR}</span>
            }
            .into_any(),
        })
    };

    let modes = activity
        .mode_breakdown
        .iter()
        .map(|(mode, stats)| {
            view! {
                <tr>
                    <td class="mode-name">{mode.clone()}</td>
                    <td class="mode-clears">{stats.clears}</td>
                    <td class="mode-fastest">{or_na(stats.fastest.as_deref())}</td>
                </tr>
            }
        })
        .collect_view();
    let times = (
        stat_line("Fastest", activity.fastest_time.clone()),
        stat_line("Average", activity.average_time.clone()),
        stat_line("Sherpas", activity.sherpas_count.to_string()),
    );
    let stats = (
        stat_line("Kills", activity.kills.to_string()),
        stat_line("Deaths", activity.deaths.to_string()),
        stat_line("Assists", activity.assists.to_string()),
        stat_line("Total Time", activity.total_time_label().to_string()),
    );
    let recent = &activity.recent_stats;
    let recent = (
        stat_line("Clears (Past Day)", recent.past_day_clears.to_string()),
        stat_line("Clears (Past Week)", recent.past_week_clears.to_string()),
        stat_line("Fastest Time (Today)", or_na(recent.fastest_today.as_deref())),
        stat_line("Fastest Time (This Week)", or_na(recent.fastest_this_week.as_deref())),
    );
    let ranks = (
        stat_line("Full Clears Rank", rank_text(activity.full_clears_rank)),
        stat_line("Speed Rank", rank_text(activity.speed_rank)),
    );
    let name = activity.activity_name.clone();
    let full_clears = group_thousands(activity.full_clears_count);

    view! {
        <div
            class=kind.card_class()
            style="background: #13161f; border: 1px solid #282c3e; border-radius: 10px; overflow: hidden;"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <div style="padding: 18px 16px; background: linear-gradient(135deg, #1d2133, #13161f);">
                <h2 style="margin: 0; font-size: 1.05rem;">{name}</h2>
            </div>
            <div style="padding: 12px 16px;">
                <div style="display: flex; gap: 16px;">
                    <div style="flex: 1; min-width: 0;">
                        <div style=section_header_style()>"All Clears"</div>
                        <div
                            class="dots-container"
                            node_ref=dots_ref
                            data-history-key=key
                            style="display: flex; flex-wrap: wrap; gap: 3px; min-height: 16px;"
                        >
                            {history}
                        </div>
                    </div>
                    <div style="flex-shrink: 0; text-align: right;">
                        <div style=section_header_style()>"Full Clears"</div>
                        <div class="full-clears-count" style="font-family: 'JetBrains Mono', monospace; font-size: 1.2rem; font-weight: 700;">
                            {full_clears}
                        </div>
                    </div>
                </div>
                <div style="display: flex; gap: 16px; margin: 10px 0;">{times}</div>
                <Collapsible label="Stats">{stats}</Collapsible>
                <Collapsible label="Mode Breakdown">
                    <table class="mode-breakdown-table" style="width: 100%; font-size: 0.8rem; border-collapse: collapse;">
                        <thead>
                            <tr style="text-align: left; color: #9a9590;">
                                <th>"Mode"</th>
                                <th>"Clears"</th>
                                <th>"Fastest"</th>
                            </tr>
                        </thead>
                        <tbody>{modes}</tbody>
                    </table>
                </Collapsible>
                <Collapsible label="Recent">{recent}</Collapsible>
                <Collapsible label="Ranks">{ranks}</Collapsible>
            </div>
        </div>
    }
}
