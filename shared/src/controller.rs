use crate::catalog::{CUSTOM_DATE_TRIGGER, FilterCategory, SEASONAL_TRIGGER};
use crate::error::DateRangeError;
use crate::filter::{FilterState, FilterValue};
use crate::leaderboard::{self, EntityKind, LEADERBOARD_SIZE, LeaderboardEntry, StatKind};
use crate::pagination::{DEFAULT_PAGE_SIZE, Pagination, parse_page_size};
use crate::query::parse_filter_params;
use crate::selector::{CustomDateSelector, DateField, Endpoint, SeasonSelector, SubSelector};
use crate::title::{Labels, data_range_label, derive_title, fireteam_size_label};

/// Result of clicking a value in the available list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Activated,
    Opened(SubSelector),
    Ignored,
}

/// Everything the leaderboard table needs to draw one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardView {
    pub rows: Vec<LeaderboardEntry>,
    pub range_text: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub stat_header: &'static str,
    pub entity_header: &'static str,
    pub search_placeholder: &'static str,
}

fn trigger_for(value: &FilterValue) -> Option<SubSelector> {
    match value.as_literal()? {
        SEASONAL_TRIGGER => Some(SubSelector::Seasonal),
        CUSTOM_DATE_TRIGGER => Some(SubSelector::CustomDate),
        _ => None,
    }
}

/// Owns the filter store, both pickers and the leaderboard cursor. Every
/// user action is one method call; the render step reads the result back.
#[derive(Debug, Clone)]
pub struct LeaderboardController {
    filters: FilterState,
    seasons: SeasonSelector,
    dates: CustomDateSelector,
    open_selector: Option<SubSelector>,
    panel_open: bool,
    replace_hint: Option<FilterCategory>,
    labels: Labels,
    entity: EntityKind,
    stat: StatKind,
    rows: Vec<LeaderboardEntry>,
    pagination: Pagination,
}

impl Default for LeaderboardController {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaderboardController {
    pub fn new() -> Self {
        Self::with_filters(FilterState::from_catalog())
    }

    pub fn with_filters(filters: FilterState) -> Self {
        let labels = Labels::derive(&filters);
        let mut controller = Self {
            filters,
            seasons: SeasonSelector::default(),
            dates: CustomDateSelector::default(),
            open_selector: None,
            panel_open: false,
            replace_hint: None,
            labels,
            entity: EntityKind::default(),
            stat: StatKind::default(),
            rows: Vec::new(),
            pagination: Pagination::default(),
        };
        controller.reload(DEFAULT_PAGE_SIZE);
        controller
    }

    /// Mark values the page starts out with as active. Synthetic values
    /// also restore their payload into the matching picker.
    pub fn seed_active(&mut self, entries: impl IntoIterator<Item = (FilterCategory, FilterValue)>) {
        for (category, value) in entries {
            self.filters.offer(category, value.clone());
            if self.commit(category, value.clone()) {
                self.restore_payload(&value);
            }
        }
        self.refresh();
    }

    /// Activate the filters named in a query string. Only literal values are
    /// supported; trigger values activate as plain literals. Returns how many
    /// parameters took effect.
    pub fn hydrate(&mut self, search: &str) -> usize {
        let mut applied = 0;
        for (category, raw) in parse_filter_params(search) {
            let value = FilterValue::Literal(raw);
            self.filters.offer(category, value.clone());
            if self.commit(category, value) {
                applied += 1;
            }
        }
        self.refresh();
        applied
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn seasons(&self) -> &SeasonSelector {
        &self.seasons
    }

    pub fn dates(&self) -> &CustomDateSelector {
        &self.dates
    }

    pub fn open_selector(&self) -> Option<SubSelector> {
        self.open_selector
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn stat(&self) -> StatKind {
        self.stat
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Click on an available bubble. Trigger values open their picker.
    pub fn click_available(&mut self, category: FilterCategory, value: &FilterValue) -> ClickOutcome {
        if category == FilterCategory::TimePeriod
            && let Some(selector) = trigger_for(value)
        {
            self.show_selector(selector);
            return ClickOutcome::Opened(selector);
        }
        if !self.filters.is_available(category, value) || !self.commit(category, value.clone()) {
            return ClickOutcome::Ignored;
        }
        self.after_change(category);
        ClickOutcome::Activated
    }

    /// Click on an active bubble: remove it and return it to the available list.
    pub fn click_active(&mut self, category: FilterCategory, value: &FilterValue) -> bool {
        let Some(removed) = self.filters.deactivate(category, value) else {
            return false;
        };
        self.restore_payload(&removed);
        self.after_change(category);
        true
    }

    /// Activate `value`, first displacing the current value of a
    /// single-select category.
    fn commit(&mut self, category: FilterCategory, value: FilterValue) -> bool {
        let offered = value.available_form();
        let single = !category.is_multi_select();
        let reclaimable = single
            && self
                .filters
                .active(category)
                .iter()
                .any(|active| active.available_form() == offered);
        if !reclaimable && !self.filters.is_available(category, &offered) {
            return false;
        }
        if single {
            let displaced = self.filters.active(category).to_vec();
            for previous in displaced {
                if let Some(removed) = self.filters.deactivate(category, &previous) {
                    self.restore_payload(&removed);
                }
            }
        }
        self.filters.activate(category, value)
    }

    fn restore_payload(&mut self, value: &FilterValue) {
        match value {
            FilterValue::Seasonal(seasons) => self.seasons.restore(seasons),
            FilterValue::DateRange { start, end } => self.dates.restore(*start, *end),
            FilterValue::Literal(_) => {}
        }
    }

    fn after_change(&mut self, category: FilterCategory) {
        self.labels.title = derive_title(&self.filters);
        match category {
            FilterCategory::TimePeriod => self.labels.data_range = data_range_label(&self.filters),
            FilterCategory::FireteamSize => {
                self.labels.fireteam_size = fireteam_size_label(&self.filters);
            }
            FilterCategory::Type => self.reload(self.pagination.page_size()),
            _ => {}
        }
    }

    fn refresh(&mut self) {
        self.labels = Labels::derive(&self.filters);
        self.reload(self.pagination.page_size());
    }

    /// Regenerate the dataset for the active type and go back to page 1.
    fn reload(&mut self, page_size: usize) {
        let active_type = self
            .filters
            .active(FilterCategory::Type)
            .first()
            .and_then(FilterValue::as_literal);
        self.stat = StatKind::resolve(active_type);
        self.rows = leaderboard::generate(self.stat, self.entity, LEADERBOARD_SIZE);
        self.pagination.reset(self.rows.len(), page_size);
    }

    pub fn show_selector(&mut self, selector: SubSelector) {
        self.open_selector = Some(selector);
    }

    /// Cancel, backdrop click or Escape. Picker drafts are kept.
    pub fn close_selector(&mut self) -> bool {
        self.open_selector.take().is_some()
    }

    pub fn toggle_season(&mut self, season: u32) -> bool {
        self.seasons.toggle(season)
    }

    pub fn clear_seasons(&mut self) {
        self.seasons.clear();
    }

    /// Commit the picked seasons as the time period. An empty pick only closes.
    pub fn apply_seasons(&mut self) -> bool {
        self.open_selector = None;
        let Some(value) = self.seasons.to_value() else {
            return false;
        };
        self.commit_pick(value)
    }

    pub fn set_date_field(&mut self, endpoint: Endpoint, field: DateField, value: Option<i32>) {
        self.dates.set_field(endpoint, field, value);
    }

    pub fn clear_dates(&mut self) {
        self.dates.clear();
    }

    /// Commit the entered range as the time period. The picker stays open
    /// while the range is invalid.
    pub fn apply_dates(&mut self) -> Result<bool, DateRangeError> {
        let value = self.dates.to_value()?;
        self.open_selector = None;
        Ok(self.commit_pick(value))
    }

    /// Displacing an earlier pick restores its payload into the picker, so
    /// the value being committed is restored again afterwards.
    fn commit_pick(&mut self, value: FilterValue) -> bool {
        let committed = self.commit(FilterCategory::TimePeriod, value.clone());
        self.restore_payload(&value);
        if committed {
            self.after_change(FilterCategory::TimePeriod);
        }
        committed
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open
    }

    pub fn panel_toggle_label(&self) -> &'static str {
        if self.panel_open {
            "Hide filters"
        } else {
            "Show filters"
        }
    }

    /// Reload the board from the current filters and hide the panel.
    pub fn apply_panel(&mut self) {
        self.reload(self.pagination.page_size());
        self.panel_open = false;
    }

    /// Pointer entered an available bubble of `category`.
    pub fn hover_available(&mut self, category: FilterCategory) {
        self.replace_hint = (!category.is_multi_select()).then_some(category);
    }

    pub fn leave_available(&mut self) {
        self.replace_hint = None;
    }

    /// Whether the active `value` would be displaced by the hovered bubble.
    pub fn will_replace(&self, category: FilterCategory, value: &FilterValue) -> bool {
        self.replace_hint == Some(category) && self.filters.is_active(category, value)
    }

    /// Apply the rows-per-page input and return the size in effect.
    pub fn set_page_size(&mut self, input: &str) -> usize {
        let size = parse_page_size(input);
        self.pagination.reset(self.rows.len(), size);
        size
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev()
    }

    pub fn set_entity(&mut self, entity: EntityKind) {
        if self.entity == entity {
            return;
        }
        self.entity = entity;
        self.reload(self.pagination.page_size());
    }

    pub fn toggle_entity(&mut self) -> EntityKind {
        self.set_entity(self.entity.toggled());
        self.entity
    }

    pub fn view(&self) -> LeaderboardView {
        LeaderboardView {
            rows: self.pagination.slice(&self.rows).to_vec(),
            range_text: self.pagination.range_text(),
            prev_enabled: self.pagination.has_prev(),
            next_enabled: self.pagination.has_next(),
            stat_header: self.stat.header(),
            entity_header: self.entity.header(),
            search_placeholder: self.entity.search_placeholder(),
        }
    }
}
