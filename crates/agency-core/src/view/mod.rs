// ── List-view controller ──
//
// Owns one page's state: the full collection, remote status, filter,
// search, page state, selection and per-item flags. Everything the page
// renders is derived from here (`filtered` -> `visible`). Network calls
// live elsewhere; this type only records their start and completion, so
// it is fully synchronous and testable without a runtime.

mod reconcile;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::filter::{self, FilterState};
use crate::model::{CollectionItem, ItemId};
use crate::paginate::PageState;
use crate::store::ItemCollection;

/// Which of loading indicator / error panel / list is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    Loading,
    Error(String),
    Ready,
}

/// Issued when a fetch starts; completing with an outdated ticket is
/// harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result was written to the view.
    Applied,
    /// A newer fetch superseded this one; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: ItemCollection<T>,
    status: RemoteStatus,
    filter: FilterState,
    search: String,
    pager: PageState,
    initial_pager: PageState,
    selected: Option<ItemId>,
    busy: HashSet<ItemId>,
    image_failed: HashSet<ItemId>,
    generation: u64,
    in_flight: Option<u64>,
}

impl<T: CollectionItem> ListView<T> {
    /// A fresh view, `Loading` until the first fetch completes.
    pub fn new(pager: PageState) -> Self {
        Self {
            items: ItemCollection::new(),
            status: RemoteStatus::Loading,
            filter: FilterState::All,
            search: String::new(),
            pager,
            initial_pager: pager,
            selected: None,
            busy: HashSet::new(),
            image_failed: HashSet::new(),
            generation: 0,
            in_flight: None,
        }
    }

    /// Seed filter and page (e.g. from the address) before the first fetch.
    pub fn with_state(mut self, filter: FilterState, pager: PageState) -> Self {
        self.filter = filter;
        self.pager = pager;
        self
    }

    // ── Fetch lifecycle ──────────────────────────────────────────────

    /// Start a user-triggered refresh. Refused (`None`) while a fetch is
    /// already in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            debug!(collection = T::COLLECTION, "refresh ignored: fetch in flight");
            return None;
        }
        Some(self.issue_ticket())
    }

    /// Start a fetch unconditionally (mount). Any in-flight fetch becomes
    /// stale.
    pub fn restart_fetch(&mut self) -> FetchTicket {
        self.issue_ticket()
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = Some(self.generation);
        self.status = RemoteStatus::Loading;
        FetchTicket(self.generation)
    }

    /// Record a fetch result. On failure the previous collection stays.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<T>, CoreError>,
    ) -> FetchOutcome {
        if self.in_flight != Some(ticket.0) {
            debug!(
                collection = T::COLLECTION,
                ticket = ticket.0,
                "ignoring stale fetch result"
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(items) => {
                debug!(collection = T::COLLECTION, count = items.len(), "collection loaded");
                self.items.replace_all(items);
                self.status = RemoteStatus::Ready;
                self.after_collection_change();
            }
            Err(e) => {
                warn!(collection = T::COLLECTION, error = %e, "fetch failed");
                self.status = RemoteStatus::Error(e.user_message());
            }
        }
        FetchOutcome::Applied
    }

    pub fn status(&self) -> &RemoteStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == RemoteStatus::Loading
    }

    /// Whether the refresh control should be enabled.
    pub fn can_refresh(&self) -> bool {
        self.in_flight.is_none()
    }

    // ── Filter / search ──────────────────────────────────────────────

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Change the filter; page state resets when it actually changes.
    pub fn set_filter(&mut self, filter: FilterState) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.pager.reset();
        true
    }

    /// `set_filter` from a filter bar label (sentinel means all).
    pub fn select_label(&mut self, label: &str) -> bool {
        self.set_filter(FilterState::from_label::<T>(label))
    }

    /// Advance to the next filter bar option, wrapping around.
    pub fn cycle_filter(&mut self) -> bool {
        let options = self.filter_options();
        let current = self.filter.display::<T>().to_owned();
        let next = options
            .iter()
            .position(|o| *o == current)
            .map_or(0, |i| (i + 1) % options.len());
        match options.get(next) {
            Some(label) => {
                let label = label.clone();
                self.select_label(&label)
            }
            None => false,
        }
    }

    pub fn filter_options(&self) -> Vec<String> {
        filter::options(self.items.iter())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the search query; page state resets when it changes.
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.search == query {
            return false;
        }
        self.search = query;
        self.pager.reset();
        true
    }

    // ── Derived output ───────────────────────────────────────────────

    /// Full collection in server order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bumps on every change to the full collection.
    pub fn version(&self) -> u64 {
        self.items.version()
    }

    pub fn get(&self, id: &ItemId) -> Option<&T> {
        self.items.get(id)
    }

    /// Filter then search, in collection order.
    pub fn filtered(&self) -> Vec<&T> {
        filter::apply(self.items.iter(), &self.filter, &self.search)
    }

    /// The page window over `filtered()`.
    pub fn visible(&self) -> Vec<&T> {
        let filtered = self.filtered();
        self.pager.window(&filtered).to_vec()
    }

    // ── Paging ───────────────────────────────────────────────────────

    pub fn pager(&self) -> &PageState {
        &self.pager
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.pager.total_pages(self.filtered().len())
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let len = self.filtered().len();
        self.pager.go_to(page, len)
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.filtered().len();
        self.pager.next(len)
    }

    pub fn prev_page(&mut self) -> bool {
        let len = self.filtered().len();
        self.pager.prev(len)
    }

    pub fn load_more(&mut self) -> bool {
        let len = self.filtered().len();
        self.pager.load_more(len)
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.filtered().len())
    }

    /// The page state a filter change resets to.
    pub fn initial_pager(&self) -> PageState {
        self.initial_pager
    }

    // ── Selection / detail view ──────────────────────────────────────

    /// Open the detail view for `id`. Unknown ids are ignored.
    pub fn select(&mut self, id: &ItemId) -> bool {
        if self.items.contains(id) {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The open item, always the reconciled copy.
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref().and_then(|id| self.items.get(id))
    }

    pub fn selected_id(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    // ── Image failure state ──────────────────────────────────────────

    pub fn mark_image_failed(&mut self, id: &ItemId) {
        if self.items.contains(id) {
            self.image_failed.insert(id.clone());
        }
    }

    pub fn image_failed(&self, id: &ItemId) -> bool {
        self.image_failed.contains(id)
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Drop per-item state for ids that left the collection and keep the
    /// fixed page in range.
    fn after_collection_change(&mut self) {
        let items = &self.items;
        self.image_failed.retain(|id| items.contains(id));
        self.busy.retain(|id| items.contains(id));
        if self
            .selected
            .as_ref()
            .is_some_and(|id| !items.contains(id))
        {
            self.selected = None;
        }
        let len = self.filtered().len();
        self.pager.clamp(len);
    }
}
