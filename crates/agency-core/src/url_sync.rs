// ── URL sync (blog) ──
//
// Mirrors the blog's filter and page into the address query so a view is
// shareable. The category parameter is omitted for the sentinel and the
// page parameter on page 1. Updates go through `Navigator::replace`, never
// a new history entry.

use url::form_urlencoded;

use crate::filter::FilterState;
use crate::model::CollectionItem;
use crate::paginate::PageState;

const CATEGORY: &str = "category";
const PAGE: &str = "page";

/// Routing collaborator: current address plus history replacement.
pub trait Navigator {
    /// Current path and query, e.g. `/blog?page=2`.
    fn current(&self) -> String;
    /// Replace the current address without adding a history entry.
    fn replace(&mut self, address: &str);
}

/// Filter and page as encoded in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: FilterState,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: FilterState::All,
            page: 1,
        }
    }
}

impl ListQuery {
    /// Parse a query (`?` optional). Absent values take defaults; a page
    /// that is not a positive integer falls back to 1.
    pub fn parse<T: CollectionItem>(query: &str) -> Self {
        let mut parsed = Self::default();
        let query = query.trim_start_matches('?');
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                CATEGORY => parsed.filter = FilterState::from_label::<T>(value.trim()),
                PAGE => {
                    parsed.page = value
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|p| *p >= 1)
                        .unwrap_or(1);
                }
                _ => {}
            }
        }
        parsed
    }

    /// Extract and parse the query part of an address.
    pub fn from_address<T: CollectionItem>(address: &str) -> Self {
        address
            .split_once('?')
            .map_or_else(Self::default, |(_, query)| {
                Self::parse::<T>(query.split('#').next().unwrap_or_default())
            })
    }

    /// Encoded query without the leading `?`; empty when everything is at
    /// its default.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let FilterState::Label(label) = &self.filter {
            serializer.append_pair(CATEGORY, label);
        }
        if self.page > 1 {
            serializer.append_pair(PAGE, &self.page.to_string());
        }
        serializer.finish()
    }

    /// Page state for a fixed-page view of `size`.
    pub fn page_state(&self, size: usize) -> PageState {
        PageState::Fixed {
            page: self.page.max(1),
            size: size.max(1),
        }
    }
}

/// `path` plus `?query` when the query is non-empty.
pub fn address(path: &str, query: &ListQuery) -> String {
    let encoded = query.to_query();
    if encoded.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{encoded}")
    }
}

/// Keeps a navigator's address in step with a list view.
#[derive(Debug)]
pub struct UrlSync<N> {
    navigator: N,
    path: String,
    last: ListQuery,
}

impl<N: Navigator> UrlSync<N> {
    /// Seed from the navigator's current address.
    pub fn mount<T: CollectionItem>(navigator: N) -> Self {
        let current = navigator.current();
        let path = current
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_owned();
        let last = ListQuery::from_address::<T>(&current);
        Self {
            navigator,
            path,
            last,
        }
    }

    /// The state parsed at mount (or last written).
    pub fn query(&self) -> &ListQuery {
        &self.last
    }

    /// Write the address for the given state when it differs from the
    /// navigator's. Compared by address, so an unparsable mounted query
    /// is normalized on the first sync.
    pub fn sync(&mut self, filter: &FilterState, pager: &PageState) {
        let next = ListQuery {
            filter: filter.clone(),
            page: pager.page().unwrap_or(1),
        };
        let target = address(&self.path, &next);
        if target != self.navigator.current() {
            tracing::debug!(address = %target, "replacing address");
            self.navigator.replace(&target);
        }
        self.last = next;
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

/// In-memory navigator: a history stack whose top is the current address.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            history: vec![address.into()],
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> String {
        self.history.last().cloned().unwrap_or_else(|| "/".to_owned())
    }

    fn replace(&mut self, address: &str) {
        match self.history.last_mut() {
            Some(top) => address.clone_into(top),
            None => self.history.push(address.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::BlogPost;

    #[test]
    fn bare_address_seeds_defaults() {
        let sync = UrlSync::mount::<BlogPost>(MemoryNavigator::new("/blog"));
        assert_eq!(sync.query(), &ListQuery::default());
        assert_eq!(sync.query().filter.display::<BlogPost>(), "All Posts");
    }

    #[test]
    fn selecting_a_category_rewrites_the_address() {
        let mut sync = UrlSync::mount::<BlogPost>(MemoryNavigator::new("/blog"));
        sync.sync(
            &FilterState::Label("UX/UI Design".into()),
            &PageState::fixed(6),
        );
        insta::assert_snapshot!(sync.navigator().current(), @"/blog?category=UX%2FUI+Design");
        assert_eq!(sync.navigator().history().len(), 1);
    }

    #[test]
    fn page_parameter_appears_after_page_one() {
        let mut sync = UrlSync::mount::<BlogPost>(MemoryNavigator::new("/blog?category=Branding"));
        sync.sync(
            &FilterState::Label("Branding".into()),
            &PageState::Fixed { page: 2, size: 6 },
        );
        insta::assert_snapshot!(sync.navigator().current(), @"/blog?category=Branding&page=2");

        sync.sync(&FilterState::All, &PageState::fixed(6));
        assert_eq!(sync.navigator().current(), "/blog");
    }

    #[test]
    fn parse_round_trips_encoded_category() {
        let query = ListQuery::parse::<BlogPost>("?category=UX%2FUI+Design&page=3");
        assert_eq!(query.filter, FilterState::Label("UX/UI Design".into()));
        assert_eq!(query.page, 3);
    }

    #[test]
    fn unparsable_or_zero_page_falls_back_to_one() {
        assert_eq!(ListQuery::parse::<BlogPost>("page=abc").page, 1);
        assert_eq!(ListQuery::parse::<BlogPost>("page=0").page, 1);
        assert_eq!(ListQuery::parse::<BlogPost>("page=-2").page, 1);
    }

    #[test]
    fn sentinel_category_parses_as_all() {
        let query = ListQuery::from_address::<BlogPost>("/blog?category=All+Posts#top");
        assert_eq!(query.filter, FilterState::All);
    }

    #[test]
    fn unchanged_state_does_not_touch_the_navigator() {
        let mut sync = UrlSync::mount::<BlogPost>(MemoryNavigator::new("/blog?page=2"));
        sync.sync(&FilterState::All, &PageState::Fixed { page: 2, size: 6 });
        assert_eq!(sync.navigator().current(), "/blog?page=2");
    }

    #[test]
    fn first_sync_rewrites_an_unparsable_page() {
        let mut sync = UrlSync::mount::<BlogPost>(MemoryNavigator::new("/blog?page=abc"));
        assert_eq!(sync.query(), &ListQuery::default());

        sync.sync(&FilterState::All, &PageState::fixed(6));
        assert_eq!(sync.navigator().current(), "/blog");
        assert_eq!(sync.navigator().history().len(), 1);
    }
}
