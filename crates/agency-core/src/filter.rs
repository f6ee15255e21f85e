// ── Filter engine ──
//
// Derives the visible subset from the full collection: exact label match
// against the active `FilterState`, then case-insensitive search. Pure and
// order preserving.

use serde::{Deserialize, Serialize};

use crate::model::CollectionItem;

/// Active category/status selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterState {
    /// The sentinel: selects the full collection.
    #[default]
    All,
    /// Exact, case-sensitive label.
    Label(String),
}

impl FilterState {
    /// Build from a user-facing label; the collection's sentinel maps to `All`.
    pub fn from_label<T: CollectionItem>(label: &str) -> Self {
        if label.is_empty() || label == T::SENTINEL {
            Self::All
        } else {
            Self::Label(label.to_owned())
        }
    }

    /// The label as shown in a filter bar.
    pub fn display<T: CollectionItem>(&self) -> &str {
        match self {
            Self::All => T::SENTINEL,
            Self::Label(label) => label,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches<T: CollectionItem>(&self, item: &T) -> bool {
        match self {
            Self::All => true,
            Self::Label(label) => item.label() == label,
        }
    }
}

/// Items passing both the label filter and the search query, in
/// collection order.
pub fn apply<'a, T, I>(items: I, filter: &FilterState, search: &str) -> Vec<&'a T>
where
    T: CollectionItem,
    I: IntoIterator<Item = &'a T>,
{
    let needle = search.trim().to_lowercase();
    items
        .into_iter()
        .filter(|item| filter.matches(*item))
        .filter(|item| item.matches_search(&needle))
        .collect()
}

/// Filter bar options: the sentinel first, then the fixed label set or,
/// for collections without one, distinct labels in order of appearance.
pub fn options<'a, T, I>(items: I) -> Vec<String>
where
    T: CollectionItem,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = vec![T::SENTINEL.to_owned()];
    if T::known_labels().is_empty() {
        for item in items {
            if !out.iter().any(|seen| seen == item.label()) {
                out.push(item.label().to_owned());
            }
        }
    } else {
        out.extend(T::known_labels().iter().map(|l| (*l).to_owned()));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{portfolio_item, post};

    fn sample() -> Vec<crate::model::BlogPost> {
        vec![
            post("1", "Web Development"),
            post("2", "Branding"),
            post("3", "Web Development"),
            post("4", "web development"),
        ]
    }

    #[test]
    fn sentinel_returns_full_collection_in_order() {
        let items = sample();
        let out = apply(&items, &FilterState::All, "");
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn label_match_is_exact_and_order_preserving() {
        let items = sample();
        let out = apply(&items, &FilterState::Label("Web Development".into()), "");
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(out.iter().all(|p| p.category == "Web Development"));
    }

    #[test]
    fn search_is_case_insensitive_and_applied_after_filter() {
        let mut items = sample();
        items[0].title = "Rust for the Web".into();
        items[1].title = "RUST branding".into();
        let out = apply(&items, &FilterState::Label("Web Development".into()), "  rust ");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_str(), "1");
    }

    #[test]
    fn from_label_maps_sentinel() {
        use crate::model::BlogPost;
        assert_eq!(FilterState::from_label::<BlogPost>("All Posts"), FilterState::All);
        assert_eq!(
            FilterState::from_label::<BlogPost>("Branding"),
            FilterState::Label("Branding".into())
        );
        assert_eq!(FilterState::All.display::<BlogPost>(), "All Posts");
    }

    #[test]
    fn options_use_fixed_set_or_data() {
        let posts = sample();
        let blog_options = options(&posts);
        assert_eq!(blog_options[0], "All Posts");
        assert_eq!(blog_options.len(), 7);

        let items = vec![
            portfolio_item("a", "Mobile"),
            portfolio_item("b", "Web"),
            portfolio_item("c", "Mobile"),
        ];
        assert_eq!(options(&items), vec!["All", "Mobile", "Web"]);
    }
}
