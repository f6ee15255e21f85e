// ── Paginator ──
//
// Two policies over the filtered subset: fixed pages (blog, admin lists)
// and incremental reveal (portfolio). Both are pure windowing; state only
// changes through the explicit navigation methods.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageState {
    /// 1-based page of `size` items.
    Fixed { page: usize, size: usize },
    /// First `visible` items; "load more" adds `step`.
    Reveal { visible: usize, step: usize },
}

impl PageState {
    pub fn fixed(size: usize) -> Self {
        Self::Fixed {
            page: 1,
            size: size.max(1),
        }
    }

    pub fn reveal(step: usize) -> Self {
        let step = step.max(1);
        Self::Reveal {
            visible: step,
            step,
        }
    }

    /// Back to page 1 / the initial visible count.
    pub fn reset(&mut self) {
        match self {
            Self::Fixed { page, .. } => *page = 1,
            Self::Reveal { visible, step } => *visible = *step,
        }
    }

    /// Current window over `items`. Never longer than `items`.
    pub fn window<'a, U>(&self, items: &'a [U]) -> &'a [U] {
        let (start, len) = match *self {
            Self::Fixed { page, size } => (page.saturating_sub(1).saturating_mul(size), size),
            Self::Reveal { visible, .. } => (0, visible),
        };
        let start = start.min(items.len());
        let end = start.saturating_add(len).min(items.len());
        items.get(start..end).unwrap_or_default()
    }

    /// `ceil(len / size)` for fixed pages; `None` for reveal.
    pub fn total_pages(&self, len: usize) -> Option<usize> {
        match *self {
            Self::Fixed { size, .. } => Some(len.div_ceil(size)),
            Self::Reveal { .. } => None,
        }
    }

    pub fn page(&self) -> Option<usize> {
        match *self {
            Self::Fixed { page, .. } => Some(page),
            Self::Reveal { .. } => None,
        }
    }

    /// Jump to `target` when it lies in `[1, total_pages]`; otherwise a
    /// no-op. Returns whether the page changed.
    pub fn go_to(&mut self, target: usize, len: usize) -> bool {
        let total = self.total_pages(len);
        match self {
            Self::Fixed { page, .. } => {
                let Some(total) = total else { return false };
                if target == 0 || target > total || target == *page {
                    return false;
                }
                *page = target;
                true
            }
            Self::Reveal { .. } => false,
        }
    }

    pub fn next(&mut self, len: usize) -> bool {
        match self.page() {
            Some(page) => self.go_to(page.saturating_add(1), len),
            None => false,
        }
    }

    pub fn prev(&mut self, len: usize) -> bool {
        match self.page() {
            Some(page) => self.go_to(page.saturating_sub(1), len),
            None => false,
        }
    }

    /// Reveal `step` more items when some are still hidden.
    pub fn load_more(&mut self, len: usize) -> bool {
        match self {
            Self::Reveal { visible, step } if *visible < len => {
                *visible = visible.saturating_add(*step);
                true
            }
            _ => false,
        }
    }

    pub fn has_more(&self, len: usize) -> bool {
        matches!(*self, Self::Reveal { visible, .. } if visible < len)
    }

    /// Pull a fixed page back inside `[1, total_pages]` after the
    /// collection shrank. An empty collection sits on page 1.
    pub fn clamp(&mut self, len: usize) {
        let total = self.total_pages(len);
        if let (Self::Fixed { page, .. }, Some(total)) = (self, total) {
            let last = total.max(1);
            if *page > last {
                *page = last;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fixed_pages_partition_the_input() {
        let items: Vec<u32> = (0..8).collect();
        let mut pager = PageState::fixed(6);
        assert_eq!(pager.total_pages(items.len()), Some(2));
        assert_eq!(pager.window(&items), &[0, 1, 2, 3, 4, 5]);
        assert!(pager.go_to(2, items.len()));
        assert_eq!(pager.window(&items), &[6, 7]);
    }

    #[test]
    fn concatenated_pages_reconstruct_the_input() {
        let items: Vec<u32> = (0..23).collect();
        let mut pager = PageState::fixed(5);
        let total = pager.total_pages(items.len()).unwrap_or(0);
        let mut seen = Vec::new();
        for page in 1..=total {
            pager.go_to(page, items.len());
            let window = pager.window(&items);
            assert!(window.len() <= 5);
            seen.extend_from_slice(window);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn out_of_range_navigation_is_a_no_op() {
        let items: Vec<u32> = (0..8).collect();
        let mut pager = PageState::fixed(6);
        assert!(!pager.go_to(0, items.len()));
        assert!(!pager.go_to(3, items.len()));
        assert!(!pager.prev(items.len()));
        assert_eq!(pager.page(), Some(1));
        assert!(pager.next(items.len()));
        assert!(!pager.next(items.len()));
        assert_eq!(pager.page(), Some(2));
    }

    #[test]
    fn empty_input_yields_empty_window() {
        let items: Vec<u32> = Vec::new();
        let pager = PageState::fixed(6);
        assert_eq!(pager.total_pages(0), Some(0));
        assert!(pager.window(&items).is_empty());
        assert!(PageState::reveal(6).window(&items).is_empty());
    }

    #[test]
    fn reveal_extends_by_step_and_caps_at_len() {
        let items: Vec<u32> = (0..10).collect();
        let mut pager = PageState::reveal(6);
        let before = pager.window(&items).to_vec();
        assert_eq!(before.len(), 6);
        assert!(pager.has_more(items.len()));
        assert!(pager.load_more(items.len()));
        let after = pager.window(&items);
        assert_eq!(after.len(), 10);
        assert_eq!(&after[..6], before.as_slice());
        assert!(!pager.has_more(items.len()));
        assert!(!pager.load_more(items.len()));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut fixed = PageState::fixed(6);
        fixed.go_to(2, 12);
        fixed.reset();
        assert_eq!(fixed, PageState::fixed(6));

        let mut reveal = PageState::reveal(6);
        reveal.load_more(20);
        reveal.reset();
        assert_eq!(reveal, PageState::reveal(6));
    }

    #[test]
    fn clamp_pulls_page_back_after_shrink() {
        let mut pager = PageState::fixed(6);
        pager.go_to(2, 8);
        pager.clamp(5);
        assert_eq!(pager.page(), Some(1));
        pager.go_to(2, 8);
        pager.clamp(0);
        assert_eq!(pager.page(), Some(1));
    }
}
