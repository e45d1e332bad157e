// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const DEFAULT_PAGE_WINDOW: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

/// Page navigation control. Pages are 1-indexed; `delta` is how many sibling
/// pages stay visible on each side of the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    total_pages: usize,
    current_page: usize,
    delta: usize,
}

impl Pagination {
    pub const fn new(total_pages: usize, current_page: usize) -> Self {
        Self {
            total_pages,
            current_page,
            delta: DEFAULT_PAGE_WINDOW,
        }
    }

    pub const fn with_delta(mut self, delta: usize) -> Self {
        self.delta = delta;
        self
    }

    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    pub const fn delta(&self) -> usize {
        self.delta
    }

    pub fn tokens(&self) -> Vec<PageToken> {
        let total = self.total_pages;
        if total <= self.delta.saturating_mul(2).saturating_add(5) {
            return (1..=total).map(PageToken::Page).collect();
        }

        let left = self.current_page.saturating_sub(self.delta).max(2);
        let right = self.current_page.saturating_add(self.delta).min(total - 1);

        let mut tokens = vec![PageToken::Page(1)];
        if left > 2 {
            tokens.push(PageToken::Ellipsis);
        }
        tokens.extend((left..=right).map(PageToken::Page));
        if right < total - 1 {
            tokens.push(PageToken::Ellipsis);
        }
        tokens.push(PageToken::Page(total));
        tokens
    }

    pub const fn prev_disabled(&self) -> bool {
        self.current_page <= 1
    }

    pub const fn next_disabled(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Returns the page to switch to, or `None` when the request would be a no-op.
    pub fn request(&self, page: usize) -> Option<usize> {
        (page >= 1 && page <= self.total_pages && page != self.current_page).then_some(page)
    }

    pub fn prev(&self) -> Option<usize> {
        if self.prev_disabled() {
            return None;
        }
        self.request(self.current_page - 1)
    }

    pub fn next(&self) -> Option<usize> {
        if self.next_disabled() {
            return None;
        }
        self.request(self.current_page + 1)
    }
}
