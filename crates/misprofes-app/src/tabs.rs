// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const TAB_TITLE_LIMIT: usize = 35;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab<T> {
    pub id: T,
    pub title: String,
    pub disabled: bool,
}

impl<T> Tab<T> {
    pub fn new(id: T, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            disabled: false,
        }
    }

    pub fn display_title(&self) -> String {
        truncate_title(&self.title)
    }
}

/// Ordered tabs with a single active entry. Disabled tabs can't be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStrip<T> {
    tabs: Vec<Tab<T>>,
    active: Option<T>,
}

impl<T: Copy + PartialEq> TabStrip<T> {
    pub fn new(tabs: Vec<Tab<T>>) -> Self {
        let active = tabs.first().map(|tab| tab.id);
        Self { tabs, active }
    }

    pub fn tabs(&self) -> &[Tab<T>] {
        &self.tabs
    }

    pub fn active(&self) -> Option<T> {
        self.active
    }

    pub fn active_index(&self) -> Option<usize> {
        let active = self.active?;
        self.tabs.iter().position(|tab| tab.id == active)
    }

    pub fn is_disabled(&self, id: T) -> bool {
        self.tabs
            .iter()
            .find(|tab| tab.id == id)
            .is_none_or(|tab| tab.disabled)
    }

    pub fn set_disabled(&mut self, id: T, disabled: bool) {
        if let Some(tab) = self.tabs.iter_mut().find(|tab| tab.id == id) {
            tab.disabled = disabled;
        }
    }

    /// Returns true when the active tab changed.
    pub fn select(&mut self, id: T) -> bool {
        if self.is_disabled(id) || self.active == Some(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Moves to the next enabled tab in `delta` direction, wrapping around.
    pub fn rotate(&mut self, delta: isize) -> Option<T> {
        let len = self.tabs.len() as isize;
        if len == 0 || delta == 0 {
            return None;
        }
        let start = self.active_index().unwrap_or(0) as isize;
        let step = delta.signum();
        let mut index = start;
        for _ in 0..len {
            index = (index + step).rem_euclid(len);
            let tab = &self.tabs[index as usize];
            if !tab.disabled {
                let id = tab.id;
                return self.select(id).then_some(id);
            }
        }
        None
    }
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TAB_TITLE_LIMIT {
        return title.to_owned();
    }
    let mut out: String = title.chars().take(TAB_TITLE_LIMIT).collect();
    out.push_str("...");
    out
}
