// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::TabKind;
use crate::tabs::{Tab, TabStrip};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub tabs: TabStrip<TabKind>,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut tabs = TabStrip::new(
            TabKind::ALL
                .iter()
                .map(|kind| Tab::new(*kind, kind.label()))
                .collect(),
        );
        tabs.set_disabled(TabKind::History, true);
        Self {
            tabs,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(TabKind),
    EnableHistory,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(TabKind),
    HistoryEnabled,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn active_tab(&self) -> TabKind {
        self.tabs.active().unwrap_or(TabKind::Chat)
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(kind) => {
                if self.tabs.select(kind) {
                    vec![AppEvent::TabChanged(kind)]
                } else {
                    Vec::new()
                }
            }
            AppCommand::EnableHistory => {
                if !self.tabs.is_disabled(TabKind::History) {
                    return Vec::new();
                }
                self.tabs.set_disabled(TabKind::History, false);
                vec![AppEvent::HistoryEnabled]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        self.tabs
            .rotate(delta)
            .map(AppEvent::TabChanged)
            .into_iter()
            .collect()
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::TabKind;

    #[test]
    fn history_tab_starts_disabled() {
        let mut state = AppState::default();
        assert_eq!(state.active_tab(), TabKind::Chat);
        assert!(state.dispatch(AppCommand::NextTab).is_empty());
        assert!(
            state
                .dispatch(AppCommand::SelectTab(TabKind::History))
                .is_empty()
        );
    }

    #[test]
    fn enabling_history_allows_rotation() {
        let mut state = AppState::default();
        assert_eq!(
            state.dispatch(AppCommand::EnableHistory),
            vec![AppEvent::HistoryEnabled]
        );
        assert!(state.dispatch(AppCommand::EnableHistory).is_empty());

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab(), TabKind::History);
        assert_eq!(events, vec![AppEvent::TabChanged(TabKind::History)]);

        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab(), TabKind::Chat);
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::SetStatus("pensando".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("pensando"));
        assert_eq!(events, vec![AppEvent::StatusUpdated("pensando".to_owned())]);

        let cleared = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
        assert_eq!(cleared, vec![AppEvent::StatusCleared]);
    }
}
