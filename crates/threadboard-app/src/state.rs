// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FilterSelector, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Refreshing,
}

/// Refresh trigger state. Every trigger bumps `generation`; only a completion
/// carrying the current generation returns the phase to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshState {
    pub phase: RefreshPhase,
    pub generation: u64,
}

impl Default for RefreshState {
    fn default() -> Self {
        Self {
            phase: RefreshPhase::Idle,
            generation: 0,
        }
    }
}

impl RefreshState {
    pub fn is_refreshing(&self) -> bool {
        self.phase == RefreshPhase::Refreshing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub mode: InputMode,
    pub query: String,
    pub filter: FilterSelector,
    pub refresh: RefreshState,
    pub status_line: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            mode: InputMode::Nav,
            query: String::new(),
            filter: FilterSelector::All,
            refresh: RefreshState::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    EnterSearch,
    ExitSearch,
    PushQueryChar(char),
    PopQueryChar,
    ClearQuery,
    SetQuery(String),
    SetFilter(FilterSelector),
    NextFilter,
    PrevFilter,
    BeginRefresh,
    CompleteRefresh { generation: u64 },
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(InputMode),
    QueryChanged(String),
    FilterChanged(FilterSelector),
    RefreshStarted { generation: u64 },
    RefreshFinished { generation: u64 },
    StatusUpdated(String),
    StatusCleared,
}

impl DashboardState {
    pub fn with_filter(filter: FilterSelector) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::EnterSearch => self.set_mode(InputMode::Search),
            AppCommand::ExitSearch => self.set_mode(InputMode::Nav),
            AppCommand::PushQueryChar(ch) => {
                self.query.push(ch);
                vec![AppEvent::QueryChanged(self.query.clone())]
            }
            AppCommand::PopQueryChar => {
                if self.query.pop().is_none() {
                    return Vec::new();
                }
                vec![AppEvent::QueryChanged(self.query.clone())]
            }
            AppCommand::ClearQuery => self.set_query(String::new()),
            AppCommand::SetQuery(query) => self.set_query(query),
            AppCommand::SetFilter(filter) => self.set_filter(filter),
            AppCommand::NextFilter => self.rotate_filter(1),
            AppCommand::PrevFilter => self.rotate_filter(-1),
            AppCommand::BeginRefresh => {
                self.refresh.generation = self.refresh.generation.saturating_add(1);
                self.refresh.phase = RefreshPhase::Refreshing;
                vec![AppEvent::RefreshStarted {
                    generation: self.refresh.generation,
                }]
            }
            AppCommand::CompleteRefresh { generation } => {
                if !self.refresh.is_refreshing() || generation != self.refresh.generation {
                    return Vec::new();
                }
                self.refresh.phase = RefreshPhase::Idle;
                vec![AppEvent::RefreshFinished { generation }]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_mode(&mut self, mode: InputMode) -> Vec<AppEvent> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }

    fn set_query(&mut self, query: String) -> Vec<AppEvent> {
        if self.query == query {
            return Vec::new();
        }
        self.query = query;
        vec![AppEvent::QueryChanged(self.query.clone())]
    }

    fn set_filter(&mut self, filter: FilterSelector) -> Vec<AppEvent> {
        if self.filter == filter {
            return Vec::new();
        }
        self.filter = filter;
        vec![AppEvent::FilterChanged(filter)]
    }

    fn rotate_filter(&mut self, delta: isize) -> Vec<AppEvent> {
        let filters = FilterSelector::ALL;
        let current = filters
            .iter()
            .position(|filter| *filter == self.filter)
            .unwrap_or(0) as isize;
        let len = filters.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.set_filter(filters[next])
    }

    fn set_status(&mut self, message: String) -> AppEvent {
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}
