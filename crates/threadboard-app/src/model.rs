// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::ThreadId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Sender {
    /// Avatar fallback: first character of each word in the name, uppercased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRecord {
    pub id: ThreadId,
    pub sender: Sender,
    pub subject: String,
    pub preview: String,
    pub summary: String,
    pub message_count: u32,
    pub last_activity: String,
    pub is_unread: bool,
    pub is_important: bool,
    pub is_starred: bool,
}

impl ThreadRecord {
    pub fn message_count_label(&self) -> String {
        let suffix = if self.message_count == 1 { "" } else { "s" };
        format!("{} message{suffix}", self.message_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSelector {
    All,
    Unread,
    Important,
    Starred,
    Today,
    Week,
}

impl FilterSelector {
    pub const ALL: [Self; 6] = [
        Self::All,
        Self::Unread,
        Self::Important,
        Self::Starred,
        Self::Today,
        Self::Week,
    ];

    /// Selectors offered as quick-filter badges.
    pub const QUICK: [Self; 3] = [Self::Unread, Self::Important, Self::Starred];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Important => "important",
            Self::Starred => "starred",
            Self::Today => "today",
            Self::Week => "week",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "unread" => Some(Self::Unread),
            "important" => Some(Self::Important),
            "starred" => Some(Self::Starred),
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All emails",
            Self::Unread => "Unread only",
            Self::Important => "Important",
            Self::Starred => "Starred",
            Self::Today => "Today",
            Self::Week => "This week",
        }
    }

    pub const fn badge_label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Unread => "Unread",
            Self::Important => "Important",
            Self::Starred => "Starred",
            Self::Today => "Today",
            Self::Week => "Week",
        }
    }

    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|selector| selector.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    Nav,
    Search,
}
