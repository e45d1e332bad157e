// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// A professor the service could not tell apart from others with a similar name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub department: String,
}

/// Everything the answering service can say back for one turn, decoded at the
/// HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceReply {
    Disambiguation {
        candidates: Vec<Candidate>,
    },
    Summary {
        conversation_id: ConversationId,
        summary: String,
    },
    Answer {
        text: String,
    },
    Unrecognized,
}

impl ServiceReply {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Disambiguation { .. } => "disambiguation",
            Self::Summary { .. } => "summary",
            Self::Answer { .. } => "answer",
            Self::Unrecognized => "unrecognized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnFailure {
    Transport(String),
    HttpStatus { status: u16, detail: String },
    Decode(String),
    UnrecognizedShape,
}

impl fmt::Display for TurnFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(detail) => write!(f, "transport error: {detail}"),
            Self::HttpStatus { status, detail } if detail.is_empty() => {
                write!(f, "server returned {status}")
            }
            Self::HttpStatus { status, detail } => write!(f, "server error ({status}): {detail}"),
            Self::Decode(detail) => write!(f, "malformed response: {detail}"),
            Self::UnrecognizedShape => f.write_str("response shape not recognized"),
        }
    }
}

impl std::error::Error for TurnFailure {}

/// One outbound request: the question plus whatever the service needs to
/// thread the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    pub turn: TurnId,
    pub text: String,
    pub conversation_id: Option<ConversationId>,
    pub history: Vec<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    Chat,
    History,
}

impl TabKind {
    pub const ALL: [Self; 2] = [Self::Chat, Self::History];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::History => "Historial",
        }
    }
}
