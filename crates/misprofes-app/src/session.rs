// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::{ConversationId, TurnId};
use crate::model::{Candidate, Message, ServiceReply, TurnFailure, TurnRequest};

pub const FALLBACK_MESSAGE: &str =
    "No pude conectarme con el servicio de consultas. Intenta de nuevo en unos momentos.";
const DISAMBIGUATION_INTRO: &str = "Encontré varios profesores que coinciden con tu búsqueda:";
const DISAMBIGUATION_OUTRO: &str =
    "¿A cuál te refieres? Escribe el nombre completo o el departamento para continuar.";

/// The remote collaborator that answers one turn at a time.
pub trait AnsweringService {
    fn ask(&mut self, request: &TurnRequest) -> Result<ServiceReply, TurnFailure>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Ready,
    Awaiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Rejected(RejectReason),
    Dispatched(TurnRequest),
}

/// What settling a turn did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub turn: TurnId,
    pub message_index: usize,
    pub adopted: Option<ConversationId>,
    pub failure: Option<TurnFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationSession {
    log: Vec<Message>,
    conversation_id: Option<ConversationId>,
    pending_input: String,
    in_flight: Option<TurnId>,
    last_turn: u64,
    active: bool,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &[Message] {
        &self.log
    }

    pub fn conversation_id(&self) -> Option<&ConversationId> {
        self.conversation_id.as_ref()
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    pub fn push_input(&mut self, ch: char) {
        self.pending_input.push(ch);
    }

    pub fn pop_input(&mut self) {
        self.pending_input.pop();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_awaiting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight_turn(&self) -> Option<TurnId> {
        self.in_flight
    }

    pub fn phase(&self) -> SessionPhase {
        if self.in_flight.is_some() {
            SessionPhase::Awaiting
        } else if self.active {
            SessionPhase::Ready
        } else {
            SessionPhase::Idle
        }
    }

    /// Records the user's message and hands back the request to send. The
    /// message is in the log before any network work starts.
    pub fn submit(&mut self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            return Submission::Rejected(RejectReason::Empty);
        }
        if self.in_flight.is_some() {
            return Submission::Rejected(RejectReason::Busy);
        }

        self.active = true;
        self.log.push(Message::user(text));
        self.pending_input.clear();

        self.last_turn = self.last_turn.saturating_add(1);
        let turn = TurnId::new(self.last_turn);
        self.in_flight = Some(turn);

        Submission::Dispatched(TurnRequest {
            turn,
            text: text.to_owned(),
            conversation_id: self.conversation_id.clone(),
            history: self.log.clone(),
        })
    }

    pub fn submit_pending(&mut self) -> Submission {
        let input = self.pending_input.clone();
        self.submit(&input)
    }

    /// Closes the in-flight turn with exactly one assistant message. Outcomes
    /// for any other turn are stale and ignored.
    pub fn settle(
        &mut self,
        turn: TurnId,
        outcome: Result<ServiceReply, TurnFailure>,
    ) -> Option<Settlement> {
        if self.in_flight != Some(turn) {
            return None;
        }
        self.in_flight = None;

        let (text, adopted, failure) = match outcome.and_then(resolve_reply) {
            Ok((text, adopted)) => (text, adopted, None),
            Err(failure) => (FALLBACK_MESSAGE.to_owned(), None, Some(failure)),
        };

        if let Some(id) = &adopted {
            self.conversation_id = Some(id.clone());
        }
        self.log.push(Message::assistant(text));

        Some(Settlement {
            turn,
            message_index: self.log.len() - 1,
            adopted,
            failure,
        })
    }

    /// Submits and settles one turn against a blocking service.
    pub fn run_turn<S: AnsweringService + ?Sized>(
        &mut self,
        service: &mut S,
        text: &str,
    ) -> Option<Settlement> {
        let Submission::Dispatched(request) = self.submit(text) else {
            return None;
        };
        let outcome = service.ask(&request);
        self.settle(request.turn, outcome)
    }
}

fn resolve_reply(
    reply: ServiceReply,
) -> Result<(String, Option<ConversationId>), TurnFailure> {
    match reply {
        ServiceReply::Disambiguation { candidates } if !candidates.is_empty() => {
            Ok((disambiguation_text(&candidates), None))
        }
        ServiceReply::Summary {
            conversation_id,
            summary,
        } => Ok((summary, Some(conversation_id))),
        ServiceReply::Answer { text } => Ok((text, None)),
        ServiceReply::Disambiguation { .. } | ServiceReply::Unrecognized => {
            Err(TurnFailure::UnrecognizedShape)
        }
    }
}

pub fn disambiguation_text(candidates: &[Candidate]) -> String {
    let mut out = String::new();
    out.push_str(DISAMBIGUATION_INTRO);
    out.push('\n');
    for candidate in candidates {
        out.push_str("- ");
        out.push_str(&candidate.name);
        if !candidate.department.trim().is_empty() {
            out.push_str(&format!(" ({})", candidate.department.trim()));
        }
        out.push('\n');
    }
    out.push('\n');
    out.push_str(DISAMBIGUATION_OUTRO);
    out
}
