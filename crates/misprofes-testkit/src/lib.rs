// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use misprofes_app::{
    AnsweringService, Candidate, CellValue, Column, ConversationId, RowKey, ServiceReply,
    TurnFailure, TurnRequest,
};
use std::collections::VecDeque;

const FIRST_NAMES: [&str; 12] = [
    "Ana", "Luis", "María", "Jorge", "Elena", "Ricardo", "Sofía", "Héctor", "Lucía", "Andrés",
    "Paola", "Tomás",
];
const LAST_NAMES: [&str; 10] = [
    "López", "Hernández", "García", "Martínez", "Ramírez", "Torres", "Flores", "Rivera", "Cruz",
    "Morales",
];
const DEPARTMENTS: [&str; 6] = [
    "Matemáticas",
    "Física",
    "Química",
    "Computación",
    "Biología",
    "Letras",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Professor {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub rating: Option<f64>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfessorField {
    Id,
    Name,
    Department,
    Rating,
    Active,
}

/// Deterministic roster; ratings are missing for every seventh professor.
pub fn professors(count: usize) -> Vec<Professor> {
    (0..count)
        .map(|index| {
            let first = FIRST_NAMES[index % FIRST_NAMES.len()];
            let last = LAST_NAMES[(index * 7) % LAST_NAMES.len()];
            let rating = if index % 7 == 6 {
                None
            } else {
                Some(5.0 + ((index * 37) % 50) as f64 / 10.0)
            };
            Professor {
                id: index as i64 + 1,
                name: format!("{first} {last}"),
                department: DEPARTMENTS[index % DEPARTMENTS.len()].to_owned(),
                rating,
                active: index % 3 != 0,
            }
        })
        .collect()
}

pub fn professor_columns() -> Vec<Column<Professor, ProfessorField>> {
    vec![
        Column::new(ProfessorField::Id, "id", |row: &Professor| {
            CellValue::Integer(row.id)
        })
        .with_width(4),
        Column::new(ProfessorField::Name, "nombre", |row: &Professor| {
            CellValue::from(row.name.as_str())
        }),
        Column::new(ProfessorField::Department, "departamento", |row: &Professor| {
            CellValue::from(row.department.as_str())
        }),
        Column::new(ProfessorField::Rating, "calificación", |row: &Professor| {
            CellValue::from(row.rating)
        }),
        Column::new(ProfessorField::Active, "activo", |row: &Professor| {
            CellValue::Bool(row.active)
        })
        .with_render(|value, _row| match value {
            CellValue::Bool(true) => "sí".to_owned(),
            _ => "no".to_owned(),
        }),
    ]
}

pub fn professor_key(row: &Professor) -> RowKey {
    RowKey::Id(row.id)
}

pub fn candidates(names: &[(&str, &str)]) -> Vec<Candidate> {
    names
        .iter()
        .map(|(name, department)| Candidate {
            name: (*name).to_owned(),
            department: (*department).to_owned(),
        })
        .collect()
}

pub fn answer(text: &str) -> Result<ServiceReply, TurnFailure> {
    Ok(ServiceReply::Answer {
        text: text.to_owned(),
    })
}

pub fn summary(conversation_id: &str, text: &str) -> Result<ServiceReply, TurnFailure> {
    Ok(ServiceReply::Summary {
        conversation_id: ConversationId::new(conversation_id),
        summary: text.to_owned(),
    })
}

pub fn transport_failure(detail: &str) -> Result<ServiceReply, TurnFailure> {
    Err(TurnFailure::Transport(detail.to_owned()))
}

/// Answering service that replays queued outcomes and records every request.
/// Runs dry into a transport failure.
#[derive(Debug, Default)]
pub struct ScriptedService {
    outcomes: VecDeque<Result<ServiceReply, TurnFailure>>,
    requests: Vec<TurnRequest>,
}

impl ScriptedService {
    pub fn new<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<ServiceReply, TurnFailure>>,
    {
        Self {
            outcomes: outcomes.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[TurnRequest] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl AnsweringService for ScriptedService {
    fn ask(&mut self, request: &TurnRequest) -> Result<ServiceReply, TurnFailure> {
        self.requests.push(request.clone());
        self.outcomes
            .pop_front()
            .unwrap_or_else(|| Err(TurnFailure::Transport("script exhausted".to_owned())))
    }
}
