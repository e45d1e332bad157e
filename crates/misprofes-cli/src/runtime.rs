// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use misprofes_api::Client;
use misprofes_app::{AnsweringService, ServiceReply, TurnFailure, TurnRequest};
use misprofes_tui::InternalEvent;
use std::sync::mpsc;
use std::thread;

/// Answers turns against the HTTP service. Each turn runs on its own
/// worker thread so the event loop keeps drawing the loading indicator.
pub struct ServiceRuntime {
    client: Client,
}

impl ServiceRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl misprofes_tui::AppRuntime for ServiceRuntime {
    fn answer_turn(&mut self, request: &TurnRequest) -> Result<ServiceReply, TurnFailure> {
        self.client.ask(request)
    }

    fn spawn_turn(&mut self, request: TurnRequest, tx: mpsc::Sender<InternalEvent>) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name(format!("turn-{}", request.turn.get()))
            .spawn(move || {
                let outcome = client.send_turn(&request);
                let _ = tx.send(InternalEvent::TurnSettled {
                    turn: request.turn,
                    outcome,
                });
            })
            .context("spawn turn worker")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceRuntime;
    use anyhow::{Result, anyhow};
    use misprofes_api::{ApiSchema, Client};
    use misprofes_app::{ConversationId, Message, ServiceReply, TurnId, TurnRequest};
    use misprofes_tui::{AppRuntime, InternalEvent};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tiny_http::{Header, Response, Server};

    fn request(turn: u64) -> TurnRequest {
        TurnRequest {
            turn: TurnId::new(turn),
            text: "¿Quién dicta Física I?".to_owned(),
            conversation_id: None,
            history: vec![Message::user("¿Quién dicta Física I?")],
        }
    }

    #[test]
    fn spawned_turn_reports_back_over_channel() -> Result<()> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}", server.server_addr());
        let handle = thread::spawn(move || {
            let request = server.recv().expect("request expected");
            let response = Response::from_string(
                r#"{"conversation_id":"f-1","resumen":"Física I: Prof. Rojas"}"#,
            )
            .with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            );
            request.respond(response).expect("response should succeed");
        });

        let client = Client::new(&addr, ApiSchema::Consulta, Duration::from_secs(2))?;
        let mut runtime = ServiceRuntime::new(client);
        let (tx, rx) = mpsc::channel();
        runtime.spawn_turn(request(3), tx)?;

        let event = rx.recv_timeout(Duration::from_secs(5))?;
        assert_eq!(
            event,
            InternalEvent::TurnSettled {
                turn: TurnId::new(3),
                outcome: Ok(ServiceReply::Summary {
                    conversation_id: ConversationId::new("f-1"),
                    summary: "Física I: Prof. Rojas".to_owned(),
                }),
            }
        );

        handle.join().expect("server thread should join");
        Ok(())
    }

    #[test]
    fn answer_turn_blocks_and_returns_failure_for_dead_service() -> Result<()> {
        let client = Client::new(
            "http://127.0.0.1:1",
            ApiSchema::Consulta,
            Duration::from_millis(200),
        )?;
        let mut runtime = ServiceRuntime::new(client);
        let outcome = runtime.answer_turn(&request(1));
        assert!(outcome.is_err());
        Ok(())
    }
}
