// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use misprofes_app::{
    AnsweringService, Candidate, ConversationId, ServiceReply, TurnFailure, TurnRequest,
};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MULTIPLE_RESULTS_STATUS: &str = "varios_resultados";

/// Wire contract spoken by the answering service. `GenAi` is the older
/// endpoint and is only kept for deployments that still run it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiSchema {
    #[default]
    Consulta,
    GenAi,
}

impl ApiSchema {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consulta => "consulta",
            Self::GenAi => "genai",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "consulta" => Some(Self::Consulta),
            "genai" => Some(Self::GenAi),
            _ => None,
        }
    }

    pub const fn path(self) -> &'static str {
        match self {
            Self::Consulta => "/api/consulta",
            Self::GenAi => "/consulta-genai",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    schema: ApiSchema,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, schema: ApiSchema, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url {base_url:?} must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            schema,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn schema(&self) -> ApiSchema {
        self.schema
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.schema.path())
    }

    /// One POST per turn. Every way this can go wrong is folded into a
    /// `TurnFailure` so the session can settle the turn.
    pub fn send_turn(&self, request: &TurnRequest) -> Result<ServiceReply, TurnFailure> {
        let endpoint = self.endpoint();
        tracing::debug!(
            turn = request.turn.get(),
            endpoint = %endpoint,
            has_conversation = request.conversation_id.is_some(),
            "sending turn"
        );

        let response = self
            .http
            .post(&endpoint)
            .json(&encode_request(self.schema, request))
            .send()
            .map_err(|error| connection_failure(&endpoint, self.timeout, error))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|error| TurnFailure::Transport(format!("read response body: {error}")))?;
        if !status.is_success() {
            return Err(clean_error_response(status, &body));
        }

        let reply = decode_reply(&body)?;
        tracing::debug!(turn = request.turn.get(), kind = reply.kind(), "turn answered");
        Ok(reply)
    }
}

impl AnsweringService for Client {
    fn ask(&mut self, request: &TurnRequest) -> Result<ServiceReply, TurnFailure> {
        self.send_turn(request)
    }
}

pub fn encode_request(schema: ApiSchema, request: &TurnRequest) -> Value {
    let conversation_id = request.conversation_id.as_ref().map(ConversationId::as_str);
    match schema {
        ApiSchema::Consulta => json!({
            "mensaje": request.text,
            "conversation_id": conversation_id,
        }),
        ApiSchema::GenAi => {
            let messages: Vec<Value> = request
                .history
                .iter()
                .map(|message| {
                    json!({
                        "role": message.sender.as_str(),
                        "content": message.text,
                    })
                })
                .collect();
            json!({
                "conversation_id": conversation_id,
                "messages": messages,
            })
        }
    }
}

/// Both schemas share one reply vocabulary, so decoding does not depend on
/// which endpoint answered.
pub fn decode_reply(body: &str) -> Result<ServiceReply, TurnFailure> {
    let raw: RawReply =
        serde_json::from_str(body).map_err(|error| TurnFailure::Decode(error.to_string()))?;
    Ok(classify(raw))
}

fn classify(raw: RawReply) -> ServiceReply {
    let RawReply {
        status,
        opciones,
        conversation_id,
        resumen,
        respuesta,
    } = raw;
    let conversation_id = conversation_id
        .filter(|id| !id.trim().is_empty())
        .map(ConversationId::from);

    if status.as_deref() == Some(MULTIPLE_RESULTS_STATUS)
        && let Some(opciones) = opciones
        && !opciones.is_empty()
    {
        return ServiceReply::Disambiguation {
            candidates: opciones
                .into_iter()
                .map(|option| Candidate {
                    name: option.nombre,
                    department: option.departamento,
                })
                .collect(),
        };
    }

    // any reply text that arrives with a server id carries that id forward
    match (conversation_id, resumen.or(respuesta)) {
        (Some(conversation_id), Some(summary)) => ServiceReply::Summary {
            conversation_id,
            summary,
        },
        (None, Some(text)) => ServiceReply::Answer { text },
        (_, None) => ServiceReply::Unrecognized,
    }
}

fn connection_failure(endpoint: &str, timeout: Duration, error: reqwest::Error) -> TurnFailure {
    if error.is_timeout() {
        return TurnFailure::Transport(format!(
            "{endpoint} did not answer within {}ms",
            timeout.as_millis()
        ));
    }
    TurnFailure::Transport(format!("cannot reach {endpoint} ({error})"))
}

fn clean_error_response(status: StatusCode, body: &str) -> TurnFailure {
    let status = status.as_u16();
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(detail) = parsed.detail.or(parsed.error)
        && !detail.is_empty()
    {
        return TurnFailure::HttpStatus { status, detail };
    }

    let trimmed = body.trim();
    if trimmed.len() < 100 && !trimmed.contains('{') {
        return TurnFailure::HttpStatus {
            status,
            detail: trimmed.to_owned(),
        };
    }

    TurnFailure::HttpStatus {
        status,
        detail: String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct RawReply {
    status: Option<String>,
    opciones: Option<Vec<RawCandidate>>,
    conversation_id: Option<String>,
    resumen: Option<String>,
    respuesta: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCandidate {
    nombre: String,
    #[serde(default)]
    departamento: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: Option<String>,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{ApiSchema, Client, decode_reply, encode_request};
    use misprofes_app::{
        ConversationId, ConversationSession, Message, ServiceReply, Submission, TurnFailure,
        TurnId, TurnRequest,
    };
    use serde_json::json;
    use std::time::Duration;

    fn request(conversation_id: Option<&str>) -> TurnRequest {
        TurnRequest {
            turn: TurnId::new(3),
            text: "¿Quién da Física I?".to_owned(),
            conversation_id: conversation_id.map(ConversationId::new),
            history: vec![
                Message::user("hola"),
                Message::assistant("¿En qué te ayudo?"),
                Message::user("¿Quién da Física I?"),
            ],
        }
    }

    #[test]
    fn schema_names_and_paths() {
        assert_eq!(ApiSchema::parse("consulta"), Some(ApiSchema::Consulta));
        assert_eq!(ApiSchema::parse("genai"), Some(ApiSchema::GenAi));
        assert_eq!(ApiSchema::parse("v3"), None);
        assert_eq!(ApiSchema::default().path(), "/api/consulta");
        assert_eq!(ApiSchema::GenAi.path(), "/consulta-genai");
    }

    #[test]
    fn consulta_body_sends_null_id_until_assigned() {
        assert_eq!(
            encode_request(ApiSchema::Consulta, &request(None)),
            json!({ "mensaje": "¿Quién da Física I?", "conversation_id": null })
        );
        assert_eq!(
            encode_request(ApiSchema::Consulta, &request(Some("c-9"))),
            json!({ "mensaje": "¿Quién da Física I?", "conversation_id": "c-9" })
        );
    }

    #[test]
    fn genai_body_carries_full_history() {
        let body = encode_request(ApiSchema::GenAi, &request(Some("c-9")));
        assert_eq!(body["conversation_id"], "c-9");
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["messages"][1]["role"], "assistant");
        assert_eq!(body["messages"][2]["content"], "¿Quién da Física I?");
    }

    #[test]
    fn decodes_disambiguation() {
        let reply = decode_reply(
            r#"{"status":"varios_resultados","opciones":[{"nombre":"Ana López","departamento":"Física"},{"nombre":"Ana Ruiz"}]}"#,
        );
        let Ok(ServiceReply::Disambiguation { candidates }) = reply else {
            panic!("expected disambiguation, got {reply:?}");
        };
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].department, "Física");
        assert_eq!(candidates[1].department, "");
    }

    #[test]
    fn decodes_summary_and_answer() {
        assert_eq!(
            decode_reply(r#"{"conversation_id":"abc","resumen":"Todo bien"}"#),
            Ok(ServiceReply::Summary {
                conversation_id: ConversationId::new("abc"),
                summary: "Todo bien".to_owned(),
            })
        );
        assert_eq!(
            decode_reply(r#"{"respuesta":"Sí"}"#),
            Ok(ServiceReply::Answer {
                text: "Sí".to_owned(),
            })
        );
    }

    #[test]
    fn answer_with_id_adopts_the_id() {
        assert_eq!(
            decode_reply(r#"{"conversation_id":"srv-1","respuesta":"Hola"}"#),
            Ok(ServiceReply::Summary {
                conversation_id: ConversationId::new("srv-1"),
                summary: "Hola".to_owned(),
            })
        );
        assert_eq!(
            decode_reply(r#"{"conversation_id":"","respuesta":"Hola"}"#),
            Ok(ServiceReply::Answer {
                text: "Hola".to_owned(),
            })
        );
    }

    #[test]
    fn answer_with_id_updates_session_conversation() {
        let mut session = ConversationSession::new();
        let Submission::Dispatched(turn) = session.submit("hola") else {
            panic!("submission should dispatch");
        };
        let reply = decode_reply(r#"{"conversation_id":"srv-1","respuesta":"Hola"}"#);
        let settlement = session.settle(turn.turn, reply).expect("turn settles");
        assert_eq!(settlement.adopted, Some(ConversationId::new("srv-1")));
        assert_eq!(session.conversation_id(), Some(&ConversationId::new("srv-1")));
        assert_eq!(session.log()[1].text, "Hola");
    }

    #[test]
    fn unknown_shapes_are_unrecognized() {
        for body in [
            r#"{}"#,
            r#"{"status":"ok"}"#,
            r#"{"status":"varios_resultados","opciones":[]}"#,
            r#"{"conversation_id":"abc"}"#,
            r#"{"opciones":[{"nombre":"Ana"}]}"#,
        ] {
            assert_eq!(
                decode_reply(body),
                Ok(ServiceReply::Unrecognized),
                "body: {body}"
            );
        }
    }

    #[test]
    fn non_json_bodies_are_decode_failures() {
        for body in ["<html>", "[1,2]", "\"texto\""] {
            assert!(matches!(
                decode_reply(body),
                Err(TurnFailure::Decode(_))
            ));
        }
    }

    #[test]
    fn client_rejects_bad_base_urls() {
        for (input, needle) in [
            ("", "must not be empty"),
            ("not a url", "not a valid URL"),
            ("ftp://example.com", "http or https"),
        ] {
            let error = Client::new(input, ApiSchema::Consulta, Duration::from_secs(1))
                .expect_err("invalid base url should fail");
            let message = format!("{error:#}");
            assert!(message.contains(needle), "unexpected message: {message}");
        }
    }

    #[test]
    fn endpoint_joins_trimmed_base_and_schema_path() -> anyhow::Result<()> {
        let client = Client::new(
            "http://localhost:8000///",
            ApiSchema::GenAi,
            Duration::from_secs(1),
        )?;
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint(), "http://localhost:8000/consulta-genai");
        Ok(())
    }
}
