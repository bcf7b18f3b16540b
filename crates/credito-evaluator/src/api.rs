//! Handlers for `/avaliacoes-credito`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/avaliacoes-credito` | Status probe, returns `"ok"` |
//! | `GET`  | `/avaliacoes-credito/situacao-cliente?cpf=<cpf>` | 200 situation, 400 missing `cpf`, 404 unknown client, 502 peer failure |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use credito_core::situation::CreditSituation;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::{CreditEvaluator, EvaluatorError};

const CLIENT_DATA_NOT_FOUND: &str =
  "Dados do cliente não encontrados para o CPF informado.";

/// `{"message": ...}` body for 400 and 404.
#[derive(Debug, Serialize, ToSchema)]
pub struct Message {
  pub message: String,
}

/// 502 body. `status` is the directory's error status, or `null` when the
/// call failed without one (timeout, refused connection, undecodable body).
#[derive(Debug, Serialize, ToSchema)]
pub struct PeerFailure {
  pub message: String,
  #[schema(example = 503)]
  pub status:  Option<u16>,
}

impl IntoResponse for EvaluatorError {
  fn into_response(self) -> Response {
    match self {
      EvaluatorError::ClientNotFound { .. } => (
        StatusCode::NOT_FOUND,
        Json(Message { message: CLIENT_DATA_NOT_FOUND.to_owned() }),
      )
        .into_response(),
      EvaluatorError::PeerCommunication { status, message, .. } => (
        StatusCode::BAD_GATEWAY,
        Json(PeerFailure { message, status }),
      )
        .into_response(),
    }
  }
}

/// `GET /avaliacoes-credito`
pub async fn status() -> &'static str { "ok" }

#[derive(Debug, Deserialize)]
pub struct SituationParams {
  pub cpf: String,
}

/// `GET /avaliacoes-credito/situacao-cliente?cpf=<cpf>`
#[utoipa::path(
  get,
  path = "/avaliacoes-credito/situacao-cliente",
  tag = "avaliacoes-credito",
  summary = "Consultar a situação de crédito de um cliente",
  params(("cpf" = String, Query, description = "CPF do cliente")),
  responses(
    (status = 200, description = "Cliente e seus cartões", body = CreditSituation),
    (status = 400, description = "Parâmetro `cpf` ausente", body = Message),
    (status = 404, description = "Cliente não encontrado", body = Message),
    (status = 502, description = "Falha ao consultar um diretório", body = PeerFailure),
  )
)]
pub async fn credit_situation(
  State(evaluator): State<Arc<CreditEvaluator>>,
  params: Result<Query<SituationParams>, QueryRejection>,
) -> Response {
  let Query(params) = match params {
    Ok(params) => params,
    Err(rejection) => {
      return (
        StatusCode::BAD_REQUEST,
        Json(Message { message: rejection.body_text() }),
      )
        .into_response();
    }
  };

  match evaluator.credit_situation(&params.cpf).await {
    Ok(situation) => Json(situation).into_response(),
    Err(e) => e.into_response(),
  }
}

/// OpenAPI document for the evaluator, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
  info(title = "Credit Evaluator", description = "Avaliação de crédito"),
  paths(credit_situation),
  components(schemas(CreditSituation, Message, PeerFailure))
)]
pub struct EvaluatorDoc;

/// `GET /openapi.json`
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> { Json(EvaluatorDoc::openapi()) }

#[cfg(test)]
mod tests {
  use axum::{body::Body, http::Request};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
  };

  use super::*;
  use crate::{EvaluatorConfig, PeerClient, evaluator_router};

  async fn get(evaluator: CreditEvaluator, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = evaluator_router(Arc::new(evaluator))
      .oneshot(req)
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
  }

  fn evaluator(clientes: &MockServer, cartoes: &MockServer) -> CreditEvaluator {
    let cfg = EvaluatorConfig {
      host:         "127.0.0.1".to_string(),
      port:         0,
      clientes_url: clientes.uri(),
      cartoes_url:  cartoes.uri(),
      timeout_ms:   2_000,
    };
    CreditEvaluator::new(PeerClient::new(&cfg).unwrap())
  }

  #[tokio::test]
  async fn situation_is_served_as_json() {
    let clientes = MockServer::start().await;
    let cartoes = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/clientes"))
      .respond_with(ResponseTemplate::new(200).set_body_json(
        json!({ "id": 3, "cpf": "12345678901", "nome": "Ana", "idade": 40 }),
      ))
      .mount(&clientes)
      .await;
    Mock::given(method("GET"))
      .and(path("/cartoes"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&cartoes)
      .await;

    let (status, body) = get(
      evaluator(&clientes, &cartoes),
      "/avaliacoes-credito/situacao-cliente?cpf=12345678901",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cliente"]["nome"], "Ana");
    assert_eq!(body["cartoes"], json!([]));
  }

  #[tokio::test]
  async fn unknown_client_is_404() {
    let clientes = MockServer::start().await;
    let cartoes = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/clientes"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&clientes)
      .await;
    Mock::given(method("GET"))
      .and(path("/cartoes"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&cartoes)
      .await;

    let (status, body) = get(
      evaluator(&clientes, &cartoes),
      "/avaliacoes-credito/situacao-cliente?cpf=00000000000",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
  }

  #[tokio::test]
  async fn peer_failure_is_502_with_upstream_status() {
    let clientes = MockServer::start().await;
    let cartoes = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/clientes"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&clientes)
      .await;
    Mock::given(method("GET"))
      .and(path("/cartoes"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&cartoes)
      .await;

    let (status, body) = get(
      evaluator(&clientes, &cartoes),
      "/avaliacoes-credito/situacao-cliente?cpf=12345678901",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], 500);
  }

  #[tokio::test]
  async fn status_probe() {
    let clientes = MockServer::start().await;
    let cartoes = MockServer::start().await;
    let req = Request::builder()
      .uri("/avaliacoes-credito")
      .body(Body::empty())
      .unwrap();
    let resp = evaluator_router(Arc::new(evaluator(&clientes, &cartoes)))
      .oneshot(req)
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn missing_cpf_is_400_with_message() {
    let clientes = MockServer::start().await;
    let cartoes = MockServer::start().await;

    let (status, body) = get(
      evaluator(&clientes, &cartoes),
      "/avaliacoes-credito/situacao-cliente",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("cpf"));
    assert!(clientes.received_requests().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn undecodable_peer_body_reports_null_status() {
    let clientes = MockServer::start().await;
    let cartoes = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/clientes"))
      .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
      .mount(&clientes)
      .await;
    Mock::given(method("GET"))
      .and(path("/cartoes"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&cartoes)
      .await;

    let (status, body) = get(
      evaluator(&clientes, &cartoes),
      "/avaliacoes-credito/situacao-cliente?cpf=12345678901",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].is_string());
    assert_eq!(body["status"], Value::Null);
  }

  #[tokio::test]
  async fn openapi_document_is_served() {
    let clientes = MockServer::start().await;
    let cartoes = MockServer::start().await;

    let (status, doc) = get(evaluator(&clientes, &cartoes), "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/avaliacoes-credito/situacao-cliente"]["get"].is_object());
    assert!(doc["components"]["schemas"]["CreditSituation"]["properties"]["cartoes"].is_object());
  }
}
