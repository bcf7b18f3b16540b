//! Handlers for the Client Directory (`/clientes`).
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/clientes`      | All clients; `?cpf=` narrows to one client or 404 |
//! | `POST`   | `/clientes`      | Body: [`NewClient`]; 201 + `Location: /clientes?cpf=...` |
//! | `GET`    | `/clientes/{id}` | 404 if not found |
//! | `PUT`    | `/clientes/{id}` | Body: [`NewClient`]; 404 if not found |
//! | `DELETE` | `/clientes/{id}` | 204; 404 if not found |
//!
//! Every successful write emits one audit event with the masked CPF.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use credito_core::{
  client::{Client, NewClient},
  cpf::mask_cpf,
  store::ClientStore,
};
use serde::Deserialize;

use crate::error::{
  ApiError, CLIENT_NOT_FOUND, JsonBody, Message, PathParam, QueryParams, message,
};

fn audit(action: &'static str, client: &Client) {
  tracing::info!(
    client_id = client.id,
    cpf = %mask_cpf(&client.cpf),
    action,
    "client record written"
  );
}

// ─── List / lookup by CPF ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub cpf: Option<String>,
}

/// `GET /clientes[?cpf=<cpf>]`
///
/// Without `cpf`, returns every client (an empty list is still 200). With
/// `cpf`, returns that single client or a 404.
#[utoipa::path(
  get,
  path = "/clientes",
  tag = "clientes",
  summary = "Obter lista de clientes ou um cliente por CPF",
  params(("cpf" = Option<String>, Query, description = "CPF do cliente")),
  responses(
    (status = 200, description = "Todos os clientes, ou o cliente do CPF informado", body = Vec<Client>),
    (status = 404, description = "Cliente não encontrado", body = Message),
  )
)]
pub async fn list<S>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<Response, ApiError>
where
  S: ClientStore,
{
  match params.cpf {
    Some(cpf) => {
      let client = store
        .get_client_by_cpf(&cpf)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::NotFound(CLIENT_NOT_FOUND.to_owned()))?;
      Ok(Json(client).into_response())
    }
    None => {
      let clients = store.list_clients().await.map_err(ApiError::from_store)?;
      Ok(Json(clients).into_response())
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /clientes` — body: `{"cpf":"...","nome":"...","idade":30}`
#[utoipa::path(
  post,
  path = "/clientes",
  tag = "clientes",
  summary = "Cadastrar um novo cliente",
  request_body = NewClient,
  responses(
    (status = 201, description = "Cliente cadastrado com sucesso", body = Message,
      headers(("Location" = String, description = "/clientes?cpf=<cpf>"))),
    (status = 400, description = "Corpo inválido", body = Message),
    (status = 409, description = "CPF já cadastrado", body = Message),
  )
)]
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewClient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClientStore,
{
  let location = location_for(&body.cpf)?;

  let client = store
    .create_client(body)
    .await
    .map_err(ApiError::from_store)?;
  audit("create", &client);

  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, location)],
    message("Cliente cadastrado com sucesso!"),
  ))
}

/// `/clientes?cpf=<cpf>` with the CPF percent-encoded.
fn location_for(cpf: &str) -> Result<HeaderValue, ApiError> {
  HeaderValue::try_from(format!("/clientes?cpf={}", urlencoding::encode(cpf)))
    .map_err(|_| ApiError::BadRequest("cpf is not a valid header value".into()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /clientes/{id}`
#[utoipa::path(
  get,
  path = "/clientes/{id}",
  tag = "clientes",
  summary = "Obter um cliente pelo id",
  params(("id" = i64, Path, description = "Id do cliente")),
  responses(
    (status = 200, description = "Cliente encontrado", body = Client),
    (status = 404, description = "Cliente não encontrado", body = Message),
  )
)]
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<Json<Client>, ApiError>
where
  S: ClientStore,
{
  let client = store
    .get_client(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(CLIENT_NOT_FOUND.to_owned()))?;
  Ok(Json(client))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /clientes/{id}` — overwrites `cpf`, `nome` and `idade`.
#[utoipa::path(
  put,
  path = "/clientes/{id}",
  tag = "clientes",
  summary = "Atualizar um cliente",
  params(("id" = i64, Path, description = "Id do cliente")),
  request_body = NewClient,
  responses(
    (status = 200, description = "Cliente atualizado com sucesso", body = Message),
    (status = 404, description = "Cliente não encontrado", body = Message),
    (status = 409, description = "CPF pertence a outro cliente", body = Message),
  )
)]
pub async fn update<S>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<i64>,
  JsonBody(body): JsonBody<NewClient>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ClientStore,
{
  let client = store
    .update_client(id, body)
    .await
    .map_err(ApiError::from_store)?;
  audit("update", &client);

  Ok(message("Cliente atualizado com sucesso"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /clientes/{id}` — 204 on success.
#[utoipa::path(
  delete,
  path = "/clientes/{id}",
  tag = "clientes",
  summary = "Excluir um cliente",
  params(("id" = i64, Path, description = "Id do cliente")),
  responses(
    (status = 204, description = "Cliente excluído"),
    (status = 404, description = "Cliente não encontrado", body = Message),
  )
)]
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError>
where
  S: ClientStore,
{
  store.delete_client(id).await.map_err(ApiError::from_store)?;
  tracing::info!(client_id = id, action = "delete", "client record removed");
  Ok(StatusCode::NO_CONTENT)
}
