//! Handlers for the Card Directory (`/cartoes`).
//!
//! | Method | Path                  | Notes |
//! |--------|-----------------------|-------|
//! | `GET`  | `/cartoes`            | Status probe, returns `"ok"` |
//! | `GET`  | `/cartoes?renda=<n>`  | Cards with income requirement `<= n` |
//! | `GET`  | `/cartoes?cpf=<cpf>`  | [`ClientCard`] projections for one client |
//! | `POST` | `/cartoes`            | Body: [`NewCard`]; returns 201 |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use credito_core::{
  card::{Card, ClientCard, NewCard},
  cpf::mask_cpf,
  store::CardStore,
};
use serde::Deserialize;

use crate::error::{ApiError, JsonBody, Message, QueryParams, message};

// ─── Query ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct CardParams {
  /// Maximum income requirement. Must be a non-negative integer.
  pub renda: Option<u64>,
  pub cpf:   Option<String>,
}

/// `GET /cartoes[?renda=<n>|?cpf=<cpf>]`
#[utoipa::path(
  get,
  path = "/cartoes",
  tag = "cartoes",
  summary = "Listar cartões por renda máxima ou por CPF",
  description = "Sem parâmetros responde \"ok\". `renda` e `cpf` não podem ser combinados.",
  params(
    ("renda" = Option<u64>, Query, description = "Renda máxima exigida"),
    ("cpf" = Option<String>, Query, description = "CPF do titular"),
  ),
  responses(
    (status = 200, description = "Cartões com renda <= `renda`; com `cpf`, uma lista de `ClientCard`", body = Vec<Card>),
    (status = 400, description = "Parâmetros inválidos", body = Message),
  )
)]
pub async fn query<S>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<CardParams>,
) -> Result<Response, ApiError>
where
  S: CardStore,
{
  match (params.renda, params.cpf) {
    (None, None) => Ok("ok".into_response()),
    (Some(renda), None) => {
      let cards = store
        .list_cards_by_max_income(renda)
        .await
        .map_err(ApiError::from_store)?;
      Ok(Json(cards).into_response())
    }
    (None, Some(cpf)) => {
      let cards: Vec<ClientCard> = store
        .list_cards_by_cpf(&cpf)
        .await
        .map_err(ApiError::from_store)?
        .into_iter()
        .map(ClientCard::from)
        .collect();
      Ok(Json(cards).into_response())
    }
    (Some(_), Some(_)) => Err(ApiError::BadRequest(
      "use either renda or cpf, not both".into(),
    )),
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /cartoes` — minimal body: `{"cpf":"...","renda":3000}`
#[utoipa::path(
  post,
  path = "/cartoes",
  tag = "cartoes",
  summary = "Cadastrar um novo cartão",
  request_body = NewCard,
  responses(
    (status = 201, description = "Cartão cadastrado com sucesso", body = Message),
    (status = 400, description = "Corpo inválido ou valor fora do intervalo", body = Message),
  )
)]
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewCard>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CardStore,
{
  let card = store.create_card(body).await.map_err(ApiError::from_store)?;
  tracing::info!(card_id = card.id, cpf = %mask_cpf(&card.cpf), "card registered");
  Ok((StatusCode::CREATED, message("Cartão cadastrado com sucesso!")))
}
