//! Integration tests for `SqliteStore` against an in-memory database.

use credito_core::{
  card::{CardBrand, NewCard},
  client::NewClient,
  store::{CardStore, ClientStore, StoreError},
};

use crate::{Error, SqliteStore, encode::is_unique_violation, schema::SCHEMA};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ana() -> NewClient { NewClient::new("12345678901", "Ana", 40) }

// ─── Clients ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_client() {
  let s = store().await;

  let created = s.create_client(ana()).await.unwrap();
  assert_eq!(created.cpf, "12345678901");

  let fetched = s.get_client(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.name, "Ana");
  assert_eq!(fetched.age, 40);
}

#[tokio::test]
async fn get_client_missing_returns_none() {
  let s = store().await;
  assert!(s.get_client(42).await.unwrap().is_none());
}

#[tokio::test]
async fn get_client_by_cpf() {
  let s = store().await;
  let created = s.create_client(ana()).await.unwrap();

  let fetched = s.get_client_by_cpf("12345678901").await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn unknown_cpf_returns_none() {
  let s = store().await;
  s.create_client(ana()).await.unwrap();

  for cpf in ["00000000000", "", "not-a-cpf"] {
    assert!(s.get_client_by_cpf(cpf).await.unwrap().is_none());
  }
}

#[tokio::test]
async fn duplicate_cpf_is_rejected() {
  let s = store().await;
  s.create_client(ana()).await.unwrap();

  let err = s
    .create_client(NewClient::new("12345678901", "Outra Ana", 22))
    .await
    .unwrap_err();
  assert!(matches!(
    err.as_core(),
    Some(credito_core::Error::DuplicateCpf(masked)) if masked == "***45678901"
  ));

  // The original record is untouched.
  let all = s.list_clients().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name, "Ana");
}

#[tokio::test]
async fn list_clients_all() {
  let s = store().await;
  assert!(s.list_clients().await.unwrap().is_empty());

  s.create_client(ana()).await.unwrap();
  s.create_client(NewClient::new("98765432100", "Bruno", 31))
    .await
    .unwrap();

  let mut cpfs: Vec<_> = s
    .list_clients()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.cpf)
    .collect();
  cpfs.sort();
  assert_eq!(cpfs, ["12345678901", "98765432100"]);
}

#[tokio::test]
async fn update_client_overwrites_fields() {
  let s = store().await;
  let created = s.create_client(ana()).await.unwrap();

  let updated = s
    .update_client(created.id, NewClient::new("11122233344", "Ana Maria", 41))
    .await
    .unwrap();
  assert_eq!(updated.id, created.id);

  let fetched = s.get_client(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
  assert!(s.get_client_by_cpf("12345678901").await.unwrap().is_none());
}

#[tokio::test]
async fn update_client_may_keep_its_own_cpf() {
  let s = store().await;
  let created = s.create_client(ana()).await.unwrap();

  let updated = s
    .update_client(created.id, NewClient::new("12345678901", "Ana", 41))
    .await
    .unwrap();
  assert_eq!(updated.age, 41);
}

#[tokio::test]
async fn update_missing_client_fails() {
  let s = store().await;
  let err = s.update_client(9, ana()).await.unwrap_err();
  assert!(matches!(err, Error::Core(credito_core::Error::ClientNotFound(9))));
}

#[tokio::test]
async fn update_to_taken_cpf_fails() {
  let s = store().await;
  s.create_client(ana()).await.unwrap();
  let bruno = s
    .create_client(NewClient::new("98765432100", "Bruno", 31))
    .await
    .unwrap();

  let err = s.update_client(bruno.id, ana()).await.unwrap_err();
  assert!(matches!(
    err.as_core(),
    Some(credito_core::Error::DuplicateCpf(_))
  ));
}

#[tokio::test]
async fn delete_client_removes_record() {
  let s = store().await;
  let created = s.create_client(ana()).await.unwrap();

  s.delete_client(created.id).await.unwrap();
  assert!(s.get_client(created.id).await.unwrap().is_none());

  let err = s.delete_client(created.id).await.unwrap_err();
  assert!(matches!(
    err.as_core(),
    Some(credito_core::Error::ClientNotFound(id)) if *id == created.id
  ));
}

// ─── Cards ───────────────────────────────────────────────────────────────────

fn card(cpf: &str, income: u64) -> NewCard { NewCard::new(cpf, income) }

#[tokio::test]
async fn create_card_with_all_attributes() {
  let s = store().await;

  let mut input = card("12345678901", 5000);
  input.name = "Gold".into();
  input.brand = Some(CardBrand::Mastercard);
  input.base_limit = 8000;

  let created = s.create_card(input).await.unwrap();

  let listed = s.list_cards_by_cpf("12345678901").await.unwrap();
  assert_eq!(listed, vec![created]);
  assert_eq!(listed[0].brand, Some(CardBrand::Mastercard));
  assert_eq!(listed[0].base_limit, 8000);
}

#[tokio::test]
async fn list_cards_by_max_income_is_inclusive() {
  let s = store().await;
  s.create_card(card("1", 1000)).await.unwrap();
  s.create_card(card("2", 3000)).await.unwrap();
  s.create_card(card("3", 7000)).await.unwrap();

  let mut incomes: Vec<_> = s
    .list_cards_by_max_income(3000)
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.income)
    .collect();
  incomes.sort();
  assert_eq!(incomes, [1000, 3000]);

  assert!(s.list_cards_by_max_income(999).await.unwrap().is_empty());
  assert_eq!(s.list_cards_by_max_income(u64::MAX).await.unwrap().len(), 3);
}

#[tokio::test]
async fn list_cards_by_cpf_filters_owner() {
  let s = store().await;
  s.create_card(card("12345678901", 3000)).await.unwrap();
  s.create_card(card("12345678901", 9000)).await.unwrap();
  s.create_card(card("98765432100", 3000)).await.unwrap();

  let cards = s.list_cards_by_cpf("12345678901").await.unwrap();
  assert_eq!(cards.len(), 2);
  assert!(cards.iter().all(|c| c.cpf == "12345678901"));

  assert!(s.list_cards_by_cpf("00000000000").await.unwrap().is_empty());
}

#[tokio::test]
async fn income_beyond_sqlite_range_is_rejected() {
  let s = store().await;
  let err = s.create_card(card("1", u64::MAX)).await.unwrap_err();
  assert_eq!(
    err.as_core(),
    Some(&credito_core::Error::AmountOutOfRange { field: "renda", value: u64::MAX })
  );

  let mut input = card("1", 100);
  input.base_limit = i64::MAX as u64 + 1;
  let err = s.create_card(input).await.unwrap_err();
  assert!(matches!(
    err.as_core(),
    Some(credito_core::Error::AmountOutOfRange { field: "limiteBasico", .. })
  ));
  assert!(s.list_cards_by_cpf("1").await.unwrap().is_empty());
}

// ─── Constraint mapping ──────────────────────────────────────────────────────

#[test]
fn unique_cpf_violation_is_recognised() {
  let conn = rusqlite::Connection::open_in_memory().unwrap();
  conn.execute_batch(SCHEMA).unwrap();
  let insert = "INSERT INTO clients (cpf, name, age) VALUES ('12345678901', 'Ana', 40)";
  conn.execute(insert, []).unwrap();

  let err = conn.execute(insert, []).unwrap_err();
  assert!(is_unique_violation(&err));

  let err = conn.execute("INSERT INTO nowhere VALUES (1)", []).unwrap_err();
  assert!(!is_unique_violation(&err));
}
