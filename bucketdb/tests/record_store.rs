//! End-to-end tests of the record store contract over the in-memory engine.

use bucketdb::memory::MemoryEngine;
use bucketdb::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashSet;

fn context() -> StorageContext<MemoryEngine> {
    StorageContext::new(MemoryEngine::new(), "database")
}

#[tokio::test]
async fn insert_injects_a_generated_id_and_keeps_other_fields() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let record = people.insert(json!({ "name": "Andre" })).await.unwrap();

    let id = record["id"].as_str().unwrap();
    assert_eq!(id.len(), 40);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(record["name"], json!("Andre"));
}

#[tokio::test]
async fn insert_persists_a_preset_id_verbatim() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let record = people
        .insert(json!({ "id": "my-own-id", "name": "Andre" }))
        .await
        .unwrap();

    assert_eq!(record["id"], json!("my-own-id"));

    let hits = people.query(json!({ "id": "my-own-id" })).await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn back_to_back_inserts_receive_distinct_ids() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let mut ids = HashSet::new();

    for n in 0..100 {
        let record = people.insert(json!({ "n": n })).await.unwrap();
        ids.insert(record["id"].as_str().unwrap().to_string());
    }

    assert_eq!(ids.len(), 100);
}

#[tokio::test]
async fn reinserting_the_returned_record_overwrites_instead_of_duplicating() {
    let context = context();
    let people = context.store("person").await.unwrap();

    // The returned record carries the injected id; inserting it again
    // hits the same key.
    let andre = people.insert(json!({ "name": "Andre" })).await.unwrap();
    people.insert(andre).await.unwrap();

    let hits = people.query(json!({})).await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn update_without_an_id_fails_and_persists_nothing() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let err = people
        .update(json!({ "name": "Andre" }))
        .await
        .unwrap_err();

    assert!(matches!(err, BucketDbError::NotFound(_)));
    assert!(people.query(json!({})).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_of_a_non_existing_record_fails() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let err = people
        .update(json!({ "id": "ghost", "name": "Andre" }))
        .await
        .unwrap_err();

    assert!(matches!(err, BucketDbError::NotFound(_)));
}

#[tokio::test]
async fn update_overwrites_exactly_the_targeted_record() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let mut andre = people
        .insert(json!({ "name": "Andre", "city": "Hamburg" }))
        .await
        .unwrap();
    let bernd = people.insert(json!({ "name": "Bernd" })).await.unwrap();

    andre["city"] = json!("Berlin");
    people.update(andre.clone()).await.unwrap();

    let id = andre["id"].as_str().unwrap();
    let hits = people.query(json!({ "id": id })).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["city"], json!("Berlin"));

    // The other record is untouched.
    let others = people
        .query(json!({ "id": bernd["id"].clone() }))
        .await
        .unwrap();
    assert_eq!(others[0]["name"], json!("Bernd"));
}

#[tokio::test]
async fn remove_of_a_non_existent_id_succeeds() {
    let context = context();
    let people = context.store("person").await.unwrap();

    people.remove("never-existed").await.unwrap();
}

#[tokio::test]
async fn remove_makes_the_record_unqueryable() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let record = people.insert(json!({ "name": "Andre" })).await.unwrap();
    let id = record["id"].as_str().unwrap().to_string();

    people.remove(&id).await.unwrap();

    let hits = people.query(json!({ "id": id })).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn empty_query_returns_every_record_in_the_bucket() {
    let context = context();
    let people = context.store("person").await.unwrap();

    for name in ["Andre", "Bernd", "Clara"] {
        people.insert(json!({ "name": name })).await.unwrap();
    }

    let hits = people.query(json!({})).await.unwrap();
    assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn query_returns_exactly_the_matching_subset() {
    let context = context();
    let people = context.store("person").await.unwrap();

    people
        .insert(json!({ "name": "Andre", "city": "Hamburg" }))
        .await
        .unwrap();
    people
        .insert(json!({ "name": "Bernd", "city": "Hamburg" }))
        .await
        .unwrap();
    people
        .insert(json!({ "name": "Clara", "city": "Berlin" }))
        .await
        .unwrap();
    people.insert(json!({ "name": "Doris" })).await.unwrap();

    let hits = people.query(json!({ "city": "Hamburg" })).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|r| r["city"] == json!("Hamburg")));
}

#[tokio::test]
async fn query_supports_nested_and_numeric_equality() {
    let context = context();
    let people = context.store("person").await.unwrap();

    people
        .insert(json!({ "name": "Andre", "age": 30, "address": { "zip": 20095 } }))
        .await
        .unwrap();

    let by_age = people.query(json!({ "age": 30.0 })).await.unwrap();
    assert_eq!(by_age.len(), 1);

    let by_address = people
        .query(json!({ "address": { "zip": 20095 } }))
        .await
        .unwrap();
    assert_eq!(by_address.len(), 1);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
}

#[tokio::test]
async fn typed_records_roundtrip_through_serde() {
    let context = context();
    let people = context.store("person").await.unwrap();

    let andre = Person { id: None, name: "Andre".to_string() };
    let stored = people
        .insert(serde_json::to_value(&andre).unwrap())
        .await
        .unwrap();

    let person: Person = serde_json::from_value::<Person>(stored).unwrap();
    assert!(person.id.is_some());
    assert_eq!(person.name, "Andre");
}

#[tokio::test]
async fn records_in_different_buckets_never_collide() {
    let context = context();
    let people = context.store("person").await.unwrap();
    let projects = context.store("project").await.unwrap();

    people
        .insert(json!({ "id": "same", "kind": "person" }))
        .await
        .unwrap();
    projects
        .insert(json!({ "id": "same", "kind": "project" }))
        .await
        .unwrap();

    let person_hits = people.query(json!({ "id": "same" })).await.unwrap();
    assert_eq!(person_hits.len(), 1);
    assert_eq!(person_hits[0]["kind"], json!("person"));

    let project_hits: Vec<Value> = projects.query(json!({ "id": "same" })).await.unwrap();
    assert_eq!(project_hits[0]["kind"], json!("project"));
}
