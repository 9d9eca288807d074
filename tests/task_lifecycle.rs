//! End-to-end tests for the task API over real HTTP.

use serde_json::{json, Value};

mod common;

async fn list_tasks(client: &reqwest::Client, base_url: &str) -> Vec<Value> {
    client
        .get(format!("{base_url}/tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let service = common::start_service().await;
    let client = common::client();

    // Create
    let res = client
        .post(format!("{}/tasks", service.base_url))
        .json(&json!({ "title": "A", "description": "B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    assert_eq!(res.text().await.unwrap(), "");

    // List shows the new record, incomplete
    let tasks = list_tasks(&client, &service.base_url).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "A");
    assert_eq!(tasks[0]["description"], "B");
    assert_eq!(tasks[0]["completed_at"], Value::Null);
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    // Toggle complete
    let res = client
        .patch(format!("{}/tasks/{id}/complete", service.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    let tasks = list_tasks(&client, &service.base_url).await;
    assert!(tasks[0]["completed_at"].is_string());

    // Toggle back
    let res = client
        .patch(format!("{}/tasks/{id}/complete", service.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    let tasks = list_tasks(&client, &service.base_url).await;
    assert_eq!(tasks[0]["completed_at"], Value::Null);
    assert_eq!(tasks[0]["id"], id.as_str());
}

#[tokio::test]
async fn replace_validates_fields_and_preserves_creation() {
    let service = common::start_service().await;
    let client = common::client();

    client
        .post(format!("{}/tasks", service.base_url))
        .json(&json!({ "title": "before", "description": "d" }))
        .send()
        .await
        .unwrap();
    let tasks = list_tasks(&client, &service.base_url).await;
    let id = tasks[0]["id"].as_str().unwrap().to_string();
    let created_at = tasks[0]["created_at"].clone();

    // Missing description → 400 with message, record untouched
    let res = client
        .put(format!("{}/tasks/{id}", service.base_url))
        .json(&json!({ "title": "after" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "title or description are required");

    let tasks = list_tasks(&client, &service.base_url).await;
    assert_eq!(tasks[0]["title"], "before");

    // Valid replace → 204, created_at preserved, id unchanged
    let res = client
        .put(format!("{}/tasks/{id}", service.base_url))
        .json(&json!({ "title": "after", "description": "d2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);
    assert_eq!(res.text().await.unwrap(), "");

    let tasks = list_tasks(&client, &service.base_url).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], id.as_str());
    assert_eq!(tasks[0]["title"], "after");
    assert_eq!(tasks[0]["description"], "d2");
    assert_eq!(tasks[0]["created_at"], created_at);
    assert_eq!(tasks[0]["completed_at"], Value::Null);
}

#[tokio::test]
async fn unknown_id_yields_404_and_no_mutation() {
    let service = common::start_service().await;
    let client = common::client();

    let missing = format!("{}/tasks/5b4c8f00-0000-0000-0000-000000000000", service.base_url);

    let res = client
        .put(&missing)
        .json(&json!({ "title": "t", "description": "d" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "");

    let res = client.delete(&missing).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let res = client
        .patch(format!("{missing}/complete"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    assert!(list_tasks(&client, &service.base_url).await.is_empty());
}

#[tokio::test]
async fn delete_removes_the_task() {
    let service = common::start_service().await;
    let client = common::client();

    client
        .post(format!("{}/tasks", service.base_url))
        .json(&json!({ "title": "gone soon", "description": "d" }))
        .send()
        .await
        .unwrap();
    let tasks = list_tasks(&client, &service.base_url).await;
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    let res = client
        .delete(format!("{}/tasks/{id}", service.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 204);

    assert!(list_tasks(&client, &service.base_url).await.is_empty());

    // Deleting again is a 404
    let res = client
        .delete(format!("{}/tasks/{id}", service.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn unmatched_routes_yield_404() {
    let service = common::start_service().await;
    let client = common::client();

    for url in [
        format!("{}/", service.base_url),
        format!("{}/nope", service.base_url),
        format!("{}/tasks/", service.base_url),
        format!("{}/tasks/1/2/3", service.base_url),
    ] {
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), 404, "expected 404 for {url}");
    }

    // Right path, wrong method
    let res = client
        .patch(format!("{}/tasks", service.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    // PATCH without the /complete suffix is not a route
    let res = client
        .patch(format!("{}/tasks/some-id", service.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let service = common::start_service().await;
    let client = common::client();

    let res = client
        .post(format!("{}/tasks", service.base_url))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    assert!(list_tasks(&client, &service.base_url).await.is_empty());
}

#[tokio::test]
async fn ids_are_unique_and_immutable() {
    let service = common::start_service().await;
    let client = common::client();

    for i in 0..3 {
        client
            .post(format!("{}/tasks", service.base_url))
            .json(&json!({ "title": format!("t{i}"), "description": "d" }))
            .send()
            .await
            .unwrap();
    }

    let tasks = list_tasks(&client, &service.base_url).await;
    let mut ids: Vec<String> = tasks
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 3);
    let before = ids.clone();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3, "ids must be unique");

    // Replace one, toggle another; ids must not change
    client
        .put(format!("{}/tasks/{}", service.base_url, before[0]))
        .json(&json!({ "title": "renamed", "description": "d" }))
        .send()
        .await
        .unwrap();
    client
        .patch(format!("{}/tasks/{}/complete", service.base_url, before[1]))
        .send()
        .await
        .unwrap();

    let after: Vec<String> = list_tasks(&client, &service.base_url)
        .await
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(after, before);
}

#[tokio::test]
async fn tasks_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("tasks.json");
    let client = common::client();

    let service = common::start_service_with(data_path.clone()).await;
    for title in ["first", "second"] {
        client
            .post(format!("{}/tasks", service.base_url))
            .json(&json!({ "title": title, "description": "d" }))
            .send()
            .await
            .unwrap();
    }
    drop(service);

    let service = common::start_service_with(data_path).await;
    let tasks = list_tasks(&client, &service.base_url).await;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "first");
    assert_eq!(tasks[1]["title"], "second");
}
