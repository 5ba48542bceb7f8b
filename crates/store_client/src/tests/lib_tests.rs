use super::*;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use shared::domain::{Employee, EmployeeDraft, EmployeeId, Gender};
use shared::error::{ApiError, ErrorCode};

/// In-memory stand-in for the hosted table store, speaking just enough of the
/// REST dialect the client issues.
#[derive(Clone, Default)]
struct MockStore {
    rows: Arc<Mutex<Vec<Employee>>>,
    next_id: Arc<Mutex<u32>>,
}

impl MockStore {
    fn assign_id(&self) -> EmployeeId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        // Zero-padded so lexicographic id order matches insertion order.
        EmployeeId(format!("{:04}", *next))
    }
}

fn id_filter(params: &HashMap<String, String>) -> Option<Vec<String>> {
    let raw = params.get("id")?;
    if let Some(value) = raw.strip_prefix("eq.") {
        return Some(vec![value.to_string()]);
    }
    let inner = raw.strip_prefix("in.(")?.strip_suffix(')')?;
    Some(inner.split(',').map(str::to_string).collect())
}

fn matching(rows: &[Employee], params: &HashMap<String, String>) -> Vec<Employee> {
    match id_filter(params) {
        Some(ids) => rows
            .iter()
            .filter(|row| ids.iter().any(|id| id == row.id.as_str()))
            .cloned()
            .collect(),
        None => rows.to_vec(),
    }
}

async fn list(
    State(store): State<MockStore>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Employee>> {
    let rows = store.rows.lock().unwrap();
    let mut rows = matching(&rows, &params);
    if params.get("order").map(String::as_str) == Some("id.asc") {
        rows.sort_by(|a, b| a.id.cmp(&b.id));
    }
    Json(rows)
}

async fn insert(
    State(store): State<MockStore>,
    Json(draft): Json<EmployeeDraft>,
) -> (StatusCode, Json<Vec<Employee>>) {
    let row = Employee {
        id: store.assign_id(),
        name: draft.name,
        age: draft.age,
        gender: draft.gender,
        occupation: draft.occupation,
        phone: draft.phone,
        mail: draft.mail,
    };
    store.rows.lock().unwrap().push(row.clone());
    (StatusCode::CREATED, Json(vec![row]))
}

async fn update(
    State(store): State<MockStore>,
    Query(params): Query<HashMap<String, String>>,
    Json(draft): Json<EmployeeDraft>,
) -> StatusCode {
    let ids = id_filter(&params).unwrap_or_default();
    let mut rows = store.rows.lock().unwrap();
    for row in rows.iter_mut() {
        if ids.iter().any(|id| id == row.id.as_str()) {
            row.name = draft.name.clone();
            row.age = draft.age;
            row.gender = draft.gender;
            row.occupation = draft.occupation.clone();
            row.phone = draft.phone.clone();
            row.mail = draft.mail.clone();
        }
    }
    StatusCode::NO_CONTENT
}

async fn remove(
    State(store): State<MockStore>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    let ids = id_filter(&params).unwrap_or_default();
    let mut rows = store.rows.lock().unwrap();
    rows.retain(|row| !ids.iter().any(|id| id == row.id.as_str()));
    StatusCode::NO_CONTENT
}

async fn spawn_mock_store() -> StoreClient {
    let store = MockStore::default();
    let app = Router::new()
        .route(
            "/rest/v1/Employee",
            get(list).post(insert).patch(update).delete(remove),
        )
        .with_state(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock store");
    let addr = listener.local_addr().expect("mock store addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock store");
    });
    StoreClient::new(StoreConfig {
        base_url: format!("http://{addr}"),
        api_key: "test-key".to_string(),
    })
}

/// Mock that rejects everything with a decoded error envelope.
async fn spawn_failing_store() -> StoreClient {
    let app = Router::new().fallback(|| async {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new(ErrorCode::Internal, "maintenance window")),
        )
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failing store");
    let addr = listener.local_addr().expect("failing store addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve failing store");
    });
    StoreClient::new(StoreConfig {
        base_url: format!("http://{addr}"),
        api_key: "test-key".to_string(),
    })
}

fn draft(name: &str, mail: &str) -> EmployeeDraft {
    EmployeeDraft {
        name: name.to_string(),
        age: 30,
        gender: Gender::Other,
        occupation: "Engineer".to_string(),
        phone: "+14155550123".to_string(),
        mail: mail.to_string(),
    }
}

#[tokio::test]
async fn inserted_draft_round_trips_through_get_one() {
    let client = spawn_mock_store().await;
    let wanted = draft("Alice", "alice@example.com");

    let stored = client.insert_employee(&wanted).await.expect("insert");
    let fetched = client.get_employee(&stored.id).await.expect("get-one");

    assert_eq!(fetched.id, stored.id);
    let (_, fetched_draft) = fetched.into_parts();
    assert_eq!(fetched_draft, wanted);
}

#[tokio::test]
async fn listing_returns_rows_ordered_by_id_ascending() {
    let client = spawn_mock_store().await;
    for name in ["Carol", "Alice", "Bob"] {
        client
            .insert_employee(&draft(name, "x@example.com"))
            .await
            .expect("insert");
    }

    let rows = client.list_employees().await.expect("list");
    assert_eq!(rows.len(), 3);
    let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn deleted_ids_are_absent_from_the_next_listing() {
    let client = spawn_mock_store().await;
    let mut ids = Vec::new();
    for name in ["Alice", "Bob", "Carol"] {
        let row = client
            .insert_employee(&draft(name, "x@example.com"))
            .await
            .expect("insert");
        ids.push(row.id);
    }

    let targets = vec![ids[0].clone(), ids[2].clone()];
    client.delete_employees(&targets).await.expect("delete");

    let rows = client.list_employees().await.expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ids[1]);
    assert!(rows.iter().all(|row| !targets.contains(&row.id)));
}

#[tokio::test]
async fn update_rewrites_every_editable_field() {
    let client = spawn_mock_store().await;
    let stored = client
        .insert_employee(&draft("Alice", "alice@example.com"))
        .await
        .expect("insert");

    let replacement = EmployeeDraft {
        name: "Alice Smith".to_string(),
        age: 31,
        gender: Gender::Female,
        occupation: "Manager".to_string(),
        phone: "+14155550999".to_string(),
        mail: "alice.smith@example.com".to_string(),
    };
    client
        .update_employee(&stored.id, &replacement)
        .await
        .expect("update");

    let fetched = client.get_employee(&stored.id).await.expect("get-one");
    let (id, fetched_draft) = fetched.into_parts();
    assert_eq!(id, stored.id);
    assert_eq!(fetched_draft, replacement);
}

#[tokio::test]
async fn get_one_for_a_missing_id_is_a_row_count_error() {
    let client = spawn_mock_store().await;

    let err = client
        .get_employee(&EmployeeId("no-such-id".to_string()))
        .await
        .expect_err("missing row");

    match err {
        StoreError::RowCount { count, id, .. } => {
            assert_eq!(count, 0);
            assert_eq!(id, "no-such-id");
        }
        other => panic!("expected RowCount, got {other:?}"),
    }
}

#[tokio::test]
async fn filter_values_reach_the_store_encoded_exactly_once() {
    let captured: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let seen = captured.clone();
    let app = Router::new().route(
        "/rest/v1/Employee",
        get(move |RawQuery(query): RawQuery| {
            let seen = seen.clone();
            async move {
                *seen.lock().unwrap() = query;
                Json(Vec::<Employee>::new())
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind capture store");
    let addr = listener.local_addr().expect("capture store addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve capture store");
    });
    let client = StoreClient::new(StoreConfig {
        base_url: format!("http://{addr}"),
        api_key: "test-key".to_string(),
    });

    // Ids are opaque and server-assigned, so reserved characters must survive
    // the round through the query string.
    let err = client
        .get_employee(&EmployeeId("a+b".to_string()))
        .await
        .expect_err("capture store holds no rows");
    assert!(matches!(err, StoreError::RowCount { count: 0, .. }));

    let query = captured.lock().unwrap().clone().expect("captured query");
    assert!(
        query.contains("id=eq.a%2Bb"),
        "filter value was not single-encoded on the wire: {query}"
    );
}

#[tokio::test]
async fn rejection_carries_status_and_decoded_error_body() {
    let client = spawn_failing_store().await;

    let err = client.list_employees().await.expect_err("store down");
    match err {
        StoreError::Rejected {
            status,
            message,
            body,
        } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(message, "maintenance window");
            assert!(matches!(
                body,
                Some(ApiError {
                    code: ErrorCode::Internal,
                    ..
                })
            ));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(client.list_employees().await.unwrap_err().is_transient());
}

#[tokio::test]
async fn empty_delete_set_never_touches_the_network() {
    // Points at a port nothing listens on; only a skipped request can succeed.
    let client = StoreClient::new(StoreConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        api_key: "test-key".to_string(),
    });

    client.delete_employees(&[]).await.expect("no-op delete");
}
