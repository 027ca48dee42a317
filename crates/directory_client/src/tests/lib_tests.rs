use std::sync::{Arc, Mutex};

use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct RecordingState {
    requests: Arc<Mutex<Vec<(String, Option<i64>, Value)>>>,
}

impl RecordingState {
    fn recorded(&self) -> Vec<(String, Option<i64>, Value)> {
        self.requests.lock().expect("recording lock").clone()
    }
}

async fn spawn_server(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/api"))
}

fn ada_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": null,
        "department": "Engineering",
        "position": null,
        "salary": 75000.0,
        "hire_date": "2023-01-15"
    })
}

fn ada_draft() -> EmployeeDraft {
    EmployeeDraft {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: None,
        department: Some("Engineering".to_string()),
        position: None,
        salary: Some(75000.0),
        hire_date: NaiveDate::from_ymd_opt(2023, 1, 15),
    }
}

async fn spawn_recording_server() -> Result<(String, RecordingState)> {
    let state = RecordingState::default();
    let app = Router::new()
        .route(
            "/api/employees",
            get(|| async {
                Json(json!([
                    ada_json(1),
                    { "id": 2, "name": "Alan Turing", "email": "alan@example.com" }
                ]))
            })
            .post(
                |State(state): State<RecordingState>, Json(body): Json<Value>| async move {
                    state
                        .requests
                        .lock()
                        .expect("recording lock")
                        .push(("POST".to_string(), None, body));
                    (StatusCode::CREATED, Json(ada_json(9)))
                },
            ),
        )
        .route(
            "/api/employees/:id",
            get(|Path(id): Path<i64>| async move { Json(ada_json(id)) })
                .put(
                    |State(state): State<RecordingState>,
                     Path(id): Path<i64>,
                     Json(body): Json<Value>| async move {
                        state.requests.lock().expect("recording lock").push((
                            "PUT".to_string(),
                            Some(id),
                            body,
                        ));
                        Json(ada_json(id))
                    },
                )
                .delete(
                    |State(state): State<RecordingState>, Path(id): Path<i64>| async move {
                        state.requests.lock().expect("recording lock").push((
                            "DELETE".to_string(),
                            Some(id),
                            Value::Null,
                        ));
                        StatusCode::NO_CONTENT
                    },
                ),
        )
        .with_state(state.clone());
    Ok((spawn_server(app).await?, state))
}

async fn spawn_failing_server(status: StatusCode, body: Value) -> Result<String> {
    let app = Router::new().route(
        "/api/employees",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    spawn_server(app).await
}

#[tokio::test]
async fn list_decodes_records_with_missing_optionals() {
    let (base_url, _) = spawn_recording_server().await.expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let employees = api.list().await.expect("list");

    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].id, EmployeeId(1));
    assert_eq!(employees[0].salary, Some(75000.0));
    assert_eq!(employees[0].hire_date, NaiveDate::from_ymd_opt(2023, 1, 15));
    assert_eq!(employees[1].name, "Alan Turing");
    assert_eq!(employees[1].department, None);
    assert_eq!(employees[1].hire_date, None);
}

#[tokio::test]
async fn get_fetches_single_record_by_id() {
    let (base_url, _) = spawn_recording_server().await.expect("spawn server");
    let api = HttpEmployeeApi::new(format!("{base_url}/"));

    let employee = api.get(EmployeeId(5)).await.expect("get");

    assert_eq!(employee.id, EmployeeId(5));
    assert_eq!(employee.email, "ada@example.com");
}

#[tokio::test]
async fn create_posts_draft_with_explicit_nulls() {
    let (base_url, state) = spawn_recording_server().await.expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let created = api.create(&ada_draft()).await.expect("create");

    assert_eq!(created.id, EmployeeId(9));
    let recorded = state.recorded();
    assert_eq!(recorded.len(), 1);
    let (method, id, body) = &recorded[0];
    assert_eq!(method, "POST");
    assert_eq!(*id, None);
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["phone"], Value::Null);
    assert_eq!(body["hire_date"], "2023-01-15");
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn update_puts_full_record_to_item_route() {
    let (base_url, state) = spawn_recording_server().await.expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let updated = api.update(EmployeeId(4), &ada_draft()).await.expect("update");

    assert_eq!(updated.id, EmployeeId(4));
    let recorded = state.recorded();
    assert_eq!(recorded[0].0, "PUT");
    assert_eq!(recorded[0].1, Some(4));
    assert_eq!(recorded[0].2["department"], "Engineering");
    assert_eq!(recorded[0].2["position"], Value::Null);
}

#[tokio::test]
async fn delete_accepts_empty_no_content_response() {
    let (base_url, state) = spawn_recording_server().await.expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    api.delete(EmployeeId(3)).await.expect("delete");

    assert_eq!(
        state.recorded(),
        vec![("DELETE".to_string(), Some(3), Value::Null)]
    );
}

#[tokio::test]
async fn not_found_detail_is_surfaced_verbatim() {
    let base_url = spawn_failing_server(
        StatusCode::NOT_FOUND,
        json!({ "detail": "Employee with ID 4 not found" }),
    )
    .await
    .expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let err = api.list().await.expect_err("404");

    assert_eq!(
        err,
        ClientError::Server {
            status: 404,
            message: "Employee with ID 4 not found".to_string()
        }
    );
}

#[tokio::test]
async fn bad_request_maps_to_validation_error() {
    let base_url = spawn_failing_server(
        StatusCode::BAD_REQUEST,
        json!({ "detail": "Email already exists" }),
    )
    .await
    .expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let err = api.list().await.expect_err("400");

    assert!(matches!(err, ClientError::Validation { status: 400, .. }));
    assert_eq!(err.message(), "Email already exists");
}

#[tokio::test]
async fn unprocessable_item_list_is_flattened() {
    let base_url = spawn_failing_server(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "detail": [
            { "loc": ["body", "email"], "msg": "value is not a valid email address" },
            { "loc": ["body", "salary"], "msg": "Input should be greater than or equal to 0" }
        ]}),
    )
    .await
    .expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let err = api.list().await.expect_err("422");

    assert_eq!(err.status(), Some(422));
    assert_eq!(
        err.message(),
        "email: value is not a valid email address; salary: Input should be greater than or equal to 0"
    );
}

#[tokio::test]
async fn html_error_body_falls_back_to_status_message() {
    let app = Router::new().route(
        "/api/employees",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Internal Server Error</h1>"),
            )
                .into_response()
        }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let err = api.list().await.expect_err("500");

    assert_eq!(err.message(), "Request failed with status code 500");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let app = Router::new().route(
        "/api/employees",
        get(|| async { Json(json!({ "unexpected": true })) }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");
    let api = HttpEmployeeApi::new(base_url);

    let err = api.list().await.expect_err("decode");

    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let api = HttpEmployeeApi::new(format!("http://{addr}/api"));

    let err = api.list().await.expect_err("connection refused");

    assert!(matches!(err, ClientError::Network { .. }));
    assert!(!err.message().is_empty());
    assert_eq!(err.status(), None);
}

#[test]
fn from_settings_normalizes_base_url() {
    let settings = ClientSettings {
        api_base_url: "http://localhost:9000/api/".to_string(),
        request_timeout_secs: 5,
    };
    let api = HttpEmployeeApi::from_settings(&settings).expect("client");
    assert_eq!(api.base_url(), "http://localhost:9000/api");

    let settings = ClientSettings {
        api_base_url: "localhost:9000".to_string(),
        ..ClientSettings::default()
    };
    assert!(HttpEmployeeApi::from_settings(&settings).is_err());
}
