//! Client SDK integration tests against a mock server.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetops_client::{ClientError, FleetClient, ListParams};
use fleetops_core::domain::{CreateEmployee, Employee, EmployeeType};

fn employee_json(id: Uuid, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "first_name": "A",
        "last_name": "B",
        "email": email,
        "phone": "123",
        "type": "DRIVER",
        "hire_date": null,
        "created_at": "2024-06-01T10:00:00Z",
        "created_by": null,
        "updated_at": "2024-06-01T10:00:00Z",
        "updated_by": null
    })
}

async fn logged_in_client(server: &MockServer) -> FleetClient {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": employee_json(Uuid::new_v4(), "ops@example.com"),
                "access_token": "test-token",
                "token_type": "Bearer",
                "expires_in": 3600
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/profile"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {
                    "id": Uuid::new_v4(),
                    "name": "Ops",
                    "email": "ops@example.com"
                },
                "permissions": ["employee.view", "employee.create"]
            }
        })))
        .mount(server)
        .await;

    let client = FleetClient::new(server.uri()).unwrap();
    client.login("ops@example.com", "password-123").await.unwrap();
    client
}

#[tokio::test]
async fn login_populates_session_and_permission_hook() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    assert!(client.session().is_authenticated());
    assert!(client.permissions().has("employee.view"));
    assert!(!client.permissions().has("employee.delete"));
    assert!(client.permissions().has_any(&["bank.view", "employee.create"]));
    assert!(!client.permissions().has_any::<&str>(&[]));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Logged out successfully."
        })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    client.logout().await.unwrap();

    assert!(!client.session().is_authenticated());
    assert!(client.permissions().all().is_empty());
}

#[tokio::test]
async fn unauthenticated_calls_fail_before_the_network() {
    let server = MockServer::start().await;
    let client = FleetClient::new(server.uri()).unwrap();

    let err = client
        .employees()
        .list(&ListParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthenticated));
}

#[tokio::test]
async fn list_decodes_the_canonical_envelope() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/employees"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                employee_json(Uuid::new_v4(), "a@example.com"),
                employee_json(Uuid::new_v4(), "b@example.com")
            ],
            "meta": {
                "current_page": 1, "per_page": 15, "total": 2,
                "last_page": 1, "from": 1, "to": 2
            }
        })))
        .mount(&server)
        .await;

    let envelope = client
        .employees()
        .list(&ListParams {
            page: Some(1),
            per_page: Some(15),
            search: None,
        })
        .await
        .unwrap();

    assert_eq!(envelope.data.len(), 2);
    let meta = envelope.meta.unwrap();
    assert_eq!(meta.total, 2);
    assert_eq!(meta.last_page, 1);
}

#[tokio::test]
async fn list_normalizes_a_bare_array_response() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            employee_json(Uuid::new_v4(), "a@example.com")
        ])))
        .mount(&server)
        .await;

    let envelope = client
        .employees()
        .list(&ListParams::default())
        .await
        .unwrap();

    assert_eq!(envelope.data.len(), 1);
    assert_eq!(envelope.meta.unwrap().total, 1);
}

#[tokio::test]
async fn create_returns_the_created_employee() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/v1/employees"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": employee_json(id, "a@b.com"),
            "message": "Employee created successfully."
        })))
        .mount(&server)
        .await;

    let created: Employee = client
        .employees()
        .create(&CreateEmployee {
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.com".into(),
            phone: "123".into(),
            employee_type: EmployeeType::Driver,
            hire_date: None,
        })
        .await
        .unwrap();

    assert_eq!(created.id, id);
    assert_eq!(created.email, "a@b.com");
}

#[tokio::test]
async fn validation_failure_surfaces_message_and_field_errors() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/employees"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "success": false,
            "message": "Validation errors",
            "errors": { "email": ["has already been taken."] }
        })))
        .mount(&server)
        .await;

    let err = client
        .employees()
        .create(&CreateEmployee {
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.com".into(),
            phone: "123".into(),
            employee_type: EmployeeType::Driver,
            hire_date: None,
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Api {
            status,
            message,
            errors,
        } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation errors");
            assert_eq!(
                errors.unwrap()["email"],
                vec!["has already been taken.".to_string()]
            );
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn opaque_error_bodies_fall_back_to_a_default_message() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/employees"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let err = client
        .employees()
        .list(&ListParams::default())
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message, .. } => {
            assert_eq!(status, 500);
            assert_eq!(message, "An unknown error occurred");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn income_create_sends_multipart_with_attachment() {
    use chrono::NaiveDate;
    use fleetops_client::AttachmentFile;
    use fleetops_core::domain::CreateIncome;

    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;
    let order_id = Uuid::new_v4();
    let bank_id = Uuid::new_v4();
    let income_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/v1/incomes"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "id": income_id,
                "order_id": order_id,
                "amount": 250.0,
                "received_date": "2024-06-01",
                "bank_id": bank_id,
                "account_number": "0001-0002",
                "payment_type": "bank_transfer",
                "remark": null,
                "attachment": "attachments/incomes/abc.pdf",
                "created_at": "2024-06-01T10:00:00Z",
                "created_by": null,
                "updated_at": "2024-06-01T10:00:00Z",
                "updated_by": null
            },
            "message": "Income created successfully."
        })))
        .mount(&server)
        .await;

    let created = client
        .incomes()
        .create(
            &CreateIncome {
                order_id,
                amount: 250.0,
                received_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                bank_id,
                account_number: "0001-0002".into(),
                payment_type: Some(fleetops_core::domain::PaymentType::BankTransfer),
                remark: None,
            },
            Some(AttachmentFile {
                file_name: "receipt.pdf".into(),
                bytes: b"pdf-bytes".to_vec(),
            }),
        )
        .await
        .unwrap();

    assert_eq!(created.id, income_id);
    assert_eq!(
        created.attachment.as_deref(),
        Some("attachments/incomes/abc.pdf")
    );
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/employees/{id}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.employees().delete(id).await.unwrap();
}
