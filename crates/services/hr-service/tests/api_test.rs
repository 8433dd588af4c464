//! Integration tests for API endpoints.
//!
//! Accounts run through the real services and token handling on top of an
//! in-memory repository. Departments, employees and uploads use fake services,
//! and the database handle is disconnected.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{
    Account, AccountChanges, AccountFilter, AccountQuery, Department, Employee, NewAccount,
    Profile, ProfileChanges, Role, RoleName,
};
use hr_service_lib::api::{create_router, AppState};
use hr_service_lib::config::HrServiceConfig;
use hr_service_lib::credentials::Credentials;
use hr_service_lib::dto::{
    CreateDepartmentRequest, CreateEmployeeRequest, DepartmentListParams, EmployeeListParams,
    UpdateDepartmentRequest, UpdateEmployeeRequest,
};
use hr_service_lib::infra::Database;
use hr_service_lib::repository::{AccountField, AccountRepository};
use hr_service_lib::service::{
    AccountManager, AccountService, Authenticator, DepartmentService, EmployeeService,
    FileService, UploadedFile,
};

const JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// In-memory fakes
// =============================================================================

/// Account repository backed by a vector.
#[derive(Default)]
struct InMemoryAccounts {
    rows: Mutex<Vec<Account>>,
}

impl InMemoryAccounts {
    fn insert(&self, account: Account) {
        self.rows.lock().unwrap().push(account);
    }

    fn matches(account: &Account, filter: &AccountFilter) -> bool {
        if !filter.include_deleted && !account.is_active() {
            return false;
        }
        match filter.search.as_deref().map(str::to_lowercase) {
            Some(term) => {
                account.name.to_lowercase().contains(&term)
                    || account.email.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn get_by_field(
        &self,
        field: AccountField,
        include_deleted: bool,
    ) -> AppResult<Option<Account>> {
        let rows = self.rows.lock().unwrap();
        let found = rows.iter().find(|a| {
            let hit = match &field {
                AccountField::Id(id) => a.id == *id,
                AccountField::Email(email) => a.has_email(email),
            };
            hit && (include_deleted || a.is_active())
        });
        Ok(found.cloned())
    }

    async fn list(&self, query: &AccountQuery) -> AppResult<Vec<Account>> {
        let mut rows: Vec<Account> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| Self::matches(a, &query.filter))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(rows
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &AccountFilter) -> AppResult<u64> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|a| Self::matches(a, filter)).count() as u64)
    }

    async fn create(&self, account: NewAccount) -> AppResult<Account> {
        let role = RoleName::from_id(account.role_id)
            .ok_or_else(|| AppError::field("role_id", "Role does not exist"))?;
        let now = Utc::now();
        let created = Account {
            id: account.id,
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            role: Role::from(role),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            profile: Profile::default(),
        };
        self.insert(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> AppResult<Account> {
        let mut rows = self.rows.lock().unwrap();
        let account = rows
            .iter_mut()
            .find(|a| a.id == id && a.is_active())
            .ok_or_else(|| AppError::not_found("Account"))?;
        account.name = changes.name;
        account.email = changes.email;
        account.password_hash = changes.password_hash;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn update_profile(&self, id: Uuid, changes: ProfileChanges) -> AppResult<Account> {
        let mut rows = self.rows.lock().unwrap();
        let account = rows
            .iter_mut()
            .find(|a| a.id == id && a.is_active())
            .ok_or_else(|| AppError::not_found("Account"))?;
        if let Some(name) = changes.name {
            account.name = name;
        }
        if let Some(email) = changes.email {
            account.email = email;
        }
        if let Some(uri) = changes.user_image_uri {
            account.profile.user_image_uri = Some(uri);
        }
        if let Some(company) = changes.company_name {
            account.profile.company_name = Some(company);
        }
        if let Some(uri) = changes.company_image_uri {
            account.profile.company_image_uri = Some(uri);
        }
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let account = rows
            .iter_mut()
            .find(|a| a.id == id && a.is_active())
            .ok_or_else(|| AppError::not_found("Account"))?;
        account.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn restore(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let account = rows
            .iter_mut()
            .find(|a| a.id == id && !a.is_active())
            .ok_or_else(|| AppError::not_found("Account"))?;
        account.deleted_at = None;
        Ok(())
    }

    async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(AppError::not_found("Account"));
        }
        Ok(())
    }

    async fn role_exists(&self, role_id: i32) -> AppResult<bool> {
        Ok(RoleName::from_id(role_id).is_some())
    }
}

/// Department service that records what it was asked to create.
#[derive(Default)]
struct FakeDepartments {
    created: Mutex<Vec<Department>>,
}

#[async_trait]
impl DepartmentService for FakeDepartments {
    async fn create(
        &self,
        manager_id: Uuid,
        request: CreateDepartmentRequest,
    ) -> AppResult<Department> {
        let mut created = self.created.lock().unwrap();
        let department = Department {
            id: created.len() as i32 + 1,
            name: request.name,
            manager_id,
            created_at: Utc::now(),
        };
        created.push(department.clone());
        Ok(department)
    }

    async fn list(&self, _params: DepartmentListParams) -> AppResult<Vec<Department>> {
        Ok(self.created.lock().unwrap().clone())
    }

    async fn update(&self, _id: i32, _request: UpdateDepartmentRequest) -> AppResult<Department> {
        Err(AppError::not_found("Department"))
    }

    async fn delete(&self, _id: i32) -> AppResult<Department> {
        Err(AppError::InUse("Department".to_string()))
    }
}

struct FakeEmployees;

#[async_trait]
impl EmployeeService for FakeEmployees {
    async fn create(&self, _request: CreateEmployeeRequest) -> AppResult<Employee> {
        Err(AppError::conflict("Employee"))
    }

    async fn list(&self, _params: EmployeeListParams) -> AppResult<Vec<Employee>> {
        Ok(vec![])
    }

    async fn update(
        &self,
        _identity_number: &str,
        _request: UpdateEmployeeRequest,
    ) -> AppResult<Employee> {
        Err(AppError::not_found("Employee"))
    }

    async fn delete(&self, _identity_number: &str) -> AppResult<()> {
        Err(AppError::not_found("Employee"))
    }
}

struct FakeFiles;

#[async_trait]
impl FileService for FakeFiles {
    async fn upload(&self, file: UploadedFile) -> AppResult<String> {
        Ok(format!("https://cdn.example.com/{}", file.file_name))
    }
}

// =============================================================================
// Harness
// =============================================================================

struct TestApp {
    router: Router,
    accounts: Arc<InMemoryAccounts>,
    departments: Arc<FakeDepartments>,
    credentials: Arc<Credentials>,
}

fn test_config(app_env: &str, api_key: Option<&str>) -> HrServiceConfig {
    let mut config = HrServiceConfig::default();
    config.service.app_env = app_env.to_string();
    config.jwt = JwtConfig {
        secret: JWT_SECRET.to_string(),
        ..JwtConfig::default()
    };
    config.api_key = api_key.map(str::to_string);
    config
}

fn build_app(config: HrServiceConfig) -> TestApp {
    let credentials = Arc::new(Credentials::new(&config.jwt));
    let accounts = Arc::new(InMemoryAccounts::default());
    let departments = Arc::new(FakeDepartments::default());

    let account_service: Arc<dyn AccountService> = Arc::new(AccountManager::new(
        accounts.clone(),
        credentials.clone(),
    ));
    let auth = Arc::new(Authenticator::new(
        account_service.clone(),
        accounts.clone(),
        credentials.clone(),
    ));

    let state = AppState {
        accounts: account_service,
        auth,
        departments: departments.clone(),
        employees: Arc::new(FakeEmployees),
        files: Arc::new(FakeFiles),
        database: Database::from_connection(DatabaseConnection::Disconnected),
        config: Arc::new(config),
    };

    TestApp {
        router: create_router(state),
        accounts,
        departments,
        credentials,
    }
}

fn dev_app() -> TestApp {
    build_app(test_config("development", None))
}

impl TestApp {
    /// Store an account directly and return a token for it.
    fn seed_account(&self, name: &str, email: &str, role: RoleName) -> (Uuid, String) {
        let id = Uuid::now_v7();
        let now = Utc::now();
        self.accounts.insert(Account {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: Role::from(role),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            profile: Profile::default(),
        });
        (id, self.token_for(id, role))
    }

    fn token_for(&self, id: Uuid, role: RoleName) -> String {
        self.credentials.issue_token(id, role).unwrap().token
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = dev_app();

    let (status, body) = app.send(request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    let app = dev_app();

    let response = app
        .router
        .clone()
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_create_then_get_account() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::SuperAdmin);

    let (status, body) = app
        .send(request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({
                "name": "Alice Doe",
                "email": "Alice@Example.com",
                "password": "password123",
                "role_id": 1
            })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    assert_eq!(id.get_version_num(), 7);

    let (status, body) = app
        .send(request(Method::GET, &format!("/users/{}", id), Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Alice Doe");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["role"]["name"], "Superadmin");
    assert_eq!(body["user"]["role_id"], 1);
    assert!(!body.to_string().contains("password"));
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({
                "name": "Someone Else",
                "email": "ROOT@example.com",
                "password": "password123",
                "role_id": 4
            })),
        ))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_rejects_unknown_role() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({
                "name": "Alice Doe",
                "email": "alice@example.com",
                "password": "password123",
                "role_id": 9
            })),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"][0]["field"], "role_id");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = dev_app();

    let (status, _) = app.send(request(Method::GET, "/users", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(request(Method::GET, "/users", Some("garbage"), None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_role_cannot_manage_accounts() {
    let app = dev_app();
    let (_, token) = app.seed_account("Plain User", "user@example.com", RoleName::User);

    let (status, body) = app.send(request(Method::GET, "/users", Some(&token), None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_me_is_open_to_every_role() {
    let app = dev_app();
    let (id, token) = app.seed_account("Plain User", "user@example.com", RoleName::User);

    let (status, body) = app
        .send(request(Method::GET, "/users/me", Some(&token), None))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id.to_string());
    assert_eq!(body["user"]["role"]["name"], "User");
}

#[tokio::test]
async fn test_list_rejects_unknown_sort_field() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, _) = app
        .send(request(Method::GET, "/users?sort_by=password", Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(request(Method::GET, "/users?limit=0", Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rejects_page_past_the_upper_bound() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(
            Method::GET,
            "/users?limit=100&page=18446744073709551615",
            Some(&admin),
            None,
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"][0]["field"], "page");
}

#[tokio::test]
async fn test_soft_delete_then_restore_keeps_fields() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);
    let (id, _) = app.seed_account("Bob Smith", "bob@example.com", RoleName::User);
    let path = format!("/users/{}", id);

    let (status, body) = app
        .send(request(Method::PATCH, &format!("{}/soft-delete", path), Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());

    let (status, _) = app.send(request(Method::GET, &path, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(request(Method::PATCH, &format!("{}/soft-delete", path), Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(request(Method::PATCH, &format!("{}/restore", path), Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(request(Method::GET, &path, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Bob Smith");
    assert_eq!(body["user"]["email"], "bob@example.com");
    assert!(body["user"].get("deleted_at").is_none());
}

#[tokio::test]
async fn test_restore_active_account_is_not_found() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);
    let (id, _) = app.seed_account("Bob Smith", "bob@example.com", RoleName::User);

    let (status, _) = app
        .send(request(Method::PATCH, &format!("/users/{}/restore", id), Some(&admin), None))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hard_delete_removes_soft_deleted_account() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);
    let (id, _) = app.seed_account("Bob Smith", "bob@example.com", RoleName::User);

    app.send(request(Method::PATCH, &format!("/users/{}/soft-delete", id), Some(&admin), None))
        .await;
    let (status, _) = app
        .send(request(Method::DELETE, &format!("/users/{}", id), Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(request(Method::DELETE, &format!("/users/{}", id), Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_add_up() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);
    let (bob, _) = app.seed_account("Bob Smith", "bob@example.com", RoleName::User);
    app.seed_account("Carol Lee", "carol@example.com", RoleName::User);

    app.send(request(Method::PATCH, &format!("/users/{}/soft-delete", bob), Some(&admin), None))
        .await;

    let (status, body) = app
        .send(request(Method::GET, "/users/stats", Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_users"], 3);
    assert_eq!(body["total_non_deleted_users"], 2);
    assert_eq!(body["total_deleted_users"], 1);

    let (_, body) = app
        .send(request(Method::GET, "/users/stats?search=carol", Some(&admin), None))
        .await;
    assert_eq!(body["total_users"], 1);
    assert_eq!(body["total_deleted_users"], 0);
}

#[tokio::test]
async fn test_list_excludes_deleted_by_default() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);
    let (bob, _) = app.seed_account("Bob Smith", "bob@example.com", RoleName::User);

    app.send(request(Method::PATCH, &format!("/users/{}/soft-delete", bob), Some(&admin), None))
        .await;

    let (_, body) = app.send(request(Method::GET, "/users", Some(&admin), None)).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 1);

    let (_, body) = app
        .send(request(Method::GET, "/users?include_deleted=true", Some(&admin), None))
        .await;
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Registration and login
// =============================================================================

#[tokio::test]
async fn test_register_login_and_fetch_profile() {
    let app = dev_app();

    let (status, body) = app
        .send(request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({
                "name": "Dana Park",
                "email": "dana@example.com",
                "password": "password123"
            })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "DANA@example.com", "password": "password123" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(request(Method::GET, "/users/me", Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id);
    assert_eq!(body["user"]["role"]["name"], "User");

    let (status, _) = app.send(request(Method::GET, "/users", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_failures() {
    let app = dev_app();
    app.send(request(
        Method::POST,
        "/auth/register",
        None,
        Some(json!({
            "name": "Dana Park",
            "email": "dana@example.com",
            "password": "password123"
        })),
    ))
    .await;

    let (status, body) = app
        .send(request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "dana@example.com", "password": "wrong-password" })),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "CREDENTIALS_NOT_MATCH");

    let (status, body) = app
        .send(request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "password123" })),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "EMAIL_NOT_FOUND");
}

#[tokio::test]
async fn test_register_validates_body() {
    let app = dev_app();

    let (status, body) = app
        .send(request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "name": "Al", "email": "not-an-email", "password": "short" })),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["fields"].as_array().unwrap().len(), 3);
}

// =============================================================================
// Admin v1 routes
// =============================================================================

#[tokio::test]
async fn test_department_manager_is_caller() {
    let app = dev_app();
    let (admin_id, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(
            Method::POST,
            "/v1/department",
            Some(&admin),
            Some(json!({ "name": "Engineering" })),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["departmentId"], "1");
    assert_eq!(body["name"], "Engineering");
    assert_eq!(app.departments.created.lock().unwrap()[0].manager_id, admin_id);
}

#[tokio::test]
async fn test_department_name_length_checked() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, _) = app
        .send(request(
            Method::POST,
            "/v1/department",
            Some(&admin),
            Some(json!({ "name": "HR" })),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.departments.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_department_in_use_conflicts() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(Method::DELETE, "/v1/department/1", Some(&admin), None))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "IN_USE");
}

#[tokio::test]
async fn test_v1_requires_admin() {
    let app = dev_app();
    let (_, token) = app.seed_account("Plain User", "user@example.com", RoleName::User);

    let (status, _) = app
        .send(request(Method::GET, "/v1/employee", Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(request(Method::GET, "/v1/department", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_missing_employee() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, _) = app
        .send(request(Method::DELETE, "/v1/employee/EMP-0404", Some(&admin), None))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_list_rejects_bad_gender() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, _) = app
        .send(request(Method::GET, "/v1/employee?gender=other", Some(&admin), None))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_returns_uri() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(upload_request(&admin, "avatar.png", b"PNGDATA"))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uri"], "https://cdn.example.com/avatar.png");
}

#[tokio::test]
async fn test_oversized_upload_rejected_before_buffering() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let data = vec![0u8; 512 * 1024];
    let (status, body) = app
        .send(upload_request(&admin, "avatar.png", &data))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"][0]["field"], "file");
}

fn upload_request(token: &str, file_name: &str, data: &[u8]) -> Request<Body> {
    let boundary = "X-BOUNDARY";
    let mut body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
         Content-Type: image/png\r\n\r\n",
        b = boundary,
        name = file_name
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/v1/file")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_profile_partial_update() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(
            Method::PATCH,
            "/v1/user",
            Some(&admin),
            Some(json!({
                "companyName": "Acme Corp",
                "companyImageUri": "https://cdn.example.com/acme.png"
            })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companyName"], "Acme Corp");

    let (status, body) = app
        .send(request(Method::GET, "/v1/user", Some(&admin), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Root Admin");
    assert_eq!(body["email"], "root@example.com");
    assert_eq!(body["companyName"], "Acme Corp");
    assert_eq!(body["companyImageUri"], "https://cdn.example.com/acme.png");
    assert!(body["userImageUri"].is_null());
}

#[tokio::test]
async fn test_profile_email_must_be_free() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);
    app.seed_account("Other Admin", "other@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(
            Method::PATCH,
            "/v1/user",
            Some(&admin),
            Some(json!({ "email": "OTHER@example.com" })),
        ))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_profile_rejects_bad_image_uri() {
    let app = dev_app();
    let (_, admin) = app.seed_account("Root Admin", "root@example.com", RoleName::Admin);

    let (status, body) = app
        .send(request(
            Method::PATCH,
            "/v1/user",
            Some(&admin),
            Some(json!({ "userImageUri": "http://localhost/me.png" })),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"][0]["field"], "user_image_uri");
}

// =============================================================================
// API key
// =============================================================================

#[tokio::test]
async fn test_api_key_required_outside_development() {
    let app = build_app(test_config("production", Some("s3cret")));

    let (status, body) = app.send(request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_API_KEY");

    let wrong = Request::builder()
        .uri("/health")
        .header("x-api-key", "s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_API_KEY");

    let valid = Request::builder()
        .uri("/health")
        .header("x-api-key", "Key s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(valid).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_api_key_skipped_in_development() {
    let app = build_app(test_config("development", Some("s3cret")));

    let (status, _) = app.send(request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
