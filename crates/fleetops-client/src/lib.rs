//! # FleetOps Client
//!
//! Typed SDK over the FleetOps REST API: explicit session lifecycle,
//! per-resource CRUD handles, response normalization, and the permission
//! hook for UI gating.

pub mod envelope;
pub mod error;
pub mod permissions;
pub mod resources;
pub mod session;

pub use envelope::Envelope;
pub use error::ClientError;
pub use permissions::Permissions;
pub use resources::{AttachmentFile, IncomeClient, ListParams, ResourceClient};
pub use session::{Profile, Session, SessionUser};

use serde_json::Value;

use fleetops_core::domain::{
    Bank, Employee, LoadType, Order, Permission, Role, RoleDetail, User, UserDetail,
};

use resources::{check, decode_data};

pub struct FleetClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl FleetClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url,
            session: Session::default(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Permission hook over the cached session profile.
    pub fn permissions(&self) -> Permissions<'_> {
        Permissions::new(&self.session)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    pub(crate) fn bearer(&self) -> Result<String, ClientError> {
        self.session.token().ok_or(ClientError::Unauthenticated)
    }

    /// Logs in, stores the token, and caches the session profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body = check(response).await?;

        let token = body
            .pointer("/data/access_token")
            .and_then(Value::as_str)
            .ok_or(ClientError::UnexpectedFormat)?
            .to_string();
        self.session.set_token(token);

        let profile = self.fetch_profile().await?;
        self.session.set_profile(profile.clone());
        Ok(profile)
    }

    /// Re-reads the session profile from the server.
    pub async fn fetch_profile(&self) -> Result<Profile, ClientError> {
        let response = self
            .http
            .get(self.url("/auth/profile"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        decode_data(check(response).await?)
    }

    /// Logs out: the server acknowledgement is best-effort, the local
    /// session always clears.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Ok(token) = self.bearer() {
            let _ = self
                .http
                .post(self.url("/auth/logout"))
                .bearer_auth(token)
                .send()
                .await;
        }
        self.session.clear();
        Ok(())
    }

    /// The seeded permission catalogue (for role forms).
    pub async fn list_permissions(&self) -> Result<Vec<Permission>, ClientError> {
        let response = self
            .http
            .get(self.url("/permissions"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        decode_data(check(response).await?)
    }

    pub fn employees(&self) -> ResourceClient<'_, Employee> {
        ResourceClient::new(self, "/employees")
    }

    pub fn incomes(&self) -> IncomeClient<'_> {
        IncomeClient::new(self)
    }

    pub fn orders(&self) -> ResourceClient<'_, Order> {
        ResourceClient::new(self, "/orders")
    }

    pub fn banks(&self) -> ResourceClient<'_, Bank> {
        ResourceClient::new(self, "/banks")
    }

    pub fn load_types(&self) -> ResourceClient<'_, LoadType> {
        ResourceClient::new(self, "/load-types")
    }

    pub fn roles(&self) -> ResourceClient<'_, Role, RoleDetail> {
        ResourceClient::new(self, "/roles")
    }

    pub fn users(&self) -> ResourceClient<'_, User, UserDetail> {
        ResourceClient::new(self, "/users")
    }
}
