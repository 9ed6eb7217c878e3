//! Authentication service: login and principal resolution

use std::sync::Arc;

use tracing::{info, warn};

use fleetops_security::{JwtService, PasswordService};

use crate::domain::{Principal, User, UserDetail};
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtService,
}

/// Result of a successful login
#[derive(Debug)]
pub struct LoginResult {
    pub user: User,
    pub access_token: String,
    pub expires_in: i64,
}

/// Session profile: user, roles, and the aggregated permission union
#[derive(Debug)]
pub struct ProfileResult {
    pub user: UserDetail,
    pub permissions: Vec<String>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String, access_expiry: i64) -> Self {
        Self {
            users,
            jwt: JwtService::new(jwt_secret, access_expiry),
        }
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for email: {}", email);

        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", email);
            DomainError::InvalidCredentials
        })?;

        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        let access_token = self
            .jwt
            .generate_access_token(&user.id)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!("Login successful for: {}", email);
        Ok(LoginResult {
            user,
            access_token,
            expires_in: self.jwt.access_token_expiry(),
        })
    }

    /// Resolves a bearer token into the acting principal.
    pub async fn authenticate(&self, token: &str) -> Result<Principal, DomainError> {
        let claims = self
            .jwt
            .validate_token(token)
            .map_err(|_| DomainError::InvalidCredentials)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::InvalidCredentials)?;

        self.users
            .find_principal(&user_id)
            .await?
            .ok_or(DomainError::InvalidCredentials)
    }

    /// Session profile for the permission hook: user detail plus the sorted
    /// permission union.
    pub async fn profile(&self, principal: &Principal) -> Result<ProfileResult, DomainError> {
        let user = self
            .users
            .find_detail(&principal.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", principal.id))?;

        let mut permissions: Vec<String> = principal.permissions.iter().cloned().collect();
        permissions.sort();

        Ok(ProfileResult { user, permissions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateUser;
    use crate::repositories::user_repository::MockUserRepository;

    fn user_with_password(password: &str) -> User {
        let hash = PasswordService::hash(password).unwrap();
        User::new(
            &CreateUser {
                name: "Ops".into(),
                email: "ops@example.com".into(),
                phone: None,
                password: password.into(),
                role_ids: vec![],
            },
            hash,
            None,
        )
    }

    #[tokio::test]
    async fn login_returns_a_token_that_authenticates() {
        let user = user_with_password("correct-horse-battery");
        let user_id = user.id;
        let principal = Principal {
            id: user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            permissions: Default::default(),
        };

        let mut users = MockUserRepository::new();
        let found = user.clone();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(found.clone())));
        users
            .expect_find_principal()
            .returning(move |_| Ok(Some(principal.clone())));

        let service = AuthService::new(Arc::new(users), "test-secret".into(), 3600);

        let login = service
            .login("ops@example.com", "correct-horse-battery")
            .await
            .unwrap();
        let resolved = service.authenticate(&login.access_token).await.unwrap();
        assert_eq!(resolved.id, user_id);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let user = user_with_password("correct-horse-battery");

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(users), "test-secret".into(), 3600);

        let err = service
            .login("ops@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_indistinguishable_from_bad_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(users), "test-secret".into(), 3600);

        let err = service.login("ghost@example.com", "any").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }
}
