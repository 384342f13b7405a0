use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{
    AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserProfile, normalize_email,
};
use crate::password::PasswordHashing;
use crate::repository::UserRepository;
use crate::token::TokenIssuer;

/// Registration, login and identity resolution
#[derive(Clone)]
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHashing>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(
        repository: R,
        hasher: Arc<dyn PasswordHashing>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
            tokens,
        }
    }

    /// Create an account and sign the new user in
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let email = normalize_email(&input.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email));
        }
        if self
            .repository
            .get_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .repository
            .create(NewUser {
                username: input.username,
                email,
                password_hash,
                role: input.role,
                last_login_at: Some(Utc::now()),
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        self.sign_in(&user)
    }

    /// Check credentials and issue a fresh token
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let email = normalize_email(&input.email);
        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::EmailNotFound(email))?;

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Login rejected: invalid password");
            return Err(UserError::InvalidPassword);
        }

        let user = self.repository.record_login(user.id, Utc::now()).await?;
        tracing::info!(user_id = user.id, "User logged in");
        self.sign_in(&user)
    }

    /// Resolve the caller's identity, as attached to the request, to a stored user
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Option<i32>) -> UserResult<UserProfile> {
        let id = user_id.ok_or(UserError::Unauthenticated)?;

        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(UserProfile::from(&user))
    }

    fn sign_in(&self, user: &User) -> UserResult<AuthResponse> {
        let issued = self.tokens.issue(user)?;

        Ok(AuthResponse {
            token: issued.token,
            expiration: issued.expires_at,
            user: UserProfile::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repository::MockUserRepository;
    use axum_helpers::IssuedToken;
    use chrono::Duration;
    use mockall::predicate::eq;

    /// Reversible stand-in so tests do not pay for Argon2
    struct PlainHasher;

    impl PasswordHashing for PlainHasher {
        fn hash(&self, password: &str) -> UserResult<String> {
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> UserResult<bool> {
            Ok(hash == format!("hashed:{}", password))
        }
    }

    struct FixedIssuer;

    impl TokenIssuer for FixedIssuer {
        fn issue(&self, user: &User) -> UserResult<IssuedToken> {
            Ok(IssuedToken {
                token: format!("token-for-{}", user.id),
                expires_at: Utc::now() + Duration::hours(1),
            })
        }
    }

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(repo, Arc::new(PlainHasher), Arc::new(FixedIssuer))
    }

    fn stored_user(id: i32) -> User {
        User {
            id,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hashed:secret1".to_string(),
            role: Role::User,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "secret1".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_stamps_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .with(eq("alice@example.com"))
            .returning(|_| Ok(None));
        repo.expect_get_by_username().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|u| {
                u.password_hash == "hashed:secret1"
                    && u.email == "alice@example.com"
                    && u.last_login_at.is_some()
            })
            .times(1)
            .returning(|u| {
                Ok(User {
                    id: 1,
                    username: u.username,
                    email: u.email,
                    password_hash: u.password_hash,
                    role: u.role,
                    created_at: Utc::now(),
                    last_login_at: u.last_login_at,
                })
            });
        // Registration is a single insert
        repo.expect_record_login().never();

        let response = service(repo).register(register_request()).await.unwrap();
        assert_eq!(response.token, "token-for-1");
        assert_eq!(response.user.id, 1);
        assert_eq!(response.user.role, Role::User);
        assert!(response.expiration > Utc::now());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .returning(|_| Ok(Some(stored_user(1))));
        repo.expect_create().never();

        let result = service(repo).register(register_request()).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));
        repo.expect_get_by_username()
            .returning(|_| Ok(Some(stored_user(1))));
        repo.expect_create().never();

        let result = service(repo).register(register_request()).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_register_validates_before_touching_store() {
        let repo = MockUserRepository::new();
        let mut input = register_request();
        input.password = "123".to_string();

        let result = service(repo).register(input).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .returning(|_| Ok(Some(stored_user(5))));
        repo.expect_record_login()
            .times(1)
            .returning(|id, at| {
                let mut user = stored_user(id);
                user.last_login_at = Some(at);
                Ok(user)
            });

        let response = service(repo)
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.token, "token-for-5");
        assert_eq!(response.user.username, "alice");
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email().returning(|_| Ok(None));

        let result = service(repo)
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::EmailNotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password_does_not_stamp_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_email()
            .returning(|_| Ok(Some(stored_user(5))));
        repo.expect_record_login().never();

        let result = service(repo)
            .login(LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidPassword)));
    }

    #[tokio::test]
    async fn test_current_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(5))
            .returning(|id| Ok(Some(stored_user(id))));
        repo.expect_get_by_id()
            .with(eq(6))
            .returning(|_| Ok(None));
        let service = service(repo);

        let profile = service.current_user(Some(5)).await.unwrap();
        assert_eq!(profile.id, 5);
        assert_eq!(profile.email, "alice@example.com");

        let missing = service.current_user(Some(6)).await;
        assert!(matches!(missing, Err(UserError::NotFound(6))));

        let anonymous = service.current_user(None).await;
        assert!(matches!(anonymous, Err(UserError::Unauthenticated)));
    }
}
