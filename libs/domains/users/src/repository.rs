use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; username and email are unique
    async fn create(&self, user: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Exact lookup on the stored (lowercased) email
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Stamp the last successful authentication
    async fn record_login(&self, id: i32, at: DateTime<Utc>) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == input.email) {
            return Err(UserError::DuplicateEmail(input.email));
        }
        if state.users.values().any(|u| u.username == input.username) {
            return Err(UserError::DuplicateUsername(input.username));
        }

        state.next_id += 1;
        let user = User {
            id: state.next_id,
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            role: input.role,
            created_at: Utc::now(),
            last_login_at: input.last_login_at,
        };
        state.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn record_login(&self, id: i32, at: DateTime<Utc>) -> UserResult<User> {
        let mut state = self.state.write().await;
        let user = state.users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.last_login_at = Some(at);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hashed_password".to_string(),
            role: Role::User,
            last_login_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert!(created.last_login_at.is_none());

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let by_email = repo.get_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);

        let by_username = repo.get_by_username("alice").await.unwrap();
        assert_eq!(by_username.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_and_username() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let result = repo.create(new_user("bob", "alice@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));

        let result = repo.create(new_user("alice", "other@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_record_login() {
        let repo = InMemoryUserRepository::new();
        let created = repo
            .create(new_user("alice", "alice@example.com"))
            .await
            .unwrap();

        let at = Utc::now();
        let updated = repo.record_login(created.id, at).await.unwrap();
        assert_eq!(updated.last_login_at, Some(at));

        let result = repo.record_login(99, at).await;
        assert!(matches!(result, Err(UserError::NotFound(99))));
    }
}
