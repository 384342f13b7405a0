use axum_helpers::{IssuedToken, JwtAuth, TokenSubject};

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Issues the session token handed back on register and login
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> UserResult<IssuedToken>;
}

impl TokenIssuer for JwtAuth {
    fn issue(&self, user: &User) -> UserResult<IssuedToken> {
        let role = user.role.to_string();
        let subject = TokenSubject {
            user_id: user.id.to_string(),
            username: &user.username,
            email: &user.email,
            role: &role,
        };

        self.issue_token(&subject)
            .map_err(|e| UserError::Token(e.to_string()))
    }
}
