//! Users Domain
//!
//! Registration, login and resolution of the authenticated caller.
//!
//! # Features
//!
//! - Password hashing with Argon2
//! - HS256 session tokens via [`axum_helpers::JwtAuth`]
//! - Unique username and email
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, Argon2Hasher, AuthService, InMemoryUserRepository};
//!
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-characters").unwrap());
//! let service = AuthService::new(
//!     InMemoryUserRepository::new(),
//!     Arc::new(Argon2Hasher),
//!     Arc::new(jwt),
//! );
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, Role, User, UserProfile};
pub use password::{Argon2Hasher, PasswordHashing};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AuthService;
pub use token::TokenIssuer;
