//! Authentication Module
//! Mission: Credential-checked token issuance and stateless route protection

pub mod api;
pub mod credentials;
pub mod errors;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod signup;
pub mod user_store;

pub use api::AuthState;
pub use errors::ApiError;
pub use jwt::TokenService;
pub use middleware::token_gate;
pub use user_store::{SqliteUserStore, UserStore};
