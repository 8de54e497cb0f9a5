pub mod auth;
pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use auth::{bearer_token, AllowAll, Authenticator, DenyAll, Principal};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;
pub use types::{now_rfc3339, Envelope, ListParams, Pagination, MAX_LIMIT, MAX_OFFSET};
