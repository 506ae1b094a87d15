pub mod auth;
pub mod guard;

pub use auth::{AuthService, Credentials, HttpAuthService};
pub use guard::{Session, SessionGuard};
