mod config;
mod cookie;
mod errors;
mod types;

pub use config::{ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
pub use cookie::{clear_session_headers, session_credential_headers, session_rotation_headers};
pub use errors::SessionError;
pub use types::{Session, TokenPair};
