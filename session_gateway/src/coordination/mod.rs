mod bootstrap;
mod errors;
mod signup;
mod token;
mod whoami;

pub use bootstrap::{ProviderIdentity, bootstrap_social_signin};
pub use errors::CoordinationError;
pub use signup::{SignupOutcome, SignupRequest, signup_core};
pub use token::{RefreshOutcome, logout_headers, refresh_core};
pub use whoami::{WhoamiOutcome, whoami_core};
