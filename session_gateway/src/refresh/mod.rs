mod config;
mod coordinator;
mod errors;
mod upstream;

pub use coordinator::{Attempt, RefreshCoordinator};
pub use errors::{InterceptError, RefreshError};
pub use upstream::{HttpRefreshUpstream, RefreshUpstream};
