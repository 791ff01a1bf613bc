//! Pure domain services.

mod allowlist;

pub use allowlist::{DEFAULT_ALLOWED_HOSTS, HostAllowlist};
