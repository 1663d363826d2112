//! Client credentials, redacted secrets, and the short-lived access token.

pub mod access_token;
pub mod credentials;
pub mod secret;

pub use access_token::*;
pub use credentials::*;
pub use secret::*;
