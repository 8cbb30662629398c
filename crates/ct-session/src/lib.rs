//! Session token compaction — wraps a token provider so claim types travel
//! in compact form inside the token and come back expanded.

pub mod adapter;
pub mod json_provider;
pub mod provider;

pub use adapter::CompactingTokenAdapter;
pub use json_provider::{JsonTokenProvider, SessionTokenBody, TokenError};
pub use provider::{SessionToken, TokenProvider};
