//! Article backend client.
//!
//! DESIGN
//! ======
//! `api` holds thin endpoint wrappers over a shared [`transport::Transport`].
//! `account` owns the session (token + role) and keeps it in sync with a
//! [`storage::SessionStorage`] backend. `config` builds typed settings from
//! the environment for the binary.

pub mod account;
pub mod api;
pub mod config;
pub mod storage;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{AccountError, AccountStore, Credentials, SessionState};
pub use transport::{ApiError, HttpTransport, Method, Payload, Request, Transport};
