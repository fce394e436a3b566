//! Backend endpoint wrappers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each function describes one endpoint and hands it to the shared
//! [`Transport`](crate::transport::Transport). The response body and any
//! [`ApiError`](crate::transport::ApiError) come back exactly as the transport
//! produced them.

pub mod account;
pub mod article;
