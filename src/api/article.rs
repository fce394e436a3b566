//! Article endpoints.

#[cfg(test)]
#[path = "article_test.rs"]
mod article_test;

use serde_json::Value;

use crate::transport::{ApiError, Payload, Request, Transport};

pub const LIST_PATH: &str = "/article/list";
pub const DETAIL_PATH: &str = "/article/detail";

/// Fetch a page of articles via `POST /article/list`.
///
/// `data` is forwarded as-is (paging, filters, whatever the backend takes).
///
/// # Errors
///
/// Returns the transport's error unchanged.
pub async fn get_list<T>(transport: &T, data: Payload) -> Result<Value, ApiError>
where
    T: Transport + ?Sized,
{
    transport.send(Request::post(LIST_PATH, data)).await
}

/// Fetch a single article via `POST /article/detail`.
///
/// # Errors
///
/// Returns the transport's error unchanged.
pub async fn get_detail<T>(transport: &T, data: Payload) -> Result<Value, ApiError>
where
    T: Transport + ?Sized,
{
    transport.send(Request::post(DETAIL_PATH, data)).await
}
