use serde_json::json;

use super::*;
use crate::testing::{MockTransport, payload};
use crate::transport::Method;

#[tokio::test]
async fn get_list_posts_payload_unchanged() {
    let mock = MockTransport::new(vec![Ok(json!({ "data": { "list": [], "total": 0 } }))]);
    let data = payload(json!({ "page": 2, "pageSize": 10, "filter": { "tag": "rust" } }));

    let body = get_list(&mock, data.clone()).await.unwrap();

    assert_eq!(body["data"]["total"], 0);
    let req = mock.last_request().unwrap();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "/article/list");
    assert_eq!(req.data, data);
}

#[tokio::test]
async fn get_detail_posts_payload_unchanged() {
    let mock = MockTransport::new(vec![Ok(json!({ "data": { "id": 7, "title": "Hello" } }))]);
    let data = payload(json!({ "id": 7 }));

    let body = get_detail(&mock, data.clone()).await.unwrap();

    assert_eq!(body["data"]["title"], "Hello");
    let req = mock.last_request().unwrap();
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "/article/detail");
    assert_eq!(req.data, data);
}

#[tokio::test]
async fn get_list_accepts_empty_payload() {
    let mock = MockTransport::new(vec![]);
    get_list(&mock, Payload::new()).await.unwrap();
    assert!(mock.last_request().unwrap().data.is_empty());
}

#[tokio::test]
async fn errors_pass_through_unchanged() {
    let original = ApiError::Status { status: 404, body: "no such article".into() };
    let mock = MockTransport::new(vec![Err(original.clone())]);

    let err = get_detail(&mock, payload(json!({ "id": 99 }))).await.unwrap_err();

    assert_eq!(err, original);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn works_through_trait_object() {
    let mock = MockTransport::new(vec![Ok(json!({ "ok": true }))]);
    let transport: &dyn Transport = &mock;

    let body = get_list(transport, Payload::new()).await.unwrap();

    assert_eq!(body, json!({ "ok": true }));
}
