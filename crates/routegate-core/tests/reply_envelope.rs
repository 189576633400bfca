//! Reply envelope serialization.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use routegate_core::{Paged, Reply};

#[test]
fn success_serializes_with_null_data() {
    let reply = Reply::<()>::success("done");
    let v = serde_json::to_value(&reply).unwrap();
    assert_eq!(v["code"], 200);
    assert_eq!(v["message"], "done");
    assert!(v["data"].is_null());
}

#[test]
fn ok_carries_payload() {
    let reply = Reply::ok(vec!["a", "b"]);
    let v = serde_json::to_value(&reply).unwrap();
    assert_eq!(v["data"][1], "b");
}

#[test]
fn failure_constructors_set_codes() {
    assert_eq!(Reply::<()>::fail400("x").code, 400);
    assert_eq!(Reply::<()>::fail401("x").code, 401);
    assert_eq!(Reply::<()>::fail403("x").code, 403);
    assert_eq!(Reply::<()>::fail404("x").code, 404);
    assert_eq!(Reply::<()>::fail500("x").code, 500);
}

#[test]
fn paged_computes_page_count() {
    let page = Paged::new(1, 20, 45, vec![1, 2, 3]);
    assert_eq!(page.pages, 3);

    let empty = Paged::<u32>::no_data();
    assert_eq!(empty.pages, 1);
    assert!(empty.records.is_none());
}
