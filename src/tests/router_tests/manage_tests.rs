use crate::tests::utils::{
    body_string, get, init_test_app, location, new_session, post_form, sample_table,
};

#[test]
fn delete_needs_confirmation() {
    let t = init_test_app(&sample_table());
    let cookie = new_session(&t.app);

    let resp = post_form(&t.app, "/manage/delete/1", Some(&cookie), "");
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/manage");
    assert_eq!(t.app.store().unwrap().len(), 3);

    let body = body_string(get(&t.app, "/manage", Some(&cookie)));
    assert!(body.contains(r#"<tr class="pending">"#));
    assert!(body.contains("Confirm delete"));

    let resp = post_form(&t.app, "/manage/confirm", Some(&cookie), "");
    assert_eq!(resp.status(), 303);

    let store = t.app.store().unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.get(1).is_none());
    drop(store);

    assert!(!t.table_bytes().contains("Northwoods Loons"));
}

#[test]
fn cancel_keeps_the_row() {
    let t = init_test_app(&sample_table());
    let cookie = new_session(&t.app);
    let before = t.table_bytes();

    post_form(&t.app, "/manage/delete/4", Some(&cookie), "");
    let resp = post_form(&t.app, "/manage/cancel", Some(&cookie), "");
    assert_eq!(resp.status(), 303);

    assert_eq!(t.app.store().unwrap().len(), 3);
    assert_eq!(t.table_bytes(), before);

    let body = body_string(get(&t.app, "/manage", Some(&cookie)));
    assert!(!body.contains("Confirm delete"));
}

#[test]
fn pending_delete_is_per_session() {
    let t = init_test_app(&sample_table());
    let mine = new_session(&t.app);
    let theirs = new_session(&t.app);

    post_form(&t.app, "/manage/delete/0", Some(&mine), "");
    post_form(&t.app, "/manage/confirm", Some(&theirs), "");
    assert_eq!(t.app.store().unwrap().len(), 3);

    post_form(&t.app, "/manage/confirm", Some(&mine), "");
    assert_eq!(t.app.store().unwrap().len(), 2);
}

#[test]
fn confirm_after_row_vanished_changes_nothing() {
    let t = init_test_app(&sample_table());
    let first = new_session(&t.app);
    let second = new_session(&t.app);

    post_form(&t.app, "/manage/delete/0", Some(&first), "");
    post_form(&t.app, "/manage/delete/0", Some(&second), "");
    post_form(&t.app, "/manage/confirm", Some(&first), "");
    let after_first = t.table_bytes();

    let resp = post_form(&t.app, "/manage/confirm", Some(&second), "");
    assert_eq!(resp.status(), 303);
    assert_eq!(t.app.store().unwrap().len(), 2);
    assert_eq!(t.table_bytes(), after_first);
}

#[test]
fn filter_survives_the_redirect() {
    let t = init_test_app(&sample_table());
    let cookie = new_session(&t.app);

    let resp = post_form(&t.app, "/manage/delete/0?region=South", Some(&cookie), "");
    assert_eq!(location(&resp), "/manage?region=South");

    let body = body_string(get(&t.app, "/manage?region=North", Some(&cookie)));
    assert!(body.contains("hidden by the current filter"));
    assert!(body.contains("Prairie Restorers"));
}

#[test]
fn unknown_or_malformed_ids() {
    let t = init_test_app(&sample_table());
    let cookie = new_session(&t.app);

    let req = |uri: &str| {
        http::Request::builder()
            .method(http::Method::POST)
            .uri(uri)
            .header("Cookie", cookie.as_str())
            .body(astra::Body::empty())
            .unwrap()
    };

    assert!(matches!(
        crate::router::handle(req("/manage/delete/99"), &t.app),
        Err(crate::errors::ServerError::NotFound)
    ));
    assert!(matches!(
        crate::router::handle(req("/manage/delete/abc"), &t.app),
        Err(crate::errors::ServerError::BadRequest(_))
    ));
}

#[test]
fn focus_areas_are_joined_in_the_table() {
    let t = init_test_app(&sample_table());

    let body = body_string(get(&t.app, "/manage", None));
    assert!(body.contains("Stewardship | Plants"));
    assert!(body.contains("Citizen Science | Wildlife | Birds"));
}
