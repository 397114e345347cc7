use crate::tests::utils::{body_string, get, init_test_app, new_session, sample_table};

#[test]
fn cards_page_lists_everything_and_sets_cookie() {
    let t = init_test_app(&sample_table());

    let resp = get(&t.app, "/", None);
    assert_eq!(resp.status(), 200);

    let set_cookie = resp.headers().get("set-cookie").unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));

    let body = body_string(resp);
    assert!(body.contains("Prairie Restorers"));
    assert!(body.contains("Northwoods Loons"));
    assert!(body.contains("Lakeshore Learners"));
    assert!(body.contains("Showing <strong>3</strong> of 3"));
}

#[test]
fn known_session_gets_no_new_cookie() {
    let t = init_test_app(&sample_table());
    let cookie = new_session(&t.app);

    let resp = get(&t.app, "/", Some(&cookie));
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("set-cookie").is_none());
}

#[test]
fn text_and_flag_filters_narrow_the_cards() {
    let t = init_test_app(&sample_table());

    let body = body_string(get(&t.app, "/?q_about=prairie", None));
    assert!(body.contains("Prairie Restorers"));
    assert!(!body.contains("Northwoods Loons"));
    assert!(body.contains("Showing <strong>1</strong> of 3"));

    let body = body_string(get(&t.app, "/?q_about=prairie&education=on", None));
    assert!(!body.contains("<h2>Prairie Restorers</h2>"));
    assert!(body.contains("No organizations match these filters."));
}

#[test]
fn multi_select_filters_by_county() {
    let t = init_test_app(&sample_table());

    let body = body_string(get(&t.app, "/?county=Vilas&county=Door", None));
    assert!(body.contains("<h2>Northwoods Loons</h2>"));
    assert!(body.contains("<h2>Lakeshore Learners</h2>"));
    assert!(!body.contains("<h2>Prairie Restorers</h2>"));
}

#[test]
fn unsafe_urls_are_not_linked() {
    let t = init_test_app(&sample_table());

    let body = body_string(get(&t.app, "/", None));
    assert!(body.contains(r#"href="https://prairie.example.org/""#));
    assert!(!body.contains("javascript:alert"));
}

#[test]
fn map_embeds_only_located_rows() {
    let t = init_test_app(&sample_table());

    let resp = get(&t.app, "/map", None);
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert!(body.contains("leaflet@1.9.4"));
    assert!(body.contains(r#""name":"Prairie Restorers""#));
    assert!(body.contains(r#""name":"Lakeshore Learners""#));
    assert!(!body.contains(r#""name":"Northwoods Loons""#));
    assert!(body.contains("1 of these have no known location"));
}

#[test]
fn stylesheet_and_unknown_routes() {
    let t = init_test_app(&sample_table());

    let resp = get(&t.app, "/static/main.css", None);
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("set-cookie").is_none());
    assert!(body_string(resp).contains(".cards"));

    let req = http::Request::builder()
        .uri("/nope")
        .body(astra::Body::empty())
        .unwrap();
    assert!(matches!(
        crate::router::handle(req, &t.app),
        Err(crate::errors::ServerError::NotFound)
    ));
}
