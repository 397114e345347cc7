use crate::domain::Coordinates;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, init_test_app, location, new_session, post_form, sample_table,
    signed_in_session,
};
use astra::Body;
use http::{Method, Request};

const NEW_ORG: &str =
    "organization=NewOrg&region=South&county=Dane&city=Madison&about=Trail+work&stewardship=on";

#[test]
fn add_page_asks_for_sign_in_first() {
    let t = init_test_app(&sample_table());

    let body = body_string(get(&t.app, "/add", None));
    assert!(body.contains(r#"action="/auth/sign-in""#));
    assert!(!body.contains(r#"action="/add""#));
}

#[test]
fn unknown_email_is_rejected() {
    let t = init_test_app(&sample_table());
    let cookie = new_session(&t.app);

    let resp = post_form(
        &t.app,
        "/auth/sign-in",
        Some(&cookie),
        "email=stranger%40example.org",
    );
    assert_eq!(resp.status(), 401);
    assert!(body_string(resp).contains("You are not authorized to add listings."));

    let body = body_string(get(&t.app, "/add", Some(&cookie)));
    assert!(body.contains(r#"action="/auth/sign-in""#));
}

#[test]
fn add_without_sign_in_is_unauthorized() {
    let t = init_test_app(&sample_table());
    let before = t.table_bytes();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/add")
        .body(Body::from(NEW_ORG.to_string()))
        .unwrap();

    assert!(matches!(
        handle(req, &t.app),
        Err(ServerError::Unauthorized(_))
    ));
    assert_eq!(t.table_bytes(), before);
}

#[test]
fn signed_in_editor_adds_a_geocoded_listing() {
    let t = init_test_app(&sample_table());
    let cookie = signed_in_session(&t.app);

    let body = body_string(get(&t.app, "/add", Some(&cookie)));
    assert!(body.contains(r#"action="/add""#));
    assert!(body.contains("editor@example.org"));

    let resp = post_form(&t.app, "/add", Some(&cookie), NEW_ORG);
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/manage");

    let store = t.app.store().unwrap();
    let added = store.get(5).expect("next id after the largest");
    assert_eq!(added.organization, "NewOrg");
    assert_eq!(
        added.coordinates,
        Some(Coordinates {
            latitude: 43.07,
            longitude: -89.40
        })
    );
    drop(store);

    assert!(t.table_bytes().contains("NewOrg,,,South,Dane,Madison,Trail work,True"));
}

#[test]
fn unknown_place_still_adds_without_coordinates() {
    let t = init_test_app(&sample_table());
    let cookie = signed_in_session(&t.app);

    let resp = post_form(
        &t.app,
        "/add",
        Some(&cookie),
        "organization=NewOrg&region=South&county=Dane&city=Nowhere",
    );
    assert_eq!(resp.status(), 303);

    let store = t.app.store().unwrap();
    assert_eq!(store.get(5).unwrap().coordinates, None);
}

#[test]
fn duplicate_organization_is_a_conflict() {
    let t = init_test_app(&sample_table());
    let cookie = signed_in_session(&t.app);
    let before = t.table_bytes();

    let resp = post_form(
        &t.app,
        "/add",
        Some(&cookie),
        "organization=Prairie+Restorers&region=South&county=Dane&city=Madison",
    );
    assert_eq!(resp.status(), 409);
    let body = body_string(resp);
    assert!(body.contains("Organization already exists."));
    assert!(body.contains(r#"value="Prairie Restorers""#));

    assert_eq!(t.table_bytes(), before);
    assert_eq!(t.app.store().unwrap().len(), 3);
}

#[test]
fn invalid_form_is_shown_again() {
    let t = init_test_app(&sample_table());
    let cookie = signed_in_session(&t.app);

    let resp = post_form(
        &t.app,
        "/add",
        Some(&cookie),
        "organization=Lake+Pals&region=South&county=Cook&city=Chicago",
    );
    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.contains(r#"value="Lake Pals""#));
    assert!(body.contains(r#"value="Chicago""#));
    assert_eq!(t.app.store().unwrap().len(), 3);
}

#[test]
fn sign_out_ends_editing() {
    let t = init_test_app(&sample_table());
    let cookie = signed_in_session(&t.app);

    let resp = post_form(&t.app, "/auth/sign-out", Some(&cookie), "");
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/");

    let body = body_string(get(&t.app, "/add", Some(&cookie)));
    assert!(body.contains(r#"action="/auth/sign-in""#));
}
