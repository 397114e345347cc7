use crate::tests::utils::{get, init_test_app, sample_table};
use std::io::Read;

#[test]
fn csv_export_follows_the_filter() {
    let t = init_test_app(&sample_table());

    let resp = get(&t.app, "/export.csv?region=North&region=Northeast", None);
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        r#"attachment; filename="filtered_organizations.csv""#
    );

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    let lines: Vec<&str> = body.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(!lines[0].contains("StableId"));
    assert!(lines[1].starts_with("Northwoods Loons,"));
    assert!(lines[2].starts_with("Lakeshore Learners,"));
}

#[test]
fn empty_filter_result_still_has_a_header() {
    let t = init_test_app(&sample_table());

    let resp = get(&t.app, "/export.csv?q_organization=zzz", None);
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    assert_eq!(body.lines().count(), 1);
}

#[test]
fn xlsx_export_is_a_workbook() {
    let t = init_test_app(&sample_table());

    let resp = get(&t.app, "/export.xlsx?q_about=prairie", None);
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        r#"attachment; filename="filtered_organizations.xlsx""#
    );

    let mut bytes = Vec::new();
    resp.into_body().reader().read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
