use crate::app::App;
use crate::config::AppConfig;
use crate::domain::Coordinates;
use crate::geocoder::Geocoder;
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use tempfile::TempDir;

pub const HEADER: &str = "Organization,OrgURL,VolunteerListing,Region,County,City,About,\
Stewardship,Education,CitizenScience,Wildlife,Plants,Birds,LandUse,latitude,longitude,StableId";

/// Three listings: one per region, one without coordinates, one with a script URL.
pub fn sample_table() -> String {
    [
        HEADER,
        "Prairie Restorers,https://prairie.example.org,,South,Dane,Madison,Restoring prairie remnants,True,False,False,False,True,False,False,43.07,-89.4,0",
        "Northwoods Loons,,,North,Vilas,Eagle River,Loon nest monitoring,False,False,True,True,False,True,False,,,1",
        "Lakeshore Learners,javascript:alert(1),,Northeast,Door,Sturgeon Bay,School programs on the lake,False,True,False,False,False,False,False,44.83,-87.38,4",
    ]
    .join("\n")
        + "\n"
}

pub const EDITOR: &str = "editor@example.org";

/// Knows Madison only.
pub struct StubGeocoder;

impl Geocoder for StubGeocoder {
    fn geocode(&self, city: &str, _county: &str, _state: &str) -> Option<Coordinates> {
        (city == "Madison").then_some(Coordinates {
            latitude: 43.07,
            longitude: -89.40,
        })
    }
}

/// An `App` over a private temp directory. Keep the struct alive for the test.
pub struct TestApp {
    pub app: App,
    pub dir: TempDir,
}

impl TestApp {
    pub fn data_path(&self) -> std::path::PathBuf {
        self.dir.path().join("listings.csv")
    }

    pub fn table_bytes(&self) -> String {
        std::fs::read_to_string(self.data_path()).unwrap()
    }
}

pub fn init_test_app(table: &str) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("listings.csv"), table).unwrap();

    let config = AppConfig {
        data_path: dir.path().join("listings.csv"),
        session_db_path: dir.path().join("sessions.sqlite3"),
        authorized_emails: vec![EDITOR.to_string()],
        ..AppConfig::default()
    };

    let app = App::new(config, Box::new(StubGeocoder))
        .unwrap_or_else(|e| panic!("App initialization failed: {e}"));
    TestApp { app, dir }
}

pub fn get(app: &App, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::GET, uri, cookie, "")
}

pub fn post_form(app: &App, uri: &str, cookie: Option<&str>, body: &str) -> Response {
    send(app, Method::POST, uri, cookie, body)
}

fn send(app: &App, method: Method, uri: &str, cookie: Option<&str>, body: &str) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();

    handle(req, app).expect("Handler failed")
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers().get("Location").unwrap().to_str().unwrap()
}

/// `session=...` from a Set-Cookie header, ready to send back as a Cookie header.
pub fn session_cookie(resp: &Response) -> String {
    let set = resp.headers().get("set-cookie").unwrap().to_str().unwrap();
    set.split(';').next().unwrap().to_string()
}

/// Start a session by loading the home page.
pub fn new_session(app: &App) -> String {
    session_cookie(&get(app, "/", None))
}

/// A session signed in as the allow-listed editor.
pub fn signed_in_session(app: &App) -> String {
    let cookie = new_session(app);
    let resp = post_form(app, "/auth/sign-in", Some(&cookie), &format!("email={EDITOR}"));
    assert_eq!(resp.status(), 303);
    cookie
}
