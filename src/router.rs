use crate::app::App;
use crate::auth::sessions::{self, Session};
use crate::db::StoreError;
use crate::domain::{apply, FilterSet, StableId};
use crate::errors::ServerError;
use crate::forms::{self, ListingForm};
use crate::responses::{
    csv_response, html_response, html_response_with_status, redirect, xlsx_response, ResultResp,
};
use crate::spreadsheets::{export_listings_csv, export_listings_xlsx};
use crate::templates::pages::{
    add_page, cards_page, manage_page, map_page, sign_in_page, BrowseVm, PendingDelete,
};
use crate::workflow::{Command, Outcome};
use astra::{Body, Request, ResponseBuilder};

const STYLESHEET: &str = include_str!("../static/main.css");
const EXPORT_BASENAME: &str = "filtered_organizations";

#[derive(Clone, Copy)]
enum View {
    Cards,
    Map,
    Manage,
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    if req.method().as_str() == "GET" && req.uri().path() == "/static/main.css" {
        return stylesheet();
    }

    let now = chrono::Utc::now().timestamp();
    let cookie_token = req
        .headers()
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(sessions::token_from_cookie_header)
        .map(str::to_string);
    let (session, new_token) = app.resolve_session(cookie_token.as_deref(), now)?;

    let mut resp = route(req, app, &session)?;

    if let Some(token) = new_token {
        let cookie = sessions::set_cookie_value(&token, app.config.session_ttl_secs);
        resp.headers_mut().insert(
            "set-cookie",
            cookie.parse().map_err(|_| ServerError::InternalError)?,
        );
    }
    Ok(resp)
}

fn route(req: Request, app: &App, session: &Session) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => browse(&req, app, session, View::Cards),
        ("GET", "/map") => browse(&req, app, session, View::Map),
        ("GET", "/manage") => browse(&req, app, session, View::Manage),

        ("POST", "/manage/confirm") => manage_command(&req, app, session, Command::ConfirmDelete),
        ("POST", "/manage/cancel") => manage_command(&req, app, session, Command::CancelDelete),
        ("POST", p) if p.starts_with("/manage/delete/") => {
            let id = parse_id(p.trim_start_matches("/manage/delete/"))?;
            if app.store()?.get(id).is_none() {
                return Err(ServerError::NotFound);
            }
            manage_command(&req, app, session, Command::RequestDelete(id))
        }

        ("GET", "/add") => match app.authorized_email(session) {
            Some(email) => html_response(add_page(email, &ListingForm::default(), None)),
            None => html_response(sign_in_page(None)),
        },
        ("POST", "/add") => add_listing(req, app, session),

        ("POST", "/auth/sign-in") => sign_in(req, app, session),
        ("POST", "/auth/sign-out") => {
            app.sign_out(session)?;
            redirect("/")
        }

        ("GET", "/export.csv") => {
            let filters = FilterSet::from_query(forms::parse_query(&req));
            let store = app.store()?;
            let rows = apply(store.listings(), &filters);
            let buffer = export_listings_csv(&rows)?;
            csv_response(buffer, &format!("{EXPORT_BASENAME}.csv"))
        }
        ("GET", "/export.xlsx") => {
            let filters = FilterSet::from_query(forms::parse_query(&req));
            let store = app.store()?;
            let rows = apply(store.listings(), &filters);
            let buffer = export_listings_xlsx(&rows)?;
            xlsx_response(buffer, &format!("{EXPORT_BASENAME}.xlsx"))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn parse_id(raw: &str) -> Result<StableId, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::BadRequest(format!("'{raw}' is not a listing id")))
}

fn browse(req: &Request, app: &App, session: &Session, view: View) -> ResultResp {
    let filters = FilterSet::from_query(forms::parse_query(req));
    // Workflow lock is taken before the store lock, never while holding it.
    let pending_id = match view {
        View::Manage => app.pending_delete(session)?,
        _ => None,
    };

    let store = app.store()?;
    let vm = BrowseVm::new(store.listings(), &filters, app.authorized_email(session));

    let markup = match view {
        View::Cards => cards_page(&vm),
        View::Map => map_page(&vm),
        View::Manage => {
            let pending = pending_id.map(|id| PendingDelete {
                id,
                organization: store.get(id).map(|l| l.organization.clone()),
            });
            manage_page(&vm, pending.as_ref())
        }
    };
    html_response(markup)
}

/// Apply a delete-workflow command, then send the browser back to the same filtered table.
fn manage_command(req: &Request, app: &App, session: &Session, command: Command) -> ResultResp {
    let query = FilterSet::from_query(forms::parse_query(req)).to_query();

    match app.run(session, command)? {
        Outcome::Deleted(listing) => {
            log::info!("session {} deleted '{}'", session.id, listing.organization)
        }
        Outcome::AlreadyRemoved(id) => log::info!("listing {id} was gone before confirm"),
        _ => {}
    }

    if query.is_empty() {
        redirect("/manage")
    } else {
        redirect(&format!("/manage?{query}"))
    }
}

fn add_listing(req: Request, app: &App, session: &Session) -> ResultResp {
    let email = app.allow_list.check(session.email.as_deref())?;

    let pairs = forms::read_form(req)?;
    let form = ListingForm::from_pairs(&pairs);

    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(msg) => {
            return html_response_with_status(400, add_page(email, &form, Some(msg.as_str())))
        }
    };

    match app.run(session, Command::Insert(draft)) {
        Ok(_) => redirect("/manage"),
        Err(ServerError::Conflict(_)) => html_response_with_status(
            409,
            add_page(email, &form, Some("Organization already exists.")),
        ),
        Err(ServerError::StoreError(StoreError::InvalidDraft(msg))) => {
            html_response_with_status(400, add_page(email, &form, Some(msg.as_str())))
        }
        Err(e) => Err(e),
    }
}

fn sign_in(req: Request, app: &App, session: &Session) -> ResultResp {
    let pairs = forms::read_form(req)?;
    let email = forms::field(&pairs, "email").unwrap_or("").trim().to_string();

    match app.sign_in(session, &email) {
        Ok(()) => redirect("/add"),
        Err(ServerError::Unauthorized(msg)) => {
            html_response_with_status(401, sign_in_page(Some(msg.as_str())))
        }
        Err(e) => Err(e),
    }
}

fn stylesheet() -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_CSS_UTF_8.as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(STYLESHEET.to_string()))
        .map_err(|_| ServerError::InternalError)
}
