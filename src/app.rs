// src/app.rs
use crate::auth::sessions;
use crate::auth::{AllowList, Session};
use crate::config::AppConfig;
use crate::db::directory::locate;
use crate::db::{init_db, Database, DirectoryStore, StoreError};
use crate::domain::StableId;
use crate::errors::ServerError;
use crate::geocoder::Geocoder;
use crate::domain::{Listing, ListingDraft};
use crate::workflow::{apply_command, Command, DeleteWorkflow, Outcome};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Everything a request handler needs. Built once in `main` and passed by
/// reference to every request.
pub struct App {
    pub config: AppConfig,
    pub db: Database,
    pub allow_list: AllowList,
    store: Mutex<DirectoryStore>,
    /// Pending-delete state per session id. Lock before `store` when taking both.
    workflows: Mutex<HashMap<i64, DeleteWorkflow>>,
}

impl App {
    pub fn new(config: AppConfig, geocoder: Box<dyn Geocoder>) -> Result<Self, ServerError> {
        let store = DirectoryStore::load(&config.data_path, config.state_name.clone(), geocoder)?;

        let db = Database::new(config.session_db_path.clone());
        init_db(&db)?;

        let allow_list = AllowList::new(config.authorized_emails.iter().cloned());
        if allow_list.is_empty() {
            log::warn!("no authorized emails configured; adding listings is disabled");
        }

        Ok(Self {
            config,
            db,
            allow_list,
            store: Mutex::new(store),
            workflows: Mutex::new(HashMap::new()),
        })
    }

    pub fn store(&self) -> Result<MutexGuard<'_, DirectoryStore>, ServerError> {
        self.store.lock().map_err(|_| ServerError::InternalError)
    }

    /// The id awaiting confirmation in this session, if any.
    pub fn pending_delete(&self, session: &Session) -> Result<Option<StableId>, ServerError> {
        let workflows = self.workflows.lock().map_err(|_| ServerError::InternalError)?;
        Ok(workflows.get(&session.id).and_then(DeleteWorkflow::pending))
    }

    /// Run one mutating command for this session.
    pub fn run(&self, session: &Session, command: Command) -> Result<Outcome, ServerError> {
        if let Command::Insert(draft) = command {
            return self.insert(draft).map(Outcome::Inserted);
        }

        let mut workflows = self.workflows.lock().map_err(|_| ServerError::InternalError)?;
        let mut store = self.store()?;
        let workflow = workflows.entry(session.id).or_default();
        let outcome = apply_command(&mut store, workflow, command).map_err(store_error);
        if workflow.pending().is_none() {
            workflows.remove(&session.id);
        }
        outcome
    }

    /// Geocoding can take seconds, so it runs between two short store locks.
    fn insert(&self, draft: ListingDraft) -> Result<Listing, ServerError> {
        let (geocoder, state_name) = {
            let store = self.store()?;
            store.check_draft(&draft).map_err(store_error)?;
            (store.geocoder(), store.state_name().to_string())
        };

        let coordinates = locate(geocoder.as_ref(), &draft, &state_name);

        self.store()?
            .insert_located(draft, coordinates)
            .map_err(store_error)
    }

    /// Current session for a cookie token, or a fresh one.
    /// The token is returned only when a new cookie has to be set.
    pub fn resolve_session(
        &self,
        cookie_token: Option<&str>,
        now: i64,
    ) -> Result<(Session, Option<String>), ServerError> {
        let ttl = self.config.session_ttl_secs;
        let new = self.db.with_conn(|conn| {
            if let Some(token) = cookie_token {
                if let Some(session) = sessions::load_session(conn, token, now)? {
                    return Ok((session, None));
                }
            }
            let (session, token) = sessions::create_session(conn, now, ttl)?;
            Ok((session, Some(token)))
        })?;

        if new.1.is_some() {
            self.purge_sessions(now)?;
        }
        Ok(new)
    }

    pub fn sign_in(&self, session: &Session, email: &str) -> Result<(), ServerError> {
        if let Err(e) = self.allow_list.check(Some(email)) {
            log::warn!("rejected sign-in for '{email}'");
            return Err(e);
        }
        self.db
            .with_conn(|conn| sessions::attach_email(conn, session.id, email))?;
        log::info!("session {} signed in as {email}", session.id);
        Ok(())
    }

    pub fn sign_out(&self, session: &Session) -> Result<(), ServerError> {
        self.db
            .with_conn(|conn| sessions::clear_email(conn, session.id))
    }

    /// Signed-in email, but only while it is still on the allow-list.
    pub fn authorized_email<'a>(&self, session: &'a Session) -> Option<&'a str> {
        self.allow_list.check(session.email.as_deref()).ok()
    }

    /// Drop expired sessions and any delete they left pending.
    pub fn purge_sessions(&self, now: i64) -> Result<usize, ServerError> {
        let expired = self
            .db
            .with_conn(|conn| sessions::purge_expired(conn, now))?;
        if !expired.is_empty() {
            let mut workflows = self.workflows.lock().map_err(|_| ServerError::InternalError)?;
            for id in &expired {
                workflows.remove(id);
            }
            log::debug!("purged {} expired session(s)", expired.len());
        }
        Ok(expired.len())
    }
}

fn store_error(e: StoreError) -> ServerError {
    match e {
        StoreError::DuplicateKey(org) => {
            ServerError::Conflict(format!("an organization named '{org}' already exists"))
        }
        e => e.into(),
    }
}
