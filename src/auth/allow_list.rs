// src/auth/allow_list.rs
use crate::errors::ServerError;
use std::collections::HashSet;

/// Emails permitted to add listings. Reads (browse, filter, export) need no entry.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    emails: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive comparison. No normalization.
    pub fn is_authorized(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    /// The caller's email if it is on the list.
    pub fn check<'a>(&self, email: Option<&'a str>) -> Result<&'a str, ServerError> {
        match email {
            Some(e) if self.is_authorized(e) => Ok(e),
            _ => Err(ServerError::Unauthorized(
                "You are not authorized to add listings.".into(),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}
