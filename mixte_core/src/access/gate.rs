//! Login gate: allow-list check, session lifetime and redirects.

use chrono::{DateTime, Duration, Utc};

use super::allow_list::AllowList;
use super::redirect::{login_redirect, Redirect, DEFAULT_CONTENT_ROOT};
use super::session::{Session, DEFAULT_VALIDITY_DAYS};
use super::store::SessionStore;
use super::SESSION_KEY;
use crate::config::AccessConfig;
use crate::errors::{CalcError, CalcResult};

/// Allow-list check plus the session record kept in a [`SessionStore`].
///
/// The current time is always passed in, so expiry is testable without a
/// clock.
#[derive(Debug)]
pub struct AccessGate<S> {
    store: S,
    allow_list: AllowList,
    validity: Duration,
    content_root: String,
}

impl<S: SessionStore> AccessGate<S> {
    pub fn new(store: S, allow_list: AllowList) -> Self {
        Self {
            store,
            allow_list,
            validity: Duration::days(DEFAULT_VALIDITY_DAYS),
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
        }
    }

    /// Gate configured from the `[access]` settings
    pub fn from_config(store: S, config: &AccessConfig) -> Self {
        Self::new(store, AllowList::decode(&config.allow_list))
            .with_validity(config.session_validity())
            .with_content_root(config.content_root.clone())
    }

    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn with_content_root(mut self, content_root: impl Into<String>) -> Self {
        self.content_root = content_root.into();
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    pub fn content_root(&self) -> &str {
        &self.content_root
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check the form and open a session, replacing any previous one
    pub fn login(&mut self, last_name: &str, first_name: &str, email: &str, now: DateTime<Utc>) -> CalcResult<Session> {
        for (field, value) in [("last_name", last_name), ("first_name", first_name), ("email", email)] {
            if value.trim().is_empty() {
                return Err(CalcError::missing_field(field));
            }
        }

        if !self.allow_list.permits(email) {
            tracing::info!(email = %email.trim(), "login refused");
            return Err(CalcError::access_denied(email.trim()));
        }

        let session = Session::new(last_name.trim(), first_name.trim(), email, now, self.validity);
        self.store.set(SESSION_KEY, &session.to_json()?)?;
        tracing::info!(email = %session.email, expires_at = %session.expires_at, "login accepted");
        Ok(session)
    }

    /// Stored session if present and unexpired.
    ///
    /// Unreadable storage or a corrupt record read as no session; an expired
    /// record is removed.
    pub fn current_session(&mut self, now: DateTime<Utc>) -> Option<Session> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "session storage unreadable");
                return None;
            }
        };

        let session = match Session::from_json(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring corrupt session record");
                return None;
            }
        };

        if session.is_valid_at(now) {
            Some(session)
        } else {
            tracing::info!(email = %session.email, "session expired");
            if let Err(e) = self.store.remove(SESSION_KEY) {
                tracing::warn!(error = %e, "could not remove expired session");
            }
            None
        }
    }

    pub fn is_authenticated(&mut self, now: DateTime<Utc>) -> bool {
        self.current_session(now).is_some()
    }

    pub fn logout(&mut self) -> CalcResult<()> {
        self.store.remove(SESSION_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }

    /// The session, or where to send the reader of `page_path`
    pub fn require_session(&mut self, now: DateTime<Utc>, page_path: &str) -> Result<Session, Redirect> {
        self.current_session(now)
            .ok_or_else(|| login_redirect(page_path, &self.content_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{MemoryStore, DEFAULT_ENCODED_ALLOW_LIST};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    }

    fn gate() -> AccessGate<MemoryStore> {
        AccessGate::new(MemoryStore::default(), AllowList::decode(DEFAULT_ENCODED_ALLOW_LIST))
    }

    #[test]
    fn test_login_writes_session() {
        let mut gate = gate();
        let session = gate.login("Martin", "Paul", " Prof@Esup.FR ", now()).unwrap();
        assert_eq!(session.email, "prof@esup.fr");
        assert_eq!(session.expires_at, now() + Duration::days(7));
        assert_eq!(gate.current_session(now()), Some(session));
    }

    #[test]
    fn test_login_refused() {
        let mut gate = gate();
        let err = gate.login("Martin", "Paul", "pirate@evil.com", now()).unwrap_err();
        assert_eq!(err, CalcError::access_denied("pirate@evil.com"));
        assert!(gate.current_session(now()).is_none());
    }

    #[test]
    fn test_login_requires_every_field() {
        let mut gate = gate();
        assert_eq!(
            gate.login("  ", "Paul", "prof@esup.fr", now()).unwrap_err(),
            CalcError::missing_field("last_name")
        );
        assert_eq!(
            gate.login("Martin", "Paul", "", now()).unwrap_err(),
            CalcError::missing_field("email")
        );
    }

    #[test]
    fn test_session_expires_after_seven_days() {
        let mut gate = gate();
        gate.login("Martin", "Paul", "prof@esup.fr", now()).unwrap();

        let last_valid = now() + Duration::days(7);
        assert!(gate.is_authenticated(last_valid));

        let later = last_valid + Duration::seconds(1);
        assert!(gate.current_session(later).is_none());
        assert_eq!(gate.store().get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_record_reads_as_no_session() {
        let mut store = MemoryStore::default();
        store.set(SESSION_KEY, "{oops").unwrap();
        let mut gate = AccessGate::new(store, AllowList::default());
        assert!(gate.current_session(now()).is_none());
    }

    #[test]
    fn test_logout_then_redirect() {
        let mut gate = gate();
        gate.login("Martin", "Paul", "prof@esup.fr", now()).unwrap();
        gate.logout().unwrap();
        let redirect = gate.require_session(now(), "/cours/planchers/calculs.html").unwrap_err();
        assert_eq!(redirect.location, "../../index.html");
    }

    #[test]
    fn test_new_login_replaces_previous() {
        let mut gate = gate();
        gate.login("Martin", "Paul", "prof@esup.fr", now()).unwrap();
        gate.login("Dupont", "Léa", "etudiant@esup.fr", now()).unwrap();
        assert_eq!(gate.current_session(now()).unwrap().last_name, "Dupont");
    }

    #[test]
    fn test_empty_allow_list_admits_anyone() {
        let mut gate = AccessGate::new(MemoryStore::default(), AllowList::decode("!!!"));
        assert!(gate.login("A", "B", "anyone@anywhere.org", now()).is_ok());
    }

    #[test]
    fn test_from_config() {
        let mut config = AccessConfig::default();
        config.session_days = 1;
        config.content_root = "lessons".to_string();
        let mut gate = AccessGate::from_config(MemoryStore::default(), &config);
        assert_eq!(gate.validity(), Duration::days(1));
        assert_eq!(gate.allow_list().len(), 4);
        assert_eq!(gate.require_session(now(), "/lessons/a.html").unwrap_err().location, "../index.html");
    }
}
