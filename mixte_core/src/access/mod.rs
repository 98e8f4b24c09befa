//! # Access Gate
//!
//! Client-side email allow-list with a local session record.
//!
//! The allow-list is shipped base64-encoded and the session is a plain JSON
//! record in local storage. Neither is a security control: anyone able to
//! read the binary or edit the storage gets in. The gate only decides which
//! screen to show.
//!
//! ## Flow
//!
//! 1. [`AccessGate::login`] checks the email against the [`AllowList`] and
//!    writes a [`Session`] valid for 7 days.
//! 2. Every protected page calls [`AccessGate::require_session`], which
//!    returns the session or a [`Redirect`] to the login page.
//! 3. [`AccessGate::logout`] removes the record.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use mixte_core::access::{AccessGate, AllowList, MemoryStore};
//!
//! let allow = AllowList::new(["prof@esup.fr", "@etu.esup.fr"]);
//! let mut gate = AccessGate::new(MemoryStore::default(), allow);
//! let now = Utc::now();
//!
//! gate.login("Durand", "Marie", "Marie@ETU.esup.fr", now).unwrap();
//! let session = gate.require_session(now, "/cours/poutres/index.html").unwrap();
//! assert_eq!(session.email, "marie@etu.esup.fr");
//!
//! gate.logout().unwrap();
//! let redirect = gate.require_session(now, "/cours/poutres/index.html").unwrap_err();
//! assert_eq!(redirect.location, "../../index.html");
//! ```

pub mod allow_list;
pub mod gate;
pub mod redirect;
pub mod session;
pub mod store;

pub use allow_list::AllowList;
pub use gate::AccessGate;
pub use redirect::{login_redirect, Redirect, DEFAULT_CONTENT_ROOT, LOGIN_PAGE};
pub use session::{Session, DEFAULT_VALIDITY_DAYS};
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
pub use store::{MemoryStore, SessionStore};

/// Storage key of the session record
pub const SESSION_KEY: &str = "cm_session";

/// Allow-list shipped with the course, base64 of comma-separated entries
pub const DEFAULT_ENCODED_ALLOW_LIST: &str =
    "YWRtaW5AZXN1cC5mcixwcm9mQGVzdXAuZnIsdGVzdEBleGFtcGxlLmNvbSxldHVkaWFudEBlc3VwLmZy";
