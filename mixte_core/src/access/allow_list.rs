//! Decoded email allow-list.

use base64::prelude::*;
use serde::{Deserialize, Serialize};

/// Trimmed, lowercased form used for every comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Emails and `@domain` suffixes allowed through the gate.
///
/// An empty list lets everyone in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    /// Build from plain entries; blank entries are dropped
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| normalize_email(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Decode a base64 comma-separated list.
    ///
    /// An undecodable value is logged and yields an empty list, which
    /// admits everyone.
    pub fn decode(encoded: &str) -> Self {
        let bytes = match BASE64_STANDARD.decode(encoded.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "allow-list is not valid base64, gate left open");
                return Self::default();
            }
        };
        match String::from_utf8(bytes) {
            Ok(text) => Self::new(text.split(',')),
            Err(e) => {
                tracing::warn!(error = %e, "allow-list is not valid UTF-8, gate left open");
                Self::default()
            }
        }
    }

    /// Encoded form, suitable for the `access.allow_list` setting
    pub fn encode(&self) -> String {
        BASE64_STANDARD.encode(self.entries.join(","))
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact address or domain-suffix match, after normalization
    pub fn permits(&self, email: &str) -> bool {
        if self.entries.is_empty() {
            return true;
        }
        let email = normalize_email(email);
        self.entries.iter().any(|entry| {
            if entry.starts_with('@') {
                email.ends_with(entry.as_str())
            } else {
                email == *entry
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::DEFAULT_ENCODED_ALLOW_LIST;
    use proptest::prelude::*;

    #[test]
    fn test_decode_default_list() {
        let list = AllowList::decode(DEFAULT_ENCODED_ALLOW_LIST);
        assert_eq!(
            list.entries(),
            ["admin@esup.fr", "prof@esup.fr", "test@example.com", "etudiant@esup.fr"]
        );
    }

    #[test]
    fn test_exact_match_is_normalized() {
        let list = AllowList::decode(DEFAULT_ENCODED_ALLOW_LIST);
        assert!(list.permits("  Prof@ESUP.fr "));
        assert!(!list.permits("eleve@esup.fr"));
        assert!(!list.permits(""));
    }

    #[test]
    fn test_domain_suffix() {
        let list = AllowList::new(["@esup.fr"]);
        assert!(list.permits("anyone@esup.fr"));
        assert!(!list.permits("anyone@esup.fr.evil.com"));
        assert!(!list.permits("anyone@gmail.com"));
    }

    #[test]
    fn test_invalid_base64_fails_open() {
        let list = AllowList::decode("%%% not base64 %%%");
        assert!(list.is_empty());
        assert!(list.permits("stranger@nowhere.org"));
    }

    #[test]
    fn test_blank_entries_dropped() {
        let list = AllowList::decode(&BASE64_STANDARD.encode("a@b.c, ,,"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_encode_matches_shipped_constant() {
        let list = AllowList::new(["admin@esup.fr", "prof@esup.fr", "test@example.com", "etudiant@esup.fr"]);
        assert_eq!(list.encode(), DEFAULT_ENCODED_ALLOW_LIST);
    }

    proptest! {
        #[test]
        fn prop_empty_list_admits_everyone(email in "\\PC*") {
            prop_assert!(AllowList::default().permits(&email));
        }

        #[test]
        fn prop_listed_email_admitted_in_any_case(user in "[a-z]{1,10}", domain in "[a-z]{1,8}\\.fr") {
            let email = format!("{}@{}", user, domain);
            let list = AllowList::new([email.clone()]);
            prop_assert!(list.permits(&email.to_uppercase()));
            let padded = format!(" {} ", email);
            prop_assert!(list.permits(&padded));
        }

        #[test]
        fn prop_domain_entry_admits_its_users(user in "[a-z0-9.]{1,12}") {
            let list = AllowList::new(["@esup.fr"]);
            let inside = format!("{}@esup.fr", user);
            let outside = format!("{}@esup.com", user);
            prop_assert!(list.permits(&inside));
            prop_assert!(!list.permits(&outside));
        }
    }
}
