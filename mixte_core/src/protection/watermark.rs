use crate::access::Session;

/// Identity stamped over the content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    text: String,
}

impl Watermark {
    /// `"{first_name} {last_name} - {email}"`, none without a session
    pub fn for_session(session: Option<&Session>) -> Option<Self> {
        session.map(|s| Self {
            text: format!("{} {} - {}", s.first_name, s.last_name, s.email),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Watermark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_text_from_session() {
        let session = Session::new("Durand", "Marie", "MARIE@esup.fr", Utc::now(), Duration::days(7));
        let mark = Watermark::for_session(Some(&session)).unwrap();
        assert_eq!(mark.text(), "Marie Durand - marie@esup.fr");
        assert_eq!(mark.to_string(), mark.text());
    }

    #[test]
    fn test_absent_without_session() {
        assert_eq!(Watermark::for_session(None), None);
    }
}
