//! Relative path back to the login page.

use serde::{Deserialize, Serialize};

/// Folder holding the course pages
pub const DEFAULT_CONTENT_ROOT: &str = "cours";

/// Login page at the site root
pub const LOGIN_PAGE: &str = "index.html";

/// Where an unauthenticated reader is sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub location: String,
}

impl std::fmt::Display for Redirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.location)
    }
}

/// Login path relative to `page_path`.
///
/// Climbs one level per folder from `content_root` down to the page:
///
/// ```rust
/// use mixte_core::access::login_redirect;
///
/// assert_eq!(login_redirect("/cours/poutres/flexion.html", "cours").location, "../../index.html");
/// assert_eq!(login_redirect("/cours/sommaire.html", "cours").location, "../index.html");
/// assert_eq!(login_redirect("/index.html", "cours").location, "index.html");
/// ```
pub fn login_redirect(page_path: &str, content_root: &str) -> Redirect {
    let path = page_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .replace('\\', "/");

    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    // Last segment is the page itself unless the path names a folder
    if !path.ends_with('/') {
        segments.pop();
    }

    let depth = segments
        .iter()
        .position(|s| *s == content_root)
        .map(|root| segments.len() - root)
        .unwrap_or(0);

    Redirect {
        location: format!("{}{}", "../".repeat(depth), LOGIN_PAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_pages() {
        assert_eq!(login_redirect("/cours/poutres/x.html", "cours").location, "../../index.html");
        assert_eq!(login_redirect("/cours/planchers/index.html", "cours").location, "../../index.html");
        assert_eq!(login_redirect("/cours/x.html", "cours").location, "../index.html");
    }

    #[test]
    fn test_pages_outside_content_root() {
        assert_eq!(login_redirect("/index.html", "cours").location, "index.html");
        assert_eq!(login_redirect("/auth/login.html", "cours").location, "index.html");
        assert_eq!(login_redirect("", "cours").location, "index.html");
    }

    #[test]
    fn test_site_under_a_prefix() {
        let r = login_redirect("/site/mixte/cours/poteaux/calc.html", "cours");
        assert_eq!(r.location, "../../index.html");
    }

    #[test]
    fn test_folder_paths_and_queries() {
        assert_eq!(login_redirect("/cours/poutres/", "cours").location, "../../index.html");
        assert_eq!(
            login_redirect("/cours/poutres/x.html?tab=2#connecteurs", "cours").location,
            "../../index.html"
        );
    }

    #[test]
    fn test_custom_root() {
        assert_eq!(login_redirect("/lessons/a/b/c.html", "lessons").location, "../../../index.html");
        assert_eq!(login_redirect("/cours/x.html", "lessons").location, "index.html");
    }
}
