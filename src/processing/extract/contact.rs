use super::URL;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self == &ContactInfo::default()
    }
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-. ]?)?(?:\(\d{3}\)|\b\d{3})[-. ]?\d{3}[-. ]?\d{4}\b")
        .expect("Invalid phone regex")
});

static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/[^\s,|]+").expect("Invalid LinkedIn regex")
});

static GITHUB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[^\s,|]+").expect("Invalid GitHub regex")
});

fn find(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| m.as_str().to_string())
}

pub fn extract(text: &str) -> ContactInfo {
    let linkedin = find(&LINKEDIN, text);
    let github = find(&GITHUB, text);

    // Profile links are reported in their own fields
    let website = URL
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|url| {
            let lower = url.to_lowercase();
            !lower.contains("linkedin.com") && !lower.contains("github.com")
        })
        .map(str::to_string);

    ContactInfo {
        email: find(&EMAIL, text),
        phone: find(&PHONE, text).map(|p| p.trim().to_string()),
        linkedin,
        github,
        website,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_contact_block() {
        let info = extract(
            "Jane Roe\njane.roe@example.com | (555) 123-4567\nlinkedin.com/in/janeroe | https://github.com/janeroe | https://janeroe.dev",
        );

        assert_eq!(info.email.as_deref(), Some("jane.roe@example.com"));
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(info.linkedin.as_deref(), Some("linkedin.com/in/janeroe"));
        assert_eq!(info.github.as_deref(), Some("https://github.com/janeroe"));
        assert_eq!(info.website.as_deref(), Some("https://janeroe.dev"));
    }

    #[test]
    fn test_international_phone() {
        let info = extract("Phone: +1 555.987.6543");
        assert_eq!(info.phone.as_deref(), Some("+1 555.987.6543"));
    }

    #[test]
    fn test_nothing_found() {
        let info = extract("Open to relocation");
        assert!(info.is_empty());
        assert!(extract("").is_empty());
    }
}
