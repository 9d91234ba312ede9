use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::review::Review;

const BUILTIN_CONTENT: &str = include_str!("../../content/portfolio.toml");

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid content file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Static portfolio content rendered by the About, Projects and Activity
/// sections. Remote collections live in the gateway, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub showcase: Vec<Showcase>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    /// Shown when the reviews collection comes back empty.
    #[serde(default)]
    pub sample_reviews: Vec<Review>,
}

impl Portfolio {
    pub fn builtin() -> Self {
        // The embedded file is covered by a unit test, so this cannot fail at runtime.
        toml::from_str(BUILTIN_CONTENT).unwrap_or_else(|_| Self::empty())
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    fn empty() -> Self {
        Self {
            profile: Profile::default(),
            skills: vec![],
            experience: vec![],
            education: vec![],
            showcase: vec![],
            social: vec![],
            sample_reviews: vec![],
        }
    }

    /// Handle taken from the last path segment of the GitHub social link.
    pub fn github_handle(&self) -> Option<String> {
        self.social
            .iter()
            .find(|link| link.platform == Platform::GitHub)
            .and_then(|link| link.url.trim_end_matches('/').rsplit('/').next())
            .filter(|handle| !handle.is_empty())
            .map(str::to_string)
    }

    /// Sorted, de-duplicated union of showcase tags.
    pub fn showcase_tags(&self) -> Vec<String> {
        self.showcase
            .iter()
            .flat_map(|project| project.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn project(&self, id: &str) -> Option<&Showcase> {
        self.showcase.iter().find(|project| project.id == id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    pub name: String,
    /// 1 to 5.
    pub level: u8,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Showcase {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Detail page text. Falls back to `description` when absent.
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Showcase {
    pub fn detail_text(&self) -> &str {
        self.long_description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(&self.description)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SocialLink {
    pub platform: Platform,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Platform {
    GitHub,
    LinkedIn,
    Twitter,
    Instagram,
    Email,
    Other(String),
}

impl From<String> for Platform {
    fn from(name: String) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "github" => Self::GitHub,
            "linkedin" => Self::LinkedIn,
            "twitter" | "x" => Self::Twitter,
            "instagram" => Self::Instagram,
            "email" | "mail" => Self::Email,
            _ => Self::Other(name),
        }
    }
}

impl Platform {
    pub fn label(&self) -> &str {
        match self {
            Self::GitHub => "GitHub",
            Self::LinkedIn => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::Instagram => "Instagram",
            Self::Email => "Email",
            Self::Other(name) => name,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::GitHub => "gh",
            Self::LinkedIn => "in",
            Self::Twitter => "tw",
            Self::Instagram => "ig",
            Self::Email => "@",
            Self::Other(_) => "↗",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_parses() {
        let content: Portfolio = toml::from_str(BUILTIN_CONTENT).expect("builtin content");
        assert!(!content.profile.name.is_empty());
        assert!(!content.skills.is_empty());
        assert!(!content.sample_reviews.is_empty());
    }

    #[test]
    fn github_handle_comes_from_social_link() {
        let mut content = Portfolio::builtin();
        content.social = vec![SocialLink {
            platform: Platform::from("GitHub".to_string()),
            url: "https://github.com/octocat/".to_string(),
        }];
        assert_eq!(content.github_handle().as_deref(), Some("octocat"));

        content.social.clear();
        assert_eq!(content.github_handle(), None);
    }

    #[test]
    fn unknown_platform_keeps_its_name() {
        let platform = Platform::from("Mastodon".to_string());
        assert_eq!(platform, Platform::Other("Mastodon".to_string()));
        assert_eq!(platform.label(), "Mastodon");
        assert_eq!(platform.glyph(), "↗");
    }

    #[test]
    fn showcase_tags_are_sorted_and_unique() {
        let mut content = Portfolio::builtin();
        content.showcase = vec![
            Showcase {
                id: "a".into(),
                title: "A".into(),
                description: String::new(),
                long_description: None,
                tags: vec!["Rust".into(), "CLI".into()],
                demo_url: None,
                source_url: None,
                featured: false,
            },
            Showcase {
                id: "b".into(),
                title: "B".into(),
                description: String::new(),
                long_description: None,
                tags: vec!["Rust".into(), "Async".into()],
                demo_url: None,
                source_url: None,
                featured: true,
            },
        ];
        assert_eq!(content.showcase_tags(), vec!["Async", "CLI", "Rust"]);
    }

    #[test]
    fn project_lookup_by_id() {
        let content = Portfolio::builtin();
        let project = content.project("ecommerce").expect("ecommerce project");
        assert_eq!(project.title, "E-Commerce Platform");
        assert!(project.detail_text().contains("Stripe"));
        assert_ne!(project.detail_text(), project.description);

        assert!(content.project("no-such-project").is_none());
    }

    #[test]
    fn detail_text_falls_back_to_description() {
        let project: Showcase = toml::from_str(
            r#"
            id = "cli"
            title = "CLI"
            description = "Short blurb"
            long_description = "  "
            "#,
        )
        .expect("showcase");
        assert_eq!(project.detail_text(), "Short blurb");
    }
}
