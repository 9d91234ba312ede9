use serde::Deserialize;
use serde_json::Value;

use super::portfolio::{Platform, SocialLink};

#[derive(Debug, Clone, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Free-form JSON object keyed by platform name.
    #[serde(default)]
    pub social_links: Option<Value>,
}

impl TeamMember {
    pub fn links(&self) -> Vec<SocialLink> {
        let Some(Value::Object(map)) = &self.social_links else {
            return vec![];
        };
        map.iter()
            .filter_map(|(platform, url)| {
                let url = url.as_str()?.trim();
                if url.is_empty() {
                    return None;
                }
                Some(SocialLink {
                    platform: Platform::from(platform.clone()),
                    url: url.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_skip_blank_and_non_string_entries() {
        let member: TeamMember = serde_json::from_value(serde_json::json!({
            "name": "Sam",
            "role": "Engineer",
            "social_links": {
                "github": "https://github.com/sam",
                "linkedin": "",
                "followers": 12
            }
        }))
        .expect("team row");

        let links = member.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].platform, Platform::GitHub);
    }

    #[test]
    fn missing_links_are_empty() {
        let member: TeamMember = serde_json::from_value(serde_json::json!({
            "name": "Sam",
            "role": "Engineer",
            "social_links": null
        }))
        .expect("team row");
        assert!(member.links().is_empty());
    }
}
