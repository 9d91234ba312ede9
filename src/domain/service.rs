use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ServiceCategory {
    Software,
    Hardware,
    Training,
    Other(String),
}

impl From<String> for ServiceCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "software" => Self::Software,
            "hardware" => Self::Hardware,
            "training" => Self::Training,
            _ => Self::Other(tag),
        }
    }
}

impl ServiceCategory {
    pub fn label(&self) -> &str {
        match self {
            Self::Software => "Software",
            Self::Hardware => "Hardware",
            Self::Training => "Training",
            Self::Other(tag) => tag,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Software => "</>",
            Self::Hardware => "[#]",
            Self::Training => "[T]",
            Self::Other(_) => "[ ]",
        }
    }
}
