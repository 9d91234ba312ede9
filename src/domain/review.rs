use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: String,
    pub reviewer_name: String,
    #[serde(default)]
    pub project_name: Option<String>,
    pub content: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Review {
    /// Five-slot star strip, half stars rounded down.
    pub fn stars(&self) -> String {
        let filled = self.rating.unwrap_or(0.0).clamp(0.0, 5.0).floor() as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_clamp_and_round_down() {
        let mut review: Review = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "reviewer_name": "Ravi",
            "content": "great",
            "rating": 4
        }))
        .expect("review row");
        assert_eq!(review.stars(), "★★★★☆");

        review.rating = Some(9.0);
        assert_eq!(review.stars(), "★★★★★");

        review.rating = None;
        assert_eq!(review.stars(), "☆☆☆☆☆");
    }
}
