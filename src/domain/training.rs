use serde::Serialize;

pub const TRAINING_TOPICS: &[&str] = &[
    "Web Development Basics",
    "Python Programming",
    "Full Stack MERN Development",
    "Data Science & ML Fundamentals",
    "IoT & Hardware Programming",
    "Mobile App Development",
    OTHER_TOPIC,
];

pub const OTHER_TOPIC: &str = "Other (please specify)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    WeekdayMorning,
    WeekdayAfternoon,
    WeekdayEvening,
    WeekendMorning,
    WeekendAfternoon,
    WeekendEvening,
}

impl Availability {
    pub const ALL: &'static [Availability] = &[
        Self::WeekdayMorning,
        Self::WeekdayAfternoon,
        Self::WeekdayEvening,
        Self::WeekendMorning,
        Self::WeekendAfternoon,
        Self::WeekendEvening,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::WeekdayMorning => "weekday_morning",
            Self::WeekdayAfternoon => "weekday_afternoon",
            Self::WeekdayEvening => "weekday_evening",
            Self::WeekendMorning => "weekend_morning",
            Self::WeekendAfternoon => "weekend_afternoon",
            Self::WeekendEvening => "weekend_evening",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WeekdayMorning => "Weekdays (Morning)",
            Self::WeekdayAfternoon => "Weekdays (Afternoon)",
            Self::WeekdayEvening => "Weekdays (Evening)",
            Self::WeekendMorning => "Weekends (Morning)",
            Self::WeekendAfternoon => "Weekends (Afternoon)",
            Self::WeekendEvening => "Weekends (Evening)",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|slot| slot.id() == id)
    }
}

/// Row sent for a training request. `availability` is a JSON-encoded
/// array of slot ids, stored as text.
#[derive(Debug, Clone, Serialize)]
pub struct NewTrainingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub topic: String,
    pub availability: String,
    pub status: String,
}
