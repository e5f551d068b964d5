use serde::{Deserialize, Serialize};

/// A mentor available for paid meetings
///
/// Catalog entries are loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
    pub id: String,
    pub name: String,
    /// May encode several industries separated by " / "
    pub industry: String,
    pub city: String,
    pub experience: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    /// What the mentor asks of seekers in return
    pub request: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(rename = "videoUrl", default)]
    pub video_url: String,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: String,
    #[serde(rename = "singlePrice")]
    pub single_price: u32,
    #[serde(rename = "groupPrice")]
    pub group_price: u32,
}

/// Meeting modality, each with its own price class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingFormat {
    Online1On1,
    Offline1On1,
    GroupOffline,
}

impl MeetingFormat {
    pub const fn ordered() -> [Self; 3] {
        [Self::Online1On1, Self::Offline1On1, Self::GroupOffline]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Online1On1 => "Онлайн 1 на 1",
            Self::Offline1On1 => "Оффлайн 1 на 1",
            Self::GroupOffline => "Групповая встреча (до 10 чел)",
        }
    }
}

/// AI-derived single best-fit mentor suggestion for a free-text goal
///
/// The id is only as trustworthy as the external model; consumers must
/// validate it against the catalog before acting on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSuggestion {
    #[serde(rename = "id")]
    pub mentor_id: String,
    pub reason: String,
}

/// Finalized booking produced by a completed booking workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    pub format: MeetingFormat,
    pub goal: String,
    #[serde(rename = "exchangeOffer")]
    pub exchange_offer: String,
    pub slot: String,
    /// Always the pricing calculator's result for the chosen format,
    /// never caller-supplied
    pub price: u32,
}

/// Registration role, chosen once per workflow instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Entrepreneur,
    Youth,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entrepreneur => "Эксперт",
            Self::Youth => "Ищу наставника",
        }
    }
}

/// Onboarding data collected on the expert track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrepreneurProfile {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "businessName", default)]
    pub business_name: String,
    #[serde(default)]
    pub revenue: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub values: String,
    #[serde(default)]
    pub request: String,
    #[serde(rename = "videoDeclared", default)]
    pub video_declared: bool,
    /// Clamped to [1, 40] on every write
    #[serde(rename = "hoursPerMonth", default = "default_hours")]
    pub hours_per_month: u8,
    /// Ordered "«date» в «time»" strings, no duplicates
    #[serde(default)]
    pub slots: Vec<String>,
}

fn default_hours() -> u8 {
    1
}

impl Default for EntrepreneurProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            business_name: String::new(),
            revenue: String::new(),
            city: String::new(),
            industry: String::new(),
            values: String::new(),
            request: String::new(),
            video_declared: false,
            hours_per_month: default_hours(),
            slots: Vec::new(),
        }
    }
}

/// Onboarding data collected on the seeker track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YouthProfile {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "birthDate", default)]
    pub birth_date: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "mainFocus", default)]
    pub main_focus: String,
    #[serde(rename = "meetingGoal", default)]
    pub meeting_goal: String,
    #[serde(rename = "energyExchange", default)]
    pub energy_exchange: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_labels_are_distinct() {
        let labels: Vec<&str> = MeetingFormat::ordered().iter().map(|f| f.label()).collect();
        assert_eq!(labels.len(), 3);
        assert!(labels.contains(&"Групповая встреча (до 10 чел)"));
    }

    #[test]
    fn hours_default_to_one_when_absent() {
        let parsed: EntrepreneurProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.hours_per_month, 1);
        assert!(parsed.slots.is_empty());
    }

    #[test]
    fn meeting_format_wire_names_are_snake_case() {
        let json = serde_json::to_string(&MeetingFormat::GroupOffline).unwrap();
        assert_eq!(json, "\"group_offline\"");
    }
}
