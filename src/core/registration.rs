use crate::models::{EntrepreneurProfile, UserRole, YouthProfile};
use serde::Serialize;
use thiserror::Error;

/// Bounds for the hours an expert offers per month
pub const MIN_HOURS_PER_MONTH: u8 = 1;
pub const MAX_HOURS_PER_MONTH: u8 = 40;

/// Steps of the expert onboarding track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrepreneurStep {
    Identity,
    Values,
    VideoPitch,
    Schedule,
}

impl EntrepreneurStep {
    pub const fn ordered() -> [Self; 4] {
        [Self::Identity, Self::Values, Self::VideoPitch, Self::Schedule]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "О вас и бизнесе",
            Self::Values => "Ценности и запрос",
            Self::VideoPitch => "Видео-визитка",
            Self::Schedule => "Часы и слоты",
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Identity => Some(Self::Values),
            Self::Values => Some(Self::VideoPitch),
            Self::VideoPitch => Some(Self::Schedule),
            Self::Schedule => None,
        }
    }

    const fn prev(self) -> Option<Self> {
        match self {
            Self::Identity => None,
            Self::Values => Some(Self::Identity),
            Self::VideoPitch => Some(Self::Values),
            Self::Schedule => Some(Self::VideoPitch),
        }
    }
}

/// Steps of the seeker onboarding track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum YouthStep {
    Identity,
    Focus,
    ExchangeOffer,
}

impl YouthStep {
    pub const fn ordered() -> [Self; 3] {
        [Self::Identity, Self::Focus, Self::ExchangeOffer]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "О себе",
            Self::Focus => "Фокус и цель",
            Self::ExchangeOffer => "Энергообмен",
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Identity => Some(Self::Focus),
            Self::Focus => Some(Self::ExchangeOffer),
            Self::ExchangeOffer => None,
        }
    }

    const fn prev(self) -> Option<Self> {
        match self {
            Self::Identity => None,
            Self::Focus => Some(Self::Identity),
            Self::ExchangeOffer => Some(Self::Focus),
        }
    }
}

/// Errors raised by invalid registration operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("a role has already been chosen for this registration")]
    RoleAlreadyChosen,

    #[error("no role has been chosen yet")]
    RoleNotChosen,

    #[error("{action} is not available at this step")]
    StepMismatch { action: &'static str },

    #[error("required field is blank: {0}")]
    MissingField(&'static str),

    #[error("the registration has already been submitted")]
    AlreadySubmitted,
}

/// Partial field update applied to the active track's profile
///
/// Fields that do not belong to the active track are ignored.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub revenue: Option<String>,
    pub city: Option<String>,
    pub industry: Option<String>,
    pub values: Option<String>,
    pub request: Option<String>,
    pub video_declared: Option<bool>,
    pub hours_per_month: Option<u8>,
    pub birth_date: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub main_focus: Option<String>,
    pub meeting_goal: Option<String>,
    pub energy_exchange: Option<String>,
}

/// Result of an `advance` call
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved one step forward within the track
    Moved,
    /// The final step was valid: the workflow is now terminal and the
    /// collected profile is ready for the best-effort remote write
    Submitted(RegistrationSubmission),
}

/// Profile snapshot handed to the submission collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationSubmission {
    Entrepreneur(EntrepreneurProfile),
    Youth(YouthProfile),
}

#[derive(Debug, Clone)]
enum Track {
    Unselected,
    Entrepreneur {
        step: EntrepreneurStep,
        profile: Box<EntrepreneurProfile>,
    },
    Youth {
        step: YouthStep,
        profile: Box<YouthProfile>,
    },
    Submitted {
        role: UserRole,
        pending_moderation: bool,
    },
}

/// Read-only snapshot for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationView {
    pub role: Option<UserRole>,
    pub step: Option<String>,
    #[serde(rename = "stepLabel")]
    pub step_label: Option<&'static str>,
    #[serde(rename = "stepIndex")]
    pub step_index: Option<usize>,
    #[serde(rename = "stepCount")]
    pub step_count: Option<usize>,
    pub submitted: bool,
    #[serde(rename = "pendingModeration")]
    pub pending_moderation: bool,
    #[serde(rename = "catalogUnlocked")]
    pub catalog_unlocked: bool,
    pub entrepreneur: Option<EntrepreneurProfile>,
    pub youth: Option<YouthProfile>,
}

/// Two-track onboarding flow rooted in an exclusive role choice
///
/// Going back from the first step of either track returns to the root
/// and clears every collected field. Reaching the final step with valid
/// fields submits and the instance becomes terminal.
#[derive(Debug, Clone)]
pub struct RegistrationWorkflow {
    track: Track,
}

impl RegistrationWorkflow {
    pub fn new() -> Self {
        Self {
            track: Track::Unselected,
        }
    }

    /// Choose the track; legal only from the root state
    pub fn choose_role(&mut self, role: UserRole) -> Result<(), RegistrationError> {
        match self.track {
            Track::Unselected => {
                self.track = match role {
                    UserRole::Entrepreneur => Track::Entrepreneur {
                        step: EntrepreneurStep::Identity,
                        profile: Box::default(),
                    },
                    UserRole::Youth => Track::Youth {
                        step: YouthStep::Identity,
                        profile: Box::default(),
                    },
                };
                Ok(())
            }
            Track::Submitted { .. } => Err(RegistrationError::AlreadySubmitted),
            _ => Err(RegistrationError::RoleAlreadyChosen),
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        match &self.track {
            Track::Unselected => None,
            Track::Entrepreneur { .. } => Some(UserRole::Entrepreneur),
            Track::Youth { .. } => Some(UserRole::Youth),
            Track::Submitted { role, .. } => Some(*role),
        }
    }

    /// Merge field updates into the active profile
    ///
    /// `hours_per_month` is clamped to [1, 40] here so no later check
    /// can observe an out-of-range value.
    pub fn apply_fields(&mut self, update: ProfileUpdate) -> Result<(), RegistrationError> {
        match &mut self.track {
            Track::Unselected => Err(RegistrationError::RoleNotChosen),
            Track::Submitted { .. } => Err(RegistrationError::AlreadySubmitted),
            Track::Entrepreneur { profile, .. } => {
                apply_string(&mut profile.name, update.name);
                apply_string(&mut profile.business_name, update.business_name);
                apply_string(&mut profile.revenue, update.revenue);
                apply_string(&mut profile.city, update.city);
                apply_string(&mut profile.industry, update.industry);
                apply_string(&mut profile.values, update.values);
                apply_string(&mut profile.request, update.request);
                if let Some(declared) = update.video_declared {
                    profile.video_declared = declared;
                }
                if let Some(hours) = update.hours_per_month {
                    profile.hours_per_month =
                        hours.clamp(MIN_HOURS_PER_MONTH, MAX_HOURS_PER_MONTH);
                }
                Ok(())
            }
            Track::Youth { profile, .. } => {
                apply_string(&mut profile.name, update.name);
                apply_string(&mut profile.birth_date, update.birth_date);
                apply_string(&mut profile.city, update.city);
                apply_string(&mut profile.phone, update.phone);
                apply_string(&mut profile.email, update.email);
                apply_string(&mut profile.main_focus, update.main_focus);
                apply_string(&mut profile.meeting_goal, update.meeting_goal);
                apply_string(&mut profile.energy_exchange, update.energy_exchange);
                Ok(())
            }
        }
    }

    /// Declare an offered meeting slot; Schedule step only
    ///
    /// Returns false without error when either part is blank or the
    /// combined slot duplicates an existing entry.
    pub fn add_slot(&mut self, date: &str, time: &str) -> Result<bool, RegistrationError> {
        match &mut self.track {
            Track::Entrepreneur {
                step: EntrepreneurStep::Schedule,
                profile,
            } => {
                let date = date.trim();
                let time = time.trim();
                if date.is_empty() || time.is_empty() {
                    return Ok(false);
                }
                let slot = format!("{} в {}", date, time);
                if profile.slots.contains(&slot) {
                    return Ok(false);
                }
                profile.slots.push(slot);
                Ok(true)
            }
            Track::Unselected => Err(RegistrationError::RoleNotChosen),
            Track::Submitted { .. } => Err(RegistrationError::AlreadySubmitted),
            _ => Err(RegistrationError::StepMismatch { action: "add_slot" }),
        }
    }

    /// Remove a declared slot by position; out-of-range is a no-op
    pub fn remove_slot(&mut self, index: usize) -> Result<bool, RegistrationError> {
        match &mut self.track {
            Track::Entrepreneur {
                step: EntrepreneurStep::Schedule,
                profile,
            } => {
                if index >= profile.slots.len() {
                    return Ok(false);
                }
                profile.slots.remove(index);
                Ok(true)
            }
            Track::Unselected => Err(RegistrationError::RoleNotChosen),
            Track::Submitted { .. } => Err(RegistrationError::AlreadySubmitted),
            _ => Err(RegistrationError::StepMismatch {
                action: "remove_slot",
            }),
        }
    }

    /// Move one step forward, or submit from the final step
    ///
    /// Advancing requires the current step's required fields to be
    /// non-empty; the check runs here regardless of what the
    /// presentation layer disabled.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, RegistrationError> {
        match &mut self.track {
            Track::Unselected => Err(RegistrationError::RoleNotChosen),
            Track::Submitted { .. } => Err(RegistrationError::AlreadySubmitted),
            Track::Entrepreneur { step, profile } => {
                entrepreneur_step_ready(*step, profile)?;
                match step.next() {
                    Some(next) => {
                        *step = next;
                        Ok(AdvanceOutcome::Moved)
                    }
                    None => {
                        let submission =
                            RegistrationSubmission::Entrepreneur((**profile).clone());
                        self.track = Track::Submitted {
                            role: UserRole::Entrepreneur,
                            pending_moderation: true,
                        };
                        Ok(AdvanceOutcome::Submitted(submission))
                    }
                }
            }
            Track::Youth { step, profile } => {
                youth_step_ready(*step, profile)?;
                match step.next() {
                    Some(next) => {
                        *step = next;
                        Ok(AdvanceOutcome::Moved)
                    }
                    None => {
                        let submission = RegistrationSubmission::Youth((**profile).clone());
                        self.track = Track::Submitted {
                            role: UserRole::Youth,
                            pending_moderation: false,
                        };
                        Ok(AdvanceOutcome::Submitted(submission))
                    }
                }
            }
        }
    }

    /// Step back; from the first step of a track this returns to the
    /// root and discards everything collected so far
    pub fn back(&mut self) -> Result<(), RegistrationError> {
        match &mut self.track {
            Track::Unselected => Err(RegistrationError::RoleNotChosen),
            Track::Submitted { .. } => Err(RegistrationError::AlreadySubmitted),
            Track::Entrepreneur { step, .. } => {
                match step.prev() {
                    Some(prev) => *step = prev,
                    None => self.track = Track::Unselected,
                }
                Ok(())
            }
            Track::Youth { step, .. } => {
                match step.prev() {
                    Some(prev) => *step = prev,
                    None => self.track = Track::Unselected,
                }
                Ok(())
            }
        }
    }

    /// Clear the moderation-pending notice, unlocking the catalog
    pub fn acknowledge_moderation(&mut self) -> Result<(), RegistrationError> {
        match &mut self.track {
            Track::Submitted {
                pending_moderation, ..
            } => {
                *pending_moderation = false;
                Ok(())
            }
            _ => Err(RegistrationError::StepMismatch {
                action: "acknowledge_moderation",
            }),
        }
    }

    pub fn view(&self) -> RegistrationView {
        match &self.track {
            Track::Unselected => RegistrationView {
                role: None,
                step: None,
                step_label: None,
                step_index: None,
                step_count: None,
                submitted: false,
                pending_moderation: false,
                catalog_unlocked: false,
                entrepreneur: None,
                youth: None,
            },
            Track::Entrepreneur { step, profile } => RegistrationView {
                role: Some(UserRole::Entrepreneur),
                step: Some(step_token(*step)),
                step_label: Some(step.label()),
                step_index: Some(
                    EntrepreneurStep::ordered()
                        .iter()
                        .position(|s| s == step)
                        .unwrap_or(0)
                        + 1,
                ),
                step_count: Some(EntrepreneurStep::ordered().len()),
                submitted: false,
                pending_moderation: false,
                catalog_unlocked: false,
                entrepreneur: Some((**profile).clone()),
                youth: None,
            },
            Track::Youth { step, profile } => RegistrationView {
                role: Some(UserRole::Youth),
                step: Some(youth_step_token(*step)),
                step_label: Some(step.label()),
                step_index: Some(
                    YouthStep::ordered().iter().position(|s| s == step).unwrap_or(0) + 1,
                ),
                step_count: Some(YouthStep::ordered().len()),
                submitted: false,
                pending_moderation: false,
                catalog_unlocked: false,
                entrepreneur: None,
                youth: Some((**profile).clone()),
            },
            Track::Submitted {
                role,
                pending_moderation,
            } => RegistrationView {
                role: Some(*role),
                step: None,
                step_label: None,
                step_index: None,
                step_count: None,
                submitted: true,
                pending_moderation: *pending_moderation,
                catalog_unlocked: !*pending_moderation,
                entrepreneur: None,
                youth: None,
            },
        }
    }
}

impl Default for RegistrationWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_string(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn step_token(step: EntrepreneurStep) -> String {
    match step {
        EntrepreneurStep::Identity => "identity",
        EntrepreneurStep::Values => "values",
        EntrepreneurStep::VideoPitch => "video_pitch",
        EntrepreneurStep::Schedule => "schedule",
    }
    .to_string()
}

fn youth_step_token(step: YouthStep) -> String {
    match step {
        YouthStep::Identity => "identity",
        YouthStep::Focus => "focus",
        YouthStep::ExchangeOffer => "exchange_offer",
    }
    .to_string()
}

fn require(field: &str, name: &'static str) -> Result<(), RegistrationError> {
    if field.trim().is_empty() {
        Err(RegistrationError::MissingField(name))
    } else {
        Ok(())
    }
}

fn entrepreneur_step_ready(
    step: EntrepreneurStep,
    profile: &EntrepreneurProfile,
) -> Result<(), RegistrationError> {
    match step {
        EntrepreneurStep::Identity => {
            require(&profile.name, "name")?;
            require(&profile.business_name, "business_name")?;
            require(&profile.revenue, "revenue")?;
            require(&profile.city, "city")?;
            require(&profile.industry, "industry")
        }
        EntrepreneurStep::Values => {
            require(&profile.values, "values")?;
            require(&profile.request, "request")
        }
        EntrepreneurStep::VideoPitch => {
            if profile.video_declared {
                Ok(())
            } else {
                Err(RegistrationError::MissingField("video_declared"))
            }
        }
        EntrepreneurStep::Schedule => {
            // hours are clamped on write, so only the slot list can gate
            if profile.slots.is_empty() {
                Err(RegistrationError::MissingField("slots"))
            } else {
                Ok(())
            }
        }
    }
}

fn youth_step_ready(step: YouthStep, profile: &YouthProfile) -> Result<(), RegistrationError> {
    match step {
        YouthStep::Identity => {
            require(&profile.name, "name")?;
            require(&profile.birth_date, "birth_date")?;
            require(&profile.city, "city")?;
            require(&profile.phone, "phone")?;
            require(&profile.email, "email")
        }
        YouthStep::Focus => {
            require(&profile.main_focus, "main_focus")?;
            require(&profile.meeting_goal, "meeting_goal")
        }
        YouthStep::ExchangeOffer => require(&profile.energy_exchange, "energy_exchange"),
    }
}
