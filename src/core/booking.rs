use crate::core::pricing;
use crate::models::{BookingRequest, MeetingFormat, Mentor};
use serde::Serialize;
use thiserror::Error;

/// The fixed set of offered meeting times
///
/// These are not checked against the mentor's real calendar.
pub const OFFERED_SLOTS: [&str; 5] = ["10:00", "11:30", "14:00", "16:00", "18:30"];

/// Position in the booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    ChoosingFormat,
    SettingGoal,
    PickingSlot,
    Completed,
}

impl BookingStep {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ChoosingFormat,
            Self::SettingGoal,
            Self::PickingSlot,
            Self::Completed,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ChoosingFormat => "Выбор формата",
            Self::SettingGoal => "Цель встречи",
            Self::PickingSlot => "Выбор времени",
            Self::Completed => "Готово",
        }
    }
}

/// Errors raised by out-of-order or invalid booking transitions
///
/// These are local validation rejections, never fatal: the caller maps
/// them to a disabled action or an HTTP 4xx.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("{action} is not available at the {step:?} step")]
    StepMismatch {
        step: BookingStep,
        action: &'static str,
    },

    #[error("required field is blank: {0}")]
    MissingField(&'static str),

    #[error("slot \"{0}\" is not in the offered set")]
    UnknownSlot(String),
}

/// Outcome of a backward transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Returned to the immediately prior step, entered values preserved
    MovedTo(BookingStep),
    /// Back was pressed on the initial step: the workflow is abandoned
    /// and no booking request is produced
    Cancelled,
}

/// Read-only snapshot of the workflow for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    #[serde(rename = "mentorId")]
    pub mentor_id: String,
    pub step: BookingStep,
    #[serde(rename = "stepLabel")]
    pub step_label: &'static str,
    pub format: Option<MeetingFormat>,
    pub price: Option<u32>,
    pub goal: String,
    #[serde(rename = "exchangeOffer")]
    pub exchange_offer: String,
    pub slot: Option<String>,
    #[serde(rename = "offeredSlots")]
    pub offered_slots: [&'static str; 5],
}

/// Strictly ordered booking flow for one mentor
///
/// ChoosingFormat -> SettingGoal -> PickingSlot -> Completed. Each
/// forward transition re-validates its precondition even though the
/// presentation layer also disables premature actions. Draft values
/// survive backward navigation.
#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    mentor: Mentor,
    step: BookingStep,
    format: Option<MeetingFormat>,
    price: Option<u32>,
    goal: String,
    exchange_offer: String,
    slot: Option<String>,
}

impl BookingWorkflow {
    /// Open a booking flow for the given mentor
    pub fn open(mentor: Mentor) -> Self {
        Self {
            mentor,
            step: BookingStep::ChoosingFormat,
            format: None,
            price: None,
            goal: String::new(),
            exchange_offer: String::new(),
            slot: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn mentor(&self) -> &Mentor {
        &self.mentor
    }

    /// Choose the meeting format and freeze the price for it
    pub fn select_format(&mut self, format: MeetingFormat) -> Result<(), BookingError> {
        if self.step != BookingStep::ChoosingFormat {
            return Err(BookingError::StepMismatch {
                step: self.step,
                action: "select_format",
            });
        }

        self.format = Some(format);
        self.price = Some(pricing::price(format, &self.mentor));
        self.step = BookingStep::SettingGoal;
        Ok(())
    }

    /// Record the meeting goal and the energy-exchange offer
    pub fn submit_goal(&mut self, goal: &str, exchange_offer: &str) -> Result<(), BookingError> {
        if self.step != BookingStep::SettingGoal {
            return Err(BookingError::StepMismatch {
                step: self.step,
                action: "submit_goal",
            });
        }
        if goal.trim().is_empty() {
            return Err(BookingError::MissingField("goal"));
        }
        if exchange_offer.trim().is_empty() {
            return Err(BookingError::MissingField("exchange_offer"));
        }

        self.goal = goal.trim().to_string();
        self.exchange_offer = exchange_offer.trim().to_string();
        self.step = BookingStep::PickingSlot;
        Ok(())
    }

    /// Pick a slot from the offered set, completing the workflow
    ///
    /// Returns the finalized booking request; the instance is done after
    /// this and should be discarded by the owner.
    pub fn select_slot(&mut self, slot: &str) -> Result<BookingRequest, BookingError> {
        if self.step != BookingStep::PickingSlot {
            return Err(BookingError::StepMismatch {
                step: self.step,
                action: "select_slot",
            });
        }
        if !OFFERED_SLOTS.contains(&slot) {
            return Err(BookingError::UnknownSlot(slot.to_string()));
        }

        // both were set when the earlier steps advanced
        let format = self.format.ok_or(BookingError::MissingField("format"))?;
        let price = self.price.ok_or(BookingError::MissingField("price"))?;

        self.slot = Some(slot.to_string());
        self.step = BookingStep::Completed;

        Ok(BookingRequest {
            mentor_id: self.mentor.id.clone(),
            format,
            goal: self.goal.clone(),
            exchange_offer: self.exchange_offer.clone(),
            slot: slot.to_string(),
            price,
        })
    }

    /// Step back, preserving everything entered so far
    pub fn back(&mut self) -> Result<BackOutcome, BookingError> {
        match self.step {
            BookingStep::ChoosingFormat => Ok(BackOutcome::Cancelled),
            BookingStep::SettingGoal => {
                self.step = BookingStep::ChoosingFormat;
                Ok(BackOutcome::MovedTo(self.step))
            }
            BookingStep::PickingSlot => {
                self.step = BookingStep::SettingGoal;
                Ok(BackOutcome::MovedTo(self.step))
            }
            BookingStep::Completed => Err(BookingError::StepMismatch {
                step: self.step,
                action: "back",
            }),
        }
    }

    pub fn view(&self) -> BookingView {
        BookingView {
            mentor_id: self.mentor.id.clone(),
            step: self.step,
            step_label: self.step.label(),
            format: self.format,
            price: self.price,
            goal: self.goal.clone(),
            exchange_offer: self.exchange_offer.clone(),
            slot: self.slot.clone(),
            offered_slots: OFFERED_SLOTS,
        }
    }
}
