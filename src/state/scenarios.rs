//! Registration wizard
//!
//! A visitor registers in steps: pick a category, pick one of its events,
//! type personal data, attach the proof photo. Each step may only move to
//! the steps listed in [`WizardStep::next_steps`]; going back to an earlier
//! step is always allowed.

use std::fmt;

use crate::models::{Event, EventCategory, PersonalInfo, ProofImage, RecordId, RegistrationSubmission};
use crate::utils::errors::{CoconutError, Result};

/// Where the visitor currently is in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    ChooseCategory,
    ChooseEvent,
    PersonalInfo,
    Photo,
    Ready,
}

impl WizardStep {
    pub fn id(&self) -> &'static str {
        match self {
            WizardStep::ChooseCategory => "choose_category",
            WizardStep::ChooseEvent => "choose_event",
            WizardStep::PersonalInfo => "personal_info",
            WizardStep::Photo => "photo",
            WizardStep::Ready => "ready",
        }
    }

    /// Forward moves allowed from this step
    pub fn next_steps(&self) -> &'static [WizardStep] {
        match self {
            WizardStep::ChooseCategory => &[WizardStep::ChooseEvent],
            WizardStep::ChooseEvent => &[WizardStep::PersonalInfo],
            WizardStep::PersonalInfo => &[WizardStep::Photo],
            WizardStep::Photo => &[WizardStep::Ready],
            WizardStep::Ready => &[],
        }
    }

    fn can_move_to(&self, target: WizardStep) -> bool {
        target <= *self || self.next_steps().contains(&target)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// State of one registration form
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    step: WizardStep,
    category: Option<EventCategory>,
    events: Vec<Event>,
    event_id: Option<RecordId>,
    info: Option<PersonalInfo>,
    photo: Option<ProofImage>,
    max_photo_bytes: u64,
}

impl RegistrationWizard {
    pub fn new(max_photo_bytes: u64) -> Self {
        Self {
            step: WizardStep::ChooseCategory,
            category: None,
            events: Vec::new(),
            event_id: None,
            info: None,
            photo: None,
            max_photo_bytes,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn category(&self) -> Option<EventCategory> {
        self.category
    }

    pub fn event_id(&self) -> Option<&RecordId> {
        self.event_id.as_ref()
    }

    /// Events offered for the chosen category
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn move_to(&mut self, target: WizardStep) -> Result<()> {
        if !self.step.can_move_to(target) {
            return Err(CoconutError::InvalidStateTransition {
                from: self.step.to_string(),
                to: target.to_string(),
            });
        }
        self.step = target;
        Ok(())
    }

    /// Pick a category together with the events it currently offers.
    /// Any previously chosen event is forgotten.
    pub fn select_category(&mut self, category: EventCategory, events: Vec<Event>) -> Result<()> {
        self.step = WizardStep::ChooseCategory;
        self.category = Some(category);
        self.events = events;
        self.event_id = None;
        self.move_to(WizardStep::ChooseEvent)
    }

    /// Pick an event of the chosen category
    pub fn select_event(&mut self, id: &RecordId) -> Result<()> {
        let category = self.category.ok_or_else(|| CoconutError::InvalidStateTransition {
            from: self.step.to_string(),
            to: WizardStep::PersonalInfo.to_string(),
        })?;
        if !self.events.iter().any(|e| &e.id == id) {
            return Err(CoconutError::EventNotFound {
                category: category.label().to_string(),
                id: id.to_string(),
            });
        }
        if self.step > WizardStep::ChooseEvent {
            self.step = WizardStep::ChooseEvent;
        }
        self.move_to(WizardStep::PersonalInfo)?;
        self.event_id = Some(id.clone());
        Ok(())
    }

    /// Enter name, email, phone and university
    pub fn set_personal_info(&mut self, info: PersonalInfo) -> Result<()> {
        if self.step < WizardStep::PersonalInfo {
            return Err(CoconutError::InvalidStateTransition {
                from: self.step.to_string(),
                to: WizardStep::Photo.to_string(),
            });
        }
        let info = info.trimmed();
        info.validate()?;
        self.step = WizardStep::PersonalInfo;
        self.move_to(WizardStep::Photo)?;
        self.info = Some(info);
        Ok(())
    }

    /// Attach the proof photo
    pub fn attach_photo(&mut self, photo: ProofImage) -> Result<()> {
        if self.step < WizardStep::Photo {
            return Err(CoconutError::InvalidStateTransition {
                from: self.step.to_string(),
                to: WizardStep::Ready.to_string(),
            });
        }
        photo.validate(self.max_photo_bytes)?;
        self.step = WizardStep::Photo;
        self.move_to(WizardStep::Ready)?;
        self.photo = Some(photo);
        Ok(())
    }

    /// The finished form. Only available once every step is done.
    pub fn build_submission(&self) -> Result<RegistrationSubmission> {
        match (self.step, self.category, &self.info, &self.photo) {
            (WizardStep::Ready, Some(category), Some(info), Some(photo)) => Ok(RegistrationSubmission {
                category,
                event_id: self.event_id.clone(),
                info: info.clone(),
                photo: photo.clone(),
            }),
            _ => Err(CoconutError::Validation(format!(
                "Formulir belum lengkap (langkah saat ini: {})",
                self.step
            ))),
        }
    }
}
