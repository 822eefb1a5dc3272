//! Content form state and its event transitions.
//!
//! The form does no I/O. Callers feed it [`FormEvent`]s and carry out the
//! [`Command`] it hands back, then report the result as another event.

use crate::types::{ContentItem, ContentType};
use crate::validation::{self, Field, ValidationErrors};

pub const ADDED_MESSAGE: &str = "Content added successfully";
pub const ADD_FAILED_MESSAGE: &str = "There was an error adding the content. Please try again.";
pub const CANCELLED_REASON: &str = "submission cancelled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
}

/// Transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self { Self { level: NoticeLevel::Success, message: message.into() } }
    pub fn warning(message: impl Into<String>) -> Self { Self { level: NoticeLevel::Warning, message: message.into() } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    TitleChanged(String),
    LinkChanged(String),
    TypeSelected(ContentType),
    TypeCleared,
    SubmitRequested,
    SubmitSucceeded,
    SubmitFailed(String),
    /// The request was abandoned before it finished.
    SubmitCancelled,
}

/// Side effect the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateContent(ContentItem),
}

#[derive(Debug, Clone)]
pub struct FormState {
    title: String,
    link: String,
    content_type: Option<ContentType>,
    errors: ValidationErrors,
    phase: Phase,
    items: Vec<ContentItem>,
    notices: Vec<Notice>,
    last_error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self { Self::new() }
}

impl FormState {
    /// Empty form with the default category selected.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            link: String::new(),
            content_type: Some(ContentType::default()),
            errors: ValidationErrors::new(),
            phase: Phase::Idle,
            items: Vec::new(),
            notices: Vec::new(),
            last_error: None,
        }
    }

    pub fn with_values(title: impl Into<String>, link: impl Into<String>, content_type: Option<ContentType>) -> Self {
        Self { title: title.into(), link: link.into(), content_type, ..Self::new() }
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn link(&self) -> &str { &self.link }
    pub fn content_type(&self) -> Option<ContentType> { self.content_type }
    pub fn errors(&self) -> &ValidationErrors { &self.errors }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn is_busy(&self) -> bool { self.phase == Phase::Submitting }

    /// Everything added from this form, including items whose request failed.
    pub fn items(&self) -> &[ContentItem] { &self.items }

    /// Items of one category, or all of them for `None`.
    pub fn items_of_type(&self, filter: Option<ContentType>) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(move |item| filter.map_or(true, |t| item.content_type == t))
    }

    /// Why the most recent submission did not complete, if it didn't.
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    pub fn take_notices(&mut self) -> Vec<Notice> { std::mem::take(&mut self.notices) }

    pub fn update(&mut self, event: FormEvent) -> Option<Command> {
        match event {
            FormEvent::TitleChanged(title) => { self.title = title; None }
            FormEvent::LinkChanged(link) => { self.link = link; None }
            FormEvent::TypeSelected(t) => {
                self.content_type = Some(t);
                self.errors.remove(Field::Type);
                None
            }
            FormEvent::TypeCleared => { self.content_type = None; None }
            FormEvent::SubmitRequested => self.begin_submit(),
            FormEvent::SubmitSucceeded => {
                if self.phase != Phase::Submitting { return None; }
                self.phase = Phase::Idle;
                self.title.clear();
                self.link.clear();
                self.errors.clear();
                self.last_error = None;
                self.notices.push(Notice::success(ADDED_MESSAGE));
                None
            }
            FormEvent::SubmitFailed(reason) => {
                if self.phase != Phase::Submitting { return None; }
                // optimistic item is kept
                self.phase = Phase::Idle;
                self.last_error = Some(reason);
                self.notices.push(Notice::warning(ADD_FAILED_MESSAGE));
                None
            }
            FormEvent::SubmitCancelled => {
                if self.phase != Phase::Submitting { return None; }
                self.phase = Phase::Idle;
                self.last_error = Some(CANCELLED_REASON.to_string());
                None
            }
        }
    }

    fn begin_submit(&mut self) -> Option<Command> {
        if self.phase == Phase::Submitting { return None; }
        match validation::validate(&self.title, &self.link, self.content_type) {
            Err(errors) => {
                self.errors = errors;
                None
            }
            Ok(()) => {
                self.errors.clear();
                let content_type = self.content_type?;
                let item = ContentItem::new(self.title.clone(), self.link.clone(), content_type);
                self.phase = Phase::Submitting;
                self.items.push(item.clone());
                Some(Command::CreateContent(item))
            }
        }
    }
}
