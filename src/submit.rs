//! Drives one submission of the content form through the remote API.

use crate::api::{ApiError, AuthToken, ContentApi};
use crate::form::{Command, FormEvent, FormState};
use crate::types::ContentItem;
use crate::validation::ValidationErrors;

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected(ValidationErrors),
    /// A submission is already in flight for this form.
    Busy,
    Created(ContentItem),
    /// The request failed. The item stays in the form's local list.
    Failed { item: ContentItem, error: ApiError },
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool { matches!(self, SubmitOutcome::Created(_)) }
}

pub struct Submitter<A> {
    api: A,
    token: AuthToken,
}

impl<A: ContentApi> Submitter<A> {
    pub fn new(api: A, token: AuthToken) -> Self { Self { api, token } }

    pub fn api(&self) -> &A { &self.api }

    pub async fn submit(&self, form: &mut FormState) -> SubmitOutcome {
        if form.is_busy() { return SubmitOutcome::Busy; }

        let item = match form.update(FormEvent::SubmitRequested) {
            Some(Command::CreateContent(item)) => item,
            None => {
                tracing::debug!(errors = %form.errors(), "content form rejected");
                return SubmitOutcome::Rejected(form.errors().clone());
            }
        };

        let in_flight = InFlight { form, settled: false };
        match self.api.create_content(&item, &self.token).await {
            Ok(()) => {
                tracing::info!(title = %item.title, kind = %item.content_type, "content added");
                in_flight.settle(FormEvent::SubmitSucceeded);
                SubmitOutcome::Created(item)
            }
            Err(error) => {
                tracing::warn!(%error, title = %item.title, "error adding content");
                in_flight.settle(FormEvent::SubmitFailed(error.to_string()));
                SubmitOutcome::Failed { item, error }
            }
        }
    }
}

/// Holds the form while a request is outstanding. Dropping it unsettled
/// (the submit future was dropped mid-request) puts the form back to Idle.
struct InFlight<'a> {
    form: &'a mut FormState,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, event: FormEvent) {
        self.settled = true;
        self.form.update(event);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled { return; }
        tracing::warn!(title = %self.form.title(), "content submission cancelled");
        self.form.update(FormEvent::SubmitCancelled);
    }
}
