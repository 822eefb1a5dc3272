pub mod api;
pub mod config;
pub mod form;
pub mod submit;
pub mod types;
pub mod validation;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::api::{ApiError, AuthToken, ContentApi, HttpContentApi};
    pub use crate::config::Config;
    pub use crate::form::{Command, FormEvent, FormState, Notice, NoticeLevel, Phase};
    pub use crate::submit::{SubmitOutcome, Submitter};
    pub use crate::types::{ContentItem, ContentType};
    pub use crate::validation::{validate, Field, ValidationErrors};
    pub use crate::CloudBrain;
}

use anyhow::{Context, Result};

use crate::api::HttpContentApi;
use crate::config::Config;
use crate::form::FormState;
use crate::submit::{SubmitOutcome, Submitter};

/// Async library entry point. Owns an HTTP client bound to the configured
/// backend and the caller's credential.
pub struct CloudBrain {
    submitter: Submitter<HttpContentApi>,
}

impl CloudBrain {
    /// Build a client from `config`. Fails when no auth token is configured.
    pub fn connect(config: &Config) -> Result<Self> {
        let token = config.token.clone().context("no auth token configured (set CLOUDBRAIN_TOKEN or pass --token)")?;
        let api = HttpContentApi::new(&config.api_url, config.timeout())?;
        Ok(Self { submitter: Submitter::new(api, token) })
    }

    pub fn endpoint(&self) -> &url::Url { self.submitter.api().endpoint() }

    /// Validate and send the form's current values.
    pub async fn add_content(&self, form: &mut FormState) -> SubmitOutcome {
        self.submitter.submit(form).await
    }
}
