mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands, ContentArgs};
use cloudbrain::config::{default_config_path, Config};
use cloudbrain::form::{FormState, NoticeLevel};
use cloudbrain::submit::SubmitOutcome;
use cloudbrain::types::ContentType;
use cloudbrain::validation::ValidationErrors;
use cloudbrain::CloudBrain;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init() {
        eprintln!("tracing init failed: {e}");
    }

    let cli = Cli::parse();
    let default_config = default_config_path();
    match run(cli, default_config.as_deref(), |key| std::env::var(key).ok()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run<F>(cli: Cli, default_config: Option<&Path>, env: F) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match cli.command {
        Commands::Types => {
            for line in type_lines() {
                println!("{line}");
            }
            Ok(true)
        }
        Commands::Check(args) => {
            let form = form_from(args);
            match cloudbrain::validation::validate(form.title(), form.link(), form.content_type()) {
                Ok(()) => {
                    println!("ok");
                    Ok(true)
                }
                Err(errors) => {
                    print_errors(&errors);
                    Ok(false)
                }
            }
        }
        Commands::Add(args) => {
            let mut config = Config::load_with(cli.config.as_deref(), default_config, env)?;
            if let Some(u) = cli.api_url.as_deref() { config.set_api_url(u)?; }
            if let Some(t) = cli.token { config.token = Some(cloudbrain::api::AuthToken::new(t)); }

            let brain = CloudBrain::connect(&config)?;
            tracing::debug!(endpoint = %brain.endpoint(), "connected");
            let mut form = form_from(args);
            let outcome = brain.add_content(&mut form).await;

            for notice in form.take_notices() {
                match notice.level {
                    NoticeLevel::Success => println!("{}", notice.message),
                    NoticeLevel::Warning => eprintln!("warning: {}", notice.message),
                }
            }
            Ok(match outcome {
                SubmitOutcome::Created(_) => true,
                SubmitOutcome::Rejected(errors) => {
                    print_errors(&errors);
                    false
                }
                SubmitOutcome::Failed { error, .. } => {
                    eprintln!("  {error}");
                    false
                }
                SubmitOutcome::Busy => false,
            })
        }
    }
}

fn type_lines() -> Vec<String> {
    ContentType::ALL.iter().map(|t| format!("{:<10} {}", t.as_str(), t.label())).collect()
}

fn form_from(args: ContentArgs) -> FormState {
    FormState::with_values(args.title, args.link, Some(args.content_type))
}

fn print_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        eprintln!("{field}: {message}");
    }
}
