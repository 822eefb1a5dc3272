use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cloudbrain::types::ContentType;

/// Save links to a CloudBrain collection
#[derive(Parser)]
#[command(name = "cloudbrain")]
#[command(about = "Add and check CloudBrain content from the command line", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the API base url
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the auth token
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct ContentArgs {
    #[arg(short, long, default_value = "")]
    pub title: String,

    #[arg(short, long, default_value = "")]
    pub link: String,

    /// youtube, twitter, image, audio, medium or instagram
    #[arg(short = 'k', long = "type", value_name = "TYPE", default_value = "youtube")]
    pub content_type: ContentType,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and upload a link
    Add(ContentArgs),
    /// Validate a link without sending it
    Check(ContentArgs),
    /// List content types
    Types,
}
