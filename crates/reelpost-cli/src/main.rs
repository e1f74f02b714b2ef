//! Reelpost CLI: drive the publish wizard from the command line.
//!
//! Backends are configured from the environment, optionally through a `.env` file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use reelpost_cli::{
    build_repository, build_workflow, load_thumbnail, load_video, report_failure, TimingsView,
};
use reelpost_core::models::{AuthUser, VideoUploadState, Visibility};
use reelpost_core::{AppError, Config};
use reelpost_infra::telemetry::DEFAULT_FILTER;
use reelpost_infra::{init_telemetry, shutdown_telemetry};
use reelpost_wizard::{AnimationConfig, ConfirmOutcome, FormUpdate, StepView, WizardSession};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "reelpost", about = "Publish videos through the Reelpost wizard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the wizard and publish a video whose upload has already finished
    Publish {
        /// Download URL of the uploaded video
        #[arg(long)]
        video_url: String,
        /// Local copy of the video, shown as a preview while the wizard runs
        #[arg(long)]
        video: Option<PathBuf>,
        /// Thumbnail image to upload
        #[arg(long)]
        thumbnail: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// public, private or unlisted
        #[arg(long, default_value = "public")]
        visibility: Visibility,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        username: String,
        /// Profile picture URL of the author
        #[arg(long)]
        profile_pic: Option<String>,
        /// Reuse an existing post id (the record is replaced)
        #[arg(long)]
        post_id: Option<Uuid>,
    },
    /// Print a stored record
    Show {
        /// Post UUID
        post_id: Uuid,
    },
    /// Print the step indicator animation timings
    Timings,
}

fn print_json(value: &impl Serialize) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    init_telemetry(config.log_format(), DEFAULT_FILTER)?;
    tracing::debug!(environment = %config.environment(), "Configuration loaded");

    let result = run(cli.command, &config).await;
    if let Err(err) = &result {
        report_failure(err);
    }
    shutdown_telemetry();
    result.map_err(anyhow::Error::from)
}

async fn run(command: Commands, config: &Config) -> Result<(), AppError> {
    let animation = AnimationConfig::new(config.animation_speed_multiplier())
        .map_err(|e| AppError::Config(e.to_string()))?;

    match command {
        Commands::Publish {
            video_url,
            video,
            thumbnail,
            title,
            description,
            visibility,
            user_id,
            username,
            profile_pic,
            post_id,
        } => {
            let thumbnail = load_thumbnail(&thumbnail).await?;
            let workflow = Arc::new(build_workflow(config).await?);

            let mut user = AuthUser::new(user_id, username);
            if let Some(url) = profile_pic {
                user = user.with_profile_picture(url);
            }

            let (_video_state, video_rx) = watch::channel(VideoUploadState::ready(video_url));
            let mut session =
                WizardSession::new(workflow, Some(user), video_rx).with_animation(animation);
            if let Some(id) = post_id {
                session = session.with_post_id(id);
            }
            if let Some(path) = video {
                let asset = load_video(&path).await?;
                let preview = session.set_video(&asset)?;
                tracing::info!(preview = %preview, "Video preview ready");
            }

            session.update_fields(FormUpdate::new().title(title).description(description));
            loop {
                match session.confirm().await? {
                    ConfirmOutcome::Advanced { to: StepView::Thumbnail } => {
                        session.update_fields(FormUpdate::new().thumbnail(thumbnail.clone()));
                    }
                    ConfirmOutcome::Advanced { to: StepView::Visibility } => {
                        session.update_fields(FormUpdate::new().visibility(visibility));
                    }
                    ConfirmOutcome::Advanced { .. } => {}
                    ConfirmOutcome::Published(record) => {
                        print_json(&record)?;
                        break;
                    }
                }
            }
        }
        Commands::Show { post_id } => {
            let records = build_repository(config).await?;
            let record = records
                .get(post_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Post {}", post_id)))?;
            print_json(&record)?;
        }
        Commands::Timings => {
            print_json(&TimingsView::new(
                animation.speed_multiplier(),
                animation.timings(),
            ))?;
        }
    }

    Ok(())
}
