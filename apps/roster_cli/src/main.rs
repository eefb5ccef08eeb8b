use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{AppController, AppPhase, EventOutcome, HttpRosterApi, PageEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, validate_server_url};

#[derive(Parser, Debug)]
#[command(about = "Browse activities and manage their participants")]
struct Args {
    /// Overrides the server url from config and environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every activity with its participants.
    List {
        /// Emit page markup instead of plain text.
        #[arg(long)]
        html: bool,
    },
    /// Sign a participant up for an activity.
    Enroll {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant from an activity.
    Withdraw {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let server_url = validate_server_url(&settings.server_url)?;
    let api = HttpRosterApi::with_timeout(server_url.as_str(), settings.request_timeout())
        .context("failed to build roster api client")?;
    info!(server_url = %server_url, "roster client starting");

    let app = AppController::new(Arc::new(api));
    let outcome = app.handle(PageEvent::Loaded).await?;
    if outcome == EventOutcome::Loaded(AppPhase::LoadFailed) {
        println!("{}", app.page().await);
        return Ok(ExitCode::FAILURE);
    }

    let code = match args.command {
        Command::List { html } => {
            let page = app.page().await;
            if html {
                println!("{}", page.to_html().context("failed to render page markup")?);
            } else {
                print!("{page}");
            }
            ExitCode::SUCCESS
        }
        Command::Enroll { activity, email } => {
            app.fill_form(&activity, &email).await;
            let outcome = match app.handle(PageEvent::FormSubmitted).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    eprintln!("error: {err}");
                    return Ok(ExitCode::from(2));
                }
            };
            report(&app, &outcome).await
        }
        Command::Withdraw { activity, email } => {
            let outcome = app
                .handle(PageEvent::WithdrawActivated {
                    activity: activity.clone(),
                    participant: email.clone(),
                })
                .await?;
            if outcome == EventOutcome::Ignored {
                eprintln!("error: {email} is not listed under {activity}");
                return Ok(ExitCode::from(2));
            }
            report(&app, &outcome).await
        }
    };

    Ok(code)
}

async fn report(app: &AppController, outcome: &EventOutcome) -> ExitCode {
    println!("{}", app.notification().await);
    println!();
    print!("{}", app.page().await);
    match outcome {
        EventOutcome::Mutation(mutation) if mutation.requires_refetch() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
