use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tracing::level_filters::LevelFilter;

use crate::{
    config::SkillConfig,
    skill::{
        request::SkillEvent,
        response::{Card, SkillResponse},
        Skill, GET_THIS_WEEK, GET_TIME_ENTRY_ON_DATE, GET_WEEK,
    },
    tcube::{api::HttpTimeSheetApi, client::TimeSheetClient},
    utils::{clock::DefaultClock, logging::enable_logging},
};

#[derive(Parser, Debug)]
#[command(name = "T Cube skill", version, long_about = None)]
#[command(about = "Voice assistant skill for T Cube time entries", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable verbose logging")]
    log: bool,
    #[arg(long = "log-dir", help = "Also write logs into a daily rolling file in this directory")]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Handle a single voice platform event and print the response envelope")]
    Handle {
        #[arg(long, help = "Event json file. Reads stdin when omitted")]
        event: Option<PathBuf>,
    },
    #[command(
        about = "Describe the week containing a date. Uses AUTH_TOKEN_OVERRIDE for authentication"
    )]
    Week {
        #[arg(long, help = "Any date of the week, YYYY-MM-DD. Defaults to this week")]
        date: Option<NaiveDate>,
    },
    #[command(about = "Describe a single day. Uses AUTH_TOKEN_OVERRIDE for authentication")]
    Day {
        #[arg(long, help = "YYYY-MM-DD")]
        date: NaiveDate,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(args.log_dir.as_deref(), logging_level)?;

    let config = SkillConfig::from_env();
    let client = TimeSheetClient::new(HttpTimeSheetApi::new(config.clone()), Box::new(DefaultClock));
    let skill = Skill::new(config, client);

    match args.commands {
        Commands::Handle { event } => {
            let event = read_event(event.as_deref()).await?;
            let response = skill.handle(&event).await?;
            println!("{}", serde_json::to_string_pretty(&response.to_envelope())?);
        }
        Commands::Week { date } => {
            let event = match date {
                Some(date) => local_intent(GET_WEEK, Some(date))?,
                None => local_intent(GET_THIS_WEEK, None)?,
            };
            print_response(&skill.handle(&event).await?);
        }
        Commands::Day { date } => {
            let event = local_intent(GET_TIME_ENTRY_ON_DATE, Some(date))?;
            print_response(&skill.handle(&event).await?);
        }
    }
    Ok(())
}

async fn read_event(path: Option<&Path>) -> Result<SkillEvent> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event {path:?}"))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Event is not a valid skill request")
}

/// Builds the event the platform would send for `intent`, without a session token.
fn local_intent(intent: &str, date: Option<NaiveDate>) -> Result<SkillEvent> {
    let mut slots = serde_json::Map::new();
    if let Some(date) = date {
        slots.insert(
            "Date".into(),
            json!({"name": "Date", "value": date.format("%Y-%m-%d").to_string()}),
        );
    }
    Ok(serde_json::from_value(json!({
        "request": {
            "type": "IntentRequest",
            "intent": {"name": intent, "slots": slots}
        }
    }))?)
}

fn print_response(response: &SkillResponse) {
    println!("{}", response.speech);
    if let Some(Card::Simple { title, content }) = &response.card {
        println!("\n{title}{content}");
    }
}
