//! Status ranking commands for CLI.

use std::path::Path;

use clap::Subcommand;
use kinline_core::{Config, Handle, PrimaryObject, StatusReport};

use super::open;

#[derive(Subcommand)]
pub enum StatusAction {
    /// Rank a person
    Person {
        /// Person handle
        handle: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank a family
    Family {
        /// Family handle
        handle: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print(report: &StatusReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    match &report.rank {
        Some(rank) => println!("{} (tier {})", rank.text, rank.tier),
        None => println!("Confidence Ranking: none"),
    }
    for alert in &report.citation_alerts {
        println!("Citation Alert: {}", alert.text);
    }
    if let Some(missing) = &report.missing_text {
        println!("{missing}");
    }
    Ok(())
}

pub fn run(store: Option<&Path>, action: StatusAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = open(store)?;

    let (object, json) = match action {
        StatusAction::Person { handle, json } => (
            PrimaryObject::Person(db.person(&Handle::from(handle.as_str()))?),
            json,
        ),
        StatusAction::Family { handle, json } => (
            PrimaryObject::Family(db.family(&Handle::from(handle.as_str()))?),
            json,
        ),
    };
    let report = StatusReport::evaluate(db.as_ref(), &object, &config.status)?;
    print(&report, json)
}
