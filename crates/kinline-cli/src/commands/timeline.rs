//! Timeline commands for CLI.

use std::path::Path;

use clap::{Args, Subcommand};
use kinline_core::{Config, Handle, Timeline, TimelineOptions};
use serde::Serialize;

use super::{open, split_list};

/// Options shared by every timeline subcommand. Unset values fall back to
/// the `[timeline]` section of the config file.
#[derive(Args)]
pub struct TimelineArgs {
    /// Comma-separated event types or categories for the subject
    #[arg(long)]
    events: Option<String>,
    /// Comma-separated relationship labels to expand to
    #[arg(long)]
    relatives: Option<String>,
    /// Comma-separated event types or categories for relatives
    #[arg(long)]
    relative_events: Option<String>,
    /// Date bounds, e.g. "1900/01/01-1950/12/31"
    #[arg(long)]
    dates: Option<String>,
    /// Age precision (1 = years, 2 = years and months, 3 = with days)
    #[arg(long)]
    precision: Option<u8>,
    /// Keep only the first N events
    #[arg(long)]
    max_events: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Timeline of a person and their relatives
    Person {
        /// Person handle
        handle: String,
        /// Generations of ancestors to expand
        #[arg(long)]
        ancestors: Option<u32>,
        /// Generations of offspring to expand
        #[arg(long)]
        offspring: Option<u32>,
        #[command(flatten)]
        args: TimelineArgs,
    },
    /// Timeline of a family's parents and children
    Family {
        /// Family handle
        handle: String,
        /// Person the members are labeled relative to
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        ancestors: Option<u32>,
        #[arg(long)]
        offspring: Option<u32>,
        #[command(flatten)]
        args: TimelineArgs,
    },
    /// Timeline of an arbitrary set of people and families
    Group {
        /// Person handles (repeatable)
        #[arg(long = "person")]
        people: Vec<String>,
        /// Family handles (repeatable)
        #[arg(long = "family")]
        families: Vec<String>,
        #[command(flatten)]
        args: TimelineArgs,
    },
}

#[derive(Serialize)]
struct Row<'a> {
    date: String,
    age: String,
    event: &'a str,
    event_handle: &'a Handle,
    person: String,
    person_handle: &'a Handle,
    relation: &'a str,
    description: &'a str,
}

fn options(config: &Config, args: &TimelineArgs) -> Result<TimelineOptions, Box<dyn std::error::Error>> {
    let mut options = TimelineOptions::from_config(&config.timeline)?;
    if let Some(events) = &args.events {
        options.events = split_list(events);
    }
    if let Some(relatives) = &args.relatives {
        options.relatives = split_list(relatives);
    }
    if let Some(relative_events) = &args.relative_events {
        options.relative_events = split_list(relative_events);
    }
    if let Some(dates) = &args.dates {
        options.range = kinline_core::DateRange::parse(dates)?;
    }
    if let Some(precision) = args.precision {
        options.precision = precision;
    }
    if args.max_events.is_some() {
        options.max_events = args.max_events;
    }
    Ok(options)
}

/// Print the timeline. Ages count from `anchor`'s birth; without an anchor
/// each row uses its own person's birth.
fn print(
    timeline: &Timeline<'_>,
    anchor: Option<&Handle>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let anchor_birth = anchor.map(|h| timeline.subject_birth(h)).transpose()?;
    let rows: Vec<Row<'_>> = timeline
        .events()
        .into_iter()
        .map(|item| Row {
            date: item.event.date.to_string(),
            age: match &anchor_birth {
                Some(birth) => timeline.age(birth.as_ref(), &item.event.date),
                None => timeline.age(
                    timeline.birth_date(&item.person.handle).as_ref(),
                    &item.event.date,
                ),
            },
            event: item.event.event_type.xml_str(),
            event_handle: &item.event.handle,
            person: item.person.primary_name.to_string(),
            person_handle: &item.person.handle,
            relation: &item.relation,
            description: &item.event.description,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("no events");
        return Ok(());
    }
    for row in rows {
        let age = if row.age.is_empty() {
            String::new()
        } else {
            format!(" ({})", row.age)
        };
        println!(
            "{:<10}  {:<14} {}{}  [{}]",
            row.date, row.event, row.person, age, row.relation
        );
    }
    Ok(())
}

pub fn run(store: Option<&Path>, action: TimelineAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = open(store)?;

    match action {
        TimelineAction::Person {
            handle,
            ancestors,
            offspring,
            args,
        } => {
            let handle = Handle::from(handle.as_str());
            let mut timeline = Timeline::new(db.as_ref(), options(&config, &args)?)?;
            timeline.set_person(
                &handle,
                ancestors.unwrap_or(config.timeline.ancestors),
                offspring.unwrap_or(config.timeline.offspring),
            )?;
            print(&timeline, Some(&handle), args.json)?;
        }
        TimelineAction::Family {
            handle,
            reference,
            ancestors,
            offspring,
            args,
        } => {
            let reference = reference.as_deref().map(Handle::from);
            let mut options = options(&config, &args)?;
            options.reference_person = reference.clone();
            let mut timeline = Timeline::new(db.as_ref(), options)?;
            timeline.set_family(
                &Handle::from(handle.as_str()),
                ancestors.unwrap_or(config.timeline.ancestors),
                offspring.unwrap_or(config.timeline.offspring),
            )?;
            print(&timeline, reference.as_ref(), args.json)?;
        }
        TimelineAction::Group {
            people,
            families,
            args,
        } => {
            let people: Vec<Handle> = people.iter().map(|h| Handle::from(h.as_str())).collect();
            let families: Vec<Handle> = families.iter().map(|h| Handle::from(h.as_str())).collect();
            let mut timeline = Timeline::new(db.as_ref(), options(&config, &args)?)?;
            timeline.set_group(&people, &families)?;
            print(&timeline, None, args.json)?;
        }
    }
    Ok(())
}
