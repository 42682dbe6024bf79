//! `agenda` CLI — manage a JSON-file-backed personal agenda.
//!
//! ## Usage
//!
//! ```sh
//! # Add a one-off event
//! agenda add -f my.json --title "Dentist" --start 2024-01-08T14:00 --minutes 45
//!
//! # Add a daily standup that skips Jan 3 and stops after 10 occurrences
//! agenda add -f my.json --title "Standup" --start 2024-01-01T09:30 --minutes 15 \
//!     --repeat daily --count 10 --except 2024-01-03
//!
//! # What happens on a given day?
//! agenda day -f my.json 2024-01-02
//!
//! # Find events by exact title
//! agenda find -f my.json Standup
//!
//! # Would a new event fit? (exit code 0 = free, 1 = busy)
//! agenda check -f my.json --start 2024-01-01T10:30 --minutes 60
//!
//! # Free slots on a day, optionally clamped to working hours
//! agenda free -f my.json 2024-01-01 --from 08:00 --to 18:00
//! ```

use agenda_core::{Agenda, Event, Frequency};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use clap::{Parser, Subcommand};
use std::process;

#[derive(Parser)]
#[command(name = "agenda", version, about = "Personal agenda with recurring events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event to the agenda file
    Add {
        /// Agenda file (created if missing)
        #[arg(short, long)]
        file: String,
        /// Event title
        #[arg(long)]
        title: String,
        /// Start date-time, e.g. 2024-01-01T10:00
        #[arg(long)]
        start: String,
        /// Duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        minutes: i64,
        /// Repetition frequency: daily, weekly, or monthly
        #[arg(long)]
        repeat: Option<String>,
        /// Inclusive termination date (requires --repeat)
        #[arg(long, requires = "repeat", conflicts_with = "count")]
        until: Option<String>,
        /// Number of occurrences before termination (requires --repeat)
        #[arg(long, requires = "repeat")]
        count: Option<u32>,
        /// Exception date on which the event does not occur (repeatable)
        #[arg(long = "except", requires = "repeat")]
        except: Vec<String>,
    },
    /// List the events occurring on a given day, as JSON
    Day {
        /// Agenda file
        #[arg(short, long)]
        file: String,
        /// Day to query, e.g. 2024-01-02
        date: String,
    },
    /// List the events with an exact title, as JSON
    Find {
        /// Agenda file
        #[arg(short, long)]
        file: String,
        /// Title to search for
        title: String,
    },
    /// Check whether a candidate event fits without overlap
    Check {
        /// Agenda file
        #[arg(short, long)]
        file: String,
        /// Candidate start date-time, e.g. 2024-01-01T10:30
        #[arg(long)]
        start: String,
        /// Candidate duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        minutes: i64,
    },
    /// List free slots on a given day, as JSON
    Free {
        /// Agenda file
        #[arg(short, long)]
        file: String,
        /// Day to query, e.g. 2024-01-01
        date: String,
        /// Window start time (default 00:00)
        #[arg(long)]
        from: Option<String>,
        /// Window end time (default end of day)
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            file,
            title,
            start,
            minutes,
            repeat,
            until,
            count,
            except,
        } => {
            let event = build_event(&title, &start, minutes, repeat.as_deref(), until.as_deref(), count, &except)?;
            let mut agenda = load_agenda(&file)?;
            let before = agenda.len();
            agenda.add_event(event);
            if agenda.len() == before {
                println!("Duplicate event, agenda unchanged");
            } else {
                save_agenda(&file, &agenda)?;
                println!("Added \"{}\" ({} event(s) total)", title, agenda.len());
            }
        }
        Commands::Day { file, date } => {
            let agenda = load_agenda(&file)?;
            let day = parse_date(&date)?;
            print_json(&agenda.events_in_day(day))?;
        }
        Commands::Find { file, title } => {
            let agenda = load_agenda(&file)?;
            print_json(&agenda.find_by_title(&title))?;
        }
        Commands::Check {
            file,
            start,
            minutes,
        } => {
            let agenda = load_agenda(&file)?;
            let candidate = Event::new("candidate", parse_datetime(&start)?, TimeDelta::minutes(minutes))
                .context("Invalid candidate event")?;
            if agenda.is_free_for(&candidate) {
                println!("free");
            } else {
                println!("busy");
                process::exit(1);
            }
        }
        Commands::Free {
            file,
            date,
            from,
            to,
        } => {
            let agenda = load_agenda(&file)?;
            let day = parse_date(&date)?;
            let window_start = day.and_time(match from {
                Some(t) => parse_time(&t)?,
                None => NaiveTime::MIN,
            });
            let window_end = match to {
                Some(t) => day.and_time(parse_time(&t)?),
                None => day
                    .succ_opt()
                    .context("Day out of range")?
                    .and_time(NaiveTime::MIN),
            };
            print_json(&agenda.free_slots_in(window_start, window_end))?;
        }
    }

    Ok(())
}

/// Build the event described by the `add` arguments.
///
/// Without `--repeat` the event is a single occurrence; with `--repeat` it
/// recurs, terminated by `--until` or `--count` when given.
fn build_event(
    title: &str,
    start: &str,
    minutes: i64,
    repeat: Option<&str>,
    until: Option<&str>,
    count: Option<u32>,
    except: &[String],
) -> Result<Event> {
    let start = parse_datetime(start)?;
    let duration = TimeDelta::minutes(minutes);

    let mut event = match repeat {
        None => Event::new(title, start, duration)?,
        Some(raw) => {
            let frequency: Frequency = raw.parse()?;
            match (until, count) {
                (Some(date), None) => {
                    Event::terminated_on(title, start, duration, frequency, parse_date(date)?)?
                }
                (None, Some(n)) => Event::terminated_after(title, start, duration, frequency, n)?,
                (None, None) => Event::repetitive(title, start, duration, frequency)?,
                // clap's conflicts_with rules this out
                (Some(_), Some(_)) => unreachable!(),
            }
        }
    };

    for date in except {
        event.add_exception(parse_date(date)?);
    }

    Ok(event)
}

fn load_agenda(path: &str) -> Result<Agenda> {
    if !std::path::Path::new(path).exists() {
        return Ok(Agenda::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read agenda file: {}", path))?;
    let events: Vec<Event> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse agenda file: {}", path))?;
    Ok(Agenda::from_events(events))
}

fn save_agenda(path: &str, agenda: &Agenda) -> Result<()> {
    let events: Vec<&Event> = agenda.events().collect();
    let json = serde_json::to_string_pretty(&events)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write agenda file: {}", path))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {}", s))
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .with_context(|| format!("Invalid date-time: {}", s))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").with_context(|| format!("Invalid time: {}", s))
}
