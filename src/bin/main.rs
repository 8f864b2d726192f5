// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use event_booking_rs::{
    BookingOutcome, CancelOutcome, ChannelNotifier, Customer, Engine, EventConfig, SeatNumber,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Event Booking - Allocate seats for a single event
///
/// Runs a booking script against a fresh event and writes the final bookings
/// and waitlist to stdout as CSV. Without a script, replays the built-in
/// walkthrough.
#[derive(Parser, Debug)]
#[command(name = "event-booking")]
#[command(about = "Books seats for an event from a CSV script", long_about = None)]
struct Args {
    /// Path to CSV file with booking commands
    ///
    /// Expected format: action,name,loyalty,vip,seat
    /// Example: cargo run -- script.csv > report.csv
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Number of seats in the venue
    #[arg(long, default_value_t = 5)]
    seats: u32,

    /// Price of the first ticket
    #[arg(long, default_value = "100.0")]
    base_price: Decimal,

    /// Delay applied before delivering each notification, in milliseconds
    #[arg(long, default_value_t = 0)]
    notify_delay_ms: u64,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let notifier = match ChannelNotifier::spawn(
        Duration::from_millis(args.notify_delay_ms),
        |notification| tracing::info!("Notification: {notification}"),
    ) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            eprintln!("Error starting notification worker: {}", e);
            process::exit(1);
        }
    };

    let config = EventConfig::new(args.seats, args.base_price);
    let engine = match Engine::with_notifier(config, notifier.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid event configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => run_script(&engine, BufReader::new(file)),
            Err(e) => {
                eprintln!("Error opening file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            demo_script().into_iter().for_each(|command| apply(&engine, command));
            Ok(())
        }
    };
    if let Err(e) = result {
        eprintln!("Error processing script: {}", e);
        process::exit(1);
    }

    // Deliver outstanding notifications before the report.
    notifier.shutdown();

    if let Err(e) = write_report(&engine, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// A single step of a booking script.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Book {
        name: String,
        loyalty: i64,
        vip: bool,
    },
    Cancel(SeatNumber),
}

/// The walkthrough: seven customers for five seats, then Bob cancels.
fn demo_script() -> Vec<Command> {
    let book = |name: &str, loyalty, vip| Command::Book {
        name: name.to_string(),
        loyalty,
        vip,
    };
    vec![
        book("Alice", 120, false),
        book("Bob", 90, false),
        book("Charlie", 150, true),
        book("Diana", 70, false),
        book("Eve", 100, false),
        book("Frank", 80, false),
        book("Grace", 110, true),
        Command::Cancel(SeatNumber(2)),
    ]
}

/// Raw CSV record matching the script format.
///
/// Fields: `action, name, loyalty, vip, seat`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    action: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    loyalty: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    vip: Option<bool>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    seat: Option<u32>,
}

impl CsvRecord {
    /// Converts a CSV record to a command.
    ///
    /// Returns `None` for unknown actions or a cancel without a seat. A booking
    /// without name, loyalty or VIP columns defaults to an empty name, 0 and
    /// non-VIP.
    fn into_command(self) -> Option<Command> {
        match self.action.to_lowercase().as_str() {
            "book" => {
                Some(Command::Book {
                    name: self.name.unwrap_or_default(),
                    loyalty: self.loyalty.unwrap_or(0),
                    vip: self.vip.unwrap_or(false),
                })
            }
            "cancel" => Some(Command::Cancel(SeatNumber(self.seat?))),
            _ => None,
        }
    }
}

/// Runs booking commands from a CSV reader.
///
/// Rows are streamed one at a time. Malformed rows and unknown actions are
/// logged and skipped.
///
/// # CSV Format
///
/// ```csv
/// action,name,loyalty,vip,seat
/// book,Alice,120,false,
/// book,Charlie,150,true,
/// cancel,,,,1
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
fn run_script<R: Read>(engine: &Engine, reader: R) -> Result<(), csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                let Some(command) = record.into_command() else {
                    tracing::warn!("skipping invalid booking command");
                    continue;
                };
                apply(engine, command);
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed row");
            }
        }
    }

    Ok(())
}

/// Applies one command and logs its outcome.
fn apply(engine: &Engine, command: Command) {
    match command {
        Command::Book { name, loyalty, vip } => match engine.book(name, loyalty, vip) {
            BookingOutcome::Confirmed {
                seat,
                price,
                customer,
            } => tracing::info!(
                "Seat booked successfully for {} (Seat No: {}) at price: {}",
                customer.name(),
                seat,
                price.round_dp(2)
            ),
            BookingOutcome::Waitlisted { customer, .. } => tracing::info!(
                "No seats available. Adding {} to the waitlist.",
                customer.name()
            ),
        },
        Command::Cancel(seat) => match engine.cancel(seat) {
            CancelOutcome::NotFound { seat } => {
                tracing::info!("Seat number {} is not booked yet.", seat)
            }
            CancelOutcome::Cancelled {
                seat,
                cancelled,
                promoted,
            } => {
                tracing::info!(
                    "Booking canceled for {} (Seat No: {})",
                    cancelled.name(),
                    seat
                );
                if let Some(promoted) = promoted {
                    tracing::info!(
                        "{} from the waitlist has been assigned Seat No: {}",
                        promoted.name(),
                        seat
                    );
                }
            }
        },
    }
}

/// One line of the final report.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    list: &'static str,
    name: &'a str,
    seat: Option<SeatNumber>,
    loyalty: i64,
    vip: bool,
}

impl<'a> ReportRow<'a> {
    fn new(list: &'static str, customer: &'a Customer) -> Self {
        Self {
            list,
            name: customer.name(),
            seat: customer.seat(),
            loyalty: customer.loyalty(),
            vip: customer.is_vip(),
        }
    }
}

/// Writes confirmed bookings, then the waitlist, to a CSV writer.
///
/// # CSV Format
///
/// Columns: `list, name, seat, loyalty, vip`
///
/// ```csv
/// list,name,seat,loyalty,vip
/// booking,Alice,1,120,false
/// waitlist,Grace,,110,true
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_report<W: Write>(engine: &Engine, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    let bookings = engine.bookings();
    let waitlist = engine.waitlist();
    let rows = bookings
        .iter()
        .map(|customer| ReportRow::new("booking", customer))
        .chain(waitlist.iter().map(|customer| ReportRow::new("waitlist", customer)));
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
