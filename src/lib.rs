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

//! # Event Booking
//!
//! This library allocates the seats of a single event to arriving customers.
//! Bookings are priced by demand, customers wait in a first-come-first-served
//! queue once the event sells out, and a cancellation hands its seat straight
//! to the head of that queue.
//!
//! ## Core Components
//!
//! - [`Engine`]: Seat inventory, confirmed bookings and the waitlist
//! - [`PricingCalculator`]: Occupancy-based ticket pricing
//! - [`Customer`]: A confirmed or waitlisted booking request
//! - [`Notifier`]: Receives confirmation and waitlist notifications
//! - [`ConfigError`]: Rejected event configurations
//!
//! ## Example
//!
//! ```
//! use event_booking_rs::{Engine, EventConfig, SeatNumber};
//! use rust_decimal_macros::dec;
//!
//! let engine = Engine::new(EventConfig::new(1, dec!(100.0))).unwrap();
//!
//! let alice = engine.book("Alice", 120, false);
//! assert_eq!(alice.seat(), Some(SeatNumber(1)));
//! assert_eq!(alice.price(), dec!(100));
//!
//! // Sold out: Bob waits at double the base price.
//! let bob = engine.book("Bob", 90, false);
//! assert!(!bob.is_confirmed());
//! assert_eq!(bob.price(), dec!(200));
//!
//! // Alice cancels and Bob takes her seat.
//! let cancel = engine.cancel(SeatNumber(1));
//! assert_eq!(cancel.promoted().unwrap().name(), "Bob");
//! assert_eq!(engine.available(), 0);
//! ```
//!
//! ## Thread Safety
//!
//! The engine serialises every operation behind a single lock, so it can be
//! shared between threads behind an [`Arc`](std::sync::Arc).

mod base;
mod config;
pub mod customer;
mod engine;
pub mod error;
pub mod notification;
mod outcome;
mod pricing;

pub use base::SeatNumber;
pub use config::EventConfig;
pub use customer::Customer;
pub use engine::Engine;
pub use error::ConfigError;
pub use notification::{ChannelNotifier, LogNotifier, NoopNotifier, Notification, Notifier};
pub use outcome::{BookingOutcome, CancelOutcome};
pub use pricing::PricingCalculator;
