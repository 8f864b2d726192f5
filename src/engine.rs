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

//! Seat allocation engine.
//!
//! The [`Engine`] owns the seat inventory for one event, the index of
//! confirmed bookings and the waitlist. It handles booking, cancellation and
//! promotion from the waitlist.
//!
//! # Allocation Rules
//!
//! - **Booking**: quotes the current price, then takes the lowest free seat or,
//!   when the event is sold out, appends the customer to the waitlist.
//! - **Cancellation**: frees the seat and hands it straight to the head of the
//!   waitlist, if anyone is waiting.
//! - **Promotion** is first-come-first-served. VIP status and loyalty only
//!   affect [`Engine::priority_ranking`].
//!
//! # Thread Safety
//!
//! All state sits behind one [`Mutex`] taken for the whole of each public
//! operation, so concurrent callers see every booking and cancellation as
//! atomic. Notifications are dispatched after the lock is released.

use crate::base::SeatNumber;
use crate::customer::Customer;
use crate::notification::{LogNotifier, Notification, Notifier};
use crate::pricing::PricingCalculator;
use crate::{BookingOutcome, CancelOutcome, ConfigError, EventConfig};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

/// Inventory, bookings and waitlist of a single event.
//
//  free seats = vacated ∪ [issued + 1, total]
//  seats.keys() ∪ free seats = [1, total], disjoint
//  seats.values() == ledger.keys()
#[derive(Debug)]
struct EngineState {
    total: u32,
    available: u32,
    /// Occupied seat -> confirmation sequence of its holder.
    seats: HashMap<SeatNumber, u64>,
    /// Confirmed customers keyed by confirmation sequence.
    ledger: BTreeMap<u64, Customer>,
    next_sequence: u64,
    /// Seats freed by a cancellation nobody was waiting for.
    vacated: BTreeSet<SeatNumber>,
    /// Seats `1..=issued` have been assigned at least once.
    issued: u32,
    waitlist: VecDeque<Customer>,
}

impl EngineState {
    fn new(total: u32) -> Self {
        Self {
            total,
            available: total,
            seats: HashMap::new(),
            ledger: BTreeMap::new(),
            next_sequence: 0,
            vacated: BTreeSet::new(),
            issued: 0,
            waitlist: VecDeque::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.available <= self.total,
            "Invariant violated: available {} exceeds total {}",
            self.available,
            self.total
        );
        debug_assert_eq!(
            self.seats.len() as u64 + u64::from(self.available),
            u64::from(self.total),
            "Invariant violated: occupied + available != total"
        );
        debug_assert_eq!(
            self.seats.len(),
            self.ledger.len(),
            "Invariant violated: seat index and ledger disagree"
        );
        debug_assert_eq!(
            self.vacated.len() as u64 + u64::from(self.total - self.issued),
            u64::from(self.available),
            "Invariant violated: free seat pool does not match available count"
        );
    }

    /// Removes the lowest free seat from the pool.
    fn take_seat(&mut self) -> Option<SeatNumber> {
        if self.available == 0 {
            return None;
        }
        if let Some(seat) = self.vacated.pop_first() {
            return Some(seat);
        }
        // No vacated seat, so issued < total and issued + 1 is a seat.
        self.issued += 1;
        Some(SeatNumber(self.issued))
    }

    /// Records a seated customer as confirmed.
    fn confirm(&mut self, customer: Customer) {
        let Some(seat) = customer.seat() else {
            unreachable!("confirming customer {} without a seat", customer.name());
        };
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.seats.insert(seat, sequence);
        self.ledger.insert(sequence, customer);
        self.available -= 1;
    }

    /// Removes the booking holding `seat`, returning the seat to inventory.
    fn release(&mut self, seat: SeatNumber) -> Option<Customer> {
        let sequence = self.seats.remove(&seat)?;
        let customer = self.ledger.remove(&sequence);
        debug_assert!(customer.is_some(), "seat {seat} indexed without a ledger entry");
        self.available += 1;
        customer
    }

    fn holder(&self, seat: SeatNumber) -> Option<&Customer> {
        self.seats
            .get(&seat)
            .and_then(|sequence| self.ledger.get(sequence))
    }
}

/// Seat allocation engine for a single event.
///
/// # Invariants
///
/// - `available + confirmed bookings == total seats`.
/// - Every booked seat number is in `1..=total` and held by exactly one customer.
/// - The waitlist only grows while no seat is free.
/// - Promotion takes the waitlist head; priority never reorders the waitlist.
pub struct Engine {
    state: Mutex<EngineState>,
    pricing: PricingCalculator,
    notifier: Arc<dyn Notifier>,
}

impl Engine {
    /// Creates an engine that logs notifications through `tracing`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroCapacity`] - The event has no seats.
    /// - [`ConfigError::NegativeBasePrice`] - The base price is below zero.
    pub fn new(config: EventConfig) -> Result<Self, ConfigError> {
        Self::with_notifier(config, Arc::new(LogNotifier))
    }

    /// Creates an engine that reports bookings to `notifier`.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::new`].
    pub fn with_notifier(
        config: EventConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            total_seats = config.total_seats,
            base_price = %config.base_price,
            "event opened"
        );
        Ok(Engine {
            state: Mutex::new(EngineState::new(config.total_seats)),
            pricing: PricingCalculator::new(config.base_price),
            notifier,
        })
    }

    /// Books a seat, or joins the waitlist when the event is sold out.
    ///
    /// The quoted price reflects occupancy before this booking. Names need not
    /// be unique; every call creates a distinct customer.
    pub fn book(&self, name: impl Into<String>, loyalty: i64, vip: bool) -> BookingOutcome {
        let mut customer = Customer::new(name, loyalty, vip);

        let (outcome, notification) = {
            let mut state = self.state.lock();
            let price = self.pricing.price(state.total, state.available);

            let outcome = match state.take_seat() {
                Some(seat) => {
                    customer.assign_seat(seat);
                    state.confirm(customer.clone());
                    tracing::debug!(customer = customer.name(), %seat, %price, "seat booked");
                    BookingOutcome::Confirmed {
                        seat,
                        price,
                        customer,
                    }
                }
                None => {
                    state.waitlist.push_back(customer.clone());
                    let position = state.waitlist.len();
                    tracing::debug!(customer = customer.name(), position, %price, "sold out, waitlisted");
                    BookingOutcome::Waitlisted {
                        position,
                        price,
                        customer,
                    }
                }
            };
            state.assert_invariants();

            let notification = match &outcome {
                BookingOutcome::Confirmed { seat, customer, .. } => {
                    Notification::confirmed(customer.name(), *seat)
                }
                BookingOutcome::Waitlisted { customer, .. } => {
                    Notification::waitlisted(customer.name())
                }
            };
            (outcome, notification)
        };

        self.notifier.notify(&notification);
        outcome
    }

    /// Cancels the booking on `seat` and promotes the head of the waitlist into it.
    ///
    /// Cancelling a seat that is not booked returns [`CancelOutcome::NotFound`]
    /// and leaves the engine untouched.
    pub fn cancel(&self, seat: SeatNumber) -> CancelOutcome {
        let outcome = {
            let mut state = self.state.lock();

            let Some(cancelled) = state.release(seat) else {
                tracing::debug!(%seat, "cancel ignored, seat not booked");
                return CancelOutcome::NotFound { seat };
            };
            tracing::debug!(customer = cancelled.name(), %seat, "booking cancelled");

            let promoted = match state.waitlist.pop_front() {
                Some(mut next) => {
                    // The vacated seat goes straight to the waitlist head.
                    next.assign_seat(seat);
                    state.confirm(next.clone());
                    tracing::debug!(customer = next.name(), %seat, "promoted from waitlist");
                    Some(next)
                }
                None => {
                    state.vacated.insert(seat);
                    None
                }
            };
            state.assert_invariants();

            CancelOutcome::Cancelled {
                seat,
                cancelled,
                promoted,
            }
        };

        if let Some(promoted) = outcome.promoted() {
            self.notifier
                .notify(&Notification::confirmed(promoted.name(), seat));
        }
        outcome
    }

    /// Confirmed bookings in the order they were confirmed.
    ///
    /// Promoted customers appear at the position of their promotion, not of
    /// their original request.
    pub fn bookings(&self) -> Vec<Customer> {
        self.state.lock().ledger.values().cloned().collect()
    }

    /// Waitlisted customers, next to be promoted first.
    pub fn waitlist(&self) -> Vec<Customer> {
        self.state.lock().waitlist.iter().cloned().collect()
    }

    /// Confirmed bookings ranked VIP first, then by descending loyalty.
    ///
    /// Customers with equal rank keep their confirmation order. The ranking is
    /// for reporting only and plays no part in allocation.
    pub fn priority_ranking(&self) -> Vec<Customer> {
        let mut ranking = self.bookings();
        ranking.sort_by(Customer::cmp_priority);
        ranking
    }

    /// Customer currently holding `seat`.
    pub fn holder(&self, seat: SeatNumber) -> Option<Customer> {
        self.state.lock().holder(seat).cloned()
    }

    /// Price the next booking attempt would be quoted.
    pub fn current_price(&self) -> Decimal {
        let state = self.state.lock();
        self.pricing.price(state.total, state.available)
    }

    pub fn base_price(&self) -> Decimal {
        self.pricing.base_price()
    }

    pub fn total_seats(&self) -> u32 {
        self.state.lock().total
    }

    /// Number of free seats.
    pub fn available(&self) -> u32 {
        self.state.lock().available
    }

    /// Number of booked seats.
    pub fn occupancy(&self) -> u32 {
        let state = self.state.lock();
        state.total - state.available
    }

    pub fn waitlist_len(&self) -> usize {
        self.state.lock().waitlist.len()
    }
}
