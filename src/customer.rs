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

//! Customers and their priority ranking.
//!
//! A [`Customer`] is created when a booking is attempted. It carries a seat
//! number once confirmed and none while waitlisted; promotion from the
//! waitlist is the only time a customer record changes.
//!
//! # Example
//!
//! ```
//! use event_booking_rs::Customer;
//!
//! let customer = Customer::new("Alice", 120, false);
//! assert_eq!(customer.seat(), None);
//! ```

use crate::base::SeatNumber;
use serde::Serialize;
use std::cmp::Ordering;

/// A booking request, confirmed or waitlisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    name: String,
    seat: Option<SeatNumber>,
    loyalty: i64,
    vip: bool,
}

impl Customer {
    /// Creates a customer without a seat.
    pub fn new(name: impl Into<String>, loyalty: i64, vip: bool) -> Self {
        Self {
            name: name.into(),
            seat: None,
            loyalty,
            vip,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seat held by the customer, `None` while waitlisted.
    pub fn seat(&self) -> Option<SeatNumber> {
        self.seat
    }

    pub fn loyalty(&self) -> i64 {
        self.loyalty
    }

    pub fn is_vip(&self) -> bool {
        self.vip
    }

    pub(crate) fn assign_seat(&mut self, seat: SeatNumber) {
        debug_assert!(self.seat.is_none(), "customer {} already seated", self.name);
        self.seat = Some(seat);
    }

    /// Orders two customers by priority, highest first.
    ///
    /// VIPs come before everyone else; within the same VIP status a higher
    /// loyalty score comes first. Customers that tie compare equal, so a
    /// stable sort keeps their existing order.
    pub fn cmp_priority(&self, other: &Customer) -> Ordering {
        other
            .vip
            .cmp(&self.vip)
            .then_with(|| other.loyalty.cmp(&self.loyalty))
    }
}
