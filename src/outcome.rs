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

//! Results of booking and cancellation.
//!
//! Neither operation can fail on a constructed engine, so both report what
//! happened through a value rather than an error:
//! - a booking is [`Confirmed`](BookingOutcome::Confirmed) or
//!   [`Waitlisted`](BookingOutcome::Waitlisted);
//! - a cancellation is [`Cancelled`](CancelOutcome::Cancelled), possibly with a
//!   promoted customer, or [`NotFound`](CancelOutcome::NotFound).

use crate::base::SeatNumber;
use crate::customer::Customer;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// A seat was assigned.
    Confirmed {
        seat: SeatNumber,
        price: Decimal,
        customer: Customer,
    },
    /// No seat was free; the customer joined the waitlist.
    Waitlisted {
        /// 1-based place in the waitlist at the time of joining.
        position: usize,
        price: Decimal,
        customer: Customer,
    },
}

impl BookingOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    /// Price quoted for the attempt, computed before the booking was applied.
    pub fn price(&self) -> Decimal {
        match self {
            Self::Confirmed { price, .. } | Self::Waitlisted { price, .. } => *price,
        }
    }

    pub fn seat(&self) -> Option<SeatNumber> {
        match self {
            Self::Confirmed { seat, .. } => Some(*seat),
            Self::Waitlisted { .. } => None,
        }
    }

    pub fn customer(&self) -> &Customer {
        match self {
            Self::Confirmed { customer, .. } | Self::Waitlisted { customer, .. } => customer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The seat was not booked; nothing changed.
    NotFound { seat: SeatNumber },
    /// The booking was removed, and the waitlist head took the seat if there was one.
    Cancelled {
        seat: SeatNumber,
        cancelled: Customer,
        promoted: Option<Customer>,
    },
}

impl CancelOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn seat(&self) -> SeatNumber {
        match self {
            Self::NotFound { seat } | Self::Cancelled { seat, .. } => *seat,
        }
    }

    pub fn promoted(&self) -> Option<&Customer> {
        match self {
            Self::Cancelled { promoted, .. } => promoted.as_ref(),
            Self::NotFound { .. } => None,
        }
    }
}
