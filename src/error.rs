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

//! Error types for engine construction.
//!
//! Booking and cancellation never fail once an engine exists: a booking is
//! either confirmed or waitlisted, and cancelling an unknown seat is reported
//! through [`CancelOutcome::NotFound`](crate::CancelOutcome::NotFound).

use thiserror::Error;

/// Invalid event configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The event was configured without any seats
    #[error("event must have at least one seat")]
    ZeroCapacity,

    /// The base ticket price is below zero
    #[error("invalid base price (must not be negative)")]
    NegativeBasePrice,

    /// The sold-out price (twice the base price) cannot be represented
    #[error("base price too large (doubled price overflows)")]
    BasePriceTooLarge,
}
