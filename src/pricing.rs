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

//! Demand-based ticket pricing.

use rust_decimal::Decimal;

/// Prices tickets linearly by occupancy.
///
/// `price = base * (1 + occupied / total)`, so the first ticket sells at the
/// base price and a sold-out event quotes exactly twice the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingCalculator {
    base_price: Decimal,
}

impl PricingCalculator {
    pub fn new(base_price: Decimal) -> Self {
        Self { base_price }
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    /// Price for the next booking attempt given the current inventory.
    ///
    /// `total` must be non-zero and `2 * base` representable; the engine
    /// refuses such configurations before a calculator is ever consulted.
    pub fn price(&self, total: u32, available: u32) -> Decimal {
        debug_assert!(total > 0, "pricing a zero-capacity event");
        debug_assert!(available <= total, "available {available} exceeds total {total}");
        let occupied = Decimal::from(total - available);
        self.base_price * (Decimal::ONE + occupied / Decimal::from(total))
    }
}
