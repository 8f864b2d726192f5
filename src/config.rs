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

//! Event configuration.

use crate::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Capacity and pricing of a single event.
///
/// Defaults to five seats at a base price of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Number of seats in the venue. Fixed for the lifetime of the engine.
    pub total_seats: u32,
    /// Price of the first ticket; the last seat sells for twice this.
    pub base_price: Decimal,
}

impl EventConfig {
    pub fn new(total_seats: u32, base_price: Decimal) -> Self {
        Self {
            total_seats,
            base_price,
        }
    }

    /// Checks the configuration can back an engine.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroCapacity`] - `total_seats` is zero.
    /// - [`ConfigError::NegativeBasePrice`] - `base_price` is below zero.
    /// - [`ConfigError::BasePriceTooLarge`] - `2 * base_price` overflows [`Decimal`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_seats == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.base_price < Decimal::ZERO {
            return Err(ConfigError::NegativeBasePrice);
        }
        // Every quoted price lies in [base, 2 * base].
        if self.base_price.checked_mul(Decimal::TWO).is_none() {
            return Err(ConfigError::BasePriceTooLarge);
        }
        Ok(())
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self::new(5, dec!(100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EventConfig::default();
        assert_eq!(config.total_seats, 5);
        assert_eq!(config.base_price, dec!(100));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_seats_rejected() {
        let config = EventConfig::new(0, dec!(100));
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn negative_price_rejected() {
        let config = EventConfig::new(10, dec!(-0.01));
        assert_eq!(config.validate(), Err(ConfigError::NegativeBasePrice));
    }

    #[test]
    fn unrepresentable_sold_out_price_rejected() {
        let config = EventConfig::new(1, Decimal::MAX);
        assert_eq!(config.validate(), Err(ConfigError::BasePriceTooLarge));

        let large = EventConfig::new(1, Decimal::from(u64::MAX));
        assert_eq!(large.validate(), Ok(()));
    }

    #[test]
    fn free_event_allowed() {
        let config = EventConfig::new(10, Decimal::ZERO);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn deserializes_price_from_string() {
        let config: EventConfig =
            serde_json::from_str(r#"{"total_seats": 3, "base_price": "49.99"}"#).unwrap();
        assert_eq!(config, EventConfig::new(3, dec!(49.99)));
    }
}
