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

//! Property-based tests for the booking engine.
//!
//! These tests verify invariants that should hold for any sequence of
//! bookings and cancellations.

use event_booking_rs::{BookingOutcome, CancelOutcome, Engine, EventConfig, SeatNumber};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Book { loyalty: i64, vip: bool },
    Cancel(u32),
}

/// Generate a base price (0 to 1000 with 2 decimal places).
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Bookings and cancellations, with cancellations mostly aimed at real seats.
fn arb_op(seats: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-10i64..1_000, any::<bool>()).prop_map(|(loyalty, vip)| Op::Book { loyalty, vip }),
        2 => (1..=seats).prop_map(Op::Cancel),
        1 => any::<u32>().prop_map(Op::Cancel),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (u32, Vec<Op>)> {
    (1u32..=8).prop_flat_map(|seats| (Just(seats), prop::collection::vec(arb_op(seats), 0..60)))
}

fn run(engine: &Engine, ops: &[Op], step: &mut dyn FnMut(&Engine)) {
    for (i, op) in ops.iter().enumerate() {
        match op {
            Op::Book { loyalty, vip } => {
                engine.book(format!("c{i}"), *loyalty, *vip);
            }
            Op::Cancel(seat) => {
                engine.cancel(SeatNumber(*seat));
            }
        }
        step(engine);
    }
}

// =============================================================================
// Inventory Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Available seats plus confirmed bookings always equals capacity.
    #[test]
    fn available_plus_booked_equals_total((seats, ops) in arb_scenario()) {
        let engine = Engine::new(EventConfig::new(seats, Decimal::ONE_HUNDRED)).unwrap();
        run(&engine, &ops, &mut |engine: &Engine| {
            let booked = engine.bookings().len() as u32;
            assert_eq!(engine.available() + booked, seats);
        });
    }

    /// Booked seats are unique and inside the venue.
    #[test]
    fn seats_unique_and_in_range((seats, ops) in arb_scenario()) {
        let engine = Engine::new(EventConfig::new(seats, Decimal::ONE_HUNDRED)).unwrap();
        run(&engine, &ops, &mut |engine: &Engine| {
            let mut seen = HashSet::new();
            for customer in engine.bookings() {
                let seat = customer.seat().expect("confirmed customer without seat");
                assert!((1..=seats).contains(&seat.0), "seat {seat} outside venue");
                assert!(seen.insert(seat), "seat {seat} booked twice");
                assert_eq!(engine.holder(seat).as_ref(), Some(&customer));
            }
        });
    }

    /// Customers only wait while the event is sold out.
    #[test]
    fn waitlist_implies_sold_out((seats, ops) in arb_scenario()) {
        let engine = Engine::new(EventConfig::new(seats, Decimal::ONE_HUNDRED)).unwrap();
        run(&engine, &ops, &mut |engine: &Engine| {
            if engine.waitlist_len() > 0 {
                assert_eq!(engine.available(), 0);
            }
            assert!(engine.waitlist().iter().all(|c| c.seat().is_none()));
        });
    }
}

// =============================================================================
// Pricing Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Consecutive bookings never get cheaper, and a full event costs double.
    #[test]
    fn prices_monotonic_until_full(seats in 1u32..=50, base in arb_price()) {
        let engine = Engine::new(EventConfig::new(seats, base)).unwrap();
        let mut last = Decimal::MIN;
        for i in 0..seats {
            let outcome = engine.book(format!("c{i}"), 0, false);
            prop_assert!(outcome.is_confirmed());
            prop_assert!(outcome.price() >= last);
            prop_assert!(outcome.price() >= base);
            last = outcome.price();
        }
        prop_assert_eq!(engine.available(), 0);
        prop_assert_eq!(engine.current_price(), base * Decimal::TWO);
        prop_assert_eq!(engine.book("late", 0, false).price(), base * Decimal::TWO);
    }
}

// =============================================================================
// Cancellation Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Cancelling an unbooked seat leaves every structure unchanged.
    #[test]
    fn unknown_cancel_is_noop((seats, ops) in arb_scenario(), probe in any::<u32>()) {
        let engine = Engine::new(EventConfig::new(seats, Decimal::ONE_HUNDRED)).unwrap();
        run(&engine, &ops, &mut |_: &Engine| {});
        prop_assume!(engine.holder(SeatNumber(probe)).is_none());

        let before = (engine.bookings(), engine.waitlist(), engine.available());
        let outcome = engine.cancel(SeatNumber(probe));
        prop_assert_eq!(outcome, CancelOutcome::NotFound { seat: SeatNumber(probe) });
        prop_assert_eq!((engine.bookings(), engine.waitlist(), engine.available()), before);
    }

    /// The waitlist is promoted strictly in arrival order.
    #[test]
    fn promotion_follows_arrival_order(
        seats in 1u32..=6,
        waiting in prop::collection::vec((any::<i64>(), any::<bool>()), 1..10),
    ) {
        let engine = Engine::new(EventConfig::new(seats, Decimal::ONE_HUNDRED)).unwrap();
        for i in 0..seats {
            engine.book(format!("seated{i}"), 0, false);
        }
        for (i, (loyalty, vip)) in waiting.iter().enumerate() {
            let outcome = engine.book(format!("w{i}"), *loyalty, *vip);
            let is_waitlisted = matches!(outcome, BookingOutcome::Waitlisted { position, .. } if position == i + 1);
            prop_assert!(is_waitlisted);
        }

        for i in 0..waiting.len() {
            let seat = SeatNumber((i as u32 % seats) + 1);
            let outcome = engine.cancel(seat);
            let expected = format!("w{i}");
            prop_assert_eq!(outcome.promoted().map(|c| c.name()), Some(expected.as_str()));
            prop_assert_eq!(engine.available(), 0);
        }
        prop_assert_eq!(engine.waitlist_len(), 0);
    }
}
