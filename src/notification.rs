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

//! Booking notifications.
//!
//! The engine reports every confirmation, waitlisting and promotion to a
//! [`Notifier`]. Delivery is best-effort and never feeds back into engine
//! state: a notifier cannot fail a booking, and the engine calls it only after
//! releasing its lock.

use crate::base::SeatNumber;
use crossbeam::channel::{self, Sender};
use parking_lot::Mutex;
use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Message sent to a customer about their booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub customer: String,
    /// Seat granted, `None` for waitlist notices.
    pub seat: Option<SeatNumber>,
    pub confirmed: bool,
}

impl Notification {
    pub fn confirmed(customer: impl Into<String>, seat: SeatNumber) -> Self {
        Self {
            customer: customer.into(),
            seat: Some(seat),
            confirmed: true,
        }
    }

    pub fn waitlisted(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            seat: None,
            confirmed: false,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.confirmed, self.seat) {
            (true, Some(seat)) => {
                write!(f, "Booking confirmed for {}. Seat No: {}!", self.customer, seat)
            }
            (true, None) => write!(f, "Booking confirmed for {}!", self.customer),
            (false, _) => write!(f, "{}, you are on the waitlist for the event.", self.customer),
        }
    }
}

/// Receives notifications from the engine.
///
/// Implementations must return promptly and must not panic; anything slow
/// belongs on another thread (see [`ChannelNotifier`]).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Writes notifications to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::info!(
            customer = %notification.customer,
            seat = ?notification.seat.map(|s| s.0),
            confirmed = notification.confirmed,
            "Notification: {notification}"
        );
    }
}

/// Delivers notifications on a background worker thread.
///
/// Notifications are queued on an unbounded [`crossbeam`] channel, so
/// [`notify`](Notifier::notify) never waits on delivery. The worker sleeps
/// for the configured delay before handing each notification to the handler,
/// in the order they were sent.
#[derive(Debug)]
pub struct ChannelNotifier {
    sender: Mutex<Option<Sender<Notification>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ChannelNotifier {
    /// Starts the worker thread.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the operating system refuses to spawn the thread.
    pub fn spawn<F>(delay: Duration, mut handler: F) -> std::io::Result<Self>
    where
        F: FnMut(Notification) + Send + 'static,
    {
        let (sender, receiver) = channel::unbounded::<Notification>();
        let worker = thread::Builder::new()
            .name("booking-notifier".into())
            .spawn(move || {
                for notification in receiver {
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    handler(notification);
                }
                tracing::debug!("notification worker stopped");
            })?;

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Closes the queue and waits until every queued notification is delivered.
    ///
    /// Notifications sent afterwards are dropped. Calling this more than once
    /// is harmless.
    pub fn shutdown(&self) {
        // Dropping the sender ends the worker's receive loop once it drains.
        self.sender.lock().take();
        if let Some(worker) = self.worker.lock().take() {
            if worker.join().is_err() {
                tracing::warn!("notification handler panicked");
            }
        }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: &Notification) {
        let sender = self.sender.lock();
        let delivered = sender
            .as_ref()
            .is_some_and(|sender| sender.send(notification.clone()).is_ok());
        if !delivered {
            tracing::warn!(customer = %notification.customer, "notification worker gone, dropping notification");
        }
    }
}

impl Drop for ChannelNotifier {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn display_matches_customer_messages() {
        assert_eq!(
            Notification::confirmed("Alice", SeatNumber(1)).to_string(),
            "Booking confirmed for Alice. Seat No: 1!"
        );
        assert_eq!(
            Notification::waitlisted("Frank").to_string(),
            "Frank, you are on the waitlist for the event."
        );
    }

    #[test]
    fn channel_notifier_delivers_in_order() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let notifier = ChannelNotifier::spawn(Duration::ZERO, move |n| sink.lock().push(n)).unwrap();

        notifier.notify(&Notification::confirmed("Alice", SeatNumber(1)));
        notifier.notify(&Notification::waitlisted("Frank"));
        notifier.notify(&Notification::confirmed("Frank", SeatNumber(1)));
        notifier.shutdown();

        let received = received.lock();
        assert_eq!(
            *received,
            vec![
                Notification::confirmed("Alice", SeatNumber(1)),
                Notification::waitlisted("Frank"),
                Notification::confirmed("Frank", SeatNumber(1)),
            ]
        );
    }

    #[test]
    fn notify_does_not_wait_for_delay() {
        let notifier = ChannelNotifier::spawn(Duration::from_millis(200), |_| {}).unwrap();
        let started = std::time::Instant::now();
        for _ in 0..5 {
            notifier.notify(&Notification::waitlisted("Grace"));
        }
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[test]
    fn notify_after_shutdown_is_dropped() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let notifier = ChannelNotifier::spawn(Duration::ZERO, move |n| sink.lock().push(n)).unwrap();
        notifier.shutdown();
        notifier.notify(&Notification::waitlisted("Grace"));
        notifier.shutdown();
        assert!(received.lock().is_empty());
    }
}
