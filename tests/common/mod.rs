//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use stacknav::app::{AppDestination, Card, CardTransaction};
use stacknav::config::NavConfig;
use stacknav::lifecycle::driver;
use stacknav::schedule::ManualClock;
use stacknav::{Coordinator, RouterEvent};
use tokio::sync::broadcast;

pub const SETTLE: Duration = Duration::from_millis(550);

/// A coordinator on a virtual clock with an attached event receiver.
pub struct TestApp {
    pub coordinator: Coordinator,
    pub clock: ManualClock,
    pub events: broadcast::Receiver<RouterEvent>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(NavConfig::default())
    }

    pub fn with_config(config: NavConfig) -> Self {
        let clock = ManualClock::new();
        let coordinator = Coordinator::new(config, Arc::new(clock.clone()));
        let events = coordinator.subscribe();
        Self {
            coordinator,
            clock,
            events,
        }
    }

    pub fn advance(&mut self, by: Duration) -> usize {
        driver::advance(&mut self.coordinator, &self.clock, by)
    }

    /// Events published since the last call.
    pub fn drain(&mut self) -> Vec<RouterEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn card(id: &str) -> Card {
    Card::from_id(id)
}

pub fn transaction(id: &str) -> CardTransaction {
    CardTransaction {
        id: id.to_string(),
        merchant: format!("merchant-{id}"),
    }
}

pub fn terminated_transaction(card_id: &str, tx_id: &str) -> AppDestination {
    AppDestination::TerminatedCardTransactionDetails {
        card: card(card_id),
        transaction: transaction(tx_id),
    }
}
