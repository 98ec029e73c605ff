//! Shared test helpers for `agenda-core` integration tests.
//!
//! Each test builds a [`Harness`]: a service wired to an in-memory gateway
//! and a recording notifier, plus a clock pinned to 2025-03-01 12:00 UTC.
#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;

use std::sync::Arc;

use agenda_common::time::MockClock;
use agenda_core::ScheduleService;
use agenda_domain::{CacheConfig, Schedule};

pub use fixtures::{at, schedule};
pub use repositories::{Call, FakeGateway, Op, RecordingNotifier};

pub struct Harness {
    pub gateway: Arc<FakeGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub service: ScheduleService,
    pub clock: Arc<MockClock>,
}

pub fn harness(schedules: Vec<Schedule>) -> Harness {
    let gateway = FakeGateway::with(schedules);
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ScheduleService::new(gateway.clone(), notifier.clone(), &CacheConfig::default());
    let clock = Arc::new(MockClock::at(at(2025, 3, 1, 12, 0)));
    Harness { gateway, notifier, service, clock }
}

