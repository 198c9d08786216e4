//! Fixed-rate tick drivers for rooms that are in play.
//!
//! A driver never touches a room itself. It only posts its [`TickHandle`] to the
//! server event loop, which runs the tick and drops handles that no longer match
//! the room (cancelled driver, finished match, destroyed room).

use log::debug;
use shared::RoomId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Identifies one driver. Generations are never reused within a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle {
    pub room_id: RoomId,
    pub generation: u64,
}

pub trait TickScheduler {
    /// Starts a driver for the room, or returns the live one if it already has one
    fn start(&mut self, room_id: RoomId) -> TickHandle;

    /// Cancels the driver. Unknown or already stopped handles are ignored.
    fn stop(&mut self, handle: TickHandle);
}

struct Driver {
    handle: TickHandle,
    task: JoinHandle<()>,
}

/// Tokio-backed scheduler running one interval task per room
pub struct IntervalScheduler {
    period: Duration,
    tick_tx: mpsc::UnboundedSender<TickHandle>,
    drivers: HashMap<RoomId, Driver>,
    next_generation: u64,
}

impl IntervalScheduler {
    pub fn new(period: Duration, tick_tx: mpsc::UnboundedSender<TickHandle>) -> Self {
        Self {
            period,
            tick_tx,
            drivers: HashMap::new(),
            next_generation: 1,
        }
    }

    pub fn is_running(&self, room_id: RoomId) -> bool {
        self.drivers.contains_key(&room_id)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, room_id: RoomId) -> TickHandle {
        if let Some(driver) = self.drivers.get(&room_id) {
            return driver.handle;
        }

        let handle = TickHandle {
            room_id,
            generation: self.next_generation,
        };
        self.next_generation += 1;

        let period = self.period;
        let tick_tx = self.tick_tx.clone();
        let task = tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            // Skip the first tick since it fires immediately
            timer.tick().await;

            loop {
                timer.tick().await;
                if tick_tx.send(handle).is_err() {
                    break;
                }
            }
        });

        debug!("Started tick driver {} for {}", handle.generation, room_id);
        self.drivers.insert(room_id, Driver { handle, task });
        handle
    }

    fn stop(&mut self, handle: TickHandle) {
        let live = self
            .drivers
            .get(&handle.room_id)
            .is_some_and(|driver| driver.handle == handle);

        if live {
            if let Some(driver) = self.drivers.remove(&handle.room_id) {
                driver.task.abort();
                debug!(
                    "Stopped tick driver {} for {}",
                    handle.generation, handle.room_id
                );
            }
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        for driver in self.drivers.values() {
            driver.task.abort();
        }
    }
}

/// Scheduler without timers: records live drivers and leaves ticking to the
/// caller. Used to step rooms deterministically.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    live: HashMap<RoomId, TickHandle>,
    next_generation: u64,
    started: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_for(&self, room_id: RoomId) -> Option<TickHandle> {
        self.live.get(&room_id).copied()
    }

    pub fn is_running(&self, room_id: RoomId) -> bool {
        self.live.contains_key(&room_id)
    }

    /// Every currently live handle, in no particular order
    pub fn live_handles(&self) -> Vec<TickHandle> {
        self.live.values().copied().collect()
    }

    /// Number of drivers ever started
    pub fn started(&self) -> usize {
        self.started
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, room_id: RoomId) -> TickHandle {
        if let Some(handle) = self.live.get(&room_id) {
            return *handle;
        }

        self.next_generation += 1;
        self.started += 1;
        let handle = TickHandle {
            room_id,
            generation: self.next_generation,
        };
        self.live.insert(room_id, handle);
        handle
    }

    fn stop(&mut self, handle: TickHandle) {
        if self.live.get(&handle.room_id) == Some(&handle) {
            self.live.remove(&handle.room_id);
        }
    }
}
