// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Event-driven timing for the emulated bus.
//!
//! Peripherals (GPU, timers, CD-ROM) don't poll for their next state change;
//! they register an [`EventHandle`] once and [`TimingEventManager::schedule`]
//! it a number of ticks into the future. The CPU's execution loop advances
//! [`TimingEventManager::pending_ticks`] by one per instruction and compares
//! it against [`TimingEventManager::downcount`], the tick distance to the
//! nearest still-pending event, so most instructions cost nothing beyond an
//! integer comparison. This is the same downcount/min-heap shape real PSX
//! cores use for scheduling VBlank, timer overflow and CD-ROM command
//! completion off of one clock.

/// Tick units the scheduler counts in. Distinct from the CPU's own
/// cumulative cycle counter so deltas scheduled by peripherals (which fit
/// comfortably in 32 bits even for the slowest CD-ROM delays) don't need to
/// carry the full width of [`TimingEventManager::global_tick_counter`].
pub type TickCount = i32;

/// A tick distance large enough that it is never reached by accident; used
/// as the "nothing scheduled" sentinel for inactive events and as the
/// initial downcount when nothing has been registered yet.
const NEVER: TickCount = TickCount::MAX / 2;

/// Opaque reference to a registered timing event, returned by
/// [`TimingEventManager::register_event`] and
/// [`TimingEventManager::register_periodic_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventHandle(usize);

struct Event {
    name: String,
    /// `Some(period)` for an event that automatically reschedules itself
    /// `period` ticks after firing; `None` for a one-shot event that stays
    /// inactive until explicitly [`TimingEventManager::schedule`]d again.
    period: Option<TickCount>,
    /// Ticks remaining until this event fires, measured from the last time
    /// [`TimingEventManager::run_events`] folded elapsed ticks into it.
    /// Meaningless while `active` is false.
    countdown: TickCount,
    active: bool,
}

/// Central scheduler for the emulated bus's peripherals.
///
/// Owned by the top-level driver and threaded by mutable reference into
/// whichever component needs to register or react to an event; peripherals
/// never hold a reference to it across calls.
pub struct TimingEventManager {
    events: Vec<Event>,
    /// Ticks executed by the CPU since the last [`Self::run_events`] call.
    /// Driven by the CPU's stepping loop; public so that loop can increment
    /// it and zero it out to force an immediate event check after raising an
    /// interrupt.
    pub pending_ticks: TickCount,
    /// Tick distance to the closest active event (including the frame
    /// target, if one is set). Once `pending_ticks >= downcount` the caller
    /// must call [`Self::run_events`] before continuing.
    pub downcount: TickCount,
    /// Cumulative tick count since the emulator started; this is the
    /// authoritative "current time" used to timestamp interrupts.
    pub global_tick_counter: u64,
    /// Ticks remaining until the current frame boundary, if one was set via
    /// [`Self::set_frame_target`].
    frame_remaining: Option<TickCount>,
    /// Set by [`Self::run_events`] when the frame boundary was crossed;
    /// consumed (and cleared) by [`Self::should_exit_loop`].
    frame_boundary_hit: bool,
}

impl TimingEventManager {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            pending_ticks: 0,
            downcount: NEVER,
            global_tick_counter: 0,
            frame_remaining: None,
            frame_boundary_hit: false,
        }
    }

    /// Register a one-shot event. The event is inactive until the caller
    /// explicitly [`Self::schedule`]s it; it becomes inactive again as soon
    /// as it fires, so periodic re-arming (e.g. the CD-ROM's command
    /// completion) is the caller's responsibility.
    pub fn register_event(&mut self, name: &str) -> EventHandle {
        let handle = EventHandle(self.events.len());
        self.events.push(Event {
            name: name.to_string(),
            period: None,
            countdown: NEVER,
            active: false,
        });
        handle
    }

    /// Register a periodic event with the given period, in ticks. The event
    /// is still inactive until the caller calls [`Self::schedule`] for the
    /// first time; afterwards it automatically reschedules itself `period`
    /// ticks after every firing.
    pub fn register_periodic_event(&mut self, name: &str, period: TickCount) -> EventHandle {
        let handle = EventHandle(self.events.len());
        self.events.push(Event {
            name: name.to_string(),
            period: Some(period.max(1)),
            countdown: NEVER,
            active: false,
        });
        handle
    }

    /// Arm (or re-arm) an event to fire `ticks` from now.
    pub fn schedule(&mut self, handle: EventHandle, ticks: TickCount) {
        let event = &mut self.events[handle.0];
        event.countdown = ticks;
        event.active = true;
        log::trace!(
            "timing: scheduled '{}' in {} ticks (t={})",
            event.name,
            ticks,
            self.global_tick_counter
        );
        self.recompute_downcount();
    }

    /// Deactivate an event so it no longer contributes to `downcount` and
    /// will not fire until rescheduled.
    pub fn deactivate(&mut self, handle: EventHandle) {
        let event = &mut self.events[handle.0];
        event.active = false;
        event.countdown = NEVER;
        self.recompute_downcount();
    }

    /// Set (or replace) the ticks remaining until the next frame boundary.
    /// [`Self::should_exit_loop`] returns true exactly once the boundary is
    /// crossed, after which the target is cleared — callers re-arm it for
    /// the next frame.
    pub fn set_frame_target(&mut self, ticks: u64) {
        self.frame_remaining = Some(ticks.min(NEVER as u64) as TickCount);
        self.frame_boundary_hit = false;
        self.recompute_downcount();
    }

    /// Fold [`Self::pending_ticks`] into the global tick counter and every
    /// active event's countdown, firing (and, for periodic events,
    /// rescheduling) any whose countdown reaches zero or below. Returns the
    /// handles that fired, in registration order.
    pub fn run_events(&mut self) -> Vec<EventHandle> {
        let elapsed = self.pending_ticks;
        self.pending_ticks = 0;
        self.global_tick_counter = self.global_tick_counter.wrapping_add(elapsed.max(0) as u64);

        if let Some(remaining) = self.frame_remaining.as_mut() {
            *remaining -= elapsed;
            if *remaining <= 0 {
                self.frame_boundary_hit = true;
                self.frame_remaining = None;
            }
        }

        let mut triggered = Vec::new();
        for (index, event) in self.events.iter_mut().enumerate() {
            if !event.active {
                continue;
            }
            event.countdown -= elapsed;
            if event.countdown <= 0 {
                triggered.push(EventHandle(index));
                match event.period {
                    Some(period) => {
                        // Catch up if more than one period elapsed at once
                        // (a slow or just-resumed event source).
                        while event.countdown <= 0 {
                            event.countdown += period;
                        }
                    }
                    None => {
                        event.active = false;
                        event.countdown = NEVER;
                    }
                }
            }
        }

        self.recompute_downcount();
        triggered
    }

    /// True exactly once per frame, the first time [`Self::run_events`] is
    /// called after the boundary set by [`Self::set_frame_target`] has been
    /// crossed. Clears the flag on read.
    pub fn should_exit_loop(&mut self) -> bool {
        let hit = self.frame_boundary_hit;
        self.frame_boundary_hit = false;
        hit
    }

    fn recompute_downcount(&mut self) {
        let mut min = self.frame_remaining.unwrap_or(NEVER);
        for event in &self.events {
            if event.active && event.countdown < min {
                min = event.countdown;
            }
        }
        self.downcount = min;
    }
}

impl Default for TimingEventManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_event_fires_and_reschedules() {
        let mut timing = TimingEventManager::new();
        let handle = timing.register_periodic_event("test", 100);
        timing.schedule(handle, 100);

        timing.pending_ticks = 100;
        let fired = timing.run_events();
        assert_eq!(fired, vec![handle]);
        assert_eq!(timing.global_tick_counter, 100);
        assert_eq!(timing.downcount, 100);

        timing.pending_ticks = 100;
        let fired = timing.run_events();
        assert_eq!(fired, vec![handle]);
        assert_eq!(timing.global_tick_counter, 200);
    }

    #[test]
    fn one_shot_event_deactivates_after_firing() {
        let mut timing = TimingEventManager::new();
        let handle = timing.register_event("test");
        timing.schedule(handle, 50);

        timing.pending_ticks = 50;
        let fired = timing.run_events();
        assert_eq!(fired, vec![handle]);
        assert_eq!(timing.downcount, NEVER);

        // Does not refire without an explicit reschedule.
        timing.pending_ticks = 1_000_000;
        let fired = timing.run_events();
        assert!(fired.is_empty());
    }

    #[test]
    fn deactivate_removes_event_from_downcount() {
        let mut timing = TimingEventManager::new();
        let a = timing.register_event("a");
        let b = timing.register_event("b");
        timing.schedule(a, 10);
        timing.schedule(b, 500);
        assert_eq!(timing.downcount, 10);

        timing.deactivate(a);
        assert_eq!(timing.downcount, 500);
    }

    #[test]
    fn frame_target_reports_boundary_once() {
        let mut timing = TimingEventManager::new();
        timing.set_frame_target(1_000);
        assert_eq!(timing.downcount, 1_000);

        timing.pending_ticks = 1_000;
        timing.run_events();
        assert!(timing.should_exit_loop());
        assert!(!timing.should_exit_loop());
    }

    #[test]
    fn no_active_events_yields_never_downcount() {
        let timing = TimingEventManager::new();
        assert_eq!(timing.downcount, NEVER);
    }
}
