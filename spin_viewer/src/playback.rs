//! Flyover playback. The engine is driven by host time: the event loop calls
//! `advance_to` with the current host clock and the engine applies however
//! many ticks have come due since the timer was armed. Only one
//! `FlyoverTimer` exists at a time; stopping releases it.

use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_CYCLE: Duration = Duration::from_millis(6000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn signum(self) -> i64 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Backward => Self::Forward,
            Self::Forward => Self::Backward,
        }
    }

    /// Direction for a signed delta; `None` for zero.
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Forward)
        } else if delta < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    /// Wall-clock time of one full rotation regardless of frame count.
    pub cycle_duration: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            cycle_duration: DEFAULT_CYCLE,
        }
    }
}

impl PlaybackConfig {
    pub fn tick_interval(&self, frame_count: usize) -> Option<Duration> {
        if frame_count == 0 {
            return None;
        }
        let interval = self.cycle_duration / u32::try_from(frame_count).ok()?;
        Some(interval.max(Duration::from_nanos(1)))
    }
}

/// The one live playback timer.
#[derive(Debug)]
pub struct FlyoverTimer {
    generation: u64,
    interval_ns: u64,
    armed_at_ns: u64,
    ticks_fired: u64,
}

impl FlyoverTimer {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        Duration::from_nanos(self.interval_ns)
    }

    fn due_ticks(&mut self, host_time_ns: u64) -> u64 {
        let elapsed = host_time_ns.saturating_sub(self.armed_at_ns);
        let due = elapsed / self.interval_ns;
        let pending = due.saturating_sub(self.ticks_fired);
        self.ticks_fired = self.ticks_fired.max(due);
        pending
    }

    /// Host time at which the next tick comes due.
    pub fn next_deadline_ns(&self) -> u64 {
        self.armed_at_ns
            .saturating_add(self.interval_ns.saturating_mul(self.ticks_fired + 1))
    }
}

#[derive(Debug)]
pub struct PlaybackEngine {
    frame_count: usize,
    current: usize,
    config: PlaybackConfig,
    timer: Option<FlyoverTimer>,
    next_generation: u64,
}

impl PlaybackEngine {
    pub fn new(frame_count: usize, config: PlaybackConfig) -> Self {
        Self {
            frame_count,
            current: 0,
            config,
            timer: None,
            next_generation: 1,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn state(&self) -> PlaybackState {
        if self.timer.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer(&self) -> Option<&FlyoverTimer> {
        self.timer.as_ref()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Arms the flyover timer. Returns `false` when already playing or when
    /// there is nothing to rotate through.
    pub fn start(&mut self, host_time_ns: u64) -> bool {
        if self.timer.is_some() {
            return false;
        }
        let Some(interval) = self.config.tick_interval(self.frame_count) else {
            log::debug!("ignoring start on empty dataset");
            return false;
        };
        let generation = self.next_generation;
        self.next_generation += 1;
        let interval_ns = u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX);
        self.timer = Some(FlyoverTimer {
            generation,
            interval_ns,
            armed_at_ns: host_time_ns,
            ticks_fired: 0,
        });
        log::debug!("flyover timer {generation} armed ({interval:?} per frame)");
        true
    }

    /// Cancels the timer; a no-op when already stopped.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                log::debug!("flyover timer {} cancelled", timer.generation);
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, host_time_ns: u64) -> bool {
        if self.is_playing() {
            self.stop()
        } else {
            self.start(host_time_ns)
        }
    }

    /// Manual step; always ends autoplay first. Returns `true` if the frame
    /// changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        self.stop();
        self.offset(direction.signum())
    }

    /// Jumps to an absolute frame; ends autoplay. Out-of-range indices wrap.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.stop();
        if self.frame_count == 0 {
            return false;
        }
        let target = index % self.frame_count;
        let changed = target != self.current;
        self.current = target;
        changed
    }

    /// Applies every tick that has come due by `host_time_ns`. Returns the
    /// number of frames advanced.
    pub fn advance_to(&mut self, host_time_ns: u64) -> u64 {
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        let ticks = timer.due_ticks(host_time_ns);
        if ticks > 0 {
            let len = self.frame_count as u64;
            self.current = ((self.current as u64 + ticks % len) % len) as usize;
        }
        ticks
    }

    /// Wake-up from the timer armed as `generation`. A stale generation, or
    /// no timer at all, advances nothing.
    pub fn wake(&mut self, generation: u64, host_time_ns: u64) -> u64 {
        let live = self.timer.as_ref().map(FlyoverTimer::generation);
        if live != Some(generation) {
            log::trace!("dropping stale wake-up for timer {generation}");
            return 0;
        }
        self.advance_to(host_time_ns)
    }

    fn offset(&mut self, delta: i64) -> bool {
        if self.frame_count == 0 {
            return false;
        }
        let len = self.frame_count as i64;
        let next = (self.current as i64 + delta).rem_euclid(len) as usize;
        let changed = next != self.current;
        self.current = next;
        changed
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.stop();
    }
}
