//! Cooperative run control: the running/paused/stopped flags of one sorter.
//!
//! The algorithm thread calls [`RunControl::checkpoint`] before every unit of
//! work that appends a step; a controller thread flips the flags. Flag writes
//! notify a condition variable, so a paused checkpoint wakes as soon as the run
//! is resumed or stopped and otherwise re-polls at the configured interval.
//!
//! Each claim hands out a [`RunToken`] for the current run generation.
//! [`RunControl::reset`] starts a new generation: an orphaned run fails its
//! next checkpoint and its `end_run` no longer touches the flags of whichever
//! run claimed the control after it.
//!
//! ```text
//! idle --try_begin_run--> running <--set_paused--> paused
//!   ^                        |                        |
//!   +------end_run/reset-----+------set_stopped-------+--> stopped (run unwinds)
//! ```

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::debug;

/// A stop was observed at a checkpoint; the run must unwind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Halted;

/// Snapshot of the three control flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub running: bool,
    pub paused: bool,
    pub stopped: bool,
}

/// Identifies one claimed run of a [`RunControl`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

#[derive(Debug, Default)]
struct ControlState {
    flags: RunFlags,
    generation: u64,
}

impl ControlState {
    fn halted(&self, run: RunToken) -> bool {
        self.flags.stopped || self.generation != run.0
    }
}

/// Thread-safe control state for at most one in-flight run.
#[derive(Debug)]
pub struct RunControl {
    state: Mutex<ControlState>,
    signal: Condvar,
    poll_interval: Duration,
}

impl RunControl {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            state: Mutex::new(ControlState::default()),
            signal: Condvar::new(),
            poll_interval,
        }
    }

    /// Claim the run. Returns `None` if a run is already in flight.
    ///
    /// A successful claim clears any pause/stop left over from the previous run.
    pub fn try_begin_run(&self) -> Option<RunToken> {
        let mut state = self.state.lock();
        if state.flags.running {
            return None;
        }
        state.generation += 1;
        state.flags = RunFlags {
            running: true,
            paused: false,
            stopped: false,
        };
        Some(RunToken(state.generation))
    }

    /// Release the claim held by `run`. Pause/stop flags stay readable until
    /// the next claim. A no-op once the control has moved past `run`.
    pub fn end_run(&self, run: RunToken) {
        let mut state = self.state.lock();
        if state.generation != run.0 {
            debug!("Stale run released after reset");
            return;
        }
        state.flags.running = false;
        self.signal.notify_all();
    }

    pub fn set_paused(&self, paused: bool) {
        self.state.lock().flags.paused = paused;
        self.signal.notify_all();
        debug!(paused, "Run pause flag set");
    }

    pub fn set_stopped(&self, stopped: bool) {
        self.state.lock().flags.stopped = stopped;
        self.signal.notify_all();
        debug!(stopped, "Run stop flag set");
    }

    /// Clear all flags back to idle and orphan any run still in flight.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.flags = RunFlags::default();
        state.generation += 1;
        self.signal.notify_all();
        debug!(generation = state.generation, "Run control reset");
    }

    pub fn flags(&self) -> RunFlags {
        self.state.lock().flags
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().flags.running
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().flags.paused
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().flags.stopped
    }

    /// Token of the latest generation, whether or not a run holds it.
    pub fn current_run(&self) -> RunToken {
        RunToken(self.state.lock().generation)
    }

    /// Whether `run` was stopped or orphaned by a reset.
    pub fn is_halted(&self, run: RunToken) -> bool {
        self.state.lock().halted(run)
    }

    /// Block while paused; fail once `run` is stopped or orphaned.
    pub fn checkpoint(&self, run: RunToken) -> Result<(), Halted> {
        let mut state = self.state.lock();
        loop {
            if state.halted(run) {
                return Err(Halted);
            }
            if !state.flags.paused {
                return Ok(());
            }
            self.signal.wait_for(&mut state, self.poll_interval);
        }
    }

    /// Sleep for `duration` unless `run` is stopped or orphaned first.
    pub fn sleep(&self, run: RunToken, duration: Duration) -> Result<(), Halted> {
        let deadline = Instant::now() + duration;
        let mut state = self.state.lock();
        loop {
            if state.halted(run) {
                return Err(Halted);
            }
            if self.signal.wait_until(&mut state, deadline).timed_out() {
                return if state.halted(run) { Err(Halted) } else { Ok(()) };
            }
        }
    }
}

impl Default for RunControl {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn begin_run_is_exclusive() {
        let control = RunControl::default();
        let run = control.try_begin_run().unwrap();
        assert!(control.try_begin_run().is_none());
        control.end_run(run);
        assert!(control.try_begin_run().is_some());
    }

    #[test]
    fn begin_run_clears_stale_flags() {
        let control = RunControl::default();
        control.set_paused(true);
        control.set_stopped(true);
        assert!(control.try_begin_run().is_some());
        let flags = control.flags();
        assert!(flags.running && !flags.paused && !flags.stopped);
    }

    #[test]
    fn end_run_keeps_stop_visible() {
        let control = RunControl::default();
        let run = control.try_begin_run().unwrap();
        control.set_stopped(true);
        control.end_run(run);
        assert!(!control.is_running());
        assert!(control.is_stopped());
    }

    #[test]
    fn reset_returns_to_idle() {
        let control = RunControl::default();
        control.try_begin_run();
        control.set_paused(true);
        control.set_stopped(true);
        control.reset();
        assert_eq!(control.flags(), RunFlags::default());
    }

    #[test]
    fn reset_orphans_the_running_claim() {
        let control = RunControl::default();
        let orphan = control.try_begin_run().unwrap();
        control.reset();
        let fresh = control.try_begin_run().unwrap();
        assert_ne!(orphan, fresh);

        // The orphan halts and its release leaves the fresh claim alone.
        assert_eq!(control.checkpoint(orphan), Err(Halted));
        assert!(control.is_halted(orphan));
        control.end_run(orphan);
        assert!(control.is_running());
        assert!(control.try_begin_run().is_none());

        assert_eq!(control.checkpoint(fresh), Ok(()));
        control.end_run(fresh);
        assert!(!control.is_running());
    }

    #[test]
    fn checkpoint_passes_when_running() {
        let control = RunControl::default();
        let run = control.try_begin_run().unwrap();
        assert_eq!(control.checkpoint(run), Ok(()));
        assert!(!control.is_halted(run));
    }

    #[test]
    fn checkpoint_fails_when_stopped() {
        let control = RunControl::default();
        let run = control.try_begin_run().unwrap();
        control.set_stopped(true);
        assert_eq!(control.checkpoint(run), Err(Halted));
    }

    #[test]
    fn paused_checkpoint_wakes_on_resume() {
        let control = Arc::new(RunControl::new(Duration::from_secs(5)));
        let run = control.try_begin_run().unwrap();
        control.set_paused(true);

        let waiter = {
            let control = Arc::clone(&control);
            thread::spawn(move || {
                let start = Instant::now();
                let result = control.checkpoint(run);
                (result, start.elapsed())
            })
        };

        thread::sleep(Duration::from_millis(50));
        control.set_paused(false);
        let (result, waited) = waiter.join().unwrap();
        assert_eq!(result, Ok(()));
        // Woken by the notification, not the 5s poll.
        assert!(waited < Duration::from_secs(2));
    }

    #[test]
    fn paused_checkpoint_fails_on_stop() {
        let control = Arc::new(RunControl::default());
        let run = control.try_begin_run().unwrap();
        control.set_paused(true);

        let waiter = {
            let control = Arc::clone(&control);
            thread::spawn(move || control.checkpoint(run))
        };

        thread::sleep(Duration::from_millis(30));
        control.set_stopped(true);
        assert_eq!(waiter.join().unwrap(), Err(Halted));
    }

    #[test]
    fn paused_checkpoint_fails_on_reset() {
        let control = Arc::new(RunControl::new(Duration::from_secs(5)));
        let run = control.try_begin_run().unwrap();
        control.set_paused(true);

        let waiter = {
            let control = Arc::clone(&control);
            thread::spawn(move || control.checkpoint(run))
        };

        thread::sleep(Duration::from_millis(30));
        control.reset();
        assert_eq!(waiter.join().unwrap(), Err(Halted));
    }

    #[test]
    fn sleep_completes_without_stop() {
        let control = RunControl::default();
        let run = control.try_begin_run().unwrap();
        let start = Instant::now();
        assert_eq!(control.sleep(run, Duration::from_millis(20)), Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn sleep_aborts_early_on_stop() {
        let control = Arc::new(RunControl::default());
        let run = control.try_begin_run().unwrap();
        let sleeper = {
            let control = Arc::clone(&control);
            thread::spawn(move || {
                let start = Instant::now();
                (control.sleep(run, Duration::from_secs(10)), start.elapsed())
            })
        };
        thread::sleep(Duration::from_millis(30));
        control.set_stopped(true);
        let (result, slept) = sleeper.join().unwrap();
        assert_eq!(result, Err(Halted));
        assert!(slept < Duration::from_secs(5));
    }
}
