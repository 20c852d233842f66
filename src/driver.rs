//! Loop driver
//!
//! Fires [`Session::step`] at a fixed cadence on a dedicated thread. The thread
//! exits by itself when the round ends and [`TickTimer::cancel`] stops it from
//! outside; both paths join before returning, so no tick can fire afterwards.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::session::{Session, Snapshot};
use crate::sim::{Direction, GamePhase, GameState, TickOutcome};

/// Session shared between the host and the tick thread
pub type SharedSession = Arc<Mutex<Session>>;

/// Lock the session, treating a poisoned lock as "no session"
fn lock(session: &SharedSession) -> Option<MutexGuard<'_, Session>> {
    match session.lock() {
        Ok(guard) => Some(guard),
        Err(_) => {
            log::warn!("Session lock poisoned; ignoring");
            None
        }
    }
}

/// Periodic tick source running on its own thread
#[derive(Debug)]
pub struct TickTimer {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl TickTimer {
    /// Start ticking `session` every `interval`
    pub fn start(session: SharedSession, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let mut ticks = 0u64;
            let mut next = Instant::now() + interval;
            loop {
                let wait = next.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {}
                    // Explicit stop or the timer handle was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                next += interval;

                let Some(mut guard) = lock(&session) else {
                    break;
                };
                match guard.step() {
                    Some(TickOutcome::Survived { .. }) => ticks += 1,
                    Some(TickOutcome::Crashed { .. }) => {
                        ticks += 1;
                        break;
                    }
                    Some(TickOutcome::Halted) | None => break,
                }
            }
            log::debug!("Tick thread finished after {} ticks", ticks);
            ticks
        });
        log::debug!("Tick timer started ({:?} interval)", interval);
        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Whether the tick thread has exited on its own (round over or torn down)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Stop ticking and wait for the thread. Returns the number of ticks it ran.
    pub fn cancel(mut self) -> u64 {
        self.stop()
    }

    fn stop(&mut self) -> u64 {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already be gone; that's fine
            let _ = tx.send(());
        }
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(ticks)) => ticks,
            Some(Err(_)) => {
                log::warn!("Tick thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Host-facing game handle: shared session plus its tick timer
#[derive(Debug)]
pub struct Arcade {
    session: SharedSession,
    timer: Option<TickTimer>,
    interval: Duration,
    shut_down: bool,
}

impl Arcade {
    /// Create a game that isn't ticking yet. The config must already be validated.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let interval = config.tick_interval();
        Self {
            session: Arc::new(Mutex::new(Session::new(config, seed))),
            timer: None,
            interval,
            shut_down: false,
        }
    }

    /// Begin ticking. No-op if already ticking or shut down.
    pub fn start(&mut self) {
        if self.shut_down || self.timer.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }
        if let Some(finished) = self.timer.take() {
            finished.cancel();
        }
        self.timer = Some(TickTimer::start(self.session.clone(), self.interval));
    }

    /// Whether a tick thread is currently running
    pub fn is_ticking(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Queue a steering command for the next tick
    pub fn press(&self, dir: Direction) {
        if let Some(mut session) = lock(&self.session) {
            session.press(dir);
        }
    }

    /// Restart after game over and resume ticking. Returns whether a new round started.
    pub fn restart(&mut self) -> bool {
        if self.shut_down {
            return false;
        }
        let restarted = lock(&self.session).is_some_and(|mut s| s.restart());
        if restarted {
            // The old thread exited when the round ended; reap it and start fresh
            if let Some(old) = self.timer.take() {
                old.cancel();
            }
            self.timer = Some(TickTimer::start(self.session.clone(), self.interval));
        }
        restarted
    }

    pub fn phase(&self) -> Option<GamePhase> {
        lock(&self.session).map(|s| s.phase())
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        lock(&self.session).map(|s| s.snapshot())
    }

    /// Read the live state without copying it out
    pub fn inspect<R>(&self, f: impl FnOnce(&GameState) -> R) -> Option<R> {
        lock(&self.session).map(|s| f(s.state()))
    }

    /// Stop ticking and tear the session down. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if !self.shut_down {
            if let Some(mut session) = lock(&self.session) {
                session.teardown();
            }
            self.shut_down = true;
        }
    }
}

impl Drop for Arcade {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn fast_config() -> GameConfig {
        GameConfig {
            tick_interval_ms: 1,
            spawn_chance: 0.0,
            ..Default::default()
        }
    }

    fn wait_until(mut done: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done() {
            assert!(Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_timer_ticks_and_cancel_stops_it() {
        let session = Arc::new(Mutex::new(Session::new(fast_config(), 1)));
        let timer = TickTimer::start(session.clone(), Duration::from_millis(1));
        wait_until(|| session.lock().unwrap().state().score >= 5);

        let ran = timer.cancel();
        let score = session.lock().unwrap().state().score;
        assert_eq!(ran, score);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(session.lock().unwrap().state().score, score);
    }

    /// Car fills the playfield width, so the first spawn lands on it
    fn crash_config() -> GameConfig {
        GameConfig {
            tick_interval_ms: 1,
            spawn_chance: 1.0,
            playfield: Vec2::new(40.0, 600.0),
            player_start: Vec2::new(0.0, 0.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_timer_stops_on_crash() {
        let session = Arc::new(Mutex::new(Session::new(crash_config(), 3)));
        let timer = TickTimer::start(session.clone(), Duration::from_millis(1));
        wait_until(|| timer.is_finished());
        assert_eq!(session.lock().unwrap().phase(), GamePhase::GameOver);
        assert_eq!(timer.cancel(), 1);
        assert_eq!(session.lock().unwrap().state().time_ticks, 1);
    }

    #[test]
    fn test_timer_on_finished_round_counts_nothing() {
        let session = Arc::new(Mutex::new(Session::new(crash_config(), 3)));
        let timer = TickTimer::start(session.clone(), Duration::from_millis(1));
        wait_until(|| timer.is_finished());
        assert_eq!(timer.cancel(), 1);

        // Round is over; a second timer finds nothing to run
        let timer = TickTimer::start(session.clone(), Duration::from_millis(1));
        wait_until(|| timer.is_finished());
        assert_eq!(timer.cancel(), 0);
        assert_eq!(session.lock().unwrap().state().time_ticks, 1);
    }

    #[test]
    fn test_timer_exits_after_teardown() {
        let session = Arc::new(Mutex::new(Session::new(fast_config(), 1)));
        session.lock().unwrap().teardown();
        let timer = TickTimer::start(session.clone(), Duration::from_millis(1));
        wait_until(|| timer.is_finished());
        assert_eq!(timer.cancel(), 0);
    }

    #[test]
    fn test_arcade_restart_resumes_ticking() {
        let mut arcade = Arcade::new(crash_config(), 9);
        assert!(!arcade.is_ticking());
        // Restart is refused while running
        assert!(!arcade.restart());

        arcade.start();
        wait_until(|| arcade.phase() == Some(GamePhase::GameOver));
        wait_until(|| !arcade.is_ticking());

        assert!(arcade.restart());
        let snap = arcade.snapshot().unwrap();
        assert!(snap.time_ticks <= 1);
        wait_until(|| arcade.phase() == Some(GamePhase::GameOver));

        arcade.shutdown();
        arcade.shutdown();
        assert!(!arcade.is_ticking());
        assert!(!arcade.restart());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid config")]
    fn test_arcade_rejects_invalid_config() {
        let config = GameConfig {
            spawn_chance: f32::NAN,
            ..Default::default()
        };
        Arcade::new(config, 1);
    }

    #[test]
    fn test_arcade_press_moves_car() {
        let mut arcade = Arcade::new(fast_config(), 5);
        arcade.press(Direction::Right);
        arcade.start();
        wait_until(|| arcade.inspect(|s| s.time_ticks).unwrap() >= 1);
        assert_eq!(arcade.inspect(|s| s.player.pos().x), Some(160.0));
    }

    #[test]
    fn test_shutdown_stops_ticks() {
        let mut arcade = Arcade::new(fast_config(), 5);
        arcade.start();
        wait_until(|| arcade.snapshot().unwrap().score >= 3);
        arcade.shutdown();
        let score = arcade.snapshot().unwrap().score;
        thread::sleep(Duration::from_millis(20));
        assert_eq!(arcade.snapshot().unwrap().score, score);
        // Input after teardown is ignored
        arcade.press(Direction::Up);
        assert_eq!(arcade.snapshot().unwrap().player.pos.y, 500.0);
    }
}
