//! Session liveness daemon.
//!
//! Tracks last-heartbeat timestamps per peer and evicts peers that fall
//! silent past the staleness budget. Two independent staleness paths:
//! explicit [`SessionDaemon::heartbeat`] calls from request-handling code,
//! and the autonomous background scan. Peers that never send a request are
//! still reaped by the scan; peers that do get prompt feedback.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::diag::Diagnostics;

/// Heartbeat silence budget before a peer is considered stale.
pub const STALE_AFTER: Duration = Duration::from_millis(6000);

/// Cadence of the background staleness scan.
pub const SCAN_INTERVAL: Duration = Duration::from_millis(600);

/// Timing knobs for the daemon. Defaults are the protocol constants; tests
/// shrink them to keep wall-clock time down.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Silence longer than this marks a peer stale.
    pub stale_after: Duration,
    /// How often the background scan wakes. One scan pass covers every
    /// peer; cadence does not depend on registry size.
    pub scan_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stale_after: STALE_AFTER,
            scan_interval: SCAN_INTERVAL,
        }
    }
}

/// Eviction callback, fired at most once per registration.
pub type StaleHook = Box<dyn FnMut() + Send>;

struct PeerRecord {
    last_seen: Instant,
    /// Gap between the two most recent heartbeats.
    interval: Duration,
    /// Taken together with the record's removal, which makes the
    /// exactly-once guarantee hold across both staleness paths.
    on_stale: Option<StaleHook>,
}

struct Shared {
    peers: Mutex<HashMap<String, PeerRecord>>,
    active: AtomicBool,
    stop: Mutex<bool>,
    wake: Condvar,
    config: SessionConfig,
    diag: Diagnostics,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

enum Heartbeat {
    Alive,
    Stale(Option<StaleHook>),
    Unknown,
}

/// Registry of peers and their heartbeat timers, with a background monitor
/// thread that evicts stale entries.
///
/// All registry access is serialized under one mutex; eviction callbacks
/// always run outside the critical section, so a callback may re-enter the
/// daemon without deadlocking. Dropping the daemon stops the monitor
/// promptly and never fires callbacks for peers still within budget.
pub struct SessionDaemon {
    shared: Arc<Shared>,
    monitor: Option<JoinHandle<()>>,
}

impl SessionDaemon {
    /// Daemon with protocol-default timing and no diagnostics sink.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Daemon with explicit timing.
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_diagnostics(config, Diagnostics::default())
    }

    /// Daemon with explicit timing and a caller-supplied diagnostic sink.
    /// Construction spawns the background monitor.
    pub fn with_diagnostics(config: SessionConfig, diag: Diagnostics) -> Self {
        let shared = Arc::new(Shared {
            peers: Mutex::new(HashMap::new()),
            active: AtomicBool::new(false),
            stop: Mutex::new(false),
            wake: Condvar::new(),
            config,
            diag,
        });
        let monitor_shared = Arc::clone(&shared);
        let monitor = thread::spawn(move || monitor_loop(&monitor_shared));
        Self {
            shared,
            monitor: Some(monitor),
        }
    }

    /// Register a peer, stamping its timer with the current instant. The
    /// hook fires at most once, when the peer goes stale. Re-registering
    /// an already-known peer resets its timer without firing anything.
    pub fn register(&self, peer: impl Into<String>, on_stale: impl FnMut() + Send + 'static) {
        let peer = peer.into();
        self.shared.diag.emit(&format!("added peer: {peer}"));
        debug!(peer = %peer, "registering peer");

        let mut peers = lock(&self.shared.peers);
        match peers.entry(peer) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                record.last_seen = Instant::now();
                record.interval = Duration::ZERO;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(PeerRecord {
                    last_seen: Instant::now(),
                    interval: Duration::ZERO,
                    on_stale: Some(Box::new(on_stale)),
                });
            }
        }
    }

    /// Arm heartbeat validation. One-shot and idempotent; until this is
    /// called, [`heartbeat`] always reports not-validated.
    ///
    /// [`heartbeat`]: SessionDaemon::heartbeat
    pub fn activate(&self) {
        if !self.shared.active.swap(true, Ordering::SeqCst) {
            debug!("session daemon activated");
        }
    }

    /// Put the daemon back into the inactive mode. The registry is kept.
    pub fn deactivate(&self) {
        self.shared.active.store(false, Ordering::SeqCst);
        debug!("session daemon deactivated");
    }

    /// Record a heartbeat for a peer.
    ///
    /// Reports `false` when the daemon is not activated, the peer is
    /// unknown, or the gap since the previous heartbeat exceeded the
    /// budget. In the last case the peer is evicted and its hook fires
    /// exactly once. Concurrent heartbeats for one peer resolve by
    /// last-write-wins on the timer.
    pub fn heartbeat(&self, peer: &str) -> bool {
        if !self.shared.active.load(Ordering::SeqCst) {
            self.shared.diag.emit("session daemon not active yet");
            debug!(peer, "heartbeat ignored: daemon not activated");
            return false;
        }

        let outcome = {
            let mut peers = lock(&self.shared.peers);
            let now = Instant::now();
            if let Some(record) = peers.get_mut(peer) {
                record.interval = now.duration_since(record.last_seen);
                record.last_seen = now;
                if record.interval < self.shared.config.stale_after {
                    Heartbeat::Alive
                } else {
                    let hook = peers.remove(peer).and_then(|mut r| r.on_stale.take());
                    Heartbeat::Stale(hook)
                }
            } else {
                Heartbeat::Unknown
            }
        };

        match outcome {
            Heartbeat::Alive => true,
            Heartbeat::Stale(hook) => {
                self.shared.diag.emit(&format!("peer went stale: {peer}"));
                warn!(peer, "heartbeat arrived past the staleness budget");
                if let Some(mut hook) = hook {
                    hook();
                }
                false
            }
            Heartbeat::Unknown => {
                self.shared.diag.emit(&format!("peer does not exist: {peer}"));
                warn!(peer, "heartbeat for unregistered peer");
                false
            }
        }
    }

    /// Whether heartbeat validation is armed.
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::SeqCst)
    }

    /// Whether the peer is currently registered.
    pub fn has_peer(&self, peer: &str) -> bool {
        lock(&self.shared.peers).contains_key(peer)
    }

    /// Number of registered peers.
    pub fn peer_count(&self) -> usize {
        lock(&self.shared.peers).len()
    }
}

impl Default for SessionDaemon {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionDaemon {
    fn drop(&mut self) {
        *lock(&self.shared.stop) = true;
        self.shared.wake.notify_all();
        if let Some(monitor) = self.monitor.take() {
            let _ = monitor.join();
        }
    }
}

/// Background scan. Wakes once per `scan_interval` regardless of registry
/// size, removes every peer past the budget, then fires the collected
/// hooks with the registry unlocked.
fn monitor_loop(shared: &Shared) {
    loop {
        {
            let stop = lock(&shared.stop);
            if *stop {
                return;
            }
            let (stop, _timed_out) = shared
                .wake
                .wait_timeout(stop, shared.config.scan_interval)
                .unwrap_or_else(PoisonError::into_inner);
            if *stop {
                return;
            }
        }
        sweep(shared);
    }
}

fn sweep(shared: &Shared) {
    let now = Instant::now();
    let mut evicted: Vec<(String, Option<StaleHook>)> = Vec::new();
    {
        let mut peers = lock(&shared.peers);
        let stale: Vec<String> = peers
            .iter()
            .filter(|(_, record)| now.duration_since(record.last_seen) > shared.config.stale_after)
            .map(|(peer, _)| peer.clone())
            .collect();
        for peer in stale {
            let hook = peers.remove(&peer).and_then(|mut r| r.on_stale.take());
            evicted.push((peer, hook));
        }
    }
    for (peer, hook) in evicted {
        shared.diag.emit(&format!("evicting stale peer: {peer}"));
        debug!(peer = %peer, "peer exceeded heartbeat budget, evicting");
        if let Some(mut hook) = hook {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn fast(stale_ms: u64, scan_ms: u64) -> SessionConfig {
        SessionConfig {
            stale_after: Duration::from_millis(stale_ms),
            scan_interval: Duration::from_millis(scan_ms),
        }
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hook_count = Arc::clone(&count);
        (count, move || {
            hook_count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn heartbeat_before_activation_is_not_validated() {
        let daemon = SessionDaemon::with_config(fast(5000, 5000));
        let (fired, hook) = counter();
        daemon.register("svc", hook);

        assert!(!daemon.heartbeat("svc"));
        assert!(daemon.has_peer("svc"));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_peer_is_not_validated() {
        let daemon = SessionDaemon::with_config(fast(5000, 5000));
        daemon.activate();
        assert!(!daemon.heartbeat("ghost"));
    }

    #[test]
    fn heartbeat_within_budget_succeeds_and_resets_the_timer() {
        let daemon = SessionDaemon::with_config(fast(2000, 5000));
        let (fired, hook) = counter();
        daemon.register("svc", hook);
        daemon.activate();

        assert!(daemon.heartbeat("svc"));
        thread::sleep(Duration::from_millis(50));
        assert!(daemon.heartbeat("svc"));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn late_heartbeat_evicts_and_fires_exactly_once() {
        // Scan effectively disabled so only the heartbeat path runs.
        let daemon = SessionDaemon::with_config(fast(80, 60_000));
        let (fired, hook) = counter();
        daemon.register("svc", hook);
        daemon.activate();

        thread::sleep(Duration::from_millis(200));
        assert!(!daemon.heartbeat("svc"));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!daemon.has_peer("svc"));

        // Second late heartbeat finds no record and cannot re-fire.
        assert!(!daemon.heartbeat("svc"));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn background_scan_reaps_silent_peers_exactly_once() {
        let daemon = SessionDaemon::with_config(fast(100, 20));
        let (fired, hook) = counter();
        daemon.register("silent", hook);

        // Never heartbeated; the scan alone must evict it.
        thread::sleep(Duration::from_millis(500));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!daemon.has_peer("silent"));

        thread::sleep(Duration::from_millis(200));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reregistration_resets_the_timer_without_firing() {
        let daemon = SessionDaemon::with_config(fast(400, 60_000));
        let (fired, hook) = counter();
        daemon.register("svc", hook);
        daemon.activate();

        thread::sleep(Duration::from_millis(300));
        let (ignored, second_hook) = counter();
        daemon.register("svc", second_hook);

        thread::sleep(Duration::from_millis(200));
        // 500ms have passed since first registration, but only 200ms since
        // the re-registration reset the timer.
        assert!(daemon.heartbeat("svc"));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(ignored.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn deactivate_gates_validation_but_keeps_the_registry() {
        let daemon = SessionDaemon::with_config(fast(5000, 5000));
        let (_, hook) = counter();
        daemon.register("svc", hook);
        daemon.activate();
        assert!(daemon.heartbeat("svc"));

        daemon.deactivate();
        assert!(!daemon.is_active());
        assert!(!daemon.heartbeat("svc"));
        assert!(daemon.has_peer("svc"));
    }

    #[test]
    fn shutdown_spares_peers_within_budget() {
        let (fired, hook) = counter();
        {
            let daemon = SessionDaemon::with_config(fast(5000, 10));
            daemon.register("svc", hook);
            thread::sleep(Duration::from_millis(50));
        }
        // Monitor joined; nothing fired for a fresh peer.
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn concurrent_registration_and_heartbeats_lose_nothing() {
        let daemon = Arc::new(SessionDaemon::with_config(fast(2000, 10)));
        daemon.activate();
        let evictions = Arc::new(AtomicUsize::new(0));

        let threads = 4;
        let peers_per_thread = 25;
        let mut handles = Vec::new();
        for t in 0..threads {
            let daemon = Arc::clone(&daemon);
            let evictions = Arc::clone(&evictions);
            handles.push(thread::spawn(move || {
                for p in 0..peers_per_thread {
                    let peer = format!("peer-{t}-{p}");
                    let evictions = Arc::clone(&evictions);
                    daemon.register(peer.clone(), move || {
                        evictions.fetch_add(1, Ordering::SeqCst);
                    });
                }
                for _ in 0..10 {
                    for p in 0..peers_per_thread {
                        assert!(daemon.heartbeat(&format!("peer-{t}-{p}")));
                    }
                    thread::sleep(Duration::from_millis(5));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(daemon.peer_count(), threads * peers_per_thread);
        assert_eq!(evictions.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn eviction_callback_may_reenter_the_daemon() {
        let daemon = Arc::new(SessionDaemon::with_config(fast(60, 20)));
        let observed = Arc::new(AtomicUsize::new(0));
        let reentrant = Arc::clone(&daemon);
        let seen = Arc::clone(&observed);
        daemon.register("svc", move || {
            // Callbacks run outside the registry lock, so this must not
            // deadlock.
            seen.store(reentrant.peer_count() + 1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(300));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }
}
