use super::constants::{LIFECYCLE_TICK, STEADY_CYCLE, TRANSIENT_DURATION, TRANSIENT_INTERVAL};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

/// The two phases broadcast to every dependent effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Default phase; progress free-runs over the configured cycle length.
    Steady,
    /// Short glitch phase entered periodically or on demand.
    Transient,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Steady => "steady",
            Phase::Transient => "transient-event",
        }
    }
}

/// Snapshot handed to observers on every tick.
///
/// `progress` is the fraction of the current phase that has elapsed, in
/// \[0, 1\]. It only grows within a phase and drops to 0 at a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifecycleState {
    pub phase: Phase,
    pub progress: f32,
}

impl LifecycleState {
    pub const INITIAL: Self = Self {
        phase: Phase::Steady,
        progress: 0.0,
    };

    #[inline]
    pub fn is_transient(&self) -> bool {
        self.phase == Phase::Transient
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Durations read once at startup.
///
/// - `tick_interval`: cadence at which the host calls `tick`
/// - `cycle_length`: time for steady progress to sweep 0 -> 1
/// - `transient_interval`: cadence at which the host calls `trigger_transient`
/// - `transient_duration`: how long a transient lasts before reverting
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub tick_interval: Duration,
    pub cycle_length: Duration,
    pub transient_interval: Duration,
    pub transient_duration: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            tick_interval: LIFECYCLE_TICK,
            cycle_length: STEADY_CYCLE,
            transient_interval: TRANSIENT_INTERVAL,
            transient_duration: TRANSIENT_DURATION,
        }
    }
}

/// Receives the lifecycle state on every tick.
///
/// A returned error is logged and the observer stays registered.
pub trait LifecycleObserver {
    fn on_lifecycle(&mut self, state: LifecycleState) -> anyhow::Result<()>;
}

impl<F> LifecycleObserver for F
where
    F: FnMut(LifecycleState) -> anyhow::Result<()>,
{
    fn on_lifecycle(&mut self, state: LifecycleState) -> anyhow::Result<()> {
        self(state)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub struct LifecycleBroadcaster {
    config: LifecycleConfig,
    state: LifecycleState,
    // Start of the current phase (or of the current steady cycle).
    baseline: Duration,
    paused_at: Option<Duration>,
    torn_down: bool,
    observers: Vec<(ObserverId, Box<dyn LifecycleObserver>)>,
    next_observer: u64,
    failures: u64,
}

impl LifecycleBroadcaster {
    pub fn new(config: LifecycleConfig, now: Duration) -> Self {
        Self {
            config,
            state: LifecycleState::INITIAL,
            baseline: now,
            paused_at: None,
            torn_down: false,
            observers: Vec::new(),
            next_observer: 0,
            failures: 0,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// After `teardown` every entry point is a no-op.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Total observer errors and panics caught since construction.
    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    /// Register an observer; observers are notified in registration order.
    pub fn subscribe(&mut self, observer: impl LifecycleObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Recompute phase and progress for `now`, then notify every observer.
    ///
    /// While paused the frozen state is returned and nobody is notified.
    pub fn tick(&mut self, now: Duration) -> LifecycleState {
        if self.torn_down || self.paused_at.is_some() {
            return self.state;
        }
        let elapsed = now.saturating_sub(self.baseline);
        match self.state.phase {
            Phase::Steady => {
                let progress = fraction(elapsed, self.config.cycle_length);
                if progress > 1.0 {
                    self.baseline = now;
                    self.state.progress = 0.0;
                    log::debug!("[lifecycle] steady cycle wrapped");
                } else {
                    self.state.progress = progress;
                }
            }
            Phase::Transient => {
                let progress = fraction(elapsed, self.config.transient_duration);
                if progress >= 1.0 {
                    self.enter(Phase::Steady, now);
                } else {
                    self.state.progress = progress;
                }
            }
        }
        self.notify();
        self.state
    }

    /// Enter `Transient` unless already there or paused.
    ///
    /// Observers see the new phase on the next `tick`.
    pub fn trigger_transient(&mut self, now: Duration) -> bool {
        if self.torn_down || self.paused_at.is_some() || self.state.is_transient() {
            return false;
        }
        self.enter(Phase::Transient, now);
        true
    }

    /// User engagement: force `(Steady, 0)` and restart the steady cycle.
    ///
    /// Observers are notified right away so the next state they see is
    /// `(Steady, 0)` regardless of the tick cadence.
    pub fn interaction(&mut self, now: Duration) {
        if self.torn_down {
            return;
        }
        let at = self.paused_at.unwrap_or(now);
        if self.state.is_transient() {
            log::debug!("[lifecycle] transient cut short by interaction");
        }
        self.enter(Phase::Steady, at);
        if self.paused_at.is_none() {
            self.notify();
        }
    }

    /// Freeze the lifecycle; time spent paused is not counted as progress.
    pub fn pause(&mut self, now: Duration) -> bool {
        if self.torn_down || self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now);
        log::info!("[lifecycle] paused in {}", self.state.phase.as_str());
        true
    }

    pub fn resume(&mut self, now: Duration) -> bool {
        let Some(at) = self.paused_at.take() else {
            return false;
        };
        self.baseline += now.saturating_sub(at);
        log::info!("[lifecycle] resumed in {}", self.state.phase.as_str());
        true
    }

    /// Drop every observer and return to the initial state for good.
    pub fn teardown(&mut self, now: Duration) {
        self.torn_down = true;
        self.observers.clear();
        self.state = LifecycleState::INITIAL;
        self.baseline = now;
        self.paused_at = None;
        log::info!("[lifecycle] torn down");
    }

    fn enter(&mut self, phase: Phase, now: Duration) {
        if phase != self.state.phase {
            log::debug!(
                "[lifecycle] {} -> {}",
                self.state.phase.as_str(),
                phase.as_str()
            );
        }
        self.state = LifecycleState {
            phase,
            progress: 0.0,
        };
        self.baseline = now;
    }

    fn notify(&mut self) {
        let state = self.state;
        for (id, observer) in self.observers.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| observer.on_lifecycle(state))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.failures += 1;
                    log::warn!("[lifecycle] observer {} failed: {:#}", id.0, e);
                }
                Err(_) => {
                    self.failures += 1;
                    log::error!("[lifecycle] observer {} panicked", id.0);
                }
            }
        }
    }
}

#[inline]
fn fraction(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()) as f32
}
