use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Fixed-timestep clock owned by the controller: elapsed time `t`, tick
/// counter `it` and the timestep `dt` that ties them together.
#[derive(Debug, Clone, PartialEq)]
pub struct TickClock {
    pub t: f32,
    pub it: u64,
    pub dt: f32,
}

impl TickClock {
    pub fn new(dt: f32) -> Self {
        Self { t: 0.0, it: 0, dt }
    }

    /// Rewinds to the start of time without touching `dt`.
    pub fn reset(&mut self) {
        self.t = 0.0;
        self.it = 0;
    }

    /// Advances by exactly one tick.
    pub fn advance(&mut self) {
        self.t += self.dt;
        self.it += 1;
    }

    /// The tick period as a wall-clock duration.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f32(self.dt.max(0.0))
    }
}

/// Cooperative shutdown flag for the scheduler loop.
///
/// The loop paces itself with [`ShutdownSignal::wait_timeout`], which
/// doubles as the cancellation point: signalling shutdown wakes any
/// waiter immediately instead of letting it sleep out the tick period.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    shared: Arc<(Mutex<bool>, Condvar)>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag and wakes all waiters.
    pub fn shutdown(&self) {
        let (flag, condvar) = &*self.shared;
        *Self::lock(flag) = true;
        condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        *Self::lock(&self.shared.0)
    }

    /// Blocks for at most `timeout`, returning early if shutdown is
    /// signalled. Returns `true` once shutdown has been requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (flag, condvar) = &*self.shared;
        let mut guard = Self::lock(flag);
        let deadline = std::time::Instant::now() + timeout;
        while !*guard {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            if remaining.is_zero() {
                return *guard;
            }
            let (next, result) = match condvar.wait_timeout(guard, remaining) {
                Ok((next, result)) => (next, result),
                Err(poisoned) => {
                    let (next, result) = poisoned.into_inner();
                    (next, result)
                }
            };
            guard = next;
            if result.timed_out() {
                return *guard;
            }
        }
        true
    }

    /// A poisoned flag only means another thread panicked mid-toggle;
    /// the boolean itself is still meaningful.
    fn lock(flag: &Mutex<bool>) -> std::sync::MutexGuard<'_, bool> {
        match flag.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
