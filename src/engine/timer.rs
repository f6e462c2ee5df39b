/// Cancellable single-shot timer counted in sample ticks.
///
/// Holds at most one pending expiry. Arming while a previous expiry is
/// still pending replaces it, so only the most recent payload can ever fire.
/// The payload is what the expiry handler acts on, captured at arm time.
#[derive(Debug, Clone, Copy)]
pub struct OneShot<T> {
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone, Copy)]
struct Pending<T> {
    remaining: u32,
    payload: T,
}

impl<T> OneShot<T> {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Fire `payload` on the `delay`-th call to [`tick`](Self::tick) from now.
    /// A zero delay fires on the next tick. Returns the payload it displaced.
    pub fn arm(&mut self, delay: u32, payload: T) -> Option<T> {
        self.pending
            .replace(Pending {
                remaining: delay,
                payload,
            })
            .map(|p| p.payload)
    }

    /// Drop the pending expiry, if any, without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Count down one tick. Yields the payload when the timer expires.
    pub fn tick(&mut self) -> Option<T> {
        let pending = self.pending.as_mut()?;
        if pending.remaining <= 1 {
            return self.pending.take().map(|p| p.payload);
        }
        pending.remaining -= 1;
        None
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticks left until expiry.
    pub fn remaining(&self) -> Option<u32> {
        self.pending.as_ref().map(|p| p.remaining.max(1))
    }

    pub fn payload(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.payload)
    }
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_until_fire(timer: &mut OneShot<u8>) -> Option<(u32, u8)> {
        for n in 1..=1000 {
            if let Some(payload) = timer.tick() {
                return Some((n, payload));
            }
        }
        None
    }

    #[test]
    fn fires_after_delay() {
        let mut timer = OneShot::new();
        timer.arm(5, 7u8);
        assert_eq!(timer.remaining(), Some(5));
        assert_eq!(ticks_until_fire(&mut timer), Some((5, 7)));
        assert!(!timer.is_pending());
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn zero_delay_fires_next_tick() {
        let mut timer = OneShot::new();
        timer.arm(0, 1u8);
        assert_eq!(timer.tick(), Some(1));
    }

    #[test]
    fn rearm_replaces_pending() {
        let mut timer = OneShot::new();
        assert_eq!(timer.arm(10, 1u8), None);
        timer.tick();
        assert_eq!(timer.arm(3, 2u8), Some(1));
        assert_eq!(ticks_until_fire(&mut timer), Some((3, 2)));
        // The displaced expiry never fires.
        assert_eq!(ticks_until_fire(&mut timer), None);
    }

    #[test]
    fn cancel_prevents_expiry() {
        let mut timer = OneShot::new();
        timer.arm(2, 9u8);
        assert_eq!(timer.cancel(), Some(9));
        assert_eq!(ticks_until_fire(&mut timer), None);
    }
}
