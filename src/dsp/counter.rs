/// Per-voice clock counted in sample ticks.
///
/// Counts up to `ceiling` inclusive, then restarts at zero on the next
/// advance. The restart is what loops each voice without a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedCounter {
    value: u32,
    ceiling: u32,
}

impl ElapsedCounter {
    pub const fn new(ceiling: u32) -> Self {
        Self { value: 0, ceiling }
    }

    pub fn advance(&mut self) {
        if self.value < self.ceiling {
            self.value += 1;
        } else {
            self.value = 0;
        }
    }

    /// Restart immediately, independent of the natural wrap.
    pub fn restart(&mut self) {
        self.value = 0;
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_reaching_ceiling() {
        let mut counter = ElapsedCounter::new(3);
        let seen: Vec<u32> = (0..6)
            .map(|_| {
                let v = counter.value();
                counter.advance();
                v
            })
            .collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn max_ceiling_does_not_overflow() {
        let mut counter = ElapsedCounter::new(u32::MAX);
        counter.value = u32::MAX;
        counter.advance();
        assert_eq!(counter.value(), 0);
    }
}
