/// Hunger meter: a counter that drains by one per tick and rests at zero.
#[derive(Debug, Clone, Copy)]
pub struct Hunger {
    value: u32,
    max: u32,
    running: bool,
}

impl Hunger {
    /// Full meter, draining.
    pub fn new(max: u32) -> Self {
        Self {
            value: max,
            max,
            running: max > 0,
        }
    }

    /// Drain one unit. Returns false once the meter is empty and halted.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.value > 0 {
            self.value -= 1;
        }
        if self.value == 0 {
            self.running = false;
        }
        self.running
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Fill level in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.value as f32 / self.max as f32
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_by_one_per_tick() {
        let mut h = Hunger::new(100);
        assert_eq!(h.value(), 100);
        h.tick();
        assert_eq!(h.value(), 99);
        h.tick();
        assert_eq!(h.value(), 98);
        assert!((h.fraction() - 0.98).abs() < 1e-6);
    }

    #[test]
    fn halts_at_zero() {
        let mut h = Hunger::new(3);
        assert!(h.tick());
        assert!(h.tick());
        assert!(!h.tick());
        assert_eq!(h.value(), 0);
        assert!(!h.is_running());

        for _ in 0..10 {
            assert!(!h.tick());
        }
        assert_eq!(h.value(), 0);
        assert_eq!(h.fraction(), 0.0);
    }

    #[test]
    fn empty_meter_starts_halted() {
        let h = Hunger::new(0);
        assert!(!h.is_running());
        assert_eq!(h.fraction(), 0.0);
    }
}
