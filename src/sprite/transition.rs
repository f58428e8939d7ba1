/// Horizontal slide of the animated sprite toward a target x.
///
/// Moves a fixed number of pixels per tick and lands exactly on the target.
/// A new `start` replaces any transition in flight.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    offset: i32,
    target: i32,
    step: i32,
    mirrored: bool,
    active: bool,
}

impl Transition {
    pub fn new(step: i32) -> Self {
        assert!(step > 0, "transition step must be positive");
        Self {
            offset: 0,
            target: 0,
            step,
            mirrored: false,
            active: false,
        }
    }

    /// Begin sliding toward `target`. Returns false if already there.
    ///
    /// The mirror flag follows the direction of travel: set when heading
    /// left, cleared when heading right, untouched for a zero-length move.
    pub fn start(&mut self, target: i32) -> bool {
        self.target = target;
        if target == self.offset {
            self.active = false;
            return false;
        }
        self.mirrored = target < self.offset;
        self.active = true;
        true
    }

    /// Move one step. Returns whether the transition is still running.
    pub fn step(&mut self) -> bool {
        if !self.active {
            return false;
        }

        if self.offset < self.target {
            self.offset = (self.offset + self.step).min(self.target);
        } else if self.offset > self.target {
            self.offset = (self.offset - self.step).max(self.target);
        }

        if self.offset == self.target {
            self.active = false;
        }
        self.active
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(t: &mut Transition) -> Vec<i32> {
        let mut path = Vec::new();
        while t.step() {
            path.push(t.offset());
        }
        path.push(t.offset());
        path
    }

    #[test]
    fn approaches_target_monotonically_and_stops_exactly() {
        let mut t = Transition::new(4);
        assert!(t.start(10));
        let path = run_to_end(&mut t);

        assert_eq!(path, vec![4, 8, 10]);
        assert!(path.windows(2).all(|w| w[0] < w[1]));
        assert!(!t.is_active());
        assert!(!t.is_mirrored());

        // Further steps are no-ops.
        assert!(!t.step());
        assert_eq!(t.offset(), 10);
    }

    #[test]
    fn moving_left_mirrors_and_stays_mirrored_on_arrival() {
        let mut t = Transition::new(4);
        t.start(12);
        run_to_end(&mut t);

        assert!(t.start(3));
        assert!(t.is_mirrored());
        let path = run_to_end(&mut t);
        assert_eq!(path, vec![8, 4, 3]);
        assert!(t.is_mirrored());
    }

    #[test]
    fn negative_targets_are_reachable() {
        let mut t = Transition::new(4);
        t.start(-9);
        assert!(t.is_mirrored());
        let path = run_to_end(&mut t);
        assert_eq!(*path.last().unwrap(), -9);
        assert!(path.iter().all(|&x| x >= -9));
    }

    #[test]
    fn restart_replaces_active_transition() {
        let mut t = Transition::new(4);
        t.start(100);
        t.step();
        t.step();
        assert_eq!(t.offset(), 8);

        // Last request wins, direction flips.
        t.start(0);
        assert!(t.is_mirrored());
        assert_eq!(t.target(), 0);
        let path = run_to_end(&mut t);
        assert_eq!(path, vec![4, 0]);

        t.start(20);
        assert!(!t.is_mirrored());
    }

    #[test]
    fn zero_length_request_completes_immediately() {
        let mut t = Transition::new(4);
        t.start(-8);
        run_to_end(&mut t);
        assert!(t.is_mirrored());

        assert!(!t.start(-8));
        assert!(!t.is_active());
        assert!(t.is_mirrored());
    }
}
