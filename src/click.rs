/// Double-click window in seconds.
const DOUBLE_CLICK_WINDOW: f64 = 0.5;

/// What a left-button state change means to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEvent {
    Pressed { double: bool },
    Released,
}

/// Tracks left-button state and derives double clicks.
///
/// Every press is reported. Presses less than the double-click window apart
/// form a run; only the second press of a run is flagged `double`.
pub struct ClickState {
    left_was_down: bool,
    last_press_time: Option<f64>,
    /// Presses in the current run.
    run: u32,
    /// Elapsed time since app start (accumulated).
    elapsed: f64,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            left_was_down: false,
            last_press_time: None,
            run: 0,
            elapsed: 0.0,
        }
    }

    /// Advance the internal clock. Call once per frame.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    /// Feed a raw left-button state. Returns an event only on edges.
    pub fn update(&mut self, left_down: bool) -> Option<ClickEvent> {
        let event = match (left_down, self.left_was_down) {
            (true, false) => {
                let in_run = self
                    .last_press_time
                    .is_some_and(|t| self.elapsed - t < DOUBLE_CLICK_WINDOW);
                self.run = if in_run { self.run.saturating_add(1) } else { 1 };
                self.last_press_time = Some(self.elapsed);
                Some(ClickEvent::Pressed {
                    double: self.run == 2,
                })
            }
            (false, true) => Some(ClickEvent::Released),
            _ => None,
        };
        self.left_was_down = left_down;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_only() {
        let mut c = ClickState::new();
        assert_eq!(c.update(false), None);
        assert_eq!(c.update(true), Some(ClickEvent::Pressed { double: false }));
        assert_eq!(c.update(true), None);
        assert_eq!(c.update(false), Some(ClickEvent::Released));
        assert_eq!(c.update(false), None);
    }

    #[test]
    fn quick_second_press_is_double() {
        let mut c = ClickState::new();
        c.update(true);
        c.update(false);
        c.advance(0.2);
        assert_eq!(c.update(true), Some(ClickEvent::Pressed { double: true }));
    }

    #[test]
    fn slow_second_press_is_single() {
        let mut c = ClickState::new();
        c.update(true);
        c.update(false);
        c.advance(0.8);
        assert_eq!(c.update(true), Some(ClickEvent::Pressed { double: false }));
    }

    fn press_release(c: &mut ClickState) -> bool {
        let pressed = c.update(true);
        c.update(false);
        matches!(pressed, Some(ClickEvent::Pressed { double: true }))
    }

    #[test]
    fn rapid_run_yields_one_double() {
        let mut c = ClickState::new();
        let mut doubles = 0;
        for _ in 0..4 {
            if press_release(&mut c) {
                doubles += 1;
            }
            c.advance(0.1);
        }
        assert_eq!(doubles, 1);
    }

    #[test]
    fn pause_starts_a_new_run() {
        let mut c = ClickState::new();
        press_release(&mut c);
        c.advance(0.1);
        assert!(press_release(&mut c));
        c.advance(0.1);
        assert!(!press_release(&mut c));

        c.advance(0.6);
        assert!(!press_release(&mut c));
        c.advance(0.2);
        assert!(press_release(&mut c));
    }
}
