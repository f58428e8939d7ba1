use instant::Instant;

/// Which part of a frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FramePhase {
    SceneUpdate = 0,
    BuildDraws = 1,
    GpuUpload = 2,
    Overlay = 3,
    RenderSubmit = 4,
}

const PHASE_COUNT: usize = 5;

impl FramePhase {
    pub const ALL: [FramePhase; PHASE_COUNT] = [
        Self::SceneUpdate,
        Self::BuildDraws,
        Self::GpuUpload,
        Self::Overlay,
        Self::RenderSubmit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SceneUpdate => "Scene",
            Self::BuildDraws => "Draw List",
            Self::GpuUpload => "GPU Upload",
            Self::Overlay => "Overlay",
            Self::RenderSubmit => "Render",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct PhaseTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; PHASE_COUNT],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl PhaseTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; PHASE_COUNT],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: FramePhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: FramePhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_converges_toward_samples() {
        let mut t = PhaseTimers::new();
        for _ in 0..200 {
            t.record(FramePhase::GpuUpload, 100.0);
        }
        let v = t.durations_us[FramePhase::GpuUpload as usize];
        assert!((v - 100.0).abs() < 0.01);
        assert_eq!(t.durations_us[FramePhase::SceneUpdate as usize], 0.0);
    }

    #[test]
    fn every_phase_has_a_slot() {
        for (i, phase) in FramePhase::ALL.iter().enumerate() {
            assert_eq!(*phase as usize, i);
            assert!(!phase.label().is_empty());
        }
    }
}
