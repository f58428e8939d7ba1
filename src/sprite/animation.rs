/// Cyclic frame index over a fixed number of frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameAnimation {
    frame: usize,
    frame_count: usize,
}

impl FrameAnimation {
    /// Panics if `frame_count` is zero.
    pub fn new(frame_count: usize) -> Self {
        assert!(frame_count > 0, "animation needs at least one frame");
        Self {
            frame: 0,
            frame_count,
        }
    }

    /// Step to the next frame, wrapping to 0 after the last one.
    pub fn advance(&mut self) -> usize {
        self.frame = (self.frame + 1) % self.frame_count;
        self.frame
    }

    pub fn current(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_and_wraps_after_n_ticks() {
        let mut anim = FrameAnimation::new(11);
        assert_eq!(anim.current(), 0);

        let seen: Vec<usize> = (0..11).map(|_| anim.advance()).collect();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 0]);
        assert_eq!(anim.current(), 0);
    }

    #[test]
    fn index_stays_in_range() {
        let mut anim = FrameAnimation::new(3);
        for _ in 0..100 {
            assert!(anim.advance() < anim.frame_count());
        }
    }

    #[test]
    fn single_frame_never_moves() {
        let mut anim = FrameAnimation::new(1);
        assert_eq!(anim.advance(), 0);
        assert_eq!(anim.advance(), 0);
    }

    #[test]
    #[should_panic]
    fn zero_frames_rejected() {
        let _ = FrameAnimation::new(0);
    }
}
