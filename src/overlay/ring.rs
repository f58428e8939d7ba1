/// Fixed-capacity circular buffer of frame samples. Allocates once.
pub struct RingBuffer<T> {
    buf: Vec<T>,
    head: usize,
    len: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer needs capacity");
        Self {
            buf: vec![T::default(); capacity],
            head: 0,
            len: 0,
        }
    }

    /// Append, overwriting the oldest sample once full.
    pub fn push(&mut self, value: T) {
        let cap = self.buf.len();
        self.buf[self.head] = value;
        self.head = (self.head + 1) % cap;
        self.len = (self.len + 1).min(cap);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let cap = self.buf.len();
        let start = (self.head + cap - self.len) % cap;
        (0..self.len).map(move |i| &self.buf[(start + i) % cap])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_oldest_first_before_wrapping() {
        let mut r = RingBuffer::new(4);
        assert_eq!(r.len(), 0);
        r.push(1);
        r.push(2);
        assert_eq!(r.iter().copied().collect::<Vec<i32>>(), vec![1, 2]);
    }

    #[test]
    fn overwrites_oldest_when_full() {
        let mut r = RingBuffer::new(3);
        for v in 1..=5 {
            r.push(v);
        }
        assert_eq!(r.len(), 3);
        assert_eq!(r.iter().copied().collect::<Vec<i32>>(), vec![3, 4, 5]);
    }
}
