/// Fixed-capacity FIFO of local cell coordinates.
///
/// Capacity is a power of two so the read and write cursors wrap with a mask.
/// One slot is always left free to tell a full ring from an empty one; callers
/// size the ring so a single search can never fill it.
pub struct Frontier {
    slots: Box<[(i32, i32)]>,
    mask: usize,
    read: usize,
    write: usize,
}

impl Frontier {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity.is_power_of_two(), "frontier capacity {capacity} is not a power of two");
        Self {
            slots: vec![(0, 0); capacity].into_boxed_slice(),
            mask: capacity - 1,
            read: 0,
            write: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize { self.slots.len() }

    #[inline]
    pub fn len(&self) -> usize { self.write.wrapping_sub(self.read) & self.mask }

    #[inline]
    pub fn is_empty(&self) -> bool { self.read == self.write }

    #[inline]
    pub fn clear(&mut self) {
        self.read = 0;
        self.write = 0;
    }

    #[inline(always)]
    pub fn push(&mut self, x: i32, y: i32) {
        debug_assert!(self.len() + 1 < self.capacity(), "frontier overflow at {} cells", self.len());
        self.slots[self.write] = (x, y);
        self.write = (self.write + 1) & self.mask;
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<(i32, i32)> {
        if self.is_empty() {
            return None;
        }
        let cell = self.slots[self.read];
        self.read = (self.read + 1) & self.mask;
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = Frontier::with_capacity(8);
        assert!(q.is_empty());
        q.push(1, 1);
        q.push(2, 2);
        q.push(3, 3);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some((1, 1)));
        assert_eq!(q.pop(), Some((2, 2)));
        assert_eq!(q.pop(), Some((3, 3)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn cursors_wrap_around() {
        let mut q = Frontier::with_capacity(4);
        for round in 0..10 {
            q.push(round, 0);
            q.push(round, 1);
            assert_eq!(q.pop(), Some((round, 0)));
            assert_eq!(q.pop(), Some((round, 1)));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn clear_discards_pending_cells() {
        let mut q = Frontier::with_capacity(16);
        q.push(5, 5);
        q.push(6, 6);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn rejects_odd_capacity() {
        Frontier::with_capacity(100);
    }
}
