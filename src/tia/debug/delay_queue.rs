use crate::tia::chip::{PendingWrite, TiaChip};
use std::fmt;
use std::iter::FusedIterator;

/// Read-only walk over the writes the core has queued but not applied.
///
/// Holds a shared borrow of the chip, so the emulation can't be stepped
/// (and the queue can't change underneath) until the iterator is dropped.
/// Entries come out in whatever order the core keeps them.
pub struct DelayQueueIterator<'a> {
    inner: Box<dyn Iterator<Item = PendingWrite> + 'a>,
    done: bool,
}

impl<'a> DelayQueueIterator<'a> {
    pub fn new<C: TiaChip + ?Sized>(chip: &'a C) -> Self {
        Self {
            inner: chip.pending_writes(),
            done: false,
        }
    }
}

impl Iterator for DelayQueueIterator<'_> {
    type Item = PendingWrite;

    fn next(&mut self) -> Option<PendingWrite> {
        if self.done {
            return None;
        }
        let next = self.inner.next();
        self.done = next.is_none();
        next
    }
}

impl FusedIterator for DelayQueueIterator<'_> {}

impl fmt::Debug for DelayQueueIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DelayQueueIterator")
            .field("done", &self.done)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tia::registers::WriteRegister;
    use crate::tia::test_utils::MockTia;

    #[test]
    fn test_empty_queue_yields_nothing() {
        let tia = MockTia::new();
        let mut iter = DelayQueueIterator::new(&tia);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_yields_each_pending_write_once() {
        let mut tia = MockTia::new();
        tia.poke(WriteRegister::Pf1.addr(), 0xAA); // 2 clocks
        tia.poke(WriteRegister::Grp0.addr(), 0x3C); // 1 clock
        tia.poke(WriteRegister::Hmp0.addr(), 0x70); // 2 clocks
        tia.poke(WriteRegister::Colubk.addr(), 0x1E); // immediate

        let pending: Vec<_> = DelayQueueIterator::new(&tia).collect();
        assert_eq!(
            pending,
            vec![
                PendingWrite { address: 0x1B, value: 0x3C, delay: 1 },
                PendingWrite { address: 0x0E, value: 0xAA, delay: 2 },
                PendingWrite { address: 0x20, value: 0x70, delay: 2 },
            ]
        );
    }

    #[test]
    fn test_does_not_consume_the_queue() {
        let mut tia = MockTia::new();
        tia.poke(WriteRegister::Enabl.addr(), 0x02);

        assert_eq!(DelayQueueIterator::new(&tia).count(), 1);
        assert_eq!(DelayQueueIterator::new(&tia).count(), 1);

        tia.tick(1);
        assert_eq!(DelayQueueIterator::new(&tia).count(), 0);
        assert_eq!(tia.register(WriteRegister::Enabl), 0x02);
    }

    #[test]
    fn test_delays_count_down() {
        let mut tia = MockTia::new();
        tia.poke(WriteRegister::Hmove.addr(), 0);
        tia.tick(4);

        let pending: Vec<_> = DelayQueueIterator::new(&tia).collect();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].register(), Some(WriteRegister::Hmove));
        assert_eq!(pending[0].delay, 2);
    }
}
