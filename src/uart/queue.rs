//! Lock-free single-producer/single-consumer transmit ring buffer.
//!
//! `head` is the slot written last and is stored only by the [`Producer`];
//! `tail` is the slot drained last and is stored only by the [`Consumer`].
//! The queue is empty when they are equal and full when advancing `head`
//! would land on `tail`, so one slot always stays unused.
//!
//! Each side accesses the slot first and publishes its index last (Release),
//! and reads the other side's index with Acquire. This is only sound with
//! exactly one producer and one consumer, which [`TxQueue::split`] enforces.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU8, Ordering};

/// Fixed-capacity byte queue shared between application code and an interrupt.
///
/// `N` must be a power of two between 2 and 256; other values fail to compile.
pub struct TxQueue<const N: usize> {
    buffer: [UnsafeCell<u8>; N],
    head: AtomicU8,
    tail: AtomicU8,
}

// SAFETY: slots are only reached through the split halves; the index protocol
// guarantees a slot is never read and written at the same time.
unsafe impl<const N: usize> Sync for TxQueue<N> {}

impl<const N: usize> TxQueue<N> {
    const MASK: u8 = {
        assert!(N.is_power_of_two(), "TxQueue capacity must be a power of two");
        assert!(N >= 2 && N <= 256, "TxQueue capacity must be between 2 and 256");
        (N - 1) as u8
    };

    /// Creates an empty queue.
    pub const fn new() -> Self {
        let _ = Self::MASK;
        Self {
            buffer: [const { UnsafeCell::new(0) }; N],
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
        }
    }

    /// Number of bytes the queue holds when full.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of bytes waiting to be drained.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        usize::from(head.wrapping_sub(tail) & Self::MASK)
    }

    /// Returns `true` when nothing is waiting to be drained.
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Splits the queue into its producer and consumer halves.
    pub fn split(&mut self) -> (Producer<'_, N>, Consumer<'_, N>) {
        let queue = &*self;
        (Producer { queue }, Consumer { queue })
    }

    #[inline]
    fn advance(index: u8) -> u8 {
        index.wrapping_add(1) & Self::MASK
    }
}

impl<const N: usize> Default for TxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Writing half of a [`TxQueue`], used from normal (non-interrupt) context.
pub struct Producer<'a, const N: usize> {
    queue: &'a TxQueue<N>,
}

impl<const N: usize> Producer<'_, N> {
    /// Appends a byte, spinning while the queue is full.
    ///
    /// Only the consumer can free a slot, so this never returns if the
    /// consumer is not running.
    pub fn enqueue(&mut self, byte: u8) {
        let next = TxQueue::<N>::advance(self.queue.head.load(Ordering::Relaxed));
        while next == self.queue.tail.load(Ordering::Acquire) {
            core::hint::spin_loop();
        }
        self.publish(next, byte);
    }

    /// Appends a byte if there is room, otherwise hands it back.
    pub fn try_enqueue(&mut self, byte: u8) -> Result<(), u8> {
        let next = TxQueue::<N>::advance(self.queue.head.load(Ordering::Relaxed));
        if next == self.queue.tail.load(Ordering::Acquire) {
            return Err(byte);
        }
        self.publish(next, byte);
        Ok(())
    }

    /// Returns `true` when the next [`enqueue`](Self::enqueue) would spin.
    pub fn is_full(&self) -> bool {
        TxQueue::<N>::advance(self.queue.head.load(Ordering::Relaxed))
            == self.queue.tail.load(Ordering::Acquire)
    }

    fn publish(&mut self, next: u8, byte: u8) {
        // SAFETY: `next != tail`, so the consumer does not touch this slot
        // until `head` is published below.
        unsafe { *self.queue.buffer[usize::from(next)].get() = byte };
        self.queue.head.store(next, Ordering::Release);
    }
}

/// Draining half of a [`TxQueue`], used from the transmit interrupt.
pub struct Consumer<'a, const N: usize> {
    queue: &'a TxQueue<N>,
}

impl<const N: usize> Consumer<'_, N> {
    /// Removes the oldest byte, or returns `None` when the queue is empty.
    pub fn dequeue(&mut self) -> Option<u8> {
        let tail = self.queue.tail.load(Ordering::Relaxed);
        if tail == self.queue.head.load(Ordering::Acquire) {
            return None;
        }

        let next = TxQueue::<N>::advance(tail);
        // SAFETY: the slot was published by the producer, which does not
        // write it again until `tail` moves past it.
        let byte = unsafe { *self.queue.buffer[usize::from(next)].get() };
        self.queue.tail.store(next, Ordering::Release);
        Some(byte)
    }
}
