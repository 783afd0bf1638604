//! Sticky switch mailbox
//!
//! Bounded single-producer/single-consumer queue carrying "set sticky switch"
//! commands from the script context into the evaluation tick. Lock-free:
//! both sides only load and store atomics, so the producer may run
//! concurrently with the tick (or from an interrupt).
//!
//! # Message format
//!
//! ```text
//! bit 7     new state
//! bit 6     always set (a zero byte is never a valid message)
//! bit 0-5   logical switch index (0-63)
//! ```
//!
//! # Example
//!
//! ```
//! use txswitch_core::mailbox::StickyMailbox;
//!
//! let mut mailbox = StickyMailbox::new();
//! let (mut producer, mut consumer) = mailbox.split();
//!
//! assert!(producer.try_push(3, true));
//! let command = consumer.pop().unwrap();
//! assert_eq!(command.index, 3);
//! assert!(command.state);
//! ```

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Number of slots (power of two)
pub const MAILBOX_CAPACITY: usize = 8;

const INDEX_MASK: usize = MAILBOX_CAPACITY - 1;

const MSG_STATE: u8 = 1 << 7;
const MSG_VALID: u8 = 1 << 6;
const MSG_INDEX: u8 = 0x3F;

/// Request to force a sticky logical switch on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickyCommand {
    /// Logical switch index (0-63)
    pub index: u8,
    /// New latch state
    pub state: bool,
}

impl StickyCommand {
    /// Encode into the one-byte wire format
    pub const fn encode(self) -> u8 {
        let state = if self.state { MSG_STATE } else { 0 };
        MSG_VALID | state | (self.index & MSG_INDEX)
    }

    /// Decode from the one-byte wire format
    pub const fn decode(raw: u8) -> Option<Self> {
        if raw & MSG_VALID == 0 {
            return None;
        }
        Some(Self {
            index: raw & MSG_INDEX,
            state: raw & MSG_STATE != 0,
        })
    }
}

/// Fixed-capacity SPSC ring buffer of sticky commands
///
/// `head` counts messages written and `tail` messages read; both only move
/// forward and wrap around `usize`. The queue holds `head - tail` messages.
pub struct StickyMailbox {
    slots: [AtomicU8; MAILBOX_CAPACITY],
    head: AtomicUsize,
    tail: AtomicUsize,
}

impl StickyMailbox {
    /// Create an empty mailbox (const fn for static initialization)
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU8::new(0) }; MAILBOX_CAPACITY],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Split into the producer (script side) and consumer (tick side)
    pub fn split(&mut self) -> (StickyProducer<'_>, StickyConsumer<'_>) {
        let mailbox: &Self = self;
        (StickyProducer { mailbox }, StickyConsumer { mailbox })
    }

    /// Number of queued messages
    pub fn len(&self) -> usize {
        self.head
            .load(Ordering::Acquire)
            .wrapping_sub(self.tail.load(Ordering::Acquire))
    }

    /// Check if no message is queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StickyMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Writing end of a [`StickyMailbox`]
pub struct StickyProducer<'a> {
    mailbox: &'a StickyMailbox,
}

impl StickyProducer<'_> {
    /// Queue a command
    ///
    /// Returns `false` without side effects if all slots are in use.
    pub fn try_push(&mut self, index: u8, state: bool) -> bool {
        let head = self.mailbox.head.load(Ordering::Relaxed);
        let tail = self.mailbox.tail.load(Ordering::Acquire);
        if head.wrapping_sub(tail) >= MAILBOX_CAPACITY {
            return false;
        }

        let raw = StickyCommand { index, state }.encode();
        self.mailbox.slots[head & INDEX_MASK].store(raw, Ordering::Relaxed);
        self.mailbox.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }
}

/// Reading end of a [`StickyMailbox`]
pub struct StickyConsumer<'a> {
    mailbox: &'a StickyMailbox,
}

impl StickyConsumer<'_> {
    /// Take the oldest queued command
    pub fn pop(&mut self) -> Option<StickyCommand> {
        loop {
            let tail = self.mailbox.tail.load(Ordering::Relaxed);
            let head = self.mailbox.head.load(Ordering::Acquire);
            if tail == head {
                return None;
            }

            let raw = self.mailbox.slots[tail & INDEX_MASK].load(Ordering::Relaxed);
            self.mailbox.tail.store(tail.wrapping_add(1), Ordering::Release);
            if let Some(command) = StickyCommand::decode(raw) {
                return Some(command);
            }
        }
    }

    /// Drop every queued command
    pub fn clear(&mut self) {
        let head = self.mailbox.head.load(Ordering::Acquire);
        self.mailbox.tail.store(head, Ordering::Release);
    }

    /// Number of queued messages
    pub fn len(&self) -> usize {
        self.mailbox.len()
    }

    /// Check if no message is queued
    pub fn is_empty(&self) -> bool {
        self.mailbox.is_empty()
    }
}
