//! Embassy tick source

use embassy_time::Instant;
use txswitch_core::traits::TickSource;

/// Milliseconds per switch tick
pub const TICK_MS: u64 = 10;

/// 10 ms tick counter derived from the embassy clock
///
/// The counter wraps after `u32::MAX` ticks (about 16 months of uptime).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTicks;

impl EmbassyTicks {
    /// Create a tick source
    pub const fn new() -> Self {
        Self
    }
}

impl TickSource for EmbassyTicks {
    fn now_10ms(&self) -> u32 {
        (Instant::now().as_millis() / TICK_MS) as u32
    }
}
