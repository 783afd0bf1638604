//! Periodic switch task (embassy targets)

use super::engine::SwitchEngine;
use crate::platform::time::TICK_MS;
use txswitch_core::traits::{SourceProvider, SwitchEvents, SwitchInputs, TickSource};

/// Drive the switch engine every 10 ms
///
/// `after_cycle` runs after each tick with the engine borrowed, so the
/// caller can publish logical switch states or act on the movement
/// detector without sharing the engine.
///
/// # Example
///
/// ```ignore
/// use txswitch::platform::EmbassyTicks;
/// use txswitch::subsystems::switches::{run_switches_task, SwitchEngine};
///
/// #[embassy_executor::task]
/// async fn switches_task(engine: SwitchEngine<'static, Pins, EmbassyTicks>) {
///     let mut engine = engine;
///     run_switches_task(&mut engine, &FIRMWARE_SOURCES, &mut AudioEvents, |_| {}).await;
/// }
/// ```
pub async fn run_switches_task<'a, I, T, F>(
    engine: &mut SwitchEngine<'a, I, T>,
    sources: &dyn SourceProvider,
    events: &mut dyn SwitchEvents,
    mut after_cycle: F,
) where
    I: SwitchInputs,
    T: TickSource,
    F: FnMut(&mut SwitchEngine<'a, I, T>),
{
    use embassy_time::{Duration, Ticker};

    crate::log_info!("Switch task started ({} ms tick)", TICK_MS);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));

    loop {
        ticker.next().await;
        engine.run_cycle(sources, events);
        after_cycle(engine);
    }
}
