//! Logical switch evaluation
//!
//! `get_logical_switch` computes the raw result of one logical switch from
//! its function family, then passes it through the delay/duration gate.
//! Timers, sticky latches and edge detectors only read their memory here;
//! it is advanced by the periodic timer tick.

use super::engine::SwitchEngine;
use super::GetSwitchFlags;
use txswitch_core::logical::{
    apply_delay_duration, FunctionFamily, LogicalSwitchConfig, LogicalSwitchContext,
    LogicalSwitchFunction, LogicalSwitchMemory,
};
use txswitch_core::source::{percent_to_resx, ValueSourceKind, MAX_LOGICAL_SWITCHES};
use txswitch_core::traits::{SourceProvider, SwitchEvents, SwitchInputs, TickSource};

/// Sample and threshold of an offset or difference function
#[derive(Debug, Clone, Copy)]
struct Operands {
    x: i32,
    y: i32,
    /// Global variables compare exactly, without stick tolerance
    exact: bool,
}

impl<I: SwitchInputs, T: TickSource> SwitchEngine<'_, I, T> {
    /// Evaluate one logical switch in the current flight mode
    ///
    /// Updates the context's gate state and, for difference functions, its
    /// last triggering value. Does not publish the result; see
    /// [`SwitchEngine::eval_logical_switches`].
    pub fn get_logical_switch(&mut self, index: usize, sources: &dyn SourceProvider) -> bool {
        let config = self.model.logical_switch(index);
        let no_flags = GetSwitchFlags::empty();

        let gated = config.function == LogicalSwitchFunction::None
            || (!config.and_switch.is_none()
                && !self.get_switch(config.and_switch, no_flags, sources));

        let bool_inputs = if !gated && config.family() == FunctionFamily::Bool {
            (
                self.get_switch(config.v1_switch(), no_flags, sources),
                self.get_switch(config.v2_switch(), no_flags, sources),
            )
        } else {
            (false, false)
        };
        let tolerance = self.params.almost_equal_tolerance();

        let flight_mode = self.current_flight_mode as usize;
        let Some(context) = self.bank.context_mut(flight_mode, index) else {
            return false;
        };

        let raw = if gated {
            if !config.function.keeps_memory_when_gated() {
                context.memory = LogicalSwitchMemory::Uninitialized;
            }
            false
        } else {
            match config.family() {
                FunctionFamily::Disabled => false,
                FunctionFamily::Bool => {
                    let (s1, s2) = bool_inputs;
                    match config.function {
                        LogicalSwitchFunction::And => s1 && s2,
                        LogicalSwitchFunction::Or => s1 || s2,
                        _ => s1 ^ s2,
                    }
                }
                FunctionFamily::Timer => match context.memory {
                    LogicalSwitchMemory::Scalar(countdown) => countdown <= 0,
                    _ => true,
                },
                FunctionFamily::Sticky => context.memory.sticky().0,
                FunctionFamily::Edge => context.memory.edge().0,
                FunctionFamily::Comparison => compare(&config, sources),
                FunctionFamily::Offset => match operands(&config, sources) {
                    Some(operands) => offset(config.function, operands, tolerance),
                    None => false,
                },
                FunctionFamily::Difference => match operands(&config, sources) {
                    Some(operands) => difference(context, config.function, operands),
                    None => false,
                },
            }
        };

        apply_delay_duration(context, &config, raw)
    }

    /// Evaluate every logical switch and publish the results
    ///
    /// Change notifications are only raised when `is_active` is set (the
    /// evaluated flight mode is the one in use).
    pub fn eval_logical_switches(
        &mut self,
        is_active: bool,
        sources: &dyn SourceProvider,
        events: &mut dyn SwitchEvents,
    ) {
        let flight_mode = self.current_flight_mode as usize;
        for index in 0..MAX_LOGICAL_SWITCHES {
            let result = self.get_logical_switch(index, sources);
            let Some(context) = self.bank.context_mut(flight_mode, index) else {
                continue;
            };
            if is_active && result != context.state {
                events.logical_switch_changed(index as u8, result);
            }
            context.state = result;
        }
    }
}

fn compare(config: &LogicalSwitchConfig, sources: &dyn SourceProvider) -> bool {
    let x = sources.value(config.v1_value());
    let y = sources.value(config.v2_value());
    match config.function {
        LogicalSwitchFunction::Equal => x == y,
        LogicalSwitchFunction::Greater => x > y,
        _ => x < y,
    }
}

/// Read `v1` and convert the `v2` threshold into its units
///
/// Returns `None` for a telemetry source that is not currently usable.
fn operands(config: &LogicalSwitchConfig, sources: &dyn SourceProvider) -> Option<Operands> {
    let source = config.v1_value();
    let (y, exact) = match source.kind() {
        ValueSourceKind::Telemetry { .. } => {
            if !sources.telemetry_streaming() || sources.contest_forbidden(source) {
                return None;
            }
            (sources.telemetry_threshold(source, config.v2), false)
        }
        ValueSourceKind::GlobalVariable(_) => (config.v2 as i32, true),
        ValueSourceKind::Regular => (percent_to_resx(config.v2), false),
    };

    Some(Operands {
        x: sources.value(source),
        y,
        exact,
    })
}

fn offset(function: LogicalSwitchFunction, operands: Operands, tolerance: i32) -> bool {
    let Operands { x, y, exact } = operands;
    match function {
        LogicalSwitchFunction::VEqual => x == y,
        LogicalSwitchFunction::VAlmostEqual => {
            if exact {
                x == y
            } else {
                (x - y).abs() < tolerance
            }
        }
        LogicalSwitchFunction::VPos => x > y,
        LogicalSwitchFunction::VNeg => x < y,
        LogicalSwitchFunction::APos => x.abs() > y,
        LogicalSwitchFunction::ANeg => x.abs() < y,
        _ => false,
    }
}

/// Change of `x` since the last trigger
///
/// The first sample after a reset only seeds the reference value. The
/// reference follows `x` whenever the switch triggers, and also when `x`
/// moves against the configured direction.
fn difference(
    context: &mut LogicalSwitchContext,
    function: LogicalSwitchFunction,
    operands: Operands,
) -> bool {
    let Operands { x, y, .. } = operands;
    let last = match context.memory {
        LogicalSwitchMemory::Scalar(last) => last,
        _ => x as i16,
    };
    context.memory = LogicalSwitchMemory::Scalar(last);

    let diff = x.wrapping_sub(last as i32) as i16 as i32;
    let mut follow = false;
    let result = if function == LogicalSwitchFunction::DiffEGreater {
        if y >= 0 {
            follow = diff < 0;
            diff >= y
        } else {
            follow = diff > 0;
            diff <= y
        }
    } else {
        diff.abs() >= y
    };

    if result || follow {
        context.memory = LogicalSwitchMemory::Scalar(x as i16);
    }
    result
}
