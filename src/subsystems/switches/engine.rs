//! Switch engine state and per-tick sequencing

use txswitch_core::config::{ConfigError, HardwareConfig, ModelSwitches};
use txswitch_core::logical::{FlightModeStateBank, LogicalSwitchContext};
use txswitch_core::mailbox::StickyConsumer;
use txswitch_core::parameters::SwitchParams;
use txswitch_core::source::MAX_FLIGHT_MODES;
use txswitch_core::switches::{FunctionSwitches, MovementDetector, SwitchDebouncer};
use txswitch_core::traits::{SourceProvider, SwitchEvents, SwitchInputs, TickSource};

/// Runtime switch state of one loaded model
///
/// Owns the debouncer, function switch tracking, movement cache and the
/// per flight mode logical switch contexts. Everything except the mailbox
/// producer is accessed only from the tick task.
pub struct SwitchEngine<'a, I: SwitchInputs, T: TickSource> {
    pub(super) inputs: I,
    pub(super) ticks: T,
    pub(super) params: SwitchParams,
    pub(super) hardware: HardwareConfig,
    pub(super) model: ModelSwitches,
    pub(super) debouncer: SwitchDebouncer,
    pub(super) function_switches: FunctionSwitches,
    pub(super) movement: MovementDetector,
    pub(super) bank: FlightModeStateBank,
    pub(super) mailbox: StickyConsumer<'a>,
    pub(super) current_flight_mode: u8,
    pub(super) transition_flight_mode: u8,
    pub(super) mixer_first_run_done: bool,
    positions_committed: bool,
}

impl<'a, I: SwitchInputs, T: TickSource> SwitchEngine<'a, I, T> {
    /// Create an engine for a validated hardware and model configuration
    ///
    /// All logical switch contexts start reset and the mailbox is emptied.
    pub fn new(
        inputs: I,
        ticks: T,
        params: SwitchParams,
        hardware: HardwareConfig,
        model: ModelSwitches,
        mailbox: StickyConsumer<'a>,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = hardware.validate() {
            crate::log_error!("Rejected switch hardware configuration");
            return Err(e);
        }
        if let Err(e) = model.validate() {
            crate::log_error!("Rejected model switch configuration");
            return Err(e);
        }

        let mut engine = Self {
            inputs,
            ticks,
            params,
            hardware,
            model,
            debouncer: SwitchDebouncer::new(),
            function_switches: FunctionSwitches::new(),
            movement: MovementDetector::new(),
            bank: FlightModeStateBank::new(),
            mailbox,
            current_flight_mode: 0,
            transition_flight_mode: 0,
            mixer_first_run_done: false,
            positions_committed: false,
        };
        engine.logical_switches_reset();
        Ok(engine)
    }

    /// Model configuration
    pub fn model(&self) -> &ModelSwitches {
        &self.model
    }

    /// Mutable model configuration
    ///
    /// Editing a logical switch does not reset its contexts; call
    /// [`SwitchEngine::logical_switches_reset`] after a bulk change.
    pub fn model_mut(&mut self) -> &mut ModelSwitches {
        &mut self.model
    }

    /// Hardware description
    pub fn hardware(&self) -> &HardwareConfig {
        &self.hardware
    }

    /// Switch parameters in use
    pub fn params(&self) -> &SwitchParams {
        &self.params
    }

    /// Replace the switch parameters (e.g. after a parameter store change)
    pub fn set_params(&mut self, params: SwitchParams) {
        self.params = params;
    }

    /// Committed switch positions
    pub fn debouncer(&self) -> &SwitchDebouncer {
        &self.debouncer
    }

    /// Movement detector cache
    pub fn movement(&self) -> &MovementDetector {
        &self.movement
    }

    /// Flight mode whose logical switch state is read and evaluated
    pub fn current_flight_mode(&self) -> u8 {
        self.current_flight_mode
    }

    /// Flight mode being transitioned to
    pub fn transition_flight_mode(&self) -> u8 {
        self.transition_flight_mode
    }

    /// Set the active and transition flight modes
    ///
    /// Out-of-range modes are clamped to the last flight mode.
    pub fn set_flight_modes(&mut self, current: u8, transition: u8) {
        let last = (MAX_FLIGHT_MODES - 1) as u8;
        self.current_flight_mode = current.min(last);
        self.transition_flight_mode = transition.min(last);
    }

    /// Record that the mixer has completed a run (clears `ONE`)
    pub fn mark_mixer_run(&mut self) {
        self.mixer_first_run_done = true;
    }

    /// Re-arm `ONE` (on model load)
    pub fn restart_mixer(&mut self) {
        self.mixer_first_run_done = false;
    }

    /// Context of one logical switch in one flight mode
    pub fn context(&self, flight_mode: usize, index: usize) -> Option<&LogicalSwitchContext> {
        self.bank.context(flight_mode, index)
    }

    /// Reset every logical switch context and drop pending sticky commands
    ///
    /// The caller must not run this concurrently with an evaluation.
    pub fn logical_switches_reset(&mut self) {
        self.bank.reset();
        self.mailbox.clear();
        crate::log_info!("Logical switches reset");
    }

    /// Copy all logical switch contexts of one flight mode over another
    pub fn copy_state(&mut self, src: u8, dst: u8) {
        self.bank.copy_state(src as usize, dst as usize);
        crate::log_debug!("Logical switch state copied from FM{} to FM{}", src, dst);
    }

    /// Sample pins and pots into committed positions
    ///
    /// The first call after construction commits every position without
    /// delay.
    pub fn update_switch_positions(&mut self, events: &mut dyn SwitchEvents) {
        let now = self.ticks.now_10ms();
        let startup = !self.positions_committed;
        self.debouncer.update(
            &self.hardware,
            &self.inputs,
            now,
            self.params.delay,
            startup,
            events,
        );
        self.positions_committed = true;
    }

    /// Process function switch button edges and refresh their LEDs
    pub fn eval_function_switches(&mut self, events: &mut dyn SwitchEvents) {
        let toggled =
            self.function_switches
                .evaluate(&mut self.model.function_switches, &self.inputs, events);
        if toggled != 0 {
            crate::log_debug!(
                "Function switches toggled: mask={}, state={}",
                toggled,
                self.model.function_switches.logical_state
            );
        }
    }

    /// Apply the configured function switch start positions (model load)
    pub fn apply_start_positions(&mut self) {
        self.model.function_switches.apply_start_positions();
    }

    /// Run one 10 ms tick
    ///
    /// Commits positions, processes function switches, drains the mailbox
    /// and advances timers, then evaluates the logical switches of the
    /// current flight mode.
    pub fn run_cycle(&mut self, sources: &dyn SourceProvider, events: &mut dyn SwitchEvents) {
        self.update_switch_positions(events);
        self.eval_function_switches(events);
        self.logical_switches_timer_tick(sources);
        self.eval_logical_switches(true, sources, events);
    }
}
