use crate::tia::chip::TiaChip;
use crate::tia::debug::accessors::TiaRegisters;
use crate::tia::debug::config::DebugConfig;
use crate::tia::debug::delay_queue::DelayQueueIterator;
use crate::tia::debug::fields::Field;
use crate::tia::debug::state::TiaState;
use crate::trace_obj;
use std::mem;

pub mod accessors;
pub mod config;
pub mod delay_queue;
mod debug_tests;
pub mod error;
pub mod fields;
pub mod format;
pub mod report;
pub mod state;

/// Common shape of a per-chip debugger: two snapshot slots, a capture step
/// run whenever the emulation stops, and a text report.
pub trait DebuggerSystem<C: ?Sized> {
    type State;

    /// Snapshot taken by the most recent `capture`
    fn state(&self) -> &Self::State;

    /// Snapshot from before the most recent `capture`
    fn old_state(&self) -> &Self::State;

    fn capture(&mut self, chip: &C) -> &Self::State;

    /// Called by the front end each time the emulation stops
    fn on_step(&mut self, chip: &C) {
        self.capture(chip);
    }

    fn render(&self, chip: &C) -> String;
}

/// Debugger for the TIA.
///
/// Owns only its snapshots. The chip is borrowed per call, so a capture or
/// a delay queue walk can't run while the emulation is stepping.
#[derive(Debug, Clone, Default)]
pub struct TiaDebug {
    config: DebugConfig,
    state: TiaState,
    old_state: TiaState,
}

impl TiaDebug {
    pub fn new(config: DebugConfig) -> Self {
        Self {
            config,
            state: TiaState::default(),
            old_state: TiaState::default(),
        }
    }

    pub fn config(&self) -> &DebugConfig {
        &self.config
    }

    /// Snapshot the chip. The current snapshot becomes `previous()`.
    pub fn capture<C: TiaChip + ?Sized>(&mut self, chip: &C) -> &TiaState {
        let new_state = TiaState::capture(chip);
        self.old_state = mem::replace(&mut self.state, new_state);

        if let Some(stamp) = self.state.stamp {
            log::debug!(
                "captured TIA state at frame {} scanline {} clock {}",
                stamp.frame,
                stamp.scanline,
                stamp.clock
            );
        }
        trace_obj!(&self.state);
        &self.state
    }

    pub fn state(&self) -> &TiaState {
        &self.state
    }

    pub fn previous(&self) -> &TiaState {
        &self.old_state
    }

    /// Fields that differ between `previous()` and `state()`
    pub fn changes(&self) -> Vec<Field> {
        self.state.changes(&self.old_state)
    }

    pub fn render<C: TiaChip + ?Sized>(&self, chip: &C) -> String {
        report::render(chip, &self.state, &self.old_state, &self.config)
    }

    /// Live register access. Holds the chip mutably until dropped.
    pub fn registers<C: TiaChip + ?Sized>(chip: &mut C) -> TiaRegisters<'_, C> {
        TiaRegisters::new(chip)
    }

    pub fn delay_queue_iterator<C: TiaChip + ?Sized>(chip: &C) -> DelayQueueIterator<'_> {
        DelayQueueIterator::new(chip)
    }
}

impl<C: TiaChip + ?Sized> DebuggerSystem<C> for TiaDebug {
    type State = TiaState;

    fn state(&self) -> &TiaState {
        &self.state
    }

    fn old_state(&self) -> &TiaState {
        &self.old_state
    }

    fn capture(&mut self, chip: &C) -> &TiaState {
        TiaDebug::capture(self, chip)
    }

    fn render(&self, chip: &C) -> String {
        TiaDebug::render(self, chip)
    }
}
