use crate::tia::Object;
use crate::tia::registers::WriteRegister;
use crate::tia::tracer::Traceable;

/// A register write the core has scheduled but not yet applied
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub address: u8,
    pub value: u8,
    /// Colour clocks left before the write takes effect
    pub delay: u8,
}

impl PendingWrite {
    pub fn register(&self) -> Option<WriteRegister> {
        WriteRegister::try_from(self.address).ok()
    }
}

impl Traceable for PendingWrite {
    fn trace_name(&self) -> &'static str {
        "TIA_PENDING"
    }

    fn trace_state(&self) -> Option<String> {
        let name = self
            .register()
            .map(|reg| reg.name())
            .unwrap_or("????");
        Some(format!(
            "{:<6} ${:02X} <- ${:02X} in {}",
            name, self.address, self.value, self.delay
        ))
    }
}

/// The view of the TIA emulation core the debugger works against.
///
/// The core must not advance while any of these calls are in progress. Reads
/// take `&self` so captures and delay queue walks can't overlap a clock tick.
pub trait TiaChip {
    /// Read one of the sixteen readable registers ($00-$0F)
    fn peek(&self, addr: u8) -> u8;

    /// Write a register the same way the CPU does, including any delay
    fn poke(&mut self, addr: u8, value: u8);

    /// Value of a write register as currently seen by the object logic
    fn register(&self, reg: WriteRegister) -> u8;

    /// Value last written to a register, including writes still in the delay queue
    fn shadow_register(&self, reg: WriteRegister) -> u8 {
        self.register(reg)
    }

    /// Horizontal position (0-159) of an object
    fn position(&self, object: Object) -> u8;

    fn set_position(&mut self, object: Object, value: u8);

    /// 15-bit collision latch word, see `tia::collisions`
    fn collisions(&self) -> u16;

    fn scanlines(&self) -> u32;
    fn frame_count(&self) -> u32;
    fn clocks_this_line(&self) -> u32;
    fn vsync(&self) -> bool;
    fn vblank(&self) -> bool;

    /// Walk the delay queue in the order the core will apply it
    fn pending_writes(&self) -> Box<dyn Iterator<Item = PendingWrite> + '_>;
}
