use crate::tia::chip::{PendingWrite, TiaChip};
use crate::tia::collisions::Collisions;
use crate::tia::registers::{VBLANK_BIT, VSYNC_BIT, WRITE_REGISTER_COUNT, WriteRegister};
use crate::tia::{CLOCKS_PER_SCANLINE, HBLANK_CLOCKS, Object, VISIBLE_CLOCKS};

/// Slots in the delay ring, longer than the longest delay
const DELAY_SLOTS: usize = 16;
const SCANLINES_PER_FRAME: u32 = 262;
const INPUT_COUNT: usize = 6;
const INPUT_RELEASED: u8 = 0x80;

/// Colour clocks between a CPU write and the register changing
pub fn write_delay(reg: WriteRegister) -> u8 {
    use WriteRegister::*;
    match reg {
        Pf0 | Pf1 | Pf2 => 2,
        Grp0 | Grp1 | Enam0 | Enam1 | Enabl | Refp0 | Refp1 | Vblank => 1,
        Hmp0 | Hmp1 | Hmm0 | Hmm1 | Hmbl | Hmclr => 2,
        Hmove => 6,
        _ => 0,
    }
}

/// Turn on `env_logger` output for a test. Safe to call more than once.
#[cfg(test)]
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Register-file TIA with a delay queue and the strobe side effects the
/// debugger cares about. No video or audio output.
#[derive(Debug, Clone)]
pub struct MockTia {
    registers: [u8; WRITE_REGISTER_COUNT],
    shadow: [u8; WRITE_REGISTER_COUNT],
    positions: [u8; 5],
    collisions: u16,
    inputs: [u8; INPUT_COUNT],
    delay_ring: [Vec<(u8, u8)>; DELAY_SLOTS],
    /// Per-register replacement for `write_delay`
    delays: [Option<u8>; WRITE_REGISTER_COUNT],
    head: usize,
    scanline: u32,
    frame: u32,
    clock: u32,
}

impl Default for MockTia {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTia {
    pub fn new() -> Self {
        Self {
            registers: [0; WRITE_REGISTER_COUNT],
            shadow: [0; WRITE_REGISTER_COUNT],
            positions: [0; 5],
            collisions: 0,
            inputs: [INPUT_RELEASED; INPUT_COUNT],
            delay_ring: Default::default(),
            delays: [None; WRITE_REGISTER_COUNT],
            head: 0,
            scanline: 0,
            frame: 0,
            clock: 0,
        }
    }

    /// Set a register immediately, skipping the delay queue
    pub fn set_register(&mut self, reg: WriteRegister, value: u8) {
        self.registers[reg as usize] = value;
        self.shadow[reg as usize] = value;
    }

    /// Delay writes to `reg` by `clocks` instead of the usual amount
    pub fn set_write_delay(&mut self, reg: WriteRegister, clocks: u8) {
        debug_assert!((clocks as usize) < DELAY_SLOTS);
        self.delays[reg as usize] = Some(clocks);
    }

    pub fn set_collisions(&mut self, word: u16) {
        self.collisions = word & Collisions::all().bits();
    }

    /// Set INPT0-5. Bit 7 clear means pressed/grounded.
    pub fn set_input(&mut self, index: usize, value: u8) {
        self.inputs[index] = value;
    }

    /// Advance `clocks` colour clocks, applying writes as they come due
    pub fn tick(&mut self, clocks: u32) {
        for _ in 0..clocks {
            self.head = (self.head + 1) % DELAY_SLOTS;
            let due = std::mem::take(&mut self.delay_ring[self.head]);
            for (addr, value) in due {
                self.apply(addr, value);
            }
            self.advance_clock();
        }
    }

    fn advance_clock(&mut self) {
        self.clock += 1;
        if self.clock >= CLOCKS_PER_SCANLINE {
            self.clock = 0;
            self.scanline += 1;
            if self.scanline >= SCANLINES_PER_FRAME {
                self.scanline = 0;
                self.frame += 1;
            }
        }
    }

    fn visible_position(&self) -> u8 {
        (self.clock.saturating_sub(HBLANK_CLOCKS) % VISIBLE_CLOCKS) as u8
    }

    fn apply(&mut self, addr: u8, value: u8) {
        let Ok(reg) = WriteRegister::try_from(addr) else {
            return;
        };

        use WriteRegister::*;
        match reg {
            Wsync => {
                let remaining = CLOCKS_PER_SCANLINE - self.clock;
                for _ in 0..remaining {
                    self.advance_clock();
                }
            }
            Rsync => self.clock = 0,
            Resp0 => self.positions[Object::P0.index()] = self.visible_position(),
            Resp1 => self.positions[Object::P1.index()] = self.visible_position(),
            Resm0 => self.positions[Object::M0.index()] = self.visible_position(),
            Resm1 => self.positions[Object::M1.index()] = self.visible_position(),
            Resbl => self.positions[Object::BL.index()] = self.visible_position(),
            Hmove => {
                let motion = [Hmp0, Hmp1, Hmm0, Hmm1, Hmbl];
                for (pos, reg) in self.positions.iter_mut().zip(motion) {
                    // High nibble, signed, positive moves left
                    let hm = (self.registers[reg as usize] as i8) >> 4;
                    *pos = (*pos as i16 - hm as i16).rem_euclid(VISIBLE_CLOCKS as i16) as u8;
                }
            }
            Hmclr => {
                for reg in [Hmp0, Hmp1, Hmm0, Hmm1, Hmbl] {
                    self.registers[reg as usize] = 0;
                    self.shadow[reg as usize] = 0;
                }
            }
            Cxclr => self.collisions = 0,
            _ => self.registers[reg as usize] = value,
        }
    }
}

impl TiaChip for MockTia {
    fn peek(&self, addr: u8) -> u8 {
        match addr {
            0x00..=0x07 => Collisions::new(self.collisions).read_register(addr),
            0x08..=0x0D => self.inputs[(addr - 0x08) as usize],
            _ => 0,
        }
    }

    fn poke(&mut self, addr: u8, value: u8) {
        let Ok(reg) = WriteRegister::try_from(addr) else {
            return;
        };
        if !reg.is_strobe() {
            self.shadow[reg as usize] = value;
        }

        match self.delays[reg as usize].unwrap_or_else(|| write_delay(reg)) {
            0 => self.apply(addr, value),
            delay => {
                let slot = (self.head + delay as usize) % DELAY_SLOTS;
                self.delay_ring[slot].push((addr, value));
            }
        }
    }

    fn register(&self, reg: WriteRegister) -> u8 {
        self.registers[reg as usize]
    }

    fn shadow_register(&self, reg: WriteRegister) -> u8 {
        self.shadow[reg as usize]
    }

    fn position(&self, object: Object) -> u8 {
        self.positions[object.index()]
    }

    fn set_position(&mut self, object: Object, value: u8) {
        self.positions[object.index()] = value % VISIBLE_CLOCKS as u8;
    }

    fn collisions(&self) -> u16 {
        self.collisions
    }

    fn scanlines(&self) -> u32 {
        self.scanline
    }

    fn frame_count(&self) -> u32 {
        self.frame
    }

    fn clocks_this_line(&self) -> u32 {
        self.clock
    }

    fn vsync(&self) -> bool {
        (self.registers[WriteRegister::Vsync as usize] & VSYNC_BIT) != 0
    }

    fn vblank(&self) -> bool {
        (self.registers[WriteRegister::Vblank as usize] & VBLANK_BIT) != 0
    }

    fn pending_writes(&self) -> Box<dyn Iterator<Item = PendingWrite> + '_> {
        Box::new((1..DELAY_SLOTS).flat_map(move |delay| {
            let slot = (self.head + delay) % DELAY_SLOTS;
            self.delay_ring[slot].iter().map(move |&(address, value)| PendingWrite {
                address,
                value,
                delay: delay as u8,
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_write() {
        let mut tia = MockTia::new();
        tia.poke(WriteRegister::Colup0.addr(), 0x44);
        assert_eq!(tia.register(WriteRegister::Colup0), 0x44);
        assert_eq!(tia.pending_writes().count(), 0);
    }

    #[test]
    fn test_delayed_write_lands_after_delay() {
        let mut tia = MockTia::new();
        tia.poke(WriteRegister::Pf2.addr(), 0xFF);
        assert_eq!(tia.register(WriteRegister::Pf2), 0x00);
        assert_eq!(tia.shadow_register(WriteRegister::Pf2), 0xFF);

        tia.tick(1);
        assert_eq!(tia.register(WriteRegister::Pf2), 0x00);
        tia.tick(1);
        assert_eq!(tia.register(WriteRegister::Pf2), 0xFF);
    }

    #[test]
    fn test_write_delay_override() {
        let mut tia = MockTia::new();
        tia.set_write_delay(WriteRegister::Nusiz1, 3);
        tia.poke(WriteRegister::Nusiz1.addr(), 0x05);
        assert_eq!(tia.register(WriteRegister::Nusiz1), 0x00);
        assert_eq!(tia.shadow_register(WriteRegister::Nusiz1), 0x05);
        assert_eq!(tia.pending_writes().next().map(|w| w.delay), Some(3));

        tia.tick(3);
        assert_eq!(tia.register(WriteRegister::Nusiz1), 0x05);
    }

    #[test]
    fn test_counters_wrap() {
        let mut tia = MockTia::new();
        tia.tick(CLOCKS_PER_SCANLINE + 3);
        assert_eq!(tia.scanlines(), 1);
        assert_eq!(tia.clocks_this_line(), 3);

        tia.tick(CLOCKS_PER_SCANLINE * (SCANLINES_PER_FRAME - 1));
        assert_eq!(tia.frame_count(), 1);
        assert_eq!(tia.scanlines(), 0);
    }

    #[test]
    fn test_wsync_finishes_the_line() {
        let mut tia = MockTia::new();
        tia.tick(100);
        tia.poke(WriteRegister::Wsync.addr(), 0);
        assert_eq!(tia.scanlines(), 1);
        assert_eq!(tia.clocks_this_line(), 0);
    }

    #[test]
    fn test_reset_and_hmove() {
        let mut tia = MockTia::new();
        tia.tick(HBLANK_CLOCKS + 30);
        tia.poke(WriteRegister::Resp0.addr(), 0);
        assert_eq!(tia.position(Object::P0), 30);

        // -1 in the high nibble moves right
        tia.set_register(WriteRegister::Hmp0, 0xF0);
        tia.set_register(WriteRegister::Hmbl, 0x70);
        tia.poke(WriteRegister::Hmove.addr(), 0);
        tia.tick(6);
        assert_eq!(tia.position(Object::P0), 31);
        assert_eq!(tia.position(Object::BL), VISIBLE_CLOCKS as u8 - 7);
    }

    #[test]
    fn test_hmclr_and_cxclr() {
        let mut tia = MockTia::new();
        tia.set_register(WriteRegister::Hmm1, 0x30);
        tia.set_collisions(0x7FFF);

        tia.poke(WriteRegister::Cxclr.addr(), 0);
        assert_eq!(tia.collisions(), 0);

        tia.poke(WriteRegister::Hmclr.addr(), 0);
        tia.tick(2);
        assert_eq!(tia.register(WriteRegister::Hmm1), 0);
    }

    #[test]
    fn test_peek_reads_collisions_and_inputs() {
        let mut tia = MockTia::new();
        tia.set_collisions(Collisions::M1_P0.bits());
        tia.set_input(0, 0x00);

        assert_eq!(tia.peek(0x01), 0x80);
        assert_eq!(tia.peek(0x08), 0x00);
        assert_eq!(tia.peek(0x09), 0x80);
        assert_eq!(tia.peek(0x0F), 0x00);
    }
}
