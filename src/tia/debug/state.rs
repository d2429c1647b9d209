use crate::tia::chip::TiaChip;
use crate::tia::collisions::{CollisionPair, Collisions};
use crate::tia::debug::fields::{self, Field};
use crate::tia::registers::{ColorRegister, READ_REGISTER_COUNT};
use crate::tia::tracer::Traceable;
use crate::tia::Object;

/// Point in emulated time a snapshot was taken at
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub frame: u32,
    pub scanline: u32,
    pub clock: u32,
}

/// Copy of every register the debugger tracks, taken at a single colour clock.
///
/// Per-object arrays are indexed with `Object::index()`. `gr` only holds the
/// two players, `aud` is ordered AUDF0, AUDF1, AUDC0, AUDC1, AUDV0, AUDV1.
///
/// `TiaState::default()` is the "never captured" state: `stamp` is `None`
/// and `value()` answers `None` for every field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TiaState {
    pub stamp: Option<Stamp>,
    pub ram: [u8; READ_REGISTER_COUNT],
    pub colu_regs: [u8; 4],
    pub gr: [u8; 2],
    pub pos: [u8; 5],
    pub hm: [u8; 5],
    pub size: [u8; 5],
    pub pf: [u8; 3],
    pub aud: [u8; 6],
    pub ctrl_pf: u8,
    pub refp: [bool; 2],
    /// ENAM0, ENAM1, ENABL
    pub enabled: [bool; 3],
    /// VDELP0, VDELP1, VDELBL
    pub vdel: [bool; 3],
    pub resmp: [bool; 2],
    pub collisions: Collisions,
}

impl TiaState {
    pub fn capture<C: TiaChip + ?Sized>(chip: &C) -> TiaState {
        let read = |field: Field| fields::read(chip, field);
        let flag = |field: Field| fields::read(chip, field) != 0;

        let mut ram = [0u8; READ_REGISTER_COUNT];
        for (addr, byte) in ram.iter_mut().enumerate() {
            *byte = chip.peek(addr as u8);
        }

        TiaState {
            stamp: Some(Stamp {
                frame: chip.frame_count(),
                scanline: chip.scanlines(),
                clock: chip.clocks_this_line(),
            }),
            ram,
            colu_regs: [
                read(Field::ColuP0),
                read(Field::ColuP1),
                read(Field::ColuPF),
                read(Field::ColuBK),
            ],
            gr: [read(Field::GrP0), read(Field::GrP1)],
            pos: [
                read(Field::PosP0),
                read(Field::PosP1),
                read(Field::PosM0),
                read(Field::PosM1),
                read(Field::PosBL),
            ],
            hm: [
                read(Field::HmP0),
                read(Field::HmP1),
                read(Field::HmM0),
                read(Field::HmM1),
                read(Field::HmBL),
            ],
            size: [
                read(Field::NusizP0),
                read(Field::NusizP1),
                read(Field::NusizM0),
                read(Field::NusizM1),
                read(Field::SizeBL),
            ],
            pf: [read(Field::Pf0), read(Field::Pf1), read(Field::Pf2)],
            aud: [
                read(Field::AudF0),
                read(Field::AudF1),
                read(Field::AudC0),
                read(Field::AudC1),
                read(Field::AudV0),
                read(Field::AudV1),
            ],
            ctrl_pf: read(Field::CtrlPF),
            refp: [flag(Field::RefP0), flag(Field::RefP1)],
            enabled: [flag(Field::EnaM0), flag(Field::EnaM1), flag(Field::EnaBL)],
            vdel: [flag(Field::VdelP0), flag(Field::VdelP1), flag(Field::VdelBL)],
            resmp: [flag(Field::ResMP0), flag(Field::ResMP1)],
            collisions: Collisions::new(chip.collisions()),
        }
    }

    pub fn is_captured(&self) -> bool {
        self.stamp.is_some()
    }

    pub fn color(&self, reg: ColorRegister) -> u8 {
        self.colu_regs[reg.index()]
    }

    pub fn position(&self, object: Object) -> u8 {
        self.pos[object.index()]
    }

    pub fn motion(&self, object: Object) -> u8 {
        self.hm[object.index()]
    }

    pub fn size_of(&self, object: Object) -> u8 {
        self.size[object.index()]
    }

    pub fn collision(&self, pair: CollisionPair) -> bool {
        self.collisions.collision(pair)
    }

    /// Captured value of a field, `None` before the first capture
    pub fn value(&self, field: Field) -> Option<u8> {
        if !self.is_captured() {
            return None;
        }

        let value = match field {
            Field::Nusiz0 => self.size[Object::P0.index()] | (self.size[Object::M0.index()] << 4),
            Field::Nusiz1 => self.size[Object::P1.index()] | (self.size[Object::M1.index()] << 4),
            Field::NusizP0 => self.size_of(Object::P0),
            Field::NusizP1 => self.size_of(Object::P1),
            Field::NusizM0 => self.size_of(Object::M0),
            Field::NusizM1 => self.size_of(Object::M1),
            Field::SizeBL => self.size_of(Object::BL),
            Field::ColuP0 => self.color(ColorRegister::P0),
            Field::ColuP1 => self.color(ColorRegister::P1),
            Field::ColuPF => self.color(ColorRegister::PF),
            Field::ColuBK => self.color(ColorRegister::BK),
            Field::CtrlPF => self.ctrl_pf,
            Field::Pf0 => self.pf[0],
            Field::Pf1 => self.pf[1],
            Field::Pf2 => self.pf[2],
            Field::GrP0 => self.gr[0],
            Field::GrP1 => self.gr[1],
            Field::PosP0 => self.position(Object::P0),
            Field::PosP1 => self.position(Object::P1),
            Field::PosM0 => self.position(Object::M0),
            Field::PosM1 => self.position(Object::M1),
            Field::PosBL => self.position(Object::BL),
            Field::HmP0 => self.motion(Object::P0),
            Field::HmP1 => self.motion(Object::P1),
            Field::HmM0 => self.motion(Object::M0),
            Field::HmM1 => self.motion(Object::M1),
            Field::HmBL => self.motion(Object::BL),
            Field::AudF0 => self.aud[0],
            Field::AudF1 => self.aud[1],
            Field::AudC0 => self.aud[2],
            Field::AudC1 => self.aud[3],
            Field::AudV0 => self.aud[4],
            Field::AudV1 => self.aud[5],
            Field::RefP0 => self.refp[0] as u8,
            Field::RefP1 => self.refp[1] as u8,
            Field::EnaM0 => self.enabled[0] as u8,
            Field::EnaM1 => self.enabled[1] as u8,
            Field::EnaBL => self.enabled[2] as u8,
            Field::VdelP0 => self.vdel[0] as u8,
            Field::VdelP1 => self.vdel[1] as u8,
            Field::VdelBL => self.vdel[2] as u8,
            Field::ResMP0 => self.resmp[0] as u8,
            Field::ResMP1 => self.resmp[1] as u8,
            Field::RefPF | Field::ScorePF | Field::PriorityPF => {
                field.layout().decode(self.ctrl_pf)
            }
        };
        Some(value)
    }

    /// Fields whose value differs from `older`.
    ///
    /// Empty if either snapshot was never captured.
    pub fn changes(&self, older: &TiaState) -> Vec<Field> {
        if !self.is_captured() || !older.is_captured() {
            return Vec::new();
        }
        Field::ALL
            .iter()
            .copied()
            .filter(|&field| self.value(field) != older.value(field))
            .collect()
    }
}

impl Traceable for TiaState {
    fn trace_name(&self) -> &'static str {
        "TIA_STATE"
    }

    fn trace_state(&self) -> Option<String> {
        let stamp = self.stamp?;
        Some(format!(
            "frame={} line={} clk={} cx={:015b} gr={:02X}/{:02X} pos={:?}",
            stamp.frame,
            stamp.scanline,
            stamp.clock,
            self.collisions.bits(),
            self.gr[0],
            self.gr[1],
            self.pos
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tia::test_utils::MockTia;

    #[test]
    fn test_default_state_is_uncaptured() {
        let state = TiaState::default();
        assert!(!state.is_captured());
        assert!(Field::ALL.iter().all(|&f| state.value(f).is_none()));
        assert!(state.trace().is_none());
    }

    #[test]
    fn test_capture_reads_every_array() {
        let mut tia = MockTia::new();
        tia.set_register(crate::tia::registers::WriteRegister::Nusiz1, 0b0010_0011);
        tia.set_register(crate::tia::registers::WriteRegister::Colubk, 0x9A);
        tia.set_register(crate::tia::registers::WriteRegister::Grp0, 0xA5);
        tia.set_register(crate::tia::registers::WriteRegister::Audf1, 0x13);
        tia.set_register(crate::tia::registers::WriteRegister::Ctrlpf, 0b0001_0101);
        tia.set_position(Object::M1, 77);
        tia.set_collisions(Collisions::P0_P1.bits());

        let state = TiaState::capture(&tia);

        assert!(state.is_captured());
        assert_eq!(state.color(ColorRegister::BK), 0x9A);
        assert_eq!(state.gr, [0xA5, 0x00]);
        assert_eq!(state.position(Object::M1), 77);
        assert_eq!(state.size_of(Object::P1), 0b011);
        assert_eq!(state.size_of(Object::M1), 0b10);
        assert_eq!(state.size_of(Object::BL), 1);
        assert_eq!(state.aud[1], 0x13);
        assert_eq!(state.value(Field::RefPF), Some(1));
        assert_eq!(state.value(Field::ScorePF), Some(0));
        assert_eq!(state.value(Field::PriorityPF), Some(1));
        assert_eq!(state.value(Field::Nusiz1), Some(0b0010_0011));
        assert!(state.collision(CollisionPair::P0P1));
        // CXPPMM bit 7 mirrors the P0-P1 latch
        assert_eq!(state.ram[0x07], 0x80);
    }

    #[test]
    fn test_value_matches_live_read() {
        let mut tia = MockTia::new();
        for (i, reg) in crate::tia::registers::WriteRegister::ALL.iter().enumerate() {
            if !reg.is_strobe() {
                tia.set_register(*reg, (i as u8).wrapping_mul(37));
            }
        }
        let state = TiaState::capture(&tia);
        for field in Field::ALL {
            assert_eq!(state.value(field), Some(fields::read(&tia, field)), "{}", field);
        }
    }

    #[test]
    fn test_changes_lists_only_differences() {
        let mut tia = MockTia::new();
        let before = TiaState::capture(&tia);
        tia.set_register(crate::tia::registers::WriteRegister::Hmbl, 0x70);
        let after = TiaState::capture(&tia);

        assert_eq!(after.changes(&before), vec![Field::HmBL]);
        assert!(after.changes(&TiaState::default()).is_empty());
    }
}
