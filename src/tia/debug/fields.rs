//! Table of logical TIA fields.
//!
//! Most TIA registers pack more than one setting into a byte (NUSIZx holds
//! both the player copy mode and the missile width, CTRLPF holds three
//! playfield flags plus the ball size). Each `Field` names one of those
//! settings and maps to a `Layout` that says where its bits live. All reads
//! and writes in the debugger go through `read` and `write` here, so the
//! masking rules exist in exactly one place.

use crate::tia::chip::TiaChip;
use crate::tia::debug::error::TiaDebugError;
use crate::tia::registers::WriteRegister::{self, *};
use crate::tia::registers::{
    CtrlPfRegister, ENABLE_BIT, NUSIZ_MISSILE, NUSIZ_PLAYER, REFP_BIT, RESMP_BIT, VDEL_BIT,
};
use crate::tia::{Object, VISIBLE_CLOCKS};
use crate::trace_debug_event;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Where a field's bits live
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Multi-bit value: `(register & mask) >> shift`
    Bits {
        register: WriteRegister,
        mask: u8,
        shift: u8,
    },
    /// Single bit decoded as a boolean
    Flag { register: WriteRegister, bit: u8 },
    /// Object position, held by the core rather than a register
    Position(Object),
}

impl Layout {
    /// Largest value the field can hold
    pub fn max(&self) -> u8 {
        match *self {
            Layout::Bits { mask, shift, .. } => mask >> shift,
            Layout::Flag { .. } => 1,
            Layout::Position(_) => (VISIBLE_CLOCKS - 1) as u8,
        }
    }

    /// True when every bit of `value` lands inside the field. Sparse masks
    /// (COLUxx drops bit 0, NUSIZx skips bit 3) reject values below `max()`.
    pub fn fits(&self, value: u8) -> bool {
        match *self {
            Layout::Bits { mask, shift, .. } => (value & !(mask >> shift)) == 0,
            Layout::Flag { .. } => value <= 1,
            Layout::Position(_) => value < VISIBLE_CLOCKS as u8,
        }
    }

    pub fn register(&self) -> Option<WriteRegister> {
        match *self {
            Layout::Bits { register, .. } | Layout::Flag { register, .. } => Some(register),
            Layout::Position(_) => None,
        }
    }

    /// Pull the field's value out of a raw register byte
    #[inline]
    pub fn decode(&self, raw: u8) -> u8 {
        match *self {
            Layout::Bits { mask, shift, .. } => (raw & mask) >> shift,
            Layout::Flag { bit, .. } => ((raw & bit) != 0) as u8,
            Layout::Position(_) => raw,
        }
    }

    /// Merge `value` into `raw`, leaving every bit outside the field alone.
    /// Bits of `value` that don't fit are dropped.
    #[inline]
    pub fn encode(&self, raw: u8, value: u8) -> u8 {
        match *self {
            Layout::Bits { mask, shift, .. } => (raw & !mask) | ((value << shift) & mask),
            Layout::Flag { bit, .. } => {
                if value != 0 {
                    raw | bit
                } else {
                    raw & !bit
                }
            }
            Layout::Position(_) => value % VISIBLE_CLOCKS as u8,
        }
    }
}

const fn bits(register: WriteRegister, mask: u8, shift: u8) -> Layout {
    Layout::Bits {
        register,
        mask,
        shift,
    }
}

const fn flag(register: WriteRegister, bit: u8) -> Layout {
    Layout::Flag { register, bit }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Nusiz0,
    Nusiz1,
    NusizP0,
    NusizP1,
    NusizM0,
    NusizM1,
    ColuP0,
    ColuP1,
    ColuPF,
    ColuBK,
    SizeBL,
    CtrlPF,
    Pf0,
    Pf1,
    Pf2,
    GrP0,
    GrP1,
    PosP0,
    PosP1,
    PosM0,
    PosM1,
    PosBL,
    HmP0,
    HmP1,
    HmM0,
    HmM1,
    HmBL,
    AudC0,
    AudC1,
    AudF0,
    AudF1,
    AudV0,
    AudV1,
    RefP0,
    RefP1,
    EnaM0,
    EnaM1,
    EnaBL,
    VdelP0,
    VdelP1,
    VdelBL,
    ResMP0,
    ResMP1,
    RefPF,
    ScorePF,
    PriorityPF,
}

impl Field {
    pub const ALL: [Field; 46] = [
        Field::Nusiz0,
        Field::Nusiz1,
        Field::NusizP0,
        Field::NusizP1,
        Field::NusizM0,
        Field::NusizM1,
        Field::ColuP0,
        Field::ColuP1,
        Field::ColuPF,
        Field::ColuBK,
        Field::SizeBL,
        Field::CtrlPF,
        Field::Pf0,
        Field::Pf1,
        Field::Pf2,
        Field::GrP0,
        Field::GrP1,
        Field::PosP0,
        Field::PosP1,
        Field::PosM0,
        Field::PosM1,
        Field::PosBL,
        Field::HmP0,
        Field::HmP1,
        Field::HmM0,
        Field::HmM1,
        Field::HmBL,
        Field::AudC0,
        Field::AudC1,
        Field::AudF0,
        Field::AudF1,
        Field::AudV0,
        Field::AudV1,
        Field::RefP0,
        Field::RefP1,
        Field::EnaM0,
        Field::EnaM1,
        Field::EnaBL,
        Field::VdelP0,
        Field::VdelP1,
        Field::VdelBL,
        Field::ResMP0,
        Field::ResMP1,
        Field::RefPF,
        Field::ScorePF,
        Field::PriorityPF,
    ];

    pub fn layout(self) -> Layout {
        match self {
            Field::Nusiz0 => bits(Nusiz0, NUSIZ_PLAYER | NUSIZ_MISSILE, 0),
            Field::Nusiz1 => bits(Nusiz1, NUSIZ_PLAYER | NUSIZ_MISSILE, 0),
            Field::NusizP0 => bits(Nusiz0, NUSIZ_PLAYER, 0),
            Field::NusizP1 => bits(Nusiz1, NUSIZ_PLAYER, 0),
            Field::NusizM0 => bits(Nusiz0, NUSIZ_MISSILE, 4),
            Field::NusizM1 => bits(Nusiz1, NUSIZ_MISSILE, 4),

            // Bit 0 of the colour registers isn't wired up
            Field::ColuP0 => bits(Colup0, 0xFE, 0),
            Field::ColuP1 => bits(Colup1, 0xFE, 0),
            Field::ColuPF => bits(Colupf, 0xFE, 0),
            Field::ColuBK => bits(Colubk, 0xFE, 0),

            Field::SizeBL => bits(Ctrlpf, CtrlPfRegister::BALL_SIZE, 4),
            Field::CtrlPF => bits(Ctrlpf, CtrlPfRegister::all().bits(), 0),

            Field::Pf0 => bits(Pf0, 0xF0, 4),
            Field::Pf1 => bits(Pf1, 0xFF, 0),
            Field::Pf2 => bits(Pf2, 0xFF, 0),
            Field::GrP0 => bits(Grp0, 0xFF, 0),
            Field::GrP1 => bits(Grp1, 0xFF, 0),

            Field::PosP0 => Layout::Position(Object::P0),
            Field::PosP1 => Layout::Position(Object::P1),
            Field::PosM0 => Layout::Position(Object::M0),
            Field::PosM1 => Layout::Position(Object::M1),
            Field::PosBL => Layout::Position(Object::BL),

            Field::HmP0 => bits(Hmp0, 0xF0, 4),
            Field::HmP1 => bits(Hmp1, 0xF0, 4),
            Field::HmM0 => bits(Hmm0, 0xF0, 4),
            Field::HmM1 => bits(Hmm1, 0xF0, 4),
            Field::HmBL => bits(Hmbl, 0xF0, 4),

            Field::AudC0 => bits(Audc0, 0x0F, 0),
            Field::AudC1 => bits(Audc1, 0x0F, 0),
            Field::AudF0 => bits(Audf0, 0x1F, 0),
            Field::AudF1 => bits(Audf1, 0x1F, 0),
            Field::AudV0 => bits(Audv0, 0x0F, 0),
            Field::AudV1 => bits(Audv1, 0x0F, 0),

            Field::RefP0 => flag(Refp0, REFP_BIT),
            Field::RefP1 => flag(Refp1, REFP_BIT),
            Field::EnaM0 => flag(Enam0, ENABLE_BIT),
            Field::EnaM1 => flag(Enam1, ENABLE_BIT),
            Field::EnaBL => flag(Enabl, ENABLE_BIT),
            Field::VdelP0 => flag(Vdelp0, VDEL_BIT),
            Field::VdelP1 => flag(Vdelp1, VDEL_BIT),
            Field::VdelBL => flag(Vdelbl, VDEL_BIT),
            Field::ResMP0 => flag(Resmp0, RESMP_BIT),
            Field::ResMP1 => flag(Resmp1, RESMP_BIT),

            Field::RefPF => flag(Ctrlpf, CtrlPfRegister::REFLECT.bits()),
            Field::ScorePF => flag(Ctrlpf, CtrlPfRegister::SCORE.bits()),
            Field::PriorityPF => flag(Ctrlpf, CtrlPfRegister::PRIORITY.bits()),
        }
    }

    pub fn is_boolean(self) -> bool {
        matches!(self.layout(), Layout::Flag { .. })
    }

    pub fn max(self) -> u8 {
        self.layout().max()
    }

    pub fn fits(self, value: u8) -> bool {
        self.layout().fits(value)
    }

    /// Pseudo-register name as typed at the debugger prompt
    pub fn name(self) -> &'static str {
        match self {
            Field::Nusiz0 => "nusiz0",
            Field::Nusiz1 => "nusiz1",
            Field::NusizP0 => "nusizP0",
            Field::NusizP1 => "nusizP1",
            Field::NusizM0 => "nusizM0",
            Field::NusizM1 => "nusizM1",
            Field::ColuP0 => "coluP0",
            Field::ColuP1 => "coluP1",
            Field::ColuPF => "coluPF",
            Field::ColuBK => "coluBK",
            Field::SizeBL => "sizeBL",
            Field::CtrlPF => "ctrlPF",
            Field::Pf0 => "pf0",
            Field::Pf1 => "pf1",
            Field::Pf2 => "pf2",
            Field::GrP0 => "grP0",
            Field::GrP1 => "grP1",
            Field::PosP0 => "posP0",
            Field::PosP1 => "posP1",
            Field::PosM0 => "posM0",
            Field::PosM1 => "posM1",
            Field::PosBL => "posBL",
            Field::HmP0 => "hmP0",
            Field::HmP1 => "hmP1",
            Field::HmM0 => "hmM0",
            Field::HmM1 => "hmM1",
            Field::HmBL => "hmBL",
            Field::AudC0 => "audC0",
            Field::AudC1 => "audC1",
            Field::AudF0 => "audF0",
            Field::AudF1 => "audF1",
            Field::AudV0 => "audV0",
            Field::AudV1 => "audV1",
            Field::RefP0 => "refP0",
            Field::RefP1 => "refP1",
            Field::EnaM0 => "enaM0",
            Field::EnaM1 => "enaM1",
            Field::EnaBL => "enaBL",
            Field::VdelP0 => "vdelP0",
            Field::VdelP1 => "vdelP1",
            Field::VdelBL => "vdelBL",
            Field::ResMP0 => "resMP0",
            Field::ResMP1 => "resMP1",
            Field::RefPF => "refPF",
            Field::ScorePF => "scorePF",
            Field::PriorityPF => "priorityPF",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

static FIELDS_BY_NAME: Lazy<HashMap<String, Field>> = Lazy::new(|| {
    Field::ALL
        .iter()
        .map(|&field| (field.name().to_ascii_lowercase(), field))
        .collect()
});

impl FromStr for Field {
    type Err = TiaDebugError;

    /// Case-insensitive lookup by pseudo-register name
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FIELDS_BY_NAME
            .get(&name.trim().to_ascii_lowercase())
            .copied()
            .ok_or_else(|| TiaDebugError::UnknownField(name.to_string()))
    }
}

/// Decode a field from the state currently in effect inside the chip
pub fn read<C: TiaChip + ?Sized>(chip: &C, field: Field) -> u8 {
    let layout = field.layout();
    match layout {
        Layout::Position(object) => chip.position(object),
        Layout::Bits { register, .. } | Layout::Flag { register, .. } => {
            layout.decode(chip.register(register))
        }
    }
}

/// Write a field through the chip's normal write path.
///
/// Sibling bits come from the last value written to the register (not the
/// one in effect) so a sibling write still sitting in the delay queue isn't
/// undone.
pub fn write<C: TiaChip + ?Sized>(chip: &mut C, field: Field, value: u8) {
    let layout = field.layout();
    if !layout.fits(value) && !field.is_boolean() {
        log::warn!(
            "{} = ${:02X} is wider than the field, truncating to ${:02X}",
            field,
            value,
            layout.decode(layout.encode(0, value))
        );
    }

    match layout {
        Layout::Position(object) => {
            let pos = layout.encode(0, value);
            trace_debug_event!("set {} position = {}", object, pos);
            chip.set_position(object, pos);
        }
        Layout::Bits { register, .. } | Layout::Flag { register, .. } => {
            let raw = layout.encode(chip.shadow_register(register), value);
            log::debug!("poke {} <- ${:02X} ({})", register, raw, field);
            trace_debug_event!("poke {} <- ${:02X} ({})", register, raw, field);
            chip.poke(register.addr(), raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn test_name_lookup_ignores_case() {
        assert_eq!("NUSIZP0".parse::<Field>(), Ok(Field::NusizP0));
        assert_eq!(" colubk ".parse::<Field>(), Ok(Field::ColuBK));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "nusizP2".parse::<Field>(),
            Err(TiaDebugError::UnknownField("nusizP2".to_string()))
        );
    }

    #[test]
    fn test_field_widths() {
        assert_eq!(Field::NusizP0.max(), 0x07);
        assert_eq!(Field::NusizM0.max(), 0x03);
        assert_eq!(Field::Nusiz0.max(), 0x37);
        assert_eq!(Field::HmP0.max(), 0x0F);
        assert_eq!(Field::AudF0.max(), 0x1F);
        assert_eq!(Field::Pf0.max(), 0x0F);
        assert_eq!(Field::PosBL.max(), 159);
        assert_eq!(Field::RefP0.max(), 1);
    }

    #[test]
    fn test_encode_keeps_sibling_bits() {
        let layout = Field::NusizM0.layout();
        assert_eq!(layout.encode(0b0000_0101, 0b11), 0b0011_0101);
        assert_eq!(layout.encode(0b0011_0101, 0b00), 0b0000_0101);

        let refpf = Field::RefPF.layout();
        assert_eq!(refpf.encode(0b0011_0110, 1), 0b0011_0111);
        assert_eq!(refpf.encode(0b0011_0111, 0), 0b0011_0110);
    }

    #[test]
    fn test_encode_truncates_wide_values() {
        assert_eq!(Field::AudC0.layout().encode(0, 0x1F), 0x0F);
        assert_eq!(Field::HmP0.layout().encode(0, 0x1F), 0xF0);
        assert_eq!(Field::ColuP0.layout().encode(0, 0x1F), 0x1E);
        assert_eq!(Field::PosP0.layout().encode(0, 165), 5);
    }

    #[test]
    fn test_fits_follows_the_mask() {
        assert!(Field::ColuP0.fits(0x1E));
        assert!(!Field::ColuP0.fits(0x1F));
        assert!(Field::Nusiz0.fits(0x37));
        assert!(!Field::Nusiz0.fits(0x08));
        assert!(!Field::Nusiz0.fits(0x0F));
        assert!(Field::CtrlPF.fits(0x35));
        assert!(!Field::CtrlPF.fits(0x08));
        assert!(Field::AudF0.fits(0x1F));
        assert!(!Field::AudF0.fits(0x20));
        assert!(Field::PosM1.fits(159));
        assert!(!Field::PosM1.fits(160));
        assert!(Field::EnaBL.fits(1));
        assert!(!Field::EnaBL.fits(2));
    }

    #[test]
    fn test_boolean_fields() {
        let booleans: Vec<_> = Field::ALL.iter().filter(|f| f.is_boolean()).collect();
        assert_eq!(booleans.len(), 13);
        assert!(!Field::Pf1.is_boolean());
    }
}
