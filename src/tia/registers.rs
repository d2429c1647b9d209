use crate::tia::debug::error::TiaDebugError;
use bitflags::bitflags;
use std::fmt;

pub const WRITE_REGISTER_COUNT: usize = 0x2D;
pub const READ_REGISTER_COUNT: usize = 0x10;

/// TIA write addresses ($00-$2C)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WriteRegister {
    Vsync = 0x00,
    Vblank = 0x01,
    Wsync = 0x02,
    Rsync = 0x03,
    Nusiz0 = 0x04,
    Nusiz1 = 0x05,
    Colup0 = 0x06,
    Colup1 = 0x07,
    Colupf = 0x08,
    Colubk = 0x09,
    Ctrlpf = 0x0A,
    Refp0 = 0x0B,
    Refp1 = 0x0C,
    Pf0 = 0x0D,
    Pf1 = 0x0E,
    Pf2 = 0x0F,
    Resp0 = 0x10,
    Resp1 = 0x11,
    Resm0 = 0x12,
    Resm1 = 0x13,
    Resbl = 0x14,
    Audc0 = 0x15,
    Audc1 = 0x16,
    Audf0 = 0x17,
    Audf1 = 0x18,
    Audv0 = 0x19,
    Audv1 = 0x1A,
    Grp0 = 0x1B,
    Grp1 = 0x1C,
    Enam0 = 0x1D,
    Enam1 = 0x1E,
    Enabl = 0x1F,
    Hmp0 = 0x20,
    Hmp1 = 0x21,
    Hmm0 = 0x22,
    Hmm1 = 0x23,
    Hmbl = 0x24,
    Vdelp0 = 0x25,
    Vdelp1 = 0x26,
    Vdelbl = 0x27,
    Resmp0 = 0x28,
    Resmp1 = 0x29,
    Hmove = 0x2A,
    Hmclr = 0x2B,
    Cxclr = 0x2C,
}

use WriteRegister::*;

impl WriteRegister {
    /// Every write register, indexed by address
    pub const ALL: [WriteRegister; WRITE_REGISTER_COUNT] = [
        Vsync, Vblank, Wsync, Rsync, Nusiz0, Nusiz1, Colup0, Colup1, Colupf, Colubk, Ctrlpf,
        Refp0, Refp1, Pf0, Pf1, Pf2, Resp0, Resp1, Resm0, Resm1, Resbl, Audc0, Audc1, Audf0,
        Audf1, Audv0, Audv1, Grp0, Grp1, Enam0, Enam1, Enabl, Hmp0, Hmp1, Hmm0, Hmm1, Hmbl,
        Vdelp0, Vdelp1, Vdelbl, Resmp0, Resmp1, Hmove, Hmclr, Cxclr,
    ];

    #[inline]
    pub fn addr(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Vsync => "VSYNC",
            Vblank => "VBLANK",
            Wsync => "WSYNC",
            Rsync => "RSYNC",
            Nusiz0 => "NUSIZ0",
            Nusiz1 => "NUSIZ1",
            Colup0 => "COLUP0",
            Colup1 => "COLUP1",
            Colupf => "COLUPF",
            Colubk => "COLUBK",
            Ctrlpf => "CTRLPF",
            Refp0 => "REFP0",
            Refp1 => "REFP1",
            Pf0 => "PF0",
            Pf1 => "PF1",
            Pf2 => "PF2",
            Resp0 => "RESP0",
            Resp1 => "RESP1",
            Resm0 => "RESM0",
            Resm1 => "RESM1",
            Resbl => "RESBL",
            Audc0 => "AUDC0",
            Audc1 => "AUDC1",
            Audf0 => "AUDF0",
            Audf1 => "AUDF1",
            Audv0 => "AUDV0",
            Audv1 => "AUDV1",
            Grp0 => "GRP0",
            Grp1 => "GRP1",
            Enam0 => "ENAM0",
            Enam1 => "ENAM1",
            Enabl => "ENABL",
            Hmp0 => "HMP0",
            Hmp1 => "HMP1",
            Hmm0 => "HMM0",
            Hmm1 => "HMM1",
            Hmbl => "HMBL",
            Vdelp0 => "VDELP0",
            Vdelp1 => "VDELP1",
            Vdelbl => "VDELBL",
            Resmp0 => "RESMP0",
            Resmp1 => "RESMP1",
            Hmove => "HMOVE",
            Hmclr => "HMCLR",
            Cxclr => "CXCLR",
        }
    }

    /// Registers that only do something when written (the value is ignored)
    pub fn is_strobe(self) -> bool {
        matches!(
            self,
            Wsync | Rsync | Resp0 | Resp1 | Resm0 | Resm1 | Resbl | Hmove | Hmclr | Cxclr
        )
    }
}

impl TryFrom<u8> for WriteRegister {
    type Error = TiaDebugError;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        WriteRegister::ALL
            .get(addr as usize)
            .copied()
            .ok_or(TiaDebugError::UnknownRegister(addr))
    }
}

impl fmt::Display for WriteRegister {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// TIA read addresses ($00-$0D, $0E/$0F read as zero)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReadRegister {
    Cxm0p = 0x00,
    Cxm1p = 0x01,
    Cxp0fb = 0x02,
    Cxp1fb = 0x03,
    Cxm0fb = 0x04,
    Cxm1fb = 0x05,
    Cxblpf = 0x06,
    Cxppmm = 0x07,
    Inpt0 = 0x08,
    Inpt1 = 0x09,
    Inpt2 = 0x0A,
    Inpt3 = 0x0B,
    Inpt4 = 0x0C,
    Inpt5 = 0x0D,
}

impl ReadRegister {
    pub const INPUTS: [ReadRegister; 6] = [
        ReadRegister::Inpt0,
        ReadRegister::Inpt1,
        ReadRegister::Inpt2,
        ReadRegister::Inpt3,
        ReadRegister::Inpt4,
        ReadRegister::Inpt5,
    ];

    #[inline]
    pub fn addr(self) -> u8 {
        self as u8
    }
}

/// The four colour-luminance registers
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColorRegister {
    P0,
    P1,
    PF,
    BK,
}

impl ColorRegister {
    pub const ALL: [ColorRegister; 4] = [
        ColorRegister::P0,
        ColorRegister::P1,
        ColorRegister::PF,
        ColorRegister::BK,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn register(self) -> WriteRegister {
        match self {
            ColorRegister::P0 => Colup0,
            ColorRegister::P1 => Colup1,
            ColorRegister::PF => Colupf,
            ColorRegister::BK => Colubk,
        }
    }
}

bitflags! {
    /* CTRLPF
        7  bit  0
        ---- ----
        xxBB xPSR
          ||  |||
          ||  ||+- Reflect playfield
          ||  |+-- Score mode (playfield takes player colours)
          ||  +--- Playfield/ball drawn over players
          ++------ Ball size (1, 2, 4, 8 clocks)
     */
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct CtrlPfRegister: u8 {
        const REFLECT    = 0b0000_0001;
        const SCORE      = 0b0000_0010;
        const PRIORITY   = 0b0000_0100;
        const BALL_SIZE1 = 0b0001_0000;
        const BALL_SIZE2 = 0b0010_0000;
    }
}

impl CtrlPfRegister {
    pub const BALL_SIZE: u8 = 0b0011_0000;
}

/// Bits of NUSIZx: player copies/size in 0-2, missile size in 4-5
pub const NUSIZ_PLAYER: u8 = 0b0000_0111;
pub const NUSIZ_MISSILE: u8 = 0b0011_0000;

pub const REFP_BIT: u8 = 0b0000_1000;
pub const ENABLE_BIT: u8 = 0b0000_0010;
pub const VDEL_BIT: u8 = 0b0000_0001;
pub const RESMP_BIT: u8 = 0b0000_0010;
pub const VSYNC_BIT: u8 = 0b0000_0010;
pub const VBLANK_BIT: u8 = 0b0000_0010;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_register_table_matches_addresses() {
        for (addr, reg) in WriteRegister::ALL.iter().enumerate() {
            assert_eq!(reg.addr() as usize, addr, "{} out of place", reg.name());
        }
    }

    #[test]
    fn test_write_register_from_address() {
        assert_eq!(WriteRegister::try_from(0x04), Ok(WriteRegister::Nusiz0));
        assert_eq!(WriteRegister::try_from(0x2C), Ok(WriteRegister::Cxclr));
        assert_eq!(
            WriteRegister::try_from(0x2D),
            Err(TiaDebugError::UnknownRegister(0x2D))
        );
    }

    #[test]
    fn test_ctrlpf_ball_size() {
        let ctrl = CtrlPfRegister::from_bits_truncate(0b0010_0101);
        assert!(ctrl.contains(CtrlPfRegister::REFLECT));
        assert!(ctrl.contains(CtrlPfRegister::PRIORITY));
        assert!(!ctrl.contains(CtrlPfRegister::SCORE));
        assert_eq!(ctrl.bits() & CtrlPfRegister::BALL_SIZE, 0b0010_0000);
    }

    #[test]
    fn test_strobes() {
        assert!(WriteRegister::Cxclr.is_strobe());
        assert!(WriteRegister::Wsync.is_strobe());
        assert!(!WriteRegister::Grp0.is_strobe());
    }
}
