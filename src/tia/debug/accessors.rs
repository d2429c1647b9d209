use crate::tia::chip::TiaChip;
use crate::tia::collisions::{CollisionPair, Collisions};
use crate::tia::debug::error::TiaDebugError;
use crate::tia::debug::fields::{self, Field};
use crate::tia::debug::format;
use crate::tia::registers::WriteRegister;
use crate::{trace, trace_debug_event};

/// Integer fields: `name(None)` reads, `name(Some(v))` writes then reads
macro_rules! int_accessors {
    ($($name:ident => $field:expr;)*) => {
        $(
            pub fn $name(&mut self, new_value: Option<u8>) -> u8 {
                self.access($field, new_value)
            }
        )*
    };
}

/// Boolean fields, same shape as `int_accessors`
macro_rules! bool_accessors {
    ($($name:ident => $field:expr;)*) => {
        $(
            pub fn $name(&mut self, new_value: Option<bool>) -> bool {
                self.access($field, new_value.map(u8::from)) != 0
            }
        )*
    };
}

macro_rules! collision_queries {
    ($($name:ident => $pair:expr;)*) => {
        $(
            pub fn $name(&self) -> bool {
                self.collision($pair)
            }
        )*
    };
}

macro_rules! strobes {
    ($($name:ident => $reg:expr;)*) => {
        $(
            pub fn $name(&mut self) {
                self.strobe($reg);
            }
        )*
    };
}

/// Live read/write access to the chip's registers.
///
/// Writes go through `TiaChip::poke`, so they get the same delays and side
/// effects as a write from the running program. A read straight after a
/// write to a delayed register still shows the old value.
pub struct TiaRegisters<'a, C: TiaChip + ?Sized> {
    chip: &'a mut C,
}

impl<'a, C: TiaChip + ?Sized> TiaRegisters<'a, C> {
    pub fn new(chip: &'a mut C) -> Self {
        Self { chip }
    }

    pub fn chip(&self) -> &C {
        &*self.chip
    }

    pub fn read(&self, field: Field) -> u8 {
        fields::read(&*self.chip, field)
    }

    /// Write `value` into the field's bits, then read the field back.
    /// Bits that don't fit the field are dropped.
    pub fn write(&mut self, field: Field, value: u8) -> u8 {
        fields::write(&mut *self.chip, field, value);
        self.read(field)
    }

    /// Like `write`, but refuses values with bits outside the field
    pub fn write_checked(&mut self, field: Field, value: u8) -> Result<u8, TiaDebugError> {
        if !field.fits(value) {
            log::debug!("rejected {} = ${:02X}", field, value);
            trace!("rejected {} = ${:02X}", field, value);
            return Err(TiaDebugError::ValueOutOfRange {
                field,
                value,
                max: field.max(),
            });
        }
        Ok(self.write(field, value))
    }

    pub fn access(&mut self, field: Field, new_value: Option<u8>) -> u8 {
        match new_value {
            Some(value) => self.write(field, value),
            None => self.read(field),
        }
    }

    int_accessors! {
        nusiz0 => Field::Nusiz0;
        nusiz1 => Field::Nusiz1;
        nusiz_p0 => Field::NusizP0;
        nusiz_p1 => Field::NusizP1;
        nusiz_m0 => Field::NusizM0;
        nusiz_m1 => Field::NusizM1;
        colu_p0 => Field::ColuP0;
        colu_p1 => Field::ColuP1;
        colu_pf => Field::ColuPF;
        colu_bk => Field::ColuBK;
        size_bl => Field::SizeBL;
        ctrl_pf => Field::CtrlPF;
        pf0 => Field::Pf0;
        pf1 => Field::Pf1;
        pf2 => Field::Pf2;
        gr_p0 => Field::GrP0;
        gr_p1 => Field::GrP1;
        pos_p0 => Field::PosP0;
        pos_p1 => Field::PosP1;
        pos_m0 => Field::PosM0;
        pos_m1 => Field::PosM1;
        pos_bl => Field::PosBL;
        hm_p0 => Field::HmP0;
        hm_p1 => Field::HmP1;
        hm_m0 => Field::HmM0;
        hm_m1 => Field::HmM1;
        hm_bl => Field::HmBL;
        aud_c0 => Field::AudC0;
        aud_c1 => Field::AudC1;
        aud_f0 => Field::AudF0;
        aud_f1 => Field::AudF1;
        aud_v0 => Field::AudV0;
        aud_v1 => Field::AudV1;
    }

    bool_accessors! {
        ref_p0 => Field::RefP0;
        ref_p1 => Field::RefP1;
        ena_m0 => Field::EnaM0;
        ena_m1 => Field::EnaM1;
        ena_bl => Field::EnaBL;
        vdel_p0 => Field::VdelP0;
        vdel_p1 => Field::VdelP1;
        vdel_bl => Field::VdelBL;
        res_mp0 => Field::ResMP0;
        res_mp1 => Field::ResMP1;
        ref_pf => Field::RefPF;
        score_pf => Field::ScorePF;
        priority_pf => Field::PriorityPF;
    }

    pub fn nusiz_p0_string(&self) -> &'static str {
        format::nusiz_string(self.read(Field::NusizP0))
    }

    pub fn nusiz_p1_string(&self) -> &'static str {
        format::nusiz_string(self.read(Field::NusizP1))
    }

    pub fn collisions(&self) -> Collisions {
        Collisions::new(self.chip.collisions())
    }

    pub fn collision(&self, pair: CollisionPair) -> bool {
        self.collisions().collision(pair)
    }

    collision_queries! {
        coll_m0_p1 => CollisionPair::M0P1;
        coll_m0_p0 => CollisionPair::M0P0;
        coll_m1_p0 => CollisionPair::M1P0;
        coll_m1_p1 => CollisionPair::M1P1;
        coll_p0_pf => CollisionPair::P0PF;
        coll_p0_bl => CollisionPair::P0BL;
        coll_p1_pf => CollisionPair::P1PF;
        coll_p1_bl => CollisionPair::P1BL;
        coll_m0_pf => CollisionPair::M0PF;
        coll_m0_bl => CollisionPair::M0BL;
        coll_m1_pf => CollisionPair::M1PF;
        coll_m1_bl => CollisionPair::M1BL;
        coll_bl_pf => CollisionPair::BLPF;
        coll_p0_p1 => CollisionPair::P0P1;
        coll_m0_m1 => CollisionPair::M0M1;
    }

    /// Poke zero to a register purely for its side effect
    pub fn strobe(&mut self, reg: WriteRegister) {
        debug_assert!(reg.is_strobe(), "{} is not a strobe register", reg);
        log::debug!("strobe {}", reg);
        trace_debug_event!("strobe {}", reg);
        self.chip.poke(reg.addr(), 0);
    }

    strobes! {
        strobe_wsync => WriteRegister::Wsync;
        strobe_rsync => WriteRegister::Rsync;
        strobe_res_p0 => WriteRegister::Resp0;
        strobe_res_p1 => WriteRegister::Resp1;
        strobe_res_m0 => WriteRegister::Resm0;
        strobe_res_m1 => WriteRegister::Resm1;
        strobe_res_bl => WriteRegister::Resbl;
        strobe_hmove => WriteRegister::Hmove;
        strobe_hmclr => WriteRegister::Hmclr;
        strobe_cxclr => WriteRegister::Cxclr;
    }

    pub fn scanlines(&self) -> u32 {
        self.chip.scanlines()
    }

    pub fn frame_count(&self) -> u32 {
        self.chip.frame_count()
    }

    pub fn clocks_this_line(&self) -> u32 {
        self.chip.clocks_this_line()
    }

    pub fn vsync(&self) -> bool {
        self.chip.vsync()
    }

    pub fn vblank(&self) -> bool {
        self.chip.vblank()
    }

    /// `vsync()` as 0/1 for expression evaluation
    pub fn vsync_as_int(&self) -> u32 {
        self.vsync() as u32
    }

    pub fn vblank_as_int(&self) -> u32 {
        self.vblank() as u32
    }
}
