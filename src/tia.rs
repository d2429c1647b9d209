pub mod chip;
pub mod collisions;
pub mod debug;
pub mod registers;
pub mod tracer;

#[cfg(any(test, feature = "testing-utils"))]
pub mod test_utils;

use std::fmt;

pub use chip::{PendingWrite, TiaChip};

pub const CLOCKS_PER_SCANLINE: u32 = 228;
pub const HBLANK_CLOCKS: u32 = 68;
pub const VISIBLE_CLOCKS: u32 = 160;

/// The five movable objects drawn by the TIA
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Object {
    P0,
    P1,
    M0,
    M1,
    BL,
}

impl Object {
    pub const ALL: [Object; 5] = [Object::P0, Object::P1, Object::M0, Object::M1, Object::BL];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Object::P0 => "P0",
            Object::P1 => "P1",
            Object::M0 => "M0",
            Object::M1 => "M1",
            Object::BL => "BL",
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
