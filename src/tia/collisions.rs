use bitflags::bitflags;
use std::fmt;

bitflags! {
    /* Collision latches, one bit per pair of objects.
       The readable CXxx registers expose these two at a time in bits 7/6.

        bit  pair      CX register
        ---  -----     -----------
         0   M0-P1     CXM0P  bit 7
         1   M0-P0     CXM0P  bit 6
         2   M1-P0     CXM1P  bit 7
         3   M1-P1     CXM1P  bit 6
         4   P0-PF     CXP0FB bit 7
         5   P0-BL     CXP0FB bit 6
         6   P1-PF     CXP1FB bit 7
         7   P1-BL     CXP1FB bit 6
         8   M0-PF     CXM0FB bit 7
         9   M0-BL     CXM0FB bit 6
        10   M1-PF     CXM1FB bit 7
        11   M1-BL     CXM1FB bit 6
        12   BL-PF     CXBLPF bit 7
        13   P0-P1     CXPPMM bit 7
        14   M0-M1     CXPPMM bit 6
     */
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
    pub struct Collisions: u16 {
        const M0_P1 = 1 << 0;
        const M0_P0 = 1 << 1;
        const M1_P0 = 1 << 2;
        const M1_P1 = 1 << 3;
        const P0_PF = 1 << 4;
        const P0_BL = 1 << 5;
        const P1_PF = 1 << 6;
        const P1_BL = 1 << 7;
        const M0_PF = 1 << 8;
        const M0_BL = 1 << 9;
        const M1_PF = 1 << 10;
        const M1_BL = 1 << 11;
        const BL_PF = 1 << 12;
        const P0_P1 = 1 << 13;
        const M0_M1 = 1 << 14;
    }
}

/// An unordered pair of things that can collide
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CollisionPair {
    M0P1,
    M0P0,
    M1P0,
    M1P1,
    P0PF,
    P0BL,
    P1PF,
    P1BL,
    M0PF,
    M0BL,
    M1PF,
    M1BL,
    BLPF,
    P0P1,
    M0M1,
}

impl CollisionPair {
    /// In bit order
    pub const ALL: [CollisionPair; 15] = [
        CollisionPair::M0P1,
        CollisionPair::M0P0,
        CollisionPair::M1P0,
        CollisionPair::M1P1,
        CollisionPair::P0PF,
        CollisionPair::P0BL,
        CollisionPair::P1PF,
        CollisionPair::P1BL,
        CollisionPair::M0PF,
        CollisionPair::M0BL,
        CollisionPair::M1PF,
        CollisionPair::M1BL,
        CollisionPair::BLPF,
        CollisionPair::P0P1,
        CollisionPair::M0M1,
    ];

    #[inline]
    pub fn flag(self) -> Collisions {
        Collisions::from_bits_truncate(1 << (self as u16))
    }

    /// Short label used in the state report
    pub fn label(self) -> &'static str {
        match self {
            CollisionPair::M0P1 => "m0_p1",
            CollisionPair::M0P0 => "m0_p0",
            CollisionPair::M1P0 => "m1_p0",
            CollisionPair::M1P1 => "m1_p1",
            CollisionPair::P0PF => "p0_pf",
            CollisionPair::P0BL => "p0_bl",
            CollisionPair::P1PF => "p1_pf",
            CollisionPair::P1BL => "p1_bl",
            CollisionPair::M0PF => "m0_pf",
            CollisionPair::M0BL => "m0_bl",
            CollisionPair::M1PF => "m1_pf",
            CollisionPair::M1BL => "m1_bl",
            CollisionPair::BLPF => "bl_pf",
            CollisionPair::P0P1 => "p0_p1",
            CollisionPair::M0M1 => "m0_m1",
        }
    }
}

impl fmt::Display for CollisionPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Collisions {
    pub fn new(word: u16) -> Self {
        Collisions::from_bits_truncate(word)
    }

    #[inline]
    pub fn collision(&self, pair: CollisionPair) -> bool {
        (self.bits() & pair.flag().bits()) != 0
    }

    /// Value of CXM0P..CXPPMM (index 0-7) as the CPU would read it
    pub fn read_register(&self, index: u8) -> u8 {
        debug_assert!(index < 8);
        // CXBLPF only has one latch, so CXPPMM starts at bit 13 rather than 14
        let (first, second) = match index {
            0..=5 => (index as u16 * 2, Some(index as u16 * 2 + 1)),
            6 => (12, None),
            _ => (13, Some(14)),
        };
        let bit = |n: u16| ((self.bits() >> n) & 1) as u8;
        (bit(first) << 7) | second.map_or(0, |n| bit(n) << 6)
    }
}

/// Decode a single pair from a raw collision word
#[inline]
pub fn collision(word: u16, pair: CollisionPair) -> bool {
    Collisions::new(word).collision(pair)
}
