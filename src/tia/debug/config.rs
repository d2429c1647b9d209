/// Television standard of the emulated console.
///
/// Decides how colour values are named and which audio clock the
/// frequency readout divides.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TvStandard {
    #[default]
    Ntsc,
    Pal,
    Secam,
}

impl TvStandard {
    /// Audio clock in Hz (colour clock / 114)
    pub fn audio_clock_hz(self) -> f64 {
        match self {
            TvStandard::Ntsc => 31_399.5,
            TvStandard::Pal | TvStandard::Secam => 31_113.1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    pub tv_standard: TvStandard,
    /// Prefix values that changed since the previous capture with `*`
    pub mark_changes: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            tv_standard: TvStandard::Ntsc,
            mark_changes: true,
        }
    }
}

impl DebugConfig {
    pub fn with_tv_standard(mut self, tv_standard: TvStandard) -> Self {
        self.tv_standard = tv_standard;
        self
    }

    pub fn with_mark_changes(mut self, mark_changes: bool) -> Self {
        self.mark_changes = mark_changes;
        self
    }
}
