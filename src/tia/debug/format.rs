use crate::tia::debug::config::TvStandard;

/// NUSIZx bits 0-2, as described by the Stella programmer's guide
pub const NUSIZ_STRINGS: [&str; 8] = [
    "1 copy",
    "2 copies - close (8)",
    "2 copies - med (24)",
    "3 copies - close (8)",
    "2 copies - wide (56)",
    "2x (16) sized player",
    "3 copies - med (24)",
    "4x (32) sized player",
];

const NTSC_HUES: [&str; 16] = [
    "grey",
    "gold",
    "orange",
    "red-orange",
    "pink",
    "purple",
    "violet",
    "blue",
    "blue",
    "light blue",
    "turquoise",
    "green-blue",
    "green",
    "yellow-green",
    "orange-green",
    "light orange",
];

const PAL_HUES: [&str; 16] = [
    "grey",
    "grey",
    "yellow-green",
    "green",
    "orange",
    "green",
    "red",
    "green-blue",
    "magenta",
    "turquoise",
    "purple",
    "light blue",
    "violet",
    "blue",
    "grey",
    "grey",
];

// SECAM ignores the hue nibble and picks a colour from the luminance bits
const SECAM_COLORS: [&str; 8] = [
    "black", "blue", "red", "magenta", "green", "cyan", "yellow", "white",
];

pub fn nusiz_string(nusiz: u8) -> &'static str {
    NUSIZ_STRINGS[(nusiz & 0x07) as usize]
}

/// Describe a colour register value, e.g. `$1E gold/7`
pub fn color_swatch(color: u8, tv: TvStandard) -> String {
    let color = color & 0xFE;
    let lum = (color >> 1) & 0x07;
    let hue = (color >> 4) as usize;
    match tv {
        TvStandard::Ntsc => format!("${:02X} {}/{}", color, NTSC_HUES[hue], lum),
        TvStandard::Pal => format!("${:02X} {}/{}", color, PAL_HUES[hue], lum),
        TvStandard::Secam => format!("${:02X} {}", color, SECAM_COLORS[lum as usize]),
    }
}

/// Frequency a channel plays at for a given clock divisor. 0 means the
/// channel isn't producing a tone.
pub fn aud_freq(divisor: u8, tv: TvStandard) -> String {
    if divisor == 0 {
        return "silent".to_string();
    }
    let hz = tv.audio_clock_hz() / divisor as f64;
    format!("{:.1}Hz", hz)
}

/// Divisor for `aud_freq` from a channel's AUDF/AUDC pair.
/// AUDC modes 0 and 11 hold the output high, so there's no tone to report.
pub fn aud_divisor(audf: u8, audc: u8) -> u8 {
    match audc & 0x0F {
        0x00 | 0x0B => 0,
        _ => (audf & 0x1F) + 1,
    }
}

pub fn boolean_with_label(label: &str, value: bool) -> String {
    format!("{}: {}", label, if value { "Yes" } else { "No" })
}

/// `%` followed by the low `width` bits of `value`, most significant first
pub fn binary(value: u8, width: usize) -> String {
    let mut out = String::with_capacity(width + 1);
    out.push('%');
    for bit in (0..width).rev() {
        out.push(if (value & (1 << bit)) != 0 { '1' } else { '0' });
    }
    out
}
