use crate::tia::chip::TiaChip;
use crate::tia::collisions::CollisionPair;
use crate::tia::debug::config::DebugConfig;
use crate::tia::debug::fields::Field;
use crate::tia::debug::format::{self, aud_divisor, aud_freq, binary, boolean_with_label};
use crate::tia::debug::state::TiaState;
use crate::tia::registers::{ColorRegister, ReadRegister};
use crate::tia::Object;

const INPUT_BIT: u8 = 0x80;

/// Per-object fields shown on the P0/P1 lines: GR, pos, HM, NUSIZ, REFP, VDEL
const PLAYER_FIELDS: [[Field; 6]; 2] = [
    [Field::GrP0, Field::PosP0, Field::HmP0, Field::NusizP0, Field::RefP0, Field::VdelP0],
    [Field::GrP1, Field::PosP1, Field::HmP1, Field::NusizP1, Field::RefP1, Field::VdelP1],
];

/// ENAM, pos, HM, size, RESMP
const MISSILE_FIELDS: [[Field; 5]; 2] = [
    [Field::EnaM0, Field::PosM0, Field::HmM0, Field::NusizM0, Field::ResMP0],
    [Field::EnaM1, Field::PosM1, Field::HmM1, Field::NusizM1, Field::ResMP1],
];

/// AUDF, AUDC, AUDV
const AUDIO_FIELDS: [[Field; 3]; 2] = [
    [Field::AudF0, Field::AudC0, Field::AudV0],
    [Field::AudF1, Field::AudC1, Field::AudV1],
];

const COLOR_FIELDS: [Field; 4] = [Field::ColuP0, Field::ColuP1, Field::ColuPF, Field::ColuBK];

/// Decides which values get the `*` changed marker
struct Marker<'a> {
    state: &'a TiaState,
    old: &'a TiaState,
    changed: Vec<Field>,
    active: bool,
}

impl<'a> Marker<'a> {
    fn new(state: &'a TiaState, old: &'a TiaState, config: &DebugConfig) -> Self {
        let active = config.mark_changes && state.is_captured() && old.is_captured();
        let changed = if active { state.changes(old) } else { Vec::new() };
        Self {
            state,
            old,
            changed,
            active,
        }
    }

    fn field(&self, field: Field) -> &'static str {
        if self.changed.contains(&field) { "*" } else { "" }
    }

    fn collision(&self, pair: CollisionPair) -> &'static str {
        if self.active && self.state.collision(pair) != self.old.collision(pair) {
            "*"
        } else {
            ""
        }
    }
}

/// Multi-line text report of `state`, marking values that differ from `old`.
///
/// The counters and the VSYNC/VBLANK flags are read live from `chip`, so they
/// are current even when the snapshot is stale.
pub fn render<C: TiaChip + ?Sized>(
    chip: &C,
    state: &TiaState,
    old: &TiaState,
    config: &DebugConfig,
) -> String {
    let counters = format!(
        "scanline {} frame {} clk {} {} {}",
        chip.scanlines(),
        chip.frame_count(),
        chip.clocks_this_line(),
        boolean_with_label("vsync", chip.vsync()),
        boolean_with_label("vblank", chip.vblank()),
    );

    if !state.is_captured() {
        return [counters, "TIA state: <not captured>".to_string()].join("\n");
    }

    let mark = Marker::new(state, old, config);
    let tv = config.tv_standard;
    let value = |field: Field| state.value(field).unwrap_or(0);
    let mut lines = Vec::with_capacity(16);

    lines.push(ram_line(&state.ram));
    lines.push(counters);

    lines.push(
        ReadRegister::INPUTS
            .iter()
            .enumerate()
            .map(|(i, reg)| {
                // Bit 7 high is released/ungrounded
                let high = (state.ram[reg.addr() as usize] & INPUT_BIT) != 0;
                boolean_with_label(&format!("inpt{}", i), high)
            })
            .collect::<Vec<_>>()
            .join(" "),
    );

    let swatch = |reg: ColorRegister| {
        let field = COLOR_FIELDS[reg.index()];
        format!(
            "{}: {}{}",
            reg.register().name(),
            mark.field(field),
            format::color_swatch(state.color(reg), tv)
        )
    };
    lines.push(format!("{}  {}", swatch(ColorRegister::P0), swatch(ColorRegister::P1)));
    lines.push(format!("{}  {}", swatch(ColorRegister::PF), swatch(ColorRegister::BK)));

    for (i, object) in [Object::P0, Object::P1].into_iter().enumerate() {
        let [gr, pos, hm, nusiz, refp, vdel] = PLAYER_FIELDS[i];
        lines.push(format!(
            "{}: GR={}{} pos={}{} HM={}${:X} {}{} {}{} {}{}",
            object,
            mark.field(gr),
            binary(state.gr[i], 8),
            mark.field(pos),
            state.position(object),
            mark.field(hm),
            state.motion(object),
            mark.field(nusiz),
            format::nusiz_string(state.size_of(object)),
            mark.field(refp),
            boolean_with_label("refl", state.refp[i]),
            mark.field(vdel),
            boolean_with_label("delay", state.vdel[i]),
        ));
    }

    for (i, object) in [Object::M0, Object::M1].into_iter().enumerate() {
        let [ena, pos, hm, size, resmp] = MISSILE_FIELDS[i];
        lines.push(format!(
            "{}: {}{} pos={}{} HM={}${:X} size={}{} {}{}",
            object,
            mark.field(ena),
            boolean_with_label("enabled", state.enabled[i]),
            mark.field(pos),
            state.position(object),
            mark.field(hm),
            state.motion(object),
            mark.field(size),
            state.size_of(object),
            mark.field(resmp),
            boolean_with_label("reset", state.resmp[i]),
        ));
    }

    lines.push(format!(
        "{}: {}{} pos={}{} HM={}${:X} size={}{} {}{}",
        Object::BL,
        mark.field(Field::EnaBL),
        boolean_with_label("enabled", state.enabled[2]),
        mark.field(Field::PosBL),
        state.position(Object::BL),
        mark.field(Field::HmBL),
        state.motion(Object::BL),
        mark.field(Field::SizeBL),
        state.size_of(Object::BL),
        mark.field(Field::VdelBL),
        boolean_with_label("delay", state.vdel[2]),
    ));

    lines.push(format!(
        "PF0: {}{} PF1: {}{} PF2: {}{} {}{} {}{} {}{}",
        mark.field(Field::Pf0),
        binary(state.pf[0], 4),
        mark.field(Field::Pf1),
        binary(state.pf[1], 8),
        mark.field(Field::Pf2),
        binary(state.pf[2], 8),
        mark.field(Field::RefPF),
        boolean_with_label("reflect", value(Field::RefPF) != 0),
        mark.field(Field::ScorePF),
        boolean_with_label("score", value(Field::ScorePF) != 0),
        mark.field(Field::PriorityPF),
        boolean_with_label("priority", value(Field::PriorityPF) != 0),
    ));

    let collisions: Vec<String> = CollisionPair::ALL
        .iter()
        .map(|&pair| {
            format!(
                "{}{}",
                mark.collision(pair),
                boolean_with_label(pair.label(), state.collision(pair))
            )
        })
        .collect();
    lines.push(format!("Collisions: {}", collisions.join(" ")));

    for (channel, [audf, audc, audv]) in AUDIO_FIELDS.into_iter().enumerate() {
        let f = value(audf);
        let c = value(audc);
        lines.push(format!(
            "AUDF{ch}: {}${:02X}/{} AUDC{ch}: {}${:X} AUDV{ch}: {}${:X}",
            mark.field(audf),
            f,
            aud_freq(aud_divisor(f, c), tv),
            mark.field(audc),
            c,
            mark.field(audv),
            value(audv),
            ch = channel,
        ));
    }

    lines.join("\n")
}

/// `00: rr rr .. - rr rr ..` dump of the sixteen readable registers
fn ram_line(ram: &[u8]) -> String {
    let hex = |bytes: &[u8]| {
        bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let (lo, hi) = ram.split_at(ram.len() / 2);
    format!("00: {} - {}", hex(lo), hex(hi))
}
