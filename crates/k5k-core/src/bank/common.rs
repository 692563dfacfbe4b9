//! Common block parameters (effects, reverb, EQ, volume, polyphony).

use serde::Serialize;
use strum::{Display, FromRepr, IntoStaticStr};

use super::layout::common;

const REVERB_NAMES: [&str; 11] = [
    "Hall 1",
    "Hall 2",
    "Hall 3",
    "Room 1",
    "Room 2",
    "Room 3",
    "Plate 1",
    "Plate 2",
    "Plate 3",
    "Reverse",
    "Long Delay",
];

/// Effect types are numbered from 11 to 47
const FIRST_EFFECT_TYPE: u8 = 11;

const EFFECT_NAMES: [&str; 37] = [
    "Early Reflection 1",
    "Early Reflection 2",
    "Tap Delay 1",
    "Tap Delay 2",
    "Single Delay",
    "Dual Delay",
    "Stereo Delay",
    "Cross Delay",
    "Auto Pan",
    "Auto Pan & Delay",
    "Chorus 1",
    "Chorus 2",
    "Chorus 1 & Delay",
    "Chorus 2 & Delay",
    "Flanger 1",
    "Flanger 2",
    "Flanger 1 & Delay",
    "Flanger 2 & Delay",
    "Ensemble",
    "Ensemble & Delay",
    "Celeste",
    "Celeste & Delay",
    "Tremolo",
    "Tremolo & Delay",
    "Phaser 1",
    "Phaser 2",
    "Phaser 1 & Delay",
    "Phaser 2 & Delay",
    "Rotary",
    "Autowah",
    "Bandpass",
    "Exciter",
    "Enhancer",
    "Overdrive",
    "Distortion",
    "Overdrive & Delay",
    "Distortion & Delay",
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, FromRepr, IntoStaticStr, Display,
)]
#[repr(u8)]
pub enum Polyphony {
    #[strum(serialize = "POLY")]
    Poly = 0,
    #[strum(serialize = "SOLO1")]
    Solo1 = 1,
    #[strum(serialize = "SOLO2")]
    Solo2 = 2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Reverb {
    /// 0...10
    pub kind: u8,
    pub dry_wet: u8,
    pub params: [u8; 4],
}

impl Reverb {
    pub fn name(&self) -> Option<&'static str> {
        REVERB_NAMES.get(self.kind as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub kind: u8,
    pub depth: u8,
    pub params: [u8; 4],
}

impl Effect {
    /// Some banks carry type 0, which has no name
    pub fn name(&self) -> Option<&'static str> {
        let index = self.kind.checked_sub(FIRST_EFFECT_TYPE)?;
        EFFECT_NAMES.get(index as usize).copied()
    }
}

/// Graphic EQ band gains, -64..=63
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Geq {
    pub bands: [i8; common::GEQ_BANDS],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommonParams {
    pub checksum: u8,
    /// 0-based; the front panel shows 1...4
    pub effect_algorithm: u8,
    pub reverb: Reverb,
    pub effects: [Effect; 4],
    pub geq: Geq,
    pub volume: u8,
    pub polyphony_raw: u8,
}

fn param_block(block: &[u8], start: usize) -> (u8, u8, [u8; 4]) {
    let mut params = [0u8; 4];
    params.copy_from_slice(&block[start + 2..start + common::EFFECT_BLOCK_SIZE]);
    (block[start], block[start + 1], params)
}

impl CommonParams {
    /// Parse the common block. `block` must hold at least the full 82 bytes.
    pub fn parse(block: &[u8]) -> Self {
        let (kind, dry_wet, params) = param_block(block, common::REVERB);
        let reverb = Reverb {
            kind,
            dry_wet,
            params,
        };

        let effects = common::EFFECTS.map(|start| {
            let (kind, depth, params) = param_block(block, start);
            Effect {
                kind,
                depth,
                params,
            }
        });

        let mut bands = [0i8; common::GEQ_BANDS];
        for (i, band) in bands.iter_mut().enumerate() {
            let gain = i16::from(block[common::GEQ + i]) - common::GEQ_BIAS;
            *band = gain.clamp(-common::GEQ_BIAS, common::GEQ_BIAS - 1) as i8;
        }

        Self {
            checksum: block[common::CHECKSUM],
            effect_algorithm: block[common::EFFECT_ALGORITHM],
            reverb,
            effects,
            geq: Geq { bands },
            volume: block[common::VOLUME],
            polyphony_raw: block[common::POLYPHONY],
        }
    }

    /// Algorithm number as shown on the front panel
    pub fn effect_algorithm_number(&self) -> u16 {
        u16::from(self.effect_algorithm) + 1
    }

    pub fn polyphony(&self) -> Option<Polyphony> {
        Polyphony::from_repr(self.polyphony_raw)
    }
}
