//! Derives decoding parameters from the encoded input length.

use super::models::{GenerationPlan, Level};

/// Per-level scaling rules. Fractions are integer percentages of the
/// encoded length, truncated before the floor is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProfile {
    pub min_percent: usize,
    pub min_floor: usize,
    pub max_percent: usize,
    pub max_floor: usize,
    pub num_beams: usize,
    pub length_penalty: f32,
}

pub const SHORTEST: LevelProfile = LevelProfile {
    min_percent: 10,
    min_floor: 20,
    max_percent: 20,
    max_floor: 50,
    num_beams: 2,
    length_penalty: 0.8,
};

pub const NORMAL: LevelProfile = LevelProfile {
    min_percent: 20,
    min_floor: 40,
    max_percent: 40,
    max_floor: 100,
    num_beams: 4,
    length_penalty: 1.0,
};

pub const ELABORATIVE: LevelProfile = LevelProfile {
    min_percent: 30,
    min_floor: 60,
    max_percent: 60,
    max_floor: 150,
    num_beams: 6,
    length_penalty: 1.2,
};

impl Level {
    #[must_use]
    pub fn profile(self) -> &'static LevelProfile {
        match self {
            Level::Shortest => &SHORTEST,
            Level::Normal => &NORMAL,
            Level::Elaborative => &ELABORATIVE,
        }
    }
}

fn scaled(encoded_length: usize, percent: usize, floor: usize) -> usize {
    (encoded_length.saturating_mul(percent) / 100).max(floor)
}

/// Computes the generation plan for `encoded_length` tokens at `level`.
///
/// `min_length <= max_length` is not enforced here; the generator backend
/// owns that check.
#[must_use]
pub fn plan(encoded_length: usize, level: Level) -> GenerationPlan {
    let profile = level.profile();
    GenerationPlan {
        min_length: scaled(encoded_length, profile.min_percent, profile.min_floor),
        max_length: scaled(encoded_length, profile.max_percent, profile.max_floor),
        num_beams: profile.num_beams,
        length_penalty: profile.length_penalty,
    }
}
