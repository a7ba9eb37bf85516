//! Wave sizing and score-target formulas.

use astrodefense_core::constants::{BASE_WAVE_SIZE, MAX_WAVE_SIZE, TARGET_SCORE_PERCENT};

/// Number of hostiles in wave `wave` (1-based) of `level`.
pub fn wave_size(level: u32, wave: u32) -> u32 {
    (BASE_WAVE_SIZE + level + wave).min(MAX_WAVE_SIZE)
}

/// Score needed to clear a level whose last wave has `wave_size` hostiles:
/// 90% of the score if every hostile were the most valuable type, floored.
pub fn target_score(wave_size: u32, max_point_value: u32) -> u32 {
    let max_score = u64::from(wave_size) * u64::from(max_point_value);
    (max_score * u64::from(TARGET_SCORE_PERCENT) / 100) as u32
}
