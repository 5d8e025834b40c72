//! Run-wide rules that do not belong to a single difficulty.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFEATS_PER_LEVEL, DEFEAT_HEAL_HP, DEFEAT_SCORE_BONUS, LEVEL_BONUS_DAMAGE, LEVEL_BONUS_HP,
    LEVEL_BONUS_SCORE, TOUGH_MONSTER_THRESHOLD,
};

/// How the question operator is picked for each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorPolicy {
    /// Uniform over the difficulty's allowed operators
    Uniform,
    /// The current monster's affinity, when the difficulty allows it
    #[default]
    MonsterAffinity,
}

/// Optional scaling that grows with every few monsters defeated.
///
/// The level starts at 1. All bonuses are `level * per_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingPolicy {
    pub defeats_per_level: u32,
    pub bonus_damage_per_level: u32,
    pub hp_per_level: u32,
    pub bonus_score_per_level: u32,
}

impl Default for LevelingPolicy {
    fn default() -> Self {
        Self {
            defeats_per_level: DEFEATS_PER_LEVEL,
            bonus_damage_per_level: LEVEL_BONUS_DAMAGE,
            hp_per_level: LEVEL_BONUS_HP,
            bonus_score_per_level: LEVEL_BONUS_SCORE,
        }
    }
}

impl LevelingPolicy {
    /// Whether reaching `defeated` total defeats earns a level.
    pub fn levels_up_at(&self, defeated: usize) -> bool {
        self.defeats_per_level > 0
            && defeated > 0
            && defeated % self.defeats_per_level as usize == 0
    }

    pub fn bonus_damage(&self, level: u32) -> u32 {
        level.saturating_mul(self.bonus_damage_per_level)
    }

    pub fn bonus_hp(&self, level: u32) -> u32 {
        level.saturating_mul(self.hp_per_level)
    }

    pub fn bonus_score(&self, level: u32) -> u32 {
        level.saturating_mul(self.bonus_score_per_level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRules {
    /// HP restored when a monster falls, capped at the player's max
    pub heal_on_defeat: u32,
    /// Score added when a monster falls
    pub defeat_score_bonus: u32,
    /// Base HP above which a monster counts as tough in the summary
    pub tough_threshold: u32,
    pub operator_policy: OperatorPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leveling: Option<LevelingPolicy>,
}

impl Default for RunRules {
    fn default() -> Self {
        Self {
            heal_on_defeat: DEFEAT_HEAL_HP,
            defeat_score_bonus: DEFEAT_SCORE_BONUS,
            tough_threshold: TOUGH_MONSTER_THRESHOLD,
            operator_policy: OperatorPolicy::default(),
            leveling: None,
        }
    }
}

impl RunRules {
    /// Extra damage a correct answer deals at `level`.
    pub fn bonus_damage(&self, level: u32) -> u32 {
        self.leveling.map_or(0, |l| l.bonus_damage(level))
    }

    /// Extra max HP a monster spawned at `level` gets.
    pub fn bonus_hp(&self, level: u32) -> u32 {
        self.leveling.map_or(0, |l| l.bonus_hp(level))
    }

    /// Total score awarded for defeating a monster at `level`.
    pub fn defeat_bonus(&self, level: u32) -> u32 {
        self.defeat_score_bonus
            .saturating_add(self.leveling.map_or(0, |l| l.bonus_score(level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_leveling() {
        let rules = RunRules::default();
        assert_eq!(rules.heal_on_defeat, 15);
        assert_eq!(rules.defeat_score_bonus, 20);
        assert_eq!(rules.tough_threshold, 40);
        assert_eq!(rules.operator_policy, OperatorPolicy::MonsterAffinity);
        assert_eq!(rules.bonus_damage(5), 0);
        assert_eq!(rules.bonus_hp(5), 0);
        assert_eq!(rules.defeat_bonus(5), 20);
    }

    #[test]
    fn test_classic_leveling_bonuses() {
        let rules = RunRules {
            leveling: Some(LevelingPolicy::default()),
            ..Default::default()
        };
        assert_eq!(rules.bonus_damage(1), 2);
        assert_eq!(rules.bonus_hp(2), 20);
        assert_eq!(rules.defeat_bonus(1), 25);
    }

    #[test]
    fn test_levels_up_every_third_defeat() {
        let policy = LevelingPolicy::default();
        let levels: Vec<usize> = (0..10).filter(|&d| policy.levels_up_at(d)).collect();
        assert_eq!(levels, vec![3, 6, 9]);
    }

    #[test]
    fn test_zero_interval_never_levels() {
        let policy = LevelingPolicy {
            defeats_per_level: 0,
            ..Default::default()
        };
        assert!(!policy.levels_up_at(3));
    }
}
