//! Monster catalog entries and per-encounter instances.

use serde::{Deserialize, Serialize};

use crate::question::Operator;

/// A catalog entry. Instances are derived from it on every spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub base_hp: u32,
    /// Operator this monster favours; `None` means any allowed operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Operator>,
}

impl MonsterTemplate {
    pub fn new(name: &str, base_hp: u32, affinity: Option<Operator>) -> Self {
        Self {
            name: name.to_string(),
            base_hp,
            affinity,
        }
    }

    /// Creates the instance fought in one encounter.
    pub fn instantiate(&self, bonus_hp: u32) -> MonsterInstance {
        let max_hp = self.base_hp.saturating_add(bonus_hp);
        MonsterInstance {
            name: self.name.clone(),
            current_hp: max_hp as i64,
            max_hp,
            affinity: self.affinity,
        }
    }
}

/// The six monsters of the classic arena.
pub fn classic_catalog() -> Vec<MonsterTemplate> {
    vec![
        MonsterTemplate::new("Addagon", 25, Some(Operator::Add)),
        MonsterTemplate::new("Subtrax", 25, Some(Operator::Subtract)),
        MonsterTemplate::new("Multiplex", 35, Some(Operator::Multiply)),
        MonsterTemplate::new("Calcumancer", 30, Some(Operator::Add)),
        MonsterTemplate::new("Dividra", 50, Some(Operator::Divide)),
        MonsterTemplate::new("Mathemorph", 45, None),
    ]
}

/// The monster currently being fought.
///
/// `current_hp` is signed: a hit may push it below zero before the
/// encounter checks for defeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterInstance {
    pub name: String,
    pub current_hp: i64,
    pub max_hp: u32,
    pub affinity: Option<Operator>,
}

impl MonsterInstance {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn apply_hp_delta(&mut self, delta: i64) {
        self.current_hp += delta;
    }

    /// HP clamped at zero, for display.
    pub fn display_hp(&self) -> u32 {
        self.current_hp.clamp(0, self.max_hp as i64) as u32
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.display_hp() as f64 / self.max_hp as f64
    }
}
