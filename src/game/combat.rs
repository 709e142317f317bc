//! # Combat Resolution
//!
//! Damage, death and winner determination for a single battle action.

use crate::Player;
use serde::{Deserialize, Serialize};

/// The choice a defending player makes in battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleAction {
    /// Stand and retaliate: take the full hit, battle continues
    Attack,
    /// Flee: take half the hit, battle ends
    Defend,
}

impl BattleAction {
    /// Damage the defender takes from a weapon of the given strength.
    ///
    /// Configured weapons deal even damage, so a flee costs exactly half. An odd
    /// value on a hand-built weapon rounds up.
    pub fn damage_taken(self, weapon_damage: u32) -> u32 {
        match self {
            BattleAction::Attack => weapon_damage,
            BattleAction::Defend => weapon_damage.div_ceil(2),
        }
    }

    /// Whether choosing this action ends the battle.
    pub fn ends_battle(self) -> bool {
        matches!(self, BattleAction::Defend)
    }
}

impl std::str::FromStr for BattleAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "attack" => Ok(BattleAction::Attack),
            "defend" => Ok(BattleAction::Defend),
            other => Err(format!("unknown battle action '{}'", other)),
        }
    }
}

/// What a resolved battle action did to the defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEffect {
    pub action: BattleAction,
    pub damage: u32,
    /// Defender health after the hit, floored at zero
    pub remaining_health: i32,
    pub defender_died: bool,
}

impl CombatEffect {
    /// Whether the battle continues after this effect.
    pub fn battle_continues(&self) -> bool {
        !self.defender_died && !self.action.ends_battle()
    }
}

/// Applies one battle action to the defender.
///
/// Death is decided on the raw result of the subtraction; health is floored at
/// zero only after that check.
pub fn resolve_action(
    action: BattleAction,
    defender: &mut Player,
    attacker_damage: u32,
) -> CombatEffect {
    let damage = action.damage_taken(attacker_damage);
    let raw = defender
        .health
        .saturating_sub(i32::try_from(damage).unwrap_or(i32::MAX));
    let defender_died = raw < 1;
    defender.health = raw.max(0);

    log::debug!(
        "{} chose {:?} and took {} damage ({} health left)",
        defender.name,
        action,
        damage,
        defender.health
    );

    CombatEffect {
        action,
        damage,
        remaining_health: defender.health,
        defender_died,
    }
}

/// Checks whether the player has run out of health.
pub fn check_death(player: &Player) -> bool {
    !player.is_alive()
}
