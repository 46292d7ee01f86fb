/// Rule constants shared by every part of the world engine.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig;

impl GameConfig {
    // ===== starting stats (heroes and level-1 minions) =====
    pub const HEALTH_START: u32 = 100;
    pub const MANA_START: u32 = 100;
    pub const ATTACK_START: u32 = 50;
    pub const DEFENSE_START: u32 = 50;

    // ===== growth applied once per level-up =====
    pub const HEALTH_PER_LEVEL: u32 = 10;
    pub const MANA_PER_LEVEL: u32 = 10;
    pub const ATTACK_PER_LEVEL: u32 = 5;
    pub const DEFENSE_PER_LEVEL: u32 = 5;

    // ===== combat =====
    /// Share of the attack stat dealt per hit, in percent.
    pub const ATTACK_PERCENT_PER_HIT: u32 = 30;
    /// Share of incoming damage soaked by defense, in percent.
    pub const DEFENSE_ABSORPTION_PERCENT: u32 = 20;

    // ===== progression =====
    pub const HERO_START_LEVEL: u32 = 1;
    pub const XP_PER_LEVEL: u32 = 15;
    pub const XP_PER_MINION_KILL: u32 = 10;
    pub const MINION_MAX_LEVEL: u32 = 3;

    // ===== compile-time capacities used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 10;
    pub const MAX_OCCUPANTS_PER_TILE: usize = 2;
    /// Hero identifiers are the digits 1..=9.
    pub const MAX_HEROES: usize = 9;
}

/// Integer percentage of `value`, rounded toward zero.
#[inline]
pub(crate) const fn percent_of(value: u32, percent: u32) -> u32 {
    ((value as u64 * percent as u64) / 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_floors() {
        assert_eq!(percent_of(50, GameConfig::ATTACK_PERCENT_PER_HIT), 15);
        assert_eq!(percent_of(55, GameConfig::ATTACK_PERCENT_PER_HIT), 16);
        assert_eq!(percent_of(14, GameConfig::DEFENSE_ABSORPTION_PERCENT), 2);
        assert_eq!(percent_of(4, GameConfig::DEFENSE_ABSORPTION_PERCENT), 0);
    }
}
