//! Combat rule constants - all tunable values in one place

// Action costs
pub const MELEE_STAMINA_COST: u32 = 10;
pub const RANGED_STAMINA_COST: u32 = 5;
pub const RANGED_AMMUNITION_COST: u32 = 1;
pub const MAGIC_MP_COST: u32 = 15;
pub const HEAL_MP_COST: u32 = 10;

// Ranges (Manhattan radius)
pub const MELEE_RANGE: u32 = 1;
pub const RANGED_RANGE: u32 = 3;
pub const MAGIC_RANGE: u32 = 2;
pub const HEAL_RANGE: u32 = 2;

// Damage divisors
pub const MELEE_STRENGTH_DIVISOR: u32 = 4;
pub const RANGED_STRENGTH_DIVISOR: u32 = 6;
pub const MAGIC_MP_DIVISOR: u32 = 3;

// Heal roll, half-open [min, max)
pub const HEAL_ROLL_MIN: u32 = 10;
pub const HEAL_ROLL_MAX: u32 = 20;

// Command layer
pub const ATTACK_STAMINA_COST: u32 = 10;
pub const HEAL_COMMAND_DEFAULT_AMOUNT: u32 = 20;
pub const HEAL_COMMAND_MP_COST: u32 = 10;

// Per-turn regeneration
pub const IDLE_MP_REGEN: u32 = 2;
pub const IDLE_STAMINA_REGEN: u32 = 1;
pub const DEFENDING_STAMINA_REGEN: u32 = 3;
pub const DEFENDING_MP_REGEN: u32 = 1;
