//! 遊戲常數定義
//!
//! 可調整的數值放在 `config`，這裡只留預設值與不可調整的常數。

use crate::alias::{Coord, Fertility, Food};

/// 棋盤邊長（8x8）
pub const GRID_SIZE: Coord = 8;

/// 開局糧草
pub const INIT_FOOD: Food = 20;

/// 開局豐饒度
pub const INIT_FERTILITY: Fertility = 100;

/// 每回合每格最多屯田次數
pub const FARM_MAX_PER_GRID_PER_TURN: u32 = 5;

/// 每回合每位玩家最多移動次數
pub const PIECE_MOVE_MAX_PER_TURN: u32 = 3;

/// 每回合王最多移動次數
pub const PIECE_KING_MOVE_MAX_PER_TURN: u32 = 1;

/// 每回合每位玩家最多技能次數
pub const SKILL_MAX_PER_TURN: u32 = 2;

/// 佔據格子每回合損失的豐饒度
pub const FERTILITY_DECAY: Fertility = 5;

/// 征稅：豐饒度除以此值為收入
pub const TAX_DIVISOR: Fertility = 10;

/// 征稅後格子損失的豐饒度
pub const TAX_FERTILITY_COST: Fertility = 10;

/// 每次屯田花費的糧草
pub const FARM_FOOD_COST: Food = 10;

/// 每次屯田增加的豐饒度
pub const FARM_FERTILITY_GAIN: Fertility = 5;

/// 每多移動一次的額外花費
pub const MOVE_COST_PER_MOVED: Food = 2;

/// 王超過移動次數後的花費（實際上無法支付）
pub const KING_LOCKED_MOVE_COST: Food = 9999;
