//! 遊戲參數設定
//!
//! 所有欄位都有預設值（等同 `constants` 內的數值），TOML 只需寫出要覆寫的部分：
//!
//! ```toml
//! [economy]
//! init_food = 40
//!
//! [costs.move_base]
//! queen = 7
//! ```

use crate::alias::{Fertility, Food};
use crate::component::PieceType;
use crate::constants::*;
use crate::error::{LoadError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// 頂層設定
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub economy: EconomyConfig,
    pub limits: LimitConfig,
    pub costs: CostConfig,
}

/// 資源帳本使用的數值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub init_food: Food,
    pub init_fertility: Fertility,
    pub fertility_decay: Fertility,
    pub tax_divisor: Fertility,
    pub tax_fertility_cost: Fertility,
    pub farm_food_cost: Food,
    pub farm_fertility_gain: Fertility,
    pub farm_max_per_cell: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            init_food: INIT_FOOD,
            init_fertility: INIT_FERTILITY,
            fertility_decay: FERTILITY_DECAY,
            tax_divisor: TAX_DIVISOR,
            tax_fertility_cost: TAX_FERTILITY_COST,
            farm_food_cost: FARM_FOOD_COST,
            farm_fertility_gain: FARM_FERTILITY_GAIN,
            farm_max_per_cell: FARM_MAX_PER_GRID_PER_TURN,
        }
    }
}

/// 每回合次數上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    pub moves_per_turn: u32,
    pub king_moves_per_turn: u32,
    pub skills_per_turn: u32,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            moves_per_turn: PIECE_MOVE_MAX_PER_TURN,
            king_moves_per_turn: PIECE_KING_MOVE_MAX_PER_TURN,
            skills_per_turn: SKILL_MAX_PER_TURN,
        }
    }
}

/// 移動與技能花費
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// 各棋子的基礎移動花費，只需列出要覆寫的棋子
    #[serde(deserialize_with = "overlay_move_base")]
    pub move_base: BTreeMap<PieceType, Food>,
    /// 本回合每多移動一次的加價
    pub per_moved: Food,
    /// 王用完移動次數後的花費
    pub king_locked: Food,
    /// 有技能的棋子及其花費，未列出的棋子沒有技能
    pub skill: BTreeMap<PieceType, Food>,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            move_base: BTreeMap::from([
                (PieceType::Pawn, 1),
                (PieceType::Knight, 3),
                (PieceType::Bishop, 3),
                (PieceType::Rook, 5),
                (PieceType::Queen, 9),
                (PieceType::King, 3),
            ]),
            per_moved: MOVE_COST_PER_MOVED,
            king_locked: KING_LOCKED_MOVE_COST,
            skill: BTreeMap::from([(PieceType::Pawn, 10), (PieceType::Rook, 10)]),
        }
    }
}

fn overlay_move_base<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<PieceType, Food>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut move_base = CostConfig::default().move_base;
    move_base.extend(BTreeMap::<PieceType, Food>::deserialize(deserializer)?);
    Ok(move_base)
}

impl GameConfig {
    /// 檢查數值是否合理（除數不為 0、每種棋子都有移動花費等）
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| LoadError::DeserializeError {
            format: "config".to_string(),
            reason,
        };

        if self.economy.tax_divisor <= 0 {
            return Err(invalid("tax_divisor 必須大於 0".to_string()).into());
        }
        if self.economy.farm_food_cost <= 0 {
            return Err(invalid("farm_food_cost 必須大於 0".to_string()).into());
        }
        if self.economy.init_food < 0 || self.economy.init_fertility < 0 {
            return Err(invalid("開局糧草與豐饒度不可為負".to_string()).into());
        }
        let non_negative = [
            ("fertility_decay", self.economy.fertility_decay),
            ("tax_fertility_cost", self.economy.tax_fertility_cost),
            ("farm_fertility_gain", self.economy.farm_fertility_gain),
            ("per_moved", self.costs.per_moved),
            ("king_locked", self.costs.king_locked),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, value)| *value < 0) {
            return Err(invalid(format!("{name} 不可為負: {value}")).into());
        }
        for piece in PieceType::iter() {
            match self.costs.move_base.get(&piece) {
                Some(cost) if *cost >= 0 => {}
                Some(cost) => {
                    return Err(invalid(format!("{piece} 的移動花費不可為負: {cost}")).into());
                }
                None => return Err(invalid(format!("缺少 {piece} 的移動花費")).into()),
            }
        }
        if let Some((piece, cost)) = self.costs.skill.iter().find(|(_, cost)| **cost < 0) {
            return Err(invalid(format!("{piece} 的技能花費不可為負: {cost}")).into());
        }
        Ok(())
    }
}
