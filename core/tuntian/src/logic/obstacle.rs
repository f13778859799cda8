//! 障礙物：鹿角與堡壘
//!
//! - 鹿角：阻擋敵方滑行穿越，己方可通過；馬可跳過。敵方走到鹿角上會「原地吃掉」鹿角。
//! - 堡壘：敵方任何棋子都不能進入，也不能穿越。

use crate::component::{Color, Position};
use crate::error::{Result, RuleError};
use serde::Serialize;
use std::collections::BTreeMap;
use strum_macros::Display;

/// 障礙物種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Antler,
    Fortress,
}

/// 兩種障礙物的位置與擁有者，同一格最多一個障礙物
#[derive(Debug, Clone, Default)]
pub struct ObstacleRegistry {
    antlers: BTreeMap<Position, Color>,
    fortresses: BTreeMap<Position, Color>,
}

impl ObstacleRegistry {
    pub fn antler_at(&self, pos: Position) -> Option<Color> {
        self.antlers.get(&pos).copied()
    }

    pub fn fortress_at(&self, pos: Position) -> Option<Color> {
        self.fortresses.get(&pos).copied()
    }

    pub fn has_obstacle(&self, pos: Position) -> bool {
        self.antlers.contains_key(&pos) || self.fortresses.contains_key(&pos)
    }

    pub fn antlers(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.antlers.iter().map(|(pos, color)| (*pos, *color))
    }

    pub fn fortresses(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.fortresses.iter().map(|(pos, color)| (*pos, *color))
    }

    pub fn is_enemy_antler(&self, pos: Position, mover: Color) -> bool {
        self.antler_at(pos).is_some_and(|owner| owner != mover)
    }

    pub fn is_enemy_fortress(&self, pos: Position, mover: Color) -> bool {
        self.fortress_at(pos).is_some_and(|owner| owner != mover)
    }

    /// 滑行時此格是否擋住 `mover`（敵方鹿角或敵方堡壘）
    pub fn blocks_passage(&self, pos: Position, mover: Color) -> bool {
        self.is_enemy_antler(pos, mover) || self.is_enemy_fortress(pos, mover)
    }

    pub fn place(&mut self, kind: ObstacleKind, pos: Position, owner: Color) -> Result<()> {
        if self.has_obstacle(pos) {
            return Err(RuleError::ObstacleAlreadyPresent { pos }.into());
        }
        match kind {
            ObstacleKind::Antler => self.antlers.insert(pos, owner),
            ObstacleKind::Fortress => self.fortresses.insert(pos, owner),
        };
        Ok(())
    }

    pub fn place_antler(&mut self, pos: Position, owner: Color) -> Result<()> {
        self.place(ObstacleKind::Antler, pos, owner)
    }

    pub fn place_fortress(&mut self, pos: Position, owner: Color) -> Result<()> {
        self.place(ObstacleKind::Fortress, pos, owner)
    }

    /// 移除鹿角，回傳原擁有者
    pub fn remove_antler(&mut self, pos: Position) -> Option<Color> {
        self.antlers.remove(&pos)
    }

    pub fn is_empty(&self) -> bool {
        self.antlers.is_empty() && self.fortresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_obstacle_per_cell() {
        let mut registry = ObstacleRegistry::default();
        let pos = Position::new(3, 3);
        registry.place_antler(pos, Color::White).unwrap();

        for kind in [ObstacleKind::Antler, ObstacleKind::Fortress] {
            let err = registry.place(kind, pos, Color::Black).unwrap_err();
            assert_eq!(err.rule(), Some(&RuleError::ObstacleAlreadyPresent { pos }));
        }
        assert_eq!(registry.antler_at(pos), Some(Color::White));
        assert_eq!(registry.fortress_at(pos), None);
    }

    #[test]
    fn test_blocks_only_enemies() {
        let mut registry = ObstacleRegistry::default();
        let antler = Position::new(2, 2);
        let fortress = Position::new(4, 4);
        registry.place_antler(antler, Color::Black).unwrap();
        registry.place_fortress(fortress, Color::Black).unwrap();

        assert!(registry.blocks_passage(antler, Color::White));
        assert!(registry.blocks_passage(fortress, Color::White));
        assert!(!registry.blocks_passage(antler, Color::Black));
        assert!(!registry.blocks_passage(fortress, Color::Black));
        assert!(registry.is_enemy_fortress(fortress, Color::White));
        assert!(!registry.is_enemy_antler(fortress, Color::White));
    }

    #[test]
    fn test_remove_antler() {
        let mut registry = ObstacleRegistry::default();
        let pos = Position::new(1, 1);
        registry.place_antler(pos, Color::Black).unwrap();
        assert_eq!(registry.remove_antler(pos), Some(Color::Black));
        assert!(registry.is_empty());
        assert_eq!(registry.remove_antler(pos), None);
    }
}
