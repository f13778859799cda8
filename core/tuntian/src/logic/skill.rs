//! 技能：兵放鹿角、車放堡壘，其他棋子沒有技能

use crate::alias::Food;
use crate::component::{Color, PieceType};
use crate::logic::obstacle::ObstacleKind;
use crate::logic::resource::ResourceLedger;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct SkillSystem {
    costs: BTreeMap<PieceType, Food>,
}

impl SkillSystem {
    pub fn new(costs: BTreeMap<PieceType, Food>) -> Self {
        Self { costs }
    }

    /// 技能放置的障礙物種類
    pub fn skill_of(piece: PieceType) -> Option<ObstacleKind> {
        match piece {
            PieceType::Pawn => Some(ObstacleKind::Antler),
            PieceType::Rook => Some(ObstacleKind::Fortress),
            _ => None,
        }
    }

    /// 技能花費，沒有定義的棋子為 0
    pub fn cost(&self, piece: PieceType) -> Food {
        self.costs.get(&piece).copied().unwrap_or(0)
    }

    pub fn can_cast(&self, piece: PieceType, color: Color, ledger: &ResourceLedger) -> bool {
        ledger.can_afford(color, self.cost(piece))
    }

    /// 付得起就扣糧草並回傳 true，否則不做任何事
    pub fn cast(&self, piece: PieceType, color: Color, ledger: &mut ResourceLedger) -> bool {
        ledger.charge(color, self.cost(piece)).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CostConfig, EconomyConfig};

    #[test]
    fn test_cast_charges_only_when_affordable() {
        let skills = SkillSystem::new(CostConfig::default().skill);
        let mut ledger = ResourceLedger::new(EconomyConfig {
            init_food: 15,
            ..Default::default()
        });

        assert!(skills.can_cast(PieceType::Pawn, Color::White, &ledger));
        assert!(skills.cast(PieceType::Pawn, Color::White, &mut ledger));
        assert_eq!(ledger.food(Color::White), 5);

        assert!(!skills.can_cast(PieceType::Rook, Color::White, &ledger));
        assert!(!skills.cast(PieceType::Rook, Color::White, &mut ledger));
        assert_eq!(ledger.food(Color::White), 5);
    }

    #[test]
    fn test_undefined_skill_costs_nothing() {
        let skills = SkillSystem::new(CostConfig::default().skill);
        assert_eq!(skills.cost(PieceType::Queen), 0);
        assert_eq!(SkillSystem::skill_of(PieceType::Queen), None);
        assert_eq!(
            SkillSystem::skill_of(PieceType::Pawn),
            Some(ObstacleKind::Antler)
        );
        assert_eq!(
            SkillSystem::skill_of(PieceType::Rook),
            Some(ObstacleKind::Fortress)
        );
    }
}
