//! 呈現層使用的唯讀快照

use super::Game;
use crate::alias::{Fertility, Food};
use crate::component::{Color, ManagementView, Phase, Position, Unit};
use crate::core_types::Grid;
use crate::logic::resource::OperationPreview;
use serde::Serialize;

/// 單一玩家的顯示資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub color: Color,
    pub food: Food,
    pub moves_this_turn: u32,
    pub skills_used_this_turn: u32,
    pub units_alive: usize,
}

/// 畫面所需的全部狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawableState {
    pub units: Vec<Unit>,
    pub fertility: Grid<Fertility>,
    pub territory: Grid<Option<Color>>,
    pub tax_marks: Grid<bool>,
    pub farm_counts: Grid<u32>,
    pub antlers: Vec<(Position, Color)>,
    pub fortresses: Vec<(Position, Color)>,
    pub phase: Phase,
    pub view: ManagementView,
    pub current_player: Color,
    pub round: u32,
    pub players: Vec<PlayerView>,
    pub selected: Option<Position>,
    pub valid_moves: Vec<Position>,
    /// 選中單位下一次移動的花費
    pub selected_move_cost: Option<Food>,
    /// 只在行動階段提供
    pub preview: Option<OperationPreview>,
    pub game_over: bool,
    pub winner: Option<Color>,
}

impl Game {
    pub fn drawable_state(&self) -> DrawableState {
        let ledger = &self.state.ledger;
        let players = self
            .state
            .players
            .iter()
            .map(|p| PlayerView {
                color: p.color,
                food: ledger.food(p.color),
                moves_this_turn: p.moves_this_turn,
                skills_used_this_turn: p.skills_used_this_turn,
                units_alive: p.roster.len(),
            })
            .collect();

        let selected_unit = self
            .selection
            .as_ref()
            .and_then(|s| self.state.board.unit(s.unit_id));
        let preview = (self.phase == Phase::Action && !self.game_over)
            .then(|| ledger.calculate_post_operation_preview(self.current_color()));

        DrawableState {
            units: self.state.board.units().cloned().collect(),
            fertility: ledger.fertility_grid().clone(),
            territory: ledger.territory_grid().clone(),
            tax_marks: ledger.tax_grid().clone(),
            farm_counts: ledger.farm_grid().clone(),
            antlers: self.state.obstacles.antlers().collect(),
            fortresses: self.state.obstacles.fortresses().collect(),
            phase: self.phase,
            view: self.view,
            current_player: self.current_color(),
            round: self.round,
            players,
            selected: selected_unit.map(|u| u.pos),
            valid_moves: self
                .selection
                .as_ref()
                .map(|s| s.valid_moves.iter().copied().collect())
                .unwrap_or_default(),
            selected_move_cost: selected_unit.and_then(|u| self.move_cost_of(u.id)),
            preview,
            game_over: self.game_over,
            winner: self.winner,
        }
    }
}
