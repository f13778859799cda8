//! 移動邏輯：移動花費、候選目的地、障礙物阻擋與合法目的地

use crate::alias::{Food, UnitId};
use crate::component::{Color, PieceType, Position, Unit};
use crate::config::{CostConfig, LimitConfig};
use crate::logic::board::Board;
use crate::logic::obstacle::ObstacleRegistry;
use crate::logic::resource::ResourceLedger;
use std::collections::BTreeSet;

const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// 移動花費：`基礎花費 + 2 * 本回合已移動次數`
///
/// 王用完本回合的移動次數後花費變成 `king_locked`，實際上無法支付。
pub fn move_cost(costs: &CostConfig, limits: &LimitConfig, piece: PieceType, moved: u32) -> Food {
    if piece == PieceType::King && moved >= limits.king_moves_per_turn {
        return costs.king_locked;
    }
    let base = costs.move_base.get(&piece).copied().unwrap_or(costs.king_locked);
    base + costs.per_moved * moved as Food
}

/// 提供移動邏輯用的棋盤視圖（單位 + 障礙物）
#[derive(Debug, Clone, Copy)]
pub struct MoveView<'a> {
    pub board: &'a Board,
    pub obstacles: &'a ObstacleRegistry,
}

impl<'a> MoveView<'a> {
    pub fn new(board: &'a Board, obstacles: &'a ObstacleRegistry) -> Self {
        Self { board, obstacles }
    }

    /// 依棋子種類產生候選目的地（尚未經過最終過濾）
    pub fn candidate_moves(&self, unit: &Unit) -> Vec<Position> {
        match unit.piece {
            PieceType::Pawn => self.pawn_moves(unit),
            PieceType::Rook => self.ray_moves(unit, &ROOK_DIRECTIONS),
            PieceType::Bishop => self.ray_moves(unit, &BISHOP_DIRECTIONS),
            PieceType::Queen => self.ray_moves(unit, &QUEEN_DIRECTIONS),
            PieceType::Knight => self.step_moves(unit, &KNIGHT_OFFSETS),
            PieceType::King => self.step_moves(unit, &QUEEN_DIRECTIONS),
        }
    }

    fn pawn_moves(&self, unit: &Unit) -> Vec<Position> {
        let mut moves = Vec::new();
        let forward = unit.color.forward();

        if let Some(one) = unit.pos.offset(forward, 0) {
            if self.board.is_empty(one) {
                moves.push(one);
                if unit.pos.row == unit.color.pawn_home_row() {
                    if let Some(two) = unit.pos.offset(2 * forward, 0) {
                        if self.board.is_empty(two) {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        for d_col in [-1, 1] {
            let Some(target) = unit.pos.offset(forward, d_col) else {
                continue;
            };
            if self.board.color_at(target).is_some_and(|c| c != unit.color) {
                moves.push(target);
            }
        }
        moves
    }

    // 沿方向滑行：遇到邊界、己方單位停止；敵方單位與敵方鹿角包含在內後停止；敵方堡壘不包含
    fn ray_moves(&self, unit: &Unit, directions: &[(isize, isize)]) -> Vec<Position> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in directions {
            let mut current = unit.pos;
            while let Some(next) = current.offset(d_row, d_col) {
                current = next;
                if self.obstacles.is_enemy_fortress(next, unit.color) {
                    break;
                }
                if let Some(color) = self.board.color_at(next) {
                    if color != unit.color {
                        moves.push(next);
                    }
                    break;
                }
                moves.push(next);
                if self.obstacles.is_enemy_antler(next, unit.color) {
                    break;
                }
            }
        }
        moves
    }

    fn step_moves(&self, unit: &Unit, offsets: &[(isize, isize)]) -> Vec<Position> {
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| unit.pos.offset(d_row, d_col))
            .filter(|pos| self.board.color_at(*pos) != Some(unit.color))
            .collect()
    }

    /// 檢查移動路徑是否被障礙物阻擋
    ///
    /// - 馬可以跳過任何鹿角，只檢查目的地是否為敵方堡壘
    /// - 其他棋子在直線或斜線上，中間格有敵方鹿角或敵方堡壘即被阻擋
    /// - 目的地為敵方堡壘一律阻擋
    pub fn is_blocked(&self, from: Position, to: Position, color: Color) -> bool {
        let is_knight = self
            .board
            .unit_at(from)
            .is_some_and(|u| u.piece == PieceType::Knight);
        if is_knight {
            return self.obstacles.is_enemy_fortress(to, color);
        }

        let d_row = to.row as isize - from.row as isize;
        let d_col = to.col as isize - from.col as isize;
        if d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs() {
            let steps = d_row.abs().max(d_col.abs());
            let (step_row, step_col) = (d_row.signum(), d_col.signum());
            let path_blocked = (1..steps)
                .filter_map(|i| from.offset(step_row * i, step_col * i))
                .any(|pos| self.obstacles.blocks_passage(pos, color));
            if path_blocked {
                return true;
            }
        }

        self.obstacles.is_enemy_fortress(to, color)
    }

    /// 候選目的地經最終過濾後的合法目的地（不含糧草檢查）
    pub fn reachable(&self, unit: &Unit) -> BTreeSet<Position> {
        self.candidate_moves(unit)
            .into_iter()
            .filter(|to| !self.obstacles.is_enemy_fortress(*to, unit.color))
            .filter(|to| !self.is_blocked(unit.pos, *to, unit.color))
            .collect()
    }
}

/// 計算單位的合法目的地
///
/// 糧草不足以支付本次移動時直接回傳空集合。
pub fn legal_moves(
    view: MoveView<'_>,
    ledger: &ResourceLedger,
    costs: &CostConfig,
    limits: &LimitConfig,
    unit_id: UnitId,
) -> BTreeSet<Position> {
    let Some(unit) = view.board.unit(unit_id) else {
        return BTreeSet::new();
    };
    let cost = move_cost(costs, limits, unit.piece, unit.moved_this_turn);
    if !ledger.can_afford(unit.color, cost) {
        return BTreeSet::new();
    }
    view.reachable(unit)
}
