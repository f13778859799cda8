//! 走子與技能的執行
//!
//! 所有檢查都在任何狀態修改之前完成，被拒絕的操作不留下痕跡。

use super::Game;
use crate::alias::{Food, UnitId};
use crate::component::{Color, Phase, PieceType, Position, Unit};
use crate::error::{BoardError, Context, Result, RuleError};
use crate::logic::movement::{self, MoveView};
use crate::logic::obstacle::ObstacleKind;
use crate::logic::skill::SkillSystem;

/// 成功移動的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// 單位移到 `to`，可能吃掉敵方單位
    Moved {
        unit_id: UnitId,
        from: Position,
        to: Position,
        captured: Option<Unit>,
        cost: Food,
    },
    /// 原地摧毀 `pos` 上的敵方鹿角，單位不動
    AntlerCaptured {
        unit_id: UnitId,
        pos: Position,
        cost: Food,
    },
}

/// 成功施放技能的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillOutcome {
    pub kind: ObstacleKind,
    pub pos: Position,
    pub cost: Food,
}

impl Game {
    fn ensure_playing(&self, phase: Phase) -> Result<()> {
        if self.game_over {
            return Err(RuleError::GameOver.into());
        }
        if self.phase != phase {
            return Err(RuleError::WrongPhase { phase: self.phase }.into());
        }
        Ok(())
    }

    /// 棋盤外的座標一律拒絕
    fn ensure_on_board(pos: Position) -> Result<()> {
        match Position::checked(pos.row, pos.col) {
            Some(_) => Ok(()),
            None => Err(BoardError::OutOfBounds { pos }.into()),
        }
    }

    /// `pos` 上屬於當前玩家的單位
    fn own_unit_at(&self, pos: Position) -> Result<&Unit> {
        let color = self.current_color();
        self.state
            .board
            .unit_at(pos)
            .filter(|unit| unit.color == color)
            .ok_or_else(|| RuleError::NotYourUnit { pos }.into())
    }

    /// 執行一次移動
    ///
    /// 檢查順序：移動次數 → 王的次數 → 糧草 → 敵方堡壘 → 目的地合法 → 鹿角。
    pub fn execute_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome> {
        self.ensure_playing(Phase::Move)?;
        Self::ensure_on_board(from)?;
        Self::ensure_on_board(to)?;
        let color = self.current_color();
        let unit = self.own_unit_at(from)?.clone();

        let limits = self.config.limits;
        let moves_made = self
            .state
            .player(color)
            .map(|p| p.moves_this_turn)
            .unwrap_or(0);
        if moves_made >= limits.moves_per_turn {
            return Err(RuleError::MoveLimitReached {
                limit: limits.moves_per_turn,
            }
            .into());
        }
        if unit.piece == PieceType::King && unit.moved_this_turn >= limits.king_moves_per_turn {
            return Err(RuleError::KingMoveLimitReached {
                limit: limits.king_moves_per_turn,
            }
            .into());
        }

        let cost = movement::move_cost(&self.config.costs, &limits, unit.piece, unit.moved_this_turn);
        let available = self.state.ledger.food(color);
        if available < cost {
            return Err(RuleError::InsufficientFood {
                color,
                required: cost,
                available,
            }
            .into());
        }

        if self.state.obstacles.is_enemy_fortress(to, color) {
            return Err(RuleError::EnemyFortressBlocked { pos: to }.into());
        }
        let view = MoveView::new(&self.state.board, &self.state.obstacles);
        if !view.reachable(&unit).contains(&to) {
            return Err(RuleError::IllegalDestination { pos: to }.into());
        }

        let outcome = if self.state.obstacles.is_enemy_antler(to, color) {
            self.state.ledger.charge(color, cost)?;
            self.state.obstacles.remove_antler(to);
            self.mark_moved(unit.id, color);
            tracing::debug!(%color, unit = unit.id, %to, "摧毀鹿角");
            MoveOutcome::AntlerCaptured {
                unit_id: unit.id,
                pos: to,
                cost,
            }
        } else {
            self.state.ledger.charge(color, cost)?;
            let captured = self.capture_at(to);
            self.state
                .board
                .relocate(unit.id, to)
                .context(format!("移動 {} {from} -> {to}", unit.piece))?;
            self.state.ledger.set_territory(to, color);
            self.mark_moved(unit.id, color);
            tracing::debug!(%color, unit = unit.id, %from, %to, "移動");
            MoveOutcome::Moved {
                unit_id: unit.id,
                from,
                to,
                captured,
                cost,
            }
        };

        self.check_game_over();
        Ok(outcome)
    }

    /// 移除 `pos` 上的單位並從其玩家名冊刪除
    fn capture_at(&mut self, pos: Position) -> Option<Unit> {
        let victim_id = self.state.board.unit_id_at(pos)?;
        let victim = self.state.board.remove(victim_id)?;
        if let Some(owner) = self.state.player_mut(victim.color) {
            owner.roster.remove(&victim_id);
        }
        tracing::debug!(color = %victim.color, piece = %victim.piece, %pos, "單位被吃");
        Some(victim)
    }

    fn mark_moved(&mut self, unit_id: UnitId, color: Color) {
        if let Some(unit) = self.state.board.unit_mut(unit_id) {
            unit.moved_this_turn += 1;
        }
        if let Some(player) = self.state.player_mut(color) {
            player.moves_this_turn += 1;
        }
    }

    /// 在選中單位所在格子施放技能（兵放鹿角、車築堡壘）
    pub fn cast_skill(&mut self, pos: Position) -> Result<SkillOutcome> {
        self.ensure_playing(Phase::Move)?;
        Self::ensure_on_board(pos)?;
        let color = self.current_color();
        let piece = self.own_unit_at(pos)?.piece;

        let limit = self.config.limits.skills_per_turn;
        let used = self
            .state
            .player(color)
            .map(|p| p.skills_used_this_turn)
            .unwrap_or(0);
        if used >= limit {
            return Err(RuleError::SkillLimitReached { limit }.into());
        }
        let kind = SkillSystem::skill_of(piece).ok_or(RuleError::NoSkill { piece })?;
        let cost = self.state.skills.cost(piece);
        let available = self.state.ledger.food(color);
        let insufficient = || RuleError::InsufficientFood {
            color,
            required: cost,
            available,
        };
        if !self.state.skills.can_cast(piece, color, &self.state.ledger) {
            return Err(insufficient().into());
        }
        if self.state.obstacles.has_obstacle(pos) {
            return Err(RuleError::ObstacleAlreadyPresent { pos }.into());
        }

        if !self.state.skills.cast(piece, color, &mut self.state.ledger) {
            return Err(insufficient().into());
        }
        self.state.obstacles.place(kind, pos, color)?;
        if let Some(player) = self.state.player_mut(color) {
            player.skills_used_this_turn += 1;
        }
        tracing::debug!(%color, %kind, %pos, "施放技能");
        Ok(SkillOutcome { kind, pos, cost })
    }

    /// 名冊清空的一方落敗
    pub(super) fn check_game_over(&mut self) {
        if self.game_over {
            return;
        }
        let loser = self
            .state
            .players
            .iter()
            .find(|p| p.roster.is_empty())
            .map(|p| p.color);
        if let Some(loser) = loser {
            self.game_over = true;
            self.winner = Some(loser.opponent());
            self.selection = None;
            tracing::info!(winner = %loser.opponent(), "遊戲結束");
        }
    }

    /// 依 ID 取得單位，不存在時回傳錯誤
    pub(super) fn unit_checked(&self, unit_id: UnitId) -> Result<&Unit> {
        self.state
            .board
            .unit(unit_id)
            .ok_or_else(|| BoardError::UnitNotFound { unit_id }.into())
    }
}
