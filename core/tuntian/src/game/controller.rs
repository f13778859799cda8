//! 點擊介面與階段狀態機
//!
//! 行動階段（征稅／屯田規劃） → 走子階段（移動／技能） → 下一位玩家的行動階段。
//! 最後一位玩家結束走子時發出回合結束事件。

use super::execute::{MoveOutcome, SkillOutcome};
use super::{Game, GameEvent, Selection};
use crate::alias::Food;
use crate::component::{Color, ManagementView, Phase, Position};
use crate::error::{Context, Error, LoadError, Result, RuleError};
use std::fmt;
use std::str::FromStr;

/// 滑鼠按鍵：主鍵標記／選取／移動，副鍵取消標記／施放技能
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Tax,
    Farm,
    End,
}

/// 每位玩家各有一組按鈕，例如 `white_tax`、`black_end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonId {
    pub color: Color,
    pub kind: ButtonKind,
}

impl ButtonId {
    pub fn new(color: Color, kind: ButtonKind) -> Self {
        Self { color, kind }
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ButtonKind::Tax => "tax",
            ButtonKind::Farm => "farm",
            ButtonKind::End => "end",
        };
        write!(f, "{}_{}", self.color, kind)
    }
}

impl FromStr for ButtonId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LoadError::ParseError(format!("無效的按鈕: {s}"));
        let (color, kind) = s.split_once('_').ok_or_else(invalid)?;
        let color = Color::from_str(color).map_err(|_| invalid())?;
        let kind = match kind {
            "tax" => ButtonKind::Tax,
            "farm" => ButtonKind::Farm,
            "end" => ButtonKind::End,
            _ => return Err(invalid().into()),
        };
        Ok(Self { color, kind })
    }
}

/// 格子點擊的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 出界、空白處或目前沒有作用
    Ignored,
    TaxMarked { pos: Position, marked: bool },
    FarmAdjusted { pos: Position, count: u32 },
    Selected { pos: Position },
    Deselected,
    Moved(MoveOutcome),
    SkillCast(SkillOutcome),
}

/// 按鈕點擊的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonOutcome {
    ViewChanged(ManagementView),
    /// 行動階段結算完成，進入走子階段
    ActionPhaseEnded { tax: Food, farm_cost: Food },
    /// 輪到下一位玩家；`turn_ended` 表示剛完成一整輪
    TurnPassed { next: Color, turn_ended: bool },
}

impl Game {
    /// 處理棋盤格子點擊
    pub fn handle_cell_click(
        &mut self,
        row: usize,
        col: usize,
        button: MouseButton,
    ) -> Result<ClickOutcome> {
        self.cell_click(row, col, button).inspect_err(|err| {
            tracing::info!(row, col, ?button, "操作被拒絕: {}", err.kind());
        })
    }

    fn cell_click(&mut self, row: usize, col: usize, button: MouseButton) -> Result<ClickOutcome> {
        if self.game_over {
            return Err(RuleError::GameOver.into());
        }
        let Some(pos) = Position::checked(row, col) else {
            return Ok(ClickOutcome::Ignored);
        };
        match self.phase {
            Phase::Action => self.plan_click(pos, button),
            Phase::Move => match button {
                MouseButton::Primary => self.select_or_move(pos),
                MouseButton::Secondary => {
                    let outcome = self.cast_skill(pos)?;
                    self.refresh_selection();
                    Ok(ClickOutcome::SkillCast(outcome))
                }
            },
        }
    }

    fn plan_click(&mut self, pos: Position, button: MouseButton) -> Result<ClickOutcome> {
        let color = self.current_color();
        let ledger = &mut self.state.ledger;
        match self.view {
            ManagementView::None => Ok(ClickOutcome::Ignored),
            ManagementView::Tax => {
                let marked = button == MouseButton::Primary;
                ledger.set_tax_mark(pos, color, marked)?;
                Ok(ClickOutcome::TaxMarked { pos, marked })
            }
            ManagementView::Farm => {
                let count = ledger.adjust_farm(pos, color, button == MouseButton::Primary)?;
                Ok(ClickOutcome::FarmAdjusted { pos, count })
            }
        }
    }

    /// 沒有選取時選取己方單位；已選取時點合法目的地即移動，點其他格子取消選取
    fn select_or_move(&mut self, pos: Position) -> Result<ClickOutcome> {
        let Some(selection) = &self.selection else {
            return Ok(self.select(pos));
        };
        if !selection.valid_moves.contains(&pos) {
            self.selection = None;
            return Ok(ClickOutcome::Deselected);
        }

        let from = self.unit_checked(selection.unit_id)?.pos;
        let outcome = self.execute_move(from, pos)?;
        self.selection = None;
        Ok(ClickOutcome::Moved(outcome))
    }

    fn select(&mut self, pos: Position) -> ClickOutcome {
        let color = self.current_color();
        match self.state.board.unit_at(pos) {
            Some(unit) if unit.color == color => {
                let unit_id = unit.id;
                let valid_moves = self.legal_moves(pos);
                self.selection = Some(Selection {
                    unit_id,
                    valid_moves,
                });
                ClickOutcome::Selected { pos }
            }
            _ => ClickOutcome::Ignored,
        }
    }

    /// 糧草變動後重新計算已選單位的合法目的地
    fn refresh_selection(&mut self) {
        let Some(unit_id) = self.selection.as_ref().map(|s| s.unit_id) else {
            return;
        };
        let moves = self
            .state
            .board
            .unit(unit_id)
            .map(|unit| self.legal_moves(unit.pos));
        match moves {
            Some(valid_moves) => {
                self.selection = Some(Selection {
                    unit_id,
                    valid_moves,
                })
            }
            None => self.selection = None,
        }
    }

    /// 處理玩家按鈕點擊
    pub fn handle_button_click(&mut self, button: ButtonId) -> Result<ButtonOutcome> {
        self.button_click(button).inspect_err(|err| {
            tracing::info!(%button, "操作被拒絕: {}", err.kind());
        })
    }

    fn button_click(&mut self, button: ButtonId) -> Result<ButtonOutcome> {
        if self.game_over {
            return Err(RuleError::GameOver.into());
        }
        if button.color != self.current_color() {
            return Err(RuleError::NotYourTurn {
                color: button.color,
            }
            .into());
        }
        match button.kind {
            ButtonKind::Tax => self.toggle_view(ManagementView::Tax),
            ButtonKind::Farm => self.toggle_view(ManagementView::Farm),
            ButtonKind::End => match self.phase {
                Phase::Action => self.end_action_phase(),
                Phase::Move => Ok(self.end_move_phase()),
            },
        }
    }

    /// 切換管理視圖；再按一次同一視圖則關閉
    fn toggle_view(&mut self, view: ManagementView) -> Result<ButtonOutcome> {
        if self.phase != Phase::Action {
            return Err(RuleError::WrongPhase { phase: self.phase }.into());
        }
        self.view = if self.view == view {
            ManagementView::None
        } else {
            view
        };
        Ok(ButtonOutcome::ViewChanged(self.view))
    }

    /// 把當前玩家所有領土標記為征稅
    pub fn mark_all_taxable(&mut self) -> Result<usize> {
        if self.game_over {
            return Err(RuleError::GameOver.into());
        }
        if self.phase != Phase::Action {
            return Err(RuleError::WrongPhase { phase: self.phase }.into());
        }
        let color = self.current_color();
        Ok(self.state.ledger.mark_all_taxable(color))
    }

    /// 預覽通過才結算征稅與屯田，然後進入走子階段
    fn end_action_phase(&mut self) -> Result<ButtonOutcome> {
        let color = self.current_color();
        let ledger = &mut self.state.ledger;
        let preview = ledger.calculate_post_operation_preview(color);
        ledger
            .check_preview(color, &preview)
            .context(format!("{color} 結束行動階段"))?;

        let tax = ledger.collect_tax(color);
        let farm_cost = ledger.implement_farming(color);
        tracing::debug!(%color, tax, farm_cost, food = ledger.food(color), "行動階段結算");

        self.view = ManagementView::None;
        self.phase = Phase::Move;
        self.dispatch(GameEvent::PhaseChanged {
            phase: Phase::Move,
            player: color,
        });
        Ok(ButtonOutcome::ActionPhaseEnded { tax, farm_cost })
    }

    /// 換下一位玩家；繞回第一位時整輪結束
    fn end_move_phase(&mut self) -> ButtonOutcome {
        self.selection = None;
        self.current_player = (self.current_player + 1) % self.state.players.len();
        self.phase = Phase::Action;
        let next = self.current_color();
        self.dispatch(GameEvent::PhaseChanged {
            phase: Phase::Action,
            player: next,
        });

        let turn_ended = self.current_player == 0;
        if turn_ended {
            self.round += 1;
            self.dispatch(GameEvent::TurnEnded { round: self.round });
        }
        ButtonOutcome::TurnPassed { next, turn_ended }
    }
}
