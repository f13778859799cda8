//! 遊戲主體：持有全部狀態並驅動 行動階段 → 走子階段 → 下一位玩家
//!
//! 呈現層只透過 `controller` 的點擊介面與 `snapshot` 的唯讀快照互動。

pub mod controller;
pub mod event;
mod execute;
pub mod snapshot;

pub use controller::{ButtonId, ButtonKind, ButtonOutcome, ClickOutcome, MouseButton};
pub use event::{EventBus, EventKind, GameEvent};
pub use execute::{MoveOutcome, SkillOutcome};
pub use snapshot::DrawableState;

use crate::alias::{Food, UnitId};
use crate::component::{Color, ManagementView, Phase, Player, Position, Unit};
use crate::config::GameConfig;
use crate::error::{Context, Result};
use crate::loader::Layout;
use crate::logic::board::Board;
use crate::logic::movement::{self, MoveView};
use crate::logic::obstacle::ObstacleRegistry;
use crate::logic::resource::ResourceLedger;
use crate::logic::skill::SkillSystem;
use std::collections::BTreeSet;

/// 事件處理器可修改的狀態
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub obstacles: ObstacleRegistry,
    pub ledger: ResourceLedger,
    /// 走子順序：白方先
    pub players: Vec<Player>,
    pub skills: SkillSystem,
}

impl GameState {
    /// 依配置放置單位與障礙物，並把單位所在格子設為其領土
    pub fn setup(config: &GameConfig, layout: &Layout) -> Result<Self> {
        let mut state = Self {
            board: Board::default(),
            obstacles: ObstacleRegistry::default(),
            ledger: ResourceLedger::new(config.economy),
            players: vec![Player::new(Color::White), Player::new(Color::Black)],
            skills: SkillSystem::new(config.costs.skill.clone()),
        };

        for (id, marker) in (1..).zip(&layout.units) {
            let unit = Unit {
                id,
                piece: marker.piece,
                color: marker.color,
                pos: marker.pos,
                moved_this_turn: 0,
            };
            state
                .board
                .place(unit)
                .context(format!("放置 {} {}", marker.color, marker.piece))?;
            state.ledger.set_territory(marker.pos, marker.color);
            if let Some(player) = state.player_mut(marker.color) {
                player.roster.insert(id);
            }
        }
        for (pos, owner) in &layout.antlers {
            state.obstacles.place_antler(*pos, *owner)?;
        }
        for (pos, owner) in &layout.fortresses {
            state.obstacles.place_fortress(*pos, *owner)?;
        }
        Ok(state)
    }

    pub fn player(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    pub fn player_mut(&mut self, color: Color) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.color == color)
    }
}

/// 目前選中的單位與其合法目的地
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub unit_id: UnitId,
    pub valid_moves: BTreeSet<Position>,
}

/// 規則引擎：單一實例獨佔全部狀態
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    events: EventBus,
    phase: Phase,
    current_player: usize,
    view: ManagementView,
    selection: Option<Selection>,
    game_over: bool,
    winner: Option<Color>,
    round: u32,
}

impl Game {
    /// 標準開局
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_layout(config, &Layout::standard())
    }

    /// 自訂開局（例如由 `loader::load_from_ascii` 載入）
    pub fn with_layout(config: GameConfig, layout: &Layout) -> Result<Self> {
        config.validate()?;
        let state = GameState::setup(&config, layout).context("建立開局")?;
        Ok(Self {
            config,
            state,
            events: EventBus::with_default_listeners(),
            phase: Phase::Action,
            current_player: 0,
            view: ManagementView::None,
            selection: None,
            game_over: false,
            winner: None,
            round: 0,
        })
    }

    /// 重置為標準開局，沒有任何殘留狀態
    pub fn reset(&mut self) -> Result<()> {
        self.state = GameState::setup(&self.config, &Layout::standard()).context("重置")?;
        self.phase = Phase::Action;
        self.current_player = 0;
        self.view = ManagementView::None;
        self.selection = None;
        self.game_over = false;
        self.winner = None;
        self.round = 0;
        tracing::info!("遊戲重置");
        Ok(())
    }

    // ------------------------------------------------------------------
    // 唯讀查詢
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn obstacles(&self) -> &ObstacleRegistry {
        &self.state.obstacles
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.state.ledger
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn player(&self, color: Color) -> Option<&Player> {
        self.state.player(color)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn management_view(&self) -> ManagementView {
        self.view
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn current_color(&self) -> Color {
        self.state.players[self.current_player].color
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// 已完成的完整輪數（所有玩家都走完一次）
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// 格子上單位的合法目的地，糧草不足或沒有單位時為空
    pub fn legal_moves(&self, pos: Position) -> BTreeSet<Position> {
        if Position::checked(pos.row, pos.col).is_none() {
            return BTreeSet::new();
        }
        let Some(unit_id) = self.state.board.unit_id_at(pos) else {
            return BTreeSet::new();
        };
        movement::legal_moves(
            MoveView::new(&self.state.board, &self.state.obstacles),
            &self.state.ledger,
            &self.config.costs,
            &self.config.limits,
            unit_id,
        )
    }

    /// 單位下一次移動的花費
    pub fn move_cost_of(&self, unit_id: UnitId) -> Option<Food> {
        let unit = self.state.board.unit(unit_id)?;
        Some(movement::move_cost(
            &self.config.costs,
            &self.config.limits,
            unit.piece,
            unit.moved_this_turn,
        ))
    }

    fn dispatch(&mut self, event: GameEvent) {
        self.events.dispatch(&mut self.state, &event);
    }
}
