//! 事件匯流排
//!
//! 處理器依註冊順序同步執行，只能修改 `GameState`；
//! 階段與回合順序仍由 `Game` 自己掌控。

use super::GameState;
use crate::component::{Color, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PhaseChanged,
    TurnEnded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// 進入新階段，`player` 為該階段的行動方
    PhaseChanged { phase: Phase, player: Color },
    /// 所有玩家都走完一次，`round` 為剛完成的輪數
    TurnEnded { round: u32 },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
            GameEvent::TurnEnded { .. } => EventKind::TurnEnded,
        }
    }
}

pub type Handler = fn(&mut GameState, &GameEvent);

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    listeners: Vec<(EventKind, Handler)>,
}

impl EventBus {
    /// 註冊回合結束與階段切換的預設處理器
    pub fn with_default_listeners() -> Self {
        let mut bus = Self::default();
        bus.add_listener(EventKind::TurnEnded, on_turn_end);
        bus.add_listener(EventKind::PhaseChanged, on_phase_change);
        bus
    }

    pub fn add_listener(&mut self, kind: EventKind, handler: Handler) {
        self.listeners.push((kind, handler));
    }

    /// 依註冊順序呼叫對應處理器，回傳呼叫次數
    pub fn dispatch(&self, state: &mut GameState, event: &GameEvent) -> usize {
        let kind = event.kind();
        let mut invoked = 0;
        for (listen, handler) in &self.listeners {
            if *listen == kind {
                handler(state, event);
                invoked += 1;
            }
        }
        invoked
    }
}

/// 回合結束：豐饒度衰減、重置每回合計數、清除管理網格
pub fn on_turn_end(state: &mut GameState, event: &GameEvent) {
    let GameEvent::TurnEnded { round } = event else {
        return;
    };
    tracing::debug!(round, "回合結束結算");

    state.ledger.update_fertility(&state.board);
    for player in &mut state.players {
        player.reset_turn_state();
    }
    for unit in state.board.units_mut() {
        unit.moved_this_turn = 0;
    }
    state.ledger.reset_management_grids();
}

/// 進入行動階段時清除管理網格，上一位玩家的規劃不會帶到下一位
pub fn on_phase_change(state: &mut GameState, event: &GameEvent) {
    let GameEvent::PhaseChanged { phase, player } = event else {
        return;
    };
    tracing::debug!(%phase, %player, "階段切換");

    if *phase == Phase::Action {
        state.ledger.reset_management_grids();
    }
}
