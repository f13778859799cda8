//! 錯誤處理系統
//!
//! 規則違反一律是「拒絕」而非崩潰：狀態不變，回傳原因供呈現層說明。

use crate::alias::{Fertility, Food, UnitId};
use crate::component::{Color, Phase, PieceType, Position};
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 頂層錯誤，包含原始錯誤和 context 鏈
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    contexts: Vec<String>,
}

/// 錯誤種類
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// 棋盤錯誤
#[derive(Debug, ThisError)]
pub enum BoardError {
    #[error("位置超出棋盤邊界: {pos}")]
    OutOfBounds { pos: Position },
    #[error("位置 {pos} 已有單位 {occupant}，無法重複放置")]
    CellOccupied { pos: Position, occupant: UnitId },
    #[error("單位不存在: {unit_id}")]
    UnitNotFound { unit_id: UnitId },
}

/// 格式載入錯誤
#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("解析失敗: {0}")]
    ParseError(String),
    #[error("{format} 反序列化失敗: {reason}")]
    DeserializeError { format: String, reason: String },
}

/// 遊戲規則拒絕原因
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RuleError {
    #[error("{color} 糧草不足: 需要 {required}，現有 {available}")]
    InsufficientFood {
        color: Color,
        required: Food,
        available: Food,
    },
    #[error("本回合移動次數已達上限 {limit}")]
    MoveLimitReached { limit: u32 },
    #[error("王每回合只能移動 {limit} 次")]
    KingMoveLimitReached { limit: u32 },
    #[error("本回合技能次數已達上限 {limit}")]
    SkillLimitReached { limit: u32 },
    #[error("{piece} 沒有技能")]
    NoSkill { piece: PieceType },
    #[error("位置 {pos} 已有障礙物")]
    ObstacleAlreadyPresent { pos: Position },
    #[error("無法進入敵方堡壘 {pos}")]
    EnemyFortressBlocked { pos: Position },
    #[error("{pos} 不是合法的目的地")]
    IllegalDestination { pos: Position },
    #[error("{pos} 不是 {color} 的領土")]
    NotOwnedTerritory { pos: Position, color: Color },
    #[error("{pos} 沒有己方單位")]
    NotYourUnit { pos: Position },
    #[error("現在不是 {color} 的回合")]
    NotYourTurn { color: Color },
    #[error("目前階段 {phase} 不允許此操作")]
    WrongPhase { phase: Phase },
    #[error("操作後糧草將為負: {projected}")]
    NegativeFood { projected: Food },
    #[error("操作後 {pos} 的豐饒度將為負: {projected}")]
    NegativeFertility { pos: Position, projected: Fertility },
    #[error("遊戲已結束")]
    GameOver,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 若為規則拒絕，回傳其原因
    pub fn rule(&self) -> Option<&RuleError> {
        match &self.kind {
            ErrorKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// 添加錯誤上下文，自動記錄呼叫位置
    #[track_caller]
    pub fn context<C: Into<String>>(mut self, context: C) -> Self {
        let loc = std::panic::Location::caller();
        let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
        self.contexts.push(msg);
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        for ctx in &self.contexts {
            write!(f, "\n  {}", ctx)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl<E: Into<ErrorKind>> From<E> for Error {
    fn from(error: E) -> Self {
        Self {
            kind: error.into(),
            contexts: Vec::new(),
        }
    }
}

/// Result 擴展 trait，用於添加錯誤上下文
pub trait Context<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    #[track_caller]
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        let loc = std::panic::Location::caller();
        self.map_err(|e| {
            let msg = format!("{} [{}:{}]", context.into(), loc.file(), loc.line());
            let mut e = e;
            e.contexts.push(msg);
            e
        })
    }
}
