//! 棋盤：逐格的單位 ID 與單位本體

use crate::alias::UnitId;
use crate::component::{Color, Position, Unit};
use crate::core_types::Grid;
use crate::error::{BoardError, Result};
use std::collections::BTreeMap;

/// 8x8 棋盤
///
/// 單位本體存在 `units`，格子只記錄 ID，兩者由本結構保持同步。
#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: Grid<Option<UnitId>>,
    units: BTreeMap<UnitId, Unit>,
}

impl Board {
    /// 棋盤外的位置視為沒有單位
    pub fn unit_id_at(&self, pos: Position) -> Option<UnitId> {
        self.cells.get(pos).copied().flatten()
    }

    pub fn unit_at(&self, pos: Position) -> Option<&Unit> {
        self.unit_id_at(pos).and_then(|id| self.units.get(&id))
    }

    pub fn unit(&self, unit_id: UnitId) -> Option<&Unit> {
        self.units.get(&unit_id)
    }

    pub fn unit_mut(&mut self, unit_id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&unit_id)
    }

    /// 格子上單位的陣營
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.unit_at(pos).map(|u| u.color)
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.unit_id_at(pos).is_none()
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.values_mut()
    }

    /// 有單位的格子，列優先
    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter_map(|(pos, cell)| cell.map(|_| pos))
    }

    /// 放置單位，格子已有單位時回傳錯誤
    pub fn place(&mut self, unit: Unit) -> Result<()> {
        if let Some(occupant) = self.cells[unit.pos] {
            return Err(BoardError::CellOccupied {
                pos: unit.pos,
                occupant,
            }
            .into());
        }
        self.cells[unit.pos] = Some(unit.id);
        self.units.insert(unit.id, unit);
        Ok(())
    }

    /// 移除單位（被吃），回傳被移除的單位
    pub fn remove(&mut self, unit_id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&unit_id)?;
        if self.cells[unit.pos] == Some(unit_id) {
            self.cells[unit.pos] = None;
        }
        Some(unit)
    }

    /// 把單位移到空格子
    pub fn relocate(&mut self, unit_id: UnitId, to: Position) -> Result<()> {
        if let Some(occupant) = self.cells[to] {
            return Err(BoardError::CellOccupied { pos: to, occupant }.into());
        }
        let unit = self
            .units
            .get_mut(&unit_id)
            .ok_or(BoardError::UnitNotFound { unit_id })?;
        self.cells[unit.pos] = None;
        self.cells[to] = Some(unit_id);
        unit.pos = to;
        Ok(())
    }
}
