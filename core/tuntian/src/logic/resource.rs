//! 資源帳本：糧草、豐饒度、領土、征稅標記與屯田次數
//!
//! 已提交的糧草永遠不為負；豐饒度永遠不為負。
//! 只有 `calculate_post_operation_preview` 的預覽值可以為負（僅供顯示與階段檢查）。

use crate::alias::{Fertility, Food};
use crate::component::{Color, Position};
use crate::config::EconomyConfig;
use crate::core_types::Grid;
use crate::error::{Result, RuleError};
use crate::logic::board::Board;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// 行動階段結束前的資源預覽
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationPreview {
    /// 征稅與屯田後的糧草
    pub final_food: Food,
    /// 每格豐饒度的變化量（未截斷）
    pub fertility_delta: Grid<Fertility>,
}

#[derive(Debug, Clone)]
pub struct ResourceLedger {
    economy: EconomyConfig,
    food: BTreeMap<Color, Food>,
    fertility: Grid<Fertility>,
    territory: Grid<Option<Color>>,
    tax_mark: Grid<bool>,
    farm_count: Grid<u32>,
}

impl ResourceLedger {
    pub fn new(economy: EconomyConfig) -> Self {
        Self {
            economy,
            food: Color::iter().map(|c| (c, economy.init_food)).collect(),
            fertility: Grid::filled(economy.init_fertility),
            territory: Grid::filled(None),
            tax_mark: Grid::filled(false),
            farm_count: Grid::filled(0),
        }
    }

    // ------------------------------------------------------------------
    // 查詢
    // ------------------------------------------------------------------

    pub fn food(&self, color: Color) -> Food {
        self.food.get(&color).copied().unwrap_or(0)
    }

    pub fn fertility(&self, pos: Position) -> Fertility {
        self.fertility[pos]
    }

    pub fn territory(&self, pos: Position) -> Option<Color> {
        self.territory[pos]
    }

    pub fn is_tax_marked(&self, pos: Position) -> bool {
        self.tax_mark[pos]
    }

    pub fn farm_count(&self, pos: Position) -> u32 {
        self.farm_count[pos]
    }

    pub fn fertility_grid(&self) -> &Grid<Fertility> {
        &self.fertility
    }

    pub fn territory_grid(&self) -> &Grid<Option<Color>> {
        &self.territory
    }

    pub fn tax_grid(&self) -> &Grid<bool> {
        &self.tax_mark
    }

    pub fn farm_grid(&self) -> &Grid<u32> {
        &self.farm_count
    }

    // ------------------------------------------------------------------
    // 糧草
    // ------------------------------------------------------------------

    pub fn can_afford(&self, color: Color, amount: Food) -> bool {
        self.food(color) >= amount
    }

    /// 扣除糧草，不足時拒絕且不扣
    pub fn charge(&mut self, color: Color, amount: Food) -> Result<()> {
        let available = self.food(color);
        if available < amount {
            return Err(RuleError::InsufficientFood {
                color,
                required: amount,
                available,
            }
            .into());
        }
        self.food.insert(color, available - amount);
        Ok(())
    }

    fn credit(&mut self, color: Color, amount: Food) {
        *self.food.entry(color).or_insert(0) += amount;
    }

    pub fn set_territory(&mut self, pos: Position, color: Color) {
        self.territory[pos] = Some(color);
    }

    // ------------------------------------------------------------------
    // 結算
    // ------------------------------------------------------------------

    /// 有單位的格子豐饒度下降，最低為 0
    pub fn update_fertility(&mut self, board: &Board) {
        let decay = self.economy.fertility_decay;
        for pos in board.occupied_positions() {
            self.fertility[pos] = (self.fertility[pos] - decay).max(0);
        }
    }

    /// 征稅：標記且屬於 `color` 的格子收入 `豐饒度 / 10`，之後豐饒度 -10（最低 0）
    ///
    /// 不清除征稅標記，標記在回合結束時統一清除。
    pub fn collect_tax(&mut self, color: Color) -> Food {
        let mut total = 0;
        for (pos, marked) in self.tax_mark.iter() {
            if !*marked || self.territory[pos] != Some(color) {
                continue;
            }
            total += self.fertility[pos] / self.economy.tax_divisor;
            self.fertility[pos] = (self.fertility[pos] - self.economy.tax_fertility_cost).max(0);
        }
        self.credit(color, total);
        total
    }

    /// 執行屯田計畫，回傳總花費
    ///
    /// 依列優先順序逐格處理。糧草不足時該格只做 `糧草 / 10` 次，
    /// 並把屯田次數改寫為實際執行的次數。
    pub fn implement_farming(&mut self, color: Color) -> Food {
        let cost_per_time = self.economy.farm_food_cost;
        let gain_per_time = self.economy.farm_fertility_gain;
        let mut total_cost = 0;

        let planned: Vec<(Position, u32)> = self
            .farm_count
            .iter()
            .filter(|(pos, times)| **times > 0 && self.territory[*pos] == Some(color))
            .map(|(pos, times)| (pos, *times))
            .collect();

        for (pos, times) in planned {
            let food = self.food(color);
            let affordable = u32::try_from(food / cost_per_time).unwrap_or(0);
            let actual = times.min(affordable);
            if actual < times {
                self.farm_count[pos] = actual;
            }
            let cost = actual as Food * cost_per_time;
            self.food.insert(color, food - cost);
            self.fertility[pos] += actual as Fertility * gain_per_time;
            total_cost += cost;
        }
        total_cost
    }

    /// 預覽征稅與屯田後的糧草與豐饒度變化，不修改任何狀態
    pub fn calculate_post_operation_preview(&self, color: Color) -> OperationPreview {
        let mut final_food = self.food(color);
        let mut fertility_delta = Grid::filled(0);

        for (pos, marked) in self.tax_mark.iter() {
            if *marked && self.territory[pos] == Some(color) {
                final_food += self.fertility[pos] / self.economy.tax_divisor;
                fertility_delta[pos] -= self.economy.tax_fertility_cost;
            }
        }
        for (pos, times) in self.farm_count.iter() {
            if *times > 0 && self.territory[pos] == Some(color) {
                final_food -= *times as Food * self.economy.farm_food_cost;
                fertility_delta[pos] += *times as Fertility * self.economy.farm_fertility_gain;
            }
        }

        OperationPreview {
            final_food,
            fertility_delta,
        }
    }

    /// 檢查預覽結果：糧草或任何己方領土的豐饒度為負時拒絕
    pub fn check_preview(&self, color: Color, preview: &OperationPreview) -> Result<()> {
        if preview.final_food < 0 {
            return Err(RuleError::NegativeFood {
                projected: preview.final_food,
            }
            .into());
        }
        for (pos, owner) in self.territory.iter() {
            if *owner != Some(color) {
                continue;
            }
            let projected = self.fertility[pos] + preview.fertility_delta[pos];
            if projected < 0 {
                return Err(RuleError::NegativeFertility { pos, projected }.into());
            }
        }
        Ok(())
    }

    pub fn reset_management_grids(&mut self) {
        self.tax_mark.fill(false);
        self.farm_count.fill(0);
    }

    // ------------------------------------------------------------------
    // 規劃（管理視圖）
    // ------------------------------------------------------------------

    fn ensure_owned(&self, pos: Position, color: Color) -> Result<()> {
        if self.territory[pos] != Some(color) {
            return Err(RuleError::NotOwnedTerritory { pos, color }.into());
        }
        Ok(())
    }

    /// 設定或取消征稅標記（只能標記自己的領土）
    pub fn set_tax_mark(&mut self, pos: Position, color: Color, marked: bool) -> Result<()> {
        self.ensure_owned(pos, color)?;
        self.tax_mark[pos] = marked;
        Ok(())
    }

    /// 標記所有自己的領土，回傳標記格數
    pub fn mark_all_taxable(&mut self, color: Color) -> usize {
        let owned: Vec<Position> = self
            .territory
            .iter()
            .filter(|(_, owner)| **owner == Some(color))
            .map(|(pos, _)| pos)
            .collect();
        for pos in &owned {
            self.tax_mark[*pos] = true;
        }
        owned.len()
    }

    /// 增減屯田次數，範圍 0..=上限，回傳調整後的次數
    pub fn adjust_farm(&mut self, pos: Position, color: Color, increase: bool) -> Result<u32> {
        self.ensure_owned(pos, color)?;
        let count = &mut self.farm_count[pos];
        if increase {
            if *count < self.economy.farm_max_per_cell {
                *count += 1;
            }
        } else {
            *count = count.saturating_sub(1);
        }
        Ok(*count)
    }
}
