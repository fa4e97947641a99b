// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Nutrition plans with meal and hydration logging

use crate::errors::{RecommendationError, Result};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Macronutrient amounts in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macros {
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

impl Macros {
    pub fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self { protein, carbs, fat }
    }

    fn check(&self) -> Result<()> {
        for (field, value) in [("protein", self.protein), ("carbs", self.carbs), ("fat", self.fat)] {
            check_amount(field, value)?;
        }
        Ok(())
    }
}

/// Per-macro adherence percentages, each clamped at 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroAdherence {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A meal prescribed by the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    pub meal_type: String,
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub meal_type: String,
    pub calories: f64,
    pub macros: Macros,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterIntakeEntry {
    /// Millilitres
    pub amount: f64,
    pub logged_at: DateTime<Utc>,
}

/// Nutrition payload of a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlan {
    #[serde(default)]
    pub daily_calories: f64,
    #[serde(default)]
    pub macro_targets: Option<Macros>,
    #[serde(default)]
    pub meal_plan: Vec<PlannedMeal>,
    /// Millilitres per day
    #[serde(default)]
    pub hydration_goal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,

    #[serde(default)]
    calories_consumed: f64,
    #[serde(default)]
    macros_consumed: Macros,
    #[serde(default)]
    water_intake: f64,
    #[serde(default)]
    meal_logs: Vec<MealLog>,
    #[serde(default)]
    water_log: Vec<WaterIntakeEntry>,
}

impl NutritionPlan {
    pub fn new(daily_calories: f64, macro_targets: Macros, hydration_goal: f64) -> Self {
        Self {
            daily_calories,
            macro_targets: Some(macro_targets),
            meal_plan: Vec::new(),
            hydration_goal,
            supplements: None,
            tips: None,
            calories_consumed: 0.0,
            macros_consumed: Macros::default(),
            water_intake: 0.0,
            meal_logs: Vec::new(),
            water_log: Vec::new(),
        }
    }

    pub fn with_meal_plan(mut self, meal_plan: Vec<PlannedMeal>) -> Self {
        self.meal_plan = meal_plan;
        self
    }

    pub fn with_supplements(mut self, supplements: Vec<String>) -> Self {
        self.supplements = Some(supplements);
        self
    }

    pub fn with_tips(mut self, tips: Vec<String>) -> Self {
        self.tips = Some(tips);
        self
    }

    pub fn log_meal(&mut self, meal_type: &str, calories: f64, macros: Macros) -> Result<()> {
        self.log_meal_at(meal_type, calories, macros, Utc::now())
    }

    /// Add a meal to the running totals; each call counts as one meal
    pub fn log_meal_at(
        &mut self,
        meal_type: &str,
        calories: f64,
        macros: Macros,
        now: DateTime<Utc>,
    ) -> Result<()> {
        check_amount("calories", calories)?;
        macros.check()?;

        self.calories_consumed += calories;
        self.macros_consumed.protein += macros.protein;
        self.macros_consumed.carbs += macros.carbs;
        self.macros_consumed.fat += macros.fat;
        self.meal_logs.push(MealLog {
            meal_type: meal_type.to_string(),
            calories,
            macros,
            logged_at: now,
        });
        debug!(meal_type = %meal_type, calories, total = self.calories_consumed, "Meal logged");
        AppLogger::log_progress_event("meal_logged", meal_type, self.calorie_adherence());
        Ok(())
    }

    pub fn log_water_intake(&mut self, amount: f64) -> Result<()> {
        self.log_water_intake_at(amount, Utc::now())
    }

    pub fn log_water_intake_at(&mut self, amount: f64, now: DateTime<Utc>) -> Result<()> {
        check_amount("amount", amount)?;
        self.water_intake += amount;
        self.water_log.push(WaterIntakeEntry {
            amount,
            logged_at: now,
        });
        AppLogger::log_progress_event("water_logged", "water", self.hydration_adherence());
        Ok(())
    }

    pub fn calories_consumed(&self) -> f64 {
        self.calories_consumed
    }

    pub fn macros_consumed(&self) -> Macros {
        self.macros_consumed
    }

    pub fn water_intake(&self) -> f64 {
        self.water_intake
    }

    pub fn meals_completed(&self) -> usize {
        self.meal_logs.len()
    }

    pub fn meal_logs(&self) -> &[MealLog] {
        &self.meal_logs
    }

    pub fn water_log(&self) -> &[WaterIntakeEntry] {
        &self.water_log
    }

    /// Most recent log for a meal type
    pub fn latest_meal_log(&self, meal_type: &str) -> Option<&MealLog> {
        self.meal_logs.iter().rev().find(|log| log.meal_type == meal_type)
    }

    pub fn calorie_adherence(&self) -> f64 {
        adherence(self.calories_consumed, self.daily_calories)
    }

    pub fn hydration_adherence(&self) -> f64 {
        adherence(self.water_intake, self.hydration_goal)
    }

    /// `None` when the plan has no macro targets
    pub fn macro_adherence(&self) -> Option<MacroAdherence> {
        let targets = self.macro_targets?;
        Some(MacroAdherence {
            protein: adherence(self.macros_consumed.protein, targets.protein),
            carbs: adherence(self.macros_consumed.carbs, targets.carbs),
            fat: adherence(self.macros_consumed.fat, targets.fat),
        })
    }

    pub(crate) fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.daily_calories.is_nan() || self.daily_calories <= 0.0 {
            errors.push("Daily calories must be greater than 0".to_string());
        }
        if self.macro_targets.is_none() {
            errors.push("Macro targets are required".to_string());
        }
        if self.hydration_goal.is_nan() || self.hydration_goal <= 0.0 {
            errors.push("Hydration goal must be greater than 0".to_string());
        }
        errors
    }

    pub(crate) fn fresh_copy(&self) -> Self {
        Self {
            calories_consumed: 0.0,
            macros_consumed: Macros::default(),
            water_intake: 0.0,
            meal_logs: Vec::new(),
            water_log: Vec::new(),
            ..self.clone()
        }
    }

    /// Reject restored consumption totals that could never have been logged
    pub(crate) fn check_progress(&self) -> Result<()> {
        check_amount("caloriesConsumed", self.calories_consumed)?;
        check_amount("waterIntake", self.water_intake)?;
        self.macros_consumed.check()
    }
}

/// Progress toward a target as a percentage, capped at 100
fn adherence(consumed: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (consumed / target * 100.0).min(100.0)
}

fn check_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RecommendationError::invalid(
            field,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    Ok(())
}
