//! Turn budget computation and controller mode selection.

use serde::Serialize;

use crate::catalog::checklist::CHECKLIST_LEN;
use crate::catalog::personas::{has_extended_pacing, PacingTier};

/// Slack turns granted beyond the coverage budget.
pub const BUFFER_TURNS: usize = 5;

/// Extra per-item allowance for personas that run long.
const EXTENDED_PACING_BONUS: f64 = 0.5;

/// Upper bound on the per-item target regardless of bonuses.
const MAX_TURNS_PER_ITEM: f64 = 3.0;

/// Operating mode of the doctor controller, re-evaluated every doctor turn.
///
/// Modes are checked in strict priority order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerMode {
    /// Coverage complete; only FOLLOW_UP, RAPPORT, or END are legal.
    PostChecklist,
    /// Remaining turns no longer exceed remaining items; the next action
    /// must be a checklist item.
    ForceCoverage,
    /// Pace of coverage is behind the per-item target; checklist preferred.
    BehindSchedule,
    /// Free choice.
    Normal,
}

/// Per-session turn budget, fixed once the doctor configuration is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnBudget {
    /// Target doctor turns per checklist item.
    pub target: f64,
    /// Turns allocated for coverage proper: ceil(target * N).
    pub base_budget: usize,
    /// Hard cap on doctor turns: base budget + buffer + closing turn.
    pub max_turns: usize,
}

impl TurnBudget {
    /// Computes the budget from the doctor's pacing tier and persona.
    pub fn new(pacing: PacingTier, persona_id: &str) -> Self {
        let mut target = pacing.turns_per_item();
        if has_extended_pacing(persona_id) {
            target = (target + EXTENDED_PACING_BONUS).min(MAX_TURNS_PER_ITEM);
        }
        let base_budget = (target * CHECKLIST_LEN as f64).ceil() as usize;
        TurnBudget {
            target,
            base_budget,
            max_turns: base_budget + BUFFER_TURNS + 1,
        }
    }
}

/// Selects the controller mode for the upcoming doctor turn.
///
/// Pure function of the observable session numbers; no RNG and no
/// conversation content.
pub fn select_mode(
    turn_index: usize,
    max_turns: usize,
    covered: usize,
    total_items: usize,
    target: f64,
) -> ControllerMode {
    let remaining_items = total_items.saturating_sub(covered);

    if remaining_items == 0 {
        return ControllerMode::PostChecklist;
    }
    if max_turns.saturating_sub(turn_index) <= remaining_items {
        return ControllerMode::ForceCoverage;
    }
    if (turn_index as f64) / (covered.max(1) as f64) < target {
        return ControllerMode::BehindSchedule;
    }
    ControllerMode::Normal
}
