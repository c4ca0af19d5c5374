//! Time-control parsing and the soft/hard budget derived from it.

use std::time::Duration;

/// Tunables governing how aggressively the clock is spent.
#[derive(Debug, Clone, Copy)]
pub struct TimeConfig {
    pub move_overhead_ms: u64,
    pub soft_time_percent: u64,
    pub hard_time_percent: u64,
    pub default_max_nodes: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        TimeConfig {
            move_overhead_ms: 50,
            soft_time_percent: 70,
            hard_time_percent: 90,
            default_max_nodes: 0,
        }
    }
}

pub const DEFAULT_MOVES_TO_GO: u32 = 30;
/// Safety margin subtracted from the hard budget, per §4.9's stop test.
pub const SEARCH_SAFETY_MARGIN_MS: u64 = 50;

#[derive(Debug, Clone, Copy)]
pub enum TimeControl {
    Infinite,
    Depth(u32),
    Nodes(u64),
    MoveTime { time_ms: u64 },
    Incremental {
        time_left_ms: u64,
        inc_ms: u64,
        movestogo: Option<u32>,
    },
}

/// Milliseconds to budget for this move, derived per §4.9 step 2: explicit
/// limits pass straight through; otherwise `time_left/movestogo` minus the
/// move-overhead safety margin, with a default of 1/40th of the clock when
/// `movestogo` is absent or less than 2.
#[must_use]
pub fn move_time_budget_ms(control: TimeControl, config: TimeConfig) -> Option<u64> {
    match control {
        TimeControl::Infinite | TimeControl::Depth(_) | TimeControl::Nodes(_) => None,
        TimeControl::MoveTime { time_ms } => Some(time_ms.saturating_sub(config.move_overhead_ms)),
        TimeControl::Incremental {
            time_left_ms,
            inc_ms,
            movestogo,
        } => {
            let moves = match movestogo {
                Some(n) if n >= 2 => n,
                _ => DEFAULT_MOVES_TO_GO,
            };
            let divisor = if matches!(movestogo, Some(n) if n >= 2) { moves } else { 40 };
            let base = time_left_ms / divisor.max(1) as u64 + inc_ms;
            Some(base.saturating_sub(config.move_overhead_ms))
        }
    }
}

#[must_use]
pub fn soft_limit(budget_ms: u64, config: TimeConfig) -> Duration {
    Duration::from_millis(budget_ms * config.soft_time_percent / 100)
}

#[must_use]
pub fn hard_limit(budget_ms: u64, config: TimeConfig) -> Duration {
    Duration::from_millis(
        (budget_ms * config.hard_time_percent / 100).saturating_sub(SEARCH_SAFETY_MARGIN_MS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_subtracts_overhead() {
        let config = TimeConfig::default();
        let budget = move_time_budget_ms(TimeControl::MoveTime { time_ms: 1000 }, config).unwrap();
        assert_eq!(budget, 950);
    }

    #[test]
    fn incremental_defaults_to_one_fortieth_without_movestogo() {
        let config = TimeConfig::default();
        let budget = move_time_budget_ms(
            TimeControl::Incremental {
                time_left_ms: 40_000,
                inc_ms: 0,
                movestogo: None,
            },
            config,
        )
        .unwrap();
        assert_eq!(budget, 1000 - config.move_overhead_ms);
    }

    #[test]
    fn explicit_limits_have_no_time_budget() {
        let config = TimeConfig::default();
        assert!(move_time_budget_ms(TimeControl::Depth(5), config).is_none());
        assert!(move_time_budget_ms(TimeControl::Infinite, config).is_none());
    }
}
