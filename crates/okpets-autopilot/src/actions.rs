//! The action program — which endpoints a cycle visits, and how fast.
//!
//! Phase structure, repeat counts, and delays are plain data consumed by
//! the sequencer, so the program is testable without any networking.

use std::time::Duration;

/// One phase of the automation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Visit each endpoint `times` times in immediate succession.
    Repeat { endpoints: Vec<String>, times: u32 },
    /// Visit each endpoint once.
    Single { endpoints: Vec<String> },
    /// Visit `endpoint` once per id, counting down from `from` to `to`
    /// inclusive. The id is appended to the endpoint as given.
    Countdown { endpoint: String, from: u32, to: u32 },
}

impl Phase {
    /// Expand the phase into its ordered endpoint calls.
    pub fn calls(&self) -> Vec<String> {
        match self {
            Phase::Repeat { endpoints, times } => endpoints
                .iter()
                .flat_map(|e| std::iter::repeat_n(e.clone(), *times as usize))
                .collect(),
            Phase::Single { endpoints } => endpoints.clone(),
            Phase::Countdown { endpoint, from, to } => (*to..=*from)
                .rev()
                .map(|id| format!("{endpoint}{id}"))
                .collect(),
        }
    }
}

/// The full per-cycle program: ordered phases plus pacing.
///
/// Identical for every account and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub phases: Vec<Phase>,
    /// Delay after every single action call.
    pub pace: Duration,
    /// Rest between full cycles.
    pub cycle_rest: Duration,
}

impl ActionSpec {
    /// The standard mpets.mobi care program.
    pub fn standard() -> Self {
        Self {
            phases: vec![
                Phase::Repeat {
                    endpoints: vec![
                        "?action=food".into(),
                        "?action=play".into(),
                        "show".into(),
                        "glade_dig".into(),
                    ],
                    times: 6,
                },
                Phase::Single {
                    endpoints: vec![
                        "wakeup".into(),
                        "train".into(),
                        "charm".into(),
                        "travel".into(),
                    ],
                },
                Phase::Countdown {
                    endpoint: "show_coin_get?id=".into(),
                    from: 10,
                    to: 1,
                },
            ],
            pace: Duration::from_secs(1),
            cycle_rest: Duration::from_secs(60),
        }
    }

    /// Total action calls in one cycle.
    pub fn calls_per_cycle(&self) -> usize {
        self.phases.iter().map(|p| p.calls().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_cycle_is_38_calls() {
        assert_eq!(ActionSpec::standard().calls_per_cycle(), 38);
    }

    #[test]
    fn test_repeat_phase_is_endpoint_major() {
        let phase = Phase::Repeat {
            endpoints: vec!["a".into(), "b".into()],
            times: 3,
        };
        assert_eq!(phase.calls(), ["a", "a", "a", "b", "b", "b"]);
    }

    #[test]
    fn test_countdown_runs_from_high_to_low_inclusive() {
        let phase = Phase::Countdown {
            endpoint: "show_coin_get?id=".into(),
            from: 10,
            to: 1,
        };
        let calls = phase.calls();
        assert_eq!(calls.len(), 10);
        assert_eq!(calls[0], "show_coin_get?id=10");
        assert_eq!(calls[9], "show_coin_get?id=1");
    }

    #[test]
    fn test_standard_order_repeat_then_single_then_countdown() {
        let spec = ActionSpec::standard();
        let all: Vec<String> = spec.phases.iter().flat_map(|p| p.calls()).collect();
        assert_eq!(all[0], "?action=food");
        assert_eq!(all[5], "?action=food");
        assert_eq!(all[6], "?action=play");
        assert_eq!(all[23], "glade_dig");
        assert_eq!(all[24], "wakeup");
        assert_eq!(all[27], "travel");
        assert_eq!(all[28], "show_coin_get?id=10");
        assert_eq!(all[37], "show_coin_get?id=1");
    }
}
