use serde::{Deserialize, Serialize};

use crate::alert::entity::{AlertLevel, AlertState, CanonicalAlert};

/// Default push topic.
pub const DEFAULT_PUSH_TOPIC: &str = "alert";

/// Thresholds deciding which alerts reach the push capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPolicy {
    /// Triggered alerts at or above this level are pushed after being stored.
    pub min_push_level: AlertLevel,
    /// Topic passed to every push call.
    pub topic: String,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            min_push_level: AlertLevel::Warning,
            topic: DEFAULT_PUSH_TOPIC.to_string(),
        }
    }
}

/// Capability calls to make for one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPlan {
    /// Store the alert, then push it if the store succeeds.
    StoreAndPush,
    /// Store the alert only; its level is below the push threshold.
    Store,
    /// Delete the stored alert. Resolved alerts are never pushed.
    Delete,
    /// No capability calls; the state is not actionable.
    Reject,
}

impl DispatchPolicy {
    pub fn plan(&self, alert: &CanonicalAlert) -> DispatchPlan {
        match alert.state {
            AlertState::Triggered if alert.level >= self.min_push_level => {
                DispatchPlan::StoreAndPush
            }
            AlertState::Triggered => DispatchPlan::Store,
            AlertState::Resolved => DispatchPlan::Delete,
            AlertState::Unknown => DispatchPlan::Reject,
        }
    }
}

/// What the dispatch engine did for one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Stored,
    StoredAndPushed,
    Deleted,
}

impl DispatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::StoredAndPushed => "stored_and_pushed",
            Self::Deleted => "deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_alert(level: AlertLevel, state: AlertState) -> CanonicalAlert {
        CanonicalAlert {
            id: "DiskFull".to_string(),
            title: "DiskFull".to_string(),
            body: "WARNING: disk at 95%".to_string(),
            time: Utc::now(),
            level,
            state,
        }
    }

    #[test]
    fn default_policy_pushes_from_warning() {
        let policy = DispatchPolicy::default();
        assert_eq!(policy.min_push_level, AlertLevel::Warning);
        assert_eq!(policy.topic, "alert");
    }

    #[test]
    fn triggered_at_threshold_is_pushed() {
        let policy = DispatchPolicy::default();
        let plan = policy.plan(&make_alert(AlertLevel::Warning, AlertState::Triggered));
        assert_eq!(plan, DispatchPlan::StoreAndPush);
        let plan = policy.plan(&make_alert(AlertLevel::Error, AlertState::Triggered));
        assert_eq!(plan, DispatchPlan::StoreAndPush);
    }

    #[test]
    fn triggered_below_threshold_is_only_stored() {
        let policy = DispatchPolicy::default();
        for level in [AlertLevel::Unknown, AlertLevel::Debug, AlertLevel::Info] {
            let plan = policy.plan(&make_alert(level, AlertState::Triggered));
            assert_eq!(plan, DispatchPlan::Store);
        }
    }

    #[test]
    fn resolved_is_deleted_regardless_of_level() {
        let policy = DispatchPolicy::default();
        for level in [AlertLevel::Unknown, AlertLevel::Warning, AlertLevel::Error] {
            let plan = policy.plan(&make_alert(level, AlertState::Resolved));
            assert_eq!(plan, DispatchPlan::Delete);
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        let policy = DispatchPolicy::default();
        let plan = policy.plan(&make_alert(AlertLevel::Error, AlertState::Unknown));
        assert_eq!(plan, DispatchPlan::Reject);
    }

    #[test]
    fn unknown_threshold_pushes_every_triggered_alert() {
        let policy = DispatchPolicy {
            min_push_level: AlertLevel::Unknown,
            topic: DEFAULT_PUSH_TOPIC.to_string(),
        };
        let plan = policy.plan(&make_alert(AlertLevel::Unknown, AlertState::Triggered));
        assert_eq!(plan, DispatchPlan::StoreAndPush);
    }
}
