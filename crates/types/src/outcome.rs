//! Decisions reported back to the caller.

/// Verdict of a safety check: does the state admit an order in which
/// every process can still run to completion?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyVerdict {
    /// Some completion order exists for every process.
    Safe,
    /// No unfinished process can ever obtain enough resources to reach
    /// its declared maximum.
    Deadlocked,
}

impl SafetyVerdict {
    /// True for [`SafetyVerdict::Safe`].
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe)
    }
}

impl std::fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyVerdict::Safe => write!(f, "safe"),
            SafetyVerdict::Deadlocked => write!(f, "deadlocked"),
        }
    }
}

/// How a granted request was applied to the working state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantMode {
    /// Every requested unit was available; availability was debited.
    Full,
    /// Demand exceeded current availability. The allocation increase was
    /// recorded but availability was left untouched, so on this path the
    /// recorded allocation can exceed the tracked physical supply.
    Recorded,
}

impl std::fmt::Display for GrantMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrantMode::Full => write!(f, "granted"),
            GrantMode::Recorded => write!(f, "partially granted"),
        }
    }
}

/// Decision for one evaluated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The demand exceeded the process's declared maximum; nothing was
    /// applied.
    Denied,
    /// The request was applied to the working state; `verdict` is the
    /// result of the safety check that followed.
    Granted {
        /// Whether availability covered the demand.
        mode: GrantMode,
        /// Post-grant safety verdict.
        verdict: SafetyVerdict,
    },
}

impl RequestOutcome {
    /// True iff the request was rejected outright.
    pub fn is_denied(&self) -> bool {
        matches!(self, RequestOutcome::Denied)
    }

    /// The post-grant safety verdict, if the request was granted.
    pub fn verdict(&self) -> Option<SafetyVerdict> {
        match self {
            RequestOutcome::Denied => None,
            RequestOutcome::Granted { verdict, .. } => Some(*verdict),
        }
    }
}

impl std::fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestOutcome::Denied => {
                write!(f, "denied (demand exceeds declared maximum)")
            }
            RequestOutcome::Granted { mode, verdict } => {
                write!(f, "{mode}, post-grant state {verdict}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        assert!(RequestOutcome::Denied.is_denied());
        assert_eq!(RequestOutcome::Denied.verdict(), None);

        let granted = RequestOutcome::Granted {
            mode: GrantMode::Full,
            verdict: SafetyVerdict::Safe,
        };
        assert!(!granted.is_denied());
        assert_eq!(granted.verdict(), Some(SafetyVerdict::Safe));
    }

    #[test]
    fn test_outcome_display() {
        let partial = RequestOutcome::Granted {
            mode: GrantMode::Recorded,
            verdict: SafetyVerdict::Deadlocked,
        };
        assert_eq!(
            partial.to_string(),
            "partially granted, post-grant state deadlocked"
        );
    }
}
