/// Audit trail for credential operations
///
/// Events go to the `audit` tracing target. The `reason` field carries the
/// internal cause (e.g. `expired` vs `bad_signature`) that callers never see.
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditEvent<'a> {
    pub action: &'static str,
    pub outcome: Outcome,
    pub subject: Option<&'a str>,
    pub caller: Option<&'a str>,
    pub reason: Option<&'static str>,
    pub timestamp: DateTime<Utc>,
}

impl<'a> AuditEvent<'a> {
    pub fn success(action: &'static str, subject: &'a str, caller: Option<&'a str>) -> Self {
        Self {
            action,
            outcome: Outcome::Success,
            subject: Some(subject),
            caller,
            reason: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(
        action: &'static str,
        subject: Option<&'a str>,
        caller: Option<&'a str>,
        reason: &'static str,
    ) -> Self {
        Self {
            action,
            outcome: Outcome::Failure,
            subject,
            caller,
            reason: Some(reason),
            timestamp: Utc::now(),
        }
    }

    pub fn emit(&self) {
        let subject = self.subject.unwrap_or("-");
        let caller = self.caller.unwrap_or("-");
        let reason = self.reason.unwrap_or("-");
        let ts = self.timestamp.to_rfc3339();

        match self.outcome {
            Outcome::Success => tracing::info!(
                target: "audit",
                action = self.action,
                outcome = self.outcome.as_str(),
                subject,
                caller,
                ts = %ts,
                "credential operation succeeded"
            ),
            Outcome::Failure => tracing::warn!(
                target: "audit",
                action = self.action,
                outcome = self.outcome.as_str(),
                subject,
                caller,
                reason,
                ts = %ts,
                "credential operation failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_carries_reason() {
        let event = AuditEvent::failure("verify", None, Some("10.0.0.1"), "expired");
        assert_eq!(event.outcome, Outcome::Failure);
        assert_eq!(event.reason, Some("expired"));
        event.emit();
    }

    #[test]
    fn test_success_has_no_reason() {
        let event = AuditEvent::success("login", "alice", None);
        assert_eq!(event.outcome.as_str(), "success");
        assert!(event.reason.is_none());
        event.emit();
    }
}
