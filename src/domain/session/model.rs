//! Kiosk session entity and its state machine

use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::i18n::Language;
use crate::domain::DomainResult;
use crate::support::errors::DomainError;

/// Where a session is in the kiosk workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Started,
    Scanned { compliant: bool },
    AwaitingPayment,
    Paid,
    PaymentRejected,
    Completed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Scanned { compliant: true } => "scanned_compliant",
            Self::Scanned { compliant: false } => "scanned_non_compliant",
            Self::AwaitingPayment => "awaiting_payment",
            Self::Paid => "paid",
            Self::PaymentRejected => "payment_rejected",
            Self::Completed => "completed",
        }
    }

    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (*self, next),
            (Started, Scanned { .. })
                | (Scanned { .. }, Scanned { .. })
                | (Scanned { compliant: false }, AwaitingPayment)
                | (AwaitingPayment, Paid)
                | (AwaitingPayment, PaymentRejected)
                | (PaymentRejected, AwaitingPayment)
                | (PaymentRejected, Scanned { .. })
                | (Scanned { compliant: true }, Completed)
                | (Paid, Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KioskSession {
    pub id: String,
    pub airline_code: String,
    pub language: Language,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KioskSession {
    pub fn new(airline_code: impl Into<String>, language: Language) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            airline_code: airline_code.into(),
            language,
            state: SessionState::Started,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `next`, or fail with `InvalidState` leaving the session as is.
    pub fn advance(&mut self, next: SessionState) -> DomainResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::InvalidState(format!(
                "session {} cannot go from {} to {}",
                self.id, self.state, next
            )));
        }
        self.state = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> KioskSession {
        KioskSession::new("JSM", Language::Es)
    }

    #[test]
    fn compliant_flow_completes() {
        let mut s = session();
        s.advance(SessionState::Scanned { compliant: true }).unwrap();
        s.advance(SessionState::Completed).unwrap();
        assert!(s.state.is_terminal());
    }

    #[test]
    fn paid_flow_completes() {
        let mut s = session();
        s.advance(SessionState::Scanned { compliant: false }).unwrap();
        s.advance(SessionState::AwaitingPayment).unwrap();
        s.advance(SessionState::PaymentRejected).unwrap();
        s.advance(SessionState::AwaitingPayment).unwrap();
        s.advance(SessionState::Paid).unwrap();
        s.advance(SessionState::Completed).unwrap();
    }

    #[test]
    fn non_compliant_scan_cannot_complete_without_payment() {
        let mut s = session();
        s.advance(SessionState::Scanned { compliant: false }).unwrap();
        let err = s.advance(SessionState::Completed).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(s.state, SessionState::Scanned { compliant: false });
    }

    #[test]
    fn compliant_scan_cannot_go_to_payment() {
        let s = SessionState::Scanned { compliant: true };
        assert!(!s.can_transition_to(SessionState::AwaitingPayment));
    }

    #[test]
    fn rescan_after_rejection_is_allowed() {
        assert!(SessionState::PaymentRejected.can_transition_to(SessionState::Scanned { compliant: true }));
    }

    #[test]
    fn completed_is_final() {
        let done = SessionState::Completed;
        assert!(!done.can_transition_to(SessionState::Scanned { compliant: true }));
        assert!(!done.can_transition_to(SessionState::Completed));
    }

    #[test]
    fn state_names() {
        assert_eq!(SessionState::Scanned { compliant: false }.to_string(), "scanned_non_compliant");
        assert_eq!(SessionState::AwaitingPayment.as_str(), "awaiting_payment");
    }
}
