//! Battle requests: one circle challenging another.
//!
//! A request starts `Pending` and moves exactly once, to `Accepted` (with the
//! id of the battle it started) or to `Rejected`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{BattleError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    pub request_id: String,
    pub from_circle_id: String,
    pub from_circle_name: String,
    pub to_circle_id: String,
    pub to_circle_name: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    /// Set exactly when the request is accepted.
    pub battle_id: Option<String>,
    /// Write counter for optimistic concurrency. 0 means never stored.
    pub version: u64,
}

impl BattleRequest {
    /// Create a pending request with a fresh id.
    pub fn new(
        from_circle_id: impl Into<String>,
        from_circle_name: impl Into<String>,
        to_circle_id: impl Into<String>,
        to_circle_name: impl Into<String>,
    ) -> Self {
        Self {
            request_id: format!("req-{}", Uuid::new_v4()),
            from_circle_id: from_circle_id.into(),
            from_circle_name: from_circle_name.into(),
            to_circle_id: to_circle_id.into(),
            to_circle_name: to_circle_name.into(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            battle_id: None,
            version: 0,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Fail unless the request is still pending.
    pub fn ensure_pending(&self) -> Result<()> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(BattleError::RequestNotPending {
                request_id: self.request_id.clone(),
                status: self.status.to_string(),
            })
        }
    }

    /// Mark accepted and record the battle it started.
    pub fn accept(&mut self, battle_id: impl Into<String>) -> Result<()> {
        self.ensure_pending()?;
        self.status = RequestStatus::Accepted;
        self.battle_id = Some(battle_id.into());
        Ok(())
    }

    /// Mark rejected.
    pub fn reject(&mut self) -> Result<()> {
        self.ensure_pending()?;
        self.status = RequestStatus::Rejected;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorCode;

    fn request() -> BattleRequest {
        BattleRequest::new("a", "Alpha", "b", "Beta")
    }

    #[test]
    fn test_new_request_is_pending() {
        let req = request();

        assert!(req.is_pending());
        assert!(req.request_id.starts_with("req-"));
        assert!(req.battle_id.is_none());
        assert_eq!(req.version, 0);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(request().request_id, request().request_id);
    }

    #[test]
    fn test_accept_sets_battle_id_once() {
        let mut req = request();
        req.accept("battle-1").unwrap();

        assert_eq!(req.status, RequestStatus::Accepted);
        assert_eq!(req.battle_id.as_deref(), Some("battle-1"));

        let err = req.accept("battle-2").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FailedPrecondition);
        assert_eq!(req.battle_id.as_deref(), Some("battle-1"));
    }

    #[test]
    fn test_reject_is_terminal() {
        let mut req = request();
        req.reject().unwrap();

        assert_eq!(req.status, RequestStatus::Rejected);
        assert!(req.battle_id.is_none());
        assert!(req.reject().is_err());
        assert!(req.accept("battle-1").is_err());
        assert_eq!(req.status, RequestStatus::Rejected);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RequestStatus::Accepted).unwrap(), "\"accepted\"");
        assert_eq!(RequestStatus::Pending.to_string(), "pending");
    }
}
