//! Challenge handshake between circles.
//!
//! `send` creates a pending request, `accept` starts the battle and records
//! its id on the request, `reject` closes it without a battle. A request that
//! is no longer pending cannot be touched again.
//!
//! An accepted request's battle is stored as `battle-{request_id}`. Two
//! accepts racing on one request therefore collide on the battle write, and
//! an accept interrupted between its two writes finds its battle on retry.

use tracing::{info, warn};

use super::engine::BattleEngine;
use super::request::BattleRequest;
use super::state::BattleState;
use crate::core::{BattleError, Result, RngProvider};
use crate::store::{BattleStore, CardSource};

impl<S: BattleStore, C: CardSource, R: RngProvider> BattleEngine<S, C, R> {
    /// Challenge `to_circle_id` on behalf of `from_circle_id`.
    ///
    /// Circle names that cannot be resolved fall back to `"Circle {id}"`.
    pub fn send_battle_request(&self, from_circle_id: &str, to_circle_id: &str) -> Result<BattleRequest> {
        if from_circle_id.is_empty() || to_circle_id.is_empty() {
            return Err(BattleError::MissingCircleId);
        }

        let mut request = BattleRequest::new(
            from_circle_id,
            self.circle_name(from_circle_id),
            to_circle_id,
            self.circle_name(to_circle_id),
        );
        self.persist_request(&mut request)?;

        info!(
            request_id = %request.request_id,
            from = %from_circle_id,
            to = %to_circle_id,
            "battle request sent"
        );
        Ok(request)
    }

    /// Accept a pending request and start its battle.
    ///
    /// If the battle cannot be created the request stays pending.
    pub fn accept_battle_request(&self, request_id: &str) -> Result<BattleState> {
        let mut request = self.load_request(request_id)?;
        request.ensure_pending()?;

        let battle_id = accepted_battle_id(request_id);
        let state = match self.find_battle(&battle_id)? {
            Some(existing) => {
                warn!(request_id, battle_id = %battle_id, "resuming accept of a request whose battle already exists");
                existing
            }
            None => self.create_battle_as(battle_id, &request.from_circle_id, &request.to_circle_id)?,
        };

        request.accept(state.battle_id.clone())?;
        self.persist_request(&mut request)?;

        info!(request_id, battle_id = %state.battle_id, "battle request accepted");
        Ok(state)
    }

    /// Reject a pending request.
    pub fn reject_battle_request(&self, request_id: &str) -> Result<BattleRequest> {
        let mut request = self.load_request(request_id)?;
        request.reject()?;
        self.persist_request(&mut request)?;

        info!(request_id, "battle request rejected");
        Ok(request)
    }

    fn load_request(&self, request_id: &str) -> Result<BattleRequest> {
        self.store
            .get_battle_request(request_id)
            .map_err(BattleError::store("load request"))?
            .ok_or_else(|| BattleError::RequestNotFound(request_id.to_string()))
    }

    fn persist_request(&self, request: &mut BattleRequest) -> Result<()> {
        request.version += 1;
        self.store
            .save_battle_request(request)
            .map_err(BattleError::store("save request"))
    }
}

fn accepted_battle_id(request_id: &str) -> String {
    format!("battle-{request_id}")
}
