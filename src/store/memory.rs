//! In-memory store and card source for tests and local runs.

use std::sync::RwLock;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::codec::{DocumentCodec, JsonCodec};
use super::error::{Result, SourceError, StoreError};
use super::traits::{BattleStore, CardSource};
use crate::battle::{BattleRequest, BattleState};
use crate::cards::Card;

/// Upper bound on cards returned per circle.
pub const MAX_CIRCLE_CARDS: usize = 20;

struct StoredDocument {
    version: u64,
    bytes: Vec<u8>,
}

type Collection = RwLock<FxHashMap<String, StoredDocument>>;

/// In-memory implementation of `BattleStore`.
///
/// Documents go through the codec on every read and write, so callers always
/// get a detached copy.
pub struct InMemoryBattleStore<C: DocumentCodec = JsonCodec> {
    codec: C,
    battles: Collection,
    requests: Collection,
}

impl InMemoryBattleStore<JsonCodec> {
    /// Create an empty store using JSON documents.
    pub fn new() -> Self {
        Self::with_codec(JsonCodec)
    }
}

impl Default for InMemoryBattleStore<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DocumentCodec> InMemoryBattleStore<C> {
    /// Create an empty store using the given codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            battles: RwLock::new(FxHashMap::default()),
            requests: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of stored battles.
    pub fn battle_count(&self) -> Result<usize> {
        Ok(self.battles.read().map_err(|_| StoreError::LockPoisoned)?.len())
    }

    fn put<T: Serialize>(
        &self,
        collection: &Collection,
        kind: &'static str,
        id: &str,
        version: u64,
        document: &T,
    ) -> Result<()> {
        let bytes = self.codec.encode(document)?;
        let mut docs = collection.write().map_err(|_| StoreError::LockPoisoned)?;

        let stored = docs.get(id).map_or(0, |d| d.version);
        if version != stored + 1 {
            return Err(StoreError::Conflict {
                kind,
                id: id.to_string(),
                expected: version.saturating_sub(1),
                found: stored,
            });
        }

        docs.insert(id.to_string(), StoredDocument { version, bytes });
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, collection: &Collection, id: &str) -> Result<Option<T>> {
        let docs = collection.read().map_err(|_| StoreError::LockPoisoned)?;
        docs.get(id)
            .map(|d| self.codec.decode(&d.bytes))
            .transpose()
    }
}

impl<C: DocumentCodec> BattleStore for InMemoryBattleStore<C> {
    fn save_battle(&self, state: &BattleState) -> Result<()> {
        self.put(&self.battles, "battle", &state.battle_id, state.version, state)
    }

    fn get_battle(&self, battle_id: &str) -> Result<Option<BattleState>> {
        self.fetch(&self.battles, battle_id)
    }

    fn save_battle_request(&self, request: &BattleRequest) -> Result<()> {
        self.put(&self.requests, "battle request", &request.request_id, request.version, request)
    }

    fn get_battle_request(&self, request_id: &str) -> Result<Option<BattleRequest>> {
        self.fetch(&self.requests, request_id)
    }
}

#[derive(Clone, Debug, Default)]
struct CircleRecord {
    name: String,
    cards: Vec<Card>,
}

/// In-memory implementation of `CardSource`.
///
/// Holds raw profile cards; battle stats are generated on every read.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCardSource {
    circles: FxHashMap<String, CircleRecord>,
}

impl InMemoryCardSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a circle. An empty name is stored as malformed.
    #[must_use]
    pub fn with_circle(mut self, circle_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.circles.entry(circle_id.into()).or_default().name = name.into();
        self
    }

    /// Add a card to a circle, registering the circle if needed.
    #[must_use]
    pub fn with_card(mut self, circle_id: impl Into<String>, card: Card) -> Self {
        let circle_id = circle_id.into();
        let card = card.in_circle(circle_id.clone());
        self.circles.entry(circle_id).or_default().cards.push(card);
        self
    }
}

impl CardSource for InMemoryCardSource {
    fn circle_cards(&self, circle_id: &str) -> std::result::Result<Vec<Card>, SourceError> {
        let cards: Vec<Card> = self
            .circles
            .get(circle_id)
            .map(|c| {
                c.cards
                    .iter()
                    .take(MAX_CIRCLE_CARDS)
                    .cloned()
                    .map(Card::with_generated_stats)
                    .collect()
            })
            .unwrap_or_default();

        if cards.is_empty() {
            return Err(SourceError::NoCards(circle_id.to_string()));
        }
        Ok(cards)
    }

    fn circle_name(&self, circle_id: &str) -> std::result::Result<String, SourceError> {
        let circle = self
            .circles
            .get(circle_id)
            .ok_or_else(|| SourceError::CircleNotFound(circle_id.to_string()))?;

        if circle.name.is_empty() {
            return Err(SourceError::Malformed {
                circle_id: circle_id.to_string(),
                reason: "circle name is missing".to_string(),
            });
        }
        Ok(circle.name.clone())
    }
}
