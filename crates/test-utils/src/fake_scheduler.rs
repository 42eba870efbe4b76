use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use deckgraph::errors::DeckgraphError;
use deckgraph::scheduler::{CardInfo, SchedulerClient, SchedulerFuture};

/// An in-memory scheduler that:
/// - answers `card_info` from a map (unknown ids → "does not exist")
/// - fails on purpose for ids registered with [`FakeScheduler::fail`]
/// - records every queried card id.
#[derive(Debug, Clone, Default)]
pub struct FakeScheduler {
    cards: Arc<Mutex<HashMap<i64, CardInfo>>>,
    failing: Arc<Mutex<HashSet<i64>>>,
    calls: Arc<Mutex<Vec<i64>>>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card(self, card: CardInfo) -> Self {
        self.set_card(card);
        self
    }

    /// Insert or replace a card (e.g. to simulate a review).
    pub fn set_card(&self, card: CardInfo) {
        self.cards.lock().unwrap().insert(card.card_id, card);
    }

    /// Make every query for `card_id` fail with a scheduler error.
    pub fn fail(&self, card_id: i64) {
        self.failing.lock().unwrap().insert(card_id);
    }

    /// Card ids queried so far, in call order.
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

impl SchedulerClient for FakeScheduler {
    fn card_info(&self, card_id: i64) -> SchedulerFuture<'_, Option<CardInfo>> {
        let cards = Arc::clone(&self.cards);
        let failing = Arc::clone(&self.failing);
        let calls = Arc::clone(&self.calls);

        Box::pin(async move {
            calls.lock().unwrap().push(card_id);
            if failing.lock().unwrap().contains(&card_id) {
                return Err(DeckgraphError::SchedulerError(format!(
                    "injected failure for card {card_id}"
                )));
            }
            Ok(cards.lock().unwrap().get(&card_id).cloned())
        })
    }

    fn version(&self) -> SchedulerFuture<'_, u32> {
        Box::pin(async { Ok(6) })
    }
}
