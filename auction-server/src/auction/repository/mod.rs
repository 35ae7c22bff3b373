use {
    super::entities,
    crate::kernel::entities::RoundNumber,
    std::sync::Arc,
    tokio::sync::{
        Mutex,
        RwLock,
    },
};

mod add_bid;
mod conclude_round;
mod get_bid;
mod get_bids;
mod get_current_round;
mod get_results;
mod get_round_lock;
mod remove_bid;
mod reset;

#[derive(Debug)]
pub struct InMemoryStore {
    pub current_round: RwLock<RoundNumber>,
    /// Sealed bids of the open round in submission order, one per team.
    pub bids:          RwLock<Vec<entities::Bid>>,
    pub results:       RwLock<Vec<entities::RoundResult>>,
    pub round_lock:    entities::RoundLock,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
}

impl Repository {
    pub fn new(first_round: RoundNumber) -> Self {
        Self {
            in_memory_store: InMemoryStore {
                current_round: RwLock::new(first_round),
                bids:          RwLock::new(Vec::new()),
                results:       RwLock::new(Vec::new()),
                round_lock:    Arc::new(Mutex::new(())),
            },
        }
    }
}
