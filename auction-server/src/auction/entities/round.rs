use {
    super::Bid,
    crate::{
        kernel::entities::{
            Credits,
            ModuleId,
            RoundNumber,
            TeamName,
        },
        team::entities::Team,
    },
    std::sync::Arc,
    time::OffsetDateTime,
    tokio::sync::Mutex,
};

/// Serializes bidding, withdrawal, resolution and reset against each other.
pub type RoundLock = Arc<Mutex<()>>;

#[derive(Clone, Debug, PartialEq)]
pub enum RoundOutcome {
    Won {
        team:   TeamName,
        module: ModuleId,
        amount: Credits,
    },
    NoBids,
}

impl From<&Bid> for RoundOutcome {
    fn from(bid: &Bid) -> Self {
        RoundOutcome::Won {
            team:   bid.team.clone(),
            module: bid.module.clone(),
            amount: bid.amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundResult {
    pub round:           RoundNumber,
    pub outcome:         RoundOutcome,
    pub resolution_time: OffsetDateTime,
}

impl RoundResult {
    pub fn new(round: RoundNumber, outcome: RoundOutcome) -> Self {
        Self {
            round,
            outcome,
            resolution_time: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundResolution {
    pub result:        RoundResult,
    pub current_round: RoundNumber,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundStatus {
    pub round:     RoundNumber,
    pub bid_count: usize,
}

/// A team as seen from the open round.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamRoundStatus {
    pub team:  Team,
    pub round: RoundNumber,
    pub bid:   Option<Bid>,
}
