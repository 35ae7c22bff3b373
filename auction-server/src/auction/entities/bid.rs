use {
    crate::kernel::entities::{
        Credits,
        ModuleId,
        RoundNumber,
        TeamName,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type BidId = Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct BidCreate {
    pub team:   TeamName,
    pub module: ModuleId,
    pub amount: Credits,
}

/// A sealed bid. Each team holds at most one bid per round.
#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub id:              BidId,
    pub team:            TeamName,
    pub module:          ModuleId,
    pub amount:          Credits,
    pub round:           RoundNumber,
    pub submission_time: OffsetDateTime,
}

impl Bid {
    pub fn new(bid_create: BidCreate, round: RoundNumber) -> Self {
        Self {
            id: Uuid::new_v4(),
            team: bid_create.team,
            module: bid_create.module,
            amount: bid_create.amount,
            round,
            submission_time: OffsetDateTime::now_utc(),
        }
    }

    /// Whether this bid beats `other`. Equal amounts go to the earlier submission.
    pub fn outbids(&self, other: &Bid) -> bool {
        self.amount > other.amount
            || (self.amount == other.amount && self.submission_time < other.submission_time)
    }
}

/// Picks the highest bid. Ties go to the bid submitted first.
pub fn select_winner<'a>(bids: impl IntoIterator<Item = &'a Bid>) -> Option<&'a Bid> {
    bids.into_iter()
        .reduce(|best, bid| if bid.outbids(best) { bid } else { best })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::Duration,
    };

    fn bid(team: &str, amount: Credits, offset_ms: i64) -> Bid {
        Bid {
            id: Uuid::new_v4(),
            team: team.to_string(),
            module: "grayscale".to_string(),
            amount,
            round: 1,
            submission_time: OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(offset_ms),
        }
    }

    #[test]
    fn test_select_winner_of_no_bids() {
        assert_eq!(select_winner(&Vec::<Bid>::new()), None);
    }

    #[test]
    fn test_select_winner_takes_highest_amount() {
        let bids = vec![bid("team1", 30, 0), bid("team2", 45, 10), bid("team3", 20, 20)];
        assert_eq!(select_winner(&bids).unwrap().team, "team2");
    }

    #[test]
    fn test_select_winner_breaks_ties_by_submission_time() {
        let bids = vec![bid("team1", 40, 30), bid("team2", 40, 10), bid("team3", 40, 20)];
        assert_eq!(select_winner(&bids).unwrap().team, "team2");

        // Order of the input does not matter.
        let reversed: Vec<_> = bids.into_iter().rev().collect();
        assert_eq!(select_winner(&reversed).unwrap().team, "team2");
    }

    #[test]
    fn test_new_bid_takes_round_and_fresh_id() {
        let create = BidCreate {
            team:   "team1".to_string(),
            module: "edge_detection".to_string(),
            amount: 12,
        };
        let first = Bid::new(create.clone(), 4);
        let second = Bid::new(create, 4);
        assert_eq!(first.round, 4);
        assert_eq!(first.amount, 12);
        assert_ne!(first.id, second.id);
    }
}
