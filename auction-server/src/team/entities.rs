use crate::kernel::entities::{
    Credits,
    ModuleId,
    TeamName,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Team {
    pub name:     TeamName,
    pub credits:  Credits,
    pub pipeline: Vec<ModuleId>,
    pub score:    i64,
}

impl Team {
    pub fn new(name: TeamName, credits: Credits) -> Self {
        Self {
            name,
            credits,
            pipeline: Vec::new(),
            score: 0,
        }
    }

    pub fn owns_module(&self, module: &str) -> bool {
        self.pipeline.iter().any(|owned| owned == module)
    }

    pub fn can_afford(&self, amount: Credits) -> bool {
        amount <= self.credits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_team_starts_empty() {
        let team = Team::new("team1".to_string(), 100);
        assert_eq!(team.credits, 100);
        assert!(team.pipeline.is_empty());
        assert_eq!(team.score, 0);
        assert!(team.can_afford(100));
        assert!(!team.can_afford(101));
        assert!(!team.owns_module("grayscale"));
    }
}
