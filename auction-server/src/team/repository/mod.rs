use {
    super::entities,
    crate::kernel::entities::TeamName,
    std::collections::BTreeMap,
    tokio::sync::RwLock,
};

mod get_team;
mod get_teams;
mod reset_teams;
mod update_team;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub teams: RwLock<BTreeMap<TeamName, entities::Team>>,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
}

impl Repository {
    pub fn new(teams: Vec<entities::Team>) -> Self {
        Self {
            in_memory_store: InMemoryStore {
                teams: RwLock::new(
                    teams
                        .into_iter()
                        .map(|team| (team.name.clone(), team))
                        .collect(),
                ),
            },
        }
    }
}
