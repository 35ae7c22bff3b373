use {
    super::Service,
    crate::team::entities,
};

impl Service {
    pub async fn get_teams(&self) -> Vec<entities::Team> {
        self.repo.get_teams().await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::kernel::test_utils::{
            TEAM_1,
            TEAM_2,
        },
    };

    #[tokio::test]
    async fn test_teams_are_sorted_by_name() {
        let service = Service::new(
            vec![TEAM_2.to_string(), TEAM_1.to_string()],
            super::super::Config {
                initial_credits: 50,
            },
        );
        let teams = service.get_teams().await;
        let names: Vec<_> = teams.iter().map(|team| team.name.as_str()).collect();
        assert_eq!(names, vec![TEAM_1, TEAM_2]);
        assert!(teams.iter().all(|team| team.credits == 50));
    }
}
