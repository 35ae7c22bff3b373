use {
    crate::kernel::entities::{
        Credits,
        ModuleId,
        RoundNumber,
        UserRole,
        Username,
    },
    anyhow::{
        anyhow,
        Result,
    },
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    pipeline_auction_api_types::module::Stage,
    std::{
        collections::HashSet,
        fs,
        time::Duration,
    },
};

mod server;

// `Options` is a structup definition to provide clean command-line args for the auction server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file containing the users, the module catalogue and the game rules.
    #[arg(long = "config")]
    #[arg(env = "AUCTION_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game:    GameConfig,
    pub users:   Vec<UserConfig>,
    pub modules: Vec<ModuleConfig>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    /// Credits every team starts the game with.
    #[serde(default = "default_initial_credits")]
    pub initial_credits: Credits,
    /// The number of the first round.
    #[serde(default = "default_first_round")]
    pub first_round:     RoundNumber,
    /// How long a login token stays valid.
    #[serde(with = "humantime_serde", default = "default_session_ttl")]
    pub session_ttl:     Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_credits: default_initial_credits(),
            first_round:     default_first_round(),
            session_ttl:     default_session_ttl(),
        }
    }
}

fn default_initial_credits() -> Credits {
    100
}

fn default_first_round() -> RoundNumber {
    1
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(12 * 60 * 60)
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UserConfig {
    pub username: Username,
    pub password: String,
    pub role:     UserRole,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ModuleConfig {
    pub id:          ModuleId,
    pub name:        String,
    pub stage:       Stage,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_min_bid")]
    pub min_bid:     Credits,
}

fn default_min_bid() -> Credits {
    1
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let yaml_content = fs::read_to_string(path)?;
        Self::parse(&yaml_content)
    }

    pub fn parse(yaml_content: &str) -> Result<Config> {
        let config: Config = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut usernames = HashSet::new();
        for user in self.users.iter() {
            if !usernames.insert(user.username.as_str()) {
                return Err(anyhow!("Duplicate username: {}", user.username));
            }
        }
        if !self.users.iter().any(|user| user.role == UserRole::Admin) {
            return Err(anyhow!("At least one admin user is required"));
        }

        let mut module_ids = HashSet::new();
        for module in self.modules.iter() {
            if !module_ids.insert(module.id.as_str()) {
                return Err(anyhow!("Duplicate module id: {}", module.id));
            }
            if module.min_bid == 0 {
                return Err(anyhow!(
                    "Minimum bid of module {} must be at least 1",
                    module.id
                ));
            }
        }
        Ok(())
    }
}
