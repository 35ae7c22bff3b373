use {
    crate::{
        config::ModuleConfig,
        kernel::entities::{
            Credits,
            ModuleId,
        },
    },
    pipeline_auction_api_types::module::Stage,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub id:          ModuleId,
    pub name:        String,
    pub stage:       Stage,
    pub description: String,
    pub min_bid:     Credits,
}

impl From<ModuleConfig> for Module {
    fn from(module: ModuleConfig) -> Self {
        Self {
            id:          module.id,
            name:        module.name,
            stage:       module.stage,
            description: module.description,
            min_bid:     module.min_bid,
        }
    }
}
