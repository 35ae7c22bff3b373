use {
    super::entities,
    crate::api::RestError,
    std::sync::Arc,
};

/// The module store. The catalogue is fixed at startup.
#[derive(Clone, Debug)]
pub struct Service {
    modules: Arc<Vec<entities::Module>>,
}

impl Service {
    pub fn new(modules: Vec<entities::Module>) -> Self {
        Self {
            modules: Arc::new(modules),
        }
    }

    pub fn get_modules(&self) -> Vec<entities::Module> {
        self.modules.as_ref().clone()
    }

    pub fn get_module(&self, module_id: &str) -> Result<entities::Module, RestError> {
        self.modules
            .iter()
            .find(|module| module.id == module_id)
            .cloned()
            .ok_or(RestError::ModuleNotFound)
    }
}
