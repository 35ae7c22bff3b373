use {
    super::entities,
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
        Router,
    },
    axum_extra::extract::WithRejection,
    pipeline_auction_api_types::{
        module::{
            GetModuleParams,
            Module,
            Modules,
            Route,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

impl From<entities::Module> for Module {
    fn from(module: entities::Module) -> Self {
        Self {
            id:          module.id,
            name:        module.name,
            stage:       module.stage,
            description: module.description,
            min_bid:     module.min_bid,
        }
    }
}

/// Fetch the module store.
///
/// Returns every module that can be bid on, in catalogue order.
#[utoipa::path(get, path = "/v1/modules", responses(
    (status = 200, description = "The module catalogue", body = Modules),
),)]
pub async fn get_modules(State(store): State<Arc<Store>>) -> Json<Modules> {
    Json(Modules {
        items: store
            .module_service
            .get_modules()
            .into_iter()
            .map(Module::from)
            .collect(),
    })
}

/// Fetch a single module of the store.
#[utoipa::path(get, path = "/v1/modules/{module_id}", params(GetModuleParams), responses(
    (status = 200, description = "The module with the specified id", body = Module),
    (status = 404, description = "Module was not found", body = ErrorBodyResponse),
),)]
pub async fn get_module(
    State(store): State<Arc<Store>>,
    WithRejection(Path(params), _): WithRejection<Path<GetModuleParams>, RestError>,
) -> Result<Json<Module>, RestError> {
    let module = store.module_service.get_module(&params.module_id)?;
    Ok(Json(module.into()))
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::GetModules, get_modules)
        .route(Route::GetModule, get_module)
        .router
}
