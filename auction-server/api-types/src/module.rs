use {
    crate::{
        AccessLevel,
        Credits,
        ModuleId,
        Routable,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::{
        AsRefStr,
        Display,
    },
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

/// The place of a module in an image-processing pipeline.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Acquisition,
    Preprocessing,
    Enhancement,
    Segmentation,
    FeatureExtraction,
    Classification,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug, PartialEq)]
pub struct Module {
    /// The unique id of the module.
    #[schema(example = "gaussian_blur")]
    pub id:          ModuleId,
    /// The display name of the module.
    #[schema(example = "Gaussian Blur")]
    pub name:        String,
    /// The pipeline stage the module belongs to.
    pub stage:       Stage,
    /// What the module does to an image.
    #[schema(example = "Smooths the image with a 5x5 gaussian kernel.")]
    pub description: String,
    /// The smallest bid accepted for this module.
    #[schema(example = 5)]
    pub min_bid:     Credits,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse, Debug)]
pub struct Modules {
    pub items: Vec<Module>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct GetModuleParams {
    /// The id of the module to fetch.
    #[param(example = "gaussian_blur")]
    pub module_id: ModuleId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    GetModules,
    #[strum(serialize = ":module_id")]
    GetModule,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = crate::full_path(crate::Route::Module, self);
        match self {
            Route::GetModules => crate::RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
            Route::GetModule => crate::RouteProperties {
                access_level: AccessLevel::Public,
                method: http::Method::GET,
                full_path,
            },
        }
    }
}
