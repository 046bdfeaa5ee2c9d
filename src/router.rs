use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::db::models::{DbPotential, DbWaterSample};
use crate::db::records::Record;
use crate::db::sqlite::CadastroStorage;
use crate::handlers::{crud, users};
use crate::openapi::{OPENAPI_PATH, SWAGGER_UI_PATH, api_doc};
use crate::service::{CrudService, UserService};

pub const BASE_PATH: &str = "/cadastro";

#[derive(Clone)]
pub struct CadastroState {
    pub storage: CadastroStorage,
    pub config: Arc<Config>,
}

impl CadastroState {
    pub fn new(storage: CadastroStorage, config: Config) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.storage.clone())
    }

    pub fn records<R: Record>(&self) -> CrudService<R> {
        CrudService::new(self.storage.clone())
    }
}

pub fn cadastro_router(state: CadastroState) -> Router {
    let api = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/id/{id}", get(users::get_user_by_id))
        .route("/email/{email}", get(users::get_user_by_email))
        .route("/login", post(users::login))
        .merge(crud::resource_routes::<DbWaterSample>())
        .merge(crud::resource_routes::<DbPotential>());

    Router::new()
        .nest(BASE_PATH, api)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, api_doc()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
