//! Handlers shared by every plain record resource (`/agua`, `/potencial`).

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde::{Serialize, de::DeserializeOwned};
use utoipa::ToSchema;

use crate::db::models::{DbPotential, DbWaterSample};
use crate::db::records::{Record, RecordValues};
use crate::error::CadastroError;
use crate::middleware::{LinkContext, ValidJson};
use crate::router::{BASE_PATH, CadastroState};
use crate::types::Validate;
use crate::types::hateoas::{Envelope, FIND_REL};
use crate::types::page::{Page, PageParams};
use crate::types::potential::{PotentialRequest, PotentialResponse};
use crate::types::water::{WaterRequest, WaterResponse};

/// A record exposed as a REST collection under `/cadastro/<SEGMENT>`.
pub trait RestResource: Record {
    const SEGMENT: &'static str;
    const DOCS: ResourceDocs;
    type Request: DeserializeOwned + Validate + RecordValues + ToSchema + Send + 'static;
    type Response: Serialize + From<Self> + ToSchema + Send + 'static;

    fn item_path(id: i64) -> String {
        format!("{BASE_PATH}/{}/{id}", Self::SEGMENT)
    }
}

/// OpenAPI tag and per-operation summaries of a resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDocs {
    pub tag: &'static str,
    pub list: &'static str,
    pub get: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl RestResource for DbWaterSample {
    const SEGMENT: &'static str = "agua";
    const DOCS: ResourceDocs = ResourceDocs {
        tag: "Agua",
        list: "Retorna todas as águas",
        get: "Retorna uma água por ID",
        create: "Cria uma nova água",
        update: "Atualiza uma água existente",
        delete: "Exclui uma água por ID",
    };
    type Request = WaterRequest;
    type Response = WaterResponse;
}

impl RestResource for DbPotential {
    const SEGMENT: &'static str = "potencial";
    const DOCS: ResourceDocs = ResourceDocs {
        tag: "Potencial",
        list: "Retorna todos os potenciais",
        get: "Retorna um potencial por ID",
        create: "Cria um novo potencial",
        update: "Atualiza um potencial existente",
        delete: "Exclui um potencial por ID",
    };
    type Request = PotentialRequest;
    type Response = PotentialResponse;
}

/// Collection and item routes for `R`, relative to the `/cadastro` nest.
pub fn resource_routes<R: RestResource>() -> Router<CadastroState> {
    let collection = format!("/{}", R::SEGMENT);
    let item = format!("/{}/{{id}}", R::SEGMENT);
    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(
            &item,
            get(get_by_id::<R>).put(update::<R>).delete(delete::<R>),
        )
}

/// GET /cadastro/<segment>?page=&size=&sort=
pub async fn list<R: RestResource>(
    State(state): State<CadastroState>,
    links: LinkContext,
    Query(params): Query<PageParams>,
) -> Result<Json<Envelope<Page<R::Response>>>, CadastroError> {
    let page = params.resolve(&state.config.pagination);
    let found = state.records::<R>().list(&page).await?;

    let body = Envelope::new(found.map(R::Response::from)).with_self(links.current());
    Ok(Json(body))
}

/// GET /cadastro/<segment>/{id}
pub async fn get_by_id<R: RestResource>(
    State(state): State<CadastroState>,
    links: LinkContext,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<R::Response>>, CadastroError> {
    let found = state.records::<R>().get(id).await?;

    let body = Envelope::new(R::Response::from(found)).with_self(links.current());
    Ok(Json(body))
}

/// POST /cadastro/<segment> -> 201 with `Location`
pub async fn create<R: RestResource>(
    State(state): State<CadastroState>,
    links: LinkContext,
    ValidJson(request): ValidJson<R::Request>,
) -> Result<impl IntoResponse, CadastroError> {
    let created = state.records::<R>().create(request).await?;

    let location = links.current_with_id(created.id());
    let body = Envelope::new(R::Response::from(created)).with_self(location.clone());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)))
}

/// PUT /cadastro/<segment>/{id}; every editable field is replaced.
pub async fn update<R: RestResource>(
    State(state): State<CadastroState>,
    links: LinkContext,
    Path(id): Path<i64>,
    ValidJson(request): ValidJson<R::Request>,
) -> Result<Json<Envelope<R::Response>>, CadastroError> {
    let updated = state.records::<R>().update(id, request).await?;

    let body = Envelope::new(R::Response::from(updated))
        .with_self(links.current())
        .with_link(FIND_REL, links.href(&R::item_path(id)));
    Ok(Json(body))
}

/// DELETE /cadastro/<segment>/{id} -> 204
pub async fn delete<R: RestResource>(
    State(state): State<CadastroState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, CadastroError> {
    state.records::<R>().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
