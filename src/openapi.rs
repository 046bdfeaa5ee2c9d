//! OpenAPI document served at `/api-docs/openapi.json` (Swagger UI at `/swagger-ui`).
//!
//! User endpoints carry `#[utoipa::path]`; the generic record resources are
//! described from their `RestResource` impls with the builder API.

use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, Parameter, ParameterBuilder, ParameterIn,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::{
    ComponentsBuilder, ContentBuilder, OpenApi as OpenApiDoc, Ref, RefOr, Required, Response,
    ResponseBuilder, Schema,
};
use utoipa::{IntoParams, OpenApi, PartialSchema, ToSchema};

use crate::db::models::{DbPotential, DbWaterSample};
use crate::handlers::crud::RestResource;
use crate::handlers::users;
use crate::router::BASE_PATH;
use crate::types::hateoas::Envelope;
use crate::types::page::{Page, PageParams};
use crate::types::user::{CredentialRequest, CredentialResponse, UserRequest, UserResponse};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ocean Cadastro API",
        description = "Cadastro de usuários, amostras de qualidade da água e potenciais"
    ),
    paths(
        users::list_users,
        users::get_user_by_id,
        users::get_user_by_email,
        users::create_user,
        users::login,
    ),
    components(schemas(UserRequest, UserResponse, CredentialRequest, CredentialResponse)),
    tags(
        (name = "Usuario", description = "API para gerenciamento de usuários"),
        (name = "Agua", description = "Amostras de qualidade da água"),
        (name = "Potencial", description = "Potenciais por cidade"),
    )
)]
struct ApiDoc;

pub fn api_doc() -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    document_resource::<DbWaterSample>(&mut doc);
    document_resource::<DbPotential>(&mut doc);
    doc
}

fn document_resource<R: RestResource>(doc: &mut OpenApiDoc) {
    let docs = R::DOCS;
    let collection = format!("{BASE_PATH}/{}", R::SEGMENT);
    let item = format!("{collection}/{{id}}");

    register::<R::Request>(doc);
    register::<R::Response>(doc);
    register_dependencies::<Envelope<Page<R::Response>>>(doc);
    register_dependencies::<Envelope<R::Response>>(doc);

    let page_schema = <Envelope<Page<R::Response>> as PartialSchema>::schema();
    let item_schema = <Envelope<R::Response> as PartialSchema>::schema();

    let list = operation::<R>("list", docs.list)
        .parameters(Some(PageParams::into_params(|| Some(ParameterIn::Query))))
        .response("200", json_response("Página de registros", page_schema))
        .response("400", bare_response("Ordenação inválida"))
        .response("404", bare_response("Nenhum registro encontrado"))
        .build();

    let create = operation::<R>("create", docs.create)
        .request_body(Some(json_body::<R::Request>()))
        .response(
            "201",
            json_response(
                "Registro criado; o cabeçalho Location aponta para o item",
                item_schema.clone(),
            ),
        )
        .response("400", bare_response("Dados inválidos"))
        .build();

    let get = operation::<R>("get", docs.get)
        .parameter(id_parameter())
        .response("200", json_response("Registro encontrado", item_schema.clone()))
        .response("404", bare_response("Registro não encontrado"))
        .build();

    let update = operation::<R>("update", docs.update)
        .parameter(id_parameter())
        .request_body(Some(json_body::<R::Request>()))
        .response("200", json_response("Registro atualizado", item_schema))
        .response("400", bare_response("Dados inválidos"))
        .response("404", bare_response("Registro não encontrado"))
        .build();

    let delete = operation::<R>("delete", docs.delete)
        .parameter(id_parameter())
        .response("204", bare_response("Registro excluído"))
        .response("404", bare_response("Registro não encontrado"))
        .build();

    doc.paths
        .add_path_operation(&collection, vec![HttpMethod::Get], list);
    doc.paths
        .add_path_operation(&collection, vec![HttpMethod::Post], create);
    doc.paths.add_path_operation(&item, vec![HttpMethod::Get], get);
    doc.paths.add_path_operation(&item, vec![HttpMethod::Put], update);
    doc.paths
        .add_path_operation(&item, vec![HttpMethod::Delete], delete);
}

fn operation<R: RestResource>(action: &str, summary: &str) -> OperationBuilder {
    OperationBuilder::new()
        .tags(Some(vec![R::DOCS.tag]))
        .summary(Some(summary))
        .operation_id(Some(format!("{}_{action}", R::SEGMENT)))
}

/// Adds `T` and every schema it references to the components.
fn register<T: ToSchema>(doc: &mut OpenApiDoc) {
    let name = T::name().into_owned();
    let schema = T::schema();
    register_dependencies::<T>(doc);
    doc.components
        .get_or_insert_with(|| ComponentsBuilder::new().build())
        .schemas
        .insert(name, schema);
}

fn register_dependencies<T: ToSchema>(doc: &mut OpenApiDoc) {
    let mut schemas = Vec::new();
    T::schemas(&mut schemas);
    doc.components
        .get_or_insert_with(|| ComponentsBuilder::new().build())
        .schemas
        .extend(schemas);
}

fn json_body<T: ToSchema>() -> RequestBody {
    let schema = RefOr::Ref(Ref::from_schema_name(T::name()));
    RequestBodyBuilder::new()
        .content(
            "application/json",
            ContentBuilder::new().schema(Some(schema)).build(),
        )
        .required(Some(Required::True))
        .build()
}

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            "application/json",
            ContentBuilder::new().schema(Some(schema)).build(),
        )
        .build()
}

fn bare_response(description: &str) -> Response {
    ResponseBuilder::new().description(description).build()
}

fn id_parameter() -> Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some("ID do registro"))
        .schema(Some(i64::schema()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = api_doc();
        let paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/cadastro",
            "/cadastro/id/{id}",
            "/cadastro/email/{email}",
            "/cadastro/login",
            "/cadastro/agua",
            "/cadastro/agua/{id}",
            "/cadastro/potencial",
            "/cadastro/potencial/{id}",
        ] {
            assert!(paths.contains(&path), "{path} missing from {paths:?}");
        }

        let item = &doc.paths.paths["/cadastro/potencial/{id}"];
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
        assert!(item.post.is_none());
    }

    #[test]
    fn registers_request_and_response_schemas() {
        let doc = api_doc();
        let schemas = &doc.components.expect("components").schemas;
        for name in [
            "WaterRequest",
            "WaterResponse",
            "PotentialRequest",
            "PotentialResponse",
            "UserRequest",
            "UserResponse",
        ] {
            assert!(schemas.contains_key(name), "{name} not registered");
        }
    }
}
