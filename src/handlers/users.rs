use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::CadastroError;
use crate::middleware::{LinkContext, Params, ValidJson};
use crate::router::{BASE_PATH, CadastroState};
use crate::types::hateoas::Envelope;
use crate::types::page::{Page, PageParams};
use crate::types::user::{LoginParams, UserRequest, UserResponse, UserSearchParams};

/// GET /cadastro?denominacao=&nascimento=&credencial.id=&credencial.email=&page=&size=&sort=
#[utoipa::path(
    get,
    path = "/cadastro",
    tag = "Usuario",
    summary = "Retorna todos os usuários",
    params(UserSearchParams, PageParams),
    responses(
        (status = 200, description = "Usuários encontrados", body = Envelope<Page<UserResponse>>),
        (status = 400, description = "Filtro ou ordenação inválida"),
        (status = 404, description = "Nenhum usuário encontrado"),
    )
)]
pub async fn list_users(
    State(state): State<CadastroState>,
    links: LinkContext,
    Query(filter): Query<UserSearchParams>,
    Query(params): Query<PageParams>,
) -> Result<Json<Envelope<Page<UserResponse>>>, CadastroError> {
    let page = params.resolve(&state.config.pagination);
    let found = state.users().search(&filter, &page).await?;

    let body = Envelope::new(found.map(UserResponse::from)).with_self(links.current());
    Ok(Json(body))
}

/// GET /cadastro/id/{id}
#[utoipa::path(
    get,
    path = "/cadastro/id/{id}",
    tag = "Usuario",
    summary = "Retorna um usuário por ID",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário encontrado", body = Envelope<UserResponse>),
        (status = 404, description = "Usuário não encontrado"),
    )
)]
pub async fn get_user_by_id(
    State(state): State<CadastroState>,
    links: LinkContext,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<UserResponse>>, CadastroError> {
    let user = state.users().get_by_id(id).await?;
    Ok(Json(
        Envelope::new(UserResponse::from(user)).with_self(links.current()),
    ))
}

/// GET /cadastro/email/{email}
#[utoipa::path(
    get,
    path = "/cadastro/email/{email}",
    tag = "Usuario",
    summary = "Retorna um usuário por e-mail",
    params(("email" = String, Path, description = "E-mail da credencial do usuário")),
    responses(
        (status = 200, description = "Usuário encontrado", body = Envelope<UserResponse>),
        (status = 404, description = "Usuário não encontrado"),
    )
)]
pub async fn get_user_by_email(
    State(state): State<CadastroState>,
    links: LinkContext,
    Path(email): Path<String>,
) -> Result<Json<Envelope<UserResponse>>, CadastroError> {
    let user = state.users().get_by_email(&email).await?;
    Ok(Json(
        Envelope::new(UserResponse::from(user)).with_self(links.current()),
    ))
}

/// POST /cadastro -> 201, `Location` points at the by-id getter.
#[utoipa::path(
    post,
    path = "/cadastro",
    tag = "Usuario",
    summary = "Cria um novo usuário",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Usuário criado", body = Envelope<UserResponse>,
            headers(("location" = String, description = "URL do usuário criado"))),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado"),
    )
)]
pub async fn create_user(
    State(state): State<CadastroState>,
    links: LinkContext,
    ValidJson(request): ValidJson<UserRequest>,
) -> Result<impl IntoResponse, CadastroError> {
    let user = state.users().create(request).await?;

    let location = links.href(&format!("{BASE_PATH}/id/{}", user.id));
    let body = Envelope::new(UserResponse::from(user)).with_self(location.clone());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)))
}

/// POST /cadastro/login with `email` and `senha` as query or form parameters.
#[utoipa::path(
    post,
    path = "/cadastro/login",
    tag = "Usuario",
    summary = "Realiza login de usuário",
    params(LoginParams),
    responses(
        (status = 200, description = "Login bem-sucedido", body = String, content_type = "text/plain"),
        (status = 400, description = "Parâmetros ausentes"),
        (status = 401, description = "Credenciais inválidas", body = String, content_type = "text/plain"),
    )
)]
pub async fn login(
    State(state): State<CadastroState>,
    Params(params): Params<LoginParams>,
) -> Result<String, CadastroError> {
    let credential = state.users().login(&params.email, &params.password).await?;
    Ok(format!(
        "Login bem-sucedido para o usuário: {}",
        credential.email
    ))
}
