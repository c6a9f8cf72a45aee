use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        companies::{CompanyDetail, CompanyList, CreateCompanyRequest, UpdateCompanyRequest},
        customers::CustomerList,
    },
    error::AppResult,
    models::Company,
    response::ApiResponse,
    routes::params::CompanyQuery,
    services::company_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/{id}/customers", get(list_company_customers))
}

#[utoipa::path(
    get,
    path = "/api/companies",
    params(CompanyQuery),
    responses(
        (status = 200, description = "List companies", body = ApiResponse<CompanyList>)
    ),
    tag = "Companies"
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> AppResult<Json<ApiResponse<CompanyList>>> {
    let resp = company_service::list_companies(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(("id" = String, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company with its customer count", body = ApiResponse<CompanyDetail>),
        (status = 404, description = "Company not found"),
    ),
    tag = "Companies"
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CompanyDetail>>> {
    let resp = company_service::get_company(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Create company", body = ApiResponse<Company>),
        (status = 409, description = "Name already in use"),
        (status = 422, description = "Invalid input"),
    ),
    tag = "Companies"
)]
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompanyRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Company>>)> {
    let resp = company_service::create_company(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    params(("id" = String, Path, description = "Company ID")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Updated company", body = ApiResponse<Company>),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Name already in use"),
    ),
    tag = "Companies"
)]
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> AppResult<Json<ApiResponse<Company>>> {
    let resp = company_service::update_company(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    params(("id" = String, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company, its customers and their orders deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Company not found"),
        (status = 409, description = "The unassigned company cannot be deleted"),
    ),
    tag = "Companies"
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = company_service::delete_company(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}/customers",
    params(("id" = String, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Customers of the company", body = ApiResponse<CustomerList>),
        (status = 404, description = "Company not found"),
    ),
    tag = "Companies"
)]
pub async fn list_company_customers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let resp = company_service::list_company_customers(&state, &id).await?;
    Ok(Json(resp))
}
