use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::{
        companies::{CompanyDetail, CompanyList, CreateCompanyRequest, UpdateCompanyRequest},
        customers::CustomerList,
    },
    entity::{
        companies::{ActiveModel, Column, Entity as Companies, Model as CompanyModel},
        customers::{Column as CustomerCol, Entity as Customers},
    },
    error::{AppError, AppResult, conflict_on_unique},
    models::{Company, Customer},
    response::{ApiResponse, Meta},
    routes::params::CompanyQuery,
    services::{now, required_text},
    state::AppState,
};

/// Name of the company that owns customers created without one.
pub const UNASSIGNED_COMPANY_NAME: &str = "Unassigned";

const NAME_MAX: usize = 255;
const BUSINESS_LINE_MAX: usize = 255;
const STATE_MAX: usize = 100;

/// Returns the unassigned company, creating it on first use.
pub async fn ensure_unassigned_company<C: ConnectionTrait>(conn: &C) -> AppResult<CompanyModel> {
    if let Some(company) = find_by_name(conn, UNASSIGNED_COMPANY_NAME).await? {
        return Ok(company);
    }

    let now = now();
    let inserted = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(UNASSIGNED_COMPANY_NAME.to_string()),
        business_line: Set("n/a".to_string()),
        state: Set("n/a".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await;

    match inserted {
        Ok(company) => {
            tracing::info!(company_id = %company.id, "unassigned company created");
            Ok(company)
        }
        // Lost a creation race: the row exists now.
        Err(err) => match find_by_name(conn, UNASSIGNED_COMPANY_NAME).await? {
            Some(company) => Ok(company),
            None => Err(err.into()),
        },
    }
}

async fn find_by_name<C: ConnectionTrait>(conn: &C, name: &str) -> AppResult<Option<CompanyModel>> {
    let company = Companies::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await?;
    Ok(company)
}

fn is_unassigned_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(UNASSIGNED_COMPANY_NAME)
}

fn reserved_name() -> AppError {
    AppError::Conflict(format!(
        "The name '{UNASSIGNED_COMPANY_NAME}' is reserved for the unassigned company"
    ))
}

pub(crate) async fn find_company<C: ConnectionTrait>(conn: &C, id: &str) -> AppResult<CompanyModel> {
    Companies::find_by_id(id.to_string())
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Company", id))
}

pub async fn list_companies(
    state: &AppState,
    query: CompanyQuery,
) -> AppResult<ApiResponse<CompanyList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Companies::find();
    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        finder = finder.filter(Column::Name.contains(search));
    }
    let finder = finder.order_by_asc(Column::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Company::from)
        .collect();

    Ok(ApiResponse::success(
        "Companies",
        CompanyList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_company(state: &AppState, id: &str) -> AppResult<ApiResponse<CompanyDetail>> {
    let company = find_company(&state.orm, id).await?;
    let customer_count = Customers::find()
        .filter(CustomerCol::CompanyId.eq(company.id.clone()))
        .count(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Company",
        CompanyDetail {
            company: Company::from(company),
            customer_count,
        },
        None,
    ))
}

pub async fn create_company(
    state: &AppState,
    payload: CreateCompanyRequest,
) -> AppResult<ApiResponse<Company>> {
    let name = required_text(&payload.name, "name", NAME_MAX)?;
    if is_unassigned_name(&name) {
        return Err(reserved_name());
    }
    let business_line = required_text(&payload.business_line, "business_line", BUSINESS_LINE_MAX)?;
    let company_state = required_text(&payload.state, "state", STATE_MAX)?;

    let now = now();
    let conflict = format!("A company with the name '{name}' already exists");
    let company = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        business_line: Set(business_line),
        state: Set(company_state),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await
    .map_err(conflict_on_unique(conflict))?;

    tracing::info!(company_id = %company.id, "company created");

    Ok(ApiResponse::success(
        "Company created",
        Company::from(company),
        Some(Meta::empty()),
    ))
}

pub async fn update_company(
    state: &AppState,
    id: &str,
    payload: UpdateCompanyRequest,
) -> AppResult<ApiResponse<Company>> {
    let existing = find_company(&state.orm, id).await?;
    let is_sentinel = existing.name == UNASSIGNED_COMPANY_NAME;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        let name = required_text(&name, "name", NAME_MAX)?;
        if is_sentinel && name != UNASSIGNED_COMPANY_NAME {
            return Err(AppError::Conflict(
                "The unassigned company cannot be renamed".into(),
            ));
        }
        if !is_sentinel && is_unassigned_name(&name) {
            return Err(reserved_name());
        }
        active.name = Set(name);
    }
    if let Some(business_line) = payload.business_line {
        active.business_line = Set(required_text(
            &business_line,
            "business_line",
            BUSINESS_LINE_MAX,
        )?);
    }
    if let Some(company_state) = payload.state {
        active.state = Set(required_text(&company_state, "state", STATE_MAX)?);
    }
    active.updated_at = Set(now());

    let company = active
        .update(&state.orm)
        .await
        .map_err(conflict_on_unique("Another company already uses this name"))?;

    tracing::info!(company_id = %company.id, "company updated");

    Ok(ApiResponse::success(
        "Updated",
        Company::from(company),
        Some(Meta::empty()),
    ))
}

/// Deletes a company together with its customers and their orders.
pub async fn delete_company(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let company = find_company(&state.orm, id).await?;
    if company.name == UNASSIGNED_COMPANY_NAME {
        return Err(AppError::Conflict(
            "The unassigned company cannot be deleted".into(),
        ));
    }

    Companies::delete_by_id(company.id.clone())
        .exec(&state.orm)
        .await?;

    tracing::info!(company_id = %company.id, "company deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": company.id }),
        Some(Meta::empty()),
    ))
}

pub async fn list_company_customers(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<CustomerList>> {
    let company = find_company(&state.orm, id).await?;

    let items: Vec<Customer> = Customers::find()
        .filter(CustomerCol::CompanyId.eq(company.id))
        .order_by_asc(CustomerCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();
    let total = items.len() as i64;

    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::new(1, total, total)),
    ))
}
