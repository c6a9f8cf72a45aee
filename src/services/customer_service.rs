use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    entity::customers::{ActiveModel, Column, Entity as Customers},
    error::{AppError, AppResult, conflict_on_unique},
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::CustomerQuery,
    services::{
        company_service::{ensure_unassigned_company, find_company},
        now, optional_text,
        order_service::find_customer,
        required_text,
    },
    state::AppState,
};

const NAME_MAX: usize = 255;
const EMAIL_MAX: usize = 254;
const PHONE_MAX: usize = 15;

/// Trimmed, lowercased-domain email; blank input means no email.
fn normalize_email(email: Option<&str>) -> AppResult<Option<String>> {
    let Some(email) = optional_text(email, "email", EMAIL_MAX)? else {
        return Ok(None);
    };
    let invalid = || AppError::Validation(format!("'{email}' is not a valid email address"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let valid = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace);
    if !valid {
        return Err(invalid());
    }
    Ok(Some(format!("{local}@{}", domain.to_lowercase())))
}

/// Digits with optional `+`, spaces, dashes and parentheses.
fn normalize_phone(phone: Option<&str>) -> AppResult<Option<String>> {
    let Some(phone) = optional_text(phone, "phone", PHONE_MAX)? else {
        return Ok(None);
    };
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')');
    if !phone.chars().all(allowed) || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "'{phone}' is not a valid phone number"
        )));
    }
    Ok(Some(phone))
}

fn email_conflict(email: &Option<String>) -> String {
    match email {
        Some(email) => format!("A customer with the email '{email}' already exists"),
        None => "A customer with this email already exists".to_string(),
    }
}

pub async fn list_customers(
    state: &AppState,
    query: CustomerQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(company_id) = query.company_id.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::CompanyId.eq(company_id.clone()));
    }
    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Name.contains(search));
    }

    let finder = Customers::find()
        .filter(condition)
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();

    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Customer>> {
    let customer = find_customer(&state.orm, id).await?;
    Ok(ApiResponse::success("Customer", Customer::from(customer), None))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let name = required_text(&payload.name, "name", NAME_MAX)?;
    let email = normalize_email(payload.email.as_deref())?;
    let phone = normalize_phone(payload.phone.as_deref())?;

    let company = match payload.company_id.as_deref().filter(|id| !id.is_empty()) {
        Some(company_id) => find_company(&state.orm, company_id).await?,
        None => ensure_unassigned_company(&state.orm).await?,
    };

    let now = now();
    let conflict = email_conflict(&email);
    let customer = ActiveModel {
        id: NotSet,
        name: Set(name),
        email: Set(email),
        phone: Set(phone),
        company_id: Set(company.id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await
    .map_err(conflict_on_unique(conflict))?;

    tracing::info!(
        customer_id = customer.id,
        company_id = %customer.company_id,
        "customer created"
    );

    Ok(ApiResponse::success(
        "Customer created",
        Customer::from(customer),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: i32,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = find_customer(&state.orm, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text(&name, "name", NAME_MAX)?);
    }
    let mut conflict = email_conflict(&None);
    if let Some(email) = payload.email {
        let email = normalize_email(Some(&email))?;
        conflict = email_conflict(&email);
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(normalize_phone(Some(&phone))?);
    }
    if let Some(company_id) = payload.company_id {
        let company = find_company(&state.orm, &company_id).await?;
        active.company_id = Set(company.id);
    }
    active.updated_at = Set(now());

    let customer = active
        .update(&state.orm)
        .await
        .map_err(conflict_on_unique(conflict))?;

    tracing::info!(customer_id = customer.id, "customer updated");

    Ok(ApiResponse::success(
        "Updated",
        Customer::from(customer),
        Some(Meta::empty()),
    ))
}

/// Deletes a customer together with its orders and specific prices.
pub async fn delete_customer(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Customers::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Customer", id));
    }

    tracing::info!(customer_id = id, "customer deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

/// Copies a customer without its email, which must stay unique.
pub async fn duplicate_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Customer>> {
    let original = find_customer(&state.orm, id).await?;

    let name = required_text(&format!("Copy of {}", original.name), "name", NAME_MAX)?;

    let now = now();
    let customer = ActiveModel {
        id: NotSet,
        name: Set(name),
        email: Set(None),
        phone: Set(original.phone.clone()),
        company_id: Set(original.company_id.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        source_customer_id = original.id,
        customer_id = customer.id,
        "customer duplicated"
    );

    Ok(ApiResponse::success(
        "Customer duplicated",
        Customer::from(customer),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_domain_lowercased() {
        assert_eq!(
            normalize_email(Some("  Ana.Diaz@Example.COM ")).unwrap(),
            Some("Ana.Diaz@example.com".to_string())
        );
        assert_eq!(normalize_email(Some("")).unwrap(), None);
        assert_eq!(normalize_email(None).unwrap(), None);
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["plain", "@example.com", "a@b", "a@@b.com", "a b@c.com", "a@.com"] {
            assert!(normalize_email(Some(bad)).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn phone_accepts_common_punctuation_only() {
        assert_eq!(
            normalize_phone(Some(" +52 (33) 555 ")).unwrap(),
            Some("+52 (33) 555".to_string())
        );
        assert_eq!(normalize_phone(Some("  ")).unwrap(), None);
        assert!(normalize_phone(Some("call me")).is_err());
        assert!(normalize_phone(Some("+-()")).is_err());
        assert!(normalize_phone(Some("1234567890123456")).is_err());
    }
}
