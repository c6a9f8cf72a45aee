use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Company;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub business_line: String,
    pub state: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub business_line: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyDetail {
    pub company: Company,
    pub customer_count: u64,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CompanyList {
    #[schema(value_type = Vec<Company>)]
    pub items: Vec<Company>,
}
