use quoting_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::company_service::ensure_unassigned_company,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    ensure_unassigned_company(&orm).await?;
    println!("Migrations applied");
    Ok(())
}
