mod common;

use std::collections::HashSet;

use quoting_api::{db::run_migrations, migration::Migrator};
use sea_orm_migration::{MigrationName, MigratorTrait};

#[test]
fn migration_names_are_unique() {
    let migrations = Migrator::migrations();
    let names: HashSet<String> = migrations.iter().map(|m| m.name().to_string()).collect();
    assert_eq!(names.len(), migrations.len());
}

#[tokio::test]
async fn every_migration_is_recorded_and_rerun_is_a_no_op() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    let applied = Migrator::get_applied_migrations(&state.orm).await?;
    assert_eq!(applied.len(), Migrator::migrations().len());

    run_migrations(&state.orm).await?;
    let pending = Migrator::get_pending_migrations(&state.orm).await?;
    assert!(pending.is_empty());

    Ok(())
}
