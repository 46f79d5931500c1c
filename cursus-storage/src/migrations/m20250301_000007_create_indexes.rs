use sea_orm_migration::prelude::*;

use super::m20250301_000004_create_activities_table::Activities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The activity log is read newest-first per tenant
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activities_org_created_at")
                    .table(Activities::Table)
                    .col(Activities::OrganizationId)
                    .col(Activities::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Entity-scoped activity lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activities_org_entite")
                    .table(Activities::Table)
                    .col(Activities::OrganizationId)
                    .col(Activities::EntiteType)
                    .col(Activities::EntiteId)
                    .to_owned(),
            )
            .await?;

        // Module/action drill-downs
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activities_org_module")
                    .table(Activities::Table)
                    .col(Activities::OrganizationId)
                    .col(Activities::Module)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_activities_org_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activities_org_entite").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activities_org_module").to_owned())
            .await
    }
}
