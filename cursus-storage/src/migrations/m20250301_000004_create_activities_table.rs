use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_organizations_table::Organizations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activities::OrganizationId).integer().not_null())
                    .col(ColumnDef::new(Activities::Module).string_len(50).not_null())
                    .col(ColumnDef::new(Activities::Action).string_len(50).not_null())
                    .col(ColumnDef::new(Activities::EntiteType).string_len(50).null())
                    .col(ColumnDef::new(Activities::EntiteId).string_len(64).null())
                    .col(ColumnDef::new(Activities::Description).text().not_null())
                    .col(ColumnDef::new(Activities::ActorName).string_len(255).null())
                    .col(ColumnDef::new(Activities::ActorRole).string_len(50).null())
                    .col(ColumnDef::new(Activities::Origin).string_len(20).not_null())
                    .col(ColumnDef::new(Activities::Metadata).json().not_null())
                    .col(
                        ColumnDef::new(Activities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activities_organization_id")
                            .from(Activities::Table, Activities::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Activities {
    Table,
    Id,
    OrganizationId,
    Module,
    Action,
    EntiteType,
    EntiteId,
    Description,
    ActorName,
    ActorRole,
    Origin,
    Metadata,
    CreatedAt,
}
