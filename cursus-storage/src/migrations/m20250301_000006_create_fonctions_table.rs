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
                    .table(Fonctions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Fonctions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Fonctions::OrganizationId).integer().not_null())
                    .col(ColumnDef::new(Fonctions::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Fonctions::Position).integer().not_null())
                    .col(
                        ColumnDef::new(Fonctions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fonctions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fonctions_organization_id")
                            .from(Fonctions::Table, Fonctions::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One fonction name per tenant
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_fonctions_org_name")
                    .table(Fonctions::Table)
                    .col(Fonctions::OrganizationId)
                    .col(Fonctions::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Fonctions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Fonctions {
    Table,
    Id,
    OrganizationId,
    Name,
    Position,
    CreatedAt,
    UpdatedAt,
}
