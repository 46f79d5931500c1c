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
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rooms::OrganizationId).integer().not_null())
                    .col(ColumnDef::new(Rooms::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Rooms::Capacity).integer().null())
                    .col(ColumnDef::new(Rooms::Location).string_len(255).null())
                    .col(ColumnDef::new(Rooms::Description).text().null())
                    .col(ColumnDef::new(Rooms::Actif).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rooms::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_organization_id")
                            .from(Rooms::Table, Rooms::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One room name per tenant
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_rooms_org_name")
                    .table(Rooms::Table)
                    .col(Rooms::OrganizationId)
                    .col(Rooms::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Rooms {
    Table,
    Id,
    OrganizationId,
    Name,
    Capacity,
    Location,
    Description,
    Actif,
    CreatedAt,
    UpdatedAt,
}
