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
                    .table(ExtranetAccesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExtranetAccesses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::OrganizationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::Email)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::DisplayName)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(ExtranetAccesses::Role).string_len(20).not_null())
                    .col(
                        ColumnDef::new(ExtranetAccesses::Statut)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::InviteToken)
                            .string_len(64)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::InviteTokenExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::ActivatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExtranetAccesses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_extranet_accesses_organization_id")
                            .from(ExtranetAccesses::Table, ExtranetAccesses::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One access per email within a tenant
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_extranet_accesses_org_email")
                    .table(ExtranetAccesses::Table)
                    .col(ExtranetAccesses::OrganizationId)
                    .col(ExtranetAccesses::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExtranetAccesses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ExtranetAccesses {
    Table,
    Id,
    OrganizationId,
    Email,
    DisplayName,
    Role,
    Statut,
    InviteToken,
    InviteTokenExpiresAt,
    ActivatedAt,
    CreatedAt,
    UpdatedAt,
}
