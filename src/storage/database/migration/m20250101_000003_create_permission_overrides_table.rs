use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PermissionOverrides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PermissionOverrides::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PermissionOverrides::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(PermissionOverrides::MenuNodeId)
                            .big_integer()
                            .not_null(),
                    )
                    // Tri-state capability flags: NULL inherits the role default
                    .col(ColumnDef::new(PermissionOverrides::CanRead).boolean().null())
                    .col(
                        ColumnDef::new(PermissionOverrides::CanCreate)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PermissionOverrides::CanUpdate)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PermissionOverrides::CanDelete)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PermissionOverrides::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_overrides_user_id")
                            .from(PermissionOverrides::Table, PermissionOverrides::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_overrides_menu_node_id")
                            .from(PermissionOverrides::Table, PermissionOverrides::MenuNodeId)
                            .to(MenuNodes::Table, MenuNodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_permission_overrides_user_node")
                    .table(PermissionOverrides::Table)
                    .col(PermissionOverrides::UserId)
                    .col(PermissionOverrides::MenuNodeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PermissionOverrides::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PermissionOverrides {
    Table,
    Id,
    UserId,
    MenuNodeId,
    CanRead,
    CanCreate,
    CanUpdate,
    CanDelete,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum MenuNodes {
    Table,
    Id,
}
