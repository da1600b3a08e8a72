use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MenuNodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuNodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MenuNodes::Name).string().not_null())
                    .col(ColumnDef::new(MenuNodes::NameSecondary).string().null())
                    .col(ColumnDef::new(MenuNodes::Icon).string().null())
                    .col(ColumnDef::new(MenuNodes::Path).string().null())
                    .col(
                        ColumnDef::new(MenuNodes::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(MenuNodes::ParentId).big_integer().null())
                    .col(
                        ColumnDef::new(MenuNodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MenuNodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_nodes_parent_id")
                            .from(MenuNodes::Table, MenuNodes::ParentId)
                            .to(MenuNodes::Table, MenuNodes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_menu_nodes_parent_id")
                    .table(MenuNodes::Table)
                    .col(MenuNodes::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuNodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MenuNodes {
    Table,
    Id,
    Name,
    NameSecondary,
    Icon,
    Path,
    SortOrder,
    ParentId,
    CreatedAt,
    UpdatedAt,
}
