use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    DocKey,
    Id,
    Name,
    Position,
    Department,
    Contact,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::DocKey)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Id).big_integer().not_null())
                    .col(ColumnDef::new(Employees::Name).text().not_null())
                    .col(ColumnDef::new(Employees::Position).text().not_null())
                    .col(ColumnDef::new(Employees::Department).text().not_null())
                    .col(ColumnDef::new(Employees::Contact).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Id allocation relies on this index to reject a second writer of the same id.
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_id")
                    .table(Employees::Table)
                    .col(Employees::Id)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}
