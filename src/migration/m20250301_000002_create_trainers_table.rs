use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Trainers {
    Table,
    Id,
    Name,
    Photo,
    Specialty,
    Bio,
    Experience,
    Schedule,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trainers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trainers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trainers::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Trainers::Photo)
                            .string_len(255)
                            .not_null()
                            .default("default-trainer.jpg"),
                    )
                    .col(
                        ColumnDef::new(Trainers::Specialty)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Trainers::Bio).text().not_null())
                    .col(
                        ColumnDef::new(Trainers::Experience)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Trainers::Schedule)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Trainers::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trainers::Table).to_owned())
            .await
    }
}
