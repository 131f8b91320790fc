use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    Name,
    Description,
    Image,
    Duration,
    TrainerId,
    Routine,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Trainers {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Classes::Description).text().not_null())
                    .col(
                        ColumnDef::new(Classes::Image)
                            .string_len(255)
                            .not_null()
                            .default("default-class.jpg"),
                    )
                    .col(ColumnDef::new(Classes::Duration).integer().not_null())
                    .col(ColumnDef::new(Classes::TrainerId).integer().null())
                    .col(
                        ColumnDef::new(Classes::Routine)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Classes::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_classes_trainer_id")
                            .from(Classes::Table, Classes::TrainerId)
                            .to(Trainers::Table, Trainers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await
    }
}
