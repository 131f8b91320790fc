use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS membership_id INTEGER NULL REFERENCES memberships(id) ON DELETE SET NULL",
        )
        .await?;

        db.execute_unprepared(
            "ALTER TABLE users ADD COLUMN IF NOT EXISTS membership_expiry TIMESTAMP NULL",
        )
        .await?;

        db.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_users_membership_id ON users (membership_id) WHERE membership_id IS NOT NULL",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP INDEX IF EXISTS idx_users_membership_id")
            .await?;
        db.execute_unprepared("ALTER TABLE users DROP COLUMN IF EXISTS membership_id")
            .await?;
        db.execute_unprepared("ALTER TABLE users DROP COLUMN IF EXISTS membership_expiry")
            .await?;

        Ok(())
    }
}
