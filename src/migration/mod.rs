use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_trainers_table;
mod m20250301_000003_create_classes_table;
mod m20250301_000004_create_memberships_table;
mod m20250301_000005_create_contacts_table;
mod m20250301_000006_create_class_enrollments_table;
mod m20250301_000007_add_membership_columns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_trainers_table::Migration),
            Box::new(m20250301_000003_create_classes_table::Migration),
            Box::new(m20250301_000004_create_memberships_table::Migration),
            Box::new(m20250301_000005_create_contacts_table::Migration),
            Box::new(m20250301_000006_create_class_enrollments_table::Migration),
            Box::new(m20250301_000007_add_membership_columns::Migration),
        ]
    }
}
