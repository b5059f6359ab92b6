use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Map pins arrived after launch; both coordinates stay independently
// optional so old rows remain valid.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One column per statement — SQLite rejects combined alters.
        manager
            .alter_table(
                Table::alter()
                    .table(LostReports::Table)
                    .add_column(ColumnDef::new(LostReports::Latitude).double())
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(LostReports::Table)
                    .add_column(ColumnDef::new(LostReports::Longitude).double())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(FoundReports::Table)
                    .add_column(ColumnDef::new(FoundReports::Latitude).double())
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(FoundReports::Table)
                    .add_column(ColumnDef::new(FoundReports::Longitude).double())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(FoundReports::Table)
                    .drop_column(FoundReports::Latitude)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(FoundReports::Table)
                    .drop_column(FoundReports::Longitude)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(LostReports::Table)
                    .drop_column(LostReports::Latitude)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(LostReports::Table)
                    .drop_column(LostReports::Longitude)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum LostReports {
    Table,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum FoundReports {
    Table,
    Latitude,
    Longitude,
}
