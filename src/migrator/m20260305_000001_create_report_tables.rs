use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Lost Reports Table
        manager
            .create_table(
                Table::create()
                    .table(LostReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LostReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LostReports::PetType).string().not_null())
                    .col(ColumnDef::new(LostReports::Breed).string().not_null())
                    .col(ColumnDef::new(LostReports::Color).string().not_null())
                    .col(ColumnDef::new(LostReports::Gender).string().not_null())
                    .col(ColumnDef::new(LostReports::Age).string())
                    .col(ColumnDef::new(LostReports::Features).text().not_null())
                    .col(ColumnDef::new(LostReports::LostTime).date_time().not_null())
                    .col(
                        ColumnDef::new(LostReports::LostLocationText)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LostReports::ContactInfo).string().not_null())
                    .col(ColumnDef::new(LostReports::Photos).json_binary().not_null())
                    .col(
                        ColumnDef::new(LostReports::IsFound)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(LostReports::FoundTime).date_time())
                    .col(ColumnDef::new(LostReports::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(LostReports::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        // Create Found Reports Table
        manager
            .create_table(
                Table::create()
                    .table(FoundReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoundReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FoundReports::PetType).string().not_null())
                    .col(ColumnDef::new(FoundReports::Breed).string())
                    .col(ColumnDef::new(FoundReports::Color).string().not_null())
                    .col(ColumnDef::new(FoundReports::Gender).string().not_null())
                    .col(ColumnDef::new(FoundReports::Features).text().not_null())
                    .col(
                        ColumnDef::new(FoundReports::FoundTime)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoundReports::FoundLocationText)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoundReports::ContactInfo)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoundReports::Photos)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoundReports::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoundReports::UpdatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoundReports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LostReports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LostReports {
    Table,
    Id,
    PetType,
    Breed,
    Color,
    Gender,
    Age,
    Features,
    LostTime,
    LostLocationText,
    ContactInfo,
    Photos,
    IsFound,
    FoundTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FoundReports {
    Table,
    Id,
    PetType,
    Breed,
    Color,
    Gender,
    Features,
    FoundTime,
    FoundLocationText,
    ContactInfo,
    Photos,
    CreatedAt,
    UpdatedAt,
}
