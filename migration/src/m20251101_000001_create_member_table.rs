use sea_orm_migration::{prelude::*, schema::*};

static IDX_MEMBERS_END_DATE: &str = "idx_members_end_date";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(pk_auto(Members::Id))
                    .col(string(Members::Name))
                    .col(string(Members::Mobile))
                    .col(string(Members::Plan))
                    .col(string(Members::Package))
                    .col(string(Members::JoinedDate))
                    .col(string(Members::EndDate))
                    .to_owned(),
            )
            .await?;

        // Listing, dashboard counts and reminder selection all filter or sort on end_date
        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBERS_END_DATE)
                    .table(Members::Table)
                    .col(Members::EndDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEMBERS_END_DATE)
                    .table(Members::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Members {
    Table,
    Id,
    Name,
    Mobile,
    Plan,
    Package,
    JoinedDate,
    EndDate,
}
