#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_weavers_table::Migration),
            Box::new(m20240101_000003_create_looms_table::Migration),
            Box::new(m20240101_000004_create_loom_config_tables::Migration),
            Box::new(m20240101_000005_create_saree_entries_table::Migration),
            Box::new(m20240101_000006_create_payments_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Users::Username)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Users::Email)
                                .string_len(200)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::Role).string_len(50).not_null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Users {
        Table,
        Id,
        Username,
        Email,
        Role,
        CreatedAt,
    }
}

mod m20240101_000002_create_weavers_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_users_table::Users;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_weavers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Weavers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Weavers::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Weavers::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Weavers::Phone).string_len(15).not_null())
                        .col(ColumnDef::new(Weavers::AccountNumber).string_len(30))
                        .col(ColumnDef::new(Weavers::IfscCode).string_len(20))
                        .col(ColumnDef::new(Weavers::AccountType).string_len(20))
                        .col(ColumnDef::new(Weavers::NameInBank).string_len(100))
                        .col(ColumnDef::new(Weavers::AadhaarDocument).string_len(200))
                        .col(ColumnDef::new(Weavers::Address).text())
                        .col(ColumnDef::new(Weavers::Skills).text())
                        .col(
                            ColumnDef::new(Weavers::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Weavers::TotalCredit)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Weavers::UserId).integer().not_null())
                        .col(
                            ColumnDef::new(Weavers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Weavers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-weavers-user_id")
                                .from(Weavers::Table, Weavers::UserId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx-weavers-user_id")
                        .table(Weavers::Table)
                        .col(Weavers::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Weavers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Weavers {
        Table,
        Id,
        Name,
        Phone,
        AccountNumber,
        IfscCode,
        AccountType,
        NameInBank,
        AadhaarDocument,
        Address,
        Skills,
        IsActive,
        TotalCredit,
        UserId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_looms_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_users_table::Users;
    use super::m20240101_000002_create_weavers_table::Weavers;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_looms_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Looms::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Looms::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Looms::LoomNo).integer().not_null())
                        .col(ColumnDef::new(Looms::Date).date())
                        .col(ColumnDef::new(Looms::LoomType).string_len(50).not_null())
                        .col(
                            ColumnDef::new(Looms::NumSarees)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Looms::SareeType).string_len(50))
                        .col(ColumnDef::new(Looms::SareeName).string_len(100))
                        .col(ColumnDef::new(Looms::WeaverName).string_len(100))
                        .col(ColumnDef::new(Looms::WeaverId).integer())
                        .col(
                            ColumnDef::new(Looms::AmountCredit)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Looms::AmountDebit)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Looms::UserId).integer().not_null())
                        .col(
                            ColumnDef::new(Looms::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Looms::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-looms-weaver_id")
                                .from(Looms::Table, Looms::WeaverId)
                                .to(Weavers::Table, Weavers::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-looms-user_id")
                                .from(Looms::Table, Looms::UserId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx-looms-user_id")
                        .table(Looms::Table)
                        .col(Looms::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx-looms-loom_type")
                        .table(Looms::Table)
                        .col(Looms::LoomType)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Looms::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Looms {
        Table,
        Id,
        LoomNo,
        Date,
        LoomType,
        NumSarees,
        SareeType,
        SareeName,
        WeaverName,
        WeaverId,
        AmountCredit,
        AmountDebit,
        UserId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000004_create_loom_config_tables {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000003_create_looms_table::Looms;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_loom_config_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warps::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warps::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Warps::LoomId).integer().not_null())
                        .col(ColumnDef::new(Warps::ZariBorderLeft).string_len(100))
                        .col(ColumnDef::new(Warps::ZariBorderRight).string_len(100))
                        .col(ColumnDef::new(Warps::ZariBody).string_len(100))
                        .col(ColumnDef::new(Warps::SilkBorderLeft).string_len(100))
                        .col(ColumnDef::new(Warps::SilkBorderRight).string_len(100))
                        .col(ColumnDef::new(Warps::SilkBody).string_len(100))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-warps-loom_id")
                                .from(Warps::Table, Warps::LoomId)
                                .to(Looms::Table, Looms::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Wefts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Wefts::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Wefts::LoomId).integer().not_null())
                        .col(ColumnDef::new(Wefts::Date).date())
                        .col(ColumnDef::new(Wefts::Zari).string_len(100))
                        .col(ColumnDef::new(Wefts::Silk).string_len(100))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-wefts-loom_id")
                                .from(Wefts::Table, Wefts::LoomId)
                                .to(Looms::Table, Looms::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WarpColors::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WarpColors::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(WarpColors::LoomId).integer().not_null())
                        .col(ColumnDef::new(WarpColors::BorderColor).string_len(100))
                        .col(ColumnDef::new(WarpColors::BodyColor).string_len(100))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-warp_colors-loom_id")
                                .from(WarpColors::Table, WarpColors::LoomId)
                                .to(Looms::Table, Looms::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WeftColors::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WeftColors::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(WeftColors::LoomId).integer().not_null())
                        .col(ColumnDef::new(WeftColors::BorderColor).string_len(100))
                        .col(ColumnDef::new(WeftColors::BodyColor).string_len(100))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-weft_colors-loom_id")
                                .from(WeftColors::Table, WeftColors::LoomId)
                                .to(Looms::Table, Looms::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WeftColors::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(WarpColors::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Wefts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Warps::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Warps {
        Table,
        Id,
        LoomId,
        ZariBorderLeft,
        ZariBorderRight,
        ZariBody,
        SilkBorderLeft,
        SilkBorderRight,
        SilkBody,
    }

    #[derive(DeriveIden)]
    pub enum Wefts {
        Table,
        Id,
        LoomId,
        Date,
        Zari,
        Silk,
    }

    #[derive(DeriveIden)]
    pub enum WarpColors {
        Table,
        Id,
        LoomId,
        BorderColor,
        BodyColor,
    }

    #[derive(DeriveIden)]
    pub enum WeftColors {
        Table,
        Id,
        LoomId,
        BorderColor,
        BodyColor,
    }
}

mod m20240101_000005_create_saree_entries_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000003_create_looms_table::Looms;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_saree_entries_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SareeEntries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SareeEntries::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(SareeEntries::SareeNumber).integer())
                        .col(ColumnDef::new(SareeEntries::SareeName).string_len(100))
                        .col(ColumnDef::new(SareeEntries::SareeImage).string_len(200))
                        .col(ColumnDef::new(SareeEntries::Colors).string_len(200))
                        .col(ColumnDef::new(SareeEntries::WarpWeft).string_len(100))
                        .col(ColumnDef::new(SareeEntries::Material).string_len(100))
                        .col(ColumnDef::new(SareeEntries::Remarks).text())
                        .col(ColumnDef::new(SareeEntries::BorderColor).string_len(100))
                        .col(ColumnDef::new(SareeEntries::BorderHex).string_len(10))
                        .col(ColumnDef::new(SareeEntries::BodyColor).string_len(100))
                        .col(ColumnDef::new(SareeEntries::BodyHex).string_len(10))
                        .col(ColumnDef::new(SareeEntries::MeenaA).string_len(100))
                        .col(ColumnDef::new(SareeEntries::MeenaAHex).string_len(10))
                        .col(ColumnDef::new(SareeEntries::MeenaB).string_len(100))
                        .col(ColumnDef::new(SareeEntries::MeenaBHex).string_len(10))
                        .col(ColumnDef::new(SareeEntries::MeenaC).string_len(100))
                        .col(ColumnDef::new(SareeEntries::MeenaCHex).string_len(10))
                        .col(ColumnDef::new(SareeEntries::MeenaD).string_len(100))
                        .col(ColumnDef::new(SareeEntries::MeenaDHex).string_len(10))
                        .col(
                            ColumnDef::new(SareeEntries::AmountCredit)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(SareeEntries::AmountDebit)
                                .decimal_len(10, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(SareeEntries::Date).date())
                        .col(ColumnDef::new(SareeEntries::CompletionDate).date())
                        .col(
                            ColumnDef::new(SareeEntries::IsCompleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(SareeEntries::Notes).text())
                        .col(ColumnDef::new(SareeEntries::QualityRating).integer())
                        .col(ColumnDef::new(SareeEntries::LoomId).integer().not_null())
                        .col(
                            ColumnDef::new(SareeEntries::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SareeEntries::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-saree_entries-loom_id")
                                .from(SareeEntries::Table, SareeEntries::LoomId)
                                .to(Looms::Table, Looms::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx-saree_entries-loom_id")
                        .table(SareeEntries::Table)
                        .col(SareeEntries::LoomId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SareeEntries::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum SareeEntries {
        Table,
        Id,
        SareeNumber,
        SareeName,
        SareeImage,
        Colors,
        WarpWeft,
        Material,
        Remarks,
        BorderColor,
        BorderHex,
        BodyColor,
        BodyHex,
        MeenaA,
        MeenaAHex,
        MeenaB,
        MeenaBHex,
        MeenaC,
        MeenaCHex,
        MeenaD,
        MeenaDHex,
        AmountCredit,
        AmountDebit,
        Date,
        CompletionDate,
        IsCompleted,
        Notes,
        QualityRating,
        LoomId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000006_create_payments_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000002_create_weavers_table::Weavers;
    use super::m20240101_000003_create_looms_table::Looms;
    use super::m20240101_000005_create_saree_entries_table::SareeEntries;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_payments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Payments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Payments::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Payments::Date).date().not_null())
                        .col(
                            ColumnDef::new(Payments::Amount)
                                .decimal_len(10, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Payments::PaymentType)
                                .string_len(10)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Payments::Description).text())
                        .col(ColumnDef::new(Payments::LoomId).integer())
                        .col(ColumnDef::new(Payments::SareeId).integer())
                        .col(ColumnDef::new(Payments::WeaverId).integer())
                        .col(ColumnDef::new(Payments::NameInBank).string_len(100))
                        .col(ColumnDef::new(Payments::AccountNumber).string_len(50))
                        .col(ColumnDef::new(Payments::IfscCode).string_len(50))
                        .col(ColumnDef::new(Payments::AccountType).string_len(50))
                        .col(
                            ColumnDef::new(Payments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-payments-loom_id")
                                .from(Payments::Table, Payments::LoomId)
                                .to(Looms::Table, Looms::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-payments-saree_id")
                                .from(Payments::Table, Payments::SareeId)
                                .to(SareeEntries::Table, SareeEntries::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-payments-weaver_id")
                                .from(Payments::Table, Payments::WeaverId)
                                .to(Weavers::Table, Weavers::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx-payments-date")
                        .table(Payments::Table)
                        .col(Payments::Date)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx-payments-loom_id")
                        .table(Payments::Table)
                        .col(Payments::LoomId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Payments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Payments {
        Table,
        Id,
        Date,
        Amount,
        PaymentType,
        Description,
        LoomId,
        SareeId,
        WeaverId,
        NameInBank,
        AccountNumber,
        IfscCode,
        AccountType,
        CreatedAt,
    }
}
