use crate::enums::*;
use crate::macros::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Team::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Team::Name).string().not_null())
                    // Lower-cased name and tag, unique ignoring case.
                    .col(ColumnDef::new(Team::NameKey).string().unique_key().not_null())
                    .col(ColumnDef::new(Team::Tag).string().not_null())
                    .col(ColumnDef::new(Team::TagKey).string().unique_key().not_null())
                    .col(ColumnDef::new(Team::Description).text().not_null())
                    .col(ColumnDef::new(Team::LogoUrl).string())
                    .col(ColumnDef::new(Team::CaptainId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Team::Table, Team::CaptainId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(Team::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Team::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeamMember::Table)
                    .col(
                        ColumnDef::new(TeamMember::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamMember::TeamId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMember::Table, TeamMember::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(TeamMember::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMember::Table, TeamMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(TeamMember::Role).string().not_null())
                    .col(
                        ColumnDef::new(TeamMember::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;
        unique_index!("team_member_team_user", TeamMember, manager, TeamId, UserId);

        manager
            .create_table(
                Table::create()
                    .table(TeamInvite::Table)
                    .col(
                        ColumnDef::new(TeamInvite::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamInvite::TeamId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamInvite::Table, TeamInvite::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(TeamInvite::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamInvite::Table, TeamInvite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(TeamInvite::Email).string().not_null())
                    .col(ColumnDef::new(TeamInvite::Status).string().not_null())
                    .col(
                        ColumnDef::new(TeamInvite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(TeamInvite, manager);
        drop_table!(TeamMember, manager);
        drop_table!(Team, manager);
        Ok(())
    }
}
