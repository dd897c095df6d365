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
                    .table(Tournament::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournament::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tournament::Name).string().not_null())
                    .col(ColumnDef::new(Tournament::TournamentType).string().not_null())
                    .col(
                        ColumnDef::new(Tournament::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournament::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournament::RegistrationDeadline)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournament::MaxParticipants)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tournament::Description).text().not_null())
                    .col(ColumnDef::new(Tournament::Rules).text().not_null())
                    .col(ColumnDef::new(Tournament::Prizes).text().not_null())
                    .col(ColumnDef::new(Tournament::Status).string().not_null())
                    .col(
                        ColumnDef::new(Tournament::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tournament::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentRegistration::Table)
                    .col(
                        ColumnDef::new(TournamentRegistration::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TournamentRegistration::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                TournamentRegistration::Table,
                                TournamentRegistration::TournamentId,
                            )
                            .to(Tournament::Table, Tournament::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(TournamentRegistration::TeamId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentRegistration::Table, TournamentRegistration::TeamId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(TournamentRegistration::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;
        unique_index!(
            "tournament_registration_tournament_team",
            TournamentRegistration,
            manager,
            TournamentId,
            TeamId
        );

        manager
            .create_table(
                Table::create()
                    .table(TournamentMatch::Table)
                    .col(
                        ColumnDef::new(TournamentMatch::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TournamentMatch::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentMatch::Table, TournamentMatch::TournamentId)
                            .to(Tournament::Table, Tournament::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(TournamentMatch::Round).integer().not_null())
                    .col(ColumnDef::new(TournamentMatch::TeamAId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentMatch::Table, TournamentMatch::TeamAId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(ColumnDef::new(TournamentMatch::TeamBId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TournamentMatch::Table, TournamentMatch::TeamBId)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .col(
                        ColumnDef::new(TournamentMatch::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(TournamentMatch, manager);
        drop_table!(TournamentRegistration, manager);
        drop_table!(Tournament, manager);
        Ok(())
    }
}
