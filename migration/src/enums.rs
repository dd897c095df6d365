use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum User {
    Table,
    Id,
    Name,
    Email,
    Admin,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum UserAuthentication {
    Table,
    UserId,
    HashedPassword,
}

#[derive(DeriveIden)]
pub(crate) enum UserCookies {
    Table,
    Cookie,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Team {
    Table,
    Id,
    Name,
    NameKey,
    Tag,
    TagKey,
    Description,
    LogoUrl,
    CaptainId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum TeamMember {
    Table,
    Id,
    TeamId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(DeriveIden)]
pub(crate) enum TeamInvite {
    Table,
    Id,
    TeamId,
    UserId,
    Email,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Tournament {
    Table,
    Id,
    Name,
    TournamentType,
    StartDate,
    EndDate,
    RegistrationDeadline,
    MaxParticipants,
    Description,
    Rules,
    Prizes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum TournamentRegistration {
    Table,
    Id,
    TournamentId,
    TeamId,
    RegisteredAt,
}

#[derive(DeriveIden)]
pub(crate) enum TournamentMatch {
    Table,
    Id,
    TournamentId,
    Round,
    #[sea_orm(iden = "team_a_id")]
    TeamAId,
    #[sea_orm(iden = "team_b_id")]
    TeamBId,
    ScheduledAt,
}

#[derive(DeriveIden)]
pub(crate) enum Contact {
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    Status,
    CreatedAt,
}
