use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Projects {
    Table,
    Status,
    ClientId,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Proposals {
    Table,
    ProjectId,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    ProjectId,
    SenderId,
    RecipientId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    RecipientId,
}

const INDEXES: [&str; 8] = [
    "idx_projects_status",
    "idx_projects_client_id",
    "idx_projects_freelancer_id",
    "idx_proposals_project_freelancer_unique",
    "idx_payments_project_id",
    "idx_payments_sender_id",
    "idx_payments_recipient_id",
    "idx_reviews_recipient_id",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Catalog listings only show CREATED projects.
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_status")
                    .table(Projects::Table)
                    .col(Projects::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_client_id")
                    .table(Projects::Table)
                    .col(Projects::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_freelancer_id")
                    .table(Projects::Table)
                    .col(Projects::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // One proposal per (project, freelancer).
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_project_freelancer_unique")
                    .table(Proposals::Table)
                    .col(Proposals::ProjectId)
                    .col(Proposals::FreelancerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_project_id")
                    .table(Payments::Table)
                    .col(Payments::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_sender_id")
                    .table(Payments::Table)
                    .col(Payments::SenderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_recipient_id")
                    .table(Payments::Table)
                    .col(Payments::RecipientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_recipient_id")
                    .table(Reviews::Table)
                    .col(Reviews::RecipientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in INDEXES {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
