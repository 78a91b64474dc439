use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;
use uuid::Uuid;

use crate::models::projects::{self, CreateProject, ProjectSort, ProjectStatus};

/// Insert a new project in the `CREATED` state.
pub async fn insert_project<C: ConnectionTrait>(
    db: &C,
    input: CreateProject,
    client_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        price: Set(input.price),
        status: Set(ProjectStatus::Created),
        category_id: Set(Some(input.category_id)),
        client_id: Set(client_id),
        freelancer_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_project.insert(db).await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Fetch a project with a row lock held until the surrounding transaction ends.
pub async fn lock_project<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await
}

/// Persist a modified project. Every write refreshes `updated_at`, which the
/// refund cooldown is measured from.
pub async fn save_project<C: ConnectionTrait>(
    db: &C,
    mut active: projects::ActiveModel,
) -> Result<projects::Model, DbErr> {
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await
}

pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    project: projects::Model,
    status: ProjectStatus,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = project.into();
    active.status = Set(status);
    save_project(db, active).await
}

/// Move a `CREATED` project into work with the given freelancer.
pub async fn assign_freelancer<C: ConnectionTrait>(
    db: &C,
    project: projects::Model,
    status: ProjectStatus,
    freelancer_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = project.into();
    active.status = Set(status);
    active.freelancer_id = Set(Some(freelancer_id));
    save_project(db, active).await
}

pub async fn delete_project<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}

/// Run `query` for one page and count all rows it matches.
async fn paginate<C: ConnectionTrait>(
    db: &C,
    query: Select<projects::Entity>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<projects::Model>, u64), DbErr> {
    let total = query.clone().count(db).await?;
    let rows = query.limit(limit).offset(offset).all(db).await?;
    Ok((rows, total))
}

/// Open projects (`CREATED`), newest first.
pub async fn get_open_projects<C: ConnectionTrait>(
    db: &C,
    limit: u64,
    offset: u64,
) -> Result<(Vec<projects::Model>, u64), DbErr> {
    let query = projects::Entity::find()
        .filter(projects::Column::Status.eq(ProjectStatus::Created))
        .order_by_desc(projects::Column::CreatedAt);
    paginate(db, query, limit, offset).await
}

/// Open projects whose title contains `title`, ignoring case.
pub async fn search_open_projects<C: ConnectionTrait>(
    db: &C,
    title: &str,
    limit: u64,
    offset: u64,
) -> Result<(Vec<projects::Model>, u64), DbErr> {
    let pattern = format!("%{}%", title.to_lowercase());
    let query = projects::Entity::find()
        .filter(projects::Column::Status.eq(ProjectStatus::Created))
        .filter(
            Expr::expr(Func::lower(Expr::col((
                projects::Entity,
                projects::Column::Title,
            ))))
            .like(pattern),
        )
        .order_by_desc(projects::Column::CreatedAt);
    paginate(db, query, limit, offset).await
}

/// Projects in any of `category_ids` (all projects when empty), in the requested order.
pub async fn filter_projects<C: ConnectionTrait>(
    db: &C,
    category_ids: Vec<Uuid>,
    sort: ProjectSort,
    limit: u64,
    offset: u64,
) -> Result<(Vec<projects::Model>, u64), DbErr> {
    let mut query = projects::Entity::find();
    if !category_ids.is_empty() {
        query = query.filter(projects::Column::CategoryId.is_in(category_ids));
    }
    let query = match sort {
        ProjectSort::Newest => query.order_by_desc(projects::Column::CreatedAt),
        ProjectSort::Oldest => query.order_by_asc(projects::Column::CreatedAt),
        ProjectSort::Cheapest => query
            .order_by_asc(projects::Column::Price)
            .order_by_desc(projects::Column::CreatedAt),
        ProjectSort::MostExpensive => query
            .order_by_desc(projects::Column::Price)
            .order_by_desc(projects::Column::CreatedAt),
        ProjectSort::Random => query.order_by(Expr::cust("RANDOM()"), Order::Asc),
    };
    paginate(db, query, limit, offset).await
}

/// Projects the user takes part in, as client or as assigned freelancer.
pub async fn get_projects_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(
            Condition::any()
                .add(projects::Column::ClientId.eq(user_id))
                .add(projects::Column::FreelancerId.eq(user_id)),
        )
        .order_by_desc(projects::Column::UpdatedAt)
        .all(db)
        .await
}

/// Apply the editable fields of an update to a `CREATED` project.
pub async fn update_project_fields<C: ConnectionTrait>(
    db: &C,
    project: projects::Model,
    title: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    category_id: Option<Uuid>,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(description) = description {
        active.description = Set(description);
    }
    if let Some(price) = price {
        active.price = Set(price);
    }
    if let Some(category_id) = category_id {
        active.category_id = Set(Some(category_id));
    }

    save_project(db, active).await
}
