//! Project catalog: listing, search, filter and owner-only edits.
//!
//! Run with: `cargo test --test catalog_test`
mod common;

use rust_decimal_macros::dec;
use uuid::Uuid;

use freelance_backend::ServiceError;
use freelance_backend::models::PaginationQuery;
use freelance_backend::models::projects::{
    CreateProject, FilterQuery, ProjectSort, ProjectStatus, SearchQuery, UpdateProject,
};
use freelance_backend::models::proposals::CreateProposal;
use freelance_backend::services::{projects, proposals};

use crate::common::*;

#[tokio::test]
async fn test_find_all_lists_open_projects_with_totals() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;
    let freelancer = create_freelancer(&db, "freelancer").await;
    let web = create_category(&db, "Web").await;

    for i in 0..3 {
        create_project(&db, &client, web.id, &format!("Open project {i}"), dec!(10.00)).await;
    }
    let taken = create_project(&db, &client, web.id, "Taken project", dec!(10.00)).await;
    let (proposal, _) = proposals::submit(
        &db,
        &freelancer,
        CreateProposal {
            message: "Happy to help with this one".into(),
            project_id: taken.id,
        },
    )
    .await
    .unwrap();
    fund(&db, &client, dec!(10.00)).await;
    proposals::accept(&db, &client, proposal.id).await.unwrap();

    let page = projects::find_all(
        &db,
        PaginationQuery {
            limit: Some(2),
            offset: Some(0),
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.limit, 2);
    assert!(page.data.iter().all(|p| p.status == ProjectStatus::Created));

    let rest = projects::find_all(
        &db,
        PaginationQuery {
            limit: Some(2),
            offset: Some(2),
        },
    )
    .await
    .unwrap();
    assert_eq!(rest.data.len(), 1);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;
    let web = create_category(&db, "Web").await;
    create_project(&db, &client, web.id, "Shopify Store", dec!(300.00)).await;
    create_project(&db, &client, web.id, "Mobile app", dec!(900.00)).await;

    let page = projects::search(
        &db,
        SearchQuery {
            title: Some("SHOP".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].title, "Shopify Store");

    let everything = projects::search(&db, SearchQuery::default()).await.unwrap();
    assert_eq!(everything.total, 2);
}

#[tokio::test]
async fn test_filter_by_category_and_price() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;
    let web = create_category(&db, "Web").await;
    let design = create_category(&db, "Design").await;
    let writing = create_category(&db, "Writing").await;
    create_project(&db, &client, web.id, "Website", dec!(500.00)).await;
    create_project(&db, &client, design.id, "Logo", dec!(50.00)).await;
    create_project(&db, &client, design.id, "Brand book", dec!(250.00)).await;
    create_project(&db, &client, writing.id, "Blog posts", dec!(75.00)).await;

    let page = projects::filter(
        &db,
        FilterQuery {
            categories: Some(format!("{},{}", web.id, design.id)),
            sort_by: Some(ProjectSort::Cheapest),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let prices: Vec<_> = page.data.iter().map(|p| p.price).collect();
    assert_eq!(page.total, 3);
    assert_eq!(prices, vec![dec!(50), dec!(250), dec!(500)]);

    let page = projects::filter(
        &db,
        FilterQuery {
            sort_by: Some(ProjectSort::MostExpensive),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.data[0].price, dec!(500));

    let random = projects::filter(
        &db,
        FilterQuery {
            sort_by: Some(ProjectSort::Random),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(random.data.len(), 4);
}

#[tokio::test]
async fn test_filter_rejects_malformed_category_ids() {
    let db = setup_test_db().await.unwrap();
    let result = projects::filter(
        &db,
        FilterQuery {
            categories: Some("web".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::BadRequest(_))));
}

#[tokio::test]
async fn test_create_requires_existing_category() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;

    let result = projects::create(
        &db,
        &client,
        CreateProject {
            title: "Landing page".into(),
            description: "A single page for our launch".into(),
            price: dec!(100.00),
            category_id: Uuid::new_v4(),
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_freelancers_cannot_create_projects() {
    let db = setup_test_db().await.unwrap();
    let freelancer = create_freelancer(&db, "freelancer").await;
    let web = create_category(&db, "Web").await;

    let result = projects::create(
        &db,
        &freelancer,
        CreateProject {
            title: "Landing page".into(),
            description: "A single page for our launch".into(),
            price: dec!(100.00),
            category_id: web.id,
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));
}

#[tokio::test]
async fn test_owner_updates_and_deletes_open_project() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;
    let other = create_client(&db, "other").await;
    let web = create_category(&db, "Web").await;
    let project = create_project(&db, &client, web.id, "Landing page", dec!(100.00)).await;

    let change = UpdateProject {
        price: Some(dec!(150.00)),
        ..Default::default()
    };
    let result = projects::update(&db, &other, project.id, change.clone()).await;
    assert!(matches!(result, Err(ServiceError::Forbidden(_))));

    let updated = projects::update(&db, &client, project.id, change).await.unwrap();
    assert_eq!(updated.price, dec!(150));
    assert_eq!(updated.title, "Landing page");
    assert!(updated.updated_at >= project.updated_at);

    projects::delete(&db, &client, project.id).await.unwrap();
    let result = projects::find(&db, project.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_price_is_frozen_once_work_starts() {
    let db = setup_test_db().await.unwrap();
    let client = create_client(&db, "client").await;
    let freelancer = create_freelancer(&db, "freelancer").await;
    let web = create_category(&db, "Web").await;
    let project = create_project(&db, &client, web.id, "Landing page", dec!(100.00)).await;
    let (proposal, _) = proposals::submit(
        &db,
        &freelancer,
        CreateProposal {
            message: "I can start tomorrow morning".into(),
            project_id: project.id,
        },
    )
    .await
    .unwrap();
    fund(&db, &client, dec!(100.00)).await;
    proposals::accept(&db, &client, proposal.id).await.unwrap();

    let result = projects::update(
        &db,
        &client,
        project.id,
        UpdateProject {
            price: Some(dec!(1.00)),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));

    let result = projects::delete(&db, &client, project.id).await;
    assert!(matches!(result, Err(ServiceError::InvalidState(_))));

    let by_freelancer = projects::find_by_user(&db, freelancer.id).await.unwrap();
    assert_eq!(by_freelancer.len(), 1);
    let by_client = projects::find_by_user(&db, client.id).await.unwrap();
    assert_eq!(by_client.len(), 1);
}
