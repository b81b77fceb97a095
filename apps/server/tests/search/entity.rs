use crate::support::*;
use cds_server::db::search::params::{FilterCriteria, PageParams};
use cds_server::models::EntityKind;
use serde_json::json;

#[tokio::test]
async fn and_filter_requires_every_field() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, owned_solutions())?;

    let criteria = FilterCriteria::and()
        .with("active", true)
        .with("userId", "u1");
    let page = app
        .state
        .search
        .search(EntityKind::Solution, &criteria, &PageParams::default())
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["R1"]);
    assert_eq!(page.total_elements, 1);
    Ok(())
}

#[tokio::test]
async fn or_filter_accepts_any_field() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, owned_solutions())?;

    let criteria = FilterCriteria::or()
        .with("active", false)
        .with("userId", "u2");
    let page = app
        .state
        .search
        .search(EntityKind::Solution, &criteria, &PageParams::default())
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["R2", "R3"]);
    Ok(())
}

#[tokio::test]
async fn text_fields_match_case_insensitively() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::User, users())?;

    let criteria = FilterCriteria::and().with("firstName", "ALAN");
    let page = app
        .state
        .search
        .search(EntityKind::User, &criteria, &PageParams::default())
        .await?;

    assert_eq!(page_ids(&page, "userId"), vec!["u2"]);
    Ok(())
}

#[tokio::test]
async fn list_values_match_any_member() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Task, tasks())?;

    let criteria = FilterCriteria::and().with("statusCode", json!(["IP", "FA"]));
    let page = app
        .state
        .search
        .search(EntityKind::Task, &criteria, &PageParams::default())
        .await?;

    // Integer ids sort numerically.
    assert_eq!(page_ids(&page, "taskId"), vec!["1", "10"]);
    Ok(())
}

#[tokio::test]
async fn null_sentinel_in_list_matches_missing_values() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, portal_catalog())?;

    let criteria = FilterCriteria::and().with("modelTypeCode", json!(["CL", "null"]));
    let page = app
        .state
        .search
        .search(EntityKind::Solution, &criteria, &PageParams::default())
        .await?;
    assert_eq!(page_ids(&page, "solutionId"), vec!["P1", "P2"]);

    let only_null = FilterCriteria::and().with("modelTypeCode", json!(["null"]));
    let page = app
        .state
        .search
        .search(EntityKind::Solution, &only_null, &PageParams::default())
        .await?;
    assert_eq!(page_ids(&page, "solutionId"), vec!["P2"]);
    Ok(())
}

#[tokio::test]
async fn scalar_results_omit_child_collections() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, tagged_solutions())?;

    let criteria = FilterCriteria::and().with("solutionId", "S1");
    let page = app
        .state
        .search
        .search(EntityKind::Solution, &criteria, &PageParams::default())
        .await?;

    let record = &page.items[0];
    assert!(record.get("tags").is_none());
    assert!(record.get("revisions").is_none());
    assert_eq!(record.get("name"), Some(&json!("S1")));
    Ok(())
}

#[tokio::test]
async fn empty_criteria_are_rejected() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, owned_solutions())?;

    let err = app
        .state
        .search
        .search(
            EntityKind::Solution,
            &FilterCriteria::and(),
            &PageParams::default(),
        )
        .await
        .expect_err("empty filter must fail");
    assert!(err.is_client_error());
    assert!(err.to_string().contains("at least one search field required"));

    // Blank values count as absent.
    let blank = FilterCriteria::and().with("name", "  ");
    assert!(app
        .state
        .search
        .search(EntityKind::Solution, &blank, &PageParams::default())
        .await
        .is_err());
    Ok(())
}

#[tokio::test]
async fn unknown_field_lists_the_allowed_names() -> anyhow::Result<()> {
    let app = TestApp::new();

    let criteria = FilterCriteria::and().with("colour", "red");
    let err = app
        .state
        .search
        .search(EntityKind::Peer, &criteria, &PageParams::default())
        .await
        .expect_err("unknown field must fail");

    let message = err.to_string();
    assert!(message.contains("colour"));
    assert!(message.contains("subjectName"));
    Ok(())
}

#[tokio::test]
async fn malformed_values_are_client_errors() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, owned_solutions())?;

    let criteria = FilterCriteria::and().with("active", "maybe");
    let err = app
        .state
        .search
        .search(EntityKind::Solution, &criteria, &PageParams::default())
        .await
        .expect_err("non-boolean value must fail");
    assert!(err.is_client_error());
    assert!(err.to_string().contains("active"));
    Ok(())
}

#[tokio::test]
async fn concurrent_searches_share_one_engine() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, owned_solutions())?;

    let searches = ["u1", "u2", "u3"].map(|user| {
        let service = app.state.search.clone();
        async move {
            let criteria = FilterCriteria::and().with("userId", user);
            service
                .search(EntityKind::Solution, &criteria, &PageParams::default())
                .await
                .map(|page| page.total_elements)
        }
    });

    let totals = futures::future::try_join_all(searches).await?;
    assert_eq!(totals, vec![2, 1, 0]);
    Ok(())
}
