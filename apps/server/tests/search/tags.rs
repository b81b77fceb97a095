use crate::support::*;
use cds_server::db::search::facets::KeywordTagSearch;
use cds_server::db::search::params::PageParams;
use cds_server::models::EntityKind;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

async fn tagged_app() -> anyhow::Result<TestApp> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, tagged_solutions())?;
    Ok(app)
}

#[tokio::test]
async fn all_tags_requires_every_tag() -> anyhow::Result<()> {
    let app = tagged_app().await?;
    let search = KeywordTagSearch {
        all_tags: strings(&["ml", "nlp"]),
        ..Default::default()
    };

    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &PageParams::default())
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["S1"]);
    Ok(())
}

#[tokio::test]
async fn any_tags_requires_one_tag() -> anyhow::Result<()> {
    let app = tagged_app().await?;

    let ml = KeywordTagSearch {
        any_tags: strings(&["ml"]),
        ..Default::default()
    };
    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&ml, &PageParams::default())
        .await?;
    assert_eq!(page_ids(&page, "solutionId"), vec!["S1"]);

    let nlp = KeywordTagSearch {
        any_tags: strings(&["nlp"]),
        ..Default::default()
    };
    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&nlp, &PageParams::default())
        .await?;
    assert_eq!(page_ids(&page, "solutionId"), vec!["S1", "S2"]);
    Ok(())
}

#[tokio::test]
async fn any_tags_does_not_duplicate_multi_tag_matches() -> anyhow::Result<()> {
    let app = tagged_app().await?;
    let search = KeywordTagSearch {
        any_tags: strings(&["ml", "nlp"]),
        ..Default::default()
    };

    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &PageParams::default())
        .await?;

    assert_eq!(page.total_elements, 2);
    assert_eq!(page_ids(&page, "solutionId"), vec!["S1", "S2"]);
    Ok(())
}

#[tokio::test]
async fn repeated_tags_count_once() -> anyhow::Result<()> {
    let app = tagged_app().await?;
    let search = KeywordTagSearch {
        all_tags: strings(&["nlp", "nlp"]),
        ..Default::default()
    };

    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &PageParams::default())
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["S1", "S2"]);
    Ok(())
}

#[tokio::test]
async fn search_by_tag_returns_scalar_records() -> anyhow::Result<()> {
    let app = tagged_app().await?;

    let page = app
        .state
        .search
        .search_by_tag("nlp", &PageParams::default())
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["S1", "S2"]);
    assert!(page.items.iter().all(|r| r.get("tags").is_none()));
    Ok(())
}

#[tokio::test]
async fn blank_tag_is_rejected() -> anyhow::Result<()> {
    let app = tagged_app().await?;
    let err = app
        .state
        .search
        .search_by_tag(" ", &PageParams::default())
        .await
        .expect_err("blank tag must fail");
    assert!(err.is_client_error());
    Ok(())
}

#[tokio::test]
async fn unknown_tag_yields_an_empty_page() -> anyhow::Result<()> {
    let app = tagged_app().await?;
    let page = app
        .state
        .search
        .search_by_tag("quantum", &PageParams::default())
        .await?;
    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 0);
    Ok(())
}
