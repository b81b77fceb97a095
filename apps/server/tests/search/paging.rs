use crate::support::*;
use cds_server::db::search::facets::KeywordTagSearch;
use cds_server::db::search::params::{FilterCriteria, PageParams, SortParam};
use cds_server::models::EntityKind;
use serde_json::json;

fn all_active() -> FilterCriteria {
    FilterCriteria::and().with("active", true)
}

fn paging(page: usize, size: usize) -> PageParams {
    PageParams {
        page: Some(page),
        size: Some(size),
        sort: Vec::new(),
    }
}

#[tokio::test]
async fn second_page_holds_the_third_and_fourth_records() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, numbered_solutions(5))?;

    let page = app
        .state
        .search
        .search(EntityKind::Solution, &all_active(), &paging(1, 2))
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["S03", "S04"]);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.page_number, 1);
    assert_eq!(page.page_size, 2);
    Ok(())
}

#[tokio::test]
async fn last_page_may_be_short() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, numbered_solutions(5))?;

    let page = app
        .state
        .search
        .search(EntityKind::Solution, &all_active(), &paging(2, 2))
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["S05"]);
    assert_eq!(page.total_pages(), 3);
    Ok(())
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_the_total() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, numbered_solutions(5))?;

    let page = app
        .state
        .search
        .search(EntityKind::Solution, &all_active(), &paging(7, 2))
        .await?;
    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 5);

    let search = KeywordTagSearch {
        active: Some(true),
        ..Default::default()
    };
    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &paging(7, 2))
        .await?;
    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 5);
    Ok(())
}

#[tokio::test]
async fn no_matches_is_an_empty_page() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, numbered_solutions(3))?;

    let criteria = FilterCriteria::and().with("name", "missing");
    let page = app
        .state
        .search
        .search(EntityKind::Solution, &criteria, &PageParams::default())
        .await?;

    assert!(page.items.is_empty());
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.page_size, 20);
    Ok(())
}

#[tokio::test]
async fn descending_sort_reverses_the_order() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, numbered_solutions(4))?;

    let params = PageParams {
        page: Some(0),
        size: Some(3),
        sort: vec![SortParam::desc("name")],
    };
    let page = app
        .state
        .search
        .search(EntityKind::Solution, &all_active(), &params)
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["S04", "S03", "S02"]);
    assert_eq!(page.sort, vec![SortParam::desc("name")]);
    Ok(())
}

#[tokio::test]
async fn text_sort_ignores_case_and_puts_nulls_last() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(
        EntityKind::User,
        vec![
            json!({ "userId": "a", "lastName": "beta", "active": true }),
            json!({ "userId": "b", "lastName": "Alpha", "active": true }),
            json!({ "userId": "c", "active": true }),
            json!({ "userId": "d", "lastName": "alpha", "active": true }),
        ],
    )?;

    let criteria = FilterCriteria::and().with("active", true);
    for sort in [SortParam::asc("lastName"), SortParam::desc("lastName")] {
        let ascending = sort.is_ascending();
        let params = PageParams {
            sort: vec![sort],
            ..Default::default()
        };
        let page = app
            .state
            .search
            .search(EntityKind::User, &criteria, &params)
            .await?;
        let ids = page_ids(&page, "userId");
        if ascending {
            // Equal keys fall back to the id.
            assert_eq!(ids, vec!["b", "d", "a", "c"]);
        } else {
            assert_eq!(ids, vec!["a", "b", "d", "c"]);
        }
    }
    Ok(())
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new();
    let params = PageParams {
        sort: vec![SortParam::asc("popularity")],
        ..Default::default()
    };
    let err = app
        .state
        .search
        .search(EntityKind::Solution, &all_active(), &params)
        .await
        .expect_err("unknown sort field must fail");
    assert!(err.to_string().contains("popularity"));
    Ok(())
}

#[tokio::test]
async fn page_size_limits_are_enforced() -> anyhow::Result<()> {
    let app = TestApp::new_with_config(|config| {
        config.search.default_page_size = 5;
        config.search.max_page_size = 10;
    });
    app.seed(EntityKind::Solution, numbered_solutions(3))?;

    for size in [0, 11] {
        let err = app
            .state
            .search
            .search(EntityKind::Solution, &all_active(), &paging(0, size))
            .await
            .expect_err("size outside limits must fail");
        assert!(err.is_client_error());
    }

    let page = app
        .state
        .search
        .search(EntityKind::Solution, &all_active(), &paging(0, 10))
        .await?;
    assert_eq!(page.items.len(), 3);
    Ok(())
}

#[tokio::test]
async fn graph_pages_coalesce_join_duplicates() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, portal_catalog())?;

    // P1 and P2 each carry both tags, so a join yields two rows apiece.
    let search = KeywordTagSearch {
        any_tags: vec!["ml".into(), "nlp".into(), "vision".into()],
        ..Default::default()
    };

    let first = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &paging(0, 2))
        .await?;
    let second = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &paging(1, 2))
        .await?;

    assert_eq!(first.total_elements, 3);
    assert_eq!(page_ids(&first, "solutionId"), vec!["P1", "P2"]);
    assert_eq!(page_ids(&second, "solutionId"), vec!["P3"]);
    Ok(())
}

#[tokio::test]
async fn graph_pages_carry_nested_collections() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(EntityKind::Solution, portal_catalog())?;

    let search = KeywordTagSearch {
        keywords: vec!["summarizer".into()],
        ..Default::default()
    };
    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &PageParams::default())
        .await?;

    assert_eq!(page.items.len(), 1);
    let graph = &page.items[0];
    assert_eq!(graph.get("tags"), Some(&json!(["nlp", "ml"])));
    let revisions = graph
        .get("revisions")
        .and_then(|r| r.as_array())
        .expect("revisions loaded");
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0]["descriptions"][0]["catalogId"], "cat-b");
    Ok(())
}

#[tokio::test]
async fn graph_pages_sort_offsetless_timestamps() -> anyhow::Result<()> {
    let app = TestApp::new();
    app.seed(
        EntityKind::Solution,
        vec![
            SolutionBuilder::new("A").modified("2024-01-03T00:00:00").build(),
            SolutionBuilder::new("B").modified("2024-01-01T00:00:00").build(),
            SolutionBuilder::new("C").modified("2024-01-02T08:30:00.125").build(),
        ],
    )?;

    let search = KeywordTagSearch {
        active: Some(true),
        ..Default::default()
    };
    let params = PageParams {
        sort: vec![SortParam::asc("modified")],
        ..Default::default()
    };
    let page = app
        .state
        .search
        .find_solutions_by_keywords_and_tags(&search, &params)
        .await?;

    assert_eq!(page_ids(&page, "solutionId"), vec!["B", "C", "A"]);
    Ok(())
}
