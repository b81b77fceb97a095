use super::builders::{task, user, RevisionBuilder, SolutionBuilder};
use serde_json::Value;

/// Three solutions with overlapping tag sets.
pub fn tagged_solutions() -> Vec<Value> {
    vec![
        SolutionBuilder::new("S1").tags(&["ml", "nlp"]).build(),
        SolutionBuilder::new("S2").tags(&["nlp"]).build(),
        SolutionBuilder::new("S3").build(),
    ]
}

/// Solutions varying on `active` and `userId`.
pub fn owned_solutions() -> Vec<Value> {
    vec![
        SolutionBuilder::new("R1").active(true).user("u1").build(),
        SolutionBuilder::new("R2").active(true).user("u2").build(),
        SolutionBuilder::new("R3").active(false).user("u1").build(),
    ]
}

/// `count` solutions named `sol-01`.. with ids `S01`..
pub fn numbered_solutions(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            SolutionBuilder::new(format!("S{i:02}"))
                .name(&format!("sol-{i:02}"))
                .build()
        })
        .collect()
}

/// A small catalog with revisions, descriptions, tags and catalogs.
pub fn portal_catalog() -> Vec<Value> {
    vec![
        SolutionBuilder::new("P1")
            .name("Image Classifier")
            .user("u1")
            .model_type(Some("CL"))
            .modified("2024-01-01T00:00:00Z")
            .tags(&["vision", "ml"])
            .catalogs(&["cat-a"])
            .revision(
                RevisionBuilder::new("P1-r1")
                    .authors("Ada Lovelace")
                    .publisher("Acme")
                    .access("PB")
                    .modified("2024-01-01T00:00:00Z")
                    .description("cat-a", "Detects cats in photos")
                    .description("cat-b", "Finds felines"),
            )
            .revision(
                RevisionBuilder::new("P1-r2")
                    .authors("Alan Turing")
                    .publisher("Acme")
                    .access("PR")
                    .modified("2024-06-01T00:00:00Z"),
            )
            .build(),
        SolutionBuilder::new("P2")
            .name("Text Summarizer")
            .user("u2")
            .model_type(None)
            .modified("2023-05-01T00:00:00Z")
            .tags(&["nlp", "ml"])
            .catalogs(&["cat-a", "cat-b"])
            .revision(
                RevisionBuilder::new("P2-r1")
                    .authors("Grace Hopper")
                    .publisher("Globex")
                    .access("PB")
                    .modified("2023-05-01T00:00:00Z")
                    .description("cat-b", "Summarizes long text"),
            )
            .build(),
        SolutionBuilder::new("P3")
            .name("Anomaly Detector")
            .user("u1")
            .model_type(Some("DS"))
            .active(false)
            .modified("2022-01-01T00:00:00Z")
            .tags(&["ml"])
            .catalogs(&["cat-b"])
            .revision(
                RevisionBuilder::new("P3-r1")
                    .authors("Ada Lovelace")
                    .publisher("Initech")
                    .access("PR")
                    .modified("2022-01-01T00:00:00Z"),
            )
            .build(),
    ]
}

pub fn users() -> Vec<Value> {
    vec![
        user("u1", "Ada", true),
        user("u2", "alan", true),
        user("u3", "Grace", false),
    ]
}

pub fn tasks() -> Vec<Value> {
    vec![task(1, "IP"), task(2, "SU"), task(10, "FA")]
}
