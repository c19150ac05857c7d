//! End-to-end analysis runs over the in-memory backend.
//!
//! Exercises the full pipeline: classification, aggregate scoring, issue
//! detection, recommendation wiring, and report aggregation.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use dqlens_core::{
    Analyzer, ColumnIssue, ColumnMeta, MaturityReport, MemoryClient, SamplingOptions,
    SemanticType, TableRef, WarehouseClient,
};
use serde_json::json;

fn warehouse() -> MemoryClient {
    // crm.contacts: email_addr has one null and one malformed entry out
    // of 10 rows, everything else clean
    let contacts_rows = vec![
        json!({"id": 1, "email_addr": "a@example.com", "phone_number": "+14155550101", "signup_date": "2024-01-01"}),
        json!({"id": 2, "email_addr": "b@example.com", "phone_number": "+14155550102", "signup_date": "2024-01-02"}),
        json!({"id": 3, "email_addr": "c@example.com", "phone_number": "+14155550103", "signup_date": "2024-01-03"}),
        json!({"id": 4, "email_addr": "d@example.com", "phone_number": "+14155550104", "signup_date": "2024-01-04"}),
        json!({"id": 5, "email_addr": "e@example.com", "phone_number": "+14155550105", "signup_date": "2024-01-05"}),
        json!({"id": 6, "email_addr": "f@example.com", "phone_number": "+14155550106", "signup_date": "2024-01-06"}),
        json!({"id": 7, "email_addr": "g@example.com", "phone_number": "+14155550107", "signup_date": "2024-01-07"}),
        json!({"id": 8, "email_addr": "h@example.com", "phone_number": "+14155550108", "signup_date": "2024-01-08"}),
        json!({"id": 9, "email_addr": "not-an-email", "phone_number": "+14155550109", "signup_date": "2024-01-09"}),
        json!({"id": 10, "email_addr": null, "phone_number": "+14155550110", "signup_date": "2024-01-10"}),
    ];

    // sales.orders: duplicated order codes, otherwise clean
    let orders_rows = vec![
        json!({"order_code": "A-1", "amount": 10}),
        json!({"order_code": "A-1", "amount": 20}),
        json!({"order_code": "A-2", "amount": 30}),
        json!({"order_code": "A-3", "amount": 40}),
    ];

    MemoryClient::new()
        .with_table(
            TableRef::new("crm", "contacts"),
            vec![
                ColumnMeta::new("id", "integer"),
                ColumnMeta::new("email_addr", "text"),
                ColumnMeta::new("phone_number", "text"),
                ColumnMeta::new("signup_date", "text"),
            ],
            contacts_rows,
        )
        .with_table(
            TableRef::new("sales", "orders"),
            vec![
                ColumnMeta::new("order_code", "text"),
                ColumnMeta::new("amount", "integer"),
            ],
            orders_rows,
        )
        .with_table(
            TableRef::new("sales", "returns"),
            vec![
                ColumnMeta::new("return_id", "integer"),
                ColumnMeta::new("processed_date", "text"),
            ],
            vec![],
        )
}

fn all_tables() -> Vec<TableRef> {
    vec![
        TableRef::new("crm", "contacts"),
        TableRef::new("sales", "orders"),
        TableRef::new("sales", "returns"),
    ]
}

#[tokio::test]
async fn full_run_aggregates_across_tables() {
    let client = warehouse();
    let report = Analyzer::new(&client).analyze(&all_tables()).await;

    assert_eq!(report.total_tables, 3);
    assert_eq!(report.total_columns, 8);
    // email_addr fails conformity, order_code fails uniqueness
    assert_eq!(report.total_issues, 2);
    assert!((report.score - 75.0).abs() < 1e-9);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn email_column_finding_detail() {
    let client = warehouse();
    let report = Analyzer::new(&client)
        .analyze(&[TableRef::new("crm", "contacts")])
        .await;

    let summary = &report.table_summaries["crm.contacts"];
    assert_eq!(summary.total_columns, 4);
    assert_eq!(summary.findings.len(), 1);

    let finding = &summary.findings[0];
    assert_eq!(finding.column.name, "email_addr");
    assert_eq!(finding.semantic_type, SemanticType::Email);
    assert!((finding.scores.completeness - 90.0).abs() < 1e-9);
    assert!((finding.scores.uniqueness - 100.0).abs() < 1e-9);
    assert!((finding.scores.conformity - 80.0).abs() < 1e-9);
    assert_eq!(finding.issues, vec![ColumnIssue::LowConformity]);
    assert_eq!(
        finding.recommendations,
        vec![
            "Correct data entries to match the expected format and improve conformity."
                .to_string()
        ]
    );
}

#[tokio::test]
async fn duplicate_codes_fire_uniqueness_only() {
    let client = warehouse();
    let report = Analyzer::new(&client)
        .analyze(&[TableRef::new("sales", "orders")])
        .await;

    let summary = &report.table_summaries["sales.orders"];
    assert_eq!(summary.findings.len(), 1);

    let finding = &summary.findings[0];
    assert_eq!(finding.column.name, "order_code");
    assert_eq!(finding.semantic_type, SemanticType::Unknown);
    assert!((finding.scores.uniqueness - 75.0).abs() < 1e-9);
    assert_eq!(finding.issues, vec![ColumnIssue::DuplicatesPresent]);
    assert_eq!(finding.recommendations.len(), 1);
    assert!(finding.recommendations[0].contains("duplicate"));
}

#[tokio::test]
async fn empty_table_contributes_columns_but_no_issues() {
    let client = warehouse();
    let report = Analyzer::new(&client)
        .analyze(&[TableRef::new("sales", "returns")])
        .await;

    assert_eq!(report.total_columns, 2);
    assert_eq!(report.total_issues, 0);
    assert_eq!(report.score, 100.0);
    assert!(report.table_summaries["sales.returns"].is_clean());
}

#[tokio::test]
async fn empty_selection_scores_perfect() {
    let client = warehouse();
    let report = Analyzer::new(&client).analyze(&[]).await;

    assert_eq!(report.total_tables, 0);
    assert_eq!(report.total_columns, 0);
    assert_eq!(report.score, 100.0);
    assert!(report.is_perfect());
    assert!(report.table_summaries.is_empty());
}

#[tokio::test]
async fn report_preserves_selection_order() {
    let client = warehouse();
    let report = Analyzer::new(&client)
        .analyze(&[
            TableRef::new("sales", "returns"),
            TableRef::new("crm", "contacts"),
            TableRef::new("sales", "orders"),
        ])
        .await;

    let keys: Vec<&String> = report.table_summaries.keys().collect();
    assert_eq!(keys, ["sales.returns", "crm.contacts", "sales.orders"]);
}

#[tokio::test]
async fn report_survives_json_round_trip() {
    let client = warehouse();
    let report = Analyzer::new(&client).analyze(&all_tables()).await;

    let serialized = serde_json::to_string_pretty(&report).unwrap();
    let restored: MaturityReport = serde_json::from_str(&serialized).unwrap();

    assert_eq!(restored.total_tables, report.total_tables);
    assert_eq!(restored.total_columns, report.total_columns);
    assert_eq!(restored.total_issues, report.total_issues);
    assert!((restored.score - report.score).abs() < 1e-9);
    let keys: Vec<&String> = restored.table_summaries.keys().collect();
    assert_eq!(keys, ["crm.contacts", "sales.orders", "sales.returns"]);
}

#[tokio::test]
async fn degraded_run_still_produces_full_report() {
    // Metadata failure on one table, aggregate failure on one column
    let client = warehouse()
        .fail_metadata_for("sales.returns")
        .fail_counts_for("sales.orders", "order_code");

    let report = Analyzer::new(&client).analyze(&all_tables()).await;

    assert_eq!(report.total_tables, 3);
    // returns skipped entirely, its columns never counted
    assert_eq!(report.total_columns, 6);
    // order_code degraded to neutral scores, so only email_addr fires
    assert_eq!(report.total_issues, 1);
    assert_eq!(report.warnings.len(), 2);
    assert!(!report.table_summaries.contains_key("sales.returns"));
    assert!(report.table_summaries["sales.orders"].is_clean());
}

#[tokio::test]
async fn sampled_run_matches_unsampled_findings() {
    let client = warehouse();
    let unsampled = Analyzer::new(&client).analyze(&all_tables()).await;
    let sampled = Analyzer::new(&client)
        .with_sampling(SamplingOptions::with_limit(100))
        .analyze(&all_tables())
        .await;

    assert_eq!(sampled.total_columns, unsampled.total_columns);
    assert_eq!(sampled.total_issues, unsampled.total_issues);
    assert!((sampled.score - unsampled.score).abs() < 1e-9);
}

#[tokio::test]
async fn schema_discovery_drives_full_run() {
    let client = warehouse();
    let schemas = client.list_schemas().await.unwrap();
    let tables = client.list_tables(&schemas).await.unwrap();
    let report = Analyzer::new(&client).analyze(&tables).await;

    assert_eq!(report.total_tables, 3);
    assert_eq!(report.total_columns, 8);
}
