//! End-to-end checks against a live MongoDB
//!
//! Every test that needs a server reads its URI from `BOOKSTORE_TEST_URI`
//! and returns early when it is unset. Each test works in its own
//! collection and drops it afterwards.

use mongodb::IndexModel;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;

use bookstore_queries::config::{Config, ConnectionConfig, DisplayConfig};
use bookstore_queries::error::{BookstoreError, ConnectionError, OperationError};
use bookstore_queries::executor::operations::{
    SortDirection, author_filter, average_price_by_genre, count_by_decade, genre_filter,
    price_sort, published_after, set_price, title_filter,
};
use bookstore_queries::executor::{
    ExecutionResult, Operation, OperationKind, OperationRunner, ResultData, bookstore_operations,
};
use bookstore_queries::{Reporter, Session};

const TEST_DATABASE: &str = "bookstore_queries_test";

fn test_config(collection: &str) -> Option<ConnectionConfig> {
    let uri = std::env::var("BOOKSTORE_TEST_URI").ok()?;
    Some(ConnectionConfig {
        uri,
        database: TEST_DATABASE.to_string(),
        collection: format!("{}_{}", collection, std::process::id()),
        timeout: 10,
    })
}

fn book(title: &str, author: &str, genre: &str, year: i32, price: f64, in_stock: bool) -> Document {
    doc! {
        "title": title,
        "author": author,
        "genre": genre,
        "published_year": year,
        "price": price,
        "in_stock": in_stock,
    }
}

async fn seeded_session(config: &ConnectionConfig, books: Vec<Document>) -> Session {
    let session = Session::open(config).await.unwrap();
    let collection = session.context().collection().clone();
    collection.drop().await.unwrap();
    if !books.is_empty() {
        collection.insert_many(books).await.unwrap();
    }
    session
}

async fn teardown(session: Session) {
    session.context().collection().drop().await.unwrap();
    session.close().await;
}

async fn run_one(session: &Session, operation: Operation) -> ExecutionResult {
    OperationRunner::new(session.context())
        .execute(&operation)
        .await
        .unwrap()
}

fn documents(result: &ExecutionResult) -> &[Document] {
    result.documents().unwrap()
}

fn titles(result: &ExecutionResult) -> Vec<String> {
    documents(result)
        .iter()
        .map(|d| d.get_str("title").unwrap().to_string())
        .collect()
}

fn plain_display() -> DisplayConfig {
    DisplayConfig {
        color_output: false,
        ..DisplayConfig::default()
    }
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    let config = ConnectionConfig {
        uri: "mongodb://127.0.0.1:1".to_string(),
        timeout: 1,
        ..ConnectionConfig::default()
    };

    let err = Session::open(&config).await.err().unwrap();
    assert!(matches!(
        err,
        BookstoreError::Connection(ConnectionError::PingFailed(_))
    ));
}

#[tokio::test]
async fn test_run_reports_close_when_open_fails() {
    let config = Config {
        connection: ConnectionConfig {
            uri: "mongodb://127.0.0.1:1".to_string(),
            timeout: 1,
            ..ConnectionConfig::default()
        },
        display: plain_display(),
        ..Config::default()
    };

    let mut out = Vec::new();
    let err = bookstore_queries::run(&config, &mut out).await.unwrap_err();
    assert!(matches!(err, BookstoreError::Connection(_)));

    let output = String::from_utf8(out).unwrap();
    assert!(!output.contains("Successfully connected"));
    assert_eq!(output.trim(), "Connection closed");
}

#[tokio::test]
async fn test_genre_and_year_filters() {
    let Some(config) = test_config("filters") else {
        return;
    };
    let session = seeded_session(
        &config,
        vec![
            book("1984", "George Orwell", "Dystopian", 1949, 10.0, true),
            book("The Hobbit", "J.R.R. Tolkien", "Fiction", 1937, 12.0, true),
            book("Boundary Year", "Someone", "Fiction", 1950, 9.0, false),
            book("Later Book", "Someone", "History", 1951, 11.0, true),
        ],
    )
    .await;

    let fiction = run_one(&session, Operation::find("fiction", genre_filter("Fiction"))).await;
    let mut fiction_titles = titles(&fiction);
    fiction_titles.sort();
    assert_eq!(fiction_titles, vec!["Boundary Year", "The Hobbit"]);

    let after = run_one(&session, Operation::find("after", published_after(1950))).await;
    assert_eq!(titles(&after), vec!["Later Book"]);

    let orwell = run_one(&session, Operation::find("orwell", author_filter("George Orwell"))).await;
    assert_eq!(titles(&orwell), vec!["1984"]);

    teardown(session).await;
}

#[tokio::test]
async fn test_update_is_idempotent_and_delete_tolerates_absence() {
    let Some(config) = test_config("writes") else {
        return;
    };
    let session = seeded_session(
        &config,
        vec![
            book("1984", "George Orwell", "Dystopian", 1949, 10.0, true),
            book("Moby Dick", "Herman Melville", "Adventure", 1851, 20.0, false),
        ],
    )
    .await;

    let update = Operation::new(
        "update",
        OperationKind::UpdateOne {
            filter: title_filter("1984"),
            update: set_price(13.99),
        },
    );
    let first = run_one(&session, update.clone()).await;
    assert!(matches!(
        first.data,
        ResultData::Update {
            matched: 1,
            modified: 1
        }
    ));
    let second = run_one(&session, update).await;
    assert!(matches!(
        second.data,
        ResultData::Update {
            matched: 1,
            modified: 0
        }
    ));

    let price = run_one(&session, Operation::find("price", title_filter("1984"))).await;
    assert_eq!(documents(&price)[0].get_f64("price").unwrap(), 13.99);

    let delete = Operation::new(
        "delete",
        OperationKind::DeleteOne {
            filter: title_filter("Moby Dick"),
        },
    );
    let removed = run_one(&session, delete.clone()).await;
    assert!(matches!(removed.data, ResultData::Delete { deleted: 1 }));
    let again = run_one(&session, delete).await;
    assert!(matches!(again.data, ResultData::Delete { deleted: 0 }));

    let gone = run_one(&session, Operation::find("gone", title_filter("Moby Dick"))).await;
    assert!(documents(&gone).is_empty());

    teardown(session).await;
}

#[tokio::test]
async fn test_aggregations() {
    let Some(config) = test_config("aggregations") else {
        return;
    };
    let session = seeded_session(
        &config,
        vec![
            book("A", "Author One", "Fiction", 1945, 10.0, true),
            book("B", "Author One", "Fiction", 1951, 20.0, true),
            book("C", "Author Two", "Poetry", 1959, 40.0, true),
        ],
    )
    .await;

    let averages = run_one(
        &session,
        Operation::new(
            "averages",
            OperationKind::Aggregate {
                pipeline: average_price_by_genre(),
            },
        ),
    )
    .await;
    let rows = documents(&averages);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get_str("_id").unwrap(), "Poetry");
    assert_eq!(rows[1].get_str("_id").unwrap(), "Fiction");
    assert_eq!(rows[1].get_f64("avgPrice").unwrap(), 15.0);

    let decades = run_one(
        &session,
        Operation::new(
            "decades",
            OperationKind::Aggregate {
                pipeline: count_by_decade(),
            },
        ),
    )
    .await;
    let rows: Vec<(String, i32)> = documents(&decades)
        .iter()
        .map(|d| {
            (
                d.get_str("_id").unwrap().to_string(),
                d.get_i32("count").unwrap(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![("1940s".to_string(), 1), ("1950s".to_string(), 2)]
    );

    teardown(session).await;
}

#[tokio::test]
async fn test_explain_uses_index_after_creation() {
    let Some(config) = test_config("explain") else {
        return;
    };
    let session = seeded_session(
        &config,
        vec![
            book("1984", "George Orwell", "Dystopian", 1949, 10.0, true),
            book("Animal Farm", "George Orwell", "Satire", 1945, 8.0, true),
        ],
    )
    .await;

    let explain = Operation::new(
        "explain",
        OperationKind::Explain {
            filter: title_filter("1984"),
            confirm_index_scan: false,
        },
    );

    let before = run_one(&session, explain.clone()).await;
    let ResultData::Plan(plan) = &before.data else {
        panic!("expected a plan, got {:?}", before.data);
    };
    assert!(!plan.uses_index());

    let created = run_one(
        &session,
        Operation::new(
            "index",
            OperationKind::CreateIndex {
                keys: doc! { "title": 1 },
            },
        ),
    )
    .await;
    assert!(matches!(
        &created.data,
        ResultData::IndexCreated { name } if name == "title_1"
    ));

    let after = run_one(&session, explain).await;
    let ResultData::Plan(plan) = &after.data else {
        panic!("expected a plan, got {:?}", after.data);
    };
    assert!(plan.uses_index());
    assert_eq!(plan.index_name.as_deref(), Some("title_1"));

    teardown(session).await;
}

#[tokio::test]
async fn test_full_run_reports_every_operation() {
    let Some(config) = test_config("full_run") else {
        return;
    };
    let session = seeded_session(
        &config,
        vec![
            book("1984", "George Orwell", "Dystopian", 1949, 10.0, true),
            book("Moby Dick", "Herman Melville", "Adventure", 1851, 20.0, false),
            book("Brave New World", "Aldous Huxley", "Dystopian", 1932, 15.0, true),
        ],
    )
    .await;

    let operations = bookstore_operations();
    let mut reporter = Reporter::new(Vec::new(), &plain_display());
    let completed = OperationRunner::new(session.context())
        .run(&operations, &mut reporter)
        .await
        .unwrap();
    assert_eq!(completed, operations.len());

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    for operation in &operations {
        assert!(
            output.contains(&format!("{}:", operation.label)),
            "missing section for {}",
            operation.label
        );
    }
    assert!(output.contains("Indexes created successfully"));

    let sorted = run_one(
        &session,
        Operation::new(
            "sorted",
            OperationKind::Find {
                filter: Document::new(),
                projection: None,
                sort: Some(price_sort(SortDirection::Ascending)),
                limit: None,
            },
        ),
    )
    .await;
    assert_eq!(titles(&sorted), vec!["1984", "Brave New World"]);

    let updated = run_one(&session, Operation::find("1984", title_filter("1984"))).await;
    assert_eq!(documents(&updated)[0].get_f64("price").unwrap(), 13.99);

    teardown(session).await;
}

#[tokio::test]
async fn test_run_brackets_report_with_connection_lines() {
    let Some(connection) = test_config("bracket") else {
        return;
    };
    let session = seeded_session(&connection, Vec::new()).await;
    session.close().await;

    let config = Config {
        connection: connection.clone(),
        display: plain_display(),
        ..Config::default()
    };
    let mut out = Vec::new();
    let completed = bookstore_queries::run(&config, &mut out).await.unwrap();
    assert_eq!(completed, bookstore_operations().len());

    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("Successfully connected to MongoDB"));
    assert!(output.trim_end().ends_with("Connection closed"));
    assert!(output.contains("(empty result set)"));

    let session = Session::open(&connection).await.unwrap();
    teardown(session).await;
}

#[tokio::test]
async fn test_failing_operation_stops_run_and_still_closes() {
    let Some(connection) = test_config("conflict") else {
        return;
    };
    let session = seeded_session(
        &connection,
        vec![
            book("1984", "George Orwell", "Dystopian", 1949, 10.0, true),
            book("Moby Dick", "Herman Melville", "Adventure", 1851, 20.0, false),
        ],
    )
    .await;

    // Same name as the default for { title: 1 }, different options
    let conflicting = IndexModel::builder()
        .keys(doc! { "title": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("title_1".to_string())
                .build(),
        )
        .build();
    session
        .context()
        .collection()
        .create_index(conflicting)
        .await
        .unwrap();

    let config = Config {
        connection: connection.clone(),
        display: plain_display(),
        ..Config::default()
    };
    let mut out = Vec::new();
    let err = bookstore_queries::run(&config, &mut out).await.unwrap_err();
    assert!(matches!(
        &err,
        BookstoreError::Operation(OperationError::IndexFailed { label, .. })
            if label == "Created index on title"
    ));

    let output = String::from_utf8(out).unwrap();
    let operations = bookstore_operations();
    let rendered = operations
        .iter()
        .filter(|op| output.contains(&format!("{}:", op.label)))
        .count();
    assert_eq!(rendered, 13);
    assert!(!output.contains("Explain plan"));
    assert!(output.trim_end().ends_with("Connection closed"));

    teardown(session).await;
}
