//! The fixed bookstore operation sequence
//!
//! Each [`Operation`] pairs the label printed above its table with the
//! command to send. Filter, update and pipeline documents are built by the
//! small functions below so their exact shape can be checked without a
//! server.

use mongodb::bson::{Document, doc};

/// Sort direction for the price sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// What an operation sends to the store
#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    /// `find` with optional projection, sort and limit
    Find {
        filter: Document,
        projection: Option<Document>,
        sort: Option<Document>,
        limit: Option<i64>,
    },

    /// `updateOne`; zero matches is not an error
    UpdateOne { filter: Document, update: Document },

    /// `deleteOne`; zero matches is not an error
    DeleteOne { filter: Document },

    /// `aggregate`
    Aggregate { pipeline: Vec<Document> },

    /// `createIndex` with ascending keys
    CreateIndex { keys: Document },

    /// `explain` of a find; `confirm_index_scan` prints the IXSCAN notice
    /// when the winning plan's top stage is an index scan
    Explain {
        filter: Document,
        confirm_index_scan: bool,
    },
}

/// A named operation in the run
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Heading printed above the result
    pub label: String,

    /// Command to execute
    pub kind: OperationKind,

    /// Line printed after the result
    pub note: Option<String>,
}

impl Operation {
    /// Create an operation without a trailing note
    pub fn new(label: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            label: label.into(),
            kind,
            note: None,
        }
    }

    /// Attach a line printed after the result
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Plain `find` with a filter
    pub fn find(label: impl Into<String>, filter: Document) -> Self {
        Self::new(
            label,
            OperationKind::Find {
                filter,
                projection: None,
                sort: None,
                limit: None,
            },
        )
    }

    /// Whether this operation changes data
    pub fn is_write(&self) -> bool {
        matches!(
            self.kind,
            OperationKind::UpdateOne { .. }
                | OperationKind::DeleteOne { .. }
                | OperationKind::CreateIndex { .. }
        )
    }
}

/// `{ genre: <genre> }`
pub fn genre_filter(genre: &str) -> Document {
    doc! { "genre": genre }
}

/// `{ published_year: { $gt: <year> } }`
pub fn published_after(year: i32) -> Document {
    doc! { "published_year": { "$gt": year } }
}

/// `{ author: <author> }`
pub fn author_filter(author: &str) -> Document {
    doc! { "author": author }
}

/// `{ title: <title> }`
pub fn title_filter(title: &str) -> Document {
    doc! { "title": title }
}

/// `{ $set: { price: <price> } }`
pub fn set_price(price: f64) -> Document {
    doc! { "$set": { "price": price } }
}

/// `{ in_stock: true, published_year: { $gt: <year> } }`
pub fn in_stock_published_after(year: i32) -> Document {
    doc! { "in_stock": true, "published_year": { "$gt": year } }
}

/// `{ author: <author>, published_year: { $gt: <year> } }`
pub fn author_published_after(author: &str, year: i32) -> Document {
    doc! { "author": author, "published_year": { "$gt": year } }
}

/// Title, author and price only, without `_id`
pub fn summary_projection() -> Document {
    doc! { "_id": 0, "title": 1, "author": 1, "price": 1 }
}

/// `{ price: 1 }` or `{ price: -1 }`
pub fn price_sort(direction: SortDirection) -> Document {
    doc! { "price": direction.as_i32() }
}

/// Average price per genre, highest first
pub fn average_price_by_genre() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$genre", "avgPrice": { "$avg": "$price" } } },
        doc! { "$sort": { "avgPrice": -1 } },
    ]
}

/// The author with the most books
pub fn top_author() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$author", "totalBooks": { "$sum": 1 } } },
        doc! { "$sort": { "totalBooks": -1 } },
        doc! { "$limit": 1 },
    ]
}

/// Book count per publication decade, labelled like `"1950s"`, ascending
pub fn count_by_decade() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": {
                    "$concat": [
                        {
                            "$toString": {
                                "$subtract": [
                                    "$published_year",
                                    { "$mod": ["$published_year", 10] }
                                ]
                            }
                        },
                        "s"
                    ]
                },
                "count": { "$sum": 1 }
            }
        },
        doc! { "$sort": { "_id": 1 } },
    ]
}

/// The full run, in execution order
pub fn bookstore_operations() -> Vec<Operation> {
    let all = Document::new;

    vec![
        // Basic CRUD
        Operation::find("Books in Fiction genre", genre_filter("Fiction")),
        Operation::find("Books published after 1950", published_after(1950)),
        Operation::find("Books by George Orwell", author_filter("George Orwell")),
        Operation::new(
            "Updated price for \"1984\"",
            OperationKind::UpdateOne {
                filter: title_filter("1984"),
                update: set_price(13.99),
            },
        ),
        Operation::new(
            "Deleted \"Moby Dick\"",
            OperationKind::DeleteOne {
                filter: title_filter("Moby Dick"),
            },
        ),
        // Advanced queries
        Operation::find(
            "In-stock books published after 2010",
            in_stock_published_after(2010),
        ),
        Operation::new(
            "Only title, author, price",
            OperationKind::Find {
                filter: all(),
                projection: Some(summary_projection()),
                sort: None,
                limit: None,
            },
        ),
        Operation::new(
            "Books sorted by price (ascending)",
            OperationKind::Find {
                filter: all(),
                projection: None,
                sort: Some(price_sort(SortDirection::Ascending)),
                limit: None,
            },
        ),
        Operation::new(
            "Books sorted by price (descending)",
            OperationKind::Find {
                filter: all(),
                projection: None,
                sort: Some(price_sort(SortDirection::Descending)),
                limit: None,
            },
        ),
        Operation::new(
            "First 5 books",
            OperationKind::Find {
                filter: all(),
                projection: None,
                sort: None,
                limit: Some(5),
            },
        ),
        // Aggregations
        Operation::new(
            "Average price by genre",
            OperationKind::Aggregate {
                pipeline: average_price_by_genre(),
            },
        ),
        Operation::new(
            "Author with most books",
            OperationKind::Aggregate {
                pipeline: top_author(),
            },
        ),
        Operation::new(
            "Books grouped by publication decade",
            OperationKind::Aggregate {
                pipeline: count_by_decade(),
            },
        ),
        // Indexing
        Operation::new(
            "Created index on title",
            OperationKind::CreateIndex {
                keys: doc! { "title": 1 },
            },
        ),
        Operation::new(
            "Created compound index on author, published_year",
            OperationKind::CreateIndex {
                keys: doc! { "author": 1, "published_year": 1 },
            },
        )
        .with_note("Indexes created successfully"),
        Operation::new(
            "Explain plan for query on \"title\"",
            OperationKind::Explain {
                filter: title_filter("1984"),
                confirm_index_scan: false,
            },
        ),
        Operation::new(
            "Explain plan for query on \"author\" and \"published_year\"",
            OperationKind::Explain {
                filter: author_published_after("George Orwell", 1945),
                confirm_index_scan: true,
            },
        ),
    ]
}
