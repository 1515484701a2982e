//! Relational side of the pipeline: read the winners CSV and load it into
//! the table the search service's data source points at.

pub mod error;
pub mod record;
pub mod schema;
pub mod sqlite;
pub mod sqlserver;
pub mod table;

pub use error::DbError;
pub use record::{NobelPrizeWinner, read_winners, read_winners_from};
pub use schema::Dialect;
pub use sqlite::SqliteTable;
pub use sqlserver::SqlServerTable;
pub use table::WinnerTable;
