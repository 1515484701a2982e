use std::future::Future;

use crate::error::DbError;
use crate::record::NobelPrizeWinner;

/// A database table the winners are loaded into.
pub trait WinnerTable {
    fn table_name(&self) -> &str;

    /// Drop the table if it exists and create it empty.
    fn recreate(&mut self) -> impl Future<Output = Result<(), DbError>>;

    /// Insert all rows in one transaction. Returns the number of rows
    /// inserted.
    fn insert_all(
        &mut self,
        rows: &[NobelPrizeWinner],
    ) -> impl Future<Output = Result<u64, DbError>>;
}
