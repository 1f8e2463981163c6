//! Multi-result-set reader
//!
//! A batch sent as one round trip comes back as a single stream of rows
//! interleaved with one `QueryResult` per statement. Each `QueryResult`
//! closes the set of rows before it. The whole stream must be consumed
//! before the connection is reused, so sets the caller does not want are
//! drained rather than dropped.

use futures::stream::BoxStream;
use futures::TryStreamExt;
use sqlx::Either;
use tracing::debug;

/// Stream item as produced by `Executor::fetch_many`
pub type BatchItem<Q, R> = Result<Either<Q, R>, sqlx::Error>;

/// Sequential reader over the result sets of one batch
pub struct ResultSets<'s, Q, R> {
    stream: BoxStream<'s, BatchItem<Q, R>>,
    exhausted: bool,
}

impl<'s, Q, R> ResultSets<'s, Q, R> {
    pub fn new(stream: BoxStream<'s, BatchItem<Q, R>>) -> Self {
        Self {
            stream,
            exhausted: false,
        }
    }

    /// Read the rows of the next statement.
    ///
    /// Returns `Some(rows)` (possibly empty) for each statement in the
    /// batch and `None` once the stream is exhausted.
    pub async fn next_set(&mut self) -> Result<Option<Vec<R>>, sqlx::Error> {
        if self.exhausted {
            return Ok(None);
        }

        let mut rows = Vec::new();
        while let Some(item) = self.stream.try_next().await? {
            match item {
                Either::Left(_) => return Ok(Some(rows)),
                Either::Right(row) => rows.push(row),
            }
        }

        // Rows with no closing result only happen on a truncated stream
        self.exhausted = true;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows))
        }
    }

    /// Consume every remaining set without decoding it.
    ///
    /// Returns how many sets were discarded.
    pub async fn drain(mut self) -> Result<usize, sqlx::Error> {
        let mut discarded = 0;
        while self.next_set().await?.is_some() {
            discarded += 1;
        }
        Ok(discarded)
    }

    /// End the batch: check that every set was read, draining any that
    /// were not.
    ///
    /// Returns how many sets were left over (zero for a fully read batch).
    pub async fn finish(self) -> Result<usize, sqlx::Error> {
        let leftover = self.drain().await?;
        if leftover > 0 {
            debug!(leftover, "Drained unread result sets");
        }
        Ok(leftover)
    }
}
