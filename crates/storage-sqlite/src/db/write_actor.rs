use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use drt_core::errors::{DatabaseError, Error, Result};
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the writer's connection and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type AnyBox = Box<dyn Any + Send + 'static>;

/// Handle for sending jobs to the writer actor.
///
/// Every create and update goes through this single connection, each job in
/// its own immediate transaction, so two creators of the same key are
/// serialized and the second one hits the unique constraint.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<AnyBox>, oneshot::Sender<Result<AnyBox>>)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as AnyBox)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("receiving channel closed"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("reply sender dropped"))??;
        boxed
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| Error::Database(DatabaseError::Internal("writer result type mismatch".to_string())))
    }
}

fn writer_gone(detail: &str) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "Writer actor stopped: {}",
        detail
    )))
}

/// Spawns a background Tokio task that acts as a single writer to the database.
/// This actor owns one database connection from the pool and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job<AnyBox>, oneshot::Sender<Result<AnyBox>>)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                // Dropping `rx` makes every pending and future exec fail.
                error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<AnyBox> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // Receiver may have gone away (caller cancelled).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
