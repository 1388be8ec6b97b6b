use std::any::Any;

use log::error;
use patrimoine_core::errors::{Error, Result};
use tokio::sync::{mpsc, oneshot};

use super::JsonStore;
use crate::errors::StorageError;
use crate::possessions::PossessionsDocument;

// A job mutates the loaded document. The document is saved only when the job
// succeeds.
type Job<T> = Box<dyn FnOnce(&mut PossessionsDocument) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` against the current document on the writer task.
    ///
    /// Jobs run one at a time in submission order. Each one sees the file as
    /// left by the previous job.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut PossessionsDocument) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |doc| job(doc).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|e| Error::from(StorageError::WriterClosed(e.to_string())))?;

        let boxed = ret_rx
            .await
            .map_err(|e| Error::from(StorageError::WriterClosed(e.to_string())))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| StorageError::ResultType.into())
    }
}

/// Spawns a background Tokio task that is the only writer of the data file.
pub fn spawn_writer(store: JsonStore) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = run_job(&store, job);
            if let Err(e @ Error::Repository(_)) = &result {
                error!("Write to {} failed: {}", store.path().display(), e);
            }
            // The requester may have gone away
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}

fn run_job(store: &JsonStore, job: ErasedJob) -> Result<Box<dyn Any + Send + 'static>> {
    let mut document = store.load()?;
    let value = job(&mut document)?;
    store.save(&document)?;
    Ok(value)
}
