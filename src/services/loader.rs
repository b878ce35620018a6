//! Background source loader
//!
//! Each data-source selection fetches and parses on its own thread and
//! reports back over a channel. Only the newest load is tracked: starting a
//! new one drops the receiver of the previous, so a superseded thread's
//! result is never observed. The viewer's token check at commit time covers
//! the rest.

use crate::error::IngestError;
use crate::model::row::Row;
use crate::model::viewer::LoadTicket;
use crate::services::csv_codec;
use crate::services::fetch::{fetch_text, SourceLocation};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// A finished load, tagged with the ticket it was started for
#[derive(Debug)]
pub struct LoadMessage {
    pub ticket: LoadTicket,
    pub result: Result<Vec<Row>, IngestError>,
}

struct BackgroundLoad {
    ticket: LoadTicket,
    receiver: Receiver<LoadMessage>,
    start_instant: Instant,
}

/// Runs source ingestion off the UI thread
#[derive(Default)]
pub struct SourceLoader {
    job: Option<BackgroundLoad>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self { job: None }
    }

    /// Fetch and parse `location` for `ticket`
    pub fn spawn(&mut self, ticket: LoadTicket, location: SourceLocation) {
        info!(source = %ticket.source().id, %location, "Starting load");
        self.spawn_with(ticket, move || {
            let text = fetch_text(&location)?;
            csv_codec::parse(&text)
        });
    }

    /// Run `load` on a background thread for `ticket`
    ///
    /// Any load already in flight is abandoned.
    pub fn spawn_with<F>(&mut self, ticket: LoadTicket, load: F)
    where
        F: FnOnce() -> Result<Vec<Row>, IngestError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let thread_ticket = ticket.clone();

        thread::spawn(move || {
            Self::run_load(thread_ticket, load, tx);
        });

        if let Some(previous) = self.job.replace(BackgroundLoad {
            ticket,
            receiver: rx,
            start_instant: Instant::now(),
        }) {
            debug!(token = previous.ticket.token(), "Abandoned in-flight load");
        }
    }

    /// Whether a load is in flight
    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    /// Start instant of the tracked load
    pub fn start_instant(&self) -> Option<Instant> {
        self.job.as_ref().map(|j| j.start_instant)
    }

    /// Take the result of the tracked load if it has finished
    ///
    /// A thread that died without reporting yields an `Interrupted` error.
    pub fn poll(&mut self) -> Option<LoadMessage> {
        let job = self.job.as_ref()?;

        let message = match job.receiver.try_recv() {
            Ok(message) => message,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => LoadMessage {
                ticket: job.ticket.clone(),
                result: Err(IngestError::Interrupted),
            },
        };

        let elapsed = job.start_instant.elapsed();
        debug!(
            token = message.ticket.token(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Load finished"
        );
        self.job = None;
        Some(message)
    }

    /// Stop tracking the current load
    pub fn cancel(&mut self) {
        if let Some(job) = self.job.take() {
            debug!(token = job.ticket.token(), "Cancelled load");
        }
    }

    fn run_load<F>(ticket: LoadTicket, load: F, tx: Sender<LoadMessage>)
    where
        F: FnOnce() -> Result<Vec<Row>, IngestError>,
    {
        let result = load();
        // The receiver is gone when this load was superseded
        let _ = tx.send(LoadMessage { ticket, result });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::row;
    use crate::model::source::DataSource;
    use crate::model::viewer::{CommitOutcome, Viewer};
    use std::time::Duration;

    fn wait_for(loader: &mut SourceLoader) -> LoadMessage {
        for _ in 0..500 {
            if let Some(message) = loader.poll() {
                return message;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("load did not finish in time");
    }

    #[test]
    fn test_poll_without_job() {
        let mut loader = SourceLoader::new();
        assert!(!loader.is_busy());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_load_reports_rows() {
        let mut viewer = Viewer::default();
        let ticket = viewer.select(Some(DataSource::new("a.csv", "A"))).unwrap();

        let mut loader = SourceLoader::new();
        loader.spawn_with(ticket, || Ok(vec![row(&[("Title", "Alpha")])]));
        assert!(loader.is_busy());

        let message = wait_for(&mut loader);
        assert!(!loader.is_busy());
        assert_eq!(viewer.commit(&message.ticket, message.result), CommitOutcome::Applied);
        assert_eq!(viewer.schema(), ["Title"]);
    }

    #[test]
    fn test_superseded_load_never_surfaces() {
        let mut viewer = Viewer::default();
        let mut loader = SourceLoader::new();

        let slow = viewer.select(Some(DataSource::new("a.csv", "A"))).unwrap();
        loader.spawn_with(slow, || {
            thread::sleep(Duration::from_millis(100));
            Ok(vec![row(&[("Title", "From A")])])
        });

        let fast = viewer.select(Some(DataSource::new("b.csv", "B"))).unwrap();
        loader.spawn_with(fast.clone(), || Ok(vec![row(&[("Serial", "From B")])]));

        let message = wait_for(&mut loader);
        assert_eq!(message.ticket, fast);
        viewer.commit(&message.ticket, message.result);

        // Give the abandoned thread time to finish; nothing may arrive
        thread::sleep(Duration::from_millis(150));
        assert!(loader.poll().is_none());
        assert_eq!(viewer.rows(), [row(&[("Serial", "From B")])]);
    }

    #[test]
    fn test_failed_load_is_reported() {
        let mut viewer = Viewer::default();
        let ticket = viewer.select(Some(DataSource::new("a.csv", "A"))).unwrap();

        let mut loader = SourceLoader::new();
        loader.spawn(
            ticket,
            SourceLocation::Local("/definitely/not/here/a.csv".into()),
        );

        let message = wait_for(&mut loader);
        assert!(matches!(message.result, Err(IngestError::Read { .. })));
    }

    #[test]
    fn test_cancel_drops_tracking() {
        let mut viewer = Viewer::default();
        let ticket = viewer.select(Some(DataSource::new("a.csv", "A"))).unwrap();

        let mut loader = SourceLoader::new();
        loader.spawn_with(ticket, || Ok(Vec::new()));
        loader.cancel();

        assert!(!loader.is_busy());
        assert!(loader.poll().is_none());
    }
}
