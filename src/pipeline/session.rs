use crate::detection::{Detection, Detector};
use crate::error::{Error, Result};
use flume::{Receiver, Sender};
use image::RgbaImage;
use std::thread::{self, JoinHandle};
use tracing::{Level, debug, span, warn};

struct Request {
    generation: u64,
    image: RgbaImage,
}

/// A detection paired with the photo it was run on.
#[derive(Debug, Clone)]
pub struct Detected {
    pub generation: u64,
    pub image: RgbaImage,
    pub detection: Detection,
}

/// Runs detection on its own thread. Only the most recently submitted
/// photo matters: photos queued behind a newer one are never detected, and
/// results for anything older than the latest submission are thrown away.
pub struct Session {
    requests: Sender<Request>,
    results: Receiver<Detected>,
    submitted: u64,
    delivered: u64,
    handle: JoinHandle<()>,
}

impl Session {
    pub fn spawn<D: Detector + 'static>(detector: D) -> Self {
        let (requests, work) = flume::unbounded();
        let (done, results) = flume::unbounded();
        let handle = thread::spawn(move || detect_loop(detector, work, done));

        Self {
            requests,
            results,
            submitted: 0,
            delivered: 0,
            handle,
        }
    }

    /// Queues a photo, superseding whatever was submitted before it.
    pub fn submit(&mut self, image: RgbaImage) -> Result<u64> {
        let generation = self.submitted + 1;
        self.requests
            .send(Request { generation, image })
            .map_err(|_| Error::SessionClosed)?;
        self.submitted = generation;

        Ok(generation)
    }

    /// Waits for the detection of the latest submission.
    pub async fn latest(&mut self) -> Result<Detected> {
        if self.delivered == self.submitted {
            return Err(Error::NothingPending);
        }

        loop {
            let detected = self
                .results
                .recv_async()
                .await
                .map_err(|_| Error::SessionClosed)?;

            if detected.generation == self.submitted {
                self.delivered = detected.generation;
                return Ok(detected);
            }
            debug!(
                "Dropping stale detection {} (latest is {})",
                detected.generation, self.submitted
            );
        }
    }

    /// Stops accepting photos and waits for the worker to finish its
    /// current one.
    pub fn shutdown(self) -> Result<()> {
        let Self {
            requests, handle, ..
        } = self;
        drop(requests);

        handle.join().map_err(|_| {
            warn!("Detection worker panicked");
            Error::SessionClosed
        })
    }
}

fn detect_loop<D: Detector>(mut detector: D, work: Receiver<Request>, done: Sender<Detected>) {
    while let Ok(next) = work.recv() {
        // skip ahead to the newest photo
        let Request { generation, image } = work.try_iter().last().unwrap_or(next);

        let span = span!(Level::DEBUG, "detect", generation);
        let _guard = span.enter();

        let detection = match detector.detect(&image) {
            Ok(d) => d,
            Err(e) => {
                warn!("Detection unavailable: {e:?}");
                Detection::unavailable()
            }
        };

        let detected = Detected {
            generation,
            image,
            detection,
        };
        if done.send(detected).is_err() {
            debug!("Session gone, stopping detection worker");
            break;
        }
    }
}
