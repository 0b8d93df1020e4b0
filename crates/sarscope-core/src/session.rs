//! Upload session state machine.
//!
//! A [`Workflow`] owns at most one session at a time and moves it
//! through `Idle -> Uploading -> {Complete | Error}`. Every submission
//! and every reset advances the [`SessionId`]; timer ticks and service
//! responses carry the id they were issued under and are discarded when
//! it no longer matches.
//!
//! The workflow performs no I/O. Callers start the timer and the
//! network request from the [`Ticket`] returned by
//! [`Workflow::submit`], then feed results back through
//! [`Workflow::tick`] and [`Workflow::settle`].

use std::fmt;

use crate::download::{DownloadRequest, ImageKind, download_filename};
use crate::progress::ProgressSchedule;
use crate::service::{ConvertError, ConvertedPair};
use crate::upload::{UploadFile, ValidationError, validate_file};

/// Saved name used when the uploaded file had no name.
pub const FALLBACK_DOWNLOAD_NAME: &str = "converted_image.jpg";

/// Identity of one upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse status for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Waiting for a file.
    Idle,
    /// Request in flight, progress below the processing threshold.
    Uploading,
    /// Request still in flight, progress at or past the processing
    /// threshold. Same machine state as `Uploading`.
    Processing,
    /// Both result images are available.
    Complete,
    /// The attempt failed.
    Error,
}

impl Status {
    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Uploading | Self::Processing)
    }
}

/// The session's state, carrying exactly the data valid in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No active session.
    Idle,
    /// Submitted and waiting for the service.
    Uploading {
        /// The file being converted.
        file: UploadFile,
        /// Simulated progress, below 100.
        progress: u8,
    },
    /// The service returned both images.
    Complete {
        /// The converted file.
        file: UploadFile,
        /// Locators for the stored original and the RGB result.
        result: ConvertedPair,
    },
    /// The service or the network failed.
    Error {
        /// The file that failed.
        file: UploadFile,
        /// User-facing reason.
        message: String,
    },
}

/// Handle for the work a caller must start after a submission.
#[derive(Debug, Clone)]
pub struct Ticket {
    /// Session the timer ticks and the response must be tagged with.
    pub id: SessionId,
    /// The accepted file, to be sent to the service.
    pub file: UploadFile,
}

/// Why [`Workflow::submit`] refused a file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The file failed validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A submission is already outstanding for this workflow.
    #[error("a conversion is already in progress")]
    InFlight,
}

/// Actions that need a finished conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// Called outside the `Complete` state.
    #[error("no converted image is available yet")]
    NotComplete,
}

/// Result of a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Progress moved to the given value.
    Advanced(u8),
    /// Progress is at the cap; the timer can stop.
    Saturated,
    /// The tick belongs to a session that is no longer current.
    Stale,
}

/// Result of delivering a service response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The session moved to `Complete`.
    Completed,
    /// The session moved to `Error`.
    Failed,
    /// The response belongs to a session that is no longer current.
    Stale,
}

/// Owner of the single upload session of one workflow instance.
#[derive(Debug, Clone)]
pub struct Workflow {
    current: SessionId,
    phase: Phase,
    schedule: ProgressSchedule,
    max_upload_bytes: u64,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(ProgressSchedule::default(), crate::config::MAX_UPLOAD_BYTES)
    }
}

impl Workflow {
    /// Create an idle workflow.
    #[must_use]
    pub const fn new(schedule: ProgressSchedule, max_upload_bytes: u64) -> Self {
        Self {
            current: SessionId(0),
            phase: Phase::Idle,
            schedule,
            max_upload_bytes,
        }
    }

    /// The identity responses must carry to be applied.
    #[must_use]
    pub const fn current_session(&self) -> SessionId {
        self.current
    }

    /// The progress timer settings.
    #[must_use]
    pub const fn schedule(&self) -> &ProgressSchedule {
        &self.schedule
    }

    /// The full session state.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Coarse status, with `Processing` derived from progress.
    #[must_use]
    pub const fn status(&self) -> Status {
        match &self.phase {
            Phase::Idle => Status::Idle,
            Phase::Uploading { progress, .. } => {
                if *progress >= self.schedule.processing_threshold {
                    Status::Processing
                } else {
                    Status::Uploading
                }
            }
            Phase::Complete { .. } => Status::Complete,
            Phase::Error { .. } => Status::Error,
        }
    }

    /// Percentage for the progress bar: 100 exactly when complete,
    /// 0 when idle or failed.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        match &self.phase {
            Phase::Uploading { progress, .. } => *progress,
            Phase::Complete { .. } => 100,
            Phase::Idle | Phase::Error { .. } => 0,
        }
    }

    /// The file of the active session, if any.
    #[must_use]
    pub const fn file(&self) -> Option<&UploadFile> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Uploading { file, .. }
            | Phase::Complete { file, .. }
            | Phase::Error { file, .. } => Some(file),
        }
    }

    /// The failure reason, only in `Error`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Both result locators, only in `Complete`.
    #[must_use]
    pub const fn result(&self) -> Option<&ConvertedPair> {
        match &self.phase {
            Phase::Complete { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Start converting `file`.
    ///
    /// Accepted from `Idle`, `Complete` and `Error`; the latter two are
    /// replaced by the new session. The returned [`Ticket`] carries the
    /// new session id for the timer and the request.
    ///
    /// # Errors
    ///
    /// [`SubmitError::InFlight`] while a request is outstanding, or
    /// [`SubmitError::Invalid`] if the file fails validation. The
    /// current session is left untouched in both cases.
    pub fn submit(&mut self, file: UploadFile) -> Result<Ticket, SubmitError> {
        if matches!(self.phase, Phase::Uploading { .. }) {
            return Err(SubmitError::InFlight);
        }
        validate_file(&file, self.max_upload_bytes)?;

        let id = self.advance_session();
        self.phase = Phase::Uploading {
            file: file.clone(),
            progress: 0,
        };
        Ok(Ticket { id, file })
    }

    /// Apply one progress timer tick issued for session `id`.
    pub fn tick(&mut self, id: SessionId) -> Tick {
        if id != self.current {
            return Tick::Stale;
        }
        let Phase::Uploading { progress, .. } = &mut self.phase else {
            return Tick::Stale;
        };
        if self.schedule.is_saturated(*progress) {
            return Tick::Saturated;
        }
        *progress = self.schedule.advance(*progress);
        Tick::Advanced(*progress)
    }

    /// Deliver the service outcome for session `id`.
    ///
    /// Moves `Uploading` to `Complete` or `Error`. Outcomes for any
    /// other session, or arriving when nothing is in flight, are
    /// ignored.
    pub fn settle(
        &mut self,
        id: SessionId,
        outcome: Result<ConvertedPair, ConvertError>,
    ) -> Settled {
        if id != self.current {
            return Settled::Stale;
        }
        let Phase::Uploading { file, .. } = &self.phase else {
            return Settled::Stale;
        };
        let file = file.clone();
        match outcome {
            Ok(result) => {
                self.phase = Phase::Complete { file, result };
                Settled::Completed
            }
            Err(e) => {
                self.phase = Phase::Error {
                    file,
                    message: e.to_string(),
                };
                Settled::Failed
            }
        }
    }

    /// Discard the session and return to `Idle`.
    ///
    /// Valid from any state. The session id advances so that a late
    /// response from the discarded attempt is ignored.
    pub fn reset(&mut self) {
        self.advance_session();
        self.phase = Phase::Idle;
    }

    /// Build a save request for one of the result images.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NotComplete`] outside the `Complete` state.
    pub fn download(&self, kind: ImageKind) -> Result<DownloadRequest, WorkflowError> {
        let Phase::Complete { file, result } = &self.phase else {
            return Err(WorkflowError::NotComplete);
        };
        let url = match kind {
            ImageKind::Original => &result.original,
            ImageKind::Processed => &result.processed,
        };
        Ok(DownloadRequest {
            url: url.clone(),
            filename: download_filename(kind, file.name(), FALLBACK_DOWNLOAD_NAME),
        })
    }

    /// Confirm that the finished result is in the gallery.
    ///
    /// The service stores every conversion, so this only checks that
    /// there is a result to confirm.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NotComplete`] outside the `Complete` state.
    pub const fn add_to_gallery(&self) -> Result<(), WorkflowError> {
        match self.phase {
            Phase::Complete { .. } => Ok(()),
            _ => Err(WorkflowError::NotComplete),
        }
    }

    const fn advance_session(&mut self) -> SessionId {
        self.current = SessionId(self.current.0.wrapping_add(1));
        self.current
    }
}
