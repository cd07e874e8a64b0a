//! Try-on request handling with a remote-first strategy.
//!
//! A remote garment-synthesis service is preferred when one is configured and
//! attached; the rule-based compositor is the fallback. The remote service and
//! object storage are only described by the [`RemoteTryOn`] and
//! [`ObjectStore`] traits; transports live outside this crate.

use std::thread;

use image::{DynamicImage, RgbaImage};

use crate::{
    codec,
    config::{Provider, TryOnConfig},
    error::{ImageRole, TryOnError},
    tryon::composite::composite,
};

/// Uploads images so the remote service can fetch them
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns a publicly reachable URL.
    fn upload(&self, bytes: &[u8], key: &str) -> Result<String, TryOnError>;
}

/// Extra parameters for a remote try-on job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobParams {
    /// Category label as given by the caller
    pub category: String,
}

/// Immediate answer to a job submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSubmission {
    /// The job was queued and must be polled
    Pending { task_id: String },
    /// The service answered synchronously
    Ready { result_url: String },
}

/// State of a queued job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Done { result_url: String },
    Failed { reason: String },
}

/// Remote garment-synthesis service
pub trait RemoteTryOn: Send + Sync {
    fn submit_job(
        &self,
        person_url: &str,
        garment_url: &str,
        params: &JobParams,
    ) -> Result<JobSubmission, TryOnError>;

    fn poll_job(&self, task_id: &str) -> Result<JobStatus, TryOnError>;

    /// Returns `true` when the service is reachable and credentials are valid.
    fn health_check(&self) -> bool {
        true
    }
}

/// Remote service plus the storage it reads its inputs from
pub struct RemoteBackend {
    pub service: Box<dyn RemoteTryOn>,
    pub storage: Box<dyn ObjectStore>,
}

/// Result of a try-on request
#[derive(Debug, Clone, PartialEq)]
pub enum TryOnOutcome {
    /// The remote service produced the image at `result_url`
    Remote { result_url: String },
    /// The local compositor produced `image`; `png` is its lossless encoding
    Local { image: RgbaImage, png: Vec<u8> },
}

/// Entry point for try-on requests
pub struct TryOnManager {
    config: TryOnConfig,
    remote: Option<RemoteBackend>,
}

impl TryOnManager {
    pub fn new(config: TryOnConfig) -> Self {
        Self {
            config,
            remote: None,
        }
    }

    /// Attaches a remote backend. It is only used when the provider is
    /// [`Provider::Remote`].
    pub fn with_remote(
        mut self,
        service: impl RemoteTryOn + 'static,
        storage: impl ObjectStore + 'static,
    ) -> Self {
        self.remote = Some(RemoteBackend {
            service: Box::new(service),
            storage: Box::new(storage),
        });
        self
    }

    pub fn config(&self) -> &TryOnConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: TryOnConfig) {
        self.config = config;
    }

    /// Returns `true` when the preferred backend is usable.
    ///
    /// The local compositor is always available.
    pub fn test_connection(&self) -> bool {
        match self.active_remote() {
            Some(remote) => remote.service.health_check(),
            None => true,
        }
    }

    fn active_remote(&self) -> Option<&RemoteBackend> {
        match self.config.provider {
            Provider::Remote => self.remote.as_ref(),
            Provider::Local => None,
        }
    }

    /// Dresses the person in `person` with the garment in `garment`.
    ///
    /// Both inputs are decoded (and downscaled to the configured maximum)
    /// before any backend is contacted, so undecodable input fails fast for
    /// both paths.
    ///
    /// # Errors
    ///
    /// * `TryOnError::Composite` - When an input cannot be decoded or is degenerate
    /// * `TryOnError::Upload`, `Remote`, `JobFailed`, `PollTimeout` - When the
    ///   remote path fails and local fallback is disabled
    pub fn try_on(
        &self,
        person: &[u8],
        garment: &[u8],
        label: &str,
    ) -> Result<TryOnOutcome, TryOnError> {
        let person = self.prepare(person, ImageRole::Person)?;
        let garment = self.prepare(garment, ImageRole::Garment)?;

        match self.active_remote() {
            Some(remote) => match self.try_on_remote(remote, &person, &garment, label) {
                Ok(outcome) => Ok(outcome),
                Err(err) if self.config.fallback_to_local => {
                    log::warn!("remote try-on failed, using local compositor: {err}");
                    self.try_on_local(&person, &garment, label)
                }
                Err(err) => Err(err),
            },
            None => {
                if self.config.provider == Provider::Remote {
                    log::debug!("no remote backend attached, using local compositor");
                }
                self.try_on_local(&person, &garment, label)
            }
        }
    }

    fn prepare(&self, bytes: &[u8], role: ImageRole) -> Result<DynamicImage, TryOnError> {
        let image = codec::decode(bytes, role)?;
        let image = match self.config.max_input_dimension {
            Some(limit) => codec::fit_within(image, limit, limit)?,
            None => image,
        };
        Ok(image)
    }

    fn try_on_local(
        &self,
        person: &DynamicImage,
        garment: &DynamicImage,
        label: &str,
    ) -> Result<TryOnOutcome, TryOnError> {
        let image = composite(person, garment, label)?;
        let png = codec::encode_png(&image)?;
        Ok(TryOnOutcome::Local { image, png })
    }

    fn try_on_remote(
        &self,
        remote: &RemoteBackend,
        person: &DynamicImage,
        garment: &DynamicImage,
        label: &str,
    ) -> Result<TryOnOutcome, TryOnError> {
        let person_url = self.upload(remote, person, ImageRole::Person)?;
        let garment_url = self.upload(remote, garment, ImageRole::Garment)?;

        let params = JobParams {
            category: label.to_string(),
        };
        let submission = remote.service.submit_job(&person_url, &garment_url, &params)?;
        log::debug!("remote try-on submitted: {submission:?}");

        let result_url = match submission {
            JobSubmission::Ready { result_url } => result_url,
            JobSubmission::Pending { task_id } => self.poll_until_done(remote, &task_id)?,
        };
        Ok(TryOnOutcome::Remote { result_url })
    }

    fn upload(
        &self,
        remote: &RemoteBackend,
        image: &DynamicImage,
        role: ImageRole,
    ) -> Result<String, TryOnError> {
        let png = codec::encode_png(&image.to_rgba8())?;
        let key = storage_key(&self.config.key_prefix, role, &png);
        remote.storage.upload(&png, &key)
    }

    fn poll_until_done(&self, remote: &RemoteBackend, task_id: &str) -> Result<String, TryOnError> {
        let attempts = self.config.max_poll_attempts;
        for attempt in 1..=attempts {
            if attempt > 1 && !self.config.poll_interval.is_zero() {
                thread::sleep(self.config.poll_interval);
            }

            match remote.service.poll_job(task_id)? {
                JobStatus::Pending => log::trace!("job {task_id} pending ({attempt}/{attempts})"),
                JobStatus::Done { result_url } => return Ok(result_url),
                JobStatus::Failed { reason } => {
                    return Err(TryOnError::JobFailed {
                        task_id: task_id.to_string(),
                        reason,
                    })
                }
            }
        }

        Err(TryOnError::PollTimeout {
            task_id: task_id.to_string(),
            attempts,
        })
    }
}

/// Content-addressed key: identical uploads map to the same object.
fn storage_key(prefix: &str, role: ImageRole, bytes: &[u8]) -> String {
    format!("{prefix}/{role}-{:x}.png", md5::compute(bytes))
}
