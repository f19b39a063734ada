use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Ready,
    Failed,
}

/// One queued humanize call: the documents submitted for it and whatever
/// has come back so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHumanizeJob {
    pub job_id: Uuid,
    /// Remote document ids, one per submitted chunk (`None` if submit failed).
    pub submitted_chunks: Vec<Option<String>>,
    pub status: JobStatus,
    /// Rewritten chunk text, aligned with `submitted_chunks`.
    pub result_chunks: Vec<Option<String>>,
}

impl RemoteHumanizeJob {
    pub fn new(chunk_count: usize) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            submitted_chunks: vec![None; chunk_count],
            status: JobStatus::Pending,
            result_chunks: vec![None; chunk_count],
        }
    }

    pub fn ready_chunks(&self) -> usize {
        self.result_chunks.iter().filter(|c| c.is_some()).count()
    }
}

struct Entry {
    job: RemoteHumanizeJob,
    touched_at: Instant,
}

/// Keyed job store with expiry. The lock is never held across an `.await`.
pub struct JobRegistry {
    ttl: Duration,
    jobs: Mutex<HashMap<Uuid, Entry>>,
}

impl JobRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Store `job`, evicting expired entries first.
    pub fn insert(&self, job: RemoteHumanizeJob) -> Uuid {
        let id = job.job_id;
        let mut jobs = self.lock();
        let ttl = self.ttl;
        jobs.retain(|_, entry| entry.touched_at.elapsed() < ttl);
        jobs.insert(
            id,
            Entry {
                job,
                touched_at: Instant::now(),
            },
        );
        id
    }

    /// Apply `f` to a live job and restart its expiry window. Returns
    /// `false` if it is gone or expired.
    pub fn update(&self, id: Uuid, f: impl FnOnce(&mut RemoteHumanizeJob)) -> bool {
        let mut jobs = self.lock();
        match jobs.get_mut(&id) {
            Some(entry) if entry.touched_at.elapsed() < self.ttl => {
                f(&mut entry.job);
                entry.touched_at = Instant::now();
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<RemoteHumanizeJob> {
        self.lock()
            .get(&id)
            .filter(|entry| entry.touched_at.elapsed() < self.ttl)
            .map(|entry| entry.job.clone())
    }

    pub fn remove(&self, id: Uuid) -> Option<RemoteHumanizeJob> {
        self.lock().remove(&id).map(|entry| entry.job)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
