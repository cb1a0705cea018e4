pub mod face;
pub mod face_list;
pub mod large_face_list;
pub mod large_face_list_face;
pub mod large_person_group;
pub mod large_person_group_person;
pub mod large_person_group_person_face;
pub mod maintenance;
pub mod person;
pub mod person_group;

use std::time::Duration;

use tracing::info;

use crate::client::FaceClient;
use crate::error::Result;
use crate::models::TrainingStatus;

/// Paging window for list calls. `start` is an exclusive lower bound on the
/// resource id; `top` caps the page size (service default 1000).
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub start: Option<String>,
    pub top: Option<u32>,
}

impl ListOptions {
    pub(crate) fn query(&self) -> [(&'static str, Option<String>); 2] {
        [
            ("start", self.start.clone()),
            ("top", self.top.map(|top| top.to_string())),
        ]
    }
}

/// Poll a training-status endpoint until the service reports a terminal
/// state, sleeping 2^n seconds between polls with n growing from 1. Returns
/// the final status whether training succeeded or failed.
fn poll_training(
    client: &FaceClient,
    resource: &str,
    id: &str,
    get_status: impl Fn(&FaceClient, &str) -> Result<TrainingStatus>,
) -> Result<TrainingStatus> {
    let mut attempt: u32 = 1;
    loop {
        let status = get_status(client, id)?;
        if status.status.is_terminal() {
            return Ok(status);
        }
        info!(resource, id, attempt, "training still in progress");
        std::thread::sleep(Duration::from_secs(2u64.saturating_pow(attempt)));
        attempt += 1;
    }
}
