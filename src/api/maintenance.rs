//! Destructive sweeps that clear every resource of a kind, paced to stay
//! under the service rate limits.

use std::time::Duration;

use tracing::info;

use super::{face_list, large_face_list, large_person_group, person_group, ListOptions};
use crate::client::FaceClient;
use crate::error::Result;

const PACE: Duration = Duration::from_secs(1);

/// Delete all face lists and their persisted faces.
pub fn clear_face_lists(client: &FaceClient) -> Result<()> {
    let lists = face_list::list(client)?;
    std::thread::sleep(PACE);
    for entry in lists {
        info!(face_list_id = %entry.face_list_id, "deleting face list");
        face_list::delete(client, &entry.face_list_id)?;
        std::thread::sleep(PACE);
    }
    Ok(())
}

/// Delete all person groups and everyone enrolled in them.
pub fn clear_person_groups(client: &FaceClient) -> Result<()> {
    let groups = person_group::list(client, &ListOptions::default())?;
    std::thread::sleep(PACE);
    for entry in groups {
        info!(person_group_id = %entry.person_group_id, "deleting person group");
        person_group::delete(client, &entry.person_group_id)?;
        std::thread::sleep(PACE);
    }
    Ok(())
}

/// Delete all large face lists and their persisted faces.
pub fn clear_large_face_lists(client: &FaceClient) -> Result<()> {
    let lists = large_face_list::list(client, &ListOptions::default())?;
    std::thread::sleep(PACE);
    for entry in lists {
        info!(large_face_list_id = %entry.large_face_list_id, "deleting large face list");
        large_face_list::delete(client, &entry.large_face_list_id)?;
        std::thread::sleep(PACE);
    }
    Ok(())
}

/// Delete all large person groups and everyone enrolled in them.
pub fn clear_large_person_groups(client: &FaceClient) -> Result<()> {
    let groups = large_person_group::list(client, &ListOptions::default())?;
    std::thread::sleep(PACE);
    for entry in groups {
        info!(large_person_group_id = %entry.large_person_group_id, "deleting large person group");
        large_person_group::delete(client, &entry.large_person_group_id)?;
        std::thread::sleep(PACE);
    }
    Ok(())
}
