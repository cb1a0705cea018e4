//! Large person groups: the high-capacity person group variant with the same
//! explicit training step.

use serde_json::json;

use super::ListOptions;
use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{LargePersonGroup, TrainingStatus};

/// Create a large person group. `name` falls back to the id when absent.
pub fn create(
    client: &FaceClient,
    large_person_group_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name.unwrap_or(large_person_group_id),
        "userData": user_data,
    });
    client.request(
        RequestKind::LargePersonGroupCreate,
        Method::Put,
        &format!("largepersongroups/{large_person_group_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

pub fn delete(client: &FaceClient, large_person_group_id: &str) -> Result<()> {
    client.request(
        RequestKind::LargePersonGroupDelete,
        Method::Delete,
        &format!("largepersongroups/{large_person_group_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get(client: &FaceClient, large_person_group_id: &str) -> Result<LargePersonGroup> {
    let value = client.request(
        RequestKind::LargePersonGroupGet,
        Method::Get,
        &format!("largepersongroups/{large_person_group_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn get_status(client: &FaceClient, large_person_group_id: &str) -> Result<TrainingStatus> {
    let value = client.request(
        RequestKind::LargePersonGroupGetTrainingStatus,
        Method::Get,
        &format!("largepersongroups/{large_person_group_id}/training"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn list(client: &FaceClient, options: &ListOptions) -> Result<Vec<LargePersonGroup>> {
    let value = client.request(
        RequestKind::LargePersonGroupList,
        Method::Get,
        "largepersongroups",
        &options.query(),
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

/// Queue a training task; poll with `get_status` or block in
/// `wait_for_training`.
pub fn train(client: &FaceClient, large_person_group_id: &str) -> Result<()> {
    client.request(
        RequestKind::LargePersonGroupTrain,
        Method::Post,
        &format!("largepersongroups/{large_person_group_id}/train"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn update(
    client: &FaceClient,
    large_person_group_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    client.request(
        RequestKind::LargePersonGroupUpdate,
        Method::Patch,
        &format!("largepersongroups/{large_person_group_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

/// Block until training reaches a terminal state, backing off exponentially.
pub fn wait_for_training(
    client: &FaceClient,
    large_person_group_id: &str,
) -> Result<TrainingStatus> {
    super::poll_training(
        client,
        "large person group",
        large_person_group_id,
        get_status,
    )
}
