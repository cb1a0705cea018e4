//! Person groups: containers of enrolled persons that must be trained before
//! `face::identify` can use them.

use serde_json::json;

use super::ListOptions;
use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{PersonGroup, TrainingStatus};

/// Create a person group. `name` falls back to the id when absent.
pub fn create(
    client: &FaceClient,
    person_group_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name.unwrap_or(person_group_id),
        "userData": user_data,
    });
    client.request(
        RequestKind::PersonGroupCreate,
        Method::Put,
        &format!("persongroups/{person_group_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

/// Delete a person group and every person and face enrolled in it.
pub fn delete(client: &FaceClient, person_group_id: &str) -> Result<()> {
    client.request(
        RequestKind::PersonGroupDelete,
        Method::Delete,
        &format!("persongroups/{person_group_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get(client: &FaceClient, person_group_id: &str) -> Result<PersonGroup> {
    let value = client.request(
        RequestKind::PersonGroupGet,
        Method::Get,
        &format!("persongroups/{person_group_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn get_status(client: &FaceClient, person_group_id: &str) -> Result<TrainingStatus> {
    let value = client.request(
        RequestKind::PersonGroupGetTrainingStatus,
        Method::Get,
        &format!("persongroups/{person_group_id}/training"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn list(client: &FaceClient, options: &ListOptions) -> Result<Vec<PersonGroup>> {
    let value = client.request(
        RequestKind::PersonGroupList,
        Method::Get,
        "persongroups",
        &options.query(),
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

/// Queue a training task; the service answers 202 and trains in the
/// background. Poll with `get_status` or block in `wait_for_training`.
pub fn train(client: &FaceClient, person_group_id: &str) -> Result<()> {
    client.request(
        RequestKind::PersonGroupTrain,
        Method::Post,
        &format!("persongroups/{person_group_id}/train"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn update(
    client: &FaceClient,
    person_group_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    client.request(
        RequestKind::PersonGroupUpdate,
        Method::Patch,
        &format!("persongroups/{person_group_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

/// Block until training reaches a terminal state, backing off exponentially.
pub fn wait_for_training(client: &FaceClient, person_group_id: &str) -> Result<TrainingStatus> {
    super::poll_training(client, "person group", person_group_id, get_status)
}
