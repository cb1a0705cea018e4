//! Persons enrolled within a large person group.

use serde_json::json;

use super::ListOptions;
use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{CreatedPerson, Person};

pub fn create(
    client: &FaceClient,
    large_person_group_id: &str,
    name: &str,
    user_data: Option<&str>,
) -> Result<CreatedPerson> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    let value = client.request(
        RequestKind::LargePersonGroupPersonCreate,
        Method::Post,
        &format!("largepersongroups/{large_person_group_id}/persons"),
        &[],
        Payload::Json(body),
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn delete(
    client: &FaceClient,
    large_person_group_id: &str,
    person_id: &str,
) -> Result<()> {
    client.request(
        RequestKind::LargePersonGroupPersonDelete,
        Method::Delete,
        &format!("largepersongroups/{large_person_group_id}/persons/{person_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get(
    client: &FaceClient,
    large_person_group_id: &str,
    person_id: &str,
) -> Result<Person> {
    let value = client.request(
        RequestKind::LargePersonGroupPersonGet,
        Method::Get,
        &format!("largepersongroups/{large_person_group_id}/persons/{person_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn list(
    client: &FaceClient,
    large_person_group_id: &str,
    options: &ListOptions,
) -> Result<Vec<Person>> {
    let value = client.request(
        RequestKind::LargePersonGroupPersonList,
        Method::Get,
        &format!("largepersongroups/{large_person_group_id}/persons"),
        &options.query(),
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn update(
    client: &FaceClient,
    large_person_group_id: &str,
    person_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    client.request(
        RequestKind::LargePersonGroupPersonUpdate,
        Method::Patch,
        &format!("largepersongroups/{large_person_group_id}/persons/{person_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}
