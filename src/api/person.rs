//! Persons enrolled within a person group, plus their persisted faces.

use serde_json::json;

use super::ListOptions;
use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{AddedFace, CreatedPerson, PersistedFace, Person};
use crate::ImageSource;

/// Create a person with no registered faces; enroll faces with `add_face`.
pub fn create(
    client: &FaceClient,
    person_group_id: &str,
    name: &str,
    user_data: Option<&str>,
) -> Result<CreatedPerson> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    let value = client.request(
        RequestKind::PersonCreate,
        Method::Post,
        &format!("persongroups/{person_group_id}/persons"),
        &[],
        Payload::Json(body),
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn delete(client: &FaceClient, person_group_id: &str, person_id: &str) -> Result<()> {
    client.request(
        RequestKind::PersonDelete,
        Method::Delete,
        &format!("persongroups/{person_group_id}/persons/{person_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get(client: &FaceClient, person_group_id: &str, person_id: &str) -> Result<Person> {
    let value = client.request(
        RequestKind::PersonGet,
        Method::Get,
        &format!("persongroups/{person_group_id}/persons/{person_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn list(
    client: &FaceClient,
    person_group_id: &str,
    options: &ListOptions,
) -> Result<Vec<Person>> {
    let value = client.request(
        RequestKind::PersonList,
        Method::Get,
        &format!("persongroups/{person_group_id}/persons"),
        &options.query(),
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn update(
    client: &FaceClient,
    person_group_id: &str,
    person_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    client.request(
        RequestKind::PersonUpdate,
        Method::Patch,
        &format!("persongroups/{person_group_id}/persons/{person_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

/// Enroll a representative face for identification. The returned persisted
/// face id does not expire.
pub fn add_face(
    client: &FaceClient,
    image: ImageSource,
    person_group_id: &str,
    person_id: &str,
    user_data: Option<&str>,
    target_face: Option<&str>,
) -> Result<AddedFace> {
    let query = [
        ("userData", user_data.map(str::to_string)),
        ("targetFace", target_face.map(str::to_string)),
    ];
    let value = client.request(
        RequestKind::PersonAddFace,
        Method::Post,
        &format!("persongroups/{person_group_id}/persons/{person_id}/persistedFaces"),
        &query,
        image.into_payload()?,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn delete_face(
    client: &FaceClient,
    person_group_id: &str,
    person_id: &str,
    persisted_face_id: &str,
) -> Result<()> {
    client.request(
        RequestKind::PersonDeleteFace,
        Method::Delete,
        &format!(
            "persongroups/{person_group_id}/persons/{person_id}/persistedFaces/{persisted_face_id}"
        ),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get_face(
    client: &FaceClient,
    person_group_id: &str,
    person_id: &str,
    persisted_face_id: &str,
) -> Result<PersistedFace> {
    let value = client.request(
        RequestKind::PersonGetFace,
        Method::Get,
        &format!(
            "persongroups/{person_group_id}/persons/{person_id}/persistedFaces/{persisted_face_id}"
        ),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn update_face(
    client: &FaceClient,
    person_group_id: &str,
    person_id: &str,
    persisted_face_id: &str,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({ "userData": user_data });
    client.request(
        RequestKind::PersonUpdateFace,
        Method::Patch,
        &format!(
            "persongroups/{person_group_id}/persons/{person_id}/persistedFaces/{persisted_face_id}"
        ),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}
