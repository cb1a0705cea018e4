//! Persisted faces of a person within a large person group.

use serde_json::json;

use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{AddedFace, PersistedFace};
use crate::ImageSource;

/// Enroll a representative face for identification within a large person
/// group; the returned persisted face id does not expire.
pub fn add(
    client: &FaceClient,
    image: ImageSource,
    large_person_group_id: &str,
    person_id: &str,
    user_data: Option<&str>,
    target_face: Option<&str>,
) -> Result<AddedFace> {
    let query = [
        ("userData", user_data.map(str::to_string)),
        ("targetFace", target_face.map(str::to_string)),
    ];
    let value = client.request(
        RequestKind::LargePersonGroupPersonAddFace,
        Method::Post,
        &format!("largepersongroups/{large_person_group_id}/persons/{person_id}/persistedFaces"),
        &query,
        image.into_payload()?,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn delete(
    client: &FaceClient,
    large_person_group_id: &str,
    person_id: &str,
    persisted_face_id: &str,
) -> Result<()> {
    client.request(
        RequestKind::LargePersonGroupPersonDeleteFace,
        Method::Delete,
        &format!(
            "largepersongroups/{large_person_group_id}/persons/{person_id}/persistedFaces/{persisted_face_id}"
        ),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get(
    client: &FaceClient,
    large_person_group_id: &str,
    person_id: &str,
    persisted_face_id: &str,
) -> Result<PersistedFace> {
    let value = client.request(
        RequestKind::LargePersonGroupPersonGetFace,
        Method::Get,
        &format!(
            "largepersongroups/{large_person_group_id}/persons/{person_id}/persistedFaces/{persisted_face_id}"
        ),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn update(
    client: &FaceClient,
    large_person_group_id: &str,
    person_id: &str,
    persisted_face_id: &str,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({ "userData": user_data });
    client.request(
        RequestKind::LargePersonGroupPersonUpdateFace,
        Method::Patch,
        &format!(
            "largepersongroups/{large_person_group_id}/persons/{person_id}/persistedFaces/{persisted_face_id}"
        ),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}
