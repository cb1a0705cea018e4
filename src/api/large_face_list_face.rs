//! Persisted faces within a large face list.

use serde_json::json;

use super::ListOptions;
use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{AddedFace, PersistedFace};
use crate::ImageSource;

/// Enroll a face into the large face list. `target_face`
/// ("left,top,width,height") selects one face when the image holds several.
pub fn add(
    client: &FaceClient,
    image: ImageSource,
    large_face_list_id: &str,
    user_data: Option<&str>,
    target_face: Option<&str>,
) -> Result<AddedFace> {
    let query = [
        ("userData", user_data.map(str::to_string)),
        ("targetFace", target_face.map(str::to_string)),
    ];
    let value = client.request(
        RequestKind::LargeFaceListAddFace,
        Method::Post,
        &format!("largefacelists/{large_face_list_id}/persistedFaces"),
        &query,
        image.into_payload()?,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn delete(
    client: &FaceClient,
    large_face_list_id: &str,
    persisted_face_id: &str,
) -> Result<()> {
    client.request(
        RequestKind::LargeFaceListDeleteFace,
        Method::Delete,
        &format!("largefacelists/{large_face_list_id}/persistedFaces/{persisted_face_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get(
    client: &FaceClient,
    large_face_list_id: &str,
    persisted_face_id: &str,
) -> Result<PersistedFace> {
    let value = client.request(
        RequestKind::LargeFaceListGetFace,
        Method::Get,
        &format!("largefacelists/{large_face_list_id}/persistedFaces/{persisted_face_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn list(
    client: &FaceClient,
    large_face_list_id: &str,
    options: &ListOptions,
) -> Result<Vec<PersistedFace>> {
    let value = client.request(
        RequestKind::LargeFaceListListFace,
        Method::Get,
        &format!("largefacelists/{large_face_list_id}/persistedFaces"),
        &options.query(),
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn update(
    client: &FaceClient,
    large_face_list_id: &str,
    persisted_face_id: &str,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({ "userData": user_data });
    client.request(
        RequestKind::LargeFaceListUpdateFace,
        Method::Patch,
        &format!("largefacelists/{large_face_list_id}/persistedFaces/{persisted_face_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}
