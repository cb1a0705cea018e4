//! Face lists: small enrollment lists searchable by `face::find_similars`,
//! no training step required.

use serde_json::json;

use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{AddedFace, FaceList};
use crate::ImageSource;

/// Create an empty face list. `name` falls back to the id when absent.
pub fn create(
    client: &FaceClient,
    face_list_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name.unwrap_or(face_list_id),
        "userData": user_data,
    });
    client.request(
        RequestKind::FaceListCreate,
        Method::Put,
        &format!("facelists/{face_list_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

/// Delete a face list along with its persisted faces.
pub fn delete(client: &FaceClient, face_list_id: &str) -> Result<()> {
    client.request(
        RequestKind::FaceListDelete,
        Method::Delete,
        &format!("facelists/{face_list_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

/// Fetch a face list, including its persisted faces.
pub fn get(client: &FaceClient, face_list_id: &str) -> Result<FaceList> {
    let value = client.request(
        RequestKind::FaceListGet,
        Method::Get,
        &format!("facelists/{face_list_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn list(client: &FaceClient) -> Result<Vec<FaceList>> {
    let value = client.request(
        RequestKind::FaceListList,
        Method::Get,
        "facelists",
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn update(
    client: &FaceClient,
    face_list_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    client.request(
        RequestKind::FaceListUpdate,
        Method::Patch,
        &format!("facelists/{face_list_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

/// Enroll a face into the list. `target_face` ("left,top,width,height")
/// selects one face when the image contains several.
pub fn add_face(
    client: &FaceClient,
    image: ImageSource,
    face_list_id: &str,
    user_data: Option<&str>,
    target_face: Option<&str>,
) -> Result<AddedFace> {
    let query = [
        ("userData", user_data.map(str::to_string)),
        ("targetFace", target_face.map(str::to_string)),
    ];
    let value = client.request(
        RequestKind::FaceListAddFace,
        Method::Post,
        &format!("facelists/{face_list_id}/persistedFaces"),
        &query,
        image.into_payload()?,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn delete_face(
    client: &FaceClient,
    face_list_id: &str,
    persisted_face_id: &str,
) -> Result<()> {
    client.request(
        RequestKind::FaceListDeleteFace,
        Method::Delete,
        &format!("facelists/{face_list_id}/persistedFaces/{persisted_face_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}
