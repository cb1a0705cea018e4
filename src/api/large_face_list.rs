//! Large face lists: the high-capacity face list variant. Requires an
//! explicit training step before `face::find_similars` can search it.

use serde_json::json;

use super::ListOptions;
use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{LargeFaceList, TrainingStatus};

/// Create an empty large face list. `name` falls back to the id when absent.
pub fn create(
    client: &FaceClient,
    large_face_list_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name.unwrap_or(large_face_list_id),
        "userData": user_data,
    });
    client.request(
        RequestKind::LargeFaceListCreate,
        Method::Put,
        &format!("largefacelists/{large_face_list_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

pub fn delete(client: &FaceClient, large_face_list_id: &str) -> Result<()> {
    client.request(
        RequestKind::LargeFaceListDelete,
        Method::Delete,
        &format!("largefacelists/{large_face_list_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn get(client: &FaceClient, large_face_list_id: &str) -> Result<LargeFaceList> {
    let value = client.request(
        RequestKind::LargeFaceListGet,
        Method::Get,
        &format!("largefacelists/{large_face_list_id}"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn get_status(client: &FaceClient, large_face_list_id: &str) -> Result<TrainingStatus> {
    let value = client.request(
        RequestKind::LargeFaceListGetTrainingStatus,
        Method::Get,
        &format!("largefacelists/{large_face_list_id}/training"),
        &[],
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

pub fn list(client: &FaceClient, options: &ListOptions) -> Result<Vec<LargeFaceList>> {
    let value = client.request(
        RequestKind::LargeFaceListList,
        Method::Get,
        "largefacelists",
        &options.query(),
        Payload::Empty,
    )?;
    Ok(serde_json::from_value(value)?)
}

/// Queue a training task; poll with `get_status` or block in
/// `wait_for_training`.
pub fn train(client: &FaceClient, large_face_list_id: &str) -> Result<()> {
    client.request(
        RequestKind::LargeFaceListTrain,
        Method::Post,
        &format!("largefacelists/{large_face_list_id}/train"),
        &[],
        Payload::Empty,
    )?;
    Ok(())
}

pub fn update(
    client: &FaceClient,
    large_face_list_id: &str,
    name: Option<&str>,
    user_data: Option<&str>,
) -> Result<()> {
    let body = json!({
        "name": name,
        "userData": user_data,
    });
    client.request(
        RequestKind::LargeFaceListUpdate,
        Method::Patch,
        &format!("largefacelists/{large_face_list_id}"),
        &[],
        Payload::Json(body),
    )?;
    Ok(())
}

/// Block until training reaches a terminal state, backing off exponentially.
pub fn wait_for_training(
    client: &FaceClient,
    large_face_list_id: &str,
) -> Result<TrainingStatus> {
    super::poll_training(client, "large face list", large_face_list_id, get_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::models::TrainingState;

    fn client_for(server: &mockito::ServerGuard) -> FaceClient {
        FaceClient::new(FaceConfig::new("test-key", server.url()))
    }

    #[test]
    fn get_status_parses_training_payload() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/largefacelists/big/training")
            .with_status(200)
            .with_body(r#"{"status": "running", "createdDateTime": "2018-10-15T11:51:27.686Z"}"#)
            .create();

        let client = client_for(&server);
        let status = get_status(&client, "big").unwrap();
        assert_eq!(status.status, TrainingState::Running);
        assert!(!status.status.is_terminal());
    }

    #[test]
    fn create_uses_put_on_list_path() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/largefacelists/big")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"name": "Big List", "userData": "set"}),
            ))
            .with_status(200)
            .with_body("")
            .create();

        let client = client_for(&server);
        create(&client, "big", Some("Big List"), Some("set")).unwrap();
        mock.assert();
    }
}
