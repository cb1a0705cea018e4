//! Stateless face operations: detection plus comparisons between transient
//! face ids and enrolled resources.

use serde::Serialize;
use serde_json::json;

use crate::bridge::RequestKind;
use crate::client::image::Payload;
use crate::client::{FaceClient, Method};
use crate::error::Result;
use crate::models::{DetectedFace, GroupingResult, IdentifyResult, SimilarFace, VerifyResult};
use crate::ImageSource;

#[derive(Debug, Clone)]
pub struct DetectOptions {
    pub return_face_id: bool,
    pub return_face_landmarks: bool,
    /// Comma-separated attribute names, e.g. `"age,gender,emotion"`.
    pub return_face_attributes: Option<String>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            return_face_id: true,
            return_face_landmarks: false,
            return_face_attributes: None,
        }
    }
}

/// Detect faces in an image and return transient face ids with rectangles,
/// plus landmarks/attributes when requested.
pub fn detect(
    client: &FaceClient,
    image: ImageSource,
    options: &DetectOptions,
) -> Result<Vec<DetectedFace>> {
    let query = [
        ("returnFaceId", Some(options.return_face_id.to_string())),
        (
            "returnFaceLandmarks",
            Some(options.return_face_landmarks.to_string()),
        ),
        (
            "returnFaceAttributes",
            options.return_face_attributes.clone(),
        ),
    ];
    let value = client.request(
        RequestKind::FaceDetect,
        Method::Post,
        "detect",
        &query,
        image.into_payload()?,
    )?;
    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchMode {
    #[serde(rename = "matchPerson")]
    MatchPerson,
    #[serde(rename = "matchFace")]
    MatchFace,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSimilarsRequest {
    pub face_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_list_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_face_list_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_ids: Option<Vec<String>>,
    pub max_num_of_candidates_returned: u32,
    pub mode: MatchMode,
}

impl FindSimilarsRequest {
    pub fn new(face_id: impl Into<String>) -> Self {
        Self {
            face_id: face_id.into(),
            face_list_id: None,
            large_face_list_id: None,
            face_ids: None,
            max_num_of_candidates_returned: 20,
            mode: MatchMode::MatchPerson,
        }
    }
}

/// Search a face list, large face list, or an ad-hoc set of face ids for
/// faces similar to the query face.
pub fn find_similars(
    client: &FaceClient,
    request: &FindSimilarsRequest,
) -> Result<Vec<SimilarFace>> {
    let value = client.request(
        RequestKind::FaceFindSimilar,
        Method::Post,
        "findsimilars",
        &[],
        Payload::Json(serde_json::to_value(request)?),
    )?;
    Ok(serde_json::from_value(value)?)
}

/// Partition transient face ids into groups of similar faces; faces that
/// match nothing land in the messy group.
pub fn group(client: &FaceClient, face_ids: &[String]) -> Result<GroupingResult> {
    let value = client.request(
        RequestKind::FaceGroup,
        Method::Post,
        "group",
        &[],
        Payload::Json(json!({ "faceIds": face_ids })),
    )?;
    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyRequest {
    pub face_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_person_group_id: Option<String>,
    pub max_num_of_candidates_returned: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

impl IdentifyRequest {
    pub fn in_person_group(face_ids: Vec<String>, person_group_id: impl Into<String>) -> Self {
        Self {
            face_ids,
            person_group_id: Some(person_group_id.into()),
            large_person_group_id: None,
            max_num_of_candidates_returned: 1,
            confidence_threshold: None,
        }
    }

    pub fn in_large_person_group(
        face_ids: Vec<String>,
        large_person_group_id: impl Into<String>,
    ) -> Self {
        Self {
            face_ids,
            person_group_id: None,
            large_person_group_id: Some(large_person_group_id.into()),
            max_num_of_candidates_returned: 1,
            confidence_threshold: None,
        }
    }
}

/// Identify which enrolled persons the given transient faces belong to. The
/// target group must have been trained.
pub fn identify(client: &FaceClient, request: &IdentifyRequest) -> Result<Vec<IdentifyResult>> {
    let value = client.request(
        RequestKind::FaceIdentify,
        Method::Post,
        "identify",
        &[],
        Payload::Json(serde_json::to_value(request)?),
    )?;
    Ok(serde_json::from_value(value)?)
}

/// Check whether two detected faces belong to the same person.
pub fn verify_face_to_face(
    client: &FaceClient,
    face_id1: &str,
    face_id2: &str,
) -> Result<VerifyResult> {
    let body = json!({
        "faceId1": face_id1,
        "faceId2": face_id2,
    });
    let value = client.request(
        RequestKind::FaceVerify,
        Method::Post,
        "verify",
        &[],
        Payload::Json(body),
    )?;
    Ok(serde_json::from_value(value)?)
}

/// Group scope for operations that target either flavor of person group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScope {
    PersonGroup(String),
    LargePersonGroup(String),
}

/// Check whether a detected face belongs to an enrolled person.
pub fn verify_face_to_person(
    client: &FaceClient,
    face_id: &str,
    scope: &GroupScope,
    person_id: &str,
) -> Result<VerifyResult> {
    let mut body = json!({
        "faceId": face_id,
        "personId": person_id,
    });
    match scope {
        GroupScope::PersonGroup(id) => body["personGroupId"] = json!(id),
        GroupScope::LargePersonGroup(id) => body["largePersonGroupId"] = json!(id),
    }
    let value = client.request(
        RequestKind::FaceVerify,
        Method::Post,
        "verify",
        &[],
        Payload::Json(body),
    )?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;

    fn client_for(server: &mockito::ServerGuard) -> FaceClient {
        FaceClient::new(FaceConfig::new("test-key", server.url()))
    }

    #[test]
    fn detect_with_url_sends_json_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/detect")
            .match_header("content-type", "application/json")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("returnFaceId".into(), "true".into()),
                mockito::Matcher::UrlEncoded("returnFaceLandmarks".into(), "false".into()),
            ]))
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"url": "https://example.com/photo.jpg"}),
            ))
            .with_status(200)
            .with_body(
                r#"[{"faceId": "f1", "faceRectangle": {"left": 1, "top": 2, "width": 3, "height": 4}}]"#,
            )
            .create();

        let client = client_for(&server);
        let faces = detect(
            &client,
            ImageSource::Url("https://example.com/photo.jpg".to_string()),
            &DetectOptions::default(),
        )
        .unwrap();

        mock.assert();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].face_id.as_deref(), Some("f1"));
        assert_eq!(faces[0].face_rectangle.width, 3);
    }

    #[test]
    fn detect_with_bytes_sends_octet_stream() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/detect")
            .match_header("content-type", "application/octet-stream")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create();

        let client = client_for(&server);
        let faces = detect(
            &client,
            ImageSource::Bytes(vec![0xff, 0xd8, 0xff]),
            &DetectOptions::default(),
        )
        .unwrap();

        mock.assert();
        assert!(faces.is_empty());
    }

    #[test]
    fn find_similars_serializes_defaults() {
        let request = FindSimilarsRequest::new("f1");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "faceId": "f1",
                "maxNumOfCandidatesReturned": 20,
                "mode": "matchPerson",
            })
        );
    }

    #[test]
    fn identify_hits_endpoint_with_group() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/identify")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "faceIds": ["f1"],
                "personGroupId": "unit",
                "maxNumOfCandidatesReturned": 1,
            })))
            .with_status(200)
            .with_body(r#"[{"faceId": "f1", "candidates": [{"personId": "p1", "confidence": 0.92}]}]"#)
            .create();

        let client = client_for(&server);
        let request = IdentifyRequest::in_person_group(vec!["f1".to_string()], "unit");
        let results = identify(&client, &request).unwrap();

        mock.assert();
        assert_eq!(results[0].candidates[0].person_id, "p1");
    }

    #[test]
    fn verify_face_to_person_scopes_group_kind() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/verify")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "faceId": "f1",
                "personId": "p1",
                "largePersonGroupId": "big",
            })))
            .with_status(200)
            .with_body(r#"{"isIdentical": true, "confidence": 0.87}"#)
            .create();

        let client = client_for(&server);
        let result = verify_face_to_person(
            &client,
            "f1",
            &GroupScope::LargePersonGroup("big".to_string()),
            "p1",
        )
        .unwrap();

        mock.assert();
        assert!(result.is_identical);
    }
}
