//! Adapter for an external message-passing layer: a request/response message
//! pair plus a numeric-opcode dispatch table routing into `crate::api`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::face::{
    DetectOptions, FindSimilarsRequest, GroupScope, IdentifyRequest, MatchMode,
};
use crate::api::{self, ListOptions};
use crate::client::{FaceClient, Method, RecordedRequest, RecordedResponse};
use crate::error::{Error, Result};
use crate::ImageSource;

pub const HTTP_GET: i32 = 0;
pub const HTTP_POST: i32 = 1;
pub const HTTP_PUT: i32 = 2;
pub const HTTP_DELETE: i32 = 3;
pub const HTTP_PATCH: i32 = 4;

/// Every dispatchable operation, tagged with the wire opcode carried in
/// `FaceApiRequest::request_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RequestKind {
    FaceDetect = 0,
    FaceFindSimilar = 1,
    FaceGroup = 2,
    FaceIdentify = 3,
    FaceVerify = 4,

    FaceListAddFace = 5,
    FaceListCreate = 6,
    FaceListDelete = 7,
    FaceListDeleteFace = 8,
    FaceListGet = 9,
    FaceListList = 10,
    FaceListUpdate = 11,

    LargeFaceListAddFace = 12,
    LargeFaceListCreate = 13,
    LargeFaceListDelete = 14,
    LargeFaceListDeleteFace = 15,
    LargeFaceListGet = 16,
    LargeFaceListGetFace = 17,
    LargeFaceListGetTrainingStatus = 18,
    LargeFaceListList = 19,
    LargeFaceListListFace = 20,
    LargeFaceListTrain = 21,
    LargeFaceListUpdate = 22,
    LargeFaceListUpdateFace = 23,

    LargePersonGroupCreate = 24,
    LargePersonGroupDelete = 25,
    LargePersonGroupGet = 26,
    LargePersonGroupGetTrainingStatus = 27,
    LargePersonGroupList = 28,
    LargePersonGroupTrain = 29,
    LargePersonGroupUpdate = 30,

    LargePersonGroupPersonAddFace = 31,
    LargePersonGroupPersonCreate = 32,
    LargePersonGroupPersonDelete = 33,
    LargePersonGroupPersonDeleteFace = 34,
    LargePersonGroupPersonGet = 35,
    LargePersonGroupPersonGetFace = 36,
    LargePersonGroupPersonList = 37,
    LargePersonGroupPersonUpdate = 38,
    LargePersonGroupPersonUpdateFace = 39,

    PersonGroupCreate = 40,
    PersonGroupDelete = 41,
    PersonGroupGet = 42,
    PersonGroupGetTrainingStatus = 43,
    PersonGroupList = 44,
    PersonGroupTrain = 45,
    PersonGroupUpdate = 46,

    PersonAddFace = 47,
    PersonCreate = 48,
    PersonDelete = 49,
    PersonDeleteFace = 50,
    PersonGet = 51,
    PersonGetFace = 52,
    PersonList = 53,
    PersonUpdate = 54,
    PersonUpdateFace = 55,
}

impl RequestKind {
    const ALL: [RequestKind; 56] = [
        RequestKind::FaceDetect,
        RequestKind::FaceFindSimilar,
        RequestKind::FaceGroup,
        RequestKind::FaceIdentify,
        RequestKind::FaceVerify,
        RequestKind::FaceListAddFace,
        RequestKind::FaceListCreate,
        RequestKind::FaceListDelete,
        RequestKind::FaceListDeleteFace,
        RequestKind::FaceListGet,
        RequestKind::FaceListList,
        RequestKind::FaceListUpdate,
        RequestKind::LargeFaceListAddFace,
        RequestKind::LargeFaceListCreate,
        RequestKind::LargeFaceListDelete,
        RequestKind::LargeFaceListDeleteFace,
        RequestKind::LargeFaceListGet,
        RequestKind::LargeFaceListGetFace,
        RequestKind::LargeFaceListGetTrainingStatus,
        RequestKind::LargeFaceListList,
        RequestKind::LargeFaceListListFace,
        RequestKind::LargeFaceListTrain,
        RequestKind::LargeFaceListUpdate,
        RequestKind::LargeFaceListUpdateFace,
        RequestKind::LargePersonGroupCreate,
        RequestKind::LargePersonGroupDelete,
        RequestKind::LargePersonGroupGet,
        RequestKind::LargePersonGroupGetTrainingStatus,
        RequestKind::LargePersonGroupList,
        RequestKind::LargePersonGroupTrain,
        RequestKind::LargePersonGroupUpdate,
        RequestKind::LargePersonGroupPersonAddFace,
        RequestKind::LargePersonGroupPersonCreate,
        RequestKind::LargePersonGroupPersonDelete,
        RequestKind::LargePersonGroupPersonDeleteFace,
        RequestKind::LargePersonGroupPersonGet,
        RequestKind::LargePersonGroupPersonGetFace,
        RequestKind::LargePersonGroupPersonList,
        RequestKind::LargePersonGroupPersonUpdate,
        RequestKind::LargePersonGroupPersonUpdateFace,
        RequestKind::PersonGroupCreate,
        RequestKind::PersonGroupDelete,
        RequestKind::PersonGroupGet,
        RequestKind::PersonGroupGetTrainingStatus,
        RequestKind::PersonGroupList,
        RequestKind::PersonGroupTrain,
        RequestKind::PersonGroupUpdate,
        RequestKind::PersonAddFace,
        RequestKind::PersonCreate,
        RequestKind::PersonDelete,
        RequestKind::PersonDeleteFace,
        RequestKind::PersonGet,
        RequestKind::PersonGetFace,
        RequestKind::PersonList,
        RequestKind::PersonUpdate,
        RequestKind::PersonUpdateFace,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }
}

/// Inbound message: which operation to run, with parameters as a JSON object
/// string and the image (or other body) as raw bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceApiRequest {
    pub request_type: i32,
    #[serde(default)]
    pub request_method: i32,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub request_parameters: String,
    #[serde(default)]
    pub request_body: Vec<u8>,
}

/// Outbound message: the HTTP status and raw response text of the call that
/// was executed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceApiResponse {
    pub response_type: i32,
    pub response: String,
}

impl From<&RecordedRequest> for FaceApiRequest {
    fn from(recorded: &RecordedRequest) -> Self {
        let request_method = match recorded.method {
            Method::Get => HTTP_GET,
            Method::Post => HTTP_POST,
            Method::Put => HTTP_PUT,
            Method::Delete => HTTP_DELETE,
            Method::Patch => HTTP_PATCH,
        };
        FaceApiRequest {
            request_type: recorded.kind.code(),
            request_method,
            content_type: recorded.content_type.clone(),
            request_parameters: recorded.parameters.clone(),
            request_body: recorded.body.clone(),
        }
    }
}

/// Execute the operation named by the message opcode and report the HTTP
/// outcome. Parameters come from the JSON parameter string; image-taking
/// operations read the image from the message body (a JSON body with a `url`
/// key means a remote image, anything else is raw bytes).
pub fn dispatch(client: &FaceClient, message: &FaceApiRequest) -> Result<FaceApiResponse> {
    let kind = RequestKind::from_code(message.request_type)
        .ok_or(Error::UnknownOpcode(message.request_type))?;
    let params = parse_params(&message.request_parameters)?;
    let body = parse_body(&message.request_body);

    debug!(?kind, "dispatching bridge request");
    run(client, kind, &params, &body, &message.request_body)?;

    let response = client.last_response().unwrap_or(RecordedResponse {
        status: 0,
        body: String::new(),
    });
    Ok(FaceApiResponse {
        response_type: i32::from(response.status),
        response: response.body,
    })
}

fn run(
    client: &FaceClient,
    kind: RequestKind,
    params: &Value,
    body: &Value,
    raw_body: &[u8],
) -> Result<()> {
    use RequestKind::*;

    match kind {
        FaceDetect => {
            let options = DetectOptions {
                return_face_id: bool_param(params, "returnFaceId").unwrap_or(true),
                return_face_landmarks: bool_param(params, "returnFaceLandmarks")
                    .unwrap_or(false),
                return_face_attributes: str_param(params, "returnFaceAttributes"),
            };
            api::face::detect(client, image_from_body(raw_body), &options)?;
        }
        FaceFindSimilar => {
            let request = FindSimilarsRequest {
                face_id: require_param(params, "faceId")?,
                face_list_id: str_param(params, "faceListId"),
                large_face_list_id: str_param(params, "largeFaceListId"),
                face_ids: str_list_param(params, "faceIds"),
                max_num_of_candidates_returned: u32_param(params, "maxNumOfCandidatesReturned")
                    .unwrap_or(20),
                mode: match str_param(params, "mode").as_deref() {
                    Some("matchFace") => MatchMode::MatchFace,
                    _ => MatchMode::MatchPerson,
                },
            };
            api::face::find_similars(client, &request)?;
        }
        FaceGroup => {
            let face_ids = str_list_param(params, "faceIds")
                .ok_or(Error::MissingParameter("faceIds"))?;
            api::face::group(client, &face_ids)?;
        }
        FaceIdentify => {
            let request = IdentifyRequest {
                face_ids: str_list_param(params, "faceIds")
                    .ok_or(Error::MissingParameter("faceIds"))?,
                person_group_id: str_param(params, "personGroupId"),
                large_person_group_id: str_param(params, "largePersonGroupId"),
                max_num_of_candidates_returned: u32_param(params, "maxNumOfCandidatesReturned")
                    .unwrap_or(1),
                confidence_threshold: params
                    .get("confidenceThreshold")
                    .and_then(Value::as_f64),
            };
            api::face::identify(client, &request)?;
        }
        FaceVerify => {
            if let Some(face_id2) = str_param(params, "faceId2") {
                let face_id1 = require_param(params, "faceId1")?;
                api::face::verify_face_to_face(client, &face_id1, &face_id2)?;
            } else {
                let face_id = require_param(params, "faceId")?;
                let person_id = require_param(params, "personId")?;
                let scope = match str_param(params, "largePersonGroupId") {
                    Some(id) => GroupScope::LargePersonGroup(id),
                    None => GroupScope::PersonGroup(require_param(params, "personGroupId")?),
                };
                api::face::verify_face_to_person(client, &face_id, &scope, &person_id)?;
            }
        }

        FaceListAddFace => {
            let face_list_id = require_param(params, "faceListId")?;
            api::face_list::add_face(
                client,
                image_from_body(raw_body),
                &face_list_id,
                str_param(params, "userData").as_deref(),
                str_param(params, "targetFace").as_deref(),
            )?;
        }
        FaceListCreate => {
            let face_list_id = require_param(params, "faceListId")?;
            api::face_list::create(
                client,
                &face_list_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }
        FaceListDelete => {
            api::face_list::delete(client, &require_param(params, "faceListId")?)?;
        }
        FaceListDeleteFace => {
            api::face_list::delete_face(
                client,
                &require_param(params, "faceListId")?,
                &require_param(params, "persistedFaceId")?,
            )?;
        }
        FaceListGet => {
            api::face_list::get(client, &require_param(params, "faceListId")?)?;
        }
        FaceListList => {
            api::face_list::list(client)?;
        }
        FaceListUpdate => {
            let face_list_id = require_param(params, "faceListId")?;
            api::face_list::update(
                client,
                &face_list_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }

        LargeFaceListAddFace => {
            let large_face_list_id = require_param(params, "largeFaceListId")?;
            api::large_face_list_face::add(
                client,
                image_from_body(raw_body),
                &large_face_list_id,
                str_param(params, "userData").as_deref(),
                str_param(params, "targetFace").as_deref(),
            )?;
        }
        LargeFaceListCreate => {
            let large_face_list_id = require_param(params, "largeFaceListId")?;
            api::large_face_list::create(
                client,
                &large_face_list_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }
        LargeFaceListDelete => {
            api::large_face_list::delete(client, &require_param(params, "largeFaceListId")?)?;
        }
        LargeFaceListDeleteFace => {
            api::large_face_list_face::delete(
                client,
                &require_param(params, "largeFaceListId")?,
                &require_param(params, "persistedFaceId")?,
            )?;
        }
        LargeFaceListGet => {
            api::large_face_list::get(client, &require_param(params, "largeFaceListId")?)?;
        }
        LargeFaceListGetFace => {
            api::large_face_list_face::get(
                client,
                &require_param(params, "largeFaceListId")?,
                &require_param(params, "persistedFaceId")?,
            )?;
        }
        LargeFaceListGetTrainingStatus => {
            api::large_face_list::get_status(
                client,
                &require_param(params, "largeFaceListId")?,
            )?;
        }
        LargeFaceListList => {
            api::large_face_list::list(client, &list_options(params))?;
        }
        LargeFaceListListFace => {
            api::large_face_list_face::list(
                client,
                &require_param(params, "largeFaceListId")?,
                &list_options(params),
            )?;
        }
        LargeFaceListTrain => {
            api::large_face_list::train(client, &require_param(params, "largeFaceListId")?)?;
        }
        LargeFaceListUpdate => {
            let large_face_list_id = require_param(params, "largeFaceListId")?;
            api::large_face_list::update(
                client,
                &large_face_list_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }
        LargeFaceListUpdateFace => {
            api::large_face_list_face::update(
                client,
                &require_param(params, "largeFaceListId")?,
                &require_param(params, "persistedFaceId")?,
                str_param(body, "userData").as_deref(),
            )?;
        }

        LargePersonGroupCreate => {
            let large_person_group_id = require_param(params, "largePersonGroupId")?;
            api::large_person_group::create(
                client,
                &large_person_group_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }
        LargePersonGroupDelete => {
            api::large_person_group::delete(
                client,
                &require_param(params, "largePersonGroupId")?,
            )?;
        }
        LargePersonGroupGet => {
            api::large_person_group::get(client, &require_param(params, "largePersonGroupId")?)?;
        }
        LargePersonGroupGetTrainingStatus => {
            api::large_person_group::get_status(
                client,
                &require_param(params, "largePersonGroupId")?,
            )?;
        }
        LargePersonGroupList => {
            api::large_person_group::list(client, &list_options(params))?;
        }
        LargePersonGroupTrain => {
            api::large_person_group::train(
                client,
                &require_param(params, "largePersonGroupId")?,
            )?;
        }
        LargePersonGroupUpdate => {
            let large_person_group_id = require_param(params, "largePersonGroupId")?;
            api::large_person_group::update(
                client,
                &large_person_group_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }

        LargePersonGroupPersonAddFace => {
            api::large_person_group_person_face::add(
                client,
                image_from_body(raw_body),
                &require_param(params, "largePersonGroupId")?,
                &require_param(params, "personId")?,
                str_param(params, "userData").as_deref(),
                str_param(params, "targetFace").as_deref(),
            )?;
        }
        LargePersonGroupPersonCreate => {
            api::large_person_group_person::create(
                client,
                &require_param(params, "largePersonGroupId")?,
                &str_param(body, "name").ok_or(Error::MissingParameter("name"))?,
                str_param(body, "userData").as_deref(),
            )?;
        }
        LargePersonGroupPersonDelete => {
            api::large_person_group_person::delete(
                client,
                &require_param(params, "largePersonGroupId")?,
                &require_param(params, "personId")?,
            )?;
        }
        LargePersonGroupPersonDeleteFace => {
            api::large_person_group_person_face::delete(
                client,
                &require_param(params, "largePersonGroupId")?,
                &require_param(params, "personId")?,
                &require_param(params, "persistedFaceId")?,
            )?;
        }
        LargePersonGroupPersonGet => {
            api::large_person_group_person::get(
                client,
                &require_param(params, "largePersonGroupId")?,
                &require_param(params, "personId")?,
            )?;
        }
        LargePersonGroupPersonGetFace => {
            api::large_person_group_person_face::get(
                client,
                &require_param(params, "largePersonGroupId")?,
                &require_param(params, "personId")?,
                &require_param(params, "persistedFaceId")?,
            )?;
        }
        LargePersonGroupPersonList => {
            api::large_person_group_person::list(
                client,
                &require_param(params, "largePersonGroupId")?,
                &list_options(params),
            )?;
        }
        LargePersonGroupPersonUpdate => {
            api::large_person_group_person::update(
                client,
                &require_param(params, "largePersonGroupId")?,
                &require_param(params, "personId")?,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }
        LargePersonGroupPersonUpdateFace => {
            api::large_person_group_person_face::update(
                client,
                &require_param(params, "largePersonGroupId")?,
                &require_param(params, "personId")?,
                &require_param(params, "persistedFaceId")?,
                str_param(body, "userData").as_deref(),
            )?;
        }

        PersonGroupCreate => {
            let person_group_id = require_param(params, "personGroupId")?;
            api::person_group::create(
                client,
                &person_group_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }
        PersonGroupDelete => {
            api::person_group::delete(client, &require_param(params, "personGroupId")?)?;
        }
        PersonGroupGet => {
            api::person_group::get(client, &require_param(params, "personGroupId")?)?;
        }
        PersonGroupGetTrainingStatus => {
            api::person_group::get_status(client, &require_param(params, "personGroupId")?)?;
        }
        PersonGroupList => {
            api::person_group::list(client, &list_options(params))?;
        }
        PersonGroupTrain => {
            api::person_group::train(client, &require_param(params, "personGroupId")?)?;
        }
        PersonGroupUpdate => {
            let person_group_id = require_param(params, "personGroupId")?;
            api::person_group::update(
                client,
                &person_group_id,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }

        PersonAddFace => {
            api::person::add_face(
                client,
                image_from_body(raw_body),
                &require_param(params, "personGroupId")?,
                &require_param(params, "personId")?,
                str_param(params, "userData").as_deref(),
                str_param(params, "targetFace").as_deref(),
            )?;
        }
        PersonCreate => {
            api::person::create(
                client,
                &require_param(params, "personGroupId")?,
                &str_param(body, "name").ok_or(Error::MissingParameter("name"))?,
                str_param(body, "userData").as_deref(),
            )?;
        }
        PersonDelete => {
            api::person::delete(
                client,
                &require_param(params, "personGroupId")?,
                &require_param(params, "personId")?,
            )?;
        }
        PersonDeleteFace => {
            api::person::delete_face(
                client,
                &require_param(params, "personGroupId")?,
                &require_param(params, "personId")?,
                &require_param(params, "persistedFaceId")?,
            )?;
        }
        PersonGet => {
            api::person::get(
                client,
                &require_param(params, "personGroupId")?,
                &require_param(params, "personId")?,
            )?;
        }
        PersonGetFace => {
            api::person::get_face(
                client,
                &require_param(params, "personGroupId")?,
                &require_param(params, "personId")?,
                &require_param(params, "persistedFaceId")?,
            )?;
        }
        PersonList => {
            api::person::list(
                client,
                &require_param(params, "personGroupId")?,
                &list_options(params),
            )?;
        }
        PersonUpdate => {
            api::person::update(
                client,
                &require_param(params, "personGroupId")?,
                &require_param(params, "personId")?,
                str_param(body, "name").as_deref(),
                str_param(body, "userData").as_deref(),
            )?;
        }
        PersonUpdateFace => {
            api::person::update_face(
                client,
                &require_param(params, "personGroupId")?,
                &require_param(params, "personId")?,
                &require_param(params, "persistedFaceId")?,
                str_param(body, "userData").as_deref(),
            )?;
        }
    }

    Ok(())
}

fn parse_params(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    Ok(serde_json::from_str(raw)?)
}

/// The message body as JSON when it parses as such, else an empty object;
/// create/update operations read `name`/`userData` out of it.
fn parse_body(raw: &[u8]) -> Value {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| serde_json::from_str(text).ok())
        .unwrap_or(Value::Object(serde_json::Map::new()))
}

/// A JSON body carrying a `url` key means a remote image; anything else is
/// the image itself.
fn image_from_body(raw: &[u8]) -> ImageSource {
    if let Ok(text) = std::str::from_utf8(raw) {
        if let Ok(value) = serde_json::from_str::<Value>(text) {
            if let Some(url) = value.get("url").and_then(Value::as_str) {
                return ImageSource::Url(url.to_string());
            }
        }
    }
    ImageSource::Bytes(raw.to_vec())
}

fn str_param(params: &Value, key: &str) -> Option<String> {
    match params.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

fn require_param(params: &Value, key: &'static str) -> Result<String> {
    str_param(params, key).ok_or(Error::MissingParameter(key))
}

fn bool_param(params: &Value, key: &str) -> Option<bool> {
    match params.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) => match s.as_str() {
            "true" | "True" => Some(true),
            "false" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn u32_param(params: &Value, key: &str) -> Option<u32> {
    params.get(key)?.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn str_list_param(params: &Value, key: &str) -> Option<Vec<String>> {
    let items = params.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

fn list_options(params: &Value) -> ListOptions {
    ListOptions {
        start: str_param(params, "start"),
        top: u32_param(params, "top"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;

    fn client_for(server: &mockito::ServerGuard) -> FaceClient {
        FaceClient::new(FaceConfig::new("test-key", server.url()))
    }

    #[test]
    fn opcode_round_trips() {
        for kind in RequestKind::ALL {
            assert_eq!(RequestKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(RequestKind::from_code(-1), None);
        assert_eq!(RequestKind::from_code(56), None);
    }

    #[test]
    fn numeric_params_out_of_u32_range_are_ignored() {
        let params = serde_json::json!({"top": 4_294_967_296u64});
        assert_eq!(u32_param(&params, "top"), None);

        let params = serde_json::json!({"top": 10});
        assert_eq!(u32_param(&params, "top"), Some(10));
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        let server = mockito::Server::new();
        let client = client_for(&server);
        let message = FaceApiRequest {
            request_type: 999,
            ..Default::default()
        };
        match dispatch(&client, &message) {
            Err(Error::UnknownOpcode(999)) => {}
            other => panic!("expected unknown opcode error, got {other:?}"),
        }
    }

    #[test]
    fn missing_parameter_is_reported_by_name() {
        let server = mockito::Server::new();
        let client = client_for(&server);
        let message = FaceApiRequest {
            request_type: RequestKind::PersonGroupGet.code(),
            request_parameters: "{}".to_string(),
            ..Default::default()
        };
        match dispatch(&client, &message) {
            Err(Error::MissingParameter("personGroupId")) => {}
            other => panic!("expected missing parameter error, got {other:?}"),
        }
    }

    #[test]
    fn person_group_create_routes_params_and_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/persongroups/unit")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"name": "Unit Group", "userData": "notes"}),
            ))
            .with_status(200)
            .with_body("")
            .create();

        let client = client_for(&server);
        let message = FaceApiRequest {
            request_type: RequestKind::PersonGroupCreate.code(),
            request_method: HTTP_PUT,
            request_parameters: r#"{"personGroupId": "unit"}"#.to_string(),
            request_body: br#"{"name": "Unit Group", "userData": "notes"}"#.to_vec(),
            ..Default::default()
        };

        let response = dispatch(&client, &message).unwrap();
        mock.assert();
        assert_eq!(response.response_type, 200);
    }

    #[test]
    fn detect_with_json_url_body_goes_out_as_json() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/detect")
            .match_header("content-type", "application/json")
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"url": "https://example.com/photo.jpg"}),
            ))
            .with_status(200)
            .with_body("[]")
            .create();

        let client = client_for(&server);
        let message = FaceApiRequest {
            request_type: RequestKind::FaceDetect.code(),
            request_method: HTTP_POST,
            request_parameters: r#"{"returnFaceId": true}"#.to_string(),
            request_body: br#"{"url": "https://example.com/photo.jpg"}"#.to_vec(),
            ..Default::default()
        };

        let response = dispatch(&client, &message).unwrap();
        mock.assert();
        assert_eq!(response.response_type, 200);
        assert_eq!(response.response, "[]");
    }

    #[test]
    fn detect_with_raw_bytes_goes_out_as_octet_stream() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/detect")
            .match_header("content-type", "application/octet-stream")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create();

        let client = client_for(&server);
        let message = FaceApiRequest {
            request_type: RequestKind::FaceDetect.code(),
            request_method: HTTP_POST,
            request_body: vec![0xff, 0xd8, 0xff, 0xe0],
            ..Default::default()
        };

        dispatch(&client, &message).unwrap();
        mock.assert();
    }

    #[test]
    fn identify_reads_typed_params() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/identify")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "faceIds": ["f1", "f2"],
                "largePersonGroupId": "big",
                "maxNumOfCandidatesReturned": 3,
                "confidenceThreshold": 0.5,
            })))
            .with_status(200)
            .with_body("[]")
            .create();

        let client = client_for(&server);
        let message = FaceApiRequest {
            request_type: RequestKind::FaceIdentify.code(),
            request_method: HTTP_POST,
            request_parameters: r#"{
                "faceIds": ["f1", "f2"],
                "largePersonGroupId": "big",
                "maxNumOfCandidatesReturned": 3,
                "confidenceThreshold": 0.5
            }"#
            .to_string(),
            ..Default::default()
        };

        dispatch(&client, &message).unwrap();
        mock.assert();
    }

    #[test]
    fn recorded_request_converts_back_to_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/persongroups/unit/train")
            .with_status(202)
            .with_body("")
            .create();

        let client = client_for(&server);
        api::person_group::train(&client, "unit").unwrap();

        let message = FaceApiRequest::from(&client.last_request().unwrap());
        assert_eq!(message.request_type, RequestKind::PersonGroupTrain.code());
        assert_eq!(message.request_method, HTTP_POST);
        assert_eq!(message.content_type, "application/json");
    }

    #[test]
    fn error_statuses_propagate_as_errors() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/persongroups/gone")
            .with_status(404)
            .with_body(r#"{"error": {"code": "PersonGroupNotFound", "message": "not found"}}"#)
            .create();

        let client = client_for(&server);
        let message = FaceApiRequest {
            request_type: RequestKind::PersonGroupGet.code(),
            request_method: HTTP_GET,
            request_parameters: r#"{"personGroupId": "gone"}"#.to_string(),
            ..Default::default()
        };

        let err = dispatch(&client, &message).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
