//! Fixtures and recording fakes shared by unit tests.

use crate::api::{Ack, AdminApi, ContactApi, PropertyApi};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    AdminQuery, Category, ContactForm, ImageFile, InquiryType, Listing, ListingFilters, ListingPage,
    Pagination, PropertyDraft, PropertyStatus, PropertyType,
};
use crate::wizard::SubmissionPayload;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A draft that passes the step 1 and step 2 validators. No images.
pub fn valid_draft() -> PropertyDraft {
    let mut draft = PropertyDraft {
        title: "Nice Flat".to_string(),
        description: "Spacious two bedroom flat".to_string(),
        kind: Some(PropertyType::Apartment),
        category: Some(Category::Sale),
        ..PropertyDraft::default()
    };
    draft.price.amount = "500000".to_string();
    draft.area.size = "1000".to_string();
    draft.location.address = "12 MG Road".to_string();
    draft.location.city = "Pune".to_string();
    draft.location.state = "Maharashtra".to_string();
    draft.location.pincode = "411001".to_string();
    draft.location.coordinates.latitude = "18.5204".to_string();
    draft.location.coordinates.longitude = "73.8567".to_string();
    draft.features.bedrooms = 2;
    draft
}

pub fn jpeg(name: &str) -> ImageFile {
    ImageFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

pub fn listing(id: &str, status: PropertyStatus, category: &str) -> Listing {
    serde_json::from_value(json!({
        "_id": id,
        "title": format!("Listing {id}"),
        "type": "apartment",
        "category": category,
        "status": status.as_str(),
    }))
    .expect("fixture listing decodes")
}

/// Records submissions; answers with a queued error once, then accepts
#[derive(Default)]
pub struct RecordingPropertyApi {
    submissions: Mutex<Vec<SubmissionPayload>>,
    failure: Mutex<Option<ApiError>>,
}

impl RecordingPropertyApi {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(error: ApiError) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            failure: Mutex::new(Some(error)),
        }
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl PropertyApi for RecordingPropertyApi {
    async fn list(&self, _filters: &ListingFilters, _pagination: &Pagination) -> Result<ListingPage, ApiError> {
        Ok(ListingPage::default())
    }

    async fn get(&self, id: &str) -> Result<Listing, ApiError> {
        Ok(listing(id, PropertyStatus::Approved, "sale"))
    }

    async fn mine(&self) -> Result<Vec<Listing>, ApiError> {
        Ok(Vec::new())
    }

    async fn create(&self, payload: SubmissionPayload) -> Result<Ack, ApiError> {
        self.submissions.lock().unwrap().push(payload);
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(Ack::ok("Property created")),
        }
    }

    async fn delete(&self, _id: &str) -> Result<Ack, ApiError> {
        Ok(Ack::ok("deleted"))
    }

    async fn express_interest(&self, _id: &str, _message: &str) -> Result<Ack, ApiError> {
        Ok(Ack::ok("interest recorded"))
    }
}

/// Serves a fixed listing set and records every admin call
#[derive(Default)]
pub struct RecordingAdminApi {
    pub listings: Vec<Listing>,
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<bool>,
}

impl RecordingAdminApi {
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            ..Self::default()
        }
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<Ack, ApiError> {
        self.calls.lock().unwrap().push(call);
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(ApiError::Server {
                status: 500,
                message: "Internal error".to_string(),
            });
        }
        Ok(Ack::ok("done"))
    }
}

#[async_trait]
impl AdminApi for RecordingAdminApi {
    async fn list_properties(&self, query: &AdminQuery) -> Result<Vec<Listing>, ApiError> {
        Ok(self
            .listings
            .iter()
            .filter(|l| query.status.map_or(true, |s| l.status == Some(s)))
            .filter(|l| query.category.map_or(true, |c| l.category == c.as_str()))
            .cloned()
            .collect())
    }

    async fn approve(&self, id: &str) -> Result<Ack, ApiError> {
        self.record(format!("approve {id}"))
    }

    async fn reject(&self, id: &str, reason: &str) -> Result<Ack, ApiError> {
        self.record(format!("reject {id}: {reason}"))
    }

    async fn delete(&self, id: &str) -> Result<Ack, ApiError> {
        self.record(format!("delete {id}"))
    }

    async fn dashboard(&self) -> Result<serde_json::Value, ApiError> {
        Ok(json!({}))
    }
}

/// Contact backend with scripted answers
pub struct ScriptedContactApi {
    pub answer: Mutex<Option<Result<Ack, ApiError>>>,
    pub types: Option<Vec<InquiryType>>,
    pub sent: Mutex<Vec<ContactForm>>,
}

impl ScriptedContactApi {
    pub fn answering(answer: Result<Ack, ApiError>) -> Self {
        Self {
            answer: Mutex::new(Some(answer)),
            types: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_types(types: Vec<InquiryType>) -> Self {
        Self {
            types: Some(types),
            ..Self::answering(Ok(Ack::ok("received")))
        }
    }
}

#[async_trait]
impl ContactApi for ScriptedContactApi {
    async fn submit(&self, form: &ContactForm) -> Result<Ack, ApiError> {
        self.sent.lock().unwrap().push(form.clone());
        self.answer
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Ack::ok("received")))
    }

    async fn inquiry_types(&self) -> Result<Vec<InquiryType>, ApiError> {
        self.types.clone().ok_or(ApiError::Server {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

/// Local backend that answers one request with `status` and a JSON `body`.
///
/// Returns a config pointing at it (no token) and a handle yielding the raw
/// request text once the exchange is done.
pub async fn serve_once(status: u16, body: &str) -> (Config, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    let config = Config {
        api_url: format!("http://{addr}/api"),
        api_token: None,
        timeout: Some(Duration::from_secs(5)),
    };
    (config, handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let received = buf.len() - (end + 4);
        let expected = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok());

        match expected {
            Some(len) if received >= len => break,
            Some(_) => continue,
            None if head.contains("transfer-encoding: chunked") => {
                if buf.ends_with(b"0\r\n\r\n") {
                    break;
                }
            }
            None => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
