//! # API crate — typed client for the MedSync backend
//!
//! Every request the portal makes goes through [`ApiClient::call`], which
//! resolves the endpoint against the configured backend origin, attaches the
//! bearer token when the session has one, and folds the response into either
//! a JSON value or an [`ApiError`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`error`] | [`ApiError`] (what the UI shows) and [`TransportError`] (what a transport reports) |
//! | [`transport`] | The [`Transport`] trait, request/response types, and the `reqwest` implementation |
//! | `mock` | [`MockTransport`], a scripted transport used by tests across the workspace |
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Result |
//! |--------|----------|--------|
//! | [`ApiClient::signup`] | `POST /api/signup` | [`SignupResponse`] |
//! | [`ApiClient::login`] | `POST /api/login` | [`LoginResponse`] |
//! | [`ApiClient::patient_reports`] | `GET /api/patient/reports` | `Vec<Report>` |
//! | [`ApiClient::hospital_reports`] | `GET /api/hospital/reports` | `Vec<Report>` |
//! | [`ApiClient::find_patient`] | `GET /api/hospital/find_patient?cid=` | [`PatientLookup`] |
//! | [`ApiClient::upload_report`] | `POST /api/hospital/upload` (multipart) | ack |
//!
//! Downloads are plain links built by [`ApiClient::download_url`]; they do not
//! go through `call`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;
mod mock;
pub mod transport;

pub use error::{ApiError, TransportError};
pub use mock::MockTransport;
pub use transport::{
    FormPart, HttpRequest, HttpResponse, Method, PartValue, RequestBody, ReqwestTransport,
    Transport, UploadFile,
};

pub use store::{ClientConfig, Report, Role, Session};

/// Method and body of a call. Headers are added by the client.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Some(Method::Get),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Self {
            method: Some(Method::Post),
            body: RequestBody::Json(value),
        })
    }

    pub fn post_multipart(parts: Vec<FormPart>) -> Self {
        Self {
            method: Some(Method::Post),
            body: RequestBody::Multipart(parts),
        }
    }
}

/// Body of `POST /api/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    cid: Value,
}

impl SignupResponse {
    /// The CID assigned to the new account, or an empty string.
    pub fn cid(&self) -> String {
        scalar_to_string(&self.cid).unwrap_or_default()
    }
}

/// Body of `POST /api/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub cid: Value,
}

impl LoginResponse {
    /// The session to persist, field for field.
    pub fn to_session(&self) -> Session {
        Session {
            token: self.token.clone().unwrap_or_default(),
            role: self.role.clone().unwrap_or_default(),
            username: self.username.clone().unwrap_or_default(),
            cid: scalar_to_string(&self.cid).unwrap_or_default(),
        }
    }
}

/// Result of resolving a CID to the backend's internal patient id.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PatientLookup {
    #[serde(default)]
    id: Value,
}

impl PatientLookup {
    /// The internal id as sent back in the upload form, if the lookup found one.
    pub fn id(&self) -> Option<String> {
        scalar_to_string(&self.id)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Client for the MedSync backend.
#[derive(Clone, Debug)]
pub struct ApiClient<T: Transport> {
    transport: T,
    base_url: String,
    token: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            base_url: config.backend.base_url.clone(),
            token: None,
        }
    }

    /// Attach a bearer token to every subsequent call. An empty token is ignored.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    /// Client authenticated as the given session.
    pub fn for_session(transport: T, config: &ClientConfig, session: &Session) -> Self {
        Self::new(transport, config).with_token(session.token.clone())
    }

    /// Issue a request and normalize the outcome.
    ///
    /// An unparseable or empty body reads as `{}`. A non-2xx status fails
    /// with the body's `error` string, or `"Error"` without one.
    pub async fn call(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let method = options.method.unwrap_or(Method::Get);
        let mut headers = Vec::new();
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            headers,
            body: options.body,
        };

        tracing::debug!(?method, endpoint, "api request");
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "api request failed to reach backend");
            ApiError::Network
        })?;

        let data = serde_json::from_slice::<Value>(&response.body)
            .unwrap_or_else(|_| Value::Object(Default::default()));

        if !response.is_success() {
            let message = data
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .unwrap_or("Error")
                .to_string();
            tracing::info!(endpoint, status = response.status, %message, "api request rejected");
            return Err(ApiError::Api {
                status: response.status,
                message,
            });
        }

        Ok(data)
    }

    async fn call_as<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        let data = self.call(endpoint, options).await?;
        serde_json::from_value(data).map_err(|e| {
            tracing::warn!(endpoint, error = %e, "unexpected response shape");
            ApiError::Decode(e.to_string())
        })
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.call_as("/api/signup", RequestOptions::post_json(request)?)
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call_as("/api/login", RequestOptions::post_json(request)?)
            .await
    }

    /// Reports owned by the calling patient.
    pub async fn patient_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.call_as("/api/patient/reports", RequestOptions::get())
            .await
    }

    /// Reports uploaded by the calling hospital.
    pub async fn hospital_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.call_as("/api/hospital/reports", RequestOptions::get())
            .await
    }

    pub async fn find_patient(&self, cid: &str) -> Result<PatientLookup, ApiError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("cid", cid)
            .finish();
        self.call_as(
            &format!("/api/hospital/find_patient?{query}"),
            RequestOptions::get(),
        )
        .await
    }

    /// Store a new report for the patient with the given internal id.
    pub async fn upload_report(&self, patient_id: &str, file: UploadFile) -> Result<(), ApiError> {
        let parts = vec![
            FormPart::text("patient_id", patient_id),
            FormPart::file("report_file", file),
        ];
        self.call("/api/hospital/upload", RequestOptions::post_multipart(parts))
            .await?;
        Ok(())
    }

    /// Direct link to a stored file.
    pub fn download_url(&self, filename: &str) -> String {
        format!("{}/download/{}", self.base_url, filename)
    }
}

/// Client with the platform's real transport.
pub fn make_client(config: &ClientConfig, session: &Session) -> ApiClient<ReqwestTransport> {
    ApiClient::for_session(ReqwestTransport::new(), config, session)
}
