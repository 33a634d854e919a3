//! HTTP client for the wiki REST API.
//!
//! Every call states the status it expects; anything else is an
//! [`ClientError::UnexpectedStatus`] carrying the response body.

use forgewiki_core::structs::{
    AccessToken, CreateAccessTokenOption, CreateWikiPageOptions, LoginRequest, UserInfo,
    WikiCommitList, WikiPage, WikiPageMetaData,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

/// Errors from the wiki API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{method} {path}: expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        method: Method,
        path: String,
        expected: u16,
        actual: u16,
        body: String,
    },

    /// The body did not decode into the expected JSON shape.
    #[error("{path}: response body does not decode: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No API token; call issue_token first")]
    MissingToken,
}

/// Client bound to one instance and one repository wiki.
///
/// Keeps the session cookie across calls and attaches the API token to
/// writes as `?token=`.
pub struct WikiClient {
    http: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl WikiClient {
    /// Create a client for `owner/repo` on the instance at `base_url`.
    pub fn new(base_url: &str, owner: &str, repo: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- session / token ----

    /// Log in and keep the session cookie.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let path = "/api/v1/auth/login";
        let response = self.request(Method::POST, path).json(&body).send().await?;
        Self::parse_response(Method::POST, path, StatusCode::OK, response).await
    }

    /// Issue an API token for `username` and use it for subsequent writes.
    pub async fn issue_token(
        &mut self,
        username: &str,
        name: &str,
    ) -> Result<AccessToken, ClientError> {
        let path = format!("/api/v1/users/{}/tokens", urlencoding::encode(username));
        let body = CreateAccessTokenOption {
            name: name.to_string(),
        };
        let response = self.request(Method::POST, &path).json(&body).send().await?;
        let token: AccessToken =
            Self::parse_response(Method::POST, &path, StatusCode::CREATED, response).await?;
        self.token = Some(token.sha1.clone());
        Ok(token)
    }

    /// Re-seed the fixtures through the admin endpoint.
    pub async fn reset_fixtures(&self) -> Result<(), ClientError> {
        let path = "/api/v1/admin/fixtures/reset";
        let response = self.request(Method::POST, path).send().await?;
        Self::expect_status(Method::POST, path, StatusCode::NO_CONTENT, response).await?;
        Ok(())
    }

    // ---- wiki reads ----

    /// `GET /page/{name}`, expecting 200.
    pub async fn get_page(&self, name: &str) -> Result<WikiPage, ClientError> {
        let path = self.wiki_path(&format!("page/{}", urlencoding::encode(name)));
        let response = self.request(Method::GET, &path).send().await?;
        Self::parse_response(Method::GET, &path, StatusCode::OK, response).await
    }

    /// `GET /pages`, expecting 200.
    pub async fn list_pages(&self) -> Result<Vec<WikiPageMetaData>, ClientError> {
        let path = self.wiki_path("pages");
        let response = self.request(Method::GET, &path).send().await?;
        Self::parse_response(Method::GET, &path, StatusCode::OK, response).await
    }

    /// `GET /revisions/{name}`, expecting 200.
    pub async fn revisions(&self, name: &str) -> Result<WikiCommitList, ClientError> {
        let path = self.wiki_path(&format!("revisions/{}", urlencoding::encode(name)));
        let response = self.request(Method::GET, &path).send().await?;
        Self::parse_response(Method::GET, &path, StatusCode::OK, response).await
    }

    /// Status of `GET /page/{name}` without decoding the body.
    pub async fn page_status(&self, name: &str) -> Result<StatusCode, ClientError> {
        let path = self.wiki_path(&format!("page/{}", urlencoding::encode(name)));
        Ok(self.request(Method::GET, &path).send().await?.status())
    }

    // ---- wiki writes ----

    /// `POST /new?token=`, expecting 201.
    pub async fn create_page(
        &self,
        options: &CreateWikiPageOptions,
    ) -> Result<WikiPage, ClientError> {
        let path = self.wiki_path("new");
        let response = self
            .request(Method::POST, &path)
            .query(&[("token", self.token()?)])
            .json(options)
            .send()
            .await?;
        Self::parse_response(Method::POST, &path, StatusCode::CREATED, response).await
    }

    /// `PATCH /page/{name}?token=`, expecting 200.
    pub async fn edit_page(
        &self,
        name: &str,
        options: &CreateWikiPageOptions,
    ) -> Result<WikiPage, ClientError> {
        let path = self.wiki_path(&format!("page/{}", urlencoding::encode(name)));
        let response = self
            .request(Method::PATCH, &path)
            .query(&[("token", self.token()?)])
            .json(options)
            .send()
            .await?;
        Self::parse_response(Method::PATCH, &path, StatusCode::OK, response).await
    }

    /// `POST /new` without a token; returns the status.
    pub async fn create_page_anonymously(
        &self,
        options: &CreateWikiPageOptions,
    ) -> Result<StatusCode, ClientError> {
        let path = self.wiki_path("new");
        Ok(self
            .request(Method::POST, &path)
            .json(options)
            .send()
            .await?
            .status())
    }

    // ---- private helpers ----

    fn token(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::MissingToken)
    }

    fn wiki_path(&self, rest: &str) -> String {
        format!(
            "/api/v1/repos/{}/{}/wiki/{rest}",
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo)
        )
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    /// Ensure the response has exactly the expected status code.
    async fn expect_status(
        method: Method,
        path: &str,
        expected: StatusCode,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let actual = response.status();
        if actual != expected {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::UnexpectedStatus {
                method,
                path: path.to_string(),
                expected: expected.as_u16(),
                actual: actual.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Check the status, then decode the JSON body into `T`.
    async fn parse_response<T: DeserializeOwned>(
        method: Method,
        path: &str,
        expected: StatusCode,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::expect_status(method, path, expected, response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }
}
