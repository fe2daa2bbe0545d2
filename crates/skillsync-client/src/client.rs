//! REST client for the SkillSync backend
//!
//! One method per backend operation. Every call gets its own timeout and,
//! when the credential provider has a token, an `Authorization: Bearer`
//! header.

use crate::config::{timeouts, ClientConfig};
use crate::credentials::CredentialProvider;
use crate::error::{server_message, ApiError, Result};
use crate::payload::SkillsPayload;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use skillsync_types::{
    AiRecommendations, AiServiceStatus, AuthResponse, BannerEnvelope, CareerInspiration,
    CompareRequest, ConnectionRequest, ConnectionsOverview, Credentials, DashboardSnapshot,
    FlexEntry, FlexRequest, LinkedInAnalysis, NewSkill, ProfileUpdate, Registration,
    RespondStatus, RespondToConnection, ScoredSkill, Skill, SkillComparison, UserProfile,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for one SkillSync backend
#[derive(Clone)]
pub struct SkillSyncClient {
    http: reqwest::Client,
    base_url: Url,
    default_timeout: Duration,
    credentials: Arc<dyn CredentialProvider>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

impl SkillSyncClient {
    /// Create a client for the configured backend
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] when the base URL does not parse or the
    /// HTTP client cannot be built
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("skillsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_http_client(http, config, credentials)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    pub fn with_http_client(
        http: reqwest::Client,
        config: &ClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            default_timeout: config.default_timeout,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // ---- auth ----

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let request = self.request(Method::POST, &["auth", "login"]).json(credentials);
        self.execute("login", request, self.default_timeout, false).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        let request = self.request(Method::POST, &["auth", "register"]).json(registration);
        self.execute("register", request, self.default_timeout, false).await
    }

    pub async fn auth_profile(&self) -> Result<UserProfile> {
        self.get("auth profile", &["auth", "profile"], self.default_timeout).await
    }

    // ---- profile ----

    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.get("get profile", &["users", "me"], self.default_timeout).await
    }

    /// Persist profile edits and return the updated user
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let request = self.request(Method::PUT, &["users", "me"]).json(update);
        let envelope: UserEnvelope = self
            .execute("update profile", request, self.default_timeout, true)
            .await?;
        Ok(envelope.user)
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>> {
        let request = self
            .request(Method::GET, &["users", "search"])
            .query(&[("q", query)]);
        self.execute("search users", request, self.default_timeout, true)
            .await
    }

    pub async fn profile_insights(&self) -> Result<Value> {
        self.get("profile insights", &["users", "ai-insights"], timeouts::PROFILE_INSIGHTS)
            .await
    }

    // ---- skills ----

    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        self.get("list skills", &["skills"], self.default_timeout).await
    }

    /// Raw skills response, classified by shape
    pub async fn skills_payload(&self) -> Result<SkillsPayload> {
        let value: Value = self.get("skills stats", &["skills"], self.default_timeout).await?;
        Ok(SkillsPayload::from_value(value))
    }

    /// Skills normalized and scored for progress displays
    pub async fn skills_stats(&self) -> Result<Vec<ScoredSkill>> {
        Ok(self.skills_payload().await?.into_scored())
    }

    pub async fn add_skill(&self, skill: &NewSkill) -> Result<Skill> {
        let request = self.request(Method::POST, &["skills"]).json(skill);
        self.execute("add skill", request, self.default_timeout, true).await
    }

    pub async fn update_skill(&self, id: &str, skill: &NewSkill) -> Result<Skill> {
        let request = self
            .request(Method::PUT, &["skills", id])
            .json(skill);
        self.execute("update skill", request, self.default_timeout, true).await
    }

    pub async fn delete_skill(&self, id: &str) -> Result<Value> {
        let request = self.request(Method::DELETE, &["skills", id]);
        self.execute("delete skill", request, self.default_timeout, true).await
    }

    // ---- matches & recommendations ----

    pub async fn matches(&self) -> Result<Value> {
        self.get("matches", &["matches"], self.default_timeout).await
    }

    pub async fn recommendations(&self) -> Result<Value> {
        self.post_empty("recommendations", &["matches", "recommend"], self.default_timeout)
            .await
    }

    pub async fn ai_enhanced_recommendations(&self, preferences: &Value) -> Result<AiRecommendations> {
        let request = self
            .request(Method::POST, &["matches", "ai-enhanced"])
            .json(&json!({ "preferences": preferences }));
        self.execute("ai recommendations", request, timeouts::AI_GENERATION, true)
            .await
    }

    /// AI service health; any failure reads as offline
    pub async fn ai_service_status(&self) -> AiServiceStatus {
        match self
            .get::<AiServiceStatus>("ai status", &["matches", "ai-status"], timeouts::AI_STATUS)
            .await
        {
            Ok(status) => status,
            Err(e) => {
                warn!("AI status check failed: {}", e);
                AiServiceStatus::offline(e.to_string())
            }
        }
    }

    // ---- dashboard ----

    pub async fn dashboard_data(&self) -> Result<DashboardSnapshot> {
        self.get("dashboard data", &["users", "dashboard-data"], timeouts::DASHBOARD)
            .await
    }

    pub async fn career_inspiration(&self, user_id: &str) -> Result<CareerInspiration> {
        self.post_empty(
            "career inspiration",
            &["users", user_id, "get-inspiration"],
            timeouts::AI_GENERATION,
        )
        .await
    }

    pub async fn analyze_linkedin(&self) -> Result<LinkedInAnalysis> {
        self.post_empty("analyze linkedin", &["users", "analyze-linkedin"], timeouts::AI_GENERATION)
            .await
    }

    pub async fn compare_skills(&self, user_id: &str) -> Result<SkillComparison> {
        let body = CompareRequest {
            compare_to: user_id.to_string(),
        };
        let request = self.request(Method::POST, &["users", "compare-skills"]).json(&body);
        self.execute("compare skills", request, self.default_timeout, true)
            .await
    }

    // ---- connections ----

    pub async fn connections(&self) -> Result<ConnectionsOverview> {
        self.get("list connections", &["users", "connections"], timeouts::CONNECTIONS)
            .await
    }

    pub async fn send_connection(&self, user_id: &str, request: &ConnectionRequest) -> Result<Value> {
        let builder = self
            .request(Method::POST, &["users", user_id, "connect"])
            .json(request);
        self.execute("send connection", builder, timeouts::CONNECTIONS, true)
            .await
    }

    pub async fn respond_to_connection(&self, connection_id: &str, status: RespondStatus) -> Result<Value> {
        let request = self
            .request(Method::PATCH, &["users", "connections", connection_id])
            .json(&RespondToConnection { status });
        self.execute("respond to connection", request, timeouts::CONNECTIONS, true)
            .await
    }

    // ---- banners ----

    pub async fn banner_today(&self) -> Result<BannerEnvelope> {
        self.get("banner today", &["banners", "today"], timeouts::BANNER_TODAY)
            .await
    }

    pub async fn generate_banner(&self) -> Result<Value> {
        self.post_empty("generate banner", &["banners", "generate"], timeouts::BANNER_GENERATE)
            .await
    }

    pub async fn banner_history(&self) -> Result<Value> {
        self.get("banner history", &["banners", "history"], timeouts::BANNER_HISTORY)
            .await
    }

    // ---- flex wall ----

    /// Today's flexes; a `null` body reads as an empty feed and entries
    /// that are not objects are skipped
    pub async fn flex_wall_today(&self) -> Result<Vec<FlexEntry>> {
        let value: Value = self
            .get("flex wall", &["flexwall", "today"], self.default_timeout)
            .await?;
        let Value::Array(items) = value else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    pub async fn flex_skill(&self, flex: &FlexRequest) -> Result<Value> {
        let request = self.request(Method::POST, &["flexwall", "flex"]).json(flex);
        self.execute("flex skill", request, self.default_timeout, true).await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &[&str]) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Append `path` to the base URL, one percent-encoded segment each
    fn endpoint(&self, path: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Never fails: the constructor rejects cannot-be-a-base URLs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &[&str],
        timeout: Duration,
    ) -> Result<T> {
        let request = self.request(Method::GET, path);
        self.execute(operation, request, timeout, true).await
    }

    async fn post_empty<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &[&str],
        timeout: Duration,
    ) -> Result<T> {
        let request = self.request(Method::POST, path).json(&json!({}));
        self.execute(operation, request, timeout, true).await
    }

    /// Apply the timeout and, for authorized calls, the bearer token
    fn prepare(&self, request: RequestBuilder, timeout: Duration, authorized: bool) -> RequestBuilder {
        let request = request.timeout(timeout);
        match self.credentials.token() {
            Some(token) if authorized => request.bearer_auth(token),
            _ => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        timeout: Duration,
        authorized: bool,
    ) -> Result<T> {
        debug!(operation, ?timeout, "Sending backend request");

        let response = self
            .prepare(request, timeout, authorized)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(operation, timeout, e))?;

        let status = response.status();
        // Read as text first so a bad body surfaces as Decode, not Transport
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(operation, timeout, e))?;

        debug!(operation, %status, body_len = body.len(), "Backend response received");

        if !status.is_success() {
            return Err(ApiError::Server {
                operation,
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|source| ApiError::Decode { operation, source })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::credentials::{NoCredentials, TokenStore};
    use reqwest::header::AUTHORIZATION;

    fn client(credentials: Arc<dyn CredentialProvider>) -> SkillSyncClient {
        SkillSyncClient::new(&ClientConfig::new("http://localhost:5000/api/"), credentials).unwrap()
    }

    #[test]
    fn test_bearer_header_attached_when_token_present() {
        let client = client(Arc::new(TokenStore::with_token("tok-1")));
        let request = client
            .prepare(client.request(Method::GET, &["skills"]), Duration::from_secs(1), true)
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:5000/api/skills");
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer tok-1"
        );
        assert_eq!(request.timeout(), Some(&Duration::from_secs(1)));
    }

    #[test]
    fn test_header_omitted_without_token() {
        let client = client(Arc::new(NoCredentials));
        let request = client
            .prepare(client.request(Method::GET, &["skills"]), Duration::from_secs(1), true)
            .build()
            .unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_public_calls_never_carry_token() {
        let client = client(Arc::new(TokenStore::with_token("stale")));
        let request = client
            .prepare(client.request(Method::POST, &["auth", "login"]), Duration::from_secs(1), false)
            .build()
            .unwrap();

        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_read_per_request() {
        let tokens = TokenStore::new();
        let client = client(Arc::new(tokens.clone()));

        tokens.set("fresh");
        let request = client
            .prepare(client.request(Method::GET, &["users", "me"]), Duration::from_secs(1), true)
            .build()
            .unwrap();
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer fresh");

        tokens.clear();
        let request = client
            .prepare(client.request(Method::GET, &["users", "me"]), Duration::from_secs(1), true)
            .build()
            .unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_ids_are_encoded_as_one_segment() {
        let client = client(Arc::new(NoCredentials));
        let url = client.endpoint(&["users", "connections", "c1/../x?y#z"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/users/connections/c1%2F..%2Fx%3Fy%23z"
        );
        assert_eq!(client.endpoint(&["skills", "s 1"]).path(), "/api/skills/s%201");
    }

    #[test]
    fn test_root_base_url() {
        let client =
            SkillSyncClient::new(&ClientConfig::new("http://localhost:5000"), Arc::new(NoCredentials)).unwrap();
        assert_eq!(client.endpoint(&["skills"]).as_str(), "http://localhost:5000/skills");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = SkillSyncClient::new(&ClientConfig::new("not a url"), Arc::new(NoCredentials));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }
}
