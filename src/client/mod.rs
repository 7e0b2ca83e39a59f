// This file is part of the terraform-provider-octopusdeploy project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Minimal client for the Octopus Deploy REST API
//!
//! Every request is authenticated with the `X-Octopus-ApiKey` header.
//! Endpoints live under `<server>/api/`, space scoped endpoints under
//! `<server>/api/<space>/`.

use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use url::Url;

mod accounts;
mod environments;
mod error;
mod oidc_identities;
mod project_triggers;
mod projects;
mod spaces;
mod tenants;

pub use accounts::{AwsOidcAccount, AWS_OIDC_ACCOUNT_TYPE};
pub use environments::Environment;
pub use error::ApiError;
pub use oidc_identities::{OidcIdentity, OidcIdentityList};
pub use project_triggers::{
    ContinuousDailyScheduleFilter, CronExpressionScheduleFilter, DeployLatestReleaseAction,
    DeployNewReleaseAction, ProjectTrigger, RunRunbookAction, TriggerAction, TriggerFilter,
};
pub use projects::Project;
pub use tenants::Tenant;

const API_KEY_HEADER: &str = "X-Octopus-ApiKey";

/// Decode `null` as the default value, the server sends both for "empty"
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Paged collection returned by list endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Lookup filters shared by the project and tenant list endpoints
#[derive(Debug, Default, Clone, Copy)]
pub struct Lookup<'a> {
    pub name: &'a str,
    pub id: &'a str,
    pub skip: u32,
    pub take: u32,
}

impl<'a> Lookup<'a> {
    pub fn new(name: &'a str, id: &'a str) -> Self {
        Self {
            name,
            id,
            skip: 0,
            take: 1,
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !self.name.is_empty() {
            query.push(("name", self.name.to_owned()));
        }
        if !self.id.is_empty() {
            query.push(("ids", self.id.to_owned()));
        }
        query.push(("skip", self.skip.to_string()));
        query.push(("take", self.take.to_string()));
        query
    }
}

#[derive(Debug, Clone)]
pub struct OctopusClient {
    http: reqwest::Client,
    server_url: Url,
    space_id: String,
}

impl OctopusClient {
    pub fn new(server_url: &str, api_key: &str, space_id: &str) -> Result<Self> {
        let server_url = Url::parse(server_url)
            .with_context(|| format!("failed to parse server url: {server_url}"))?;
        if server_url.cannot_be_a_base() {
            return Err(anyhow!("server url cannot be a base: {server_url}"));
        }

        let mut api_key = HeaderValue::from_str(api_key).context("invalid api key")?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("terraform-provider-octopusdeploy/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            http,
            server_url,
            space_id: space_id.to_owned(),
        })
    }

    /// Space used when a call does not name one
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    pub fn with_space_id(mut self, space_id: impl Into<String>) -> Self {
        self.space_id = space_id.into();
        self
    }

    /// The given space, or the client space when empty
    pub(crate) fn resolve<'a>(&'a self, space_id: &'a str) -> &'a str {
        if space_id.is_empty() {
            &self.space_id
        } else {
            space_id
        }
    }

    /// `<server>/api/<segments>?<query>`
    pub(crate) fn endpoint(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let mut url = self.server_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(segments.join("/")))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `<server>/api/<space>/<segments>?<query>`, falling back to the client space
    pub(crate) fn space_endpoint(
        &self,
        space_id: &str,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, ApiError> {
        let space_id = self.resolve(space_id);
        if space_id.is_empty() {
            self.endpoint(segments, query)
        } else {
            let scoped: Vec<&str> = std::iter::once(space_id)
                .chain(segments.iter().copied())
                .collect();
            self.endpoint(&scoped, query)
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.send(Method::GET, url, None::<&()>).await
    }

    pub(crate) async fn post<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, url, Some(body)).await
    }

    pub(crate) async fn put<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, url, Some(body)).await
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<(), ApiError> {
        self.send::<(), serde::de::IgnoredAny>(Method::DELETE, url, None)
            .await
            .map(|_| ())
    }

    async fn send<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = url.path().to_owned();
        tracing::debug!(method = %method, uri = %url, "making API request");

        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body).map_err(ApiError::Encode)?);
        }

        let transport = |source| ApiError::Transport {
            method: method.clone(),
            path: path.clone(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let raw = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let err = ApiError::from_response(method, path, status, &raw);
            tracing::debug!(status = status.as_u16(), error = %err, "API request was unsuccessful");
            return Err(err);
        }

        tracing::debug!(status = status.as_u16(), "API request was successful");
        tracing::trace!(raw = %raw, "API response");

        // An empty body decodes like `null`, so `()` and `Option<_>` accept it
        let raw = if raw.trim().is_empty() { "null" } else { &raw };
        serde_json::from_str(raw).map_err(|source| ApiError::Decode {
            method,
            path,
            source,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) const API_KEY: &str = "API-TESTKEY";

    pub(crate) fn client(server: &MockServer) -> OctopusClient {
        OctopusClient::new(&server.uri(), API_KEY, "Spaces-1").expect("valid client")
    }

    #[test]
    fn endpoint_scoping() {
        let client = OctopusClient::new("https://octopus.example.com/", "API-KEY", "Spaces-1")
            .expect("valid client");

        let url = client
            .endpoint(&["serviceaccounts", "Users-1", "oidcidentities", "v1"], &[])
            .expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://octopus.example.com/api/serviceaccounts/Users-1/oidcidentities/v1"
        );

        let url = client
            .space_endpoint("", &["projects"], &[("take", "1".to_owned())])
            .expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://octopus.example.com/api/Spaces-1/projects?take=1"
        );

        let url = client
            .space_endpoint("Spaces-2", &["tenants", "Tenants-1"], &[])
            .expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://octopus.example.com/api/Spaces-2/tenants/Tenants-1"
        );

        let unscoped = client.with_space_id("");
        let url = unscoped
            .space_endpoint("", &["environments"], &[])
            .expect("valid url");
        assert_eq!(url.as_str(), "https://octopus.example.com/api/environments");
    }

    #[test]
    fn endpoint_keeps_server_prefix() {
        let client = OctopusClient::new("https://example.com/octopus", "API-KEY", "")
            .expect("valid client");
        let url = client.endpoint(&["spaces", "all"], &[]).expect("valid url");
        assert_eq!(url.as_str(), "https://example.com/octopus/api/spaces/all");
    }

    #[test]
    fn invalid_server_url() {
        assert!(OctopusClient::new("not a url", "API-KEY", "").is_err());
        assert!(OctopusClient::new("mailto:octopus@example.com", "API-KEY", "").is_err());
    }

    #[test]
    fn lookup_query_skips_empty_filters() {
        assert_eq!(
            Lookup::new("", "Projects-1").query(),
            vec![
                ("ids", "Projects-1".to_owned()),
                ("skip", "0".to_owned()),
                ("take", "1".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn requests_carry_api_key_and_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/environments"))
            .and(query_param("name", "Production"))
            .and(header(API_KEY_HEADER, API_KEY))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let url = client
            .space_endpoint("", &["environments"], &[("name", "Production".to_owned())])
            .expect("valid url");
        let list: Collection<serde_json::Value> = client.get(url).await.expect("success");
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/environments/Environments-404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "ErrorMessage": "The resource 'Environments-404' was not found."
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let url = client
            .space_endpoint("", &["environments", "Environments-404"], &[])
            .expect("valid url");
        let err = client
            .get::<serde_json::Value>(url)
            .await
            .expect_err("not found");
        assert!(err.is_not_found());
        assert!(err
            .to_string()
            .contains("The resource 'Environments-404' was not found."));
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let url = client
            .space_endpoint("", &["projecttriggers", "ProjectTriggers-1"], &[])
            .expect("valid url");
        client.delete(url).await.expect("success");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/spaces/all"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client(&server);
        let url = client.endpoint(&["spaces", "all"], &[]).expect("valid url");
        let err = client
            .get::<Vec<spaces::Space>>(url)
            .await
            .expect_err("decode failure");
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
