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

use async_trait::async_trait;

use tf_provider::{AttributePath, DataSource, Diagnostics, Schema, ValueEmpty};

use crate::octopus_provider::ClientHandle;
use crate::utils::{report, WithSchema, WithValidate};

use super::state::EnvironmentState;

#[derive(Debug, Default)]
pub struct EnvironmentDataSource {
    client: ClientHandle,
}

impl EnvironmentDataSource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for EnvironmentDataSource {
    type State<'a> = EnvironmentState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(EnvironmentState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, AttributePath::default());

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = self.client.get(diags).await?;
        let (id, name) = (config.id.as_str(), config.name.as_str());
        tracing::debug!(id, name, "reading environment");

        if !id.is_empty() {
            return match client.get_environment(id).await {
                Ok(environment) => Some(EnvironmentState::flatten(environment)),
                Err(err) => report(diags, &format!("Failed to fetch environment {id}"), err),
            };
        }

        let summary = format!("Failed to fetch environment {name}");
        let environments = match client.find_environments_by_name(name).await {
            Ok(environments) => environments,
            Err(err) => return report(diags, &summary, err),
        };
        let Some(environment) = environments.into_iter().next() else {
            diags.root_error(summary, "environment not found");
            return None;
        };
        Some(EnvironmentState::flatten(environment))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::tests::client;
    use crate::utils::owned;

    #[tokio::test]
    async fn read_picks_exact_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/environments"))
            .and(query_param("name", "Prod"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Items": [
                    {"Id": "Environments-3", "Name": "Prod-EU"},
                    {"Id": "Environments-2", "Name": "Prod"},
                ]
            })))
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let config = EnvironmentState {
            name: owned("Prod"),
            ..Default::default()
        };
        let state = EnvironmentDataSource::new(ClientHandle::new(client(&server)))
            .read(&mut diags, config, Default::default())
            .await
            .expect("environment found");
        assert_eq!(state.id.as_str(), "Environments-2");
    }

    #[tokio::test]
    async fn read_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/environments/Environments-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Id": "Environments-2",
                "SpaceId": "Spaces-1",
                "Name": "Prod",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let config = EnvironmentState {
            id: owned("Environments-2"),
            ..Default::default()
        };
        let state = EnvironmentDataSource::new(ClientHandle::new(client(&server)))
            .read(&mut diags, config, Default::default())
            .await
            .expect("environment found");
        assert_eq!(state.name.as_str(), "Prod");
    }

    #[tokio::test]
    async fn unknown_name_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/environments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Items": [{"Id": "Environments-3", "Name": "Prod-EU"}]
            })))
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let config = EnvironmentState {
            name: owned("Prod"),
            ..Default::default()
        };
        assert!(EnvironmentDataSource::new(ClientHandle::new(client(&server)))
            .read(&mut diags, config, Default::default())
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 1);
    }
}
