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

use crate::client::Lookup;
use crate::octopus_provider::ClientHandle;
use crate::utils::{report, WithSchema, WithValidate};

use super::state::TenantState;

#[derive(Debug, Default)]
pub struct TenantDataSource {
    client: ClientHandle,
}

impl TenantDataSource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for TenantDataSource {
    type State<'a> = TenantState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(TenantState::schema())
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
        let identifier = if name.is_empty() { id } else { name };
        tracing::debug!(space_id = config.space_id.as_str(), id, name, "reading tenant");

        let summary = format!("Failed to fetch tenant {identifier}");
        let tenants = match client
            .find_tenants(config.space_id.as_str(), Lookup::new(name, id))
            .await
        {
            Ok(tenants) => tenants,
            Err(err) => return report(diags, &summary, err),
        };

        let Some(tenant) = tenants.into_iter().next() else {
            diags.root_error(summary, "tenant not found");
            return None;
        };
        Some(TenantState::flatten(tenant))
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
    async fn read_by_id_in_explicit_space() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-4/tenants"))
            .and(query_param("ids", "Tenants-7"))
            .and(query_param("take", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Items": [{
                    "Id": "Tenants-7",
                    "SpaceId": "Spaces-4",
                    "Name": "Acme",
                    "ProjectEnvironments": {},
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let config = TenantState {
            space_id: owned("Spaces-4"),
            id: owned("Tenants-7"),
            ..Default::default()
        };
        let state = TenantDataSource::new(ClientHandle::new(client(&server)))
            .read(&mut diags, config, Default::default())
            .await
            .expect("tenant found");
        assert_eq!(state.name.as_str(), "Acme");
    }

    #[tokio::test]
    async fn no_match_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/tenants"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Items": []})))
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let config = TenantState {
            name: owned("Nobody"),
            ..Default::default()
        };
        assert!(TenantDataSource::new(ClientHandle::new(client(&server)))
            .read(&mut diags, config, Default::default())
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn unconfigured_provider() {
        let mut diags = Diagnostics::default();
        let config = TenantState {
            id: owned("Tenants-7"),
            ..Default::default()
        };
        assert!(TenantDataSource::default()
            .read(&mut diags, config, Default::default())
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 1);
    }
}
