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

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueString};
use tf_provider::{map, AttributePath, Block, Description, Diagnostics, Provider, Schema, ValueEmpty};

use crate::{
    aws_oidc_account::AwsOidcAccountResource,
    client::OctopusClient,
    environment::EnvironmentDataSource,
    oidc_identity::{OidcIdentitiesDataSource, OidcIdentityResource},
    project::ProjectDataSource,
    project_trigger::ProjectTriggerResource,
    tenant::TenantDataSource,
    tenant_connection::TenantConnectionResource,
    utils::attribute,
};

const SERVER_URL_ENV: &str = "OCTOPUS_URL";
const API_KEY_ENV: &str = "OCTOPUS_APIKEY";
const SPACE_ID_ENV: &str = "OCTOPUS_SPACE";

/// Client shared between the provider and every resource and data source
///
/// Empty until the provider has been configured.
#[derive(Debug, Default, Clone)]
pub struct ClientHandle(Arc<RwLock<Option<OctopusClient>>>);

impl ClientHandle {
    pub fn new(client: OctopusClient) -> Self {
        Self(Arc::new(RwLock::new(Some(client))))
    }

    pub async fn set(&self, client: OctopusClient) {
        *self.0.write().await = Some(client);
    }

    /// Configured client, or an error diagnostic
    pub async fn get(&self, diags: &mut Diagnostics) -> Option<OctopusClient> {
        let client = self.0.read().await.clone();
        if client.is_none() {
            diags.root_error(
                "Unconfigured provider",
                "The Octopus Deploy client is not configured yet. Please report this issue to the provider developers.",
            );
        }
        client
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    pub server_url: ValueString<'a>,
    pub api_key: ValueString<'a>,
    pub space_id: ValueString<'a>,
}

#[derive(Debug, Default, Clone)]
pub struct OctopusDeployProvider {
    client: ClientHandle,
}

impl OctopusDeployProvider {
    pub fn client(&self) -> &ClientHandle {
        &self.client
    }
}

/// Resolve a provider attribute from the config, falling back to the environment
fn resolve_setting<F>(
    diags: &mut Diagnostics,
    value: &ValueString<'_>,
    name: &str,
    env_name: &str,
    env: F,
    required: bool,
) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let resolved = match value {
        Value::Unknown => {
            diags.error(
                format!("Unknown {name}"),
                format!(
                    "The provider cannot create the Octopus Deploy API client as {name} resolved to an unknown configuration value. \
                    Either target apply the source of the value first, set the value statically in the configuration, or use the {env_name} environment variable."
                ),
                AttributePath::new(name.to_owned()),
            );
            return None;
        }
        Value::Value(value) if !value.is_empty() => value.to_string(),
        _ => env(env_name).unwrap_or_default(),
    };

    if required && resolved.is_empty() {
        diags.error(
            format!("Missing {name}"),
            format!(
                "The provider cannot create the Octopus Deploy API client as there is a missing or empty value for the Octopus Deploy {name}. \
                Set {name} in the configuration or use the {env_name} environment variable."
            ),
            AttributePath::new(name.to_owned()),
        );
        return None;
    }
    Some(resolved)
}

impl OctopusDeployProvider {
    async fn build_client<F>(
        &self,
        diags: &mut Diagnostics,
        config: &ProviderConfig<'_>,
        env: F,
    ) -> Option<OctopusClient>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = resolve_setting(
            diags,
            &config.server_url,
            "server_url",
            SERVER_URL_ENV,
            &env,
            true,
        );
        let api_key = resolve_setting(diags, &config.api_key, "api_key", API_KEY_ENV, &env, true);
        let space_id = resolve_setting(
            diags,
            &config.space_id,
            "space_id",
            SPACE_ID_ENV,
            &env,
            false,
        );
        let (server_url, api_key, space_id) = (server_url?, api_key?, space_id?);

        let client = match OctopusClient::new(&server_url, &api_key, &space_id) {
            Ok(client) => client,
            Err(err) => {
                diags.error(
                    "Must provide a valid server URL",
                    format!("{err:#}"),
                    AttributePath::new("server_url"),
                );
                return None;
            }
        };

        if !space_id.is_empty() {
            return Some(client);
        }

        match client.default_space().await {
            Ok(Some(space)) => {
                tracing::debug!(space_id = %space.id, space_name = %space.name, "using default space");
                Some(client.with_space_id(space.id))
            }
            Ok(None) => {
                tracing::debug!("no default space, space scoped calls will be unscoped");
                Some(client)
            }
            Err(err) => {
                diags.root_error("Failed to resolve the default space", err.to_string());
                None
            }
        }
    }
}

#[async_trait]
impl Provider for OctopusDeployProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                description: Description::plain("octopusdeploy"),
                attributes: map! {
                    "server_url" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Optional,
                        "The URL of the Octopus Deploy REST API. Defaults to the OCTOPUS_URL environment variable",
                    ),
                    "api_key" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(
                            "The API key to use with the Octopus Deploy REST API. Defaults to the OCTOPUS_APIKEY environment variable",
                        ),
                        constraint: AttributeConstraint::Optional,
                        sensitive: true,
                        deprecated: false,
                    },
                    "space_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Optional,
                        "The space used when a resource does not set one. Defaults to the OCTOPUS_SPACE environment variable, then to the default space of the server",
                    ),
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        if let Value::Value(server_url) = &config.server_url {
            if url::Url::parse(server_url).is_err() {
                diags.error(
                    "Must provide a valid server URL",
                    format!("`{server_url}` is not a valid URL"),
                    AttributePath::new("server_url"),
                );
            }
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        tracing::debug!(%terraform_version, "configuring Octopus Deploy provider");

        let client = self
            .build_client(diags, &config, |name| std::env::var(name).ok())
            .await?;
        tracing::debug!(space_id = client.space_id(), "configured Octopus Deploy client");
        self.client.set(client).await;
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<std::collections::HashMap<String, Box<dyn tf_provider::resource::DynamicResource>>>
    {
        Some(map! {
            "aws_oidc_account" => AwsOidcAccountResource::new(self.client.clone()),
            "project_trigger" => ProjectTriggerResource::new(self.client.clone()),
            "service_account_oidc_identity" => OidcIdentityResource::new(self.client.clone()),
            "tenant_connection" => TenantConnectionResource::new(self.client.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<
        std::collections::HashMap<String, Box<dyn tf_provider::data_source::DynamicDataSource>>,
    > {
        Some(map! {
            "environment" => EnvironmentDataSource::new(self.client.clone()),
            "project" => ProjectDataSource::new(self.client.clone()),
            "service_account_oidc_identities" => OidcIdentitiesDataSource::new(self.client.clone()),
            "tenant" => TenantDataSource::new(self.client.clone()),
        })
    }
}

impl<'a> ProviderConfig<'a> {
    pub fn new(server_url: &'a str, api_key: &'a str, space_id: &'a str) -> Self {
        let value = |s: &'a str| {
            if s.is_empty() {
                Value::Null
            } else {
                Value::Value(Cow::Borrowed(s))
            }
        };
        Self {
            server_url: value(server_url),
            api_key: value(api_key),
            space_id: value(space_id),
        }
    }
}
