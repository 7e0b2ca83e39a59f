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

use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource, Schema};

use crate::client::OctopusClient;
use crate::octopus_provider::ClientHandle;
use crate::utils::{expand_strings, replace_if_changed, report, WithSchema};

use super::state::TenantConnectionState;

#[derive(Debug, Default)]
pub struct TenantConnectionResource {
    client: ClientHandle,
}

impl TenantConnectionResource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }

    /// Set the project environments of the tenant to the planned ones
    async fn connect(
        &self,
        diags: &mut Diagnostics,
        client: &OctopusClient,
        state: &TenantConnectionState<'_>,
    ) -> Option<()> {
        let (tenant_id, project_id) = (state.tenant_id.as_str(), state.project_id.as_str());
        let mut tenant = match client.get_tenant(tenant_id).await {
            Ok(tenant) => tenant,
            Err(err) => return report(diags, &format!("Failed to read tenant {tenant_id}"), err),
        };

        let environment_ids = expand_strings(&state.environment_ids);
        tracing::debug!(tenant_id, project_id, ?environment_ids, "connecting tenant");
        tenant
            .project_environments
            .insert(project_id.to_owned(), environment_ids);

        match client.update_tenant(&tenant).await {
            Ok(_) => Some(()),
            Err(err) => report(diags, &format!("Failed to update tenant {tenant_id}"), err),
        }
    }
}

#[async_trait]
impl Resource for TenantConnectionResource {
    type State<'a> = Value<TenantConnectionState<'a>>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(TenantConnectionState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, _config: Self::State<'a>) -> Option<()> {
        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let current = match state {
            Value::Value(current) => current,
            state => return Some((state, private_state)),
        };
        let client = self.client.get(diags).await?;
        let tenant_id = current.tenant_id.as_str().to_owned();
        tracing::debug!(%tenant_id, project_id = current.project_id.as_str(), "reading tenant connection");

        let mut tenant = match client.get_tenant(&tenant_id).await {
            Ok(tenant) => tenant,
            Err(err) if err.is_not_found() => {
                tracing::debug!(%tenant_id, "tenant not found, removing connection from state");
                return Some((Value::Null, private_state));
            }
            Err(err) => return report(diags, &format!("Failed to read tenant {tenant_id}"), err),
        };

        let Some(environment_ids) = tenant
            .project_environments
            .remove(current.project_id.as_str())
        else {
            tracing::debug!(%tenant_id, "project not connected, removing connection from state");
            return Some((Value::Null, private_state));
        };
        Some((
            Value::Value(current.with_remote_environments(environment_ids)),
            private_state,
        ))
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        Some((proposed_state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut trigger_replace = Vec::new();
        if let (Some(state), Some(prior)) =
            (proposed_state.as_ref_option(), prior_state.as_ref_option())
        {
            replace_if_changed(&mut trigger_replace, "tenant_id", &prior.tenant_id, &state.tenant_id);
            replace_if_changed(
                &mut trigger_replace,
                "project_id",
                &prior.project_id,
                &state.project_id,
            );
        }
        Some((proposed_state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        self.connect(diags, &client, planned_state.as_ref_option()?)
            .await?;
        Some((planned_state, private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        self.connect(diags, &client, planned_state.as_ref_option()?)
            .await?;
        Some((planned_state, private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let Value::Value(state) = state else {
            return Some(());
        };
        let client = self.client.get(diags).await?;
        let (tenant_id, project_id) = (state.tenant_id.as_str(), state.project_id.as_str());
        tracing::debug!(tenant_id, project_id, "disconnecting tenant");

        let mut tenant = match client.get_tenant(tenant_id).await {
            Ok(tenant) => tenant,
            Err(err) if err.is_not_found() => return Some(()),
            Err(err) => return report(diags, &format!("Failed to read tenant {tenant_id}"), err),
        };
        if tenant.project_environments.remove(project_id).is_none() {
            return Some(());
        }

        match client.update_tenant(&tenant).await {
            Ok(_) => Some(()),
            Err(err) if err.is_not_found() => Some(()),
            Err(err) => report(diags, &format!("Failed to update tenant {tenant_id}"), err),
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let Some(state) = TenantConnectionState::parse_import_id(&id) else {
            diags.root_error(
                "Error importing tenant connection",
                "ID should be in the form tenant_id:project_id[:environment_id_1[+environment_id_2[+environment_id_n]]]",
            );
            return None;
        };
        tracing::debug!(%id, "imported tenant connection");
        Some((Value::Value(state), Default::default()))
    }
}
