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

use crate::octopus_provider::ClientHandle;
use crate::utils::{owned, replace_if_changed, report, use_state_for_unknown, WithSchema};

use super::state::OidcIdentityState;

#[derive(Debug, Default)]
pub struct OidcIdentityResource {
    client: ClientHandle,
}

impl OidcIdentityResource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

/// Split a `<service_account_id>:<identity_id>` import identifier
fn parse_import_id(id: &str) -> Option<(&str, &str)> {
    let (service_account_id, identity_id) = id.split_once(':')?;
    if service_account_id.is_empty() || identity_id.is_empty() || identity_id.contains(':') {
        return None;
    }
    Some((service_account_id, identity_id))
}

#[async_trait]
impl Resource for OidcIdentityResource {
    type State<'a> = Value<OidcIdentityState<'a>>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(OidcIdentityState::schema())
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
        let Value::Value(current) = &state else {
            return Some((state, private_state));
        };
        let client = self.client.get(diags).await?;
        let (service_account_id, id) = (current.service_account_id.as_str(), current.id.as_str());
        tracing::debug!(service_account_id, id, "reading service account oidc identity");

        match client.get_oidc_identity(service_account_id, id).await {
            Ok(identity) => Some((
                Value::Value(OidcIdentityState::flatten(identity)),
                private_state,
            )),
            Err(err) if err.is_not_found() => {
                tracing::debug!(id, "oidc identity not found, removing from state");
                Some((Value::Null, private_state))
            }
            Err(err) => report(diags, "Failed to read service account oidc identity", err),
        }
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        if let Some(state) = state.as_mut_option() {
            state.id = Value::Unknown;
        }
        Some((state, Default::default()))
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
        let mut state = proposed_state;
        let mut trigger_replace = Vec::new();
        if let (Some(state), Some(prior)) = (state.as_mut_option(), prior_state.as_ref_option()) {
            use_state_for_unknown(&mut state.id, &prior.id);
            replace_if_changed(
                &mut trigger_replace,
                "service_account_id",
                &prior.service_account_id,
                &state.service_account_id,
            );
        }
        Some((state, prior_private_state, trigger_replace))
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
        let mut state = planned_state.as_ref_option()?.clone();
        let mut identity = state.expand();
        identity.id = None;
        tracing::debug!(
            service_account_id = %identity.service_account_id,
            name = %identity.name,
            "creating service account oidc identity"
        );

        match client.create_oidc_identity(&identity).await {
            Ok(id) => {
                state.id = owned(id);
                Some((Value::Value(state), private_state))
            }
            Err(err) => report(diags, "Failed to create service account oidc identity", err),
        }
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
        let identity = planned_state.as_ref_option()?.expand();
        tracing::debug!(id = ?identity.id, "updating service account oidc identity");

        if let Err(err) = client.update_oidc_identity(&identity).await {
            return report(diags, "Failed to update service account oidc identity", err);
        }
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
        let (service_account_id, id) = (state.service_account_id.as_str(), state.id.as_str());
        tracing::debug!(service_account_id, id, "deleting service account oidc identity");

        match client.delete_oidc_identity(service_account_id, id).await {
            Ok(()) => Some(()),
            Err(err) if err.is_not_found() => Some(()),
            Err(err) => report(diags, "Failed to delete service account oidc identity", err),
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let Some((service_account_id, identity_id)) = parse_import_id(&id) else {
            diags.root_error(
                "Error importing service account oidc identity",
                format!(
                    "Expected import identifier with format: service_account_id:id. Got: {id:?}"
                ),
            );
            return None;
        };
        let client = self.client.get(diags).await?;
        tracing::debug!(service_account_id, identity_id, "importing service account oidc identity");

        match client.get_oidc_identity(service_account_id, identity_id).await {
            Ok(identity) => Some((
                Value::Value(OidcIdentityState::flatten(identity)),
                Default::default(),
            )),
            Err(err) => report(diags, "Failed to read service account oidc identity", err),
        }
    }
}
