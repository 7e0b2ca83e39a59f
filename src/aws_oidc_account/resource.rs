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
use crate::utils::{report, use_state_for_unknown, WithNormalize, WithSchema, WithValidate};

use super::state::AwsOidcAccountState;

#[derive(Debug, Default)]
pub struct AwsOidcAccountResource {
    client: ClientHandle,
}

impl AwsOidcAccountResource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for AwsOidcAccountResource {
    type State<'a> = Value<AwsOidcAccountState<'a>>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(AwsOidcAccountState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Value::Value(config) = &config {
            config.validate(diags, AttributePath::default());
        }

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
        let (space_id, id) = (current.space_id.as_str(), current.id.as_str());
        tracing::debug!(space_id, id, "reading aws oidc account");

        match client.get_aws_oidc_account(space_id, id).await {
            Ok(account) => Some((
                Value::Value(AwsOidcAccountState::flatten(account)),
                private_state,
            )),
            Err(err) if err.is_not_found() => {
                tracing::debug!(id, "aws oidc account not found, removing from state");
                Some((Value::Null, private_state))
            }
            Err(err) => report(diags, "Failed to read aws oidc account", err),
        }
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        if let Some(state) = state.as_mut_option() {
            state.normalize(diags);
        }
        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut state = proposed_state;
        if let (Some(state), Some(prior)) = (state.as_mut_option(), prior_state.as_ref_option()) {
            use_state_for_unknown(&mut state.space_id, &prior.space_id);
            use_state_for_unknown(&mut state.id, &prior.id);
            use_state_for_unknown(&mut state.slug, &prior.slug);
            use_state_for_unknown(&mut state.description, &prior.description);
            state.normalize(diags);
        }
        Some((state, prior_private_state, Vec::new()))
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
        let account = planned_state.as_ref_option()?.expand();
        tracing::debug!(name = %account.name, space_id = %account.space_id, "creating aws oidc account");

        match client.create_aws_oidc_account(&account).await {
            Ok(account) => Some((
                Value::Value(AwsOidcAccountState::flatten(account)),
                private_state,
            )),
            Err(err) => report(diags, "Failed to create aws oidc account", err),
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
        let account = planned_state.as_ref_option()?.expand();
        tracing::debug!(id = %account.id, "updating aws oidc account");

        match client.update_aws_oidc_account(&account).await {
            Ok(account) => Some((
                Value::Value(AwsOidcAccountState::flatten(account)),
                private_state,
            )),
            Err(err) => report(diags, "Failed to update aws oidc account", err),
        }
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
        let (space_id, id) = (state.space_id.as_str(), state.id.as_str());
        tracing::debug!(space_id, id, "deleting aws oidc account");

        match client.delete_aws_oidc_account(space_id, id).await {
            Ok(()) => Some(()),
            Err(err) if err.is_not_found() => Some(()),
            Err(err) => report(diags, "Failed to delete aws oidc account", err),
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        tracing::debug!(%id, "importing aws oidc account");

        match client.get_aws_oidc_account("", &id).await {
            Ok(account) => Some((
                Value::Value(AwsOidcAccountState::flatten(account)),
                Default::default(),
            )),
            Err(err) => report(diags, &format!("Failed to import aws oidc account {id}"), err),
        }
    }
}
