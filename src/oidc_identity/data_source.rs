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

use super::state::OidcIdentitiesState;

#[derive(Debug, Default)]
pub struct OidcIdentitiesDataSource {
    client: ClientHandle,
}

impl OidcIdentitiesDataSource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for OidcIdentitiesDataSource {
    type State<'a> = OidcIdentitiesState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(OidcIdentitiesState::schema())
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
        let service_account_id = config.service_account_id.as_str();
        if service_account_id.is_empty() {
            diags.error_short(
                "service_account_id must not be empty",
                AttributePath::new("service_account_id"),
            );
            return None;
        }
        let client = self.client.get(diags).await?;
        let skip = config.skip.clone().unwrap_or_default();
        let take = config.take.clone().unwrap_or_default();
        tracing::debug!(service_account_id, skip, take, "listing service account oidc identities");

        let list = match client
            .list_oidc_identities(service_account_id, skip, take)
            .await
        {
            Ok(list) => list,
            Err(err) => {
                return report(diags, "Failed to fetch service account oidc identities", err)
            }
        };

        let mut state = config.clone();
        state.flatten(list);
        Some(state)
    }
}
