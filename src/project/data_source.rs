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

use super::state::ProjectState;

#[derive(Debug, Default)]
pub struct ProjectDataSource {
    client: ClientHandle,
}

impl ProjectDataSource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for ProjectDataSource {
    type State<'a> = ProjectState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ProjectState::schema())
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
        tracing::debug!(space_id = config.space_id.as_str(), id, name, "reading project");

        let summary = format!("Failed to fetch project {identifier}");
        let projects = match client
            .find_projects(config.space_id.as_str(), Lookup::new(name, id))
            .await
        {
            Ok(projects) => projects,
            Err(err) => return report(diags, &summary, err),
        };

        let Some(project) = projects.into_iter().next() else {
            diags.root_error(summary, "project not found");
            return None;
        };
        Some(ProjectState::flatten(project))
    }
}
