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

use serde::Deserialize;

use super::{nullable, ApiError, Collection, OctopusClient};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Environment {
    pub id: String,
    pub space_id: String,
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub slug: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
}

impl OctopusClient {
    pub async fn get_environment(&self, id: &str) -> Result<Environment, ApiError> {
        let url = self.space_endpoint("", &["environments", id], &[])?;
        self.get(url).await
    }

    /// Environments whose name matches `name` exactly
    ///
    /// The server filter is a partial match, so the result is filtered again.
    pub async fn find_environments_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<Environment>, ApiError> {
        let url = self.space_endpoint("", &["environments"], &[("name", name.to_owned())])?;
        let environments: Collection<Environment> = self.get(url).await?;
        Ok(environments
            .items
            .into_iter()
            .filter(|environment| environment.name == name)
            .collect())
    }
}
