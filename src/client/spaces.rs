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

use super::{ApiError, OctopusClient};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Space {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub is_default: bool,
}

impl OctopusClient {
    /// The space flagged as default on the server, if any
    pub async fn default_space(&self) -> Result<Option<Space>, ApiError> {
        let url = self.endpoint(&["spaces", "all"], &[])?;
        let spaces: Vec<Space> = self.get(url).await?;
        Ok(spaces.into_iter().find(|space| space.is_default))
    }
}
