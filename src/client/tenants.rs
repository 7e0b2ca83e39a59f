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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ApiError, Collection, Lookup, OctopusClient};

/// A tenant, as sent back with `PUT`
///
/// Fields the provider does not manage are kept in `other` so an update
/// does not reset them.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tenant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub space_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub project_environments: BTreeMap<String, Vec<String>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl OctopusClient {
    pub async fn get_tenant(&self, id: &str) -> Result<Tenant, ApiError> {
        let url = self.space_endpoint("", &["tenants", id], &[])?;
        self.get(url).await
    }

    pub async fn find_tenants(
        &self,
        space_id: &str,
        lookup: Lookup<'_>,
    ) -> Result<Vec<Tenant>, ApiError> {
        let url = self.space_endpoint(space_id, &["tenants"], &lookup.query())?;
        let tenants: Collection<Tenant> = self.get(url).await?;
        Ok(tenants.items)
    }

    pub async fn update_tenant(&self, tenant: &Tenant) -> Result<Tenant, ApiError> {
        let url = self.space_endpoint(&tenant.space_id, &["tenants", tenant.id.as_str()], &[])?;
        self.put(url, tenant).await
    }
}
