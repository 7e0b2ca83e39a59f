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

use serde::{Deserialize, Serialize};

use tf_provider::schema::{AttributeConstraint, AttributeType};
use tf_provider::value::{ValueList, ValueString};
use tf_provider::{map, Block, Description, Schema};

use crate::utils::{attribute, flatten_strings, owned, string_list, WithSchema};

/// Link between a tenant, a project and the environments the tenant deploys the project to
///
/// The connection lives inside the tenant, under `ProjectEnvironments`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantConnectionState<'a> {
    pub tenant_id: ValueString<'a>,
    pub project_id: ValueString<'a>,
    pub environment_ids: ValueList<ValueString<'a>>,
}

impl<'a> WithSchema for TenantConnectionState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain(
                    "Connect a project to a tenant and a set of environments",
                ),
                attributes: map! {
                    "tenant_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Tenant to connect to. Changing it forces a new connection",
                    ),
                    "project_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Project to connect. Changing it forces a new connection",
                    ),
                    "environment_ids" => attribute(
                        string_list(),
                        AttributeConstraint::Optional,
                        "Environments the tenant deploys the project to",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

impl<'a> TenantConnectionState<'a> {
    /// Parse `tenant_id:project_id[:env1[+env2...]]`
    pub fn parse_import_id(id: &str) -> Option<Self> {
        let parts: Vec<&str> = id.split(':').collect();
        let (tenant_id, project_id, environment_ids) = match parts.as_slice() {
            [tenant_id, project_id] => (*tenant_id, *project_id, Vec::new()),
            [tenant_id, project_id, environments] => (
                *tenant_id,
                *project_id,
                environments.split('+').map(str::to_owned).collect(),
            ),
            _ => return None,
        };
        Some(Self {
            tenant_id: owned(tenant_id),
            project_id: owned(project_id),
            environment_ids: flatten_strings(environment_ids),
        })
    }

    /// Environments of the connection as stored by the server
    ///
    /// An empty remote list keeps a null configured list null.
    pub fn with_remote_environments(mut self, mut environment_ids: Vec<String>) -> Self {
        environment_ids.sort();
        if !(environment_ids.is_empty() && self.environment_ids.is_null()) {
            self.environment_ids = flatten_strings(environment_ids);
        }
        self
    }
}
