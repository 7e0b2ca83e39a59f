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

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use super::{nullable, ApiError, OctopusClient};

/// OIDC subject allowed to authenticate as a service account
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OidcIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub service_account_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub issuer: String,
    #[serde(default, deserialize_with = "nullable")]
    pub subject: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OidcIdentityList {
    #[serde(deserialize_with = "nullable")]
    pub server_url: String,
    /// Audience to request tokens for
    #[serde(deserialize_with = "nullable")]
    pub external_id: String,
    pub count: i64,
    #[serde(deserialize_with = "nullable")]
    pub oidc_identities: Vec<OidcIdentity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Created {
    id: String,
}

impl OctopusClient {
    pub async fn list_oidc_identities(
        &self,
        service_account_id: &str,
        skip: i64,
        take: i64,
    ) -> Result<OidcIdentityList, ApiError> {
        let url = self.endpoint(
            &["serviceaccounts", service_account_id, "oidcidentities", "v1"],
            &[("skip", skip.to_string()), ("take", take.to_string())],
        )?;
        self.get(url).await
    }

    pub async fn get_oidc_identity(
        &self,
        service_account_id: &str,
        id: &str,
    ) -> Result<OidcIdentity, ApiError> {
        let url = self.endpoint(
            &["serviceaccounts", service_account_id, "oidcidentities", id, "v1"],
            &[],
        )?;
        self.get(url).await
    }

    /// Create the identity, returning its id
    pub async fn create_oidc_identity(&self, identity: &OidcIdentity) -> Result<String, ApiError> {
        let url = self.endpoint(
            &[
                "serviceaccounts",
                identity.service_account_id.as_str(),
                "oidcidentities",
                "create",
                "v1",
            ],
            &[],
        )?;
        let created: Created = self.post(url, identity).await?;
        Ok(created.id)
    }

    pub async fn update_oidc_identity(&self, identity: &OidcIdentity) -> Result<(), ApiError> {
        let id = identity.id.as_deref().unwrap_or_default();
        let url = self.endpoint(
            &[
                "serviceaccounts",
                identity.service_account_id.as_str(),
                "oidcidentities",
                id,
                "v1",
            ],
            &[],
        )?;
        let _: IgnoredAny = self.put(url, identity).await?;
        Ok(())
    }

    pub async fn delete_oidc_identity(
        &self,
        service_account_id: &str,
        id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(
            &["serviceaccounts", service_account_id, "oidcidentities", id, "v1"],
            &[],
        )?;
        self.delete(url).await
    }
}
