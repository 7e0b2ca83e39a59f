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

use super::{nullable, ApiError, OctopusClient};

pub const AWS_OIDC_ACCOUNT_TYPE: &str = "AmazonWebServicesOidcAccount";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AwsOidcAccount {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub space_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tenanted_deployment_participation: String,
    pub account_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub role_arn: String,
    #[serde(default, deserialize_with = "nullable")]
    pub session_duration: String,
    #[serde(default, deserialize_with = "nullable")]
    pub environment_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub deployment_subject_keys: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub health_check_subject_keys: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub account_test_subject_keys: Vec<String>,
}

impl OctopusClient {
    pub async fn get_aws_oidc_account(
        &self,
        space_id: &str,
        id: &str,
    ) -> Result<AwsOidcAccount, ApiError> {
        let url = self.endpoint(&["spaces", self.resolve(space_id), "accounts", id], &[])?;
        self.get(url).await
    }

    pub async fn create_aws_oidc_account(
        &self,
        account: &AwsOidcAccount,
    ) -> Result<AwsOidcAccount, ApiError> {
        let url = self.endpoint(&["spaces", self.resolve(&account.space_id), "accounts"], &[])?;
        self.post(url, account).await
    }

    pub async fn update_aws_oidc_account(
        &self,
        account: &AwsOidcAccount,
    ) -> Result<AwsOidcAccount, ApiError> {
        let url = self.endpoint(
            &["spaces", self.resolve(&account.space_id), "accounts", account.id.as_str()],
            &[],
        )?;
        self.put(url, account).await
    }

    pub async fn delete_aws_oidc_account(&self, space_id: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["spaces", self.resolve(space_id), "accounts", id], &[])?;
        self.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::tests::client;

    #[test]
    fn account_wire_format() {
        let account = AwsOidcAccount {
            space_id: "Spaces-1".to_owned(),
            name: "aws".to_owned(),
            tenanted_deployment_participation: "Untenanted".to_owned(),
            account_type: AWS_OIDC_ACCOUNT_TYPE.to_owned(),
            role_arn: "arn:aws:iam::123456789012:role/octopus".to_owned(),
            session_duration: "3600".to_owned(),
            deployment_subject_keys: vec!["space".to_owned(), "project".to_owned()],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&account).expect("serializable"),
            json!({
                "SpaceId": "Spaces-1",
                "Name": "aws",
                "Description": "",
                "TenantedDeploymentParticipation": "Untenanted",
                "AccountType": "AmazonWebServicesOidcAccount",
                "RoleArn": "arn:aws:iam::123456789012:role/octopus",
                "SessionDuration": "3600",
                "EnvironmentIds": [],
                "TenantIds": [],
                "TenantTags": [],
                "DeploymentSubjectKeys": ["space", "project"],
                "HealthCheckSubjectKeys": [],
                "AccountTestSubjectKeys": [],
            })
        );
    }

    #[tokio::test]
    async fn create_posts_to_space_accounts() {
        let server = MockServer::start().await;
        let account = AwsOidcAccount {
            name: "aws".to_owned(),
            account_type: AWS_OIDC_ACCOUNT_TYPE.to_owned(),
            role_arn: "arn:aws:iam::123456789012:role/octopus".to_owned(),
            ..Default::default()
        };
        Mock::given(method("POST"))
            .and(path("/api/spaces/Spaces-1/accounts"))
            .and(body_json(&account))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "Id": "Accounts-7",
                "SpaceId": "Spaces-1",
                "Slug": "aws",
                "Name": "aws",
                "Description": null,
                "AccountType": "AmazonWebServicesOidcAccount",
                "RoleArn": "arn:aws:iam::123456789012:role/octopus",
                "SessionDuration": "3600",
                "EnvironmentIds": [],
                "TenantIds": [],
                "TenantTags": null,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client(&server)
            .create_aws_oidc_account(&account)
            .await
            .expect("success");
        assert_eq!(created.id, "Accounts-7");
        assert_eq!(created.slug, "aws");
        assert_eq!(created.description, "");
        assert!(created.tenant_tags.is_empty());
    }

    #[tokio::test]
    async fn delete_uses_explicit_space() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/spaces/Spaces-9/accounts/Accounts-7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .delete_aws_oidc_account("Spaces-9", "Accounts-7")
            .await
            .expect("success");
    }
}
