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

use crate::client::{AwsOidcAccount, AWS_OIDC_ACCOUNT_TYPE};
use crate::utils::{expand_strings, flatten_strings, owned};

use super::state::AwsOidcAccountState;

impl<'a> AwsOidcAccountState<'a> {
    pub fn expand(&self) -> AwsOidcAccount {
        AwsOidcAccount {
            space_id: self.space_id.as_str().to_owned(),
            id: self.id.as_str().to_owned(),
            slug: self.slug.as_str().to_owned(),
            name: self.name.as_str().to_owned(),
            description: self.description.as_str().to_owned(),
            tenanted_deployment_participation: self
                .tenanted_deployment_participation
                .as_str()
                .to_owned(),
            account_type: AWS_OIDC_ACCOUNT_TYPE.to_owned(),
            role_arn: self.role_arn.as_str().to_owned(),
            session_duration: self.session_duration.as_str().to_owned(),
            environment_ids: expand_strings(&self.environment_ids),
            tenant_ids: expand_strings(&self.tenant_ids),
            tenant_tags: expand_strings(&self.tenant_tags),
            deployment_subject_keys: expand_strings(&self.deployment_subject_keys),
            health_check_subject_keys: expand_strings(&self.health_check_subject_keys),
            account_test_subject_keys: expand_strings(&self.account_test_subject_keys),
        }
    }

    pub fn flatten(account: AwsOidcAccount) -> Self {
        Self {
            space_id: owned(account.space_id),
            id: owned(account.id),
            slug: owned(account.slug),
            name: owned(account.name),
            description: owned(account.description),
            tenanted_deployment_participation: owned(account.tenanted_deployment_participation),
            role_arn: owned(account.role_arn),
            session_duration: owned(account.session_duration),
            environment_ids: flatten_strings(account.environment_ids),
            tenant_ids: flatten_strings(account.tenant_ids),
            tenant_tags: flatten_strings(account.tenant_tags),
            deployment_subject_keys: flatten_strings(account.deployment_subject_keys),
            health_check_subject_keys: flatten_strings(account.health_check_subject_keys),
            account_test_subject_keys: flatten_strings(account.account_test_subject_keys),
        }
    }
}
