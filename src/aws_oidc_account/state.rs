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

use crate::utils::{attribute, string_list, WithSchema};

pub(super) const TENANTED_DEPLOYMENT_PARTICIPATIONS: &[&str] =
    &["Tenanted", "TenantedOrUntenanted", "Untenanted"];
pub(super) const DEPLOYMENT_SUBJECT_KEYS: &[&str] = &[
    "space",
    "environment",
    "project",
    "tenant",
    "runbook",
    "account",
    "type",
];
pub(super) const HEALTH_CHECK_SUBJECT_KEYS: &[&str] = &["space", "account", "target", "type"];
pub(super) const ACCOUNT_TEST_SUBJECT_KEYS: &[&str] = &["space", "account", "type"];
pub(super) const DEFAULT_SESSION_DURATION: &str = "3600";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsOidcAccountState<'a> {
    pub space_id: ValueString<'a>,
    pub id: ValueString<'a>,
    pub slug: ValueString<'a>,
    pub name: ValueString<'a>,
    pub description: ValueString<'a>,
    pub tenanted_deployment_participation: ValueString<'a>,
    pub role_arn: ValueString<'a>,
    pub session_duration: ValueString<'a>,
    pub environment_ids: ValueList<ValueString<'a>>,
    pub tenant_ids: ValueList<ValueString<'a>>,
    pub tenant_tags: ValueList<ValueString<'a>>,
    pub deployment_subject_keys: ValueList<ValueString<'a>>,
    pub health_check_subject_keys: ValueList<ValueString<'a>>,
    pub account_test_subject_keys: ValueList<ValueString<'a>>,
}

impl<'a> WithSchema for AwsOidcAccountState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain(
                    "Amazon Web Services account authenticating through OpenID Connect",
                ),
                attributes: map! {
                    "space_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Space of the account, defaults to the provider space",
                    ),
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Id of the account",
                    ),
                    "slug" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Slug of the account",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Name of the account",
                    ),
                    "description" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Description of the account",
                    ),
                    "tenanted_deployment_participation" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Tenanted deployment mode: Tenanted, TenantedOrUntenanted or Untenanted",
                    ),
                    "role_arn" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "ARN of the role to assume",
                    ),
                    "session_duration" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Duration of the assumed role session in seconds. Defaults to 3600",
                    ),
                    "environment_ids" => attribute(
                        string_list(),
                        AttributeConstraint::OptionalComputed,
                        "Environments the account is restricted to",
                    ),
                    "tenant_ids" => attribute(
                        string_list(),
                        AttributeConstraint::OptionalComputed,
                        "Tenants the account is restricted to",
                    ),
                    "tenant_tags" => attribute(
                        string_list(),
                        AttributeConstraint::OptionalComputed,
                        "Tenant tags the account is restricted to",
                    ),
                    "deployment_subject_keys" => attribute(
                        string_list(),
                        AttributeConstraint::OptionalComputed,
                        "Keys included in the subject of deployment tokens: space, environment, project, tenant, runbook, account, type",
                    ),
                    "health_check_subject_keys" => attribute(
                        string_list(),
                        AttributeConstraint::OptionalComputed,
                        "Keys included in the subject of health check tokens: space, account, target, type",
                    ),
                    "account_test_subject_keys" => attribute(
                        string_list(),
                        AttributeConstraint::OptionalComputed,
                        "Keys included in the subject of account test tokens: space, account, type",
                    ),
                },
                ..Default::default()
            },
        }
    }
}
