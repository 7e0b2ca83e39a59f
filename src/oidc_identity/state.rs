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
use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};
use tf_provider::{map, AttributePath, Block, Description, Diagnostics, Schema};

use crate::utils::{attribute, WithSchema, WithValidate};

/// A single OIDC identity managed as a resource
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OidcIdentityState<'a> {
    pub id: ValueString<'a>,
    pub service_account_id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub issuer: ValueString<'a>,
    pub subject: ValueString<'a>,
}

/// Page of the OIDC identities of a service account
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OidcIdentitiesState<'a> {
    pub service_account_id: ValueString<'a>,
    pub skip: ValueNumber,
    pub take: ValueNumber,
    pub external_id: ValueString<'a>,
    pub oidc_identities: ValueList<Value<OidcIdentityItem<'a>>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OidcIdentityItem<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub issuer: ValueString<'a>,
    pub subject: ValueString<'a>,
}

impl<'a> WithSchema for OidcIdentityState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain(
                    "OIDC identity allowed to authenticate as a service account",
                ),
                attributes: map! {
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Id of the OIDC identity",
                    ),
                    "service_account_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Service account the identity belongs to. Changing it forces a new identity",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Name of the identity",
                    ),
                    "issuer" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "URL of the OIDC issuer",
                    ),
                    "subject" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Subject claim the token must carry",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

impl<'a> WithSchema for OidcIdentitiesState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain("List the OIDC identities of a service account"),
                attributes: map! {
                    "service_account_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Service account to list the identities of",
                    ),
                    "skip" => attribute(
                        AttributeType::Number,
                        AttributeConstraint::Required,
                        "Number of identities to skip",
                    ),
                    "take" => attribute(
                        AttributeType::Number,
                        AttributeConstraint::Required,
                        "Maximum number of identities to return",
                    ),
                    "external_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Audience of the tokens issued for the service account",
                    ),
                    "oidc_identities" => attribute(
                        AttributeType::AttributeList(map! {
                            "id" => attribute(AttributeType::String, AttributeConstraint::Computed, "Id of the identity"),
                            "name" => attribute(AttributeType::String, AttributeConstraint::Computed, "Name of the identity"),
                            "issuer" => attribute(AttributeType::String, AttributeConstraint::Computed, "URL of the OIDC issuer"),
                            "subject" => attribute(AttributeType::String, AttributeConstraint::Computed, "Subject claim"),
                        }),
                        AttributeConstraint::Computed,
                        "OIDC identities of the service account",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

impl<'a> WithValidate for OidcIdentitiesState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if matches!(&self.service_account_id, Value::Value(id) if id.is_empty()) {
            diags.error_short(
                "service_account_id must not be empty",
                attr_path.clone().attribute("service_account_id"),
            );
        }
        for (name, value) in [("skip", &self.skip), ("take", &self.take)] {
            if matches!(value, Value::Value(n) if *n < 0) {
                diags.error_short(
                    format!("{name} must not be negative"),
                    attr_path.clone().attribute(name),
                );
            }
        }
    }
}
