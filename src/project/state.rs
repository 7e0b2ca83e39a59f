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
use tf_provider::value::ValueString;
use tf_provider::{map, AttributePath, Block, Description, Diagnostics, Schema};

use crate::client::Project;
use crate::utils::{attribute, check_at_least_one_of, owned, WithSchema, WithValidate};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState<'a> {
    pub space_id: ValueString<'a>,
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub slug: ValueString<'a>,
}

impl<'a> WithSchema for ProjectState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain("Look up a project by id or name"),
                attributes: map! {
                    "space_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Space of the project, defaults to the provider space",
                    ),
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Id of the project",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Name of the project",
                    ),
                    "slug" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Slug of the project",
                    ),
                },
                ..Default::default()
            },
        }
    }
}

impl<'a> WithValidate for ProjectState<'a> {
    fn validate(&self, diags: &mut Diagnostics, _attr_path: AttributePath) {
        check_at_least_one_of(
            diags,
            &[("id", !self.id.is_null()), ("name", !self.name.is_null())],
        );
    }
}

impl<'a> ProjectState<'a> {
    pub fn flatten(project: Project) -> Self {
        Self {
            space_id: owned(project.space_id),
            id: owned(project.id),
            name: owned(project.name),
            slug: owned(project.slug),
        }
    }
}
