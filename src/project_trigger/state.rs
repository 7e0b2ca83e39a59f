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

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueBool, ValueList, ValueNumber, ValueString};
use tf_provider::{map, Block, Description, Schema};

use crate::utils::{attribute, string_list, WithSchema};

pub(super) const DAILY_INTERVALS: &[&str] = &["OnceDaily", "OnceHourly", "OnceEveryMinute"];
pub(super) const DAYS_OF_WEEK: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTriggerState<'a> {
    pub space_id: ValueString<'a>,
    pub id: ValueString<'a>,
    pub project_id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub description: ValueString<'a>,
    pub is_disabled: ValueBool,
    pub run_runbook_action: Value<RunRunbookActionState<'a>>,
    pub deploy_latest_release_action: Value<DeployLatestReleaseActionState<'a>>,
    pub deploy_new_release_action: Value<DeployNewReleaseActionState<'a>>,
    pub cron_expression_schedule: Value<CronExpressionScheduleState<'a>>,
    pub continuous_daily_schedule: Value<ContinuousDailyScheduleState<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRunbookActionState<'a> {
    pub runbook_id: ValueString<'a>,
    pub environment_ids: ValueList<ValueString<'a>>,
    pub tenant_ids: ValueList<ValueString<'a>>,
    pub tenant_tags: ValueList<ValueString<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployLatestReleaseActionState<'a> {
    pub source_environment_ids: ValueList<ValueString<'a>>,
    pub destination_environment_id: ValueString<'a>,
    pub should_redeploy: ValueBool,
    pub tenant_ids: ValueList<ValueString<'a>>,
    pub tenant_tags: ValueList<ValueString<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployNewReleaseActionState<'a> {
    pub environment_id: ValueString<'a>,
    pub channel_id: ValueString<'a>,
    pub tenant_ids: ValueList<ValueString<'a>>,
    pub tenant_tags: ValueList<ValueString<'a>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CronExpressionScheduleState<'a> {
    pub cron_expression: ValueString<'a>,
    pub timezone: ValueString<'a>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousDailyScheduleState<'a> {
    pub interval: ValueString<'a>,
    pub run_after: ValueString<'a>,
    pub run_until: ValueString<'a>,
    pub hour_interval: ValueNumber,
    pub minute_interval: ValueNumber,
    pub days_of_week: ValueList<ValueString<'a>>,
    pub timezone: ValueString<'a>,
}

/// Tenant targeting shared by every action
fn tenant_attributes(what: &str) -> HashMap<String, Attribute> {
    map! {
        "tenant_ids" => attribute(
            string_list(),
            AttributeConstraint::OptionalComputed,
            &format!("Tenants to {what}. Defaults to none"),
        ),
        "tenant_tags" => attribute(
            string_list(),
            AttributeConstraint::OptionalComputed,
            &format!("Tenant tags selecting the tenants to {what}. Defaults to none"),
        ),
    }
}

fn run_runbook_action() -> Attribute {
    let mut attributes = tenant_attributes("run the runbook for");
    let specific: HashMap<String, Attribute> = map! {
        "runbook_id" => attribute(
            AttributeType::String,
            AttributeConstraint::Required,
            "Runbook to run",
        ),
        "environment_ids" => attribute(
            string_list(),
            AttributeConstraint::OptionalComputed,
            "Environments to run the runbook in. Defaults to none",
        ),
    };
    attributes.extend(specific);
    attribute(
        AttributeType::AttributeSingle(attributes),
        AttributeConstraint::Optional,
        "Run a runbook",
    )
}

fn deploy_latest_release_action() -> Attribute {
    let mut attributes = tenant_attributes("deploy to");
    let specific: HashMap<String, Attribute> = map! {
        "source_environment_ids" => attribute(
            string_list(),
            AttributeConstraint::Required,
            "Environments the latest release is taken from",
        ),
        "destination_environment_id" => attribute(
            AttributeType::String,
            AttributeConstraint::Required,
            "Environment the release is deployed to",
        ),
        "should_redeploy" => attribute(
            AttributeType::Bool,
            AttributeConstraint::OptionalComputed,
            "Redeploy when the latest release is already deployed. Defaults to false",
        ),
    };
    attributes.extend(specific);
    attribute(
        AttributeType::AttributeSingle(attributes),
        AttributeConstraint::Optional,
        "Promote the latest release of a set of environments",
    )
}

fn deploy_new_release_action() -> Attribute {
    let mut attributes = tenant_attributes("deploy to");
    let specific: HashMap<String, Attribute> = map! {
        "environment_id" => attribute(
            AttributeType::String,
            AttributeConstraint::Required,
            "Environment the new release is deployed to",
        ),
        "channel_id" => attribute(
            AttributeType::String,
            AttributeConstraint::Optional,
            "Channel of the new release",
        ),
    };
    attributes.extend(specific);
    attribute(
        AttributeType::AttributeSingle(attributes),
        AttributeConstraint::Optional,
        "Create and deploy a new release",
    )
}

fn cron_expression_schedule() -> Attribute {
    attribute(
        AttributeType::AttributeSingle(map! {
            "cron_expression" => attribute(
                AttributeType::String,
                AttributeConstraint::Required,
                "Cron expression the trigger runs on",
            ),
            "timezone" => attribute(
                AttributeType::String,
                AttributeConstraint::Required,
                "Timezone of the cron expression",
            ),
        }),
        AttributeConstraint::Optional,
        "Run on a cron expression",
    )
}

fn continuous_daily_schedule() -> Attribute {
    attribute(
        AttributeType::AttributeSingle(map! {
            "interval" => attribute(
                AttributeType::String,
                AttributeConstraint::Required,
                "How often the trigger runs within the window: OnceDaily, OnceHourly or OnceEveryMinute",
            ),
            "run_after" => attribute(
                AttributeType::String,
                AttributeConstraint::Required,
                "Start of the daily window",
            ),
            "run_until" => attribute(
                AttributeType::String,
                AttributeConstraint::Required,
                "End of the daily window",
            ),
            "hour_interval" => attribute(
                AttributeType::Number,
                AttributeConstraint::Optional,
                "Hours between runs when the interval is OnceHourly",
            ),
            "minute_interval" => attribute(
                AttributeType::Number,
                AttributeConstraint::Optional,
                "Minutes between runs when the interval is OnceEveryMinute",
            ),
            "days_of_week" => attribute(
                string_list(),
                AttributeConstraint::Required,
                "Days the trigger runs on",
            ),
            "timezone" => attribute(
                AttributeType::String,
                AttributeConstraint::Required,
                "Timezone of the window",
            ),
        }),
        AttributeConstraint::Optional,
        "Run continuously within a daily window",
    )
}

impl<'a> WithSchema for ProjectTriggerState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                description: Description::plain(
                    "Scheduled trigger running a runbook or deploying a release of a project",
                ),
                attributes: map! {
                    "space_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Space of the trigger, defaults to the provider space. Changing it forces a new trigger",
                    ),
                    "id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Computed,
                        "Id of the trigger",
                    ),
                    "project_id" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Project of the trigger. Changing it forces a new trigger",
                    ),
                    "name" => attribute(
                        AttributeType::String,
                        AttributeConstraint::Required,
                        "Name of the trigger",
                    ),
                    "description" => attribute(
                        AttributeType::String,
                        AttributeConstraint::OptionalComputed,
                        "Description of the trigger. Defaults to an empty string",
                    ),
                    "is_disabled" => attribute(
                        AttributeType::Bool,
                        AttributeConstraint::OptionalComputed,
                        "Whether the trigger is disabled. Defaults to false",
                    ),
                    "run_runbook_action" => run_runbook_action(),
                    "deploy_latest_release_action" => deploy_latest_release_action(),
                    "deploy_new_release_action" => deploy_new_release_action(),
                    "cron_expression_schedule" => cron_expression_schedule(),
                    "continuous_daily_schedule" => continuous_daily_schedule(),
                },
                ..Default::default()
            },
        }
    }
}
