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

use tf_provider::value::{Value, ValueString};
use tf_provider::Diagnostics;

use crate::client::{
    ContinuousDailyScheduleFilter, CronExpressionScheduleFilter, DeployLatestReleaseAction,
    DeployNewReleaseAction, ProjectTrigger, RunRunbookAction, TriggerAction, TriggerFilter,
};
use crate::utils::{expand_strings, flatten_strings, owned};

use super::state::{
    ContinuousDailyScheduleState, CronExpressionScheduleState, DeployLatestReleaseActionState,
    DeployNewReleaseActionState, ProjectTriggerState, RunRunbookActionState,
};

fn text(value: &ValueString<'_>) -> String {
    value.as_str().to_owned()
}

impl<'a> ProjectTriggerState<'a> {
    pub fn expand(&self) -> ProjectTrigger {
        ProjectTrigger {
            id: text(&self.id),
            space_id: text(&self.space_id),
            project_id: text(&self.project_id),
            name: text(&self.name),
            description: text(&self.description),
            is_disabled: self.is_disabled.clone().unwrap_or_default(),
            action: self.expand_action(),
            filter: self.expand_filter(),
        }
    }

    fn expand_action(&self) -> TriggerAction {
        if let Value::Value(action) = &self.run_runbook_action {
            return TriggerAction::RunRunbook(RunRunbookAction {
                runbook_id: text(&action.runbook_id),
                environment_ids: expand_strings(&action.environment_ids),
                tenant_ids: expand_strings(&action.tenant_ids),
                tenant_tags: expand_strings(&action.tenant_tags),
            });
        }
        if let Value::Value(action) = &self.deploy_latest_release_action {
            return TriggerAction::DeployLatestRelease(DeployLatestReleaseAction {
                source_environment_ids: expand_strings(&action.source_environment_ids),
                destination_environment_id: text(&action.destination_environment_id),
                should_redeploy: action.should_redeploy.clone().unwrap_or_default(),
                tenant_ids: expand_strings(&action.tenant_ids),
                tenant_tags: expand_strings(&action.tenant_tags),
            });
        }
        if let Value::Value(action) = &self.deploy_new_release_action {
            return TriggerAction::DeployNewRelease(DeployNewReleaseAction {
                environment_id: text(&action.environment_id),
                channel_id: action.channel_id.as_deref_option().map(str::to_owned),
                tenant_ids: expand_strings(&action.tenant_ids),
                tenant_tags: expand_strings(&action.tenant_tags),
            });
        }
        TriggerAction::Unsupported
    }

    fn expand_filter(&self) -> TriggerFilter {
        if let Value::Value(schedule) = &self.cron_expression_schedule {
            return TriggerFilter::CronExpressionSchedule(CronExpressionScheduleFilter {
                cron_expression: text(&schedule.cron_expression),
                timezone: text(&schedule.timezone),
            });
        }
        if let Value::Value(schedule) = &self.continuous_daily_schedule {
            return TriggerFilter::ContinuousDailySchedule(ContinuousDailyScheduleFilter {
                interval: text(&schedule.interval),
                hour_interval: schedule.hour_interval.as_ref_option().copied(),
                minute_interval: schedule.minute_interval.as_ref_option().copied(),
                run_after: text(&schedule.run_after),
                run_until: text(&schedule.run_until),
                days_of_week: expand_strings(&schedule.days_of_week),
                timezone: text(&schedule.timezone),
            });
        }
        TriggerFilter::Unsupported
    }

    /// Build the state of a trigger, failing on actions and filters this provider does not model
    pub fn flatten(diags: &mut Diagnostics, trigger: ProjectTrigger) -> Option<Self> {
        let mut state = Self {
            space_id: owned(trigger.space_id),
            id: owned(trigger.id),
            project_id: owned(trigger.project_id),
            name: owned(trigger.name),
            description: owned(trigger.description),
            is_disabled: Value::Value(trigger.is_disabled),
            ..Default::default()
        };

        match trigger.action {
            TriggerAction::RunRunbook(action) => {
                state.run_runbook_action = Value::Value(RunRunbookActionState {
                    runbook_id: owned(action.runbook_id),
                    environment_ids: flatten_strings(action.environment_ids),
                    tenant_ids: flatten_strings(action.tenant_ids),
                    tenant_tags: flatten_strings(action.tenant_tags),
                });
            }
            TriggerAction::DeployLatestRelease(action) => {
                state.deploy_latest_release_action = Value::Value(DeployLatestReleaseActionState {
                    source_environment_ids: flatten_strings(action.source_environment_ids),
                    destination_environment_id: owned(action.destination_environment_id),
                    should_redeploy: Value::Value(action.should_redeploy),
                    tenant_ids: flatten_strings(action.tenant_ids),
                    tenant_tags: flatten_strings(action.tenant_tags),
                });
            }
            TriggerAction::DeployNewRelease(action) => {
                state.deploy_new_release_action = Value::Value(DeployNewReleaseActionState {
                    environment_id: owned(action.environment_id),
                    channel_id: action.channel_id.map(owned).unwrap_or_default(),
                    tenant_ids: flatten_strings(action.tenant_ids),
                    tenant_tags: flatten_strings(action.tenant_tags),
                });
            }
            TriggerAction::Unsupported => {
                diags.root_error(
                    "Unhandled action type",
                    format!(
                        "Trigger {} uses an action type that cannot be managed by this provider",
                        state.id.as_str()
                    ),
                );
                return None;
            }
        }

        match trigger.filter {
            TriggerFilter::CronExpressionSchedule(filter) => {
                state.cron_expression_schedule = Value::Value(CronExpressionScheduleState {
                    cron_expression: owned(filter.cron_expression),
                    timezone: owned(filter.timezone),
                });
            }
            TriggerFilter::ContinuousDailySchedule(filter) => {
                state.continuous_daily_schedule = Value::Value(ContinuousDailyScheduleState {
                    interval: owned(filter.interval),
                    run_after: owned(filter.run_after),
                    run_until: owned(filter.run_until),
                    hour_interval: filter.hour_interval.map(Value::Value).unwrap_or_default(),
                    minute_interval: filter.minute_interval.map(Value::Value).unwrap_or_default(),
                    days_of_week: flatten_strings(filter.days_of_week),
                    timezone: owned(filter.timezone),
                });
            }
            TriggerFilter::Unsupported => {
                diags.root_error(
                    "Unhandled filter type",
                    format!(
                        "Trigger {} uses a schedule type that cannot be managed by this provider",
                        state.id.as_str()
                    ),
                );
                return None;
            }
        }

        Some(state)
    }
}
