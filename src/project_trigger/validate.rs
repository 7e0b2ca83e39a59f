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

use tf_provider::{AttributePath, Diagnostics};

use crate::utils::{check_each_one_of, check_exactly_one_of, check_one_of, WithValidate};

use super::state::{ProjectTriggerState, DAILY_INTERVALS, DAYS_OF_WEEK};

impl<'a> WithValidate for ProjectTriggerState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        check_exactly_one_of(
            diags,
            &[
                ("run_runbook_action", !self.run_runbook_action.is_null()),
                (
                    "deploy_latest_release_action",
                    !self.deploy_latest_release_action.is_null(),
                ),
                (
                    "deploy_new_release_action",
                    !self.deploy_new_release_action.is_null(),
                ),
            ],
        );
        check_exactly_one_of(
            diags,
            &[
                ("cron_expression_schedule", !self.cron_expression_schedule.is_null()),
                (
                    "continuous_daily_schedule",
                    !self.continuous_daily_schedule.is_null(),
                ),
            ],
        );

        if let Some(schedule) = self.continuous_daily_schedule.as_ref_option() {
            let attr_path = attr_path.attribute("continuous_daily_schedule");
            check_one_of(
                diags,
                attr_path.clone().attribute("interval"),
                &schedule.interval,
                DAILY_INTERVALS,
            );
            check_each_one_of(
                diags,
                attr_path.attribute("days_of_week"),
                &schedule.days_of_week,
                DAYS_OF_WEEK,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::value::Value;

    use super::*;
    use crate::project_trigger::state::{
        ContinuousDailyScheduleState, CronExpressionScheduleState, DeployNewReleaseActionState,
        RunRunbookActionState,
    };
    use crate::utils::{flatten_strings, owned};

    fn validate(state: &ProjectTriggerState) -> usize {
        let mut diags = Diagnostics::default();
        state.validate(&mut diags, AttributePath::default());
        diags.errors.len()
    }

    #[test]
    fn exactly_one_action_and_schedule() {
        let state = ProjectTriggerState {
            run_runbook_action: Value::Value(RunRunbookActionState::default()),
            cron_expression_schedule: Value::Value(CronExpressionScheduleState::default()),
            ..Default::default()
        };
        assert_eq!(validate(&state), 0);

        let both_actions = ProjectTriggerState {
            deploy_new_release_action: Value::Value(DeployNewReleaseActionState::default()),
            ..state.clone()
        };
        assert_eq!(validate(&both_actions), 1);

        assert_eq!(validate(&ProjectTriggerState::default()), 2);
    }

    #[test]
    fn unknown_nested_action_counts_as_set() {
        let state = ProjectTriggerState {
            run_runbook_action: Value::Unknown,
            cron_expression_schedule: Value::Value(CronExpressionScheduleState::default()),
            ..Default::default()
        };
        assert_eq!(validate(&state), 0);
    }

    #[test]
    fn daily_schedule_values() {
        let state = ProjectTriggerState {
            run_runbook_action: Value::Value(RunRunbookActionState::default()),
            continuous_daily_schedule: Value::Value(ContinuousDailyScheduleState {
                interval: owned("OnceHourly"),
                days_of_week: flatten_strings(vec!["Monday".into(), "Friday".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(validate(&state), 0);

        let state = ProjectTriggerState {
            continuous_daily_schedule: Value::Value(ContinuousDailyScheduleState {
                interval: owned("Twice"),
                days_of_week: flatten_strings(vec!["Caturday".into()]),
                ..Default::default()
            }),
            ..state
        };
        assert_eq!(validate(&state), 2);
    }
}
