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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectTrigger {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub space_id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default)]
    pub is_disabled: bool,
    pub action: TriggerAction,
    pub filter: TriggerFilter,
}

/// What a trigger does when it fires, tagged by `ActionType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ActionType")]
pub enum TriggerAction {
    RunRunbook(RunRunbookAction),
    DeployLatestRelease(DeployLatestReleaseAction),
    DeployNewRelease(DeployNewReleaseAction),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunRunbookAction {
    pub runbook_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub environment_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_tags: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployLatestReleaseAction {
    #[serde(default, deserialize_with = "nullable")]
    pub source_environment_ids: Vec<String>,
    pub destination_environment_id: String,
    #[serde(rename = "ShouldRedeployWhenReleaseIsCurrent", default)]
    pub should_redeploy: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_tags: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployNewReleaseAction {
    pub environment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_ids: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tenant_tags: Vec<String>,
}

/// When a trigger fires, tagged by `FilterType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "FilterType")]
pub enum TriggerFilter {
    CronExpressionSchedule(CronExpressionScheduleFilter),
    ContinuousDailySchedule(ContinuousDailyScheduleFilter),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CronExpressionScheduleFilter {
    pub cron_expression: String,
    #[serde(default, deserialize_with = "nullable")]
    pub timezone: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContinuousDailyScheduleFilter {
    pub interval: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute_interval: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub run_after: String,
    #[serde(default, deserialize_with = "nullable")]
    pub run_until: String,
    #[serde(default, deserialize_with = "nullable")]
    pub days_of_week: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub timezone: String,
}

impl OctopusClient {
    pub async fn get_project_trigger(
        &self,
        space_id: &str,
        id: &str,
    ) -> Result<ProjectTrigger, ApiError> {
        let url = self.space_endpoint(space_id, &["projecttriggers", id], &[])?;
        self.get(url).await
    }

    pub async fn create_project_trigger(
        &self,
        trigger: &ProjectTrigger,
    ) -> Result<ProjectTrigger, ApiError> {
        let url = self.space_endpoint(&trigger.space_id, &["projecttriggers"], &[])?;
        self.post(url, trigger).await
    }

    pub async fn update_project_trigger(
        &self,
        trigger: &ProjectTrigger,
    ) -> Result<ProjectTrigger, ApiError> {
        let url = self.space_endpoint(
            &trigger.space_id,
            &["projecttriggers", trigger.id.as_str()],
            &[],
        )?;
        self.put(url, trigger).await
    }

    pub async fn delete_project_trigger(&self, space_id: &str, id: &str) -> Result<(), ApiError> {
        let url = self.space_endpoint(space_id, &["projecttriggers", id], &[])?;
        self.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::tests::client;

    #[test]
    fn decode_runbook_trigger() {
        let trigger: ProjectTrigger = serde_json::from_value(json!({
            "Id": "ProjectTriggers-1",
            "SpaceId": "Spaces-1",
            "ProjectId": "Projects-1",
            "Name": "nightly cleanup",
            "Description": null,
            "IsDisabled": false,
            "Action": {
                "ActionType": "RunRunbook",
                "RunbookId": "Runbooks-3",
                "EnvironmentIds": ["Environments-1"],
                "TenantIds": [],
                "TenantTags": null,
            },
            "Filter": {
                "FilterType": "CronExpressionSchedule",
                "CronExpression": "0 0 2 * * *",
                "Timezone": "UTC",
            },
            "Links": {"Self": "/api/Spaces-1/projecttriggers/ProjectTriggers-1"},
        }))
        .expect("valid trigger");

        assert_eq!(trigger.description, "");
        assert_eq!(
            trigger.action,
            TriggerAction::RunRunbook(RunRunbookAction {
                runbook_id: "Runbooks-3".to_owned(),
                environment_ids: vec!["Environments-1".to_owned()],
                tenant_ids: vec![],
                tenant_tags: vec![],
            })
        );
        assert_eq!(
            trigger.filter,
            TriggerFilter::CronExpressionSchedule(CronExpressionScheduleFilter {
                cron_expression: "0 0 2 * * *".to_owned(),
                timezone: "UTC".to_owned(),
            })
        );
    }

    #[test]
    fn unknown_action_and_filter_types() {
        let trigger: ProjectTrigger = serde_json::from_value(json!({
            "Id": "ProjectTriggers-2",
            "ProjectId": "Projects-1",
            "Name": "on new package",
            "Action": {"ActionType": "CreateRelease", "ChannelId": "Channels-1"},
            "Filter": {"FilterType": "FeedFilter", "Packages": []},
        }))
        .expect("valid trigger");

        assert_eq!(trigger.action, TriggerAction::Unsupported);
        assert_eq!(trigger.filter, TriggerFilter::Unsupported);
    }

    #[test]
    fn encode_deploy_latest_release() {
        let action = TriggerAction::DeployLatestRelease(DeployLatestReleaseAction {
            source_environment_ids: vec!["Environments-1".to_owned()],
            destination_environment_id: "Environments-2".to_owned(),
            should_redeploy: true,
            tenant_ids: vec![],
            tenant_tags: vec!["Tier/Gold".to_owned()],
        });
        assert_eq!(
            serde_json::to_value(&action).expect("serializable"),
            json!({
                "ActionType": "DeployLatestRelease",
                "SourceEnvironmentIds": ["Environments-1"],
                "DestinationEnvironmentId": "Environments-2",
                "ShouldRedeployWhenReleaseIsCurrent": true,
                "TenantIds": [],
                "TenantTags": ["Tier/Gold"],
            })
        );
    }

    #[tokio::test]
    async fn update_puts_to_trigger() {
        let server = MockServer::start().await;
        let trigger = ProjectTrigger {
            id: "ProjectTriggers-1".to_owned(),
            space_id: "Spaces-1".to_owned(),
            project_id: "Projects-1".to_owned(),
            name: "nightly".to_owned(),
            description: String::new(),
            is_disabled: true,
            action: TriggerAction::RunRunbook(RunRunbookAction {
                runbook_id: "Runbooks-3".to_owned(),
                ..Default::default()
            }),
            filter: TriggerFilter::CronExpressionSchedule(CronExpressionScheduleFilter {
                cron_expression: "0 0 2 * * *".to_owned(),
                timezone: "UTC".to_owned(),
            }),
        };
        Mock::given(method("PUT"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-1"))
            .and(body_partial_json(json!({
                "IsDisabled": true,
                "Action": {"ActionType": "RunRunbook", "RunbookId": "Runbooks-3"},
                "Filter": {"FilterType": "CronExpressionSchedule"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&trigger))
            .expect(1)
            .mount(&server)
            .await;

        let updated = client(&server)
            .update_project_trigger(&trigger)
            .await
            .expect("success");
        assert_eq!(updated, trigger);
    }
}
