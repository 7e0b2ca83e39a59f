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

use async_trait::async_trait;

use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource, Schema};

use crate::client::ProjectTrigger;
use crate::octopus_provider::ClientHandle;
use crate::utils::{
    owned, replace_if_changed, report, use_state_for_unknown, WithNormalize, WithSchema,
    WithValidate,
};

use super::state::ProjectTriggerState;

#[derive(Debug, Default)]
pub struct ProjectTriggerResource {
    client: ClientHandle,
}

impl ProjectTriggerResource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

impl<'a> ProjectTriggerState<'a> {
    /// Planned state completed with the values assigned by the server
    fn applied(mut self, trigger: ProjectTrigger) -> Self {
        self.id = owned(trigger.id);
        self.space_id = owned(trigger.space_id);
        self
    }
}

#[async_trait]
impl Resource for ProjectTriggerResource {
    type State<'a> = Value<ProjectTriggerState<'a>>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ProjectTriggerState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if let Value::Value(config) = &config {
            config.validate(diags, AttributePath::default());
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let Value::Value(current) = &state else {
            return Some((state, private_state));
        };
        let client = self.client.get(diags).await?;
        let (space_id, id) = (current.space_id.as_str(), current.id.as_str());
        tracing::debug!(space_id, id, "reading project trigger");

        match client.get_project_trigger(space_id, id).await {
            Ok(trigger) => {
                let state = ProjectTriggerState::flatten(diags, trigger)?;
                Some((Value::Value(state), private_state))
            }
            Err(err) if err.is_not_found() => {
                tracing::debug!(id, "project trigger not found, removing from state");
                Some((Value::Null, private_state))
            }
            Err(err) => report(diags, "Failed to read project trigger", err),
        }
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        if let Some(state) = state.as_mut_option() {
            state.normalize(diags);
        }
        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut state = proposed_state;
        let mut trigger_replace = Vec::new();
        if let (Some(state), Some(prior)) = (state.as_mut_option(), prior_state.as_ref_option()) {
            use_state_for_unknown(&mut state.id, &prior.id);
            use_state_for_unknown(&mut state.space_id, &prior.space_id);
            state.normalize(diags);
            replace_if_changed(&mut trigger_replace, "space_id", &prior.space_id, &state.space_id);
            replace_if_changed(
                &mut trigger_replace,
                "project_id",
                &prior.project_id,
                &state.project_id,
            );
        }
        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        let state = planned_state.as_ref_option()?.clone();
        let trigger = state.expand();
        tracing::debug!(
            project_id = %trigger.project_id,
            name = %trigger.name,
            "creating project trigger"
        );

        match client.create_project_trigger(&trigger).await {
            Ok(trigger) => Some((Value::Value(state.applied(trigger)), private_state)),
            Err(err) => report(diags, "Failed to create project trigger", err),
        }
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        let state = planned_state.as_ref_option()?.clone();
        let trigger = state.expand();
        tracing::debug!(id = %trigger.id, "updating project trigger");

        match client.update_project_trigger(&trigger).await {
            Ok(trigger) => Some((Value::Value(state.applied(trigger)), private_state)),
            Err(err) => report(diags, "Failed to update project trigger", err),
        }
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let Value::Value(state) = state else {
            return Some(());
        };
        let client = self.client.get(diags).await?;
        let (space_id, id) = (state.space_id.as_str(), state.id.as_str());
        tracing::debug!(space_id, id, "deleting project trigger");

        match client.delete_project_trigger(space_id, id).await {
            Ok(()) => Some(()),
            Err(err) if err.is_not_found() => Some(()),
            Err(err) => report(diags, "Failed to delete project trigger", err),
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        tracing::debug!(%id, "importing project trigger");

        match client.get_project_trigger("", &id).await {
            Ok(trigger) => {
                let state = ProjectTriggerState::flatten(diags, trigger)?;
                Some((Value::Value(state), Default::default()))
            }
            Err(err) => report(diags, &format!("Failed to import project trigger {id}"), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::tests::client;
    use crate::project_trigger::state::{CronExpressionScheduleState, RunRunbookActionState};

    fn resource(server: &MockServer) -> ProjectTriggerResource {
        ProjectTriggerResource::new(ClientHandle::new(client(server)))
    }

    fn config() -> ProjectTriggerState<'static> {
        ProjectTriggerState {
            project_id: owned("Projects-1"),
            name: owned("nightly cleanup"),
            run_runbook_action: Value::Value(RunRunbookActionState {
                runbook_id: owned("Runbooks-3"),
                ..Default::default()
            }),
            cron_expression_schedule: Value::Value(CronExpressionScheduleState {
                cron_expression: owned("0 0 2 * * *"),
                timezone: owned("UTC"),
            }),
            ..Default::default()
        }
    }

    fn trigger_json() -> serde_json::Value {
        json!({
            "Id": "ProjectTriggers-1",
            "SpaceId": "Spaces-1",
            "ProjectId": "Projects-1",
            "Name": "nightly cleanup",
            "Description": "",
            "IsDisabled": false,
            "Action": {
                "ActionType": "RunRunbook",
                "RunbookId": "Runbooks-3",
                "EnvironmentIds": [],
                "TenantIds": [],
                "TenantTags": [],
            },
            "Filter": {
                "FilterType": "CronExpressionSchedule",
                "CronExpression": "0 0 2 * * *",
                "Timezone": "UTC",
            },
        })
    }

    #[tokio::test]
    async fn create_then_read() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/Spaces-1/projecttriggers"))
            .and(body_partial_json(json!({
                "ProjectId": "Projects-1",
                "Description": "",
                "IsDisabled": false,
                "Action": {"ActionType": "RunRunbook", "EnvironmentIds": []},
                "Filter": {"FilterType": "CronExpressionSchedule", "Timezone": "UTC"},
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(trigger_json()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(trigger_json()))
            .expect(1)
            .mount(&server)
            .await;

        let resource = resource(&server);
        let mut diags = Diagnostics::default();
        let (planned, private) = resource
            .plan_create(
                &mut diags,
                Value::Value(config()),
                Value::Value(config()),
                Default::default(),
            )
            .await
            .expect("plan");
        let (created, private) = resource
            .create(&mut diags, planned.clone(), planned, private, Default::default())
            .await
            .expect("created");
        assert!(diags.errors.is_empty());
        assert_eq!(
            created.as_ref_option().expect("state").id.as_str(),
            "ProjectTriggers-1"
        );

        let (read, _) = resource
            .read(&mut diags, created.clone(), private, Default::default())
            .await
            .expect("read");
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn moving_project_forces_replacement() {
        let mut diags = Diagnostics::default();
        let prior = ProjectTriggerState {
            id: owned("ProjectTriggers-1"),
            space_id: owned("Spaces-1"),
            ..config()
        };
        let proposed = ProjectTriggerState {
            id: Value::Unknown,
            space_id: Value::Unknown,
            project_id: owned("Projects-2"),
            ..config()
        };
        let (state, _, replace) = ProjectTriggerResource::default()
            .plan_update(
                &mut diags,
                Value::Value(prior),
                Value::Value(proposed.clone()),
                Value::Value(proposed),
                Default::default(),
                Default::default(),
            )
            .await
            .expect("plan");
        let state = state.as_ref_option().expect("state");
        assert_eq!(state.id.as_str(), "ProjectTriggers-1");
        assert_eq!(state.space_id.as_str(), "Spaces-1");
        assert_eq!(replace.len(), 1);
    }

    #[tokio::test]
    async fn update_puts_trigger() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-1"))
            .and(body_partial_json(json!({"IsDisabled": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(trigger_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let mut planned = ProjectTriggerState {
            id: owned("ProjectTriggers-1"),
            space_id: owned("Spaces-1"),
            is_disabled: Value::Value(true),
            ..config()
        };
        planned.normalize(&mut diags);
        let planned = Value::Value(planned);
        let (state, _) = resource(&server)
            .update(
                &mut diags,
                planned.clone(),
                planned.clone(),
                planned.clone(),
                Default::default(),
                Default::default(),
            )
            .await
            .expect("updated");
        assert_eq!(state, planned);
    }

    #[tokio::test]
    async fn import_reads_trigger() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(trigger_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let (state, _) = resource(&server)
            .import(&mut diags, "ProjectTriggers-1".to_owned())
            .await
            .expect("imported");
        assert!(diags.errors.is_empty());

        let state = state.as_ref_option().expect("state");
        assert_eq!(state.id.as_str(), "ProjectTriggers-1");
        assert_eq!(state.space_id.as_str(), "Spaces-1");
        assert_eq!(state.project_id.as_str(), "Projects-1");
        let action = state.run_runbook_action.as_ref_option().expect("action");
        assert_eq!(action.runbook_id.as_str(), "Runbooks-3");
        let schedule = state
            .cron_expression_schedule
            .as_ref_option()
            .expect("schedule");
        assert_eq!(schedule.cron_expression.as_str(), "0 0 2 * * *");
        assert!(state.continuous_daily_schedule.is_null());
    }

    #[tokio::test]
    async fn import_missing_trigger() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        assert!(resource(&server)
            .import(&mut diags, "ProjectTriggers-9".to_owned())
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn read_unhandled_action_is_an_error() {
        let server = MockServer::start().await;
        let mut body = trigger_json();
        body["Action"] = json!({"ActionType": "AutoDeploy"});
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        assert!(resource(&server)
            .import(&mut diags, "ProjectTriggers-1".to_owned())
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn destroy_missing_trigger() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/Spaces-1/projecttriggers/ProjectTriggers-1"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let mut diags = Diagnostics::default();
        let state = ProjectTriggerState {
            id: owned("ProjectTriggers-1"),
            space_id: owned("Spaces-1"),
            ..config()
        };
        assert!(resource(&server)
            .destroy(&mut diags, Value::Value(state), Default::default())
            .await
            .is_some());
        assert!(diags.errors.is_empty());
    }
}
