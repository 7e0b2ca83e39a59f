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

use tf_provider::{value::Value, Diagnostics};

use crate::utils::{default_empty, default_string, WithNormalize};

use super::state::ProjectTriggerState;

impl<'a> WithNormalize for ProjectTriggerState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.id.is_null() {
            self.id = Value::Unknown;
        }
        if self.space_id.is_null() {
            self.space_id = Value::Unknown;
        }
        default_string(&mut self.description, "");
        if self.is_disabled.is_null() {
            self.is_disabled = Value::Value(false);
        }

        if let Value::Value(action) = &mut self.run_runbook_action {
            default_empty(&mut action.environment_ids);
            default_empty(&mut action.tenant_ids);
            default_empty(&mut action.tenant_tags);
        }
        if let Value::Value(action) = &mut self.deploy_latest_release_action {
            if action.should_redeploy.is_null() {
                action.should_redeploy = Value::Value(false);
            }
            default_empty(&mut action.tenant_ids);
            default_empty(&mut action.tenant_tags);
        }
        if let Value::Value(action) = &mut self.deploy_new_release_action {
            default_empty(&mut action.tenant_ids);
            default_empty(&mut action.tenant_tags);
        }
    }
}
