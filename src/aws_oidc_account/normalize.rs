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

use super::state::{AwsOidcAccountState, DEFAULT_SESSION_DURATION};

impl<'a> WithNormalize for AwsOidcAccountState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        for computed in [
            &mut self.space_id,
            &mut self.id,
            &mut self.slug,
            &mut self.description,
        ] {
            if computed.is_null() {
                *computed = Value::Unknown;
            }
        }
        default_string(&mut self.session_duration, DEFAULT_SESSION_DURATION);
        for list in [
            &mut self.environment_ids,
            &mut self.tenant_ids,
            &mut self.tenant_tags,
            &mut self.deployment_subject_keys,
            &mut self.health_check_subject_keys,
            &mut self.account_test_subject_keys,
        ] {
            default_empty(list);
        }
    }
}
