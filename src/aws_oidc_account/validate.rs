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

use crate::utils::{check_each_one_of, check_one_of, WithValidate};

use super::state::{
    AwsOidcAccountState, ACCOUNT_TEST_SUBJECT_KEYS, DEPLOYMENT_SUBJECT_KEYS,
    HEALTH_CHECK_SUBJECT_KEYS, TENANTED_DEPLOYMENT_PARTICIPATIONS,
};

impl<'a> WithValidate for AwsOidcAccountState<'a> {
    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        check_one_of(
            diags,
            attr_path.clone().attribute("tenanted_deployment_participation"),
            &self.tenanted_deployment_participation,
            TENANTED_DEPLOYMENT_PARTICIPATIONS,
        );
        check_each_one_of(
            diags,
            attr_path.clone().attribute("deployment_subject_keys"),
            &self.deployment_subject_keys,
            DEPLOYMENT_SUBJECT_KEYS,
        );
        check_each_one_of(
            diags,
            attr_path.clone().attribute("health_check_subject_keys"),
            &self.health_check_subject_keys,
            HEALTH_CHECK_SUBJECT_KEYS,
        );
        check_each_one_of(
            diags,
            attr_path.attribute("account_test_subject_keys"),
            &self.account_test_subject_keys,
            ACCOUNT_TEST_SUBJECT_KEYS,
        );
    }
}
