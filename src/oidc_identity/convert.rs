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

use tf_provider::value::Value;

use crate::client::{OidcIdentity, OidcIdentityList};
use crate::utils::owned;

use super::state::{OidcIdentitiesState, OidcIdentityItem, OidcIdentityState};

impl<'a> OidcIdentityState<'a> {
    pub fn expand(&self) -> OidcIdentity {
        OidcIdentity {
            id: self.id.as_deref_option().map(str::to_owned),
            service_account_id: self.service_account_id.as_str().to_owned(),
            name: self.name.as_str().to_owned(),
            issuer: self.issuer.as_str().to_owned(),
            subject: self.subject.as_str().to_owned(),
        }
    }

    pub fn flatten(identity: OidcIdentity) -> Self {
        Self {
            id: identity.id.map(owned).unwrap_or_default(),
            service_account_id: owned(identity.service_account_id),
            name: owned(identity.name),
            issuer: owned(identity.issuer),
            subject: owned(identity.subject),
        }
    }
}

impl<'a> OidcIdentitiesState<'a> {
    /// Fill the computed attributes from a listing
    pub fn flatten(&mut self, list: OidcIdentityList) {
        self.external_id = owned(list.external_id);
        self.oidc_identities = Value::Value(
            list.oidc_identities
                .into_iter()
                .map(|identity| {
                    Value::Value(OidcIdentityItem {
                        id: identity.id.map(owned).unwrap_or_default(),
                        name: owned(identity.name),
                        issuer: owned(identity.issuer),
                        subject: owned(identity.subject),
                    })
                })
                .collect(),
        );
    }
}
