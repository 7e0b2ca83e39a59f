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

use serde::Deserialize;

use super::{nullable, ApiError, Collection, Lookup, OctopusClient};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Project {
    pub id: String,
    pub space_id: String,
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub slug: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    pub is_disabled: bool,
    #[serde(deserialize_with = "nullable")]
    pub lifecycle_id: String,
    #[serde(deserialize_with = "nullable")]
    pub project_group_id: String,
    #[serde(deserialize_with = "nullable")]
    pub tenanted_deployment_mode: String,
}

impl OctopusClient {
    pub async fn get_project(&self, space_id: &str, id: &str) -> Result<Project, ApiError> {
        let url = self.space_endpoint(space_id, &["projects", id], &[])?;
        self.get(url).await
    }

    pub async fn find_projects(
        &self,
        space_id: &str,
        lookup: Lookup<'_>,
    ) -> Result<Vec<Project>, ApiError> {
        let url = self.space_endpoint(space_id, &["projects"], &lookup.query())?;
        let projects: Collection<Project> = self.get(url).await?;
        Ok(projects.items)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::tests::client;
    use crate::client::Lookup;

    #[tokio::test]
    async fn find_project_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-2/projects"))
            .and(query_param("name", "Payments"))
            .and(query_param("take", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ItemType": "Project",
                "TotalResults": 1,
                "ItemsPerPage": 1,
                "Items": [{
                    "Id": "Projects-42",
                    "SpaceId": "Spaces-2",
                    "Name": "Payments",
                    "Slug": "payments",
                    "LifecycleId": "Lifecycles-1",
                    "Links": {"Self": "/api/Spaces-2/projects/Projects-42"}
                }]
            })))
            .mount(&server)
            .await;

        let projects = client(&server)
            .find_projects("Spaces-2", Lookup::new("Payments", ""))
            .await
            .expect("success");
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "Projects-42");
        assert_eq!(projects[0].slug, "payments");
    }

    #[tokio::test]
    async fn get_project_in_client_space() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Spaces-1/projects/Projects-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Id": "Projects-1",
                "SpaceId": "Spaces-1",
                "Name": "Web",
                "Slug": "web",
            })))
            .mount(&server)
            .await;

        let project = client(&server)
            .get_project("", "Projects-1")
            .await
            .expect("success");
        assert_eq!(project.name, "Web");
    }
}
