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

use anyhow::Result;
use tf_provider::serve;
use tracing_subscriber::EnvFilter;

use crate::octopus_provider::OctopusDeployProvider;

mod aws_oidc_account;
mod client;
mod environment;
mod octopus_provider;
mod oidc_identity;
mod project;
mod project_trigger;
mod tenant;
mod tenant_connection;
mod utils;

const LOG_FILTER_ENV: &str = "TF_LOG_PROVIDER";

fn init_tracing() -> Result<()> {
    // stdout carries the plugin handshake
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting provider");
    serve("octopusdeploy", OctopusDeployProvider::default()).await
}
