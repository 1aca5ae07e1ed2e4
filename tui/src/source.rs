//! Scenario loading: local content directory or the content server.

use std::path::PathBuf;

use anyhow::{Context, bail};
use playbill_protocol::{LoginRequest, LoginResponse, Scenario, ScenarioIndex, ScenarioSummary};
use url::Url;

/// Where scenario documents come from.
#[derive(Debug, Clone)]
pub enum ScenarioSource {
    /// A content directory holding `scenarios/index.json` and the
    /// documents next to it.
    Dir(PathBuf),
    /// A running content server; the access code is presented first
    /// when the server's login gate is on.
    Server {
        base: Url,
        access_code: Option<String>,
    },
}

/// A catalogue entry together with its parsed document.
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub summary: ScenarioSummary,
    pub scenario: Scenario,
}

impl ScenarioSource {
    /// Load the catalogue and every document it names. Documents that
    /// fail to parse or validate are skipped with a warning so one bad
    /// file does not take the whole demo down.
    pub fn load_all(&self) -> anyhow::Result<Vec<LoadedScenario>> {
        match self {
            Self::Dir(content_dir) => {
                let scenarios_dir = content_dir.join("scenarios");
                let index_path = scenarios_dir.join("index.json");
                let raw = std::fs::read_to_string(&index_path)
                    .with_context(|| format!("reading {}", index_path.display()))?;
                let index: ScenarioIndex =
                    serde_json::from_str(&raw).context("parsing scenario index")?;

                let mut loaded = Vec::new();
                for summary in index.scenarios {
                    let path = scenarios_dir.join(format!("{}.json", summary.id));
                    match std::fs::read_to_string(&path)
                        .map_err(anyhow::Error::from)
                        .and_then(|raw| Ok(serde_json::from_str::<Scenario>(&raw)?))
                    {
                        Ok(scenario) => push_checked(&mut loaded, summary, scenario),
                        Err(err) => {
                            tracing::warn!(id = %summary.id, "skipping scenario: {err}");
                        }
                    }
                }
                Ok(loaded)
            }
            Self::Server { base, access_code } => {
                let client = reqwest::blocking::Client::builder()
                    .cookie_store(true)
                    .build()
                    .context("building HTTP client")?;

                if let Some(code) = access_code {
                    let login: LoginResponse = client
                        .post(base.join("/api/login")?)
                        .json(&LoginRequest {
                            access_code: code.clone(),
                        })
                        .send()
                        .context("posting login")?
                        .json()
                        .context("parsing login response")?;
                    if !login.success {
                        bail!("server refused the access code: {}", login.message);
                    }
                }

                let response = client
                    .get(base.join("/api/scenarios")?)
                    .send()
                    .context("fetching scenario index")?;
                if response.status() == reqwest::StatusCode::UNAUTHORIZED {
                    bail!("server requires an access code (pass --access-code)");
                }
                let index: ScenarioIndex = response
                    .error_for_status()
                    .context("fetching scenario index")?
                    .json()
                    .context("parsing scenario index")?;

                let mut loaded = Vec::new();
                for summary in index.scenarios {
                    let url = base.join(&format!("/api/scenarios/{}", summary.id))?;
                    match client
                        .get(url)
                        .send()
                        .and_then(reqwest::blocking::Response::error_for_status)
                        .and_then(|r| r.json::<Scenario>())
                    {
                        Ok(scenario) => push_checked(&mut loaded, summary, scenario),
                        Err(err) => {
                            tracing::warn!(id = %summary.id, "skipping scenario: {err}");
                        }
                    }
                }
                Ok(loaded)
            }
        }
    }
}

fn push_checked(loaded: &mut Vec<LoadedScenario>, summary: ScenarioSummary, scenario: Scenario) {
    match scenario.validate() {
        Ok(()) => loaded.push(LoadedScenario { summary, scenario }),
        Err(err) => tracing::warn!(id = %summary.id, "skipping invalid scenario: {err}"),
    }
}
