//! Launches REST client.
//!
//! Talks to a SpaceX-style v2 API and shapes its launch records into the
//! GraphQL [`Launch`] type. GET responses are memoized in a [`ResponseCache`].

use std::time::Duration;

use anyhow::Context;
use futures::future::try_join_all;
use serde::Deserialize;
use url::Url;

use super::cache::ResponseCache;
use crate::config::LaunchesConfig;
use crate::error::GatewayError;
use crate::graphql::types::{Launch, Mission, Rocket};

#[derive(Debug)]
pub struct LaunchApi {
    base_url: Url,
    http: reqwest::Client,
    cache: ResponseCache,
}

impl LaunchApi {
    pub fn new(config: &LaunchesConfig) -> anyhow::Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).with_context(|| format!("invalid launches base URL: {}", config.base_url))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build launches HTTP client")?;

        Ok(Self {
            base_url,
            http,
            cache: ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Every launch, in upstream order.
    /// GET {base}/launches
    pub async fn all_launches(&self) -> anyhow::Result<Vec<Launch>> {
        let url = self.base_url.join("launches").context("all_launches: url")?;
        let records: Vec<LaunchRecord> = self.get_json(url).await.context("all_launches")?;
        Ok(records.into_iter().map(LaunchRecord::into_launch).collect())
    }

    /// GET {base}/launches?flight_number={id}
    pub async fn launch_by_id(&self, launch_id: i64) -> anyhow::Result<Option<Launch>> {
        let mut url = self.base_url.join("launches").context("launch_by_id: url")?;
        url.query_pairs_mut()
            .append_pair("flight_number", &launch_id.to_string());

        let records: Vec<LaunchRecord> = self
            .get_json(url)
            .await
            .with_context(|| format!("launch_by_id({})", launch_id))?;
        Ok(records.into_iter().next().map(LaunchRecord::into_launch))
    }

    /// Fetch several launches concurrently. Ids with no upstream launch are skipped.
    pub async fn launches_by_ids(&self, launch_ids: &[i64]) -> anyhow::Result<Vec<Launch>> {
        let found = try_join_all(launch_ids.iter().map(|id| self.launch_by_id(*id))).await?;
        Ok(found.into_iter().flatten().collect())
    }

    async fn get_json<T>(&self, url: Url) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let key = url.as_str().to_string();
        let body = match self.cache.get(&key).await {
            Some(body) => body,
            None => {
                let res = self.http.get(url).send().await.context("send")?;

                let status = res.status();
                if !status.is_success() {
                    let text = res.text().await.unwrap_or_default();
                    return Err(GatewayError::Upstream(format!("launches API returned {} - {}", status, text)).into());
                }

                let body: serde_json::Value = res.json().await.context("parse launches response")?;
                self.cache.put(&key, body.clone()).await;
                body
            }
        };

        serde_json::from_value(body).context("unexpected launches response shape")
    }
}

// Upstream response types

#[derive(Debug, Deserialize, Clone, Default)]
struct LaunchRecord {
    flight_number: Option<i64>,
    launch_date_unix: Option<i64>,
    mission_name: Option<String>,
    launch_site: Option<LaunchSiteRecord>,
    links: Option<LinksRecord>,
    rocket: Option<RocketRecord>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct LaunchSiteRecord {
    site_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct LinksRecord {
    mission_patch_small: Option<String>,
    mission_patch: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
struct RocketRecord {
    rocket_id: Option<String>,
    rocket_name: Option<String>,
    rocket_type: Option<String>,
}

impl LaunchRecord {
    fn into_launch(self) -> Launch {
        let links = self.links.unwrap_or_default();
        let rocket = self.rocket.unwrap_or_default();
        Launch {
            flight_number: self.flight_number.unwrap_or(0),
            cursor: self.launch_date_unix.map(|t| t.to_string()).unwrap_or_default(),
            site: self.launch_site.and_then(|s| s.site_name),
            mission: Mission {
                name: self.mission_name,
                mission_patch_small: links.mission_patch_small,
                mission_patch_large: links.mission_patch,
            },
            rocket: Rocket {
                id: rocket.rocket_id.unwrap_or_default().into(),
                name: rocket.rocket_name,
                rocket_type: rocket.rocket_type,
            },
        }
    }
}
