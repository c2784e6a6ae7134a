//! Implements the Forge trait for Github
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::*;
use octocrab::{
    Octocrab, Page,
    models::{pulls::PullRequest as GithubPullRequest, repos::Tag},
    params,
};
use serde::Deserialize;

use crate::{
    Result,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{PullRequest, ReleaseTag},
        traits::Forge,
    },
};

#[derive(Debug, Deserialize)]
struct CommitSignature {
    pub date: String,
}

#[derive(Debug, Deserialize)]
struct CommitDetails {
    pub committer: CommitSignature,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    pub commit: CommitDetails,
}

/// GitHub forge implementation using Octocrab for API interactions with
/// pull requests and tags.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client, authorizing with the personal access token when
    /// one is configured. Repository access is verified up front so a
    /// rejected token fails before anything is fetched.
    pub async fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base_url();
        let mut builder = Octocrab::builder().base_uri(base_uri.clone())?;

        if let Some(token) = &config.token {
            builder = builder.personal_token(token.clone());
        } else {
            warn!(
                "no github token configured: using anonymous access with low rate limits"
            );
        }

        let instance = builder.build()?;

        let repo = instance.repos(&config.owner, &config.repo).get().await?;

        info!(
            "authorized against repository: {}",
            repo.full_name.unwrap_or_else(|| config.repo.clone())
        );

        Ok(Self {
            config,
            base_uri,
            instance,
        })
    }

    fn to_pull_request(pr: GithubPullRequest) -> Option<PullRequest> {
        let merged_at = pr.merged_at?;

        Some(PullRequest {
            id: pr.number,
            title: pr.title.unwrap_or_default(),
            merged_at,
            author: pr.user.map(|u| u.login),
            labels: pr
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|l| l.name)
                .collect(),
            tag: None,
        })
    }

    async fn get_commit_date(&self, sha: &str) -> Result<DateTime<Utc>> {
        let endpoint = format!(
            "{}/repos/{}/{}/commits/{}",
            self.base_uri, self.config.owner, self.config.repo, sha
        );

        let response: CommitResponse =
            self.instance.get(endpoint, None::<&()>).await?;

        let date =
            DateTime::parse_from_rfc3339(&response.commit.committer.date)?;

        Ok(date.with_timezone(&Utc))
    }
}

#[async_trait]
impl Forge for Github {
    async fn list_merged_pull_requests_since(
        &self,
        since_id: u64,
    ) -> Result<Vec<PullRequest>> {
        let mut pull_requests = vec![];

        // newest first: paging stops once the watermark has been reached
        let mut page: Page<GithubPullRequest> = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(params::State::Closed)
            .sort(params::pulls::Sort::Created)
            .direction(params::Direction::Descending)
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        loop {
            let mut reached_watermark = false;

            for pr in page.take_items() {
                if pr.number <= since_id {
                    reached_watermark = true;
                    continue;
                }

                match Self::to_pull_request(pr) {
                    Some(pull_request) => pull_requests.push(pull_request),
                    None => debug!(
                        "skipping closed pull request that was never merged"
                    ),
                }
            }

            if reached_watermark {
                debug!("reached pull request #{since_id}: stop paging");
                break;
            }

            match self
                .instance
                .get_page::<GithubPullRequest>(&page.next)
                .await?
            {
                Some(next) => page = next,
                None => break,
            }
        }

        info!(
            "found {} merged pull requests newer than #{since_id}",
            pull_requests.len()
        );

        Ok(pull_requests)
    }

    async fn list_release_tags(&self) -> Result<Vec<ReleaseTag>> {
        let mut tags = vec![];

        let mut page: Page<Tag> = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .list_tags()
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        loop {
            for tag in page.take_items() {
                let created_at = self.get_commit_date(&tag.commit.sha).await?;
                debug!("found tag {} created at {created_at}", tag.name);
                tags.push(ReleaseTag {
                    name: tag.name,
                    created_at,
                });
            }

            match self.instance.get_page::<Tag>(&page.next).await? {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(tags)
    }
}
