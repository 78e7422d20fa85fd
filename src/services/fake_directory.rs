//! 测试用的内存用户目录，记录调用次数和并发峰值

use crate::error::FetchError;
use crate::models::{RelationshipSet, UserIdentity, UserProfile};
use crate::services::paged_fetcher::{Relation, UserDirectory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// 预设的失败类型
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    RateLimited,
    NotFound,
    Status(u16),
    Panic,
}

impl Failure {
    fn into_error(self, resource: String) -> FetchError {
        match self {
            Failure::RateLimited => FetchError::RateLimited { reset_at: None },
            Failure::NotFound => FetchError::NotFound { resource },
            Failure::Status(status) => FetchError::Status {
                status,
                message: "Internal Server Error".to_string(),
            },
            Failure::Panic => panic!("模拟的异常: {resource}"),
        }
    }
}

pub fn identity(login: &str) -> UserIdentity {
    UserIdentity::new(
        login,
        format!("https://avatars.example/{login}"),
        format!("https://github.com/{login}"),
    )
}

pub fn profile(login: &str, followers: u64) -> UserProfile {
    UserProfile {
        identity: identity(login),
        follower_count: Some(followers),
        following_count: Some(1),
        public_repo_count: Some(2),
        public_gist_count: Some(0),
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    relationships: HashMap<(String, Relation), Result<RelationshipSet, Failure>>,
    profile_failures: HashMap<String, Failure>,
    profile_delay: Option<Duration>,
    pub relationship_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relationships(mut self, login: &str, following: &[&str], followers: &[&str]) -> Self {
        let set = |logins: &[&str]| logins.iter().map(|l| identity(l)).collect::<Vec<_>>();
        self.relationships
            .insert((login.to_lowercase(), Relation::Following), Ok(set(following)));
        self.relationships
            .insert((login.to_lowercase(), Relation::Followers), Ok(set(followers)));
        self
    }

    pub fn failing_relationship(mut self, login: &str, relation: Relation, failure: Failure) -> Self {
        self.relationships
            .insert((login.to_lowercase(), relation), Err(failure));
        self
    }

    pub fn failing_profile(mut self, login: &str, failure: Failure) -> Self {
        self.profile_failures.insert(login.to_lowercase(), failure);
        self
    }

    pub fn with_profile_delay(mut self, delay: Duration) -> Self {
        self.profile_delay = Some(delay);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.relationship_calls.load(Ordering::SeqCst) + self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn fetch_relationships(
        &self,
        login: &str,
        relation: Relation,
        _credential: Option<&str>,
    ) -> Result<RelationshipSet, FetchError> {
        self.relationship_calls.fetch_add(1, Ordering::SeqCst);
        let resource = format!("/users/{login}/{relation}");
        match self.relationships.get(&(login.to_lowercase(), relation)) {
            Some(Ok(set)) => Ok(set.clone()),
            Some(Err(failure)) => Err(failure.into_error(resource)),
            None => Err(FetchError::NotFound { resource }),
        }
    }

    async fn fetch_profile(
        &self,
        login: &str,
        _credential: Option<&str>,
    ) -> Result<UserProfile, FetchError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.profile_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.profile_failures.get(&login.to_lowercase()) {
            Some(failure) => Err(failure.into_error(format!("/users/{login}"))),
            None => Ok(profile(login, login.len() as u64)),
        }
    }
}
