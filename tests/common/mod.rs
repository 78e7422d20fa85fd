//! 集成测试公用工具

#![allow(dead_code)]

use follow_check::{Config, GithubApi, PagedFetcher};
use serde_json::{json, Value};
use wiremock::MockServer;

/// 列表中的单个用户
pub fn api_user(login: &str) -> Value {
    json!({
        "login": login,
        "id": login.len(),
        "avatar_url": format!("https://avatars.example/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "type": "User"
    })
}

/// 用户详情
pub fn api_profile(login: &str, followers: u64) -> Value {
    json!({
        "login": login,
        "avatar_url": format!("https://avatars.example/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "followers": followers,
        "following": 3,
        "public_repos": 7,
        "public_gists": 1
    })
}

pub fn api_users(prefix: &str, count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| api_user(&format!("{prefix}{i}")))
            .collect(),
    )
}

pub fn test_config(server: &MockServer) -> Config {
    Config {
        api_base_url: server.uri(),
        ..Config::default()
    }
    .normalized()
}

pub fn fetcher(config: &Config) -> PagedFetcher {
    let api = GithubApi::new(config).expect("创建客户端失败");
    PagedFetcher::new(api, config)
}
