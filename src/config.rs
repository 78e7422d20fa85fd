use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 远端单页最大条数
pub const MAX_PER_PAGE: usize = 100;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub API 根地址
    pub api_base_url: String,
    /// 默认凭证（命令行未提供时使用）
    pub token: Option<String>,
    /// 每页条数
    pub per_page: usize,
    /// 单个关系列表最多拉取的页数
    pub max_pages: usize,
    /// 详情补全的最大并发数
    pub max_concurrent_enrichment: usize,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// User-Agent 请求头
    pub user_agent: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            token: None,
            per_page: MAX_PER_PAGE,
            max_pages: 100,
            max_concurrent_enrichment: 8,
            request_timeout_secs: 30,
            user_agent: concat!("follow-check/", env!("CARGO_PKG_VERSION")).to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：TOML 文件（可选）+ 环境变量覆盖
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.apply_env().normalized())
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原值
    pub fn apply_env(self) -> Self {
        Self {
            api_base_url: env_string("GITHUB_API_BASE_URL").unwrap_or(self.api_base_url),
            token: env_string("GITHUB_TOKEN").or(self.token),
            per_page: env_parse("PER_PAGE").unwrap_or(self.per_page),
            max_pages: env_parse("MAX_PAGES").unwrap_or(self.max_pages),
            max_concurrent_enrichment: env_parse("MAX_CONCURRENT_ENRICHMENT")
                .unwrap_or(self.max_concurrent_enrichment),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS")
                .unwrap_or(self.request_timeout_secs),
            user_agent: env_string("USER_AGENT").unwrap_or(self.user_agent),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    /// 把数值限制在有效范围内
    pub fn normalized(mut self) -> Self {
        self.per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        self.max_pages = self.max_pages.max(1);
        self.max_concurrent_enrichment = self.max_concurrent_enrichment.max(1);
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        self.token = self.token.filter(|t| !t.trim().is_empty());
        self
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
