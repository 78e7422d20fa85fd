use anyhow::Result;
use clap::{Parser, ValueEnum};
use follow_check::utils::logging::{self, truncate_text};
use follow_check::{App, CheckRequest, Config, Direction, ResultEnvelope};
use std::path::PathBuf;
use std::process::ExitCode;

/// 检查 GitHub 关注关系中未互相关注的用户
#[derive(Debug, Parser)]
#[command(name = "follow-check", version)]
struct Cli {
    /// GitHub 用户名
    username: String,

    /// 查询方向
    #[arg(short, long, value_enum, default_value_t = CliDirection::NotFollowedBack)]
    direction: CliDirection,

    /// GitHub Token（可提高请求配额）
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDirection {
    /// 关注了我，但我没有回关
    NotFollowingBack,
    /// 我关注了，但对方没有回关
    NotFollowedBack,
}

impl From<CliDirection> for Direction {
    fn from(direction: CliDirection) -> Self {
        match direction {
            CliDirection::NotFollowingBack => Direction::FollowedButNotFollowingBack,
            CliDirection::NotFollowedBack => Direction::FollowingButNotFollowedBack,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init(cli.verbose || config.verbose_logging);

    let app = App::initialize(config)?;
    let envelope = app
        .run(&CheckRequest {
            username: cli.username,
            token: cli.token,
            direction: cli.direction.into(),
        })
        .await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print_table(&envelope);
    }

    Ok(if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_table(envelope: &ResultEnvelope) {
    let Some(users) = &envelope.users else {
        eprintln!(
            "错误: {}",
            envelope.error_message.as_deref().unwrap_or("未知错误")
        );
        if envelope.is_rate_limit_error {
            eprintln!("提示: 使用 --token 或设置 GITHUB_TOKEN 以提高请求配额");
        }
        return;
    };

    let count = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());

    println!(
        "{:<24} {:>9} {:>9} {:>6} {:>6}  {}",
        "LOGIN", "FOLLOWERS", "FOLLOWING", "REPOS", "GISTS", "PROFILE"
    );
    for user in users {
        println!(
            "{:<24} {:>9} {:>9} {:>6} {:>6}  {}",
            truncate_text(user.login(), 20),
            count(user.follower_count),
            count(user.following_count),
            count(user.public_repo_count),
            count(user.public_gist_count),
            user.identity.profile_url
        );
    }
    println!("\n共 {} 个用户", users.len());

    if let Some(message) = envelope.error_message.as_deref() {
        eprintln!("注意: {}", message);
    }
}
