use std::{env, path::PathBuf, time::Duration};

use crate::{domain::ChatId, errors::Error, Result};

pub const DEFAULT_NEWS_FEED_URL: &str = "https://www.investing.com/rss/commodities_Metals.rss";

/// Typed configuration for the bot.
///
/// Everything except the bot token has a default so a fresh deployment only
/// needs `BOT_TOKEN`.
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_username: String,
    pub owner_username: String,
    pub admin_user_ids: Vec<i64>,

    // Marketing links
    pub broker_ref_link: String,
    pub pamm_link: String,

    // Broadcast
    pub broadcast_interval: Duration,

    // News relay
    pub news_chat_id: ChatId,
    pub news_feed_url: String,
    pub sent_news_file: PathBuf,
    pub news_poll_interval: Duration,
    pub news_initial_delay: Duration,
    pub news_batch_size: usize,
}

impl Config {
    /// Load `.env` (if any) into the process environment, then read it.
    /// Variables already set in the environment win over `.env`.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        let bot_token = env_str("BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let bot_username = env_str("BOT_USERNAME")
            .and_then(non_empty)
            .unwrap_or_else(|| "apexghost_fx_bot".to_string());
        let owner_username = env_str("OWNER_USERNAME")
            .and_then(non_empty)
            .unwrap_or_else(|| "apexghost_fx".to_string());
        let admin_user_ids = parse_csv_i64(env_str("ADMIN_USER_IDS"));

        let broker_ref_link = env_str("BROKER_REF_LINK")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://vigco.co/la-com-inv/mptZ3rwk".to_string());
        let pamm_link = env_str("PAMM_LINK")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://LINK_DA_CONTA_PAMM_AQUI".to_string());

        let broadcast_interval = env_secs("BROADCAST_INTERVAL", 14_400)?;

        let news_chat_id = ChatId(env_parse::<i64>("PAMM_GROUP_ID")?.unwrap_or(-5_220_645_085));
        let news_feed_url = env_str("NEWS_FEED_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_NEWS_FEED_URL.to_string());
        let sent_news_file = env_str("SENT_NEWS_FILE")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("sent_news.txt"));
        let news_poll_interval = env_secs("NEWS_POLL_INTERVAL", 900)?;
        let news_initial_delay = Duration::from_secs(
            env_parse::<u64>("NEWS_INITIAL_DELAY")?.unwrap_or(30),
        );
        let news_batch_size = env_parse::<usize>("NEWS_BATCH_SIZE")?.unwrap_or(5);
        if news_batch_size == 0 {
            return Err(Error::Config("NEWS_BATCH_SIZE must be at least 1".to_string()));
        }

        Ok(Self {
            bot_token,
            bot_username,
            owner_username,
            admin_user_ids,
            broker_ref_link,
            pamm_link,
            broadcast_interval,
            news_chat_id,
            news_feed_url,
            sent_news_file,
            news_poll_interval,
            news_initial_delay,
            news_batch_size,
        })
    }

    /// Deep link that opens a private chat with the bot and sends `/start <payload>`.
    pub fn start_link(&self, payload: &str) -> String {
        format!("https://t.me/{}?start={payload}", self.bot_username)
    }

    /// Whether `user_id` may run operator commands (`/broadcast`, `/news`).
    ///
    /// An empty admin list leaves them open to everyone.
    pub fn is_operator(&self, user_id: i64) -> bool {
        self.admin_user_ids.is_empty() || self.admin_user_ids.contains(&user_id)
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Present-but-invalid values are errors; absent or blank values are `None`.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    let Some(raw) = env_str(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} is not a valid number: {raw}")))
}

fn env_secs(key: &str, default: u64) -> Result<Duration> {
    let secs = env_parse::<u64>(key)?.unwrap_or(default);
    if secs == 0 {
        return Err(Error::Config(format!("{key} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_csv_i64(v: Option<String>) -> Vec<i64> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        bot_token: "x".to_string(),
        bot_username: "apex_test_bot".to_string(),
        owner_username: "apex_owner".to_string(),
        admin_user_ids: vec![],
        broker_ref_link: "https://broker.example/ref".to_string(),
        pamm_link: "https://pamm.example/join".to_string(),
        broadcast_interval: Duration::from_secs(14_400),
        news_chat_id: ChatId(-999),
        news_feed_url: DEFAULT_NEWS_FEED_URL.to_string(),
        sent_news_file: PathBuf::from("/tmp/apex-sent-news-test.txt"),
        news_poll_interval: Duration::from_secs(900),
        news_initial_delay: Duration::from_secs(30),
        news_batch_size: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotenv_values_feed_the_config_without_overriding_env() {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_nanos();
        let path = PathBuf::from(format!("/tmp/apex-dotenv-{}-{ts}.env", std::process::id()));
        std::fs::write(
            &path,
            "# deployment\nBOT_TOKEN=\"abc:123\"  # from botfather\nNEWS_BATCH_SIZE=3\nOWNER_USERNAME=from_file\n",
        )
        .unwrap();
        env::set_var("OWNER_USERNAME", "from_env");

        dotenvy::from_path(&path).unwrap();
        let cfg = Config::from_env().unwrap();

        for key in ["BOT_TOKEN", "NEWS_BATCH_SIZE", "OWNER_USERNAME"] {
            env::remove_var(key);
        }
        let _ = std::fs::remove_file(&path);

        assert_eq!(cfg.bot_token, "abc:123");
        assert_eq!(cfg.news_batch_size, 3);
        assert_eq!(cfg.owner_username, "from_env");
    }

    #[test]
    fn csv_ids_skip_garbage() {
        assert_eq!(
            parse_csv_i64(Some(" 1, x, -5 ,,".to_string())),
            vec![1, -5]
        );
        assert!(parse_csv_i64(None).is_empty());
    }

    #[test]
    fn operator_check_is_open_without_admins() {
        let mut cfg = test_config();
        assert!(cfg.is_operator(42));
        cfg.admin_user_ids = vec![7];
        assert!(cfg.is_operator(7));
        assert!(!cfg.is_operator(42));
    }

    #[test]
    fn start_link_uses_bot_username() {
        let cfg = test_config();
        assert_eq!(cfg.start_link("pamm"), "https://t.me/apex_test_bot?start=pamm");
    }
}
