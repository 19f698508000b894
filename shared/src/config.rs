use anyhow::Context;
use dotenv::dotenv;

pub struct Config {
    pub api_key: String,
    pub bot_token: String,
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let api_key_file = std::env::var("API_KEY_FILE")
            .unwrap_or_else(|_| "api_key.txt".to_string());
        let bot_token_file = std::env::var("BOT_TOKEN_FILE")
            .unwrap_or_else(|_| "bot_token.txt".to_string());

        Config::from_files(&api_key_file, &bot_token_file)
    }

    /// Reads both secret files. Missing or empty files abort startup.
    pub fn from_files(api_key_file: &str, bot_token_file: &str) -> Result<Self, anyhow::Error> {
        let api_key = read_secret(api_key_file)
            .with_context(|| format!("API key missing ({})", api_key_file))?;
        let bot_token = read_secret(bot_token_file)
            .with_context(|| format!("Bot token missing ({})", bot_token_file))?;

        Ok(Config {
            api_key,
            bot_token,
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://finnhub.io/api/v1".to_string()),
        })
    }
}

fn read_secret(path: &str) -> Result<String, anyhow::Error> {
    let contents = std::fs::read_to_string(path)?;
    let secret = contents.trim().to_string();
    if secret.is_empty() {
        anyhow::bail!("secret file {} is empty", path);
    }
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_trimmed_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("api_key.txt");
        let token_path = dir.path().join("bot_token.txt");
        std::fs::write(&key_path, "abc123\n").unwrap();
        std::fs::write(&token_path, "  token-xyz  ").unwrap();

        let config = Config::from_files(
            key_path.to_str().unwrap(),
            token_path.to_str().unwrap(),
        )
        .unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.bot_token, "token-xyz");
    }

    #[test]
    fn missing_api_key_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("bot_token.txt");
        std::fs::write(&token_path, "token").unwrap();

        let result = Config::from_files(
            dir.path().join("nope.txt").to_str().unwrap(),
            token_path.to_str().unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_token_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("api_key.txt");
        let token_path = dir.path().join("bot_token.txt");
        std::fs::write(&key_path, "abc").unwrap();
        let mut f = std::fs::File::create(&token_path).unwrap();
        f.write_all(b"\n").unwrap();

        let result = Config::from_files(
            key_path.to_str().unwrap(),
            token_path.to_str().unwrap(),
        );
        assert!(result.is_err());
    }
}
