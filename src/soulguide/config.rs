use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::chat_session::TypingDelay;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_serving_addr")]
    pub serving_addr: String,

    #[serde(default = "default_static_serving_dir")]
    pub static_serving_dir: PathBuf,

    /// Shortest time the typing indicator is shown before a reply.
    #[serde(default = "default_typing_delay_min_ms")]
    pub typing_delay_min_ms: u64,

    /// Upper (exclusive) bound of the typing indicator time.
    #[serde(default = "default_typing_delay_max_ms")]
    pub typing_delay_max_ms: u64,
}

fn default_serving_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_static_serving_dir() -> PathBuf {
    "ui/dist".into()
}

fn default_typing_delay_min_ms() -> u64 {
    1000
}

fn default_typing_delay_max_ms() -> u64 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serving_addr: default_serving_addr(),
            static_serving_dir: default_static_serving_dir(),
            typing_delay_min_ms: default_typing_delay_min_ms(),
            typing_delay_max_ms: default_typing_delay_max_ms(),
        }
    }
}

impl Config {
    pub fn typing_delay(&self) -> TypingDelay {
        TypingDelay::new(
            Duration::from_millis(self.typing_delay_min_ms),
            Duration::from_millis(self.typing_delay_max_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn missing_keys_take_defaults() -> Result<()> {
        let config: Config = serde_yaml::from_str("servingAddr: 127.0.0.1:8080\n")?;
        assert_eq!(
            config,
            Config {
                serving_addr: "127.0.0.1:8080".into(),
                ..Default::default()
            }
        );
        Ok(())
    }

    #[test]
    fn default_typing_delay_matches_page_timing() {
        let delay = Config::default().typing_delay();
        assert_eq!(delay.min(), Duration::from_millis(1000));
        assert_eq!(delay.max(), Duration::from_millis(3000));
    }
}
