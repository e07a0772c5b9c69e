//! 探索設定
//!
//! TOML ファイルまたはコードから構築し、環境変数で一部を上書きできる。
//!
//! ```toml
//! branching = 7
//! depth = 6
//! pruning = true
//! worker_stack_mb = 16
//! thread_name_prefix = "branch-thread"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::DEFAULT_BRANCHING;

/// 既定の探索深さ
pub const DEFAULT_DEPTH: i32 = 6;

/// 探索深さの上書き
pub const ENV_DEPTH: &str = "KALAH_SEARCH_DEPTH";
/// ブランチスレッドのスタックサイズ（MB）の上書き
pub const ENV_WORKER_STACK_MB: &str = "KALAH_WORKER_STACK_MB";
/// 枝刈りの有効/無効の上書き（"0"/"false"/"off" で無効）
pub const ENV_PRUNING: &str = "KALAH_SEARCH_PRUNING";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// 分岐数（= ブランチスレッド数）
    pub branching: usize,
    /// `choose_move` で使う探索深さ
    pub depth: i32,
    /// Alpha-Beta 枝刈りを行うか
    pub pruning: bool,
    /// ブランチスレッドのスタックサイズ（MB）。`None` なら OS 既定
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_stack_mb: Option<usize>,
    /// スレッド名の接頭辞。実際の名前は `{prefix}-{hole}`
    pub thread_name_prefix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            branching: DEFAULT_BRANCHING,
            depth: DEFAULT_DEPTH,
            pruning: true,
            worker_stack_mb: None,
            thread_name_prefix: "branch-thread".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branching == 0 {
            return Err(ConfigError::Invalid("branching must be at least 1".to_string()));
        }
        self.worker_stack_bytes()?;
        Ok(())
    }

    /// ブランチスレッドのスタックサイズ（バイト）。`None` なら OS 既定
    pub fn worker_stack_bytes(&self) -> Result<Option<usize>, ConfigError> {
        match self.worker_stack_mb {
            None => Ok(None),
            Some(mb) => stack_mb_to_bytes(mb).map(Some).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "worker_stack_mb must be between 1 and {}, got {mb}",
                    usize::MAX / BYTES_PER_MB
                ))
            }),
        }
    }

    pub fn with_branching(mut self, branching: usize) -> Self {
        self.branching = branching;
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// プロセスの環境変数で上書きする
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// `lookup` が返す値で上書きする。解釈できない値は警告して無視する
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DEPTH) {
            match raw.trim().parse::<i32>() {
                Ok(depth) => self.depth = depth,
                Err(_) => log::warn!("ignoring {ENV_DEPTH}={raw:?}: not an integer"),
            }
        }
        if let Some(raw) = lookup(ENV_WORKER_STACK_MB) {
            match raw.trim().parse::<usize>() {
                Ok(mb) if stack_mb_to_bytes(mb).is_some() => self.worker_stack_mb = Some(mb),
                _ => log::warn!("ignoring {ENV_WORKER_STACK_MB}={raw:?}: not a usable stack size"),
            }
        }
        if let Some(raw) = lookup(ENV_PRUNING) {
            match parse_switch(&raw) {
                Some(on) => self.pruning = on,
                None => log::warn!("ignoring {ENV_PRUNING}={raw:?}: expected on/off"),
            }
        }
        self
    }
}

const BYTES_PER_MB: usize = 1024 * 1024;

fn stack_mb_to_bytes(mb: usize) -> Option<usize> {
    if mb == 0 { None } else { mb.checked_mul(BYTES_PER_MB) }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
