use std::{collections::HashMap, time::Duration};

use serde::Deserialize;
use thiserror::Error;

/// 連線與讀取逾時的預設值（毫秒）。
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 10_000;
/// 逐域名更新之間暫停的預設值（毫秒）。
pub const DEFAULT_PAUSE_MILLIS: u64 = 1_000;

/// 定義載入配置時可能發生的錯誤類型。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, ConfigError>;

/// 動態 DNS 更新服務的配置，在單次傳播過程中為唯讀共享狀態。
///
/// 所有欄位皆由外部提供：更新端點 URL、組裝請求所用的三個參數名稱、
/// FQDN 至別名的映射、主機至金鑰的映射、逐域名暫停時間、
/// 網路逾時與可選的代理伺服器。
#[derive(Debug, Clone, Deserialize)]
pub struct DynDnsConfig {
    /// 動態 DNS 更新端點 URL
    pub url: String,
    /// 請求中承載主機名稱的參數名
    pub host_key: String,
    /// 請求中承載金鑰的參數名
    pub token_key: String,
    /// 請求中承載挑戰記錄值的參數名
    pub record_key: String,
    /// 挑戰 FQDN 至服務商別名的映射
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// 服務商主機至金鑰的映射
    #[serde(default)]
    pub tokens: HashMap<String, String>,
    /// 逐域名更新之間的暫停時間（毫秒）
    #[serde(default = "default_pause_millis")]
    pub pause_millis: u64,
    /// 連線與讀取逾時（毫秒）
    #[serde(default = "default_timeout_millis")]
    pub timeout_millis: u64,
    /// 可選的代理伺服器 URL，預設為直連
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_pause_millis() -> u64 {
    DEFAULT_PAUSE_MILLIS
}

fn default_timeout_millis() -> u64 {
    DEFAULT_TIMEOUT_MILLIS
}

impl DynDnsConfig {
    /// 從 JSON 文件載入配置。
    ///
    /// # 錯誤
    ///
    /// JSON 格式不正確或缺少必要欄位時返回 `ConfigError::Json`。
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 返回逐域名暫停時間。
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_millis)
    }

    /// 返回網路逾時。
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// 固定的用戶端識別簽名，於行程啟動時建構一次並傳入傳輸層，
/// 作為所有更新請求的 `User-Agent`。
#[derive(Debug, Clone)]
pub struct ClientSignature(String);

impl ClientSignature {
    /// 以產品名稱、版本與執行環境描述組合簽名，
    /// 格式為 `<product>/<version> <runtime>`。
    pub fn from_parts(product: &str, version: &str, runtime: &str) -> Self {
        Self(format!("{}/{} {}", product, version, runtime))
    }

    /// 返回簽名的字串表示。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClientSignature {
    /// 以本庫的套件名稱與版本建構簽名。
    fn default() -> Self {
        Self(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
    }
}
