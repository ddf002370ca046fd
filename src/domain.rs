use std::{fmt, str::FromStr};

use thiserror::Error;

/// 萬用字元域名的前綴標記。
pub const WILDCARD_PREFIX: &str = "*.";
/// ACME DNS-01 挑戰記錄名稱的固定前綴。
pub const ACME_CHALLENGE_PREFIX: &str = "_acme-challenge.";

/// 定義域名解析過程中可能發生的錯誤類型。
#[derive(Debug, Error)]
pub enum DomainNameError {
    #[error("Domain name is empty")]
    Empty,
    #[error("Wildcard marker is only allowed as a prefix: {0}")]
    MisplacedWildcard(String),
}

type Result<T> = std::result::Result<T, DomainNameError>;

/// 表示證書請求中的一個主體或 SAN 域名，可帶有萬用字元前綴（`*.`）。
///
/// 不變量：域名非空，且萬用字元標記只能出現在前綴位置。
/// 該類型實作 `Ord`，使域名集合能以穩定順序走訪。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainName(String);

impl DomainName {
    /// 返回域名的原始字串表示（包含萬用字元前綴，若有）。
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 判斷該域名是否為萬用字元域名。
    pub fn is_wildcard(&self) -> bool {
        self.0.starts_with(WILDCARD_PREFIX)
    }

    /// 返回去除萬用字元前綴後的基底域名。
    pub fn base(&self) -> &str {
        self.0.strip_prefix(WILDCARD_PREFIX).unwrap_or(&self.0)
    }

    /// 導出 DNS-01 挑戰記錄的 FQDN，即在基底域名前加上
    /// [`ACME_CHALLENGE_PREFIX`]。萬用字元與非萬用字元域名共享同一個 FQDN。
    pub fn challenge_fqdn(&self) -> String {
        format!("{}{}", ACME_CHALLENGE_PREFIX, self.base())
    }
}

impl FromStr for DomainName {
    type Err = DomainNameError;

    /// 解析並驗證域名字串。
    ///
    /// # 錯誤
    ///
    /// - 空字串返回 `DomainNameError::Empty`
    /// - 萬用字元標記出現在前綴以外的位置、或去除前綴後基底為空，
    ///   返回 `DomainNameError::MisplacedWildcard`
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(DomainNameError::Empty);
        }
        let base = s.strip_prefix(WILDCARD_PREFIX).unwrap_or(s);
        if base.is_empty() || base.contains('*') {
            return Err(DomainNameError::MisplacedWildcard(s.to_string()));
        }
        Ok(DomainName(s.to_string()))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
