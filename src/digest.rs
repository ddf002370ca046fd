use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::domain::DomainName;

/// 非萬用字元域名的摘要檔案名稱後綴。
pub const DNS_DIGEST_SUFFIX: &str = "_dns_digest";
/// 萬用字元域名的摘要檔案名稱後綴。
pub const DNS_DIGEST_WILDCARD_SUFFIX: &str = "_dns_digest_wildcard";

/// 定義讀取挑戰摘要時可能發生的錯誤類型。
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Digest file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

type Result<T> = std::result::Result<T, DigestError>;

/// 表示單一域名的 DNS-01 key authorization 摘要，讀取後不可變。
///
/// 同一基底域名的萬用字元與非萬用字元變體各自對應獨立的摘要。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeDigest(String);

impl ChallengeDigest {
    /// 以既有字串建立摘要，主要供請求組裝與測試使用。
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 返回摘要的字串表示。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 以檔案為後端的摘要儲存，自引擎的角度為唯讀。
///
/// 摘要檔案存放於單一目錄下，檔名由域名導出：
/// 萬用字元域名去除前綴後接 [`DNS_DIGEST_WILDCARD_SUFFIX`]，
/// 其餘域名直接接 [`DNS_DIGEST_SUFFIX`]。
/// 此兩分支的後綴選擇是讓共享基底域名的兩種挑戰保持區分的正規方式。
#[derive(Debug)]
pub struct DigestStore {
    dir: PathBuf,
}

impl DigestStore {
    /// 以指定的摘要目錄建立儲存實例。
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 導出指定域名對應的摘要檔案名稱。
    pub fn digest_file_name(domain: &DomainName) -> String {
        if domain.is_wildcard() {
            format!("{}{}", domain.base(), DNS_DIGEST_WILDCARD_SUFFIX)
        } else {
            format!("{}{}", domain.as_str(), DNS_DIGEST_SUFFIX)
        }
    }

    /// 讀取指定域名先前寫入的挑戰摘要。
    ///
    /// # 錯誤
    ///
    /// - 摘要檔案不存在時返回 `DigestError::NotFound`
    /// - 其他讀取失敗返回 `DigestError::Io`
    pub fn read_digest(&self, domain: &DomainName) -> Result<ChallengeDigest> {
        let path = self.dir.join(Self::digest_file_name(domain));
        match fs::read_to_string(&path) {
            Ok(content) => Ok(ChallengeDigest(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DigestError::NotFound(path)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn domain(s: &str) -> DomainName {
        s.parse().unwrap()
    }

    #[test]
    fn test_read_plain_digest() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("example.com_dns_digest"), "digest-value")?;

        let store = DigestStore::new(dir.path());
        let digest = store.read_digest(&domain("example.com"))?;
        assert_eq!(digest.as_str(), "digest-value");
        Ok(())
    }

    #[test]
    fn test_wildcard_selects_wildcard_suffix() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("example.com_dns_digest"), "plain")?;
        fs::write(dir.path().join("example.com_dns_digest_wildcard"), "wild")?;

        let store = DigestStore::new(dir.path());
        assert_eq!(store.read_digest(&domain("example.com"))?.as_str(), "plain");
        assert_eq!(
            store.read_digest(&domain("*.example.com"))?.as_str(),
            "wild"
        );
        Ok(())
    }

    #[test]
    fn test_missing_digest_is_not_found() {
        let dir = tempdir().unwrap();
        let store = DigestStore::new(dir.path());
        match store.read_digest(&domain("absent.com")) {
            Err(DigestError::NotFound(path)) => {
                assert!(path.ends_with("absent.com_dns_digest"));
            }
            _ => panic!("預期 NotFound 錯誤"),
        }
    }

    #[test]
    fn test_digest_file_name_derivation() {
        assert_eq!(
            DigestStore::digest_file_name(&domain("a.example.com")),
            "a.example.com_dns_digest"
        );
        assert_eq!(
            DigestStore::digest_file_name(&domain("*.example.com")),
            "example.com_dns_digest_wildcard"
        );
    }
}
