use thiserror::Error;

use crate::{config::DynDnsConfig, domain::DomainName};

/// 定義解析更新目標時可能發生的錯誤類型。
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No token configured for host: {0}")]
    MissingToken(String),
}

type Result<T> = std::result::Result<T, ResolveError>;

/// 單一域名解析後的更新目標，於傳播時逐域名建立、請求完成後丟棄。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// DNS-01 挑戰記錄的 FQDN（固定帶有挑戰前綴）
    pub fqdn: String,
    /// 送往服務商的主機名稱：別名命中時為別名，否則即為 FQDN
    pub host: String,
    /// 該主機對應的服務商金鑰
    pub token: String,
}

/// 將域名解析為服務商的更新目標。
///
/// 流程：先導出挑戰 FQDN（萬用字元前綴在此歸一化），
/// 再查詢別名映射決定請求所用的主機，最後以主機查詢金鑰映射。
/// 別名機制讓多個邏輯主體名稱得以共用同一筆實體 DNS 記錄；
/// 「請求主機」與「記錄 FQDN」分離，使萬用字元與非萬用字元域名
/// 能按配置收斂到共享的別名上。
///
/// # 錯誤
///
/// 主機無對應金鑰時返回 `ResolveError::MissingToken`，
/// 該域名無法傳播，由協調器計入失敗清單。
pub fn resolve(domain: &DomainName, config: &DynDnsConfig) -> Result<ResolvedTarget> {
    let fqdn = domain.challenge_fqdn();
    let host = config
        .aliases
        .get(&fqdn)
        .cloned()
        .unwrap_or_else(|| fqdn.clone());
    let token = config
        .tokens
        .get(&host)
        .cloned()
        .ok_or_else(|| ResolveError::MissingToken(host.clone()))?;
    Ok(ResolvedTarget { fqdn, host, token })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(aliases: &[(&str, &str)], tokens: &[(&str, &str)]) -> DynDnsConfig {
        DynDnsConfig {
            url: "https://dyn.example.net/update".to_string(),
            host_key: "h".to_string(),
            token_key: "t".to_string(),
            record_key: "r".to_string(),
            aliases: aliases
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            tokens: tokens
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            pause_millis: 0,
            timeout_millis: 1000,
            proxy: None,
        }
    }

    fn domain(s: &str) -> DomainName {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolve_without_alias() -> Result<()> {
        let config = config(&[], &[("_acme-challenge.example.com", "secret")]);
        let target = resolve(&domain("example.com"), &config)?;
        assert_eq!(target.fqdn, "_acme-challenge.example.com");
        assert_eq!(target.host, "_acme-challenge.example.com");
        assert_eq!(target.token, "secret");
        Ok(())
    }

    #[test]
    fn test_alias_takes_precedence() -> Result<()> {
        let config = config(
            &[("_acme-challenge.example.com", "alias.example.net")],
            &[("alias.example.net", "alias-secret")],
        );
        let target = resolve(&domain("example.com"), &config)?;
        assert_eq!(target.fqdn, "_acme-challenge.example.com");
        assert_eq!(target.host, "alias.example.net");
        assert_eq!(target.token, "alias-secret");
        Ok(())
    }

    #[test]
    fn test_wildcard_resolves_to_same_target() -> Result<()> {
        let config = config(
            &[("_acme-challenge.example.com", "alias.example.net")],
            &[("alias.example.net", "alias-secret")],
        );
        let wildcard = resolve(&domain("*.example.com"), &config)?;
        let plain = resolve(&domain("example.com"), &config)?;
        assert_eq!(wildcard, plain);
        Ok(())
    }

    #[test]
    fn test_missing_token_rejected() {
        let config = config(&[], &[]);
        match resolve(&domain("example.com"), &config) {
            Err(ResolveError::MissingToken(host)) => {
                assert_eq!(host, "_acme-challenge.example.com");
            }
            _ => panic!("預期 MissingToken 錯誤"),
        }
    }
}
