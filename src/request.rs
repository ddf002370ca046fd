use crate::{config::DynDnsConfig, digest::ChallengeDigest, resolver::ResolvedTarget};

/// 一筆已組裝完成的動態 DNS 更新請求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// 更新端點 URL
    pub url: String,
    /// 已編碼的請求參數，形如 `hostKey=<host>&tokenKey=<token>&recordKey=<digest>`
    pub body: String,
}

/// 由解析後的目標、挑戰摘要與配置組裝更新請求。
///
/// 純轉換，無任何副作用；相同輸入必然產生逐位元相同的請求。
/// 參數值不做額外的 URL 轉義，由服務商的鍵值方案保證傳輸安全。
pub fn build(
    target: &ResolvedTarget,
    digest: &ChallengeDigest,
    config: &DynDnsConfig,
) -> UpdateRequest {
    let body = [
        [config.host_key.as_str(), target.host.as_str()].join("="),
        [config.token_key.as_str(), target.token.as_str()].join("="),
        [config.record_key.as_str(), digest.as_str()].join("="),
    ]
    .join("&");

    UpdateRequest {
        url: config.url.clone(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DynDnsConfig {
        DynDnsConfig {
            url: "https://dyn.example.net/update".to_string(),
            host_key: "hostname".to_string(),
            token_key: "token".to_string(),
            record_key: "txt".to_string(),
            aliases: Default::default(),
            tokens: Default::default(),
            pause_millis: 0,
            timeout_millis: 1000,
            proxy: None,
        }
    }

    fn target() -> ResolvedTarget {
        ResolvedTarget {
            fqdn: "_acme-challenge.example.com".to_string(),
            host: "alias.example.net".to_string(),
            token: "secret".to_string(),
        }
    }

    #[test]
    fn test_build_body_shape() {
        let request = build(&target(), &ChallengeDigest::new("DIGEST"), &config());
        assert_eq!(request.url, "https://dyn.example.net/update");
        assert_eq!(
            request.body,
            "hostname=alias.example.net&token=secret&txt=DIGEST"
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let config = config();
        let digest = ChallengeDigest::new("DIGEST");
        let first = build(&target(), &digest, &config);
        let second = build(&target(), &digest, &config);
        assert_eq!(first, second);
    }
}
