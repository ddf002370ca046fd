use std::collections::BTreeSet;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    config::DynDnsConfig,
    digest::{DigestError, DigestStore},
    domain::DomainName,
    pace::{Pacer, PacerHandle, Waited},
    request,
    resolver::{self, ResolveError},
    transport::{ProviderResponse, ResponsePayload, SendUpdate, TransportError},
};

/// 單一域名更新過程中可能發生的錯誤。
/// 所有變體都只使該域名失敗，不中止整次傳播。
#[derive(Debug, Error)]
pub enum DomainUpdateError {
    #[error("Digest error: {0}")]
    Digest(#[from] DigestError),
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// 單一域名成功更新後的結果，以原始域名（含萬用字元前綴）為鍵。
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// 證書請求中的原始域名
    pub domain: DomainName,
    /// 服務商回應的 HTTP 狀態碼
    pub code: u16,
    /// 解析後的回應內容
    pub payload: ResponsePayload,
}

impl UpdateOutcome {
    /// 判斷服務商回應是否為成功狀態碼（2xx）。
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// 渲染為 JSON 物件：狀態碼以字串形式置於 `code`，
    /// 結構化回應置於 `json`，純文字回應置於 `text`，空回應兩者皆無。
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("code".to_string(), Value::String(self.code.to_string()));
        match &self.payload {
            ResponsePayload::Json(value) => {
                map.insert("json".to_string(), value.clone());
            }
            ResponsePayload::Text(text) => {
                map.insert("text".to_string(), Value::String(text.clone()));
            }
            ResponsePayload::Empty => {}
        }
        Value::Object(map)
    }
}

/// 單次傳播的彙總報告。
///
/// 輸入集合中的每個域名恰好出現在兩處之一：
/// 成功者進入 `responses`（按處理順序），失敗者進入 `failed_domains`。
/// `has_error` 在且僅在失敗清單非空時為真。
#[derive(Debug, Default)]
pub struct PropagationReport {
    /// 各域名的成功回應，按處理順序排列
    pub responses: Vec<UpdateOutcome>,
    /// 更新失敗的域名，按處理順序排列
    pub failed_domains: Vec<DomainName>,
    /// 是否存在失敗域名
    pub has_error: bool,
}

impl PropagationReport {
    /// 查詢指定域名的成功回應。
    pub fn response_for(&self, domain: &DomainName) -> Option<&UpdateOutcome> {
        self.responses.iter().find(|o| &o.domain == domain)
    }

    /// 渲染為 JSON 物件：每個成功域名映射至其回應，
    /// 存在失敗時另附 `failed_domains` 陣列。鍵順序即處理順序。
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for outcome in &self.responses {
            map.insert(outcome.domain.as_str().to_string(), outcome.to_json());
        }
        if self.has_error {
            map.insert(
                "failed_domains".to_string(),
                Value::Array(
                    self.failed_domains
                        .iter()
                        .map(|d| Value::String(d.as_str().to_string()))
                        .collect(),
                ),
            );
        }
        Value::Object(map)
    }
}

/// 傳播協調器：對證書請求中的每個域名依序執行
/// 摘要讀取、目標解析、請求組裝與發送，並彙總結果。
///
/// 域名一律循序處理，更新之間施加可中斷的暫停，
/// 以配合動態 DNS 服務商對單一帳戶的更新限速；不做並行更新。
pub struct Propagator<'a, S: SendUpdate> {
    digests: &'a DigestStore,
    config: &'a DynDnsConfig,
    transport: &'a S,
    pacer: Pacer,
}

impl<'a, S: SendUpdate> Propagator<'a, S> {
    /// 以摘要儲存、配置與傳輸實作建立協調器，
    /// 暫停時間取自配置。
    pub fn new(digests: &'a DigestStore, config: &'a DynDnsConfig, transport: &'a S) -> Self {
        Self {
            digests,
            config,
            transport,
            pacer: Pacer::new(config.pause()),
        }
    }

    /// 取得可中斷域名間暫停的控制柄。
    pub fn pacer_handle(&self) -> PacerHandle {
        self.pacer.handle()
    }

    /// 對輸入集合中的每個域名傳播其挑戰摘要。
    ///
    /// 逐域名流程：讀取摘要、解析目標、組裝並發送更新請求。
    /// 任一步失敗即記錄該域名為失敗並繼續處理下一個域名；
    /// 單一域名的失敗永不中止整次傳播，本庫也不做任何重試。
    /// 每個域名處理完後（含失敗者）施加域名間暫停，最後一個域名除外；
    /// 暫停被中斷時僅記錄警告，該域名仍視為已完成。
    pub fn propagate(&self, domains: &BTreeSet<DomainName>) -> PropagationReport {
        let mut report = PropagationReport::default();

        let mut iter = domains.iter().peekable();
        while let Some(domain) = iter.next() {
            match self.update_domain(domain) {
                Ok(response) => {
                    info!(domain = %domain, code = response.code, "domain record updated");
                    report.responses.push(UpdateOutcome {
                        domain: domain.clone(),
                        code: response.code,
                        payload: response.payload,
                    });
                }
                Err(e) => {
                    error!(domain = %domain, error = %e, "cannot update domain record");
                    report.failed_domains.push(domain.clone());
                }
            }

            if iter.peek().is_some() && self.pacer.wait() == Waited::Interrupted {
                warn!(domain = %domain, "interrupted while pacing between domain updates");
            }
        }

        report.has_error = !report.failed_domains.is_empty();
        report
    }

    /// 執行單一域名的完整更新流程。
    fn update_domain(
        &self,
        domain: &DomainName,
    ) -> std::result::Result<ProviderResponse, DomainUpdateError> {
        let digest = self.digests.read_digest(domain)?;
        let target = resolver::resolve(domain, self.config)?;
        let request = request::build(&target, &digest, self.config);
        debug!(url = %request.url, params = %request.body, "update request");
        Ok(self.transport.send(&request)?)
    }
}
