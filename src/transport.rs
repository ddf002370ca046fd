use reqwest::{
    blocking::{Client, Response},
    header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE},
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::{ClientSignature, DynDnsConfig},
    request::UpdateRequest,
};

pub const MIME_JSON: &str = "application/json";
pub const WWW_FORM: &str = "application/x-www-form-urlencoded";

/// 定義傳輸層可能發生的錯誤類型，涵蓋連線、逾時與代理設定失敗。
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

type Result<T> = std::result::Result<T, TransportError>;

/// 服務商回應的內容：可解析為 JSON 時為結構化值，
/// 否則保留原始文字；空回應體不視為錯誤。
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponsePayload {
    /// 解析回應體文字。空字串返回 `Empty`；
    /// JSON 解析成功返回 `Json`，失敗則原樣保留為 `Text`。
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text.to_string()),
        }
    }
}

/// 一次更新請求的服務商回應，狀態碼必然被記錄。
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// HTTP 狀態碼
    pub code: u16,
    /// 解析後的回應內容
    pub payload: ResponsePayload,
}

/// 更新請求的發送能力。GET 與 POST 變體以實作此 trait 的
/// 策略物件提供，協調器對具體的 HTTP 動詞保持無知。
pub trait SendUpdate {
    /// 發送更新請求並返回服務商回應。
    ///
    /// # 錯誤
    ///
    /// 連線失敗、逾時或讀取失敗時返回 `TransportError`。
    fn send(&self, request: &UpdateRequest) -> Result<ProviderResponse>;
}

/// 共享的連線建立層：持有依配置建構的 HTTP 用戶端，
/// 統一負責逾時、代理、用戶端簽名與連線不復用等設定。
#[derive(Debug)]
pub struct HttpConnector {
    client: Client,
}

impl HttpConnector {
    /// 依配置與用戶端簽名建構連線層。
    ///
    /// 連線與讀取共用同一逾時；連線池容量設為零，
    /// 使每個域名的請求各自開啟並關閉自己的連線。
    ///
    /// # 錯誤
    ///
    /// 代理 URL 無效或用戶端建構失敗時返回 `TransportError`。
    pub fn new(config: &DynDnsConfig, signature: &ClientSignature) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(config.timeout())
            .timeout(config.timeout())
            .user_agent(signature.as_str())
            .pool_max_idle_per_host(0);
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// 讀取回應體全文並解析，狀態碼一併記錄。
    fn read_response(response: Response) -> Result<ProviderResponse> {
        let code = response.status().as_u16();
        let text = response.text()?;
        Ok(ProviderResponse {
            code,
            payload: ResponsePayload::parse(&text),
        })
    }
}

/// 以 GET 查詢字串發送更新請求的傳輸實作。
#[derive(Debug)]
pub struct GetTransport {
    conn: HttpConnector,
}

impl GetTransport {
    pub fn new(config: &DynDnsConfig, signature: &ClientSignature) -> Result<Self> {
        Ok(Self {
            conn: HttpConnector::new(config, signature)?,
        })
    }
}

impl SendUpdate for GetTransport {
    fn send(&self, request: &UpdateRequest) -> Result<ProviderResponse> {
        debug!(url = %request.url, params = %request.body, "sending GET update");
        let response = self
            .conn
            .client
            .get(format!("{}?{}", request.url, request.body))
            .header(ACCEPT, MIME_JSON)
            .header(CACHE_CONTROL, "no-cache")
            .send()?;
        HttpConnector::read_response(response)
    }
}

/// 以表單編碼 POST 發送更新請求的傳輸實作。
#[derive(Debug)]
pub struct PostTransport {
    conn: HttpConnector,
}

impl PostTransport {
    pub fn new(config: &DynDnsConfig, signature: &ClientSignature) -> Result<Self> {
        Ok(Self {
            conn: HttpConnector::new(config, signature)?,
        })
    }
}

impl SendUpdate for PostTransport {
    fn send(&self, request: &UpdateRequest) -> Result<ProviderResponse> {
        debug!(url = %request.url, params = %request.body, "sending POST update");
        let response = self
            .conn
            .client
            .post(&request.url)
            .header(ACCEPT, MIME_JSON)
            .header(CONTENT_TYPE, WWW_FORM)
            .header(CACHE_CONTROL, "no-cache")
            .body(request.body.clone())
            .send()?;
        HttpConnector::read_response(response)
    }
}
