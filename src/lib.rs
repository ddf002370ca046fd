//! # ACME DNS-01 動態 DNS 傳播庫
//!
//! 本庫將預先計算好的 ACME DNS-01 挑戰摘要傳播至外部動態 DNS 服務，
//! 使證書頒發機構得以在簽發證書前驗證域名所有權。涵蓋的核心為
//! **挑戰傳播引擎**：給定證書請求的域名集合與逐域名的挑戰摘要，
//! 將每個域名解析為 DNS 記錄名稱，向可配置的 HTTP 端點提交更新請求，
//! 並把逐域名的成功與失敗彙總為單一結構化報告。
//!
//! ## 模組
//!
//! - **domain**: 域名類型與萬用字元歸一化
//! - **digest**: 檔案後端的挑戰摘要讀取
//! - **config**: 外部提供的配置面與用戶端簽名
//! - **resolver**: FQDN 導出、別名與金鑰解析
//! - **request**: 更新請求的純組裝
//! - **transport**: GET/POST 傳輸與回應解析
//! - **pace**: 逐域名之間的可中斷暫停
//! - **propagation**: 傳播協調器與彙總報告
//!
//! ## 特性
//!
//! - 萬用字元域名與一般域名的摘要彼此區分、FQDN 共享
//! - 別名映射讓多個邏輯主體名稱共用同一筆實體 DNS 記錄
//! - 單一域名失敗只記入失敗清單，永不中止整次傳播
//! - 循序處理加可中斷暫停，配合服務商的更新限速
//!
//! ## 示例
//!
//! ```no_run
//! use std::collections::BTreeSet;
//!
//! use rdyndns::{
//!     config::{ClientSignature, DynDnsConfig},
//!     digest::DigestStore,
//!     domain::DomainName,
//!     propagation::Propagator,
//!     transport::GetTransport,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. 載入外部提供的配置
//!     let config = DynDnsConfig::from_json(
//!         r#"{
//!             "url": "https://dyn.example.net/update",
//!             "host_key": "hostname",
//!             "token_key": "token",
//!             "record_key": "txt",
//!             "tokens": {"_acme-challenge.example.com": "secret"}
//!         }"#,
//!     )?;
//!
//!     // 2. 指向先前寫入的摘要目錄，並選擇 GET 或 POST 傳輸
//!     let store = DigestStore::new("/var/lib/acme/digests");
//!     let transport = GetTransport::new(&config, &ClientSignature::default())?;
//!
//!     // 3. 對證書請求中的域名執行傳播
//!     let mut domains = BTreeSet::new();
//!     domains.insert("example.com".parse::<DomainName>()?);
//!     domains.insert("*.example.com".parse::<DomainName>()?);
//!
//!     let report = Propagator::new(&store, &config, &transport).propagate(&domains);
//!     if report.has_error {
//!         eprintln!("failed domains: {:?}", report.failed_domains);
//!     }
//!     println!("{}", report.to_json());
//!     Ok(())
//! }
//! ```
//!
//! ACME 協議協商、CSR 解析、命令列處理與摘要檔案的寫入
//! 皆為外部協作者的職責，不在本庫範圍內。

pub mod config;
pub mod digest;
pub mod domain;
pub mod pace;
pub mod propagation;
pub mod request;
pub mod resolver;
pub mod transport;
