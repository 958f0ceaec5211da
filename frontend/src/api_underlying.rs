use anyhow::Result;
use reqwest;
use std::sync::Arc;

/// バックエンドへのHTTPリクエストの共通基盤
pub struct Underlying {
    base_url: String,
    client: reqwest::Client,
}

impl Underlying {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// 新しいUnderlying共有インスタンスを作成
    pub fn new_shared(base_url: String) -> Arc<Self> {
        Arc::new(Self::new(base_url))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// プレーンテキストを取得するGETリクエスト。
    /// 失敗はエラーメッセージ文字列として返す（表示用）。
    pub async fn get_text(&self, path: &str) -> String {
        match self.client.get(self.url(path)).send().await {
            Ok(res) => res.text().await.unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e),
        }
    }

    /// JSONボディをPOSTしてJSONレスポンスをデシリアライズ
    pub async fn post<A, B>(&self, path: &str, body: &A) -> Result<B>
    where
        A: serde::Serialize,
        B: serde::de::DeserializeOwned,
    {
        Ok(self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .json()
            .await?)
    }
}
