mod generate;
mod retry;

pub use retry::with_retry;

use crate::Result;
use crate::logging::*;
use nutriscan_common::analysis::{Image, ImageFormat};
use nutriscan_common::config;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,
    #[error("No image to analyze")]
    MissingImage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelName(String);

impl Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn get_base_url() -> String {
    config::get("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string())
}

pub fn get_model() -> ModelName {
    ModelName(config::get("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash-lite".to_string()))
}

/// 資格情報の事前確認。未設定ならネットワーク呼び出しを一切行わずに失敗する。
pub fn api_key() -> Result<String> {
    config::get("GEMINI_API_KEY").map_err(|_| Error::MissingApiKey.into())
}

pub struct Client {
    model: ModelName,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl Client {
    pub(crate) fn new(model: ModelName, base_url: String, api_key: String) -> Self {
        let client = reqwest::Client::new();
        Self {
            model,
            base_url,
            api_key,
            client,
        }
    }

    pub fn new_default() -> Result<Self> {
        Ok(Self::new(get_model(), get_base_url(), api_key()?))
    }

    pub fn model_name(&self) -> String {
        self.model.to_string()
    }

    /// プロンプトと画像1枚を送り、モデルの応答テキストを返す。
    /// 候補が空のときは空文字列になる（エラーではなく表示側が警告を出す）。
    pub async fn generate(&self, prompt: String, image: Image, format: ImageFormat) -> Result<String> {
        let log = DEFAULT.new(o!(
            "function" => "generate",
            "model" => self.model.to_string(),
        ));
        info!(log, "Generating");
        let response = generate::generate(
            &self.client,
            &self.base_url,
            &self.api_key,
            self.model.clone(),
            prompt,
            image,
            format,
        )
        .await?;
        Ok(response.text())
    }
}
