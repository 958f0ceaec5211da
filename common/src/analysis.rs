use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 1回の解析リクエストに添えるユーザー入力。リクエスト完了後に破棄される。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    pub buttered: bool,
    pub fried: bool,
    pub restaurant: bool,
    pub sweet_drink: bool,
    pub goal: Option<Goal>,
    pub energy: Option<EnergyLevel>,
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    LoseWeight,
    Maintain,
    BuildMuscle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyLevel {
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image(String);

impl Image {
    pub fn from_bytes(bytes: &[u8]) -> Image {
        Image(STANDARD.encode(bytes))
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

#[derive(Debug, Error)]
#[error("Unsupported image type: {0}")]
pub struct UnsupportedImageType(pub String);

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// ブラウザが報告するMIMEタイプからの変換。JPEG/PNG以外は受け付けない。
    pub fn from_mime(mime: &str) -> Result<ImageFormat, UnsupportedImageType> {
        match mime {
            "image/jpeg" | "image/jpg" => Ok(ImageFormat::Jpeg),
            "image/png" => Ok(ImageFormat::Png),
            other => Err(UnsupportedImageType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub context: Context,
    pub image: Image,
    pub format: ImageFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeReport {
    pub model: String,
    pub text: String,
}
