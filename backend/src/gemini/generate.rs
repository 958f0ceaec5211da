use super::ModelName;
use crate::Result;
use crate::logging::*;
use nutriscan_common::analysis::{Image, ImageFormat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

// untaggedのデコードは宣言順に試されるため、順序を変えないこと
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl Response {
    /// 最初の候補のテキストパートを連結して返す。候補が無ければ空文字列。
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        Part::Text { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

pub async fn generate(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    model: ModelName,
    prompt: String,
    image: Image,
    format: ImageFormat,
) -> Result<Response> {
    let log = DEFAULT.new(o!("function" => "generate"));
    info!(log, "Generating");
    let request = Request {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::Text { text: prompt },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: format.mime_type().to_string(),
                        data: image.as_base64().to_string(),
                    },
                },
            ],
        }],
    };
    let url = format!("{}/models/{}:generateContent", base_url, model);
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;
    let response: Response = response.json().await?;
    Ok(response)
}
