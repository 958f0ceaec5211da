use crate::image_upload::ImageUpload;
use dioxus::prelude::*;
use dioxus_markdown::Markdown;
use nutriscan_common::ApiResponse;
use nutriscan_common::analysis::{AnalyzeRequest, Context, EnergyLevel, Goal, Image, ImageFormat};
use wasm_bindgen_futures::spawn_local;

fn parse_goal(value: &str) -> Option<Goal> {
    match value {
        "lose" => Some(Goal::LoseWeight),
        "maintain" => Some(Goal::Maintain),
        "build" => Some(Goal::BuildMuscle),
        _ => None,
    }
}

fn parse_energy(value: &str) -> Option<EnergyLevel> {
    match value {
        "low" => Some(EnergyLevel::Low),
        "normal" => Some(EnergyLevel::Normal),
        "high" => Some(EnergyLevel::High),
        _ => None,
    }
}


#[component]
pub fn view() -> Element {
    let client = use_signal(|| crate::server_api::get_client());

    let mut image_bytes = use_signal(|| None::<Vec<u8>>);
    let mut image_format = use_signal(|| None::<ImageFormat>);
    let mut preview_src = use_signal(|| None::<String>);

    let mut buttered = use_signal(|| true);
    let mut fried = use_signal(|| false);
    let mut restaurant = use_signal(|| false);
    let mut sweet_drink = use_signal(|| false);
    let mut goal = use_signal(|| "".to_string());
    let mut energy = use_signal(|| "".to_string());
    let mut note = use_signal(|| "".to_string());

    let mut loading = use_signal(|| false);
    let mut report_text = use_signal(String::new);
    let mut warning_message = use_signal(|| None::<String>);
    let mut error_message = use_signal(|| None::<String>);
    let mut backend_unreachable = use_signal(|| false);

    // 起動時にバックエンドの生存確認だけ行う
    use_future(move || async move {
        let health = client().basic.healthcheck().await;
        backend_unreachable.set(health != "OK");
    });

    let on_file_selected = move |(bytes, mime): (Vec<u8>, String)| match ImageFormat::from_mime(
        &mime,
    ) {
        Ok(format) => {
            let encoded = Image::from_bytes(&bytes);
            preview_src.set(Some(format!(
                "data:{};base64,{}",
                format.mime_type(),
                encoded.as_base64()
            )));
            image_bytes.set(Some(bytes));
            image_format.set(Some(format));
            error_message.set(None);
        }
        Err(_) => {
            image_bytes.set(None);
            image_format.set(None);
            preview_src.set(None);
            error_message.set(Some(format!("対応していない画像形式です: {}", mime)));
        }
    };

    let analyze_disabled = loading() || image_bytes().is_none();

    rsx! {
        div { class: "scanner-view",
            if backend_unreachable() {
                div { class: "alert alert-danger", "バックエンドに接続できません" }
            }

            ImageUpload { on_file_selected: on_file_selected }

            if let Some(src) = preview_src() {
                div { class: "preview-container",
                    style: "margin: 10px 0; max-width: 100%;",
                    img { src: "{src}", style: "max-width: 100%; border-radius: 12px;" }
                }
            }

            h4 { "🕵️ AIへの補足（任意）" }
            div { class: "flags-container",
                style: "display: flex; gap: 20px;",
                div { class: "flags-column",
                    label { class: "form-check",
                        input {
                            type: "checkbox",
                            checked: "{buttered}",
                            oninput: move |e| buttered.set(e.value() == "true"),
                        }
                        "🍞 パンにはバターが塗ってある"
                    }
                    label { class: "form-check",
                        input {
                            type: "checkbox",
                            checked: "{fried}",
                            oninput: move |e| fried.set(e.value() == "true"),
                        }
                        "🍟 油で揚げてある"
                    }
                }
                div { class: "flags-column",
                    label { class: "form-check",
                        input {
                            type: "checkbox",
                            checked: "{restaurant}",
                            oninput: move |e| restaurant.set(e.value() == "true"),
                        }
                        "🏠 外食"
                    }
                    label { class: "form-check",
                        input {
                            type: "checkbox",
                            checked: "{sweet_drink}",
                            oninput: move |e| sweet_drink.set(e.value() == "true"),
                        }
                        "🥤 甘い飲み物も一緒に"
                    }
                }
            }

            div { class: "input-group",
                style: "display: flex; align-items: center; margin-bottom: 10px;",
                label { class: "form-label", "目標:" }
                select {
                    class: "form-control",
                    value: "{goal}",
                    oninput: move |e| goal.set(e.value()),
                    option { value: "", "選択しない" }
                    option { value: "lose", "減量" }
                    option { value: "maintain", "現状維持" }
                    option { value: "build", "増量（筋肉）" }
                }
            }
            div { class: "input-group",
                style: "display: flex; align-items: center; margin-bottom: 10px;",
                label { class: "form-label", "今日のエネルギー:" }
                select {
                    class: "form-control",
                    value: "{energy}",
                    oninput: move |e| energy.set(e.value()),
                    option { value: "", "選択しない" }
                    option { value: "low", "低い" }
                    option { value: "normal", "普通" }
                    option { value: "high", "高い" }
                }
            }
            div { class: "input-group",
                style: "display: flex; align-items: center; margin-bottom: 10px;",
                label { class: "form-label", "補足メモ:" }
                input {
                    class: "form-control",
                    placeholder: "例: 黄色いのはバターではなくチーズ",
                    value: "{note}",
                    oninput: move |e| note.set(e.value()),
                }
            }

            button {
                class: "btn btn-primary",
                disabled: analyze_disabled,
                onclick: move |_| {
                    loading.set(true);
                    error_message.set(None);
                    warning_message.set(None);
                    report_text.set(String::new());

                    spawn_local(async move {
                        let (Some(bytes), Some(format)) = (image_bytes(), image_format()) else {
                            error_message.set(Some("画像を選択してください".to_string()));
                            loading.set(false);
                            return;
                        };

                        let request = AnalyzeRequest {
                            context: Context {
                                buttered: buttered(),
                                fried: fried(),
                                restaurant: restaurant(),
                                sweet_drink: sweet_drink(),
                                goal: parse_goal(&goal()),
                                energy: parse_energy(&energy()),
                                note: note(),
                            },
                            image: Image::from_bytes(&bytes),
                            format,
                        };

                        match client().analyze.analyze(&request).await {
                            ApiResponse::Success(report) => {
                                if report.text.trim().is_empty() {
                                    warning_message
                                        .set(Some("モデルから空の応答が返されました".to_string()));
                                } else {
                                    report_text.set(report.text);
                                }
                            }
                            ApiResponse::Error(err) => {
                                error_message.set(Some(format!("解析エラー: {}", err)));
                            }
                        }
                        loading.set(false);
                    });
                },
                if loading() { "ボリューム解析中..." } else { "🔍 詳細に分析" }
            }

            if let Some(error) = error_message() {
                div { class: "alert alert-danger", "{error}" }
            }

            if let Some(warning) = warning_message() {
                div { class: "alert alert-warning", "{warning}" }
            }

            if !report_text().is_empty() {
                div { class: "response-container",
                    style: "margin-top: 20px;",
                    Markdown { src: report_text }
                }
            }
        }
    }
}
