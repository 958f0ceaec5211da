use crate::analysis::{Context, EnergyLevel, Goal};

// チェックボックスに対応する固定タグ。選択されたものだけをプロンプトに載せる。
const BUTTERED_TAG: &str = "パンにはバターが塗ってある（バター/脂質を加算すること）";
const FRIED_TAG: &str = "料理は油で揚げてある（吸収された油を加算すること）";
const RESTAURANT_TAG: &str = "外食の料理（カロリーに高めの係数を適用すること）";
const SWEET_DRINK_TAG: &str = "甘い飲み物を一緒に飲んだ（写真には写っていない。約150kcalを加算すること）";

fn goal_line(goal: Goal) -> &'static str {
    match goal {
        Goal::LoseWeight => "ユーザーの目標: 減量",
        Goal::Maintain => "ユーザーの目標: 現状維持",
        Goal::BuildMuscle => "ユーザーの目標: 増量（筋肉）",
    }
}

fn energy_line(energy: EnergyLevel) -> &'static str {
    match energy {
        EnergyLevel::Low => "今日の体感エネルギー: 低い",
        EnergyLevel::Normal => "今日の体感エネルギー: 普通",
        EnergyLevel::High => "今日の体感エネルギー: 高い",
    }
}

/// Contextからプロンプト全文を組み立てる純粋関数。
/// 入力されたメモと選択されたタグは一字も欠けずにそのまま埋め込む。
pub fn build(context: &Context) -> String {
    let mut tags = Vec::new();
    if context.buttered {
        tags.push(BUTTERED_TAG);
    }
    if context.fried {
        tags.push(FRIED_TAG);
    }
    if context.restaurant {
        tags.push(RESTAURANT_TAG);
    }
    if context.sweet_drink {
        tags.push(SWEET_DRINK_TAG);
    }

    let mut user_inputs = String::new();
    user_inputs.push_str(&format!("[{}]\n", tags.join("、")));
    if let Some(goal) = context.goal {
        user_inputs.push_str(goal_line(goal));
        user_inputs.push('\n');
    }
    if let Some(energy) = context.energy {
        user_inputs.push_str(energy_line(energy));
        user_inputs.push('\n');
    }
    if !context.note.is_empty() {
        user_inputs.push_str(&format!("ユーザーの補足: \"{}\"\n", context.note));
    }

    format!(
        r#"あなたは法医学レベルの栄養専門家です。食事の写真を最大限の精度で分析してください。

ユーザーからの重要な入力（これは事実です。否定しないこと）:
{user_inputs}
分析の手順（Step-by-Stepで考えること）:

1. 量の校正:
   - 写真の中のカトラリー、手、グラス、皿の標準サイズを手がかりにする。
   - 大きい皿に載っているなら、見た目より量は多い。

2. 食材の判別（チーズ / バター / 卵）:
   - ユーザーの指定がなければ視覚で判断する:
   - 大きい黄色のスライス = チーズ（ゴーダ等）。
   - 小さい角切り・削り = バター。
   - 白黄色で不定形 = スクランブルエッグ。

3. カロリー計算（A + B + C を合計する）:
   - A（可視）: 皿の上に見えるもの。
   - B（不可視）: 「パンにはバターが塗ってある」が指定されていれば、バター10〜15g（約100kcal）を自動で加算。
   - C（係数）: 外食なら結果を1.1倍する。

4. 出力:
   - 簡潔に。ただし数字は正確に。
   - マクロ（P/F/C）を記載する。
   - NOVA分類（1〜4）を推定する。

出力フォーマット（Markdown）:
## 🍽️ [料理名]

**内訳:**
* [項目1] (~[g]): [kcal]
* [項目2] (~[g]): [kcal]
* ...
* 🕵️ *隠れた脂質・塗り物:* [kcal]

**合計:** 🔥 **[合計] kcal** (P: [g] | F: [g] | C: [g])
**NOVA:** [1-4]

**ひとことアドバイス:** [一文]
"#
    )
}

#[cfg(test)]
#[path = "prompt/tests.rs"]
mod tests;
