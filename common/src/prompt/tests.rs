use super::*;
use crate::analysis::Context;

fn full_context() -> Context {
    Context {
        buttered: true,
        fried: true,
        restaurant: true,
        sweet_drink: true,
        goal: Some(Goal::LoseWeight),
        energy: Some(EnergyLevel::Low),
        note: "黄色いのはバターではなくチーズ".to_string(),
    }
}

#[test]
fn test_all_selected_inputs_appear_verbatim() {
    let prompt = build(&full_context());
    assert!(prompt.contains(BUTTERED_TAG));
    assert!(prompt.contains(FRIED_TAG));
    assert!(prompt.contains(RESTAURANT_TAG));
    assert!(prompt.contains(SWEET_DRINK_TAG));
    assert!(prompt.contains(goal_line(Goal::LoseWeight)));
    assert!(prompt.contains(energy_line(EnergyLevel::Low)));
    assert!(prompt.contains("黄色いのはバターではなくチーズ"));
}

#[test]
fn test_unselected_inputs_are_absent() {
    let prompt = build(&Context::default());
    assert!(!prompt.contains(BUTTERED_TAG));
    assert!(!prompt.contains(FRIED_TAG));
    assert!(!prompt.contains(RESTAURANT_TAG));
    assert!(!prompt.contains(SWEET_DRINK_TAG));
    assert!(!prompt.contains("ユーザーの目標"));
    assert!(!prompt.contains("今日の体感エネルギー"));
    assert!(!prompt.contains("ユーザーの補足"));
}

#[test]
fn test_single_flag_only_adds_its_own_tag() {
    let context = Context {
        buttered: true,
        ..Default::default()
    };
    let prompt = build(&context);
    assert!(prompt.contains(BUTTERED_TAG));
    assert!(!prompt.contains(FRIED_TAG));
    assert!(!prompt.contains(RESTAURANT_TAG));
    assert!(!prompt.contains(SWEET_DRINK_TAG));
}

#[test]
fn test_note_is_quoted_verbatim() {
    // 記号や空白を含むメモもそのまま残ること
    let note = "SÝR, ne máslo! (20% tuku) \\n改行なし";
    let context = Context {
        note: note.to_string(),
        ..Default::default()
    };
    let prompt = build(&context);
    assert!(prompt.contains(&format!("ユーザーの補足: \"{note}\"")));
}

#[test]
fn test_template_skeleton_is_present() {
    let prompt = build(&Context::default());
    assert!(prompt.contains("栄養専門家"));
    assert!(prompt.contains("量の校正"));
    assert!(prompt.contains("カロリー計算（A + B + C を合計する）"));
    assert!(prompt.contains("出力フォーマット（Markdown）"));
    assert!(prompt.contains("NOVA分類（1〜4）"));
}

#[test]
fn test_goal_and_energy_lines() {
    for (goal, expected) in [
        (Goal::LoseWeight, "減量"),
        (Goal::Maintain, "現状維持"),
        (Goal::BuildMuscle, "増量"),
    ] {
        let context = Context {
            goal: Some(goal),
            ..Default::default()
        };
        assert!(build(&context).contains(expected));
    }
    for (energy, expected) in [
        (EnergyLevel::Low, "低い"),
        (EnergyLevel::Normal, "普通"),
        (EnergyLevel::High, "高い"),
    ] {
        let context = Context {
            energy: Some(energy),
            ..Default::default()
        };
        assert!(build(&context).contains(expected));
    }
}

#[test]
fn test_build_is_deterministic() {
    let context = full_context();
    assert_eq!(build(&context), build(&context));
}
