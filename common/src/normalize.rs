//! フォーム状態の正規化（チップ操作）
//!
//! - [`toggle`]: カンマ区切りの複数値（色・生息地）への追加／削除
//! - [`toggle_exclusive`]: 単一値の選択／解除
//! - [`select_quick`]: クイック選択（全置換または全消去）
//!
//! いずれも指定項目以外には触れない。

use crate::filter::{FilterState, TextField};

/// 大文字小文字を無視した部分一致
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 複数値項目のトグル
///
/// 値が既に含まれていれば、その値を含むトークンをすべて取り除く。
/// 含まれていなければ `", "` 区切りで末尾に追加する。
pub fn toggle(state: &mut FilterState, field: TextField, value: &str) {
    let current = state.text_mut(field);

    if contains_ci(current, value) {
        let kept: Vec<&str> = current
            .split(',')
            .map(str::trim)
            .filter(|token| !contains_ci(token, value))
            .collect();
        let joined = kept.join(", ").trim().to_string();
        *current = joined;
    } else if current.is_empty() {
        *current = value.to_string();
    } else {
        current.push_str(", ");
        current.push_str(value);
    }
}

/// 単一値項目のトグル（同じ値なら解除）
pub fn toggle_exclusive(state: &mut FilterState, field: TextField, value: &str) {
    let current = state.text_mut(field);
    if current == value {
        current.clear();
    } else {
        *current = value.to_string();
    }
}

/// クイック選択
///
/// 値が含まれていれば他の値ごと消去し、含まれていなければ値だけに置き換える。
pub fn select_quick(state: &mut FilterState, field: TextField, value: &str) {
    let current = state.text_mut(field);
    if contains_ci(current, value) {
        current.clear();
    } else {
        *current = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_color(color: &str) -> FilterState {
        FilterState {
            color: color.to_string(),
            ..Default::default()
        }
    }

    // =============================================
    // toggle
    // =============================================

    #[test]
    fn test_toggle_add_then_remove() {
        let mut state = FilterState::default();
        toggle(&mut state, TextField::Color, "синий");
        assert_eq!(state.color, "синий");

        toggle(&mut state, TextField::Color, "синий");
        assert_eq!(state.color, "");
    }

    #[test]
    fn test_toggle_appends() {
        let mut state = with_color("синий");
        toggle(&mut state, TextField::Color, "красный");
        assert_eq!(state.color, "синий, красный");
    }

    #[test]
    fn test_toggle_removes_token() {
        let mut state = FilterState {
            habitat: "лес, поле".to_string(),
            ..Default::default()
        };
        toggle(&mut state, TextField::Habitat, "лес");
        assert_eq!(state.habitat, "поле");
    }

    #[test]
    fn test_toggle_case_insensitive() {
        let mut state = with_color("Синий,  Красный");
        toggle(&mut state, TextField::Color, "синий");
        assert_eq!(state.color, "Красный");
    }

    #[test]
    fn test_toggle_drops_every_containing_token() {
        // "синий" は "темно-синий" にも含まれる
        let mut state = with_color("темно-синий, красный, синий");
        toggle(&mut state, TextField::Color, "синий");
        assert_eq!(state.color, "красный");
    }

    #[test]
    fn test_toggle_leaves_other_fields() {
        let mut state = FilterState {
            habitat: "лес".to_string(),
            size_min: Some(3.0),
            ..Default::default()
        };
        toggle(&mut state, TextField::Color, "желтый");
        assert_eq!(state.habitat, "лес");
        assert_eq!(state.size_min, Some(3.0));
    }

    // =============================================
    // toggle_exclusive
    // =============================================

    #[test]
    fn test_toggle_exclusive() {
        let mut state = FilterState::default();
        toggle_exclusive(&mut state, TextField::Season, "лето");
        assert_eq!(state.season, "лето");

        toggle_exclusive(&mut state, TextField::Season, "осень");
        assert_eq!(state.season, "осень");

        toggle_exclusive(&mut state, TextField::Season, "осень");
        assert_eq!(state.season, "");
    }

    #[test]
    fn test_toggle_exclusive_is_exact_match() {
        let mut state = FilterState {
            habitat: "лес, поле".to_string(),
            ..Default::default()
        };
        toggle_exclusive(&mut state, TextField::Habitat, "лес");
        assert_eq!(state.habitat, "лес");
    }

    // =============================================
    // select_quick
    // =============================================

    #[test]
    fn test_select_quick_clears_when_contained() {
        let mut state = with_color("синий, красный");
        select_quick(&mut state, TextField::Color, "красный");
        assert_eq!(state.color, "");
    }

    #[test]
    fn test_select_quick_replaces() {
        let mut state = with_color("синий");
        select_quick(&mut state, TextField::Color, "красный");
        assert_eq!(state.color, "красный");
    }

    #[test]
    fn test_select_quick_eye_color() {
        let mut state = FilterState::default();
        select_quick(&mut state, TextField::EyeColor, "Зеленый");
        assert_eq!(state.eye_color, "Зеленый");
        select_quick(&mut state, TextField::EyeColor, "зеленый");
        assert_eq!(state.eye_color, "");
        assert_eq!(state.color, "");
    }
}
