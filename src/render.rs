//! 結果のテキスト表示

use insect_search_common::category::{FALLBACK_ICON, FALLBACK_LABEL};
use insect_search_common::{AppState, Category, FilterOptionSet, InsectRecord, OptionAttr, ResultView};
use regex::Regex;
use std::fmt::Write;

/// カテゴリ表示名（不明なら「Насекомое」）
pub fn type_label(category: Option<Category>) -> &'static str {
    category.map(|c| c.label()).unwrap_or(FALLBACK_LABEL)
}

/// カテゴリアイコン（画像があれば画像パス）
pub fn type_icon(category: Option<Category>) -> &'static str {
    match category {
        Some(c) => c.schema().image.unwrap_or(c.icon()),
        None => FALLBACK_ICON,
    }
}

/// 画像パスのアイコンか
pub fn is_image_icon(icon: &str) -> bool {
    icon.starts_with("/static/")
}

/// 端末表示用アイコン（画像は絵文字で代用）
fn terminal_icon(category: Option<Category>) -> &'static str {
    let icon = type_icon(category);
    if is_image_icon(icon) {
        category.map(|c| c.icon()).unwrap_or(FALLBACK_ICON)
    } else {
        icon
    }
}

/// サイズ表示（"12 мм - 18 мм"）
pub fn format_size(size_min: Option<f64>, size_max: Option<f64>) -> String {
    [size_min, size_max]
        .iter()
        .flatten()
        .filter(|v| **v != 0.0)
        .map(|v| format!("{} мм", v))
        .collect::<Vec<_>>()
        .join(" - ")
}

/// 説明文から性別を取り出す
pub fn extract_gender(description: Option<&str>) -> Option<&'static str> {
    let desc = description.filter(|d| !d.is_empty())?.to_lowercase();

    if desc.contains("пол: самец") || desc.contains("пол:самец") {
        return Some("самец");
    }
    if desc.contains("пол: самка") || desc.contains("пол:самка") {
        return Some("самка");
    }
    if desc.contains("самец/самка") {
        return Some("самец/самка");
    }
    None
}

/// 性別アイコン
pub fn gender_icon(gender: Option<&str>) -> &'static str {
    let Some(gender) = gender.filter(|g| !g.is_empty()) else {
        return "";
    };
    let male = gender.contains("самец");
    let female = gender.contains("самка");
    match (male, female) {
        (true, false) => "♂️",
        (false, true) => "♀️",
        _ => "⚥",
    }
}

/// 説明文から性別表記を除く（性別は別に表示するため）
pub fn clean_description(description: Option<&str>) -> Option<String> {
    let description = description.filter(|d| !d.is_empty())?;

    lazy_static::lazy_static! {
        static ref GENDER_RE: Regex = Regex::new(r"(?i)Пол:\s*(самец|самка|самец/самка)[;,]?\s*").unwrap();
        static ref DOUBLE_SEMI_RE: Regex = Regex::new(r";\s*;").unwrap();
        static ref LEADING_RE: Regex = Regex::new(r"^;\s*").unwrap();
        static ref TRAILING_RE: Regex = Regex::new(r"\s*;\s*$").unwrap();
    }

    let text = GENDER_RE.replace_all(description, "");
    let text = DOUBLE_SEMI_RE.replace_all(&text, ";");
    let text = text.trim();
    let text = LEADING_RE.replace(text, "");
    let text = TRAILING_RE.replace(&text, "");
    Some(text.into_owned())
}

/// 1件分の表示
///
/// `category` はカテゴリ付与の無いレコード（カテゴリ検索の結果）に使う。
pub fn render_record(record: &InsectRecord, category: Option<Category>, show_type: bool) -> String {
    let mut out = String::new();
    let category = record.insect_type.or(category);

    let name = record.name_ru.as_deref().unwrap_or("Без названия");
    let _ = write!(out, "{} {}", terminal_icon(category), name);
    if let Some(lat) = record.name_lat.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, " ({})", lat);
    }
    out.push('\n');

    if show_type {
        let _ = writeln!(out, "   Тип: {}", type_label(category));
    }

    let size = format_size(record.size_min, record.size_max);
    if !size.is_empty() {
        let _ = writeln!(out, "   Размер: {}", size);
    }
    if let Some(color) = record.color.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "   Цвет: {}", color);
    }
    if let Some(habitat) = record.habitat.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "   Место обитания: {}", habitat);
    }

    let gender = extract_gender(record.description.as_deref());
    if let Some(gender) = gender {
        let _ = writeln!(out, "   Пол: {} {}", gender_icon(Some(gender)), gender);
    }
    if let Some(desc) = clean_description(record.description.as_deref()).filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "   Описание: {}", desc);
    }

    out
}

/// 結果の見出し
pub fn results_header(state: &AppState) -> String {
    match state.view() {
        ResultView::Idle => String::new(),
        ResultView::Searching | ResultView::LoadingAll => "Загрузка...".to_string(),
        ResultView::Searched { results } => {
            format!("Найдено: {} {}", results.len(), state.type_name(results.len()))
        }
        ResultView::BrowsingAll(browse) => format!(
            "Всего: {} {}, показано: {}",
            browse.total_count(),
            state.type_name(browse.total_count()),
            browse.filtered().len()
        ),
    }
}

/// 見出しと結果一覧
pub fn render_results(state: &AppState) -> String {
    let mut out = results_header(state);
    if out.is_empty() {
        return out;
    }
    out.push('\n');

    let show_type = state.view().browse().is_some();
    let results = state.view().visible_results();
    if results.is_empty() && !state.is_loading() {
        out.push_str("Ничего не найдено\n");
    }
    for record in results {
        out.push('\n');
        out.push_str(&render_record(record, state.category(), show_type));
    }
    out
}

/// 選択肢の表示名
pub fn option_label(attr: OptionAttr) -> &'static str {
    match attr {
        OptionAttr::Color => "Цвет",
        OptionAttr::EyeColor => "Цвет глаз",
        OptionAttr::Habitat => "Место обитания",
        OptionAttr::Environment => "Среда",
        OptionAttr::SurfaceType => "Тип поверхности",
        OptionAttr::Elytra => "Надкрылья",
        OptionAttr::WingPattern => "Рисунок крыльев",
        OptionAttr::Season => "Сезон",
    }
}

/// カテゴリの選択肢一覧
pub fn render_options(category: Category, options: &FilterOptionSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", terminal_icon(Some(category)), category.label());

    for attr in category.schema().option_attrs {
        let list = options.get(category, *attr);
        let _ = writeln!(out, "{}:", option_label(*attr));
        if list.is_empty() {
            out.push_str("  (нет данных)\n");
            continue;
        }
        if !list.basic.is_empty() {
            let _ = writeln!(out, "  основные: {}", list.basic.join(", "));
        }
        if !list.all.is_empty() {
            let _ = writeln!(out, "  все: {}", list.all.join(", "));
        }
    }
    out
}
