//! フィルタ選択肢キャッシュ
//!
//! `GET /api/filter-options/{category}` の結果をカテゴリ単位で保持する。
//! 読み込みに成功するたびに丸ごと置き換え、カテゴリをまたいで混ぜない。

use crate::category::Category;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 選択肢を持つ属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionAttr {
    Color,
    EyeColor,
    Habitat,
    Environment,
    SurfaceType,
    Elytra,
    WingPattern,
    Season,
}

impl OptionAttr {
    pub const ALL: [OptionAttr; 8] = [
        OptionAttr::Color,
        OptionAttr::EyeColor,
        OptionAttr::Habitat,
        OptionAttr::Environment,
        OptionAttr::SurfaceType,
        OptionAttr::Elytra,
        OptionAttr::WingPattern,
        OptionAttr::Season,
    ];

    /// 基本（クイック選択）リストのキー
    fn basic_key(&self) -> Option<&'static str> {
        match self {
            OptionAttr::Color => Some("basic_colors"),
            OptionAttr::EyeColor => Some("basic_eye_colors"),
            OptionAttr::Habitat => Some("basic_habitats"),
            OptionAttr::Environment => None,
            OptionAttr::SurfaceType => Some("basic_surface_types"),
            OptionAttr::Elytra => Some("basic_elytra"),
            OptionAttr::WingPattern => Some("basic_wing_patterns"),
            OptionAttr::Season => Some("basic_seasons"),
        }
    }

    /// 全件リストのキー（先に存在したものを採用）
    fn all_keys(&self) -> &'static [&'static str] {
        match self {
            OptionAttr::Color => &["colors"],
            OptionAttr::EyeColor => &["eye_colors"],
            OptionAttr::Habitat => &["all_habitats", "habitats"],
            OptionAttr::Environment => &["environments"],
            OptionAttr::SurfaceType => &["all_surface_types"],
            OptionAttr::Elytra => &["all_elytra"],
            OptionAttr::WingPattern => &["all_wing_patterns"],
            OptionAttr::Season => &["all_seasons", "seasons"],
        }
    }
}

/// 基本リストと全件リストの組
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionList {
    pub basic: Vec<String>,
    pub all: Vec<String>,
}

impl OptionList {
    pub fn is_empty(&self) -> bool {
        self.basic.is_empty() && self.all.is_empty()
    }
}

/// サーバーから受け取った選択肢（キーはそのまま）
pub type OptionsPayload = Map<String, Value>;

/// キャッシュ済みの選択肢
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptionSet {
    category: Option<Category>,
    color: OptionList,
    eye_color: OptionList,
    habitat: OptionList,
    environment: OptionList,
    surface_type: OptionList,
    elytra: OptionList,
    wing_pattern: OptionList,
    season: OptionList,
}

static EMPTY: OptionList = OptionList { basic: Vec::new(), all: Vec::new() };

impl FilterOptionSet {
    /// ペイロードからカテゴリに関係する属性だけを取り込む
    pub fn from_payload(category: Category, payload: &OptionsPayload) -> Self {
        let mut set = Self {
            category: Some(category),
            ..Default::default()
        };

        for attr in category.schema().option_attrs {
            let list = set.slot_mut(*attr);
            if let Some(key) = attr.basic_key() {
                list.basic = string_array(payload.get(key));
            }
            list.all = attr
                .all_keys()
                .iter()
                .find_map(|key| payload.get(*key).filter(|v| !v.is_null()))
                .map(|v| string_array(Some(v)))
                .unwrap_or_default();
        }

        set
    }

    /// どのカテゴリの選択肢か
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// 指定カテゴリの選択肢
    ///
    /// キャッシュが別カテゴリのもの、または属性がカテゴリ対象外なら空。
    pub fn get(&self, category: Category, attr: OptionAttr) -> &OptionList {
        if self.category != Some(category) || !category.schema().has_option(attr) {
            return &EMPTY;
        }
        self.slot(attr)
    }

    fn slot(&self, attr: OptionAttr) -> &OptionList {
        match attr {
            OptionAttr::Color => &self.color,
            OptionAttr::EyeColor => &self.eye_color,
            OptionAttr::Habitat => &self.habitat,
            OptionAttr::Environment => &self.environment,
            OptionAttr::SurfaceType => &self.surface_type,
            OptionAttr::Elytra => &self.elytra,
            OptionAttr::WingPattern => &self.wing_pattern,
            OptionAttr::Season => &self.season,
        }
    }

    fn slot_mut(&mut self, attr: OptionAttr) -> &mut OptionList {
        match attr {
            OptionAttr::Color => &mut self.color,
            OptionAttr::EyeColor => &mut self.eye_color,
            OptionAttr::Habitat => &mut self.habitat,
            OptionAttr::Environment => &mut self.environment,
            OptionAttr::SurfaceType => &mut self.surface_type,
            OptionAttr::Elytra => &mut self.elytra,
            OptionAttr::WingPattern => &mut self.wing_pattern,
            OptionAttr::Season => &mut self.season,
        }
    }
}

/// 文字列配列を取り出す（文字列以外の要素は捨てる）
fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
