//! 昆虫カテゴリ定義
//!
//! カテゴリごとの差異（対象フィルタ項目、表示名、名詞の活用形、
//! キャッシュ対象の選択肢）はすべて [`CategorySchema`] の表に集約し、
//! 処理側はこの表を参照するだけにする。

use crate::error::{Error, Result};
use crate::filter::{FilterField, NumericField, TextField};
use crate::options::OptionAttr;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 昆虫カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dragonfly,
    Beetle,
    Butterfly,
}

/// カテゴリ未選択時の件数ラベル
pub const FALLBACK_TYPE_NAME: &str = "насекомых";
/// カテゴリ不明時の表示名
pub const FALLBACK_LABEL: &str = "Насекомое";
/// カテゴリ不明時のアイコン
pub const FALLBACK_ICON: &str = "🐛";

impl Category {
    pub const ALL: [Category; 3] = [Category::Dragonfly, Category::Beetle, Category::Butterfly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dragonfly => "dragonfly",
            Category::Beetle => "beetle",
            Category::Butterfly => "butterfly",
        }
    }

    pub fn schema(&self) -> &'static CategorySchema {
        match self {
            Category::Dragonfly => &DRAGONFLY,
            Category::Beetle => &BEETLE,
            Category::Butterfly => &BUTTERFLY,
        }
    }

    pub fn label(&self) -> &'static str {
        self.schema().label
    }

    pub fn icon(&self) -> &'static str {
        self.schema().icon
    }

    /// 件数に応じた名詞形
    pub fn type_name(&self, count: usize) -> &'static str {
        self.schema().nouns.for_count(count)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dragonfly" => Ok(Category::Dragonfly),
            "beetle" => Ok(Category::Beetle),
            "butterfly" => Ok(Category::Butterfly),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// 名詞の活用形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralForm {
    One,
    Few,
    Many,
}

impl PluralForm {
    /// 0 と 5 以上は many、1 は one、2〜4 は few
    pub fn for_count(count: usize) -> Self {
        match count {
            1 => PluralForm::One,
            2..=4 => PluralForm::Few,
            _ => PluralForm::Many,
        }
    }
}

/// 3形の名詞表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounForms {
    pub one: &'static str,
    pub few: &'static str,
    pub many: &'static str,
}

impl NounForms {
    pub fn get(&self, form: PluralForm) -> &'static str {
        match form {
            PluralForm::One => self.one,
            PluralForm::Few => self.few,
            PluralForm::Many => self.many,
        }
    }

    pub fn for_count(&self, count: usize) -> &'static str {
        self.get(PluralForm::for_count(count))
    }
}

/// カテゴリ設定表
#[derive(Debug)]
pub struct CategorySchema {
    pub category: Category,
    pub label: &'static str,
    pub icon: &'static str,
    /// アイコン画像（ある場合は絵文字より優先）
    pub image: Option<&'static str>,
    pub nouns: NounForms,
    /// 検索に使う項目（送信順）
    pub fields: &'static [FilterField],
    /// カテゴリ選択時にキャッシュする選択肢
    pub option_attrs: &'static [OptionAttr],
}

impl CategorySchema {
    pub fn has_field(&self, field: FilterField) -> bool {
        self.fields.contains(&field)
    }

    pub fn has_text_field(&self, field: TextField) -> bool {
        self.has_field(FilterField::Text(field))
    }

    pub fn has_option(&self, attr: OptionAttr) -> bool {
        self.option_attrs.contains(&attr)
    }
}

static DRAGONFLY: CategorySchema = CategorySchema {
    category: Category::Dragonfly,
    label: "Стрекоза",
    icon: "🪰",
    image: Some("/static/images/dragon.png"),
    nouns: NounForms { one: "стрекоза", few: "стрекозы", many: "стрекоз" },
    fields: &[
        FilterField::Numeric(NumericField::BodyLengthMin),
        FilterField::Numeric(NumericField::BodyLengthMax),
        FilterField::Numeric(NumericField::WingspanMin),
        FilterField::Numeric(NumericField::WingspanMax),
        FilterField::Text(TextField::Color),
        FilterField::Text(TextField::Habitat),
        FilterField::Text(TextField::EyeColor),
        FilterField::Text(TextField::Environment),
        FilterField::Text(TextField::Gender),
        FilterField::Text(TextField::Season),
    ],
    option_attrs: &[
        OptionAttr::Color,
        OptionAttr::EyeColor,
        OptionAttr::Habitat,
        OptionAttr::Environment,
        OptionAttr::Season,
    ],
};

static BEETLE: CategorySchema = CategorySchema {
    category: Category::Beetle,
    label: "Жук",
    icon: "🪲",
    image: None,
    nouns: NounForms { one: "жук", few: "жука", many: "жуков" },
    fields: &[
        FilterField::Numeric(NumericField::SizeMin),
        FilterField::Numeric(NumericField::SizeMax),
        FilterField::Text(TextField::Color),
        FilterField::Text(TextField::Habitat),
        FilterField::Text(TextField::SurfaceType),
        FilterField::Text(TextField::Elytra),
        FilterField::Text(TextField::Season),
    ],
    option_attrs: &[
        OptionAttr::Color,
        OptionAttr::SurfaceType,
        OptionAttr::Elytra,
        OptionAttr::Habitat,
        OptionAttr::Season,
    ],
};

static BUTTERFLY: CategorySchema = CategorySchema {
    category: Category::Butterfly,
    label: "Бабочка",
    icon: "🦋",
    image: None,
    nouns: NounForms { one: "бабочка", few: "бабочки", many: "бабочек" },
    fields: &[
        FilterField::Numeric(NumericField::SizeMin),
        FilterField::Numeric(NumericField::SizeMax),
        FilterField::Text(TextField::Color),
        FilterField::Text(TextField::WingPattern),
        FilterField::Text(TextField::Habitat),
        FilterField::Text(TextField::TimeOfDay),
        FilterField::Text(TextField::Season),
    ],
    option_attrs: &[
        OptionAttr::Color,
        OptionAttr::WingPattern,
        OptionAttr::Habitat,
        OptionAttr::Season,
    ],
};

/// カテゴリ未選択でも使える件数ラベル
pub fn type_name(category: Option<Category>, count: usize) -> &'static str {
    category
        .map(|c| c.type_name(count))
        .unwrap_or(FALLBACK_TYPE_NAME)
}

/// クイック選択用の値と表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// よく使う色
pub const COMMON_COLORS: [&str; 10] = [
    "синий", "красный", "зеленый", "желтый", "черный",
    "коричневый", "оранжевый", "белый", "фиолетовый", "розовый",
];

/// よく使う生息地
pub const COMMON_HABITATS: [Preset; 6] = [
    Preset { value: "лес", label: "Лес", icon: "🌲" },
    Preset { value: "луг", label: "Луг", icon: "🌾" },
    Preset { value: "водоем", label: "Водоем", icon: "💧" },
    Preset { value: "сад", label: "Сад", icon: "🌷" },
    Preset { value: "поле", label: "Поле", icon: "🌾" },
    Preset { value: "болото", label: "Болото", icon: "🪷" },
];

/// 季節
pub const SEASONS: [Preset; 4] = [
    Preset { value: "весна", label: "Весна", icon: "🌸" },
    Preset { value: "лето", label: "Лето", icon: "☀️" },
    Preset { value: "осень", label: "Осень", icon: "🍂" },
    Preset { value: "зима", label: "Зима", icon: "❄️" },
];
