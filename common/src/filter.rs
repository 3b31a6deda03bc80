//! 検索フォームの状態
//!
//! 全カテゴリのフィルタ項目を1つのレコードで保持する。
//! 未入力は数値なら `None`、文字列なら空文字で表す。

use serde::{Deserialize, Serialize};

/// 数値フィルタ項目（範囲指定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    SizeMin,
    SizeMax,
    BodyLengthMin,
    BodyLengthMax,
    WingspanMin,
    WingspanMax,
}

impl NumericField {
    pub const ALL: [NumericField; 6] = [
        NumericField::SizeMin,
        NumericField::SizeMax,
        NumericField::BodyLengthMin,
        NumericField::BodyLengthMax,
        NumericField::WingspanMin,
        NumericField::WingspanMax,
    ];

    /// リクエストパラメータ名
    pub fn param_name(&self) -> &'static str {
        match self {
            NumericField::SizeMin => "size_min",
            NumericField::SizeMax => "size_max",
            NumericField::BodyLengthMin => "body_length_min",
            NumericField::BodyLengthMax => "body_length_max",
            NumericField::WingspanMin => "wingspan_min",
            NumericField::WingspanMax => "wingspan_max",
        }
    }

    /// 表示名
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::SizeMin => "Размер от (мм)",
            NumericField::SizeMax => "Размер до (мм)",
            NumericField::BodyLengthMin => "Длина тела от (мм)",
            NumericField::BodyLengthMax => "Длина тела до (мм)",
            NumericField::WingspanMin => "Размах крыльев от (мм)",
            NumericField::WingspanMax => "Размах крыльев до (мм)",
        }
    }
}

/// 文字列フィルタ項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Color,
    Habitat,
    EyeColor,
    Environment,
    SurfaceType,
    Elytra,
    WingPattern,
    Gender,
    Season,
    TimeOfDay,
}

impl TextField {
    pub const ALL: [TextField; 10] = [
        TextField::Color,
        TextField::Habitat,
        TextField::EyeColor,
        TextField::Environment,
        TextField::SurfaceType,
        TextField::Elytra,
        TextField::WingPattern,
        TextField::Gender,
        TextField::Season,
        TextField::TimeOfDay,
    ];

    /// リクエストパラメータ名
    pub fn param_name(&self) -> &'static str {
        match self {
            TextField::Color => "color",
            TextField::Habitat => "habitat",
            TextField::EyeColor => "eye_color",
            TextField::Environment => "environment",
            TextField::SurfaceType => "surface_type",
            TextField::Elytra => "elytra",
            TextField::WingPattern => "wing_pattern",
            TextField::Gender => "gender",
            TextField::Season => "season",
            TextField::TimeOfDay => "time_of_day",
        }
    }

    /// 選択式（ドロップダウン）項目か
    pub fn is_select(&self) -> bool {
        matches!(self, TextField::Gender | TextField::Season | TextField::TimeOfDay)
    }

    /// 表示名
    pub fn label(&self) -> &'static str {
        match self {
            TextField::Color => "Цвет",
            TextField::Habitat => "Место обитания",
            TextField::EyeColor => "Цвет глаз",
            TextField::Environment => "Среда",
            TextField::SurfaceType => "Тип поверхности",
            TextField::Elytra => "Надкрылья",
            TextField::WingPattern => "Рисунок крыльев",
            TextField::Gender => "Пол",
            TextField::Season => "Сезон",
            TextField::TimeOfDay => "Время суток",
        }
    }
}

/// フィルタ項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Numeric(NumericField),
    Text(TextField),
}

impl FilterField {
    pub fn param_name(&self) -> &'static str {
        match self {
            FilterField::Numeric(f) => f.param_name(),
            FilterField::Text(f) => f.param_name(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Numeric(f) => f.label(),
            FilterField::Text(f) => f.label(),
        }
    }
}

/// 検索フォームの状態
///
/// カテゴリに関係しない項目も保持し続け、[`FilterState::clear`] まで消さない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub size_min: Option<f64>,
    pub size_max: Option<f64>,
    pub body_length_min: Option<f64>,
    pub body_length_max: Option<f64>,
    pub wingspan_min: Option<f64>,
    pub wingspan_max: Option<f64>,

    pub color: String,
    pub habitat: String,
    pub eye_color: String,
    pub environment: String,
    pub surface_type: String,
    pub elytra: String,
    pub wing_pattern: String,
    pub gender: String,
    pub season: String,
    pub time_of_day: String,
}

impl FilterState {
    pub fn number(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::SizeMin => self.size_min,
            NumericField::SizeMax => self.size_max,
            NumericField::BodyLengthMin => self.body_length_min,
            NumericField::BodyLengthMax => self.body_length_max,
            NumericField::WingspanMin => self.wingspan_min,
            NumericField::WingspanMax => self.wingspan_max,
        }
    }

    pub fn set_number(&mut self, field: NumericField, value: Option<f64>) {
        let slot = match field {
            NumericField::SizeMin => &mut self.size_min,
            NumericField::SizeMax => &mut self.size_max,
            NumericField::BodyLengthMin => &mut self.body_length_min,
            NumericField::BodyLengthMax => &mut self.body_length_max,
            NumericField::WingspanMin => &mut self.wingspan_min,
            NumericField::WingspanMax => &mut self.wingspan_max,
        };
        *slot = value;
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Color => &self.color,
            TextField::Habitat => &self.habitat,
            TextField::EyeColor => &self.eye_color,
            TextField::Environment => &self.environment,
            TextField::SurfaceType => &self.surface_type,
            TextField::Elytra => &self.elytra,
            TextField::WingPattern => &self.wing_pattern,
            TextField::Gender => &self.gender,
            TextField::Season => &self.season,
            TextField::TimeOfDay => &self.time_of_day,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Color => &mut self.color,
            TextField::Habitat => &mut self.habitat,
            TextField::EyeColor => &mut self.eye_color,
            TextField::Environment => &mut self.environment,
            TextField::SurfaceType => &mut self.surface_type,
            TextField::Elytra => &mut self.elytra,
            TextField::WingPattern => &mut self.wing_pattern,
            TextField::Gender => &mut self.gender,
            TextField::Season => &mut self.season,
            TextField::TimeOfDay => &mut self.time_of_day,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.text_mut(field) = value.into();
    }

    /// 全項目を初期化
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// 何も入力されていないか
    pub fn is_empty(&self) -> bool {
        NumericField::ALL.iter().all(|f| self.number(*f).is_none())
            && TextField::ALL.iter().all(|f| self.text(*f).is_empty())
    }
}
