//! 検索リクエストの組み立て
//!
//! フォーム状態からカテゴリに該当する項目だけを取り出し、
//! 値のある項目だけを含む疎なパラメータにする。

use crate::category::Category;
use crate::filter::{FilterField, FilterState};
use serde_json::{Map, Number, Value};

/// 送信パラメータ
pub type ParamMap = Map<String, Value>;

/// パラメータを組み立てる（純粋関数）
///
/// - 数値: `None` でなければ送る（0 も送る）
/// - 文字列: 前後空白を除いて空でなければ、除いた値を送る
pub fn build_params(category: Category, state: &FilterState) -> ParamMap {
    let mut params = ParamMap::new();

    for field in category.schema().fields {
        let value = match field {
            FilterField::Numeric(f) => state.number(*f).and_then(number_value),
            FilterField::Text(f) => {
                let trimmed = state.text(*f).trim();
                (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
            }
        };

        if let Some(value) = value {
            params.insert(field.param_name().to_string(), value);
        }
    }

    params
}

/// 整数値は整数として送る（20.0 ではなく 20）
fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(Value::Number(Number::from(n as i64)))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}
