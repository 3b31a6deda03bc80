//! Insect Search Common Library
//!
//! 検索クライアントの中核（I/Oなし）:
//! カテゴリ定義、フォーム状態と正規化、リクエスト組み立て、
//! 選択肢キャッシュ、結果表示の状態遷移

pub mod category;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod options;
pub mod params;
pub mod protocol;
pub mod record;
pub mod store;
pub mod view;

pub use category::{Category, CategorySchema, NounForms, PluralForm};
pub use error::{Error, FetchError, Result};
pub use filter::{FilterField, FilterState, NumericField, TextField};
pub use options::{FilterOptionSet, OptionAttr, OptionList, OptionsPayload};
pub use params::{build_params, ParamMap};
pub use protocol::{ExpertRequest, SearchRequest};
pub use record::InsectRecord;
pub use store::{Action, AppState, Applied, Effect, FilterEdit, RequestToken};
pub use view::{filter_records, BrowseAll, ResultView};
