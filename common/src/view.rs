//! 検索結果の表示状態
//!
//! 状態は排他的で、同時に有効なのは1つだけ。
//! 別の状態に入ると前の状態の一時データ（一覧モードの絞り込み条件など）は消える。

use crate::category::Category;
use crate::record::InsectRecord;

/// 結果表示の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultView {
    /// まだ検索していない
    #[default]
    Idle,
    /// カテゴリ検索の応答待ち
    Searching,
    /// カテゴリ検索の完了（0件を含む）
    Searched { results: Vec<InsectRecord> },
    /// 全件一覧の応答待ち
    LoadingAll,
    /// 全件一覧（ローカル絞り込み付き）
    BrowsingAll(BrowseAll),
}

impl ResultView {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResultView::Searching | ResultView::LoadingAll)
    }

    /// 画面に出す結果
    pub fn visible_results(&self) -> &[InsectRecord] {
        match self {
            ResultView::Searched { results } => results,
            ResultView::BrowsingAll(browse) => browse.filtered(),
            _ => &[],
        }
    }

    pub fn browse(&self) -> Option<&BrowseAll> {
        match self {
            ResultView::BrowsingAll(browse) => Some(browse),
            _ => None,
        }
    }

    pub fn browse_mut(&mut self) -> Option<&mut BrowseAll> {
        match self {
            ResultView::BrowsingAll(browse) => Some(browse),
            _ => None,
        }
    }
}

/// 全件一覧の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseAll {
    results: Vec<InsectRecord>,
    filtered: Vec<InsectRecord>,
    type_filter: Option<Category>,
    query: String,
}

impl BrowseAll {
    /// カテゴリ付与済みの全件から作る（絞り込みなし）
    pub fn new(results: Vec<InsectRecord>) -> Self {
        Self {
            filtered: results.clone(),
            results,
            type_filter: None,
            query: String::new(),
        }
    }

    pub fn results(&self) -> &[InsectRecord] {
        &self.results
    }

    pub fn filtered(&self) -> &[InsectRecord] {
        &self.filtered
    }

    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    pub fn type_filter(&self) -> Option<Category> {
        self.type_filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 絞り込み条件を設定して再計算
    pub fn apply_filter(&mut self, type_filter: Option<Category>, query: impl Into<String>) {
        self.type_filter = type_filter;
        self.query = query.into();
        self.refresh();
    }

    /// 検索語だけ消して再計算
    pub fn clear_query(&mut self) {
        self.query.clear();
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.filtered = filter_records(&self.results, self.type_filter, &self.query);
    }
}

/// レコードがテキスト検索語に一致するか
///
/// `query` は小文字化済みであること。
pub fn matches_query(record: &InsectRecord, query: &str) -> bool {
    record
        .searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// 種類 → テキストの順に絞り込む
pub fn filter_records(
    records: &[InsectRecord],
    type_filter: Option<Category>,
    query: &str,
) -> Vec<InsectRecord> {
    let query = query.trim().to_lowercase();

    records
        .iter()
        .filter(|r| type_filter.is_none() || r.insect_type == type_filter)
        .filter(|r| query.is_empty() || matches_query(r, &query))
        .cloned()
        .collect()
}
