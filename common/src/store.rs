//! アプリケーション状態とリデューサ
//!
//! 状態の変更はすべて [`AppState::dispatch`] を通す。通信が必要な遷移は
//! [`Effect`] を返し、呼び出し側が実行して完了アクションを戻す。
//!
//! 通信ごとにトークンを発行し、完了時のトークンが最新でなければ捨てる。
//! 応答が前後しても、最後に発行したリクエストの結果だけが残る。

use crate::category::{self, Category};
use crate::error::FetchError;
use crate::filter::{FilterState, NumericField, TextField};
use crate::normalize;
use crate::options::{FilterOptionSet, OptionsPayload};
use crate::params::build_params;
use crate::protocol::SearchRequest;
use crate::record::InsectRecord;
use crate::view::{BrowseAll, ResultView};

/// カテゴリ未選択で検索したとき
pub const SELECT_TYPE_ALERT: &str = "Пожалуйста, выберите тип насекомого";

/// リクエスト識別子（単調増加）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// フォーム編集
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    /// 複数値チップ（色・生息地）
    Toggle(TextField, String),
    /// 単一値チップ（表面・翅鞘・翅の模様・季節・基本生息地）
    ToggleExclusive(TextField, String),
    /// クイック選択（色・眼の色）
    SelectQuick(TextField, String),
    SetText(TextField, String),
    SetNumber(NumericField, Option<f64>),
}

/// 状態遷移のきっかけ
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectCategory(Category),
    OptionsLoaded {
        token: RequestToken,
        category: Category,
        outcome: Result<OptionsPayload, FetchError>,
    },
    Edit(FilterEdit),
    /// フォームと結果を初期化
    ClearForm,
    Search,
    SearchFinished {
        token: RequestToken,
        outcome: Result<Vec<InsectRecord>, FetchError>,
    },
    BrowseAll,
    /// カテゴリごとの結果（付与前）
    BrowseAllFinished {
        token: RequestToken,
        outcome: Result<Vec<(Category, Vec<InsectRecord>)>, FetchError>,
    },
    ApplyLocalFilter {
        type_filter: Option<Category>,
        query: String,
    },
    ClearLocalQuery,
    CloseBrowseAll,
    DismissAlert,
}

/// 実行してほしい通信
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadOptions { token: RequestToken, category: Category },
    Search { token: RequestToken, request: SearchRequest },
    BrowseAll { token: RequestToken, categories: Vec<Category> },
}

/// 完了アクションの適用結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Yes,
    /// 古いトークンなので捨てた
    Stale,
    /// 今の状態では意味がないので無視した
    Ignored,
}

/// アプリケーション状態
#[derive(Debug, Clone, Default)]
pub struct AppState {
    category: Option<Category>,
    filters: FilterState,
    options: FilterOptionSet,
    view: ResultView,
    alert: Option<String>,
    next_token: u64,
    view_token: Option<RequestToken>,
    options_token: Option<RequestToken>,
    last_applied: Option<Applied>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn options(&self) -> &FilterOptionSet {
        &self.options
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// ユーザーに見せるべき通知
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    /// 直前の完了アクションがどう扱われたか
    pub fn last_applied(&self) -> Option<Applied> {
        self.last_applied
    }

    /// 件数ラベル（選択中カテゴリの名詞形）
    pub fn type_name(&self, count: usize) -> &'static str {
        category::type_name(self.category, count)
    }

    /// 現在のフォームから組み立てるリクエスト
    pub fn search_request(&self) -> Option<SearchRequest> {
        self.category.map(|category| SearchRequest {
            category,
            params: build_params(category, &self.filters),
        })
    }

    fn issue(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }

    /// 結果表示系のリクエストを発行（前のものは無効になる）
    fn issue_view(&mut self) -> RequestToken {
        let token = self.issue();
        self.view_token = Some(token);
        token
    }

    fn is_current_view(&self, token: RequestToken) -> bool {
        self.view_token == Some(token)
    }

    /// アクションを適用し、必要なら通信を返す
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        self.last_applied = None;

        match action {
            Action::SelectCategory(category) => {
                self.category = Some(category);
                self.view = ResultView::Idle;
                self.view_token = None;

                let token = self.issue();
                self.options_token = Some(token);
                Some(Effect::LoadOptions { token, category })
            }

            Action::OptionsLoaded { token, category, outcome } => {
                if self.options_token != Some(token) {
                    self.last_applied = Some(Applied::Stale);
                    return None;
                }
                self.options_token = None;
                // 失敗時はキャッシュを変えない（通知もしない）
                self.last_applied = Some(match outcome {
                    Ok(payload) => {
                        self.options = FilterOptionSet::from_payload(category, &payload);
                        Applied::Yes
                    }
                    Err(_) => Applied::Ignored,
                });
                None
            }

            Action::Edit(edit) => {
                self.apply_edit(edit);
                None
            }

            Action::ClearForm => {
                self.filters.clear();
                self.view = ResultView::Idle;
                self.view_token = None;
                None
            }

            Action::Search => {
                let Some(request) = self.search_request() else {
                    self.alert = Some(SELECT_TYPE_ALERT.to_string());
                    return None;
                };
                let token = self.issue_view();
                self.view = ResultView::Searching;
                Some(Effect::Search { token, request })
            }

            Action::SearchFinished { token, outcome } => {
                if !self.is_current_view(token) {
                    self.last_applied = Some(Applied::Stale);
                    return None;
                }
                self.view_token = None;

                let results = match outcome {
                    Ok(results) => results,
                    Err(FetchError::Application(msg)) => {
                        self.alert = Some(format!("Ошибка: {}", msg));
                        Vec::new()
                    }
                    Err(FetchError::Transport(msg)) => {
                        self.alert = Some(format!("Ошибка при выполнении запроса: {}", msg));
                        Vec::new()
                    }
                };
                self.view = ResultView::Searched { results };
                self.last_applied = Some(Applied::Yes);
                None
            }

            Action::BrowseAll => {
                self.category = None;
                let token = self.issue_view();
                self.view = ResultView::LoadingAll;
                Some(Effect::BrowseAll {
                    token,
                    categories: Category::ALL.to_vec(),
                })
            }

            Action::BrowseAllFinished { token, outcome } => {
                if !self.is_current_view(token) {
                    self.last_applied = Some(Applied::Stale);
                    return None;
                }
                self.view_token = None;

                let results = match outcome {
                    Ok(groups) => groups
                        .into_iter()
                        .flat_map(|(category, records)| {
                            records.into_iter().map(move |r| r.tagged(category))
                        })
                        .collect(),
                    // 一部だけの一覧は出さない
                    Err(err) => {
                        self.alert = Some(format!("Ошибка при загрузке данных: {}", err.message()));
                        Vec::new()
                    }
                };
                self.view = ResultView::BrowsingAll(BrowseAll::new(results));
                self.last_applied = Some(Applied::Yes);
                None
            }

            Action::ApplyLocalFilter { type_filter, query } => {
                match self.view.browse_mut() {
                    Some(browse) => browse.apply_filter(type_filter, query),
                    None => self.last_applied = Some(Applied::Ignored),
                }
                None
            }

            Action::ClearLocalQuery => {
                match self.view.browse_mut() {
                    Some(browse) => browse.clear_query(),
                    None => self.last_applied = Some(Applied::Ignored),
                }
                None
            }

            Action::CloseBrowseAll => {
                self.view = ResultView::Idle;
                self.view_token = None;
                None
            }

            Action::DismissAlert => {
                self.alert = None;
                None
            }
        }
    }

    fn apply_edit(&mut self, edit: FilterEdit) {
        match edit {
            FilterEdit::Toggle(field, value) => normalize::toggle(&mut self.filters, field, &value),
            FilterEdit::ToggleExclusive(field, value) => {
                normalize::toggle_exclusive(&mut self.filters, field, &value)
            }
            FilterEdit::SelectQuick(field, value) => {
                normalize::select_quick(&mut self.filters, field, &value)
            }
            FilterEdit::SetText(field, value) => self.filters.set_text(field, value),
            FilterEdit::SetNumber(field, value) => self.filters.set_number(field, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str) -> InsectRecord {
        InsectRecord {
            name_ru: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn search_token(effect: Option<Effect>) -> RequestToken {
        match effect {
            Some(Effect::Search { token, .. }) => token,
            other => panic!("search effect expected: {:?}", other),
        }
    }

    fn browse_token(effect: Option<Effect>) -> RequestToken {
        match effect {
            Some(Effect::BrowseAll { token, .. }) => token,
            other => panic!("browse effect expected: {:?}", other),
        }
    }

    #[test]
    fn test_select_category_requests_options() {
        let mut state = AppState::new();
        let effect = state.dispatch(Action::SelectCategory(Category::Beetle));

        assert!(matches!(
            effect,
            Some(Effect::LoadOptions { category: Category::Beetle, .. })
        ));
        assert_eq!(state.category(), Some(Category::Beetle));
        assert_eq!(state.view(), &ResultView::Idle);
    }

    #[test]
    fn test_options_failure_keeps_cache() {
        let mut state = AppState::new();
        let Some(Effect::LoadOptions { token, .. }) = state.dispatch(Action::SelectCategory(Category::Beetle)) else {
            panic!("options effect expected");
        };
        let payload = json!({ "colors": ["черный"] }).as_object().cloned().unwrap();
        state.dispatch(Action::OptionsLoaded { token, category: Category::Beetle, outcome: Ok(payload) });
        let before = state.options().clone();

        let Some(Effect::LoadOptions { token, .. }) = state.dispatch(Action::SelectCategory(Category::Butterfly)) else {
            panic!("options effect expected");
        };
        state.dispatch(Action::OptionsLoaded {
            token,
            category: Category::Butterfly,
            outcome: Err(FetchError::Transport("timeout".into())),
        });

        assert_eq!(state.options(), &before);
        assert_eq!(state.alert(), None);
        assert_eq!(state.category(), Some(Category::Butterfly));
    }

    #[test]
    fn test_search_without_category_alerts() {
        let mut state = AppState::new();
        assert_eq!(state.dispatch(Action::Search), None);
        assert_eq!(state.alert(), Some(SELECT_TYPE_ALERT));
        assert_eq!(state.view(), &ResultView::Idle);
    }

    #[test]
    fn test_search_request_from_form() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Dragonfly));
        state.dispatch(Action::Edit(FilterEdit::SetNumber(NumericField::BodyLengthMin, Some(20.0))));
        state.dispatch(Action::Edit(FilterEdit::Toggle(TextField::Color, "синий".into())));

        match state.dispatch(Action::Search) {
            Some(Effect::Search { request, .. }) => {
                let body = serde_json::to_value(&request).unwrap();
                assert_eq!(
                    body,
                    json!({ "type": "dragonfly", "params": { "body_length_min": 20, "color": "синий" } })
                );
            }
            other => panic!("search effect expected: {:?}", other),
        }
        assert!(state.is_loading());
    }

    #[test]
    fn test_search_finished_success_and_empty() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Beetle));
        let token = search_token(state.dispatch(Action::Search));

        state.dispatch(Action::SearchFinished { token, outcome: Ok(vec![]) });
        assert_eq!(state.view(), &ResultView::Searched { results: vec![] });
        assert_eq!(state.alert(), None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_search_failures_end_in_searched() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Beetle));

        let token = search_token(state.dispatch(Action::Search));
        state.dispatch(Action::SearchFinished {
            token,
            outcome: Err(FetchError::Application("Неверный тип насекомого".into())),
        });
        assert_eq!(state.view(), &ResultView::Searched { results: vec![] });
        assert_eq!(state.alert(), Some("Ошибка: Неверный тип насекомого"));

        state.dispatch(Action::DismissAlert);
        let token = search_token(state.dispatch(Action::Search));
        state.dispatch(Action::SearchFinished {
            token,
            outcome: Err(FetchError::Transport("connection refused".into())),
        });
        assert_eq!(state.view(), &ResultView::Searched { results: vec![] });
        assert_eq!(state.alert(), Some("Ошибка при выполнении запроса: connection refused"));
    }

    #[test]
    fn test_browse_all_tags_records() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Beetle));
        let token = browse_token(state.dispatch(Action::BrowseAll));
        assert_eq!(state.category(), None);
        assert!(state.is_loading());

        state.dispatch(Action::BrowseAllFinished {
            token,
            outcome: Ok(vec![
                (Category::Dragonfly, vec![named("Стрекоза")]),
                (Category::Beetle, vec![named("Жук"), named("Жук-олень")]),
                (Category::Butterfly, vec![]),
            ]),
        });

        let browse = state.view().browse().expect("browse mode expected");
        assert_eq!(browse.total_count(), 3);
        assert_eq!(browse.results()[0].insect_type, Some(Category::Dragonfly));
        assert_eq!(browse.results()[2].insect_type, Some(Category::Beetle));
        assert_eq!(state.type_name(3), "насекомых");
    }

    #[test]
    fn test_browse_all_failure_shows_nothing() {
        let mut state = AppState::new();
        let token = browse_token(state.dispatch(Action::BrowseAll));
        state.dispatch(Action::BrowseAllFinished {
            token,
            outcome: Err(FetchError::Transport("network error".into())),
        });

        let browse = state.view().browse().expect("browse mode expected");
        assert!(browse.results().is_empty());
        assert!(browse.filtered().is_empty());
        assert_eq!(state.alert(), Some("Ошибка при загрузке данных: network error"));
    }

    #[test]
    fn test_local_filter_only_in_browse_mode() {
        let mut state = AppState::new();
        state.dispatch(Action::ApplyLocalFilter { type_filter: None, query: "жук".into() });
        assert_eq!(state.last_applied(), Some(Applied::Ignored));
        assert_eq!(state.view(), &ResultView::Idle);
    }

    #[test]
    fn test_local_filter_and_close() {
        let mut state = AppState::new();
        let token = browse_token(state.dispatch(Action::BrowseAll));
        state.dispatch(Action::BrowseAllFinished {
            token,
            outcome: Ok(vec![
                (Category::Dragonfly, vec![named("Стрекоза")]),
                (Category::Beetle, vec![named("Жук")]),
            ]),
        });

        state.dispatch(Action::ApplyLocalFilter {
            type_filter: Some(Category::Beetle),
            query: String::new(),
        });
        assert_eq!(state.view().visible_results().len(), 1);

        state.dispatch(Action::CloseBrowseAll);
        assert_eq!(state.view(), &ResultView::Idle);
    }

    #[test]
    fn test_new_browse_resets_local_filter() {
        let mut state = AppState::new();
        let token = browse_token(state.dispatch(Action::BrowseAll));
        state.dispatch(Action::BrowseAllFinished {
            token,
            outcome: Ok(vec![(Category::Beetle, vec![named("Жук")])]),
        });
        state.dispatch(Action::ApplyLocalFilter { type_filter: None, query: "олень".into() });

        let token = browse_token(state.dispatch(Action::BrowseAll));
        state.dispatch(Action::BrowseAllFinished {
            token,
            outcome: Ok(vec![(Category::Beetle, vec![named("Жук")])]),
        });
        let browse = state.view().browse().unwrap();
        assert_eq!(browse.query(), "");
        assert_eq!(browse.filtered().len(), 1);
    }

    #[test]
    fn test_clear_form() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Butterfly));
        state.dispatch(Action::Edit(FilterEdit::SetText(TextField::WingPattern, "глазки".into())));
        let token = search_token(state.dispatch(Action::Search));
        state.dispatch(Action::SearchFinished { token, outcome: Ok(vec![named("Павлиний глаз")]) });

        state.dispatch(Action::ClearForm);
        assert!(state.filters().is_empty());
        assert_eq!(state.view(), &ResultView::Idle);
        assert_eq!(state.category(), Some(Category::Butterfly));
    }

    #[test]
    fn test_irrelevant_fields_survive_category_switch() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Beetle));
        state.dispatch(Action::Edit(FilterEdit::ToggleExclusive(TextField::Elytra, "гладкие".into())));
        state.dispatch(Action::SelectCategory(Category::Butterfly));
        assert_eq!(state.filters().elytra, "гладкие");
        let request = state.search_request().unwrap();
        assert!(request.params.get("elytra").is_none());
    }

    // =============================================
    // トークンによる応答順の解決
    // =============================================

    #[test]
    fn test_stale_search_is_dropped() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Beetle));
        let first = search_token(state.dispatch(Action::Search));
        let second = search_token(state.dispatch(Action::Search));
        assert!(second > first);

        state.dispatch(Action::SearchFinished { token: second, outcome: Ok(vec![named("новый")]) });
        state.dispatch(Action::SearchFinished { token: first, outcome: Ok(vec![named("старый")]) });

        assert_eq!(state.last_applied(), Some(Applied::Stale));
        assert_eq!(state.view(), &ResultView::Searched { results: vec![named("новый")] });
    }

    #[test]
    fn test_select_category_invalidates_pending_search() {
        let mut state = AppState::new();
        state.dispatch(Action::SelectCategory(Category::Beetle));
        let token = search_token(state.dispatch(Action::Search));
        state.dispatch(Action::SelectCategory(Category::Dragonfly));

        state.dispatch(Action::SearchFinished { token, outcome: Ok(vec![named("Жук")]) });
        assert_eq!(state.view(), &ResultView::Idle);
    }

    #[test]
    fn test_search_after_browse_wins() {
        let mut state = AppState::new();
        let browse = browse_token(state.dispatch(Action::BrowseAll));
        state.dispatch(Action::SelectCategory(Category::Beetle));
        let search = search_token(state.dispatch(Action::Search));

        state.dispatch(Action::SearchFinished { token: search, outcome: Ok(vec![named("Жук")]) });
        state.dispatch(Action::BrowseAllFinished { token: browse, outcome: Ok(vec![]) });

        assert_eq!(state.view(), &ResultView::Searched { results: vec![named("Жук")] });
    }

    #[test]
    fn test_any_completion_order_keeps_last_issued() {
        // 3件の検索の完了順をすべて試す
        let orders: [[usize; 3]; 6] = [
            [0, 1, 2], [0, 2, 1], [1, 0, 2],
            [1, 2, 0], [2, 0, 1], [2, 1, 0],
        ];

        for order in orders {
            let mut state = AppState::new();
            state.dispatch(Action::SelectCategory(Category::Butterfly));
            let tokens: Vec<RequestToken> = (0..3)
                .map(|_| search_token(state.dispatch(Action::Search)))
                .collect();

            for idx in order {
                state.dispatch(Action::SearchFinished {
                    token: tokens[idx],
                    outcome: Ok(vec![named(&format!("ответ {}", idx))]),
                });
            }

            assert_eq!(
                state.view(),
                &ResultView::Searched { results: vec![named("ответ 2")] },
                "order {:?}",
                order
            );
        }
    }

    #[test]
    fn test_stale_options_are_dropped() {
        let mut state = AppState::new();
        let Some(Effect::LoadOptions { token: old, .. }) = state.dispatch(Action::SelectCategory(Category::Beetle)) else {
            panic!("options effect expected");
        };
        state.dispatch(Action::SelectCategory(Category::Dragonfly));

        let payload = json!({ "colors": ["черный"] }).as_object().cloned().unwrap();
        state.dispatch(Action::OptionsLoaded { token: old, category: Category::Beetle, outcome: Ok(payload) });
        assert_eq!(state.last_applied(), Some(Applied::Stale));
        assert_eq!(state.options().category(), None);
    }
}
