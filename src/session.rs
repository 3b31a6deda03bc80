//! 検索セッション
//!
//! [`AppState`] のリデューサが返す [`Effect`] を実行し、
//! 完了アクションを状態に戻すまでを受け持つ。

use crate::api::CatalogApi;
use futures::future::try_join_all;
use insect_search_common::{
    Action, AppState, Applied, Category, Effect, FilterEdit, FilterState, NumericField, TextField,
};
use tracing::{debug, warn};

/// 通信を実行して完了アクションを作る
///
/// 状態には触れないので、複数の通信を同時に走らせて
/// 好きな順に [`AppState::dispatch`] へ戻してよい。
pub async fn execute<A: CatalogApi + ?Sized>(api: &A, effect: Effect) -> Action {
    match effect {
        Effect::LoadOptions { token, category } => {
            let outcome = api.filter_options(category).await;
            if let Err(err) = &outcome {
                // 選択肢は補助情報なので通知しない
                warn!(%category, error = %err, "フィルタ選択肢の読み込みに失敗");
            }
            Action::OptionsLoaded { token, category, outcome }
        }

        Effect::Search { token, request } => {
            debug!(category = %request.category, params = ?request.params, "検索");
            let outcome = api.search(&request).await;
            Action::SearchFinished { token, outcome }
        }

        Effect::BrowseAll { token, categories } => {
            // 全カテゴリを並行取得し、最初の失敗で打ち切る
            let requests = categories.into_iter().map(|category| async move {
                api.all_insects(category)
                    .await
                    .map(|records| (category, records))
            });
            let outcome = try_join_all(requests).await;
            if let Err(err) = &outcome {
                warn!(error = %err, "全件一覧の取得に失敗");
            }
            Action::BrowseAllFinished { token, outcome }
        }
    }
}

/// 状態とバックエンドの組
pub struct Session<A> {
    api: A,
    state: AppState,
}

impl<A: CatalogApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// アクションを適用し、発生した通信を完了まで実行する
    pub async fn dispatch(&mut self, action: Action) {
        let mut next = self.state.dispatch(action);

        while let Some(effect) = next {
            let completion = execute(&self.api, effect).await;
            next = self.state.dispatch(completion);
            if self.state.last_applied() == Some(Applied::Stale) {
                debug!("古い応答を破棄");
            }
        }
    }

    pub async fn select_category(&mut self, category: Category) {
        self.dispatch(Action::SelectCategory(category)).await;
    }

    pub async fn edit(&mut self, edit: FilterEdit) {
        self.dispatch(Action::Edit(edit)).await;
    }

    /// フォーム全体を置き換える
    pub async fn fill_form(&mut self, filters: &FilterState) {
        for field in NumericField::ALL {
            self.edit(FilterEdit::SetNumber(field, filters.number(field))).await;
        }
        for field in TextField::ALL {
            self.edit(FilterEdit::SetText(field, filters.text(field).to_string())).await;
        }
    }

    pub async fn search(&mut self) {
        self.dispatch(Action::Search).await;
    }

    pub async fn browse_all(&mut self) {
        self.dispatch(Action::BrowseAll).await;
    }

    pub async fn apply_local_filter(&mut self, type_filter: Option<Category>, query: &str) {
        self.dispatch(Action::ApplyLocalFilter {
            type_filter,
            query: query.to_string(),
        })
        .await;
    }

    pub async fn close_browse_all(&mut self) {
        self.dispatch(Action::CloseBrowseAll).await;
    }

    pub async fn clear_form(&mut self) {
        self.dispatch(Action::ClearForm).await;
    }

    /// 通知を取り出して消す
    pub fn take_alert(&mut self) -> Option<String> {
        let alert = self.state.alert().map(str::to_string);
        if alert.is_some() {
            self.state.dispatch(Action::DismissAlert);
        }
        alert
    }
}
