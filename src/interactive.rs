//! 対話モード
//!
//! メニューからカテゴリ選択・チップ操作・検索・全件一覧を行う。
//! 状態の変更はすべてセッション経由。

use crate::api::CatalogApi;
use crate::error::Result;
use crate::expert;
use crate::render;
use crate::session::Session;
use dialoguer::{Input, Select};
use insect_search_common::category::{COMMON_COLORS, COMMON_HABITATS, SEASONS};
use insect_search_common::{
    Action, AppState, Category, FilterEdit, FilterField, NumericField, OptionAttr, ResultView,
    TextField,
};

/// チップの操作種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChipKind {
    /// 追加／削除
    Multi,
    /// 1つだけ選択
    Exclusive,
    /// 置き換え／全消去
    Quick,
}

/// チップ定義
struct Chip {
    label: &'static str,
    field: TextField,
    attr: OptionAttr,
    kind: ChipKind,
    /// 全件リストを優先するか
    prefer_all: bool,
    fallback: fn() -> Vec<String>,
}

fn colors() -> Vec<String> {
    COMMON_COLORS.iter().map(|c| c.to_string()).collect()
}

fn habitats() -> Vec<String> {
    COMMON_HABITATS.iter().map(|h| h.value.to_string()).collect()
}

fn seasons() -> Vec<String> {
    SEASONS.iter().map(|s| s.value.to_string()).collect()
}

fn none() -> Vec<String> {
    Vec::new()
}

const CHIPS: &[Chip] = &[
    Chip { label: "Цвет: быстрый выбор", field: TextField::Color, attr: OptionAttr::Color, kind: ChipKind::Quick, prefer_all: false, fallback: colors },
    Chip { label: "Цвет: несколько", field: TextField::Color, attr: OptionAttr::Color, kind: ChipKind::Multi, prefer_all: true, fallback: colors },
    Chip { label: "Цвет глаз", field: TextField::EyeColor, attr: OptionAttr::EyeColor, kind: ChipKind::Quick, prefer_all: false, fallback: colors },
    Chip { label: "Место обитания: основное", field: TextField::Habitat, attr: OptionAttr::Habitat, kind: ChipKind::Exclusive, prefer_all: false, fallback: habitats },
    Chip { label: "Место обитания: несколько", field: TextField::Habitat, attr: OptionAttr::Habitat, kind: ChipKind::Multi, prefer_all: true, fallback: habitats },
    Chip { label: "Тип поверхности", field: TextField::SurfaceType, attr: OptionAttr::SurfaceType, kind: ChipKind::Exclusive, prefer_all: false, fallback: none },
    Chip { label: "Надкрылья", field: TextField::Elytra, attr: OptionAttr::Elytra, kind: ChipKind::Exclusive, prefer_all: false, fallback: none },
    Chip { label: "Рисунок крыльев", field: TextField::WingPattern, attr: OptionAttr::WingPattern, kind: ChipKind::Exclusive, prefer_all: false, fallback: none },
    Chip { label: "Сезон", field: TextField::Season, attr: OptionAttr::Season, kind: ChipKind::Exclusive, prefer_all: false, fallback: seasons },
];

impl Chip {
    fn applies(&self, category: Category) -> bool {
        let schema = category.schema();
        schema.has_text_field(self.field) && schema.has_option(self.attr)
    }

    /// 候補値（キャッシュ → 既定リスト）
    fn values(&self, state: &AppState, category: Category) -> Vec<String> {
        let list = state.options().get(category, self.attr);
        let (first, second) = if self.prefer_all {
            (&list.all, &list.basic)
        } else {
            (&list.basic, &list.all)
        };
        if !first.is_empty() {
            first.clone()
        } else if !second.is_empty() {
            second.clone()
        } else {
            (self.fallback)()
        }
    }

    fn is_selected(&self, state: &AppState, value: &str) -> bool {
        let current = state.filters().text(self.field);
        match self.kind {
            ChipKind::Exclusive => current == value,
            ChipKind::Multi | ChipKind::Quick => {
                !current.is_empty() && current.to_lowercase().contains(&value.to_lowercase())
            }
        }
    }

    fn edit(&self, value: String) -> FilterEdit {
        match self.kind {
            ChipKind::Multi => FilterEdit::Toggle(self.field, value),
            ChipKind::Exclusive => FilterEdit::ToggleExclusive(self.field, value),
            ChipKind::Quick => FilterEdit::SelectQuick(self.field, value),
        }
    }
}

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    SelectCategory,
    Chip(usize),
    EditText,
    EditNumbers,
    Search,
    ClearForm,
    BrowseAll,
    LocalFilter,
    ClearLocalQuery,
    CloseBrowseAll,
    ExpertRequest,
    Quit,
}

fn menu(state: &AppState) -> Vec<(MenuItem, String)> {
    let mut items = vec![(MenuItem::SelectCategory, "Выбрать тип насекомого".to_string())];

    if let Some(category) = state.category() {
        for (idx, chip) in CHIPS.iter().enumerate() {
            if chip.applies(category) {
                items.push((MenuItem::Chip(idx), chip.label.to_string()));
            }
        }
        items.push((MenuItem::EditText, "Ввести значение поля".to_string()));
        items.push((MenuItem::EditNumbers, "Размеры".to_string()));
        items.push((MenuItem::Search, "🔍 Искать".to_string()));
        items.push((MenuItem::ClearForm, "Очистить форму".to_string()));
    }

    items.push((MenuItem::BrowseAll, "Показать всех насекомых".to_string()));
    if state.view().browse().is_some() {
        items.push((MenuItem::LocalFilter, "Фильтр списка".to_string()));
        items.push((MenuItem::ClearLocalQuery, "Сбросить текст поиска".to_string()));
        items.push((MenuItem::CloseBrowseAll, "Закрыть список".to_string()));
    }
    items.push((MenuItem::ExpertRequest, "Запрос эксперту".to_string()));
    items.push((MenuItem::Quit, "Выход".to_string()));
    items
}

/// 現在のフォーム内容（選択中カテゴリの項目のみ）
fn form_summary(state: &AppState) -> String {
    let Some(category) = state.category() else {
        return String::new();
    };
    let request = match state.search_request() {
        Some(request) if !request.params.is_empty() => request,
        _ => return format!("{} {}: фильтры не заданы", category.icon(), category.label()),
    };
    let parts: Vec<String> = request
        .params
        .iter()
        .map(|(k, v)| match v.as_str() {
            Some(s) => format!("{}={}", k, s),
            None => format!("{}={}", k, v),
        })
        .collect();
    format!("{} {}: {}", category.icon(), category.label(), parts.join("; "))
}

fn pick(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    if items.is_empty() {
        println!("(нет вариантов)");
        return Ok(None);
    }
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?)
}

fn ask(prompt: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

/// 対話ループ
pub async fn run<A: CatalogApi>(session: &mut Session<A>) -> Result<()> {
    println!("🦋 insect-search - интерактивный режим\n");

    loop {
        let summary = form_summary(session.state());
        if !summary.is_empty() {
            println!("{}", summary);
        }

        let items = menu(session.state());
        let labels: Vec<String> = items.iter().map(|(_, label)| label.clone()).collect();
        let Some(choice) = pick("Действие", &labels)? else {
            break;
        };

        match items[choice].0 {
            MenuItem::SelectCategory => {
                let labels: Vec<String> = Category::ALL
                    .iter()
                    .map(|c| format!("{} {}", c.icon(), c.label()))
                    .collect();
                if let Some(idx) = pick("Тип насекомого", &labels)? {
                    session.select_category(Category::ALL[idx]).await;
                }
            }

            MenuItem::Chip(idx) => {
                let chip = &CHIPS[idx];
                let Some(category) = session.state().category() else {
                    continue;
                };
                let values = chip.values(session.state(), category);
                let labels: Vec<String> = values
                    .iter()
                    .map(|v| {
                        let mark = if chip.is_selected(session.state(), v) { "✓" } else { " " };
                        format!("{} {}", mark, v)
                    })
                    .collect();
                if let Some(i) = pick(chip.label, &labels)? {
                    session.edit(chip.edit(values[i].clone())).await;
                }
            }

            MenuItem::EditText => {
                let Some(category) = session.state().category() else {
                    continue;
                };
                let fields: Vec<TextField> = TextField::ALL
                    .into_iter()
                    .filter(|f| category.schema().has_text_field(*f))
                    .collect();
                let labels: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{}: {}", f.label(), session.state().filters().text(*f)))
                    .collect();
                if let Some(i) = pick("Поле", &labels)? {
                    let field = fields[i];
                    let value = ask(field.label(), session.state().filters().text(field))?;
                    session.edit(FilterEdit::SetText(field, value)).await;
                }
            }

            MenuItem::EditNumbers => {
                let Some(category) = session.state().category() else {
                    continue;
                };
                for field in NumericField::ALL {
                    if !category.schema().has_field(FilterField::Numeric(field)) {
                        continue;
                    }
                    let current = session
                        .state()
                        .filters()
                        .number(field)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    let input = ask(field.label(), &current)?;
                    let value = match input.trim() {
                        "" => None,
                        text => match text.replace(',', ".").parse::<f64>() {
                            Ok(v) => Some(v),
                            Err(_) => {
                                eprintln!("⚠ Не число: {}", text);
                                continue;
                            }
                        },
                    };
                    session.edit(FilterEdit::SetNumber(field, value)).await;
                }
            }

            MenuItem::Search => {
                session.search().await;
                show(session);
            }

            MenuItem::ClearForm => session.clear_form().await,

            MenuItem::BrowseAll => {
                session.browse_all().await;
                show(session);
            }

            MenuItem::LocalFilter => {
                let (current_type, current_query) = match session.state().view() {
                    ResultView::BrowsingAll(browse) => (browse.type_filter(), browse.query().to_string()),
                    _ => continue,
                };
                let mut labels = vec!["Все типы".to_string()];
                labels.extend(Category::ALL.iter().map(|c| format!("{} {}", c.icon(), c.label())));
                let default = current_type
                    .and_then(|t| Category::ALL.iter().position(|c| *c == t))
                    .map(|p| p + 1)
                    .unwrap_or(0);
                let type_idx = Select::new()
                    .with_prompt("Тип")
                    .items(&labels)
                    .default(default)
                    .interact()?;
                let type_filter = type_idx.checked_sub(1).map(|i| Category::ALL[i]);
                let query = ask("Поиск по названию, цвету, месту обитания, описанию", &current_query)?;
                session.apply_local_filter(type_filter, &query).await;
                show(session);
            }

            MenuItem::ClearLocalQuery => {
                session.dispatch(Action::ClearLocalQuery).await;
                show(session);
            }

            MenuItem::CloseBrowseAll => session.close_browse_all().await,

            MenuItem::ExpertRequest => {
                let description = ask("Описание насекомого", "")?;
                let location = ask("Место наблюдения", "")?;
                let date = ask("Дата наблюдения (ГГГГ-ММ-ДД)", "")?;
                let additional = ask("Дополнительно", "")?;
                match expert::build_request(&description, Some(&location), Some(&date), Some(&additional)) {
                    Ok(request) => match expert::submit(session.api(), &request).await {
                        Ok(message) => println!("✔ {}", message),
                        Err(message) => eprintln!("✖ {}", message),
                    },
                    Err(err) => eprintln!("✖ {}", err),
                }
            }

            MenuItem::Quit => break,
        }
    }

    Ok(())
}

fn show<A: CatalogApi>(session: &mut Session<A>) {
    if let Some(alert) = session.take_alert() {
        eprintln!("⚠ {}", alert);
    }
    println!("{}", render::render_results(session.state()));
}
