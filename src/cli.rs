use clap::{Args, Parser, Subcommand};
use insect_search_common::{Category, FilterState};

#[derive(Parser)]
#[command(name = "insect-search")]
#[command(about = "Поиск насекомых: стрекозы, жуки, бабочки", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Подробный журнал
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Адрес сервера (перекрывает настройки и INSECT_SEARCH_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Поиск по параметрам для выбранного типа
    Search {
        /// Тип насекомого (dragonfly/beetle/butterfly)
        #[arg(required = true)]
        category: Category,

        #[command(flatten)]
        filters: FilterArgs,

        /// Вывести результаты в JSON
        #[arg(long)]
        json: bool,
    },

    /// Все насекомые всех типов с локальным фильтром
    Browse {
        /// Показать только этот тип
        #[arg(short = 't', long = "type")]
        type_filter: Option<Category>,

        /// Текст для поиска (название, цвет, место обитания, описание)
        #[arg(short, long)]
        query: Option<String>,

        /// Вывести результаты в JSON
        #[arg(long)]
        json: bool,
    },

    /// Доступные значения фильтров для типа
    Options {
        #[arg(required = true)]
        category: Category,
    },

    /// Отправить запрос эксперту
    ExpertRequest {
        /// Описание насекомого (обязательно)
        #[arg(short, long, required = true)]
        description: String,

        /// Место наблюдения
        #[arg(short, long)]
        location: Option<String>,

        /// Дата наблюдения (ГГГГ-ММ-ДД)
        #[arg(long)]
        date: Option<String>,

        /// Дополнительные сведения
        #[arg(short, long)]
        additional: Option<String>,
    },

    /// Выйти из учетной записи
    Logout,

    /// Интерактивный режим
    Interactive,

    /// Показать/изменить настройки
    Config {
        /// Сохранить адрес сервера
        #[arg(long)]
        set_base_url: Option<String>,

        /// Показать настройки
        #[arg(long)]
        show: bool,
    },
}

/// Параметры фильтра (лишние для выбранного типа игнорируются)
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Размер от (мм)
    #[arg(long)]
    pub size_min: Option<f64>,
    /// Размер до (мм)
    #[arg(long)]
    pub size_max: Option<f64>,
    /// Длина тела от (мм)
    #[arg(long)]
    pub body_length_min: Option<f64>,
    /// Длина тела до (мм)
    #[arg(long)]
    pub body_length_max: Option<f64>,
    /// Размах крыльев от (мм)
    #[arg(long)]
    pub wingspan_min: Option<f64>,
    /// Размах крыльев до (мм)
    #[arg(long)]
    pub wingspan_max: Option<f64>,

    /// Цвет (через запятую)
    #[arg(long)]
    pub color: Option<String>,
    /// Место обитания (через запятую)
    #[arg(long)]
    pub habitat: Option<String>,
    #[arg(long)]
    pub eye_color: Option<String>,
    #[arg(long)]
    pub environment: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub season: Option<String>,
    #[arg(long)]
    pub surface_type: Option<String>,
    #[arg(long)]
    pub elytra: Option<String>,
    #[arg(long)]
    pub wing_pattern: Option<String>,
    #[arg(long)]
    pub time_of_day: Option<String>,
}

impl FilterArgs {
    pub fn to_filter_state(&self) -> FilterState {
        FilterState {
            size_min: self.size_min,
            size_max: self.size_max,
            body_length_min: self.body_length_min,
            body_length_max: self.body_length_max,
            wingspan_min: self.wingspan_min,
            wingspan_max: self.wingspan_max,
            color: self.color.clone().unwrap_or_default(),
            habitat: self.habitat.clone().unwrap_or_default(),
            eye_color: self.eye_color.clone().unwrap_or_default(),
            environment: self.environment.clone().unwrap_or_default(),
            gender: self.gender.clone().unwrap_or_default(),
            season: self.season.clone().unwrap_or_default(),
            surface_type: self.surface_type.clone().unwrap_or_default(),
            elytra: self.elytra.clone().unwrap_or_default(),
            wing_pattern: self.wing_pattern.clone().unwrap_or_default(),
            time_of_day: self.time_of_day.clone().unwrap_or_default(),
        }
    }
}
