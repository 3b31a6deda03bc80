use insect_search_common::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsectSearchError {
    #[error("Ошибка конфигурации: {0}")]
    Config(String),

    #[error("Ошибка HTTP-клиента: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Неверная дата: {0} (ожидается ГГГГ-ММ-ДД)")]
    InvalidDate(String),

    #[error("Ошибка ввода: {0}")]
    Prompt(String),

    #[error("Ошибка разбора JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] insect_search_common::Error),
}

impl From<dialoguer::Error> for InsectSearchError {
    fn from(err: dialoguer::Error) -> Self {
        InsectSearchError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InsectSearchError>;
