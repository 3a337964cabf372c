//! Text for the result region, shared by the terminal screen and one-shot output.

use nt_core::{Article, DeviceState, SearchError, SearchResult};
use nt_feed::Screen;
use serde::Serialize;

pub const LOADING: &str = "Cargando...";
pub const NO_RESULTS: &str = "No se encontraron noticias.";
pub const IDLE: &str = "Escribe una búsqueda y pulsa Enter.";

pub fn status_line(device: Option<&DeviceState>) -> String {
    match device {
        Some(device) => format!(
            "Conexión: {} · Batería: {}%",
            device.connection, device.battery_percent
        ),
        None => "Conexión: - · Batería: -".to_string(),
    }
}

/// Title, description, then author and date lines when present.
pub fn article_lines(article: &Article) -> Vec<String> {
    let mut lines = vec![
        article.display_title().to_string(),
        article.display_description().to_string(),
    ];
    if let Some(author) = article.first_author() {
        lines.push(format!("Por: {}", author));
    }
    if let Some(published) = article.published() {
        lines.push(format!("Publicado: {}", published));
    }
    lines
}

/// Single message shown instead of the list, if any.
pub fn message(result: &SearchResult) -> Option<String> {
    match result {
        SearchResult::Results(articles) if articles.is_empty() => Some(NO_RESULTS.to_string()),
        SearchResult::Results(_) => None,
        SearchResult::Empty => Some(IDLE.to_string()),
        SearchResult::Loading => Some(LOADING.to_string()),
        SearchResult::NoConnection => Some(SearchError::NoConnection.to_string()),
        SearchResult::Error(message) => Some(message.clone()),
    }
}

pub fn render_text(screen: &Screen) -> String {
    let mut out = status_line(screen.device.as_ref());
    out.push_str("\n\n");
    let result = screen.state.view();
    match (&result, message(&result)) {
        (_, Some(message)) => {
            out.push_str(&message);
            out.push('\n');
        }
        (SearchResult::Results(articles), None) => {
            for (i, article) in articles.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                for line in article_lines(article) {
                    out.push_str(&line);
                    out.push('\n');
                }
            }
        }
        _ => {}
    }
    out
}

/// JSON shape of `nt search --json`. `message` is the text shown instead
/// of the list, so `no_connection` and empty results carry their wording too.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub device: Option<&'a DeviceState>,
    pub query: &'a str,
    pub result: SearchResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new(screen: &'a Screen) -> Self {
        let result = screen.state.view();
        Self {
            device: screen.device.as_ref(),
            query: &screen.query,
            message: message(&result),
            result,
        }
    }
}
