use crate::catalog::{BookId, Catalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Book(BookId),
    NotFound,
}

impl Route {
    /// Canonical path for links. `NotFound` has none.
    pub fn href(self, catalog: &Catalog) -> Option<String> {
        match self {
            Route::Home => Some("/".to_string()),
            Route::Book(id) => catalog.get(id).map(|b| b.url.clone()),
            Route::NotFound => None,
        }
    }
}

/// Selects the view for `path`.
///
/// The root matches only exactly. A book matches its own url and anything
/// nested below it; the first book in catalog order wins. Dispatch never
/// modifies the catalog.
pub fn dispatch(path: &str, catalog: &Catalog) -> Route {
    let path = trim_path(path);
    if path == "/" {
        return Route::Home;
    }

    catalog
        .books()
        .iter()
        .find(|book| is_segment_prefix(&book.url, path))
        .map(|book| Route::Book(book.id))
        .unwrap_or(Route::NotFound)
}

fn trim_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
