//! Route table.

use alganews_core::sdk::Id;
use url::Url;

/// Origin used to resolve bare paths such as `/usuarios`.
const LOCAL_ORIGIN: &str = "http://localhost:3000/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Users,
    UserCreate,
    UserDetail(Id),
    UserEdit(Id),
    Payments,
    PaymentCreate,
    PaymentDetail(Id),
    Expenses,
    Revenues,
    /// OAuth redirect target.
    Authorize {
        code: Option<String>,
        state: Option<String>,
    },
    NotFound(String),
}

impl Route {
    /// Parses a full URL or an absolute path (query string included).
    pub fn parse(location: &str) -> Self {
        let Some(url) = resolve(location) else {
            return Route::NotFound(location.to_string());
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|part| !part.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Route::Home,
            ["usuarios"] => Route::Users,
            ["usuarios", "cadastro"] => Route::UserCreate,
            ["usuarios", "edicao", id] => parse_id(id).map_or_else(|| not_found(&url), Route::UserEdit),
            ["usuarios", id] => parse_id(id).map_or_else(|| not_found(&url), Route::UserDetail),
            ["pagamentos"] => Route::Payments,
            ["pagamentos", "cadastro"] => Route::PaymentCreate,
            ["pagamentos", id] => {
                parse_id(id).map_or_else(|| not_found(&url), Route::PaymentDetail)
            }
            ["fluxo-de-caixa", "despesas"] => Route::Expenses,
            ["fluxo-de-caixa", "receitas"] => Route::Revenues,
            ["authorize"] => Route::Authorize {
                code: query_param(&url, "code"),
                state: query_param(&url, "state"),
            },
            _ => not_found(&url),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Users => "/usuarios".to_string(),
            Route::UserCreate => "/usuarios/cadastro".to_string(),
            Route::UserDetail(id) => format!("/usuarios/{id}"),
            Route::UserEdit(id) => format!("/usuarios/edicao/{id}"),
            Route::Payments => "/pagamentos".to_string(),
            Route::PaymentCreate => "/pagamentos/cadastro".to_string(),
            Route::PaymentDetail(id) => format!("/pagamentos/{id}"),
            Route::Expenses => "/fluxo-de-caixa/despesas".to_string(),
            Route::Revenues => "/fluxo-de-caixa/receitas".to_string(),
            Route::Authorize { .. } => "/authorize".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// "/"-separated breadcrumb shown above the route's view.
    pub fn breadcrumb(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Users => "Usuários/Consulta",
            Route::UserCreate => "Usuários/Cadastro",
            Route::UserDetail(_) => "Usuários/Detalhes",
            Route::UserEdit(_) => "Usuários/Edição",
            Route::Payments => "Pagamentos/Consulta",
            Route::PaymentCreate => "Pagamentos/Cadastro",
            Route::PaymentDetail(_) => "Pagamentos/Detalhes",
            Route::Expenses => "Fluxo de caixa/Despesas",
            Route::Revenues => "Fluxo de caixa/Receitas",
            Route::Authorize { .. } => "Autorização",
            Route::NotFound(_) => "Página não encontrada",
        }
    }
}

fn resolve(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .or_else(|| Url::parse(LOCAL_ORIGIN).ok()?.join(location).ok())
}

fn parse_id(segment: &str) -> Option<Id> {
    segment.parse().ok()
}

fn not_found(url: &Url) -> Route {
    Route::NotFound(url.path().to_string())
}

/// First non-empty value of `key` in the query string.
fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
