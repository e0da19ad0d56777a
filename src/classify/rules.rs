//! Heuristic tables used by the page classifier.
//!
//! Everything the classifier knows about Brazilian auction sites lives here as
//! data. Adding a platform quirk means adding a pattern or keyword, never
//! touching `classify`.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Path patterns of listing / catalog / search pages.
const LISTING_PATH_PATTERNS: &[&str] = &[
    r"/leil(ao|oes|ão|ões)/?$",
    r"/leil(ao|oes)/(em-andamento|abertos?|futuros?|encerrados?|agenda)/?$",
    r"/(catalogo|catalogos|catálogo)(/|$)",
    r"/(busca|pesquisa|search)(/|$)",
    r"/(lotes|produtos|itens|bens)/?$",
    r"/(imoveis|imóveis|veiculos|veículos|maquinas|máquinas|equipamentos|diversos)/?$",
    r"/(categoria|categorias|category)(/|$)",
    r"/(agenda|calendario|em-andamento|proximos-leiloes|encerrados)(/|$)",
    r"/(leiloes|auctions)/[^/]+/?$",
];

/// Path (and query) patterns of individual lot pages.
///
/// Every pattern needs a variable part after the noun, so the bare index page
/// (`/lotes`) stays a listing.
const LOT_PATH_PATTERNS: &[&str] = &[
    r"/lotes?/[^/]+",
    r"/lote-[a-z0-9]",
    r"/(item|itens)/[^/]+",
    r"/(produto|produtos|product)/[^/]+",
    r"/(bem|bens)/[^/]+",
    r"/(imovel|imóvel)/[^/]+",
    r"/(veiculo|veículo)/[^/]+",
    r"/(detalhe|detalhes|details?)/[^/]+",
    r"/(detalhe|detalhes)-[a-z0-9]",
    r"/\d{4,}(/|$)",
    r"/[a-z0-9-]+-\d{3,}/?$",
];

/// Query-string patterns that identify a lot page regardless of path.
const LOT_QUERY_PATTERNS: &[&str] = &[
    r"(^|&)(lote_?id|id_?lote|idlote|lote)=\d+",
    r"(^|&)(item_?id|id_?item|iditem)=\d+",
    r"(^|&)(produto_?id|id_?produto|idproduto)=\d+",
    r"(^|&)(bem_?id|id_?bem)=\d+",
];

/// Anchor-text keywords that mark a link to a listing page.
const LISTING_KEYWORDS: &[&str] = &[
    "leilão",
    "leilões",
    "leilao",
    "leiloes",
    "catálogo",
    "catalogo",
    "em andamento",
    "próximos leilões",
    "proximos leiloes",
    "agenda",
    "ver todos",
    "todos os lotes",
    "imóveis",
    "veículos",
];

/// Anchor-text keywords that mark a link to a lot page.
const LOT_ACTION_KEYWORDS: &[&str] = &[
    "ver lote",
    "dar lance",
    "ver detalhes",
    "detalhes do lote",
    "mais detalhes",
    "fazer lance",
    "lance agora",
    "saiba mais",
];

/// Price-like text near an anchor.
const PRICE_PATTERNS: &[&str] = &[
    r"r\$\s*\d",
    r"\blance\b",
    r"\blance (inicial|mínimo|minimo|atual)\b",
    r"\bavalia(ção|cao|do)\b",
];

/// Account and navigation chrome that never points at a lot.
const EXCLUSION_KEYWORDS: &[&str] = &[
    "home",
    "início",
    "inicio",
    "contato",
    "fale conosco",
    "sobre",
    "quem somos",
    "login",
    "cadastro",
    "cadastre-se",
    "entrar",
    "minha conta",
    "política de privacidade",
    "termos de uso",
];

static DEFAULT_RULES: LazyLock<ClassifierRules> = LazyLock::new(|| {
    ClassifierRules::new(
        LISTING_PATH_PATTERNS,
        LOT_PATH_PATTERNS,
        LOT_QUERY_PATTERNS,
        PRICE_PATTERNS,
    )
    .expect("Failed to compile built-in classifier patterns - this is a bug")
    .with_listing_keywords(LISTING_KEYWORDS)
    .with_lot_keywords(LOT_ACTION_KEYWORDS)
    .with_exclusion_keywords(EXCLUSION_KEYWORDS)
});

/// Compiled classification tables.
///
/// Regexes are matched case-insensitively; keywords are compared against
/// lowercased anchor text.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    pub(crate) listing_paths: Vec<Regex>,
    pub(crate) lot_paths: Vec<Regex>,
    pub(crate) lot_queries: Vec<Regex>,
    pub(crate) price_context: Vec<Regex>,
    pub(crate) listing_keywords: Vec<String>,
    pub(crate) lot_keywords: Vec<String>,
    pub(crate) exclusion_keywords: Vec<String>,
}

impl ClassifierRules {
    /// Compiles a rule set from pattern tables. Keyword lists start empty.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new(
        listing_paths: &[&str],
        lot_paths: &[&str],
        lot_queries: &[&str],
        price_context: &[&str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            listing_paths: compile_all(listing_paths)?,
            lot_paths: compile_all(lot_paths)?,
            lot_queries: compile_all(lot_queries)?,
            price_context: compile_all(price_context)?,
            listing_keywords: Vec::new(),
            lot_keywords: Vec::new(),
            exclusion_keywords: Vec::new(),
        })
    }

    pub fn with_listing_keywords(mut self, keywords: &[&str]) -> Self {
        self.listing_keywords.extend(lowercase_all(keywords));
        self
    }

    pub fn with_lot_keywords(mut self, keywords: &[&str]) -> Self {
        self.lot_keywords.extend(lowercase_all(keywords));
        self
    }

    pub fn with_exclusion_keywords(mut self, keywords: &[&str]) -> Self {
        self.exclusion_keywords.extend(lowercase_all(keywords));
        self
    }

    /// Adds extra lot path patterns on top of the current set.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn extend_lot_paths(mut self, patterns: &[&str]) -> Result<Self, regex::Error> {
        self.lot_paths.extend(compile_all(patterns)?);
        Ok(self)
    }

    /// Adds extra listing path patterns on top of the current set.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn extend_listing_paths(mut self, patterns: &[&str]) -> Result<Self, regex::Error> {
        self.listing_paths.extend(compile_all(patterns)?);
        Ok(self)
    }
}

impl Default for ClassifierRules {
    /// The built-in Brazilian auction-site tables.
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    patterns
        .iter()
        .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
        .collect()
}

fn lowercase_all<'a>(keywords: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    keywords.iter().map(|k| k.to_lowercase())
}
