//! Localized UI messages.
//!
//! Message sets are static tables keyed by locale code. [`resolve`] picks a
//! set for an arbitrary locale string: exact code first, then the first two
//! characters (`pt_BR` → `pt`), then the English default.

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en";

/// Strings shown by the navigation and search panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSet {
    pub locale: &'static str,
    pub initializing: &'static str,
    pub tab_contents: &'static str,
    pub tab_index: &'static str,
    pub tab_search: &'static str,
    pub tab_favorites: &'static str,
    pub toc_file_not_found: &'static str,
    pub search_button: &'static str,
    pub search_scope_all: &'static str,
    pub search_default: &'static str,
    pub search_searching: &'static str,
    pub search_nothing_found: &'static str,
    pub search_rank: &'static str,
    pub search_title: &'static str,
    pub search_book: &'static str,
}

const EN: MessageSet = MessageSet {
    locale: "en",
    initializing: "Loading data...",
    tab_contents: "Contents",
    tab_index: "Index",
    tab_search: "Search",
    tab_favorites: "Favorites",
    toc_file_not_found: "The current page could not be found in the table of contents.",
    search_button: "Go!",
    search_scope_all: "All Available Books",
    search_default: "Type in the word(s) to search for. You can use an asterisk (*) as a wildcard character (e.g., 802.* or *queue*). To search for a phrase, enclose it in quotation marks (e.g., \"802.11 MAC\").",
    search_searching: "(searching)",
    search_nothing_found: "(no results)",
    search_rank: "Rank",
    search_title: "Title",
    search_book: "Book",
};

const DE: MessageSet = MessageSet {
    locale: "de",
    initializing: "Daten werden geladen...",
    tab_contents: "Inhalt",
    tab_index: "Index",
    tab_search: "Suchen",
    tab_favorites: "Favoriten",
    toc_file_not_found: "Die aktuelle Seite wurde nicht im Inhalt gefunden.",
    search_button: "Suchen",
    search_scope_all: "Alle verf\u{fc}gbaren B\u{fc}cher",
    search_default: "Geben Sie das Wort bzw. die Worte ein, nach denen gesucht werden soll:",
    search_searching: "(Suchen)",
    search_nothing_found: "(keine Ergebnisse)",
    search_rank: "Rang",
    search_title: "Titel",
    search_book: "Buch",
};

const ES: MessageSet = MessageSet {
    locale: "es",
    initializing: "Cargando datos...",
    tab_contents: "Contenido",
    tab_index: "\u{cd}ndice",
    tab_search: "Buscar",
    tab_favorites: "Favoritos",
    toc_file_not_found: "Esta p\u{e1}gina no se encontr\u{f3} en el \u{ed}ndice de contenidos.",
    search_button: "Ir",
    search_scope_all: "Todos los libros disponibles",
    search_default: "Escriba las palabras que desee buscar:",
    search_searching: "(buscando)",
    search_nothing_found: "(ning\u{fa}n resultado)",
    search_rank: "Clase",
    search_title: "T\u{ed}tulo",
    search_book: "Libro",
};

const FR: MessageSet = MessageSet {
    locale: "fr",
    initializing: "Chargement des donn\u{e9}es...",
    tab_contents: "Table des mati\u{e8}res",
    tab_index: "Index",
    tab_search: "Rechercher",
    tab_favorites: "Favoris",
    toc_file_not_found: "Page introuvable dans la table des mati\u{e8}res.",
    search_button: "Lancer",
    search_scope_all: "Tous les livres disponibles",
    search_default: "Saisissez un ou plusieurs mots cl\u{e9}s\u{a0}:",
    search_searching: "(recherche en cours)",
    search_nothing_found: "(aucun r\u{e9}sultat)",
    search_rank: "Pertinence",
    search_title: "Titre",
    search_book: "Livre",
};

const IT: MessageSet = MessageSet {
    locale: "it",
    initializing: "Caricamento dati in corso...",
    tab_contents: "Contenuto",
    tab_index: "Indice",
    tab_search: "Cerca",
    tab_favorites: "Preferiti",
    toc_file_not_found: "La pagina corrente non \u{e8} stata trovata nel Sommario.",
    search_button: "Vai!",
    search_scope_all: "Tutti i libri disponibili",
    search_default: "Digitare le parole da cercare:",
    search_searching: "(ricerca in corso)",
    search_nothing_found: "(nessun risultato)",
    search_rank: "Classe",
    search_title: "Titolo",
    search_book: "Libro",
};

const PT: MessageSet = MessageSet {
    locale: "pt",
    initializing: "Carregando dados...",
    tab_contents: "Conte\u{fa}do",
    tab_index: "\u{cd}ndice remissivo",
    tab_search: "Procurar",
    tab_favorites: "Favoritos",
    toc_file_not_found: "A p\u{e1}gina atual n\u{e3}o p\u{f4}de ser encontrada no Sum\u{e1}rio.",
    search_button: "Prosseguir",
    search_scope_all: "Todos os livros dispon\u{ed}veis",
    search_default: "Digite a(s) palavra(s) a ser(em) procurada(s):",
    search_searching: "(procurando)",
    search_nothing_found: "(nenhum resultado)",
    search_rank: "Escopo",
    search_title: "T\u{ed}tulo",
    search_book: "Livro",
};

const SV: MessageSet = MessageSet {
    locale: "sv",
    initializing: "L\u{e4}ser in data...",
    tab_contents: "Inneh\u{e5}ll",
    tab_index: "Index",
    tab_search: "S\u{f6}k",
    tab_favorites: "Favoriter",
    toc_file_not_found: "Det gick inte att hitta den aktuella sidan i inneh\u{e5}llsf\u{f6}rteckningen.",
    search_button: "Visa",
    search_scope_all: "Alla tillg\u{e4}ngliga b\u{f6}cker",
    search_default: "Ange de ord du vill s\u{f6}ka efter:",
    search_searching: "(s\u{f6}ker)",
    search_nothing_found: "(inga resultat)",
    search_rank: "Relevans",
    search_title: "Rubrik",
    search_book: "Bok",
};

static CATALOG: [&MessageSet; 7] = [&DE, &EN, &ES, &FR, &IT, &PT, &SV];

/// Locale codes with a message set of their own.
pub fn available_locales() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|set| set.locale)
}

/// Message set with exactly this code, if any.
pub fn lookup(code: &str) -> Option<&'static MessageSet> {
    lookup_in(&CATALOG, code)
}

fn lookup_in(catalog: &[&'static MessageSet], code: &str) -> Option<&'static MessageSet> {
    catalog.iter().copied().find(|set| set.locale == code)
}

/// Pick the message set for `locale`.
///
/// Tries the whole (lowercased, `-` → `_`) locale string, then its first two
/// characters, then the English default.
pub fn resolve(locale: &str) -> &'static MessageSet {
    resolve_in(&CATALOG, locale)
}

fn resolve_in(catalog: &[&'static MessageSet], locale: &str) -> &'static MessageSet {
    let normalized = locale.trim().to_lowercase().replace('-', "_");

    if normalized.chars().count() > 1 {
        if let Some(set) = lookup_in(catalog, &normalized) {
            return set;
        }
        let language: String = normalized.chars().take(2).collect();
        if let Some(set) = lookup_in(catalog, &language) {
            return set;
        }
    }

    &EN
}

impl MessageSet {
    /// Status line for a finished search.
    pub fn search_status(&self, result_count: usize) -> Option<&'static str> {
        if result_count == 0 {
            Some(self.search_nothing_found)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(resolve("fr").search_nothing_found, "(aucun r\u{e9}sultat)");
    }

    #[test]
    fn test_regional_code_wins_over_language() {
        static PT_BR: MessageSet = MessageSet {
            locale: "pt_br",
            search_nothing_found: "(nenhum resultado encontrado)",
            ..PT
        };
        let catalog = [&EN, &PT, &PT_BR];

        assert_eq!(resolve_in(&catalog, "pt-BR").locale, "pt_br");
        assert_eq!(resolve_in(&catalog, "pt_PT").locale, "pt");
        assert_eq!(resolve_in(&catalog, "pt").locale, "pt");
    }

    #[test]
    fn test_two_letter_fallback() {
        assert_eq!(resolve("pt_BR").locale, "pt");
        assert_eq!(resolve("de-AT").locale, "de");
        assert_eq!(resolve("SV_se").locale, "sv");
    }

    #[test]
    fn test_default_fallback() {
        assert_eq!(resolve("xx_YY").locale, "en");
        assert_eq!(resolve("").locale, "en");
        assert_eq!(resolve("d").locale, "en");
    }

    #[test]
    fn test_every_locale_is_reachable() {
        for code in available_locales() {
            assert_eq!(resolve(code).locale, code);
        }
        assert_eq!(available_locales().count(), 7);
    }

    #[test]
    fn test_search_status() {
        let en = resolve(DEFAULT_LOCALE);
        assert_eq!(en.search_status(0), Some("(no results)"));
        assert_eq!(en.search_status(3), None);
    }
}
