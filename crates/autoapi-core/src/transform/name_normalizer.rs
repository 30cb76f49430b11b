use std::collections::HashSet;

/// Separator inserted wherever a run of non-identifier characters was removed.
const SEPARATOR: char = '_';

/// Turn an arbitrary schema name into an identifier.
///
/// Every run of characters outside the identifier alphabet (Unicode
/// letters and digits) collapses into a single `_`, and separators are
/// trimmed from both ends. Pseudo-generic brackets are treated like any
/// other punctuation: `Result«List«Foo»»` becomes `Result_List_Foo`.
pub fn sanitize_model_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !result.is_empty() {
                result.push(SEPARATOR);
            }
            result.push(ch);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, SEPARATOR);
    }

    result
}

/// Derive an api identifier from a path template and method.
///
/// `/myItem/noSupply/{id}` + `post` → `MyItemNoSupplyIdPost`
pub fn derive_api_name(path: &str, method: &str) -> String {
    let words = path
        .split(['/', '.', '-'])
        .map(strip_braces)
        .chain(std::iter::once(method.to_string()));
    sanitize_model_name(&join_capitalized(words))
}

/// Derive the document identifier from the base path and title.
///
/// `/api/v1/scm/` + `supplier` → `SupplierScmV1Api`
pub fn derive_document_name(base_path: &str, title: &str) -> String {
    let stripped = strip_braces(base_path);
    let segments: Vec<&str> = stripped.split(['/', '.']).collect();
    let words = std::iter::once(title.to_string())
        .chain(segments.into_iter().rev().map(String::from));
    sanitize_model_name(&join_capitalized(words))
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strip_braces(segment: &str) -> String {
    segment.replace(['{', '}'], "")
}

fn join_capitalized(words: impl Iterator<Item = String>) -> String {
    words
        .filter(|w| !w.is_empty())
        .map(|w| capitalize(&w))
        .collect()
}

/// Hands out unique identifiers. The first claimant of a name keeps it,
/// later claimants receive `_2`, `_3`, … suffixes.
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
    fold_case: bool,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry where the given names are never handed out unsuffixed.
    pub fn with_reserved<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: reserved.into_iter().map(String::from).collect(),
            fold_case: false,
        }
    }

    /// A registry for names that end up as file or directory names.
    ///
    /// Names differing only in letter case collide, since they map to the
    /// same entry on case-insensitive filesystems.
    pub fn for_paths<'a>(reserved: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: reserved.into_iter().map(str::to_lowercase).collect(),
            fold_case: true,
        }
    }

    pub fn claim(&mut self, name: &str) -> String {
        if self.try_insert(name) {
            return name.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}{SEPARATOR}{n}");
            if self.try_insert(&candidate) {
                log::warn!("identifier {name} is already taken, using {candidate}");
                return candidate;
            }
            n += 1;
        }
    }

    fn try_insert(&mut self, name: &str) -> bool {
        let key = if self.fold_case {
            name.to_lowercase()
        } else {
            name.to_string()
        };
        self.taken.insert(key)
    }
}
