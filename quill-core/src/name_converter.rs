use std::{borrow::Cow, fmt::Debug, sync::Arc};

/// Pure string transform used to derive table and column names from type and property names.
pub trait NameConverter: Send + Sync + Debug {
    fn convert(&self, name: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LowerCaseNameConverter;

impl NameConverter for LowerCaseNameConverter {
    fn convert(&self, name: &str) -> String {
        name.to_lowercase()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UpperCaseNameConverter;

impl NameConverter for UpperCaseNameConverter {
    fn convert(&self, name: &str) -> String {
        name.to_uppercase()
    }
}

/// Lowercases the leading uppercase run.
///
/// With `lower_initial_acronym` an initial acronym is lowered except for its last letter, which
/// starts the next word: `SQLProperty` becomes `sqlProperty`. Without it only the very first
/// character is lowered: `sQLProperty`.
#[derive(Debug, Clone, Copy)]
pub struct CamelCaseNameConverter {
    pub lower_initial_acronym: bool,
}

impl CamelCaseNameConverter {
    pub const fn new(lower_initial_acronym: bool) -> Self {
        Self {
            lower_initial_acronym,
        }
    }
}

impl Default for CamelCaseNameConverter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NameConverter for CamelCaseNameConverter {
    fn convert(&self, name: &str) -> String {
        let chars: Vec<char> = name.chars().collect();
        let run = chars.iter().take_while(|c| c.is_uppercase()).count();
        if run == 0 {
            return name.to_string();
        }
        let lowered = if run > 1 && self.lower_initial_acronym {
            run - 1
        } else {
            1
        };
        let mut result = String::with_capacity(name.len());
        result.extend(chars[..lowered].iter().flat_map(|c| c.to_lowercase()));
        result.extend(&chars[lowered..]);
        result
    }
}

/// Splits words with a separator, keeping acronyms together.
///
/// `SQLPropertyNameANDAcronymsLAST` becomes `SQL_Property_Name_AND_Acronyms_LAST`. An uppercase
/// run that reaches the end of the input is only emitted when it did not also start it.
#[derive(Debug, Clone)]
pub struct SnakeCaseNameConverter {
    pub separator: Cow<'static, str>,
}

impl SnakeCaseNameConverter {
    pub fn new(separator: impl Into<Cow<'static, str>>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Default for SnakeCaseNameConverter {
    fn default() -> Self {
        Self::new("_")
    }
}

impl NameConverter for SnakeCaseNameConverter {
    fn convert(&self, name: &str) -> String {
        let chars: Vec<char> = name.chars().collect();
        let mut result = String::with_capacity(name.len() + 8);
        let mut first_upper: Option<usize> = None;
        for (i, &c) in chars.iter().enumerate() {
            if c.is_uppercase() {
                if first_upper.is_none() {
                    first_upper = Some(i);
                    if i > 0 {
                        result.push_str(&self.separator);
                    }
                }
                continue;
            }
            if let Some(start) = first_upper.take() {
                let last = i - 1;
                if last > start {
                    result.extend(&chars[start..last]);
                    result.push_str(&self.separator);
                }
                result.push(chars[last]);
            }
            result.push(c);
        }
        if let Some(start) = first_upper {
            if start > 0 {
                result.extend(&chars[start..]);
            }
        }
        result
    }
}

/// English pluralization, good enough for table names.
#[derive(Debug, Default, Clone, Copy)]
pub struct PluralNameConverter;

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("belief", "beliefs"),
];

fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    let Some(start) = text.len().checked_sub(suffix.len()) else {
        return false;
    };
    text.is_char_boundary(start) && text[start..].eq_ignore_ascii_case(suffix)
}

impl PluralNameConverter {
    pub fn pluralize(text: &str) -> String {
        let lower = text.to_lowercase();
        if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(single, _)| *single == lower) {
            return plural.to_string();
        }
        let ends_with = |suffix| ends_with_ignore_case(text, suffix);
        if ends_with("y") && !["ay", "ey", "iy", "oy", "uy"].into_iter().any(ends_with) {
            format!("{}ies", &text[..text.len() - 1])
        } else if ends_with("us") || ends_with("ss") {
            format!("{}es", text)
        } else if ends_with("s") {
            text.to_string()
        } else if ends_with("x") || ends_with("ch") || ends_with("sh") {
            format!("{}es", text)
        } else if ends_with("f") && text.len() > 1 {
            format!("{}ves", &text[..text.len() - 1])
        } else if ends_with("fe") && text.len() > 2 {
            format!("{}ves", &text[..text.len() - 2])
        } else {
            format!("{}s", text)
        }
    }
}

impl NameConverter for PluralNameConverter {
    fn convert(&self, name: &str) -> String {
        Self::pluralize(name)
    }
}

/// Ordered list of converters, applied left to right.
#[derive(Debug, Default, Clone)]
pub struct NameConverterChain {
    converters: Vec<Arc<dyn NameConverter>>,
}

impl NameConverterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, converter: impl NameConverter + 'static) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }
}

impl NameConverter for NameConverterChain {
    fn convert(&self, name: &str) -> String {
        self.converters
            .iter()
            .fold(name.to_string(), |name, converter| converter.convert(&name))
    }
}

/// Converter chains a writer applies to type names (tables) and property names (columns).
#[derive(Debug, Clone)]
pub struct Naming {
    pub table: NameConverterChain,
    pub column: NameConverterChain,
}

impl Naming {
    pub fn new(table: NameConverterChain, column: NameConverterChain) -> Self {
        Self { table, column }
    }
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            table: NameConverterChain::new().then(PluralNameConverter),
            column: NameConverterChain::new(),
        }
    }
}
