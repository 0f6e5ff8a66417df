//! Path model for locating values inside a document
//!
//! A [`Path`] is an ordered list of [`PathElement`]s. Each element is either an
//! object property name or an array index. Paths are immutable: every builder
//! method returns a new path.
//!
//! ## Rendering
//!
//! | Elements | Rendered |
//! |----------|----------|
//! | `array`, `1`, `property` | `array[1].property` |
//! | `@foo`, `bar` | `['@foo'].bar` |
//! | `foo`, `""` | `foo['']` |
//! | `фу`, `baz` | `фу.baz` |
//!
//! Property names made only of identifier characters (letters, digits, `$`,
//! `_`, not starting with a digit) render bare. Everything else uses the
//! bracket form with `\` and `'` escaped.
//!
//! ## Legacy pointer syntax
//!
//! A single string starting with `/` is read as a JSON Pointer (RFC 6901) and
//! translated into the same element sequence. See [`from_pointer`].

use crate::error::PathError;
use std::fmt;

/// One step of a [`Path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Object property name
    Property(String),
    /// Array index
    Index(usize),
}

impl PathElement {
    /// Returns true for property elements
    pub fn is_property(&self) -> bool {
        matches!(self, PathElement::Property(_))
    }

    /// Returns true for index elements
    pub fn is_index(&self) -> bool {
        matches!(self, PathElement::Index(_))
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Property(name) => write!(f, "property \"{}\"", name),
            PathElement::Index(index) => write!(f, "index {}", index),
        }
    }
}

impl From<&str> for PathElement {
    fn from(name: &str) -> Self {
        PathElement::Property(name.to_string())
    }
}

impl From<String> for PathElement {
    fn from(name: String) -> Self {
        PathElement::Property(name)
    }
}

impl From<&String> for PathElement {
    fn from(name: &String) -> Self {
        PathElement::Property(name.clone())
    }
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        PathElement::Index(index)
    }
}

/// Location of a value inside a document
///
/// The empty path points at the document root.
///
/// # Examples
///
/// ```
/// use docassert_core::Path;
///
/// let path = Path::root().with_property("array").with_index(1).with_property("property");
/// assert_eq!(path.to_string(), "array[1].property");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// The empty path (document root)
    pub fn root() -> Self {
        Path { elements: Vec::new() }
    }

    /// Build a path from elements
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
        Path { elements }
    }

    /// New path with a property name appended
    pub fn with_property(&self, name: impl Into<String>) -> Self {
        self.with(PathElement::Property(name.into()))
    }

    /// New path with an array index appended
    pub fn with_index(&self, index: usize) -> Self {
        self.with(PathElement::Index(index))
    }

    /// New path with one element appended
    pub fn with(&self, element: PathElement) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend(self.elements.iter().cloned());
        elements.push(element);
        Path { elements }
    }

    /// Concatenate two paths
    ///
    /// Used when a sub-assertion is rooted at a nested location: the nested
    /// context keeps its own relative paths and joins them onto its origin.
    pub fn join(&self, other: &Path) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + other.elements.len());
        elements.extend(self.elements.iter().cloned());
        elements.extend(other.elements.iter().cloned());
        Path { elements }
    }

    /// Path elements in order
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The path made of the first `len` elements
    pub fn prefix(&self, len: usize) -> Self {
        Path {
            elements: self.elements[..len.min(self.elements.len())].to_vec(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            match element {
                PathElement::Index(index) => write!(f, "[{}]", index)?,
                PathElement::Property(name) if is_identifier(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathElement::Property(name) => write!(f, "['{}']", escape_property(name))?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => false,
        Some(first) if first.is_ascii_digit() || !is_identifier_char(first) => false,
        Some(_) => chars.all(is_identifier_char),
    }
}

fn is_identifier_char(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphanumeric()
}

fn escape_property(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Translate a JSON Pointer (RFC 6901) into a [`Path`]
///
/// Tokens made only of ASCII digits without a leading zero become indices;
/// every other token is a property name. `~1` decodes to `/` and `~0` to `~`.
///
/// # Examples
///
/// ```
/// use docassert_core::path::from_pointer;
///
/// let path = from_pointer("/complexNode/items/1/key").unwrap();
/// assert_eq!(path.to_string(), "complexNode.items[1].key");
/// ```
pub fn from_pointer(pointer: &str) -> Result<Path, PathError> {
    if pointer.is_empty() {
        return Ok(Path::root());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| PathError::MissingLeadingSlash(pointer.to_string()))?;

    rest.split('/')
        .map(|token| {
            let token = unescape_token(token, pointer)?;
            Ok(match parse_index(&token) {
                Some(index) => PathElement::Index(index),
                None => PathElement::Property(token),
            })
        })
        .collect()
}

/// True when `value` should be read as a legacy pointer
pub fn is_pointer(value: &str) -> bool {
    value.starts_with('/')
}

fn unescape_token(token: &str, pointer: &str) -> Result<String, PathError> {
    let mut result = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('1') => result.push('/'),
            Some('0') => result.push('~'),
            _ => return Err(PathError::InvalidEscape(pointer.to_string())),
        }
    }
    Ok(result)
}

fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

/// Conversion of call arguments into a [`Path`]
///
/// A single string starting with `/` goes through the legacy pointer
/// translation; any other single string is one property name.
pub trait IntoPath {
    /// Build the path
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        if is_pointer(self) {
            from_pointer(self)
        } else {
            Ok(Path::root().with_property(self))
        }
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, PathError> {
        self.as_str().into_path()
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        self.as_str().into_path()
    }
}

impl IntoPath for usize {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::root().with_index(self))
    }
}

impl IntoPath for PathElement {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_elements(vec![self]))
    }
}

impl IntoPath for Vec<PathElement> {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_elements(self))
    }
}

impl IntoPath for &[PathElement] {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(Path::from_elements(self.to_vec()))
    }
}

impl<E: Into<PathElement>, const N: usize> IntoPath for [E; N] {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_into_path_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<PathElement>),+> IntoPath for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_path(self) -> Result<Path, PathError> {
                let ($($name,)+) = self;
                Ok(Path::from_elements(vec![$($name.into()),+]))
            }
        }
    };
}

impl_into_path_for_tuple!(A);
impl_into_path_for_tuple!(A, B);
impl_into_path_for_tuple!(A, B, C);
impl_into_path_for_tuple!(A, B, C, D);
impl_into_path_for_tuple!(A, B, C, D, E);
impl_into_path_for_tuple!(A, B, C, D, E, F);

/// Build a [`Path`] from a mixed list of property names and indices
///
/// ```
/// use docassert_core::path;
///
/// let path = path!["items", 0usize, "name"];
/// assert_eq!(path.to_string(), "items[0].name");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::Path::from_elements(vec![$($crate::PathElement::from($element)),+])
    };
}
