use std::{borrow::Cow, fs, path::Path, sync::Arc};

use hocon::{Hocon, HoconLoader};

use super::check_file_accessibility;
use crate::{
    error::{CoerceError, ErrorKind, LoadError},
    value::{Map, Pointer, Value, ValueOrigin, WithOrigin},
};

/// Parsed HOCON document with substitutions resolved.
///
/// The tree is read-only; loading a config borrows it, so the same tree can be used to load
/// multiple configs.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: WithOrigin,
}

impl ConfigTree {
    /// Parses HOCON text.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Syntax`] if the text is not valid HOCON.
    pub fn parse_str(text: &str) -> Result<Self, LoadError> {
        Self::parse(text, Arc::new(ValueOrigin::Inline))
    }

    /// Reads and parses a HOCON file.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::FileAccess`] if the file is missing, is a directory or is not readable by its owner,
    /// and [`ErrorKind::Syntax`] if its contents is not valid HOCON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file_err = |source| {
            LoadError::from(ErrorKind::FileAccess {
                file: path.to_owned(),
                source,
            })
        };
        check_file_accessibility(path).map_err(file_err)?;
        let text = fs::read_to_string(path).map_err(file_err)?;

        let origin = Arc::new(ValueOrigin::File {
            name: path.display().to_string(),
        });
        let tree = Self::parse(&text, origin)?;
        tracing::debug!(path = %path.display(), "parsed HOCON file");
        Ok(tree)
    }

    fn parse(text: &str, origin: Arc<ValueOrigin>) -> Result<Self, LoadError> {
        let syntax_err = |err| LoadError::from(ErrorKind::Syntax(err)).with_origin(&origin);
        let text = quote_lossy_integers(text);
        let document = HoconLoader::new()
            .strict()
            .load_str(&text)
            .and_then(|loader| loader.hocon())
            .map_err(syntax_err)?;
        let root = Self::map_value(document, &origin, String::new()).map_err(syntax_err)?;
        Ok(Self { root })
    }

    fn map_value(
        value: Hocon,
        source: &Arc<ValueOrigin>,
        path: String,
    ) -> Result<WithOrigin, hocon::Error> {
        let inner = match value {
            Hocon::Null => Value::Null,
            Hocon::Boolean(value) => Value::Bool(value),
            Hocon::Integer(value) => Value::Number(value.into()),
            Hocon::Real(value) => serde_json::Number::from_f64(value)
                .map_or_else(|| Value::String(value.to_string()), Value::Number),
            // A bare `null` followed by whitespace is parsed as an unquoted string.
            Hocon::String(value) if value == "null" => Value::Null,
            Hocon::String(value) => Value::String(value),
            Hocon::Array(values) => Value::Array(
                values
                    .into_iter()
                    .enumerate()
                    .map(|(i, value)| {
                        let child_path = Pointer(&path).join(&i.to_string());
                        Self::map_value(value, source, child_path)
                    })
                    .collect::<Result<_, _>>()?,
            ),
            Hocon::Hash(values) => Value::Object(
                values
                    .into_iter()
                    .map(|(key, value)| {
                        let child_path = Pointer(&path).join(&key);
                        Ok((key, Self::map_value(value, source, child_path)?))
                    })
                    .collect::<Result<Map, hocon::Error>>()?,
            ),
            Hocon::BadValue(err) => return Err(err),
        };

        let origin = Arc::new(ValueOrigin::Path {
            source: source.clone(),
            path,
        });
        Ok(WithOrigin::new(inner, origin))
    }

    /// Returns the root object of the tree.
    pub fn root(&self) -> &WithOrigin {
        &self.root
    }

    /// Checks whether the tree has a non-null value at the specified dotted path.
    pub fn has_path(&self, path: &str) -> bool {
        self.get_value(path).is_some()
    }

    /// Gets a value at the specified dotted path. HOCON `null`s are treated as absent values.
    pub fn get_value(&self, path: &str) -> Option<&WithOrigin> {
        self.root
            .get(Pointer(path))
            .filter(|value| !matches!(value.inner, Value::Null))
    }

    /// Gets a value at the specified path rendered as a string, or `default` if the value is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is an array or an object.
    pub fn get_string(&self, path: &str, default: &str) -> Result<String, CoerceError> {
        let Some(value) = self.get_value(path) else {
            return Ok(default.to_owned());
        };
        value.inner.as_text().ok_or(CoerceError::UnexpectedType {
            expected: "string",
            actual: value.inner.type_name(),
        })
    }

    /// Gets an array at the specified path with each item rendered as a string. An absent value
    /// is treated as an empty array.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an array, or if any of its items is not a scalar.
    pub fn get_string_list(&self, path: &str) -> Result<Vec<String>, CoerceError> {
        let Some(value) = self.get_value(path) else {
            return Ok(vec![]);
        };
        let Value::Array(items) = &value.inner else {
            return Err(CoerceError::UnexpectedType {
                expected: "array",
                actual: value.inner.type_name(),
            });
        };
        items
            .iter()
            .map(|item| {
                item.inner.as_text().ok_or(CoerceError::UnexpectedType {
                    expected: "scalar",
                    actual: item.inner.type_name(),
                })
            })
            .collect()
    }
}

/// Quotes bare integer literals that `hocon` cannot represent exactly: ones that do not fit
/// into `i64` (parsed as lossy `f64`), and ones with a leading zero (octal for unsigned fields).
/// As strings, they are coerced from the exact text.
fn quote_lossy_integers(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut output = String::new();
    let mut copied = 0;
    let mut pos = 0;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        if rest.starts_with(b"\"\"\"") {
            pos += 3 + rest[3..]
                .windows(3)
                .position(|window| window == b"\"\"\"")
                .map_or(rest.len() - 3, |i| i + 3);
        } else if rest[0] == b'"' {
            pos += 1 + quoted_len(&rest[1..]);
        } else if rest[0] == b'#' || rest.starts_with(b"//") || rest.starts_with(b"${") {
            let terminator = if rest[0] == b'$' { b'}' } else { b'\n' };
            pos += rest
                .iter()
                .position(|&ch| ch == terminator)
                .unwrap_or(rest.len());
        } else if starts_integer(bytes, pos) {
            let len = 1 + rest[1..].iter().take_while(|ch| ch.is_ascii_digit()).count();
            let literal = &text[pos..pos + len];
            let digits = literal.trim_start_matches('-');
            let lossy = literal.parse::<i64>().is_err()
                || (digits.len() > 1 && digits.starts_with('0'));
            if ends_token(&rest[len..]) && lossy {
                output.push_str(&text[copied..pos]);
                output.push('"');
                output.push_str(literal);
                output.push('"');
                copied = pos + len;
            }
            pos += len;
        } else {
            pos += 1;
        }
    }

    if copied == 0 {
        Cow::Borrowed(text)
    } else {
        output.push_str(&text[copied..]);
        Cow::Owned(output)
    }
}

/// Length of a single-line string body including the closing quote.
fn quoted_len(rest: &[u8]) -> usize {
    let mut pos = 0;
    while pos < rest.len() {
        match rest[pos] {
            b'\\' => pos += 2,
            b'"' | b'\n' => return pos + 1,
            _ => pos += 1,
        }
    }
    rest.len()
}

fn starts_integer(bytes: &[u8], pos: usize) -> bool {
    let at_boundary = pos == 0 || b" \t\r\n:=[{,".contains(&bytes[pos - 1]);
    let starts_digits = match bytes[pos] {
        b'-' => bytes.get(pos + 1).is_some_and(u8::is_ascii_digit),
        ch => ch.is_ascii_digit(),
    };
    at_boundary && starts_digits
}

fn ends_token(rest: &[u8]) -> bool {
    match rest.first() {
        None => true,
        Some(ch) => b" \t\r\n,}]#".contains(ch) || rest.starts_with(b"//"),
    }
}
