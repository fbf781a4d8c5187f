//! Compilation of route patterns into anchored regular expressions.
//!
//! A pattern is made of literal text, `{name}` and `{name:regex}` parameters,
//! and `[...]` optional segments that may only appear at the end of the
//! pattern. Literal text is matched verbatim. A pattern without parameters or
//! optional segments is static and is never compiled.

use crate::classes::Classes;
use crate::error::InsertError;

use regex::Regex;
use std::borrow::Cow;
use std::sync::Arc;

/// The compiled form of a route pattern.
#[derive(Clone, Debug)]
pub(crate) struct Pattern {
    /// Parameter names, in the order they appear in the pattern.
    pub params: Vec<Arc<str>>,
    /// The capture group index of each parameter in `params`.
    pub groups: Vec<usize>,
    /// `None` for static patterns.
    pub regex: Option<Regex>,
    /// The literal text before the first parameter or optional segment.
    pub start: String,
    /// Whether the pattern contains optional segments.
    pub optional: bool,
}

impl Pattern {
    /// Returns `true` if the pattern has no parameters or optional segments.
    pub fn is_static(&self) -> bool {
        self.regex.is_none()
    }

    /// The literal first path segment of the pattern, if the static prefix
    /// contains one that is terminated by a `/`.
    ///
    /// `/users/{id}` has the first segment `users`, while `/users{id}` and
    /// `/{id}` have none.
    pub fn first_segment(&self) -> Option<&str> {
        let rest = self.start.strip_prefix('/')?;
        match rest.find('/') {
            Some(0) | None => None,
            Some(end) => Some(&rest[..end]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Param { name: &'a str, regex: Option<&'a str> },
    Open,
    Close,
}

/// Compiles a route pattern, resolving bare parameters through `classes`.
pub(crate) fn compile(route: &str, classes: &Classes) -> Result<Pattern, InsertError> {
    let tokens = tokenize(route)?;

    let start: String = tokens
        .iter()
        .map_while(|token| match token {
            Token::Literal(lit) => Some(*lit),
            _ => None,
        })
        .collect();

    let has_params = tokens.iter().any(|t| matches!(t, Token::Param { .. }));
    let optional = tokens.iter().any(|t| matches!(t, Token::Open | Token::Close));

    if !has_params && !optional {
        return Ok(Pattern {
            params: Vec::new(),
            groups: Vec::new(),
            regex: None,
            start,
            optional,
        });
    }

    if optional {
        check_optional(route, &tokens)?;
    }

    let mut params = Vec::new();
    let mut source = String::with_capacity(route.len() * 2);
    source.push('^');

    for token in &tokens {
        match token {
            Token::Literal(lit) => source.push_str(&regex::escape(lit)),
            Token::Param { name, regex } => {
                let class = regex.unwrap_or_else(|| classes.resolve(name));
                source.push_str(&format!("(?P<{}>{})", group_name(params.len()), class));
                params.push(Arc::<str>::from(*name));
            }
            Token::Open => source.push_str("(?:"),
            Token::Close => source.push_str(")?"),
        }
    }

    source.push('$');

    let regex = Regex::new(&source).map_err(|source| InsertError::InvalidRegex {
        route: route.to_owned(),
        source,
    })?;

    let groups = (0..params.len())
        .map(|i| {
            let name = group_name(i);
            regex
                .capture_names()
                .position(|group| group == Some(name.as_str()))
                .ok_or_else(|| InsertError::InvalidRegex {
                    route: route.to_owned(),
                    source: regex::Error::Syntax(format!("missing capture group for `{name}`")),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pattern {
        params,
        groups,
        regex: Some(regex),
        start,
        optional,
    })
}

// Parameters are captured by generated names so that groups inside user
// supplied regexes do not shift their positions.
fn group_name(i: usize) -> String {
    format!("__p{i}")
}

// Optional segments must close at the very end of the route, each `[` being
// closed by one of the trailing `]`.
fn check_optional(route: &str, tokens: &[Token<'_>]) -> Result<(), InsertError> {
    let trailing = tokens
        .iter()
        .rev()
        .take_while(|t| matches!(t, Token::Close))
        .count();
    let body = &tokens[..tokens.len() - trailing];

    let opened = body.iter().filter(|t| matches!(t, Token::Open)).count();
    let stray = body.iter().any(|t| matches!(t, Token::Close));

    if stray || opened != trailing {
        return Err(InsertError::InvalidOptional {
            route: route.to_owned(),
        });
    }

    Ok(())
}

fn tokenize<'a>(route: &'a str) -> Result<Vec<Token<'a>>, InsertError> {
    let bytes = route.as_bytes();
    let mut tokens = Vec::new();
    let mut literal = 0;
    let mut i = 0;

    let flush = |tokens: &mut Vec<Token<'a>>, from: usize, to: usize| {
        if from < to {
            tokens.push(Token::Literal(&route[from..to]));
        }
    };

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                flush(&mut tokens, literal, i);
                let end = closing_brace(bytes, i).ok_or_else(|| InsertError::UnclosedParam {
                    route: route.to_owned(),
                })?;

                let body = &route[i + 1..end];
                let (name, regex) = match body.split_once(':') {
                    Some((name, regex)) => (name.trim(), Some(regex.trim())),
                    None => (body.trim(), None),
                };

                if name.is_empty() {
                    return Err(InsertError::UnnamedParam {
                        route: route.to_owned(),
                    });
                }

                tokens.push(Token::Param { name, regex });
                i = end + 1;
                literal = i;
            }
            b'[' | b']' => {
                flush(&mut tokens, literal, i);
                tokens.push(if bytes[i] == b'[' {
                    Token::Open
                } else {
                    Token::Close
                });
                i += 1;
                literal = i;
            }
            _ => i += 1,
        }
    }

    flush(&mut tokens, literal, bytes.len());
    Ok(tokens)
}

// Finds the `}` balancing the `{` at `open`, skipping nested quantifier
// braces, character classes and escaped characters of inline regexes.
fn closing_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut class = 0usize;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => class += 1,
            b']' if class > 0 => class -= 1,
            b'{' if class == 0 => depth += 1,
            b'}' if class == 0 => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Moves a `/` that directly precedes an optional segment into it, so that
/// `/blog/[{id}]` becomes `/blog[/{id}]`. The root slash is left alone.
///
/// Used by routers that trim trailing slashes, where the bare form of such a
/// route could otherwise never be requested.
pub(crate) fn fold_optional_slashes(route: &str) -> Cow<'_, str> {
    if !route.contains("/[") {
        return Cow::Borrowed(route);
    }

    let bytes = route.as_bytes();
    let mut out = String::with_capacity(route.len());
    let (mut start, mut i) = (0, 0);

    while i < bytes.len() {
        match bytes[i] {
            b'{' => i = closing_brace(bytes, i).map_or(bytes.len(), |end| end + 1),
            b'/' if i > 0 && bytes.get(i + 1) == Some(&b'[') => {
                out.push_str(&route[start..i]);
                out.push_str("[/");
                i += 2;
                start = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&route[start..]);
    Cow::Owned(out)
}
