//! Parser for query text.
//!
//! A query is a sequence of clauses, each a [`Keyword`] followed by its
//! value. Clauses are ANDed together into one [`ObjectFilter`]; when a
//! keyword repeats, the later clause replaces the earlier one. The public
//! entry point is [`parse_query`].
//!
//! Structural problems (unknown keyword, missing value, missing `to`) stop
//! the parse. Values that fail to convert are collected so every bad value
//! in the query is reported together.

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::repeat,
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use astrodb_core::filter::ObjectFilter;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError, Result},
    keyword::Keyword,
    lexer::{self, Token},
    span::Span,
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// What the parser expected at the failure point
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) where the failing clause starts
    StartOffset(usize),
    /// The clause's first two words are not a keyword
    UnknownKeyword,
}

type Input<'t> = TokenSlice<'t, Token>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// One clause: the keyword and the tokens of its values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Clause<'t> {
    pub keyword: Keyword,
    /// Covers the two keyword words.
    pub span: Span,
    pub values: Vec<&'t Token>,
}

impl Clause<'_> {
    /// Span covering every value token.
    fn values_span(&self) -> Span {
        covering(self.values.iter().copied()).unwrap_or(self.span)
    }
}

/// Runs `f` committed to the clause that began at `clause_start`: any
/// failure becomes a cut error remembering where the clause started.
fn committed<'t, O, F>(input: &mut Input<'t>, clause_start: usize, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'t>) -> IResult<O>,
{
    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(clause_start));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

fn unknown_keyword(clause_start: usize) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::UnknownKeyword);
    e.push(Context::StartOffset(clause_start));
    ErrMode::Cut(e)
}

fn word<'t>(input: &mut Input<'t>) -> IResult<&'t Token> {
    any.parse_next(input)
}

/// The literal `to` between the ends of a range.
fn range_to<'t>(input: &mut Input<'t>) -> IResult<&'t Token> {
    any.verify(|token: &Token| token.text.eq_ignore_ascii_case("to"))
        .context(Context::Label("`to`"))
        .parse_next(input)
}

fn clause<'t>(input: &mut Input<'t>) -> IResult<Clause<'t>> {
    let start = input.eof_offset();

    let first = word.context(Context::Label("a keyword")).parse_next(input)?;
    let second = committed(input, start, |input| {
        word.context(Context::Label("the rest of the keyword"))
            .parse_next(input)
    })?;
    let Some(keyword) = Keyword::lookup(&first.text, &second.text) else {
        return Err(unknown_keyword(start));
    };

    let mut values = vec![committed(input, start, |input| {
        word.context(Context::Label("a value")).parse_next(input)
    })?];
    if keyword.is_range() {
        committed(input, start, |input| range_to.parse_next(input))?;
        values.push(committed(input, start, |input| {
            word.context(Context::Label("the end of the range"))
                .parse_next(input)
        })?);
    }

    Ok(Clause {
        keyword,
        span: first.span.union(second.span),
        values,
    })
}

fn covering<'a>(mut tokens: impl DoubleEndedIterator<Item = &'a Token>) -> Option<Span> {
    let first = tokens.next()?;
    let last = tokens.next_back().unwrap_or(first);
    Some(first.span.union(last.span))
}

/// Convert a winnow error into a diagnostic.
///
/// `current_remaining` is the token slice's `eof_offset()` after the
/// failure, which points at the offending token or at the end of input.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[Token],
    current_remaining: usize,
) -> Diagnostic {
    let context_error = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    let end_offset = tokens.len() - current_remaining;
    let start_offset = context_error
        .context()
        .find_map(|ctx| match ctx {
            Context::StartOffset(n) => Some(tokens.len() - n),
            _ => None,
        })
        .unwrap_or(end_offset);
    let clause_tokens = &tokens[start_offset..end_offset];
    let clause_span = covering(clause_tokens.iter());

    if context_error
        .context()
        .any(|ctx| matches!(ctx, Context::UnknownKeyword))
    {
        let words: Vec<&str> = clause_tokens.iter().map(|t| t.text.as_str()).collect();
        return Diagnostic::error(format!("unknown keyword `{}`", words.join(" ")))
            .with_code(ErrorCode::E102)
            .with_label(clause_span.unwrap_or_default(), "not a keyword")
            .with_help("run with --keywords to list every keyword");
    }

    let expected = context_error
        .context()
        .find_map(|ctx| match ctx {
            Context::Label(label) => Some(*label),
            _ => None,
        })
        .unwrap_or("more input");
    let example = match clause_tokens {
        [first, second, ..] => Keyword::lookup(&first.text, &second.text),
        _ => None,
    }
    .map(|keyword| format!("example: `{}`", keyword.example()));

    match tokens.get(end_offset) {
        None => {
            let span = clause_span
                .or_else(|| tokens.last().map(|t| t.span))
                .unwrap_or_default();
            let diag = Diagnostic::error(format!("incomplete clause: expected {expected}"))
                .with_code(ErrorCode::E101)
                .with_label(span, "query ends inside this clause");
            match example {
                Some(example) => diag.with_help(example),
                None => diag.with_help("every clause is a keyword followed by a value"),
            }
        }
        Some(found) => {
            let mut diag = Diagnostic::error(format!(
                "unexpected token: expected {expected}, found `{}`",
                found.text
            ))
            .with_code(ErrorCode::E100)
            .with_label(found.span, format!("expected {expected}"));
            if let Some(span) = clause_span {
                diag = diag.with_secondary_label(span, "in this clause");
            }
            match example {
                Some(example) => diag.with_help(example),
                None => diag,
            }
        }
    }
}

/// Split tokens into clauses.
pub(crate) fn build_clauses(tokens: &[Token]) -> Result<Vec<Clause<'_>>> {
    let mut token_slice = TokenSlice::new(tokens);

    let parsed: IResult<Vec<Clause<'_>>> = repeat(0.., clause).parse_next(&mut token_slice);
    parsed.map_err(|e| {
        let current_remaining = token_slice.eof_offset();
        convert_error(e, tokens, current_remaining)
    })
}

/// Parse query text into a filter.
///
/// An empty query yields the empty filter, which matches every object.
///
/// # Errors
///
/// Returns every diagnostic found: the first structural error, or all the
/// clause values that could not be converted.
///
/// # Example
///
/// ```
/// # use astrodb_parser::parse_query;
///
/// let filter = parse_query("type in gal mag <= 10").unwrap();
/// assert_eq!(filter.magnitude_at_most, Some(10.0));
/// ```
pub fn parse_query(source: &str) -> std::result::Result<ObjectFilter, ParseError> {
    let tokens = lexer::tokenize(source)?;
    let clauses = build_clauses(&tokens)?;

    let mut diagnostics = DiagnosticCollector::new();
    let mut filter = ObjectFilter::default();
    for clause in &clauses {
        let values: Vec<&str> = clause.values.iter().map(|t| t.text.as_str()).collect();
        if let Err(err) = clause.keyword.apply(&mut filter, &values) {
            diagnostics.emit(
                Diagnostic::error(format!("invalid value for `{}`: {err}", clause.keyword))
                    .with_code(ErrorCode::E103)
                    .with_label(clause.values_span(), "invalid value")
                    .with_secondary_label(clause.span, "keyword")
                    .with_help(format!("example: `{}`", clause.keyword.example())),
            );
        }
    }
    diagnostics.finish()?;

    debug!(clauses = clauses.len(); "Parsed query");
    trace!(filter:?; "Built filter");
    Ok(filter)
}
