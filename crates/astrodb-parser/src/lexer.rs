//! Lexer for query text.
//!
//! A query is a run of whitespace-separated words. Double quotes toggle
//! quoting inside a word, so whitespace between quotes does not split it and
//! the quote characters themselves are dropped: `"M 13"` is the single token
//! `M 13`, and `"Best 500","Urban 50"` is `Best 500,Urban 50`. A quote left
//! open runs to the end of the query and is reported as a warning.
//!
//! The public entry point is [`tokenize`].

use winnow::{
    Parser as _,
    combinator::{alt, opt, preceded, repeat},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::take_while,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// A query word with the span it covers, quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// Part of a word: a quoted run or a bare run.
struct Segment<'a> {
    text: &'a str,
    /// Offset of the opening quote when the quote is never closed.
    unterminated: Option<usize>,
}

/// A word being assembled from its segments.
#[derive(Clone)]
struct Word {
    text: String,
    unterminated: Option<usize>,
}

fn quoted<'a>(input: &mut Input<'a>) -> IResult<Segment<'a>> {
    let start = input.current_token_start();
    preceded('"', (take_while(0.., |c: char| c != '"'), opt('"')))
        .map(|(text, close): (&'a str, Option<char>)| Segment {
            text,
            unterminated: close.is_none().then_some(start),
        })
        .parse_next(input)
}

fn bare<'a>(input: &mut Input<'a>) -> IResult<Segment<'a>> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '"')
        .map(|text| Segment {
            text,
            unterminated: None,
        })
        .parse_next(input)
}

fn word(input: &mut Input<'_>) -> IResult<Word> {
    repeat(1.., alt((quoted, bare)))
        .fold(
            || Word {
                text: String::new(),
                unterminated: None,
            },
            |mut word, segment| {
                word.text.push_str(segment.text);
                word.unterminated = word.unterminated.or(segment.unterminated);
                word
            },
        )
        .parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

/// A word with its span, or `None` for a whitespace run.
fn positioned_word(input: &mut Input<'_>) -> IResult<Option<(Word, Span)>> {
    let start_pos = input.current_token_start();

    let word = alt((whitespace.value(None), word.map(Some))).parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(word.map(|word| (word, Span::new(start_pos..end_pos))))
}

/// Lexer that accumulates tokens and diagnostics.
struct Lexer {
    tokens: Vec<Token>,
    diagnostics: DiagnosticCollector,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn tokenize(&mut self, mut input: Input<'_>) {
        while !input.is_empty() {
            match positioned_word(&mut input) {
                Ok(Some((word, span))) => {
                    if let Some(quote) = word.unterminated {
                        self.diagnostics.emit(
                            Diagnostic::warning("unterminated quote")
                                .with_code(ErrorCode::E001)
                                .with_label(
                                    Span::new(quote..span.end()),
                                    "quoted up to the end of the query",
                                )
                                .with_help("add a closing `\"`"),
                        );
                    }
                    self.tokens.push(Token::new(word.text, span));
                }
                Ok(None) => {}
                Err(e) => {
                    let error_pos = input.current_token_start();
                    self.diagnostics.emit(Self::convert_err_mode(e, error_pos));
                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    fn finish(self) -> Result<Vec<Token>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    fn convert_err_mode(_err: ErrMode<ContextError>, error_pos: usize) -> Diagnostic {
        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Split query text into tokens.
///
/// Fails only on errors; an unterminated quote is a warning and still
/// yields its token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    lexer.finish()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Words without quotes or whitespace.
    fn bare_word_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9:.,<>=+-]{1,12}"
    }

    /// Phrases that only stay together when quoted.
    fn phrase_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9]{1,8}( [a-zA-Z0-9]{1,8}){0,3}"
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_bare_words_round_trip(words: &[String]) -> Result<(), TestCaseError> {
        let source = words.join("  ");
        let tokens = tokenize(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(texts, words.iter().map(String::as_str).collect::<Vec<_>>());
        for token in &tokens {
            prop_assert_eq!(&source[token.span.start()..token.span.end()], token.text.as_str());
        }
        Ok(())
    }

    fn check_quoted_phrase_is_one_token(phrase: &str) -> Result<(), TestCaseError> {
        let source = format!("name = \"{phrase}\"");
        let tokens = tokenize(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(tokens.len(), 3);
        prop_assert_eq!(tokens[2].text.as_str(), phrase);
        prop_assert_eq!(tokens[2].span.end(), source.len());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn bare_words_round_trip(words in prop::collection::vec(bare_word_strategy(), 0..8)) {
            check_bare_words_round_trip(&words)?;
        }

        #[test]
        fn quoted_phrase_is_one_token(phrase in phrase_strategy()) {
            check_quoted_phrase_is_one_token(&phrase)?;
        }
    }
}
