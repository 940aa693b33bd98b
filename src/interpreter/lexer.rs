use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Escape character placed before delimiters that pass through unhidden.
const ESCAPE: char = '\\';

/// A substring matched against some string, and where it starts.
///
/// `index` is a byte offset into the string the match was made against, which
/// for matches found on hidden text is translated back with
/// [`HiddenInput::detokenize_index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The matched text.
    pub value: String,
    /// Byte offset of the first matched character.
    pub index: usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(value: impl Into<String>, index: usize) -> Self {
        Self { value: value.into(),
               index }
    }

    /// Length of the matched text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether the matched text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Byte offset just past the matched text.
    #[must_use]
    pub fn end(&self) -> usize {
        self.index + self.value.len()
    }
}

/// The lexemes the group scanner distinguishes. Everything that is not a
/// delimiter or the escape character is plain text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("\\")]
    Escape,
    #[regex(r"[^()\[\]\\]+")]
    Text,
}

/// Which delimiter pairs get hidden behind placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Only `( ... )` spans are hidden; square brackets are escaped.
    Parentheses,
    /// Both `( ... )` and `[ ... ]` spans are hidden.
    Brackets,
}

impl Grouping {
    /// The closing delimiter tracked for `lexeme`, if it opens a group.
    const fn closer_for(self, lexeme: Lexeme) -> Option<Lexeme> {
        match (self, lexeme) {
            (_, Lexeme::OpenParen) => Some(Lexeme::CloseParen),
            (Self::Brackets, Lexeme::OpenBracket) => Some(Lexeme::CloseBracket),
            _ => None,
        }
    }

    /// Whether `lexeme` closes a tracked group.
    const fn is_closer(self, lexeme: Lexeme) -> bool {
        matches!((self, lexeme),
                 (_, Lexeme::CloseParen) | (Self::Brackets, Lexeme::CloseBracket))
    }
}

/// An input string with its top-level groups replaced by `[n]` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenInput {
    /// The text with placeholders and escapes.
    pub text:   String,
    /// The hidden spans, in order of discovery. Placeholder `[n]` stands for
    /// `tokens[n]`.
    pub tokens: Vec<Token>,
}

/// Hides every top-level group of `input` behind an indexed placeholder.
///
/// Characters outside groups pass through unchanged, except that `[`, `]` and
/// `\` which are not tracked delimiters are escaped with a backslash so they
/// cannot be mistaken for placeholders.
///
/// # Errors
/// Returns `UnbalancedParentheses` if a closing delimiter has no open match,
/// closes a group of the other kind, or a group is still open at the end of
/// the input.
///
/// # Example
/// ```
/// use exprule::interpreter::lexer::{Grouping, tokenize};
///
/// let hidden = tokenize("2*(1+3)-f(4)", Grouping::Brackets).unwrap();
///
/// assert_eq!(hidden.text, "2*[0]-f[1]");
/// assert_eq!(hidden.tokens[0].value, "(1+3)");
/// assert_eq!(hidden.tokens[0].index, 2);
/// assert!(tokenize("(1+2", Grouping::Brackets).is_err());
/// ```
pub fn tokenize(input: &str, grouping: Grouping) -> ParseResult<HiddenInput> {
    let unbalanced = || ParseError::UnbalancedParentheses { input: input.to_string() };

    let mut text = String::with_capacity(input.len());
    let mut tokens = Vec::new();
    let mut open = Vec::new();
    let mut start = 0;

    for (lexeme, span) in Lexeme::lexer(input).spanned() {
        let lexeme = lexeme.unwrap_or(Lexeme::Text);
        let slice = &input[span.clone()];

        if let Some(closer) = grouping.closer_for(lexeme) {
            if open.is_empty() {
                start = span.start;
            }
            open.push(closer);
        } else if grouping.is_closer(lexeme) {
            if open.pop() != Some(lexeme) {
                return Err(unbalanced());
            }
            if open.is_empty() {
                text.push_str(&format!("[{}]", tokens.len()));
                tokens.push(Token::new(&input[start..span.end], start));
            }
        } else if !open.is_empty() {
            // Inside a hidden span; the span is copied whole when it closes.
        } else if lexeme == Lexeme::Text {
            text.push_str(slice);
        } else {
            text.push(ESCAPE);
            text.push_str(slice);
        }
    }

    if !open.is_empty() {
        return Err(unbalanced());
    }

    Ok(HiddenInput { text, tokens })
}

impl HiddenInput {
    /// Maps a byte offset in the hidden text back to the original input.
    ///
    /// Every escape before `index` shrinks the offset by one; every
    /// placeholder grows it from the placeholder's length to the length of the
    /// span it stands for.
    ///
    /// # Example
    /// ```
    /// use exprule::interpreter::lexer::{Grouping, tokenize};
    ///
    /// let input = "(1+2)*(3)";
    /// let hidden = tokenize(input, Grouping::Parentheses).unwrap();
    /// let star = hidden.text.find('*').unwrap();
    ///
    /// assert_eq!(hidden.detokenize_index(star), input.find('*').unwrap());
    /// ```
    #[must_use]
    pub fn detokenize_index(&self, index: usize) -> usize {
        let bytes = self.text.as_bytes();
        let mut result = index;
        let mut i = 0;

        while i < index.min(bytes.len()) {
            match bytes[i] {
                b'\\' => {
                    result -= 1;
                    i += 2;
                },
                b'[' => match self.placeholder_at(i) {
                    Some((n, width)) => {
                        result = result - width + self.tokens[n].len();
                        i += width;
                    },
                    None => i += 1,
                },
                _ => i += 1,
            }
        }

        result
    }

    /// Replaces the placeholders of a fragment of the hidden text with the
    /// spans they stand for and drops escapes.
    ///
    /// # Example
    /// ```
    /// use exprule::interpreter::lexer::{Grouping, tokenize};
    ///
    /// let hidden = tokenize("f(1, 2), [3]", Grouping::Brackets).unwrap();
    /// let parts: Vec<String> = hidden.text.split(',').map(|p| hidden.restore(p)).collect();
    ///
    /// assert_eq!(parts, vec!["f(1, 2)", " [3]"]);
    /// ```
    #[must_use]
    pub fn restore(&self, fragment: &str) -> String {
        let bytes = fragment.as_bytes();
        let mut out = String::with_capacity(fragment.len());
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' if i + 1 < bytes.len() => {
                    out.push_str(&fragment[copied..i]);
                    copied = i + 1;
                    i += 2;
                },
                b'[' => match placeholder(fragment, i, self.tokens.len()) {
                    Some((n, width)) => {
                        out.push_str(&fragment[copied..i]);
                        out.push_str(&self.tokens[n].value);
                        i += width;
                        copied = i;
                    },
                    None => i += 1,
                },
                _ => i += 1,
            }
        }
        out.push_str(&fragment[copied..]);

        out
    }

    /// Reads the placeholder starting at byte `i` of the hidden text.
    fn placeholder_at(&self, i: usize) -> Option<(usize, usize)> {
        placeholder(&self.text, i, self.tokens.len())
    }
}

/// Parses `[n]` at byte `i` of `text`, returning `n` and the placeholder's
/// width when `n` names one of `count` hidden spans.
fn placeholder(text: &str, i: usize, count: usize) -> Option<(usize, usize)> {
    let rest = text.get(i + 1..)?;
    let close = rest.find(']')?;
    let n = rest[..close].parse::<usize>().ok()?;

    (n < count).then_some((n, close + 2))
}
