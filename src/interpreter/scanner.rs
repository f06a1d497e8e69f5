use logos::Logos;

use crate::error::{ErrorReporter, ParseError};

/// Represents a lexical token kind in the language.
///
/// A token is a minimal but meaningful unit of text produced by the scanner.
/// Literal payloads (the parsed number, the unquoted string content) are
/// carried directly in the kind; the exact source slice lives on [`Token`].
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// Numeric literal tokens such as `12` or `3.5`. A trailing `.` with no
    /// digit after it is not part of the literal.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(f64),
    /// String literal tokens. The payload excludes the quotes; the literal may
    /// span several lines.
    #[regex(r#""[^"]*""#, parse_text)]
    Str(String),
    /// A string literal that reached end of input before its closing quote.
    /// Reported by [`scan`] and never handed to the parser.
    #[regex(r#""[^"]*"#, unterminated_text)]
    Unterminated,
    /// Identifier tokens; variable or function names such as `x` or `count`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// `and`
    #[token("and")]
    And,
    /// `class`
    #[token("class")]
    Class,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `for`
    #[token("for")]
    For,
    /// `if`
    #[token("if")]
    If,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `super`
    #[token("super")]
    Super,
    /// `this`
    #[token("this")]
    This,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,

    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Newlines advance the line counter and are otherwise ignored.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Newline,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r]+", logos::skip)]
    Whitespace,

    /// Only generated by [`scan`] as the end-of-input sentinel.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for diagnostics; callbacks increment it as
/// newlines are consumed, including newlines inside string literals.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Extracts a string literal's content, stripping the surrounding quotes and
/// counting the newlines the literal spans.
fn parse_text(lex: &mut logos::Lexer<TokenKind>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.chars().filter(|&c| c == '\n').count();
    slice[1..slice.len() - 1].to_string()
}

/// Counts the newlines inside an unterminated string so the diagnostic points
/// at the line the input gave out on.
fn unterminated_text(lex: &mut logos::Lexer<TokenKind>) {
    lex.extras.line += lex.slice().chars().filter(|&c| c == '\n').count();
}

/// A lexical token: its kind, the exact source slice it covers, and the line
/// it ends on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What the token is, including any literal payload.
    pub kind:   TokenKind,
    /// The source text the token spans. Empty only for the `Eof` sentinel.
    pub lexeme: String,
    /// The source line the token ends on.
    pub line:   usize,
}

/// Scans source text into a token sequence.
///
/// Scanning never fails: unrecognized characters and unterminated strings are
/// reported through `reporter` and scanning continues with the next character.
/// The returned sequence always ends with a single `Eof` token whose line is
/// the final line of the source.
///
/// # Parameters
/// - `source`: The source text to tokenize.
/// - `reporter`: Diagnostics sink for lexical errors.
///
/// # Returns
/// The token sequence, `Eof`-terminated.
///
/// # Example
/// ```
/// use loxide::{error::ErrorReporter, interpreter::scanner::{TokenKind, scan}};
///
/// let mut reporter = ErrorReporter::new();
/// let tokens = scan("print 1;", &mut reporter);
///
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[0].kind, TokenKind::Print);
/// assert_eq!(tokens[1].kind, TokenKind::Number(1.0));
/// assert_eq!(tokens[3].kind, TokenKind::Eof);
/// assert!(!reporter.had_error());
/// ```
pub fn scan(source: &str, reporter: &mut ErrorReporter) -> Vec<Token> {
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        match result {
            Ok(TokenKind::Unterminated) => {
                reporter.parse_error(&ParseError::UnterminatedString { line });
            },
            Ok(kind) => {
                tokens.push(Token { kind,
                                    lexeme: lexer.slice().to_string(),
                                    line });
            },
            Err(()) => {
                for character in lexer.slice().chars() {
                    reporter.parse_error(&ParseError::UnexpectedCharacter { character, line });
                }
            },
        }
    }

    tokens.push(Token { kind:   TokenKind::Eof,
                        lexeme: String::new(),
                        line:   lexer.extras.line, });
    tokens
}
