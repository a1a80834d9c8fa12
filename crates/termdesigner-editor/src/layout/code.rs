//! Canonical text for layout descriptors.
//!
//! Grammar accepted by the parser:
//!
//! ```text
//! expr := term (('+' | '-') term)*
//! term := ['-'] number | function '(' arg ')' | '(' expr ')'
//! ```

use super::{Dim, DimInfo, DimType, Pos, PosInfo, PosType, Side};
use termdesigner_core::{LayoutError, NodeId};

fn format_offset(code: String, offset: i32) -> String {
    match offset {
        0 => code,
        n if n > 0 => format!("{} + {}", code, n),
        n => format!("{} - {}", code, -(n as i64)),
    }
}

fn combine_code(left: String, right_negated_abs: Option<i32>, right: String, subtract: bool) -> String {
    // `x + -3` reads better as `x - 3`
    if let Some(n) = right_negated_abs {
        let op = if subtract { '+' } else { '-' };
        return format!("{} {} {}", left, op, -(n as i64));
    }
    let op = if subtract { '-' } else { '+' };
    format!("{} {} {}", left, op, right)
}

impl Pos {
    /// Emits canonical text. `name_of` maps a referent id to its design name;
    /// an unnamed referent is written as its id.
    pub fn to_code(&self, name_of: &dyn Fn(NodeId) -> Option<String>) -> String {
        let info = self.classify();
        match info.kind {
            PosType::Unrecognized => self.structural_code(name_of),
            _ => pos_info_code(&info, name_of),
        }
    }

    fn structural_code(&self, name_of: &dyn Fn(NodeId) -> Option<String>) -> String {
        match self {
            Pos::Combine {
                left,
                right,
                subtract,
            } => {
                let negative = right.as_absolute().filter(|n| *n < 0);
                let right_code = match right.as_ref() {
                    Pos::Combine { .. } if negative.is_none() => {
                        format!("({})", right.to_code(name_of))
                    }
                    _ => right.to_code(name_of),
                };
                combine_code(left.to_code(name_of), negative, right_code, *subtract)
            }
            other => other.to_code(name_of),
        }
    }
}

fn pos_info_code(info: &PosInfo, name_of: &dyn Fn(NodeId) -> Option<String>) -> String {
    let base = match info.kind {
        PosType::Absolute => return info.cells().to_string(),
        PosType::Percent => format!("Pos.Percent({})", info.value as f32),
        PosType::Fill => format!("Pos.Fill({})", info.cells()),
        PosType::Relative => {
            let name = info
                .referent
                .map(|id| name_of(id).unwrap_or_else(|| id.to_string()))
                .unwrap_or_default();
            let side = info.side.unwrap_or(Side::Left);
            format!("Pos.{}({})", side.code_name(), name)
        }
        PosType::Unrecognized => String::new(),
    };
    format_offset(base, info.offset)
}

impl Dim {
    /// Emits canonical text.
    pub fn to_code(&self) -> String {
        let info = self.classify();
        match info.kind {
            DimType::Unrecognized => self.structural_code(),
            _ => dim_info_code(&info),
        }
    }

    fn structural_code(&self) -> String {
        match self {
            Dim::Combine {
                left,
                right,
                subtract,
            } => {
                let negative = right.as_absolute().filter(|n| *n < 0);
                let right_code = match right.as_ref() {
                    Dim::Combine { .. } if negative.is_none() => format!("({})", right.to_code()),
                    _ => right.to_code(),
                };
                combine_code(left.to_code(), negative, right_code, *subtract)
            }
            other => other.to_code(),
        }
    }
}

fn dim_info_code(info: &DimInfo) -> String {
    let base = match info.kind {
        DimType::Absolute => return info.cells().to_string(),
        DimType::Percent => format!("Dim.Percent({})", info.value as f32),
        DimType::Fill => format!("Dim.Fill({})", info.cells()),
        DimType::Unrecognized => String::new(),
    };
    format_offset(base, info.offset)
}

/// Parses canonical position text. Names inside relative functions are
/// looked up with `resolver`.
pub fn parse_pos(text: &str, resolver: &dyn Fn(&str) -> Option<NodeId>) -> Result<Pos, LayoutError> {
    Parser::new(text, PosBuilder { resolver })?.parse()
}

/// Parses canonical size text.
pub fn parse_dim(text: &str) -> Result<Dim, LayoutError> {
    Parser::new(text, DimBuilder)?.parse()
}

/// Constructs one descriptor type from parsed pieces.
trait Builder {
    type Output;

    fn absolute(&self, n: i32) -> Self::Output;

    fn combine(&self, left: Self::Output, right: Self::Output, subtract: bool) -> Self::Output;

    fn call(&self, function: &str, arg: &str) -> Result<Self::Output, LayoutError>;
}

struct PosBuilder<'a> {
    resolver: &'a dyn Fn(&str) -> Option<NodeId>,
}

impl Builder for PosBuilder<'_> {
    type Output = Pos;

    fn absolute(&self, n: i32) -> Pos {
        Pos::Absolute(n)
    }

    fn combine(&self, left: Pos, right: Pos, subtract: bool) -> Pos {
        Pos::Combine {
            left: Box::new(left),
            right: Box::new(right),
            subtract,
        }
    }

    fn call(&self, function: &str, arg: &str) -> Result<Pos, LayoutError> {
        let name = function
            .strip_prefix("Pos.")
            .ok_or_else(|| LayoutError::UnknownFunction(function.to_string()))?;
        match name {
            "Percent" => Ok(Pos::Percent(parse_float(arg)?)),
            "Fill" => Ok(Pos::Fill(parse_int(arg)?)),
            "At" => Ok(Pos::Absolute(parse_int(arg)?)),
            _ => {
                let side = Side::from_code_name(name)
                    .ok_or_else(|| LayoutError::UnknownFunction(function.to_string()))?;
                let target = (self.resolver)(arg)
                    .ok_or_else(|| LayoutError::UnknownReferent(arg.to_string()))?;
                Ok(Pos::View { target, side })
            }
        }
    }
}

struct DimBuilder;

impl Builder for DimBuilder {
    type Output = Dim;

    fn absolute(&self, n: i32) -> Dim {
        Dim::Absolute(n)
    }

    fn combine(&self, left: Dim, right: Dim, subtract: bool) -> Dim {
        Dim::Combine {
            left: Box::new(left),
            right: Box::new(right),
            subtract,
        }
    }

    fn call(&self, function: &str, arg: &str) -> Result<Dim, LayoutError> {
        match function {
            "Dim.Percent" => Ok(Dim::Percent(parse_float(arg)?)),
            "Dim.Fill" => Ok(Dim::Fill(parse_int(arg)?)),
            "Dim.Sized" => Ok(Dim::Absolute(parse_int(arg)?)),
            _ => Err(LayoutError::UnknownFunction(function.to_string())),
        }
    }
}

fn parse_int(text: &str) -> Result<i32, LayoutError> {
    text.parse::<i32>()
        .map_err(|_| LayoutError::InvalidNumber(text.to_string()))
}

fn parse_float(text: &str) -> Result<f32, LayoutError> {
    text.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LayoutError::InvalidNumber(text.to_string()))
}

/// Reads the number after a binary operator. `x - 2147483648` does not fit
/// an `i32` operand and becomes `x + -2147483648`.
fn signed_operand(text: &str, subtract: bool) -> Result<(i32, bool), LayoutError> {
    let wide = text
        .parse::<i64>()
        .map_err(|_| LayoutError::InvalidNumber(text.to_string()))?;
    if let Ok(n) = i32::try_from(wide) {
        return Ok((n, subtract));
    }
    i32::try_from(-wide)
        .map(|n| (n, !subtract))
        .map_err(|_| LayoutError::InvalidNumber(text.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Ident(String),
    Plus,
    Minus,
    Open,
    Close,
}

fn tokenize(text: &str) -> Result<Vec<Token>, LayoutError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            c if c.is_ascii_digit() => {
                let mut number = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        number.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Number(number));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphanumeric() || d == '_' || d == '.' {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => {
                return Err(LayoutError::Malformed {
                    text: text.to_string(),
                    reason: format!("unexpected character '{}'", other),
                })
            }
        }
    }
    Ok(tokens)
}

struct Parser<'t, B> {
    text: &'t str,
    tokens: Vec<Token>,
    cursor: usize,
    builder: B,
}

impl<'t, B: Builder> Parser<'t, B> {
    fn new(text: &'t str, builder: B) -> Result<Self, LayoutError> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(LayoutError::Empty);
        }
        Ok(Self {
            text,
            tokens,
            cursor: 0,
            builder,
        })
    }

    fn parse(mut self) -> Result<B::Output, LayoutError> {
        let value = self.expr()?;
        if let Some(token) = self.peek() {
            return Err(self.malformed(format!("trailing input at {:?}", token)));
        }
        Ok(value)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn malformed(&self, reason: impl Into<String>) -> LayoutError {
        LayoutError::Malformed {
            text: self.text.to_string(),
            reason: reason.into(),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), LayoutError> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            other => Err(self.malformed(format!("expected {:?}, found {:?}", expected, other))),
        }
    }

    fn expr(&mut self) -> Result<B::Output, LayoutError> {
        let mut value = self.term()?;
        loop {
            let subtract = match self.peek() {
                Some(Token::Plus) => false,
                Some(Token::Minus) => true,
                _ => break,
            };
            self.cursor += 1;
            value = match self.peek() {
                Some(Token::Number(n)) => {
                    let n = n.clone();
                    self.cursor += 1;
                    let (n, subtract) = signed_operand(&n, subtract)?;
                    self.builder.combine(value, self.builder.absolute(n), subtract)
                }
                _ => {
                    let right = self.term()?;
                    self.builder.combine(value, right, subtract)
                }
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<B::Output, LayoutError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(self.builder.absolute(parse_int(&n)?)),
            Some(Token::Minus) => match self.next() {
                Some(Token::Number(n)) => Ok(self.builder.absolute(parse_int(&format!("-{}", n))?)),
                other => Err(self.malformed(format!("expected a number after '-', found {:?}", other))),
            },
            Some(Token::Open) => {
                let inner = self.expr()?;
                self.expect(Token::Close)?;
                Ok(inner)
            }
            Some(Token::Ident(function)) => {
                self.expect(Token::Open)?;
                let arg = match self.next() {
                    Some(Token::Number(n)) => n,
                    Some(Token::Ident(name)) => name,
                    Some(Token::Minus) => match self.next() {
                        Some(Token::Number(n)) => format!("-{}", n),
                        other => {
                            return Err(self.malformed(format!("bad argument {:?}", other)))
                        }
                    },
                    other => return Err(self.malformed(format!("bad argument {:?}", other))),
                };
                self.expect(Token::Close)?;
                self.builder.call(&function, &arg)
            }
            other => Err(self.malformed(format!("unexpected {:?}", other))),
        }
    }
}
