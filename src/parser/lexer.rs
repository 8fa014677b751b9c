// Lexical helpers for the attribute DSL

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, map_opt},
    multi::separated_list0,
    sequence::delimited,
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Bare identifier (column name, function name, keyword)
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(take_while1(is_ident_char), String::from)(input)
}

/// Double-quoted string, no escapes
pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        String::from,
    )(input)
}

/// `true` or `false`
pub fn bool_literal(input: &str) -> IResult<&str, bool> {
    map_opt(take_while1(is_ident_char), |word: &str| match word {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    })(input)
}

/// `[a, "b c", d]`: identifiers or strings
pub fn list_literal(input: &str) -> IResult<&str, Vec<String>> {
    delimited(
        ws(char('[')),
        separated_list0(ws(char(',')), ws(alt((string_literal, identifier)))),
        ws(char(']')),
    )(input)
}
