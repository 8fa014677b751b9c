// Builder-call parser for the attribute DSL

use super::ast::{AttrCall, PoolArg};
use super::lexer::{bool_literal, identifier, list_literal, string_literal, ws};
use crate::spec::ColumnSpec;
use crate::variants::Encoding;
use nom::{
    branch::alt,
    character::complete::char,
    combinator::map,
    error::{Error, ErrorKind},
    multi::separated_list0,
    sequence::{preceded, separated_pair},
    IResult,
};

#[derive(Debug, Clone, PartialEq)]
enum ArgValue {
    List(Vec<String>),
    Str(String),
    Bool(bool),
    Ident(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Arg {
    Positional(ArgValue),
    Keyword(String, ArgValue),
}

fn parse_arg_value(input: &str) -> IResult<&str, ArgValue> {
    alt((
        map(list_literal, ArgValue::List),
        map(string_literal, ArgValue::Str),
        map(bool_literal, ArgValue::Bool),
        map(identifier, ArgValue::Ident),
    ))(input)
}

fn parse_arg(input: &str) -> IResult<&str, Arg> {
    alt((
        map(
            separated_pair(ws(identifier), char(':'), ws(parse_arg_value)),
            |(k, v)| Arg::Keyword(k, v),
        ),
        map(ws(parse_arg_value), Arg::Positional),
    ))(input)
}

/// Parse one builder call
/// Format: color(region, palette: ["red", "blue"], sort: false)
pub fn parse_attr_call(input: &str) -> IResult<&str, AttrCall> {
    let (input, name) = ws(identifier)(input)?;
    let encoding = Encoding::from_function_name(&name)
        .ok_or_else(|| nom::Err::Error(Error::new(input, ErrorKind::Tag)))?;

    let (input, args) = preceded(
        ws(char('(')),
        separated_list0(ws(char(',')), parse_arg),
    )(input)?;
    let (rest, _) = ws(char(')'))(input)?;

    // A malformed argument list is a hard failure: no other branch can match
    let call = build_call(encoding, args).map_err(|kind| nom::Err::Failure(Error::new(input, kind)))?;

    Ok((rest, call))
}

fn build_call(encoding: Encoding, args: Vec<Arg>) -> Result<AttrCall, ErrorKind> {
    let override_keyword = encoding.config().override_keyword;
    let mut call = AttrCall::new(encoding);

    for (idx, arg) in args.into_iter().enumerate() {
        match arg {
            // Only the first argument may be positional: the grouping columns
            Arg::Positional(value) if idx == 0 => call.columns = Some(to_columns(value)?),
            Arg::Positional(_) => return Err(ErrorKind::Verify),
            Arg::Keyword(key, value) => match key.as_str() {
                "columns" => call.columns = Some(to_columns(value)?),
                "default" => call.options.default = Some(to_text(value)?),
                "sort" => call.options.sort = to_bool(value)?,
                "ascending" => call.options.ascending = to_bool(value)?,
                "items" => {
                    call.options.items = Some(to_list(value)?.into_iter().map(|v| vec![v]).collect())
                }
                k if k == override_keyword => call.pool = Some(to_pool(encoding, value)?),
                _ => return Err(ErrorKind::Verify),
            },
        }
    }

    Ok(call)
}

fn to_columns(value: ArgValue) -> Result<ColumnSpec, ErrorKind> {
    match value {
        ArgValue::Ident(c) | ArgValue::Str(c) => Ok(ColumnSpec::One(c)),
        ArgValue::List(cs) => Ok(ColumnSpec::Many(cs)),
        ArgValue::Bool(_) => Err(ErrorKind::Verify),
    }
}

fn to_text(value: ArgValue) -> Result<String, ErrorKind> {
    match value {
        ArgValue::Ident(s) | ArgValue::Str(s) => Ok(s),
        _ => Err(ErrorKind::Verify),
    }
}

fn to_bool(value: ArgValue) -> Result<bool, ErrorKind> {
    match value {
        ArgValue::Bool(b) => Ok(b),
        _ => Err(ErrorKind::Verify),
    }
}

fn to_list(value: ArgValue) -> Result<Vec<String>, ErrorKind> {
    match value {
        ArgValue::List(values) => Ok(values),
        ArgValue::Ident(s) | ArgValue::Str(s) => Ok(vec![s]),
        ArgValue::Bool(_) => Err(ErrorKind::Verify),
    }
}

fn to_pool(encoding: Encoding, value: ArgValue) -> Result<PoolArg, ErrorKind> {
    match (encoding, value) {
        (Encoding::Color, ArgValue::Ident(name)) => Ok(PoolArg::Named(name)),
        (_, value) => to_list(value).map(PoolArg::Values),
    }
}
