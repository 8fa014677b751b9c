// Pipeline parser for the attribute DSL

use super::ast::AttrCall;
use super::command::parse_attr_call;
use super::lexer::ws;
use nom::{
    bytes::complete::tag,
    combinator::{eof, opt},
    multi::separated_list1,
    IResult,
};

/// Parse a complete attribute pipeline
/// Format: call | call | ...
pub fn parse_pipeline(input: &str) -> IResult<&str, Vec<AttrCall>> {
    // If input starts with "|", consume it
    let (input, _) = opt(ws(tag("|")))(input)?;

    let (input, calls) = separated_list1(ws(tag("|")), parse_attr_call)(input)?;

    // Consume trailing whitespace and ensure end of input
    let (input, _) = ws(eof)(input)?;

    Ok((input, calls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::Encoding;

    #[test]
    fn test_parse_single_call() {
        let (_, calls) = parse_pipeline("color(region)").unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].encoding, Encoding::Color);
    }

    #[test]
    fn test_parse_multiple_calls() {
        let (rest, calls) =
            parse_pipeline(r#"color(region, palette: ["red", "blue"]) | marker(kind) | cat(region)"#).unwrap();
        assert!(rest.is_empty());
        let encodings: Vec<Encoding> = calls.iter().map(|c| c.encoding).collect();
        assert_eq!(encodings, vec![Encoding::Color, Encoding::Marker, Encoding::Cat]);
    }

    #[test]
    fn test_parse_leading_pipe() {
        assert!(parse_pipeline("| dash(g)").is_ok());
    }

    #[test]
    fn test_trailing_pipe_fails() {
        assert!(parse_pipeline("color(a) |").is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(parse_pipeline("").is_err());
        assert!(parse_pipeline("   ").is_err());
    }

    #[test]
    fn test_trailing_garbage_fails() {
        assert!(parse_pipeline("color(a) extra").is_err());
    }
}
