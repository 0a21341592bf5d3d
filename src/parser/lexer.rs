// Shared nom building blocks for the style and training-spec parsers

use nom::{
    bytes::complete::{take_till, take_till1},
    character::complete::multispace0,
    error::ParseError,
    number::complete::double,
    sequence::delimited,
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace
pub fn ws<'a, F, O, E>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
    E: ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// Scale name: everything up to the ':' separator
pub fn scale_name(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ':' || c == ',' || c.is_whitespace())(input)
}

/// Field name inside a comma list, possibly empty ("x:a,,b")
pub fn field_name(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == ',' || c.is_whitespace())(input)
}

pub fn number_literal(input: &str) -> IResult<&str, f64> {
    double(input)
}
