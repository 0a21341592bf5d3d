// Parsers for fixed style strings: hex colors, floats with an optional percent sign

use super::lexer::{number_literal, ws};
use crate::style::Color;
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};

fn hex_byte(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

/// Parse `#RRGGBB` or `#RRGGBBAA`; alpha defaults to opaque
pub fn hex_color(input: &str) -> IResult<&str, Color> {
    let (input, (r, g, b)) = preceded(char('#'), tuple((hex_byte, hex_byte, hex_byte)))(input)?;
    let (input, a) = opt(hex_byte)(input)?;
    Ok((input, Color::rgba(r, g, b, a.unwrap_or(0xff))))
}

/// Parse a float; a trailing `%` divides by 100
pub fn percent_float(input: &str) -> IResult<&str, f64> {
    let (input, value) = ws(number_literal)(input)?;
    let (input, percent) = ws(opt(char('%')))(input)?;
    let value = if percent.is_some() { value / 100.0 } else { value };
    Ok((input, value))
}
