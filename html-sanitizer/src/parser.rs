//! A small html tokenizer that separates markup from text.
use crate::Element;
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_until, take_while1, take_while_m_n},
    character::complete::{char, digit1},
    combinator::{map, map_opt, map_res, recognize, value},
    error::context,
    multi::many0,
    sequence::{delimited, preceded},
    AsChar, IResult, Parser,
};


/// A parse result with a &str input.
type ParseResult<'a, O> = IResult<&'a str, O>;

pub fn parse_nodes(input: &str) -> ParseResult<'_, Vec<Element<'_>>> {
    many0(alt((
        parse_comment,
        parse_tag,
        parse_escaped,
        parse_text,
        parse_stray,
    )))
    .parse(input)
}

/// `<!-- ... -->`, may contain `>`.
fn parse_comment(input: &str) -> ParseResult<'_, Element<'_>> {
    let comment = recognize(delimited(tag("<!--"), take_until("-->"), tag("-->")));
    context("parse_comment", map(comment, Element::Markup)).parse(input)
}

/// Any `<...>` run with at least one character between the brackets.
fn parse_tag(input: &str) -> ParseResult<'_, Element<'_>> {
    let markup = recognize(delimited(
        char('<'),
        take_while1(|c| c != '>'),
        char('>'),
    ));
    context("parse_tag", map(markup, Element::Markup)).parse(input)
}

fn is_hex_digit(c: char) -> bool {
    c.is_hex_digit()
}

fn parse_hex(input: &str) -> ParseResult<'_, u32> {
    context(
        "parse_hex",
        map_res(take_while_m_n(1, 6, is_hex_digit), |s: &str| {
            u32::from_str_radix(s, 16)
        }),
    )
    .parse(input)
}

fn parse_decimal(input: &str) -> ParseResult<'_, u32> {
    context("parse_decimal", map_res(digit1, |s: &str| s.parse::<u32>())).parse(input)
}

fn parse_escaped_character(input: &str) -> ParseResult<'_, char> {
    let code_point = delimited(
        tag("&#"),
        alt((preceded(alt((char('x'), char('X'))), parse_hex), parse_decimal)),
        char(';'),
    );
    context("parse_escaped_character", map_opt(code_point, char::from_u32)).parse(input)
}

fn parse_escaped_tag(input: &str) -> ParseResult<'_, char> {
    let quote = value('\"', tag("&quot;"));
    let gt = value('>', tag("&gt;"));
    let lt = value('<', tag("&lt;"));
    let ampersand = value('&', tag("&amp;"));
    let apos = value('\'', tag("&apos;"));
    let nbsp = value('\u{a0}', tag("&nbsp;"));
    let hellip = value('…', tag("&hellip;"));
    let copy = value('©', tag("&copy;"));
    let reg = value('®', tag("&reg;"));
    let trade = value('™', tag("&trade;"));
    let deg = value('°', tag("&deg;"));
    let euro = value('€', tag("&euro;"));

    alt((
        quote, gt, lt, ampersand, apos, nbsp, hellip, copy, reg, trade, deg, euro,
    ))
    .parse(input)
}

fn parse_escaped(input: &str) -> ParseResult<'_, Element<'_>> {
    context(
        "parse_escaped",
        map(
            alt((parse_escaped_character, parse_escaped_tag)),
            Element::Escaped,
        ),
    )
    .parse(input)
}

fn parse_text(input: &str) -> ParseResult<'_, Element<'_>> {
    let text = take_while1(|c| c != '<' && c != '&');
    context("parse_text", map(text, Element::Text)).parse(input)
}

/// A `<` or `&` that does not start markup or an entity is plain text.
fn parse_stray(input: &str) -> ParseResult<'_, Element<'_>> {
    context("parse_stray", map(take(1usize), Element::Text)).parse(input)
}
