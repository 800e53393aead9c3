use winnow::prelude::*;
use winnow::ascii::{digit1, line_ending, multispace0, space0, space1};
use winnow::combinator::{alt, delimited, eof, opt, preceded, repeat, separated};
use winnow::error::ParserError;
use winnow::token::{take_till, take_while};

use crate::btree::Key;
use crate::er::{Attribute, IsA, NodeStyle, Relation};
use crate::error::Error;
use crate::script_ast::*;

pub fn parse_btree(input: &str) -> Result<Vec<BTreeStmt>, Error> {
    let mut input = input;
    btree_script(&mut input).map_err(|_| syntax_error("btree", input))
}

pub fn parse_er(input: &str) -> Result<Vec<ErStmt>, Error> {
    let mut input = input;
    er_script(&mut input).map_err(|_| syntax_error("er", input))
}

fn syntax_error(kind: &'static str, rest: &str) -> Error {
    let context = rest.lines().next().unwrap_or("").trim();
    let context = if context.chars().count() > 40 {
        format!("{}...", context.chars().take(40).collect::<String>())
    } else {
        context.to_string()
    };
    Error::Syntax { kind, context }
}

fn header(input: &mut &str, mut keyword: &'static str) -> winnow::Result<()> {
    multispace0.parse_next(input)?;
    keyword.parse_next(input)?;
    end_of_line.parse_next(input)
}

fn end_of_line(input: &mut &str) -> winnow::Result<()> {
    space0.parse_next(input)?;
    alt((line_ending, eof)).void().parse_next(input)
}

fn finish(input: &mut &str) -> winnow::Result<()> {
    multispace0.parse_next(input)?;
    eof.void().parse_next(input)
}

fn blank_line(input: &mut &str) -> winnow::Result<()> {
    space0.parse_next(input)?;
    line_ending.void().parse_next(input)
}

fn comment_line(input: &mut &str) -> winnow::Result<()> {
    space0.parse_next(input)?;
    "%%".parse_next(input)?;
    take_till(0.., ['\n', '\r']).parse_next(input)?;
    end_of_line.parse_next(input)
}

fn bare_word<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')).parse_next(input)
}

fn quoted<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    delimited("\"", take_till(0.., ['"', '\n', '\r']), "\"").parse_next(input)
}

fn token(input: &mut &str) -> winnow::Result<String> {
    alt((quoted, bare_word)).map(str::to_string).parse_next(input)
}

// --- btree ---------------------------------------------------------------

fn btree_script(input: &mut &str) -> winnow::Result<Vec<BTreeStmt>> {
    header(input, "btree")?;
    let lines: Vec<Option<BTreeStmt>> = repeat(0.., btree_line).parse_next(input)?;
    finish(input)?;
    Ok(lines.into_iter().flatten().collect())
}

fn btree_line(input: &mut &str) -> winnow::Result<Option<BTreeStmt>> {
    alt((
        btree_node.map(Some),
        btree_edge.map(Some),
        comment_line.map(|_| None),
        blank_line.map(|_| None),
    ))
    .parse_next(input)
}

fn btree_node(input: &mut &str) -> winnow::Result<BTreeStmt> {
    space0.parse_next(input)?;
    "node".parse_next(input)?;
    space1.parse_next(input)?;
    let name = token.parse_next(input)?;
    let keys: Vec<Key> = repeat(0.., preceded(space1, key)).parse_next(input)?;
    end_of_line.parse_next(input)?;
    Ok(BTreeStmt::Node { name, keys })
}

/// Integers become [`Key::Int`]; anything else is kept verbatim.
fn key(input: &mut &str) -> winnow::Result<Key> {
    let raw = alt((quoted, take_till(1.., |c: char| c.is_whitespace()))).parse_next(input)?;
    Ok(raw
        .parse::<i64>()
        .map_or_else(|_| Key::Other(raw.to_string()), Key::Int))
}

fn btree_edge(input: &mut &str) -> winnow::Result<BTreeStmt> {
    space0.parse_next(input)?;
    "edge".parse_next(input)?;
    space1.parse_next(input)?;
    let parent = token.parse_next(input)?;
    space1.parse_next(input)?;
    let child = token.parse_next(input)?;
    space1.parse_next(input)?;
    let slot = digit1
        .try_map(|s: &str| s.parse::<usize>())
        .parse_next(input)?;
    end_of_line.parse_next(input)?;
    Ok(BTreeStmt::Edge {
        parent,
        child,
        slot,
    })
}

// --- er ------------------------------------------------------------------

fn er_script(input: &mut &str) -> winnow::Result<Vec<ErStmt>> {
    header(input, "er")?;
    let lines: Vec<Option<ErStmt>> = repeat(0.., er_line).parse_next(input)?;
    finish(input)?;
    Ok(lines.into_iter().flatten().collect())
}

fn er_line(input: &mut &str) -> winnow::Result<Option<ErStmt>> {
    alt((
        entity_line.map(Some),
        attribute_line.map(Some),
        relation_line.map(Some),
        is_a_line.map(Some),
        comment_line.map(|_| None),
        blank_line.map(|_| None),
    ))
    .parse_next(input)
}

#[derive(Debug, Clone, PartialEq)]
enum Flag {
    Pk,
    Multiple,
    Weak,
    Disjoint,
    Overlapping,
    SuperLabel(String),
    SubLabel(String),
}

fn flag(input: &mut &str) -> winnow::Result<Flag> {
    alt((
        preceded("super=", token).map(Flag::SuperLabel),
        preceded("sub=", token).map(Flag::SubLabel),
        bare_word.verify_map(|w| match w {
            "pk" => Some(Flag::Pk),
            "multiple" => Some(Flag::Multiple),
            "weak" => Some(Flag::Weak),
            "disjoint" => Some(Flag::Disjoint),
            "overlapping" => Some(Flag::Overlapping),
            _ => None,
        }),
    ))
    .parse_next(input)
}

/// Trailing flags, rejecting any that `allowed` does not accept.
fn flags(input: &mut &str, allowed: fn(&Flag) -> bool) -> winnow::Result<Vec<Flag>> {
    let start = *input;
    let flags: Vec<Flag> = repeat(0.., preceded(space1, flag)).parse_next(input)?;
    if flags.iter().all(allowed) {
        Ok(flags)
    } else {
        *input = start;
        Err(ParserError::from_input(input))
    }
}

fn name_list(input: &mut &str) -> winnow::Result<Vec<String>> {
    delimited(
        ("(", space0),
        separated(1.., token, (space0, ",", space0)),
        (space0, ")"),
    )
    .parse_next(input)
}

fn entity_line(input: &mut &str) -> winnow::Result<ErStmt> {
    space0.parse_next(input)?;
    "entity".parse_next(input)?;
    space1.parse_next(input)?;
    let name = token.parse_next(input)?;
    let flags = flags(input, |f| matches!(f, Flag::Multiple | Flag::Weak))?;
    end_of_line.parse_next(input)?;
    let style = NodeStyle {
        is_multiple: flags.contains(&Flag::Multiple),
        is_weak: flags.contains(&Flag::Weak),
    };
    Ok(ErStmt::Entity { name, style })
}

fn attribute_line(input: &mut &str) -> winnow::Result<ErStmt> {
    space0.parse_next(input)?;
    "attribute".parse_next(input)?;
    space1.parse_next(input)?;
    let entity = token.parse_next(input)?;
    space1.parse_next(input)?;
    let name = token.parse_next(input)?;
    let flags = flags(input, |f| matches!(f, Flag::Pk | Flag::Multiple | Flag::Weak))?;
    let parts = opt(preceded(space0, name_list)).parse_next(input)?;
    end_of_line.parse_next(input)?;

    let mut attribute = Attribute::new(name);
    attribute.is_pk = flags.contains(&Flag::Pk);
    attribute.is_multiple = flags.contains(&Flag::Multiple);
    attribute.is_weak = flags.contains(&Flag::Weak);
    attribute.composed_of = parts.unwrap_or_default();
    Ok(ErStmt::Attribute { entity, attribute })
}

fn relation_line(input: &mut &str) -> winnow::Result<ErStmt> {
    space0.parse_next(input)?;
    "relation".parse_next(input)?;
    let from = field(input)?;
    let label = field(input)?;
    let to = field(input)?;
    let from_card = field(input)?;
    let to_card = field(input)?;
    let flags = flags(input, |f| matches!(f, Flag::Weak))?;
    end_of_line.parse_next(input)?;

    let mut relation = Relation::new(from, label, to, from_card, to_card);
    relation.is_weak = flags.contains(&Flag::Weak);
    Ok(ErStmt::Relation(relation))
}

fn field(input: &mut &str) -> winnow::Result<String> {
    preceded(space1, token).parse_next(input)
}

fn is_a_line(input: &mut &str) -> winnow::Result<ErStmt> {
    space0.parse_next(input)?;
    "isa".parse_next(input)?;
    space1.parse_next(input)?;
    let superclass = token.parse_next(input)?;
    space1.parse_next(input)?;
    let subclasses = alt((name_list, token.map(|t| vec![t]))).parse_next(input)?;
    let flags = flags(input, |f| {
        matches!(
            f,
            Flag::SuperLabel(_) | Flag::SubLabel(_) | Flag::Disjoint | Flag::Overlapping
        )
    })?;
    end_of_line.parse_next(input)?;

    let mut is_a = IsA::new(superclass, subclasses);
    for flag in flags {
        match flag {
            Flag::SuperLabel(label) => is_a.super_label = label,
            Flag::SubLabel(label) => is_a.sub_label = label,
            Flag::Disjoint => is_a.is_disjunct = true,
            Flag::Overlapping => is_a.is_disjunct = false,
            Flag::Pk | Flag::Multiple | Flag::Weak => {}
        }
    }
    Ok(ErStmt::IsA(is_a))
}
