// Parser for scale-training specs: "x:xmin,xmax y:ymin,ymax"

use super::lexer::{field_name, scale_name};
use log::debug;
use nom::{
    character::complete::char,
    combinator::{all_consuming, map},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};

/// One `scale:field,field` clause
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleClause<'a> {
    pub scale: &'a str,
    pub fields: Vec<&'a str>,
}

pub fn scale_clause(input: &str) -> IResult<&str, ScaleClause<'_>> {
    map(
        separated_pair(scale_name, char(':'), separated_list1(char(','), field_name)),
        |(scale, fields)| ScaleClause {
            scale,
            fields: fields.into_iter().filter(|f| !f.is_empty()).collect(),
        },
    )(input)
}

/// Split a training spec into clauses. Malformed clauses are dropped.
pub fn parse_train_spec(spec: &str) -> Vec<ScaleClause<'_>> {
    spec.split_whitespace()
        .filter_map(|clause| match all_consuming(scale_clause)(clause) {
            Ok((_, parsed)) => Some(parsed),
            Err(_) => {
                debug!("Skipping malformed scale clause '{}'", clause);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_spec() {
        let clauses = parse_train_spec("x:xmin,xmax  y:ymin,ymax");
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].scale, "x");
        assert_eq!(clauses[0].fields, vec!["xmin", "xmax"]);
        assert_eq!(clauses[1].fields, vec!["ymin", "ymax"]);
    }

    #[test]
    fn test_empty_fields_dropped() {
        let clauses = parse_train_spec("color:a,,b,");
        assert_eq!(clauses[0].fields, vec!["a", "b"]);
    }

    #[test]
    fn test_malformed_clause_skipped() {
        let clauses = parse_train_spec("nocolon x:xmin :orphan");
        assert_eq!(clauses, vec![ScaleClause { scale: "x", fields: vec!["xmin"] }]);
    }

    #[test]
    fn test_empty_spec() {
        assert!(parse_train_spec("").is_empty());
    }
}
