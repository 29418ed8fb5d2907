use serde_json::Number;

use crate::ir::Constraint;
use crate::parse::schema::Schema;

/// Lift validation bounds off a schema. Returns `None` when no relevant
/// keyword is present; once any one keyword triggers construction, absent
/// siblings stay permissive.
pub fn extract(schema: &Schema) -> Option<Constraint> {
    number(schema)
        .or_else(|| text(schema))
        .or_else(|| collection(schema))
        .or_else(|| object(schema))
}

pub(crate) fn number(schema: &Schema) -> Option<Constraint> {
    if schema.minimum.is_none()
        && schema.maximum.is_none()
        && schema.exclusive_minimum.is_none()
        && schema.exclusive_maximum.is_none()
        && schema.multiple_of.is_none()
    {
        return None;
    }
    Some(Constraint::Number {
        exclusive_minimum: schema.exclusive_minimum.and_then(Number::from_f64),
        minimum: schema.minimum.and_then(Number::from_f64),
        exclusive_maximum: schema.exclusive_maximum.and_then(Number::from_f64),
        maximum: schema.maximum.and_then(Number::from_f64),
        multiple_of: schema.multiple_of.and_then(Number::from_f64),
    })
}

pub(crate) fn text(schema: &Schema) -> Option<Constraint> {
    if schema.min_length.is_none() && schema.max_length.is_none() && schema.pattern.is_none() {
        return None;
    }
    Some(Constraint::Text {
        min_length: schema.min_length,
        max_length: schema.max_length,
        pattern: schema.pattern.clone(),
    })
}

pub(crate) fn collection(schema: &Schema) -> Option<Constraint> {
    if schema.min_items.is_none() && schema.max_items.is_none() && schema.unique_items.is_none() {
        return None;
    }
    Some(Constraint::Collection {
        min_items: schema.min_items,
        max_items: schema.max_items,
        unique_items: schema.unique_items.unwrap_or(false),
    })
}

pub(crate) fn object(schema: &Schema) -> Option<Constraint> {
    if schema.min_properties.is_none() && schema.max_properties.is_none() {
        return None;
    }
    Some(Constraint::Object {
        min_properties: schema.min_properties,
        max_properties: schema.max_properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(yaml: &str) -> Schema {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn absent_keywords_yield_no_constraint() {
        assert_eq!(extract(&schema("type: string")), None);
    }

    #[test]
    fn one_keyword_triggers_construction() {
        let c = extract(&schema("type: string\nminLength: 3")).unwrap();
        assert_eq!(
            c,
            Constraint::Text {
                min_length: Some(3),
                max_length: None,
                pattern: None,
            }
        );
    }

    #[test]
    fn unique_items_triggers_collection_constraint() {
        let c = extract(&schema("type: array\nuniqueItems: true")).unwrap();
        assert!(c.unique_items());
    }

    #[test]
    fn numeric_bounds() {
        let c = extract(&schema("type: integer\nminimum: 1\nmaximum: 10")).unwrap();
        match c {
            Constraint::Number { minimum, maximum, multiple_of, .. } => {
                assert_eq!(minimum, Number::from_f64(1.0));
                assert_eq!(maximum, Number::from_f64(10.0));
                assert_eq!(multiple_of, None);
            }
            other => panic!("expected a number constraint, got {other:?}"),
        }
    }
}
