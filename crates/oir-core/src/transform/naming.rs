use std::cmp::Ordering;

use heck::ToUpperCamelCase;

use crate::ir::{Method, Model};

/// Capitalize a value into a name segment, e.g. `created` → `Created`.
pub fn capitalized(value: &str) -> String {
    value.to_upper_camel_case()
}

/// Synthesize a name for a string-enum union case from its values,
/// e.g. `["Auto", "Manual"]` → `AutoOrManual`.
pub fn enum_case_name(values: &[String]) -> String {
    values
        .iter()
        .map(|v| capitalized(v))
        .collect::<Vec<_>>()
        .join("Or")
}

/// Deterministic operation id for operations without a declared one: the
/// path's template variables from last to first joined with `By`, followed
/// by the capitalized method. A path with no variables gets the bare
/// lowercase method.
///
/// e.g. `POST /admin/projects/{id}` → `idByPost`,
///      `GET /users/{userId}/messages/{messageId}` → `messageIdByUserIdByGet`
pub fn synthesized_operation_id(method: Method, path: &str) -> String {
    let variables: Vec<&str> = path
        .split('/')
        .filter_map(|s| s.strip_prefix('{')?.strip_suffix('}'))
        .collect();

    match variables.split_last() {
        None => method.as_str().to_lowercase(),
        Some((last, earlier)) => {
            let mut id = (*last).to_string();
            for var in earlier.iter().rev() {
                id.push_str("By");
                id.push_str(&capitalized(var));
            }
            id.push_str("By");
            id.push_str(&capitalized(&method.as_str().to_lowercase()));
            id
        }
    }
}

/// Sort union cases into deserialization probe order: more specific shapes
/// first so a permissive string case cannot silently absorb them.
/// `Primitive::String` is always last; the rest rank by descending
/// structural complexity. The sort is stable, so equally ranked cases keep
/// their declaration order.
pub fn sort_cases(cases: &mut [Model]) {
    cases.sort_by(|a, b| match (a.is_string_primitive(), b.is_string_primitive()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => complexity(b).cmp(&complexity(a)),
    });
}

/// Member count for objects, enums and unions; container types rank just
/// above their item type.
fn complexity(model: &Model) -> usize {
    match model {
        Model::Object { properties, .. } => properties.len(),
        Model::Enum { values, .. } => values.len(),
        Model::Union { cases, .. } => cases.len(),
        Model::List { items, .. } | Model::Set { items, .. } => 1 + complexity(items),
        Model::Map { values, .. } => 1 + complexity(values),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{EnumKind, NamingContext, Primitive};

    #[test]
    fn test_enum_case_name() {
        let values = vec!["Auto".to_string(), "Manual".to_string()];
        assert_eq!(enum_case_name(&values), "AutoOrManual");
        assert_eq!(enum_case_name(&["created".to_string()]), "Created");
    }

    #[test]
    fn synthesized_id_single_variable() {
        assert_eq!(
            synthesized_operation_id(Method::Post, "/admin/projects/{id}"),
            "idByPost"
        );
    }

    #[test]
    fn synthesized_id_multiple_variables() {
        assert_eq!(
            synthesized_operation_id(Method::Get, "/users/{userId}/messages/{messageId}"),
            "messageIdByUserIdByGet"
        );
    }

    #[test]
    fn synthesized_id_without_variables() {
        assert_eq!(synthesized_operation_id(Method::Delete, "/sessions"), "delete");
    }

    fn string_case() -> Model {
        Model::Primitive {
            kind: Primitive::String,
            description: None,
            default: None,
            nullable: false,
            constraint: None,
        }
    }

    fn enum_case(n: usize) -> Model {
        Model::Enum {
            context: NamingContext::named("E"),
            description: None,
            base: Primitive::String,
            values: (0..n).map(|i| format!("v{i}")).collect(),
            kind: EnumKind::Closed,
            default: None,
            nullable: false,
        }
    }

    #[test]
    fn string_primitive_sorts_last() {
        let mut cases = vec![string_case(), enum_case(2), enum_case(5)];
        sort_cases(&mut cases);
        assert!(matches!(&cases[0], Model::Enum { values, .. } if values.len() == 5));
        assert!(matches!(&cases[1], Model::Enum { values, .. } if values.len() == 2));
        assert!(cases[2].is_string_primitive());
    }
}
