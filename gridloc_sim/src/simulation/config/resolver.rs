// gridloc_sim/src/simulation/config/resolver.rs

use super::catalog::PrefabCatalog;
use figment::value::{Dict, Tag, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("prefab '{0}' not found in catalog")]
    UnknownPrefab(String),
    #[error("prefab '{0}' must resolve to a table to be merged")]
    NotATable(String),
    #[error("prefab '{0}' refers back to itself")]
    Cycle(String),
}

/// Replaces every `{ from = "<key>", ... }` table in `value` with the catalog
/// prefab it names, deep-merging the sibling keys over it as overrides.
pub fn resolve_value(value: &Value, catalog: &PrefabCatalog) -> Result<Value, ResolveError> {
    let mut stack = Vec::new();
    resolve_value_recursively(value, catalog, &mut stack)
}

/// Merges the contents of `override_dict` into `base`.
fn deep_merge(base: &mut Dict, override_dict: &Dict) {
    for (key, override_val) in override_dict {
        // The 'from' key is metadata, not data.
        if key == "from" {
            continue;
        }

        // An override that is itself a reference replaces the base value outright.
        if let Some(d) = override_val.as_dict() {
            if d.contains_key("from") {
                base.insert(key.clone(), override_val.clone());
                continue;
            }
        }

        if let Some(base_val) = base.get_mut(key) {
            if let (Some(base_sub_dict), Some(override_sub_dict)) =
                (base_val.as_dict(), override_val.as_dict())
            {
                let mut new_sub_dict = base_sub_dict.clone();
                deep_merge(&mut new_sub_dict, override_sub_dict);
                *base_val = Value::Dict(Tag::Default, new_sub_dict);
                continue;
            }
        }
        base.insert(key.clone(), override_val.clone());
    }
}

fn resolve_value_recursively(
    value: &Value,
    catalog: &PrefabCatalog,
    stack: &mut Vec<String>,
) -> Result<Value, ResolveError> {
    // Pre-order: resolve the current node first, then its children.

    // --- STEP 1: Resolve the current node if it's a 'from' reference. ---
    let current_node = match value
        .as_dict()
        .and_then(|dict| Some((dict, dict.get("from")?.as_str()?)))
    {
        Some((dict, from_key)) => {
            if stack.iter().any(|k| k == from_key) {
                return Err(ResolveError::Cycle(from_key.to_string()));
            }
            let base_prefab_data = catalog
                .get(from_key)
                .ok_or_else(|| ResolveError::UnknownPrefab(from_key.to_string()))?;

            stack.push(from_key.to_string());
            let resolved_base = resolve_value_recursively(base_prefab_data, catalog, stack);
            stack.pop();

            let mut final_dict = resolved_base?
                .into_dict()
                .ok_or_else(|| ResolveError::NotATable(from_key.to_string()))?;
            deep_merge(&mut final_dict, dict);

            Value::Dict(Tag::Default, final_dict)
        }
        None => value.clone(),
    };

    // --- STEP 2: Now that the current node is resolved, resolve its children. ---
    match &current_node {
        Value::Dict(tag, dict) => {
            let mut new_dict = Dict::new();
            for (key, val) in dict.iter() {
                if key == "from" {
                    continue;
                }
                new_dict.insert(key.clone(), resolve_value_recursively(val, catalog, stack)?);
            }
            Ok(Value::Dict(*tag, new_dict))
        }
        Value::Array(tag, arr) => {
            let resolved_arr = arr
                .iter()
                .map(|item| resolve_value_recursively(item, catalog, stack))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(*tag, resolved_arr))
        }
        _ => Ok(current_node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::{
        providers::{Format, Toml},
        Figment,
    };

    fn toml_value(s: &str) -> Value {
        Figment::new().merge(Toml::string(s)).extract().unwrap()
    }

    fn catalog() -> PrefabCatalog {
        let mut catalog = PrefabCatalog::default();
        catalog.insert("maps.tiny", toml_value(r#"rows = ["RG", "GR"]"#));
        catalog.insert(
            "sensors.noisy",
            toml_value("sensor_right = 0.6\np_move = 0.5\n"),
        );
        catalog.insert(
            "sensors.noisier",
            toml_value("from = \"sensors.noisy\"\nsensor_right = 0.55\n"),
        );
        catalog.insert("loops.a", toml_value("from = \"loops.b\""));
        catalog.insert("loops.b", toml_value("from = \"loops.a\""));
        catalog.insert("lists.moves", toml_value("x = 1").find("x").unwrap());
        catalog
    }

    fn lookup<'a>(value: &'a Value, path: &str) -> &'a Value {
        value.find_ref(path).unwrap()
    }

    #[test]
    fn test_reference_is_replaced_and_from_is_stripped() {
        let scenario = toml_value(
            r#"
            name = "tiny"
            [map]
            from = "maps.tiny"
            "#,
        );
        let resolved = resolve_value(&scenario, &catalog()).unwrap();
        let rows = lookup(&resolved, "map.rows").as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(resolved.find_ref("map.from").is_none());
    }

    #[test]
    fn test_sibling_keys_override_the_prefab() {
        let scenario = toml_value(
            r#"
            [filter]
            from = "sensors.noisier"
            p_move = 0.9
            "#,
        );
        let resolved = resolve_value(&scenario, &catalog()).unwrap();
        assert_eq!(lookup(&resolved, "filter.sensor_right").to_f64(), Some(0.55));
        assert_eq!(lookup(&resolved, "filter.p_move").to_f64(), Some(0.9));
    }

    #[test]
    fn test_unknown_prefab_is_an_error() {
        let scenario = toml_value("[map]\nfrom = \"maps.missing\"\n");
        assert_eq!(
            resolve_value(&scenario, &catalog()).unwrap_err(),
            ResolveError::UnknownPrefab("maps.missing".into())
        );
    }

    #[test]
    fn test_cycles_are_detected() {
        let scenario = toml_value("[map]\nfrom = \"loops.a\"\n");
        assert!(matches!(
            resolve_value(&scenario, &catalog()).unwrap_err(),
            ResolveError::Cycle(_)
        ));
    }

    #[test]
    fn test_non_table_prefab_cannot_be_merged() {
        let scenario = toml_value("[map]\nfrom = \"lists.moves\"\n");
        assert_eq!(
            resolve_value(&scenario, &catalog()).unwrap_err(),
            ResolveError::NotATable("lists.moves".into())
        );
    }
}
