//! JSON canónico: dos valores estructuralmente iguales producen exactamente
//! los mismos bytes, sin importar el orden de inserción de las claves.
//! Es el encoding determinístico sobre el que se calculan las claves de
//! cache.

use serde_json::{Map, Value};

/// Render canónico de un `Value`: objetos con claves ordenadas a cualquier
/// profundidad, salida compacta (sin whitespace).
pub fn to_canonical_json(value: &Value) -> String {
    sort_keys(value).to_string()
}

/// Reconstruye el valor reordenando las claves de cada objeto. Arrays
/// conservan su orden (es significativo); escalares pasan intactos. El
/// `Display` de `Value` ya emite compacto y con escaping JSON correcto.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        Value::Object(entries) => {
            let mut pairs: Vec<(&String, &Value)> = entries.iter().collect();
            pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
            let sorted: Map<String, Value> = pairs.into_iter()
                                                  .map(|(key, nested)| (key.clone(), sort_keys(nested)))
                                                  .collect();
            Value::Object(sorted)
        }
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::to_canonical_json;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_output() {
        let a = json!({ "b": 1, "a": 2 });
        let b = json!({ "a": 2, "b": 1 });
        assert_eq!(to_canonical_json(&a), to_canonical_json(&b));
        assert_eq!(to_canonical_json(&a), "{\"a\":2,\"b\":1}");
    }

    #[test]
    fn nested_values_are_canonical() {
        let val = json!({ "z": [1, { "y": null, "x": true }], "a": "s" });
        assert_eq!(to_canonical_json(&val), "{\"a\":\"s\",\"z\":[1,{\"x\":true,\"y\":null}]}");
    }

    #[test]
    fn array_order_is_preserved() {
        let val = json!([3, 1, 2]);
        assert_eq!(to_canonical_json(&val), "[3,1,2]");
    }

    #[test]
    fn scalars_render_plain() {
        assert_eq!(to_canonical_json(&json!(null)), "null");
        assert_eq!(to_canonical_json(&json!(false)), "false");
        assert_eq!(to_canonical_json(&json!(7)), "7");
        assert_eq!(to_canonical_json(&json!("texto")), "\"texto\"");
    }
}
