use serde::{de, Deserialize, Deserializer};

// Clients send ids and difficulties either as JSON numbers or as strings
// (form inputs). Empty strings, `0` and `null` all mean "not provided".
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Number(i64),
    String(String),
}

pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None | Some(StringOrNumber::Number(0)) => Ok(None),
        Some(StringOrNumber::Number(n)) => Ok(Some(n.to_string())),
        Some(StringOrNumber::String(s)) if s.is_empty() => Ok(None),
        Some(StringOrNumber::String(s)) => Ok(Some(s)),
    }
}

pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(StringOrNumber::Number(n)) => n,
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(StringOrNumber::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&s), &"an integer"))?,
    };
    Ok(Some(number).filter(|n| *n != 0))
}

pub fn optional_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_int(deserializer)?
        .map(|n| {
            i32::try_from(n)
                .map_err(|_| de::Error::invalid_value(de::Unexpected::Signed(n), &"a 32-bit integer"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "non_empty_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "string_or_number")]
        category: Option<String>,
        #[serde(default, deserialize_with = "optional_i32")]
        difficulty: Option<i32>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn absent_and_null_fields_are_none() {
        let p = probe(r#"{"text": null}"#);
        assert_eq!(p.text, None);
        assert_eq!(p.category, None);
        assert_eq!(p.difficulty, None);
    }

    #[test]
    fn empty_values_are_none() {
        let p = probe(r#"{"text": "", "category": "", "difficulty": 0}"#);
        assert_eq!(p.text, None);
        assert_eq!(p.category, None);
        assert_eq!(p.difficulty, None);

        let p = probe(r#"{"category": 0, "difficulty": ""}"#);
        assert_eq!(p.category, None);
        assert_eq!(p.difficulty, None);
    }

    #[test]
    fn numbers_and_numeric_strings_are_accepted() {
        let p = probe(r#"{"category": 3, "difficulty": "4"}"#);
        assert_eq!(p.category.as_deref(), Some("3"));
        assert_eq!(p.difficulty, Some(4));

        let p = probe(r#"{"category": "5", "difficulty": 2}"#);
        assert_eq!(p.category.as_deref(), Some("5"));
        assert_eq!(p.difficulty, Some(2));
    }

    #[test]
    fn non_numeric_difficulty_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"difficulty": "hard"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"difficulty": 99999999999}"#).is_err());
    }
}
