//! Serializers that write whole-valued floats as JSON integers, so a
//! weight of 700 comes out as `700` rather than `700.0`.

use serde::Serializer;

// Beyond 2^53 an f64 no longer holds every integer exactly.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

pub(crate) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub(crate) fn serialize_opt<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize(value, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        #[serde(serialize_with = "super::serialize")]
        value: f64,
        #[serde(serialize_with = "super::serialize_opt")]
        maybe: Option<f64>,
    }

    fn json(value: f64, maybe: Option<f64>) -> String {
        serde_json::to_string(&Sample { value, maybe }).unwrap()
    }

    #[test]
    fn whole_numbers_are_integers() {
        assert_eq!(json(700.0, Some(0.0)), r#"{"value":700,"maybe":0}"#);
        assert_eq!(json(-2.0, None), r#"{"value":-2,"maybe":null}"#);
        assert_eq!(json(-0.0, Some(1.0)), r#"{"value":0,"maybe":1}"#);
    }

    #[test]
    fn fractions_stay_floats() {
        assert_eq!(json(0.25, Some(14.5)), r#"{"value":0.25,"maybe":14.5}"#);
        assert_eq!(json(1e300, None), r#"{"value":1e300,"maybe":null}"#);
    }
}
