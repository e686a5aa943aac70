//! 宽松的输入转换
//!
//! 请求体字段既可能是 JSON 数字也可能是字符串，这里统一做“真值”判断、
//! 前缀数值解析（`"42abc"` 解析为 42）和文本转换。

use serde_json::Value;

/// 判断字段值是否为“真值”
///
/// `null`、`false`、`0`、`NaN` 和空字符串为假，其余（包括对象、数组）为真
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 将字段值转换为文本
///
/// 字符串原样返回，数字、布尔等取其 JSON 文本，如 `20251001` -> `"20251001"`
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 将字段值转换为整数
///
/// 数字向零截断，字符串取前导整数部分
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// 将字段值转换为浮点数
///
/// 字符串取前导的十进制数部分
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// 解析字符串开头的整数，如 `" 12px"` -> 12
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// 解析字符串开头的十进制数，如 `"99.90 BRL"` -> 99.9
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    // 指数部分必须完整，否则忽略
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} 应为假值");
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} 应为真值");
        }
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&json!("2025-10-01")), "2025-10-01");
        assert_eq!(to_text(&json!(20251001)), "20251001");
        assert_eq!(to_text(&json!(1.5)), "1.5");
        assert_eq!(to_text(&json!(true)), "true");
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(&json!(42)), Some(42));
        assert_eq!(to_int(&json!(12.9)), Some(12));
        assert_eq!(to_int(&json!(-3.7)), Some(-3));
        assert_eq!(to_int(&json!("42")), Some(42));
        assert_eq!(to_int(&json!("  7abc")), Some(7));
        assert_eq!(to_int(&json!("abc")), None);
        assert_eq!(to_int(&json!(true)), None);
        assert_eq!(to_int(&json!({"id": 1})), None);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_float(&json!(10.5)), Some(10.5));
        assert_eq!(to_float(&json!(3)), Some(3.0));
        assert_eq!(to_float(&json!("99.90")), Some(99.9));
        assert_eq!(to_float(&json!("1250.50 BRL")), Some(1250.5));
        assert_eq!(to_float(&json!(".5")), Some(0.5));
        assert_eq!(to_float(&json!("1e3")), Some(1000.0));
        assert_eq!(to_float(&json!("2e")), Some(2.0));
        assert_eq!(to_float(&json!("R$ 10")), None);
        assert_eq!(to_float(&json!(".")), None);
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("1"), Some(1));
        assert_eq!(parse_int_prefix("-15"), Some(-15));
        assert_eq!(parse_int_prefix("+8"), Some(8));
        assert_eq!(parse_int_prefix("3001.5"), Some(3001));
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }
}
