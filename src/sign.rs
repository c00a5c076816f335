use crate::error::Result;
use chrono::Utc;
use md5::{Digest, Md5};
use rand::Rng;
use serde_json::{Map, Value};

/// i 西电应用密钥
pub const APP_KEY: &str = "GiITvn";
/// 西安电子科技大学在 i 西电后端的学校 ID
pub const SCHOOL_ID: i64 = 190;

/// Current Unix timestamp in milliseconds.
pub fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Joins the object's direct properties as `key=value` pairs sorted
/// lexicographically by key, separated by `&`. String values are taken
/// verbatim (no JSON quoting or escaping); other values use their JSON
/// text. The server recomputes the signature over this exact form, so the
/// join must be reproduced bit-for-bit.
pub fn canonicalize(obj: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = obj.keys().collect();
    keys.sort();
    keys.iter()
        .map(|k| format!("{}={}", k, value_to_string(&obj[k.as_str()])))
        .collect::<Vec<_>>()
        .join("&")
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Signs a parameter object: 32-char lowercase hex MD5 of the UTF-8 bytes
/// of the canonical join.
pub fn get_sign(obj: &Map<String, Value>) -> String {
    md5_hex(canonicalize(obj).as_bytes())
}

fn md5_hex(input: &[u8]) -> String {
    let digest = Md5::digest(input);
    let mut out = String::with_capacity(32);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Wraps a parameter object into the signed request envelope expected by
/// the i 西电 backend and returns its compact JSON text.
///
/// The envelope carries `appKey`, the compact JSON of `param` as a single
/// string value, the current epoch-millis `time` and a `secure` flag;
/// `schoolId` rides along only for school-specific requests. `sign` is
/// computed over every other field before it is inserted.
pub fn build_query(
    param: &Map<String, Value>,
    specific_school: bool,
    accept_secure: bool,
) -> Result<String> {
    let mut envelope = Map::new();
    envelope.insert("appKey".to_string(), Value::from(APP_KEY));
    envelope.insert(
        "param".to_string(),
        Value::from(serde_json::to_string(param)?),
    );
    envelope.insert("time".to_string(), Value::from(timestamp_millis()));
    envelope.insert(
        "secure".to_string(),
        Value::from(if specific_school { 1 } else { 0 }),
    );
    if accept_secure {
        envelope.insert("acceptSecure".to_string(), Value::from("aes"));
    }
    if specific_school {
        envelope.insert("schoolId".to_string(), Value::from(SCHOOL_ID));
    }
    let sign = get_sign(&envelope);
    envelope.insert("sign".to_string(), Value::from(sign));
    // TODO: encrypt the param payload when acceptSecure is set
    serde_json::to_string(&envelope).map_err(Into::into)
}

/// Generates the correlation Uuid the i 西电 backend expects:
/// `"web"` followed by two independent 8-hex-char fragments.
pub fn get_uuid() -> String {
    format!("web{}{}", uuid_fragment(), uuid_fragment())
}

fn uuid_fragment() -> String {
    let frac: f64 = rand::thread_rng().gen();
    let digits = format!("{frac:.10}");
    fragment_from(&digits[2..10], timestamp_millis())
}

/// Concatenates eight random decimal digits with the low-order ten digits
/// of the timestamp, reinterprets the result as a base-16 numeral and
/// keeps exactly eight hex characters.
fn fragment_from(frac_digits: &str, timestamp: i64) -> String {
    let ts = timestamp.to_string();
    let tail = &ts[ts.len().saturating_sub(10)..];
    let n: u64 = format!("{frac_digits}{tail}").parse().unwrap_or(0);
    let mut hex = format!("{n:08x}");
    hex.truncate(8);
    hex
}
