//! Query URL construction
//!
//! Keys and values are serialized separately with form-urlencoded byte
//! encoding, so a service key containing `+`, `/` or `=` survives intact.

use url::form_urlencoded::byte_serialize;

/// Build `base_url?k1=v1&k2=v2` with every key and value encoded on its own.
pub fn build_url<K, V>(base_url: &str, parameters: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if parameters.is_empty() {
        return base_url.to_string();
    }

    let query = parameters
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key.as_ref()), encode(value.as_ref())))
        .collect::<Vec<_>>()
        .join("&");

    format!("{base_url}?{query}")
}

fn encode(component: &str) -> String {
    byte_serialize(component.as_bytes()).collect()
}
