//! Last.fm Request Signature
//!
//! Implements the api_sig scheme required by Last.fm's authenticated
//! methods: parameters sorted by key, concatenated as key + value pairs,
//! the shared secret appended, the whole string MD5-hashed and rendered
//! as lowercase hex.

use md5::{Digest, Md5};

/// Compute the `api_sig` value for a parameter set.
///
/// Deterministic and order-independent: callers may pass parameters in
/// any order. The `format` parameter is never part of the signed set;
/// callers pass only the parameters that participate in the signature.
pub fn api_signature(params: &[(String, String)], shared_secret: &str) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut string_to_sign = String::new();
    for (key, value) in sorted {
        string_to_sign.push_str(key);
        string_to_sign.push_str(value);
    }
    string_to_sign.push_str(shared_secret);

    hex::encode(Md5::digest(string_to_sign.as_bytes()))
}
