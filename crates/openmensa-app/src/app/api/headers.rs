//! Custom response headers (`X-OM-<Key>`).

use openmensa_core::constants::CUSTOM_HEADER_PREFIX;

/// ## Summary
/// Builds the header name for a snake case key: the key is camelized,
/// everything but letters is dropped and each capital starts a new
/// hyphenated word, so `api_version` becomes `X-OM-Api-Version`.
#[must_use]
pub fn custom_header_name(key: &str) -> String {
    let mut name = String::from(CUSTOM_HEADER_PREFIX);
    for word in key.split('_') {
        let mut capitalize = true;
        for c in word.chars().filter(char::is_ascii_alphabetic) {
            if capitalize {
                name.push('-');
                name.push(c.to_ascii_uppercase());
                capitalize = false;
            } else if c.is_ascii_uppercase() {
                name.push('-');
                name.push(c);
            } else {
                name.push(c);
            }
        }
    }
    name
}
