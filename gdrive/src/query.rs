//! Drive search query strings.
//!
//! Only equality on `name`/`mimeType` and parent containment are needed,
//! always combined with `and`.

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Quotes a string literal for use in a query, escaping `\` and `'`.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Matches folders named exactly `name`.
pub fn folder(name: &str) -> String {
    format!(
        "name={} and mimeType={}",
        quote(name),
        quote(FOLDER_MIME_TYPE)
    )
}

/// Matches non-folder entries named exactly `name` inside the folder `parent`.
pub fn files_in(name: &str, parent: &str) -> String {
    format!(
        "name={} and {} in parents and mimeType!={}",
        quote(name),
        quote(parent),
        quote(FOLDER_MIME_TYPE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_query() {
        assert_eq!(
            folder("app"),
            "name='app' and mimeType='application/vnd.google-apps.folder'"
        );
    }

    #[test]
    fn files_query() {
        assert_eq!(
            files_in("1.2.3.zip", "abc"),
            "name='1.2.3.zip' and 'abc' in parents and mimeType!='application/vnd.google-apps.folder'"
        );
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
    }
}
