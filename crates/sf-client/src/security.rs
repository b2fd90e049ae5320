//! Security utilities for Salesforce API operations.
//!
//! ## SOQL Injection Prevention
//!
//! User-provided values placed in SOQL string literals must be escaped with
//! [`soql::escape_string`] or wrapped with [`soql::literal`]:
//!
//! ```rust
//! use busbar_sf_client::security::soql;
//!
//! let query = format!(
//!     "SELECT Id FROM SourceMember WHERE LastModifiedBy.Name = {}",
//!     soql::literal("O'Brien")
//! );
//! assert_eq!(
//!     query,
//!     "SELECT Id FROM SourceMember WHERE LastModifiedBy.Name = 'O\\'Brien'"
//! );
//! ```
//!
//! ## XML Escaping
//!
//! Text placed in generated XML documents (such as `package.xml`) goes
//! through [`xml::escape`].

/// SOQL escaping utilities for injection prevention.
pub mod soql {
    /// Escape a string value for use in SOQL queries.
    ///
    /// This function escapes characters that have special meaning in SOQL string literals:
    /// - Single quotes (`'`) are escaped to (`\'`)
    /// - Backslashes (`\`) are escaped to (`\\`)
    /// - Newlines are escaped to (`\n`)
    /// - Carriage returns are escaped to (`\r`)
    /// - Tabs are escaped to (`\t`)
    ///
    /// # Example
    ///
    /// ```rust
    /// use busbar_sf_client::security::soql;
    ///
    /// let safe = soql::escape_string("O'Brien & Co.");
    /// assert_eq!(safe, "O\\'Brien & Co.");
    /// ```
    ///
    /// Without escaping, an attacker could manipulate queries:
    /// ```text
    /// Input: "' OR Name LIKE '%"
    /// Unsafe: ... WHERE LastModifiedBy.Name = '' OR Name LIKE '%'
    /// Safe:   ... WHERE LastModifiedBy.Name = '\' OR Name LIKE \'%'
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escape a value and wrap it in single quotes as a SOQL string literal.
    ///
    /// ```rust
    /// use busbar_sf_client::security::soql;
    ///
    /// assert_eq!(soql::literal("ApexClass"), "'ApexClass'");
    /// ```
    #[must_use]
    pub fn literal(value: &str) -> String {
        format!("'{}'", escape_string(value))
    }
}

/// XML escaping utilities for generated metadata documents.
pub mod xml {
    /// Escape a string for safe inclusion in XML content.
    ///
    /// This escapes the five predefined XML entities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use busbar_sf_client::security::xml;
    ///
    /// let safe = xml::escape("Hello <World> & 'Friends'");
    /// assert_eq!(safe, "Hello &lt;World&gt; &amp; &apos;Friends&apos;");
    /// ```
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod soql_tests {
        use super::soql::*;

        #[test]
        fn test_escape_string_basic() {
            assert_eq!(escape_string("hello"), "hello");
            assert_eq!(escape_string("O'Brien"), "O\\'Brien");
            assert_eq!(escape_string("test\\path"), "test\\\\path");
        }

        #[test]
        fn test_escape_string_injection_attempts() {
            assert_eq!(escape_string("' OR '1'='1"), "\\' OR \\'1\\'=\\'1");
            assert_eq!(
                escape_string("' OR MemberType != '"),
                "\\' OR MemberType != \\'"
            );
        }

        #[test]
        fn test_escape_string_special_chars() {
            assert_eq!(escape_string("line1\nline2"), "line1\\nline2");
            assert_eq!(escape_string("col1\tcol2"), "col1\\tcol2");
            assert_eq!(escape_string("text\r\n"), "text\\r\\n");
        }

        #[test]
        fn test_literal() {
            assert_eq!(literal("Jane Doe"), "'Jane Doe'");
            assert_eq!(literal("it's"), "'it\\'s'");
            assert_eq!(literal(""), "''");
        }
    }

    mod xml_tests {
        use super::xml::*;

        #[test]
        fn test_escape() {
            assert_eq!(escape("hello"), "hello");
            assert_eq!(escape("<tag>"), "&lt;tag&gt;");
            assert_eq!(escape("&amp;"), "&amp;amp;");
            assert_eq!(escape("\"quoted\""), "&quot;quoted&quot;");
            assert_eq!(escape("it's"), "it&apos;s");
            assert_eq!(
                escape("<script>alert('xss')</script>"),
                "&lt;script&gt;alert(&apos;xss&apos;)&lt;/script&gt;"
            );
        }
    }
}
