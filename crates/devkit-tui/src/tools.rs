#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

impl Tool {
    pub fn link(&self) -> String {
        format!("devkit://tools/{}", self.id)
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.category.to_lowercase().contains(&query)
            || self.id.contains(&query)
    }
}

const fn tool(id: &'static str, name: &'static str, category: &'static str) -> Tool {
    Tool { id, name, category }
}

pub const TOOLS: &[Tool] = &[
    tool("json-formatter", "JSON Formatter", "Formatters"),
    tool("sql-formatter", "SQL Formatter", "Formatters"),
    tool("base64", "Base64 Encode/Decode", "Encoders"),
    tool("url-encode", "URL Encode/Decode", "Encoders"),
    tool("html-entities", "HTML Entities", "Encoders"),
    tool("jwt-decoder", "JWT Decoder", "Encoders"),
    tool("hash", "Hash Generator", "Crypto"),
    tool("hmac", "HMAC Generator", "Crypto"),
    tool("aes", "AES Encrypt/Decrypt", "Crypto"),
    tool("uuid", "UUID Generator", "Generators"),
    tool("qr-code", "QR Code Generator", "Generators"),
    tool("barcode", "Barcode Generator", "Generators"),
    tool("color-picker", "Color Picker", "Colors"),
    tool("color-converter", "Color Converter", "Colors"),
    tool("timestamp", "Unix Timestamp Converter", "Converters"),
    tool("number-base", "Number Base Converter", "Converters"),
    tool("yaml-json", "YAML to JSON", "Converters"),
    tool("text-diff", "Text Diff Viewer", "Text"),
    tool("regex-tester", "Regex Tester", "Text"),
    tool("case-converter", "Case Converter", "Text"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_ids_are_unique() {
        let mut ids: Vec<&str> = TOOLS.iter().map(|tool| tool.id).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), TOOLS.len());
    }

    #[test]
    fn test_matches_name_and_category() {
        let hmac = TOOLS.iter().find(|tool| tool.id == "hmac").unwrap();

        assert!(hmac.matches(""));
        assert!(hmac.matches("HMAC"));
        assert!(hmac.matches("crypto"));
        assert!(!hmac.matches("color"));
    }
}
