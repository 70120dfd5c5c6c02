//! Line-preserving ini document
//!
//! Only the lines this tool adds are ever touched; everything else is
//! written back exactly as read.

/// Action prefixes the engine allows in front of array keys
const ACTION_PREFIXES: &[char] = &['+', '-', '.', '!'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniDocument {
    lines: Vec<String>,
    newline: &'static str,
}

impl IniDocument {
    pub fn parse(content: &str) -> Self {
        let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            lines: content.lines().map(str::to_string).collect(),
            newline,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line range `[header, end)` of a section, header included
    fn section_range(&self, section: &str) -> Option<(usize, usize)> {
        let header = self
            .lines
            .iter()
            .position(|line| section_name(line).is_some_and(|name| name.eq_ignore_ascii_case(section)))?;
        let end = self.lines[header + 1..]
            .iter()
            .position(|line| section_name(line).is_some())
            .map(|offset| header + 1 + offset)
            .unwrap_or(self.lines.len());
        Some((header, end))
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.section_range(section).is_some()
    }

    /// Whether `key=value` is present in `section`, ignoring case and action prefixes
    pub fn contains_entry(&self, section: &str, key: &str, value: &str) -> bool {
        let Some((header, end)) = self.section_range(section) else {
            return false;
        };
        self.lines[header + 1..end]
            .iter()
            .filter_map(|line| parse_entry(line))
            .any(|(k, v)| k.eq_ignore_ascii_case(key) && v.eq_ignore_ascii_case(value))
    }

    /// Append `line` as the last entry of `section`, creating the section at
    /// the end of the document when absent
    pub fn append_to_section(&mut self, section: &str, line: String) {
        match self.section_range(section) {
            Some((header, end)) => {
                // Keep blank separator lines after the new entry
                let mut insert_at = end;
                while insert_at > header + 1 && self.lines[insert_at - 1].trim().is_empty() {
                    insert_at -= 1;
                }
                self.lines.insert(insert_at, line);
            }
            None => {
                if self.lines.last().is_some_and(|l| !l.trim().is_empty()) {
                    self.lines.push(String::new());
                }
                self.lines.push(format!("[{section}]"));
                self.lines.push(line);
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push_str(self.newline);
        }
        out
    }
}

fn section_name(line: &str) -> Option<&str> {
    let line = line.trim();
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim().trim_start_matches(ACTION_PREFIXES), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "; user settings\n[/Script/Engine.Foo]\nBar=1\n\n[BlueprintNativizationSettings]\n+ExcludedFolderPaths=/Other/\n\n[Last]\nX=y\n";

    #[test]
    fn test_render_preserves_content() {
        assert_eq!(IniDocument::parse(SAMPLE).render(), SAMPLE);
    }

    #[test]
    fn test_contains_entry_ignores_case_and_prefix() {
        let doc = IniDocument::parse(SAMPLE);
        assert!(doc.contains_entry("blueprintnativizationsettings", "excludedfolderpaths", "/OTHER/"));
        assert!(!doc.contains_entry("BlueprintNativizationSettings", "ExcludedFolderPaths", "/MyMod/"));
        assert!(!doc.contains_entry("Last", "ExcludedFolderPaths", "/Other/"));
    }

    #[test]
    fn test_append_goes_to_end_of_existing_section() {
        let mut doc = IniDocument::parse(SAMPLE);
        doc.append_to_section(
            "BlueprintNativizationSettings",
            "+ExcludedFolderPaths=/MyMod/".to_string(),
        );
        assert_eq!(
            doc.render(),
            "; user settings\n[/Script/Engine.Foo]\nBar=1\n\n[BlueprintNativizationSettings]\n+ExcludedFolderPaths=/Other/\n+ExcludedFolderPaths=/MyMod/\n\n[Last]\nX=y\n"
        );
    }

    #[test]
    fn test_append_creates_missing_section() {
        let mut doc = IniDocument::parse("[A]\nk=v");
        doc.append_to_section("B", "+K=V".to_string());
        assert_eq!(doc.render(), "[A]\nk=v\n\n[B]\n+K=V\n");

        let mut empty = IniDocument::parse("");
        empty.append_to_section("B", "+K=V".to_string());
        assert_eq!(empty.render(), "[B]\n+K=V\n");
    }

    #[test]
    fn test_crlf_documents_stay_crlf() {
        let mut doc = IniDocument::parse("[A]\r\nk=v\r\n");
        doc.append_to_section("A", "+x=y".to_string());
        assert_eq!(doc.render(), "[A]\r\nk=v\r\n+x=y\r\n");
    }
}
