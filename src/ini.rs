//! Minimal sectioned `key=value` reader for `hmac.ini`.
//!
//! Lines before the first `[section]` marker belong to the default section,
//! addressed by the empty name. Section names and keys compare
//! case-insensitively; the spelling seen first is kept for `keys()`.
//! Values carry the HMAC key, so they are wiped when replaced or dropped.

use crate::error::Error;
use std::fs;
use std::path::Path;
use zeroize::{Zeroize, Zeroizing};

pub const DEFAULT_SECTION: &str = "";

#[derive(Clone, Debug, Default)]
struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    fn position(&self, key: &str) -> Option<usize> {
        let key = fold(key);
        self.entries.iter().position(|(k, _)| fold(k) == key)
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.position(key) {
            Some(i) => {
                self.entries[i].1.zeroize();
                self.entries[i].1 = value.to_owned();
            }
            None => self.entries.push((key.to_owned(), value.to_owned())),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }
}

impl Zeroize for Section {
    fn zeroize(&mut self) {
        for (_, value) in &mut self.entries {
            value.zeroize();
        }
    }
}

impl Drop for Section {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[derive(Clone, Debug)]
pub struct Ini {
    // Index 0 is always the default section.
    sections: Vec<(String, Section)>,
}

impl Default for Ini {
    fn default() -> Self {
        Self {
            sections: vec![(DEFAULT_SECTION.to_owned(), Section::default())],
        }
    }
}

impl Zeroize for Ini {
    /// Wipe every value; keys and section names stay.
    fn zeroize(&mut self) {
        for (_, section) in &mut self.sections {
            section.zeroize();
        }
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}

impl Ini {
    /// Read and parse a config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = Zeroizing::new(fs::read_to_string(path).map_err(Error::file("read config", path))?);
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut ini = Self::default();
        let mut current = 0usize;

        for line in text
            .split('\n')
            .filter(|l| !l.trim().is_empty())
            .map(str::trim)
        {
            if line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current = ini.open_section(name);
                continue;
            }

            let section = &mut ini.sections[current].1;
            match line.split_once('=') {
                Some((key, value)) => section.set(key, value),
                None => section.set(line, ""),
            }
        }

        ini
    }

    /// Start a fresh section. Re-opening a known name discards what it held.
    fn open_section(&mut self, name: &str) -> usize {
        let folded = fold(name);
        match self.sections.iter().position(|(n, _)| fold(n) == folded) {
            Some(i) => {
                self.sections[i].1 = Section::default();
                i
            }
            None => {
                self.sections.push((name.to_owned(), Section::default()));
                self.sections.len() - 1
            }
        }
    }

    fn section(&self, name: &str) -> Option<&Section> {
        let folded = fold(name);
        self.sections
            .iter()
            .find(|(n, _)| fold(n) == folded)
            .map(|(_, s)| s)
    }

    /// Value from the default section, or `""`.
    pub fn value(&self, key: &str) -> &str {
        self.value_or(key, DEFAULT_SECTION, "")
    }

    pub fn value_in(&self, key: &str, section: &str) -> &str {
        self.value_or(key, section, "")
    }

    pub fn value_or<'a>(&'a self, key: &str, section: &str, default: &'a str) -> &'a str {
        self.section(section)
            .and_then(|s| s.get(key))
            .unwrap_or(default)
    }

    pub fn contains_key(&self, section: &str, key: &str) -> bool {
        self.section(section)
            .map(|s| s.position(key).is_some())
            .unwrap_or(false)
    }

    /// Keys of a section in file order; empty for an unknown section.
    pub fn keys(&self, section: &str) -> Vec<&str> {
        self.section(section)
            .map(|s| s.entries.iter().map(|(k, _)| k.as_str()).collect())
            .unwrap_or_default()
    }

    /// Named sections in file order. The default section is not listed.
    pub fn sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_section_with_comment() {
        let ini = Ini::parse("[Sec]\nKey=123\n;comment\nPath=/tmp/out");
        assert_eq!(ini.value_in("Key", "Sec"), "123");
        assert_eq!(ini.value_in("Path", "Sec"), "/tmp/out");
        assert_eq!(ini.keys("Sec"), vec!["Key", "Path"]);
        assert_eq!(ini.value_or("Missing", "Sec", "fallback"), "fallback");
        assert_eq!(ini.value_or("Key", "Nope", "fallback"), "fallback");
        assert_eq!(ini.value_in("Key", "Nope"), "");
    }

    #[test]
    fn lines_before_first_marker_go_to_default_section() {
        let ini = Ini::parse("Key=abc\r\nPath=/out\r\n[Other]\nKey=zzz\n");
        assert_eq!(ini.value("Key"), "abc");
        assert_eq!(ini.value("Path"), "/out");
        assert_eq!(ini.value_in("Key", "Other"), "zzz");
        assert_eq!(ini.sections(), vec!["Other"]);
    }

    #[test]
    fn lookups_ignore_case() {
        let ini = Ini::parse("KEY=1\n[MixedCase]\npath=/x\n");
        assert_eq!(ini.value("key"), "1");
        assert_eq!(ini.value_in("PATH", "mixedcase"), "/x");
        assert!(ini.contains_key("MIXEDCASE", "Path"));
        assert!(!ini.contains_key("", "Path"));
    }

    #[test]
    fn split_at_first_equals_without_trimming() {
        let ini = Ini::parse("Key=a=b\nName = v\nFlag\n");
        assert_eq!(ini.value("Key"), "a=b");
        assert_eq!(ini.value("Name "), " v");
        assert_eq!(ini.value("Name"), "");
        assert!(ini.contains_key("", "Flag"));
        assert_eq!(ini.value_or("Flag", "", "unset"), "");
    }

    #[test]
    fn blank_lines_and_indentation_ignored() {
        let ini = Ini::parse("\n   \n\t Key=v \t\n\n");
        assert_eq!(ini.value("Key"), "v");
        assert_eq!(ini.keys(""), vec!["Key"]);
    }

    #[test]
    fn later_duplicates_win() {
        let ini = Ini::parse("Key=1\nkey=2\n");
        assert_eq!(ini.value("Key"), "2");
        assert_eq!(ini.keys(""), vec!["Key"]);
    }

    #[test]
    fn reopened_section_starts_fresh() {
        let ini = Ini::parse("[A]\nx=1\ny=2\n[B]\nz=3\n[a]\nx=9\n");
        assert_eq!(ini.value_in("x", "A"), "9");
        assert_eq!(ini.value_in("y", "A"), "");
        assert_eq!(ini.sections(), vec!["A", "B"]);
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let ini = Ini::parse("\u{feff}Key=k\n");
        assert_eq!(ini.value("Key"), "k");
    }

    #[test]
    fn zeroize_wipes_values_only() {
        let mut ini = Ini::parse("Key=secret\n[Sec]\nKey=other\n");
        ini.zeroize();
        assert_eq!(ini.value("Key"), "");
        assert_eq!(ini.value_or("Key", "Sec", "unset"), "");
        assert!(ini.contains_key("Sec", "Key"));
        assert_eq!(ini.sections(), vec!["Sec"]);
    }

    #[test]
    fn overwritten_value_is_replaced() {
        let mut section = Section::default();
        section.set("Key", "first-secret");
        section.set("key", "2");
        assert_eq!(section.get("KEY"), Some("2"));
        assert_eq!(section.entries.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Ini::load(&dir.path().join("hmac.ini")).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
        assert!(err.to_string().contains("hmac.ini"));
    }
}
