//! Log redaction for clinical values.
//!
//! Log lines must never carry what the user typed into the form or the
//! verdict the model produced. Everything written through
//! [`RedactingMakeWriter`] passes through [`redact`] first, which masks:
//! - `Field: value` / `Field=value` pairs for every clinical field
//! - one-hot indicator column names (`Sex_M`, `ST_Slope_Flat`, ...)
//! - verdict markers and banners
//!
//! Field names alone are left intact so logs stay useful for debugging.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Longest line redacted in one piece; longer input is cut and marked.
const MAX_LINE_BYTES: usize = 16 * 1024;

const NUMERIC_FIELDS: &str =
    r"Age|RestingBP|Resting BP|Cholesterol|FastingBS|Fasting BS > 120|MaxHR|Max Heart Rate|Oldpeak";
const CATEGORICAL_FIELDS: &str = r"Sex|ChestPainType|Chest Pain Type|RestingECG|Resting ECG|ExerciseAngina|Exercise Angina|ST_Slope|ST Slope";
const INDICATOR_PREFIXES: &str = r"Sex|ChestPainType|RestingECG|ExerciseAngina|ST_Slope";

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Rules {
    set: RegexSet,
    rules: Vec<Rule>,
}

fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| {
        // Indicator names go first so `Sex_M=1` is not mistaken for a `Sex` pair.
        let table: Vec<(String, &'static str)> = vec![
            (
                format!(r"\b({INDICATOR_PREFIXES})_[A-Za-z]+\b"),
                "${1}_[REDACTED]",
            ),
            (
                format!(r"\b({NUMERIC_FIELDS}|{CATEGORICAL_FIELDS})(\s*[:=]\s*)[^\s,;)\]}}]+"),
                "${1}${2}[REDACTED]",
            ),
            (r"\[(?:HIGH|LOW) RISK\]".to_string(), "[REDACTED-VERDICT]"),
            (
                r"(?i)\b(?:high|low) risk(?: detected| profile)?\b".to_string(),
                "[REDACTED-VERDICT]",
            ),
        ];

        let set = RegexSet::new(table.iter().map(|(p, _)| p.as_str())).expect("Valid regex set");
        let rules = table
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(&pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Rules { set, rules }
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Mask clinical values and verdicts in `input`.
#[must_use]
pub fn redact(input: &str) -> String {
    redact_with_limit(input, MAX_LINE_BYTES)
}

fn redact_with_limit(input: &str, max_bytes: usize) -> String {
    let rules = rules();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    if rules.set.is_match(prefix) {
        for rule in &rules.rules {
            result = rule.regex.replace_all(&result, rule.replacement).into_owned();
        }
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer that redacts each formatted line before
/// handing it to the wrapped writer.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct RedactingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> RedactingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let redacted = redact(&String::from_utf8_lossy(&line));
            self.inner.write_all(redacted.as_bytes())?;
        }
        Ok(())
    }

    fn flush_rest(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let redacted = redact(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(redacted.as_bytes())?;
            self.buffer.clear();
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        if self.buffer.len() > MAX_LINE_BYTES * 2 {
            self.flush_rest()?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        self.flush_rest()?;
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        // A line without a trailing newline must still reach the sink.
        let _ = self.flush_rest();
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_redact_field_values() {
        let out = redact("submitted Age=54 RestingBP: 150 Oldpeak=2.3");
        assert!(!out.contains("54"));
        assert!(!out.contains("150"));
        assert!(!out.contains("2.3"));
        assert!(out.contains("Age=[REDACTED]"));
        assert!(out.contains("RestingBP: [REDACTED]"));
    }

    #[test]
    fn test_redact_report_lines() {
        let out = redact("- Resting BP: 130 mm Hg");
        assert_eq!(out, "- Resting BP: [REDACTED] mm Hg");

        let out = redact("- Chest Pain Type: ASY");
        assert_eq!(out, "- Chest Pain Type: [REDACTED]");
    }

    #[test]
    fn test_redact_indicator_columns() {
        let out = redact("set Sex_M and ST_Slope_Flat, ChestPainType_ASY");
        assert_eq!(
            out,
            "set Sex_[REDACTED] and ST_Slope_[REDACTED], ChestPainType_[REDACTED]"
        );
    }

    #[test]
    fn test_redact_verdicts() {
        assert_eq!(
            redact("[HIGH RISK] - Immediate consultation recommended."),
            "[REDACTED-VERDICT] - Immediate consultation recommended."
        );
        assert_eq!(redact("Low Risk Profile"), "[REDACTED-VERDICT]");
        assert_eq!(redact("verdict: High Risk Detected"), "verdict: [REDACTED-VERDICT]");
    }

    #[test]
    fn test_field_names_alone_survive() {
        let line = "DEBUG numeric field not in schema, dropped field=\"Cholesterol\"";
        let out = redact(line);
        assert!(out.contains("Cholesterol"));
        assert_eq!(redact("Model artifacts loaded"), "Model artifacts loaded");
    }

    #[test]
    fn test_truncates_large_input() {
        let out = redact_with_limit("Age=40 and more text", 6);
        assert!(out.ends_with("[TRUNCATED]"));
    }

    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Sink {
        type Writer = Sink;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_writer_redacts_split_writes() {
        let sink = Sink::default();
        let make = RedactingMakeWriter::new(sink.clone());

        {
            let mut writer = make.make_writer();
            writer.write_all(b"Choles").expect("write");
            writer.write_all(b"terol=289\nnext Sex_F\n").expect("write");
            writer.flush().expect("flush");
        }

        let written = String::from_utf8(sink.0.lock().expect("lock").clone()).expect("utf8");
        assert_eq!(written, "Cholesterol=[REDACTED]\nnext Sex_[REDACTED]\n");
    }
}
