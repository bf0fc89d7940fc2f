use serde::Serialize;

use crate::cli::OutputFormat;

/// Encode a command result: pretty JSON for people, one line for pipes.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Raw => serde_json::to_string(value)?,
    };
    Ok(rendered)
}

/// Print a command result to stdout. Logs go to stderr.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use magma_core::responses::ScaffoldStats;

    use super::render;
    use crate::cli::OutputFormat;

    fn stats() -> ScaffoldStats {
        ScaffoldStats {
            controls: 2,
            documents: 5,
            evidence_requests: 0,
            auditors: 2,
        }
    }

    #[test]
    fn json_is_pretty() {
        let out = render(&stats(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["documents"], 5);
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn raw_is_one_line() {
        let out = render(&stats(), OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["auditors"], 2);
        assert!(!out.contains('\n'));
    }
}
