use anyhow::{Context, Result};
use std::fs;
use whitelist::WhitelistEntry;

/// Read a whitelist snapshot: a JSON array of rows, in commitment order.
pub fn load(path: &str) -> Result<Vec<WhitelistEntry>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading whitelist {path}"))?;
    parse(&data).with_context(|| format!("parsing whitelist {path}"))
}

pub fn parse(data: &str) -> Result<Vec<WhitelistEntry>> {
    Ok(serde_json::from_str(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_file_order() {
        let rows = parse(r#"[{"address":"0xbb","amount":"20"},{"address":"0xaa"}]"#).unwrap();
        assert_eq!(
            rows,
            vec![
                WhitelistEntry::new("0xbb", "20"),
                WhitelistEntry::new("0xaa", "1"),
            ]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(load(path.to_str().unwrap()).is_err());
    }
}
