//! YAML rendering.

use std::io::Write;

use serde_json::Value;

use crate::error::RenderResult;

pub(super) fn render_yaml<W: Write>(out: &mut W, value: &Value) -> RenderResult<()> {
    let text = serde_yaml::to_string(value)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_renders_block_style() {
        let mut out = Vec::new();
        render_yaml(&mut out, &json!({"id": "abc", "n": 2})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id: abc\nn: 2\n");
    }

    #[test]
    fn test_sequence_members() {
        let mut out = Vec::new();
        render_yaml(&mut out, &json!({"tags": ["a", "b"]})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "tags:\n- a\n- b\n");
    }
}
