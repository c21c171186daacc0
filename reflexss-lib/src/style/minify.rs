use crate::error::{Result, StyleError};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet as LightningStyleSheet};

/// Re-prints an emitted document through lightningcss with minification on.
pub fn minify(css_text: &str) -> Result<String> {
    let sheet = LightningStyleSheet::parse(css_text, ParserOptions::default())
        .map_err(|e| StyleError::Minify(e.to_string()))?;

    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| StyleError::Minify(e.to_string()))?;

    Ok(printed.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_strips_whitespace() {
        let out = minify(".box { width: 10px; }\n\n.item { color: red; }").unwrap();
        assert_eq!(out, ".box{width:10px}.item{color:red}");
    }

    #[test]
    fn test_minify_reports_unparseable_input() {
        assert!(matches!(minify(".a..b { color: red; }"), Err(StyleError::Minify(_))));
    }
}
