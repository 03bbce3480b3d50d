use crate::error::XlsxError;

/// Parses `xl/sharedStrings.xml` into the table cells reference by
/// index. Each `<si>` entry is either a single `<t>` or a run of
/// `<r><t>...</t></r>` rich-text fragments, concatenated in document
/// order (styling within a shared string is not a layout signal this
/// reader cares about).
pub fn parse(xml: &str) -> Result<Vec<String>, XlsxError> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| XlsxError::XmlTree {
        part: "xl/sharedStrings.xml".to_string(),
        source,
    })?;

    let mut strings = Vec::new();
    for si in doc.root_element().children().filter(|n| n.has_tag_name("si")) {
        let mut text = String::new();
        collect_text(si, &mut text);
        strings.push(text);
    }
    Ok(strings)
}

fn collect_text(node: roxmltree::Node, out: &mut String) {
    for child in node.children() {
        if child.has_tag_name("t") {
            out.push_str(child.text().unwrap_or(""));
        } else if child.has_tag_name("r") {
            collect_text(child, out);
        }
    }
}
