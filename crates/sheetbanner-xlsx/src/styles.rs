use crate::error::XlsxError;
use sheetbanner_model::BorderEdges;
use std::collections::HashMap;

/// Which of a cell's four border edges carry a non-`"none"` style
/// attribute. The core only cares whether an edge is styled at all,
/// not its weight or color.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderStyle {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl From<BorderStyle> for BorderEdges {
    fn from(style: BorderStyle) -> Self {
        BorderEdges {
            top: style.top,
            right: style.right,
            bottom: style.bottom,
            left: style.left,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CellXf {
    num_fmt_id: u32,
    border_id: u32,
}

/// The parsed `xl/styles.xml`: enough to resolve a cell's `s` (style)
/// index to its border edges and whether its number format renders a
/// date.
pub struct Styles {
    cell_xfs: Vec<CellXf>,
    borders: Vec<BorderStyle>,
    custom_num_fmts: HashMap<u32, String>,
}

impl Styles {
    pub fn parse(xml: &str) -> Result<Self, XlsxError> {
        let doc = roxmltree::Document::parse(xml).map_err(|source| XlsxError::XmlTree {
            part: "xl/styles.xml".to_string(),
            source,
        })?;
        let root = doc.root_element();

        let mut custom_num_fmts = HashMap::new();
        if let Some(num_fmts) = root.children().find(|n| n.has_tag_name("numFmts")) {
            for fmt in num_fmts.children().filter(|n| n.has_tag_name("numFmt")) {
                let id: u32 = fmt.attribute("numFmtId").unwrap_or("0").parse().unwrap_or(0);
                let code = fmt.attribute("formatCode").unwrap_or("").to_string();
                custom_num_fmts.insert(id, code);
            }
        }

        let mut borders = Vec::new();
        if let Some(borders_el) = root.children().find(|n| n.has_tag_name("borders")) {
            for border in borders_el.children().filter(|n| n.has_tag_name("border")) {
                borders.push(BorderStyle {
                    top: edge_is_styled(border, "top"),
                    right: edge_is_styled(border, "right"),
                    bottom: edge_is_styled(border, "bottom"),
                    left: edge_is_styled(border, "left"),
                });
            }
        }

        let mut cell_xfs = Vec::new();
        if let Some(xfs) = root.children().find(|n| n.has_tag_name("cellXfs")) {
            for xf in xfs.children().filter(|n| n.has_tag_name("xf")) {
                cell_xfs.push(CellXf {
                    num_fmt_id: xf.attribute("numFmtId").unwrap_or("0").parse().unwrap_or(0),
                    border_id: xf.attribute("borderId").unwrap_or("0").parse().unwrap_or(0),
                });
            }
        }

        Ok(Self {
            cell_xfs,
            borders,
            custom_num_fmts,
        })
    }

    pub fn border_for_style(&self, style_index: u32) -> BorderStyle {
        let border_id = self
            .cell_xfs
            .get(style_index as usize)
            .map_or(0, |xf| xf.border_id);
        self.borders.get(border_id as usize).copied().unwrap_or_default()
    }

    pub fn is_date_style(&self, style_index: u32) -> bool {
        let num_fmt_id = self
            .cell_xfs
            .get(style_index as usize)
            .map_or(0, |xf| xf.num_fmt_id);
        is_date_format(num_fmt_id, &self.custom_num_fmts)
    }
}

fn edge_is_styled(border: roxmltree::Node, tag: &str) -> bool {
    border
        .children()
        .find(|n| n.has_tag_name(tag))
        .is_some_and(|edge| edge.attribute("style").is_some_and(|s| s != "none"))
}

/// Builtin numFmtIds 14-22 are the standard date/time/date-time formats
/// (ECMA-376 §18.8.30); anything else is resolved against the custom
/// `numFmts` table and scanned for date-shaped format codes.
fn is_date_format(num_fmt_id: u32, custom: &HashMap<u32, String>) -> bool {
    if (14..=22).contains(&num_fmt_id) {
        return true;
    }
    match custom.get(&num_fmt_id) {
        Some(code) => looks_like_a_date_code(code),
        None => false,
    }
}

/// A format code "looks like a date" if it contains date/time tokens
/// outside of quoted literals or bracketed locale prefixes.
fn looks_like_a_date_code(code: &str) -> bool {
    let mut in_quotes = false;
    let mut in_brackets = false;
    for ch in code.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '[' => in_brackets = true,
            ']' => in_brackets = false,
            'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S'
                if !in_quotes && !in_brackets =>
            {
                return true;
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1">
    <numFmt numFmtId="164" formatCode="yyyy-mm-dd"/>
  </numFmts>
  <borders count="2">
    <border>
      <left/><right/><top/><bottom/><diagonal/>
    </border>
    <border>
      <left style="thin"><color indexed="64"/></left>
      <right/>
      <top style="thin"><color indexed="64"/></top>
      <bottom style="thin"><color indexed="64"/></bottom>
      <diagonal/>
    </border>
  </borders>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    <xf numFmtId="0" fontId="0" fillId="0" borderId="1"/>
    <xf numFmtId="164" fontId="0" fillId="0" borderId="0"/>
  </cellXfs>
</styleSheet>"#;

    #[test]
    fn an_unstyled_border_has_no_styled_edges() {
        let styles = Styles::parse(SAMPLE).unwrap();
        let edges = styles.border_for_style(0);
        assert!(!edges.top && !edges.right && !edges.bottom && !edges.left);
    }

    #[test]
    fn a_styled_border_reports_its_styled_edges() {
        let styles = Styles::parse(SAMPLE).unwrap();
        let edges = styles.border_for_style(1);
        assert!(edges.top && edges.bottom && edges.left && !edges.right);
    }

    #[test]
    fn a_custom_date_format_is_recognized() {
        let styles = Styles::parse(SAMPLE).unwrap();
        assert!(styles.is_date_style(2));
        assert!(!styles.is_date_style(0));
    }

    #[test]
    fn builtin_date_format_ids_are_recognized() {
        let mut custom = HashMap::new();
        custom.insert(1u32, "0.00".to_string());
        assert!(is_date_format(14, &custom));
        assert!(!is_date_format(1, &custom));
    }

    #[test]
    fn quoted_and_bracketed_text_does_not_count_as_a_date_token() {
        assert!(!looks_like_a_date_code("\"Score: \"0"));
        assert!(!looks_like_a_date_code("[Red]0.00"));
        assert!(looks_like_a_date_code("[$-409]mmm yyyy"));
    }
}
