use crate::error::XlsxError;
use crate::sheet::XlsxSheet;
use crate::shared_strings;
use crate::styles::Styles;
use sheetbanner_model::ModelError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

struct SheetEntry {
    name: String,
    target: String,
}

/// An open OOXML package: the workbook-level relationships, shared
/// strings, and cell styles are parsed once at open time; each
/// worksheet is parsed lazily from the zip archive when requested,
/// since the workbook's other sheets are rarely all needed at once.
pub struct XlsxWorkbook<R> {
    archive: zip::ZipArchive<R>,
    shared_strings: Vec<String>,
    styles: Styles,
    sheets: Vec<SheetEntry>,
}

impl XlsxWorkbook<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, XlsxError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl XlsxWorkbook<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, XlsxError> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> XlsxWorkbook<R> {
    pub fn from_reader(reader: R) -> Result<Self, XlsxError> {
        let mut archive = zip::ZipArchive::new(reader)?;

        let workbook_xml = read_entry(&mut archive, "xl/workbook.xml")?;
        let rels_xml = read_entry(&mut archive, "xl/_rels/workbook.xml.rels")?;
        let relationships = parse_relationships(&rels_xml)?;
        let sheets = parse_sheet_list(&workbook_xml, &relationships)?;

        let shared_strings = match read_entry(&mut archive, "xl/sharedStrings.xml") {
            Ok(xml) => shared_strings::parse(&xml)?,
            Err(XlsxError::Zip(zip::result::ZipError::FileNotFound)) => Vec::new(),
            Err(other) => return Err(other),
        };

        let styles_xml = read_entry(&mut archive, "xl/styles.xml")?;
        let styles = Styles::parse(&styles_xml)?;

        Ok(Self {
            archive,
            shared_strings,
            styles,
            sheets,
        })
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&mut self, name: &str) -> Result<XlsxSheet, XlsxError> {
        let target = self
            .sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.target.clone())
            .ok_or_else(|| XlsxError::Model(ModelError::SheetMissing(name.to_string())))?;

        let xml = read_entry(&mut self.archive, &target)?;
        crate::sheet::parse(&xml, &self.shared_strings, &self.styles)
    }
}

fn read_entry<R: Read + Seek>(archive: &mut zip::ZipArchive<R>, name: &str) -> Result<String, XlsxError> {
    let mut entry = archive.by_name(name)?;
    let mut contents = String::new();
    entry.read_to_string(&mut contents)?;
    Ok(contents)
}

fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, XlsxError> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| XlsxError::XmlTree {
        part: "xl/_rels/workbook.xml.rels".to_string(),
        source,
    })?;
    let mut map = HashMap::new();
    for rel in doc.root_element().children().filter(|n| n.has_tag_name("Relationship")) {
        if let (Some(id), Some(target)) = (rel.attribute("Id"), rel.attribute("Target")) {
            let target = target.trim_start_matches('/');
            let resolved = if target.starts_with("xl/") {
                target.to_string()
            } else {
                format!("xl/{target}")
            };
            map.insert(id.to_string(), resolved);
        }
    }
    Ok(map)
}

fn parse_sheet_list(
    workbook_xml: &str,
    relationships: &HashMap<String, String>,
) -> Result<Vec<SheetEntry>, XlsxError> {
    let doc = roxmltree::Document::parse(workbook_xml).map_err(|source| XlsxError::XmlTree {
        part: "xl/workbook.xml".to_string(),
        source,
    })?;
    let sheets_el = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("sheets"))
        .ok_or_else(|| XlsxError::MissingPart {
            part: "xl/workbook.xml".to_string(),
            missing: "sheets".to_string(),
        })?;

    let mut sheets = Vec::new();
    for sheet in sheets_el.children().filter(|n| n.has_tag_name("sheet")) {
        let name = sheet
            .attribute("name")
            .ok_or_else(|| XlsxError::MissingPart {
                part: "xl/workbook.xml".to_string(),
                missing: "sheet/@name".to_string(),
            })?
            .to_string();
        let rid = sheet
            .attributes()
            .find(|a| a.name() == "id")
            .map(|a| a.value().to_string())
            .ok_or_else(|| XlsxError::MissingPart {
                part: "xl/workbook.xml".to_string(),
                missing: "sheet/@r:id".to_string(),
            })?;
        let target = relationships.get(&rid).cloned().ok_or_else(|| XlsxError::MissingPart {
            part: "xl/_rels/workbook.xml.rels".to_string(),
            missing: rid.clone(),
        })?;
        sheets.push(SheetEntry { name, target });
    }
    Ok(sheets)
}
