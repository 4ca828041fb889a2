//! Minimal .xlsx workbooks for the tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A cell of the fixture sheet
#[derive(Clone, Debug)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// One data row: timestamp, latitude, longitude, unused, elevation
pub fn data_row(time: &str, lat: f64, lon: f64, ele: Option<f64>) -> Vec<Cell> {
    vec![
        Cell::text(time),
        Cell::Number(lat),
        Cell::Number(lon),
        Cell::text("unused"),
        ele.map(Cell::Number).unwrap_or(Cell::Empty),
    ]
}

pub struct Workbook {
    pub sheet: String,
    pub title: Cell,
    pub odometer: (Cell, Cell),
    pub rows: Vec<Vec<Cell>>,
}

impl Workbook {
    pub fn new(title: &str) -> Self {
        Self {
            sheet: "ABRP Activity".to_string(),
            title: Cell::text(title),
            odometer: (Cell::Number(100.0), Cell::Number(120.0)),
            rows: vec![],
        }
    }

    pub fn sheet(mut self, name: &str) -> Self {
        self.sheet = name.to_string();
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Store the workbook as `name` in `dir`
    pub fn save(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", self.workbook_xml()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml", self.sheet_xml()),
        ];
        for (part, content) in parts {
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
            zip.start_file(part, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }

        zip.finish().unwrap();
        path
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            escape(&self.sheet)
        )
    }

    fn sheet_xml(&self) -> String {
        let mut data = String::new();

        data.push_str(&xml_row(1, &[(0, &self.title)]));
        data.push_str(&xml_row(5, &[(10, &self.odometer.0), (11, &self.odometer.1)]));

        for (i, cells) in self.rows.iter().enumerate() {
            let indexed: Vec<(usize, &Cell)> = cells.iter().enumerate().collect();
            data.push_str(&xml_row(9 + i, &indexed));
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            data
        )
    }
}

fn xml_row(row: usize, cells: &[(usize, &Cell)]) -> String {
    let mut xml = format!(r#"<row r="{}">"#, row);

    for (col, cell) in cells {
        let reference = format!("{}{}", (b'A' + *col as u8) as char, row);
        match cell {
            Cell::Text(s) => xml.push_str(&format!(
                r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                reference,
                escape(s)
            )),
            Cell::Number(n) => {
                xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n))
            }
            Cell::Empty => {}
        }
    }

    xml.push_str("</row>");
    xml
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
