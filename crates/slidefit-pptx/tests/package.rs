//! Reading generated packages back

use std::collections::HashMap;
use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;
use slidefit_ast::ImageHandle;
use slidefit_layout::{NoImages, SlideAssembler};
use slidefit_pptx::PptxWriter;
use zip::ZipArchive;

const DECK: &str = "\
SLIDE 1 - OVERVIEW:
TITLE: Project Aurora
SLIDE_TYPE: title_slide
MAIN_POINTS:
- A faster way to ship reports

SLIDE 2 - ARCHITECTURE:
TITLE: How it fits together
SLIDE_TYPE: architecture_slide
MAIN_POINTS:
- Three services behind one gateway

SLIDE 3 - NEXT:
TITLE: Next steps
MAIN_POINTS:
- Pilot with two teams
- Collect feedback
";

fn open(bytes: &[u8]) -> ZipArchive<std::io::Cursor<&[u8]>> {
    ZipArchive::new(std::io::Cursor::new(bytes)).unwrap()
}

fn part(bytes: &[u8], name: &str) -> String {
    let mut archive = open(bytes);
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

/// Text of every `a:t` element, in document order
fn text_runs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut runs = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"a:t" => in_text = true,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"a:t" => in_text = false,
            Ok(Event::Text(ref e)) if in_text => {
                runs.push(e.unescape().unwrap().into_owned());
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("invalid xml: {e}"),
            _ => {}
        }
    }

    runs
}

#[test]
fn test_deck_round_trips_through_package() {
    let mut images: HashMap<u32, ImageHandle> = HashMap::new();
    images.insert(2, ImageHandle::new("arch", 1600, 900));

    let mut writer = PptxWriter::default().with_title("Aurora");
    writer
        .add_media("arch", b"\x89PNG\r\n\x1a\n".to_vec(), "image/png")
        .unwrap();

    let diagnostics = SlideAssembler::new()
        .assemble_into(DECK, &images, &mut writer)
        .unwrap();
    assert!(!diagnostics.has_errors());

    let bytes = writer.generate().unwrap();
    let archive = open(&bytes);
    let names: Vec<_> = archive.file_names().collect();

    for expected in [
        "[Content_Types].xml",
        "ppt/presentation.xml",
        "ppt/slides/slide1.xml",
        "ppt/slides/slide3.xml",
        "ppt/media/image1.png",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    assert_eq!(
        text_runs(&part(&bytes, "ppt/slides/slide1.xml")),
        vec!["Project Aurora", "A faster way to ship reports"]
    );
    // Shapes are written bottom to top: the body sits below the title band
    assert_eq!(
        text_runs(&part(&bytes, "ppt/slides/slide3.xml")),
        vec!["Pilot with two teams", "Collect feedback", "Next steps"]
    );

    let diagram = part(&bytes, "ppt/slides/slide2.xml");
    assert!(diagram.contains("<p:pic>"));
    let rels = part(&bytes, "ppt/slides/_rels/slide2.xml.rels");
    assert!(rels.contains("../media/image1.png"));
}

#[test]
fn test_every_slide_part_is_well_formed() {
    let mut writer = PptxWriter::default();
    SlideAssembler::new()
        .assemble_into(DECK, &NoImages, &mut writer)
        .unwrap();
    let bytes = writer.generate().unwrap();

    let mut archive = open(&bytes);
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        if !file.name().ends_with(".xml") && !file.name().ends_with(".rels") {
            continue;
        }
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();

        let mut reader = Reader::from_str(&xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("{} is not well formed: {e}", file.name()),
            }
        }
    }
}

#[test]
fn test_package_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.pptx");

    let mut writer = PptxWriter::default();
    SlideAssembler::new()
        .assemble_into(DECK, &NoImages, &mut writer)
        .unwrap();
    std::fs::write(&path, writer.generate().unwrap()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let presentation = part(&bytes, "ppt/presentation.xml");
    assert_eq!(presentation.matches("<p:sldId ").count(), 3);
}
