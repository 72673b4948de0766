mod fixtures;
use fixtures::*;

use pretty_assertions::assert_eq;
use rsrctmpl::{RecordShape, SpecTable, TypeTag, textio};

#[test]
fn terrain_spec_file_loads_every_line() {
    ensure_env_logger_initialized();
    let table = SpecTable::parse(TERRAIN_SPECS);
    assert_eq!(table.len(), 4);
    for tag in [b"Hedr", b"Atrb", b"Liqd", b"YCrd"] {
        assert!(table.get(&TypeTag(*tag)).is_some(), "missing {tag:?}");
    }
}

#[test]
fn one_bad_line_does_not_poison_the_table() {
    ensure_env_logger_initialized();
    let text = format!("{TERRAIN_SPECS}Junk:3k9
:noformat
Itms:3i:a,b,c
");
    let table = SpecTable::parse(&text);
    assert_eq!(table.len(), 5);
    assert!(table.get(&TypeTag(*b"Junk")).is_none());
    assert!(table.get(&TypeTag(*b"Itms")).is_some());
}

#[test]
fn later_lines_overwrite_earlier_ones_for_the_same_tag() {
    ensure_env_logger_initialized();
    let table = SpecTable::parse(
        "Spln:h+:numNubs\n\
         Spln:2i:firstNub,nubCount\n",
    );
    assert_eq!(table.len(), 1);
    let template = table.get(&TypeTag(*b"Spln")).unwrap();
    assert!(!template.is_list());
    assert_eq!(template.record_length(), 8);
    assert_eq!(
        template.field_names(),
        &["firstNub".to_string(), "nubCount".to_string()]
    );
}

#[test]
fn command_line_specs_insert_one_at_a_time() {
    ensure_env_logger_initialized();
    let mut table = SpecTable::new();
    table.insert_spec_line("STR%23:H:count").unwrap();
    let template = table.get(&TypeTag(*b"STR#")).unwrap();
    assert_eq!(template.shape(), RecordShape::Mapping);
}

#[test]
fn tags_render_through_the_selected_legacy_encoding() {
    ensure_env_logger_initialized();
    // 0xA5 is the bullet in MacRoman.
    let tag = TypeTag([b'p', b'a', b't', 0xA5]);
    assert_eq!(tag.display_with(textio::default_encoding()), "pat\u{2022}");
}
