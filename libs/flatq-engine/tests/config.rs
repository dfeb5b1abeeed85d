use std::io::Write;

use flatq_api::{Effect, Value, View, Header};
use flatq_engine::{EngineError, FileInfo, Flags, Format, encode_view};

#[test]
fn load_flags_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
quiet = true
color = true
east_asian_encoding = true

[palette]
string = ["bright_green"]
"#
    )
    .unwrap();

    let flags = Flags::load(file.path()).unwrap();
    assert!(flags.quiet);
    assert!(flags.east_asian_encoding);
    let palette = flags.palette().unwrap();
    assert_eq!(palette.render(Effect::String, "a"), "\x1b[92ma\x1b[0m");
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Flags::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn malformed_toml_is_a_config_error() {
    assert!(matches!(Flags::parse("quiet = maybe"), Err(EngineError::Config(_))));
    assert!(matches!(FileInfo::parse("format = \"xml\""), Err(EngineError::Config(_))));
}

#[test]
fn east_asian_width_widens_ambiguous_cells() {
    let view = View::from_values(Header::new("t", &["c"]), vec![vec![Value::string("α")]]).unwrap();
    let info = FileInfo::new(Format::Text);

    let mut narrow = Vec::new();
    encode_view(&mut narrow, &view, &info, &Flags::default()).unwrap();
    assert_eq!(String::from_utf8(narrow).unwrap(), "+---+\n| c |\n+---+\n| α |\n+---+");

    let flags = Flags::parse("east_asian_encoding = true").unwrap();
    let mut wide = Vec::new();
    encode_view(&mut wide, &view, &info, &flags).unwrap();
    assert_eq!(String::from_utf8(wide).unwrap(), "+----+\n| c  |\n+----+\n| α  |\n+----+");
}
