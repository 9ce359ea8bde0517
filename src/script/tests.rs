// src/script/tests.rs

use std::fs;

use super::*;

#[test]
fn file_commands_skip_blanks_and_comments() {
    let path = std::env::temp_dir().join(format!("faketerm-script-{}", std::process::id()));
    fs::write(&path, "# opening moves\nlook\n\n  take lantern  \n# end\nn\n").unwrap();
    let mut source = ScriptSource::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(source.next_command().as_deref(), Some("look"));
    assert_eq!(source.next_command().as_deref(), Some("take lantern"));
    assert_eq!(source.next_command().as_deref(), Some("n"));
    assert_eq!(source.next_command(), None);
}

#[test]
fn exhausted_source_stays_exhausted() {
    let mut source = ScriptSource::from_lines(&["look"]);
    assert!(source.next_command().is_some());
    assert!(source.next_command().is_none());
    assert!(source.next_command().is_none());
}

#[test]
fn missing_file_is_an_error() {
    assert!(ScriptSource::from_file(Path::new("/nonexistent/commands.txt")).is_err());
}
