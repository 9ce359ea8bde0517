// src/pump/tests.rs

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use super::*;
use crate::os::ChildProcess;

/// A scripted stand-in for the interpreter: each read pops the next scripted
/// event, and every line sent is recorded.
#[derive(Default)]
struct ScriptedChild {
    reads: VecDeque<Option<&'static str>>,
    sent: Vec<String>,
}

impl ScriptedChild {
    fn with_reads(reads: &[Option<&'static str>]) -> Self {
        Self {
            reads: reads.iter().copied().collect(),
            sent: Vec::new(),
        }
    }
}

impl ChildProcess for ScriptedChild {
    fn read_available(&mut self, _timeout: Duration) -> Result<Option<Vec<u8>>> {
        match self.reads.pop_front() {
            Some(Some(chunk)) => Ok(Some(chunk.as_bytes().to_vec())),
            Some(None) => Ok(None),
            None => anyhow::bail!("script exhausted"),
        }
    }

    fn send_line(&mut self, line: &str) -> Result<()> {
        self.sent.push(line.to_string());
        Ok(())
    }
}

fn pump(reads: &[Option<&'static str>]) -> OutputPump<ScriptedChild> {
    OutputPump::new(ScriptedChild::with_reads(reads))
}

#[test]
fn single_burst_ending_at_prompt() {
    let mut pump = pump(&[Some("You are in a room.\n>")]);
    let block = pump.collect_block().unwrap();
    assert!(block.at_prompt);
    assert_eq!(block.text, "You are in a room.\n>");
    assert_eq!(block.status, None);
}

#[test]
fn burst_split_across_reads_is_joined() {
    let mut pump = pump(&[Some("First part."), None, Some("Second part.\n>")]);
    let block = pump.collect_block().unwrap();
    assert!(block.at_prompt);
    assert_eq!(block.text, "First part.\nSecond part.\n>");
}

#[test]
fn status_line_is_lifted_out_of_the_block() {
    let mut pump = pump(&[Some("Score: 5  Moves: 12\nA cold hallway.\n>")]);
    let block = pump.collect_block().unwrap();
    assert_eq!(block.status.as_deref(), Some("Score: 5  Moves: 12"));
    assert_eq!(block.text, "A cold hallway.\n>");
}

#[test]
fn pagination_is_acknowledged_and_stripped() {
    let mut pump = pump(&[
        Some("A very long description.\n***MORE***"),
        Some("The rest of it.\n>"),
    ]);
    let block = pump.collect_block().unwrap();
    assert!(block.at_prompt);
    assert_eq!(block.text, "A very long description.\nThe rest of it.\n>");
    assert_eq!(pump.child.sent, vec![String::new()]);
}

#[test]
fn bracketed_pagination_marker_is_recognized() {
    let mut pump = pump(&[
        Some("Page one.\n[Press RETURN or ENTER to continue.]"),
        Some("Page two.\n>"),
    ]);
    let block = pump.collect_block().unwrap();
    assert!(!block.text.contains("continue"));
    assert_eq!(pump.child.sent.len(), 1);
}

#[test]
fn budget_exhaustion_returns_partial_block() {
    let child = ScriptedChild::default();
    let mut pump = OutputPump::with_budget(child, Duration::from_millis(0));
    let block = pump.collect_block().unwrap();
    assert!(!block.at_prompt);
    assert_eq!(block.text, "");
}

#[test]
fn intro_waits_for_ready_phrase_and_acknowledges() {
    let mut pump = pump(&[
        Some("PLUNDERED HEARTS\nAn Infocom interactive fiction.\n"),
        None,
        Some("Press RETURN or ENTER to begin.\n"),
    ]);
    let block = pump.collect_intro().unwrap();
    assert!(block.text.contains("Infocom"));
    assert!(!block.text.contains("Press RETURN"));
    assert_eq!(pump.child.sent, vec![String::new()]);
}

#[test]
fn dead_child_is_an_error() {
    let mut pump = pump(&[]);
    assert!(pump.collect_block().is_err());
}

#[test]
fn commands_are_sent_with_leading_space_and_uppercased() {
    let mut pump = pump(&[]);
    let echoed = pump.send_command("open the door").unwrap();
    assert_eq!(echoed, "OPEN THE DOOR");
    assert_eq!(pump.child.sent, vec![" OPEN THE DOOR".to_string()]);
}

#[test]
fn direction_abbreviations_expand() {
    let cases = [
        ("n", "NORTH"),
        ("s", "SOUTH"),
        ("e", "EAST"),
        ("w", "WEST"),
        ("ne", "NORTHEAST"),
        ("nw", "NORTHWEST"),
        ("se", "SOUTHEAST"),
        ("sw", "SOUTHWEST"),
        ("u", "UP"),
        ("d", "DOWN"),
        ("z", "WAIT"),
        ("l", "LOOK"),
        ("north", "NORTH"),
        ("nearby", "NEARBY"),
    ];
    for (input, want) in cases {
        let mut pump = pump(&[]);
        assert_eq!(pump.send_command(input).unwrap(), want, "input {input:?}");
    }
}

#[test]
fn full_exchange_intro_then_command_then_response() {
    // End-to-end: title screen, acknowledgement, command, paginated reply.
    let mut pump = pump(&[
        Some("\x1b[2J\x1b[HPLUNDERED HEARTS\nPress RETURN or ENTER to begin.\n"),
        Some("Score: 0  Moves: 1\nYou are on the deck of a ship.\n***MORE***"),
        Some("Waves crash around you.\n>"),
    ]);

    let intro = pump.collect_intro().unwrap();
    assert!(intro.text.contains("PLUNDERED HEARTS"));

    pump.send_command("l").unwrap();

    let block = pump.collect_block().unwrap();
    assert!(block.at_prompt);
    assert_eq!(block.status.as_deref(), Some("Score: 0  Moves: 1"));
    assert_eq!(
        block.text,
        "You are on the deck of a ship.\nWaves crash around you.\n>"
    );
    assert_eq!(
        pump.child.sent,
        vec![String::new(), " LOOK".to_string(), String::new()]
    );
}
