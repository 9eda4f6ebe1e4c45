use std::cell::RefCell;
use std::collections::VecDeque;

use rand::Rng;
use ushell::config::{MAX_COMMAND_ARGS, MAX_COMMANDS, MAX_INPUT};
use ushell::io::{ByteSink, ByteSource};
use ushell::shell::editor::{ASCII_BACKSPACE, ASCII_BEL, ASCII_DEL, LINE_CAPACITY};
use ushell::shell::*;

/// Byte source fed from a queue, returns nothing once drained
#[derive(Debug, Default)]
struct MockSource {
    pending: VecDeque<u8>,
}

impl ByteSource for MockSource {
    type Error = ();

    fn read(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Sink capturing everything written to the terminal
#[derive(Debug, Default)]
struct Capture {
    bytes: Vec<u8>,
}

impl Capture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl ByteSink for Capture {
    type Error = ();

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.bytes.push(byte);
        Ok(())
    }
}

/// Handler recording every argument vector it receives
#[derive(Debug, Default)]
struct Recorder {
    calls: RefCell<Vec<Vec<String>>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl Handler<Capture> for Recorder {
    fn call(&self, _term: &mut Terminal<Capture>, argc: usize, argv: &[&str]) -> i32 {
        assert_eq!(argc, argv.len());
        self.calls
            .borrow_mut()
            .push(argv.iter().map(|arg| arg.to_string()).collect());
        0
    }
}

fn test_command_handler(_term: &mut Terminal<Capture>, _argc: usize, _argv: &[&str]) -> i32 {
    0
}

fn fail_command_handler(term: &mut Terminal<Capture>, argc: usize, _argv: &[&str]) -> i32 {
    let _ = term.print_error(ErrorKind::ArgCount, Some("count"));
    -(argc as i32)
}

fn new_shell<'a>() -> Shell<'a, MockSource, Capture> {
    Shell::init(MockSource::default(), Capture::default(), None).unwrap()
}

/// Queue `bytes` and poll until the source is drained.
fn run(shell: &mut Shell<'_, MockSource, Capture>, bytes: &[u8]) -> Vec<Dispatch> {
    shell.reader_mut().pending.extend(bytes.iter().copied());
    let mut outcomes = Vec::new();
    loop {
        match shell.poll().unwrap() {
            Step::Pending => return outcomes,
            Step::Line(outcome) => outcomes.push(outcome),
            Step::Consumed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_init_banner() {
        let shell = Shell::init(MockSource::default(), Capture::default(), Some("Board v2")).unwrap();
        assert_eq!(shell.writer().text(), "Board v2\r\ndevice>");
    }

    #[test]
    fn test_typed_line_reconstructed() {
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "echo").unwrap();

        let outcomes = run(&mut shell, b"echo hello world\r");
        assert_eq!(outcomes, vec![Dispatch::Executed(0)]);
        assert_eq!(recorder.calls(), vec![vec!["echo", "hello", "world"]]);
    }

    #[test]
    fn test_random_printable_lines_reconstructed() {
        let mut rng = rand::thread_rng();
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "r").unwrap();

        for _ in 0..200 {
            let len = rng.gen_range(0..LINE_CAPACITY - 2);
            let mut line = b"r ".to_vec();
            line.extend((0..len).map(|_| rng.gen_range(0x21u8..=0x7E)));

            run(&mut shell, &line);
            assert_eq!(shell.editor().line().as_bytes(), &line[..]);
            assert_eq!(shell.editor().cursor(), line.len());

            let outcomes = run(&mut shell, b"\r");
            assert_eq!(outcomes, vec![Dispatch::Executed(0)]);
        }
        assert_eq!(recorder.calls().len(), 200);
    }

    #[test]
    fn test_overfeeding_never_overflows() {
        let mut rng = rand::thread_rng();
        let mut shell = new_shell();

        let input: Vec<u8> = (0..MAX_INPUT * 3).map(|_| rng.gen_range(0x20u8..=0x7E)).collect();
        run(&mut shell, &input);

        assert_eq!(shell.editor().len(), MAX_INPUT - 1);
        assert_eq!(shell.editor().line().as_bytes(), &input[..MAX_INPUT - 1]);
        assert!(shell.editor().cursor() <= shell.editor().len());
        assert!(shell.writer().bytes.ends_with(&[ASCII_BEL]));
    }

    #[test]
    fn test_random_bytes_keep_invariants() {
        let mut rng = rand::thread_rng();
        let mut shell = new_shell();
        shell.set_echo(false);

        for _ in 0..5_000 {
            let byte = match rng.gen_range(0..10) {
                0 => 0x1B,
                1 => b'[',
                2 => [b'A', b'B', b'C', b'D'][rng.gen_range(0..4)],
                3 => ASCII_BACKSPACE,
                _ => rng.r#gen::<u8>(),
            };
            shell.process_byte(byte).unwrap();
            let editor = shell.editor();
            assert!(editor.len() < MAX_INPUT);
            assert!(editor.cursor() <= editor.len());
        }
    }

    #[test]
    fn test_backspace() {
        let mut shell = new_shell();
        run(&mut shell, b"hello");
        run(&mut shell, &[ASCII_BACKSPACE, ASCII_DEL]);

        assert_eq!(shell.editor().line(), "hel");
        assert_eq!(shell.editor().cursor(), 3);
        assert!(shell.writer().text().ends_with("\x08 \x08\x08 \x08"));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut shell = new_shell();
        run(&mut shell, b"ab\x1b[D\x1b[D");
        run(&mut shell, &[ASCII_BACKSPACE]);

        assert_eq!(shell.editor().line(), "ab");
        assert_eq!(shell.editor().cursor(), 0);
    }

    #[test]
    fn test_arrow_keys_move_cursor() {
        let mut shell = new_shell();
        run(&mut shell, b"abc");

        run(&mut shell, b"\x1b[D");
        assert_eq!(shell.editor().cursor(), 2);
        assert_eq!(shell.editor().line(), "abc");

        run(&mut shell, b"\x1b[C");
        assert_eq!(shell.editor().cursor(), 3);

        // Already at the end
        run(&mut shell, b"\x1b[C");
        assert_eq!(shell.editor().cursor(), 3);
        assert!(shell.writer().text().ends_with("abc\x1b[D\x1b[C"));
    }

    #[test]
    fn test_unknown_escape_final_byte() {
        let mut shell = new_shell();
        run(&mut shell, b"abc\x1b[Z");

        assert_eq!(shell.editor().line(), "abc");
        assert_eq!(shell.editor().cursor(), 3);
        assert_eq!(shell.editor().state(), EscapeState::Normal);

        run(&mut shell, b"d");
        assert_eq!(shell.editor().line(), "abcd");
    }

    #[test]
    fn test_edit_in_middle_then_dispatch() {
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "set").unwrap();

        // "st 5", move back to after 's', insert 'e'
        run(&mut shell, b"st 5\x1b[D\x1b[D\x1b[De\r");
        assert_eq!(recorder.calls(), vec![vec!["set", "5"]]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "add").unwrap();

        run(&mut shell, b"  add 3   4 \r");
        assert_eq!(recorder.calls(), vec![vec!["add", "3", "4"]]);
    }

    #[test]
    fn test_blank_line_no_dispatch_no_error() {
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "x").unwrap();
        shell.writer_mut().bytes.clear();

        assert_eq!(run(&mut shell, b"\r    \r"), vec![Dispatch::Empty, Dispatch::Empty]);
        assert!(recorder.calls().is_empty());
        assert!(!shell.writer().text().contains("NOT found"));
    }

    #[test]
    fn test_too_many_arguments_truncated() {
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "many").unwrap();

        run(&mut shell, b"many a b c d e f g h i j k l\r");
        let calls = recorder.calls();
        assert_eq!(calls[0].len(), MAX_COMMAND_ARGS);
        assert_eq!(calls[0].last().map(String::as_str), Some("i"));
    }

    #[test]
    fn test_registry_capacity() {
        let mut shell = new_shell();
        let names = ["c0", "c1", "c2", "c3", "c4"];
        assert_eq!(names.len(), MAX_COMMANDS);
        for name in names {
            assert_eq!(shell.register(&test_command_handler, name), Ok(()));
        }
        assert_eq!(
            shell.register(&test_command_handler, "overflow"),
            Err(Error::RegistryFull)
        );
        assert_eq!(shell.registry().len(), MAX_COMMANDS);
        assert_eq!(shell.commands().collect::<Vec<_>>(), names.to_vec());
    }

    #[test]
    fn test_dispatch_invokes_only_matching_handler() {
        let first = Recorder::default();
        let second = Recorder::default();
        let mut shell = new_shell();
        shell.register(&first, "first").unwrap();
        shell.register(&second, "second").unwrap();

        run(&mut shell, b"second 1 2\r");
        assert!(first.calls().is_empty());
        assert_eq!(second.calls(), vec![vec!["second", "1", "2"]]);
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let first = Recorder::default();
        let second = Recorder::default();
        let mut shell = new_shell();
        shell.register(&first, "dup").unwrap();
        shell.register(&second, "dup").unwrap();

        run(&mut shell, b"dup\r");
        assert_eq!(first.calls().len(), 1);
        assert!(second.calls().is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "known").unwrap();

        assert_eq!(run(&mut shell, b"unknown\r"), vec![Dispatch::NotFound]);
        assert_eq!(shell.writer().text().matches("Command NOT found").count(), 1);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut shell = new_shell();
        shell.register(&test_command_handler, "Reset").unwrap();
        assert_eq!(run(&mut shell, b"reset\r"), vec![Dispatch::NotFound]);
        assert_eq!(run(&mut shell, b"Reset\r"), vec![Dispatch::Executed(0)]);
    }

    #[test]
    fn test_unregister_all_invalidates_lookups() {
        let mut shell = new_shell();
        shell.register(&test_command_handler, "a").unwrap();
        shell.register(&fail_command_handler, "b").unwrap();
        shell.unregister_all();

        assert!(shell.registry().lookup("a").is_none());
        assert!(shell.registry().lookup("b").is_none());
        assert_eq!(run(&mut shell, b"a\rb\r"), vec![Dispatch::NotFound, Dispatch::NotFound]);

        // Capacity is available again
        shell.register(&test_command_handler, "a").unwrap();
        assert_eq!(run(&mut shell, b"a\r"), vec![Dispatch::Executed(0)]);
    }

    #[test]
    fn test_handler_status_propagated() {
        let mut shell = new_shell();
        shell.register(&fail_command_handler, "fail").unwrap();

        assert_eq!(run(&mut shell, b"fail x y\r"), vec![Dispatch::Executed(-3)]);
        let text = shell.writer().text();
        assert!(text.contains("#ERROR-FIELD:count\r\n#ERROR-TYPE:ARG_COUNT\r\n"));
        assert!(text.ends_with("device>"));
    }

    #[test]
    fn test_print_commands() {
        let mut shell = new_shell();
        shell.register(&test_command_handler, "alpha").unwrap();
        shell.register(&test_command_handler, "beta").unwrap();
        shell.writer_mut().bytes.clear();

        shell.print_commands().unwrap();
        assert_eq!(shell.writer().text(), "Available Commands:\r\nalpha\r\nbeta\r\n");
    }

    #[test]
    fn test_print_helpers() {
        let mut shell = new_shell();
        shell.writer_mut().bytes.clear();

        shell.print("a").unwrap();
        shell.println("b").unwrap();
        ushell::printf!(shell, "%s=%u%%", "load", 42u8).unwrap();
        shell.print_error(ErrorKind::Io, None).unwrap();
        assert_eq!(shell.writer().text(), "ab\r\nload=42%#ERROR-TYPE:IO\r\n");
    }

    #[test]
    fn test_history_recall_and_clear() {
        let recorder = Recorder::default();
        let mut shell = new_shell();
        shell.register(&recorder, "ping").unwrap();

        run(&mut shell, b"ping 1\r");
        run(&mut shell, b"xx\x1b[A");
        assert_eq!(shell.editor().line(), "ping 1");

        run(&mut shell, b"\x1b[B");
        assert_eq!(shell.editor().line(), "");

        run(&mut shell, b"\x1b[A\r");
        assert_eq!(recorder.calls().len(), 2);
    }

    #[test]
    fn test_history_disabled() {
        let mut shell = new_shell();
        shell.set_history(false);
        shell.register(&test_command_handler, "ping").unwrap();

        run(&mut shell, b"ping\r\x1b[A");
        assert!(shell.editor().is_empty());
    }

    #[test]
    fn test_input_slice() {
        let mut shell = new_shell();
        shell.register(&test_command_handler, "a").unwrap();
        assert_eq!(shell.input(b"a\rzz\r"), Ok(Some(Dispatch::NotFound)));
        assert_eq!(shell.input(b"partial"), Ok(None));
        assert_eq!(shell.editor().line(), "partial");
    }

    #[test]
    fn test_independent_instances() {
        let mut one = new_shell();
        let mut two = new_shell();
        one.register(&test_command_handler, "only_one").unwrap();

        assert_eq!(run(&mut one, b"only_one\r"), vec![Dispatch::Executed(0)]);
        assert_eq!(run(&mut two, b"only_one\r"), vec![Dispatch::NotFound]);
    }
}
