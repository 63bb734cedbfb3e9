// Differential tests: the generated interpreter against the reference machine

use std::sync::OnceLock;

use proptest::prelude::*;
use tapeforge::codegen::{generate_interpreter, self_hosted_input};
use tapeforge::format::wrap_lines;
use tapeforge::generate_program_text;
use tapeforge::machine::{
    run_source_on_tape, tokenize, Machine, MachineConfig, MachineError, Op, Program,
};

/// Physical steps allowed for one self-hosted run
const HOSTED_STEP_LIMIT: u64 = 2_000_000_000;

/// Direct steps allowed for a generated program before the case is skipped
const DIRECT_STEP_LIMIT: u64 = 300;

fn interpreter() -> &'static Program {
    static INTERPRETER: OnceLock<Program> = OnceLock::new();
    INTERPRETER.get_or_init(|| Program::parse(generate_interpreter().as_str()))
}

fn run_self_hosted(source: &str, input: &[u8]) -> Vec<u8> {
    let mut machine = Machine::new(MachineConfig {
        step_limit: Some(HOSTED_STEP_LIMIT),
    });
    machine
        .run_to_vec(interpreter(), &self_hosted_input(source.as_bytes(), input))
        .expect("self-hosted run failed")
}

/// Run both ways, check they agree, and return the output
fn differential(source: &str, input: &[u8]) -> Vec<u8> {
    let direct = run_source_on_tape(source, input).expect("direct run failed");
    let hosted = run_self_hosted(source, input);
    assert_eq!(
        hosted, direct,
        "self-hosted output differs for {:?}",
        source
    );
    direct
}

#[test]
fn test_echo_two_bytes() {
    assert_eq!(differential(",[.,]", b"AB"), b"AB");
}

#[test]
fn test_nested_loop_arithmetic() {
    assert_eq!(differential("++++++++[>++++++++<-]>+.", b""), b"A");
}

#[test]
fn test_input_drives_loop() {
    assert_eq!(differential(",[>+<-]>.", &[5]), vec![5]);
}

#[test]
fn test_end_of_input_reads_zero() {
    assert_eq!(differential(",.", b""), vec![0]);
}

#[test]
fn test_cell_wraps_below_zero() {
    assert_eq!(differential("-.", b""), vec![255]);
}

#[test]
fn test_comment_bytes_ignored() {
    assert_eq!(differential("this is a comment +. and more", b""), vec![1]);
}

#[test]
fn test_forward_jump_skips_nested_loops() {
    assert_eq!(differential("[[-][+]]+.", b""), vec![1]);
    assert_eq!(differential(">>+<<[>>-<<]>>.", b""), vec![1]);
}

#[test]
fn test_backward_jump_repeats_nested_loops() {
    assert_eq!(differential("+>++<[>[-<+>]<-]>.", b""), vec![0]);
    assert_eq!(differential("+[->[-]+<]>.", b""), vec![1]);
    assert_eq!(differential("+[[-]]>+.", b""), vec![1]);
}

#[test]
fn test_multiplication_loop() {
    assert_eq!(differential("+[>+++[>+<-]<-]>>.", b""), vec![3]);
}

#[test]
fn test_left_of_first_cell_reads_program() {
    // two cells left of the data lies the opcode of `.`
    assert_eq!(differential("<<.", b""), vec![Op::Output.code()]);
    assert_eq!(differential("<<<.", b""), vec![Op::Left.code()]);
}

#[test]
fn test_wrapped_text_runs_like_unwrapped() {
    let text = generate_program_text();
    assert!(text.lines().all(|line| line.len() <= 100));
    assert_eq!(
        text.lines().collect::<String>(),
        generate_interpreter().into_string()
    );

    let wrapped = Program::parse(&text);
    let output = Machine::default()
        .run_to_vec(&wrapped, &self_hosted_input(b",[.,]", b"xy"))
        .unwrap();
    assert_eq!(output, b"xy");
    assert_eq!(wrap_lines("", 100), "");
}

/// Programs that always halt: a loop counts its own cell down and its body
/// only works on cells to the right, returning to where it started.
fn halting_block() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["+", "+", ".", ","]).prop_map(String::from);
    leaf.prop_recursive(3, 24, 4, |inner| {
        let shifted = prop::collection::vec(inner, 1..4).prop_map(|body| body.concat());
        prop_oneof![
            shifted.clone().prop_map(|body| format!(">{}<", body)),
            shifted.prop_map(|body| format!("[->{}<]", body)),
        ]
    })
}

/// Any well-nested token sequence
fn nested_tokens() -> impl Strategy<Value = String> {
    let token = prop::sample::select(vec!["+", "-", "<", ">", ",", "."]).prop_map(String::from);
    token.prop_recursive(4, 32, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(|body| format!("[{}]", body.concat()))
    })
}

fn direct_steps(source: &str, input: &[u8]) -> Result<u64, MachineError> {
    let ops: Vec<Op> = tokenize(source).collect();
    let mut machine = Machine::new(MachineConfig {
        step_limit: Some(DIRECT_STEP_LIMIT),
    });
    machine.run_on_tape(&ops, input, std::io::sink())?;
    Ok(machine.steps())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_halting_programs_agree(
        blocks in prop::collection::vec(halting_block(), 1..5),
        input in prop::collection::vec(0u8..4, 0..4),
    ) {
        let source = blocks.concat();
        prop_assume!(direct_steps(&source, &input).is_ok());
        differential(&source, &input);
    }

    #[test]
    fn prop_skipped_loop_matches_any_nesting(
        body in prop::collection::vec(nested_tokens(), 0..5),
    ) {
        let source = format!("[{}]+.", body.concat());
        prop_assert_eq!(differential(&source, b""), vec![1]);
    }

    #[test]
    fn prop_repeated_loop_matches_any_nesting(
        body in prop::collection::vec(nested_tokens(), 0..5),
    ) {
        // the inner loop sits on a zero cell, so only the outer `]` jumps back over it
        let source = format!("++[>[{}]<-]>+.", body.concat());
        prop_assert_eq!(differential(&source, b""), vec![1]);
    }
}
