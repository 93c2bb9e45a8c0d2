//! Editing and analyzing the ARMv4T top-level opcode map.
//!
//! A condensed slice of Fig 3-1 from ARM DDI0100E, exercised the way the
//! instruction-set figures are actually picked apart: fork, delete,
//! remove the condition nibble, expand and replace fields, and measure
//! which bits carry the decoding weight.

use ocp_tests::prelude::*;
use ocp_tests::{descriptions, renderings};

fn fig31() -> SetEditor {
    SetEditor::load([
        (
            "cccc|001|oo o o|S|nnnn|dddd|RRRR|   IIIIIIII",
            "Data_Processing_Immediate",
        ),
        (
            "cccc|001|10|*|0 0|**** **** **** * ** * ****",
            "Undefined_instruction",
        ),
        (
            "cccc|001|10|R|1 0|MMMM|OOOO|rrrr|   IIIIIIII",
            "Move_immediate_to_status_register",
        ),
        (
            "cccc|101|L|    oooo oooo oooo oooo oooo oooo",
            "Branch_and_branch_with_link",
        ),
        (
            "1111|0|**** * * * **** **** *****  ** * ****",
            "UNPREDICTABLE",
        ),
    ])
    .unwrap()
}

#[test]
fn the_figure_lists_its_known_ambiguities() {
    let m = fig31();
    let pairs: Vec<(usize, usize)> = m
        .ambiguities()
        .iter()
        .map(|&((i, _), (j, _))| (i, j))
        .collect();
    // Data-processing overlaps the undefined hole and MSR; the
    // UNPREDICTABLE catch-all overlaps everything with cond free.
    assert_eq!(pairs, [(0, 1), (0, 2), (0, 4), (1, 4), (2, 4)]);
}

#[test]
fn deleting_the_catch_all_narrows_the_report() {
    let mut m = fig31();
    m.delete(&[4]).unwrap();
    assert_eq!(m.ambiguities().len(), 2);
    assert!(m.undo());
    assert_eq!(m.ambiguities().len(), 5);
}

#[test]
fn removing_the_condition_nibble_from_a_fork() {
    let m = fig31();
    let mut unpred = m.fork(Some(&[4])).unwrap();
    unpred.remove_bits(&[31, 30, 29, 28]).unwrap();
    assert_eq!(unpred.rows()[0].pattern().len(), 28);
    // Only the fixed 0 at the old bit 27 is left to constrain anything.
    assert_eq!(unpred.rows()[0].pattern().mask(), 1 << 27);
    assert_eq!(unpred.rows()[0].pattern().value(), 0);
    // The fork's history is its own; the source still holds 32-bit rows.
    assert_eq!(m.rows()[4].pattern().len(), 32);
    assert_eq!(unpred.position(), (1, 2));
}

#[test]
fn condition_bits_carry_decoding_weight() {
    let m = fig31();
    let worth = m.bit_sensitivity().unwrap();
    assert_eq!(worth.len(), 32);
    // Bit 27 separates branches (101) from the 001 block.
    assert!(worth[27] >= 1);
    assert!(worth.iter().all(|&w| w >= 0));
    // Probing recorded nothing.
    assert_eq!(m.position(), (0, 1));
}

#[test]
fn replace_and_expand_edit_flows() {
    let mut m = fig31();
    // Should-be-one bits become literal ones, as for SBO columns.
    m.replace_field('O', "1", Some(&[2])).unwrap();
    assert!(renderings(&m)[2].contains("1111"));

    // Expanding the single R bit of MSR splits it into two rows.
    m.expand_field('R', Some(&[2]), &[], default_tag).unwrap();
    assert_eq!(m.len(), 6);
    assert!(descriptions(&m)[2].ends_with("_R0"));
    assert!(descriptions(&m)[3].ends_with("_R1"));

    // The two expansions differ in exactly that bit, so the fold
    // reunites them.
    let mut msr = m.fork(Some(&[2, 3])).unwrap();
    msr.combine_all();
    assert_eq!(msr.len(), 1);

    // Each edit was one snapshot; walking back restores the figure.
    assert!(m.undo());
    assert!(m.undo());
    assert_eq!(renderings(&m), renderings(&fig31()));
}

#[test]
fn titles_survive_structural_edits_without_joining_analyses() {
    let mut m = fig31();
    m.title(0, "Fig 3-1").unwrap();
    m.remove_bits(&[31, 30, 29, 28]).unwrap();
    assert!(m.rows()[0].is_title());
    assert_eq!(m.rows()[1].pattern().len(), 28);
    // Ambiguity indices count non-title rows only.
    let pairs: Vec<(usize, usize)> = m
        .ambiguities()
        .iter()
        .map(|&((i, _), (j, _))| (i, j))
        .collect();
    assert!(pairs.iter().all(|&(i, j)| i < 5 && j < 5));
}

#[test]
fn saving_the_current_snapshot_reconstructs_the_loader_call() {
    let mut m = fig31();
    m.delete(&[1, 3, 4]).unwrap();
    let mut out = Vec::new();
    m.save("dp", &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "let dp = SetEditor::load([\n    \
         (\"cccc|001|oo o o|S|nnnn|dddd|RRRR|   IIIIIIII\", \"Data_Processing_Immediate\"),\n    \
         (\"cccc|001|10|R|1 0|MMMM|OOOO|rrrr|   IIIIIIII\", \"Move_immediate_to_status_register\"),\n\
         ])?;\n"
    );
}
