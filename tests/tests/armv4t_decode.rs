//! Decoding ARMv4T data-processing and MSR instructions.
//!
//! Mirrors the classic ambiguity between `Data_Processing_Immediate` and
//! `Move_immediate_to_status_register`: their fixed bits overlap, and
//! only the validity predicates (and SBO bits) tell them apart.

use ocp_tests::prelude::*;

const DP_PATTERN: &str = "cccc|001ooooS|nnnnddddrrrr|iiii|iiii";
const MSR_PATTERN: &str = "cccc|00110R10|MMMMOOOOrrrr|iiii|iiii";

// TEQS r1, #32 — matches only the data-processing decoder.
const I1: u64 = 0b1110_0011_0011_0001_1111_0100_0010_0000;
// TEQ (no S) — raw fixed bits satisfy both decoders.
const I2: u64 = 0b1110_0011_0010_0001_1111_0100_0010_0000;
// cond = 1111 — both predicates reject.
const I3: u64 = 0b1111_0011_0010_0001_1111_0100_0010_0000;
// SBO bits not all-ones — only data-processing accepts.
const I4: u64 = 0b1110_0011_0010_0001_1101_0100_0010_0000;

fn data_processing() -> Opcode {
    let mut op = Opcode::new("Data_Processing_Immediate", DP_PATTERN)
        .unwrap()
        .with_predicate(|d| {
            if d.get("cond") == Some(0b1111) {
                Verdict::Reject
            } else {
                Verdict::Accept(d)
            }
        });
    op.rename_fields(&[
        ("c", "cond"),
        ("o", "opcode"),
        ("n", "Rn"),
        ("d", "Rd"),
        ("r", "rotate_imm"),
        ("i", "immed_8"),
    ])
    .unwrap();
    op
}

fn move_to_status() -> Opcode {
    let mut op = Opcode::new("Move_immediate_to_status_register", MSR_PATTERN)
        .unwrap()
        .with_predicate(|d| {
            if d.get("cond") != Some(0b1111) && d.get("SBO") == Some(0b1111) {
                Verdict::Accept(d)
            } else {
                Verdict::Reject
            }
        });
    op.rename_fields(&[
        ("c", "cond"),
        ("M", "field_mask"),
        ("O", "SBO"),
        ("r", "rotate_imm"),
        ("i", "immed_8"),
    ])
    .unwrap();
    op
}

fn registry() -> Registry {
    let mut r = Registry::new();
    r.add(data_processing()).unwrap();
    r.add(move_to_status()).unwrap();
    r
}

#[test]
fn single_opcode_decoding_extracts_renamed_fields() {
    let dp = data_processing();
    let d = dp.decode(I1).unwrap();
    assert_eq!(d.name(), "Data_Processing_Immediate");
    assert_eq!(d.get("cond"), Some(0b1110));
    assert_eq!(d.get("opcode"), Some(0b1001));
    assert_eq!(d.get("S"), Some(1));
    assert_eq!(d.get("Rn"), Some(0b0001));
    assert_eq!(d.get("Rd"), Some(0b1111));
    assert_eq!(d.get("rotate_imm"), Some(0b0100));
    assert_eq!(d.get("immed_8"), Some(0b0010_0000));
}

#[test]
fn registry_surfaces_genuine_ambiguity_as_a_tie() {
    let r = registry();
    // I1 fails MSR's fixed bits, so only data-processing matches.
    let out = r.decode(I1);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name(), "Data_Processing_Immediate");

    // I2 satisfies both decoders' fixed bits and predicates.
    let out = r.decode(I2);
    assert_eq!(out.len(), 2);

    // Both predicates veto the never-condition.
    assert!(r.decode(I3).is_empty());

    // MSR's SBO check fails, data-processing stands alone.
    let out = r.decode(I4);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name(), "Data_Processing_Immediate");
}

#[test]
fn priorities_resolve_the_tie() {
    let mut r = registry();
    r.set_priority("Move_immediate_to_status_register", -1).unwrap();
    let out = r.decode(I2);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name(), "Move_immediate_to_status_register");
    assert_eq!(r.priority("Data_Processing_Immediate"), Some(0));
    // The deprioritized decoder still wins where the other cannot match.
    let out = r.decode(I1);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].name(), "Data_Processing_Immediate");
}

#[test]
fn predicates_can_rewrite_mappings_into_mnemonics() {
    let dataproc = [
        "AND", "EOR", "SUB", "RSB", "ADD", "ADC", "SBC", "RSC", "TST", "TEQ", "CMP", "CMN",
        "ORR", "MOV", "BIC", "MVN",
    ];
    let mut op = Opcode::new("Data_Processing_Immediate", DP_PATTERN).unwrap();
    op.rename_fields(&[("c", "cond"), ("o", "opcode")]).unwrap();
    let op = op.with_predicate(move |d| {
        let cond = d.get("cond").unwrap_or(0);
        if cond == 0b1111 {
            return Verdict::Accept(Decoded::new("UNPREDICTABLE"));
        }
        let mnemonic = dataproc[d.get("opcode").unwrap_or(0) as usize];
        let comparison = matches!(mnemonic, "TST" | "TEQ" | "CMP" | "CMN");
        match (d.get("S"), comparison) {
            (Some(0), true) => Verdict::Reject,
            _ => {
                let mut d = d;
                d.set_name(format!("{mnemonic} {}", d.name()));
                Verdict::Accept(d)
            }
        }
    });

    let d = op.decode(I1).unwrap();
    assert_eq!(d.name(), "TEQ Data_Processing_Immediate");

    // Comparison without S is not a data-processing instruction at all.
    assert!(op.decode(I2).is_none());

    // The never-condition replaces the whole mapping.
    let d = op.decode(I3).unwrap();
    assert_eq!(d.name(), "UNPREDICTABLE");
    assert_eq!(d.fields().count(), 0);
}

#[test]
fn registry_ambiguity_report_names_the_overlapping_pair() {
    let r = registry();
    assert_eq!(
        r.ambiguity_list(),
        vec![(
            "Data_Processing_Immediate".to_string(),
            "Move_immediate_to_status_register".to_string()
        )]
    );
}

#[test]
fn registry_listing_is_nibble_grouped() {
    let r = registry();
    let listing = r.to_string();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "cccc_001o_oooS_nnnn_dddd_rrrr_iiii_iiii  Data_Processing_Immediate"
    );
}
